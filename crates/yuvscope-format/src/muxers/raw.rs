//! 原始平面输出.
//!
//! 每个平面原样写出, 不带任何头部, 文件名为 `frame_{序号:06}_{Y|U|V}.raw`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use yuvscope_core::{Frame, PlaneKind, YuvResult};

/// 平面 dump 文件名
pub fn raw_plane_file_name(index: u64, kind: PlaneKind) -> String {
    format!("frame_{index:06}_{kind}.raw")
}

/// 将整帧按 Y/U/V 顺序写入一个流 (即还原该帧在原始流中的字节)
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> YuvResult<()> {
    for plane in frame.planes() {
        writer.write_all(plane.samples())?;
    }
    Ok(())
}

/// 在 `dir` 下为三个平面各写一个原始文件, 返回按 Y/U/V 顺序的路径
pub fn save_raw_planes(dir: &Path, frame: &Frame) -> YuvResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(3);
    for plane in frame.planes() {
        let path = dir.join(raw_plane_file_name(frame.index(), plane.kind()));
        fs::write(&path, plane.samples())?;
        paths.push(path);
    }
    log::debug!("已保存帧 {} 的原始平面到 {}", frame.index(), dir.display());
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuvscope_core::PlaneLayout;

    fn sample_frame() -> Frame {
        let layout = PlaneLayout::new(4, 2).unwrap();
        let data: Vec<u8> = (0..layout.frame_size() as u8).collect();
        Frame::from_bytes(3, &layout, data).unwrap()
    }

    #[test]
    fn test_raw_plane_file_name() {
        assert_eq!(raw_plane_file_name(42, PlaneKind::U), "frame_000042_U.raw");
    }

    #[test]
    fn test_write_frame_restores_stream_bytes() {
        let frame = sample_frame();
        let mut out = Vec::new();
        write_frame(&mut out, &frame).unwrap();
        assert_eq!(out, (0..12u8).collect::<Vec<_>>());
    }

    #[test]
    fn test_save_raw_planes() {
        let dir = tempfile::TempDir::new().unwrap();
        let frame = sample_frame();
        let paths = save_raw_planes(dir.path(), &frame).unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("frame_000003_Y.raw"));
        assert_eq!(fs::read(&paths[0]).unwrap(), (0..8u8).collect::<Vec<_>>());
        assert_eq!(fs::read(&paths[1]).unwrap(), vec![8, 9]);
        assert_eq!(fs::read(&paths[2]).unwrap(), vec![10, 11]);
    }
}

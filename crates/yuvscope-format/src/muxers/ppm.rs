//! PPM (P6) / PGM (P5) 图像输出.
//!
//! 头部格式 `P6\n<width> <height>\n255\n`, 随后为行优先的 RGB 三元组,
//! 每通道 1 字节. PGM 相同, 只是魔数为 P5 且每像素 1 字节.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use yuvscope_core::{Plane, RgbPixel, YuvError, YuvResult};

/// 写出 PPM 头部
fn write_header<W: Write>(writer: &mut W, magic: &str, width: u32, height: u32) -> YuvResult<()> {
    write!(writer, "{magic}\n{width} {height}\n255\n")?;
    Ok(())
}

/// 将打包的 RGB24 数据写为 PPM
pub fn write_ppm<W: Write>(writer: &mut W, width: u32, height: u32, rgb: &[u8]) -> YuvResult<()> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(YuvError::InvalidArgument(format!(
            "RGB 数据长度 {} 与 {width}x{height} 不符 (期望 {expected})",
            rgb.len()
        )));
    }
    write_header(writer, "P6", width, height)?;
    writer.write_all(rgb)?;
    Ok(())
}

/// 将像素序列写为 PPM
pub fn write_ppm_pixels<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[RgbPixel],
) -> YuvResult<()> {
    if pixels.len() != width as usize * height as usize {
        return Err(YuvError::InvalidArgument(format!(
            "像素数 {} 与 {width}x{height} 不符",
            pixels.len()
        )));
    }
    write_header(writer, "P6", width, height)?;
    for pixel in pixels {
        writer.write_all(&pixel.to_array())?;
    }
    Ok(())
}

/// 将单个平面写为灰度 PGM (用于差值图)
pub fn write_pgm<W: Write>(writer: &mut W, plane: &Plane) -> YuvResult<()> {
    write_header(writer, "P5", plane.width(), plane.height())?;
    writer.write_all(plane.samples())?;
    Ok(())
}

/// 创建文件并写出 PPM
pub fn save_ppm(path: &Path, width: u32, height: u32, rgb: &[u8]) -> YuvResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(&mut writer, width, height, rgb)?;
    writer.flush()?;
    log::debug!("已保存 PPM: {}", path.display());
    Ok(())
}

/// 创建文件并写出 PGM
pub fn save_pgm(path: &Path, plane: &Plane) -> YuvResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_pgm(&mut writer, plane)?;
    writer.flush()?;
    log::debug!("已保存 PGM: {}", path.display());
    Ok(())
}

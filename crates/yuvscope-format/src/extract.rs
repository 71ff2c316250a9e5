//! 帧提取.
//!
//! 按帧序号计算字节偏移, 从可 seek 的字节流读取整帧并拆分为 Y/U/V 平面.
//! 提取器不持有流句柄, 也不缓存帧; 同一序号重复提取会重新读取.
//! 不同线程各自持有独立句柄时可并行提取.

use std::io::{self, Read, Seek, SeekFrom};

use yuvscope_core::{Frame, PlaneLayout, YuvResult};

/// 单次提取的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// 完整帧
    Frame(Frame),
    /// 流已结束 (读到 0 字节), 正常终止信号
    EndOfStream,
    /// 末帧被截断, 只读到 `bytes` 字节 (不做零填充)
    ShortRead { bytes: usize },
}

impl Extracted {
    /// 取出完整帧, 其他情况返回 None
    pub fn into_frame(self) -> Option<Frame> {
        match self {
            Self::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// 是否为完整帧
    pub fn is_frame(&self) -> bool {
        matches!(self, Self::Frame(_))
    }
}

/// YUV420P 帧提取器
#[derive(Debug, Clone, Copy)]
pub struct FrameExtractor {
    layout: PlaneLayout,
}

impl FrameExtractor {
    pub fn new(layout: PlaneLayout) -> Self {
        Self { layout }
    }

    /// 使用的平面布局
    pub fn layout(&self) -> &PlaneLayout {
        &self.layout
    }

    /// 提取第 `index` 帧
    ///
    /// 偏移溢出返回 `InvalidArgument`, 底层 I/O 失败返回 `Io`.
    /// 流末尾与截断通过 [`Extracted`] 表达, 不视为错误.
    pub fn extract<R: Read + Seek + ?Sized>(
        &self,
        stream: &mut R,
        index: u64,
    ) -> YuvResult<Extracted> {
        let offset = self.layout.frame_offset(index)?;
        stream.seek(SeekFrom::Start(offset))?;

        let mut buf = vec![0u8; self.layout.frame_size()];
        let read = read_full(stream, &mut buf)?;

        if read == 0 {
            log::debug!("帧 {index}: 偏移 {offset} 处已到流末尾");
            return Ok(Extracted::EndOfStream);
        }
        if read < buf.len() {
            log::warn!(
                "帧 {index}: 只读到 {read}/{} 字节, 末帧被截断",
                self.layout.frame_size()
            );
            return Ok(Extracted::ShortRead { bytes: read });
        }

        let frame = Frame::from_bytes(index, &self.layout, buf)?;
        Ok(Extracted::Frame(frame))
    }

    /// 流中的完整帧数
    ///
    /// 通过 seek 到末尾获取长度, 结束后恢复原读取位置.
    pub fn frame_count<R: Seek + ?Sized>(&self, stream: &mut R) -> YuvResult<u64> {
        let current = stream.stream_position()?;
        let total = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(current))?;
        Ok(self.layout.frame_count(total))
    }

    /// 从第 0 帧开始顺序遍历完整帧
    pub fn frames<'a, R: Read + Seek + ?Sized>(&'a self, stream: &'a mut R) -> Frames<'a, R> {
        Frames {
            extractor: self,
            stream,
            next_index: 0,
            short_read: None,
            done: false,
        }
    }
}

/// 顺序帧迭代器
///
/// 遇到流末尾或截断帧时停止, 截断字节数可通过 [`Frames::short_read`] 查询.
pub struct Frames<'a, R: ?Sized> {
    extractor: &'a FrameExtractor,
    stream: &'a mut R,
    next_index: u64,
    short_read: Option<usize>,
    done: bool,
}

impl<R: ?Sized> Frames<'_, R> {
    /// 末尾截断帧的字节数 (迭代结束后有效)
    pub fn short_read(&self) -> Option<usize> {
        self.short_read
    }
}

impl<R: Read + Seek + ?Sized> Iterator for Frames<'_, R> {
    type Item = YuvResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.extractor.extract(&mut *self.stream, self.next_index) {
            Ok(Extracted::Frame(frame)) => {
                self.next_index += 1;
                Some(Ok(frame))
            }
            Ok(Extracted::EndOfStream) => {
                self.done = true;
                None
            }
            Ok(Extracted::ShortRead { bytes }) => {
                self.done = true;
                self.short_read = Some(bytes);
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// 尽量读满缓冲区, 返回实际读取字节数 (源返回 0 时提前结束)
fn read_full<R: Read + ?Sized>(stream: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match stream.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use yuvscope_core::YuvError;

    /// 构造 n 帧, 每帧 Y 全为帧序号, U/V 为 128
    fn make_stream(layout: &PlaneLayout, frames: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(layout.frame_size() * frames);
        for i in 0..frames {
            data.extend(std::iter::repeat_n(i as u8, layout.y_size()));
            data.extend(std::iter::repeat_n(128u8, 2 * layout.uv_size()));
        }
        data
    }

    #[test]
    fn test_extract_each_frame() {
        let layout = PlaneLayout::new(8, 8).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut cursor = Cursor::new(make_stream(&layout, 3));

        for i in [2u64, 0, 1] {
            let frame = extractor.extract(&mut cursor, i).unwrap().into_frame().unwrap();
            assert_eq!(frame.index(), i);
            assert!(frame.y().samples().iter().all(|&s| s == i as u8));
            assert!(frame.u().samples().iter().all(|&s| s == 128));
        }
    }

    #[test]
    fn test_extract_empty_stream_is_end_of_stream() {
        let layout = PlaneLayout::new(8, 8).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert_eq!(
            extractor.extract(&mut cursor, 0).unwrap(),
            Extracted::EndOfStream
        );
    }

    #[test]
    fn test_extract_short_stream_is_short_read() {
        let layout = PlaneLayout::new(8, 8).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut cursor = Cursor::new(vec![7u8; 50]);
        assert_eq!(
            extractor.extract(&mut cursor, 0).unwrap(),
            Extracted::ShortRead { bytes: 50 }
        );
    }

    #[test]
    fn test_extract_beyond_end() {
        let layout = PlaneLayout::new(8, 8).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut cursor = Cursor::new(make_stream(&layout, 2));
        assert_eq!(
            extractor.extract(&mut cursor, 5).unwrap(),
            Extracted::EndOfStream
        );
    }

    #[test]
    fn test_extract_offset_overflow() {
        let layout = PlaneLayout::new(8, 8).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut cursor = Cursor::new(make_stream(&layout, 1));
        assert!(matches!(
            extractor.extract(&mut cursor, u64::MAX),
            Err(YuvError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_frame_count_restores_position() {
        let layout = PlaneLayout::new(8, 8).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut data = make_stream(&layout, 4);
        data.extend_from_slice(&[1, 2, 3]);
        let mut cursor = Cursor::new(data);
        cursor.set_position(17);

        assert_eq!(extractor.frame_count(&mut cursor).unwrap(), 4);
        assert_eq!(cursor.position(), 17);
    }

    #[test]
    fn test_frames_iterator_stops_at_partial_frame() {
        let layout = PlaneLayout::new(4, 4).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut data = make_stream(&layout, 3);
        data.extend_from_slice(&[9; 10]);
        let mut cursor = Cursor::new(data);

        let mut frames = extractor.frames(&mut cursor);
        let indices: Vec<u64> = frames
            .by_ref()
            .map(|f| f.unwrap().index())
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(frames.short_read(), Some(10));
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        let layout = PlaneLayout::new(8, 8).unwrap();
        let extractor = FrameExtractor::new(layout);
        let data: Vec<u8> = (0..layout.frame_size() * 2).map(|i| (i * 7) as u8).collect();
        let mut cursor = Cursor::new(data);

        let first = extractor.extract(&mut cursor, 1).unwrap();
        let _ = extractor.extract(&mut cursor, 0).unwrap();
        let second = extractor.extract(&mut cursor, 1).unwrap();
        assert_eq!(first, second);
    }

    /// 每次最多返回 3 字节的读取源, 模拟管道类短读
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = buf.len().min(3);
            self.0.read(&mut buf[..n])
        }
    }

    impl Seek for Trickle {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.0.seek(pos)
        }
    }

    #[test]
    fn test_extract_tolerates_partial_reads() {
        let layout = PlaneLayout::new(4, 4).unwrap();
        let extractor = FrameExtractor::new(layout);
        let mut stream = Trickle(Cursor::new(make_stream(&layout, 2)));
        let frame = extractor.extract(&mut stream, 1).unwrap().into_frame().unwrap();
        assert!(frame.y().samples().iter().all(|&s| s == 1));
    }
}

//! 分辨率与 YUV420 平面布局.
//!
//! 一帧 YUV420P 的字节排列:
//! ```text
//! [Y: width*height][U: (width/2)*(height/2)][V: (width/2)*(height/2)]
//! ```
//! 行优先, 无填充, 无帧头, 帧与帧之间没有分隔符.

use std::fmt;

use crate::{YuvError, YuvResult};

/// 视频分辨率
///
/// 4:2:0 子采样要求宽高均为正偶数, 构造时校验.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    /// 创建分辨率, 宽高为 0 或奇数时返回 `InvalidResolution`
    pub fn new(width: u32, height: u32) -> YuvResult<Self> {
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(YuvError::InvalidResolution { width, height });
        }
        Ok(Self { width, height })
    }

    /// 亮度宽度
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// 亮度高度
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// 色度平面宽度
    pub const fn chroma_width(&self) -> u32 {
        self.width / 2
    }

    /// 色度平面高度
    pub const fn chroma_height(&self) -> u32 {
        self.height / 2
    }

    /// 计算平面布局
    pub fn layout(&self) -> PlaneLayout {
        PlaneLayout::from(*self)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// YUV420P 单帧内的平面字节范围
///
/// 只由 [`Resolution`] 推导, 不单独保存任何可变状态.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneLayout {
    resolution: Resolution,
    y_size: usize,
    uv_size: usize,
}

impl PlaneLayout {
    /// 从宽高直接创建布局
    pub fn new(width: u32, height: u32) -> YuvResult<Self> {
        Resolution::new(width, height).map(Self::from)
    }

    /// 对应的分辨率
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Y 平面字节数
    pub const fn y_size(&self) -> usize {
        self.y_size
    }

    /// 单个色度平面 (U 或 V) 字节数
    pub const fn uv_size(&self) -> usize {
        self.uv_size
    }

    /// 整帧字节数
    pub const fn frame_size(&self) -> usize {
        self.y_size + 2 * self.uv_size
    }

    /// U 平面在帧内的起始偏移
    pub const fn u_offset(&self) -> usize {
        self.y_size
    }

    /// V 平面在帧内的起始偏移
    pub const fn v_offset(&self) -> usize {
        self.y_size + self.uv_size
    }

    /// 第 `index` 帧在流中的字节偏移
    ///
    /// 乘法溢出 u64 时返回 `InvalidArgument`.
    pub fn frame_offset(&self, index: u64) -> YuvResult<u64> {
        index
            .checked_mul(self.frame_size() as u64)
            .ok_or_else(|| YuvError::InvalidArgument(format!("帧序号过大, 偏移溢出: {index}")))
    }

    /// 给定流总字节数时的完整帧数 (向下取整, 丢弃末尾不完整帧)
    pub const fn frame_count(&self, total_bytes: u64) -> u64 {
        total_bytes / self.frame_size() as u64
    }

    /// 末尾不完整帧的残余字节数
    pub const fn trailing_bytes(&self, total_bytes: u64) -> u64 {
        total_bytes % self.frame_size() as u64
    }
}

impl From<Resolution> for PlaneLayout {
    fn from(resolution: Resolution) -> Self {
        let y_size = resolution.width as usize * resolution.height as usize;
        let uv_size = resolution.chroma_width() as usize * resolution.chroma_height() as usize;
        Self {
            resolution,
            y_size,
            uv_size,
        }
    }
}

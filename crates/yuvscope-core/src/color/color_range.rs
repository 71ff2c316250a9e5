//! 色彩范围定义.

use std::fmt;

/// 色彩范围
///
/// 决定 YUV 样本值的解释方式:
/// - Limited: Y 16-235, Cb/Cr 16-240 (8 位) - 广播标准, 解码器输出的默认约定
/// - Full: Y/Cb/Cr 0-255 (8 位) - JPEG/PC 标准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorRange {
    /// 有限范围 (广播/TV) Y 16-235
    #[default]
    Limited,
    /// 完整范围 (JPEG/PC) Y 0-255
    Full,
}

impl ColorRange {
    /// 亮度黑电平
    pub const fn luma_black(&self) -> u8 {
        match self {
            Self::Limited => 16,
            Self::Full => 0,
        }
    }

    /// 亮度白电平
    pub const fn luma_white(&self) -> u8 {
        match self {
            Self::Limited => 235,
            Self::Full => 255,
        }
    }
}

impl fmt::Display for ColorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited => f.write_str("limited"),
            Self::Full => f.write_str("full"),
        }
    }
}

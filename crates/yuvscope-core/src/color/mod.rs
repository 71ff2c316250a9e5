//! 色彩相关类型定义.

mod color_range;

pub use color_range::ColorRange;

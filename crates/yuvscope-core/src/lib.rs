//! # yuvscope-core
//!
//! yuvscope 核心库, 提供分辨率、平面布局、帧、像素与错误类型.
//!
//! 分辨率在整个分析会话中固定, 以 [`Resolution`] 值显式传递给每个组件,
//! 不存在进程级默认值.

pub mod color;
pub mod error;
pub mod layout;
pub mod pixel;
pub mod plane;

// 重导出常用类型
pub use color::ColorRange;
pub use error::{YuvError, YuvResult};
pub use layout::{PlaneLayout, Resolution};
pub use pixel::RgbPixel;
pub use plane::{Frame, Plane, PlaneKind};

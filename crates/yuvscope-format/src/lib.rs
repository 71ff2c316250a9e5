//! # yuvscope-format
//!
//! 原始 YUV420 平面流的读写:
//! - 帧提取: 按序号定位并拆分 Y/U/V 平面, 区分流末尾与末帧截断
//! - 输出: PPM (P6) / PGM (P5) 图像, 原始平面 dump

pub mod extract;
pub mod muxers;

pub use extract::{Extracted, FrameExtractor, Frames};

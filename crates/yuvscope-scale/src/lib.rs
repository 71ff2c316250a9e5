//! # yuvscope-scale
//!
//! YUV420P → RGB 颜色转换库.
//!
//! 提供 BT.601 定点与浮点两条转换路径, 以及整帧转换 (最近邻色度上采样).
//! 两条路径在有限范围下对同一输入逐通道相差不超过 ±2.

pub mod convert;

pub use convert::{
    ConvertMethod, convert_frame, convert_frame_rgb24, convert_pixel, convert_pixel_float,
    convert_pixel_with,
};

use yuvscope_core::{Frame, RgbPixel};

/// 颜色转换器
///
/// 配置一次转换方法后可多次复用.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter {
    /// 转换方法
    pub method: ConvertMethod,
}

impl ColorConverter {
    /// 创建转换器
    pub fn new(method: ConvertMethod) -> Self {
        Self { method }
    }

    /// 转换单个样本三元组
    pub fn convert_pixel(&self, y: u8, u: u8, v: u8) -> RgbPixel {
        convert_pixel_with(self.method, y, u, v)
    }

    /// 整帧转换为像素序列
    pub fn convert_frame(&self, frame: &Frame) -> Vec<RgbPixel> {
        convert::convert_frame(frame, self.method)
    }

    /// 整帧转换为打包 RGB24
    pub fn convert_frame_rgb24(&self, frame: &Frame) -> Vec<u8> {
        log::trace!(
            "转换帧 {} ({}x{}) 方法 {:?}",
            frame.index(),
            frame.width(),
            frame.height(),
            self.method
        );
        convert::convert_frame_rgb24(frame, self.method)
    }
}

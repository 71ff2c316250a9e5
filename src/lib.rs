//! # yuvscope
//!
//! 纯 Rust 实现的原始 YUV420P 帧检查工具, 用于诊断解码器输出的损坏.
//!
//! - **帧提取**: 按固定分辨率从无头部字节流定位并切分帧
//! - **颜色转换**: BT.601 定点/浮点 YUV → RGB
//! - **统计与诊断**: 平面统计、帧间差分、启发式有效性分类
//! - **导出**: PPM/PGM 图像与原始平面
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use std::fs::File;
//! use yuvscope::analysis::FrameAnalyzer;
//! use yuvscope::core::Resolution;
//! use yuvscope::format::FrameExtractor;
//!
//! let res = Resolution::new(352, 288).unwrap();
//! let extractor = FrameExtractor::new(res.layout());
//! let mut file = File::open("decoded.yuv").unwrap();
//! for frame in extractor.frames(&mut file) {
//!     let analysis = FrameAnalyzer::default().analyze(&frame.unwrap(), None).unwrap();
//!     println!("{}", analysis.summary());
//! }
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `yuvscope-core` | 分辨率、平面布局、帧与错误类型 |
//! | `yuvscope-format` | 帧提取与 PPM/PGM/原始平面输出 |
//! | `yuvscope-scale` | YUV → RGB 颜色转换 |
//! | `yuvscope-analysis` | 统计、差分、有效性分类与预览 |

/// 核心类型
pub use yuvscope_core as core;

/// 帧提取与图像输出
pub use yuvscope_format as format;

/// 颜色转换
pub use yuvscope_scale as scale;

/// 统计与诊断
pub use yuvscope_analysis as analysis;

/// 获取 yuvscope 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

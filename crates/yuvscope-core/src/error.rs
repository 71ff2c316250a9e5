//! 统一错误类型定义.
//!
//! 所有 yuvscope crate 共用的错误类型, 支持跨模块传播.
//!
//! 流末尾与末帧截断不是错误, 由 `yuvscope-format` 的提取结果枚举表达.

use thiserror::Error;

/// yuvscope 统一错误类型
#[derive(Debug, Error)]
pub enum YuvError {
    /// 无效分辨率 (宽高为 0 或为奇数), 整个分析会话无法继续
    #[error("无效分辨率: {width}x{height} (宽高必须为正偶数)")]
    InvalidResolution { width: u32, height: u32 },

    /// 无效参数 (调用方错误, 如空平面、帧偏移溢出)
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 两个平面尺寸不一致, 无法逐样本比较
    #[error("平面尺寸不匹配: 期望 {expected:?}, 实际 {actual:?}")]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// I/O 错误
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// yuvscope 统一 Result 类型
pub type YuvResult<T> = Result<T, YuvError>;

//! 行尾探测.
//!
//! 宽度设置错误 (步长不匹配) 时, 原始文件中的填充字节常落在每行末尾,
//! 表现为前若干行最后一个样本完全相同. 这里只采样, 判定交给分类器.

use yuvscope_core::Plane;

/// 默认采样行数
pub const DEFAULT_PROBE_ROWS: u32 = 10;

/// 判定为一致所需的最少样本数 (严格大于)
const MIN_UNIFORM_SAMPLES: usize = 5;

/// 行尾采样结果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineEndProbe {
    /// 各行最后一个样本
    pub samples: Vec<u8>,
}

impl LineEndProbe {
    /// 样本数超过 5 且全部相同
    pub fn is_uniform(&self) -> bool {
        match self.samples.split_first() {
            Some((first, rest)) => {
                self.samples.len() > MIN_UNIFORM_SAMPLES && rest.iter().all(|s| s == first)
            }
            None => false,
        }
    }

    /// 一致时的公共取值
    pub fn uniform_value(&self) -> Option<u8> {
        if self.is_uniform() {
            self.samples.first().copied()
        } else {
            None
        }
    }
}

/// 采样平面前 `rows` 行的末尾样本
pub fn probe_line_ends(plane: &Plane, rows: u32) -> LineEndProbe {
    if plane.width() == 0 {
        return LineEndProbe::default();
    }
    let samples = (0..rows.min(plane.height()))
        .filter_map(|row| plane.get(row, plane.width() - 1))
        .collect();
    LineEndProbe { samples }
}

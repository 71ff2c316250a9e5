//! 帧间差分.
//!
//! 逐样本比较两个同尺寸平面, 统计平均绝对差、最大绝对差,
//! 以及绝对差超过阈值的样本数.

use yuvscope_core::{Frame, Plane, YuvError, YuvResult};

/// 默认离群阈值, 绝对差严格大于该值计为离群
pub const DEFAULT_OUTLIER_THRESHOLD: u8 = 50;

/// 单平面差分统计
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffStats {
    pub mean_abs_diff: f64,
    pub max_abs_diff: u8,
    /// 绝对差 > 阈值的样本数
    pub outlier_count: usize,
    pub total_samples: usize,
}

impl DiffStats {
    /// 离群样本比例, 空平面为 0
    pub fn outlier_ratio(&self) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        self.outlier_count as f64 / self.total_samples as f64
    }

    /// 两平面逐样本相同
    pub fn is_identical(&self) -> bool {
        self.max_abs_diff == 0
    }
}

/// 三个平面的差分结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDiff {
    pub y: DiffStats,
    pub u: DiffStats,
    pub v: DiffStats,
}

/// 平面比较器
#[derive(Debug, Clone, Copy)]
pub struct FrameComparator {
    outlier_threshold: u8,
}

impl Default for FrameComparator {
    fn default() -> Self {
        Self::new(DEFAULT_OUTLIER_THRESHOLD)
    }
}

impl FrameComparator {
    pub fn new(outlier_threshold: u8) -> Self {
        Self { outlier_threshold }
    }

    pub fn outlier_threshold(&self) -> u8 {
        self.outlier_threshold
    }

    fn check_shape(a: &Plane, b: &Plane) -> YuvResult<()> {
        if a.shape() != b.shape() {
            return Err(YuvError::ShapeMismatch {
                expected: a.shape(),
                actual: b.shape(),
            });
        }
        Ok(())
    }

    /// 比较两个平面, 尺寸不同返回 `ShapeMismatch`
    pub fn diff(&self, a: &Plane, b: &Plane) -> YuvResult<DiffStats> {
        Self::check_shape(a, b)?;

        let mut sum = 0u64;
        let mut max_abs_diff = 0u8;
        let mut outlier_count = 0usize;
        for (&sa, &sb) in a.samples().iter().zip(b.samples()) {
            let d = sa.abs_diff(sb);
            sum += u64::from(d);
            max_abs_diff = max_abs_diff.max(d);
            if d > self.outlier_threshold {
                outlier_count += 1;
            }
        }

        let total_samples = a.len();
        let mean_abs_diff = if total_samples == 0 {
            0.0
        } else {
            sum as f64 / total_samples as f64
        };

        Ok(DiffStats {
            mean_abs_diff,
            max_abs_diff,
            outlier_count,
            total_samples,
        })
    }

    /// 逐平面比较两帧
    pub fn diff_frames(&self, a: &Frame, b: &Frame) -> YuvResult<FrameDiff> {
        Ok(FrameDiff {
            y: self.diff(a.y(), b.y())?,
            u: self.diff(a.u(), b.u())?,
            v: self.diff(a.v(), b.v())?,
        })
    }
}

/// 生成逐样本绝对差平面 (可导出为 PGM 查看)
pub fn abs_diff_plane(a: &Plane, b: &Plane) -> YuvResult<Plane> {
    FrameComparator::check_shape(a, b)?;
    let samples = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&sa, &sb)| sa.abs_diff(sb))
        .collect();
    Plane::new(a.kind(), a.width(), a.height(), samples)
}

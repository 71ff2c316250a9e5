//! 单帧摘要行.

use std::fmt;

use crate::stats::PlaneStats;

/// 单个平面的 (min, max, mean)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSummary {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
}

impl From<&PlaneStats> for PlaneSummary {
    fn from(stats: &PlaneStats) -> Self {
        Self {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
        }
    }
}

impl fmt::Display for PlaneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{}, avg={:.1})", self.min, self.max, self.mean)
    }
}

/// 帧摘要, 显示为 `Frame N: Y(min-max, avg=..) U(..) V(..)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub index: u64,
    pub y: PlaneSummary,
    pub u: PlaneSummary,
    pub v: PlaneSummary,
}

impl FrameSummary {
    pub fn new(index: u64, y: &PlaneStats, u: &PlaneStats, v: &PlaneStats) -> Self {
        Self {
            index,
            y: y.into(),
            u: u.into(),
            v: v.into(),
        }
    }
}

impl fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame {}: Y{} U{} V{}",
            self.index, self.y, self.u, self.v
        )
    }
}

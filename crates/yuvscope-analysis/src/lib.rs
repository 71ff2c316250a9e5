//! # yuvscope-analysis
//!
//! 帧质量分析:
//! - **stats**: 平面统计 (最值, 均值, 标准差, 不同取值数, 直方图)
//! - **diff**: 两帧逐平面绝对差
//! - **stride**: 行尾探测, 用于发现宽度/步长错误
//! - **validity**: 启发式有效性分类
//! - **preview**: ASCII 预览
//! - **summary**: 单帧摘要行
//!
//! ## 使用示例
//!
//! ```rust
//! use yuvscope_analysis::FrameAnalyzer;
//! use yuvscope_core::{Frame, Plane, PlaneKind};
//!
//! let frame = Frame::from_planes(
//!     0,
//!     Plane::filled(PlaneKind::Y, 4, 4, 16),
//!     Plane::filled(PlaneKind::U, 2, 2, 128),
//!     Plane::filled(PlaneKind::V, 2, 2, 128),
//! )
//! .unwrap();
//! let analysis = FrameAnalyzer::default().analyze(&frame, None).unwrap();
//! assert!(analysis.has_critical());
//! ```

pub mod diff;
pub mod preview;
pub mod stats;
pub mod stride;
pub mod summary;
pub mod validity;

pub use diff::{DiffStats, FrameComparator, FrameDiff, abs_diff_plane};
pub use preview::{AsciiPalette, render_ascii};
pub use stats::{PlaneStatistics, PlaneStats};
pub use stride::{LineEndProbe, probe_line_ends};
pub use summary::FrameSummary;
pub use validity::{
    Finding, FindingKind, FrameEvidence, Severity, ValidityClassifier, ValidityThresholds,
};

use yuvscope_core::{Frame, YuvResult};

/// 单帧分析结果
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    pub index: u64,
    pub y: PlaneStats,
    pub u: PlaneStats,
    pub v: PlaneStats,
    /// 与参考帧的差分 (未提供参考帧时为 None)
    pub diff: Option<FrameDiff>,
    pub line_ends: LineEndProbe,
    pub findings: Vec<Finding>,
}

impl FrameAnalysis {
    pub fn summary(&self) -> FrameSummary {
        FrameSummary::new(self.index, &self.y, &self.u, &self.v)
    }

    pub fn has_critical(&self) -> bool {
        self.findings.iter().any(Finding::is_critical)
    }
}

/// 统计 + 差分 + 分类的组合分析器
#[derive(Debug, Clone, Copy)]
pub struct FrameAnalyzer {
    pub statistics: PlaneStatistics,
    pub comparator: FrameComparator,
    pub classifier: ValidityClassifier,
    /// 行尾探测采样行数
    pub probe_rows: u32,
}

impl Default for FrameAnalyzer {
    fn default() -> Self {
        Self {
            statistics: PlaneStatistics::default(),
            comparator: FrameComparator::default(),
            classifier: ValidityClassifier::default(),
            probe_rows: stride::DEFAULT_PROBE_ROWS,
        }
    }
}

impl FrameAnalyzer {
    /// 分析一帧; 提供 `reference` 时附带差分规则
    pub fn analyze(&self, frame: &Frame, reference: Option<&Frame>) -> YuvResult<FrameAnalysis> {
        let y = self.statistics.analyze(frame.y())?;
        let u = self.statistics.analyze(frame.u())?;
        let v = self.statistics.analyze(frame.v())?;
        let diff = reference
            .map(|r| self.comparator.diff_frames(r, frame))
            .transpose()?;
        let line_ends = probe_line_ends(frame.y(), self.probe_rows);

        let findings = self.classifier.classify(&FrameEvidence {
            y: &y,
            u: &u,
            v: &v,
            diff: diff.as_ref().map(|d| &d.y),
            line_ends: Some(&line_ends),
        });

        Ok(FrameAnalysis {
            index: frame.index(),
            y,
            u,
            v,
            diff,
            line_ends,
            findings,
        })
    }
}

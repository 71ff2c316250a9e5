//! 帧有效性分类.
//!
//! 依据平面统计、帧间差分与行尾探测结果, 按固定顺序逐条检查启发式规则,
//! 所有命中的规则都会产出一条带严重级别的发现. 分类器无状态.

use std::fmt;

use yuvscope_core::PlaneKind;

use crate::diff::DiffStats;
use crate::stats::PlaneStats;
use crate::stride::LineEndProbe;

/// 严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 发现类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// 亮度动态范围过窄
    LowLumaContrast,
    /// 亮度取值种类过少
    LowLumaDiversity,
    /// 色度取值种类过少
    LowChromaDiversity(PlaneKind),
    /// 平面为单一常量
    SolidPlane(PlaneKind),
    /// 纯黑样本过多
    ExcessBlack,
    /// 亮度集中在单个直方图桶
    LumaClustering,
    /// 与参考帧差异过大
    FramesVeryDifferent,
    /// 与参考帧几乎相同
    FramesNearlyIdentical,
    /// 行尾样本一致, 疑似宽度或步长错误
    SuspectStride,
}

impl FindingKind {
    /// 稳定的类型名 (用于机器可读输出)
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LowLumaContrast => "low_luma_contrast",
            Self::LowLumaDiversity => "low_luma_diversity",
            Self::LowChromaDiversity(_) => "low_chroma_diversity",
            Self::SolidPlane(_) => "solid_plane",
            Self::ExcessBlack => "excess_black",
            Self::LumaClustering => "luma_clustering",
            Self::FramesVeryDifferent => "frames_very_different",
            Self::FramesNearlyIdentical => "frames_nearly_identical",
            Self::SuspectStride => "suspect_stride",
        }
    }

    /// 关联的平面 (如有)
    pub const fn plane(&self) -> Option<PlaneKind> {
        match self {
            Self::LowChromaDiversity(p) | Self::SolidPlane(p) => Some(*p),
            Self::LowLumaContrast
            | Self::LowLumaDiversity
            | Self::ExcessBlack
            | Self::LumaClustering
            | Self::SuspectStride => Some(PlaneKind::Y),
            Self::FramesVeryDifferent | Self::FramesNearlyIdentical => None,
        }
    }
}

/// 单条发现
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    pub message: String,
}

impl Finding {
    fn new(severity: Severity, kind: FindingKind, message: String) -> Self {
        Self {
            severity,
            kind,
            message,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

/// 分类阈值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidityThresholds {
    /// 亮度范围低于该值视为对比度过低
    pub min_luma_range: u8,
    /// 亮度不同取值数低于该值
    pub min_luma_unique: usize,
    /// 色度不同取值数低于该值
    pub min_chroma_unique: usize,
    /// 零值比例高于该值
    pub max_zero_ratio: f64,
    /// 单桶占比高于该值
    pub max_bucket_ratio: f64,
    /// 平均绝对差高于该值
    pub max_mean_diff: f64,
    /// 平均绝对差低于该值
    pub min_mean_diff: f64,
}

impl Default for ValidityThresholds {
    fn default() -> Self {
        Self {
            min_luma_range: 20,
            min_luma_unique: 50,
            min_chroma_unique: 10,
            max_zero_ratio: 0.10,
            max_bucket_ratio: 0.80,
            max_mean_diff: 30.0,
            min_mean_diff: 2.0,
        }
    }
}

/// 分类输入
#[derive(Debug, Clone, Copy)]
pub struct FrameEvidence<'a> {
    pub y: &'a PlaneStats,
    pub u: &'a PlaneStats,
    pub v: &'a PlaneStats,
    /// 与参考帧 Y 平面的差分
    pub diff: Option<&'a DiffStats>,
    /// Y 平面行尾探测
    pub line_ends: Option<&'a LineEndProbe>,
}

/// 有效性分类器
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidityClassifier {
    thresholds: ValidityThresholds,
}

impl ValidityClassifier {
    pub fn new(thresholds: ValidityThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ValidityThresholds {
        &self.thresholds
    }

    /// 按规则顺序产出全部命中的发现
    pub fn classify(&self, evidence: &FrameEvidence<'_>) -> Vec<Finding> {
        let t = &self.thresholds;
        let y = evidence.y;
        let mut findings = Vec::new();

        if y.range() < t.min_luma_range {
            findings.push(Finding::new(
                Severity::Warning,
                FindingKind::LowLumaContrast,
                format!(
                    "亮度范围过窄 ({}-{}, 跨度 {}), 可能为错误数据",
                    y.min,
                    y.max,
                    y.range()
                ),
            ));
        }

        if y.unique_count < t.min_luma_unique {
            findings.push(Finding::new(
                Severity::Warning,
                FindingKind::LowLumaDiversity,
                format!("亮度取值种类过少 ({} 种)", y.unique_count),
            ));
        }

        for chroma in [evidence.u, evidence.v] {
            if chroma.unique_count < t.min_chroma_unique {
                findings.push(Finding::new(
                    Severity::Warning,
                    FindingKind::LowChromaDiversity(chroma.kind),
                    format!(
                        "{} 平面取值种类过少 ({} 种)",
                        chroma.kind, chroma.unique_count
                    ),
                ));
            }
        }

        for stats in [y, evidence.u, evidence.v] {
            if stats.is_constant() {
                findings.push(Finding::new(
                    Severity::Critical,
                    FindingKind::SolidPlane(stats.kind),
                    format!("{} 平面为常量 {}", stats.kind, stats.min),
                ));
            }
        }

        let zero_ratio = y.zero_ratio();
        if zero_ratio > t.max_zero_ratio {
            findings.push(Finding::new(
                Severity::Warning,
                FindingKind::ExcessBlack,
                format!("纯黑样本过多 ({:.1}%)", zero_ratio * 100.0),
            ));
        }

        let (bucket, count) = y.dominant_bucket();
        let bucket_ratio = y.fraction(count);
        if bucket_ratio > t.max_bucket_ratio {
            let (lo, hi) = y.bucket_bounds(bucket);
            findings.push(Finding::new(
                Severity::Warning,
                FindingKind::LumaClustering,
                format!(
                    "亮度集中在 {lo}-{hi} 区间 ({:.1}%)",
                    bucket_ratio * 100.0
                ),
            ));
        }

        if let Some(diff) = evidence.diff {
            findings.extend(self.diff_findings(diff));
        }

        if let Some(value) = evidence.line_ends.and_then(LineEndProbe::uniform_value) {
            findings.push(Finding::new(
                Severity::Critical,
                FindingKind::SuspectStride,
                format!("各行末尾样本均为 {value}, 宽度或步长可能设置错误"),
            ));
        }

        log_findings(&findings);
        findings
    }

    /// 只检查差分规则, 用于两帧比较与逐帧差分扫描
    pub fn classify_diff(&self, diff: &DiffStats) -> Vec<Finding> {
        let findings = self.diff_findings(diff);
        log_findings(&findings);
        findings
    }

    fn diff_findings(&self, diff: &DiffStats) -> Vec<Finding> {
        let t = &self.thresholds;
        let mut findings = Vec::new();
        if diff.mean_abs_diff > t.max_mean_diff {
            findings.push(Finding::new(
                Severity::Warning,
                FindingKind::FramesVeryDifferent,
                format!(
                    "与参考帧差异过大 (平均绝对差 {:.2})",
                    diff.mean_abs_diff
                ),
            ));
        }
        if diff.mean_abs_diff < t.min_mean_diff {
            findings.push(Finding::new(
                Severity::Info,
                FindingKind::FramesNearlyIdentical,
                format!(
                    "与参考帧几乎相同 (平均绝对差 {:.2})",
                    diff.mean_abs_diff
                ),
            ));
        }
        findings
    }
}

fn log_findings(findings: &[Finding]) {
    for finding in findings {
        match finding.severity {
            Severity::Critical => log::warn!("{finding}"),
            _ => log::debug!("{finding}"),
        }
    }
}

//! 输出结构体与文本打印.
//!
//! `--json` 时序列化下列结构体, 否则按分节文本打印.

use std::io::{self, Write};

use serde::Serialize;

use yuvscope_analysis::stats::bucket_bounds;
use yuvscope_analysis::{DiffStats, Finding, FrameAnalysis, PlaneStats};
use yuvscope_core::{Plane, Resolution};

// ============================================================
// JSON 输出结构体
// ============================================================

/// 文件信息
#[derive(Serialize)]
pub(crate) struct InfoOutput {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    pub frame_size: usize,
    pub frame_count: u64,
    pub trailing_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// 平面统计
#[derive(Serialize)]
pub(crate) struct PlaneOutput {
    pub plane: String,
    pub width: u32,
    pub height: u32,
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    pub std_dev: f64,
    pub unique_count: usize,
    pub zero_count: usize,
    pub histogram: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hexdump: Option<String>,
}

impl PlaneOutput {
    pub fn new(stats: &PlaneStats, plane: &Plane, with_hex: bool) -> Self {
        Self {
            plane: stats.kind.to_string(),
            width: plane.width(),
            height: plane.height(),
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            std_dev: stats.std_dev,
            unique_count: stats.unique_count,
            zero_count: stats.zero_count,
            histogram: stats.histogram.clone(),
            hexdump: with_hex.then(|| hex_prefix(plane)),
        }
    }
}

/// 单平面差分
#[derive(Serialize)]
pub(crate) struct DiffOutput {
    pub plane: String,
    pub mean_abs_diff: f64,
    pub max_abs_diff: u8,
    pub outlier_count: usize,
    pub outlier_ratio: f64,
    pub total_samples: usize,
}

impl DiffOutput {
    pub fn new(plane: &str, stats: &DiffStats) -> Self {
        Self {
            plane: plane.to_string(),
            mean_abs_diff: stats.mean_abs_diff,
            max_abs_diff: stats.max_abs_diff,
            outlier_count: stats.outlier_count,
            outlier_ratio: stats.outlier_ratio(),
            total_samples: stats.total_samples,
        }
    }
}

/// 有效性发现
#[derive(Serialize)]
pub(crate) struct FindingOutput {
    pub severity: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plane: Option<String>,
    pub message: String,
}

impl From<&Finding> for FindingOutput {
    fn from(finding: &Finding) -> Self {
        Self {
            severity: finding.severity.name(),
            kind: finding.kind.name(),
            plane: finding.kind.plane().map(|p| p.to_string()),
            message: finding.message.clone(),
        }
    }
}

/// 单帧分析结果
#[derive(Serialize)]
pub(crate) struct AnalyzeOutput {
    pub frame: u64,
    pub summary: String,
    pub planes: Vec<PlaneOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diff: Vec<DiffOutput>,
    pub line_ends: Vec<u8>,
    pub findings: Vec<FindingOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub preview: Vec<String>,
}

/// 两帧比较结果
#[derive(Serialize)]
pub(crate) struct CompareOutput {
    pub frame_a: u64,
    pub frame_b: u64,
    pub planes: Vec<DiffOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_image: Option<String>,
    /// Y 平面差分规则的发现
    pub findings: Vec<FindingOutput>,
}

/// 逐帧差分扫描中的一步 (当前帧 vs 前一帧, Y 平面)
#[derive(Serialize)]
pub(crate) struct DiffStepOutput {
    pub frame: u64,
    pub previous: u64,
    pub mean_abs_diff: f64,
    pub max_abs_diff: u8,
    pub outlier_count: usize,
    pub findings: Vec<FindingOutput>,
}

/// 逐帧差分扫描结果
#[derive(Serialize)]
pub(crate) struct DiffsOutput {
    pub start: u64,
    pub steps: Vec<DiffStepOutput>,
    /// 无法读取而提前结束时的帧序号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopped_at: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diff_images: Vec<String>,
}

/// 批量导出结果
#[derive(Serialize)]
pub(crate) struct BatchOutput {
    pub output_dir: String,
    pub exported: Vec<u64>,
    pub skipped: Vec<u64>,
    pub summary_file: String,
}

// ============================================================
// 构建
// ============================================================

pub(crate) fn diff_outputs(analysis: &FrameAnalysis) -> Vec<DiffOutput> {
    match &analysis.diff {
        Some(diff) => vec![
            DiffOutput::new("Y", &diff.y),
            DiffOutput::new("U", &diff.u),
            DiffOutput::new("V", &diff.v),
        ],
        None => Vec::new(),
    }
}

/// 平面开头的十六进制 dump: Y 取 32 字节, U/V 取 16 字节
pub(crate) fn hex_prefix(plane: &Plane) -> String {
    let len = match plane.kind() {
        yuvscope_core::PlaneKind::Y => 32,
        _ => 16,
    };
    let bytes = &plane.samples()[..len.min(plane.len())];
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================
// 文本输出
// ============================================================

/// 直方图条形: 每 2% 一个 `#`
fn histogram_bar(percent: f64) -> String {
    "#".repeat((percent / 2.0) as usize)
}

pub(crate) fn write_info_text<W: Write>(w: &mut W, info: &InfoOutput) -> io::Result<()> {
    writeln!(w, "[FILE]")?;
    writeln!(w, "  文件名       : {}", info.filename)?;
    writeln!(w, "  分辨率       : {}x{}", info.width, info.height)?;
    writeln!(w, "  文件大小     : {} 字节", info.file_size)?;
    writeln!(w, "  帧大小       : {} 字节", info.frame_size)?;
    writeln!(w, "  完整帧数     : {}", info.frame_count)?;
    if info.trailing_bytes > 0 {
        writeln!(w, "  尾部残余     : {} 字节 (不足一帧)", info.trailing_bytes)?;
    }
    if let (Some(fps), Some(duration)) = (info.fps, info.duration) {
        writeln!(w, "  时长         : {duration:.3} 秒 (@ {fps} fps)")?;
    }
    writeln!(w, "[/FILE]")
}

/// 直方图, 每桶一行: 取值区间, 计数, 占比与条形
pub(crate) fn write_histogram_text<W: Write>(w: &mut W, histogram: &[u64]) -> io::Result<()> {
    let total: u64 = histogram.iter().sum();
    for (i, &count) in histogram.iter().enumerate() {
        let (lo, hi) = bucket_bounds(histogram.len(), i);
        let percent = if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        };
        writeln!(
            w,
            "    {lo:3}-{hi:3}: {count:8} ({percent:5.1}%) {}",
            histogram_bar(percent)
        )?;
    }
    Ok(())
}

pub(crate) fn write_planes_text<W: Write>(w: &mut W, planes: &[PlaneOutput]) -> io::Result<()> {
    for p in planes {
        writeln!(w, "[PLANE {}]", p.plane)?;
        writeln!(w, "  尺寸         : {}x{}", p.width, p.height)?;
        writeln!(w, "  范围         : {}-{}", p.min, p.max)?;
        writeln!(w, "  均值         : {:.2}", p.mean)?;
        writeln!(w, "  标准差       : {:.2}", p.std_dev)?;
        writeln!(w, "  不同取值     : {}", p.unique_count)?;
        writeln!(w, "  零值样本     : {}", p.zero_count)?;
        writeln!(w, "  直方图       :")?;
        write_histogram_text(w, &p.histogram)?;
        if let Some(ref hex) = p.hexdump {
            writeln!(w, "  开头字节     : {hex}")?;
        }
        writeln!(w, "[/PLANE]")?;
    }
    Ok(())
}

pub(crate) fn write_diff_text<W: Write>(w: &mut W, diffs: &[DiffOutput]) -> io::Result<()> {
    for d in diffs {
        writeln!(
            w,
            "  {} 平面: 平均绝对差 {:.2}, 最大 {}, 离群 {} ({:.2}%)",
            d.plane,
            d.mean_abs_diff,
            d.max_abs_diff,
            d.outlier_count,
            d.outlier_ratio * 100.0
        )?;
    }
    Ok(())
}

pub(crate) fn write_findings_text<W: Write>(
    w: &mut W,
    findings: &[FindingOutput],
) -> io::Result<()> {
    if findings.is_empty() {
        return writeln!(w, "  未发现异常");
    }
    for f in findings {
        writeln!(w, "  [{}] {}", f.severity, f.message)?;
    }
    Ok(())
}

fn write_preview_text<W: Write>(w: &mut W, preview: &[String]) -> io::Result<()> {
    writeln!(w, "[PREVIEW Y]")?;
    for line in preview {
        writeln!(w, "{line}")?;
    }
    writeln!(w, "[/PREVIEW]")
}

pub(crate) fn write_analyze_text<W: Write>(w: &mut W, out: &AnalyzeOutput) -> io::Result<()> {
    writeln!(w, "[FRAME #{}]", out.frame)?;
    writeln!(w, "  {}", out.summary)?;
    writeln!(w, "[/FRAME]")?;
    write_planes_text(w, &out.planes)?;
    if let Some(reference) = out.reference {
        writeln!(w, "[DIFF vs #{reference}]")?;
        write_diff_text(w, &out.diff)?;
        writeln!(w, "[/DIFF]")?;
    }
    writeln!(w, "[FINDINGS]")?;
    write_findings_text(w, &out.findings)?;
    writeln!(w, "[/FINDINGS]")?;
    if !out.preview.is_empty() {
        write_preview_text(w, &out.preview)?;
    }
    Ok(())
}

/// 单帧文本报告: 报告头 + 分节统计, 未请求预览时使用 `fallback_preview`
pub(crate) fn write_analyze_report<W: Write>(
    w: &mut W,
    out: &AnalyzeOutput,
    source: &str,
    resolution: Resolution,
    fallback_preview: &[String],
) -> io::Result<()> {
    writeln!(w, "Frame {} 分析报告", out.frame)?;
    writeln!(w, "源文件: {source}")?;
    writeln!(w, "分辨率: {resolution}")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;
    write_analyze_text(w, out)?;
    if out.preview.is_empty() && !fallback_preview.is_empty() {
        write_preview_text(w, fallback_preview)?;
    }
    Ok(())
}

pub(crate) fn write_compare_text<W: Write>(w: &mut W, out: &CompareOutput) -> io::Result<()> {
    writeln!(w, "[COMPARE #{} vs #{}]", out.frame_a, out.frame_b)?;
    write_diff_text(w, &out.planes)?;
    if let Some(ref path) = out.diff_image {
        writeln!(w, "  差值图       : {path}")?;
    }
    writeln!(w, "[/COMPARE]")?;
    writeln!(w, "[FINDINGS]")?;
    if out.findings.is_empty() {
        writeln!(w, "  帧间差异正常")?;
    } else {
        write_findings_text(w, &out.findings)?;
    }
    writeln!(w, "[/FINDINGS]")
}

pub(crate) fn write_diffs_text<W: Write>(w: &mut W, out: &DiffsOutput) -> io::Result<()> {
    writeln!(w, "[DIFFS from #{}]", out.start)?;
    for step in &out.steps {
        writeln!(
            w,
            "  帧 {} vs {}: 平均绝对差 {:.2}, 最大 {}, 离群 {}",
            step.frame, step.previous, step.mean_abs_diff, step.max_abs_diff, step.outlier_count
        )?;
        for f in &step.findings {
            writeln!(w, "    [{}] {}", f.severity, f.message)?;
        }
    }
    if let Some(index) = out.stopped_at {
        writeln!(w, "  帧 {index} 无法读取, 扫描提前结束")?;
    }
    for path in &out.diff_images {
        writeln!(w, "  差值图       : {path}")?;
    }
    writeln!(w, "[/DIFFS]")
}

pub(crate) fn write_batch_text<W: Write>(w: &mut W, out: &BatchOutput) -> io::Result<()> {
    writeln!(w, "[BATCH]")?;
    writeln!(w, "  输出目录     : {}", out.output_dir)?;
    writeln!(w, "  已导出       : {} 帧", out.exported.len())?;
    if !out.skipped.is_empty() {
        writeln!(w, "  已跳过       : {:?}", out.skipped)?;
    }
    writeln!(w, "  摘要文件     : {}", out.summary_file)?;
    writeln!(w, "[/BATCH]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuvscope_core::PlaneKind;

    #[test]
    fn test_hex_prefix_lengths() {
        let y = Plane::new(PlaneKind::Y, 8, 8, (0..64).collect()).unwrap();
        let hex = hex_prefix(&y);
        assert_eq!(hex.split(' ').count(), 32);
        assert!(hex.starts_with("00 01 02"));
        assert!(hex.ends_with("1f"));

        let u = Plane::filled(PlaneKind::U, 4, 4, 0xab);
        assert_eq!(hex_prefix(&u).split(' ').count(), 16);

        let tiny = Plane::filled(PlaneKind::V, 2, 1, 1);
        assert_eq!(hex_prefix(&tiny), "01 01");
    }

    #[test]
    fn test_histogram_text_one_line_per_bucket() {
        let mut histogram = vec![0u64; 16];
        histogram[0] = 50;
        histogram[15] = 50;
        let mut buf = Vec::new();
        write_histogram_text(&mut buf, &histogram).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(
            lines[0],
            format!("      0- 15: {:8} ( 50.0%) {}", 50, "#".repeat(25))
        );
        assert!(lines[1].starts_with("     16- 31:        0 (  0.0%)"));
        assert!(lines[15].starts_with("    240-255:"));
    }

    #[test]
    fn test_finding_output_serializes() {
        let finding = Finding {
            severity: yuvscope_analysis::Severity::Critical,
            kind: yuvscope_analysis::FindingKind::SolidPlane(PlaneKind::U),
            message: "U 平面为常量 128".to_string(),
        };
        let json = serde_json::to_string(&FindingOutput::from(&finding)).unwrap();
        assert!(json.contains("\"severity\":\"critical\""));
        assert!(json.contains("\"kind\":\"solid_plane\""));
        assert!(json.contains("\"plane\":\"U\""));
    }
}

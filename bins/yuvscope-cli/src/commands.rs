//! 子命令实现.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;

use yuvscope_analysis::{
    AsciiPalette, FrameAnalyzer, FrameComparator, FrameSummary, PlaneStatistics, abs_diff_plane,
    render_ascii,
};
use yuvscope_core::{Frame, PlaneLayout, Resolution};
use yuvscope_format::muxers::{save_pgm, save_ppm, save_raw_planes};
use yuvscope_format::{Extracted, FrameExtractor};
use yuvscope_scale::{ColorConverter, ConvertMethod};

use crate::report::{
    self, AnalyzeOutput, BatchOutput, CompareOutput, DiffOutput, DiffStepOutput, DiffsOutput,
    FindingOutput, InfoOutput, PlaneOutput,
};

/// ASCII 预览尺寸 (行, 列)
const PREVIEW_ROWS: u32 = 24;
const PREVIEW_COLS: u32 = 40;

/// 批量导出摘要文件名
pub(crate) const SUMMARY_FILE: &str = "frame_summary.txt";

/// 差分扫描最多保存的差值图数量
const DIFF_IMAGE_LIMIT: usize = 5;

/// 一次会话的公共上下文: 输入文件 + 固定分辨率 + 分析参数
pub(crate) struct Session {
    pub input: PathBuf,
    pub extractor: FrameExtractor,
    pub analyzer: FrameAnalyzer,
    pub json: bool,
}

impl Session {
    pub fn new(
        input: PathBuf,
        resolution: Resolution,
        buckets: usize,
        diff_threshold: u8,
        json: bool,
    ) -> Result<Self> {
        let analyzer = FrameAnalyzer {
            statistics: PlaneStatistics::new(buckets)?,
            comparator: FrameComparator::new(diff_threshold),
            ..FrameAnalyzer::default()
        };
        Ok(Self {
            input,
            extractor: FrameExtractor::new(resolution.layout()),
            analyzer,
            json,
        })
    }

    fn layout(&self) -> &PlaneLayout {
        self.extractor.layout()
    }

    fn open(&self) -> Result<File> {
        File::open(&self.input)
            .with_context(|| format!("无法打开输入文件 '{}'", self.input.display()))
    }

    fn frame_count(&self) -> Result<u64> {
        let mut file = self.open()?;
        Ok(self.extractor.frame_count(&mut file)?)
    }

    /// 读取第 `index` 帧, 不存在或被截断时返回错误
    fn load(&self, file: &mut File, index: u64) -> Result<Frame> {
        match self.extractor.extract(file, index)? {
            Extracted::Frame(frame) => Ok(frame),
            Extracted::EndOfStream => {
                let total = self.extractor.frame_count(file)?;
                bail!("帧 {index} 不存在 (共 {total} 帧)")
            }
            Extracted::ShortRead { bytes } => bail!(
                "帧 {index} 被截断: 只有 {bytes}/{} 字节",
                self.layout().frame_size()
            ),
        }
    }

    fn load_one(&self, index: u64) -> Result<Frame> {
        let mut file = self.open()?;
        self.load(&mut file, index)
    }

    fn emit_json<T: serde::Serialize>(value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    // ============================================================
    // info
    // ============================================================

    pub fn info(&self, fps: Option<f64>) -> Result<()> {
        if let Some(fps) = fps.filter(|f| *f <= 0.0) {
            bail!("帧率必须为正数: {fps}");
        }
        let file_size = fs::metadata(&self.input)
            .with_context(|| format!("无法读取文件信息 '{}'", self.input.display()))?
            .len();
        let layout = self.layout();
        let frame_count = layout.frame_count(file_size);
        let trailing_bytes = layout.trailing_bytes(file_size);
        if trailing_bytes > 0 {
            log::warn!("文件末尾有 {trailing_bytes} 字节不足一帧, 分辨率可能设置错误");
        }

        let res = layout.resolution();
        let out = InfoOutput {
            filename: self.input.display().to_string(),
            width: res.width(),
            height: res.height(),
            file_size,
            frame_size: layout.frame_size(),
            frame_count,
            trailing_bytes,
            fps,
            duration: fps.map(|fps| frame_count as f64 / fps),
        };
        if self.json {
            Self::emit_json(&out)
        } else {
            Ok(report::write_info_text(&mut io::stdout().lock(), &out)?)
        }
    }

    // ============================================================
    // analyze
    // ============================================================

    pub fn analyze(
        &self,
        index: u64,
        reference: Option<u64>,
        preview: Option<AsciiPalette>,
        hexdump: bool,
        report_path: Option<&Path>,
    ) -> Result<()> {
        let (out, frame) = self.analyze_output(index, reference, preview, hexdump)?;
        if let Some(path) = report_path {
            self.write_report(path, &out, &frame)?;
            tracing::info!("分析报告已保存: {}", path.display());
        }
        if self.json {
            Self::emit_json(&out)
        } else {
            Ok(report::write_analyze_text(&mut io::stdout().lock(), &out)?)
        }
    }

    fn analyze_output(
        &self,
        index: u64,
        reference: Option<u64>,
        preview: Option<AsciiPalette>,
        hexdump: bool,
    ) -> Result<(AnalyzeOutput, Frame)> {
        let mut file = self.open()?;
        let frame = self.load(&mut file, index)?;
        let reference_frame = reference
            .map(|r| self.load(&mut file, r))
            .transpose()?;

        let analysis = self.analyzer.analyze(&frame, reference_frame.as_ref())?;
        tracing::info!(
            "帧 {index}: {} 条发现, 严重 {}",
            analysis.findings.len(),
            analysis.findings.iter().filter(|f| f.is_critical()).count()
        );

        let planes = [
            (&analysis.y, frame.y()),
            (&analysis.u, frame.u()),
            (&analysis.v, frame.v()),
        ]
        .into_iter()
        .map(|(stats, plane)| PlaneOutput::new(stats, plane, hexdump))
        .collect();

        let out = AnalyzeOutput {
            frame: index,
            summary: analysis.summary().to_string(),
            planes,
            reference,
            diff: report::diff_outputs(&analysis),
            line_ends: analysis.line_ends.samples.clone(),
            findings: analysis.findings.iter().map(FindingOutput::from).collect(),
            preview: preview
                .map(|palette| render_ascii(frame.y(), PREVIEW_ROWS, PREVIEW_COLS, palette))
                .unwrap_or_default(),
        };
        Ok((out, frame))
    }

    /// 写出单帧文本报告; 未请求预览时报告中附带粗粒度预览
    fn write_report(&self, path: &Path, out: &AnalyzeOutput, frame: &Frame) -> Result<()> {
        let fallback = if out.preview.is_empty() {
            render_ascii(frame.y(), PREVIEW_ROWS, PREVIEW_COLS, AsciiPalette::Coarse)
        } else {
            Vec::new()
        };
        let file =
            File::create(path).with_context(|| format!("无法创建报告 '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        report::write_analyze_report(
            &mut writer,
            out,
            &self.input.display().to_string(),
            self.layout().resolution(),
            &fallback,
        )?;
        writer.flush()?;
        Ok(())
    }

    // ============================================================
    // compare
    // ============================================================

    pub fn compare(&self, a: u64, b: u64, diff_image: Option<&Path>) -> Result<()> {
        let out = self.compare_output(a, b, diff_image)?;
        if self.json {
            Self::emit_json(&out)
        } else {
            Ok(report::write_compare_text(&mut io::stdout().lock(), &out)?)
        }
    }

    fn compare_output(&self, a: u64, b: u64, diff_image: Option<&Path>) -> Result<CompareOutput> {
        let mut file = self.open()?;
        let frame_a = self.load(&mut file, a)?;
        let frame_b = self.load(&mut file, b)?;
        let diff = self.analyzer.comparator.diff_frames(&frame_a, &frame_b)?;

        if let Some(path) = diff_image {
            let plane = abs_diff_plane(frame_a.y(), frame_b.y())?;
            save_pgm(path, &plane)
                .with_context(|| format!("无法写出差值图 '{}'", path.display()))?;
            tracing::info!("差值图已保存: {}", path.display());
        }

        let findings = self.analyzer.classifier.classify_diff(&diff.y);

        Ok(CompareOutput {
            frame_a: a,
            frame_b: b,
            planes: vec![
                DiffOutput::new("Y", &diff.y),
                DiffOutput::new("U", &diff.u),
                DiffOutput::new("V", &diff.v),
            ],
            diff_image: diff_image.map(|p| p.display().to_string()),
            findings: findings.iter().map(FindingOutput::from).collect(),
        })
    }

    // ============================================================
    // diffs
    // ============================================================

    /// 逐帧差分扫描: 从 `start` 起读取 `count` 帧, 每帧与前一帧比较 Y 平面
    pub fn diffs(&self, start: u64, count: u64, diff_dir: Option<&Path>) -> Result<()> {
        let out = self.diff_sweep(start, count, diff_dir)?;
        if self.json {
            Self::emit_json(&out)
        } else {
            Ok(report::write_diffs_text(&mut io::stdout().lock(), &out)?)
        }
    }

    fn diff_sweep(&self, start: u64, count: u64, diff_dir: Option<&Path>) -> Result<DiffsOutput> {
        if let Some(dir) = diff_dir {
            fs::create_dir_all(dir)
                .with_context(|| format!("无法创建差值图目录 '{}'", dir.display()))?;
        }
        let mut file = self.open()?;
        let mut previous: Option<Frame> = None;
        let mut steps = Vec::new();
        let mut diff_images = Vec::new();
        let mut stopped_at = None;

        for offset in 0..count {
            let Some(index) = start.checked_add(offset) else {
                break;
            };
            let frame = match self.extractor.extract(&mut file, index)? {
                Extracted::Frame(frame) => frame,
                Extracted::EndOfStream | Extracted::ShortRead { .. } => {
                    log::warn!("帧 {index} 无法读取, 差分扫描结束");
                    stopped_at = Some(index);
                    break;
                }
            };

            if let Some(prev) = &previous {
                let diff = self.analyzer.comparator.diff(prev.y(), frame.y())?;
                let findings = self.analyzer.classifier.classify_diff(&diff);
                tracing::debug!(
                    "帧 {index}: 平均绝对差 {:.2}, 最大 {}",
                    diff.mean_abs_diff,
                    diff.max_abs_diff
                );

                if let Some(dir) = diff_dir.filter(|_| diff_images.len() < DIFF_IMAGE_LIMIT) {
                    let path = dir.join(format!("frame_{index:06}_diff.pgm"));
                    let plane = abs_diff_plane(prev.y(), frame.y())?;
                    save_pgm(&path, &plane)
                        .with_context(|| format!("无法写出差值图 '{}'", path.display()))?;
                    diff_images.push(path.display().to_string());
                }

                steps.push(DiffStepOutput {
                    frame: index,
                    previous: prev.index(),
                    mean_abs_diff: diff.mean_abs_diff,
                    max_abs_diff: diff.max_abs_diff,
                    outlier_count: diff.outlier_count,
                    findings: findings.iter().map(FindingOutput::from).collect(),
                });
            }
            previous = Some(frame);
        }

        Ok(DiffsOutput {
            start,
            steps,
            stopped_at,
            diff_images,
        })
    }

    // ============================================================
    // export
    // ============================================================

    pub fn export(&self, index: u64, output: &Path, method: ConvertMethod) -> Result<()> {
        let frame = self.load_one(index)?;
        export_ppm(&frame, output, ColorConverter::new(method))?;
        tracing::info!("帧 {index} 已导出到 {}", output.display());
        Ok(())
    }

    // ============================================================
    // batch
    // ============================================================

    pub fn batch(
        &self,
        output_dir: &Path,
        selection: FrameSelection,
        method: ConvertMethod,
    ) -> Result<()> {
        let total = self.frame_count()?;
        let (indices, skipped) = selection.resolve(total);
        for index in &skipped {
            log::warn!("帧 {index} 超出范围 (共 {total} 帧), 已跳过");
        }
        if indices.is_empty() {
            bail!("没有可导出的帧 (共 {total} 帧)");
        }

        fs::create_dir_all(output_dir)
            .with_context(|| format!("无法创建输出目录 '{}'", output_dir.display()))?;

        let converter = ColorConverter::new(method);
        // 每个任务独立打开文件句柄
        let results: Vec<Result<FrameSummary>> = indices
            .par_iter()
            .map(|&index| {
                let frame = self.load_one(index)?;
                let path = output_dir.join(format!("frame_{index:06}.ppm"));
                export_ppm(&frame, &path, converter)?;
                let analysis = self.analyzer.analyze(&frame, None)?;
                Ok(analysis.summary())
            })
            .collect();
        let summaries = results.into_iter().collect::<Result<Vec<_>>>()?;

        let summary_path = output_dir.join(SUMMARY_FILE);
        write_summary_file(&summary_path, &self.input, total, &summaries)?;
        tracing::info!("已导出 {} 帧到 {}", summaries.len(), output_dir.display());

        let out = BatchOutput {
            output_dir: output_dir.display().to_string(),
            exported: indices,
            skipped,
            summary_file: summary_path.display().to_string(),
        };
        if self.json {
            Self::emit_json(&out)
        } else {
            Ok(report::write_batch_text(&mut io::stdout().lock(), &out)?)
        }
    }

    // ============================================================
    // dump
    // ============================================================

    pub fn dump(&self, index: u64, output_dir: &Path) -> Result<()> {
        let frame = self.load_one(index)?;
        let paths = save_raw_planes(output_dir, &frame)
            .with_context(|| format!("无法写出原始平面到 '{}'", output_dir.display()))?;
        for path in &paths {
            println!("{}", path.display());
        }
        Ok(())
    }
}

/// 转换并写出 PPM
fn export_ppm(frame: &Frame, path: &Path, converter: ColorConverter) -> Result<()> {
    let rgb = converter.convert_frame_rgb24(frame);
    save_ppm(path, frame.width(), frame.height(), &rgb)
        .with_context(|| format!("无法写出 '{}'", path.display()))
}

/// 写出摘要文件: 文件头后按序号顺序每帧一行
fn write_summary_file(
    path: &Path,
    source: &Path,
    total: u64,
    summaries: &[FrameSummary],
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("无法创建摘要文件 '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "YUV Frame Analysis Summary")?;
    writeln!(writer, "Source: {}", source.display())?;
    writeln!(writer, "Total frames: {total}")?;
    writeln!(writer, "Processed frames: {}", summaries.len())?;
    writeln!(writer, "{}", "=".repeat(60))?;
    writeln!(writer)?;
    for summary in summaries {
        writeln!(writer, "{summary}")?;
    }
    writer.flush()?;
    Ok(())
}

/// 批量导出的帧选择
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FrameSelection {
    /// 单帧
    Single(u64),
    /// 闭区间, 终点按帧数截断
    Range(RangeInclusive<u64>),
    /// 每隔 N 帧取一帧
    EveryNth(u64),
}

impl FrameSelection {
    /// 解析为 (待导出序号, 超出范围被跳过的序号)
    pub fn resolve(&self, total: u64) -> (Vec<u64>, Vec<u64>) {
        match self {
            Self::Single(index) if *index < total => (vec![*index], Vec::new()),
            Self::Single(index) => (Vec::new(), vec![*index]),
            Self::Range(range) => {
                let (start, end) = (*range.start(), *range.end());
                if start >= total {
                    return (Vec::new(), vec![start]);
                }
                (
                    (start..=end.min(total.saturating_sub(1))).collect(),
                    Vec::new(),
                )
            }
            Self::EveryNth(step) => (
                (0..total).step_by((*step).max(1) as usize).collect(),
                Vec::new(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_single() {
        assert_eq!(FrameSelection::Single(3).resolve(5), (vec![3], vec![]));
        assert_eq!(FrameSelection::Single(5).resolve(5), (vec![], vec![5]));
    }

    #[test]
    fn test_selection_range_clamps_to_frame_count() {
        assert_eq!(
            FrameSelection::Range(2..=100).resolve(5),
            (vec![2, 3, 4], vec![])
        );
        assert_eq!(FrameSelection::Range(1..=2).resolve(5), (vec![1, 2], vec![]));
        assert_eq!(FrameSelection::Range(7..=9).resolve(5), (vec![], vec![7]));
    }

    #[test]
    fn test_selection_every_nth() {
        assert_eq!(
            FrameSelection::EveryNth(10).resolve(25),
            (vec![0, 10, 20], vec![])
        );
        assert_eq!(FrameSelection::EveryNth(0).resolve(3), (vec![0, 1, 2], vec![]));
        assert_eq!(FrameSelection::EveryNth(4).resolve(0), (vec![], vec![]));
    }

    fn write_stream(dir: &Path, frames: u8) -> PathBuf {
        let res = Resolution::new(8, 8).unwrap();
        let layout = res.layout();
        let mut data = Vec::new();
        for i in 0..frames {
            data.extend((0..layout.y_size()).map(|s| (s as u8).wrapping_add(i)));
            data.extend(std::iter::repeat_n(128u8, 2 * layout.uv_size()));
        }
        let path = dir.join("input.yuv");
        fs::write(&path, data).unwrap();
        path
    }

    fn session(input: PathBuf) -> Session {
        Session::new(input, Resolution::new(8, 8).unwrap(), 16, 50, true).unwrap()
    }

    #[test]
    fn test_batch_writes_ppm_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 4));
        let out = dir.path().join("out");

        s.batch(&out, FrameSelection::Range(1..=10), ConvertMethod::FixedPoint)
            .unwrap();

        for i in 1..4 {
            let ppm = fs::read(out.join(format!("frame_{i:06}.ppm"))).unwrap();
            assert!(ppm.starts_with(b"P6\n8 8\n255\n"));
            assert_eq!(ppm.len(), 11 + 8 * 8 * 3);
        }
        assert!(!out.join("frame_000000.ppm").exists());

        let summary = fs::read_to_string(out.join(SUMMARY_FILE)).unwrap();
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "YUV Frame Analysis Summary");
        assert!(lines[1].starts_with("Source: ") && lines[1].ends_with("input.yuv"));
        assert_eq!(lines[2], "Total frames: 4");
        assert_eq!(lines[3], "Processed frames: 3");
        assert_eq!(lines[4], "=".repeat(60));
        assert_eq!(lines[5], "");
        let frames = &lines[6..];
        assert_eq!(frames.len(), 3);
        assert!(frames[0].starts_with("Frame 1: Y(1-64"));
        assert!(frames[2].starts_with("Frame 3: "));
    }

    #[test]
    fn test_batch_out_of_range_fails() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 2));
        assert!(
            s.batch(&dir.path().join("out"), FrameSelection::Single(9), ConvertMethod::FixedPoint)
                .is_err()
        );
    }

    #[test]
    fn test_load_missing_frame_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 2));
        assert!(s.load_one(1).is_ok());
        let err = s.load_one(2).unwrap_err();
        assert!(err.to_string().contains("共 2 帧"));
    }

    #[test]
    fn test_dump_writes_three_planes() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 1));
        let out = dir.path().join("raw");
        s.dump(0, &out).unwrap();
        assert_eq!(fs::read(out.join("frame_000000_Y.raw")).unwrap().len(), 64);
        assert_eq!(fs::read(out.join("frame_000000_V.raw")).unwrap(), vec![128; 16]);
    }

    /// 两帧: 全黑亮度与全白亮度, 色度相同
    fn write_black_white_stream(dir: &Path) -> PathBuf {
        let mut data = vec![0u8; 64];
        data.extend(std::iter::repeat_n(128u8, 32));
        data.extend(std::iter::repeat_n(255u8, 64));
        data.extend(std::iter::repeat_n(128u8, 32));
        let path = dir.join("flash.yuv");
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_compare_reports_very_different_frames() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_black_white_stream(dir.path()));
        let out = s.compare_output(0, 1, None).unwrap();
        assert_eq!(out.planes[0].mean_abs_diff, 255.0);
        let kinds: Vec<&str> = out.findings.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, ["frames_very_different"]);
        assert_eq!(out.findings[0].severity, "warning");
    }

    #[test]
    fn test_compare_reports_nearly_identical_frames() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 2));
        let out = s.compare_output(0, 1, None).unwrap();
        let kinds: Vec<&str> = out.findings.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, ["frames_nearly_identical"]);
    }

    #[test]
    fn test_diff_sweep_walks_consecutive_frames() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 4));
        let diff_dir = dir.path().join("diffs");
        let out = s.diff_sweep(0, 10, Some(&diff_dir)).unwrap();

        assert_eq!(out.steps.len(), 3);
        for (i, step) in out.steps.iter().enumerate() {
            assert_eq!(step.frame, i as u64 + 1);
            assert_eq!(step.previous, i as u64);
            assert_eq!(step.mean_abs_diff, 1.0);
            assert_eq!(step.max_abs_diff, 1);
            assert_eq!(step.findings[0].kind, "frames_nearly_identical");
        }
        assert_eq!(out.stopped_at, Some(4));
        assert_eq!(out.diff_images.len(), 3);
        let pgm = fs::read(diff_dir.join("frame_000001_diff.pgm")).unwrap();
        assert!(pgm.starts_with(b"P5\n8 8\n255\n"));
    }

    #[test]
    fn test_diff_sweep_respects_start_and_count() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 6));
        let out = s.diff_sweep(2, 3, None).unwrap();
        let frames: Vec<u64> = out.steps.iter().map(|st| st.frame).collect();
        assert_eq!(frames, [3, 4]);
        assert_eq!(out.stopped_at, None);
        assert!(out.diff_images.is_empty());
    }

    #[test]
    fn test_diff_sweep_saves_limited_images() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 9));
        let diff_dir = dir.path().join("diffs");
        let out = s.diff_sweep(0, 9, Some(&diff_dir)).unwrap();
        assert_eq!(out.steps.len(), 8);
        assert_eq!(out.diff_images.len(), DIFF_IMAGE_LIMIT);
        assert!(!diff_dir.join("frame_000006_diff.pgm").exists());
    }

    #[test]
    fn test_analyze_writes_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 2));
        let report = dir.path().join("frame_000001_analysis.txt");
        s.analyze(1, Some(0), None, false, Some(&report)).unwrap();

        let text = fs::read_to_string(&report).unwrap();
        assert!(text.starts_with("Frame 1 分析报告\n"));
        assert!(text.contains("分辨率: 8x8"));
        assert!(text.contains("Frame 1: Y(1-64"));
        assert!(text.contains("[PLANE Y]"));
        assert!(text.contains("    240-255:"));
        assert!(text.contains("[DIFF vs #0]"));
        assert!(text.contains("[/FINDINGS]"));
        assert!(text.contains("[PREVIEW Y]"));
    }

    #[test]
    fn test_compare_writes_diff_image() {
        let dir = tempfile::tempdir().unwrap();
        let s = session(write_stream(dir.path(), 2));
        let pgm = dir.path().join("diff.pgm");
        s.compare(0, 1, Some(&pgm)).unwrap();
        let bytes = fs::read(&pgm).unwrap();
        let header = b"P5\n8 8\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        // 第 1 帧每个亮度样本比第 0 帧大 1
        assert!(bytes[header.len()..].iter().all(|&d| d == 1));
    }
}

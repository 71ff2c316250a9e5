//! yuvscope - 原始 YUV420P 帧检查工具
//!
//! 按固定分辨率把无头部的 YUV420P 文件切分为帧, 输出平面统计、帧间差分与
//! 有效性诊断与逐帧差分扫描, 并可将帧导出为 PPM 或原始平面以便肉眼检查解码器输出.

mod args;
mod commands;
mod logging;
mod report;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use yuvscope_analysis::diff::DEFAULT_OUTLIER_THRESHOLD;
use yuvscope_analysis::stats::DEFAULT_HISTOGRAM_BUCKETS;
use yuvscope_core::Resolution;

use args::{MethodArg, PaletteArg, parse_range, parse_size};
use commands::{FrameSelection, Session};

/// 批量导出默认采样间隔
const DEFAULT_SAMPLE_STEP: u64 = 10;

/// 差分扫描默认帧数
const DEFAULT_SWEEP_COUNT: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "yuvscope", version, about = "原始 YUV420P 帧检查与损坏诊断工具")]
struct Cli {
    /// 输入 YUV420P 文件路径
    input: PathBuf,

    /// 帧分辨率 (如 "1920x1080"), 宽高必须为正偶数
    #[arg(short = 's', long = "size", value_parser = parse_size)]
    size: Resolution,

    /// 直方图桶数 (1-256)
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BUCKETS)]
    buckets: usize,

    /// 帧间差分离群阈值
    #[arg(long = "diff-threshold", default_value_t = DEFAULT_OUTLIER_THRESHOLD)]
    diff_threshold: u8,

    /// 输出 JSON 格式
    #[arg(long, global = true)]
    json: bool,

    /// 日志文件目录 (不指定则只输出到控制台)
    #[arg(long = "log-dir")]
    log_dir: Option<PathBuf>,

    /// 日志详细级别 (-v=debug, -vv=trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 显示文件大小、帧数与估计时长
    Info {
        /// 用于估计时长的帧率
        #[arg(long)]
        fps: Option<f64>,
    },

    /// 分析单帧: 平面统计 + 有效性诊断
    Analyze {
        /// 帧序号
        #[arg(short, long, default_value_t = 0)]
        frame: u64,

        /// 参考帧序号, 指定时附带帧间差分
        #[arg(short, long)]
        reference: Option<u64>,

        /// 打印 Y 平面 ASCII 预览
        #[arg(long, value_enum)]
        preview: Option<PaletteArg>,

        /// 打印各平面开头字节
        #[arg(long)]
        hexdump: bool,

        /// 同时将文本报告写入该文件 (如 "frame_000004_analysis.txt")
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// 比较两帧
    Compare {
        /// 第一帧序号
        a: u64,
        /// 第二帧序号
        b: u64,
        /// 将 Y 平面绝对差写为 PGM
        #[arg(long = "diff-image")]
        diff_image: Option<PathBuf>,
    },

    /// 逐帧差分扫描: 每帧与前一帧比较, 用于发现撕裂与跳变
    Diffs {
        /// 起始帧序号
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// 扫描帧数
        #[arg(short = 'n', long, default_value_t = DEFAULT_SWEEP_COUNT)]
        count: u64,
        /// 保存前几张 Y 平面差值图 (PGM) 的目录
        #[arg(long = "diff-dir")]
        diff_dir: Option<PathBuf>,
    },

    /// 将单帧导出为 PPM
    Export {
        #[arg(short, long, default_value_t = 0)]
        frame: u64,
        /// 输出 PPM 路径
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long, value_enum, default_value_t = MethodArg::default())]
        method: MethodArg,
    },

    /// 批量导出 PPM 并生成摘要
    Batch {
        /// 输出目录
        #[arg(short, long)]
        output_dir: PathBuf,
        /// 只导出单帧
        #[arg(short, long, conflicts_with_all = ["range", "sample"])]
        frame: Option<u64>,
        /// 导出闭区间 (如 "10-20"), 终点超出帧数时截断
        #[arg(short, long, value_parser = parse_range, conflicts_with = "sample")]
        range: Option<std::ops::RangeInclusive<u64>>,
        /// 每隔 N 帧导出一帧
        #[arg(long)]
        sample: Option<u64>,
        #[arg(short, long, value_enum, default_value_t = MethodArg::default())]
        method: MethodArg,
    },

    /// 将单帧的 Y/U/V 平面写为原始文件
    Dump {
        #[arg(short, long, default_value_t = 0)]
        frame: u64,
        /// 输出目录
        #[arg(short, long)]
        output_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init("yuvscope", cli.verbose, cli.log_dir.as_deref()) {
        eprintln!("警告: 日志初始化失败: {e:#}");
    }

    if let Err(e) = run(cli) {
        tracing::error!("{e:#}");
        eprintln!("错误: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!("输入: {}, 分辨率: {}", cli.input.display(), cli.size);
    let session = Session::new(
        cli.input,
        cli.size,
        cli.buckets,
        cli.diff_threshold,
        cli.json,
    )?;

    match cli.command {
        Command::Info { fps } => session.info(fps),
        Command::Analyze {
            frame,
            reference,
            preview,
            hexdump,
            report,
        } => session.analyze(
            frame,
            reference,
            preview.map(Into::into),
            hexdump,
            report.as_deref(),
        ),
        Command::Compare { a, b, diff_image } => session.compare(a, b, diff_image.as_deref()),
        Command::Diffs {
            start,
            count,
            diff_dir,
        } => session.diffs(start, count, diff_dir.as_deref()),
        Command::Export {
            frame,
            output,
            method,
        } => session.export(frame, &output, method.into()),
        Command::Batch {
            output_dir,
            frame,
            range,
            sample,
            method,
        } => {
            let selection = match (frame, range) {
                (Some(index), _) => FrameSelection::Single(index),
                (None, Some(range)) => FrameSelection::Range(range),
                (None, None) => FrameSelection::EveryNth(sample.unwrap_or(DEFAULT_SAMPLE_STEP)),
            };
            session.batch(&output_dir, selection, method.into())
        }
        Command::Dump { frame, output_dir } => session.dump(frame, &output_dir),
    }
}

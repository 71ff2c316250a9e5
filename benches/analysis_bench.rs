//! yuvscope 性能基准测试.
//!
//! 覆盖整帧颜色转换、平面统计与帧间差分等核心路径.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use yuvscope::analysis::{FrameAnalyzer, FrameComparator, PlaneStatistics};
use yuvscope::core::{ColorRange, Frame, PlaneLayout};
use yuvscope::scale::{ConvertMethod, convert_frame_rgb24};

/// 创建 1920x1080 的伪随机帧
fn make_frame(index: u64, seed: usize) -> Frame {
    let layout = PlaneLayout::new(1920, 1080).unwrap();
    let data: Vec<u8> = (0..layout.frame_size())
        .map(|i| ((i * 31 + seed) % 256) as u8)
        .collect();
    Frame::from_bytes(index, &layout, data).unwrap()
}

fn bench_convert(c: &mut Criterion) {
    let frame = make_frame(0, 0);
    c.bench_function("yuv420p_to_rgb24_fixed_1920x1080", |b| {
        b.iter(|| black_box(convert_frame_rgb24(black_box(&frame), ConvertMethod::FixedPoint)));
    });
    c.bench_function("yuv420p_to_rgb24_float_1920x1080", |b| {
        let method = ConvertMethod::Float(ColorRange::Limited);
        b.iter(|| black_box(convert_frame_rgb24(black_box(&frame), method)));
    });
}

fn bench_stats(c: &mut Criterion) {
    let frame = make_frame(0, 0);
    let engine = PlaneStatistics::default();
    c.bench_function("plane_stats_y_1920x1080", |b| {
        b.iter(|| black_box(engine.analyze(black_box(frame.y())).unwrap()));
    });
}

fn bench_diff(c: &mut Criterion) {
    let a = make_frame(0, 0);
    let b_frame = make_frame(1, 7);
    let cmp = FrameComparator::default();
    c.bench_function("frame_diff_1920x1080", |b| {
        b.iter(|| black_box(cmp.diff_frames(black_box(&a), black_box(&b_frame)).unwrap()));
    });
}

fn bench_full_analysis(c: &mut Criterion) {
    let a = make_frame(0, 0);
    let b_frame = make_frame(1, 7);
    let analyzer = FrameAnalyzer::default();
    c.bench_function("frame_analysis_1920x1080", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&b_frame), Some(&a)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_convert,
    bench_stats,
    bench_diff,
    bench_full_analysis
);
criterion_main!(benches);

//! 命令行参数解析辅助.

use std::ops::RangeInclusive;

use clap::ValueEnum;
use yuvscope_analysis::AsciiPalette;
use yuvscope_core::{ColorRange, Resolution};
use yuvscope_scale::ConvertMethod;

/// 解析分辨率字符串 (如 "1920x1080")
pub(crate) fn parse_size(s: &str) -> Result<Resolution, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("无效的分辨率 '{s}', 应为 宽x高"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("无效的宽度 '{w}'"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("无效的高度 '{h}'"))?;
    Resolution::new(w, h).map_err(|e| e.to_string())
}

/// 解析闭区间 (如 "10-20" 或单个序号 "7")
pub(crate) fn parse_range(s: &str) -> Result<RangeInclusive<u64>, String> {
    let parse = |v: &str| {
        v.trim()
            .parse::<u64>()
            .map_err(|_| format!("无效的帧序号 '{v}'"))
    };
    let (start, end) = match s.split_once('-') {
        Some((a, b)) => (parse(a)?, parse(b)?),
        None => {
            let v = parse(s)?;
            (v, v)
        }
    };
    if start > end {
        return Err(format!("区间起点 {start} 大于终点 {end}"));
    }
    Ok(start..=end)
}

/// 转换方法参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum MethodArg {
    /// 定点整数 (有限范围)
    #[default]
    Fixed,
    /// 浮点 (有限范围)
    Float,
    /// 浮点 (完整范围)
    FloatFull,
}

impl From<MethodArg> for ConvertMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Fixed => ConvertMethod::FixedPoint,
            MethodArg::Float => ConvertMethod::Float(ColorRange::Limited),
            MethodArg::FloatFull => ConvertMethod::Float(ColorRange::Full),
        }
    }
}

/// 预览调色板参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum PaletteArg {
    #[default]
    Coarse,
    Detailed,
}

impl From<PaletteArg> for AsciiPalette {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Coarse => AsciiPalette::Coarse,
            PaletteArg::Detailed => AsciiPalette::Detailed,
        }
    }
}

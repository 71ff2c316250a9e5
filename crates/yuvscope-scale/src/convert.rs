//! YUV → RGB 颜色转换.
//!
//! 两条 BT.601 路径:
//! - 定点: 有限范围, 系数放大 256 倍, 算术右移 8 位 (负数向下取整)
//! - 浮点: 实数系数, 四舍五入; 有限范围时与定点路径逐通道误差不超过 ±2
//!
//! 有限范围定点公式:
//! ```text
//! C = Y - 16, D = U - 128, E = V - 128
//! R = clamp((298*C           + 409*E + 128) >> 8)
//! G = clamp((298*C - 100*D   - 208*E + 128) >> 8)
//! B = clamp((298*C + 516*D           + 128) >> 8)
//! ```
//!
//! 色度上采样为最近邻: 亮度 (row, col) 使用色度 (row/2, col/2),
//! 与参考输出逐位一致, 不做双线性插值.

use rayon::prelude::*;
use yuvscope_core::{ColorRange, Frame, RgbPixel};

/// 转换方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConvertMethod {
    /// 定点整数路径 (有限范围)
    #[default]
    FixedPoint,
    /// 浮点路径, 按指定色彩范围解释样本
    Float(ColorRange),
}

// ============================================================
// BT.601 定点常量 (有限范围, 缩放 256 倍)
// ============================================================

const LUMA_GAIN: i32 = 298; // 1.164 * 256
const CR_TO_R: i32 = 409; // 1.598 * 256
const CB_TO_G: i32 = 100; // 0.391 * 256
const CR_TO_G: i32 = 208; // 0.813 * 256
const CB_TO_B: i32 = 516; // 2.016 * 256

// ============================================================
// BT.601 浮点常量
// ============================================================

/// 有限范围实数系数 (与定点常量对应)
mod limited {
    pub const LUMA_GAIN: f64 = 1.164;
    pub const CR_TO_R: f64 = 1.596;
    pub const CB_TO_G: f64 = 0.392;
    pub const CR_TO_G: f64 = 0.813;
    pub const CB_TO_B: f64 = 2.017;
}

/// 完整范围 (JPEG) 实数系数
mod full {
    pub const CR_TO_R: f64 = 1.402;
    pub const CB_TO_G: f64 = 0.344136;
    pub const CR_TO_G: f64 = 0.714136;
    pub const CB_TO_B: f64 = 1.772;
}

#[inline]
fn clamp8(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

#[inline]
fn round_clamp8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// 定点 BT.601 转换单个样本三元组
#[inline]
pub fn convert_pixel(y: u8, u: u8, v: u8) -> RgbPixel {
    let c = i32::from(y) - 16;
    let d = i32::from(u) - 128;
    let e = i32::from(v) - 128;

    let luma = LUMA_GAIN * c + 128;
    RgbPixel {
        r: clamp8((luma + CR_TO_R * e) >> 8),
        g: clamp8((luma - CB_TO_G * d - CR_TO_G * e) >> 8),
        b: clamp8((luma + CB_TO_B * d) >> 8),
    }
}

/// 浮点 BT.601 转换单个样本三元组
pub fn convert_pixel_float(y: u8, u: u8, v: u8, range: ColorRange) -> RgbPixel {
    let d = f64::from(u) - 128.0;
    let e = f64::from(v) - 128.0;

    match range {
        ColorRange::Limited => {
            let c = limited::LUMA_GAIN * (f64::from(y) - 16.0);
            RgbPixel {
                r: round_clamp8(c + limited::CR_TO_R * e),
                g: round_clamp8(c - limited::CB_TO_G * d - limited::CR_TO_G * e),
                b: round_clamp8(c + limited::CB_TO_B * d),
            }
        }
        ColorRange::Full => {
            let c = f64::from(y);
            RgbPixel {
                r: round_clamp8(c + full::CR_TO_R * e),
                g: round_clamp8(c - full::CB_TO_G * d - full::CR_TO_G * e),
                b: round_clamp8(c + full::CB_TO_B * d),
            }
        }
    }
}

/// 按指定方法转换单个样本三元组
#[inline]
pub fn convert_pixel_with(method: ConvertMethod, y: u8, u: u8, v: u8) -> RgbPixel {
    match method {
        ConvertMethod::FixedPoint => convert_pixel(y, u, v),
        ConvertMethod::Float(range) => convert_pixel_float(y, u, v, range),
    }
}

/// 转换一行亮度样本, `chroma_u`/`chroma_v` 为对应的色度行
fn convert_row(
    method: ConvertMethod,
    luma: &[u8],
    chroma_u: &[u8],
    chroma_v: &[u8],
    mut emit: impl FnMut(usize, RgbPixel),
) {
    for (col, &y) in luma.iter().enumerate() {
        let (Some(&u), Some(&v)) = (chroma_u.get(col / 2), chroma_v.get(col / 2)) else {
            break;
        };
        emit(col, convert_pixel_with(method, y, u, v));
    }
}

/// 第 `row` 行亮度及其对应的色度行
fn frame_rows(frame: &Frame, row: u32) -> (&[u8], &[u8], &[u8]) {
    let chroma_row = row / 2;
    (
        frame.y().row(row).unwrap_or_default(),
        frame.u().row(chroma_row).unwrap_or_default(),
        frame.v().row(chroma_row).unwrap_or_default(),
    )
}

/// 整帧转换为像素序列 (行优先, 每个 Y 样本一个像素)
pub fn convert_frame(frame: &Frame, method: ConvertMethod) -> Vec<RgbPixel> {
    let width = frame.width() as usize;
    let mut pixels = Vec::with_capacity(width * frame.height() as usize);
    for row in 0..frame.height() {
        let (luma, u, v) = frame_rows(frame, row);
        convert_row(method, luma, u, v, |_, pixel| pixels.push(pixel));
    }
    pixels
}

/// 整帧转换为打包 RGB24 (行间并行)
pub fn convert_frame_rgb24(frame: &Frame, method: ConvertMethod) -> Vec<u8> {
    let width = frame.width() as usize;
    let stride = width * 3;
    let mut rgb = vec![0u8; stride * frame.height() as usize];

    rgb.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(row, out)| {
            let (luma, u, v) = frame_rows(frame, row as u32);
            convert_row(method, luma, u, v, |col, pixel| {
                out[col * 3..col * 3 + 3].copy_from_slice(&pixel.to_array())
            });
        });

    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuvscope_core::{Plane, PlaneKind};

    #[test]
    fn test_bt601_参考黑白点() {
        assert_eq!(convert_pixel(16, 128, 128), RgbPixel::BLACK);
        assert_eq!(convert_pixel(235, 128, 128), RgbPixel::WHITE);
        assert_eq!(convert_pixel(0, 128, 128), RgbPixel::BLACK);
        assert_eq!(convert_pixel(255, 128, 128), RgbPixel::WHITE);
    }

    #[test]
    fn test_fixed_point_known_values() {
        // C=110: (298*110 + 128) >> 8 = 128
        assert_eq!(convert_pixel(126, 128, 128), RgbPixel::new(128, 128, 128));
        // 纯红 (BT.601 有限范围): Y=81, U=90, V=240
        let red = convert_pixel(81, 90, 240);
        assert!(red.r >= 254 && red.g <= 1 && red.b <= 1, "{red:?}");
    }

    #[test]
    fn test_arithmetic_shift_floors_negative() {
        // G = (298*0 - 100*127 - 208*0 + 128) >> 8 = -12572 >> 8 = -50 (向下取整), 钳位为 0
        let p = convert_pixel(16, 255, 128);
        assert_eq!(p.g, 0);
        // R = (298*4 + 409*(-1) + 128) >> 8 = 911 >> 8 = 3
        assert_eq!(convert_pixel(20, 128, 127).r, 3);
        // R = (298*0 + 409*(-1) + 128) >> 8 = -281 >> 8 = -2, 钳位为 0
        assert_eq!(convert_pixel(16, 128, 127).r, 0);
    }

    #[test]
    fn test_convert_pixel_deterministic() {
        for y in (0..=255u8).step_by(17) {
            for u in (0..=255u8).step_by(15) {
                for v in (0..=255u8).step_by(15) {
                    assert_eq!(convert_pixel(y, u, v), convert_pixel(y, u, v));
                }
            }
        }
    }

    #[test]
    fn test_fixed_float_agree_within_2() {
        let mut worst = 0u8;
        for y in 0..=255u8 {
            for u in (0..=255u8).step_by(3) {
                for v in (0..=255u8).step_by(3) {
                    let fixed = convert_pixel(y, u, v);
                    let float = convert_pixel_float(y, u, v, ColorRange::Limited);
                    worst = worst.max(fixed.max_channel_delta(&float));
                }
            }
        }
        assert!(worst <= 2, "定点/浮点最大偏差 {worst}");
    }

    #[test]
    fn test_full_range_float() {
        assert_eq!(
            convert_pixel_float(0, 128, 128, ColorRange::Full),
            RgbPixel::BLACK
        );
        assert_eq!(
            convert_pixel_float(255, 128, 128, ColorRange::Full),
            RgbPixel::WHITE
        );
        // 完整范围下 Y=128 中性灰保持不变
        assert_eq!(
            convert_pixel_float(128, 128, 128, ColorRange::Full),
            RgbPixel::new(128, 128, 128)
        );
    }

    #[test]
    fn test_float_reference_levels_per_range() {
        for range in [ColorRange::Limited, ColorRange::Full] {
            let black = convert_pixel_float(range.luma_black(), 128, 128, range);
            let white = convert_pixel_float(range.luma_white(), 128, 128, range);
            assert_eq!(black, RgbPixel::BLACK, "{range}");
            assert_eq!(white, RgbPixel::WHITE, "{range}");
        }
    }

    fn quad_frame() -> Frame {
        // 4x2 亮度, 2x1 色度: 左半 U/V=(128,128), 右半 U/V=(90,240)
        let y = Plane::new(PlaneKind::Y, 4, 2, vec![16, 126, 235, 81, 81, 235, 126, 16]).unwrap();
        let u = Plane::new(PlaneKind::U, 2, 1, vec![128, 90]).unwrap();
        let v = Plane::new(PlaneKind::V, 2, 1, vec![128, 240]).unwrap();
        Frame::from_planes(0, y, u, v).unwrap()
    }

    #[test]
    fn test_convert_frame_nearest_neighbor_chroma() {
        let frame = quad_frame();
        let pixels = convert_frame(&frame, ConvertMethod::FixedPoint);
        assert_eq!(pixels.len(), 8);

        let ys = frame.y().samples();
        for row in 0..2usize {
            for col in 0..4usize {
                let (u, v) = if col < 2 { (128, 128) } else { (90, 240) };
                assert_eq!(
                    pixels[row * 4 + col],
                    convert_pixel(ys[row * 4 + col], u, v),
                    "row={row} col={col}"
                );
            }
        }
    }

    #[test]
    fn test_convert_frame_rgb24_matches_pixels() {
        let frame = quad_frame();
        for method in [
            ConvertMethod::FixedPoint,
            ConvertMethod::Float(ColorRange::Limited),
            ConvertMethod::Float(ColorRange::Full),
        ] {
            let pixels = convert_frame(&frame, method);
            let packed = convert_frame_rgb24(&frame, method);
            let expected: Vec<u8> = pixels.iter().flat_map(|p| p.to_array()).collect();
            assert_eq!(packed, expected, "{method:?}");
        }
    }
}

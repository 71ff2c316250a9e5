//! 平面的 ASCII 预览.
//!
//! 按固定步长对平面下采样, 每个样本映射为一个亮度字符.

use yuvscope_core::Plane;

/// 越界采样点使用的字符
const OUT_OF_RANGE: char = '?';

/// 字符调色板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AsciiPalette {
    /// 8 级, 步长 32, 每个样本输出两个字符以补偿字符宽高比
    #[default]
    Coarse,
    /// 15 级, 暗部更细, 0 单独映射为空白
    Detailed,
}

impl AsciiPalette {
    /// 样本对应的字符
    pub fn glyph(&self, sample: u8) -> char {
        match self {
            Self::Coarse => match sample {
                0..32 => ' ',
                32..64 => '.',
                64..96 => ':',
                96..128 => '-',
                128..160 => '=',
                160..192 => '+',
                192..224 => '*',
                _ => '#',
            },
            Self::Detailed => match sample {
                0 => ' ',
                1..8 => '.',
                8..16 => ':',
                16..24 => ';',
                24..32 => '!',
                32..40 => '?',
                40..48 => '+',
                48..56 => '=',
                56..64 => '*',
                64..80 => '#',
                80..100 => '%',
                100..128 => '@',
                128..160 => '&',
                160..192 => '$',
                _ => 'W',
            },
        }
    }

    /// 每个采样点重复输出的字符数
    pub const fn repeat(&self) -> usize {
        match self {
            Self::Coarse => 2,
            Self::Detailed => 1,
        }
    }
}

/// 将平面渲染为 `rows` 行、`cols` 个采样点的字符画
///
/// 采样点为 `(row * step_y, col * step_x)`, 其中 `step = 维度 / 数量`.
pub fn render_ascii(plane: &Plane, rows: u32, cols: u32, palette: AsciiPalette) -> Vec<String> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let step_y = plane.height() / rows;
    let step_x = plane.width() / cols;

    (0..rows)
        .map(|row| {
            let mut line = String::with_capacity(cols as usize * palette.repeat());
            for col in 0..cols {
                let glyph = plane
                    .get(row * step_y, col * step_x)
                    .map_or(OUT_OF_RANGE, |s| palette.glyph(s));
                for _ in 0..palette.repeat() {
                    line.push(glyph);
                }
            }
            line
        })
        .collect()
}

//! 平面与帧.
//!
//! 帧由提取器按需创建, 不做缓存. 平面构造后只读.

use std::fmt;

use crate::{PlaneLayout, Resolution, YuvError, YuvResult};

/// 平面类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    /// 亮度
    Y,
    /// 蓝色色差 (Cb)
    U,
    /// 红色色差 (Cr)
    V,
}

impl PlaneKind {
    /// 全部平面, 按存储顺序
    pub const ALL: [PlaneKind; 3] = [PlaneKind::Y, PlaneKind::U, PlaneKind::V];

    /// 平面名称
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Y => "Y",
            Self::U => "U",
            Self::V => "V",
        }
    }

    /// 平面描述 (用于报告)
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Y => "亮度",
            Self::U => "蓝色色度",
            Self::V => "红色色度",
        }
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 单个像素平面 (8 位样本, 行优先)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    kind: PlaneKind,
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl Plane {
    /// 创建平面, 样本数必须等于 `width * height`
    pub fn new(kind: PlaneKind, width: u32, height: u32, samples: Vec<u8>) -> YuvResult<Self> {
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(YuvError::InvalidArgument(format!(
                "{kind} 平面样本数 {} 与尺寸 {width}x{height} 不符",
                samples.len()
            )));
        }
        Ok(Self {
            kind,
            width,
            height,
            samples,
        })
    }

    /// 以常量填充创建平面
    pub fn filled(kind: PlaneKind, width: u32, height: u32, value: u8) -> Self {
        Self {
            kind,
            width,
            height,
            samples: vec![value; width as usize * height as usize],
        }
    }

    pub const fn kind(&self) -> PlaneKind {
        self.kind
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    /// (宽, 高)
    pub const fn shape(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 全部样本
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 第 `row` 行的样本, 越界返回 None
    pub fn row(&self, row: u32) -> Option<&[u8]> {
        if row >= self.height {
            return None;
        }
        let start = row as usize * self.width as usize;
        self.samples.get(start..start + self.width as usize)
    }

    /// (row, col) 处的样本, 越界返回 None
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.samples
            .get(row as usize * self.width as usize + col as usize)
            .copied()
    }

    /// 取出样本缓冲区
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

/// 一帧 YUV420P 数据
///
/// U/V 平面宽高为 Y 平面的一半.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    index: u64,
    y: Plane,
    u: Plane,
    v: Plane,
}

impl Frame {
    /// 按布局将整帧字节拆分为三个平面
    ///
    /// `data` 长度必须恰好等于 `layout.frame_size()`.
    pub fn from_bytes(index: u64, layout: &PlaneLayout, mut data: Vec<u8>) -> YuvResult<Self> {
        if data.len() != layout.frame_size() {
            return Err(YuvError::InvalidArgument(format!(
                "帧数据长度 {} 与帧大小 {} 不符",
                data.len(),
                layout.frame_size()
            )));
        }
        let res = layout.resolution();
        let v_samples = data.split_off(layout.v_offset());
        let u_samples = data.split_off(layout.u_offset());
        let y_samples = data;

        Ok(Self {
            index,
            y: Plane::new(PlaneKind::Y, res.width(), res.height(), y_samples)?,
            u: Plane::new(
                PlaneKind::U,
                res.chroma_width(),
                res.chroma_height(),
                u_samples,
            )?,
            v: Plane::new(
                PlaneKind::V,
                res.chroma_width(),
                res.chroma_height(),
                v_samples,
            )?,
        })
    }

    /// 由三个平面组装帧, 校验 4:2:0 尺寸关系
    ///
    /// Y 平面宽高必须为正偶数, 否则返回 `InvalidResolution`.
    pub fn from_planes(index: u64, y: Plane, u: Plane, v: Plane) -> YuvResult<Self> {
        let res = Resolution::new(y.width(), y.height())?;
        let chroma = (res.chroma_width(), res.chroma_height());
        if u.shape() != chroma {
            return Err(YuvError::ShapeMismatch {
                expected: chroma,
                actual: u.shape(),
            });
        }
        if v.shape() != chroma {
            return Err(YuvError::ShapeMismatch {
                expected: chroma,
                actual: v.shape(),
            });
        }
        Ok(Self { index, y, u, v })
    }

    /// 帧序号
    pub const fn index(&self) -> u64 {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.y.width()
    }

    pub fn height(&self) -> u32 {
        self.y.height()
    }

    pub fn y(&self) -> &Plane {
        &self.y
    }

    pub fn u(&self) -> &Plane {
        &self.u
    }

    pub fn v(&self) -> &Plane {
        &self.v
    }

    /// 按类型取平面
    pub fn plane(&self, kind: PlaneKind) -> &Plane {
        match kind {
            PlaneKind::Y => &self.y,
            PlaneKind::U => &self.u,
            PlaneKind::V => &self.v,
        }
    }

    /// 按 Y/U/V 顺序遍历平面
    pub fn planes(&self) -> impl Iterator<Item = &Plane> {
        [&self.y, &self.u, &self.v].into_iter()
    }
}

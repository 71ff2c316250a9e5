//! 平面统计.
//!
//! 单次扫描建立 256 项取值计数表, 再由计数表推导最值、均值、标准差、
//! 不同取值个数与直方图.
//!
//! 直方图桶下标 = `min(sample * buckets / 256, buckets - 1)`,
//! 默认 16 桶时即 `min(sample / 16, 15)`, 顶部桶吸收 240-255.

use yuvscope_core::{Plane, PlaneKind, YuvError, YuvResult};

/// 默认直方图桶数
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 16;

/// 单个平面的统计结果
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneStats {
    /// 平面类型
    pub kind: PlaneKind,
    /// 样本数
    pub sample_count: usize,
    pub min: u8,
    pub max: u8,
    /// 算术平均 (无整数截断)
    pub mean: f64,
    /// 总体标准差
    pub std_dev: f64,
    /// 不同取值个数
    pub unique_count: usize,
    /// 取值恰为 0 的样本数
    pub zero_count: usize,
    /// 直方图, 各桶计数之和等于样本数
    pub histogram: Vec<u64>,
}

impl PlaneStats {
    /// 取值范围 (max - min)
    pub fn range(&self) -> u8 {
        self.max - self.min
    }

    /// 是否为常量平面
    pub fn is_constant(&self) -> bool {
        self.unique_count == 1
    }

    /// 计数占样本总数的比例
    pub fn fraction(&self, count: u64) -> f64 {
        count as f64 / self.sample_count as f64
    }

    /// 零值样本比例
    pub fn zero_ratio(&self) -> f64 {
        self.fraction(self.zero_count as u64)
    }

    /// 计数最多的桶 (下标, 计数), 并列时取下标最小者
    pub fn dominant_bucket(&self) -> (usize, u64) {
        self.histogram
            .iter()
            .copied()
            .enumerate()
            .fold((0, 0), |best, (i, c)| if c > best.1 { (i, c) } else { best })
    }

    /// 第 `bucket` 个桶覆盖的取值区间 (闭区间)
    pub fn bucket_bounds(&self, bucket: usize) -> (u8, u8) {
        bucket_bounds(self.histogram.len(), bucket)
    }
}

/// `buckets` 个桶时第 `bucket` 个桶覆盖的取值区间 (闭区间)
pub fn bucket_bounds(buckets: usize, bucket: usize) -> (u8, u8) {
    // 桶 i 包含满足 floor(s * n / 256) == i 的样本 s
    let start = (bucket * 256).div_ceil(buckets);
    let end = if bucket + 1 >= buckets {
        255
    } else {
        ((bucket + 1) * 256).div_ceil(buckets) - 1
    };
    (start.min(255) as u8, end.min(255) as u8)
}

/// 平面统计器
#[derive(Debug, Clone, Copy)]
pub struct PlaneStatistics {
    buckets: usize,
}

impl Default for PlaneStatistics {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }
}

impl PlaneStatistics {
    /// 指定直方图桶数 (1..=256)
    pub fn new(buckets: usize) -> YuvResult<Self> {
        if buckets == 0 || buckets > 256 {
            return Err(YuvError::InvalidArgument(format!(
                "直方图桶数必须在 1..=256 之间: {buckets}"
            )));
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    /// 样本值对应的桶下标
    #[inline]
    pub fn bucket_of(&self, sample: u8) -> usize {
        (usize::from(sample) * self.buckets / 256).min(self.buckets - 1)
    }

    /// 统计平面, 空平面返回 `InvalidArgument`
    pub fn analyze(&self, plane: &Plane) -> YuvResult<PlaneStats> {
        if plane.is_empty() {
            return Err(YuvError::InvalidArgument(format!(
                "{} 平面为空, 无法统计",
                plane.kind()
            )));
        }

        let mut counts = [0u64; 256];
        for &s in plane.samples() {
            counts[usize::from(s)] += 1;
        }

        let sample_count = plane.len();
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        let mut sum = 0u64;
        let mut unique_count = 0;
        let mut histogram = vec![0u64; self.buckets];

        for (value, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let value = value as u8;
            min = min.min(value);
            max = max.max(value);
            sum += u64::from(value) * count;
            unique_count += 1;
            histogram[self.bucket_of(value)] += count;
        }

        let mean = sum as f64 / sample_count as f64;
        let variance = counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(v, &c)| {
                let delta = v as f64 - mean;
                delta * delta * c as f64
            })
            .sum::<f64>()
            / sample_count as f64;

        Ok(PlaneStats {
            kind: plane.kind(),
            sample_count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
            unique_count,
            zero_count: counts[0] as usize,
            histogram,
        })
    }
}

/// SSD检测结果数据结构定义
/// Data structures for SSD detector output

use serde::{Deserialize, Serialize};

// ========== 公共常量 ==========

/// 原始输出中每个检测框占用的浮点数个数
/// (image_id, class_id, score, left, top, right, bottom)
pub const SSD_RECORD_LEN: usize = 7;

/// 原始输出头部长度: [num_valid, 6个未使用值]
pub const SSD_HEADER_LEN: usize = 7;

/// 默认类别标签 (class_id 即此表下标)
pub const DEFAULT_LABELS: [&str; 7] = ["background", "1", "2", "3", "4", "5", "face"];

// ========== 数据结构 ==========

/// 归一化检测框, 坐标范围 [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// 像素坐标检测框 (已裁剪到图像范围内)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl PixelBox {
    /// 框中心点 (整数中点)
    pub fn center(&self) -> (i32, i32) {
        let mid = |a: i32, b: i32| ((a as i64 + b as i64) / 2) as i32;
        (mid(self.x1, self.x2), mid(self.y1, self.y2))
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// 单个检测结果 (Detection record)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub class_id: u32,
    pub score: f32,
    #[serde(flatten)]
    pub bbox: NormalizedBox,
}

impl DetectionRecord {
    pub fn new(class_id: u32, score: f32, bbox: NormalizedBox) -> Self {
        Self {
            class_id,
            score,
            bbox,
        }
    }

    /// 分数与坐标是否全部为有限值 (NaN/Inf 的记录必须丢弃)
    pub fn is_finite(&self) -> bool {
        self.score.is_finite()
            && self.bbox.left.is_finite()
            && self.bbox.top.is_finite()
            && self.bbox.right.is_finite()
            && self.bbox.bottom.is_finite()
    }

    /// 置信度百分比 (截断取整)
    pub fn percentage(&self) -> i32 {
        (self.score * 100.0) as i32
    }

    /// 归一化坐标 → 像素坐标
    ///
    /// 先截断取整, 再把每个角点裁剪到 [0, dim-1]
    pub fn to_pixel_box(&self, width: u32, height: u32) -> PixelBox {
        let max_x = i32::try_from(width.saturating_sub(1)).unwrap_or(i32::MAX);
        let max_y = i32::try_from(height.saturating_sub(1)).unwrap_or(i32::MAX);
        let scale = |v: f32, dim: u32, max: i32| ((v * dim as f32) as i32).clamp(0, max);

        PixelBox {
            x1: scale(self.bbox.left, width, max_x),
            y1: scale(self.bbox.top, height, max_y),
            x2: scale(self.bbox.right, width, max_x),
            y2: scale(self.bbox.bottom, height, max_y),
        }
    }

    /// 从一组7个原始值构造, 含非有限值时返回 None
    pub fn from_raw(raw: &[f32]) -> Option<Self> {
        if raw.len() < SSD_RECORD_LEN || raw[..SSD_RECORD_LEN].iter().any(|v| !v.is_finite()) {
            return None;
        }
        if raw[1] < 0.0 {
            return None;
        }

        Some(Self {
            class_id: raw[1] as u32,
            score: raw[2],
            bbox: NormalizedBox {
                left: raw[3],
                top: raw[4],
                right: raw[5],
                bottom: raw[6],
            },
        })
    }
}

/// 解析SSD MobileNet原始输出
///
/// 布局:
/// ```text
/// [0]        有效检测数量 num_valid
/// [1..7]     未使用
/// [7 + 7*i]  第i个检测: image_id, class_id, score, left, top, right, bottom
/// ```
/// 含非有限值的检测被跳过; 数量超出缓冲区时只解析实际存在的部分
pub fn parse_ssd_output(output: &[f32]) -> Vec<DetectionRecord> {
    let Some(&count) = output.first() else {
        return Vec::new();
    };
    if !count.is_finite() || count <= 0.0 {
        return Vec::new();
    }

    let available = output.len().saturating_sub(SSD_HEADER_LEN) / SSD_RECORD_LEN;
    let num_valid = (count as usize).min(available);

    (0..num_valid)
        .filter_map(|i| {
            let base = SSD_HEADER_LEN + i * SSD_RECORD_LEN;
            DetectionRecord::from_raw(&output[base..base + SSD_RECORD_LEN])
        })
        .collect()
}

/// 单帧检测数据 (检测适配器 → 处理循环)
#[derive(Clone, Debug, PartialEq)]
pub struct FrameDetections {
    pub width: u32,
    pub height: u32,
    /// 原始帧图像 (可选, 仅渲染使用)
    pub image: Option<std::path::PathBuf>,
    pub detections: Vec<DetectionRecord>,
}

impl FrameDetections {
    pub fn frame_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// 检测数据 (Detection data)
///
/// 检测适配器产出的每帧检测记录, 以及SSD原始输出的解码
pub mod types;

pub use types::{
    parse_ssd_output, DetectionRecord, FrameDetections, NormalizedBox, PixelBox, DEFAULT_LABELS,
};

/// 检测输入系统 (Detection Input)
///
/// 检测适配器负责产出每帧检测结果, 推理设备与视频采集不在本库范围内
/// - Replay: 回放录制好的检测结果 (JSON Lines)
pub mod replay;

use anyhow::Result;

use crate::detection::FrameDetections;

pub use replay::{resolve_inputs, scan_dir, ReplaySource};

/// 检测适配器接口
pub trait DetectionSource {
    /// 读取下一帧, 数据源结束时返回 `Ok(None)`
    fn next_frame(&mut self) -> Result<Option<FrameDetections>>;
}

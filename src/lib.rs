pub mod config; // 命令行参数
pub mod detection; // SSD检测结果
pub mod gesture; // 手势轨迹识别
pub mod gesture_config; // JSON配置
pub mod input; // 检测输入 (回放)
pub mod pipeline; // 帧处理流水线
pub mod renderer; // 叠加渲染

pub use crate::config::{Args, Resolution};
pub use crate::detection::{parse_ssd_output, DetectionRecord, FrameDetections};
pub use crate::gesture::{
    Axis, Classification, ClassifierConfig, Direction, DisplacementMetric, GestureClassifier,
    GestureEvent, GestureSink, TrajectoryBuffer,
};
pub use crate::gesture_config::GestureConfig;
pub use crate::input::{DetectionSource, ReplaySource};
pub use crate::pipeline::{Controls, FrameStats, GesturePipeline, KeyAction};
pub use crate::renderer::OverlayRenderer;

/// 默认日志过滤: 库 (`ssd_gesture`) 与二进制 (`gesture`) 两个目标
pub const DEFAULT_LOG_FILTER: &str = "ssd_gesture=info,gesture=info";

/// 当前时间字符串 (北京时间), 用于输出目录命名
pub fn gen_time_string(delimiter: &str) -> String {
    let t_now = match chrono::FixedOffset::east_opt(8 * 60 * 60) {
        Some(offset) => chrono::Utc::now().with_timezone(&offset).naive_local(),
        None => chrono::Utc::now().naive_utc(),
    };
    let fmt = format!(
        "%Y{}%m{}%d{}%H{}%M{}%S{}%f",
        delimiter, delimiter, delimiter, delimiter, delimiter, delimiter
    );
    t_now.format(&fmt).to_string()
}

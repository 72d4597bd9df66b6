/// 手势识别系统 (Gesture Recognition)
///
/// 检测结果 → 轨迹缓冲 → 坐标窗口 → 直线拟合分类 → 手势事件 → 输出端
/// - Trajectory: 跟踪类别最近10个中心点
/// - Fit:        最小二乘直线拟合
/// - Classifier: 斜率 + 位移阈值规则
/// - Sink:       手势事件输出
pub mod classifier;
pub mod fit;
pub mod sink;
pub mod trajectory;

use std::fmt;

pub use classifier::{Classification, ClassifierConfig, DisplacementMetric, GestureClassifier};
pub use fit::LinearFit;
pub use sink::{ChannelSink, ConsoleSink, GestureSink};
pub use trajectory::{Point, TrajectoryBuffer, WINDOW_CAPACITY};

/// 运动轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "Horizontal"),
            Axis::Vertical => write!(f, "Vertical"),
        }
    }
}

/// 手势方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// 手势事件 (瞬时, 不持久化)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GestureEvent {
    /// 跟踪类别ID
    pub gesture_id: u32,
    pub direction: Direction,
}

impl fmt::Display for GestureEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gesture {} {} Move {}",
            self.gesture_id,
            self.direction.axis(),
            self.direction
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display() {
        let event = GestureEvent {
            gesture_id: 2,
            direction: Direction::Left,
        };
        assert_eq!(event.to_string(), "Gesture 2 Horizontal Move Left");

        let event = GestureEvent {
            gesture_id: 6,
            direction: Direction::Up,
        };
        assert_eq!(event.to_string(), "Gesture 6 Vertical Move Up");
    }
}

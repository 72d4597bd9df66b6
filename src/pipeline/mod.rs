/// 帧处理流水线 (Frame pipeline)
///
/// 单线程逐帧处理: 检测结果 → 轨迹更新 → 手势分类 → 输出端
/// 轨迹缓冲只归当前流水线所有, 不允许并发写入
pub mod controls;
pub mod stats;

pub use controls::{Controls, KeyAction};
pub use stats::FrameStats;

use crate::detection::DetectionRecord;
use crate::gesture::{
    Classification, ClassifierConfig, GestureClassifier, GestureSink, TrajectoryBuffer,
};

pub struct GesturePipeline {
    buffer: TrajectoryBuffer,
    classifier: GestureClassifier,
}

impl GesturePipeline {
    pub fn new(tracked_class_id: u32, config: ClassifierConfig) -> Self {
        Self {
            buffer: TrajectoryBuffer::new(tracked_class_id),
            classifier: GestureClassifier::new(tracked_class_id, config),
        }
    }

    pub fn tracked_class_id(&self) -> u32 {
        self.buffer.tracked_class_id()
    }

    pub fn trajectory(&self) -> &TrajectoryBuffer {
        &self.buffer
    }

    /// 处理一帧: 更新轨迹后对当前窗口分类
    ///
    /// 本帧没有匹配时窗口不变, 但仍然分类 (旧轨迹可能继续触发)
    pub fn process(
        &mut self,
        detections: &[DetectionRecord],
        frame_size: (u32, u32),
    ) -> Classification {
        self.buffer.observe(detections, frame_size);
        self.classifier.classify(self.buffer.xs(), self.buffer.ys())
    }

    /// 处理一帧并把手势交给输出端, 返回上报数量
    pub fn run_frame<S: GestureSink + ?Sized>(
        &mut self,
        detections: &[DetectionRecord],
        frame_size: (u32, u32),
        sink: &mut S,
    ) -> usize {
        let result = self.process(detections, frame_size);
        for event in result.iter() {
            sink.report(event);
        }
        result.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::NormalizedBox;
    use crate::gesture::{Direction, GestureEvent, Point, WINDOW_CAPACITY};

    fn centred(class_id: u32, cx: f32, cy: f32) -> DetectionRecord {
        DetectionRecord::new(
            class_id,
            0.9,
            NormalizedBox {
                left: cx - 0.05,
                top: cy - 0.05,
                right: cx + 0.05,
                bottom: cy + 0.05,
            },
        )
    }

    #[test]
    fn test_swipe_after_window_filled() {
        let mut pipeline = GesturePipeline::new(2, ClassifierConfig::default());
        let mut events: Vec<GestureEvent> = Vec::new();

        // 在 1000x1000 画面上水平右移, y 固定
        // 预热阶段窗口里还有 (0,0) 哨兵, 可能上报竖直手势, 这里不关心
        for i in 0..WINDOW_CAPACITY - 1 {
            let cx = 0.1 + 0.08 * i as f32;
            pipeline.run_frame(&[centred(2, cx, 0.5)], (1000, 1000), &mut events);
        }

        let cx = 0.1 + 0.08 * (WINDOW_CAPACITY - 1) as f32;
        let result = pipeline.process(&[centred(2, cx, 0.5)], (1000, 1000));
        assert_eq!(
            result.horizontal,
            Some(GestureEvent {
                gesture_id: 2,
                direction: Direction::Left
            })
        );
        assert!(result.vertical.is_none());
        assert!(pipeline.trajectory().points().all(|p| *p != Point::ORIGIN));
    }

    #[test]
    fn test_untracked_class_never_reports() {
        let mut pipeline = GesturePipeline::new(2, ClassifierConfig::default());
        let mut events: Vec<GestureEvent> = Vec::new();
        for i in 0..20 {
            let cx = 0.05 * i as f32;
            pipeline.run_frame(&[centred(6, cx, 0.5)], (640, 480), &mut events);
        }
        assert!(events.is_empty());
        assert!(pipeline.trajectory().points().all(|p| *p == Point::ORIGIN));
    }

    #[test]
    fn test_nan_detection_keeps_previous_window() {
        let mut pipeline = GesturePipeline::new(2, ClassifierConfig::default());
        pipeline.process(&[centred(2, 0.5, 0.5)], (640, 480));
        let before: Vec<Point> = pipeline.trajectory().points().copied().collect();

        pipeline.process(&[centred(2, f32::NAN, 0.5)], (640, 480));
        let after: Vec<Point> = pipeline.trajectory().points().copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_stale_window_keeps_classifying() {
        let mut pipeline = GesturePipeline::new(2, ClassifierConfig::default());
        for i in 0..WINDOW_CAPACITY {
            let cy = 0.1 + 0.08 * i as f32;
            pipeline.process(&[centred(2, 0.5, cy)], (1000, 1000));
        }
        // 无检测的帧: 轨迹不衰减, 结果与上一帧一致
        let first = pipeline.process(&[], (1000, 1000));
        let second = pipeline.process(&[], (1000, 1000));
        assert_eq!(first, second);
        assert_eq!(first.vertical.map(|e| e.direction), Some(Direction::Down));
    }
}

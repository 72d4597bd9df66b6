//! 帧率统计

use std::time::Instant;

use tracing::debug;

/// 每隔多少帧计算一次实时帧率
pub const FPS_PERIOD_FRAMES: u64 = 30;

pub struct FrameStats {
    frame_count: u64,
    start: Instant,
    period_start: Instant,
    current_fps: f64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_count: 0,
            start: now,
            period_start: now,
            current_fps: 0.0,
        }
    }

    /// 记录一帧, 满一个周期时刷新实时帧率
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        self.frame_count += 1;
        if self.frame_count % FPS_PERIOD_FRAMES == 0 {
            let elapsed = now.duration_since(self.period_start).as_secs_f64();
            if elapsed > 0.0 {
                self.current_fps = FPS_PERIOD_FRAMES as f64 / elapsed;
            }
            self.period_start = now;
            debug!("⏱️ 实时帧率: {:.1}fps", self.current_fps);
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn current_fps(&self) -> f64 {
        self.current_fps
    }

    /// 从开始到现在的平均帧率
    pub fn average_fps(&self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fps_updates_every_period() {
        let mut stats = FrameStats::new();
        let base = stats.period_start;
        for i in 1..FPS_PERIOD_FRAMES {
            stats.tick_at(base + Duration::from_millis(i * 10));
        }
        assert_eq!(stats.current_fps(), 0.0);

        // 30帧用时 300ms → 100fps
        stats.tick_at(base + Duration::from_millis(300));
        assert!((stats.current_fps() - 100.0).abs() < 1e-6);
        assert_eq!(stats.frame_count(), FPS_PERIOD_FRAMES);
    }
}

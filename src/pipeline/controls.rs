//! 键盘控制
//!
//! - q / Q: 退出
//! - B:     最小显示置信度 +5%
//! - b:     最小显示置信度 -5%

use tracing::info;

/// 每次按键调整的百分比步长
pub const SCORE_STEP_PERCENT: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ScoreChanged(i32),
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Controls {
    min_score_percent: i32,
}

impl Controls {
    pub fn new(min_score_percent: i32) -> Self {
        Self {
            min_score_percent: min_score_percent.clamp(0, 99),
        }
    }

    pub fn min_score_percent(&self) -> i32 {
        self.min_score_percent
    }

    /// 处理按键, 只看低8位
    pub fn handle_key(&mut self, raw_key: i32) -> KeyAction {
        match (raw_key & 0xFF) as u8 {
            b'q' | b'Q' => KeyAction::Quit,
            b'B' => self.adjust(SCORE_STEP_PERCENT),
            b'b' => self.adjust(-SCORE_STEP_PERCENT),
            _ => KeyAction::Ignored,
        }
    }

    fn adjust(&mut self, delta: i32) -> KeyAction {
        self.min_score_percent = (self.min_score_percent + delta).clamp(0, 99);
        info!("🎚️ 最小显示置信度: {}%", self.min_score_percent);
        KeyAction::ScoreChanged(self.min_score_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        let mut controls = Controls::new(60);
        assert_eq!(controls.handle_key('q' as i32), KeyAction::Quit);
        assert_eq!(controls.handle_key('Q' as i32), KeyAction::Quit);
        // 高位被忽略
        assert_eq!(controls.handle_key(0x100 | 'q' as i32), KeyAction::Quit);
    }

    #[test]
    fn test_score_adjustment() {
        let mut controls = Controls::new(60);
        assert_eq!(controls.handle_key('B' as i32), KeyAction::ScoreChanged(65));
        assert_eq!(controls.handle_key('b' as i32), KeyAction::ScoreChanged(60));
        assert_eq!(controls.handle_key('x' as i32), KeyAction::Ignored);
        assert_eq!(controls.min_score_percent(), 60);
    }

    #[test]
    fn test_score_is_clamped() {
        let mut controls = Controls::new(97);
        assert_eq!(controls.handle_key('B' as i32), KeyAction::ScoreChanged(99));
        let mut controls = Controls::new(3);
        assert_eq!(controls.handle_key('b' as i32), KeyAction::ScoreChanged(0));
    }
}

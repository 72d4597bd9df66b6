//! 手势分类器 (Gesture classifier)
//!
//! 每帧对坐标窗口做两次直线拟合:
//! - Y = A1·X + B1, |A1| < 0.5 视为水平运动趋势
//! - X = A2·Y + B2, |A2| < 0.5 视为竖直运动趋势
//!
//! 趋势成立且首尾位移超过阈值时上报手势. 两个方向相互独立, 同一帧可同时触发.

use serde::{Deserialize, Serialize};

use super::fit::LinearFit;
use super::trajectory::WINDOW_CAPACITY;
use super::{Direction, GestureEvent};

/// 位移度量
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplacementMetric {
    /// dy² + dx²
    #[default]
    Squared,
    /// 与旧版本逐位兼容: `dy ^ (2 + dx) ^ 2` (按位异或, 加法先于异或结合)
    LegacyXor,
}

impl DisplacementMetric {
    /// 根据首尾位移计算度量值
    pub fn displacement(self, dx: i64, dy: i64) -> i64 {
        match self {
            DisplacementMetric::Squared => {
                dy.saturating_mul(dy).saturating_add(dx.saturating_mul(dx))
            }
            DisplacementMetric::LegacyXor => dy ^ (2 + dx) ^ 2,
        }
    }
}

/// 分类参数
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// 斜率开区间 (-slope_limit, slope_limit)
    pub slope_limit: f64,
    /// 水平手势位移阈值 (严格大于)
    pub horizontal_threshold: i64,
    /// 竖直手势位移阈值 (严格大于)
    pub vertical_threshold: i64,
    pub metric: DisplacementMetric,
    /// true: X减小判为 Right (用户视角, 摄像头画面未镜像)
    /// false: X减小判为 Left (画面坐标)
    pub mirror_horizontal: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            slope_limit: 0.5,
            horizontal_threshold: 70,
            vertical_threshold: 60,
            metric: DisplacementMetric::Squared,
            mirror_horizontal: true,
        }
    }
}

/// 单帧分类结果, 水平在前, 竖直在后
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Classification {
    pub horizontal: Option<GestureEvent>,
    pub vertical: Option<GestureEvent>,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureEvent> {
        self.horizontal.iter().chain(self.vertical.iter())
    }

    pub fn into_vec(self) -> Vec<GestureEvent> {
        self.horizontal.into_iter().chain(self.vertical).collect()
    }
}

/// 无内部状态: 相同输入总是得到相同输出
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    gesture_id: u32,
    config: ClassifierConfig,
}

impl GestureClassifier {
    pub fn new(gesture_id: u32, config: ClassifierConfig) -> Self {
        Self { gesture_id, config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn gesture_id(&self) -> u32 {
        self.gesture_id
    }

    /// 对当前坐标窗口分类
    pub fn classify(
        &self,
        xs: &[i32; WINDOW_CAPACITY],
        ys: &[i32; WINDOW_CAPACITY],
    ) -> Classification {
        let dx = xs[WINDOW_CAPACITY - 1] as i64 - xs[0] as i64;
        let dy = ys[WINDOW_CAPACITY - 1] as i64 - ys[0] as i64;
        let displacement = self.config.metric.displacement(dx, dy);

        let horizontal_fit = LinearFit::fit(xs, ys);
        let vertical_fit = LinearFit::fit(ys, xs);

        let horizontal = (horizontal_fit.slope_within(self.config.slope_limit)
            && displacement > self.config.horizontal_threshold)
            .then(|| self.event(self.horizontal_direction(dx)));

        let vertical = (vertical_fit.slope_within(self.config.slope_limit)
            && displacement > self.config.vertical_threshold)
            .then(|| self.event(if dy < 0 { Direction::Up } else { Direction::Down }));

        Classification {
            horizontal,
            vertical,
        }
    }

    fn horizontal_direction(&self, dx: i64) -> Direction {
        match (dx < 0, self.config.mirror_horizontal) {
            (true, true) | (false, false) => Direction::Right,
            (false, true) | (true, false) => Direction::Left,
        }
    }

    fn event(&self, direction: Direction) -> GestureEvent {
        GestureEvent {
            gesture_id: self.gesture_id,
            direction,
        }
    }
}

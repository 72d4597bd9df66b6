//! 轨迹缓冲 (Trajectory buffer)
//! Fixed-size window of the tracked object's recent centre points

use std::collections::VecDeque;

use crate::detection::DetectionRecord;

/// 轨迹窗口容量 (固定)
pub const WINDOW_CAPACITY: usize = 10;

/// 像素坐标点 (检测框中心)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// 跟踪类别的最近10个中心点
///
/// - `points`: 轨迹窗口, 旧 → 新, 长度恒为 [`WINDOW_CAPACITY`], 初始全部为 (0,0)
/// - `xs` / `ys`: 坐标窗口, 每次更新后从 `points` 整体重建 (不单独累加)
#[derive(Clone, Debug)]
pub struct TrajectoryBuffer {
    tracked_class_id: u32,
    points: VecDeque<Point>,
    xs: [i32; WINDOW_CAPACITY],
    ys: [i32; WINDOW_CAPACITY],
}

impl TrajectoryBuffer {
    pub fn new(tracked_class_id: u32) -> Self {
        Self {
            tracked_class_id,
            points: VecDeque::from(vec![Point::ORIGIN; WINDOW_CAPACITY]),
            xs: [0; WINDOW_CAPACITY],
            ys: [0; WINDOW_CAPACITY],
        }
    }

    pub fn tracked_class_id(&self) -> u32 {
        self.tracked_class_id
    }

    /// 处理一帧检测结果
    ///
    /// 只考虑 `class_id == tracked_class_id` 且数值全部有限的记录.
    /// 同一帧多个匹配时取分数最高者, 分数相同取迭代顺序中最后一个.
    /// 无匹配时窗口保持不变. 返回本帧是否写入了新点.
    pub fn observe(&mut self, detections: &[DetectionRecord], frame_size: (u32, u32)) -> bool {
        let (width, height) = frame_size;

        let best = detections
            .iter()
            .filter(|d| d.class_id == self.tracked_class_id && d.is_finite())
            .fold(None::<&DetectionRecord>, |best, d| match best {
                Some(b) if b.score > d.score => Some(b),
                _ => Some(d),
            });

        let Some(record) = best else {
            return false;
        };

        let center = Point::from(record.to_pixel_box(width, height).center());
        self.push(center);
        true
    }

    /// 追加新点并淘汰最旧点, 随后重建坐标窗口
    pub fn push(&mut self, point: Point) {
        self.points.push_back(point);
        self.points.pop_front();
        debug_assert_eq!(self.points.len(), WINDOW_CAPACITY);
        self.resync();
    }

    fn resync(&mut self) {
        for (i, p) in self.points.iter().enumerate() {
            self.xs[i] = p.x;
            self.ys[i] = p.y;
        }
    }

    /// 轨迹点, 旧 → 新
    pub fn points(&self) -> impl ExactSizeIterator<Item = &Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Point {
        self.points.back().copied().unwrap_or_default()
    }

    /// X坐标窗口
    pub fn xs(&self) -> &[i32; WINDOW_CAPACITY] {
        &self.xs
    }

    /// Y坐标窗口
    pub fn ys(&self) -> &[i32; WINDOW_CAPACITY] {
        &self.ys
    }

    /// 相邻点组成的轨迹线段, 起点为 (0,0) 哨兵的线段跳过
    pub fn trail(&self) -> Vec<(Point, Point)> {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .filter(|(from, _)| **from != Point::ORIGIN)
            .map(|(from, to)| (*from, *to))
            .collect()
    }
}

//! 手势事件输出端 (Gesture sinks)

use crossbeam_channel::{Sender, TrySendError};
use tracing::warn;

use super::GestureEvent;

/// 手势事件输出接口
///
/// 分类器本身不打印任何内容, 显示/日志/转发都由输出端负责
pub trait GestureSink {
    fn report(&mut self, event: &GestureEvent);
}

/// 控制台输出: `Gesture 2 Horizontal Move Left`
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl GestureSink for ConsoleSink {
    fn report(&mut self, event: &GestureEvent) {
        println!("{}", event);
    }
}

/// 通过通道转发给其他线程, 队列满时丢弃
pub struct ChannelSink {
    tx: Sender<GestureEvent>,
    dropped: u64,
}

impl ChannelSink {
    pub fn new(tx: Sender<GestureEvent>) -> Self {
        Self { tx, dropped: 0 }
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl GestureSink for ChannelSink {
    fn report(&mut self, event: &GestureEvent) {
        match self.tx.try_send(*event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!("⚠️ 手势接收端已断开, 丢弃: {}", event);
                self.dropped += 1;
            }
        }
    }
}

/// 收集到内存 (测试与批处理)
impl GestureSink for Vec<GestureEvent> {
    fn report(&mut self, event: &GestureEvent) {
        self.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Direction;

    fn event(direction: Direction) -> GestureEvent {
        GestureEvent {
            gesture_id: 2,
            direction,
        }
    }

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, rx) = crossbeam_channel::bounded(4);
        let mut sink = ChannelSink::new(tx);
        sink.report(&event(Direction::Up));
        sink.report(&event(Direction::Left));
        assert_eq!(rx.try_recv().unwrap().direction, Direction::Up);
        assert_eq!(rx.try_recv().unwrap().direction, Direction::Left);
        assert_eq!(sink.dropped(), 0);
    }

    #[test]
    fn test_channel_sink_drops_when_full() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut sink = ChannelSink::new(tx);
        sink.report(&event(Direction::Up));
        sink.report(&event(Direction::Down));
        assert_eq!(sink.dropped(), 1);
        drop(rx);
        sink.report(&event(Direction::Down));
        assert_eq!(sink.dropped(), 2);
    }
}

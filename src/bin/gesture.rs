/// 手势轨迹识别 (Gesture Trajectory Recognition)
///
/// 回放SSD MobileNet检测结果, 跟踪指定类别的运动轨迹并识别左右上下挥动
///
/// 系统架构:
/// 1. 按键线程: 从标准输入读取按键 (可选, 独立工作线程)
/// 2. 主线程:   逐帧 检测结果 → 轨迹 → 分类 → 输出 (可选渲染)
use std::io::Read;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ssd_gesture::gesture::ConsoleSink;
use ssd_gesture::input::{resolve_inputs, DetectionSource, ReplaySource};
use ssd_gesture::{
    gen_time_string, Args, Controls, FrameStats, GestureConfig, GesturePipeline, KeyAction,
    OverlayRenderer, DEFAULT_LOG_FILTER,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();

    let mut config = GestureConfig::load(&args.config);
    args.apply(&mut config);
    config.print_summary();

    let inputs = resolve_inputs(&args.source)?;
    info!("🚀 手势识别启动, 共 {} 个回放文件", inputs.len());

    // ========== 渲染输出 ==========
    let renderer = if args.render {
        let out_dir = args
            .render_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("runs").join(gen_time_string("-")));
        let mut renderer = OverlayRenderer::new(
            config.labels.clone(),
            config.tracked_class_id,
            args.resize_window,
            out_dir,
        );
        if let Some(font) = &args.font {
            renderer = renderer.with_font(font)?;
        }
        info!("🖼️ 标注图像输出到 {}", renderer.out_dir().display());
        Some(renderer)
    } else {
        None
    };

    // ========== 启动按键线程 ==========
    let keys = if args.keys { Some(spawn_key_reader()) } else { None };

    let mut controls = Controls::new(config.min_score_percent);
    let mut pipeline = GesturePipeline::new(config.tracked_class_id, config.classifier.clone());
    let mut sink = ConsoleSink;
    let mut frame_index: u64 = 0;

    // ========== 主循环 ==========
    'files: for path in &inputs {
        let mut source = ReplaySource::open(path)?;
        let mut stats = FrameStats::new();
        info!("📂 回放: {}", source.name());

        loop {
            if let Some(rx) = &keys {
                if drain_keys(rx, &mut controls) {
                    info!("👋 收到退出按键");
                    break 'files;
                }
            }

            let Some(frame) = source.next_frame()? else {
                break;
            };

            let reported = pipeline.run_frame(&frame.detections, frame.frame_size(), &mut sink);
            if reported > 0 {
                debug!("帧 {}: {} 个手势", frame_index, reported);
            }

            if let Some(renderer) = &renderer {
                match renderer.render(&frame, pipeline.trajectory(), controls.min_score_percent()) {
                    Ok(image) => {
                        if let Err(e) = renderer.save(&image, frame_index) {
                            warn!("❌ 保存标注图像失败: {:#}", e);
                        }
                    }
                    Err(e) => warn!("❌ 渲染失败: {:#}", e),
                }
            }

            stats.tick();
            frame_index += 1;
        }

        info!(
            "✅ {} 完成: {} 帧, 平均 {:.1}fps",
            source.name(),
            stats.frame_count(),
            stats.average_fps()
        );
    }

    Ok(())
}

/// 标准输入按键线程, 每个字节作为一个按键
fn spawn_key_reader() -> Receiver<u8> {
    let (tx, rx) = bounded(64);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for byte in stdin.lock().bytes() {
            let Ok(byte) = byte else { break };
            if tx.send(byte).is_err() {
                break;
            }
        }
    });
    rx
}

/// 处理所有待处理按键, 收到退出键时返回 true
fn drain_keys(rx: &Receiver<u8>, controls: &mut Controls) -> bool {
    for key in rx.try_iter() {
        if controls.handle_key(key as i32) == KeyAction::Quit {
            return true;
        }
    }
    false
}

//! 叠加渲染 (Overlay renderer)
//!
//! 在帧图像上绘制检测框, 中心点, 标签, 跟踪轨迹和退出提示, 可选缩放后保存为PNG

use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect;
use tracing::{debug, warn};

use crate::config::Resolution;
use crate::detection::{DetectionRecord, FrameDetections};
use crate::gesture::TrajectoryBuffer;

/// 检测框颜色
pub const BOX_COLOR: Rgb<u8> = Rgb([0, 128, 255]);
/// 检测框线宽
pub const BOX_THICKNESS: i32 = 2;
/// 标签文字颜色
pub const LABEL_TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
/// 退出提示背景
pub const HINT_BACKGROUND: Rgb<u8> = Rgb([128, 128, 128]);
pub const HINT_TEXT_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

const LABEL_SCALE: f32 = 16.0;
const HINT_SCALE: f32 = 13.0;
// 无字体时估算的字符尺寸
const FALLBACK_CHAR_WIDTH: u32 = 7;
const FALLBACK_TEXT_HEIGHT: u32 = 12;

pub struct OverlayRenderer {
    font: Option<FontVec>,
    labels: Vec<String>,
    tracked_class_id: u32,
    resize: Option<Resolution>,
    out_dir: PathBuf,
}

impl OverlayRenderer {
    pub fn new(
        labels: Vec<String>,
        tracked_class_id: u32,
        resize: Option<Resolution>,
        out_dir: PathBuf,
    ) -> Self {
        Self {
            font: None,
            labels,
            tracked_class_id,
            resize,
            out_dir,
        }
    }

    /// 加载标签字体
    pub fn with_font(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read font: {}", path.display()))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| anyhow::anyhow!("Invalid font {}: {}", path.display(), e))?;
        self.font = Some(font);
        Ok(self)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn label_text(&self, record: &DetectionRecord) -> String {
        let name = self
            .labels
            .get(record.class_id as usize)
            .cloned()
            .unwrap_or_else(|| record.class_id.to_string());
        format!("{} ({}%)", name, record.percentage())
    }

    fn measure(&self, scale: f32, text: &str) -> (u32, u32) {
        match &self.font {
            Some(font) => text_size(PxScale::from(scale), font, text),
            None => (
                FALLBACK_CHAR_WIDTH * text.chars().count() as u32,
                FALLBACK_TEXT_HEIGHT,
            ),
        }
    }

    fn draw_text(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, scale: f32, text: &str) {
        if let Some(font) = &self.font {
            draw_text_mut(canvas, color, x, y, PxScale::from(scale), font, text);
        }
    }

    /// 读取帧图像 (无图像时使用黑色画布) 并绘制叠加层
    pub fn render(
        &self,
        frame: &FrameDetections,
        trajectory: &TrajectoryBuffer,
        min_score_percent: i32,
    ) -> Result<RgbImage> {
        let mut canvas = match &frame.image {
            Some(path) => match image::open(path) {
                Ok(img) => img.to_rgb8(),
                Err(e) => {
                    warn!("⚠️ 帧图像加载失败 {}: {}, 使用空白画布", path.display(), e);
                    RgbImage::new(frame.width.max(1), frame.height.max(1))
                }
            },
            None => RgbImage::new(frame.width.max(1), frame.height.max(1)),
        };

        self.draw_overlay(&mut canvas, &frame.detections, trajectory, min_score_percent);

        Ok(match self.resize {
            Some(r) => imageops::resize(&canvas, r.width, r.height, FilterType::Triangle),
            None => canvas,
        })
    }

    /// 绘制全部叠加元素
    ///
    /// 只绘制 `score*100 > min_score_percent` 的检测; 跟踪类别可见时附带轨迹
    pub fn draw_overlay(
        &self,
        canvas: &mut RgbImage,
        detections: &[DetectionRecord],
        trajectory: &TrajectoryBuffer,
        min_score_percent: i32,
    ) {
        let (width, height) = canvas.dimensions();
        let mut trail_drawn = false;

        for record in detections.iter().filter(|d| d.is_finite()) {
            let percentage = record.percentage();
            if percentage <= min_score_percent {
                continue;
            }

            let pb = record.to_pixel_box(width, height);
            for t in 0..BOX_THICKNESS {
                let w = (pb.width() - 2 * t + 1).max(1) as u32;
                let h = (pb.height() - 2 * t + 1).max(1) as u32;
                draw_hollow_rect_mut(canvas, Rect::at(pb.x1 + t, pb.y1 + t).of_size(w, h), BOX_COLOR);
            }

            let (cx, cy) = pb.center();
            draw_filled_rect_mut(canvas, Rect::at(cx - 1, cy - 1).of_size(3, 3), BOX_COLOR);

            if record.class_id == self.tracked_class_id && !trail_drawn {
                for (from, to) in trajectory.trail() {
                    draw_line_segment_mut(
                        canvas,
                        (from.x as f32, from.y as f32),
                        (to.x as f32, to.y as f32),
                        BOX_COLOR,
                    );
                }
                trail_drawn = true;
            }

            self.draw_label(canvas, record, pb.x1, pb.y1, min_score_percent);
        }

        draw_filled_rect_mut(canvas, Rect::at(0, 0).of_size(100, 15), HINT_BACKGROUND);
        self.draw_text(canvas, HINT_TEXT_COLOR, 10, 2, HINT_SCALE, "Q to Quit");
    }

    fn draw_label(
        &self,
        canvas: &mut RgbImage,
        record: &DetectionRecord,
        left: i32,
        top: i32,
        min_score_percent: i32,
    ) {
        let text = self.label_text(record);
        let (text_w, text_h) = self.measure(LABEL_SCALE, &text);

        // 背景绿色分量随置信度线性变化
        let scale_max = (100 - min_score_percent).max(1) as f32;
        let scale = ((record.percentage() - min_score_percent) as f32 / scale_max).clamp(0.0, 1.0);
        let background = Rgb([75, (scale * 175.0) as u8, 0]);

        let label_top = (top - text_h as i32).max(1);
        draw_filled_rect_mut(
            canvas,
            Rect::at(left - 1, label_top - 1).of_size(text_w + 2, text_h + 2),
            background,
        );
        self.draw_text(canvas, LABEL_TEXT_COLOR, left, label_top, LABEL_SCALE, &text);
    }

    /// 保存标注图像, 返回文件路径
    pub fn save(&self, image: &RgbImage, frame_index: u64) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.out_dir)
            .with_context(|| format!("Failed to create {}", self.out_dir.display()))?;
        let path = self.out_dir.join(format!("frame_{:06}.png", frame_index));
        image
            .save(&path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
        debug!("🖼️ 已保存 {}", path.display());
        Ok(path)
    }
}

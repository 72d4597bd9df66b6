//! 命令行参数

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use clap::Parser;

use crate::gesture::DisplacementMetric;
use crate::gesture_config::GestureConfig;

/// 输出窗口尺寸, 格式 `<width>x<height>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Resolution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| anyhow!("expected <width>x<height>, got \"{}\"", s))?;
        let width: u32 = w.trim().parse().with_context(|| format!("invalid width \"{}\"", w))?;
        let height: u32 = h.trim().parse().with_context(|| format!("invalid height \"{}\"", h))?;
        if width == 0 || height == 0 {
            return Err(anyhow!("resolution must be non-zero, got {}x{}", width, height));
        }
        Ok(Self { width, height })
    }
}

/// SSD MobileNet 手势识别 (检测结果回放)
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "SSD MobileNet 手势轨迹识别", long_about = None)]
pub struct Args {
    /// 回放文件 (.jsonl) 或包含回放文件的目录
    #[arg(short, long, default_value = ".")]
    pub source: PathBuf,

    /// JSON配置文件 (不存在时自动创建)
    #[arg(short, long, default_value = "gesture.json")]
    pub config: PathBuf,

    /// 跟踪的类别ID (覆盖配置文件)
    #[arg(long = "class")]
    pub tracked_class_id: Option<u32>,

    /// 最小显示置信度百分比 (覆盖配置文件)
    #[arg(long)]
    pub min_score: Option<i32>,

    /// 使用旧版按位异或位移公式
    #[arg(long)]
    pub legacy_xor: bool,

    /// 输出标注后的帧图像
    #[arg(long)]
    pub render: bool,

    /// 标注图像输出目录 (默认 runs/<时间戳>)
    #[arg(long)]
    pub render_dir: Option<PathBuf>,

    /// 输出图像缩放, 例如 1280x720
    #[arg(long)]
    pub resize_window: Option<Resolution>,

    /// 标签字体 (TTF/OTF)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// 从标准输入读取按键 (q退出, B/b调整置信度)
    #[arg(long)]
    pub keys: bool,
}

impl Args {
    /// 命令行参数覆盖配置文件
    pub fn apply(&self, config: &mut GestureConfig) {
        if let Some(id) = self.tracked_class_id {
            config.tracked_class_id = id;
        }
        if let Some(score) = self.min_score {
            config.min_score_percent = score;
        }
        if self.legacy_xor {
            config.classifier.metric = DisplacementMetric::LegacyXor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_parse() {
        let r: Resolution = "1280x720".parse().unwrap();
        assert_eq!(r, Resolution { width: 1280, height: 720 });
        assert!("1280".parse::<Resolution>().is_err());
        assert!("0x720".parse::<Resolution>().is_err());
        assert!("axb".parse::<Resolution>().is_err());
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "gesture",
            "--class",
            "6",
            "--min-score",
            "40",
            "--legacy-xor",
            "--resize-window",
            "1920x1080",
        ]);
        assert_eq!(args.resize_window, Some(Resolution { width: 1920, height: 1080 }));

        let mut config = GestureConfig::default();
        args.apply(&mut config);
        assert_eq!(config.tracked_class_id, 6);
        assert_eq!(config.min_score_percent, 40);
        assert_eq!(config.classifier.metric, DisplacementMetric::LegacyXor);
    }

    #[test]
    fn test_args_defaults_leave_config() {
        let args = Args::parse_from(["gesture"]);
        let mut config = GestureConfig::default();
        args.apply(&mut config);
        assert_eq!(config, GestureConfig::default());
        assert!(!args.render);
    }
}

//! 手势识别配置 - 通过JSON文件调整参数

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use crate::detection::DEFAULT_LABELS;
use crate::gesture::ClassifierConfig;

/// 手势识别参数配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    // === 跟踪参数 ===
    pub tracked_class_id: u32, // 跟踪的类别ID (即手势编号)

    // === 显示参数 ===
    pub min_score_percent: i32, // 最小显示置信度 (只影响渲染)
    pub labels: Vec<String>,    // 类别标签

    // === 分类参数 ===
    pub classifier: ClassifierConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tracked_class_id: 2,
            min_score_percent: 60,
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl GestureConfig {
    /// 从JSON文件加载配置
    ///
    /// 文件不存在时写出默认配置; 解析失败时使用默认值
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    info!("✅ 配置已从 {} 加载", path.display());
                    config
                }
                Err(e) => {
                    warn!("⚠️  配置文件解析失败: {}, 使用默认值", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("📝 配置文件不存在,创建默认配置...");
                let config = Self::default();
                if let Err(e) = config.save(path) {
                    warn!("❌ 保存配置失败: {:#}", e);
                }
                config
            }
            Err(e) => {
                warn!("⚠️  配置文件读取失败: {}, 使用默认值 (不覆盖原文件)", e);
                Self::default()
            }
        }
    }

    /// 保存配置到JSON文件
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("💾 配置已保存到 {}", path.display());
        Ok(())
    }

    /// 类别ID对应的标签, 超出范围时用数字代替
    pub fn label(&self, class_id: u32) -> String {
        self.labels
            .get(class_id as usize)
            .cloned()
            .unwrap_or_else(|| class_id.to_string())
    }

    /// 打印当前配置
    pub fn print_summary(&self) {
        info!("🎛️  当前手势配置:");
        info!(
            "  跟踪类别: {} ({})",
            self.tracked_class_id,
            self.label(self.tracked_class_id)
        );
        info!("  最小显示置信度: {}%", self.min_score_percent);
        info!("  斜率区间: ±{:.2}", self.classifier.slope_limit);
        info!(
            "  位移阈值: 水平 {} / 竖直 {} ({:?})",
            self.classifier.horizontal_threshold,
            self.classifier.vertical_threshold,
            self.classifier.metric
        );
        info!("  水平镜像: {}", self.classifier.mirror_horizontal);
    }
}

/// 检测结果回放 (JSON Lines)
/// Replays per-frame detector output recorded one JSON object per line
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use super::DetectionSource;
use crate::detection::{parse_ssd_output, DetectionRecord, FrameDetections};

/// 回放文件扩展名
pub const REPLAY_EXTENSION: &str = "jsonl";

/// 单行格式
///
/// `detections` 与 `ssd_output` 可同时存在, 结果按顺序拼接.
/// `ssd_output` 中的 `null` 表示非有限值 (JSON 无法表示 NaN)
#[derive(Debug, Deserialize)]
struct FrameLine {
    width: u32,
    height: u32,
    #[serde(default)]
    image: Option<PathBuf>,
    #[serde(default)]
    detections: Vec<DetectionRecord>,
    #[serde(default)]
    ssd_output: Option<Vec<Option<f32>>>,
}

pub struct ReplaySource<R> {
    reader: R,
    name: String,
    base_dir: Option<PathBuf>,
    line_no: usize,
    buf: String,
}

impl ReplaySource<BufReader<File>> {
    /// 打开回放文件, 帧图像路径相对于该文件所在目录
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open replay file: {}", path.display()))?;
        let mut source = Self::from_reader(BufReader::new(file), path.display().to_string());
        source.base_dir = path.parent().map(Path::to_path_buf);
        Ok(source)
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
            base_dir: None,
            line_no: 0,
            buf: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn parse_line(&self, line: &str) -> Result<FrameDetections> {
        let frame: FrameLine = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: invalid frame record", self.name, self.line_no))?;

        let mut detections = frame.detections;
        if let Some(raw) = frame.ssd_output {
            let raw: Vec<f32> = raw.into_iter().map(|v| v.unwrap_or(f32::NAN)).collect();
            detections.extend(parse_ssd_output(&raw));
        }

        let image = match (frame.image, &self.base_dir) {
            (Some(image), Some(base)) if image.is_relative() => Some(base.join(image)),
            (image, _) => image,
        };

        Ok(FrameDetections {
            width: frame.width,
            height: frame.height,
            image,
            detections,
        })
    }
}

impl<R: BufRead> DetectionSource for ReplaySource<R> {
    fn next_frame(&mut self) -> Result<Option<FrameDetections>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .with_context(|| format!("Failed to read {}", self.name))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            return self.parse_line(line).map(Some);
        }
    }
}

/// 列出目录中的回放文件 (按文件名排序)
pub fn scan_dir(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == REPLAY_EXTENSION))
        .collect();
    files.sort();

    if files.is_empty() {
        bail!("No detection (.{}) files found in {}", REPLAY_EXTENSION, dir.display());
    }
    Ok(files)
}

/// 输入可以是单个文件或目录
pub fn resolve_inputs(source: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let source = source.as_ref();
    if source.is_dir() {
        scan_dir(source)
    } else if source.is_file() {
        Ok(vec![source.to_path_buf()])
    } else {
        bail!("Replay source does not exist: {}", source.display())
    }
}

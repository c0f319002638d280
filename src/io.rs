use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::pose::{Frame, RawFrame};

/// クリップ JSON（フレーム配列、または単一フレーム）
#[derive(Deserialize)]
#[serde(untagged)]
enum ClipFile {
    Frames(Vec<RawFrame>),
    Single(RawFrame),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// 検出器出力のクリップを読む
pub fn load_clip<P: AsRef<Path>>(path: P) -> Result<Vec<RawFrame>> {
    let frames = match read_json::<ClipFile>(path.as_ref())? {
        ClipFile::Frames(frames) => frames,
        ClipFile::Single(frame) => vec![frame],
    };
    log::info!("loaded {} frames from {}", frames.len(), path.as_ref().display());
    Ok(frames)
}

/// 補完済みフレーム列（stroke_data.json）を読む
pub fn load_frames<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>> {
    read_json(path.as_ref())
}

/// 整形 JSON で書き出す。親ディレクトリは必要なら作る
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

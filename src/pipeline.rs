use anyhow::Result;
use std::path::Path;

use crate::config::{Config, OutputConfig};
use crate::io::save_json;
use crate::pose::{fill_clip, Frame, RawFrame};
use crate::retarget::{FrameQuaternions, Retargeter};
use crate::stroke::{Segmentation, StrokeSegmenter};

/// 1クリップ分の処理結果
#[derive(Debug, Default)]
pub struct ClipOutput {
    /// 補完済みの全フレーム
    pub frames: Vec<Frame>,
    pub segmentation: Segmentation,
    /// Stroke 区間内のフレーム（補完済みランドマーク付き）
    pub stroke_frames: Vec<Frame>,
    /// Stroke フレームごとの局所回転（フレーム番号順）
    pub quaternions: Vec<FrameQuaternions>,
}

impl ClipOutput {
    /// stroke_data / segments / quaternions の3ファイルを書き出す
    pub fn save(&self, output: &OutputConfig, dir: Option<&Path>) -> Result<()> {
        save_json(output.path_for(dir, &output.stroke_data), &self.stroke_frames)?;
        save_json(output.path_for(dir, &output.segments), &self.segmentation)?;
        save_json(output.path_for(dir, &output.quaternions), &self.quaternions)?;
        Ok(())
    }
}

/// 欠損補完 → 区間検出 → リターゲット
pub struct Pipeline {
    segmenter: StrokeSegmenter,
    retargeter: Retargeter,
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            segmenter: StrokeSegmenter::from_config(&config.segment),
            retargeter: Retargeter::new(),
        }
    }

    pub fn run(&self, raw_frames: Vec<RawFrame>) -> ClipOutput {
        if raw_frames.is_empty() {
            log::info!("empty clip, nothing to do");
            return ClipOutput::default();
        }

        let frames = fill_clip(raw_frames);
        let segmentation = self.segmenter.segment(&frames);
        log::info!(
            "threshold {:.6}: {} segments, {} of {} frames retained",
            segmentation.threshold,
            segmentation.segments.len(),
            segmentation.retained_frames.len(),
            frames.len()
        );
        for segment in &segmentation.segments {
            log::debug!(
                "segment {}..={} ({} frames)",
                segment.start_frame,
                segment.end_frame,
                segment.frame_count()
            );
        }

        let stroke_frames: Vec<Frame> = segmentation
            .retained_positions
            .iter()
            .filter_map(|&i| frames.get(i).cloned())
            .collect();
        let quaternions = self.retargeter.retarget_frames(&stroke_frames);

        ClipOutput {
            frames,
            segmentation,
            stroke_frames,
            quaternions,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

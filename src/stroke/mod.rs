pub mod savgol;
pub mod segment;
pub mod velocity;

use serde::Serialize;

use crate::config::SegmentConfig;
use crate::pose::Frame;

pub use savgol::SavitzkyGolay;
pub use segment::{median, percentile, retained_frames, StrokeDetector, StrokeSegment};
pub use velocity::wrist_velocity;

/// クリップ全体の区間検出結果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Segmentation {
    pub threshold: f64,
    /// 区間（フレーム番号）
    pub segments: Vec<StrokeSegment>,
    /// 区間内のフレーム番号
    pub retained_frames: Vec<usize>,
    /// 区間内フレームのクリップ内位置
    #[serde(skip_serializing)]
    pub retained_positions: Vec<usize>,
    /// 生の手首速度
    #[serde(skip_serializing)]
    pub velocity: Vec<f64>,
    /// 平滑化後の手首速度
    #[serde(skip_serializing)]
    pub smoothed: Vec<f64>,
}

/// 速度推定 → 平滑化 → 閾値判定をまとめて行う
///
/// 系列全体が揃ってから平滑化と閾値計算をするので、ストリーミングでは使えない。
pub struct StrokeSegmenter {
    smoother: SavitzkyGolay,
    detector: StrokeDetector,
}

impl StrokeSegmenter {
    pub fn new(smoother: SavitzkyGolay, detector: StrokeDetector) -> Self {
        Self { smoother, detector }
    }

    pub fn from_config(config: &SegmentConfig) -> Self {
        Self::new(SavitzkyGolay::from_config(config), StrokeDetector::from_config(config))
    }

    /// 速度系列から区間を求める
    pub fn segment_series(&self, velocity: Vec<f64>) -> Segmentation {
        let smoothed = self.smoother.apply(&velocity);
        let (threshold, segments) = self.detector.detect(&smoothed);
        let retained_frames = retained_frames(&segments);
        Segmentation {
            threshold,
            segments,
            retained_positions: retained_frames.clone(),
            retained_frames,
            velocity,
            smoothed,
        }
    }

    /// 補完済みフレーム列から区間を求める
    ///
    /// 区間と `retained_frames` は各フレームの `index` で番号付けし直す。
    /// `retained_positions` はクリップ内の位置のまま。
    pub fn segment(&self, frames: &[Frame]) -> Segmentation {
        let mut result = self.segment_series(wrist_velocity(frames));
        let index_at = |pos: usize| frames.get(pos).map_or(pos, |f| f.index);
        for segment in &mut result.segments {
            *segment = StrokeSegment::new(index_at(segment.start_frame), index_at(segment.end_frame));
        }
        result.retained_frames = result.retained_positions.iter().map(|&pos| index_at(pos)).collect();
        result
    }
}

impl Default for StrokeSegmenter {
    fn default() -> Self {
        Self::from_config(&SegmentConfig::default())
    }
}

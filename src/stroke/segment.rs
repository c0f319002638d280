use serde::{Deserialize, Serialize};

use crate::config::SegmentConfig;

/// Stroke 区間（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeSegment {
    pub start_frame: usize,
    pub end_frame: usize,
}

impl StrokeSegment {
    pub fn new(start_frame: usize, end_frame: usize) -> Self {
        Self {
            start_frame,
            end_frame,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.end_frame - self.start_frame + 1
    }

    pub fn frames(&self) -> impl Iterator<Item = usize> {
        self.start_frame..=self.end_frame
    }
}

/// 閾値以下が続く区間を Stroke とみなす検出器
///
/// 閾値 = max(P(percentile), median * median_ratio)。
/// パーセンタイルは遷移中の速度スパイクに引っ張られないため、
/// 中央値比の下限はほぼ静止したクリップでパーセンタイルが 0 付近に張り付くのを防ぐ。
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDetector {
    percentile: f64,
    median_ratio: f64,
    min_frames: usize,
}

impl StrokeDetector {
    pub fn new(percentile: f64, median_ratio: f64, min_frames: usize) -> Self {
        Self {
            percentile,
            median_ratio,
            min_frames,
        }
    }

    pub fn from_config(config: &SegmentConfig) -> Self {
        Self::new(config.percentile, config.median_ratio, config.min_frames)
    }

    pub fn threshold(&self, series: &[f64]) -> f64 {
        if series.is_empty() {
            return 0.0;
        }
        let mut sorted = series.to_vec();
        sorted.sort_by(f64::total_cmp);
        let p = percentile_sorted(&sorted, self.percentile);
        let floor = percentile_sorted(&sorted, 50.0) * self.median_ratio;
        p.max(floor)
    }

    /// 閾値と区間を返す。区間は昇順・重なりなし
    pub fn detect(&self, series: &[f64]) -> (f64, Vec<StrokeSegment>) {
        let threshold = self.threshold(series);
        let min_frames = self.min_frames.max(1);

        let mut segments = Vec::new();
        let mut run_start: Option<usize> = None;
        for (i, &v) in series.iter().enumerate() {
            match (v < threshold, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    if i - start >= min_frames {
                        segments.push(StrokeSegment::new(start, i - 1));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            if series.len() - start >= min_frames {
                segments.push(StrokeSegment::new(start, series.len() - 1));
            }
        }
        (threshold, segments)
    }
}

impl Default for StrokeDetector {
    fn default() -> Self {
        Self::from_config(&SegmentConfig::default())
    }
}

/// 区間に含まれる全フレーム番号（昇順, 重複なし）
pub fn retained_frames(segments: &[StrokeSegment]) -> Vec<usize> {
    let mut frames: Vec<usize> = segments.iter().flat_map(StrokeSegment::frames).collect();
    frames.sort_unstable();
    frames.dedup();
    frames
}

/// 昇順ソート済み系列の q パーセンタイル（隣接順位の線形補間）
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = (q.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
        }
    }
}

/// q パーセンタイル（0-100）
pub fn percentile(series: &[f64], q: f64) -> f64 {
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);
    percentile_sorted(&sorted, q)
}

pub fn median(series: &[f64]) -> f64 {
    percentile(series, 50.0)
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub segment: SegmentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Stroke区間検出のパラメータ
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SegmentConfig {
    /// Savitzky-Golay 窓長（奇数）
    #[serde(default = "default_window_length")]
    pub window_length: usize,
    /// Savitzky-Golay 多項式次数
    #[serde(default = "default_poly_order")]
    pub poly_order: usize,
    /// 閾値に使うパーセンタイル (0-100)
    #[serde(default = "default_percentile")]
    pub percentile: f64,
    /// 中央値に掛ける下限比率
    #[serde(default = "default_median_ratio")]
    pub median_ratio: f64,
    /// 区間として認める最小フレーム数
    #[serde(default = "default_min_frames")]
    pub min_frames: usize,
}

fn default_window_length() -> usize { 11 }
fn default_poly_order() -> usize { 3 }
fn default_percentile() -> f64 { 20.0 }
fn default_median_ratio() -> f64 { 0.15 }
fn default_min_frames() -> usize { 3 }

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            window_length: default_window_length(),
            poly_order: default_poly_order(),
            percentile: default_percentile(),
            median_ratio: default_median_ratio(),
            min_frames: default_min_frames(),
        }
    }
}

/// 出力先
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// Stroke フレーム（ランドマーク付き）
    #[serde(default = "default_stroke_data")]
    pub stroke_data: String,
    /// 区間と閾値
    #[serde(default = "default_segments")]
    pub segments: String,
    /// ボーンごとの局所回転
    #[serde(default = "default_quaternions")]
    pub quaternions: String,
}

fn default_output_dir() -> String { "out".to_string() }
fn default_stroke_data() -> String { "stroke_data.json".to_string() }
fn default_segments() -> String { "segments.json".to_string() }
fn default_quaternions() -> String { "quaternions.json".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            stroke_data: default_stroke_data(),
            segments: default_segments(),
            quaternions: default_quaternions(),
        }
    }
}

impl OutputConfig {
    /// `dir` 以下の出力パス
    pub fn path_for(&self, dir: Option<&Path>, file: &str) -> PathBuf {
        let base = dir.map_or_else(|| PathBuf::from(&self.dir), Path::to_path_buf);
        base.join(file)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// ログファイルの保存先
    #[serde(default = "default_log_dir")]
    pub dir: String,
    /// error / warn / info / debug / trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_dir() -> String { "logs".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// ファイルが無ければデフォルト、読めなければ警告してデフォルト
    ///
    /// ロガー初期化前に呼ばれるので警告は stderr に直接出す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {:#}; using defaults", e);
                Self::default()
            }
        }
    }
}

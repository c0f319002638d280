use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::LogConfig;

type LogFile = Mutex<BufWriter<File>>;

/// stderr とログファイルの両方に書くロガー
struct DualLogger {
    level: log::LevelFilter,
    file: Option<LogFile>,
}

impl log::Log for DualLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        eprintln!("{}", line);
        if let Some(Ok(mut f)) = self.file.as_ref().map(Mutex::lock) {
            let _ = writeln!(f, "{}", line);
            let _ = f.flush();
        }
    }

    fn flush(&self) {
        if let Some(Ok(mut f)) = self.file.as_ref().map(Mutex::lock) {
            let _ = f.flush();
        }
    }
}

fn format_line(time: &str, level: log::Level, target: &str, msg: &str) -> String {
    format!("{} {:<5} [{}] {}", time, level, target, msg)
}

/// `<dir>/<name>_%Y%m%d_%H%M%S.log` を作る
pub fn open_log_file(dir: &Path, name: &str) -> Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{}.log", name, ts));
    let file = File::create(&path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    Ok((path, file))
}

/// グローバルロガーを設定し、ログファイルのパスを返す
///
/// ファイルが開けなければ stderr のみで続行する。
pub fn init(name: &str, config: &LogConfig) -> Result<Option<PathBuf>> {
    let level = config.level_filter();
    let (path, file) = match open_log_file(Path::new(&config.dir), name) {
        Ok((path, file)) => (Some(path), Some(Mutex::new(BufWriter::new(file)))),
        Err(e) => {
            eprintln!("Warning: {:#}; logging to stderr only", e);
            (None, None)
        }
    };

    let logger = Box::leak(Box::new(DualLogger { level, file }));
    log::set_logger(logger).map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    log::set_max_level(level);
    if let Some(path) = &path {
        eprintln!("Log: {}", path.display());
    }
    Ok(path)
}

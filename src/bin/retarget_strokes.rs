use anyhow::{bail, Result};
use std::path::PathBuf;

use stroke_retarget::config::Config;
use stroke_retarget::io::{load_frames, save_json};
use stroke_retarget::logging;
use stroke_retarget::retarget::Retargeter;

const CONFIG_PATH: &str = "config.toml";

/// 書き出し済みの stroke_data.json から回転だけを計算し直す
fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: {} <stroke_data.json> [out.json]", args.first().map_or("retarget_strokes", String::as_str));
    }
    let input = PathBuf::from(&args[1]);

    let config = Config::load_or_default(CONFIG_PATH);
    logging::init("retarget_strokes", &config.log)?;
    let output = match args.get(2) {
        Some(path) => PathBuf::from(path),
        None => config.output.path_for(None, &config.output.quaternions),
    };

    println!("Retarget Strokes ({})", env!("GIT_VERSION"));
    let frames = load_frames(&input)?;
    println!("Frames: {} ({})", frames.len(), input.display());

    let records = Retargeter::new().retarget_frames(&frames);
    save_json(&output, &records)?;
    println!("Output: {}", output.display());
    Ok(())
}

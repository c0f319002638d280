use anyhow::{bail, Result};
use std::path::PathBuf;
use std::time::Instant;

use stroke_retarget::config::Config;
use stroke_retarget::io::load_clip;
use stroke_retarget::logging;
use stroke_retarget::pipeline::Pipeline;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: {} <clip.json> [out_dir]", args.first().map_or("stroke_retarget", String::as_str));
    }
    let clip_path = PathBuf::from(&args[1]);
    let out_dir = args.get(2).map(PathBuf::from);

    let config = Config::load_or_default(CONFIG_PATH);
    logging::init("stroke_retarget", &config.log)?;

    println!("Stroke Retarget ({})", env!("GIT_VERSION"));
    println!("Input: {}", clip_path.display());
    println!(
        "Segment: window={}, order={}, P{} / median*{}, min_frames={}",
        config.segment.window_length,
        config.segment.poly_order,
        config.segment.percentile,
        config.segment.median_ratio,
        config.segment.min_frames
    );
    println!();

    let start = Instant::now();

    println!("[1/3] Loading clip");
    let raw_frames = load_clip(&clip_path)?;

    println!("[2/3] Segmenting and retargeting {} frames", raw_frames.len());
    let output = Pipeline::new(&config).run(raw_frames);
    for segment in &output.segmentation.segments {
        println!("  stroke {:>5} ..= {:<5} ({} frames)", segment.start_frame, segment.end_frame, segment.frame_count());
    }
    if output.segmentation.segments.is_empty() {
        log::warn!("no stroke segment found in {}", clip_path.display());
    }

    println!("[3/3] Writing outputs");
    output.save(&config.output, out_dir.as_deref())?;

    println!();
    println!(
        "Done: {} stroke frames, threshold {:.6} ({:.2}s)",
        output.stroke_frames.len(),
        output.segmentation.threshold,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

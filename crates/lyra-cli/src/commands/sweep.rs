use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use lyra_core::orientation::OrientationRange;
use lyra_core::pipeline::config::EngineConfig;
use lyra_core::sequence::FrameGenerator;

#[derive(Args)]
pub struct SweepArgs {
    /// Right ascension at the first frame, degrees
    #[arg(long, default_value = "0.0")]
    pub ra_min: f64,

    /// Right ascension at the last frame (0 = fixed at minimum)
    #[arg(long, default_value = "0.0")]
    pub ra_max: f64,

    /// Declination at the first frame, degrees
    #[arg(long, default_value = "0.0")]
    pub dec_min: f64,

    /// Declination at the last frame (0 = fixed at minimum)
    #[arg(long, default_value = "0.0")]
    pub dec_max: f64,

    /// Roll at the first frame, degrees
    #[arg(long, default_value = "0.0")]
    pub roll_min: f64,

    /// Roll at the last frame (0 = fixed at minimum)
    #[arg(long, default_value = "0.0")]
    pub roll_max: f64,

    /// Number of frames to generate
    #[arg(long, default_value = "10")]
    pub frames: usize,

    /// Directory for the generated frame images
    #[arg(long, default_value = "frames")]
    pub out_dir: PathBuf,

    /// Engine config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SweepArgs) -> Result<()> {
    let config = load_config(args)?;
    let generator = FrameGenerator::synthetic(config, &args.out_dir)?;

    let range = OrientationRange {
        ra_min: args.ra_min,
        ra_max: args.ra_max,
        dec_min: args.dec_min,
        dec_max: args.dec_max,
        roll_min: args.roll_min,
        roll_max: args.roll_max,
    }
    .normalized();

    let pb = ProgressBar::new(args.frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Generating frames");

    let mut rows = Vec::with_capacity(args.frames);
    for frame in 0..args.frames {
        let target = range.at(frame, args.frames);
        match generator.generate(frame, target) {
            Ok(record) => rows.push((frame, target, record)),
            Err(err) => pb.println(format!("frame {frame}: {} ({err})", style("skipped").red())),
        }
        pb.inc(1);
    }
    pb.finish_with_message(format!("{} frames generated", rows.len()));

    println!(
        "\n{:>5}  {:>34}  {:>34}  {:>5}  {:>7}",
        "Frame", "Target", "Estimate", "Stars", "Matched"
    );
    println!("{}", "-".repeat(94));

    for (frame, target, record) in &rows {
        let estimate = match record.attitude {
            Some(att) => att.to_string(),
            None => "Attitude is UNKNOWN".to_string(),
        };
        println!(
            "{:>5}  {:>34}  {:>34}  {:>5}  {:>7}",
            frame,
            target.to_string(),
            estimate,
            record.stars.len(),
            record.correspondences.len(),
        );
    }

    println!(
        "\nImages saved under {}",
        style(args.out_dir.display()).green()
    );
    Ok(())
}

fn load_config(args: &SweepArgs) -> Result<EngineConfig> {
    match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid engine config")
        }
        None => Ok(EngineConfig::default()),
    }
}

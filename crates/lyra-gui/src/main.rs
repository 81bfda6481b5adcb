mod app;
mod convert;
mod input;
mod overlay;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lyra_core::names::StarNames;
use lyra_core::orientation::OrientationRange;
use lyra_core::pipeline::config::EngineConfig;
use lyra_core::sequence::FrameGenerator;
use lyra_core::session::Session;

#[derive(Parser)]
#[command(name = "lyra-gui", about = "Interactive star-tracker debug session")]
#[command(version)]
struct Args {
    /// Right ascension at the first frame, degrees
    #[arg(long, default_value = "0.0")]
    ra_min: f64,

    /// Right ascension at the last frame (0 = fixed at minimum)
    #[arg(long, default_value = "0.0")]
    ra_max: f64,

    /// Declination at the first frame, degrees
    #[arg(long, default_value = "0.0")]
    dec_min: f64,

    /// Declination at the last frame (0 = fixed at minimum)
    #[arg(long, default_value = "0.0")]
    dec_max: f64,

    /// Roll at the first frame, degrees
    #[arg(long, default_value = "0.0")]
    roll_min: f64,

    /// Roll at the last frame (0 = fixed at minimum)
    #[arg(long, default_value = "0.0")]
    roll_max: f64,

    /// Number of frames in the initial sweep
    #[arg(long, default_value = "10")]
    frames: usize,

    /// Directory for the generated frame images
    #[arg(long, default_value = "frames")]
    out_dir: PathBuf,

    /// Engine config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Star-name table (built-in catalog names when omitted)
    #[arg(long)]
    names: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let session = match build_session(&args) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Failed to start session: {err:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 1024.0])
            .with_min_inner_size([512.0, 512.0])
            .with_title("Lyra Live Debug"),
        ..Default::default()
    };

    eframe::run_native(
        "LyraLiveDebug",
        options,
        Box::new(|_cc| Ok(Box::new(app::LyraApp::new(session)))),
    )
}

fn build_session(args: &Args) -> Result<Session> {
    let config = match &args.config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str::<EngineConfig>(&contents).context("Invalid engine config")?
        }
        None => EngineConfig::default(),
    };

    let names = match &args.names {
        Some(path) => StarNames::load(path)?,
        None => StarNames::builtin(),
    };

    let range = OrientationRange {
        ra_min: args.ra_min,
        ra_max: args.ra_max,
        dec_min: args.dec_min,
        dec_max: args.dec_max,
        roll_min: args.roll_min,
        roll_max: args.roll_max,
    };

    let generator = FrameGenerator::synthetic(config, &args.out_dir)?;
    Ok(Session::start(generator, &range, args.frames, names)?)
}

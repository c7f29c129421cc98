//! pinch_kick — interactive entry point.

use std::path::PathBuf;

use clap::Parser;

use pinch_kick::app::{run, AppConfig};

/// Camera-style percussion instrument driven by pinch gestures.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Wav file to fire on each pinch (silent when omitted)
    #[arg(long)]
    sample: Option<PathBuf>,

    /// Number of ambient key particles
    #[arg(long, default_value_t = 200)]
    particles: usize,

    /// RNG seed for theme and particle layout
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!();
    println!("  pinch kick — pinch to play");
    println!("  Space starts/stops capture; pinch with the mouse button");
    println!("  or keys 1-4; Q or Escape quits.");
    println!();

    run(AppConfig {
        width: cli.width,
        height: cli.height,
        sample: cli.sample,
        particles: cli.particles,
        seed: cli.seed,
    })?;
    Ok(())
}

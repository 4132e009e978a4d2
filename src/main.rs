use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};
use snail::game::GameConfig;
use snail::game::config::{DEFAULT_DELAY_MS, DEFAULT_DIMENSION};
use snail::modes::HumanMode;
use snail::render::Palette;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snail")]
#[command(version, about = "Steer a growing snail around a wrapping grid")]
struct Cli {
    /// Starting delay between ticks in milliseconds (100-200)
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay: u64,

    /// Width and height of the game grid (10-50)
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    dimensions: usize,

    /// Write a debug log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Draw without colors
    #[arg(long)]
    monochrome: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal is taken over by the game, so logs can only go to a file
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(LevelFilter::Debug, Config::default(), file)
            .context("Failed to initialize logger")?;
    }

    let config = GameConfig::new(cli.dimensions, cli.delay);
    info!(
        "starting snail {} on a {}x{} grid",
        env!("CARGO_PKG_VERSION"),
        config.grid_width,
        config.grid_height
    );

    let palette = if cli.monochrome {
        Palette::monochrome()
    } else {
        Palette::default()
    };

    let mut human_mode = HumanMode::new(config, palette)?;
    if let Err(err) = human_mode.run().await {
        error!("{:#}", err);
        return Err(err);
    }

    Ok(())
}

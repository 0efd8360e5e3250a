use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Classic snake on a square grid, in your terminal")]
struct Cli {
    /// TOML file with game settings; command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Initial tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Hide the grid lines
    #[arg(long)]
    no_grid: bool,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(speed) = self.speed {
            config.initial_speed_ms = speed;
        }
        if self.no_grid {
            config.show_grid = false;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

/// Logs go to `--log-file`, or to stderr only when `RUST_LOG` asks for them
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let env = Env::default().default_filter_or("warn");

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {:?}", path))?;
            env_logger::Builder::from_env(env)
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            env_logger::Builder::from_env(env).init();
        }
        None => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    log::info!(
        "starting {}x{} game at {}ms per tick",
        config.grid_size,
        config.grid_size,
        config.initial_speed_ms
    );

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let mut human_mode = HumanMode::new(engine)?;
    human_mode.run().await?;

    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use rgb_marquee::config::{import_options_ini, AppConfig};
use rgb_marquee::core::build_supervisor;
use rgb_marquee_core::{Aggregator, ContentStore, RenderSurface, ScrollScheduler};
use rgb_marquee_render::FrameBuffer;
use rgb_marquee_sources::DailyEventsLoader;
use std::path::PathBuf;
use std::sync::Arc;

/// rgb-marquee - two-line scrolling ticker for HUB75 RGB LED matrices
#[derive(Parser, Debug, Clone)]
#[command(name = "rgb-marquee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON config file to load instead of the per-user default
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Legacy key=value options file to read instead of the JSON config
    #[arg(short = 'i', long = "options", value_name = "FILE", conflicts_with = "config")]
    options: Option<PathBuf>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Render into an in-memory frame buffer instead of the panel
    #[arg(long = "headless")]
    headless: bool,

    /// Stop after this many frames (headless runs)
    #[arg(long = "frames", value_name = "COUNT")]
    frames: Option<u64>,

    /// Write the effective configuration to the per-user config file and exit
    #[arg(long = "save-config")]
    save_config: bool,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting rgb-marquee v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    if let Some(path) = &cli.options {
        let config = import_options_ini(path)?;
        info!("Imported options from {}", path.display());
        return Ok(config);
    }

    match &cli.config {
        Some(path) => AppConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match AppConfig::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Failed to load config, using defaults: {}", e);
                Ok(AppConfig::default())
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    if cli.save_config {
        let path = config.save()?;
        println!("Saved configuration to {}", path.display());
        return Ok(());
    }

    let store = Arc::new(ContentStore::new());
    let supervisor = build_supervisor(&config, &store)?;
    info!("Workers: {:?}", supervisor.names());

    // Sources run on their own runtime; the scroll loop keeps this thread
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(async {
            for (name, outcome) in supervisor.run().await {
                info!("worker {} finished: {}", name, outcome);
            }
        });
    });

    let aggregator = Aggregator::new(
        Arc::clone(&store),
        config.clock.time_format,
        config.news.is_runnable(),
    )
    .with_daily_events(Box::new(DailyEventsLoader::new(config.daily.clone())));

    if cli.headless {
        run_headless(aggregator, &config, cli.frames);
        Ok(())
    } else {
        run_on_panel(aggregator, &config, cli.frames)
    }
}

fn run_headless(aggregator: Aggregator, config: &AppConfig, frames: Option<u64>) {
    let surface = FrameBuffer::new(config.display.width, config.display.height);
    scroll(surface, aggregator, config, frames);
}

#[cfg(feature = "matrix")]
fn run_on_panel(aggregator: Aggregator, config: &AppConfig, frames: Option<u64>) -> Result<()> {
    let surface = rgb_marquee_render::LedMatrixSurface::open(
        config.display.width,
        config.display.height,
        &config.display.hardware_mapping,
        &config.display.font_path,
    )?;
    scroll(surface, aggregator, config, frames);
    Ok(())
}

#[cfg(not(feature = "matrix"))]
fn run_on_panel(aggregator: Aggregator, config: &AppConfig, frames: Option<u64>) -> Result<()> {
    warn!("Built without matrix support, rendering headless");
    run_headless(aggregator, config, frames);
    Ok(())
}

fn scroll<S: RenderSurface>(
    surface: S,
    aggregator: Aggregator,
    config: &AppConfig,
    frames: Option<u64>,
) {
    let mut scheduler =
        ScrollScheduler::new(surface, aggregator).with_frame_interval(config.display.tick());
    info!("Scrolling at {:?} per frame", config.display.tick());
    scheduler.run_frames(frames);
    info!("Stopped after {} frames", scheduler.frames());
}

//! Binary entrypoint for the slideshow.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use crossbeam_channel::unbounded;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

use xo_show::config;
use xo_show::error::Error;
use xo_show::history::HistoryBuffer;
use xo_show::input::spawn_stdin_reader;
use xo_show::platform::brightness::{BacklightSysfs, Brightness, NoBacklight};
use xo_show::render::software::{LogSink, SoftwareScreen};
use xo_show::render::Compositor;
use xo_show::scan::scan_items;
use xo_show::slideshow::{Slideshow, Timing};
use xo_show::watch::start_watcher;

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "xo-show", about = "Photo slideshow with a navigable history")]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Override per-image delay (ms)
    #[arg(long, value_name = "MILLIS")]
    delay_ms: Option<u64>,

    /// Disable the filesystem watcher for incremental discovery
    #[arg(long)]
    no_watch: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("xo_show={level}").parse()?)
        .add_directive("notify=warn".parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = config::from_yaml_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    cfg.validate().context("validating configuration")?;

    let items = scan_items(&cfg.photo_library_path, &cfg.scan_options())?;
    info!(count = items.len(), "scanned items");

    // An empty scan is not fatal: the loop shows the no-items placeholder
    // until quit (or until the watcher reports a first image).
    let history = match HistoryBuffer::from_items(items, cfg.max_history_size) {
        Ok(buf) => Some(buf),
        Err(Error::EmptyScan) => {
            warn!("no items found; showing placeholder");
            None
        }
        Err(err) => return Err(err.into()),
    };

    let sleep_time = cli
        .delay_ms
        .map_or(cfg.sleep_time, Duration::from_millis);
    let timing = Timing {
        sleep_time,
        usage_time: cfg.usage_time,
        increment: cfg.sleep_time_increment,
    };

    let brightness: Box<dyn Brightness> = match &cfg.backlight_path {
        Some(dir) => Box::new(BacklightSysfs::new(dir.clone())),
        None => Box::new(NoBacklight),
    };

    let mut screen = SoftwareScreen::new(cfg.screen.width, cfg.screen.height, LogSink);
    let compositor = Compositor::new(cfg.caption_height, cfg.placeholders.clone());
    let show = Slideshow::new(history, compositor, brightness, timing, Instant::now());

    let (input_tx, input_rx) = unbounded();
    let _input_thread = spawn_stdin_reader(input_tx);

    let (added_tx, added_rx) = unbounded();
    let _watcher = if cli.no_watch {
        None
    } else {
        match start_watcher(&cfg.photo_library_path, cfg.extensions.clone(), added_tx) {
            Ok(w) => Some(w),
            Err(err) => {
                warn!(error = %err, "watcher unavailable; incremental discovery disabled");
                None
            }
        }
    };
    let added = _watcher.is_some().then_some(&added_rx);

    show.run(&mut screen, &input_rx, added)?;
    Ok(())
}

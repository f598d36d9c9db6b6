//! Light the indicator LED of the garbage bin which is due for collection.

mod cli;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
#[cfg(feature = "rpi")]
use mm_core::indicator::rpi::RppalPins;
use mm_core::{
    calendar,
    category::CategoryClassifier,
    fetcher::CalendarFetcher,
    garbage_bin::BinSet,
    indicator::{Indicator, LogPins, PinBackend},
    pickup,
    scanner::LOG_FORMAT,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{exit_code, Arguments, Config};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = exit_code(&err);
            init_logging(false);
            if code != 0 {
                error!("Invalid command line: {:?}", err.kind());
            }
            if let Err(print_err) = err.print() {
                error!("Could not print usage: {print_err}");
            }
            return ExitCode::from(code);
        }
    };
    let config = Config::from(args);
    init_logging(config.debug);
    match run(&config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, `RUST_LOG` takes precedence over the `--debug` flag.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(config: &Config) -> Result<BinSet> {
    debug!("It is now {}", config.now.format(LOG_FORMAT));
    #[cfg(feature = "rpi")]
    if !config.dry_run {
        return show(config, RppalPins::new()?).await;
    }
    #[cfg(not(feature = "rpi"))]
    if !config.dry_run {
        tracing::warn!("Built without GPIO support, pin changes are only logged");
    }
    show(config, LogPins::default()).await
}

/// Fetch the calendar and show the bins due at the configured instant.
async fn show<B: PinBackend>(config: &Config, backend: B) -> Result<BinSet> {
    let classifier = CategoryClassifier::new(config.cardboard)?;
    let mut indicator = Indicator::new(backend, config.pin_map, config.numbering)?;
    indicator.init()?;

    let fetcher = CalendarFetcher::new(&config.cache_dir)?.refresh(config.refresh);
    info!(
        "Making sure current calendar file '{}' exists",
        fetcher.cache_path(&config.source).display()
    );
    let path = fetcher.ensure_local_file(&config.source).await?;

    info!("Loading calendar from '{}'", path.display());
    let events = calendar::read(&path)?;

    let shown = pickup::indicate(&events, config.now, &classifier, &mut indicator)?;
    debug!("Indicated bins: {:?}", shown.bins());
    Ok(shown)
}

//! Subshift - command line entry point
//!
//! Offsets every timestamp of an SRT file and saves the result as
//! `<name>_offset.srt` next to the source.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{debug, info, Level};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use subshift::cli::Args;
use subshift::config::{Config, Settings, DEFAULT_SETTINGS_FILE};
use subshift::timestamp::TimestampPolicy;
use subshift::workflow::Workflow;

fn main() -> Result<()> {
    let args = Args::parse();

    // Reject NaN and infinities before touching the settings file or log directory
    args.offset()?;

    let settings = load_settings(args.config.as_deref())?;

    let _log_guard = setup_logging(args.verbose, settings.log_dir.as_deref())?;
    debug!("Settings: {:?}", settings);

    let mut config = Config::with_settings(&args.srt_file, args.offset_seconds, &settings);
    config.output = args.output;
    if args.strict {
        config.policy = TimestampPolicy::Strict;
    }

    let workflow = Workflow::new(config)?;
    let output_path = workflow.run()?;

    println!(
        "Subtitles offset by {} seconds. New file saved as {}",
        args.offset_seconds,
        output_path.display()
    );
    info!("Subshift completed successfully");
    Ok(())
}

/// Load the settings file named on the command line, or `subshift.toml` in
/// the current directory when present.
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    let settings = match config_path {
        Some(path) => Settings::from_file(path)?,
        None if Path::new(DEFAULT_SETTINGS_FILE).exists() => {
            Settings::from_file(DEFAULT_SETTINGS_FILE)?
        }
        None => Settings::default(),
    };
    Ok(settings)
}

/// Setup logging to stderr and, when a log directory is configured, to a
/// daily rolling file. The returned guard flushes the file writer on drop.
fn setup_logging(verbose: bool, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let log_level = if verbose { Level::DEBUG } else { Level::WARN };

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbose)
        .with_line_number(verbose);

    let mut guard = None;
    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = rolling::daily(dir, "subshift.log");
            let (non_blocking_file, worker_guard) = non_blocking(file_appender);
            guard = Some(worker_guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking_file)
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    if let Some(dir) = log_dir {
        info!("Logging to {}", dir.join("subshift.log").display());
    }

    Ok(guard)
}

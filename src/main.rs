//! hostrig - pluggable extension lifecycle host
//!
//! Main entry point for the hostrig CLI.

mod cli;
mod cmd_host;
mod register;

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use hostrig_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};
use hostrig_core::Host;
use hostrig_protocols::capability::DispatchRequest;

use crate::cli::{Cli, Commands};

/// Get the .hostrig directory path.
fn hostrig_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".hostrig"))
        .unwrap_or_else(|| PathBuf::from(".hostrig"))
}

/// Initialize tracing with console and file output.
///
/// Log files rotate daily in the configured directory (default
/// ~/.hostrig/logs), keeping `max_files` of them.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = logging
        .dir
        .as_deref()
        .map(|d| PathBuf::from(ConfigLoader::expand_path(d)))
        .unwrap_or_else(|| hostrig_dir().join("logs"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("hostrig")
        .filename_suffix("log")
        .max_log_files(logging.max_files)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        // Console layer, JSON lines when configured
        .with(logging.json.then(|| fmt::layer().json().with_target(true)))
        .with((!logging.json).then(|| fmt::layer().with_target(true).with_ansi(true)))
        // File layer (text format without colors)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load the config file named on the command line, or the default one if present.
fn load_config(cli: &Cli) -> Result<Config, hostrig_config::ConfigError> {
    match &cli.config {
        Some(path) => ConfigLoader::load(path),
        None => ConfigLoader::load_or_default(&ConfigLoader::default_path()),
    }
}

/// Resolve the working directory: CLI flag, then config, then the current directory.
fn resolve_work_dir(cli: &Cli, config: &Config) -> std::io::Result<PathBuf> {
    let dir = match (&cli.work_dir, &config.host.work_dir) {
        (Some(dir), _) => dir.clone(),
        (None, Some(dir)) => PathBuf::from(ConfigLoader::expand_path(&dir.to_string_lossy())),
        (None, None) => std::env::current_dir()?,
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_tracing(&config.logging)?;

    let warnings = ConfigValidator::validate(&config).into_result().inspect_err(|e| {
        error!("{}", e);
    })?;
    for warning in &warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }

    let work_dir = resolve_work_dir(&cli, &config)?;
    info!("Starting {} v{}", config.host.name, env!("CARGO_PKG_VERSION"));
    info!("Working directory: {}", work_dir.display());

    let discovery = register::discover(&config, &work_dir);
    let context = register::boot_context(&config, work_dir.clone());
    let host = Host::discover(&discovery, context)?;

    match cli.command {
        Some(Commands::List) => {
            cmd_host::list(&host);
            Ok(())
        }
        None => cmd_host::run(host).await,
        Some(Commands::Run { args }) => {
            if !args.is_empty() {
                info!(?args, "Extension arguments");
            }
            cmd_host::run(host).await
        }
        Some(Commands::Eval {
            lang,
            params,
            script,
            args,
        }) => {
            let request = DispatchRequest::new(lang, script).with_parameters(params);
            cmd_host::eval(&host, request, &args).await
        }
    }
}

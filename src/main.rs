//! Entry point for the etude catalog player.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load the etude catalog via `catalog`.
//! - Load user configuration from `conf/config.toml`.
//! - Launch the GUI application with the loaded catalog and config.

mod app;
mod assets;
mod cache;
mod catalog;
mod config;
mod player;

use crate::app::run_app;
use crate::cache::load_cached_config;
use crate::catalog::Catalog;
use crate::config::load_config;
use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let base_config = load_config(Path::new("conf/config.toml"));
    let mut config = base_config.clone();
    if let Some(mut cached) = load_cached_config() {
        info!("Loaded window state overrides from cache");
        // Always honor the base config's log level so user changes take effect.
        cached.log_level = base_config.log_level;
        // The catalog and asset locations come from the base config too.
        cached.asset_base_url = base_config.asset_base_url.clone();
        cached.catalog_path = base_config.catalog_path.clone();
        config = cached;
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());

    let catalog_path = parse_args(&config.catalog_path)?;
    info!(
        catalog = %catalog_path.display(),
        base_url = %config.asset_base_url,
        level = %config.log_level,
        "Starting etude catalog player"
    );
    let catalog = Catalog::load(&catalog_path)?;
    run_app(catalog, config).context("Failed to start the GUI")?;
    Ok(())
}

/// Optional first argument overrides the configured catalog path.
fn parse_args(default_catalog: &str) -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(arg) => PathBuf::from(arg),
        None => PathBuf::from(default_catalog),
    };
    if !path.exists() {
        return Err(anyhow!("Catalog not found: {}", path.as_path().display()));
    }
    Ok(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

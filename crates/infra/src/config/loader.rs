//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the process environment when one exists
//! 2. Attempts to load from environment variables
//! 3. Falls back to the first config file found by probing
//! 4. Falls back to built-in defaults when no file exists
//!
//! ## Environment Variables
//! - `TEMPO_DB_PATH`: Database file path (required for the env strategy)
//! - `TEMPO_DB_POOL_SIZE`: Connection pool size
//! - `TEMPO_TIMEZONE`: IANA zone used for analytics days and hours
//! - `TEMPO_CALENDAR_DAYS`: Length of the streak calendar
//! - `TEMPO_LOG_LEVEL`: Default tracing filter directive
//! - `TEMPO_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` and `./tempo.{json,toml}`
//! 2. `../config.{json,toml}` and `../../config.{json,toml}`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tempo_domain::{Config, Result, TempoError};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "tempo.json", "tempo.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `TempoError::Config` when a found config file cannot be read or
/// parsed, or when the resulting timezone is unknown.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path))?,
                None => {
                    tracing::info!("No config file found, using defaults");
                    Config::default()
                }
            }
        }
    };

    config.analytics.time_zone()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `TEMPO_DB_PATH` must be present; every other variable falls back to its
/// default.
///
/// # Errors
/// Returns `TempoError::Config` if `TEMPO_DB_PATH` is missing or a numeric
/// variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.database.path = env_var("TEMPO_DB_PATH")?;
    if let Some(pool_size) = env_parsed::<u32>("TEMPO_DB_POOL_SIZE")? {
        config.database.pool_size = pool_size;
    }
    if let Ok(timezone) = std::env::var("TEMPO_TIMEZONE") {
        config.analytics.timezone = timezone;
    }
    if let Some(days) = env_parsed::<u32>("TEMPO_CALENDAR_DAYS")? {
        config.analytics.calendar_days = days;
    }
    if let Ok(level) = std::env::var("TEMPO_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("TEMPO_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TempoError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TempoError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TempoError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TempoError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TempoError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TempoError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(TempoError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Returns the first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).collect();
    for parent in ["..", "../.."] {
        paths.push(dir.join(parent).join("config.json"));
        paths.push(dir.join(parent).join("config.toml"));
    }
    paths
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| TempoError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional numeric environment variable
fn env_parsed<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| TempoError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map_or(default, |s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading the configuration
//! file and the process-wide bot credential.

use std::io;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Environment variable holding the Discord bot token.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";

/// Load configuration from a TOML file and validate it.
///
/// A missing file falls back to defaults. An unreadable or malformed file
/// and invalid values are errors.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = match Config::load(path) {
        Ok(config) => config,
        Err(AppError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Config file {path:?} not found. Using defaults.");
            Config::default()
        }
        Err(e) => {
            return Err(AppError::config(format!(
                "Failed to load configuration from {path:?}: {e}"
            )));
        }
    };
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration in {path:?}: {e}")))?;
    Ok(config)
}

/// Read the bot token once at startup.
pub fn load_token() -> Result<String> {
    token_from(std::env::var(TOKEN_ENV).ok())
}

fn token_from(value: Option<String>) -> Result<String> {
    value
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::config(format!("{TOKEN_ENV} is not set")))
}

//! Configuration service implementation.
//!
//! Loads `PanelConfig` from a TOML file (explicit path or
//! `~/.config/synth-panel/config.toml`) and applies environment overrides.

use crate::paths::PanelPaths;
use panel_core::config::PanelConfig;
use panel_core::error::{PanelError, Result};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_MODEL: &str = "CLAUDE_MODEL_NAME";
pub const ENV_BIND: &str = "PANEL_BIND";
pub const ENV_FRONTEND_DIR: &str = "PANEL_FRONTEND_DIR";
pub const ENV_PERSONA_FILE: &str = "PANEL_PERSONA_FILE";
pub const ENV_MAX_CONCURRENCY: &str = "PANEL_MAX_CONCURRENCY";
pub const ENV_SIMULATOR_SEED: &str = "PANEL_SIMULATOR_SEED";
pub const ENV_LOG_JSON: &str = "PANEL_LOG_JSON";

/// Configuration loader.
///
/// Priority (highest first):
/// 1. Environment variables
/// 2. The explicit config file, or the default config file if it exists
/// 3. Built-in defaults
pub struct ConfigService;

impl ConfigService {
    /// Loads configuration from file and process environment.
    ///
    /// # Errors
    ///
    /// - An explicit `path` that cannot be read or parsed
    /// - An environment override that does not parse
    pub fn load(path: Option<&Path>) -> Result<PanelConfig> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => Self::load_default_file()?,
        };
        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parses a config file. The file must exist.
    pub fn load_file(path: &Path) -> Result<PanelConfig> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PanelError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<PanelConfig> {
        Ok(toml::from_str(raw)?)
    }

    fn load_default_file() -> Result<PanelConfig> {
        match PanelPaths::config_file() {
            Ok(path) if path.is_file() => Self::load_file(&path),
            _ => Ok(PanelConfig::default()),
        }
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// Blank values are treated as unset.
    pub fn apply_overrides<F>(config: &mut PanelConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            config.reasoning.api_key = Some(key);
        }
        if let Some(model) = get(ENV_MODEL) {
            config.reasoning.model = model;
        }
        if let Some(bind) = get(ENV_BIND) {
            config.server.bind = bind;
        }
        if let Some(dir) = get(ENV_FRONTEND_DIR) {
            config.server.frontend_dir = Some(PathBuf::from(dir));
        }
        if let Some(file) = get(ENV_PERSONA_FILE) {
            config.panel.persona_file = Some(PathBuf::from(file));
        }
        if let Some(raw) = get(ENV_MAX_CONCURRENCY) {
            config.panel.max_concurrency = parse_env(ENV_MAX_CONCURRENCY, &raw)?;
        }
        if let Some(raw) = get(ENV_SIMULATOR_SEED) {
            config.panel.simulator_seed = Some(parse_env(ENV_SIMULATOR_SEED, &raw)?);
        }
        if let Some(raw) = get(ENV_LOG_JSON) {
            config.logging.json = parse_flag(ENV_LOG_JSON, &raw)?;
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| PanelError::config(format!("{key} has an invalid value: '{raw}'")))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(PanelError::config(format!(
            "{key} must be a boolean flag, got '{raw}'"
        ))),
    }
}

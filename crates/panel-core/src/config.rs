//! Configuration model.
//!
//! Every field has a default so a missing or partial `config.toml` is valid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Root configuration.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PanelConfig {
    pub server: ServerConfig,
    pub reasoning: ReasoningConfig,
    pub panel: PanelSettings,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
    /// Prebuilt frontend bundle served for unmatched paths
    pub frontend_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            frontend_dir: None,
        }
    }
}

/// Reasoning service settings.
///
/// `api_key` presence selects the network-backed reasoner.
#[derive(Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReasoningConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub base_url: String,
    pub api_version: String,
}

impl ReasoningConfig {
    /// Returns the API key if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl fmt::Debug for ReasoningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReasoningConfig")
            .field("api_key", &self.credential().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PanelSettings {
    /// JSON file replacing the bundled persona panel
    pub persona_file: Option<PathBuf>,
    /// Upper bound on in-flight persona queries per test
    pub max_concurrency: usize,
    /// Seed for reproducible simulated answers
    pub simulator_seed: Option<u64>,
    /// Raw answers retained on each result
    pub sample_size: usize,
}

impl PanelSettings {
    /// `max_concurrency`, never less than one.
    pub fn concurrency_limit(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            persona_file: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            simulator_seed: None,
            sample_size: crate::survey::DEFAULT_SAMPLE_SIZE,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// EnvFilter directive, e.g. `info,panel_application=debug`
    pub filter: Option<String>,
}

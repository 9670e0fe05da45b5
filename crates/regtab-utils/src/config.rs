//! Configuration management utilities
//!
//! Values are layered: defaults, then an optional JSON file, then
//! environment variables. Command-line flags are applied last by the binary.

use anyhow::Context as _;
use regtab_core::HeaderSpan;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding [`Config::output_dir`]
pub const ENV_OUTPUT_DIR: &str = "REGTAB_OUTPUT_DIR";
/// Environment variable overriding [`Config::standalone`]
pub const ENV_STANDALONE: &str = "REGTAB_STANDALONE";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the `.tex` file is written to
    pub output_dir: PathBuf,
    /// File name without extension
    pub base_name: String,
    /// Emit a complete document rather than an includable fragment
    pub standalone: bool,
    /// Add the standard significance footnote
    pub significance_note: bool,
    /// Caption used when none is given on the command line
    pub caption: Option<String>,
    /// `\label` used when none is given on the command line
    pub label: Option<String>,
    /// Columns spanned by the dependent-variable header
    pub header_span: HeaderSpan,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            base_name: "regression".to_string(),
            standalone: false,
            significance_note: false,
            caption: None,
            label: None,
            header_span: HeaderSpan::Legacy,
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().with_process_env()
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(self) -> Self {
        self.with_env(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file; absent fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|dir| !dir.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup(ENV_STANDALONE) {
            match parse_flag(&value) {
                Some(flag) => self.standalone = flag,
                None => warn!(variable = ENV_STANDALONE, %value, "Ignoring unrecognised flag value"),
            }
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

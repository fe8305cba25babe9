//! Configuration
//!
//! Read from `~/.codigo/config.toml` (or `$CODIGO_CONFIG`, or `--config`).
//! A missing file means defaults; a file that exists but does not parse
//! is an error.
//!
//! ```toml
//! [patterns]
//! cpt = "^[0-9]{4}[0-9FT]$"
//!
//! [matcher]
//! latency_ms = 0
//! seed = 42
//!
//! [session]
//! auto_process = true
//! stale_responses = "discard"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::PlaceholderMatcher;
use crate::adapters::placeholder::{DEFAULT_LATENCY, DEFAULT_MATCH_PERCENT};
use crate::core::services::{PatternError, PatternRules, SessionOptions, StalePolicy};
use crate::paths;

/// Errors loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Config file
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },

    /// A pattern override does not compile
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pattern overrides
    #[serde(default)]
    pub patterns: PatternConfig,
    /// Placeholder matcher settings
    #[serde(default)]
    pub matcher: MatcherConfig,
    /// Session behaviour
    #[serde(default)]
    pub session: SessionConfig,
}

/// Pattern overrides; unset fields keep the built-in patterns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// ICD-10-CM pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd: Option<String>,
    /// CPT pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpt: Option<String>,
}

/// Placeholder matcher settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Simulated latency in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// Seed for the match draw
    #[serde(default)]
    pub seed: u64,
    /// Share of CPT codes reported as matched, in percent
    #[serde(default = "default_match_percent")]
    pub match_percent: u8,
    /// Fail every call
    #[serde(default)]
    pub fail: bool,
}

fn default_latency_ms() -> u64 {
    u64::try_from(DEFAULT_LATENCY.as_millis()).unwrap_or(u64::MAX)
}

const fn default_match_percent() -> u8 {
    DEFAULT_MATCH_PERCENT
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            seed: 0,
            match_percent: default_match_percent(),
            fail: false,
        }
    }
}

/// Session behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Start matching as soon as input has both code kinds
    #[serde(default = "default_auto_process")]
    pub auto_process: bool,
    /// Handling of outdated matcher outcomes
    #[serde(default)]
    pub stale_responses: StalePolicy,
}

const fn default_auto_process() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_process: default_auto_process(),
            stale_responses: StalePolicy::default(),
        }
    }
}

impl Config {
    /// Load from the resolved config location
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_from(&paths::config_file(explicit))
    }

    /// Load from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML content
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Compile the classification rules
    pub fn rules(&self) -> Result<PatternRules, ConfigError> {
        Ok(PatternRules::with_overrides(
            self.patterns.icd.as_deref(),
            self.patterns.cpt.as_deref(),
        )?)
    }

    /// Session options
    #[must_use]
    pub const fn session_options(&self) -> SessionOptions {
        SessionOptions {
            auto_process: self.session.auto_process,
            stale_responses: self.session.stale_responses,
        }
    }

    /// Build the placeholder matcher
    #[must_use]
    pub fn matcher(&self) -> PlaceholderMatcher {
        PlaceholderMatcher::new()
            .with_seed(self.matcher.seed)
            .with_match_percent(self.matcher.match_percent)
            .with_latency(Duration::from_millis(self.matcher.latency_ms))
            .failing(self.matcher.fail)
    }
}

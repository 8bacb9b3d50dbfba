//! Application configuration.
//!
//! Limits are read once at startup from a JSON file whose `codec` section
//! mirrors [`MessageLimits`]. Missing sections and fields keep their
//! defaults; unknown sections and fields are rejected.

use std::{fs, io, path::{Path, PathBuf}};

use serde::Deserialize;
use thiserror::Error;

use crate::limits::MessageLimits;

/// Top-level configuration document.
///
/// # Examples
///
/// ```
/// use msgframe::config::AppConfig;
///
/// let config = AppConfig::from_json(r#"{ "codec": { "max_headers": 8 } }"#).expect("valid");
/// assert_eq!(config.codec.max_headers, 8);
/// assert_eq!(config.codec.max_payload_bytes, 262_144);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Limits applied by the message codec.
    pub codec: MessageLimits,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The configuration is not valid JSON for [`AppConfig`].
    #[error("invalid configuration")]
    Parse(#[from] serde_json::Error),
}

impl AppConfig {
    /// Parse configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is malformed or names an
    /// unknown section or limit.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> { Ok(serde_json::from_str(text)?) }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), limits = ?config.codec, "configuration loaded");
        Ok(config)
    }
}

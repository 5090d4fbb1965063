//! Access configuration.
//!
//! This module defines how the physical-memory device is opened and which
//! addresses callers are willing to touch. It provides:
//! 1. **Defaults:** `/dev/mem`, opened with `O_SYNC`, no lower address bound.
//! 2. **Loading:** JSON deserialization from a string or a file.
//! 3. **Device Opening:** A `DevMem` handle built from the settings.
//!
//! Every field is optional in JSON; missing fields take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::common::{DEV_MEM_PATH, PhysAddr};
use crate::mem::DevMem;

/// Errors raised while loading an [`AccessConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration text is not valid JSON for [`AccessConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for opening the physical-memory device.
///
/// # Examples
///
/// ```
/// use at91io_core::config::AccessConfig;
///
/// let json = r#"{ "device": "/tmp/fake-mem", "sync": false, "min_addr": 4096 }"#;
/// let config = AccessConfig::from_json(json).unwrap();
/// assert_eq!(config.device.to_str(), Some("/tmp/fake-mem"));
/// assert!(!config.sync);
/// assert_eq!(config.min_addr, 0x1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// Path of the physical-memory device.
    #[serde(default = "AccessConfig::default_device")]
    pub device: PathBuf,

    /// Open the device with `O_SYNC` so accesses bypass the CPU caches.
    #[serde(default = "AccessConfig::default_sync")]
    pub sync: bool,

    /// Lowest address callers should accept from user input.
    #[serde(default)]
    pub min_addr: u32,
}

impl AccessConfig {
    fn default_device() -> PathBuf {
        PathBuf::from(DEV_MEM_PATH)
    }

    const fn default_sync() -> bool {
        true
    }

    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Returns `true` if `addr` is at or above the configured lower bound.
    pub const fn permits(&self, addr: PhysAddr) -> bool {
        addr.0 >= self.min_addr
    }

    /// Opens the configured device.
    ///
    /// # Errors
    ///
    /// Returns the OS error from `open(2)`.
    pub fn open_device(&self) -> io::Result<DevMem> {
        DevMem::open_with(&self.device, self.sync)
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            device: Self::default_device(),
            sync: Self::default_sync(),
            min_addr: 0,
        }
    }
}

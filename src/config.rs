//! Declarative agent configuration (`/etc/hl-hostmon/config.yaml`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Fixed serial baud rate; the monitor firmware speaks 115200 only.
pub const BAUD: u32 = 115_200;

/// Agent log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Debug,
}

/// The on-disk configuration consumed by the agent.
///
/// `log_level` and `trace_payloads` are always set as a pair (debug/true or
/// info/false). [`AgentConfig::new`] is the only constructor, so the pairing
/// holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub serial_device: PathBuf,
    pub baud: u32,
    pub log_level: LogLevel,
    pub trace_payloads: bool,
}

impl AgentConfig {
    #[must_use]
    pub fn new(serial_device: PathBuf, trace: bool) -> Self {
        Self {
            serial_device,
            baud: BAUD,
            log_level: if trace { LogLevel::Debug } else { LogLevel::Info },
            trace_payloads: trace,
        }
    }

    /// Write the config atomically (temp file + rename).
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(self).context("serializing config")?;
        let temp_path = path.with_extension("yaml.tmp");
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;
        std::fs::rename(&temp_path, path)
            .with_context(|| format!("finalizing config file {}", path.display()))?;
        Ok(())
    }

    /// Load a previously written config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

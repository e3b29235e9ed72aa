//! Configuration module

use crate::profile::Strategy;
use anyhow::{Context, Result};
use iterfile_core::ReaderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Scanner and handoff configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Profiling defaults
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Scan-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Initial reader buffer (KB)
    pub buffer_kb: usize,

    /// Longest accepted line (KB)
    pub max_line_kb: usize,

    /// Lines the channel producer may read ahead (0 = rendezvous)
    pub handoff_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            buffer_kb: 64,
            max_line_kb: 64,
            handoff_capacity: 0,
        }
    }
}

/// Profiling-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProfileConfig {
    /// Strategy used when `--func` is not given
    pub default_strategy: Strategy,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Scanner settings for the core reader
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig {
            buffer_capacity: self.scan.buffer_kb.saturating_mul(1024),
            max_line_length: self.scan.max_line_kb.saturating_mul(1024),
            handoff_capacity: self.scan.handoff_capacity,
        }
    }
}

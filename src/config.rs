//! Configuration Management
//!
//! Handles persistent configuration storage for cfdist.

use crate::distribution::DEFAULT_CONCURRENCY;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Region to open sessions for
    #[serde(default)]
    pub region: Option<String>,
    /// AWS profile to read credentials and region from
    #[serde(default)]
    pub profile: Option<String>,
    /// CloudFront endpoint override
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Default columns when none are given on the command line
    #[serde(default)]
    pub columns: Vec<String>,
    /// Items enriched at once while listing
    #[serde(default)]
    pub concurrency: Option<usize>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cfdist").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a file; missing or unreadable files give defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Get effective profile (CLI > config); `None` leaves it to `AWS_PROFILE`
    pub fn effective_profile(&self, cli: Option<&str>) -> Option<String> {
        cli.map(|p| p.to_string()).or_else(|| self.profile.clone())
    }

    /// Get effective region (CLI > config); `None` leaves it to the AWS
    /// environment and profile, then us-east-1
    pub fn effective_region(&self, cli: Option<&str>) -> Option<String> {
        cli.map(|r| r.to_string()).or_else(|| self.region.clone())
    }

    /// Get effective concurrency (CLI > config > default), never below 1
    pub fn effective_concurrency(&self, cli: Option<usize>) -> usize {
        cli.or(self.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY)
            .max(1)
    }
}

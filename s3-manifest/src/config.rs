//! Configuration management for the manifest generator.
//!
//! Loads an optional TOML file; every field has a default so the generator
//! runs without one.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub s3: S3Config,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct S3Config {
    /// Region override (None = AWS default provider chain)
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack, ...)
    pub endpoint_url: Option<String>,

    /// Use path-style addressing (defaults to true when an endpoint is set)
    pub force_path_style: Option<bool>,

    /// Keys requested per ListObjectsV2 page (S3 caps this at 1000)
    pub page_size: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

// Default values
fn default_page_size() -> i32 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: None,
            endpoint_url: None,
            force_path_style: None,
            page_size: default_page_size(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        anyhow::ensure!(
            (1..=1000).contains(&config.s3.page_size),
            "s3.page_size must be between 1 and 1000, got {}",
            config.s3.page_size
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.s3.page_size, 1000);
        assert_eq!(config.log.level, "info");
        assert!(config.s3.region.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("manifest.toml");
        std::fs::write(&path, "[s3]\nregion = \"eu-west-1\"\n")?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.s3.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.s3.page_size, 1000);
        assert_eq!(config.log.level, "info");
        Ok(())
    }

    #[test]
    fn test_rejects_oversized_page() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("manifest.toml");
        std::fs::write(&path, "[s3]\npage_size = 5000\n")?;

        assert!(Config::from_file(&path).is_err());
        Ok(())
    }
}

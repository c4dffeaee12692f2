// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::service_client::DEFAULT_BASE_URL;
use crate::utils;

pub const DEFAULT_CONFIG_FILE: &str = "jobmailer.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "out";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<ClientConfig>,
    #[serde(default)]
    production: Option<ClientConfig>,
}

impl ClientConfig {
    /// Load configuration for the current environment.
    ///
    /// Reads `path` (or `jobmailer.yaml`) when it exists, then applies
    /// `JOBMAILER_API_URL` / `JOBMAILER_OUTPUT_DIR` overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml(&content, &environment)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else if path.is_some() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("JOBMAILER_API_URL") {
            config.base_url = url;
        }
        if let Ok(dir) = std::env::var("JOBMAILER_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config.output_dir = utils::resolve_path(&config.output_dir)?;
        info!("Service: {}", config.base_url);
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBMAILER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Pick the section for `environment` out of a YAML document.
    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid YAML")?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        Ok(section.unwrap_or_default())
    }
}

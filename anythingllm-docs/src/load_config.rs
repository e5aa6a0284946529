/// `load_config` module: builds the process-wide [`ApiConfig`] from an optional
/// YAML file and the environment.
///
/// The YAML file only carries non-secret settings. The API key always comes from
/// the environment, mirroring how the service is usually deployed behind a `.env`.
///
/// # Precedence for the base URL
/// 1. `ANYTHINGLLM_BASE_URL` environment variable
/// 2. `base_url` in the YAML file
/// 3. [`DEFAULT_BASE_URL`]
///
/// # Errors
/// Unreadable or malformed files and a missing `ANYTHINGLLM_API_KEY` are reported
/// as `anyhow::Error` with the offending path or variable named.
use anyhow::Result;
use anythingllm_docs_core::ApiConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub const API_KEY_VAR: &str = "ANYTHINGLLM_API_KEY";
pub const BASE_URL_VAR: &str = "ANYTHINGLLM_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub base_url: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> Result<ApiConfig> {
    let file_config = match path {
        Some(path) => read_file_config(path)?,
        None => FileConfig::default(),
    };

    let base_url = match non_empty_env(BASE_URL_VAR) {
        Some(url) => {
            info!(var = BASE_URL_VAR, "Base URL taken from environment");
            url
        }
        None => file_config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    };

    let api_key = match non_empty_env(API_KEY_VAR) {
        Some(key) => {
            info!("{API_KEY_VAR} found in env");
            key
        }
        None => {
            error!("{API_KEY_VAR} environment variable not set");
            anyhow::bail!("{API_KEY_VAR} environment variable not set");
        }
    };

    let config = ApiConfig::new(base_url, api_key);
    config.trace_loaded();
    Ok(config)
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    info!(config_path = ?path, "Loading configuration from file");

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path,
                e
            ));
        }
    };

    match serde_yaml::from_str(&content) {
        Ok(conf) => {
            info!(config_path = ?path, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

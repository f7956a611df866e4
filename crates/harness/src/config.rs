//! Environment-based configuration for the application under test

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::error::{HarnessError, HarnessResult};

pub const ENV_BASE_URL: &str = "WEBTEST_BASE_URL";
pub const ENV_USERNAME: &str = "WEBTEST_USERNAME";
pub const ENV_PASSWORD: &str = "WEBTEST_PASSWORD";

/// Connection details for the application under test.
///
/// Values come from process environment variables, optionally overlaid by
/// a KEY=VALUE env file selected per deployment (`.env.dev`, `.env.prod`).
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Config {
    /// Load configuration, overlaying `env_file` (when given) over the
    /// process environment. A named env file that does not exist is an
    /// error, not a silent fallback.
    pub fn load(env_file: Option<&Path>) -> HarnessResult<Self> {
        let overlay = match env_file {
            Some(path) => {
                if !path.exists() {
                    return Err(HarnessError::EnvFileNotFound(path.to_path_buf()));
                }
                let map = parse_env_file(path)?;
                info!("Loaded env from: {}", path.display());
                map
            }
            None => HashMap::new(),
        };

        let get = |key: &str| {
            overlay
                .get(key)
                .cloned()
                .or_else(|| std::env::var(key).ok())
        };

        let defaults = Self::default();
        Ok(Self {
            base_url: get(ENV_BASE_URL).unwrap_or(defaults.base_url),
            username: get(ENV_USERNAME).unwrap_or_default(),
            password: get(ENV_PASSWORD).unwrap_or_default(),
        })
    }

    /// Substitute `${base_url}`, `${username}` and `${password}` in step
    /// values, so scenario files never carry credentials.
    pub fn expand(&self, value: &str) -> String {
        value
            .replace("${base_url}", &self.base_url)
            .replace("${username}", &self.username)
            .replace("${password}", &self.password)
    }
}

fn parse_env_file(path: &Path) -> HarnessResult<HashMap<String, String>> {
    let content = std::fs::read_to_string(path)?;
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            map.insert(key.trim().to_string(), value.to_string());
        }
    }
    Ok(map)
}

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Access key for the stream proxy. Unset or empty leaves the proxy open.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            proxy: ProxyConfig { api_key: None },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_file =
            std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());
        let mut config = Self::load_from(Path::new(&config_file))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Read a config file, writing the defaults there first when it is
    /// missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, contents)?;
            Ok(default_config)
        }
    }

    /// A non-empty `API_KEY` environment variable wins over the file value.
    pub fn apply_env_overrides(&mut self) {
        if let Some(key) = std::env::var("API_KEY").ok().filter(|key| !key.is_empty()) {
            self.proxy.api_key = Some(key);
        }
    }
}

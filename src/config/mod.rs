use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub dataset: DatasetConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub reload_interval_seconds: u64, // 0 disables the watcher
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_rate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_results: usize,
    pub min_results: usize,
    pub max_results: usize,
    pub quick_max_chars: usize,
    pub common_top: usize,
    pub common_min_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_results: 20,
            min_results: 5,
            max_results: 50,
            quick_max_chars: crate::search::QUICK_RECIPE_MAX_CHARS,
            common_top: 20,
            common_min_len: 3,
        }
    }
}

impl SearchConfig {
    /// Clamp a requested result count into the configured bounds
    pub fn clamp_results(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_results)
            .clamp(self.min_results, self.max_results)
    }
}

/// Read an environment variable, falling back to `default` when unset
fn env_or<T: FromStr>(name: &str, default: &str) -> Result<T> {
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {name} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let path = std::env::var("RECIPES_CSV")
            .unwrap_or_else(|_| "data/recipes.csv".to_string())
            .into();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Settings {
            dataset: DatasetConfig {
                path,
                reload_interval_seconds: env_or("RELOAD_INTERVAL", "60")?,
            },
            server: ServerConfig {
                host,
                port: env_or("PORT", "3000")?,
                api_rate_limit: env_or("API_RATE_LIMIT", "100")?,
            },
            search: SearchConfig {
                default_results: env_or("DEFAULT_RESULTS", "20")?,
                min_results: env_or("MIN_RESULTS", "5")?,
                max_results: env_or("MAX_RESULTS", "50")?,
                quick_max_chars: env_or("QUICK_RECIPE_MAX_CHARS", "500")?,
                common_top: env_or("COMMON_INGREDIENTS_TOP", "20")?,
                common_min_len: env_or("COMMON_INGREDIENTS_MIN_LEN", "3")?,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        let search = &self.search;
        if search.min_results == 0
            || search.min_results > search.default_results
            || search.default_results > search.max_results
        {
            return Err(Error::Config(format!(
                "Result bounds must satisfy 0 < MIN_RESULTS ({}) <= DEFAULT_RESULTS ({}) <= MAX_RESULTS ({})",
                search.min_results, search.default_results, search.max_results
            )));
        }

        if search.quick_max_chars == 0 {
            return Err(Error::Config(
                "QUICK_RECIPE_MAX_CHARS must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

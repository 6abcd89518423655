use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub open_data: OpenDataConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub dir: PathBuf,
}

impl DataConfig {
    /// Directory holding downloaded per-match event files.
    pub fn events_dir(&self) -> PathBuf {
        self.dir.join("events")
    }

    /// Path a match's events are downloaded to.
    pub fn match_events_path(&self, match_id: u64) -> PathBuf {
        self.events_dir().join(format!("{match_id}.json"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenDataConfig {
    pub base_url: String,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

impl AppConfig {
    /// Load configuration from a TOML file, overlaying environment variables.
    ///
    /// Resolution order for the file: explicit `path`, then `SHOT_REPORT_CONFIG`,
    /// then `config/default.toml`. `SHOT_REPORT_DATA_DIR` overrides `data.dir`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("SHOT_REPORT_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        if let Ok(dir) = std::env::var("SHOT_REPORT_DATA_DIR") {
            config.data.dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }
}

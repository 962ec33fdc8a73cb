use crate::errors::{AppError, AppResult};
use crate::utils::path;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,
    #[serde(default = "default_rolling_window")]
    pub rolling_window_days: u32,
    #[serde(default = "default_weekly_days")]
    pub weekly_days: u32,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_recent_limit() -> u32 {
    10
}
fn default_rolling_window() -> u32 {
    30
}
fn default_weekly_days() -> u32 {
    7
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            recent_limit: default_recent_limit(),
            rolling_window_days: default_rolling_window(),
            weekly_days: default_weekly_days(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("habitlogger")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".habitlogger")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("habitlogger.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("habit-tracker.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        cfg.database = path::expand_tilde(&cfg.database)
            .to_string_lossy()
            .to_string();
        Ok(cfg)
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Create the config directory and, unless `is_test`, write the config file.
    /// Returns the configuration that was written.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => path::resolve_in(&dir, name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}

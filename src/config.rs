use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_DIR_ENV: &str = "ROSTER_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Record file; `~/` is expanded, relative paths resolve against the working directory.
    pub data_file: String,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_file: "students.txt".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl RosterConfig {
    /// Reads the config file, falling back to defaults when it is missing or unreadable.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    pub fn resolved_data_path(&self) -> PathBuf {
        expand_home(&self.data_file)
    }

    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("student-roster")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    pub fn log_path() -> PathBuf {
        Self::config_dir().join("roster.log")
    }
}

fn expand_home(path: &str) -> PathBuf {
    let home = || dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if let Some(stripped) = path.strip_prefix("~/") {
        home().join(stripped)
    } else if path == "~" {
        home()
    } else {
        PathBuf::from(path)
    }
}

use crate::domain::{StatusList, DEFAULT_STATUSES};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Columns a board starts with when no status list has been stored
    #[serde(default = "default_statuses")]
    pub default_statuses: Vec<String>,
}

fn default_name() -> String {
    "Task Board".to_string()
}

fn default_statuses() -> Vec<String> {
    DEFAULT_STATUSES.iter().map(|s| s.to_string()).collect()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            default_statuses: default_statuses(),
        }
    }
}

impl BoardConfig {
    /// Parses and validates a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| BoardError::ConfigError(e.to_string()))
    }

    /// Default statuses must be non-blank and unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = StatusList::new();
        for name in &self.default_statuses {
            seen.push(name)
                .map_err(|e| BoardError::ConfigError(format!("default_statuses: {e}")))?;
        }
        Ok(())
    }

    pub fn status_list(&self) -> StatusList {
        StatusList::from_names(&self.default_statuses)
    }
}

use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::validate_non_empty_string;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML settings file. Values here act as defaults; CLI flags
/// take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub store_path: Option<String>,
    pub output_path: Option<String>,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RegistryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| RegistryError::ConfigError {
                field: "settings".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if let Some(store_path) = &self.store_path {
            validate_non_empty_string("store_path", store_path)?;
        }
        if let Some(output_path) = &self.output_path {
            validate_non_empty_string("output_path", output_path)?;
        }
        Ok(())
    }
}

use std::time::Duration;

use crate::classifier::IncidentCategory;
use crate::config::Config;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub upload_delay: Duration,
    pub reset_delay: Duration,
    /// Category reported by degraded runs.
    pub default_category: IncidentCategory,
    /// Address reported by degraded runs.
    pub undetermined_address: String,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let settings = &config.pipeline;
        let default_category =
            IncidentCategory::find(&settings.default_category).ok_or_else(|| {
                ConfigError::validation(format!(
                    "Unknown default category '{}'",
                    settings.default_category
                ))
            })?;

        Ok(Self {
            upload_delay: settings.upload_delay(),
            reset_delay: settings.reset_delay(),
            default_category,
            undetermined_address: settings.undetermined_address.clone(),
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            upload_delay: Duration::from_millis(800),
            reset_delay: Duration::from_millis(2000),
            default_category: IncidentCategory::catalog()[0],
            undetermined_address: super::state::UNDETERMINED_ADDRESS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_default_config() {
        let from_config = PipelineConfig::from_config(&Config::default()).unwrap();
        let default = PipelineConfig::default();

        assert_eq!(from_config.upload_delay, default.upload_delay);
        assert_eq!(from_config.reset_delay, default.reset_delay);
        assert_eq!(from_config.default_category, default.default_category);
        assert_eq!(from_config.undetermined_address, "location undetermined");
    }

    #[test]
    fn test_unknown_default_category() {
        let mut config = Config::default();
        config.pipeline.default_category = "graffiti".to_string();
        assert!(matches!(
            PipelineConfig::from_config(&config),
            Err(ConfigError::Validation { .. })
        ));
    }
}

use std::path::{Path, PathBuf};

use crate::classifier::IncidentCategory;
use crate::config::schema::Config;
use crate::error::ConfigError;

const CONFIG_DIR_NAME: &str = "urban-feedback";
const CONFIG_FILE_NAME: &str = "config.json";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the config at `path`, falling back to defaults when the file does not exist.
/// Any other read or validation failure is still an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        log::info!(
            "No config file at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }
    load_config(path)
}

/// Platform config location, e.g. `~/.config/urban-feedback/config.json` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != "1.0" {
        return Err(ConfigError::validation(format!(
            "Unsupported config version: {}",
            config.version
        )));
    }

    let classifier = &config.classifier;
    if !(0.0..=1.0).contains(&classifier.min_confidence)
        || !(0.0..=1.0).contains(&classifier.max_confidence)
    {
        return Err(ConfigError::validation(
            "Classifier confidence bounds must lie within [0, 1]",
        ));
    }
    if classifier.min_confidence > classifier.max_confidence {
        return Err(ConfigError::validation(format!(
            "Classifier min_confidence {} exceeds max_confidence {}",
            classifier.min_confidence, classifier.max_confidence
        )));
    }

    if IncidentCategory::find(&config.pipeline.default_category).is_none() {
        return Err(ConfigError::validation(format!(
            "Unknown default category '{}'",
            config.pipeline.default_category
        )));
    }
    if config.pipeline.undetermined_address.trim().is_empty() {
        return Err(ConfigError::validation(
            "pipeline.undetermined_address must not be empty",
        ));
    }

    if config.location.timeout_ms == 0 {
        return Err(ConfigError::validation("location.timeout_ms must be > 0"));
    }

    let geocoding = &config.geocoding;
    if geocoding.timeout_ms == 0 {
        return Err(ConfigError::validation("geocoding.timeout_ms must be > 0"));
    }
    if geocoding.max_segments == 0 {
        return Err(ConfigError::validation(
            "geocoding.max_segments must be at least 1",
        ));
    }
    if !(geocoding.endpoint.starts_with("http://") || geocoding.endpoint.starts_with("https://"))
    {
        return Err(ConfigError::validation(format!(
            "geocoding.endpoint must be an http(s) URL: {}",
            geocoding.endpoint
        )));
    }
    if geocoding.user_agent.trim().is_empty() {
        return Err(ConfigError::validation(
            "geocoding.user_agent must identify the client",
        ));
    }

    if config.progress.channel_capacity == 0 {
        return Err(ConfigError::validation(
            "progress.channel_capacity must be > 0",
        ));
    }

    Ok(())
}

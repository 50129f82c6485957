use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            pipeline: PipelineSettings::default(),
            classifier: ClassifierConfig::default(),
            location: LocationConfig::default(),
            geocoding: GeocodingConfig::default(),
            logging: LoggingConfig::default(),
            progress: ProgressConfig::default(),
        }
    }
}

/// Orchestrator timings and the values used for degraded runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default = "default_upload_delay_ms")]
    pub upload_delay_ms: u64,
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
    /// Catalog id of the category reported when a run degrades.
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_undetermined_address")]
    pub undetermined_address: String,
}

fn default_upload_delay_ms() -> u64 {
    800
}

fn default_reset_delay_ms() -> u64 {
    2000
}

fn default_category() -> String {
    "pothole".to_string()
}

fn default_undetermined_address() -> String {
    "location undetermined".to_string()
}

impl PipelineSettings {
    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            upload_delay_ms: default_upload_delay_ms(),
            reset_delay_ms: default_reset_delay_ms(),
            default_category: default_category(),
            undetermined_address: default_undetermined_address(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    #[serde(default = "default_max_confidence")]
    pub max_confidence: f32,
}

fn default_latency_ms() -> u64 {
    2500
}

fn default_min_confidence() -> f32 {
    0.85
}

fn default_max_confidence() -> f32 {
    0.95
}

impl ClassifierConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            min_confidence: default_min_confidence(),
            max_confidence: default_max_confidence(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_true")]
    pub high_accuracy: bool,
    #[serde(default = "default_location_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_location_timeout_ms() -> u64 {
    10_000
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: default_location_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_geocode_timeout_ms")]
    pub timeout_ms: u64,
    /// Number of leading comma-separated segments kept from `display_name`.
    #[serde(default = "default_max_segments")]
    pub max_segments: usize,
}

fn default_endpoint() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_user_agent() -> String {
    "UrbanFeedback/1.0".to_string()
}

fn default_zoom() -> u8 {
    18
}

fn default_geocode_timeout_ms() -> u64 {
    8000
}

fn default_max_segments() -> usize {
    3
}

impl GeocodingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_agent: default_user_agent(),
            zoom: default_zoom(),
            timeout_ms: default_geocode_timeout_ms(),
            max_segments: default_max_segments(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    100
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

use crate::types::Edge;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const MAX_SAMPLE_INTERVAL_MS: u64 = 10_000;
const MAX_SHOW_DELAY_MS: u64 = 60_000;
const MAX_ANIMATION_MS: u64 = 10_000;
const MAX_VALIDATION_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

/// User-facing shelf configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub trigger: TriggerConfig,
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> std::path::PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !is_positive(self.trigger.trigger_band_px) {
            errors.push("trigger_band_px must be greater than 0".to_string());
        }

        if !is_non_negative(self.trigger.retreat_margin_px) {
            errors.push("retreat_margin_px must not be negative".to_string());
        }

        if !(1..=MAX_SAMPLE_INTERVAL_MS).contains(&self.trigger.sample_interval_ms) {
            errors.push(format!("sample_interval_ms must be between 1 and {MAX_SAMPLE_INTERVAL_MS}"));
        }

        if self.trigger.show_delay_ms > MAX_SHOW_DELAY_MS {
            errors.push(format!("show_delay_ms must be at most {MAX_SHOW_DELAY_MS}"));
        }

        if !is_positive(self.panel.width_px) {
            errors.push("width_px must be greater than 0".to_string());
        }

        if !is_non_negative(self.panel.bottom_margin_px) {
            errors.push("bottom_margin_px must not be negative".to_string());
        }

        if self.panel.animation_ms > MAX_ANIMATION_MS {
            errors.push(format!("animation_ms must be at most {MAX_ANIMATION_MS}"));
        }

        if self.panel.width_px + self.trigger.retreat_margin_px <= self.trigger.trigger_band_px {
            errors.push("retreat zone must start further from the edge than the trigger band".to_string());
        }

        if !(1..=MAX_VALIDATION_INTERVAL_SECS).contains(&self.store.validation_interval_secs) {
            errors.push(format!(
                "validation_interval_secs must be between 1 and {MAX_VALIDATION_INTERVAL_SECS}"
            ));
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        let mut config = self.clone();

        if !is_positive(config.trigger.trigger_band_px) {
            config.trigger.trigger_band_px = defaults.trigger.trigger_band_px;
        }
        if !is_non_negative(config.trigger.retreat_margin_px) {
            config.trigger.retreat_margin_px = defaults.trigger.retreat_margin_px;
        }
        if !(1..=MAX_SAMPLE_INTERVAL_MS).contains(&config.trigger.sample_interval_ms) {
            config.trigger.sample_interval_ms = defaults.trigger.sample_interval_ms;
        }
        if config.trigger.show_delay_ms > MAX_SHOW_DELAY_MS {
            config.trigger.show_delay_ms = defaults.trigger.show_delay_ms;
        }
        if !is_positive(config.panel.width_px) {
            config.panel.width_px = defaults.panel.width_px;
        }
        if !is_non_negative(config.panel.bottom_margin_px) {
            config.panel.bottom_margin_px = defaults.panel.bottom_margin_px;
        }
        if config.panel.animation_ms > MAX_ANIMATION_MS {
            config.panel.animation_ms = defaults.panel.animation_ms;
        }
        if config.panel.width_px + config.trigger.retreat_margin_px <= config.trigger.trigger_band_px {
            config.trigger.trigger_band_px = defaults.trigger.trigger_band_px;
            config.trigger.retreat_margin_px = defaults.trigger.retreat_margin_px;
            config.panel.width_px = defaults.panel.width_px;
        }
        if !(1..=MAX_VALIDATION_INTERVAL_SECS).contains(&config.store.validation_interval_secs) {
            config.store.validation_interval_secs = defaults.store.validation_interval_secs;
        }

        config
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.trigger.sample_interval_ms)
    }

    pub fn validation_interval(&self) -> Duration {
        Duration::from_secs(self.store.validation_interval_secs)
    }
}

/// Edge detection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(default)]
    pub edge: Edge,
    #[serde(default = "default_trigger_band_px")]
    pub trigger_band_px: f64,
    #[serde(default = "default_retreat_margin_px")]
    pub retreat_margin_px: f64,
    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u64,
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            edge: Edge::default(),
            trigger_band_px: default_trigger_band_px(),
            retreat_margin_px: default_retreat_margin_px(),
            show_delay_ms: default_show_delay_ms(),
            sample_interval_ms: default_sample_interval_ms(),
        }
    }
}

/// Panel placement settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    #[serde(default = "default_width_px")]
    pub width_px: f64,
    #[serde(default = "default_bottom_margin_px")]
    pub bottom_margin_px: f64,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width_px: default_width_px(),
            bottom_margin_px: default_bottom_margin_px(),
            animation_ms: default_animation_ms(),
        }
    }
}

/// Reference store maintenance settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_validation_interval_secs")]
    pub validation_interval_secs: u64,
    #[serde(default = "default_true")]
    pub validate_on_load: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            validation_interval_secs: default_validation_interval_secs(),
            validate_on_load: true,
        }
    }
}

fn default_trigger_band_px() -> f64 {
    1.0
}

fn default_retreat_margin_px() -> f64 {
    5.0
}

fn default_show_delay_ms() -> u64 {
    600
}

fn default_sample_interval_ms() -> u64 {
    100
}

fn default_width_px() -> f64 {
    200.0
}

fn default_bottom_margin_px() -> f64 {
    10.0
}

fn default_animation_ms() -> u64 {
    300
}

fn default_validation_interval_secs() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}

fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

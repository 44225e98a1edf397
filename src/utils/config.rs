use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::algorithms::geodesy::DistanceModel;
use crate::algorithms::trip::TripParameters;
use crate::core::constants::{LOCATION_INTERVAL_MS, MIN_UPDATES, SPEED_THRESHOLD_KMH};

/// Engine-wide configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Speed (km/h) a fix must exceed to count as motion
    pub speed_threshold_kmh: f64,
    /// Fixes discarded after motion starts
    pub min_updates: u32,
    /// Interval requested from the location provider (milliseconds)
    pub location_interval_ms: u64,
    /// Earth model for distances and bearings
    pub distance_model: DistanceModel,
    /// Reject fixes with out-of-range coordinates or speed
    pub validate_fixes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            speed_threshold_kmh: SPEED_THRESHOLD_KMH,
            min_updates: MIN_UPDATES,
            location_interval_ms: LOCATION_INTERVAL_MS,
            distance_model: DistanceModel::default(),
            validate_fixes: false,
        }
    }
}

impl EngineConfig {
    pub fn trip_parameters(&self) -> TripParameters {
        TripParameters {
            speed_threshold_kmh: self.speed_threshold_kmh,
            min_updates: self.min_updates,
            distance_model: self.distance_model,
        }
    }
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },
    #[error("I/O error: {message}")]
    Io { message: String },
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    /// Values that are legal but probably unintended
    pub warnings: Vec<String>,
}

/// Owns the engine configuration and its backing file
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: EngineConfig,
    config_file_path: Option<String>,
    is_modified: bool,
    /// Warnings raised by the last validated configuration
    warnings: Vec<String>,
}

impl ConfigurationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        self.warnings = Self::check(Self::validate_config(&config))?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            message: format!("failed to read config file '{}': {}", path_str, e),
        })?;

        let config: EngineConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Serialization {
            message: format!("failed to parse config file '{}': {}", path_str, e),
        })?;

        self.warnings = Self::check(Self::validate_config(&config))?;

        debug!(path = %path_str, "loaded engine configuration");
        self.config = config;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::Serialization {
            message: format!("failed to serialize config: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::Io {
            message: format!("failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if let Some(path) = self.config_file_path.clone() {
            self.save_to_file(path)
        } else {
            Err(ConfigError::Io {
                message: "no file path set for saving configuration".to_string(),
            })
        }
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Update the speed threshold, returning the previous value
    pub fn set_speed_threshold(&mut self, threshold_kmh: f64) -> Result<f64, ConfigError> {
        if !threshold_kmh.is_finite() || threshold_kmh < 0.0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "speed_threshold_kmh".to_string(),
                value: threshold_kmh.to_string(),
                reason: "must be a finite, non-negative speed".to_string(),
            });
        }
        let old_value = self.config.speed_threshold_kmh;
        self.config.speed_threshold_kmh = threshold_kmh;
        self.is_modified = true;
        Ok(old_value)
    }

    /// Update the warm-up length, returning the previous value
    pub fn set_min_updates(&mut self, min_updates: u32) -> u32 {
        let old_value = self.config.min_updates;
        self.config.min_updates = min_updates;
        self.is_modified = true;
        old_value
    }

    /// Update the provider interval, returning the previous value
    pub fn set_location_interval(&mut self, interval_ms: u64) -> Result<u64, ConfigError> {
        if interval_ms == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "location_interval_ms".to_string(),
                value: interval_ms.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        let old_value = self.config.location_interval_ms;
        self.config.location_interval_ms = interval_ms;
        self.is_modified = true;
        Ok(old_value)
    }

    pub fn set_distance_model(&mut self, model: DistanceModel) -> DistanceModel {
        let old_value = self.config.distance_model;
        self.config.distance_model = model;
        self.is_modified = true;
        old_value
    }

    pub fn set_validate_fixes(&mut self, enabled: bool) -> bool {
        let old_value = self.config.validate_fixes;
        self.config.validate_fixes = enabled;
        self.is_modified = true;
        old_value
    }

    pub fn validate_config(config: &EngineConfig) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !config.speed_threshold_kmh.is_finite() || config.speed_threshold_kmh < 0.0 {
            result.errors.push(ConfigError::InvalidParameter {
                parameter: "speed_threshold_kmh".to_string(),
                value: config.speed_threshold_kmh.to_string(),
                reason: "must be a finite, non-negative speed".to_string(),
            });
        } else if config.speed_threshold_kmh > 50.0 {
            result.warnings.push(format!(
                "speed threshold of {} km/h ignores most urban driving",
                config.speed_threshold_kmh
            ));
        }

        if config.location_interval_ms == 0 {
            result.errors.push(ConfigError::InvalidParameter {
                parameter: "location_interval_ms".to_string(),
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if config.min_updates == 0 {
            result
                .warnings
                .push("min_updates is 0, the first fast fix starts measurement".to_string());
        }

        result.is_valid = result.errors.is_empty();
        result
    }

    /// Warnings from the last configuration passed to `update_config` or loaded from file
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Fail on the first error, otherwise log and return the warnings
    fn check(validation: ValidationResult) -> Result<Vec<String>, ConfigError> {
        if let Some(error) = validation.errors.into_iter().next() {
            return Err(error);
        }
        for warning in &validation.warnings {
            warn!("configuration: {}", warning);
        }
        Ok(validation.warnings)
    }
}

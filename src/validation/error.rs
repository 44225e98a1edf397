//! Error types for the kinematics engine

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::config::ConfigError;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum KinematicsError {
    /// Latitude or longitude is NaN or outside the WGS84 range
    #[error("invalid {field}: {value}")]
    InvalidCoordinate {
        /// Which coordinate was rejected
        field: &'static str,
        value: f64,
    },

    /// Speed is NaN, infinite or negative
    #[error("invalid speed: {value} m/s")]
    InvalidSpeed { value: f32 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The location provider could not deliver fixes
    #[error("location provider failed: {message}")]
    Provider { message: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KinematicsError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Whether the error concerns a single fix, so the stream can continue
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            KinematicsError::InvalidCoordinate { .. } | KinematicsError::InvalidSpeed { .. }
        )
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, KinematicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KinematicsError::InvalidCoordinate {
            field: "latitude",
            value: 91.0,
        };
        assert_eq!(err.to_string(), "invalid latitude: 91");
        assert!(err.is_input_error());

        let err = KinematicsError::provider("track exhausted");
        assert_eq!(err.to_string(), "location provider failed: track exhausted");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: KinematicsError = ConfigError::InvalidParameter {
            parameter: "min_updates".to_string(),
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "invalid parameter 'min_updates' = '0': must be positive");
    }
}

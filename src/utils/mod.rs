//! Configuration and persisted settings

pub mod config;
pub mod settings;

pub use config::{ConfigError, ConfigurationManager, EngineConfig};
pub use settings::{ChimeSettings, NoteRecord, SettingsStore};

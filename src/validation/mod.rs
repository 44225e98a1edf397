//! Input validation and error types

pub mod data;
pub mod error;

pub use data::{validate_fix, validate_point};
pub use error::{KinematicsError, Result};

//! Error types for scale configuration and drawability checks.
//!
//! Auto-ranging and the transforms never fail; they substitute safe values
//! instead. These errors only come from explicit checks.

use thiserror::Error;

/// Errors reported by configuration loading and [`ScaleSpec::check_drawable`](crate::ScaleSpec::check_drawable).
#[derive(Error, Debug)]
pub enum ScaleError {
    /// Defaults failed validation
    #[error("Invalid scale configuration: {0}")]
    InvalidConfig(String),

    /// Defaults document could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Range is empty or inverted
    #[error("Empty scale range: min {min} is not below max {max}")]
    EmptyRange { min: f64, max: f64 },

    /// Major step cannot produce ticks
    #[error("Non-positive major step: {0}")]
    NonPositiveStep(f64),

    /// Logarithmic scale bound outside the log domain
    #[error("Non-positive logarithmic bound: {0}")]
    NonPositiveLogBound(f64),
}

/// Result type for scale operations
pub type Result<T> = std::result::Result<T, ScaleError>;

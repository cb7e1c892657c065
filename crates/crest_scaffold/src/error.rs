//! Error types for crest_scaffold

use thiserror::Error;

/// Errors that can occur configuring or restoring a scaffold
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScaffoldError {
    /// The measurement pass produced inverted toolbar bounds
    #[error("invalid toolbar bounds: min_height {min_height} > max_height {max_height}")]
    InvalidBounds { min_height: f32, max_height: f32 },

    /// A snapshot named a scroll strategy this crate does not know
    #[error("unknown scroll strategy: {0:?}")]
    UnknownStrategy(String),

    /// A snap threshold fell outside the valid [0, 1] progress range
    #[error("snap threshold {name} = {value} is outside [0, 1]")]
    InvalidSnapThreshold { name: &'static str, value: f32 },
}

/// Result type for crest_scaffold operations
pub type Result<T> = std::result::Result<T, ScaffoldError>;

//! Error taxonomy for the production decision engine
//!
//! Two failure families, raised at different stages:
//! - [`ConfigError`]: malformed sampling configuration, rejected before any
//!   sampling occurs.
//! - [`ValidationError`]: a condition or market value violates a documented
//!   domain constraint, rejected before any revenue/cost arithmetic.
//!
//! All engine operations are pure and deterministic, so errors are never
//! retried; they propagate to the immediate caller.

use thiserror::Error;

/// Sampling configuration errors, raised before any sampling occurs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid range for {attribute}: min {min} exceeds max {max}")]
    InvalidRange {
        attribute: &'static str,
        min: f64,
        max: f64,
    },

    #[error("unrecognized distribution for {attribute}: {detail}")]
    UnknownDistribution {
        attribute: &'static str,
        detail: String,
    },

    #[error("non-finite bound for {attribute}")]
    NonFiniteBound { attribute: &'static str },
}

/// Domain constraint violations, raised by constructors and calculators
/// before computing revenue/cost
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("cane yield must be positive, got {0} t/ha")]
    NonPositiveYield(f64),

    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("harvest month must be 1-12, got {0}")]
    InvalidMonth(u8),
}

/// Umbrella error for callers crossing both stages (engine, generator)
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

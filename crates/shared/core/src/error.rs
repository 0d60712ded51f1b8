use thiserror::Error;

use crate::values::Wad;

/// Errors raised when validating reactor configuration and fee parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required identifier is empty or two identifiers collide
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{name} must be below 100% (got {value})")]
    FeeTooHigh { name: &'static str, value: Wad },

    #[error("Target reserve ratio must be at least 100% (got {0})")]
    RatioTooLow(Wad),

    #[error("Fee curve parameter {name} must not exceed 100% (got {value})")]
    CurveParamTooHigh { name: &'static str, value: Wad },

    #[error("Reserve asset has {0} decimals; at most 18 are supported")]
    UnsupportedDecimals(u8),

    #[error("Collaborator mismatch: {0}")]
    CollaboratorMismatch(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

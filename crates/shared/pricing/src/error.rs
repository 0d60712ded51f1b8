use reactor_core::{ConfigError, MathError};
use reactor_ports::OracleError;
use thiserror::Error;

/// Errors raised while reading and normalizing prices
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type PricingResult<T> = std::result::Result<T, PricingError>;

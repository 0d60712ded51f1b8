use reactor_core::{AccountId, AssetId, ConfigError, MathError};
use reactor_ports::{OracleError, TransferError};
use reactor_pricing::PricingError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReactorError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Stale price: {age_secs}s old, max {max_age_secs}s")]
    StalePrice { age_secs: u64, max_age_secs: u64 },

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Insufficient supply: {0}")]
    InsufficientSupply(String),

    #[error("Reserve is empty")]
    EmptyReserve,

    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(#[from] MathError),

    #[error("Transfer of {asset} failed: {source}")]
    TransferFailed {
        asset: AssetId,
        #[source]
        source: TransferError,
    },

    #[error("Reentrant call rejected")]
    ReentrancyViolation,

    #[error("{0} is not authorized")]
    Unauthorized(AccountId),

    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(#[source] OracleError),
}

impl ReactorError {
    /// Whether resubmitting the same call later can succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ReactorError::StalePrice { .. }
                | ReactorError::ReentrancyViolation
                | ReactorError::OracleUnavailable(_)
                | ReactorError::TransferFailed { .. }
        )
    }

    /// Stable short reason, used for counting failures
    pub fn kind(&self) -> &'static str {
        match self {
            ReactorError::InvalidArgument(_) => "invalid_argument",
            ReactorError::Configuration(_) => "configuration",
            ReactorError::StalePrice { .. } => "stale_price",
            ReactorError::InvalidPrice(_) => "invalid_price",
            ReactorError::InsufficientSupply(_) => "insufficient_supply",
            ReactorError::EmptyReserve => "empty_reserve",
            ReactorError::ArithmeticOverflow(_) => "arithmetic_overflow",
            ReactorError::TransferFailed { .. } => "transfer_failed",
            ReactorError::ReentrancyViolation => "reentrancy_violation",
            ReactorError::Unauthorized(_) => "unauthorized",
            ReactorError::OracleUnavailable(_) => "oracle_unavailable",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReactorError>;

impl From<OracleError> for ReactorError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::StalePrice {
                age_secs,
                max_age_secs,
                ..
            } => ReactorError::StalePrice {
                age_secs,
                max_age_secs,
            },
            other => ReactorError::OracleUnavailable(other),
        }
    }
}

impl From<PricingError> for ReactorError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidPrice(msg) => ReactorError::InvalidPrice(msg),
            PricingError::Oracle(e) => e.into(),
            PricingError::Math(e) => ReactorError::ArithmeticOverflow(e),
            PricingError::Config(e) => ReactorError::Configuration(e),
        }
    }
}

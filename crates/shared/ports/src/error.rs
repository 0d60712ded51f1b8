use reactor_core::{AccountId, Amount, FeedId};
use thiserror::Error;

/// Failures reported by a price oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("No price available for feed {0}")]
    FeedNotFound(FeedId),

    #[error("Price for {feed} is {age_secs}s old (max {max_age_secs}s)")]
    StalePrice {
        feed: FeedId,
        age_secs: u64,
        max_age_secs: u64,
    },

    #[error("Malformed price update: {0}")]
    InvalidPayload(String),

    #[error("Update fee underpaid: required {required}, paid {paid}")]
    InsufficientFee { required: Amount, paid: Amount },

    #[error("Price update rejected: {0}")]
    Rejected(String),
}

pub type OracleResult<T> = std::result::Result<T, OracleError>;

/// Failures reported by a fungible-asset ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        account: AccountId,
        required: Amount,
        available: Amount,
    },

    #[error(
        "Insufficient allowance from {owner} to {spender}: required {required}, available {available}"
    )]
    InsufficientAllowance {
        owner: AccountId,
        spender: AccountId,
        required: Amount,
        available: Amount,
    },

    #[error("{0} is not allowed to mint or burn")]
    Unauthorized(AccountId),

    #[error("Invalid account: {0:?}")]
    InvalidAccount(AccountId),

    #[error("Supply or balance overflow")]
    Overflow,

    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

pub type TransferResult<T> = std::result::Result<T, TransferError>;

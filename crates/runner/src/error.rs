use reactor_core::{ConfigError, MathError};
use reactor_engine::ReactorError;
use reactor_ports::{OracleError, TransferError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Math(#[from] MathError),

    #[error("Reactor error: {0}")]
    Reactor(#[from] ReactorError),

    #[error("Ledger error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Notification task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, RunnerError>;

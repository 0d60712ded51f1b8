// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::{Reactor, ReactorCollaborators};
pub use error::{ReactorError, Result};
pub use infrastructure::{InMemoryLedger, ManualOracle, PricePayload};
pub use model::ReactorEvent;

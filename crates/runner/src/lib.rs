//! Reactor Runner - Multi-Agent Reactor Simulation
//!
//! Drives a reserve reactor with simulated participants:
//!
//! - **Settings**: operator-facing decimals converted to WAD configuration
//! - **Bootstrap**: ledgers, oracle, manual clock, reactor and funded agents
//! - **Price Feed**: seeded random walk published as oracle updates
//! - **Agents**: seeded actors choosing fission, fusion or transmutation
//! - **Simulation**: the tick loop and result collection
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐  update_price   ┌──────────────────┐
//!   │  Price Feed  │ ──────────────▶ │                  │
//!   └──────────────┘                 │     Reactor      │ ──▶ ledgers
//!   ┌──────────────┐  operations     │                  │
//!   │   Agents     │ ──────────────▶ │                  │
//!   └──────────────┘                 └────────┬─────────┘
//!                                             │ notifications
//!                                             ▼
//!                                    ┌──────────────────┐
//!                                    │    Processor     │
//!                                    └──────────────────┘
//! ```

pub mod agent;
pub mod bootstrap;
pub mod error;
pub mod price_feed;
pub mod settings;
pub mod simulation;

// Re-export main types
pub use agent::{AgentAction, AgentTurn, Holdings, SimAgent};
pub use bootstrap::{AgentAccount, SimulationBootstrap};
pub use error::{Result, RunnerError};
pub use price_feed::{PriceFeedConfig, PriceFeedSimulator};
pub use settings::{FeeCurveSettings, ReactorSettings};
pub use simulation::{ReactorSimulation, SimulationConfig, SimulationResults};

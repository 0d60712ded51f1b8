//! Simulation - Full reactor orchestration
//!
//! Ties together:
//! - Bootstrap (ledgers, oracle, reactor, funded agents)
//! - Price feed (keeper posts a fresh oracle update every few ticks)
//! - Seeded agents acting once per tick
//! - Notification processor counting committed operations

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info, warn};
use reactor_clock::Clock;
use reactor_core::math::wad_from_decimal;
use reactor_core::{Amount, ReserveHealth, SignedWad, Supplies, Wad};
use reactor_engine::ReactorEvent;
use reactor_ports::FungibleLedger;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::agent::{Holdings, SimAgent};
use crate::bootstrap::{AgentAccount, SimulationBootstrap};
use crate::error::Result;
use crate::price_feed::{PriceFeedConfig, PriceFeedSimulator};
use crate::settings::ReactorSettings;

/// Environment variable naming a configuration file
pub const CONFIG_ENV_VAR: &str = "REACTOR_SIM_CONFIG";

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub reactor: ReactorSettings,
    pub price_feed: PriceFeedConfig,
    pub agents: Vec<AgentAccount>,
    /// Number of ticks to run
    pub ticks: u64,
    /// Simulated seconds per tick
    pub tick_secs: i64,
    /// Post an oracle update every this many ticks (0 = never)
    pub price_update_every: u64,
    /// Payment attached to each oracle update, raw units
    pub oracle_fee: Amount,
    /// Largest share of a balance an agent uses in one turn
    pub max_trade_fraction: Decimal,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            reactor: ReactorSettings::default(),
            price_feed: PriceFeedConfig::default(),
            agents: vec![
                AgentAccount::new("alice", dec!(100), dec!(0.5)),
                AgentAccount::new("bob", dec!(50), dec!(0.5)),
                AgentAccount::new("carol", dec!(20), dec!(0)),
            ],
            ticks: 500,
            tick_secs: 12,
            price_update_every: 1,
            oracle_fee: 100,
            max_trade_fraction: dec!(0.2),
            seed: 42,
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load from `path`, else from [`CONFIG_ENV_VAR`], else defaults
    ///
    /// A file that cannot be read or parsed is reported and replaced by the
    /// defaults.
    pub fn load(path: Option<String>) -> Self {
        let Some(path) = path.or_else(|| std::env::var(CONFIG_ENV_VAR).ok()) else {
            info!("No configuration given, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path);
                config
            }
            Err(e) => {
                warn!("Could not load configuration from {}: {}; using defaults", path, e);
                Self::default()
            }
        }
    }
}

/// Simulation results
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationResults {
    pub ticks: u64,
    /// Committed operations by kind, as notified by the reactor
    pub operations: BTreeMap<String, u64>,
    /// Rejected calls by error kind
    pub failures: BTreeMap<String, u64>,
    /// Agent turns with nothing to trade
    pub skipped_turns: u64,
    /// Reserve paid to the treasury, raw units
    pub treasury_fees: Amount,
    pub oracle_fees: Amount,
    pub final_price: Decimal,
    pub final_reserve: Amount,
    pub final_supplies: Supplies,
    /// `None` while no stable token is outstanding
    pub final_reserve_ratio: Option<Wad>,
    pub final_health: Option<ReserveHealth>,
    pub final_decayed_volume: SignedWad,
    pub success: bool,
}

/// Full reactor simulation
pub struct ReactorSimulation {
    config: SimulationConfig,
    bootstrap: SimulationBootstrap,
    feed: PriceFeedSimulator,
    agents: Vec<SimAgent>,
}

impl ReactorSimulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let bootstrap = SimulationBootstrap::new(
            &config.reactor,
            &config.price_feed,
            &config.agents,
            config.oracle_fee,
        )?;

        let feed = PriceFeedSimulator::with_seed(
            bootstrap.reactor.config().price_feed.clone(),
            config.price_feed.clone(),
            config.seed,
        );

        let max_fraction = wad_from_decimal(config.max_trade_fraction)?;
        let agents = bootstrap
            .agents
            .iter()
            .zip(1u64..)
            .map(|(id, n)| SimAgent::new(id.clone(), max_fraction, config.seed.wrapping_add(n)))
            .collect();

        Ok(Self {
            config,
            bootstrap,
            feed,
            agents,
        })
    }

    pub fn bootstrap(&self) -> &SimulationBootstrap {
        &self.bootstrap
    }

    /// Count notifications until the reactor is dropped
    async fn run_event_processor(
        mut events: UnboundedReceiver<ReactorEvent>,
    ) -> BTreeMap<String, u64> {
        info!("Notification processor started");
        let mut counts = BTreeMap::new();

        while let Some(event) = events.recv().await {
            debug!("[{}] {}", event.timestamp(), event.kind());
            *counts.entry(event.kind().to_string()).or_insert(0) += 1;
        }

        info!("Notification processor stopped");
        counts
    }

    /// Run the full simulation
    pub async fn run(self) -> Result<SimulationResults> {
        let Self {
            config,
            bootstrap,
            mut feed,
            mut agents,
        } = self;
        let SimulationBootstrap {
            reactor,
            reserve,
            stable,
            volatile,
            oracle,
            clock,
            events,
            ..
        } = bootstrap;

        info!(
            "Starting reactor simulation: {} agents, {} ticks of {}s",
            agents.len(),
            config.ticks,
            config.tick_secs
        );
        let processor = tokio::spawn(Self::run_event_processor(events));

        let holdings = Holdings {
            reserve: reserve.as_ref(),
            stable: stable.as_ref(),
            volatile: volatile.as_ref(),
        };
        let keeper = reactor.config().treasury.clone();
        let mut results = SimulationResults::default();

        for tick in 1..=config.ticks {
            clock.advance_secs(config.tick_secs);

            if config.price_update_every > 0 && tick % config.price_update_every == 0 {
                let update = feed.next_update(clock.now(), config.oracle_fee)?;
                if let Err(e) = reactor.update_price(&keeper, &update) {
                    warn!("Tick {}: price update rejected: {}", tick, e);
                    *results.failures.entry(e.kind().to_string()).or_insert(0) += 1;
                }
            }

            for agent in agents.iter_mut() {
                match agent.act(&reactor, &holdings) {
                    None => results.skipped_turns += 1,
                    Some(turn) => {
                        if let Err(e) = turn.result {
                            debug!(
                                "Tick {}: {} {} of {} failed: {}",
                                tick,
                                turn.agent,
                                turn.action.name(),
                                turn.amount,
                                e
                            );
                            *results.failures.entry(e.kind().to_string()).or_insert(0) += 1;
                        }
                    }
                }
            }

            if tick % 100 == 0 {
                info!(
                    "Tick {}: price {} health {:?}",
                    tick,
                    feed.price(),
                    reactor.reserve_health()
                );
            }
        }

        let supplies = reactor.supplies()?;
        results.ticks = config.ticks;
        results.final_supplies = supplies;
        results.final_price = feed.price();
        results.final_reserve = reactor.reserve_balance()?;
        if supplies.stable > 0 {
            results.final_reserve_ratio = Some(reactor.reserve_ratio()?);
            results.final_health = Some(reactor.reserve_health()?);
        }
        results.final_decayed_volume = reactor.decayed_volume()?;
        results.treasury_fees = reserve.balance_of(&keeper);
        results.oracle_fees = oracle.fees_collected();

        // Dropping the reactor closes the notification channel
        drop(reactor);
        results.operations = processor.await?;
        results.success = true;

        info!(
            "Simulation finished: {} operations, {} failures",
            results.operations.values().sum::<u64>(),
            results.failures.values().sum::<u64>()
        );
        Ok(results)
    }
}

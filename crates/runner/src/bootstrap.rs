//! Bootstrap - Ledgers, oracle, clock and reactor for a simulation
//!
//! Handles initial setup:
//! - Creating the reserve ledger and both issued tokens
//! - Publishing the first oracle price
//! - Constructing the reactor and installing the fee curve
//! - Funding agents and seeding the reactor with their first fission

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use log::info;
use reactor_clock::{Clock, ManualClock};
use reactor_core::math::pow10;
use reactor_core::{AccountId, Amount, FeeCurveParams, Timestamp};
use reactor_engine::{InMemoryLedger, ManualOracle, Reactor, ReactorCollaborators, ReactorEvent};
use reactor_ports::FungibleLedger;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::agent::Holdings;
use crate::error::{Result, RunnerError};
use crate::price_feed::{PriceFeedConfig, to_quote};
use crate::settings::ReactorSettings;

/// Account the reactor holds reserve under
pub const REACTOR_ACCOUNT: &str = "reactor";

/// Agent funding configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentAccount {
    pub agent_id: String,
    /// Reserve deposited before the run, in whole reserve units
    pub initial_reserve: Decimal,
    /// Share of the initial reserve split into tokens during bootstrap
    pub seed_fission: Decimal,
}

impl AgentAccount {
    pub fn new(agent_id: &str, initial_reserve: Decimal, seed_fission: Decimal) -> Self {
        Self {
            agent_id: agent_id.to_string(),
            initial_reserve,
            seed_fission,
        }
    }
}

/// Everything the simulation drives
pub struct SimulationBootstrap {
    pub reactor: Reactor,
    pub reserve: Arc<InMemoryLedger>,
    pub stable: Arc<InMemoryLedger>,
    pub volatile: Arc<InMemoryLedger>,
    pub oracle: Arc<ManualOracle>,
    pub clock: ManualClock,
    pub events: UnboundedReceiver<ReactorEvent>,
    pub agents: Vec<AccountId>,
    pub fee_curve: FeeCurveParams,
}

impl SimulationBootstrap {
    pub fn new(
        settings: &ReactorSettings,
        price: &PriceFeedConfig,
        agents: &[AgentAccount],
        oracle_fee: Amount,
    ) -> Result<Self> {
        let config = settings.to_config()?;
        let fee_curve = settings.fee_curve.to_params()?;
        let reactor_id = AccountId::new(REACTOR_ACCOUNT);

        let reserve = Arc::new(InMemoryLedger::new(
            config.reserve_asset.clone(),
            settings.reserve_decimals,
        ));
        let stable = Arc::new(
            InMemoryLedger::new(config.stable_token.clone(), 18).with_minter(reactor_id.clone()),
        );
        let volatile = Arc::new(
            InMemoryLedger::new(config.volatile_token.clone(), 18).with_minter(reactor_id.clone()),
        );

        let clock = ManualClock::starting_at(genesis());
        let oracle = Arc::new(ManualOracle::new().with_update_fee(oracle_fee));
        oracle.set_price(&config.price_feed, to_quote(price.initial_price, clock.now())?);

        let treasury = config.treasury.clone();
        let (tx, events) = unbounded_channel();
        let reactor = Reactor::new(
            reactor_id,
            config,
            ReactorCollaborators {
                reserve: reserve.clone(),
                stable: stable.clone(),
                volatile: volatile.clone(),
                oracle: oracle.clone(),
                clock: Arc::new(clock.clone()),
            },
        )?
        .with_event_sender(tx);
        reactor.set_fee_curve(&treasury, fee_curve)?;

        let unit = pow10(u32::from(settings.reserve_decimals))?;
        let mut ids = Vec::with_capacity(agents.len());
        for agent in agents {
            let id = AccountId::new(agent.agent_id.as_str());
            let funding = to_raw(agent.initial_reserve, unit)?;
            reserve.deposit(&id, funding)?;
            reserve.approve(&id, reactor.account(), Amount::MAX);

            let seed = to_raw(agent.initial_reserve * agent.seed_fission, unit)?;
            if seed > 0 {
                reactor.fission(&id, seed, &id, None)?;
            }

            info!(
                "Funded agent '{}' with {} {} (seeded {} into fission)",
                id,
                agent.initial_reserve,
                reserve.asset_id(),
                seed
            );
            ids.push(id);
        }

        Ok(Self {
            reactor,
            reserve,
            stable,
            volatile,
            oracle,
            clock,
            events,
            agents: ids,
            fee_curve,
        })
    }

    pub fn holdings(&self) -> Holdings<'_> {
        Holdings {
            reserve: self.reserve.as_ref(),
            stable: self.stable.as_ref(),
            volatile: self.volatile.as_ref(),
        }
    }
}

/// Fixed start time so runs are reproducible
fn genesis() -> Timestamp {
    Utc.timestamp_opt(1_700_000_000, 0)
        .single()
        .unwrap_or_default()
}

/// Whole units to raw ledger units, truncating
fn to_raw(units: Decimal, unit: Amount) -> Result<Amount> {
    let out_of_range = || RunnerError::Settings(format!("amount {} out of range", units));
    if units.is_sign_negative() {
        return Err(RunnerError::Settings(format!(
            "amount must not be negative, got {}",
            units
        )));
    }

    let whole = units.trunc();
    let unit_dec =
        Decimal::from_i128_with_scale(i128::try_from(unit).map_err(|_| out_of_range())?, 0);
    let fraction_raw = ((units - whole) * unit_dec).trunc();

    let whole = u128::try_from(whole.mantissa()).map_err(|_| out_of_range())?;
    let fraction_raw = u128::try_from(fraction_raw.mantissa()).map_err(|_| out_of_range())?;
    whole
        .checked_mul(unit)
        .and_then(|w| w.checked_add(fraction_raw))
        .ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_core::{Supplies, WAD};
    use rust_decimal_macros::dec;

    fn agents() -> Vec<AgentAccount> {
        vec![
            AgentAccount::new("alice", dec!(10), dec!(0.5)),
            AgentAccount::new("bob", dec!(4), dec!(0)),
        ]
    }

    #[test]
    fn test_bootstrap_funds_and_seeds() {
        let mut boot = SimulationBootstrap::new(
            &ReactorSettings::default(),
            &PriceFeedConfig::default(),
            &agents(),
            0,
        )
        .unwrap();

        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");
        assert_eq!(boot.reserve.balance_of(&alice), 5 * WAD);
        assert_eq!(boot.reserve.balance_of(&bob), 4 * WAD);
        assert!(boot.stable.balance_of(&alice) > 0);
        assert_eq!(boot.stable.balance_of(&bob), 0);
        assert_eq!(boot.reactor.fee_curve().unwrap(), boot.fee_curve);

        // Fee curve update, then alice's seed fission
        assert_eq!(boot.events.try_recv().unwrap().kind(), "fee_curve_update");
        assert_eq!(boot.events.try_recv().unwrap().kind(), "fission");
        assert!(boot.events.try_recv().is_err());
    }

    #[test]
    fn test_reserve_decimals_respected() {
        let settings = ReactorSettings {
            reserve_decimals: 6,
            fission_fee: dec!(0),
            ..Default::default()
        };
        let boot = SimulationBootstrap::new(
            &settings,
            &PriceFeedConfig::default(),
            &[AgentAccount::new("alice", dec!(2.5), dec!(1))],
            0,
        )
        .unwrap();
        assert_eq!(boot.reactor.reserve_balance().unwrap(), 2_500_000);
        // 2.5 units at 2000 with r* = 4
        assert_eq!(
            boot.reactor.supplies().unwrap(),
            Supplies::new(1250 * WAD, 1_875_000_000_000_000_000)
        );
    }

    #[test]
    fn test_to_raw() {
        assert_eq!(to_raw(dec!(1.5), 1_000_000).unwrap(), 1_500_000);
        assert_eq!(to_raw(dec!(0.0000001), 1_000_000).unwrap(), 0);
        assert_eq!(to_raw(dec!(3), WAD).unwrap(), 3 * WAD);
        assert!(to_raw(dec!(-1), WAD).is_err());
    }
}

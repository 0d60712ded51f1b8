//! Simulated Agent - a seeded random actor on the reactor
//!
//! Each turn the agent picks one of the four operations and sizes it as a
//! random slice of whatever it holds. Failed calls are reported, not
//! retried; the simulation counts them by reason.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reactor_core::math::mul_div;
use reactor_core::{AccountId, Amount, WAD};
use reactor_engine::{Reactor, ReactorError};
use reactor_ports::FungibleLedger;
use serde::{Deserialize, Serialize};

/// Operation an agent attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentAction {
    Fission,
    Fusion,
    TransmuteToStable,
    TransmuteToVolatile,
}

impl AgentAction {
    const ALL: [AgentAction; 4] = [
        AgentAction::Fission,
        AgentAction::Fusion,
        AgentAction::TransmuteToStable,
        AgentAction::TransmuteToVolatile,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AgentAction::Fission => "fission",
            AgentAction::Fusion => "fusion",
            AgentAction::TransmuteToStable => "transmute_to_stable",
            AgentAction::TransmuteToVolatile => "transmute_to_volatile",
        }
    }
}

/// Outcome of one agent turn
#[derive(Debug, Clone)]
pub struct AgentTurn {
    pub agent: AccountId,
    pub action: AgentAction,
    pub amount: Amount,
    pub result: Result<(), ReactorError>,
}

/// Balances the agent can see
pub struct Holdings<'a> {
    pub reserve: &'a dyn FungibleLedger,
    pub stable: &'a dyn FungibleLedger,
    pub volatile: &'a dyn FungibleLedger,
}

/// Seeded random actor
pub struct SimAgent {
    account: AccountId,
    /// Largest share of a balance used in one turn, in WAD
    max_fraction: u128,
    rng: StdRng,
}

impl SimAgent {
    pub fn new(account: AccountId, max_fraction: u128, seed: u64) -> Self {
        Self {
            account,
            max_fraction: max_fraction.clamp(1, WAD),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    /// Pick and attempt one operation; `None` when the agent holds nothing
    /// for the chosen action
    pub fn act(&mut self, reactor: &Reactor, holdings: &Holdings<'_>) -> Option<AgentTurn> {
        let action = AgentAction::ALL[self.rng.gen_range(0..AgentAction::ALL.len())];
        let capacity = self.capacity(action, reactor, holdings);
        let amount = self.slice(capacity);
        if amount == 0 {
            return None;
        }

        let me = &self.account;
        let result = match action {
            AgentAction::Fission => reactor.fission(me, amount, me, None).map(|_| ()),
            AgentAction::Fusion => reactor.fusion(me, amount, me, None).map(|_| ()),
            AgentAction::TransmuteToStable => reactor
                .transmute_to_stable(me, amount, me, None)
                .map(|_| ()),
            AgentAction::TransmuteToVolatile => reactor
                .transmute_to_volatile(me, amount, me, None)
                .map(|_| ()),
        };

        Some(AgentTurn {
            agent: self.account.clone(),
            action,
            amount,
            result,
        })
    }

    /// Most the agent could put into `action` right now
    fn capacity(&self, action: AgentAction, reactor: &Reactor, holdings: &Holdings<'_>) -> Amount {
        match action {
            AgentAction::Fission => holdings.reserve.balance_of(&self.account),
            AgentAction::TransmuteToStable => holdings.volatile.balance_of(&self.account),
            AgentAction::TransmuteToVolatile => holdings.stable.balance_of(&self.account),
            AgentAction::Fusion => {
                // Redeemable reserve is capped by the scarcer of the two holdings
                let (Ok(supplies), Ok(reserve)) = (reactor.supplies(), reactor.reserve_balance())
                else {
                    return 0;
                };
                if !supplies.both_outstanding() {
                    return 0;
                }
                let stable_share = mul_div(
                    holdings.stable.balance_of(&self.account),
                    WAD,
                    supplies.stable,
                )
                .unwrap_or(0);
                let volatile_share = mul_div(
                    holdings.volatile.balance_of(&self.account),
                    WAD,
                    supplies.volatile,
                )
                .unwrap_or(0);
                mul_div(reserve, stable_share.min(volatile_share), WAD).unwrap_or(0)
            }
        }
    }

    fn slice(&mut self, capacity: Amount) -> Amount {
        if capacity == 0 {
            return 0;
        }
        let fraction = self.rng.gen_range(1..=self.max_fraction);
        mul_div(capacity, fraction, WAD).unwrap_or(0)
    }
}

use std::cell::RefCell;
use std::sync::Arc;

use log::{debug, error, info, warn};
use parking_lot::ReentrantMutex;
use reactor_core::math::{WAD_DECIMALS, fmt_wad};
use reactor_core::{
    AccountId, Amount, ConfigError, FeeCurveParams, ReactorConfig, ReserveHealth, SignedWad,
    Supplies, TokenKind, Wad,
};
use reactor_fees::{DecayLedger, FlowDirection, fee_rate};
use reactor_ports::{
    AppliedUpdate, Clock, FungibleLedger, IssuedToken, OracleError, PriceOracle, PriceUpdate,
};
use reactor_pricing::{PriceNormalizer, ReserveScale, ReserveSnapshot, normalize_quote};
use tokio::sync::mpsc::UnboundedSender;

use crate::application::plan::{plan_fission, plan_fusion, plan_transmute};
use crate::application::settlement::{Effect, Settlement};
use crate::error::{ReactorError, Result};
use crate::model::{
    FeeCurveUpdate, FissionQuote, FissionReceipt, FusionQuote, FusionReceipt, PriceUpdateReceipt,
    ReactorEvent, TransmuteQuote, TransmuteReceipt,
};

/// Everything the reactor talks to but does not own
#[derive(Clone)]
pub struct ReactorCollaborators {
    pub reserve: Arc<dyn FungibleLedger>,
    pub stable: Arc<dyn IssuedToken>,
    pub volatile: Arc<dyn IssuedToken>,
    pub oracle: Arc<dyn PriceOracle>,
    pub clock: Arc<dyn Clock>,
}

/// Mutable state; replaced wholesale when an operation commits
#[derive(Debug, Clone)]
struct ReactorState {
    supplies: Supplies,
    fee_curve: FeeCurveParams,
    ledger: DecayLedger,
}

/// Two-token reserve reactor
///
/// Every public method takes the instance lock. Calls from other threads
/// wait for it; a call made from inside a collaborator while an operation
/// is running on the same thread fails with
/// [`ReactorError::ReentrancyViolation`] before touching state.
pub struct Reactor {
    account: AccountId,
    config: ReactorConfig,
    scale: ReserveScale,
    reserve: Arc<dyn FungibleLedger>,
    stable: Arc<dyn IssuedToken>,
    volatile: Arc<dyn IssuedToken>,
    pricing: PriceNormalizer,
    clock: Arc<dyn Clock>,
    events: Option<UnboundedSender<ReactorEvent>>,
    state: ReentrantMutex<RefCell<ReactorState>>,
}

impl Reactor {
    /// Create a reactor holding reserve under `account`
    ///
    /// Collaborators must match the configured asset identifiers, issued
    /// tokens must use 18 decimals and the reserve at most 18.
    pub fn new(
        account: impl Into<AccountId>,
        config: ReactorConfig,
        collaborators: ReactorCollaborators,
    ) -> Result<Self> {
        let account = account.into();
        if account.is_empty() {
            return Err(ReactorError::InvalidArgument(
                "reactor account is empty".to_string(),
            ));
        }
        config.validate()?;

        let ReactorCollaborators {
            reserve,
            stable,
            volatile,
            oracle,
            clock,
        } = collaborators;

        let checks = [
            ("reserve", reserve.asset_id(), &config.reserve_asset),
            ("stable", stable.asset_id(), &config.stable_token),
            ("volatile", volatile.asset_id(), &config.volatile_token),
        ];
        for (role, actual, expected) in checks {
            if &actual != expected {
                return Err(ConfigError::CollaboratorMismatch(format!(
                    "{} ledger tracks {}, expected {}",
                    role, actual, expected
                ))
                .into());
            }
        }
        for token in [&stable, &volatile] {
            if token.decimals() != WAD_DECIMALS {
                return Err(ConfigError::CollaboratorMismatch(format!(
                    "{} has {} decimals, issued tokens need {}",
                    token.asset_id(),
                    token.decimals(),
                    WAD_DECIMALS
                ))
                .into());
            }
        }
        let scale = ReserveScale::new(reserve.decimals())?;

        let state = ReactorState {
            supplies: Supplies::new(stable.total_supply(), volatile.total_supply()),
            fee_curve: FeeCurveParams::default(),
            ledger: DecayLedger::new(clock.now()),
        };
        let pricing = PriceNormalizer::new(
            oracle,
            config.price_feed.clone(),
            config.max_price_age_secs,
        );

        info!(
            "Reactor {} created: reserve={} stable={} volatile={} r*={} mode={:?}",
            account,
            config.reserve_asset,
            config.stable_token,
            config.volatile_token,
            fmt_wad(config.target_reserve_ratio),
            config.fission_mode
        );

        Ok(Self {
            account,
            config,
            scale,
            reserve,
            stable,
            volatile,
            pricing,
            clock,
            events: None,
            state: ReentrantMutex::new(RefCell::new(state)),
        })
    }

    /// Send a [`ReactorEvent`] on `tx` after every committed operation
    pub fn with_event_sender(mut self, tx: UnboundedSender<ReactorEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    // ============ Operations ============

    /// Deposit `amount` raw reserve units from `caller` and mint both tokens to `recipient`
    pub fn fission(
        &self,
        caller: &AccountId,
        amount: Amount,
        recipient: &AccountId,
        update: Option<&PriceUpdate>,
    ) -> Result<FissionReceipt> {
        self.execute("fission", ReactorEvent::Fission, |state| {
            validate_parties(caller, recipient)?;
            require_positive("fission", amount)?;
            let now = self.clock.now();

            self.with_price_update(update, |_| {
                let price = self.pricing.fresh_price(now)?;
                state.ledger.advance(now, state.fee_curve.decay_per_second)?;

                let snapshot = self.snapshot(state.supplies, price)?;
                let quote = plan_fission(&self.config, &snapshot, &self.scale, amount)?;

                state.supplies.credit(TokenKind::Stable, quote.stable_out)?;
                state
                    .supplies
                    .credit(TokenKind::Volatile, quote.volatile_out)?;

                self.settle(vec![
                    Effect::PullReserve {
                        from: caller.clone(),
                        amount: quote.reserve_in,
                    },
                    Effect::Mint {
                        token: TokenKind::Stable,
                        to: recipient.clone(),
                        amount: quote.stable_out,
                    },
                    Effect::Mint {
                        token: TokenKind::Volatile,
                        to: recipient.clone(),
                        amount: quote.volatile_out,
                    },
                    Effect::PushReserve {
                        to: self.config.treasury.clone(),
                        amount: quote.fee,
                    },
                ])?;

                info!(
                    "Fission by {}: {} in, fee {}, minted {} stable / {} volatile to {}",
                    caller,
                    quote.reserve_in,
                    quote.fee,
                    quote.stable_out,
                    quote.volatile_out,
                    recipient
                );

                Ok(FissionReceipt {
                    caller: caller.clone(),
                    recipient: recipient.clone(),
                    quote,
                    price,
                    supplies: state.supplies,
                    timestamp: now,
                })
            })
        })
    }

    /// Burn both tokens from `caller` and pay `amount` raw reserve units (less fee) to `recipient`
    pub fn fusion(
        &self,
        caller: &AccountId,
        amount: Amount,
        recipient: &AccountId,
        update: Option<&PriceUpdate>,
    ) -> Result<FusionReceipt> {
        self.execute("fusion", ReactorEvent::Fusion, |state| {
            validate_parties(caller, recipient)?;
            let now = self.clock.now();

            // Proportional redemption does not depend on the oracle price, so
            // every precondition is checked before an attached update is paid for
            let snapshot = self.snapshot(state.supplies, 0)?;
            let quote = plan_fusion(&self.config, &snapshot, &self.scale, amount)?;

            self.with_price_update(update, |_| {
                state.ledger.advance(now, state.fee_curve.decay_per_second)?;

                state.supplies.debit(TokenKind::Stable, quote.stable_burn)?;
                state
                    .supplies
                    .debit(TokenKind::Volatile, quote.volatile_burn)?;

                self.settle(vec![
                    Effect::Burn {
                        token: TokenKind::Stable,
                        from: caller.clone(),
                        amount: quote.stable_burn,
                    },
                    Effect::Burn {
                        token: TokenKind::Volatile,
                        from: caller.clone(),
                        amount: quote.volatile_burn,
                    },
                    Effect::PushReserve {
                        to: recipient.clone(),
                        amount: quote.reserve_out,
                    },
                    Effect::PushReserve {
                        to: self.config.treasury.clone(),
                        amount: quote.fee,
                    },
                ])?;

                info!(
                    "Fusion by {}: burned {} stable / {} volatile, paid {} to {}, fee {}",
                    caller,
                    quote.stable_burn,
                    quote.volatile_burn,
                    quote.reserve_out,
                    recipient,
                    quote.fee
                );

                Ok(FusionReceipt {
                    caller: caller.clone(),
                    recipient: recipient.clone(),
                    quote,
                    supplies: state.supplies,
                    timestamp: now,
                })
            })
        })
    }

    /// Convert volatile tokens from `caller` into stable tokens for `recipient`
    pub fn transmute_to_stable(
        &self,
        caller: &AccountId,
        amount: Amount,
        recipient: &AccountId,
        update: Option<&PriceUpdate>,
    ) -> Result<TransmuteReceipt> {
        self.transmute(FlowDirection::ToStable, caller, amount, recipient, update)
    }

    /// Convert stable tokens from `caller` into volatile tokens for `recipient`
    pub fn transmute_to_volatile(
        &self,
        caller: &AccountId,
        amount: Amount,
        recipient: &AccountId,
        update: Option<&PriceUpdate>,
    ) -> Result<TransmuteReceipt> {
        self.transmute(FlowDirection::ToVolatile, caller, amount, recipient, update)
    }

    fn transmute(
        &self,
        direction: FlowDirection,
        caller: &AccountId,
        amount: Amount,
        recipient: &AccountId,
        update: Option<&PriceUpdate>,
    ) -> Result<TransmuteReceipt> {
        let op = match direction {
            FlowDirection::ToStable => "transmute_to_stable",
            FlowDirection::ToVolatile => "transmute_to_volatile",
        };

        self.execute(op, |receipt: TransmuteReceipt| receipt.into(), |state| {
            validate_parties(caller, recipient)?;
            require_positive("transmute", amount)?;
            let now = self.clock.now();

            self.with_price_update(update, |_| {
                let price = self.pricing.fresh_price(now)?;
                state.ledger.advance(now, state.fee_curve.decay_per_second)?;

                let snapshot = self.snapshot(state.supplies, price)?;
                let quote = plan_transmute(
                    &state.fee_curve,
                    state.ledger.decayed_volume(),
                    &snapshot,
                    direction,
                    amount,
                )?;
                state.ledger.record(direction, quote.gross_value)?;

                let (burned, minted) = match direction {
                    FlowDirection::ToStable => (TokenKind::Volatile, TokenKind::Stable),
                    FlowDirection::ToVolatile => (TokenKind::Stable, TokenKind::Volatile),
                };
                state.supplies.debit(burned, quote.amount_in)?;
                state.supplies.credit(minted, quote.amount_out)?;

                self.settle(vec![
                    Effect::Burn {
                        token: burned,
                        from: caller.clone(),
                        amount: quote.amount_in,
                    },
                    Effect::Mint {
                        token: minted,
                        to: recipient.clone(),
                        amount: quote.amount_out,
                    },
                ])?;

                info!(
                    "Transmute {} by {}: {} {} -> {} {} (fee rate {}, ledger {})",
                    direction,
                    caller,
                    quote.amount_in,
                    burned,
                    quote.amount_out,
                    minted,
                    fmt_wad(quote.fee_rate),
                    state.ledger.decayed_volume()
                );

                Ok(TransmuteReceipt {
                    caller: caller.clone(),
                    recipient: recipient.clone(),
                    quote,
                    decayed_volume: state.ledger.decayed_volume(),
                    supplies: state.supplies,
                    timestamp: now,
                })
            })
        })
    }

    /// Apply a signed price update without any other operation
    pub fn update_price(
        &self,
        caller: &AccountId,
        update: &PriceUpdate,
    ) -> Result<PriceUpdateReceipt> {
        self.execute("update_price", ReactorEvent::PriceUpdated, |_state| {
            if caller.is_empty() {
                return Err(ReactorError::InvalidArgument("caller is empty".to_string()));
            }
            let now = self.clock.now();

            self.with_price_update(Some(update), |fee_paid| {
                let quote = self.pricing.oracle().read_unsafe(self.pricing.feed())?;
                let price = normalize_quote(&quote)?;

                info!(
                    "Price for {} updated by {}: {} (fee {})",
                    self.pricing.feed(),
                    caller,
                    fmt_wad(price),
                    fee_paid
                );

                Ok(PriceUpdateReceipt {
                    caller: caller.clone(),
                    feed: self.pricing.feed().clone(),
                    price,
                    publish_time: quote.publish_time,
                    fee_paid,
                    timestamp: now,
                })
            })
        })
    }

    /// Replace the fee curve; treasury only
    ///
    /// The ledger is brought up to date under the old decay factor first, so
    /// time already elapsed is never re-decayed at the new rate.
    pub fn set_fee_curve(
        &self,
        caller: &AccountId,
        params: FeeCurveParams,
    ) -> Result<FeeCurveUpdate> {
        self.execute("set_fee_curve", ReactorEvent::FeeCurveUpdated, |state| {
            if caller != &self.config.treasury {
                return Err(ReactorError::Unauthorized(caller.clone()));
            }
            params.validate()?;

            let now = self.clock.now();
            state.ledger.advance(now, state.fee_curve.decay_per_second)?;
            let previous = state.fee_curve;
            state.fee_curve = params;

            info!(
                "Fee curve updated by {}: phi0={} phi1={} decay={}",
                caller,
                fmt_wad(params.phi0),
                fmt_wad(params.phi1),
                fmt_wad(params.decay_per_second)
            );

            Ok(FeeCurveUpdate {
                caller: caller.clone(),
                previous,
                current: params,
                decayed_volume: state.ledger.decayed_volume(),
                timestamp: now,
            })
        })
    }

    // ============ Quotes ============

    /// What [`Reactor::fission`] would do now, using the latest price regardless of age
    pub fn quote_fission(&self, amount: Amount) -> Result<FissionQuote> {
        self.read(|state| {
            let snapshot = self.snapshot(state.supplies, self.pricing.unsafe_price()?)?;
            plan_fission(&self.config, &snapshot, &self.scale, amount)
        })
    }

    pub fn quote_fusion(&self, amount: Amount) -> Result<FusionQuote> {
        self.read(|state| {
            let snapshot = self.snapshot(state.supplies, 0)?;
            plan_fusion(&self.config, &snapshot, &self.scale, amount)
        })
    }

    pub fn quote_transmute_to_stable(&self, amount: Amount) -> Result<TransmuteQuote> {
        self.quote_transmute(FlowDirection::ToStable, amount)
    }

    pub fn quote_transmute_to_volatile(&self, amount: Amount) -> Result<TransmuteQuote> {
        self.quote_transmute(FlowDirection::ToVolatile, amount)
    }

    fn quote_transmute(&self, direction: FlowDirection, amount: Amount) -> Result<TransmuteQuote> {
        self.read(|state| {
            let snapshot = self.snapshot(state.supplies, self.pricing.unsafe_price()?)?;
            let decayed_volume = state
                .ledger
                .projected(self.clock.now(), state.fee_curve.decay_per_second)?;
            plan_transmute(&state.fee_curve, decayed_volume, &snapshot, direction, amount)
        })
    }

    // ============ Views ============

    /// Reserve, supplies and latest price (regardless of age)
    pub fn reserve_snapshot(&self) -> Result<ReserveSnapshot> {
        self.read(|state| self.snapshot(state.supplies, self.pricing.unsafe_price()?))
    }

    pub fn reserve_ratio(&self) -> Result<Wad> {
        Ok(self.reserve_snapshot()?.reserve_ratio()?)
    }

    pub fn reserve_health(&self) -> Result<ReserveHealth> {
        Ok(self.reserve_snapshot()?.health()?)
    }

    /// Stable token price in reserve units
    pub fn stable_price(&self) -> Result<Wad> {
        Ok(self.reserve_snapshot()?.stable_price()?)
    }

    /// Volatile token price in reserve units
    pub fn volatile_price(&self) -> Result<Wad> {
        Ok(self.reserve_snapshot()?.volatile_price()?)
    }

    pub fn stable_price_in_peg(&self) -> Result<Wad> {
        Ok(self.reserve_snapshot()?.stable_price_in_peg()?)
    }

    pub fn volatile_price_in_peg(&self) -> Result<Wad> {
        Ok(self.reserve_snapshot()?.volatile_price_in_peg()?)
    }

    /// Reserve held, raw units
    pub fn reserve_balance(&self) -> Result<Amount> {
        self.read(|_| Ok(self.reserve.balance_of(&self.account)))
    }

    pub fn supplies(&self) -> Result<Supplies> {
        self.read(|state| Ok(state.supplies))
    }

    pub fn fee_curve(&self) -> Result<FeeCurveParams> {
        self.read(|state| Ok(state.fee_curve))
    }

    /// Ledger value decayed to the current time
    pub fn decayed_volume(&self) -> Result<SignedWad> {
        self.read(|state| {
            Ok(state
                .ledger
                .projected(self.clock.now(), state.fee_curve.decay_per_second)?)
        })
    }

    /// Current `(to_stable, to_volatile)` fee rates
    pub fn fee_rates(&self) -> Result<(Wad, Wad)> {
        self.read(|state| {
            let volume = state
                .ledger
                .projected(self.clock.now(), state.fee_curve.decay_per_second)?;
            let reserve = self.scale.to_wad(self.reserve.balance_of(&self.account))?;
            Ok((
                fee_rate(&state.fee_curve, volume, reserve, FlowDirection::ToStable)?,
                fee_rate(&state.fee_curve, volume, reserve, FlowDirection::ToVolatile)?,
            ))
        })
    }

    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    /// Account holding the reserve and minting both tokens
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    // ============ Internals ============

    /// Run `f` on a working copy of the state under the guard
    ///
    /// On success the copy is committed and `event` is emitted before the
    /// guard is released, so notifications arrive in commit order.
    fn execute<T: Clone>(
        &self,
        op: &'static str,
        event: impl FnOnce(T) -> ReactorEvent,
        f: impl FnOnce(&mut ReactorState) -> Result<T>,
    ) -> Result<T> {
        let guard = self.state.lock();
        let mut state = guard.try_borrow_mut().map_err(|_| {
            warn!("Reentrant {} rejected", op);
            ReactorError::ReentrancyViolation
        })?;

        let mut working = state.clone();
        match f(&mut working) {
            Ok(out) => {
                *state = working;
                self.emit(event(out.clone()));
                Ok(out)
            }
            Err(e) => {
                warn!("{} failed: {}", op, e);
                Err(e)
            }
        }
    }

    /// Run a read-only `f` under the guard
    fn read<T>(&self, f: impl FnOnce(&ReactorState) -> Result<T>) -> Result<T> {
        let guard = self.state.lock();
        let state = guard
            .try_borrow()
            .map_err(|_| ReactorError::ReentrancyViolation)?;
        f(&state)
    }

    fn snapshot(&self, supplies: Supplies, price: Wad) -> Result<ReserveSnapshot> {
        let raw = self.reserve.balance_of(&self.account);
        let reserve = self.scale.to_wad(raw)?;
        Ok(ReserveSnapshot::new(
            reserve,
            supplies,
            self.config.target_reserve_ratio,
            price,
        ))
    }

    /// Pay for and apply `update`, then run `f` with the fee paid
    ///
    /// If `f` fails the oracle restores the replaced quote and refunds the
    /// fee, so a rejected operation leaves the oracle as it found it.
    fn with_price_update<T>(
        &self,
        update: Option<&PriceUpdate>,
        f: impl FnOnce(Amount) -> Result<T>,
    ) -> Result<T> {
        let Some(update) = update else {
            return f(0);
        };

        let oracle = self.pricing.oracle();
        let fee = oracle.update_fee(update)?;
        if update.payment < fee {
            return Err(ReactorError::OracleUnavailable(
                OracleError::InsufficientFee {
                    required: fee,
                    paid: update.payment,
                },
            ));
        }
        let applied = oracle.apply_update(update, fee)?;
        debug!("Applied price update for {}, fee {}", applied.feed, applied.fee);

        let result = f(applied.fee);
        if result.is_err() {
            self.revert_price_update(&applied);
        }
        result
    }

    fn revert_price_update(&self, applied: &AppliedUpdate) {
        match self.pricing.oracle().revert_update(applied) {
            Ok(()) => debug!(
                "Reverted price update for {}, refunded {}",
                applied.feed, applied.fee
            ),
            Err(e) => error!(
                "Failed to revert price update for {} (fee {}): {}",
                applied.feed, applied.fee, e
            ),
        }
    }

    fn settle(&self, effects: Vec<Effect>) -> Result<()> {
        Settlement::new(
            &self.account,
            self.reserve.as_ref(),
            self.stable.as_ref(),
            self.volatile.as_ref(),
        )
        .settle(effects)
    }

    fn emit(&self, event: ReactorEvent) {
        if let Some(tx) = &self.events {
            if let Err(e) = tx.send(event) {
                warn!("Dropped {} notification: receiver closed", e.0.kind());
            }
        }
    }
}

fn require_positive(op: &str, amount: Amount) -> Result<()> {
    if amount == 0 {
        return Err(ReactorError::InvalidArgument(format!(
            "{} amount must be positive",
            op
        )));
    }
    Ok(())
}

fn validate_parties(caller: &AccountId, recipient: &AccountId) -> Result<()> {
    if caller.is_empty() {
        return Err(ReactorError::InvalidArgument("caller is empty".to_string()));
    }
    if recipient.is_empty() {
        return Err(ReactorError::InvalidArgument(
            "recipient is empty".to_string(),
        ));
    }
    Ok(())
}

impl std::fmt::Debug for Reactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reactor")
            .field("account", &self.account)
            .field("config", &self.config)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

//! Settlement journal
//!
//! Effects on collaborators run in order and are recorded as they succeed.
//! When one fails, the recorded ones are compensated in reverse. Reserve
//! payouts cannot be taken back, so they always run last and only after the
//! reactor's balance has been checked against all of them.

use log::{error, warn};
use reactor_core::{AccountId, Amount, AssetId, TokenKind};
use reactor_ports::{FungibleLedger, IssuedToken, TransferError};

use crate::error::{ReactorError, Result};

/// One movement of value on a collaborator ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Reserve from `from` into the reactor (uses `from`'s allowance)
    PullReserve { from: AccountId, amount: Amount },
    /// Reserve from the reactor to `to`; final
    PushReserve { to: AccountId, amount: Amount },
    Mint {
        token: TokenKind,
        to: AccountId,
        amount: Amount,
    },
    Burn {
        token: TokenKind,
        from: AccountId,
        amount: Amount,
    },
}

impl Effect {
    fn is_final(&self) -> bool {
        matches!(self, Effect::PushReserve { .. })
    }

    fn amount(&self) -> Amount {
        match self {
            Effect::PullReserve { amount, .. }
            | Effect::PushReserve { amount, .. }
            | Effect::Mint { amount, .. }
            | Effect::Burn { amount, .. } => *amount,
        }
    }
}

pub struct Settlement<'a> {
    reactor: &'a AccountId,
    reserve: &'a dyn FungibleLedger,
    stable: &'a dyn IssuedToken,
    volatile: &'a dyn IssuedToken,
    applied: Vec<Effect>,
}

impl<'a> Settlement<'a> {
    pub fn new(
        reactor: &'a AccountId,
        reserve: &'a dyn FungibleLedger,
        stable: &'a dyn IssuedToken,
        volatile: &'a dyn IssuedToken,
    ) -> Self {
        Self {
            reactor,
            reserve,
            stable,
            volatile,
            applied: Vec::new(),
        }
    }

    /// Apply all effects or none of the revertible ones
    ///
    /// Zero-amount effects are skipped.
    pub fn settle(mut self, effects: Vec<Effect>) -> Result<()> {
        let mut effects: Vec<Effect> = effects.into_iter().filter(|e| e.amount() > 0).collect();
        effects.sort_by_key(Effect::is_final);

        let mut payouts_checked = false;
        for effect in effects.iter() {
            if effect.is_final() && !payouts_checked {
                if let Err(e) = self.check_payouts(&effects) {
                    self.rollback();
                    return Err(e);
                }
                payouts_checked = true;
            }

            if let Err(e) = self.apply(effect) {
                self.rollback();
                return Err(e);
            }
            self.applied.push(effect.clone());
        }

        Ok(())
    }

    fn check_payouts(&self, effects: &[Effect]) -> Result<()> {
        let mut required: Amount = 0;
        for effect in effects.iter().filter(|e| e.is_final()) {
            required = required
                .checked_add(effect.amount())
                .ok_or_else(|| self.transfer_error(TransferError::Overflow))?;
        }

        let available = self.reserve.balance_of(self.reactor);
        if available < required {
            return Err(self.transfer_error(TransferError::InsufficientBalance {
                account: self.reactor.clone(),
                required,
                available,
            }));
        }
        Ok(())
    }

    fn apply(&self, effect: &Effect) -> Result<()> {
        match effect {
            Effect::PullReserve { from, amount } => self
                .reserve
                .transfer_from(self.reactor, from, self.reactor, *amount)
                .map_err(|e| self.transfer_error(e)),
            Effect::PushReserve { to, amount } => self
                .reserve
                .transfer(self.reactor, to, *amount)
                .map_err(|e| self.transfer_error(e)),
            Effect::Mint { token, to, amount } => {
                let ledger = self.token(*token);
                ledger
                    .mint(self.reactor, to, *amount)
                    .map_err(|e| token_error(ledger.asset_id(), e))
            }
            Effect::Burn {
                token,
                from,
                amount,
            } => {
                let ledger = self.token(*token);
                ledger
                    .burn(self.reactor, from, *amount)
                    .map_err(|e| token_error(ledger.asset_id(), e))
            }
        }
    }

    fn rollback(&mut self) {
        while let Some(effect) = self.applied.pop() {
            let compensated = match &effect {
                Effect::PullReserve { from, amount } => {
                    self.reserve.transfer(self.reactor, from, *amount)
                }
                Effect::Mint { token, to, amount } => {
                    self.token(*token).burn(self.reactor, to, *amount)
                }
                Effect::Burn {
                    token,
                    from,
                    amount,
                } => self.token(*token).mint(self.reactor, from, *amount),
                Effect::PushReserve { to, amount } => {
                    error!(
                        "Cannot take back payout of {} {} to {}",
                        amount,
                        self.reserve.asset_id(),
                        to
                    );
                    continue;
                }
            };

            match compensated {
                Ok(()) => warn!("Compensated {:?}", effect),
                Err(e) => error!("Failed to compensate {:?}: {}", effect, e),
            }
        }
    }

    fn token(&self, kind: TokenKind) -> &'a dyn IssuedToken {
        match kind {
            TokenKind::Stable => self.stable,
            TokenKind::Volatile => self.volatile,
        }
    }

    fn transfer_error(&self, source: TransferError) -> ReactorError {
        token_error(self.reserve.asset_id(), source)
    }
}

fn token_error(asset: AssetId, source: TransferError) -> ReactorError {
    ReactorError::TransferFailed { asset, source }
}

use std::collections::HashMap;

use log::trace;
use parking_lot::Mutex;
use reactor_core::{AccountId, Amount, AssetId};
use reactor_ports::{FungibleLedger, IssuedToken, TransferError, TransferResult};

#[derive(Debug, Default)]
struct Book {
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    total_supply: Amount,
}

impl Book {
    fn balance(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn debit(&mut self, account: &AccountId, amount: Amount) -> TransferResult<()> {
        let available = self.balance(account);
        if available < amount {
            return Err(TransferError::InsufficientBalance {
                account: account.clone(),
                required: amount,
                available,
            });
        }
        self.balances.insert(account.clone(), available - amount);
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, amount: Amount) -> TransferResult<()> {
        let balance = self
            .balance(account)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        self.balances.insert(account.clone(), balance);
        Ok(())
    }

    fn move_funds(&mut self, from: &AccountId, to: &AccountId, amount: Amount) -> TransferResult<()> {
        // Check the credit side first so a failure leaves both balances untouched
        if from != to {
            self.balance(to)
                .checked_add(amount)
                .ok_or(TransferError::Overflow)?;
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }
}

/// Fungible ledger held in memory
///
/// Serves as the reserve asset (no minter) or as an issued token (minter set).
#[derive(Debug)]
pub struct InMemoryLedger {
    asset_id: AssetId,
    decimals: u8,
    minter: Option<AccountId>,
    book: Mutex<Book>,
}

impl InMemoryLedger {
    pub fn new(asset_id: impl Into<AssetId>, decimals: u8) -> Self {
        Self {
            asset_id: asset_id.into(),
            decimals,
            minter: None,
            book: Mutex::new(Book::default()),
        }
    }

    /// Restrict mint and burn to `minter`
    pub fn with_minter(mut self, minter: AccountId) -> Self {
        self.minter = Some(minter);
        self
    }

    /// Create `amount` out of thin air for `account` (test and simulation funding)
    pub fn deposit(&self, account: &AccountId, amount: Amount) -> TransferResult<()> {
        validate_account(account)?;
        let mut book = self.book.lock();
        book.total_supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        book.credit(account, amount)
    }

    /// Let `spender` move up to `amount` of `owner`'s balance
    pub fn approve(&self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        self.book
            .lock()
            .allowances
            .insert((owner.clone(), spender.clone()), amount);
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.book
            .lock()
            .allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn check_minter(&self, caller: &AccountId) -> TransferResult<()> {
        match &self.minter {
            Some(minter) if minter == caller => Ok(()),
            _ => Err(TransferError::Unauthorized(caller.clone())),
        }
    }
}

fn validate_account(account: &AccountId) -> TransferResult<()> {
    if account.is_empty() {
        return Err(TransferError::InvalidAccount(account.clone()));
    }
    Ok(())
}

impl FungibleLedger for InMemoryLedger {
    fn asset_id(&self) -> AssetId {
        self.asset_id.clone()
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.book.lock().balance(account)
    }

    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> TransferResult<()> {
        validate_account(to)?;
        trace!("{} transfer {} -> {}: {}", self.asset_id, from, to, amount);
        self.book.lock().move_funds(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> TransferResult<()> {
        validate_account(to)?;
        let mut book = self.book.lock();
        let key = (owner.clone(), spender.clone());
        let allowed = book.allowances.get(&key).copied().unwrap_or(0);
        if allowed < amount {
            return Err(TransferError::InsufficientAllowance {
                owner: owner.clone(),
                spender: spender.clone(),
                required: amount,
                available: allowed,
            });
        }

        book.move_funds(owner, to, amount)?;
        book.allowances.insert(key, allowed - amount);
        trace!(
            "{} transfer_from {} -> {} by {}: {}",
            self.asset_id, owner, to, spender, amount
        );
        Ok(())
    }
}

impl IssuedToken for InMemoryLedger {
    fn total_supply(&self) -> Amount {
        self.book.lock().total_supply
    }

    fn mint(&self, minter: &AccountId, to: &AccountId, amount: Amount) -> TransferResult<()> {
        self.check_minter(minter)?;
        validate_account(to)?;
        let mut book = self.book.lock();
        let supply = book
            .total_supply
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        book.credit(to, amount)?;
        book.total_supply = supply;
        Ok(())
    }

    fn burn(&self, minter: &AccountId, from: &AccountId, amount: Amount) -> TransferResult<()> {
        self.check_minter(minter)?;
        let mut book = self.book.lock();
        book.debit(from, amount)?;
        book.total_supply -= amount;
        Ok(())
    }
}

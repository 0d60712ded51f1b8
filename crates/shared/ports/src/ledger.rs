use reactor_core::{AccountId, Amount, AssetId};

use crate::error::TransferResult;

/// Port for a fungible-asset ledger (the reserve asset, or either issued token)
///
/// Methods take `&self`: ledgers are shared behind `Arc` and keep their own
/// interior state. Any call may hand control to foreign code, which is why
/// the reactor only calls them while holding its guard.
pub trait FungibleLedger: Send + Sync {
    /// Identifier of the asset this ledger tracks
    fn asset_id(&self) -> AssetId;

    /// Number of decimals of the smallest unit
    fn decimals(&self) -> u8;

    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Move `amount` from `from` to `to` on behalf of `from`
    fn transfer(&self, from: &AccountId, to: &AccountId, amount: Amount) -> TransferResult<()>;

    /// Move `amount` from `owner` to `to` using `spender`'s allowance
    fn transfer_from(
        &self,
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> TransferResult<()>;
}

/// Port for a token whose supply is controlled by a single minter
pub trait IssuedToken: FungibleLedger {
    fn total_supply(&self) -> Amount;

    /// Create `amount` for `to`; fails with `Unauthorized` unless `minter` is the minter
    fn mint(&self, minter: &AccountId, to: &AccountId, amount: Amount) -> TransferResult<()>;

    /// Destroy `amount` held by `from`; fails with `Unauthorized` unless `minter` is the minter
    fn burn(&self, minter: &AccountId, from: &AccountId, amount: Amount) -> TransferResult<()>;
}

//! The custodial vault holding multi-asset stake.

use quad_types::{Address, Amount, AssetId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("insufficient unlocked {asset} for {user}: need {needed}, available {available}")]
    InsufficientUnlocked {
        user: Address,
        asset: AssetId,
        needed: Amount,
        available: Amount,
    },

    #[error("insufficient locked {asset} for {user}: need {needed}, locked {locked}")]
    InsufficientLocked {
        user: Address,
        asset: AssetId,
        needed: Amount,
        locked: Amount,
    },

    #[error("vault balance overflow")]
    Overflow,
}

/// Per-user, per-asset custody with a separately tracked locked portion.
///
/// Chambers only ever lock and unlock; deposits are made by users (or by
/// test harnesses) directly.
pub trait Vault: Send + Sync {
    fn deposit(&self, user: &Address, asset: &AssetId, amount: Amount) -> Result<(), VaultError>;

    /// Move `amount` of the user's free balance into the locked portion.
    fn lock(&self, user: &Address, asset: &AssetId, amount: Amount) -> Result<(), VaultError>;

    /// Return `amount` of the locked portion to the free balance.
    fn unlock(&self, user: &Address, asset: &AssetId, amount: Amount) -> Result<(), VaultError>;

    fn locked_balance(&self, user: &Address, asset: &AssetId) -> Amount;

    /// Total deposited balance, locked portion included.
    fn balance(&self, user: &Address, asset: &AssetId) -> Amount;
}

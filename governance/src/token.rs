//! Fungible token accounting, consumed through its transfer interface.

use quad_types::{Address, Amount, AssetId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("unknown asset {0}")]
    UnknownAsset(AssetId),

    #[error("transfer amount exceeds balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("token balance overflow")]
    Overflow,
}

/// Balances and supply of every asset the chambers deal with.
pub trait TokenLedger: Send + Sync {
    fn total_supply(&self, asset: &AssetId) -> Result<Amount, TokenError>;

    fn balance_of(&self, asset: &AssetId, holder: &Address) -> Amount;

    fn transfer(
        &self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError>;
}

//! How stake physically moves while it is locked to a proposal.
//!
//! The single-asset chamber escrows tokens on its own balance; the
//! multi-asset chamber leaves them in the vault and only toggles the
//! vault's lock.

use crate::error::GovernanceError;
use crate::token::{TokenError, TokenLedger};
use crate::vault::{Vault, VaultError};
use quad_types::{Address, Amount, AssetId};
use std::sync::Arc;

pub trait StakeCustody: Send + Sync {
    /// Take `amount` of the voter's `asset` into custody.
    fn pull(&self, voter: &Address, asset: &AssetId, amount: Amount) -> Result<(), GovernanceError>;

    /// Check that `amount` can be handed back without moving anything.
    fn ensure_releasable(
        &self,
        voter: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), GovernanceError>;

    /// Hand `amount` of `asset` back to the voter.
    fn release(&self, voter: &Address, asset: &AssetId, amount: Amount)
        -> Result<(), GovernanceError>;
}

/// Tokens are transferred to the chamber's own address and back.
pub struct TokenEscrow {
    token: Arc<dyn TokenLedger>,
    escrow: Address,
}

impl TokenEscrow {
    pub fn new(token: Arc<dyn TokenLedger>, escrow: Address) -> Self {
        Self { token, escrow }
    }

    pub fn escrow(&self) -> &Address {
        &self.escrow
    }
}

impl StakeCustody for TokenEscrow {
    fn pull(&self, voter: &Address, asset: &AssetId, amount: Amount) -> Result<(), GovernanceError> {
        self.token.transfer(asset, voter, &self.escrow, amount)?;
        Ok(())
    }

    fn ensure_releasable(
        &self,
        _voter: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), GovernanceError> {
        let available = self.token.balance_of(asset, &self.escrow);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available,
            }
            .into());
        }
        Ok(())
    }

    fn release(
        &self,
        voter: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), GovernanceError> {
        self.token.transfer(asset, &self.escrow, voter, amount)?;
        Ok(())
    }
}

/// Funds stay in the vault; the chamber locks and unlocks them.
pub struct VaultCustody {
    vault: Arc<dyn Vault>,
}

impl VaultCustody {
    pub fn new(vault: Arc<dyn Vault>) -> Self {
        Self { vault }
    }
}

impl StakeCustody for VaultCustody {
    fn pull(&self, voter: &Address, asset: &AssetId, amount: Amount) -> Result<(), GovernanceError> {
        self.vault.lock(voter, asset, amount)?;
        Ok(())
    }

    fn ensure_releasable(
        &self,
        voter: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), GovernanceError> {
        let locked = self.vault.locked_balance(voter, asset);
        if locked < amount {
            return Err(VaultError::InsufficientLocked {
                user: voter.clone(),
                asset: asset.clone(),
                needed: amount,
                locked,
            }
            .into());
        }
        Ok(())
    }

    fn release(
        &self,
        voter: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<(), GovernanceError> {
        self.vault.unlock(voter, asset, amount)?;
        Ok(())
    }
}

//! Nullable token ledger: balances and supply kept in memory.

use quad_governance::{TokenError, TokenLedger};
use quad_types::{Address, Amount, AssetId};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct NullTokenLedger {
    supplies: Mutex<HashMap<AssetId, Amount>>,
    balances: Mutex<HashMap<(AssetId, Address), Amount>>,
}

impl NullTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `amount` new units of `asset` for `to`, growing the supply.
    pub fn mint(&self, asset: &AssetId, to: &Address, amount: Amount) {
        *self
            .supplies
            .lock()
            .unwrap()
            .entry(asset.clone())
            .or_default() += amount;
        *self
            .balances
            .lock()
            .unwrap()
            .entry((asset.clone(), to.clone()))
            .or_default() += amount;
    }

    /// Declare supply held outside the ledger's known holders.
    pub fn set_supply(&self, asset: &AssetId, supply: Amount) {
        self.supplies.lock().unwrap().insert(asset.clone(), supply);
    }
}

impl TokenLedger for NullTokenLedger {
    fn total_supply(&self, asset: &AssetId) -> Result<Amount, TokenError> {
        self.supplies
            .lock()
            .unwrap()
            .get(asset)
            .copied()
            .ok_or_else(|| TokenError::UnknownAsset(asset.clone()))
    }

    fn balance_of(&self, asset: &AssetId, holder: &Address) -> Amount {
        self.balances
            .lock()
            .unwrap()
            .get(&(asset.clone(), holder.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn transfer(
        &self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenError> {
        let mut balances = self.balances.lock().unwrap();
        let from_key = (asset.clone(), from.clone());
        let to_key = (asset.clone(), to.clone());
        let available = balances.get(&from_key).copied().unwrap_or(0);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        let to_balance = balances.get(&to_key).copied().unwrap_or(0);
        if from != to {
            let credited = to_balance.checked_add(amount).ok_or(TokenError::Overflow)?;
            balances.insert(from_key, available - amount);
            balances.insert(to_key, credited);
        }
        Ok(())
    }
}

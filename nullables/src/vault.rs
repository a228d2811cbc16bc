//! Nullable vault: per-user balances with a locked portion.

use quad_governance::{Vault, VaultError};
use quad_types::{Address, Amount, AssetId};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, Default)]
struct Account {
    balance: Amount,
    locked: Amount,
}

/// In-memory vault.
///
/// With [`NullVault::with_auto_deposit`], a lock that exceeds the user's
/// free balance deposits the shortfall first, so tests can vote without
/// funding every voter up front.
#[derive(Default)]
pub struct NullVault {
    accounts: Mutex<HashMap<(Address, AssetId), Account>>,
    auto_deposit: bool,
}

impl NullVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_deposit() -> Self {
        Self {
            auto_deposit: true,
            ..Self::default()
        }
    }

    /// Free (unlocked) balance.
    pub fn available(&self, user: &Address, asset: &AssetId) -> Amount {
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(&(user.clone(), asset.clone()))
            .copied()
            .unwrap_or_default();
        account.balance - account.locked
    }
}

impl Vault for NullVault {
    fn deposit(&self, user: &Address, asset: &AssetId, amount: Amount) -> Result<(), VaultError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts.entry((user.clone(), asset.clone())).or_default();
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        Ok(())
    }

    fn lock(&self, user: &Address, asset: &AssetId, amount: Amount) -> Result<(), VaultError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts.entry((user.clone(), asset.clone())).or_default();
        let available = account.balance - account.locked;
        if available < amount {
            if !self.auto_deposit {
                return Err(VaultError::InsufficientUnlocked {
                    user: user.clone(),
                    asset: asset.clone(),
                    needed: amount,
                    available,
                });
            }
            account.balance = account
                .balance
                .checked_add(amount - available)
                .ok_or(VaultError::Overflow)?;
        }
        account.locked += amount;
        Ok(())
    }

    fn unlock(&self, user: &Address, asset: &AssetId, amount: Amount) -> Result<(), VaultError> {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts.entry((user.clone(), asset.clone())).or_default();
        if account.locked < amount {
            return Err(VaultError::InsufficientLocked {
                user: user.clone(),
                asset: asset.clone(),
                needed: amount,
                locked: account.locked,
            });
        }
        account.locked -= amount;
        Ok(())
    }

    fn locked_balance(&self, user: &Address, asset: &AssetId) -> Amount {
        self.accounts
            .lock()
            .unwrap()
            .get(&(user.clone(), asset.clone()))
            .map_or(0, |a| a.locked)
    }

    fn balance(&self, user: &Address, asset: &AssetId) -> Amount {
        self.accounts
            .lock()
            .unwrap()
            .get(&(user.clone(), asset.clone()))
            .map_or(0, |a| a.balance)
    }
}

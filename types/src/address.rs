//! Identities of accounts, contracts and assets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity of an account or contract: a voter, a proposer, a chamber,
/// a governor target or the vault.
///
/// Addresses are opaque to the engine. They are compared, hashed and
/// ordered, never parsed.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Identifier of a fungible asset (the token contract's address).
///
/// Kept distinct from [`Address`] so an asset can never be passed where a
/// voter is expected.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(Address);

impl AssetId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Address::new(raw))
    }

    /// The token contract address backing this asset.
    pub fn address(&self) -> &Address {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Address> for AssetId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

//! Roles held in the address registry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability or well-known slot in the role registry.
///
/// Some roles are held by many addresses (`Governor`, `EligibleAsset`,
/// `Governance`); others name a singleton that the registry resolves to one
/// address (`UpperChamber`, `GovernanceToken`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A contract that may be the target of a proposal.
    Governor,
    /// May change chamber administration data (per-target policies).
    Governance,
    /// A wrapped LP asset that may be staked in the multi-asset chamber.
    EligibleAsset,
    /// May submit proposals where submission is restricted.
    Submitter,
    /// The single-asset chamber.
    UpperChamber,
    /// The asset staked in the single-asset chamber.
    GovernanceToken,
}

impl Role {
    /// Stable name used in logs and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Governor => "governor",
            Self::Governance => "governance",
            Self::EligibleAsset => "eligible_asset",
            Self::Submitter => "submitter",
            Self::UpperChamber => "upper_chamber",
            Self::GovernanceToken => "governance_token",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

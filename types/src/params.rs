//! Deploy-time parameters of a proposal chamber.
//!
//! Captured into each proposal at creation, so a later policy change never
//! alters a proposal that is already open.

use crate::error::ParamsError;
use serde::{Deserialize, Serialize};

const HOUR_SECS: u64 = 60 * 60;

/// Quorum and majority thresholds applied to a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetPolicy {
    /// Minimum participation as a fraction of supply (basis points).
    pub quorum_bips: u32,
    /// Share of "for" votes that must be strictly exceeded (basis points).
    pub majority_bips: u32,
}

impl TargetPolicy {
    pub fn validate(&self) -> Result<(), ParamsError> {
        check_bips("quorum_bips", self.quorum_bips)?;
        check_bips("majority_bips", self.majority_bips)?;
        if self.majority_bips == 0 {
            return Err(ParamsError::ZeroMajority);
        }
        Ok(())
    }
}

/// Constants a chamber is deployed with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChamberParams {
    /// Default quorum for proposals without a per-target override.
    pub quorum_bips: u32,

    /// Default majority for proposals without a per-target override.
    pub majority_bips: u32,

    /// Length of the voting period in seconds.
    pub voting_window_secs: u64,

    /// Fraction of token supply the proposer locks as a "for" vote when
    /// submitting. Only the single-asset chamber takes a bond.
    #[serde(default)]
    pub submission_bond_bips: Option<u32>,
}

impl ChamberParams {
    /// The single-asset chamber as originally deployed: 5% quorum, 51%
    /// majority, 48h window, 5% submission bond.
    pub fn upper_defaults() -> Self {
        Self {
            quorum_bips: 500,
            majority_bips: 5100,
            voting_window_secs: 48 * HOUR_SECS,
            submission_bond_bips: Some(500),
        }
    }

    /// The multi-asset chamber as originally deployed: 20% quorum, 51%
    /// majority, 48h window, no bond.
    pub fn lower_defaults() -> Self {
        Self {
            quorum_bips: 2000,
            majority_bips: 5100,
            voting_window_secs: 48 * HOUR_SECS,
            submission_bond_bips: None,
        }
    }

    /// The chamber-wide thresholds as a policy.
    pub fn default_policy(&self) -> TargetPolicy {
        TargetPolicy {
            quorum_bips: self.quorum_bips,
            majority_bips: self.majority_bips,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.default_policy().validate()?;
        if self.voting_window_secs == 0 {
            return Err(ParamsError::ZeroVotingWindow);
        }
        match self.submission_bond_bips {
            Some(0) => Err(ParamsError::ZeroSubmissionBond),
            Some(bips) => check_bips("submission_bond_bips", bips),
            None => Ok(()),
        }
    }
}

fn check_bips(name: &'static str, value: u32) -> Result<(), ParamsError> {
    if u128::from(value) > crate::BIPS_DENOMINATOR {
        return Err(ParamsError::BipsOutOfRange { name, value });
    }
    Ok(())
}

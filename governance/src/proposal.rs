//! Proposal records and their terminal outcomes.

use quad_types::{Address, Amount, AssetId, Points, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// For/against stake recorded on one asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTally {
    pub for_votes: Amount,
    pub against_votes: Amount,
}

impl AssetTally {
    pub fn total(&self) -> Option<Amount> {
        self.for_votes.checked_add(self.against_votes)
    }
}

/// Raw tallies of a proposal, keyed by asset.
///
/// The single-asset chamber only ever has one entry.
pub type Tally = BTreeMap<AssetId, AssetTally>;

/// Why a proposal was denied. Serialized as its numeric code, the value
/// carried by the denial event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum DenyReason {
    NoQuorum = 0,
    NoMajority = 1,
}

impl DenyReason {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Error)]
#[error("unknown deny reason code {0}")]
pub struct UnknownDenyReason(pub u8);

impl From<DenyReason> for u8 {
    fn from(reason: DenyReason) -> Self {
        reason.code()
    }
}

impl TryFrom<u8> for DenyReason {
    type Error = UnknownDenyReason;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NoQuorum),
            1 => Ok(Self::NoMajority),
            other => Err(UnknownDenyReason(other)),
        }
    }
}

/// The decision reached at evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Denied(DenyReason),
}

/// Stored result of evaluating a proposal. Written once.
///
/// Vote figures are in the chamber's comparison unit: raw token amounts in
/// the single-asset chamber, normalized points in the multi-asset chamber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalOutcome {
    pub decision: Decision,
    pub total_votes: Points,
    pub votes_in_favor: Points,
    pub votes_against: Points,
    pub evaluated_at: Timestamp,
}

impl ProposalOutcome {
    pub fn is_approved(&self) -> bool {
        self.decision == Decision::Approved
    }
}

/// Where a proposal is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting votes.
    Voting,
    /// Deadline passed, not yet evaluated.
    AwaitingEvaluation,
    Approved,
    Denied(DenyReason),
}

/// A governance proposal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Who the proposal is made on behalf of.
    pub proposer: Address,
    /// Governor that receives `action` on approval.
    pub target: Address,
    /// Opaque call payload. May be empty.
    pub action: Vec<u8>,
    pub description: String,
    /// Minimum `for + against`, in the chamber's comparison unit.
    pub quorum: Points,
    pub majority_bips: u32,
    pub created_at: Timestamp,
    pub deadline: Timestamp,
    pub tally: Tally,
    /// True from creation until evaluation.
    pub active: bool,
    pub outcome: Option<ProposalOutcome>,
}

impl Proposal {
    /// Whether votes are accepted at `now`.
    pub fn is_open(&self, now: Timestamp) -> bool {
        self.active && !self.deadline.is_reached(now)
    }

    pub fn status(&self, now: Timestamp) -> ProposalStatus {
        match self.outcome {
            Some(ProposalOutcome {
                decision: Decision::Approved,
                ..
            }) => ProposalStatus::Approved,
            Some(ProposalOutcome {
                decision: Decision::Denied(reason),
                ..
            }) => ProposalStatus::Denied(reason),
            None if self.deadline.is_reached(now) => ProposalStatus::AwaitingEvaluation,
            None => ProposalStatus::Voting,
        }
    }

    /// Tally for one asset; zero if nobody has staked it.
    pub fn asset_tally(&self, asset: &AssetId) -> AssetTally {
        self.tally.get(asset).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(deadline: u64) -> Proposal {
        Proposal {
            id: ProposalId::FIRST,
            proposer: Address::new("alice"),
            target: Address::new("fee-governor"),
            action: Vec::new(),
            description: "lower fees".into(),
            quorum: 10,
            majority_bips: 5100,
            created_at: Timestamp::new(0),
            deadline: Timestamp::new(deadline),
            tally: Tally::new(),
            active: true,
            outcome: None,
        }
    }

    #[test]
    fn status_follows_deadline_then_outcome() {
        let mut p = proposal(100);
        assert_eq!(p.status(Timestamp::new(99)), ProposalStatus::Voting);
        assert_eq!(p.status(Timestamp::new(100)), ProposalStatus::AwaitingEvaluation);

        p.active = false;
        p.outcome = Some(ProposalOutcome {
            decision: Decision::Denied(DenyReason::NoMajority),
            total_votes: 0,
            votes_in_favor: 0,
            votes_against: 0,
            evaluated_at: Timestamp::new(100),
        });
        assert_eq!(
            p.status(Timestamp::new(500)),
            ProposalStatus::Denied(DenyReason::NoMajority)
        );
    }

    #[test]
    fn deny_reason_codes() {
        assert_eq!(DenyReason::NoQuorum.code(), 0);
        assert_eq!(DenyReason::NoMajority.code(), 1);
        assert_eq!(serde_json::to_string(&DenyReason::NoMajority).unwrap(), "1");
        assert_eq!(serde_json::from_str::<DenyReason>("0").unwrap(), DenyReason::NoQuorum);
        assert!(serde_json::from_str::<DenyReason>("2").is_err());
    }

    #[test]
    fn open_only_before_deadline() {
        let p = proposal(100);
        assert!(p.is_open(Timestamp::new(99)));
        assert!(!p.is_open(Timestamp::new(100)));
    }
}

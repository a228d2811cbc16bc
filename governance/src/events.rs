//! Append-only record of everything a chamber did.

use crate::proposal::DenyReason;
use quad_types::{Address, Amount, AssetId, Points, ProposalId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChamberEvent {
    ProposalCreated {
        proposal_id: ProposalId,
        proposer: Address,
        target: Address,
        deadline: Timestamp,
    },
    VoteCast {
        proposal_id: ProposalId,
        voter: Address,
        asset: AssetId,
        amount: Amount,
        is_for: bool,
    },
    ProposalApproved {
        proposal_id: ProposalId,
        total_votes: Points,
        votes_in_favor: Points,
        votes_against: Points,
    },
    ProposalDenied {
        proposal_id: ProposalId,
        total_votes: Points,
        votes_in_favor: Points,
        votes_against: Points,
        deny_reason: DenyReason,
    },
    /// The approved proposal was re-submitted to the lower chamber.
    ProposalForwarded {
        proposal_id: ProposalId,
        forwarded_as: ProposalId,
    },
    /// The approved proposal's action failed. The approval stands.
    ActionFailed {
        proposal_id: ProposalId,
        reason: String,
    },
    Withdrawn {
        proposal_id: ProposalId,
        voter: Address,
    },
}

impl ChamberEvent {
    pub fn proposal_id(&self) -> ProposalId {
        match self {
            Self::ProposalCreated { proposal_id, .. }
            | Self::VoteCast { proposal_id, .. }
            | Self::ProposalApproved { proposal_id, .. }
            | Self::ProposalDenied { proposal_id, .. }
            | Self::ProposalForwarded { proposal_id, .. }
            | Self::ActionFailed { proposal_id, .. }
            | Self::Withdrawn { proposal_id, .. } => *proposal_id,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<ChamberEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ChamberEvent) {
        self.events.push(event);
    }

    pub fn all(&self) -> &[ChamberEvent] {
        &self.events
    }

    pub fn for_proposal(&self, id: ProposalId) -> impl Iterator<Item = &ChamberEvent> {
        self.events.iter().filter(move |e| e.proposal_id() == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Newline-delimited JSON, one event per line, for audit export.
    pub fn to_json_lines(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for event in &self.events {
            out.push_str(&serde_json::to_string(event)?);
            out.push('\n');
        }
        Ok(out)
    }
}

//! Evaluation engine: the `Active -> {Approved, Denied}` transition.

use crate::action::{ApprovalHandler, Dispatch};
use crate::error::GovernanceError;
use crate::events::ChamberEvent;
use crate::proposal::{Decision, DenyReason, ProposalOutcome};
use crate::state::ChamberState;
use crate::weighting::{VoteWeighting, Weighed};
use quad_types::amount::mul_div;
use quad_types::{Points, ProposalId, Timestamp, BIPS_DENOMINATOR};

/// Apply quorum then majority to weighed votes.
///
/// Majority is strict: `for` must exceed `majority_bips` of the total, so
/// an exact tie with the threshold denies.
pub fn decide(
    weighed: Weighed,
    quorum: Points,
    majority_bips: u32,
) -> Result<Decision, GovernanceError> {
    let total = weighed.total()?;
    if total < quorum {
        return Ok(Decision::Denied(DenyReason::NoQuorum));
    }
    // for * 10000 <= total * bips  <=>  for <= floor(total * bips / 10000)
    let threshold = mul_div(total, u128::from(majority_bips), BIPS_DENOMINATOR)
        .ok_or(GovernanceError::Overflow)?;
    if weighed.for_votes <= threshold {
        return Ok(Decision::Denied(DenyReason::NoMajority));
    }
    Ok(Decision::Approved)
}

pub struct EvaluationEngine;

impl EvaluationEngine {
    /// Evaluate a proposal whose deadline has passed.
    ///
    /// Already-evaluated proposals return their stored outcome and nothing
    /// else happens. On approval, the outcome is committed before the
    /// approval handler runs, so anything the handler triggers sees a
    /// terminal proposal.
    pub fn evaluate(
        &self,
        state: &mut ChamberState,
        weighting: &dyn VoteWeighting,
        approval: &dyn ApprovalHandler,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalOutcome, GovernanceError> {
        let proposal = state.store.get(id)?;
        if let Some(outcome) = proposal.outcome {
            return Ok(outcome);
        }
        if !proposal.deadline.is_reached(now) {
            return Err(GovernanceError::VotingOngoing(id));
        }

        let weighed = weighting.weigh(&proposal.tally)?;
        let decision = decide(weighed, proposal.quorum, proposal.majority_bips)?;
        let outcome = ProposalOutcome {
            decision,
            total_votes: weighed.total()?,
            votes_in_favor: weighed.for_votes,
            votes_against: weighed.against_votes,
            evaluated_at: now,
        };

        let proposal = state.store.get_mut(id)?;
        proposal.active = false;
        proposal.outcome = Some(outcome);
        let snapshot = proposal.clone();

        match decision {
            Decision::Approved => {
                state.events.record(ChamberEvent::ProposalApproved {
                    proposal_id: id,
                    total_votes: outcome.total_votes,
                    votes_in_favor: outcome.votes_in_favor,
                    votes_against: outcome.votes_against,
                });
                tracing::info!(
                    proposal = %id,
                    total = outcome.total_votes,
                    in_favor = outcome.votes_in_favor,
                    against = outcome.votes_against,
                    "proposal approved"
                );
            }
            Decision::Denied(reason) => {
                state.events.record(ChamberEvent::ProposalDenied {
                    proposal_id: id,
                    total_votes: outcome.total_votes,
                    votes_in_favor: outcome.votes_in_favor,
                    votes_against: outcome.votes_against,
                    deny_reason: reason,
                });
                tracing::info!(
                    proposal = %id,
                    total = outcome.total_votes,
                    in_favor = outcome.votes_in_favor,
                    against = outcome.votes_against,
                    reason = ?reason,
                    "proposal denied"
                );
                return Ok(outcome);
            }
        }

        let target = state.store.target(id)?.clone();
        match approval.on_approved(&snapshot, &target, now) {
            Ok(Dispatch::Forwarded(forwarded_as)) => {
                state.events.record(ChamberEvent::ProposalForwarded {
                    proposal_id: id,
                    forwarded_as,
                });
                tracing::info!(proposal = %id, %forwarded_as, "approved proposal forwarded");
            }
            Ok(Dispatch::Invoked) => {
                tracing::info!(proposal = %id, target = %snapshot.target, "approved action executed");
            }
            Ok(Dispatch::Skipped) => {
                tracing::debug!(proposal = %id, "approved proposal carries no action");
            }
            Err(e) => {
                tracing::warn!(proposal = %id, target = %snapshot.target, "approved action failed: {e}");
                state.events.record(ChamberEvent::ActionFailed {
                    proposal_id: id,
                    reason: e.to_string(),
                });
            }
        }
        Ok(outcome)
    }
}

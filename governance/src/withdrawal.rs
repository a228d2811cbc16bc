//! Withdrawal engine: hands a voter's stake back once the proposal is over.

use crate::action::ApprovalHandler;
use crate::custody::StakeCustody;
use crate::error::GovernanceError;
use crate::evaluation::EvaluationEngine;
use crate::events::ChamberEvent;
use crate::state::ChamberState;
use crate::weighting::VoteWeighting;
use quad_types::{Address, Amount, AssetId, ProposalId, Timestamp};

/// What a withdrawal returned, per asset.
pub type Refund = Vec<(AssetId, Amount)>;

pub struct WithdrawalEngine;

impl WithdrawalEngine {
    /// Refund everything `voter` locked on proposal `id`.
    ///
    /// A proposal still active past its deadline is evaluated first. The
    /// refund does not depend on the outcome.
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw(
        &self,
        state: &mut ChamberState,
        custody: &dyn StakeCustody,
        weighting: &dyn VoteWeighting,
        approval: &dyn ApprovalHandler,
        id: ProposalId,
        voter: &Address,
        now: Timestamp,
    ) -> Result<Refund, GovernanceError> {
        let proposal = state.store.get(id)?;
        if proposal.is_open(now) {
            return Err(GovernanceError::VotingOngoing(id));
        }
        let needs_evaluation = proposal.active;

        let refund: Refund = state
            .ledger
            .withdrawable(id, voter)?
            .locked()
            .map(|(asset, amount)| (asset.clone(), amount))
            .collect();

        for (asset, amount) in &refund {
            custody.ensure_releasable(voter, asset, *amount)?;
        }
        if needs_evaluation {
            EvaluationEngine.evaluate(state, weighting, approval, id, now)?;
        }
        for (asset, amount) in &refund {
            custody.release(voter, asset, *amount)?;
        }
        state.ledger.mark_withdrawn(id, voter)?;
        state.events.record(ChamberEvent::Withdrawn {
            proposal_id: id,
            voter: voter.clone(),
        });

        tracing::info!(
            proposal = %id,
            voter = %voter,
            assets = refund.len(),
            "stake withdrawn"
        );
        Ok(refund)
    }
}

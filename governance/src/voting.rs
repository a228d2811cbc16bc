//! Voting engine: validates a ballot, locks its stake and updates tallies.

use crate::custody::StakeCustody;
use crate::error::GovernanceError;
use crate::events::ChamberEvent;
use crate::ledger::StakeLedger;
use crate::proposal::Proposal;
use crate::state::ChamberState;
use quad_types::{Address, Amount, AssetId, ProposalId, Timestamp};

/// One vote request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub proposal: ProposalId,
    pub voter: Address,
    pub asset: AssetId,
    pub amount: Amount,
    pub is_for: bool,
}

pub struct VotingEngine;

impl VotingEngine {
    /// Cast a ballot on an existing proposal.
    ///
    /// Nothing is recorded unless the stake was successfully taken into
    /// custody, and no stake is taken unless the ballot is valid.
    pub fn cast(
        &self,
        state: &mut ChamberState,
        custody: &dyn StakeCustody,
        ballot: &Ballot,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let proposal = state.store.get_mut(ballot.proposal)?;
        if !proposal.is_open(now) {
            return Err(GovernanceError::ProposalInactive(ballot.proposal));
        }
        self.stake(proposal, &mut state.ledger, custody, ballot)?;
        state.events.record(vote_event(ballot));
        Ok(())
    }

    /// Lock the ballot's stake and apply it to `proposal` and the ledger.
    ///
    /// Does not check the deadline, so the single-asset chamber can stake the
    /// proposer's bond on a proposal that has not been stored yet.
    pub fn stake(
        &self,
        proposal: &mut Proposal,
        ledger: &mut StakeLedger,
        custody: &dyn StakeCustody,
        ballot: &Ballot,
    ) -> Result<(), GovernanceError> {
        ledger.check_direction(ballot.proposal, &ballot.voter, ballot.is_for)?;
        if ballot.amount == 0 {
            return Err(GovernanceError::ZeroAmount);
        }

        let new_receipt_amount =
            ledger.projected_amount(ballot.proposal, &ballot.voter, &ballot.asset, ballot.amount)?;
        let mut asset_tally = proposal.asset_tally(&ballot.asset);
        let side = if ballot.is_for {
            &mut asset_tally.for_votes
        } else {
            &mut asset_tally.against_votes
        };
        *side = side
            .checked_add(ballot.amount)
            .ok_or(GovernanceError::Overflow)?;
        asset_tally.total().ok_or(GovernanceError::Overflow)?;

        custody.pull(&ballot.voter, &ballot.asset, ballot.amount)?;

        proposal.tally.insert(ballot.asset.clone(), asset_tally);
        ledger.record_stake(
            ballot.proposal,
            &ballot.voter,
            &ballot.asset,
            new_receipt_amount,
            ballot.is_for,
        );

        tracing::debug!(
            proposal = %ballot.proposal,
            voter = %ballot.voter,
            asset = %ballot.asset,
            amount = ballot.amount,
            is_for = ballot.is_for,
            "vote recorded"
        );
        Ok(())
    }
}

pub(crate) fn vote_event(ballot: &Ballot) -> ChamberEvent {
    ChamberEvent::VoteCast {
        proposal_id: ballot.proposal,
        voter: ballot.voter.clone(),
        asset: ballot.asset.clone(),
        amount: ballot.amount,
        is_for: ballot.is_for,
    }
}

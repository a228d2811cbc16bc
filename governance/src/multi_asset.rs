//! Multi-asset ("lower") chamber.
//!
//! Any asset the authority lists as [`Role::EligibleAsset`] can be staked.
//! Stakes stay in the vault under lock, and each asset's tally is weighed in
//! points relative to its own total supply before quorum and majority are
//! applied. Only the upper chamber, or an address holding
//! [`Role::Submitter`], may open proposals here.

use crate::action::{DirectInvocation, ExecutableAction};
use crate::authority::Authority;
use crate::custody::VaultCustody;
use crate::error::GovernanceError;
use crate::evaluation::EvaluationEngine;
use crate::events::ChamberEvent;
use crate::ledger::VoteReceipt;
use crate::proposal::{AssetTally, Proposal, ProposalOutcome, Tally};
use crate::state::ChamberState;
use crate::token::TokenLedger;
use crate::vault::Vault;
use crate::voting::{Ballot, VotingEngine};
use crate::weighting::{SupplyWeighting, VoteWeighting, Weighed};
use crate::withdrawal::{Refund, WithdrawalEngine};
use quad_types::amount::bips_of;
use quad_types::{
    Address, Amount, AssetId, ChamberParams, ParamsError, ProposalId, Role, Timestamp,
    POINTS_SCALE,
};
use std::sync::Arc;

pub struct MultiAssetChamber {
    address: Address,
    params: ChamberParams,
    authority: Arc<dyn Authority>,
    custody: VaultCustody,
    weighting: SupplyWeighting,
    state: ChamberState,
}

impl MultiAssetChamber {
    pub fn new(
        address: Address,
        params: ChamberParams,
        authority: Arc<dyn Authority>,
        vault: Arc<dyn Vault>,
        token: Arc<dyn TokenLedger>,
    ) -> Result<Self, GovernanceError> {
        params.validate()?;
        if params.submission_bond_bips.is_some() {
            return Err(ParamsError::UnexpectedSubmissionBond.into());
        }

        tracing::info!(
            chamber = %address,
            quorum_bips = params.quorum_bips,
            majority_bips = params.majority_bips,
            "multi-asset chamber created"
        );

        Ok(Self {
            address,
            params,
            authority,
            custody: VaultCustody::new(vault),
            weighting: SupplyWeighting::new(token),
            state: ChamberState::new(),
        })
    }

    fn may_submit(&self, caller: &Address) -> bool {
        self.authority.singleton(Role::UpperChamber).as_ref() == Some(caller)
            || self.authority.has_role(Role::Submitter, caller)
    }

    /// Open a proposal on behalf of `proposer`. `caller` is the submitting
    /// chamber or operator and must be authorized.
    pub fn submit(
        &mut self,
        caller: &Address,
        proposer: &Address,
        target: Arc<dyn ExecutableAction>,
        action: Vec<u8>,
        description: &str,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        if !self.may_submit(caller) {
            return Err(GovernanceError::UnauthorizedSubmitter(caller.clone()));
        }
        let target_address = target.address();
        if !self.authority.has_role(Role::Governor, &target_address) {
            return Err(GovernanceError::InvalidTarget(target_address));
        }

        let policy = self.state.policy_for(&target_address, &self.params);
        let quorum = bips_of(POINTS_SCALE, policy.quorum_bips).ok_or(GovernanceError::Overflow)?;
        let id = self.state.store.next_id();
        let deadline = now.plus_secs(self.params.voting_window_secs);
        let proposal = Proposal {
            id,
            proposer: proposer.clone(),
            target: target_address.clone(),
            action,
            description: description.to_string(),
            quorum,
            majority_bips: policy.majority_bips,
            created_at: now,
            deadline,
            tally: Tally::new(),
            active: true,
            outcome: None,
        };
        self.state.store.insert(proposal, target)?;
        self.state.events.record(ChamberEvent::ProposalCreated {
            proposal_id: id,
            proposer: proposer.clone(),
            target: target_address.clone(),
            deadline,
        });

        tracing::info!(
            proposal = %id,
            caller = %caller,
            proposer = %proposer,
            target = %target_address,
            "proposal created"
        );
        Ok(id)
    }

    /// Lock `amount` of `asset` in the vault as a vote on proposal `id`.
    pub fn vote(
        &mut self,
        voter: &Address,
        id: ProposalId,
        asset: &AssetId,
        amount: Amount,
        is_for: bool,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if !self.state.store.get(id)?.is_open(now) {
            return Err(GovernanceError::ProposalInactive(id));
        }
        self.state.ledger.check_direction(id, voter, is_for)?;
        if amount == 0 {
            return Err(GovernanceError::ZeroAmount);
        }
        if !self.authority.has_role(Role::EligibleAsset, asset.address()) {
            return Err(GovernanceError::AssetNotEligible(asset.clone()));
        }

        let ballot = Ballot {
            proposal: id,
            voter: voter.clone(),
            asset: asset.clone(),
            amount,
            is_for,
        };
        VotingEngine.cast(&mut self.state, &self.custody, &ballot, now)
    }

    /// Decide proposal `id` once its deadline has passed.
    pub fn evaluate(
        &mut self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalOutcome, GovernanceError> {
        EvaluationEngine.evaluate(
            &mut self.state,
            &self.weighting,
            &DirectInvocation,
            id,
            now,
        )
    }

    /// Unlock every asset `voter` staked on proposal `id`.
    pub fn withdraw(
        &mut self,
        voter: &Address,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<Refund, GovernanceError> {
        WithdrawalEngine.withdraw(
            &mut self.state,
            &self.custody,
            &self.weighting,
            &DirectInvocation,
            id,
            voter,
            now,
        )
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.state.store.get(id)
    }

    /// Raw `(for, against)` totals of one asset.
    pub fn proposal_votes(
        &self,
        id: ProposalId,
        asset: &AssetId,
    ) -> Result<AssetTally, GovernanceError> {
        Ok(self.state.store.get(id)?.asset_tally(asset))
    }

    /// Sum of every receipt's locked `asset` on proposal `id`.
    pub fn total_locked(&self, id: ProposalId, asset: &AssetId) -> Result<Amount, GovernanceError> {
        self.state.store.get(id)?;
        self.state
            .ledger
            .total_recorded(id, asset)
            .ok_or(GovernanceError::Overflow)
    }

    /// Current `(for, against)` in points, as evaluation would see them.
    pub fn proposal_points(&self, id: ProposalId) -> Result<Weighed, GovernanceError> {
        self.weighting.weigh(&self.state.store.get(id)?.tally)
    }

    pub fn voter_receipt(&self, id: ProposalId, voter: &Address) -> Option<&VoteReceipt> {
        self.state.ledger.receipt(id, voter)
    }

    pub fn proposal_count(&self) -> usize {
        self.state.store.len()
    }

    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.state.store.iter()
    }

    pub fn events(&self) -> &[ChamberEvent] {
        self.state.events.all()
    }

    pub fn events_for(&self, id: ProposalId) -> impl Iterator<Item = &ChamberEvent> {
        self.state.events.for_proposal(id)
    }

    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        self.state.events.to_json_lines()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn params(&self) -> &ChamberParams {
        &self.params
    }
}

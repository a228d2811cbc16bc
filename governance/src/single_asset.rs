//! Single-asset ("upper") chamber.
//!
//! Voting power is the raw amount of one governance token. Submitting a
//! proposal costs the proposer a bond of `submission_bond_bips` of the token
//! supply, which is staked as their first "for" vote and refunded like any
//! other stake. Votes are escrowed on the chamber's own token balance.

use crate::action::{ApprovalHandler, DirectInvocation, ExecutableAction};
use crate::authority::{require_role, resolve_singleton, Authority};
use crate::custody::TokenEscrow;
use crate::error::GovernanceError;
use crate::evaluation::EvaluationEngine;
use crate::events::ChamberEvent;
use crate::forward::{Forwarder, ProposalSink};
use crate::ledger::VoteReceipt;
use crate::proposal::{AssetTally, Proposal, ProposalOutcome, Tally};
use crate::state::ChamberState;
use crate::token::TokenLedger;
use crate::voting::{vote_event, Ballot, VotingEngine};
use crate::weighting::RawWeighting;
use crate::withdrawal::{Refund, WithdrawalEngine};
use quad_types::amount::bips_of;
use quad_types::{
    Address, Amount, AssetId, ChamberParams, ParamsError, ProposalId, Role, TargetPolicy,
    Timestamp,
};
use std::sync::Arc;

pub struct SingleAssetChamber {
    address: Address,
    params: ChamberParams,
    bond_bips: u32,
    asset: AssetId,
    authority: Arc<dyn Authority>,
    token: Arc<dyn TokenLedger>,
    custody: TokenEscrow,
    approval: Box<dyn ApprovalHandler>,
    state: ChamberState,
}

impl SingleAssetChamber {
    /// Create a chamber living at `address`.
    ///
    /// The governance token is the authority's
    /// [`Role::GovernanceToken`] singleton. Approved proposals invoke their
    /// target directly until [`Self::forward_to`] is called.
    pub fn new(
        address: Address,
        params: ChamberParams,
        authority: Arc<dyn Authority>,
        token: Arc<dyn TokenLedger>,
    ) -> Result<Self, GovernanceError> {
        params.validate()?;
        let bond_bips = params
            .submission_bond_bips
            .ok_or(ParamsError::MissingSubmissionBond)?;
        let asset = AssetId::from(resolve_singleton(authority.as_ref(), Role::GovernanceToken)?);
        let custody = TokenEscrow::new(Arc::clone(&token), address.clone());

        tracing::info!(
            chamber = %address,
            asset = %asset,
            quorum_bips = params.quorum_bips,
            majority_bips = params.majority_bips,
            bond_bips,
            "single-asset chamber created"
        );

        Ok(Self {
            address,
            params,
            bond_bips,
            asset,
            authority,
            token,
            custody,
            approval: Box::new(DirectInvocation),
            state: ChamberState::new(),
        })
    }

    /// Forward approved proposals to `sink` instead of invoking their target.
    pub fn forward_to(&mut self, sink: Arc<dyn ProposalSink>) {
        self.approval = Box::new(Forwarder::new(self.address.clone(), sink));
    }

    /// Override quorum and majority for proposals created for `target` from
    /// now on. Open proposals keep the thresholds they captured.
    pub fn set_target_policy(
        &mut self,
        caller: &Address,
        target: &Address,
        policy: TargetPolicy,
    ) -> Result<(), GovernanceError> {
        require_role(self.authority.as_ref(), Role::Governance, caller)?;
        require_role(self.authority.as_ref(), Role::Governor, target)
            .map_err(|_| GovernanceError::InvalidTarget(target.clone()))?;
        policy.validate()?;
        self.state.policies.insert(target.clone(), policy);
        tracing::info!(
            target = %target,
            quorum_bips = policy.quorum_bips,
            majority_bips = policy.majority_bips,
            "target policy updated"
        );
        Ok(())
    }

    /// Open a proposal and stake the proposer's bond as a "for" vote.
    ///
    /// Fails without side effects if the target is not a governor or the
    /// proposer cannot cover the bond.
    pub fn submit(
        &mut self,
        proposer: &Address,
        target: Arc<dyn ExecutableAction>,
        action: Vec<u8>,
        description: &str,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        let target_address = target.address();
        if !self.authority.has_role(Role::Governor, &target_address) {
            return Err(GovernanceError::InvalidTarget(target_address));
        }

        let supply = self.token.total_supply(&self.asset)?;
        let policy = self.state.policy_for(&target_address, &self.params);
        let quorum = bips_of(supply, policy.quorum_bips).ok_or(GovernanceError::Overflow)?;
        let bond = bips_of(supply, self.bond_bips).ok_or(GovernanceError::Overflow)?;

        let id = self.state.store.next_id();
        id.next().ok_or(GovernanceError::Overflow)?;
        let mut draft = Proposal {
            id,
            proposer: proposer.clone(),
            target: target_address.clone(),
            action,
            description: description.to_string(),
            quorum,
            majority_bips: policy.majority_bips,
            created_at: now,
            deadline: now.plus_secs(self.params.voting_window_secs),
            tally: Tally::new(),
            active: true,
            outcome: None,
        };

        let bond_ballot = Ballot {
            proposal: id,
            voter: proposer.clone(),
            asset: self.asset.clone(),
            amount: bond,
            is_for: true,
        };
        // A supply too small to yield a non-zero bond opens the proposal
        // without one.
        if bond > 0 {
            VotingEngine.stake(&mut draft, &mut self.state.ledger, &self.custody, &bond_ballot)?;
        }

        let deadline = draft.deadline;
        tracing::info!(
            proposal = %id,
            proposer = %proposer,
            target = %target_address,
            bond,
            quorum,
            voting_window_secs = self.params.voting_window_secs,
            action = %hex::encode(&draft.action),
            "proposal created"
        );
        self.state.store.insert(draft, target)?;
        self.state.events.record(ChamberEvent::ProposalCreated {
            proposal_id: id,
            proposer: proposer.clone(),
            target: target_address,
            deadline,
        });
        if bond > 0 {
            self.state.events.record(vote_event(&bond_ballot));
        }
        Ok(id)
    }

    /// Stake `amount` of the governance token on proposal `id`.
    pub fn vote(
        &mut self,
        voter: &Address,
        id: ProposalId,
        amount: Amount,
        is_for: bool,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let ballot = Ballot {
            proposal: id,
            voter: voter.clone(),
            asset: self.asset.clone(),
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
            &RawWeighting,
            self.approval.as_ref(),
            id,
            now,
        )
    }

    /// Refund `voter`'s stake on proposal `id`, evaluating it first if needed.
    pub fn withdraw(
        &mut self,
        voter: &Address,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<Amount, GovernanceError> {
        let refund: Refund = WithdrawalEngine.withdraw(
            &mut self.state,
            &self.custody,
            &RawWeighting,
            self.approval.as_ref(),
            id,
            voter,
            now,
        )?;
        Ok(refund.first().map(|(_, amount)| *amount).unwrap_or(0))
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn proposal(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.state.store.get(id)
    }

    /// `(for, against)` raw token totals.
    pub fn proposal_votes(&self, id: ProposalId) -> Result<AssetTally, GovernanceError> {
        Ok(self.state.store.get(id)?.asset_tally(&self.asset))
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

    /// Newline-delimited JSON of every event so far.
    pub fn export_events(&self) -> Result<String, serde_json::Error> {
        self.state.events.to_json_lines()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn asset(&self) -> &AssetId {
        &self.asset
    }

    pub fn params(&self) -> &ChamberParams {
        &self.params
    }

    /// The target policy a new proposal to `target` would capture.
    pub fn policy_for(&self, target: &Address) -> TargetPolicy {
        self.state.policy_for(target, &self.params)
    }
}

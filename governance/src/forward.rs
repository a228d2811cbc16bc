//! Bicameral forwarding: an approval in the upper chamber becomes a new
//! proposal in the lower chamber.

use crate::action::{ApprovalHandler, Dispatch, ExecutableAction};
use crate::error::GovernanceError;
use crate::multi_asset::MultiAssetChamber;
use crate::proposal::Proposal;
use quad_types::{Address, ProposalId, Timestamp};
use std::sync::{Arc, Mutex};

/// An approved proposal re-submitted on behalf of its original proposer.
#[derive(Clone)]
pub struct ForwardedProposal {
    pub proposer: Address,
    pub target: Arc<dyn ExecutableAction>,
    pub action: Vec<u8>,
    pub description: String,
}

/// Anything that accepts forwarded proposals.
pub trait ProposalSink: Send + Sync {
    /// Submit `request` as if called by `from`. Returns the new proposal's id
    /// in the receiving chamber.
    fn submit_forwarded(
        &self,
        from: &Address,
        request: ForwardedProposal,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError>;
}

impl ProposalSink for Mutex<MultiAssetChamber> {
    fn submit_forwarded(
        &self,
        from: &Address,
        request: ForwardedProposal,
        now: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        let mut chamber = self
            .lock()
            .map_err(|_| GovernanceError::Forward("lower chamber lock poisoned".into()))?;
        chamber.submit(
            from,
            &request.proposer,
            request.target,
            request.action,
            &request.description,
            now,
        )
    }
}

/// Approval handler that forwards instead of invoking the target.
pub struct Forwarder {
    origin: Address,
    sink: Arc<dyn ProposalSink>,
}

impl Forwarder {
    /// `origin` is the forwarding chamber's address, which the sink checks.
    pub fn new(origin: Address, sink: Arc<dyn ProposalSink>) -> Self {
        Self { origin, sink }
    }
}

impl ApprovalHandler for Forwarder {
    fn on_approved(
        &self,
        proposal: &Proposal,
        target: &Arc<dyn ExecutableAction>,
        now: Timestamp,
    ) -> Result<Dispatch, GovernanceError> {
        let request = ForwardedProposal {
            proposer: proposal.proposer.clone(),
            target: Arc::clone(target),
            action: proposal.action.clone(),
            description: proposal.description.clone(),
        };
        let forwarded_as = self.sink.submit_forwarded(&self.origin, request, now)?;
        Ok(Dispatch::Forwarded(forwarded_as))
    }
}

//! What happens when a proposal is approved.
//!
//! A proposal names a governor target and an opaque payload. The chamber
//! holds the target only as an [`ExecutableAction`] and hands the approved
//! proposal to an [`ApprovalHandler`], which either calls the target
//! directly or forwards the proposal elsewhere (see [`crate::forward`]).

use crate::error::GovernanceError;
use crate::proposal::Proposal;
use quad_types::{Address, ProposalId, Timestamp};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("target rejected the call: {0}")]
    Rejected(String),

    #[error("target does not understand the payload")]
    UnknownCall,
}

/// A governor target that accepts an opaque call payload.
pub trait ExecutableAction: Send + Sync {
    /// Registry address of the target, checked against the governor role.
    fn address(&self) -> Address;

    fn invoke(&self, payload: &[u8]) -> Result<(), ActionError>;
}

/// Result of handing an approved proposal to its approval handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// The target was called with the payload.
    Invoked,
    /// The payload was empty; nothing to call.
    Skipped,
    /// The proposal was re-submitted to another chamber under this id.
    Forwarded(ProposalId),
}

/// Runs after a proposal has been recorded as approved.
///
/// By the time this is called the proposal is inactive and its tallies are
/// frozen; a failure here never changes the recorded outcome.
pub trait ApprovalHandler: Send + Sync {
    fn on_approved(
        &self,
        proposal: &Proposal,
        target: &Arc<dyn ExecutableAction>,
        now: Timestamp,
    ) -> Result<Dispatch, GovernanceError>;
}

/// Calls the proposal's target with its payload. Empty payloads are no-ops.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectInvocation;

impl ApprovalHandler for DirectInvocation {
    fn on_approved(
        &self,
        proposal: &Proposal,
        target: &Arc<dyn ExecutableAction>,
        _now: Timestamp,
    ) -> Result<Dispatch, GovernanceError> {
        if proposal.action.is_empty() {
            return Ok(Dispatch::Skipped);
        }
        target.invoke(&proposal.action)?;
        Ok(Dispatch::Invoked)
    }
}

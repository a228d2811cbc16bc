//! Proposal table: sequential ids, records and their governor targets.

use crate::action::ExecutableAction;
use crate::error::GovernanceError;
use crate::proposal::Proposal;
use quad_types::ProposalId;
use std::sync::Arc;

/// Owns every proposal of one chamber. Records are never removed.
///
/// Proposals and their targets are kept in parallel tables indexed by
/// [`ProposalId::index`].
#[derive(Default)]
pub struct ProposalStore {
    proposals: Vec<Proposal>,
    targets: Vec<Arc<dyn ExecutableAction>>,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the next inserted proposal will receive.
    pub fn next_id(&self) -> ProposalId {
        ProposalId::new(self.proposals.len() as u64)
    }

    /// Append a proposal. Its `id` must be [`Self::next_id`].
    pub fn insert(
        &mut self,
        proposal: Proposal,
        target: Arc<dyn ExecutableAction>,
    ) -> Result<ProposalId, GovernanceError> {
        let id = self.next_id();
        if proposal.id != id {
            return Err(GovernanceError::IdMismatch {
                drafted: proposal.id,
                expected: id,
            });
        }
        id.next().ok_or(GovernanceError::Overflow)?;
        self.proposals.push(proposal);
        self.targets.push(target);
        Ok(id)
    }

    pub fn get(&self, id: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(id.index())
            .ok_or(GovernanceError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: ProposalId) -> Result<&mut Proposal, GovernanceError> {
        self.proposals
            .get_mut(id.index())
            .ok_or(GovernanceError::NotFound(id))
    }

    pub fn target(&self, id: ProposalId) -> Result<&Arc<dyn ExecutableAction>, GovernanceError> {
        self.targets
            .get(id.index())
            .ok_or(GovernanceError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// All proposals in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.iter()
    }
}

//! Mutable state shared by the engines of one chamber.

use crate::events::EventLog;
use crate::ledger::StakeLedger;
use crate::store::ProposalStore;
use quad_types::{Address, ChamberParams, TargetPolicy};
use std::collections::BTreeMap;

/// Everything a chamber owns. Engines borrow it mutably for the duration of
/// one operation; fields are public so an engine can borrow the store and
/// the ledger at the same time.
#[derive(Default)]
pub struct ChamberState {
    pub store: ProposalStore,
    pub ledger: StakeLedger,
    pub events: EventLog,
    /// Per-target overrides of the chamber-wide thresholds.
    pub policies: BTreeMap<Address, TargetPolicy>,
}

impl ChamberState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Thresholds a new proposal to `target` captures.
    pub fn policy_for(&self, target: &Address, params: &ChamberParams) -> TargetPolicy {
        self.policies
            .get(target)
            .copied()
            .unwrap_or_else(|| params.default_policy())
    }
}

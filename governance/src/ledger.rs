//! Stake ledger: who locked how much of which asset on which proposal.
//!
//! Pure bookkeeping. The ledger never moves funds; the voting and
//! withdrawal engines move funds through a [`crate::custody::StakeCustody`]
//! and record the result here.

use crate::error::GovernanceError;
use quad_types::{Address, Amount, AssetId, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One voter's participation in one proposal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub has_voted: bool,
    /// Fixed by the first vote.
    pub is_for: bool,
    /// Locked stake per asset. Only grows.
    pub amounts: BTreeMap<AssetId, Amount>,
    /// Set once, by the withdrawal engine.
    pub has_withdrawn: bool,
}

impl VoteReceipt {
    pub fn amount(&self, asset: &AssetId) -> Amount {
        self.amounts.get(asset).copied().unwrap_or(0)
    }

    /// Assets with a non-zero locked amount.
    pub fn locked(&self) -> impl Iterator<Item = (&AssetId, Amount)> {
        self.amounts
            .iter()
            .filter(|(_, amount)| **amount > 0)
            .map(|(asset, amount)| (asset, *amount))
    }
}

/// Receipts of every (proposal, voter) pair in one chamber.
#[derive(Debug, Default)]
pub struct StakeLedger {
    receipts: HashMap<(ProposalId, Address), VoteReceipt>,
}

impl StakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipt(&self, proposal: ProposalId, voter: &Address) -> Option<&VoteReceipt> {
        self.receipts.get(&(proposal, voter.clone()))
    }

    /// Fail if the voter already voted the other way on this proposal.
    pub fn check_direction(
        &self,
        proposal: ProposalId,
        voter: &Address,
        is_for: bool,
    ) -> Result<(), GovernanceError> {
        match self.receipt(proposal, voter) {
            Some(receipt) if receipt.has_voted && receipt.is_for != is_for => {
                Err(GovernanceError::VoteDirectionLocked(proposal))
            }
            _ => Ok(()),
        }
    }

    /// The voter's locked amount of `asset` after adding `amount`, without
    /// recording anything.
    pub fn projected_amount(
        &self,
        proposal: ProposalId,
        voter: &Address,
        asset: &AssetId,
        amount: Amount,
    ) -> Result<Amount, GovernanceError> {
        let current = self
            .receipt(proposal, voter)
            .map(|r| r.amount(asset))
            .unwrap_or(0);
        current.checked_add(amount).ok_or(GovernanceError::Overflow)
    }

    /// Record a stake that has already been moved into custody.
    ///
    /// `new_amount` is the value returned by [`Self::projected_amount`], so
    /// this step cannot fail once the funds are locked.
    pub fn record_stake(
        &mut self,
        proposal: ProposalId,
        voter: &Address,
        asset: &AssetId,
        new_amount: Amount,
        is_for: bool,
    ) {
        let receipt = self
            .receipts
            .entry((proposal, voter.clone()))
            .or_default();
        if !receipt.has_voted {
            receipt.has_voted = true;
            receipt.is_for = is_for;
        }
        receipt.amounts.insert(asset.clone(), new_amount);
    }

    /// The receipt of a voter who may withdraw: present and not yet withdrawn.
    pub fn withdrawable(
        &self,
        proposal: ProposalId,
        voter: &Address,
    ) -> Result<&VoteReceipt, GovernanceError> {
        let receipt = self
            .receipt(proposal, voter)
            .filter(|r| r.has_voted)
            .ok_or_else(|| GovernanceError::NeverVoted {
                proposal,
                voter: voter.clone(),
            })?;
        if receipt.has_withdrawn {
            return Err(GovernanceError::AlreadyWithdrawn {
                proposal,
                voter: voter.clone(),
            });
        }
        Ok(receipt)
    }

    /// Flag a receipt as withdrawn. Fails under the same conditions as
    /// [`Self::withdrawable`].
    pub fn mark_withdrawn(
        &mut self,
        proposal: ProposalId,
        voter: &Address,
    ) -> Result<(), GovernanceError> {
        self.withdrawable(proposal, voter)?;
        if let Some(receipt) = self.receipts.get_mut(&(proposal, voter.clone())) {
            receipt.has_withdrawn = true;
        }
        Ok(())
    }

    /// Sum of all voters' locked `asset` on a proposal, withdrawn or not.
    pub fn total_recorded(&self, proposal: ProposalId, asset: &AssetId) -> Option<Amount> {
        self.receipts
            .iter()
            .filter(|((id, _), _)| *id == proposal)
            .try_fold(0u128, |acc, (_, r)| acc.checked_add(r.amount(asset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> Address {
        Address::new(name)
    }

    fn asset(name: &str) -> AssetId {
        AssetId::new(name)
    }

    #[test]
    fn direction_is_fixed_by_first_vote() {
        let mut ledger = StakeLedger::new();
        let id = ProposalId::FIRST;
        let a = voter("a");
        ledger.record_stake(id, &a, &asset("quad"), 5, true);

        assert!(ledger.check_direction(id, &a, true).is_ok());
        assert!(matches!(
            ledger.check_direction(id, &a, false),
            Err(GovernanceError::VoteDirectionLocked(_))
        ));
        // Another proposal is unaffected.
        assert!(ledger.check_direction(ProposalId::new(1), &a, false).is_ok());
    }

    #[test]
    fn same_direction_amounts_accumulate() {
        let mut ledger = StakeLedger::new();
        let id = ProposalId::FIRST;
        let a = voter("a");
        let quad = asset("quad");

        let first = ledger.projected_amount(id, &a, &quad, 3).unwrap();
        ledger.record_stake(id, &a, &quad, first, true);
        let second = ledger.projected_amount(id, &a, &quad, 4).unwrap();
        ledger.record_stake(id, &a, &quad, second, true);

        assert_eq!(ledger.receipt(id, &a).unwrap().amount(&quad), 7);
        assert_eq!(ledger.total_recorded(id, &quad), Some(7));
    }

    #[test]
    fn projected_amount_detects_overflow() {
        let mut ledger = StakeLedger::new();
        let id = ProposalId::FIRST;
        let a = voter("a");
        let quad = asset("quad");
        ledger.record_stake(id, &a, &quad, u128::MAX, true);
        assert!(matches!(
            ledger.projected_amount(id, &a, &quad, 1),
            Err(GovernanceError::Overflow)
        ));
    }

    #[test]
    fn withdraw_is_exactly_once() {
        let mut ledger = StakeLedger::new();
        let id = ProposalId::FIRST;
        let a = voter("a");

        assert!(matches!(
            ledger.mark_withdrawn(id, &a),
            Err(GovernanceError::NeverVoted { .. })
        ));

        ledger.record_stake(id, &a, &asset("quad"), 1, false);
        ledger.mark_withdrawn(id, &a).unwrap();
        assert!(matches!(
            ledger.mark_withdrawn(id, &a),
            Err(GovernanceError::AlreadyWithdrawn { .. })
        ));
    }

    #[test]
    fn locked_skips_zero_entries() {
        let mut receipt = VoteReceipt::default();
        receipt.amounts.insert(asset("x"), 0);
        receipt.amounts.insert(asset("y"), 9);
        let locked: Vec<_> = receipt.locked().collect();
        assert_eq!(locked, vec![(&asset("y"), 9)]);
    }
}

//! Turning raw tallies into comparable vote weight.

use crate::error::GovernanceError;
use crate::proposal::Tally;
use crate::token::TokenLedger;
use quad_types::amount::to_points;
use quad_types::Points;
use std::sync::Arc;

/// Weight of the "for" and "against" sides of a tally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Weighed {
    pub for_votes: Points,
    pub against_votes: Points,
}

impl Weighed {
    pub fn total(&self) -> Result<Points, GovernanceError> {
        self.for_votes
            .checked_add(self.against_votes)
            .ok_or(GovernanceError::Overflow)
    }
}

pub trait VoteWeighting: Send + Sync {
    fn weigh(&self, tally: &Tally) -> Result<Weighed, GovernanceError>;
}

/// One token, one unit of weight. Used by the single-asset chamber.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawWeighting;

impl VoteWeighting for RawWeighting {
    fn weigh(&self, tally: &Tally) -> Result<Weighed, GovernanceError> {
        tally.values().try_fold(Weighed::default(), |acc, t| {
            Ok(Weighed {
                for_votes: acc
                    .for_votes
                    .checked_add(t.for_votes)
                    .ok_or(GovernanceError::Overflow)?,
                against_votes: acc
                    .against_votes
                    .checked_add(t.against_votes)
                    .ok_or(GovernanceError::Overflow)?,
            })
        })
    }
}

/// Each asset's stake counts in proportion to that asset's total supply,
/// so staking 1% of any asset carries the same weight.
pub struct SupplyWeighting {
    token: Arc<dyn TokenLedger>,
}

impl SupplyWeighting {
    pub fn new(token: Arc<dyn TokenLedger>) -> Self {
        Self { token }
    }
}

impl VoteWeighting for SupplyWeighting {
    fn weigh(&self, tally: &Tally) -> Result<Weighed, GovernanceError> {
        let mut weighed = Weighed::default();
        for (asset, t) in tally {
            let supply = self.token.total_supply(asset)?;
            if supply == 0 {
                return Err(GovernanceError::ZeroSupply(asset.clone()));
            }
            let for_points = to_points(t.for_votes, supply).ok_or(GovernanceError::Overflow)?;
            let against_points =
                to_points(t.against_votes, supply).ok_or(GovernanceError::Overflow)?;
            weighed.for_votes = weighed
                .for_votes
                .checked_add(for_points)
                .ok_or(GovernanceError::Overflow)?;
            weighed.against_votes = weighed
                .against_votes
                .checked_add(against_points)
                .ok_or(GovernanceError::Overflow)?;
        }
        Ok(weighed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::AssetTally;
    use quad_types::AssetId;

    #[test]
    fn raw_weighting_sums_every_asset() {
        let mut tally = Tally::new();
        tally.insert(
            AssetId::new("quad"),
            AssetTally {
                for_votes: 7,
                against_votes: 3,
            },
        );
        let weighed = RawWeighting.weigh(&tally).unwrap();
        assert_eq!(weighed.for_votes, 7);
        assert_eq!(weighed.against_votes, 3);
        assert_eq!(weighed.total().unwrap(), 10);
    }

    #[test]
    fn raw_weighting_of_empty_tally_is_zero() {
        assert_eq!(RawWeighting.weigh(&Tally::new()).unwrap(), Weighed::default());
    }
}

use proptest::prelude::*;
use std::sync::Arc;

use quad_governance::{
    GovernanceError, MultiAssetChamber, SingleAssetChamber, TokenLedger, Vault,
};
use quad_nullables::{NullAuthority, NullClock, NullTokenLedger, NullVault, RecordingAction};
use quad_types::{Address, AssetId, ChamberParams, Role};

const VOTERS: [&str; 4] = ["v0", "v1", "v2", "v3"];
const START_BALANCE: u128 = 10_000;

fn quad() -> AssetId {
    AssetId::new("quad-token")
}

fn setup() -> (Arc<NullTokenLedger>, Arc<RecordingAction>, SingleAssetChamber) {
    let authority = Arc::new(NullAuthority::new());
    authority.set_singleton(Role::GovernanceToken, "quad-token");
    authority.grant(Role::Governor, "governor");

    let token = Arc::new(NullTokenLedger::new());
    token.mint(&quad(), &Address::new("proposer"), 100_000);
    for v in VOTERS {
        token.mint(&quad(), &Address::new(v), START_BALANCE);
    }

    let chamber = SingleAssetChamber::new(
        Address::new("upper"),
        ChamberParams::upper_defaults(),
        authority,
        token.clone(),
    )
    .unwrap();
    (token, Arc::new(RecordingAction::new("governor")), chamber)
}

/// Two eligible pool tokens and one that was never registered.
const POOL_ASSETS: [&str; 3] = ["lp-a", "lp-b", "lp-x"];
const POOL_DEPOSIT: u128 = 1_500;

fn setup_lower() -> (Arc<NullVault>, Arc<RecordingAction>, MultiAssetChamber) {
    let authority = Arc::new(NullAuthority::new());
    authority.set_singleton(Role::UpperChamber, "upper");
    authority.grant(Role::Governor, "governor");
    authority.grant(Role::EligibleAsset, "lp-a");
    authority.grant(Role::EligibleAsset, "lp-b");

    let token = Arc::new(NullTokenLedger::new());
    token.set_supply(&AssetId::new("lp-a"), 10_000);
    token.set_supply(&AssetId::new("lp-b"), 1_000_000);
    token.set_supply(&AssetId::new("lp-x"), 10_000);

    let vault = Arc::new(NullVault::new());
    for v in VOTERS {
        for asset in POOL_ASSETS {
            vault
                .deposit(&Address::new(v), &AssetId::new(asset), POOL_DEPOSIT)
                .unwrap();
        }
    }

    let chamber = MultiAssetChamber::new(
        Address::new("lower"),
        ChamberParams::lower_defaults(),
        authority,
        vault.clone(),
        token,
    )
    .unwrap();
    (vault, Arc::new(RecordingAction::new("governor")), chamber)
}

fn pool_ballots() -> impl Strategy<Value = Vec<(usize, usize, u128, bool)>> {
    prop::collection::vec(
        (0..VOTERS.len(), 0..POOL_ASSETS.len(), 0u128..800, any::<bool>()),
        0..32,
    )
}

fn ballots() -> impl Strategy<Value = Vec<(usize, u128, bool)>> {
    prop::collection::vec((0..VOTERS.len(), 0u128..4_000, any::<bool>()), 0..24)
}

proptest! {
    /// Sum of receipts equals the tally, and both equal what the chamber
    /// holds in escrow, whatever mix of valid and invalid votes arrives.
    #[test]
    fn receipts_sum_to_tally(ballots in ballots()) {
        let (token, governor, mut chamber) = setup();
        let clock = NullClock::new(0);
        let id = chamber
            .submit(&Address::new("proposer"), governor, vec![], "p", clock.now())
            .unwrap();

        for (voter, amount, is_for) in ballots {
            let _ = chamber.vote(&Address::new(VOTERS[voter]), id, amount, is_for, clock.now());
        }

        let tally = chamber.proposal_votes(id).unwrap();
        let mut receipts = chamber
            .voter_receipt(id, &Address::new("proposer"))
            .map_or(0, |r| r.amount(&quad()));
        for v in VOTERS {
            receipts += chamber
                .voter_receipt(id, &Address::new(v))
                .map_or(0, |r| r.amount(&quad()));
        }
        prop_assert_eq!(tally.for_votes + tally.against_votes, receipts);
        prop_assert_eq!(token.balance_of(&quad(), &Address::new("upper")), receipts);
    }

    /// Per asset, the receipts, the tally and the vault locks agree, whatever
    /// mix of assets, directions and rejected votes arrives.
    #[test]
    fn receipts_sum_to_tally_per_asset(ballots in pool_ballots()) {
        let (vault, governor, mut chamber) = setup_lower();
        let clock = NullClock::new(0);
        let id = chamber
            .submit(
                &Address::new("upper"),
                &Address::new("proposer"),
                governor,
                vec![],
                "p",
                clock.now(),
            )
            .unwrap();

        for (voter, asset, amount, is_for) in ballots {
            let asset = AssetId::new(POOL_ASSETS[asset]);
            let _ = chamber.vote(&Address::new(VOTERS[voter]), id, &asset, amount, is_for, clock.now());
        }

        for name in POOL_ASSETS {
            let asset = AssetId::new(name);
            let tally = chamber.proposal_votes(id, &asset).unwrap();
            let recorded = chamber.total_locked(id, &asset).unwrap();
            let mut receipts = 0;
            let mut locked = 0;
            for v in VOTERS {
                let voter = Address::new(v);
                receipts += chamber.voter_receipt(id, &voter).map_or(0, |r| r.amount(&asset));
                locked += vault.locked_balance(&voter, &asset);
            }
            prop_assert_eq!(tally.for_votes + tally.against_votes, recorded);
            prop_assert_eq!(recorded, receipts);
            prop_assert_eq!(locked, recorded);
        }
        prop_assert_eq!(chamber.total_locked(id, &AssetId::new("lp-x")).unwrap(), 0);
    }

    /// Every voter gets exactly their stake back, once, regardless of the
    /// outcome or the order of withdrawals.
    #[test]
    fn withdraw_exactly_once(ballots in ballots(), order in Just(VOTERS.to_vec()).prop_shuffle()) {
        let (token, governor, mut chamber) = setup();
        let clock = NullClock::new(0);
        let id = chamber
            .submit(&Address::new("proposer"), governor.clone(), b"go".to_vec(), "p", clock.now())
            .unwrap();
        for (voter, amount, is_for) in ballots {
            let _ = chamber.vote(&Address::new(VOTERS[voter]), id, amount, is_for, clock.now());
        }
        clock.pass(chamber.proposal(id).unwrap().deadline);

        for v in order {
            let voter = Address::new(v);
            match chamber.voter_receipt(id, &voter).cloned() {
                Some(receipt) => {
                    let refunded = chamber.withdraw(&voter, id, clock.now()).unwrap();
                    prop_assert_eq!(refunded, receipt.amount(&quad()));
                    let again = chamber.withdraw(&voter, id, clock.now());
                    prop_assert!(
                        matches!(again, Err(GovernanceError::AlreadyWithdrawn { .. })),
                        "second withdrawal must fail"
                    );
                }
                None => {
                    let never = chamber.withdraw(&voter, id, clock.now());
                    prop_assert!(
                        matches!(never, Err(GovernanceError::NeverVoted { .. })),
                        "non-voter withdrawal must fail"
                    );
                }
            }
            prop_assert_eq!(token.balance_of(&quad(), &voter), START_BALANCE);
        }
        chamber.withdraw(&Address::new("proposer"), id, clock.now()).unwrap();
        prop_assert_eq!(token.balance_of(&quad(), &Address::new("upper")), 0);
        prop_assert!(governor.call_count() <= 1);
    }

    /// Evaluating again never changes the outcome or re-runs the action.
    #[test]
    fn evaluation_is_stable(ballots in ballots(), extra_secs in 0u64..1_000_000) {
        let (_token, governor, mut chamber) = setup();
        let clock = NullClock::new(0);
        let id = chamber
            .submit(&Address::new("proposer"), governor.clone(), b"go".to_vec(), "p", clock.now())
            .unwrap();
        for (voter, amount, is_for) in ballots {
            let _ = chamber.vote(&Address::new(VOTERS[voter]), id, amount, is_for, clock.now());
        }
        clock.pass(chamber.proposal(id).unwrap().deadline);

        let first = chamber.evaluate(id, clock.now()).unwrap();
        let calls = governor.call_count();
        clock.advance(extra_secs);
        let second = chamber.evaluate(id, clock.now()).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(governor.call_count(), calls);
        prop_assert_eq!(calls, usize::from(first.is_approved()));
    }
}

//! Upper chamber forwarding its approvals into the lower chamber.

use std::sync::{Arc, Mutex};

use quad_governance::{
    ChamberEvent, Decision, GovernanceError, MultiAssetChamber, ProposalSink, SingleAssetChamber,
    Vault,
};
use quad_nullables::{NullAuthority, NullClock, NullTokenLedger, NullVault, RecordingAction};
use quad_types::{Address, AssetId, ChamberParams, ProposalId, Role};

fn addr(name: &str) -> Address {
    Address::new(name)
}

struct Bicameral {
    authority: Arc<NullAuthority>,
    clock: NullClock,
    governor: Arc<RecordingAction>,
    upper: SingleAssetChamber,
    lower: Arc<Mutex<MultiAssetChamber>>,
}

fn bicameral() -> Bicameral {
    let authority = Arc::new(NullAuthority::new());
    authority.set_singleton(Role::GovernanceToken, "quad-token");
    authority.set_singleton(Role::UpperChamber, "upper");
    authority.grant(Role::Governor, "governor");
    authority.grant(Role::EligibleAsset, "lp");

    let token = Arc::new(NullTokenLedger::new());
    token.mint(&AssetId::new("quad-token"), &addr("proposer"), 1_000_000);
    token.set_supply(&AssetId::new("lp"), 10_000);

    let vault = Arc::new(NullVault::new());
    vault
        .deposit(&addr("lp-holder"), &AssetId::new("lp"), 10_000)
        .unwrap();

    let lower = Arc::new(Mutex::new(
        MultiAssetChamber::new(
            addr("lower"),
            ChamberParams::lower_defaults(),
            authority.clone(),
            vault,
            token.clone(),
        )
        .unwrap(),
    ));
    let mut upper = SingleAssetChamber::new(
        addr("upper"),
        ChamberParams::upper_defaults(),
        authority.clone(),
        token,
    )
    .unwrap();
    upper.forward_to(lower.clone());

    Bicameral {
        authority,
        clock: NullClock::new(0),
        governor: Arc::new(RecordingAction::new("governor")),
        upper,
        lower,
    }
}

impl Bicameral {
    /// Submit to the upper chamber and run it to approval.
    fn approve_upstream(&mut self, payload: &[u8]) -> ProposalId {
        let id = self
            .upper
            .submit(
                &addr("proposer"),
                self.governor.clone(),
                payload.to_vec(),
                "migrate pool",
                self.clock.now(),
            )
            .unwrap();
        self.clock.pass(self.upper.proposal(id).unwrap().deadline);
        let outcome = self.upper.evaluate(id, self.clock.now()).unwrap();
        assert_eq!(outcome.decision, Decision::Approved);
        id
    }
}

#[test]
fn upper_approval_becomes_lower_proposal() {
    let mut b = bicameral();
    let upstream = b.approve_upstream(b"migrate");

    // Forwarded, not executed.
    assert_eq!(b.governor.call_count(), 0);
    assert!(b.upper.events_for(upstream).any(|e| matches!(
        e,
        ChamberEvent::ProposalForwarded { forwarded_as, .. } if *forwarded_as == ProposalId::FIRST
    )));

    let mut lower = b.lower.lock().unwrap();
    let downstream = lower.proposal(ProposalId::FIRST).unwrap();
    assert_eq!(downstream.proposer, addr("proposer"));
    assert_eq!(downstream.target, addr("governor"));
    assert_eq!(downstream.action, b"migrate".to_vec());
    assert_eq!(downstream.description, "migrate pool");

    let now = b.clock.now();
    lower
        .vote(&addr("lp-holder"), ProposalId::FIRST, &AssetId::new("lp"), 3_000, true, now)
        .unwrap();
    b.clock.pass(lower.proposal(ProposalId::FIRST).unwrap().deadline);
    let outcome = lower.evaluate(ProposalId::FIRST, b.clock.now()).unwrap();
    assert!(outcome.is_approved());
    assert_eq!(b.governor.calls(), vec![b"migrate".to_vec()]);
}

#[test]
fn forwarding_happens_once() {
    let mut b = bicameral();
    let upstream = b.approve_upstream(b"x");
    b.upper.evaluate(upstream, b.clock.now()).unwrap();
    b.upper
        .withdraw(&addr("proposer"), upstream, b.clock.now())
        .unwrap();
    assert_eq!(b.lower.lock().unwrap().proposal_count(), 1);
}

#[test]
fn rejected_forward_keeps_the_upstream_approval() {
    let mut b = bicameral();
    b.authority.set_singleton(Role::UpperChamber, "someone-else");

    let upstream = b.approve_upstream(b"x");
    assert!(b.upper.proposal(upstream).unwrap().outcome.unwrap().is_approved());
    assert!(b
        .upper
        .events_for(upstream)
        .any(|e| matches!(e, ChamberEvent::ActionFailed { .. })));
    assert_eq!(b.lower.lock().unwrap().proposal_count(), 0);
}

#[test]
fn lower_chamber_as_sink_checks_the_caller() {
    let b = bicameral();
    let request = quad_governance::ForwardedProposal {
        proposer: addr("proposer"),
        target: b.governor.clone(),
        action: vec![],
        description: "direct".into(),
    };
    let result = b
        .lower
        .submit_forwarded(&addr("intruder"), request, b.clock.now());
    assert!(matches!(result, Err(GovernanceError::UnauthorizedSubmitter(_))));
}

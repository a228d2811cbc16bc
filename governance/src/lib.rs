//! Token-weighted proposal chambers.
//!
//! Two chambers share one engine core:
//!
//! * [`SingleAssetChamber`] weighs votes by raw amount of one governance
//!   token, charges a submission bond and escrows stake on its own balance.
//! * [`MultiAssetChamber`] accepts any eligible asset, locks stake in a
//!   vault and compares assets in supply-normalized points.
//!
//! A proposal is `Active` until its deadline, then evaluated exactly once to
//! `Approved` or `Denied`. Every voter gets their stake back exactly once,
//! whatever the outcome. When the single-asset chamber is set to forward,
//! its approvals become proposals in the multi-asset chamber instead of
//! being executed.
//!
//! Collaborators (role registry, token ledger, vault, governor targets) are
//! injected as trait objects; see [`authority`], [`token`], [`vault`] and
//! [`action`].

pub mod action;
pub mod authority;
pub mod custody;
pub mod error;
pub mod evaluation;
pub mod events;
pub mod forward;
pub mod ledger;
pub mod multi_asset;
pub mod proposal;
pub mod single_asset;
pub mod state;
pub mod store;
pub mod token;
pub mod vault;
pub mod voting;
pub mod weighting;
pub mod withdrawal;

pub use action::{ActionError, ApprovalHandler, DirectInvocation, Dispatch, ExecutableAction};
pub use authority::Authority;
pub use custody::{StakeCustody, TokenEscrow, VaultCustody};
pub use error::GovernanceError;
pub use evaluation::EvaluationEngine;
pub use events::{ChamberEvent, EventLog};
pub use forward::{ForwardedProposal, Forwarder, ProposalSink};
pub use ledger::{StakeLedger, VoteReceipt};
pub use multi_asset::MultiAssetChamber;
pub use proposal::{
    AssetTally, Decision, DenyReason, Proposal, ProposalOutcome, ProposalStatus, UnknownDenyReason,
};
pub use single_asset::SingleAssetChamber;
pub use token::{TokenError, TokenLedger};
pub use vault::{Vault, VaultError};
pub use voting::{Ballot, VotingEngine};
pub use weighting::{RawWeighting, SupplyWeighting, VoteWeighting, Weighed};
pub use withdrawal::{Refund, WithdrawalEngine};

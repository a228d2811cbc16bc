use crate::action::ActionError;
use crate::token::TokenError;
use crate::vault::VaultError;
use quad_types::{Address, AssetId, ParamsError, ProposalId, Role};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    // ── Authorization ────────────────────────────────────────────────────
    #[error("{0} may not submit proposals to this chamber")]
    UnauthorizedSubmitter(Address),

    #[error("target {0} is not a registered governor")]
    InvalidTarget(Address),

    #[error("{address} lacks the {role} role")]
    MissingRole { role: Role, address: Address },

    #[error("no address is registered for singleton role {0}")]
    MissingSingleton(Role),

    // ── State ────────────────────────────────────────────────────────────
    #[error("proposal {0} not found")]
    NotFound(ProposalId),

    #[error("proposal {0} is inactive")]
    ProposalInactive(ProposalId),

    #[error("voting still ongoing for proposal {0}")]
    VotingOngoing(ProposalId),

    #[error("proposal drafted as {drafted} but the next id is {expected}")]
    IdMismatch {
        drafted: ProposalId,
        expected: ProposalId,
    },

    // ── Vote integrity ───────────────────────────────────────────────────
    #[error("cannot change vote direction on proposal {0}")]
    VoteDirectionLocked(ProposalId),

    #[error("asset {0} is not eligible for voting")]
    AssetNotEligible(AssetId),

    #[error("vote amount must be non-zero")]
    ZeroAmount,

    // ── Withdrawal integrity ─────────────────────────────────────────────
    #[error("{voter} has not voted on proposal {proposal}")]
    NeverVoted { proposal: ProposalId, voter: Address },

    #[error("{voter} has already withdrawn the funds for proposal {proposal}")]
    AlreadyWithdrawn { proposal: ProposalId, voter: Address },

    // ── Accounting ───────────────────────────────────────────────────────
    #[error("asset {0} has zero total supply")]
    ZeroSupply(AssetId),

    #[error("arithmetic overflow in vote accounting")]
    Overflow,

    // ── Collaborators ────────────────────────────────────────────────────
    #[error("invalid chamber parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("vault: {0}")]
    Vault(#[from] VaultError),

    #[error("token: {0}")]
    Token(#[from] TokenError),

    #[error("action: {0}")]
    Action(#[from] ActionError),

    #[error("forwarding to the lower chamber failed: {0}")]
    Forward(String),
}

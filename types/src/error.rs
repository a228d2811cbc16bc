//! Errors raised while validating chamber parameters.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamsError {
    #[error("{name} must be at most 10000 bips, got {value}")]
    BipsOutOfRange { name: &'static str, value: u32 },

    #[error("majority threshold must be non-zero")]
    ZeroMajority,

    #[error("voting window must be at least one second")]
    ZeroVotingWindow,

    #[error("submission bond must be non-zero")]
    ZeroSubmissionBond,

    #[error("the single-asset chamber requires a submission bond")]
    MissingSubmissionBond,

    #[error("the multi-asset chamber takes no submission bond")]
    UnexpectedSubmissionBond,
}

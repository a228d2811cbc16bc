//! Nullable collaborators for deterministic testing.
//!
//! Every external dependency of a chamber (clock, role registry, token
//! ledger, vault, governor targets) sits behind a trait. This crate provides
//! in-memory implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record what was done to them for later assertions
//!
//! Usage: construct chambers with these instead of live integrations.

pub mod action;
pub mod authority;
pub mod clock;
pub mod token;
pub mod vault;

pub use action::RecordingAction;
pub use authority::NullAuthority;
pub use clock::NullClock;
pub use token::NullTokenLedger;
pub use vault::NullVault;

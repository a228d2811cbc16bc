//! Fundamental types for Quad governance.
//!
//! Shared by every other crate in the workspace: identities, asset and
//! proposal identifiers, registry roles, fixed-point amount arithmetic,
//! timestamps and the deploy-time parameters of a chamber.

pub mod address;
pub mod amount;
pub mod error;
pub mod id;
pub mod params;
pub mod role;
pub mod time;

pub use address::{Address, AssetId};
pub use amount::{Amount, Points, BIPS_DENOMINATOR, POINTS_SCALE};
pub use error::ParamsError;
pub use id::ProposalId;
pub use params::{ChamberParams, TargetPolicy};
pub use role::Role;
pub use time::Timestamp;

//! Authentication and authorization core.
//!
//! Two-stage gate over every protected operation:
//!
//! 1. **Identity resolution** ([`crate::middleware::auth::CurrentUser`]):
//!    verifies the bearer token, loads the user record, and hydrates a
//!    [`Principal`]. This is the only place a `Principal` is produced.
//! 2. **Authorization gate** ([`gate::check_access`]): looks up the declared
//!    [`Requirement`] for the operation in the [`RequirementRegistry`] built
//!    at startup and applies the [`Role`] hierarchy, with an optional
//!    ownership / custom-predicate escape hatch.
//!
//! The gate's input is the `Principal` produced by stage one, so running the
//! stages out of order is rejected at runtime (the gate fails closed) and is
//! hard to express by accident in the router wiring.

pub mod gate;
pub mod principal;
pub mod requirement;
pub mod role;

pub use gate::check_access;
pub use principal::Principal;
pub use requirement::{AccessContext, PermissionCheck, Requirement, RequirementRegistry};
pub use role::Role;

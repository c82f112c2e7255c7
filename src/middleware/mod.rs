//! Request-processing middleware.
//!
//! - [`auth`]: the [`auth::CurrentUser`] extractor that resolves a
//!   [`Principal`](crate::authz::Principal) from the bearer token
//! - [`role`]: the layer that enforces declared role requirements through
//!   the authorization gate
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. The role layer resolves the operation's requirement; when one applies,
//!    it resolves the principal and runs the gate
//! 3. Handlers needing the identity extract [`auth::CurrentUser`], reusing
//!    the request-scoped principal when the layer already resolved it

pub mod auth;
pub mod role;

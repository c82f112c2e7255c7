//! Application configuration.
//!
//! Each submodule loads one aspect of configuration from environment
//! variables once at startup. The resulting structs are immutable for the
//! lifetime of the process.
//!
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool
//! - [`jwt`]: token signing secret and expiry

pub mod cors;
pub mod database;
pub mod jwt;

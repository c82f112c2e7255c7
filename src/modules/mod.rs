//! Feature modules.
//!
//! Each module follows the same structure: `controller.rs` for HTTP
//! handlers, `service.rs` for business logic, `model.rs` for entities and
//! DTOs, and `router.rs` for route wiring.

pub mod auth;
pub mod course_modules;
pub mod courses;
pub mod lessons;
pub mod reviews;
pub mod users;

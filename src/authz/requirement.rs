//! Declarative role requirements and the startup-time registry that maps
//! operations to them.
//!
//! The original platform declared requirements with controller decorators and
//! resolved them through runtime reflection. Here the same information is an
//! explicit table built once during route registration: coarse declarations
//! cover a route-prefix group, fine declarations cover a single operation
//! (HTTP method + matched route template), and the fine declaration replaces
//! the coarse one outright rather than merging with it.

use std::collections::HashMap;

use axum::http::Method;
use uuid::Uuid;

use crate::authz::principal::Principal;
use crate::authz::role::Role;

/// Context handed to the ownership / custom-predicate escape hatch.
///
/// Populated by a call site that knows which resource is being touched and,
/// when available, who owns it. Role checks never look at this; only the
/// escape hatch does.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessContext {
    pub resource_id: Option<Uuid>,
    pub resource_owner_id: Option<Uuid>,
}

/// Signature for a caller-supplied permission check.
pub type PermissionCheck = fn(&Principal, &AccessContext) -> bool;

/// The set of roles an operation declares as sufficient to invoke it, plus
/// the optional ownership escape hatch.
///
/// An empty role set means "no role restriction from this mechanism"; the
/// handler may still demand authentication on its own.
#[derive(Debug, Clone, Default)]
pub struct Requirement {
    pub roles: Vec<Role>,
    pub allow_resource_owner: bool,
    pub custom_check: Option<PermissionCheck>,
}

impl Requirement {
    /// Requirement satisfied by any of the given roles or higher.
    pub fn any_of(roles: &[Role]) -> Self {
        Self {
            roles: roles.to_vec(),
            ..Self::default()
        }
    }

    /// No role restriction; authentication is still enforced by the handler.
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Admit the principal when it owns the targeted resource, regardless of
    /// role.
    pub fn or_resource_owner(mut self) -> Self {
        self.allow_resource_owner = true;
        self
    }

    /// Admit the principal when the supplied check passes, regardless of role.
    pub fn or_custom(mut self, check: PermissionCheck) -> Self {
        self.custom_check = Some(check);
        self
    }

    pub fn is_open(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Startup-built lookup from operation to its declared [`Requirement`].
///
/// Built once in [`crate::router::access_policy`] and shared read-only through
/// application state; there is no mutation path after registration, so
/// concurrent reads need no locking.
#[derive(Debug, Default)]
pub struct RequirementRegistry {
    /// Coarse declarations keyed by route-template prefix.
    groups: Vec<(String, Requirement)>,
    /// Fine declarations keyed by method + full route template.
    operations: HashMap<(Method, String), Requirement>,
}

impl RequirementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a coarse requirement for every operation under `prefix`.
    pub fn group(mut self, prefix: &str, requirement: Requirement) -> Self {
        self.groups.push((prefix.to_string(), requirement));
        self
    }

    /// Declare a fine requirement for one operation, replacing any group
    /// declaration that would otherwise apply.
    pub fn operation(mut self, method: Method, path: &str, requirement: Requirement) -> Self {
        self.operations.insert((method, path.to_string()), requirement);
        self
    }

    /// Resolve the requirement for the operation identified by `method` and
    /// the matched route template.
    ///
    /// Fine declarations win outright; otherwise the longest matching group
    /// prefix applies; otherwise there is no requirement.
    pub fn resolve(&self, method: &Method, matched_path: &str) -> Option<&Requirement> {
        if let Some(requirement) = self
            .operations
            .get(&(method.clone(), matched_path.to_string()))
        {
            return Some(requirement);
        }

        self.groups
            .iter()
            .filter(|(prefix, _)| {
                matched_path == prefix
                    || (matched_path.starts_with(prefix)
                        && matched_path.as_bytes().get(prefix.len()) == Some(&b'/'))
            })
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, requirement)| requirement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> RequirementRegistry {
        RequirementRegistry::new()
            .group(
                "/api/courses",
                Requirement::any_of(&[Role::Instructor, Role::Admin]),
            )
            .operation(
                Method::DELETE,
                "/api/courses/{course_id}",
                Requirement::any_of(&[Role::Admin]),
            )
            .operation(
                Method::GET,
                "/api/courses/{course_id}",
                Requirement::authenticated(),
            )
    }

    #[test]
    fn test_group_declaration_covers_nested_operations() {
        let registry = registry();
        let requirement = registry
            .resolve(&Method::POST, "/api/courses")
            .expect("group requirement should apply");
        assert_eq!(requirement.roles, vec![Role::Instructor, Role::Admin]);

        let requirement = registry
            .resolve(&Method::PATCH, "/api/courses/{course_id}")
            .expect("group requirement should apply to nested path");
        assert_eq!(requirement.roles, vec![Role::Instructor, Role::Admin]);
    }

    #[test]
    fn test_operation_declaration_replaces_group() {
        let registry = registry();
        let requirement = registry
            .resolve(&Method::DELETE, "/api/courses/{course_id}")
            .expect("operation requirement should apply");
        // Replacement, not union: the group's Instructor entry is gone.
        assert_eq!(requirement.roles, vec![Role::Admin]);
    }

    #[test]
    fn test_operation_can_open_up_a_guarded_group() {
        let registry = registry();
        let requirement = registry
            .resolve(&Method::GET, "/api/courses/{course_id}")
            .expect("operation requirement should apply");
        assert!(requirement.is_open());
    }

    #[test]
    fn test_undeclared_operation_has_no_requirement() {
        let registry = registry();
        assert!(registry.resolve(&Method::GET, "/api/auth/login").is_none());
        // Prefix must break on a path segment boundary.
        assert!(
            registry
                .resolve(&Method::GET, "/api/coursesextra")
                .is_none()
        );
    }

    #[test]
    fn test_longest_matching_group_wins() {
        let registry = RequirementRegistry::new()
            .group("/api", Requirement::authenticated())
            .group("/api/admin", Requirement::any_of(&[Role::Admin]));

        let requirement = registry
            .resolve(&Method::GET, "/api/admin/reports")
            .expect("a group should apply");
        assert_eq!(requirement.roles, vec![Role::Admin]);

        let requirement = registry
            .resolve(&Method::GET, "/api/courses")
            .expect("outer group should apply");
        assert!(requirement.is_open());
    }
}

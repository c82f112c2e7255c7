//! The admit/reject decision for one request.
//!
//! Terminal per request: either the call proceeds to its handler or it is
//! rejected with a typed failure. Identity resolution must already have run
//! for any operation carrying a non-empty requirement; a gate invoked without
//! a principal fails closed rather than admitting or surfacing an unrelated
//! fault.

use tracing::{debug, warn};

use crate::authz::principal::Principal;
use crate::authz::requirement::{AccessContext, Requirement};
use crate::utils::errors::AppError;

/// Decide whether `principal` may invoke an operation declaring
/// `requirement`.
///
/// - Empty requirement: admitted, no principal needed.
/// - Non-empty requirement without a resolved principal: rejected with 401.
///   This is a wiring defect (the resolver must run first), not a normal
///   authorization outcome.
/// - Role check via the hierarchy, then the ownership / custom-predicate
///   escape hatch, then rejection with 403.
///
/// Every rejection for insufficient role is audit-logged with the principal
/// id, its actual role, and the required roles; the error returned to the
/// caller stays generic.
pub fn check_access(
    requirement: &Requirement,
    principal: Option<&Principal>,
    ctx: &AccessContext,
) -> Result<(), AppError> {
    if requirement.is_open() {
        return Ok(());
    }

    let Some(principal) = principal else {
        warn!("authorization gate invoked without a resolved principal");
        return Err(AppError::unauthorized("Authentication required"));
    };

    if principal.role.satisfies_any(&requirement.roles) {
        debug!(
            principal_id = %principal.id,
            role = %principal.role,
            "access granted by role hierarchy"
        );
        return Ok(());
    }

    if requirement.allow_resource_owner
        && ctx
            .resource_owner_id
            .is_some_and(|owner| principal.owns(owner))
    {
        debug!(
            principal_id = %principal.id,
            resource_id = ?ctx.resource_id,
            "access granted to resource owner"
        );
        return Ok(());
    }

    if let Some(check) = requirement.custom_check
        && check(principal, ctx)
    {
        debug!(principal_id = %principal.id, "access granted by custom check");
        return Ok(());
    }

    warn!(
        principal_id = %principal.id,
        role = %principal.role,
        required_roles = ?requirement.roles,
        resource_id = ?ctx.resource_id,
        "access denied"
    );

    Err(AppError::forbidden(
        "You do not have permission to perform this action",
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use axum::http::StatusCode;
    use uuid::Uuid;

    use super::*;
    use crate::authz::role::Role;

    fn principal(role: Role) -> Principal {
        Principal {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            username: Some("test".to_string()),
            role,
            claims: BTreeMap::new(),
        }
    }

    #[test]
    fn test_open_requirement_admits_without_principal() {
        let requirement = Requirement::authenticated();
        assert!(check_access(&requirement, None, &AccessContext::default()).is_ok());
    }

    #[test]
    fn test_missing_principal_fails_closed() {
        let requirement = Requirement::any_of(&[Role::Student]);
        let err = check_access(&requirement, None, &AccessContext::default()).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_principal_fails_closed_regardless_of_context() {
        // Even an ownership-friendly context cannot stand in for resolution.
        let requirement = Requirement::any_of(&[Role::Student]).or_resource_owner();
        let ctx = AccessContext {
            resource_id: Some(Uuid::new_v4()),
            resource_owner_id: Some(Uuid::new_v4()),
        };
        let err = check_access(&requirement, None, &ctx).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_sufficient_role_is_admitted() {
        let requirement = Requirement::any_of(&[Role::Instructor, Role::Admin]);
        let instructor = principal(Role::Instructor);
        assert!(check_access(&requirement, Some(&instructor), &AccessContext::default()).is_ok());
    }

    #[test]
    fn test_higher_role_satisfies_lower_requirement() {
        let requirement = Requirement::any_of(&[Role::Instructor]);
        let admin = principal(Role::Admin);
        assert!(check_access(&requirement, Some(&admin), &AccessContext::default()).is_ok());
    }

    #[test]
    fn test_insufficient_role_is_forbidden() {
        let requirement = Requirement::any_of(&[Role::Instructor, Role::Admin]);
        let student = principal(Role::Student);
        let err =
            check_access(&requirement, Some(&student), &AccessContext::default()).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_instructor_rejected_by_admin_only_requirement() {
        let requirement = Requirement::any_of(&[Role::Admin]);
        let instructor = principal(Role::Instructor);
        let err =
            check_access(&requirement, Some(&instructor), &AccessContext::default()).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_resource_owner_bypass() {
        let requirement = Requirement::any_of(&[Role::Admin]).or_resource_owner();
        let student = principal(Role::Student);
        let ctx = AccessContext {
            resource_id: Some(Uuid::new_v4()),
            resource_owner_id: Some(student.id),
        };
        assert!(check_access(&requirement, Some(&student), &ctx).is_ok());

        // A different owner does not help.
        let ctx = AccessContext {
            resource_id: ctx.resource_id,
            resource_owner_id: Some(Uuid::new_v4()),
        };
        let err = check_access(&requirement, Some(&student), &ctx).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_owner_bypass_requires_opt_in() {
        let requirement = Requirement::any_of(&[Role::Admin]);
        let student = principal(Role::Student);
        let ctx = AccessContext {
            resource_id: Some(Uuid::new_v4()),
            resource_owner_id: Some(student.id),
        };
        let err = check_access(&requirement, Some(&student), &ctx).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_custom_check_bypass() {
        fn email_allowlist(principal: &Principal, _ctx: &AccessContext) -> bool {
            principal.email.ends_with("@example.com")
        }

        let requirement = Requirement::any_of(&[Role::Admin]).or_custom(email_allowlist);
        let student = principal(Role::Student);
        assert!(check_access(&requirement, Some(&student), &AccessContext::default()).is_ok());

        fn deny_all(_principal: &Principal, _ctx: &AccessContext) -> bool {
            false
        }

        let requirement = Requirement::any_of(&[Role::Admin]).or_custom(deny_all);
        let err =
            check_access(&requirement, Some(&student), &AccessContext::default()).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_concrete_student_scenarios() {
        let student = principal(Role::Student);

        let err = check_access(
            &Requirement::any_of(&[Role::Instructor, Role::Admin]),
            Some(&student),
            &AccessContext::default(),
        )
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        assert!(
            check_access(
                &Requirement::authenticated(),
                Some(&student),
                &AccessContext::default()
            )
            .is_ok()
        );
    }
}

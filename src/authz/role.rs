//! Role hierarchy for the platform.
//!
//! Roles form a strict total order and a higher-ranked role implicitly
//! satisfies any lower-ranked requirement, so an [`Role::Admin`] passes an
//! instructor-only check without being listed explicitly.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user's role in the platform.
///
/// Stored in PostgreSQL as the `user_role` enum and carried on the
/// [`Principal`](crate::authz::Principal) hydrated for every request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Default for Role {
    /// New registrations default to the lowest-privilege role.
    fn default() -> Self {
        Role::Student
    }
}

impl Role {
    /// Hierarchy rank of this role (higher number = more privileges).
    ///
    /// The table is total and fixed at build time; there is no runtime
    /// mutation path.
    pub fn rank(self) -> u8 {
        match self {
            Role::Student => 1,
            Role::Instructor => 2,
            Role::Admin => 3,
        }
    }

    /// Whether this role satisfies a requirement for `required`.
    ///
    /// True iff this role ranks at least as high as the required one.
    pub fn satisfies(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Whether this role satisfies at least one role in `required`.
    ///
    /// A requirement listing several roles means "any of these ranks or
    /// higher", not all of them.
    pub fn satisfies_any(self, required: &[Role]) -> bool {
        required.iter().any(|role| self.satisfies(*role))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Instructor => "INSTRUCTOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Role; 3] = [Role::Student, Role::Instructor, Role::Admin];

    #[test]
    fn test_ranks_are_strictly_increasing() {
        assert!(Role::Student.rank() < Role::Instructor.rank());
        assert!(Role::Instructor.rank() < Role::Admin.rank());
    }

    #[test]
    fn test_satisfies_matches_rank_comparison() {
        for a in ALL {
            for b in ALL {
                assert_eq!(a.satisfies(b), a.rank() >= b.rank());
            }
        }
    }

    #[test]
    fn test_admin_satisfies_everything() {
        for role in ALL {
            assert!(Role::Admin.satisfies(role));
        }
    }

    #[test]
    fn test_student_satisfies_only_student() {
        assert!(Role::Student.satisfies(Role::Student));
        assert!(!Role::Student.satisfies(Role::Instructor));
        assert!(!Role::Student.satisfies(Role::Admin));
    }

    #[test]
    fn test_satisfies_any_is_disjunctive() {
        assert!(Role::Instructor.satisfies_any(&[Role::Instructor, Role::Admin]));
        assert!(!Role::Instructor.satisfies_any(&[Role::Admin]));
        assert!(!Role::Student.satisfies_any(&[Role::Instructor, Role::Admin]));
        // Higher rank passes a lower-ranked entry in the set.
        assert!(Role::Admin.satisfies_any(&[Role::Student]));
    }

    #[test]
    fn test_satisfies_any_empty_set_matches_nothing() {
        for role in ALL {
            assert!(!role.satisfies_any(&[]));
        }
    }

    #[test]
    fn test_default_role_is_student() {
        assert_eq!(Role::default(), Role::Student);
    }
}

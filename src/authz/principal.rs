//! The authenticated identity attached to a request.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::authz::role::Role;

/// The identity resolved for one request.
///
/// Combines the verified token claims with the persisted user record. A
/// `Principal` is built fresh per request by the identity resolver
/// ([`crate::middleware::auth::CurrentUser`]) and dropped when the request
/// ends; it is never cached across requests.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
    /// Extra claims the issuer embedded beyond the registered ones.
    /// Kept as an explicit typed map rather than loose fields on the struct.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub claims: BTreeMap<String, serde_json::Value>,
}

impl Principal {
    /// Whether this principal owns the resource identified by `owner_id`.
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.id == owner_id
    }
}

//! Identity resolution.
//!
//! [`CurrentUser`] is the only producer of a [`Principal`]: it extracts the
//! bearer token, verifies it, loads the user record by primary key, and
//! merges the two. Every failure mode on that path (missing header, wrong
//! scheme, bad or expired token, unknown subject) surfaces as the same 401
//! with the same message, so the auth path cannot be used to probe which
//! step failed or whether an account exists.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use uuid::Uuid;

use crate::authz::Principal;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

pub use crate::utils::jwt::UNAUTHENTICATED;

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme word must be exactly `Bearer` (case-sensitive); any other
/// scheme or a missing header means no credential is present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    (scheme == "Bearer").then_some(token)
}

/// Extractor resolving the authenticated principal for this request.
///
/// Verification and the user lookup run once per request; if the
/// authorization middleware already resolved the principal, the handler's
/// extraction reuses the request-scoped copy instead of re-reading the
/// database. Nothing is cached across requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(CurrentUser(principal.clone()));
        }

        let token =
            bearer_token(&parts.headers).ok_or_else(|| AppError::unauthorized(UNAUTHENTICATED))?;

        let claims = verify_token(token, &state.jwt_config)?;

        let subject = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::unauthorized(UNAUTHENTICATED))?;

        // A failed point read (connection fault etc.) propagates as a 500
        // through AppError's blanket From, not as a 401. Only a missing
        // record collapses into the uniform unauthenticated outcome.
        let user = UserService::find_by_id(&state.db, subject)
            .await?
            .ok_or_else(|| {
                tracing::debug!(subject = %subject, "token subject no longer exists");
                AppError::unauthorized(UNAUTHENTICATED)
            })?;

        let principal = Principal {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            claims: claims.extra,
        };

        parts.extensions.insert(principal.clone());

        Ok(CurrentUser(principal))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_is_no_credential() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        assert_eq!(bearer_token(&headers("bearer abc")), None);
        assert_eq!(bearer_token(&headers("BEARER abc")), None);
    }

    #[test]
    fn test_other_schemes_are_no_credential() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Token abc")), None);
    }

    #[test]
    fn test_bare_value_without_scheme_is_no_credential() {
        assert_eq!(bearer_token(&headers("abc.def.ghi")), None);
    }
}

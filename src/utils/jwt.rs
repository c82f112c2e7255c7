//! Credential issuing and verification.
//!
//! Tokens are HS256 JWTs carrying only the subject id plus the issued-at and
//! expiry timestamps; everything else about the principal is loaded fresh
//! from the database on each request. Verification failures are deliberately
//! uniform: callers cannot tell a tampered token from a malformed or expired
//! one.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::Claims;
use crate::utils::errors::AppError;

/// The single message for every unauthenticated outcome, shared by token
/// verification and the identity resolver so the four failure legs (missing
/// credential, bad token, expired token, unknown subject) cannot drift apart.
pub const UNAUTHENTICATED: &str = "Invalid or expired token";

/// Issue a signed access token for `user_id`.
///
/// The expiry is the configured duration (default three days) from issuance.
pub fn create_access_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now + jwt_config.access_token_expiry;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp,
        extra: Default::default(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {e}")))
}

/// Verify a token's signature, structure, and expiry.
///
/// Which of the three failed is not exposed to the caller.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(UNAUTHENTICATED))
}

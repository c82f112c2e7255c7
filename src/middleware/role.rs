//! Requirement-enforcement middleware.
//!
//! Layered over the `/api` router. For each request it resolves the declared
//! requirement for the matched operation from the startup-built registry and,
//! when one applies, runs identity resolution followed by the authorization
//! gate. Resolution always happens before the gate here; the gate still fails
//! closed on its own if ever wired differently.

use axum::{
    extract::{FromRequestParts, MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::authz::{AccessContext, check_access};
use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub async fn enforce_requirements(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let method = req.method().clone();

    let Some(requirement) = state.requirements.resolve(&method, &matched_path) else {
        return Ok(next.run(req).await);
    };

    if requirement.is_open() {
        // No role restriction declared here; handlers demanding
        // authentication extract CurrentUser themselves.
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    // Identity resolution must succeed before the gate sees the request.
    let CurrentUser(principal) = CurrentUser::from_request_parts(&mut parts, &state).await?;

    // Resource ownership is checked where the resource is loaded (service
    // layer); the route-level gate only sees the role requirement.
    check_access(requirement, Some(&principal), &AccessContext::default())?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

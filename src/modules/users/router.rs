use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_all_users, get_profile, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_users))
        .route("/profile", get(get_profile).patch(update_profile))
}

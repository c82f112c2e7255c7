use axum::{Router, routing::delete, routing::post};

use crate::state::AppState;

use super::controller::{create_review, delete_review, get_reviews_by_course};

/// Routes nested under `/api/courses/{course_id}/reviews`.
pub fn init_course_reviews_router() -> Router<AppState> {
    Router::new().route("/", post(create_review).get(get_reviews_by_course))
}

/// Routes mounted at `/api/reviews`.
pub fn init_reviews_router() -> Router<AppState> {
    Router::new().route("/{review_id}", delete(delete_review))
}

use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{
    create_lesson, delete_lesson, get_lesson_by_id, get_lessons_by_module, update_lesson,
};

/// Routes nested under `/api/modules/{module_id}/lessons`.
pub fn init_module_lessons_router() -> Router<AppState> {
    Router::new().route("/", post(create_lesson).get(get_lessons_by_module))
}

/// Routes mounted at `/api/lessons`.
pub fn init_lessons_router() -> Router<AppState> {
    Router::new().route(
        "/{lesson_id}",
        get(get_lesson_by_id)
            .patch(update_lesson)
            .delete(delete_lesson),
    )
}

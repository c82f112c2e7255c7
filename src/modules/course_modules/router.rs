use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{
    create_module, delete_module, get_module_by_id, get_modules_by_course, update_module,
};

/// Routes nested under `/api/courses/{course_id}/modules`.
pub fn init_course_modules_router() -> Router<AppState> {
    Router::new().route("/", post(create_module).get(get_modules_by_course))
}

/// Routes mounted at `/api/modules`.
pub fn init_modules_router() -> Router<AppState> {
    Router::new().route(
        "/{module_id}",
        get(get_module_by_id)
            .patch(update_module)
            .delete(delete_module),
    )
}

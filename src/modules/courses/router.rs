use axum::{Router, routing::get, routing::post};

use crate::state::AppState;

use super::controller::{
    create_course, delete_course, get_all_courses, get_course_by_id, get_my_courses, update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_all_courses))
        .route("/mine", get(get_my_courses))
        .route(
            "/{course_id}",
            get(get_course_by_id)
                .patch(update_course)
                .delete(delete_course),
        )
}

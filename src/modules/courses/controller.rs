use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Course, CourseDetails, CreateCourseDto, UpdateCourseDto};
use super::service::CourseService;

/// Create a course
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires INSTRUCTOR or ADMIN")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(&state.db, current_user.0.id, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = Vec<CourseDetails>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current_user))]
pub async fn get_all_courses(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> Result<Json<Vec<CourseDetails>>, AppError> {
    let courses = CourseService::get_all_courses(&state.db).await?;
    Ok(Json(courses))
}

/// List the caller's own courses
#[utoipa::path(
    get,
    path = "/api/courses/mine",
    responses(
        (status = 200, description = "Courses taught by the caller", body = Vec<CourseDetails>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires INSTRUCTOR or ADMIN")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user))]
pub async fn get_my_courses(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<Vec<CourseDetails>>, AppError> {
    let courses = CourseService::get_courses_by_instructor(&state.db, current_user.0.id).await?;
    Ok(Json(courses))
}

/// Get one course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseDetails),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current_user))]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseDetails>, AppError> {
    let course = CourseService::get_course_by_id(&state.db, course_id).await?;
    Ok(Json(course))
}

/// Update a course
#[utoipa::path(
    patch,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(&state.db, course_id, &current_user.0, dto).await?;
    Ok(Json(course))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/courses/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user))]
pub async fn delete_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CourseService::delete_course(&state.db, course_id, &current_user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

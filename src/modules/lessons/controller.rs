use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateLessonDto, Lesson, UpdateLessonDto};
use super::service::LessonService;

/// Create a lesson in a module
#[utoipa::path(
    post,
    path = "/api/modules/{module_id}/lessons",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = Lesson),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Module not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(module_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, module_id, &current_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// List lessons of a module
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}/lessons",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Lessons ordered by position", body = Vec<Lesson>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current_user))]
pub async fn get_lessons_by_module(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(module_id): Path<Uuid>,
) -> Result<Json<Vec<Lesson>>, AppError> {
    let lessons = LessonService::get_lessons_by_module(&state.db, module_id).await?;
    Ok(Json(lessons))
}

/// Get one lesson
#[utoipa::path(
    get,
    path = "/api/lessons/{lesson_id}",
    params(("lesson_id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 200, description = "Lesson", body = Lesson),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current_user))]
pub async fn get_lesson_by_id(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(lesson_id): Path<Uuid>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::get_lesson_by_id(&state.db, lesson_id).await?;
    Ok(Json(lesson))
}

/// Update a lesson
#[utoipa::path(
    patch,
    path = "/api/lessons/{lesson_id}",
    params(("lesson_id" = Uuid, Path, description = "Lesson ID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Lesson updated", body = Lesson),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto))]
pub async fn update_lesson(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(lesson_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::update_lesson(&state.db, lesson_id, &current_user.0, dto).await?;
    Ok(Json(lesson))
}

/// Delete a lesson
#[utoipa::path(
    delete,
    path = "/api/lessons/{lesson_id}",
    params(("lesson_id" = Uuid, Path, description = "Lesson ID")),
    responses(
        (status = 204, description = "Lesson deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Lesson not found")
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(lesson_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    LessonService::delete_lesson(&state.db, lesson_id, &current_user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

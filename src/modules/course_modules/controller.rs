use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CourseModule, CourseModuleWithLessons, CreateModuleDto, UpdateModuleDto};
use super::service::ModuleService;

/// Create a module in a course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/modules",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = CreateModuleDto,
    responses(
        (status = 201, description = "Module created", body = CourseModule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Course not found")
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto))]
pub async fn create_module(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateModuleDto>,
) -> Result<(StatusCode, Json<CourseModule>), AppError> {
    let module = ModuleService::create_module(&state.db, course_id, &current_user.0, dto).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

/// List modules of a course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/modules",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Modules ordered by position", body = Vec<CourseModule>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current_user))]
pub async fn get_modules_by_course(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<CourseModule>>, AppError> {
    let modules = ModuleService::get_modules_by_course(&state.db, course_id).await?;
    Ok(Json(modules))
}

/// Get one module with its lessons
#[utoipa::path(
    get,
    path = "/api/modules/{module_id}",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module with lessons", body = CourseModuleWithLessons),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Module not found")
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current_user))]
pub async fn get_module_by_id(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(module_id): Path<Uuid>,
) -> Result<Json<CourseModuleWithLessons>, AppError> {
    let module = ModuleService::get_module_by_id(&state.db, module_id).await?;
    Ok(Json(module))
}

/// Update a module
#[utoipa::path(
    patch,
    path = "/api/modules/{module_id}",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    request_body = UpdateModuleDto,
    responses(
        (status = 200, description = "Module updated", body = CourseModule),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Module not found")
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto))]
pub async fn update_module(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(module_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateModuleDto>,
) -> Result<Json<CourseModule>, AppError> {
    let module = ModuleService::update_module(&state.db, module_id, &current_user.0, dto).await?;
    Ok(Json(module))
}

/// Delete a module
#[utoipa::path(
    delete,
    path = "/api/modules/{module_id}",
    params(("module_id" = Uuid, Path, description = "Module ID")),
    responses(
        (status = 204, description = "Module deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the course owner"),
        (status = 404, description = "Module not found")
    ),
    tag = "Modules",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user))]
pub async fn delete_module(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(module_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ModuleService::delete_module(&state.db, module_id, &current_user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

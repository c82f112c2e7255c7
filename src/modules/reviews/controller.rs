use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateReviewDto, Review};
use super::service::ReviewService;

/// Review a course
#[utoipa::path(
    post,
    path = "/api/courses/{course_id}/reviews",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, description = "Already reviewed this course"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Course not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user, dto))]
pub async fn create_review(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(course_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateReviewDto>,
) -> Result<(StatusCode, Json<Review>), AppError> {
    let review = ReviewService::create_review(&state.db, course_id, current_user.0.id, dto).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// List reviews of a course
#[utoipa::path(
    get,
    path = "/api/courses/{course_id}/reviews",
    params(("course_id" = Uuid, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<Review>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _current_user))]
pub async fn get_reviews_by_course(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = ReviewService::get_reviews_by_course(&state.db, course_id).await?;
    Ok(Json(reviews))
}

/// Delete a review (author or admin)
#[utoipa::path(
    delete,
    path = "/api/reviews/{review_id}",
    params(("review_id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the author"),
        (status = 404, description = "Review not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, current_user))]
pub async fn delete_review(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(review_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ReviewService::delete_review(&state.db, review_id, &current_user.0).await?;
    Ok(StatusCode::NO_CONTENT)
}

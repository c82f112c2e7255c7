use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::authz::{AccessContext, Principal, Requirement, Role, check_access};
use crate::utils::errors::AppError;

use super::model::{CreateReviewDto, Review};

const REVIEW_COLUMNS: &str = "id, course_id, user_id, rating, comment, created_at, updated_at";

pub struct ReviewService;

impl ReviewService {
    #[instrument(skip(db, dto))]
    pub async fn create_review(
        db: &PgPool,
        course_id: Uuid,
        user_id: Uuid,
        dto: CreateReviewDto,
    ) -> Result<Review, AppError> {
        let course_exists: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM courses WHERE id = $1")
                .bind(course_id)
                .fetch_optional(db)
                .await?;

        if course_exists.is_none() {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (course_id, user_id, rating, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(course_id)
        .bind(user_id)
        .bind(dto.rating)
        .bind(&dto.comment)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!(
                    "You have already reviewed this course"
                ));
            }
            AppError::from(e)
        })?;

        Ok(review)
    }

    #[instrument(skip(db))]
    pub async fn get_reviews_by_course(
        db: &PgPool,
        course_id: Uuid,
    ) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE course_id = $1 ORDER BY created_at DESC"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(reviews)
    }

    /// Delete a review. Admins may delete any review; everyone else only
    /// their own, via the gate's resource-owner hatch.
    #[instrument(skip(db))]
    pub async fn delete_review(
        db: &PgPool,
        review_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let author: Option<Uuid> = sqlx::query_scalar("SELECT user_id FROM reviews WHERE id = $1")
            .bind(review_id)
            .fetch_optional(db)
            .await?;

        let author = author.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Review not found")))?;

        check_access(
            &Requirement::any_of(&[Role::Admin]).or_resource_owner(),
            Some(principal),
            &AccessContext {
                resource_id: Some(review_id),
                resource_owner_id: Some(author),
            },
        )?;

        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(db)
            .await?;

        Ok(())
    }
}

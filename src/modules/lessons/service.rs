use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::authz::Principal;
use crate::modules::courses::service::CourseService;
use crate::utils::errors::AppError;

use super::model::{CreateLessonDto, Lesson, UpdateLessonDto};

const LESSON_COLUMNS: &str =
    "id, module_id, title, content, video_url, position, created_at, updated_at";

pub struct LessonService;

impl LessonService {
    /// Course id a module belongs to, or 404 on an unknown module.
    async fn course_of_module(db: &PgPool, module_id: Uuid) -> Result<Uuid, AppError> {
        sqlx::query_scalar("SELECT course_id FROM modules WHERE id = $1")
            .bind(module_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Module not found")))
    }

    /// Course id a lesson belongs to (lesson → module → course), or 404.
    async fn course_of_lesson(db: &PgPool, lesson_id: Uuid) -> Result<Uuid, AppError> {
        sqlx::query_scalar(
            "SELECT m.course_id FROM lessons l JOIN modules m ON m.id = l.module_id
             WHERE l.id = $1",
        )
        .bind(lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_lesson(
        db: &PgPool,
        module_id: Uuid,
        principal: &Principal,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        let course_id = Self::course_of_module(db, module_id).await?;
        CourseService::authorize_course_mutation(db, course_id, principal).await?;

        let position = match dto.position {
            Some(position) => position,
            None => {
                let count: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM lessons WHERE module_id = $1")
                        .bind(module_id)
                        .fetch_one(db)
                        .await?;
                count as i32 + 1
            }
        };

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "INSERT INTO lessons (module_id, title, content, video_url, position)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(module_id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.video_url)
        .bind(position)
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn get_lesson_by_id(db: &PgPool, lesson_id: Uuid) -> Result<Lesson, AppError> {
        sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = $1"
        ))
        .bind(lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_lessons_by_module(
        db: &PgPool,
        module_id: Uuid,
    ) -> Result<Vec<Lesson>, AppError> {
        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE module_id = $1 ORDER BY position ASC"
        ))
        .bind(module_id)
        .fetch_all(db)
        .await?;

        Ok(lessons)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_lesson(
        db: &PgPool,
        lesson_id: Uuid,
        principal: &Principal,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        let course_id = Self::course_of_lesson(db, lesson_id).await?;
        CourseService::authorize_course_mutation(db, course_id, principal).await?;

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            "UPDATE lessons
             SET title = COALESCE($2, title),
                 content = COALESCE($3, content),
                 video_url = COALESCE($4, video_url),
                 position = COALESCE($5, position),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {LESSON_COLUMNS}"
        ))
        .bind(lesson_id)
        .bind(&dto.title)
        .bind(&dto.content)
        .bind(&dto.video_url)
        .bind(dto.position)
        .fetch_one(db)
        .await?;

        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson(
        db: &PgPool,
        lesson_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let course_id = Self::course_of_lesson(db, lesson_id).await?;
        CourseService::authorize_course_mutation(db, course_id, principal).await?;

        sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(lesson_id)
            .execute(db)
            .await?;

        Ok(())
    }
}

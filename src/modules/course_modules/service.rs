use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::authz::Principal;
use crate::modules::courses::service::CourseService;
use crate::modules::lessons::model::Lesson;
use crate::utils::errors::AppError;

use super::model::{CourseModule, CourseModuleWithLessons, CreateModuleDto, UpdateModuleDto};

const MODULE_COLUMNS: &str = "id, course_id, title, position, created_at, updated_at";

pub struct ModuleService;

impl ModuleService {
    /// Course id a module belongs to, or 404.
    async fn owning_course(db: &PgPool, module_id: Uuid) -> Result<Uuid, AppError> {
        sqlx::query_scalar("SELECT course_id FROM modules WHERE id = $1")
            .bind(module_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Module not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_module(
        db: &PgPool,
        course_id: Uuid,
        principal: &Principal,
        dto: CreateModuleDto,
    ) -> Result<CourseModule, AppError> {
        CourseService::authorize_course_mutation(db, course_id, principal).await?;

        let position = match dto.position {
            Some(position) => position,
            None => {
                let count: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM modules WHERE course_id = $1")
                        .bind(course_id)
                        .fetch_one(db)
                        .await?;
                count as i32 + 1
            }
        };

        let module = sqlx::query_as::<_, CourseModule>(&format!(
            "INSERT INTO modules (course_id, title, position)
             VALUES ($1, $2, $3)
             RETURNING {MODULE_COLUMNS}"
        ))
        .bind(course_id)
        .bind(&dto.title)
        .bind(position)
        .fetch_one(db)
        .await?;

        Ok(module)
    }

    #[instrument(skip(db))]
    pub async fn get_module_by_id(
        db: &PgPool,
        module_id: Uuid,
    ) -> Result<CourseModuleWithLessons, AppError> {
        let module = sqlx::query_as::<_, CourseModule>(&format!(
            "SELECT {MODULE_COLUMNS} FROM modules WHERE id = $1"
        ))
        .bind(module_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Module not found")))?;

        let lessons = sqlx::query_as::<_, Lesson>(
            "SELECT id, module_id, title, content, video_url, position, created_at, updated_at
             FROM lessons WHERE module_id = $1 ORDER BY position ASC",
        )
        .bind(module_id)
        .fetch_all(db)
        .await?;

        Ok(CourseModuleWithLessons { module, lessons })
    }

    #[instrument(skip(db))]
    pub async fn get_modules_by_course(
        db: &PgPool,
        course_id: Uuid,
    ) -> Result<Vec<CourseModule>, AppError> {
        let modules = sqlx::query_as::<_, CourseModule>(&format!(
            "SELECT {MODULE_COLUMNS} FROM modules WHERE course_id = $1 ORDER BY position ASC"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(modules)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_module(
        db: &PgPool,
        module_id: Uuid,
        principal: &Principal,
        dto: UpdateModuleDto,
    ) -> Result<CourseModule, AppError> {
        let course_id = Self::owning_course(db, module_id).await?;
        CourseService::authorize_course_mutation(db, course_id, principal).await?;

        let module = sqlx::query_as::<_, CourseModule>(&format!(
            "UPDATE modules
             SET title = COALESCE($2, title),
                 position = COALESCE($3, position),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {MODULE_COLUMNS}"
        ))
        .bind(module_id)
        .bind(&dto.title)
        .bind(dto.position)
        .fetch_one(db)
        .await?;

        Ok(module)
    }

    #[instrument(skip(db))]
    pub async fn delete_module(
        db: &PgPool,
        module_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let course_id = Self::owning_course(db, module_id).await?;
        CourseService::authorize_course_mutation(db, course_id, principal).await?;

        sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(module_id)
            .execute(db)
            .await?;

        Ok(())
    }
}

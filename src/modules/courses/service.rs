use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::authz::{AccessContext, Principal, Requirement, Role, check_access};
use crate::utils::errors::AppError;

use super::model::{Course, CourseDetails, CourseDetailsRow, CreateCourseDto, UpdateCourseDto};

const COURSE_COLUMNS: &str =
    "id, title, description, thumbnail, category, level, price, instructor_id, \
     created_at, updated_at";

const COURSE_DETAILS_QUERY: &str = "SELECT c.id, c.title, c.description, c.thumbnail, \
     c.category, c.level, c.price, c.instructor_id, c.created_at, c.updated_at, \
     u.username AS instructor_username, u.email AS instructor_email \
     FROM courses c JOIN users u ON u.id = c.instructor_id";

pub struct CourseService;

impl CourseService {
    /// Admit the principal when it is an admin or owns the course.
    ///
    /// The original platform declared instructor-or-admin on mutations but
    /// never verified ownership of the specific course; this closes that gap
    /// through the gate's resource-owner hatch so rejections are audit-logged
    /// like every other denial.
    pub(crate) async fn authorize_course_mutation(
        db: &PgPool,
        course_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT instructor_id FROM courses WHERE id = $1")
                .bind(course_id)
                .fetch_optional(db)
                .await?;

        let owner = owner.ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        check_access(
            &Requirement::any_of(&[Role::Admin]).or_resource_owner(),
            Some(principal),
            &AccessContext {
                resource_id: Some(course_id),
                resource_owner_id: Some(owner),
            },
        )
    }

    #[instrument(skip(db, dto))]
    pub async fn create_course(
        db: &PgPool,
        instructor_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (title, description, thumbnail, category, level, price, instructor_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.thumbnail)
        .bind(&dto.category)
        .bind(&dto.level)
        .bind(dto.price)
        .bind(instructor_id)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn get_all_courses(db: &PgPool) -> Result<Vec<CourseDetails>, AppError> {
        let rows = sqlx::query_as::<_, CourseDetailsRow>(&format!(
            "{COURSE_DETAILS_QUERY} ORDER BY c.created_at DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(CourseDetails::from).collect())
    }

    #[instrument(skip(db))]
    pub async fn get_course_by_id(db: &PgPool, course_id: Uuid) -> Result<CourseDetails, AppError> {
        let row = sqlx::query_as::<_, CourseDetailsRow>(&format!(
            "{COURSE_DETAILS_QUERY} WHERE c.id = $1"
        ))
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        Ok(row.into())
    }

    #[instrument(skip(db))]
    pub async fn get_courses_by_instructor(
        db: &PgPool,
        instructor_id: Uuid,
    ) -> Result<Vec<CourseDetails>, AppError> {
        let rows = sqlx::query_as::<_, CourseDetailsRow>(&format!(
            "{COURSE_DETAILS_QUERY} WHERE c.instructor_id = $1 ORDER BY c.created_at DESC"
        ))
        .bind(instructor_id)
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(CourseDetails::from).collect())
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        course_id: Uuid,
        principal: &Principal,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        Self::authorize_course_mutation(db, course_id, principal).await?;

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 thumbnail = COALESCE($4, thumbnail),
                 category = COALESCE($5, category),
                 level = COALESCE($6, level),
                 price = COALESCE($7, price),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(course_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.thumbnail)
        .bind(&dto.category)
        .bind(&dto.level)
        .bind(dto.price)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn delete_course(
        db: &PgPool,
        course_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        Self::authorize_course_mutation(db, course_id, principal).await?;

        sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(course_id)
            .execute(db)
            .await?;

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A course, the top level of the content hierarchy.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub price: Option<f64>,
    pub instructor_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Instructor summary embedded in course responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct InstructorInfo {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
}

/// Course with its instructor joined in.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: InstructorInfo,
}

/// Flat row shape for the course + instructor join.
#[derive(FromRow)]
pub(super) struct CourseDetailsRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub price: Option<f64>,
    pub instructor_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub instructor_username: Option<String>,
    pub instructor_email: String,
}

impl From<CourseDetailsRow> for CourseDetails {
    fn from(row: CourseDetailsRow) -> Self {
        CourseDetails {
            instructor: InstructorInfo {
                id: row.instructor_id,
                username: row.instructor_username,
                email: row.instructor_email,
            },
            course: Course {
                id: row.id,
                title: row.title,
                description: row.description,
                thumbnail: row.thumbnail,
                category: row.category,
                level: row.level,
                price: row.price,
                instructor_id: row.instructor_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub price: Option<f64>,
}

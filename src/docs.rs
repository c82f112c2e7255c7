use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::authz::Role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, RegisterRequest, TokenResponse};
use crate::modules::course_modules::model::{
    CourseModule, CourseModuleWithLessons, CreateModuleDto, UpdateModuleDto,
};
use crate::modules::courses::model::{
    Course, CourseDetails, CreateCourseDto, InstructorInfo, UpdateCourseDto,
};
use crate::modules::lessons::model::{CreateLessonDto, Lesson, UpdateLessonDto};
use crate::modules::reviews::model::{CreateReviewDto, Review};
use crate::modules::users::model::{UpdateProfileDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::get_all_users,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_all_courses,
        crate::modules::courses::controller::get_my_courses,
        crate::modules::courses::controller::get_course_by_id,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::course_modules::controller::create_module,
        crate::modules::course_modules::controller::get_modules_by_course,
        crate::modules::course_modules::controller::get_module_by_id,
        crate::modules::course_modules::controller::update_module,
        crate::modules::course_modules::controller::delete_module,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons_by_module,
        crate::modules::lessons::controller::get_lesson_by_id,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::reviews::controller::create_review,
        crate::modules::reviews::controller::get_reviews_by_course,
        crate::modules::reviews::controller::delete_review,
    ),
    components(
        schemas(
            Role,
            User,
            UpdateProfileDto,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            ErrorResponse,
            Course,
            CourseDetails,
            InstructorInfo,
            CreateCourseDto,
            UpdateCourseDto,
            CourseModule,
            CourseModuleWithLessons,
            CreateModuleDto,
            UpdateModuleDto,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            Review,
            CreateReviewDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Users", description = "Profiles and user administration"),
        (name = "Courses", description = "Course management"),
        (name = "Modules", description = "Modules within a course"),
        (name = "Lessons", description = "Lessons within a module"),
        (name = "Reviews", description = "Course reviews"),
    ),
    info(
        title = "Lernio API",
        description = "Learning platform backend with role-based access control",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::authz::{Requirement, RequirementRegistry, Role};
use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::enforce_requirements;
use crate::modules::auth::router::init_auth_router;
use crate::modules::course_modules::router::{init_course_modules_router, init_modules_router};
use crate::modules::courses::router::init_courses_router;
use crate::modules::lessons::router::{init_lessons_router, init_module_lessons_router};
use crate::modules::reviews::router::{init_course_reviews_router, init_reviews_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Role requirements for every protected operation, declared in one place
/// at startup.
///
/// Coarse declarations cover a route prefix; fine declarations override them
/// for a single method + route template. Operations with no declaration are
/// open at this layer (their handlers may still require authentication).
/// Resource ownership for mutations is enforced where the resource is loaded,
/// in the services.
pub fn access_policy() -> RequirementRegistry {
    let instructor = Requirement::any_of(&[Role::Instructor, Role::Admin]);

    RequirementRegistry::new()
        // Courses: reads are open to any authenticated user, mutations and
        // the instructor dashboard need INSTRUCTOR or higher.
        .operation(Method::POST, "/api/courses", instructor.clone())
        .operation(Method::GET, "/api/courses/mine", instructor.clone())
        .operation(
            Method::PATCH,
            "/api/courses/{course_id}",
            instructor.clone(),
        )
        .operation(
            Method::DELETE,
            "/api/courses/{course_id}",
            instructor.clone(),
        )
        // Modules: guarded as a group, with reads opened back up
        // per-operation.
        .group("/api/courses/{course_id}/modules", instructor.clone())
        .group("/api/modules", instructor.clone())
        .operation(
            Method::GET,
            "/api/courses/{course_id}/modules",
            Requirement::authenticated(),
        )
        .operation(
            Method::GET,
            "/api/modules/{module_id}",
            Requirement::authenticated(),
        )
        .operation(
            Method::GET,
            "/api/modules/{module_id}/lessons",
            Requirement::authenticated(),
        )
        // Lessons
        .group("/api/lessons", instructor)
        .operation(
            Method::GET,
            "/api/lessons/{lesson_id}",
            Requirement::authenticated(),
        )
        // Users: listing is admin-only; profile routes only need
        // authentication, which the handlers enforce themselves.
        .operation(Method::GET, "/api/users", Requirement::any_of(&[Role::Admin]))
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/users", init_users_router())
                .nest(
                    "/courses",
                    init_courses_router()
                        .nest("/{course_id}/modules", init_course_modules_router())
                        .nest("/{course_id}/reviews", init_course_reviews_router()),
                )
                .nest(
                    "/modules",
                    init_modules_router().nest("/{module_id}/lessons", init_module_lessons_router()),
                )
                .nest("/lessons", init_lessons_router())
                .nest("/reviews", init_reviews_router())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    enforce_requirements,
                )),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}

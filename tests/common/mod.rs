use std::sync::Arc;

use lernio::config::cors::CorsConfig;
use lernio::config::jwt::JwtConfig;
use lernio::router::{access_policy, init_router};
use lernio::state::AppState;
use lernio::utils::password::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database and bring its schema up to date.
///
/// Returns `None` when `DATABASE_URL` is not set or unreachable, so
/// DB-backed tests skip on machines without PostgreSQL instead of failing.
pub async fn test_pool() -> Option<PgPool> {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;
    sqlx::migrate!().run(&pool).await.unwrap();
    Some(pool)
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        requirements: Arc::new(access_policy()),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// Create a user directly in the database.
/// `role` is one of: "STUDENT", "INSTRUCTOR", "ADMIN".
pub async fn create_test_user(pool: &PgPool, email: &str, password: &str, role: &str) -> TestUser {
    let hashed = hash_password(password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (email, username, password, role)
         VALUES ($1, $2, $3, $4::user_role)
         RETURNING id",
    )
    .bind(email)
    .bind("testuser")
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email: email.to_string(),
        password: password.to_string(),
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

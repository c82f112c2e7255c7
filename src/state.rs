use std::sync::Arc;

use sqlx::PgPool;

use crate::authz::RequirementRegistry;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::jwt::JwtConfig;

/// Shared application state.
///
/// Everything here is either immutable after startup (configs, the
/// requirement registry) or internally synchronized (the pool), so cloning
/// per request is cheap and no locking is needed.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub requirements: Arc<RequirementRegistry>,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        requirements: Arc::new(crate::router::access_policy()),
    }
}

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, RegisterRequest, TokenResponse};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "User with this email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;
        let role = dto.role.unwrap_or_default();

        let user_id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (email, username, password, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&dto.email)
        .bind(&dto.username)
        .bind(&hashed_password)
        .bind(role)
        .fetch_one(db)
        .await?;

        let access_token = create_access_token(user_id, jwt_config)?;

        Ok(TokenResponse { access_token })
    }

    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<TokenResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct Credentials {
            id: Uuid,
            password: String,
        }

        // Unknown email and wrong password produce the same error.
        let credentials =
            sqlx::query_as::<_, Credentials>("SELECT id, password FROM users WHERE email = $1")
                .bind(&dto.email)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        let is_valid = verify_password(&dto.password, &credentials.password)?;

        if !is_valid {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let access_token = create_access_token(credentials.id, jwt_config)?;

        Ok(TokenResponse { access_token })
    }
}

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, setup_test_app, test_pool};
use http_body_util::BodyExt;
use lernio::config::jwt::JwtConfig;
use lernio::utils::jwt::{UNAUTHENTICATED, create_access_token};
use tower::ServiceExt;

async fn get_profile(app: axum::Router, auth_header: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method("GET").uri("/api/users/profile");
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let message = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_default();

    (status, message)
}

#[tokio::test]
async fn test_deleted_subject_token_stops_working() {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = setup_test_app(pool.clone());

    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "testpass123", "STUDENT").await;
    let token = create_access_token(user.id, &JwtConfig::from_env()).unwrap();
    let header = format!("Bearer {token}");

    let (status, _) = get_profile(app.clone(), Some(&header)).await;
    assert_eq!(status, StatusCode::OK);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    // The token is still valid; only its subject is gone.
    let (status, message) = get_profile(app, Some(&header)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message, UNAUTHENTICATED);
}

#[tokio::test]
async fn test_unauthenticated_legs_are_indistinguishable() {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = setup_test_app(pool.clone());

    let email = generate_unique_email();
    let user = create_test_user(&pool, &email, "testpass123", "STUDENT").await;
    let orphaned_token = create_access_token(user.id, &JwtConfig::from_env()).unwrap();

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let orphaned = format!("Bearer {orphaned_token}");
    let legs: [Option<&str>; 5] = [
        None,
        Some("Bearer not.a.valid.token"),
        Some("Basic dXNlcjpwYXNz"),
        Some("bearer lowercase-scheme"),
        Some(&orphaned),
    ];

    for auth_header in legs {
        let (status, message) = get_profile(app.clone(), auth_header).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "leg: {auth_header:?}");
        assert_eq!(message, UNAUTHENTICATED, "leg: {auth_header:?}");
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let Some(pool) = test_pool().await else {
        eprintln!("DATABASE_URL not set, skipping");
        return;
    };
    let app = setup_test_app(pool.clone());

    let email = generate_unique_email();
    let body = serde_json::json!({
        "email": email,
        "password": "testpass123"
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json.get("access_token").is_some());
}

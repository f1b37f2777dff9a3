#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use sqlx::SqlitePool;
use tower::ServiceExt;

use orgatasks_backend::api::{create_router, AppState};
use orgatasks_backend::auth::jwt::Claims;
use orgatasks_backend::config::Config;
use orgatasks_backend::infrastructure::db;

pub const TEST_SECRET: &str = "test-secret";
pub const NOW: &str = "2025-01-01T00:00:00+00:00";

/// In-memory database; a single connection keeps every query on the same database.
pub async fn setup_test_db() -> SqlitePool {
    db::init_db("sqlite::memory:", 1)
        .await
        .expect("Failed to create test database")
}

pub async fn seed_board(pool: &SqlitePool, id: &str, owner_id: &str) {
    sqlx::query(
        "INSERT INTO boards (id, owner_id, title, description, created_at, updated_at) VALUES (?, ?, ?, '', ?, ?)",
    )
    .bind(id)
    .bind(owner_id)
    .bind(format!("Board {}", id))
    .bind(NOW)
    .bind(NOW)
    .execute(pool)
    .await
    .expect("Failed to seed board");
}

pub async fn seed_list(pool: &SqlitePool, id: &str, board_id: &str) {
    sqlx::query(
        "INSERT INTO lists (id, board_id, title, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(board_id)
    .bind(format!("List {}", id))
    .bind(NOW)
    .bind(NOW)
    .execute(pool)
    .await
    .expect("Failed to seed list");
}

pub async fn seed_card(pool: &SqlitePool, id: &str, list_id: &str, position: i64) {
    sqlx::query(
        "INSERT INTO cards (id, list_id, title, position, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(list_id)
    .bind(id.to_uppercase())
    .bind(position)
    .bind(NOW)
    .bind(NOW)
    .execute(pool)
    .await
    .expect("Failed to seed card");
}

/// `(card_id, position)` pairs of a list in display order.
pub async fn positions(pool: &SqlitePool, list_id: &str) -> Vec<(String, i64)> {
    sqlx::query_as(
        "SELECT id, position FROM cards WHERE list_id = ? ORDER BY position ASC, created_at ASC, id ASC",
    )
    .bind(list_id)
    .fetch_all(pool)
    .await
    .expect("Failed to read positions")
}

pub fn pairs(expected: &[(&str, i64)]) -> Vec<(String, i64)> {
    expected
        .iter()
        .map(|(id, position)| (id.to_string(), *position))
        .collect()
}

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

pub fn test_app(pool: SqlitePool) -> Router {
    let config = Arc::new(Config {
        port: 3000,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        cors_origin: "http://localhost:8081".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
    });

    let state = AppState::new(Some(pool), Arc::clone(&config));
    create_router(state, &config)
}

/// Stands in for the account service that issues tokens in production.
pub fn token_for(user_id: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to create token")
}

pub async fn make_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
    token: Option<&str>,
) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri).method(method);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }

    if let Some(token) = token {
        request = request.header("authorization", format!("Bearer {}", token));
    }

    let request = request
        .body(Body::from(body.unwrap_or_default()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::api::dto::{CreateListRequest, UpdateListRequest};
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::domain::{BoardError, Card, TaskList};
use crate::services::{BoardService, CardService};

pub async fn create_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<CreateListRequest>,
) -> Result<(StatusCode, Json<TaskList>), BoardError> {
    let pool = state.require_db()?;
    let list = BoardService::create_list(pool, &user.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn update_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateListRequest>,
) -> Result<Json<TaskList>, BoardError> {
    let pool = state.require_db()?;
    let list = BoardService::update_list(pool, &user.user_id, &id, req).await?;
    Ok(Json(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, BoardError> {
    let pool = state.require_db()?;
    BoardService::delete_list(pool, &user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_list_cards(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Card>>, BoardError> {
    let pool = state.require_db()?;
    let cards = CardService::list_cards(pool, &user.user_id, &id).await?;
    Ok(Json(cards))
}

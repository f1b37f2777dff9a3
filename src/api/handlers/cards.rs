use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::api::dto::{CreateCardRequest, MoveCardRequest, ReorderCardsRequest, UpdateCardRequest};
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::domain::{BoardError, Card};
use crate::services::{CardService, OrderingService};

pub async fn create_card(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>), BoardError> {
    let pool = state.require_db()?;
    let card = OrderingService::create_card(pool, &user.user_id, &req.list_id, &req.title).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update_card(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateCardRequest>,
) -> Result<Json<Card>, BoardError> {
    let pool = state.require_db()?;
    let card = CardService::update_card(pool, &user.user_id, &id, req).await?;
    Ok(Json(card))
}

pub async fn delete_card(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, BoardError> {
    let pool = state.require_db()?;
    CardService::delete_card(pool, &user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder_cards(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<ReorderCardsRequest>,
) -> Result<Json<Vec<Card>>, BoardError> {
    let pool = state.require_db()?;
    let cards =
        OrderingService::reorder_cards(pool, &user.user_id, &req.list_id, &req.card_ids).await?;
    Ok(Json(cards))
}

pub async fn move_card(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<MoveCardRequest>,
) -> Result<Json<Card>, BoardError> {
    let pool = state.require_db()?;
    let card = OrderingService::move_card(
        pool,
        &user.user_id,
        &req.card_id,
        &req.target_list_id,
        req.target_position,
    )
    .await?;
    Ok(Json(card))
}

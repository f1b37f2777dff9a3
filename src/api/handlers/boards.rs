use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::api::dto::{CreateBoardRequest, ListWithCards, UpdateBoardRequest};
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::domain::{Board, BoardError};
use crate::services::BoardService;

pub async fn list_boards(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Board>>, BoardError> {
    let pool = state.require_db()?;
    let boards = BoardService::list_boards(pool, &user.user_id).await?;
    Ok(Json(boards))
}

pub async fn create_board(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(req): ApiJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<Board>), BoardError> {
    let pool = state.require_db()?;
    let board = BoardService::create_board(pool, &user.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(board)))
}

pub async fn update_board(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateBoardRequest>,
) -> Result<Json<Board>, BoardError> {
    let pool = state.require_db()?;
    let board = BoardService::update_board(pool, &user.user_id, &id, req).await?;
    Ok(Json(board))
}

pub async fn delete_board(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, BoardError> {
    let pool = state.require_db()?;
    BoardService::delete_board(pool, &user.user_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_board_lists(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ListWithCards>>, BoardError> {
    let pool = state.require_db()?;
    let lists = BoardService::get_lists(pool, &user.user_id, &id).await?;
    Ok(Json(lists))
}

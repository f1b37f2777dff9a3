use std::collections::HashMap;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::api::dto::{
    CreateBoardRequest, CreateListRequest, ListWithCards, UpdateBoardRequest, UpdateListRequest,
};
use crate::domain::{Board, BoardError, Card, TaskList};
use crate::infrastructure::CardStore;
use crate::services::access;

pub struct BoardService;

impl BoardService {
    // ── Boards ─────────────────────────────────────────────────

    pub async fn list_boards(pool: &SqlitePool, user_id: &str) -> Result<Vec<Board>, BoardError> {
        let boards: Vec<Board> =
            sqlx::query_as("SELECT * FROM boards WHERE owner_id = ? ORDER BY created_at ASC")
                .bind(user_id)
                .fetch_all(pool)
                .await?;

        Ok(boards)
    }

    pub async fn create_board(
        pool: &SqlitePool,
        user_id: &str,
        req: CreateBoardRequest,
    ) -> Result<Board, BoardError> {
        let title = require_title(&req.title, "Board")?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let board: Board = sqlx::query_as(
            "INSERT INTO boards (id, owner_id, title, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&id)
        .bind(user_id)
        .bind(title)
        .bind(req.description.unwrap_or_default())
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await?;

        tracing::info!(board_id = board.id.as_str(), "Board created");
        Ok(board)
    }

    /// Owner-scoped: a board of another user reads as missing.
    pub async fn get_owned_board(
        pool: &SqlitePool,
        user_id: &str,
        board_id: &str,
    ) -> Result<Board, BoardError> {
        let mut conn = pool.acquire().await?;
        Self::fetch_owned_board(&mut conn, user_id, board_id).await
    }

    async fn fetch_owned_board(
        conn: &mut SqliteConnection,
        user_id: &str,
        board_id: &str,
    ) -> Result<Board, BoardError> {
        sqlx::query_as("SELECT * FROM boards WHERE id = ? AND owner_id = ?")
            .bind(board_id)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("Board not found: {}", board_id)))
    }

    pub async fn update_board(
        pool: &SqlitePool,
        user_id: &str,
        board_id: &str,
        req: UpdateBoardRequest,
    ) -> Result<Board, BoardError> {
        let existing = Self::get_owned_board(pool, user_id, board_id).await?;

        let title = match req.title {
            Some(ref title) => require_title(title, "Board")?.to_string(),
            None => existing.title,
        };
        let description = req.description.unwrap_or(existing.description);
        let now = Utc::now().to_rfc3339();

        let board: Board = sqlx::query_as(
            "UPDATE boards SET title = ?, description = ?, updated_at = ? WHERE id = ? AND owner_id = ? RETURNING *",
        )
        .bind(&title)
        .bind(&description)
        .bind(&now)
        .bind(board_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(board)
    }

    /// Deletes the board; lists and cards go with it through `ON DELETE CASCADE`.
    pub async fn delete_board(
        pool: &SqlitePool,
        user_id: &str,
        board_id: &str,
    ) -> Result<(), BoardError> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ? AND owner_id = ?")
            .bind(board_id)
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BoardError::NotFound(format!("Board not found: {}", board_id)));
        }

        tracing::info!(board_id, "Board deleted with its lists and cards");
        Ok(())
    }

    // ── Lists ──────────────────────────────────────────────────

    pub async fn get_lists(
        pool: &SqlitePool,
        user_id: &str,
        board_id: &str,
    ) -> Result<Vec<ListWithCards>, BoardError> {
        // One read transaction, so a concurrent move is seen entirely or not at all.
        let mut tx = pool.begin().await?;
        Self::fetch_owned_board(&mut tx, user_id, board_id).await?;

        let lists: Vec<TaskList> =
            sqlx::query_as("SELECT * FROM lists WHERE board_id = ? ORDER BY created_at ASC, id ASC")
                .bind(board_id)
                .fetch_all(&mut *tx)
                .await?;

        let mut cards_by_list: HashMap<String, Vec<Card>> = HashMap::new();
        for card in CardStore::fetch_cards_by_board(&mut tx, board_id).await? {
            cards_by_list.entry(card.list_id.clone()).or_default().push(card);
        }
        tx.commit().await?;

        Ok(lists
            .into_iter()
            .map(|list| {
                let cards = cards_by_list.remove(&list.id).unwrap_or_default();
                ListWithCards { list, cards }
            })
            .collect())
    }

    pub async fn create_list(
        pool: &SqlitePool,
        user_id: &str,
        req: CreateListRequest,
    ) -> Result<TaskList, BoardError> {
        let title = require_title(&req.title, "List")?;

        let board: Option<Board> = sqlx::query_as("SELECT * FROM boards WHERE id = ?")
            .bind(&req.board_id)
            .fetch_optional(pool)
            .await?;
        let board =
            board.ok_or_else(|| BoardError::NotFound(format!("Board not found: {}", req.board_id)))?;
        if board.owner_id != user_id {
            return Err(BoardError::Forbidden(format!(
                "Board {} belongs to another user",
                board.id
            )));
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let list: TaskList = sqlx::query_as(
            "INSERT INTO lists (id, board_id, title, created_at, updated_at) VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&id)
        .bind(&board.id)
        .bind(title)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await?;

        tracing::info!(list_id = list.id.as_str(), board_id = board.id.as_str(), "List created");
        Ok(list)
    }

    pub async fn update_list(
        pool: &SqlitePool,
        user_id: &str,
        list_id: &str,
        req: UpdateListRequest,
    ) -> Result<TaskList, BoardError> {
        let title = require_title(&req.title, "List")?;
        let mut conn = pool.acquire().await?;
        access::require_list_owner(&mut conn, user_id, list_id).await?;

        let now = Utc::now().to_rfc3339();
        let list: TaskList =
            sqlx::query_as("UPDATE lists SET title = ?, updated_at = ? WHERE id = ? RETURNING *")
                .bind(title)
                .bind(&now)
                .bind(list_id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(list)
    }

    pub async fn delete_list(
        pool: &SqlitePool,
        user_id: &str,
        list_id: &str,
    ) -> Result<(), BoardError> {
        let mut conn = pool.acquire().await?;
        access::require_list_owner(&mut conn, user_id, list_id).await?;

        sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(list_id)
            .execute(&mut *conn)
            .await?;

        tracing::info!(list_id, "List deleted with its cards");
        Ok(())
    }
}

pub(crate) fn require_title<'a>(title: &'a str, kind: &str) -> Result<&'a str, BoardError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BoardError::InvalidArgument(format!("{} title is required", kind)));
    }
    Ok(title)
}

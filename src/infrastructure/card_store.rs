//! Row-level storage operations used by the ordering engine.
//!
//! Every function takes a plain connection so callers can run a sequence of
//! them inside one `sqlx::Transaction` and commit or roll back as a unit.

use sqlx::SqliteConnection;

use crate::domain::{Card, ListOwner, PositionUpdate};

pub struct CardStore;

impl CardStore {
    /// Claims the list row for writing by bumping its `updated_at`.
    ///
    /// Issued as the first statement of an ordering transaction so concurrent
    /// writers queue on the SQLite write lock instead of failing on a stale
    /// snapshot. Returns `false` when the list does not exist.
    pub async fn claim_list(
        conn: &mut SqliteConnection,
        list_id: &str,
        now: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE lists SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(list_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn fetch_list_owner(
        conn: &mut SqliteConnection,
        list_id: &str,
    ) -> Result<Option<ListOwner>, sqlx::Error> {
        sqlx::query_as(
            "SELECT l.id AS list_id, l.board_id, b.owner_id FROM lists l JOIN boards b ON b.id = l.board_id WHERE l.id = ?",
        )
        .bind(list_id)
        .fetch_optional(&mut *conn)
        .await
    }

    pub async fn fetch_card(
        conn: &mut SqliteConnection,
        card_id: &str,
    ) -> Result<Option<Card>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM cards WHERE id = ?")
            .bind(card_id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn fetch_cards_by_list(
        conn: &mut SqliteConnection,
        list_id: &str,
    ) -> Result<Vec<Card>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM cards WHERE list_id = ? ORDER BY position ASC, created_at ASC, id ASC",
        )
        .bind(list_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// Every card of a board, in display order within each list.
    pub async fn fetch_cards_by_board(
        conn: &mut SqliteConnection,
        board_id: &str,
    ) -> Result<Vec<Card>, sqlx::Error> {
        sqlx::query_as(
            "SELECT c.* FROM cards c JOIN lists l ON l.id = c.list_id WHERE l.board_id = ? \
             ORDER BY c.position ASC, c.created_at ASC, c.id ASC",
        )
        .bind(board_id)
        .fetch_all(&mut *conn)
        .await
    }

    pub async fn max_position(
        conn: &mut SqliteConnection,
        list_id: &str,
    ) -> Result<Option<i64>, sqlx::Error> {
        let (max_pos,): (Option<i64>,) =
            sqlx::query_as("SELECT MAX(position) FROM cards WHERE list_id = ?")
                .bind(list_id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(max_pos)
    }

    pub async fn insert_card(conn: &mut SqliteConnection, card: &Card) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cards (id, list_id, title, position, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&card.id)
        .bind(&card.list_id)
        .bind(&card.title)
        .bind(card.position)
        .bind(&card.created_at)
        .bind(&card.updated_at)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Writes each position in order. The first failure is returned as-is;
    /// atomicity comes from the enclosing transaction.
    pub async fn batch_update_positions(
        conn: &mut SqliteConnection,
        updates: &[PositionUpdate],
        now: &str,
    ) -> Result<(), sqlx::Error> {
        for update in updates {
            sqlx::query("UPDATE cards SET position = ?, updated_at = ? WHERE id = ?")
                .bind(update.position)
                .bind(now)
                .bind(&update.card_id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    pub async fn update_list_and_position(
        conn: &mut SqliteConnection,
        card_id: &str,
        list_id: &str,
        position: i64,
        now: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE cards SET list_id = ?, position = ?, updated_at = ? WHERE id = ?")
            .bind(list_id)
            .bind(position)
            .bind(now)
            .bind(card_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

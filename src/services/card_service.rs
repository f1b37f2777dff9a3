use chrono::Utc;
use sqlx::SqlitePool;

use crate::api::dto::UpdateCardRequest;
use crate::domain::{BoardError, Card};
use crate::infrastructure::CardStore;
use crate::services::access;
use crate::services::board_service::require_title;

pub struct CardService;

impl CardService {
    /// Cards of a list in display order.
    pub async fn list_cards(
        pool: &SqlitePool,
        user_id: &str,
        list_id: &str,
    ) -> Result<Vec<Card>, BoardError> {
        let mut conn = pool.acquire().await?;
        access::require_list_owner(&mut conn, user_id, list_id).await?;

        let cards = CardStore::fetch_cards_by_list(&mut conn, list_id).await?;
        Ok(cards)
    }

    pub async fn update_card(
        pool: &SqlitePool,
        user_id: &str,
        card_id: &str,
        req: UpdateCardRequest,
    ) -> Result<Card, BoardError> {
        let title = require_title(&req.title, "Card")?;
        let mut conn = pool.acquire().await?;
        access::require_card_owner(&mut conn, user_id, card_id).await?;

        let now = Utc::now().to_rfc3339();
        let card: Card =
            sqlx::query_as("UPDATE cards SET title = ?, updated_at = ? WHERE id = ? RETURNING *")
                .bind(title)
                .bind(&now)
                .bind(card_id)
                .fetch_one(&mut *conn)
                .await?;

        Ok(card)
    }

    /// Removes the card. Survivors keep their positions; the gap is harmless.
    pub async fn delete_card(
        pool: &SqlitePool,
        user_id: &str,
        card_id: &str,
    ) -> Result<(), BoardError> {
        let mut conn = pool.acquire().await?;
        let (card, _) = access::require_card_owner(&mut conn, user_id, card_id).await?;

        sqlx::query("DELETE FROM cards WHERE id = ?")
            .bind(card_id)
            .execute(&mut *conn)
            .await?;

        tracing::info!(
            card_id,
            list_id = card.list_id.as_str(),
            position = card.position,
            "Card deleted"
        );
        Ok(())
    }
}

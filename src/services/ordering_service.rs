//! Applies card orderings to storage as single transactions.
//!
//! Every operation opens one `sqlx::Transaction`, claims the list it renumbers,
//! validates the ownership chain, writes, and commits. Returning early with an
//! error drops the transaction, which rolls back every write made so far.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{position, BoardError, Card};
use crate::infrastructure::CardStore;
use crate::services::access;
use crate::services::board_service::require_title;

pub struct OrderingService;

impl OrderingService {
    pub async fn create_card(
        pool: &SqlitePool,
        user_id: &str,
        list_id: &str,
        title: &str,
    ) -> Result<Card, BoardError> {
        let title = require_title(title, "Card")?;
        let now = Utc::now().to_rfc3339();
        let mut tx = pool.begin().await?;

        if !CardStore::claim_list(&mut tx, list_id, &now).await? {
            return Err(BoardError::NotFound(format!("List not found: {}", list_id)));
        }
        access::require_list_owner(&mut tx, user_id, list_id).await?;

        let max_position = CardStore::max_position(&mut tx, list_id).await?;
        let card = Card {
            id: Uuid::new_v4().to_string(),
            list_id: list_id.to_string(),
            title: title.to_string(),
            position: position::append_position(max_position),
            created_at: now.clone(),
            updated_at: now,
        };
        CardStore::insert_card(&mut tx, &card).await?;

        tx.commit().await?;

        tracing::info!(
            card_id = card.id.as_str(),
            list_id,
            position = card.position,
            "Card created"
        );
        Ok(card)
    }

    /// Rewrites the positions of `ordered_card_ids` to `0..n-1` in the given order.
    ///
    /// Cards of the list that are missing from the ordering keep their stored
    /// position. Ids that do not belong to the list are rejected.
    pub async fn reorder_cards(
        pool: &SqlitePool,
        user_id: &str,
        list_id: &str,
        ordered_card_ids: &[String],
    ) -> Result<Vec<Card>, BoardError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = pool.begin().await?;

        if !CardStore::claim_list(&mut tx, list_id, &now).await? {
            return Err(BoardError::NotFound(format!("List not found: {}", list_id)));
        }
        access::require_list_owner(&mut tx, user_id, list_id).await?;

        let updates = position::sequence_positions(ordered_card_ids)?;
        let current = CardStore::fetch_cards_by_list(&mut tx, list_id).await?;

        if let Some(stray) = updates
            .iter()
            .find(|update| !current.iter().any(|card| card.id == update.card_id))
        {
            return Err(BoardError::InvalidArgument(format!(
                "Card {} does not belong to list {}",
                stray.card_id, list_id
            )));
        }

        let pending = position::without_unchanged(&current, updates);
        if pending.is_empty() {
            tx.rollback().await?;
            tracing::debug!(list_id, "Reorder is a no-op, cards already in order");
            return Ok(current);
        }

        CardStore::batch_update_positions(&mut tx, &pending, &now).await?;
        let cards = CardStore::fetch_cards_by_list(&mut tx, list_id).await?;

        tx.commit().await?;

        tracing::info!(
            list_id,
            requested = ordered_card_ids.len(),
            written = pending.len(),
            "Cards reordered"
        );
        Ok(cards)
    }

    /// Moves a card into `target_list_id` and renumbers the target list to `0..m-1`.
    ///
    /// The source list is left as is; removing one card cannot introduce
    /// duplicate positions there.
    pub async fn move_card(
        pool: &SqlitePool,
        user_id: &str,
        card_id: &str,
        target_list_id: &str,
        target_position: Option<usize>,
    ) -> Result<Card, BoardError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = pool.begin().await?;

        if !CardStore::claim_list(&mut tx, target_list_id, &now).await? {
            return Err(BoardError::NotFound(format!(
                "Target list not found: {}",
                target_list_id
            )));
        }

        let (card, source) = access::require_card_owner(&mut tx, user_id, card_id).await?;
        access::require_list_owner(&mut tx, user_id, target_list_id).await?;

        let target_cards = CardStore::fetch_cards_by_list(&mut tx, target_list_id).await?;
        let placement = position::place_and_renumber(&target_cards, &card.id, target_position);

        CardStore::update_list_and_position(
            &mut tx,
            &card.id,
            target_list_id,
            placement.position,
            &now,
        )
        .await?;

        let renumbered = position::without_unchanged(&target_cards, placement.others);
        CardStore::batch_update_positions(&mut tx, &renumbered, &now).await?;

        let moved = CardStore::fetch_card(&mut tx, &card.id)
            .await?
            .ok_or_else(|| BoardError::NotFound(format!("Card not found: {}", card_id)))?;

        tx.commit().await?;

        tracing::info!(
            card_id,
            from_list = source.list_id.as_str(),
            to_list = target_list_id,
            position = moved.position,
            renumbered = renumbered.len(),
            "Card moved"
        );
        Ok(moved)
    }
}

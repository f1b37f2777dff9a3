use sqlx::SqliteConnection;

use crate::domain::{BoardError, Card, ListOwner};
use crate::infrastructure::CardStore;

/// Resolves list → board → owner and checks the acting user owns the board.
pub async fn require_list_owner(
    conn: &mut SqliteConnection,
    user_id: &str,
    list_id: &str,
) -> Result<ListOwner, BoardError> {
    let owner = CardStore::fetch_list_owner(conn, list_id)
        .await?
        .ok_or_else(|| BoardError::NotFound(format!("List not found: {}", list_id)))?;

    if !owner.is_owned_by(user_id) {
        tracing::warn!(
            list_id,
            board_id = owner.board_id.as_str(),
            "Rejected access to a list on another user's board"
        );
        return Err(BoardError::Forbidden(format!(
            "List {} does not belong to a board you own",
            list_id
        )));
    }

    Ok(owner)
}

/// Resolves card → list → board → owner. Never trusts a caller-supplied board id.
pub async fn require_card_owner(
    conn: &mut SqliteConnection,
    user_id: &str,
    card_id: &str,
) -> Result<(Card, ListOwner), BoardError> {
    let card = CardStore::fetch_card(&mut *conn, card_id)
        .await?
        .ok_or_else(|| BoardError::NotFound(format!("Card not found: {}", card_id)))?;

    let owner = require_list_owner(conn, user_id, &card.list_id).await?;
    Ok((card, owner))
}

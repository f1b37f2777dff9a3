//! Position assignment for cards within a list.
//!
//! Positions are always derived from the persisted cards of the affected list,
//! never from a process-wide counter, so several service instances can share
//! one database.

use std::collections::{HashMap, HashSet};

use crate::domain::{BoardError, Card};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionUpdate {
    pub card_id: String,
    pub position: i64,
}

impl PositionUpdate {
    pub fn new(card_id: impl Into<String>, position: i64) -> Self {
        Self {
            card_id: card_id.into(),
            position,
        }
    }
}

/// Position for a card appended to a list whose highest position is `max_position`.
pub fn append_position(max_position: Option<i64>) -> i64 {
    max_position.map_or(0, |max| max + 1)
}

/// Maps an authoritative ordering onto positions `0..n-1`.
pub fn sequence_positions(ordered_card_ids: &[String]) -> Result<Vec<PositionUpdate>, BoardError> {
    let mut seen = HashSet::with_capacity(ordered_card_ids.len());
    for id in ordered_card_ids {
        if !seen.insert(id.as_str()) {
            return Err(BoardError::InvalidArgument(format!(
                "Duplicate card id in ordering: {}",
                id
            )));
        }
    }

    Ok(ordered_card_ids
        .iter()
        .enumerate()
        .map(|(index, id)| PositionUpdate::new(id.clone(), index as i64))
        .collect())
}

/// Where a moved card lands and the renumbered positions of its new neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub position: i64,
    pub others: Vec<PositionUpdate>,
}

/// Places `card_id` among the `existing` cards of a list and renumbers the whole
/// list densely.
///
/// `existing` must already be sorted by position. Any entry for `card_id` is
/// ignored so a card moved within its own list is not counted twice. A missing
/// or out-of-range `target_index` appends.
pub fn place_and_renumber(
    existing: &[Card],
    card_id: &str,
    target_index: Option<usize>,
) -> Placement {
    let neighbours: Vec<&str> = existing
        .iter()
        .map(|card| card.id.as_str())
        .filter(|id| *id != card_id)
        .collect();

    let slot = target_index.map_or(neighbours.len(), |index| index.min(neighbours.len()));

    let others = neighbours
        .into_iter()
        .enumerate()
        .map(|(index, id)| {
            let position = if index < slot { index } else { index + 1 };
            PositionUpdate::new(id, position as i64)
        })
        .collect();

    Placement {
        position: slot as i64,
        others,
    }
}

/// Drops updates that would rewrite a card with the position it already has.
pub fn without_unchanged(current: &[Card], updates: Vec<PositionUpdate>) -> Vec<PositionUpdate> {
    let stored: HashMap<&str, i64> = current
        .iter()
        .map(|card| (card.id.as_str(), card.position))
        .collect();

    updates
        .into_iter()
        .filter(|update| stored.get(update.card_id.as_str()) != Some(&update.position))
        .collect()
}

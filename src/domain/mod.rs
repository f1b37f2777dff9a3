pub mod board;
pub mod error;
pub mod position;

pub use board::{Board, Card, ListOwner, TaskList};
pub use error::BoardError;
pub use position::{Placement, PositionUpdate};

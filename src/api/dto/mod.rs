pub mod boards;
pub mod cards;

pub use boards::{
    CreateBoardRequest, CreateListRequest, ListWithCards, UpdateBoardRequest, UpdateListRequest,
};
pub use cards::{CreateCardRequest, MoveCardRequest, ReorderCardsRequest, UpdateCardRequest};

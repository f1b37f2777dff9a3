pub mod access;
pub mod board_service;
pub mod card_service;
pub mod ordering_service;

pub use board_service::BoardService;
pub use card_service::CardService;
pub use ordering_service::OrderingService;

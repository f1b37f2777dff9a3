pub mod card_store;
pub mod db;

pub use card_store::CardStore;

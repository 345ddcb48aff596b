//! Reference data and persistence stores

pub mod crsp;
pub mod history;

pub use crsp::CrspStore;
pub use history::HistoryStore;

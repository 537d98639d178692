//! Dataset loading and the in-memory destination store

pub mod loader;
pub mod record;
pub mod store;

pub use loader::DatasetError;
pub use record::{format_destinations, DestinationRecord, DestinationView};
pub use store::DestinationStore;

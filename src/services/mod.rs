//! External collaborators module
//!
//! Storage, document location and the persistence built on top of them.

pub mod history;
pub mod location;
pub mod session_manager;
pub mod store;

// Re-export main types
pub use history::HistoryLog;
pub use location::{LocationState, MemoryLocation, UrlLocation, CONFIG_PARAM};
pub use session_manager::SessionManager;
pub use store::{FileStore, KeyValueStore, MemoryStore};

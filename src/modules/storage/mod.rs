pub mod store;

// Re-export the main types
pub use store::{ChatStore, DuplicatePolicy, StoreError, User};

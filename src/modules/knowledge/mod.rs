pub mod loader;

// Re-export the main types
pub use loader::{KnowledgeBase, KnowledgeError};

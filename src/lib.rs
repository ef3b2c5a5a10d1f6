// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{
    auth,
    chat,
    knowledge,
    storage,
    utils,
};

// Re-export commonly used types
pub use modules::chat::session::ChatSession;
pub use modules::knowledge::loader::KnowledgeBase;
pub use modules::storage::store::{ChatStore, DuplicatePolicy, StoreError, User};

// Constants
pub const BOT_NAME: &str = "Chatterbot";
pub const FALLBACK_RESPONSE: &str =
    "Sorry, I don't understand that yet. I will add it to my knowledge base as soon as I can.";
pub const DEFAULT_DATABASE_FILE: &str = "chatterbot.db";
pub const DEFAULT_KNOWLEDGE_FILE: &str = "bot.csv";

pub mod session;
pub mod user_interface;

// Re-export the main types
pub use session::{ChatSession, Exchange};
pub use user_interface::run_chat_session;

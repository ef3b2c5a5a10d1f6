pub mod password;
pub mod user_interface;

// Re-export the main types and functions
pub use password::{hash_password, verify_password};
pub use user_interface::{authenticate, main_auth_flow, AuthenticationResult};

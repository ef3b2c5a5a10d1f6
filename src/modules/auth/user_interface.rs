use std::error::Error;

use super::password::{hash_password, read_password, verify_password};
use crate::modules::storage::store::{ChatStore, StoreError, User};
use crate::modules::utils::io::{prompt, read_line};
use crate::modules::utils::logging::log_auth_event;

/// Main result type for one pass through the menu
#[derive(Debug)]
pub enum MainAuthResult {
    Success(String), // Successful login with the username
    Back,            // Show the menu again
    Exit,            // Leave the program
    Error(String),   // Error with message
}

/// Authentication result type for better flow control
///
/// An unknown username and a wrong password both collapse into
/// `InvalidCredentials`; the caller cannot tell them apart.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthenticationResult {
    Success(String), // Authenticated username
    InvalidCredentials,
}

/// Function to show initial options when starting the program
pub fn show_initial_options() {
    println!("\n=== Welcome to Chatterbot ===");
    println!("1. Login            (or type 'login')");
    println!("2. Signup           (or type 'signup')");
    println!("3. Exit             (or type 'exit')");
    println!("\nEnter your choice   (1-3 or command):");
}

/// Main menu loop: MainMenu -> LoginForm | SignupForm -> MainMenu
///
/// Returns the authenticated username on a successful login, or None when
/// the user chooses to exit.
pub fn main_auth_flow(store: &ChatStore) -> Option<String> {
    loop {
        show_initial_options();

        // Read user input with error handling
        let choice = match read_line() {
            Ok(input) => input.to_lowercase(),
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };

        // Handle the user's choice
        let result = match choice.as_str() {
            "1" | "login" => match handle_login(store) {
                Some(username) => MainAuthResult::Success(username),
                None => MainAuthResult::Back,
            },
            "2" | "signup" | "register" => match handle_signup(store) {
                Ok(_) => MainAuthResult::Back, // Return to main menu after signup
                Err(e) => MainAuthResult::Error(format!("Signup failed: {}", e)),
            },
            "3" | "exit" | "quit" => {
                println!("Goodbye!");
                MainAuthResult::Exit
            }
            _ => MainAuthResult::Error(
                "Invalid choice. Please enter a number (1-3) or command (login/signup/exit)."
                    .to_string(),
            ),
        };

        // Handle the result of the chosen action
        match result {
            MainAuthResult::Success(username) => return Some(username),
            MainAuthResult::Back => continue,
            MainAuthResult::Exit => return None,
            MainAuthResult::Error(msg) => {
                println!("\n{}", msg);
                continue;
            }
        }
    }
}

/// Function to check a username/password pair against the store
///
/// Both failure modes (no such user, wrong password) produce the same
/// result. Only a storage fault is reported separately.
pub fn authenticate(
    store: &ChatStore,
    username: &str,
    password: &str,
) -> Result<AuthenticationResult, StoreError> {
    match store.find_user(username)? {
        Some(user) if verify_password(password, &user.password_hash) => {
            Ok(AuthenticationResult::Success(user.username))
        }
        _ => Ok(AuthenticationResult::InvalidCredentials),
    }
}

/// Function to run the login form
///
/// Returns the authenticated username, or None when the user goes back to
/// the menu. Failed attempts may be retried indefinitely.
fn handle_login(store: &ChatStore) -> Option<String> {
    loop {
        println!("\n=== Login ===");
        println!("Enter your username (type 'back' to return to menu):");
        let username = match read_line() {
            Ok(input) => input,
            Err(e) => {
                println!("Error reading input: {}", e);
                continue;
            }
        };

        if username.to_lowercase() == "back" {
            return None;
        }

        println!("Enter your password:");
        let password = match read_password() {
            Ok(pwd) => pwd,
            Err(e) => {
                println!("Error reading password: {}", e);
                continue;
            }
        };

        match authenticate(store, &username, &password) {
            Ok(AuthenticationResult::Success(username)) => {
                log_auth_event("login", &username, true, None);
                println!("\nWelcome, {}!", username);
                return Some(username);
            }
            Ok(AuthenticationResult::InvalidCredentials) => {
                log_auth_event("login", &username, false, None);
                println!("Incorrect username or password!");
            }
            Err(e) => {
                log_auth_event("login", &username, false, Some(&e.to_string()));
                println!("Login failed: {}", e);
                return None;
            }
        }
    }
}

/// Function to run the signup form
///
/// Collects the profile fields and password, hashes the password, and
/// persists the new user. No field validation: empty usernames, malformed
/// emails and weak passwords are all accepted as entered.
fn handle_signup(store: &ChatStore) -> Result<(), Box<dyn Error>> {
    println!("\n=== Signup ===");
    println!("(type 'back' as username to return to menu)");

    let username = prompt("Username:")?;
    if username.to_lowercase() == "back" {
        return Ok(());
    }

    let first_name = prompt("First name:")?;
    let last_name = prompt("Last name:")?;
    let email = prompt("Email:")?;

    println!("Password:");
    let password = read_password()?;

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            println!("Signup failed: {}", e);
            return Ok(());
        }
    };

    let user = User {
        username: username.clone(),
        first_name,
        last_name,
        email,
        password_hash,
    };

    match store.create_user(&user) {
        Ok(()) => {
            log_auth_event("signup", &username, true, None);
            println!("\nAccount created. You can now log in.");
            Ok(())
        }
        Err(StoreError::UsernameTaken(name)) => {
            log_auth_event("signup", &username, false, Some("username taken"));
            println!("\nThe username '{}' is already taken.", name);
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::store::DuplicatePolicy;
    use tempfile::TempDir;

    fn setup_test_store() -> (ChatStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ChatStore::new(temp_dir.path().join("chat.db"), DuplicatePolicy::Reject);
        store.initialize().unwrap();
        (store, temp_dir)
    }

    fn create_test_user(store: &ChatStore, username: &str, password: &str) {
        store
            .create_user(&User {
                username: username.to_string(),
                first_name: "Test".to_string(),
                last_name: "User".to_string(),
                email: "test@example.com".to_string(),
                password_hash: hash_password(password).unwrap(),
            })
            .unwrap();
    }

    #[test]
    fn test_successful_authentication() {
        let (store, _temp_dir) = setup_test_store();
        create_test_user(&store, "alice", "Password123!");

        assert_eq!(
            authenticate(&store, "alice", "Password123!").unwrap(),
            AuthenticationResult::Success("alice".to_string())
        );
    }

    #[test]
    fn test_failure_modes_are_indistinguishable() {
        let (store, _temp_dir) = setup_test_store();
        create_test_user(&store, "alice", "Password123!");

        // No such user and wrong password yield the identical result
        let unknown_user = authenticate(&store, "ghost", "Password123!").unwrap();
        let wrong_password = authenticate(&store, "alice", "NotThePassword!").unwrap();

        assert_eq!(unknown_user, AuthenticationResult::InvalidCredentials);
        assert_eq!(unknown_user, wrong_password);
    }
}

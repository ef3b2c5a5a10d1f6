use chrono::Utc;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors surfaced by the credential store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),
}

/// Policy for a signup that reuses an existing username
///
/// The store keeps exactly one row per username either way; the policy only
/// decides whether the second signup is refused or replaces the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    Overwrite,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            other => Err(format!(
                "unknown duplicate policy '{}' (expected 'reject' or 'overwrite')",
                other
            )),
        }
    }
}

/// Represents a single user account as stored in the users table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String, // PHC string, stored as text
}

/// SQLite-backed store for user accounts and the chat history log
///
/// Holds a database path rather than a live connection: every operation
/// opens a connection, runs one statement, and drops it. Passing the store
/// around explicitly lets tests run against their own temp-file databases.
pub struct ChatStore {
    db_path: PathBuf,
    duplicate_policy: DuplicatePolicy,
}

impl ChatStore {
    /// Create a store handle for the given database file
    pub fn new<P: AsRef<Path>>(db_path: P, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            duplicate_policy,
        }
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Create the users and chat_history tables if they don't exist yet
    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                username   TEXT NOT NULL UNIQUE,
                first_name TEXT NOT NULL,
                last_name  TEXT NOT NULL,
                email      TEXT NOT NULL,
                password   TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS chat_history (
                username   TEXT NOT NULL,
                sender     TEXT NOT NULL,
                message    TEXT NOT NULL,
                created_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Function to look up a single user by username
    pub fn find_user(&self, username: &str) -> Result<Option<User>, StoreError> {
        let conn = self.connect()?;
        let user = conn
            .query_row(
                "SELECT username, first_name, last_name, email, password
                 FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(User {
                        username: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        email: row.get(3)?,
                        password_hash: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Function to persist a new user row
    ///
    /// Under `DuplicatePolicy::Reject` a second signup with the same username
    /// fails with `StoreError::UsernameTaken`; under `Overwrite` it replaces
    /// the earlier row.
    pub fn create_user(&self, user: &User) -> Result<(), StoreError> {
        let conn = self.connect()?;
        let sql = match self.duplicate_policy {
            DuplicatePolicy::Reject => {
                "INSERT INTO users (username, first_name, last_name, email, password)
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            }
            DuplicatePolicy::Overwrite => {
                "INSERT OR REPLACE INTO users (username, first_name, last_name, email, password)
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            }
        };

        let result = conn.execute(
            sql,
            params![
                user.username,
                user.first_name,
                user.last_name,
                user.email,
                user.password_hash
            ],
        );

        match result {
            Ok(_) => Ok(()),
            // Map the UNIQUE violation to a named error the UI can message on
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::UsernameTaken(user.username.clone()))
            }
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    /// Function to append one message to the chat history log
    ///
    /// The log is append-only and never read back by the running session;
    /// the timestamp is filled in here.
    pub fn append_message(
        &self,
        username: &str,
        sender: &str,
        message: &str,
    ) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO chat_history (username, sender, message, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![username, sender, message, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

use crate::modules::knowledge::loader::KnowledgeBase;
use crate::modules::storage::store::ChatStore;
use crate::modules::utils::logging::log_data_operation;
use crate::{BOT_NAME, FALLBACK_RESPONSE};

/// Both sides of a single chat turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub user_text: String,
    pub response: String,
}

/// An authenticated chat session: one username, one loaded knowledge table
///
/// The knowledge table is loaded fresh at login and never changes for the
/// session's lifetime. There is no other session state; each `send` call is
/// independent.
pub struct ChatSession {
    username: String,
    knowledge: KnowledgeBase,
}

impl ChatSession {
    pub fn new(username: impl Into<String>, knowledge: KnowledgeBase) -> Self {
        Self {
            username: username.into(),
            knowledge,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Function to handle one user turn
    ///
    /// Trims the input; empty input is a no-op with no log entries. Otherwise
    /// both the user's message and the bot's answer (or the fixed fallback)
    /// are appended to the chat history. Append failures are logged but not
    /// surfaced; the exchange still happens on screen.
    pub fn send(&self, store: &ChatStore, user_text: &str) -> Option<Exchange> {
        let text = user_text.trim();
        if text.is_empty() {
            return None;
        }

        if let Err(e) = store.append_message(&self.username, &self.username, text) {
            log_data_operation(
                "append_message",
                &self.username,
                "chat_history",
                false,
                Some(&e.to_string()),
            );
        }

        let response = self
            .knowledge
            .lookup(text)
            .unwrap_or(FALLBACK_RESPONSE)
            .to_string();

        if let Err(e) = store.append_message(&self.username, BOT_NAME, &response) {
            log_data_operation(
                "append_message",
                &self.username,
                "chat_history",
                false,
                Some(&e.to_string()),
            );
        }

        Some(Exchange {
            user_text: text.to_string(),
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::store::DuplicatePolicy;
    use rusqlite::Connection;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn setup_test_session() -> (ChatStore, ChatSession, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ChatStore::new(temp_dir.path().join("chat.db"), DuplicatePolicy::Reject);
        store.initialize().unwrap();

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"question,answer\nWhat is X?,Y\nhow are you,fine thanks\n")
            .unwrap();
        file.flush().unwrap();
        let knowledge = KnowledgeBase::load(file.path()).unwrap();

        let session = ChatSession::new("alice", knowledge);
        (store, session, temp_dir)
    }

    fn history_count(temp_dir: &TempDir) -> i64 {
        let conn = Connection::open(temp_dir.path().join("chat.db")).unwrap();
        conn.query_row("SELECT COUNT(*) FROM chat_history", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_empty_input_is_a_noop() {
        let (store, session, temp_dir) = setup_test_session();

        assert!(session.send(&store, "").is_none());
        assert!(session.send(&store, "   ").is_none());
        assert_eq!(history_count(&temp_dir), 0);
    }

    #[test]
    fn test_known_question_gets_mapped_answer() {
        let (store, session, temp_dir) = setup_test_session();

        let exchange = session.send(&store, "What is X?").unwrap();
        assert_eq!(exchange.user_text, "What is X?");
        assert_eq!(exchange.response, "Y");

        // One row per side of the exchange
        assert_eq!(history_count(&temp_dir), 2);

        let conn = Connection::open(temp_dir.path().join("chat.db")).unwrap();
        let senders: Vec<String> = conn
            .prepare("SELECT sender FROM chat_history ORDER BY rowid")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(senders, vec!["alice".to_string(), BOT_NAME.to_string()]);
    }

    #[test]
    fn test_lookup_trims_and_ignores_case() {
        let (store, session, _temp_dir) = setup_test_session();

        let exchange = session.send(&store, "  HOW ARE YOU  ").unwrap();
        assert_eq!(exchange.user_text, "HOW ARE YOU");
        assert_eq!(exchange.response, "fine thanks");
    }

    #[test]
    fn test_unknown_question_gets_fallback() {
        let (store, session, temp_dir) = setup_test_session();

        let exchange = session.send(&store, "unknown query").unwrap();
        assert_eq!(exchange.response, FALLBACK_RESPONSE);
        assert_eq!(history_count(&temp_dir), 2);
    }
}

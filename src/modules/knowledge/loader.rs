use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Errors surfaced while loading the knowledge file
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to open knowledge file '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed knowledge file: {0}")]
    Parse(#[from] csv::Error),
}

/// One data row of the knowledge file: question, answer
///
/// Tuple struct so the columns are matched by position, the way the file is
/// written, rather than by header names.
#[derive(Debug, Deserialize)]
struct KnowledgeRow(String, String);

/// The loaded question -> answer mapping driving auto-responses
///
/// Loaded once per chat session and immutable afterwards. Questions are
/// keyed lowercase so lookups are case-insensitive.
#[derive(Debug, Default, Clone)]
pub struct KnowledgeBase {
    entries: HashMap<String, String>,
}

impl KnowledgeBase {
    /// Load question/answer pairs from a two-column CSV file
    ///
    /// The first row is a header and is ignored. Rows with an empty question
    /// cell are skipped; a later duplicate question overwrites an earlier
    /// one. A row with more or fewer than two columns fails the whole load.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| KnowledgeError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
        let mut entries = HashMap::new();

        for row in reader.deserialize::<KnowledgeRow>() {
            let KnowledgeRow(question, answer) = row?;
            if question.is_empty() {
                continue;
            }
            // Last write wins on duplicate questions
            entries.insert(question.to_lowercase(), answer);
        }

        Ok(Self { entries })
    }

    /// Case-insensitive exact-match lookup
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.entries.get(&text.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

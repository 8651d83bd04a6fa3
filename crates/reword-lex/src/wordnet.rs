//! WordnetFile: lexical source backed by a pre-parsed JSON database.
//!
//! The JSON file is produced by `reword-wn-build` from a WordNet LMF XML
//! dump. Format: `WordnetDb` serialized as JSON. Loading is the one-time
//! startup bootstrap; the loaded source is never mutated afterwards.

use std::path::Path;

use reword_core::Pos;

use crate::source::{db_synsets, LexicalSource, Synset, WordnetDb};

pub struct WordnetFile {
    db: WordnetDb,
}

impl WordnetFile {
    /// Load from a pre-processed JSON database file.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let db: WordnetDb = serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Self { db })
    }

    /// Create an empty source (useful for testing).
    pub fn empty() -> Self {
        Self {
            db: WordnetDb::default(),
        }
    }

    pub fn from_db(db: WordnetDb) -> Self {
        Self { db }
    }
}

impl LexicalSource for WordnetFile {
    fn synsets(&self, word: &str, pos: Option<Pos>) -> Vec<Synset> {
        db_synsets(&self.db, word, pos)
    }

    fn synset(&self, id: &str) -> Option<Synset> {
        self.db.synsets.get(id).cloned()
    }

    fn name(&self) -> &str {
        "WordnetFile"
    }

    fn len(&self) -> usize {
        self.db.synsets.len()
    }
}

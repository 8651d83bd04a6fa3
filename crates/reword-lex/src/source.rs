//! Pluggable lexical source trait.
//!
//! Any synonym-relation backend implements `LexicalSource`.
//! Current implementations: WordnetFile, MemorySource.
//! Future: remote thesaurus APIs, domain glossaries, etc.

use std::collections::HashMap;

use reword_core::Pos;
use serde::{Deserialize, Serialize};

/// One sense group: a distinct meaning bundling its synonymous lemma forms
/// and hierarchical relations. Lemmas use underscores for multi-word phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synset {
    /// Stable identifier, unique within a database.
    pub id: String,
    /// Database category: "n", "v", "a" (or "s" for satellites), "r".
    pub pos: String,
    /// Lemma forms, ordered by primacy.
    pub lemmas: Vec<String>,
    /// Ids of more general sense groups.
    #[serde(default)]
    pub hypernyms: Vec<String>,
    /// Ids of more specific sense groups.
    #[serde(default)]
    pub hyponyms: Vec<String>,
    /// Antonym lemma forms.
    #[serde(default)]
    pub antonyms: Vec<String>,
    /// Example sentences.
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Synset {
    /// Whether this sense group belongs to the given coarse POS bucket.
    pub fn matches_pos(&self, pos: Pos) -> bool {
        match self.pos.chars().next() {
            // Satellite adjectives count as adjectives.
            Some('s') => pos == Pos::Adjective,
            Some(c) => c == pos.letter(),
            None => false,
        }
    }
}

/// On-disk database shape: all sense groups by id, plus a lemma index
/// mapping each lowercase lemma to its sense-group ids in sense order.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct WordnetDb {
    pub synsets: HashMap<String, Synset>,
    pub index: HashMap<String, Vec<String>>,
}

/// Pluggable lexical backend trait.
///
/// Implementations are read-only after construction and must be safe for
/// concurrent reads. The trait is object-safe and uses `&self` (sync).
pub trait LexicalSource {
    /// Sense groups for a word, in relevance order. `pos` restricts the
    /// category; `None` means no restriction.
    fn synsets(&self, word: &str, pos: Option<Pos>) -> Vec<Synset>;

    /// Resolve a sense group by id (for hypernym/hyponym chasing).
    fn synset(&self, id: &str) -> Option<Synset>;

    /// Human-readable name of this backend (for logging/reports).
    fn name(&self) -> &str;

    /// Total number of sense groups (0 if unknown).
    fn len(&self) -> usize;

    /// Whether the source is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared lookup logic over a `WordnetDb`.
pub(crate) fn db_synsets(db: &WordnetDb, word: &str, pos: Option<Pos>) -> Vec<Synset> {
    let key = word.to_lowercase();
    let Some(ids) = db.index.get(&key) else {
        return Vec::new();
    };
    ids.iter()
        .filter_map(|id| db.synsets.get(id))
        .filter(|s| pos.map_or(true, |p| s.matches_pos(p)))
        .cloned()
        .collect()
}

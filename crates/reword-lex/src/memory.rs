//! MemorySource: in-memory lexical source built entry by entry.
//!
//! Primarily a test backend; also handy for small hand-curated glossaries.

use reword_core::Pos;

use crate::source::{db_synsets, LexicalSource, Synset, WordnetDb};

#[derive(Default)]
pub struct MemorySource {
    db: WordnetDb,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sense group. Lemmas are indexed in insertion order, so the
    /// first `add_synset` call for a lemma is its most relevant sense.
    pub fn add_synset(&mut self, id: &str, pos: &str, lemmas: &[&str]) {
        let synset = Synset {
            id: id.to_string(),
            pos: pos.to_string(),
            lemmas: lemmas.iter().map(|l| l.to_string()).collect(),
            hypernyms: Vec::new(),
            hyponyms: Vec::new(),
            antonyms: Vec::new(),
            examples: Vec::new(),
        };
        for lemma in lemmas {
            self.db
                .index
                .entry(lemma.to_lowercase())
                .or_default()
                .push(id.to_string());
        }
        self.db.synsets.insert(id.to_string(), synset);
    }

    /// Record `hypernym_id` as a hypernym of `id` (and the inverse hyponym).
    pub fn add_hypernym(&mut self, id: &str, hypernym_id: &str) {
        if let Some(s) = self.db.synsets.get_mut(id) {
            s.hypernyms.push(hypernym_id.to_string());
        }
        if let Some(s) = self.db.synsets.get_mut(hypernym_id) {
            s.hyponyms.push(id.to_string());
        }
    }

    pub fn add_antonym(&mut self, id: &str, lemma: &str) {
        if let Some(s) = self.db.synsets.get_mut(id) {
            s.antonyms.push(lemma.to_string());
        }
    }

    pub fn add_example(&mut self, id: &str, sentence: &str) {
        if let Some(s) = self.db.synsets.get_mut(id) {
            s.examples.push(sentence.to_string());
        }
    }
}

impl LexicalSource for MemorySource {
    fn synsets(&self, word: &str, pos: Option<Pos>) -> Vec<Synset> {
        db_synsets(&self.db, word, pos)
    }

    fn synset(&self, id: &str) -> Option<Synset> {
        self.db.synsets.get(id).cloned()
    }

    fn name(&self) -> &str {
        "MemorySource"
    }

    fn len(&self) -> usize {
        self.db.synsets.len()
    }
}

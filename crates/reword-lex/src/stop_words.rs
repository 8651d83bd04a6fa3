//! Function words never considered for synonym substitution.
//!
//! Hardcoded rather than derived: the set gates eligibility before any
//! lexical lookup happens.

use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // articles & conjunctions
        "the", "a", "an", "and", "or", "but",
        // prepositions
        "in", "on", "at", "to", "for", "of", "with", "by",
        // be-verbs
        "is", "are", "was", "were", "be", "been",
        // auxiliaries
        "have", "has", "had", "do", "does", "did",
        // modals
        "will", "would", "could", "should",
        // demonstratives & pronouns
        "this", "that", "these", "those", "it", "its", "he", "she", "they",
    ]
    .into_iter()
    .collect()
});

/// Case-insensitive stop-word membership.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().as_str())
}

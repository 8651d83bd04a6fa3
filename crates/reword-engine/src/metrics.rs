//! Divergence metrics between an original token sequence and a candidate.
//!
//! Pure functions over lowercased alphanumeric word lists. Change rates are
//! what the aggressive-mode acceptance gates read.

use std::collections::HashSet;

/// Lowercased fully-alphanumeric words, in order. Punctuation tokens and
/// anything carrying punctuation are dropped.
pub fn alnum_words<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !t.is_empty() && t.chars().all(|c| c.is_alphanumeric()))
        .map(|t| t.to_lowercase())
        .collect()
}

/// Same extraction for a rendered sentence (whitespace-split).
pub fn alnum_words_of_text(text: &str) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    alnum_words(&tokens)
}

pub fn word_set(words: &[String]) -> HashSet<&str> {
    words.iter().map(|w| w.as_str()).collect()
}

fn ngram_set(words: &[String], n: usize) -> HashSet<&[String]> {
    if words.len() < n {
        return HashSet::new();
    }
    words.windows(n).collect()
}

/// Word, bigram, and trigram change rates plus their weighted blend.
#[derive(Debug, Clone, Copy)]
pub struct Divergence {
    pub word: f64,
    pub bigram: f64,
    pub trigram: f64,
    pub combined: f64,
}

/// Change rate = 1 − |intersection| / |original set|. When the original has
/// no n-grams of a given size, that rate falls back to the word rate. An
/// empty original yields all-zero rates.
pub fn divergence(original_words: &[String], candidate_words: &[String]) -> Divergence {
    let original_set = word_set(original_words);
    if original_set.is_empty() {
        return Divergence {
            word: 0.0,
            bigram: 0.0,
            trigram: 0.0,
            combined: 0.0,
        };
    }
    let candidate_set = word_set(candidate_words);
    let overlap = original_set.intersection(&candidate_set).count();
    let word = 1.0 - overlap as f64 / original_set.len() as f64;

    let ngram_rate = |n: usize| -> f64 {
        let original = ngram_set(original_words, n);
        if original.is_empty() {
            return word;
        }
        let candidate = ngram_set(candidate_words, n);
        let shared = original.intersection(&candidate).count();
        1.0 - shared as f64 / original.len() as f64
    };
    let bigram = ngram_rate(2);
    let trigram = ngram_rate(3);

    Divergence {
        word,
        bigram,
        trigram,
        combined: 0.4 * word + 0.3 * bigram + 0.3 * trigram,
    }
}

/// Bigram overlap ratio (not change rate); None when the original has no
/// bigrams.
pub fn bigram_overlap(original_words: &[String], candidate_words: &[String]) -> Option<f64> {
    let original = ngram_set(original_words, 2);
    if original.is_empty() {
        return None;
    }
    let candidate = ngram_set(candidate_words, 2);
    let shared = original.intersection(&candidate).count();
    Some(shared as f64 / original.len() as f64)
}

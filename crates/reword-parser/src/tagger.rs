//! Part-of-speech tagging behind a pluggable trait.
//!
//! `HeuristicTagger` is a closed-class lexicon plus suffix rules. It is not
//! a full statistical tagger; the paraphrase engine only reads the leading
//! letter of each tag (N/V/J/R), so coarse labels are enough. A real tagger
//! implements the same trait.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Labels one token sequence with a parallel sequence of Penn-style tags.
pub trait Tagger {
    fn tag(&self, tokens: &[String]) -> Vec<String>;
}

static CLOSED_CLASS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    for w in ["the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no"] {
        m.insert(w, "DT");
    }
    for w in ["i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them"] {
        m.insert(w, "PRP");
    }
    for w in ["my", "your", "his", "its", "our", "their"] {
        m.insert(w, "PRP$");
    }
    for w in [
        "in", "on", "at", "by", "with", "for", "to", "from", "of", "about", "under", "over",
        "into", "through", "between", "after", "before", "during", "against",
    ] {
        m.insert(w, "IN");
    }
    for w in ["and", "or", "but", "nor", "so", "yet"] {
        m.insert(w, "CC");
    }
    for w in ["will", "would", "can", "could", "shall", "should", "may", "might", "must"] {
        m.insert(w, "MD");
    }
    for (w, t) in [
        ("is", "VBZ"),
        ("has", "VBZ"),
        ("does", "VBZ"),
        ("are", "VBP"),
        ("am", "VBP"),
        ("have", "VBP"),
        ("do", "VBP"),
        ("was", "VBD"),
        ("were", "VBD"),
        ("had", "VBD"),
        ("did", "VBD"),
        ("be", "VB"),
        ("been", "VBN"),
        ("being", "VBG"),
    ] {
        m.insert(w, t);
    }
    for w in [
        "not", "very", "quite", "rather", "extremely", "too", "also", "just", "never",
        "always", "often", "here", "there", "now", "then",
    ] {
        m.insert(w, "RB");
    }
    m
});

const ADJ_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ish", "less", "ic", "al",
];

#[derive(Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_one(&self, token: &str, sentence_initial: bool) -> String {
        let base = token.trim_end_matches('\'').trim_end_matches("'s");
        if base.is_empty() || !base.chars().any(|c| c.is_alphanumeric()) {
            // Penn convention: punctuation is its own tag.
            return token.to_string();
        }
        if base.chars().all(|c| c.is_ascii_digit()) {
            return "CD".to_string();
        }

        let lower = base.to_lowercase();
        if let Some(tag) = CLOSED_CLASS.get(lower.as_str()) {
            return tag.to_string();
        }

        // Capitalized mid-sentence reads as a proper noun.
        if !sentence_initial && base.chars().next().is_some_and(|c| c.is_uppercase()) {
            return "NNP".to_string();
        }

        if lower.len() > 3 {
            if lower.ends_with("ly") {
                return "RB".to_string();
            }
            if lower.ends_with("ing") {
                return "VBG".to_string();
            }
            if lower.ends_with("ed") {
                return "VBD".to_string();
            }
            if lower.ends_with("ize") || lower.ends_with("ise") || lower.ends_with("ify") {
                return "VB".to_string();
            }
            if ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
                return "JJ".to_string();
            }
            if lower.ends_with('s') && !lower.ends_with("ss") {
                return "NNS".to_string();
            }
        }

        "NN".to_string()
    }
}

impl Tagger for HeuristicTagger {
    fn tag(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, t)| self.tag_one(t, i == 0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    fn tag_sentence(text: &str) -> Vec<(String, String)> {
        let tokens = tokenize(text);
        let tags = HeuristicTagger::new().tag(&tokens);
        tokens.into_iter().zip(tags).collect()
    }

    #[test]
    fn tags_are_parallel_to_tokens() {
        let tokens = tokenize("The quick brown fox jumps.");
        let tags = HeuristicTagger::new().tag(&tokens);
        assert_eq!(tokens.len(), tags.len());
    }

    #[test]
    fn closed_class_words() {
        let tagged = tag_sentence("The cat is on the mat.");
        assert_eq!(tagged[0].1, "DT");
        assert_eq!(tagged[2].1, "VBZ");
        assert_eq!(tagged[3].1, "IN");
        assert_eq!(tagged[6].1, ".");
    }

    #[test]
    fn suffix_rules() {
        let tagged = tag_sentence("She quickly painted a beautiful picture");
        let tags: Vec<&str> = tagged.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(tags[1], "RB"); // quickly
        assert_eq!(tags[2], "VBD"); // painted
        assert_eq!(tags[4], "JJ"); // beautiful
        assert_eq!(tags[5], "NN"); // picture
    }

    #[test]
    fn proper_noun_mid_sentence() {
        let tagged = tag_sentence("ask Alice today");
        assert_eq!(tagged[1].1, "NNP");
    }

    #[test]
    fn sentence_initial_capital_is_not_proper() {
        let tagged = tag_sentence("Dogs bark");
        assert_eq!(tagged[0].1, "NNS");
    }

    #[test]
    fn numbers_and_possessives() {
        let tagged = tag_sentence("the dog's 3 bones");
        assert_eq!(tagged[1].1, "NN"); // dog's -> dog
        assert_eq!(tagged[2].1, "CD");
    }
}

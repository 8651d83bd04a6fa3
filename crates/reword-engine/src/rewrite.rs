//! Structural rewriting for aggressive mode.
//!
//! Token-level reordering plus an ordered, data-driven list of regex
//! pattern/template pairs. Only the first matching pattern is applied, once.
//! Every step is total: when nothing matches, the input passes through
//! unchanged.

use std::sync::LazyLock;

use regex::Regex;
use reword_core::{EngineParams, SimpleRng};

use crate::generate::normalize_spacing;

/// Ordered pattern/template pairs. Evaluated in sequence, first match wins.
/// New patterns slot into this table without touching the dispatch below.
static STRUCTURAL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // "the X is V-ed by Y" -> "Y V-ed X"
        (
            r"(?i)\b(?:the|a|an)?\s*(\w+)\s+(?:is|are|was|were)\s+(\w+ed)\s+by\s+(\w+)",
            "${3} ${2} ${1}",
        ),
        // "is V-ed by Y" -> "Y V-ed"
        (r"(?i)\b(?:is|are|was|were)\s+(\w+ed)\s+by\s+(\w+)", "${2} ${1}"),
        // "verb adverb-ly noun" -> "verb noun adverb-ly"
        (r"(?i)\b(\w+)\s+(\w+ly)\s+(\w+)", "${1} ${3} ${2}"),
        // "is adverb-ly done" -> "done adverb-ly"
        (r"(?i)\b(?:is|are|was|were)\s+(\w+ly)\s+(\w+)", "${2} ${1}"),
        // intensifier drop with swap: "very good idea" -> "idea good"
        (r"(?i)\b(?:very|quite|rather|extremely)\s+(\w+)\s+(\w+)", "${2} ${1}"),
        // "it/this/that is" -> "this demonstrates"
        (r"(?i)\b(?:it|this|that)\s+is\s+", "this demonstrates "),
    ]
    .into_iter()
    .map(|(pattern, template)| (Regex::new(pattern).expect("valid regex"), template))
    .collect()
});

static LEADING_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:the|a|an)\s+").expect("valid regex"));
static LEADING_PRONOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:this|that|it)\s+").expect("valid regex"));
static PREP_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\w+)\s+(\w+)\s+(in|on|at|by|with|for|to|from|of|about|under|over)\s+(\w+(?:\s+\w+){0,3})",
    )
    .expect("valid regex")
});

const ARTICLE_SWAPS: [&str; 3] = ["this", "such", "one"];
const TRANSITIONS: [&str; 5] = [
    "Furthermore,",
    "Additionally,",
    "Moreover,",
    "Notably,",
    "Specifically,",
];

/// Reorder tokens in place: swap the first two non-adjacent adjectives in
/// longer sentences, and move the first interior adverb to the end.
pub fn restructure_tokens(tokens: &[String], tags: &[String]) -> Vec<String> {
    if tokens.len() < 4 {
        return tokens.to_vec();
    }
    let mut new_tokens = tokens.to_vec();

    let positions = |prefix: &str| -> Vec<usize> {
        tags.iter()
            .enumerate()
            .take(tokens.len())
            .filter(|(_, tag)| tag.to_uppercase().starts_with(prefix))
            .map(|(i, _)| i)
            .collect()
    };
    let adjectives = positions("JJ");
    let nouns = positions("NN");
    let adverbs = positions("RB");

    if adjectives.len() >= 2 && tokens.len() > 5 {
        let (first, second) = (adjectives[0], adjectives[1]);
        if second.abs_diff(first) > 1 {
            new_tokens.swap(first, second);
        }
    }

    if !adverbs.is_empty() && !nouns.is_empty() && new_tokens.len() > 3 {
        let adv_idx = adverbs[0];
        if adv_idx > 0 && adv_idx < new_tokens.len() - 1 {
            let adverb = new_tokens.remove(adv_idx);
            new_tokens.push(adverb);
        }
    }

    new_tokens
}

/// Apply the first matching structural pattern, once.
pub fn apply_structural_patterns(text: &str) -> String {
    for (pattern, template) in STRUCTURAL_PATTERNS.iter() {
        if pattern.is_match(text) {
            return pattern.replace(text, *template).into_owned();
        }
    }
    text.to_string()
}

fn replace_leading_article(text: &str, rng: &mut SimpleRng) -> String {
    if LEADING_ARTICLE.is_match(text) {
        let swap = ARTICLE_SWAPS[rng.next_below(ARTICLE_SWAPS.len())];
        return LEADING_ARTICLE
            .replace(text, format!("{} ", swap))
            .into_owned();
    }
    text.to_string()
}

fn replace_leading_pronoun(text: &str) -> String {
    if LEADING_PRONOUN.is_match(text) {
        return LEADING_PRONOUN
            .replace(text, "the aforementioned ")
            .into_owned();
    }
    text.to_string()
}

/// Prepend a transition word (probabilistically) to longer sentences that
/// do not already start with one, lowercasing the displaced first letter.
fn maybe_prepend_transition(text: &str, params: &EngineParams, rng: &mut SimpleRng) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= 6 {
        return text.to_string();
    }
    if let Some(first) = words.first() {
        if TRANSITIONS.contains(first) {
            return text.to_string();
        }
    }
    if !rng.chance(params.transition_chance) {
        return text.to_string();
    }
    let starter = TRANSITIONS[rng.next_below(TRANSITIONS.len())];
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!(
            "{} {}{}",
            starter,
            first.to_lowercase(),
            chars.as_str()
        ),
        None => text.to_string(),
    }
}

/// "verb noun prep phrase" -> "verb prep phrase noun", first match only.
fn reorder_prepositional_phrase(text: &str) -> String {
    if PREP_PHRASE.is_match(text) {
        return PREP_PHRASE
            .replace(text, "${1} ${3} ${4} ${2}")
            .into_owned();
    }
    text.to_string()
}

/// Full structural pass over a substituted token sequence. Best-effort:
/// every stage passes the text through when its pattern does not apply.
pub fn rewrite(
    tokens: &[String],
    tags: &[String],
    params: &EngineParams,
    rng: &mut SimpleRng,
) -> String {
    let reordered = restructure_tokens(tokens, tags);
    let mut text = reordered.join(" ");
    text = apply_structural_patterns(&text);
    text = replace_leading_article(&text, rng);
    text = replace_leading_pronoun(&text);
    text = maybe_prepend_transition(&text, params, rng);
    text = reorder_prepositional_phrase(&text);
    normalize_spacing(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn swaps_non_adjacent_adjectives() {
        let tokens = strings(&["the", "big", "dog", "chased", "a", "small", "cat"]);
        let tags = strings(&["DT", "JJ", "NN", "VBD", "DT", "JJ", "NN"]);
        let out = restructure_tokens(&tokens, &tags);
        assert_eq!(out, strings(&["the", "small", "dog", "chased", "a", "big", "cat"]));
    }

    #[test]
    fn moves_interior_adverb_to_end() {
        let tokens = strings(&["He", "quickly", "ran", "home"]);
        let tags = strings(&["PRP", "RB", "VBD", "NN"]);
        let out = restructure_tokens(&tokens, &tags);
        assert_eq!(out, strings(&["He", "ran", "home", "quickly"]));
    }

    #[test]
    fn short_sequences_pass_through() {
        let tokens = strings(&["Birds", "fly", "."]);
        let tags = strings(&["NNS", "VBP", "."]);
        assert_eq!(restructure_tokens(&tokens, &tags), tokens);
    }

    #[test]
    fn passive_flip_pattern() {
        let out = apply_structural_patterns("The report is completed by John");
        assert_eq!(out, "John completed report");
    }

    #[test]
    fn only_first_pattern_applies() {
        // Matches both the passive flip and the adverb pattern; only the
        // earlier entry fires.
        let out = apply_structural_patterns("The task was handled by staff swiftly today");
        assert!(out.starts_with("staff handled task"));
        assert!(out.contains("swiftly today"));
    }

    #[test]
    fn demonstrative_rewrite() {
        let out = apply_structural_patterns("it is notable");
        assert_eq!(out, "this demonstrates notable");
    }

    #[test]
    fn leading_article_swap_uses_fixed_choices() {
        let mut rng = SimpleRng::new(11);
        let out = replace_leading_article("The outcome matters", &mut rng);
        let first = out.split_whitespace().next().unwrap();
        assert!(ARTICLE_SWAPS.contains(&first));
        assert!(out.ends_with("outcome matters"));
    }

    #[test]
    fn leading_pronoun_swap() {
        assert_eq!(
            replace_leading_pronoun("That point stands"),
            "the aforementioned point stands"
        );
    }

    #[test]
    fn transition_prepend_lowercases_first_letter() {
        let params = EngineParams {
            transition_chance: 1.0,
            ..EngineParams::default()
        };
        let mut rng = SimpleRng::new(3);
        let text = "Results improved across every region this quarter";
        let out = maybe_prepend_transition(text, &params, &mut rng);
        let mut words = out.split_whitespace();
        assert!(TRANSITIONS.contains(&words.next().unwrap()));
        assert!(words.next().unwrap().starts_with('r'));
    }

    #[test]
    fn transition_skips_short_sentences() {
        let params = EngineParams {
            transition_chance: 1.0,
            ..EngineParams::default()
        };
        let mut rng = SimpleRng::new(3);
        assert_eq!(
            maybe_prepend_transition("Short sentence here", &params, &mut rng),
            "Short sentence here"
        );
    }

    #[test]
    fn prepositional_phrase_reorder() {
        let out = reorder_prepositional_phrase("placed book on the table");
        assert_eq!(out, "placed on the table book");
    }

    #[test]
    fn rewrite_never_panics_on_odd_input() {
        let params = EngineParams::default();
        let mut rng = SimpleRng::new(9);
        assert_eq!(rewrite(&[], &[], &params, &mut rng), "");
        let tokens = strings(&["!", "?", "!"]);
        let tags = strings(&["!", "?", "!"]);
        let out = rewrite(&tokens, &tags, &params, &mut rng);
        assert!(!out.contains("  "));
    }
}

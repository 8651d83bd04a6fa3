//! Candidate generation: bounded-retry randomized substitution.
//!
//! Each attempt is a pure function of the RNG and the immutable replacement
//! map; the orchestrator calls it up to a fixed budget. Aggressive mode
//! replaces most eligible words with their least-common candidates and is
//! gated by the divergence metrics.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use reword_core::{EngineParams, ReplaceableWord, SimpleRng, TaggedToken};

use crate::metrics;
use crate::rewrite;

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?;:])").expect("valid regex"));
static DOUBLED_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,!?;:])\s*([.,!?;:])").expect("valid regex"));
static MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Join-artifact cleanup: no space before closing punctuation, collapse
/// doubled punctuation and runs of whitespace.
pub fn normalize_spacing(text: &str) -> String {
    let text = SPACE_BEFORE_PUNCT.replace_all(text, "$1");
    let text = DOUBLED_PUNCT.replace_all(&text, "$1$2");
    MULTI_SPACE.replace_all(&text, " ").trim().to_string()
}

/// Carry the source token's leading capitalization onto a replacement.
pub fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = replacement.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    } else {
        replacement.to_string()
    }
}

/// Aggressive candidate choice: the least-common third of the list (or the
/// last entry when the list is short). Candidate lists are rank-ordered, so
/// the tail holds the rarest alternatives.
pub fn pick_aggressive<'a>(candidates: &'a [String], rng: &mut SimpleRng) -> &'a str {
    let n = candidates.len();
    if n > 3 {
        let start = (n - n / 3).max(n / 2);
        candidates[start + rng.next_below(n - start)].as_str()
    } else if n > 1 {
        candidates[n - 1].as_str()
    } else {
        candidates[0].as_str()
    }
}

fn substitute(
    tokens: &[String],
    chosen: &[&ReplaceableWord],
    replacements: &HashMap<String, Vec<String>>,
    aggressive: bool,
    rng: &mut SimpleRng,
) -> (Vec<String>, usize) {
    let mut new_tokens = tokens.to_vec();
    let mut made = 0;
    for rw in chosen {
        let Some(candidates) = replacements.get(&rw.word.to_lowercase()) else {
            continue;
        };
        if candidates.is_empty() {
            continue;
        }
        let replacement = if aggressive {
            pick_aggressive(candidates, rng)
        } else {
            candidates[rng.next_below(candidates.len())].as_str()
        };
        new_tokens[rw.index] = match_case(&rw.word, replacement);
        made += 1;
    }
    (new_tokens, made)
}

fn choose_subset<'a>(
    replaceable: &'a [ReplaceableWord],
    aggressive: bool,
    params: &EngineParams,
    rng: &mut SimpleRng,
) -> Vec<&'a ReplaceableWord> {
    let n = replaceable.len();
    let count = if aggressive {
        let fraction = rng.next_f64_in(params.aggressive_low, params.aggressive_high);
        ((n as f64 * fraction) as usize).max(1).min(n)
    } else {
        1 + rng.next_below(n)
    };
    rng.sample_indices(n, count)
        .into_iter()
        .map(|i| &replaceable[i])
        .collect()
}

/// One generation attempt. Returns the normalized candidate sentence, or
/// None when no substitution happened.
pub fn attempt(
    tokens: &[String],
    replaceable: &[ReplaceableWord],
    replacements: &HashMap<String, Vec<String>>,
    aggressive: bool,
    params: &EngineParams,
    rng: &mut SimpleRng,
) -> Option<String> {
    if replaceable.is_empty() {
        return None;
    }
    let chosen = choose_subset(replaceable, aggressive, params, rng);
    let (new_tokens, made) = substitute(tokens, &chosen, replacements, aggressive, rng);
    if made == 0 {
        return None;
    }
    Some(normalize_spacing(&new_tokens.join(" ")))
}

/// Aggressive loop gate: word-level change must reach the minimum and
/// bigram overlap must stay under the cap.
pub fn passes_aggressive_gate(
    original_words: &[String],
    candidate: &str,
    params: &EngineParams,
) -> bool {
    if original_words.is_empty() {
        return false;
    }
    let candidate_words = metrics::alnum_words_of_text(candidate);
    let d = metrics::divergence(original_words, &candidate_words);
    if d.word < params.min_word_change {
        return false;
    }
    match metrics::bigram_overlap(original_words, &candidate_words) {
        Some(overlap) => overlap <= params.max_bigram_overlap,
        None => true,
    }
}

/// The dedicated high-divergence candidate: maximum substitution with the
/// least-common synonyms, structural rewriting, then the strict divergence
/// gate (with the looser word-only fallback).
pub fn proof_candidate(
    original: &str,
    tokens: &[String],
    tagged: &[TaggedToken],
    replacements: &HashMap<String, Vec<String>>,
    replaceable: &[ReplaceableWord],
    params: &EngineParams,
    rng: &mut SimpleRng,
) -> Option<String> {
    if replaceable.is_empty() {
        return None;
    }

    let chosen = choose_subset(replaceable, true, params, rng);
    let (new_tokens, _) = substitute(tokens, &chosen, replacements, true, rng);

    let tags: Vec<String> = tagged.iter().map(|tt| tt.tag.clone()).collect();
    let text = rewrite::rewrite(&new_tokens, &tags, params, rng);
    if text.is_empty() {
        return None;
    }

    let original_words = metrics::alnum_words(tokens);
    if original_words.is_empty() {
        return None;
    }
    let candidate_words = metrics::alnum_words_of_text(&text);
    let d = metrics::divergence(&original_words, &candidate_words);
    let differs = !text.eq_ignore_ascii_case(original);

    if d.word >= params.proof_min_word_change
        && d.bigram >= params.proof_min_bigram_change
        && d.trigram >= params.proof_min_trigram_change
        && d.combined >= params.proof_min_combined_change
        && differs
    {
        return Some(text);
    }
    // Looser fallback: word-level change alone.
    if d.word >= params.proof_fallback_word_change && differs {
        return Some(text);
    }
    None
}

/// Last-resort variant: replace only the first eligible word with its
/// top-ranked candidate.
pub fn forced_fallback(
    original: &str,
    tokens: &[String],
    replacements: &HashMap<String, Vec<String>>,
    replaceable: &[ReplaceableWord],
) -> Option<String> {
    let rw = replaceable.first()?;
    let candidates = replacements.get(&rw.word.to_lowercase())?;
    let replacement = candidates.first()?;
    let mut new_tokens = tokens.to_vec();
    new_tokens[rw.index] = match_case(&rw.word, replacement);
    let text = normalize_spacing(&new_tokens.join(" "));
    if text.eq_ignore_ascii_case(original) {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn replaceable(entries: &[(usize, &str)]) -> Vec<ReplaceableWord> {
        entries
            .iter()
            .map(|(index, word)| ReplaceableWord {
                index: *index,
                word: word.to_string(),
                tag: "NN".to_string(),
            })
            .collect()
    }

    #[test]
    fn normalize_spacing_rules() {
        assert_eq!(normalize_spacing("the cat ."), "the cat.");
        assert_eq!(normalize_spacing("wait , .  what"), "wait,. what");
        assert_eq!(normalize_spacing("  a   b  "), "a b");
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(match_case("Cat", "feline"), "Feline");
        assert_eq!(match_case("cat", "feline"), "feline");
        assert_eq!(match_case("CAT", "feline"), "Feline");
    }

    #[test]
    fn aggressive_pick_prefers_list_tail() {
        let candidates = strings(&["a", "b", "c", "d", "e", "f"]);
        let mut rng = SimpleRng::new(5);
        // len 6: slice starts at max(6-2, 3) = 4
        for _ in 0..50 {
            let pick = pick_aggressive(&candidates, &mut rng);
            assert!(pick == "e" || pick == "f");
        }
    }

    #[test]
    fn aggressive_pick_short_lists() {
        let mut rng = SimpleRng::new(5);
        let two = strings(&["first", "last"]);
        assert_eq!(pick_aggressive(&two, &mut rng), "last");
        let one = strings(&["only"]);
        assert_eq!(pick_aggressive(&one, &mut rng), "only");
    }

    #[test]
    fn attempt_produces_a_changed_sentence() {
        let tokens = strings(&["The", "cat", "sat", "."]);
        let mut replacements = HashMap::new();
        replacements.insert("cat".to_string(), strings(&["felid", "mouser"]));
        let rws = replaceable(&[(1, "cat")]);
        let params = EngineParams::default();
        let mut rng = SimpleRng::new(42);

        let out = attempt(&tokens, &rws, &replacements, false, &params, &mut rng).unwrap();
        assert!(out == "The felid sat." || out == "The mouser sat.");
    }

    #[test]
    fn attempt_with_no_eligible_words_is_none() {
        let tokens = strings(&["Hi", "."]);
        let params = EngineParams::default();
        let mut rng = SimpleRng::new(1);
        assert!(attempt(&tokens, &[], &HashMap::new(), false, &params, &mut rng).is_none());
    }

    #[test]
    fn aggressive_gate_thresholds() {
        let original = strings(&["the", "cat", "sat", "on", "the", "mat"]);
        let params = EngineParams::default();
        // Identical: 0% change, fails.
        assert!(!passes_aggressive_gate(&original, "the cat sat on the mat", &params));
        // Fully different words.
        assert!(passes_aggressive_gate(
            &original,
            "some feline rested upon one rug",
            &params
        ));
    }

    #[test]
    fn forced_fallback_replaces_first_word() {
        let tokens = strings(&["The", "cat", "sat", "."]);
        let mut replacements = HashMap::new();
        replacements.insert("cat".to_string(), strings(&["felid", "mouser"]));
        let rws = replaceable(&[(1, "cat")]);
        let out = forced_fallback("The cat sat.", &tokens, &replacements, &rws).unwrap();
        assert_eq!(out, "The felid sat.");
    }

    #[test]
    fn forced_fallback_rejects_no_op() {
        let tokens = strings(&["The", "cat", "."]);
        let mut replacements = HashMap::new();
        replacements.insert("cat".to_string(), strings(&["cat"]));
        let rws = replaceable(&[(1, "cat")]);
        assert!(forced_fallback("The cat.", &tokens, &replacements, &rws).is_none());
    }
}

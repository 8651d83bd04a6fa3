//! Variation quality scoring.
//!
//! A composite of word overlap, verified-replacement ratio, synonym rank
//! quality, semantic preservation, and length similarity. All component
//! scores live in [0, 1]; the final score is clamped there too.

use std::collections::{HashMap, HashSet};

use reword_core::{VariantStats, WordChange};
use reword_lex::{is_stop_word, LexicalSource};

use crate::metrics::{alnum_words, word_set};

const WEIGHT_OVERLAP: f64 = 0.20;
const WEIGHT_REPLACEMENT: f64 = 0.25;
const WEIGHT_SYNONYM_QUALITY: f64 = 0.25;
const WEIGHT_SEMANTIC: f64 = 0.20;
const WEIGHT_LENGTH: f64 = 0.05;
const WEIGHT_WORD_COUNT: f64 = 0.05;

/// Optimal word-overlap band: outside it the score ramps down linearly.
const OVERLAP_LOW: f64 = 0.30;
const OVERLAP_HIGH: f64 = 0.85;
/// Optimal verified-replacement ratio band.
const REPLACEMENT_LOW: f64 = 0.20;
const REPLACEMENT_HIGH: f64 = 0.70;

fn band_score(value: f64, low: f64, high: f64) -> f64 {
    if value < low {
        value / low
    } else if value > high {
        1.0 - (value - high) / (1.0 - high)
    } else {
        1.0
    }
}

/// Position-aligned replacements whose target is a verified candidate for
/// the source word. Returns (from, to) pairs and the summed rank bonus.
fn verified_replacements(
    original_tokens: &[String],
    variation_tokens: &[String],
    replacements: &HashMap<String, Vec<String>>,
) -> (Vec<(String, String)>, f64) {
    let mut details = Vec::new();
    let mut rank_bonus = 0.0;

    for (idx, var_token) in variation_tokens.iter().enumerate() {
        let Some(orig_token) = original_tokens.get(idx) else {
            break;
        };
        if orig_token.eq_ignore_ascii_case(var_token)
            || !var_token.chars().all(|c| c.is_alphanumeric())
            || var_token.is_empty()
        {
            continue;
        }
        let orig_lower = orig_token.to_lowercase();
        let var_lower = var_token.to_lowercase();
        let Some(candidates) = replacements.get(&orig_lower) else {
            continue;
        };
        let Some(rank) = candidates
            .iter()
            .position(|c| c.eq_ignore_ascii_case(&var_lower))
        else {
            continue;
        };
        details.push((orig_lower, var_lower));
        // Earlier candidates are better synonyms.
        rank_bonus += match rank {
            0..=2 => 1.0,
            3..=4 => 0.8,
            _ => 0.6,
        };
    }

    (details, rank_bonus)
}

/// Fraction of verified replacements whose source and target share a sense
/// group (full credit) or a hypernym/hyponym neighborhood (half credit).
fn semantic_score(
    details: &[(String, String)],
    original_words: &HashSet<&str>,
    variation_words: &HashSet<&str>,
    source: &dyn LexicalSource,
) -> f64 {
    let has_content =
        |words: &HashSet<&str>| words.iter().any(|w| !is_stop_word(w));
    if !has_content(original_words) || !has_content(variation_words) {
        return 1.0;
    }

    let mut shared = 0.0;
    let mut checks = 0usize;

    for (orig_word, var_word) in details {
        let orig_synsets = source.synsets(orig_word, None);
        let var_synsets = source.synsets(var_word, None);
        if orig_synsets.is_empty() || var_synsets.is_empty() {
            continue;
        }
        checks += 1;

        let orig_ids: HashSet<&str> = orig_synsets.iter().map(|s| s.id.as_str()).collect();
        let var_ids: HashSet<&str> = var_synsets.iter().map(|s| s.id.as_str()).collect();
        if orig_ids.intersection(&var_ids).next().is_some() {
            shared += 1.0;
            continue;
        }

        let neighborhood = |synsets: &[reword_lex::Synset]| -> HashSet<String> {
            synsets
                .iter()
                .flat_map(|s| s.hypernyms.iter().chain(s.hyponyms.iter()))
                .cloned()
                .collect()
        };
        let orig_nb = neighborhood(&orig_synsets);
        let var_nb = neighborhood(&var_synsets);
        let touches = orig_nb.iter().any(|id| var_nb.contains(id))
            || orig_nb.iter().any(|id| var_ids.contains(id.as_str()))
            || var_nb.iter().any(|id| orig_ids.contains(id.as_str()));
        if touches {
            shared += 0.5;
        }
    }

    if checks > 0 {
        shared / checks as f64
    } else {
        1.0
    }
}

/// Composite quality score in [0, 1]. Exactly 0 for an empty or identical
/// candidate.
pub fn variation_score(
    original: &str,
    variation: &str,
    original_tokens: &[String],
    variation_tokens: &[String],
    replacements: &HashMap<String, Vec<String>>,
    source: &dyn LexicalSource,
) -> f64 {
    if variation.is_empty() || variation.eq_ignore_ascii_case(original) {
        return 0.0;
    }

    let original_words_vec = alnum_words(original_tokens);
    let variation_words_vec = alnum_words(variation_tokens);
    let original_words = word_set(&original_words_vec);
    let variation_words = word_set(&variation_words_vec);
    if original_words.is_empty() {
        return 0.0;
    }

    let overlap = original_words.intersection(&variation_words).count() as f64
        / original_words.len() as f64;
    let overlap_score = band_score(overlap, OVERLAP_LOW, OVERLAP_HIGH);

    let (details, rank_bonus) =
        verified_replacements(original_tokens, variation_tokens, replacements);
    let replacements_count = details.len();

    let replaceable_count = original_tokens
        .iter()
        .filter(|t| {
            t.chars().all(|c| c.is_alphanumeric())
                && !t.is_empty()
                && replacements.contains_key(&t.to_lowercase())
        })
        .count();
    let replacement_score = if replaceable_count > 0 {
        let ratio = replacements_count as f64 / replaceable_count as f64;
        band_score(ratio, REPLACEMENT_LOW, REPLACEMENT_HIGH)
    } else if replacements_count > 0 {
        1.0
    } else {
        0.0
    };

    let synonym_quality = if replacements_count > 0 {
        rank_bonus / replacements_count as f64
    } else {
        0.0
    };

    let semantic = semantic_score(&details, &original_words, &variation_words, source);

    let length_ratio = if original.is_empty() {
        1.0
    } else {
        variation.chars().count() as f64 / original.chars().count() as f64
    };
    let length_score = if (0.7..=1.3).contains(&length_ratio) {
        1.0
    } else {
        0.5
    };

    let count_diff = original_words.len().abs_diff(variation_words.len()) as f64;
    let word_count_score =
        (1.0 - count_diff / original_words.len().max(1) as f64 * 0.5).max(0.0);

    let mut score = overlap_score * WEIGHT_OVERLAP
        + replacement_score * WEIGHT_REPLACEMENT
        + synonym_quality * WEIGHT_SYNONYM_QUALITY
        + semantic * WEIGHT_SEMANTIC
        + length_score * WEIGHT_LENGTH
        + word_count_score * WEIGHT_WORD_COUNT;

    // A handful of verified replacements is the sweet spot; none at all
    // means the variation drifted without sanctioned substitutions.
    if (2..=5).contains(&replacements_count) {
        score *= 1.1;
    } else if replacements_count == 0 {
        score *= 0.3;
    }

    score.clamp(0.0, 1.0)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// Detailed statistics for a variation. The caller fills in `score`.
pub fn variation_stats(
    original: &str,
    variation: &str,
    original_tokens: &[String],
    variation_tokens: &[String],
) -> VariantStats {
    let original_words_vec = alnum_words(original_tokens);
    let variation_words_vec = alnum_words(variation_tokens);
    let original_words = word_set(&original_words_vec);
    let variation_words = word_set(&variation_words_vec);

    let overlap = original_words.intersection(&variation_words).count();
    let similarity = if original_words.is_empty() {
        0.0
    } else {
        overlap as f64 / original_words.len() as f64 * 100.0
    };

    let mut changes = 0;
    let mut changed_words = Vec::new();
    for idx in 0..original_tokens.len().min(variation_tokens.len()) {
        let orig = &original_tokens[idx];
        let var = &variation_tokens[idx];
        if !orig.eq_ignore_ascii_case(var)
            && orig.chars().all(|c| c.is_alphanumeric())
            && var.chars().all(|c| c.is_alphanumeric())
            && !orig.is_empty()
            && !var.is_empty()
        {
            changes += 1;
            changed_words.push(WordChange {
                from: orig.clone(),
                to: var.clone(),
            });
        }
    }

    let original_length = original.chars().count();
    let variation_length = variation.chars().count();
    let length_percent = if original_length > 0 {
        (variation_length as f64 - original_length as f64) / original_length as f64 * 100.0
    } else {
        0.0
    };

    VariantStats {
        similarity_percent: round1(similarity),
        word_changes: changes,
        changed_words,
        length_diff: variation_length as i64 - original_length as i64,
        length_percent: round1(length_percent),
        original_length,
        variation_length,
        score: 0.0,
    }
}

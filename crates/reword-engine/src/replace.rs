//! Replacement map construction: which words may be substituted, and with
//! what candidates.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use reword_core::{EngineParams, Pos, ReplaceableWord, Style, TaggedToken};
use reword_lex::{is_stop_word, LexicalSource};

static INFORMAL_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "guy", "kid", "cool", "awesome", "stuff", "thing", "get", "got", "gonna", "wanna",
        "yeah", "yep", "nah", "nope", "huge", "tiny", "big", "small",
    ]
    .into_iter()
    .collect()
});

static FORMAL_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "individual", "personnel", "utilize", "facilitate", "implement", "substantial",
        "considerable", "significant", "demonstrate", "exhibit",
    ]
    .into_iter()
    .collect()
});

/// Formality heuristic: fixed informal set scores 0.2, fixed formal set 0.9,
/// everything else 0.5 plus a length bonus capped at 1.0.
pub fn formality_score(synonym: &str) -> f64 {
    let lower = synonym.to_lowercase();
    if INFORMAL_WORDS.contains(lower.as_str()) {
        return 0.2;
    }
    if FORMAL_WORDS.contains(lower.as_str()) {
        return 0.9;
    }
    (0.5 + synonym.chars().count() as f64 / 20.0).min(1.0)
}

/// Reorder candidates in place for a non-balanced style.
pub fn order_by_style(candidates: &mut [String], style: Style) {
    match style {
        Style::Balanced => {}
        Style::Formal => {
            candidates.sort_by(|a, b| {
                formality_score(b)
                    .partial_cmp(&formality_score(a))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        Style::Casual => {
            candidates.sort_by(|a, b| {
                formality_score(a)
                    .partial_cmp(&formality_score(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        Style::Academic => {
            candidates.sort_by(|a, b| {
                let ka = (formality_score(a), a.chars().count());
                let kb = (formality_score(b), b.chars().count());
                kb.partial_cmp(&ka).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
        Style::Simple => {
            candidates.sort_by(|a, b| {
                let ka = (a.chars().count(), formality_score(a));
                let kb = (b.chars().count(), formality_score(b));
                ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }
}

/// Eligibility gate: alphanumeric after dropping possessive apostrophes,
/// length ≥ 3, not a stop word, and (when tagged) a content-word POS.
pub fn should_replace(word: &str, tag: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let stripped: String = word.chars().filter(|c| *c != '\'').collect();
    if stripped.is_empty() || !stripped.chars().all(|c| c.is_alphanumeric()) {
        return false;
    }
    if word.chars().count() < 3 {
        return false;
    }
    if is_stop_word(word) {
        return false;
    }
    if tag.is_empty() {
        return true;
    }
    Pos::from_tag(tag).is_some()
}

fn first_two_chars(word: &str) -> (Option<char>, Option<char>) {
    let mut chars = word.chars();
    (chars.next(), chars.next())
}

/// Morphological-variant proxy: same first two characters and nearly the
/// same length means the candidate is probably just an inflection.
fn too_similar(candidate: &str, word: &str) -> bool {
    let c_len = candidate.chars().count() as i64;
    let w_len = word.chars().count() as i64;
    first_two_chars(candidate) == first_two_chars(word) && (c_len - w_len).abs() <= 1
}

fn clean_lemma(lemma: &str) -> String {
    lemma.replace('_', " ").to_lowercase()
}

/// Rank-ordered synonym candidates for one word.
///
/// Queries with the POS restriction first, retrying unrestricted when that
/// finds nothing. Mines the first few sense groups for single-word lemmas,
/// backfills from hypernyms when too few were found, then applies the style
/// ordering and truncates.
pub fn synonyms_for(
    source: &dyn LexicalSource,
    params: &EngineParams,
    word: &str,
    tag: &str,
    style: Style,
) -> Vec<String> {
    let word_lower = word.to_lowercase();

    let mut synsets = Vec::new();
    if let Some(pos) = Pos::from_tag(tag) {
        synsets = source.synsets(&word_lower, Some(pos));
    }
    if synsets.is_empty() {
        synsets = source.synsets(&word_lower, None);
    }
    if synsets.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    'outer: for synset in synsets.iter().take(params.synset_limit) {
        for lemma in &synset.lemmas {
            let synonym = clean_lemma(lemma);
            if synonym == word_lower || synonym.contains(' ') || synonym.chars().count() < 2 {
                continue;
            }
            if too_similar(&synonym, &word_lower) {
                continue;
            }
            if seen.insert(synonym.clone()) {
                candidates.push(synonym);
            }
            if candidates.len() >= params.max_synonyms {
                break 'outer;
            }
        }
    }

    // Thin results: pull broader terms from each sense group's first hypernym.
    if candidates.len() < params.backfill_below {
        'backfill: for synset in synsets.iter().take(params.hypernym_synset_limit) {
            for hypernym_id in synset.hypernyms.iter().take(1) {
                let Some(hypernym) = source.synset(hypernym_id) else {
                    continue;
                };
                for lemma in &hypernym.lemmas {
                    let synonym = clean_lemma(lemma);
                    if synonym == word_lower
                        || synonym.contains(' ')
                        || synonym.chars().count() < 3
                    {
                        continue;
                    }
                    if seen.insert(synonym.clone()) {
                        candidates.push(synonym);
                    }
                    if candidates.len() >= params.max_synonyms {
                        break 'backfill;
                    }
                }
            }
        }
    }

    if style != Style::Balanced {
        order_by_style(&mut candidates, style);
    }
    candidates.truncate(params.max_synonyms);
    candidates
}

/// Build the per-sentence replacement map and the eligible-position list.
/// Every returned position's lowercase form is a key in the map, and every
/// candidate list is non-empty.
pub fn build_replacement_map(
    source: &dyn LexicalSource,
    params: &EngineParams,
    tagged: &[TaggedToken],
    style: Style,
) -> (HashMap<String, Vec<String>>, Vec<ReplaceableWord>) {
    let mut replacements: HashMap<String, Vec<String>> = HashMap::new();
    let mut replaceable: Vec<ReplaceableWord> = Vec::new();

    for (index, tt) in tagged.iter().enumerate() {
        if !should_replace(&tt.word, &tt.tag) {
            continue;
        }
        let word_lower = tt.word.to_lowercase();
        if !replacements.contains_key(&word_lower) {
            let candidates = synonyms_for(source, params, &tt.word, &tt.tag, style);
            if candidates.is_empty() {
                continue;
            }
            replacements.insert(word_lower, candidates);
        }
        replaceable.push(ReplaceableWord {
            index,
            word: tt.word.clone(),
            tag: tt.tag.clone(),
        });
    }

    (replacements, replaceable)
}

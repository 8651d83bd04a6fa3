use std::collections::BTreeMap;

// ─── Configuration ───────────────────────────────────────────────

/// Tunable knobs of the paraphrase engine. The divergence thresholds are
/// empirically chosen; they are carried as configuration rather than
/// re-derived.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EngineParams {
    /// Maximum synonym candidates kept per word.
    #[serde(default = "default_max_synonyms")]
    pub max_synonyms: usize,
    /// How many sense groups to mine for direct synonyms.
    #[serde(default = "default_synset_limit")]
    pub synset_limit: usize,
    /// How many sense groups to mine for hypernym backfill.
    #[serde(default = "default_hypernym_synset_limit")]
    pub hypernym_synset_limit: usize,
    /// Backfill from hypernyms when fewer than this many candidates found.
    #[serde(default = "default_backfill_below")]
    pub backfill_below: usize,
    /// Generation attempt budget = this × requested variation count.
    #[serde(default = "default_attempt_multiplier")]
    pub attempt_multiplier: usize,
    /// Aggressive mode replaces this fraction range of eligible words.
    #[serde(default = "default_aggressive_low")]
    pub aggressive_low: f64,
    #[serde(default = "default_aggressive_high")]
    pub aggressive_high: f64,
    /// Aggressive loop gate: minimum word-level change rate.
    #[serde(default = "default_min_word_change")]
    pub min_word_change: f64,
    /// Aggressive loop gate: maximum bigram overlap.
    #[serde(default = "default_max_bigram_overlap")]
    pub max_bigram_overlap: f64,
    /// Proof-candidate gate thresholds.
    #[serde(default = "default_proof_min_word_change")]
    pub proof_min_word_change: f64,
    #[serde(default = "default_proof_min_bigram_change")]
    pub proof_min_bigram_change: f64,
    #[serde(default = "default_proof_min_trigram_change")]
    pub proof_min_trigram_change: f64,
    #[serde(default = "default_proof_min_combined_change")]
    pub proof_min_combined_change: f64,
    /// Looser proof fallback: accept on word-level change alone.
    #[serde(default = "default_proof_fallback_word_change")]
    pub proof_fallback_word_change: f64,
    /// Probability of prepending a transition word during restructuring.
    #[serde(default = "default_transition_chance")]
    pub transition_chance: f64,
}

fn default_max_synonyms() -> usize {
    15
}
fn default_synset_limit() -> usize {
    5
}
fn default_hypernym_synset_limit() -> usize {
    2
}
fn default_backfill_below() -> usize {
    3
}
fn default_attempt_multiplier() -> usize {
    5
}
fn default_aggressive_low() -> f64 {
    0.85
}
fn default_aggressive_high() -> f64 {
    0.95
}
fn default_min_word_change() -> f64 {
    0.70
}
fn default_max_bigram_overlap() -> f64 {
    0.55
}
fn default_proof_min_word_change() -> f64 {
    0.70
}
fn default_proof_min_bigram_change() -> f64 {
    0.60
}
fn default_proof_min_trigram_change() -> f64 {
    0.50
}
fn default_proof_min_combined_change() -> f64 {
    0.65
}
fn default_proof_fallback_word_change() -> f64 {
    0.75
}
fn default_transition_chance() -> f64 {
    0.3
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            max_synonyms: 15,
            synset_limit: 5,
            hypernym_synset_limit: 2,
            backfill_below: 3,
            attempt_multiplier: 5,
            aggressive_low: 0.85,
            aggressive_high: 0.95,
            min_word_change: 0.70,
            max_bigram_overlap: 0.55,
            proof_min_word_change: 0.70,
            proof_min_bigram_change: 0.60,
            proof_min_trigram_change: 0.50,
            proof_min_combined_change: 0.65,
            proof_fallback_word_change: 0.75,
            transition_chance: 0.3,
        }
    }
}

// ─── Request Types ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Balanced,
    Formal,
    Casual,
    Academic,
    Simple,
}

impl Default for Style {
    fn default() -> Self {
        Style::Balanced
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Style::Balanced => "balanced",
            Style::Formal => "formal",
            Style::Casual => "casual",
            Style::Academic => "academic",
            Style::Simple => "simple",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPreference {
    Same,
    Shorter,
    Longer,
}

impl Default for LengthPreference {
    fn default() -> Self {
        LengthPreference::Same
    }
}

impl std::fmt::Display for LengthPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LengthPreference::Same => "same",
            LengthPreference::Shorter => "shorter",
            LengthPreference::Longer => "longer",
        };
        write!(f, "{}", s)
    }
}

/// One paraphrase invocation's options.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParaphraseRequest {
    #[serde(default = "default_num_variations")]
    pub num_variations: usize,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub length_preference: LengthPreference,
    #[serde(default)]
    pub anti_detection: bool,
}

fn default_num_variations() -> usize {
    5
}

impl Default for ParaphraseRequest {
    fn default() -> Self {
        Self {
            num_variations: 5,
            style: Style::Balanced,
            length_preference: LengthPreference::Same,
            anti_detection: false,
        }
    }
}

// ─── Part of Speech ──────────────────────────────────────────────

/// Coarse POS bucket used to restrict sense-group lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pos {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl Pos {
    /// Map a Penn-style tag to a bucket. Unrecognized tags map to None
    /// ("no restriction").
    pub fn from_tag(tag: &str) -> Option<Pos> {
        match tag.chars().next()?.to_ascii_uppercase() {
            'N' => Some(Pos::Noun),
            'V' => Some(Pos::Verb),
            'J' => Some(Pos::Adjective),
            'R' => Some(Pos::Adverb),
            _ => None,
        }
    }

    /// Single-letter database category ("n", "v", "a", "r").
    pub fn letter(&self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adjective => 'a',
            Pos::Adverb => 'r',
        }
    }
}

// ─── Token Types ─────────────────────────────────────────────────

/// A token with its POS label; sequences stay parallel to the token stream.
#[derive(Debug, Clone)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

/// A position eligible for synonym substitution.
#[derive(Debug, Clone)]
pub struct ReplaceableWord {
    pub index: usize,
    pub word: String,
    pub tag: String,
}

// ─── Result Types ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WordChange {
    pub from: String,
    pub to: String,
}

/// Derived statistics for a single variation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct VariantStats {
    pub similarity_percent: f64,
    pub word_changes: usize,
    pub changed_words: Vec<WordChange>,
    pub length_diff: i64,
    pub length_percent: f64,
    pub original_length: usize,
    pub variation_length: usize,
    pub score: f64,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParaphraseResult {
    pub original: String,
    /// Accepted variations, best first.
    pub variations: Vec<String>,
    /// Parallel to `variations`.
    pub variation_stats: Vec<VariantStats>,
    pub best_variation: String,
    pub best_score: f64,
    /// The dedicated high-divergence candidate, when aggressive mode produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_variation: Option<String>,
    pub style: Style,
    pub length_preference: LengthPreference,
    pub anti_detection: bool,
    /// The replacement map used, for transparency (candidates sorted per word).
    pub word_replacements: BTreeMap<String, Vec<String>>,
}

impl ParaphraseResult {
    /// Well-formed empty result for blank input.
    pub fn empty(req: &ParaphraseRequest) -> Self {
        Self {
            original: String::new(),
            variations: Vec::new(),
            variation_stats: Vec::new(),
            best_variation: String::new(),
            best_score: 0.0,
            proof_variation: None,
            style: req.style,
            length_preference: req.length_preference,
            anti_detection: req.anti_detection,
            word_replacements: BTreeMap::new(),
        }
    }
}

/// Word lookup: synonyms, antonyms, related words, examples.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LookupResult {
    pub word: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub related: Vec<String>,
    pub examples: Vec<String>,
}

// ─── Simple RNG (xorshift64) ────────────────────────────────────

/// Seeded xorshift64 generator. Always passed explicitly so every randomized
/// step is reproducible under a fixed seed.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [lo, hi).
    pub fn next_f64_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform usize in [0, bound). Returns 0 for bound 0.
    pub fn next_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        (self.next_u64() % bound as u64) as usize
    }

    /// True with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.next_below(items.len())])
        }
    }

    /// k distinct indices drawn from 0..n (partial Fisher-Yates).
    pub fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        let k = k.min(n);
        let mut pool: Vec<usize> = (0..n).collect();
        for i in 0..k {
            let j = i + self.next_below(n - i);
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}

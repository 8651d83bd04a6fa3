//! Paraphrase engine: synonym lookup, randomized constrained substitution,
//! structural rewriting, and composite scoring over a pluggable lexical
//! source.
//!
//! The engine owns no randomness; callers pass a seeded [`SimpleRng`] so the
//! whole pipeline is reproducible.

pub mod generate;
pub mod metrics;
pub mod replace;
pub mod rewrite;
pub mod score;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use reword_core::{
    EngineParams, LengthPreference, LookupResult, ParaphraseRequest, ParaphraseResult, SimpleRng,
    TaggedToken,
};
use reword_lex::{lookup_word, LexicalSource};
use reword_parser::{tokenize, HeuristicTagger, Tagger};

/// "Shorter" keeps variations under this fraction of the original length;
/// "longer" keeps those above its counterpart.
const SHORTER_MAX_RATIO: f64 = 0.95;
const LONGER_MIN_RATIO: f64 = 1.05;

pub struct Engine {
    source: Arc<dyn LexicalSource + Send + Sync>,
    tagger: Box<dyn Tagger + Send + Sync>,
    params: EngineParams,
}

impl Engine {
    pub fn new(source: Arc<dyn LexicalSource + Send + Sync>) -> Self {
        Self {
            source,
            tagger: Box::new(HeuristicTagger),
            params: EngineParams::default(),
        }
    }

    pub fn with_tagger(mut self, tagger: Box<dyn Tagger + Send + Sync>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    pub fn lookup(&self, word: &str) -> LookupResult {
        lookup_word(self.source.as_ref(), word)
    }

    /// Generate scored paraphrase variations of `text`.
    ///
    /// Blank input yields a well-formed empty result. When no word is
    /// eligible for substitution the original comes back as the only
    /// variation with score zero.
    pub fn paraphrase(
        &self,
        text: &str,
        req: &ParaphraseRequest,
        rng: &mut SimpleRng,
    ) -> ParaphraseResult {
        let original = text.trim();
        if original.is_empty() {
            return ParaphraseResult::empty(req);
        }

        let tokens = tokenize(original);
        let tags = self.tagger.tag(&tokens);
        if tags.len() != tokens.len() {
            tracing::warn!(
                tokens = tokens.len(),
                tags = tags.len(),
                "tagger output not parallel to token stream, returning original"
            );
            return self.degraded(original, &tokens, req);
        }
        let tagged: Vec<TaggedToken> = tokens
            .iter()
            .zip(tags.iter())
            .map(|(word, tag)| TaggedToken {
                word: word.clone(),
                tag: tag.clone(),
            })
            .collect();

        let (replacements, replaceable) =
            replace::build_replacement_map(self.source.as_ref(), &self.params, &tagged, req.style);
        if replaceable.is_empty() {
            tracing::debug!("no replaceable words, returning original");
            return self.degraded(original, &tokens, req);
        }

        let aggressive = req.anti_detection;
        let proof_variation = if aggressive {
            generate::proof_candidate(
                original,
                &tokens,
                &tagged,
                &replacements,
                &replaceable,
                &self.params,
                rng,
            )
        } else {
            None
        };

        let original_words = metrics::alnum_words(&tokens);
        let budget = self.params.attempt_multiplier * req.num_variations.max(1);
        let mut variations: Vec<String> = Vec::new();
        // The proof candidate competes with the regular variations too.
        if let Some(proof) = &proof_variation {
            if !proof.eq_ignore_ascii_case(original) {
                variations.push(proof.clone());
            }
        }
        for _ in 0..budget {
            if variations.len() >= req.num_variations {
                break;
            }
            let Some(candidate) = generate::attempt(
                &tokens,
                &replaceable,
                &replacements,
                aggressive,
                &self.params,
                rng,
            ) else {
                continue;
            };
            if candidate.eq_ignore_ascii_case(original) {
                continue;
            }
            if variations.iter().any(|v| v.eq_ignore_ascii_case(&candidate)) {
                continue;
            }
            if aggressive
                && !generate::passes_aggressive_gate(&original_words, &candidate, &self.params)
            {
                continue;
            }
            variations.push(candidate);
        }

        if variations.is_empty() {
            if let Some(fallback) =
                generate::forced_fallback(original, &tokens, &replacements, &replaceable)
            {
                variations.push(fallback);
            } else {
                variations.push(original.to_string());
            }
        }

        // Length preference is a filter, not a hard constraint: when it
        // would empty the set, keep the unfiltered variations.
        if req.length_preference != LengthPreference::Same {
            let original_len = original.chars().count().max(1) as f64;
            let filtered: Vec<String> = variations
                .iter()
                .filter(|v| {
                    let ratio = v.chars().count() as f64 / original_len;
                    match req.length_preference {
                        LengthPreference::Shorter => ratio < SHORTER_MAX_RATIO,
                        LengthPreference::Longer => ratio > LONGER_MIN_RATIO,
                        LengthPreference::Same => true,
                    }
                })
                .cloned()
                .collect();
            if !filtered.is_empty() {
                variations = filtered;
                // Keep extras around so the scorer still has choices.
                variations.truncate(req.num_variations.max(1) * 2);
            }
        }

        let mut scored: Vec<(String, reword_core::VariantStats)> = variations
            .into_iter()
            .map(|variation| {
                let variation_tokens = tokenize(&variation);
                let raw = score::variation_score(
                    original,
                    &variation,
                    &tokens,
                    &variation_tokens,
                    &replacements,
                    self.source.as_ref(),
                );
                let mut stats =
                    score::variation_stats(original, &variation, &tokens, &variation_tokens);
                stats.score = score::round3(raw);
                (variation, stats)
            })
            .collect();
        scored.sort_by(|a, b| {
            b.1.score
                .partial_cmp(&a.1.score)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(req.num_variations.max(1));

        let best_variation = scored
            .first()
            .map(|(v, _)| v.clone())
            .unwrap_or_else(|| original.to_string());
        let best_score = scored.first().map(|(_, s)| s.score).unwrap_or(0.0);

        let word_replacements: BTreeMap<String, Vec<String>> = replacements
            .iter()
            .map(|(word, candidates)| {
                let mut sorted = candidates.clone();
                sorted.sort();
                (word.clone(), sorted)
            })
            .collect();

        let (variations, variation_stats): (Vec<String>, Vec<reword_core::VariantStats>) =
            scored.into_iter().unzip();

        ParaphraseResult {
            original: original.to_string(),
            variations,
            variation_stats,
            best_variation,
            best_score,
            proof_variation,
            style: req.style,
            length_preference: req.length_preference,
            anti_detection: req.anti_detection,
            word_replacements,
        }
    }

    /// Original-as-only-variation result for inputs the pipeline cannot
    /// rewrite.
    fn degraded(&self, original: &str, tokens: &[String], req: &ParaphraseRequest) -> ParaphraseResult {
        let stats = score::variation_stats(original, original, tokens, tokens);
        ParaphraseResult {
            original: original.to_string(),
            variations: vec![original.to_string()],
            variation_stats: vec![stats],
            best_variation: original.to_string(),
            best_score: 0.0,
            proof_variation: None,
            style: req.style,
            length_preference: req.length_preference,
            anti_detection: req.anti_detection,
            word_replacements: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reword_core::Style;
    use reword_lex::MemorySource;

    fn house_source() -> Arc<MemorySource> {
        let mut source = MemorySource::new();
        source.add_synset("cat.n.01", "n", &["cat", "felid", "mouser"]);
        source.add_synset("mat.n.01", "n", &["mat", "rug", "carpet"]);
        source.add_synset("sat.v.01", "v", &["sat", "rested", "perched"]);
        source.add_synset("today.r.01", "r", &["today", "presently", "nowadays"]);
        Arc::new(source)
    }

    fn dense_source() -> Arc<MemorySource> {
        let mut source = MemorySource::new();
        source.add_synset("cats.n.01", "n", &["cats", "felines", "mousers"]);
        source.add_synset("chase.n.01", "n", &["chase", "pursuit", "following"]);
        source.add_synset("mice.n.01", "n", &["mice", "rodents", "vermin"]);
        source.add_synset("quickly.r.01", "r", &["quickly", "rapidly", "swiftly"]);
        Arc::new(source)
    }

    #[test]
    fn blank_input_yields_empty_result() {
        let engine = Engine::new(house_source());
        let mut rng = SimpleRng::new(1);
        let result = engine.paraphrase("   ", &ParaphraseRequest::default(), &mut rng);
        assert!(result.variations.is_empty());
        assert_eq!(result.best_score, 0.0);
        assert!(result.proof_variation.is_none());
    }

    #[test]
    fn standard_paraphrase_produces_distinct_scored_variations() {
        let engine = Engine::new(house_source());
        let mut rng = SimpleRng::new(42);
        let req = ParaphraseRequest {
            num_variations: 3,
            ..ParaphraseRequest::default()
        };
        let result = engine.paraphrase("The cat sat on the mat today.", &req, &mut rng);

        assert!(!result.variations.is_empty());
        assert!(result.variations.len() <= 3);
        assert_eq!(result.variations.len(), result.variation_stats.len());
        for variation in &result.variations {
            assert!(!variation.eq_ignore_ascii_case(&result.original));
        }
        // Best first, scores non-increasing.
        assert_eq!(result.best_variation, result.variations[0]);
        assert!((result.best_score - result.variation_stats[0].score).abs() < 1e-9);
        let scores: Vec<f64> = result.variation_stats.iter().map(|s| s.score).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
        // No case-insensitive duplicates.
        for (i, a) in result.variations.iter().enumerate() {
            for b in result.variations.iter().skip(i + 1) {
                assert!(!a.eq_ignore_ascii_case(b));
            }
        }
        // The replacement map is echoed with sorted candidates.
        assert!(result.word_replacements.contains_key("cat"));
        let candidates = &result.word_replacements["cat"];
        assert!(candidates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn anti_detection_produces_divergent_proof() {
        let engine = Engine::new(dense_source());
        let mut rng = SimpleRng::new(7);
        let req = ParaphraseRequest {
            num_variations: 2,
            anti_detection: true,
            ..ParaphraseRequest::default()
        };
        let result = engine.paraphrase("Cats chase mice quickly", &req, &mut rng);

        assert!(result.anti_detection);
        assert!(!result.variations.is_empty());
        let proof = result.proof_variation.as_deref().unwrap();
        assert!(!proof.eq_ignore_ascii_case(&result.original));

        let original_words = metrics::alnum_words_of_text(&result.original);
        let proof_words = metrics::alnum_words_of_text(proof);
        let d = metrics::divergence(&original_words, &proof_words);
        assert!(d.word >= engine.params().proof_min_word_change);
    }

    #[test]
    fn no_eligible_words_degrades_to_original() {
        let engine = Engine::new(house_source());
        let mut rng = SimpleRng::new(3);
        let result = engine.paraphrase("It is by the an of.", &ParaphraseRequest::default(), &mut rng);
        assert_eq!(result.variations, vec![result.original.clone()]);
        assert_eq!(result.best_score, 0.0);
        assert_eq!(result.variation_stats[0].word_changes, 0);
    }

    #[test]
    fn tagger_mismatch_degrades_to_original() {
        struct BrokenTagger;
        impl Tagger for BrokenTagger {
            fn tag(&self, _tokens: &[String]) -> Vec<String> {
                vec!["NN".to_string()]
            }
        }
        let engine = Engine::new(house_source()).with_tagger(Box::new(BrokenTagger));
        let mut rng = SimpleRng::new(5);
        let result =
            engine.paraphrase("The cat sat on the mat.", &ParaphraseRequest::default(), &mut rng);
        assert_eq!(result.variations, vec![result.original.clone()]);
        assert_eq!(result.best_score, 0.0);
    }

    #[test]
    fn same_seed_reproduces_results() {
        let engine = Engine::new(house_source());
        let req = ParaphraseRequest {
            num_variations: 4,
            ..ParaphraseRequest::default()
        };
        let mut rng_a = SimpleRng::new(1234);
        let mut rng_b = SimpleRng::new(1234);
        let a = engine.paraphrase("The cat sat on the mat today.", &req, &mut rng_a);
        let b = engine.paraphrase("The cat sat on the mat today.", &req, &mut rng_b);
        assert_eq!(a.variations, b.variations);
        assert_eq!(a.best_variation, b.best_variation);
        assert_eq!(a.proof_variation, b.proof_variation);
    }

    #[test]
    fn shorter_preference_filters_when_possible() {
        let engine = Engine::new(house_source());
        let req = ParaphraseRequest {
            num_variations: 5,
            length_preference: LengthPreference::Shorter,
            ..ParaphraseRequest::default()
        };
        let mut rng = SimpleRng::new(21);
        let result = engine.paraphrase("The cat sat on the mat today.", &req, &mut rng);
        // Either everything kept passes the ratio cut, or the filter would
        // have emptied the set and was skipped.
        assert!(!result.variations.is_empty());
        let original_len = result.original.chars().count() as f64;
        let ratio = |v: &String| v.chars().count() as f64 / original_len;
        let all_pass = result.variations.iter().all(|v| ratio(v) < 0.95);
        let none_pass = result.variations.iter().all(|v| ratio(v) >= 0.95);
        assert!(all_pass || none_pass);
    }

    #[test]
    fn style_request_is_echoed() {
        let engine = Engine::new(house_source());
        let req = ParaphraseRequest {
            style: Style::Formal,
            ..ParaphraseRequest::default()
        };
        let mut rng = SimpleRng::new(8);
        let result = engine.paraphrase("The cat sat on the mat.", &req, &mut rng);
        assert_eq!(result.style, Style::Formal);
        assert_eq!(result.length_preference, LengthPreference::Same);
    }

    #[test]
    fn lookup_delegates_to_source() {
        let engine = Engine::new(house_source());
        let result = engine.lookup("cat");
        assert!(result.synonyms.contains(&"felid".to_string()));
        assert!(!result.synonyms.contains(&"cat".to_string()));
    }
}

//! Single-word lookup: synonyms, antonyms, related words, usage examples.

use std::collections::BTreeSet;

use reword_core::LookupResult;

use crate::source::LexicalSource;

fn clean_lemma(lemma: &str) -> String {
    lemma.replace('_', " ").to_lowercase()
}

/// Gather synonyms, antonyms, related words (hypernym/hyponym lemmas), and
/// example sentences for a word across all its sense groups. Results are
/// sorted and deduplicated; the word itself is never echoed back.
pub fn lookup_word(source: &dyn LexicalSource, raw_word: &str) -> LookupResult {
    let word = raw_word.trim().to_lowercase();
    if word.is_empty() {
        return LookupResult {
            word,
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            related: Vec::new(),
            examples: Vec::new(),
        };
    }

    let mut synonyms = BTreeSet::new();
    let mut antonyms = BTreeSet::new();
    let mut related = BTreeSet::new();
    let mut examples = BTreeSet::new();

    for synset in source.synsets(&word, None) {
        for lemma in &synset.lemmas {
            let cleaned = clean_lemma(lemma);
            if !cleaned.is_empty() {
                synonyms.insert(cleaned);
            }
        }
        for ant in &synset.antonyms {
            let cleaned = clean_lemma(ant);
            if !cleaned.is_empty() {
                antonyms.insert(cleaned);
            }
        }
        for relation_id in synset.hypernyms.iter().chain(synset.hyponyms.iter()) {
            if let Some(relation) = source.synset(relation_id) {
                for lemma in &relation.lemmas {
                    let cleaned = clean_lemma(lemma);
                    if !cleaned.is_empty() {
                        related.insert(cleaned);
                    }
                }
            }
        }
        for example in &synset.examples {
            let sentence = example.trim();
            if !sentence.is_empty() {
                examples.insert(sentence.to_string());
            }
        }
    }

    for collection in [&mut synonyms, &mut antonyms, &mut related] {
        collection.remove(&word);
    }

    LookupResult {
        word,
        synonyms: synonyms.into_iter().collect(),
        antonyms: antonyms.into_iter().collect(),
        related: related.into_iter().collect(),
        examples: examples.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;

    fn sample_source() -> MemorySource {
        let mut source = MemorySource::new();
        source.add_synset("happy.a.01", "a", &["happy", "glad", "well_chosen"]);
        source.add_synset("felicity.n.01", "n", &["felicity", "happiness"]);
        source.add_hypernym("happy.a.01", "felicity.n.01");
        source.add_antonym("happy.a.01", "unhappy");
        source.add_example("happy.a.01", "a happy smile");
        source
    }

    #[test]
    fn lookup_collects_all_relations() {
        let source = sample_source();
        let result = lookup_word(&source, "Happy ");
        assert_eq!(result.word, "happy");
        assert_eq!(result.synonyms, vec!["glad", "well chosen"]);
        assert_eq!(result.antonyms, vec!["unhappy"]);
        assert_eq!(result.related, vec!["felicity", "happiness"]);
        assert_eq!(result.examples, vec!["a happy smile"]);
    }

    #[test]
    fn lookup_never_echoes_the_word() {
        let source = sample_source();
        let result = lookup_word(&source, "happy");
        assert!(!result.synonyms.contains(&"happy".to_string()));
    }

    #[test]
    fn empty_word_short_circuits() {
        let source = sample_source();
        let result = lookup_word(&source, "   ");
        assert_eq!(result.word, "");
        assert!(result.synonyms.is_empty());
        assert!(result.examples.is_empty());
    }

    #[test]
    fn unknown_word_yields_empty_lists() {
        let source = sample_source();
        let result = lookup_word(&source, "xylophone");
        assert_eq!(result.word, "xylophone");
        assert!(result.synonyms.is_empty());
        assert!(result.related.is_empty());
    }
}

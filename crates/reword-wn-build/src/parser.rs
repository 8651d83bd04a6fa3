//! Streaming parser for WordNet LMF XML dumps.
//!
//! Reads LexicalEntry/Sense elements to collect lemma forms per synset,
//! then Synset elements for relations and examples, and assembles a
//! `WordnetDb` ready to serialize.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use reword_lex::{Synset, WordnetDb};

fn attr(e: &BytesStart, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Parse a WN-LMF XML dump into a `WordnetDb`.
pub fn parse_lmf_dump<R: BufRead>(reader: R) -> WordnetDb {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut db = WordnetDb::default();
    // Sense ids resolve to lemmas only after the whole entry list is read,
    // so antonym references are collected and resolved at the end.
    let mut sense_lemma: HashMap<String, String> = HashMap::new();
    let mut antonym_refs: Vec<(String, String)> = Vec::new();

    let mut current_lemma = String::new();
    let mut current_sense_id = String::new();
    let mut current_sense_synset = String::new();
    let mut current_synset_id = String::new();
    let mut in_example = false;
    let mut example_text = String::new();
    let mut entries_scanned = 0u64;

    let mut buf = Vec::new();
    loop {
        let event = match xml.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                eprintln!("XML parse error at position {}: {}", xml.buffer_position(), e);
                break;
            }
        };
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => match e.name().as_ref() {
                b"LexicalEntry" => {
                    current_lemma.clear();
                    entries_scanned += 1;
                    if entries_scanned % 50000 == 0 {
                        eprintln!(
                            "  Scanned {} entries, {} synsets so far...",
                            entries_scanned,
                            db.synsets.len()
                        );
                    }
                }
                b"Lemma" => {
                    if let Some(form) = attr(e, "writtenForm") {
                        current_lemma = form.replace(' ', "_");
                    }
                }
                b"Sense" => {
                    current_sense_id = attr(e, "id").unwrap_or_default();
                    current_sense_synset = attr(e, "synset").unwrap_or_default();
                    if current_lemma.is_empty() || current_sense_synset.is_empty() {
                        continue;
                    }
                    sense_lemma.insert(current_sense_id.clone(), current_lemma.clone());
                    let synset = db
                        .synsets
                        .entry(current_sense_synset.clone())
                        .or_insert_with(|| Synset {
                            id: current_sense_synset.clone(),
                            pos: String::new(),
                            lemmas: Vec::new(),
                            hypernyms: Vec::new(),
                            hyponyms: Vec::new(),
                            antonyms: Vec::new(),
                            examples: Vec::new(),
                        });
                    if !synset.lemmas.contains(&current_lemma) {
                        synset.lemmas.push(current_lemma.clone());
                    }
                    db.index
                        .entry(current_lemma.to_lowercase())
                        .or_default()
                        .push(current_sense_synset.clone());
                }
                b"SenseRelation" => {
                    if attr(e, "relType").as_deref() == Some("antonym") {
                        if let Some(target) = attr(e, "target") {
                            if !current_sense_synset.is_empty() {
                                antonym_refs.push((current_sense_synset.clone(), target));
                            }
                        }
                    }
                }
                b"Synset" => {
                    current_synset_id = attr(e, "id").unwrap_or_default();
                    if current_synset_id.is_empty() {
                        continue;
                    }
                    let pos = attr(e, "partOfSpeech").unwrap_or_default();
                    let synset = db
                        .synsets
                        .entry(current_synset_id.clone())
                        .or_insert_with(|| Synset {
                            id: current_synset_id.clone(),
                            pos: String::new(),
                            lemmas: Vec::new(),
                            hypernyms: Vec::new(),
                            hyponyms: Vec::new(),
                            antonyms: Vec::new(),
                            examples: Vec::new(),
                        });
                    synset.pos = pos;
                }
                b"SynsetRelation" => {
                    if current_synset_id.is_empty() {
                        continue;
                    }
                    let (Some(rel_type), Some(target)) = (attr(e, "relType"), attr(e, "target"))
                    else {
                        continue;
                    };
                    if let Some(synset) = db.synsets.get_mut(&current_synset_id) {
                        match rel_type.as_str() {
                            "hypernym" => synset.hypernyms.push(target),
                            "hyponym" => synset.hyponyms.push(target),
                            _ => {}
                        }
                    }
                }
                b"Example" => {
                    in_example = true;
                    example_text.clear();
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if in_example {
                    if let Ok(text) = e.unescape() {
                        example_text.push_str(&text);
                    }
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"Example" => {
                    in_example = false;
                    let trimmed = example_text.trim();
                    if !trimmed.is_empty() && !current_synset_id.is_empty() {
                        if let Some(synset) = db.synsets.get_mut(&current_synset_id) {
                            synset.examples.push(trimmed.to_string());
                        }
                    }
                }
                b"Synset" => current_synset_id.clear(),
                b"LexicalEntry" => current_lemma.clear(),
                b"Sense" => {
                    current_sense_id.clear();
                    current_sense_synset.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    // Second pass: antonym sense ids to lemma forms.
    for (synset_id, target_sense) in antonym_refs {
        let Some(lemma) = sense_lemma.get(&target_sense) else {
            continue;
        };
        if let Some(synset) = db.synsets.get_mut(&synset_id) {
            if !synset.antonyms.contains(lemma) {
                synset.antonyms.push(lemma.clone());
            }
        }
    }

    eprintln!(
        "  Scanned {} total entries, assembled {} synsets",
        entries_scanned,
        db.synsets.len()
    );
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LexicalResource>
  <Lexicon id="test-en" label="Test" language="en">
    <LexicalEntry id="w-cat">
      <Lemma writtenForm="cat" partOfSpeech="n"/>
      <Sense id="s-cat-1" synset="cat-n-01"/>
    </LexicalEntry>
    <LexicalEntry id="w-felid">
      <Lemma writtenForm="felid" partOfSpeech="n"/>
      <Sense id="s-felid-1" synset="cat-n-01"/>
    </LexicalEntry>
    <LexicalEntry id="w-truecat">
      <Lemma writtenForm="true cat" partOfSpeech="n"/>
      <Sense id="s-truecat-1" synset="cat-n-01"/>
    </LexicalEntry>
    <LexicalEntry id="w-happy">
      <Lemma writtenForm="happy" partOfSpeech="a"/>
      <Sense id="s-happy-1" synset="happy-a-01">
        <SenseRelation relType="antonym" target="s-sad-1"/>
      </Sense>
    </LexicalEntry>
    <LexicalEntry id="w-sad">
      <Lemma writtenForm="sad" partOfSpeech="a"/>
      <Sense id="s-sad-1" synset="sad-a-01"/>
    </LexicalEntry>
    <Synset id="cat-n-01" partOfSpeech="n">
      <Definition>feline mammal</Definition>
      <SynsetRelation relType="hypernym" target="feline-n-01"/>
      <Example>the cat purred softly</Example>
    </Synset>
    <Synset id="feline-n-01" partOfSpeech="n">
      <SynsetRelation relType="hyponym" target="cat-n-01"/>
    </Synset>
    <Synset id="happy-a-01" partOfSpeech="a"/>
    <Synset id="sad-a-01" partOfSpeech="a"/>
  </Lexicon>
</LexicalResource>"#;

    fn parsed() -> WordnetDb {
        parse_lmf_dump(SAMPLE.as_bytes())
    }

    #[test]
    fn lemmas_collect_per_synset_in_entry_order() {
        let db = parsed();
        let cat = &db.synsets["cat-n-01"];
        assert_eq!(cat.lemmas, vec!["cat", "felid", "true_cat"]);
        assert_eq!(cat.pos, "n");
    }

    #[test]
    fn index_maps_lowercase_lemmas() {
        let db = parsed();
        assert_eq!(db.index["cat"], vec!["cat-n-01"]);
        assert_eq!(db.index["true_cat"], vec!["cat-n-01"]);
    }

    #[test]
    fn relations_and_examples_attach_to_synsets() {
        let db = parsed();
        let cat = &db.synsets["cat-n-01"];
        assert_eq!(cat.hypernyms, vec!["feline-n-01"]);
        assert_eq!(cat.examples, vec!["the cat purred softly"]);
        let feline = &db.synsets["feline-n-01"];
        assert_eq!(feline.hyponyms, vec!["cat-n-01"]);
    }

    #[test]
    fn antonym_sense_refs_resolve_to_lemmas() {
        let db = parsed();
        assert_eq!(db.synsets["happy-a-01"].antonyms, vec!["sad"]);
        assert!(db.synsets["sad-a-01"].antonyms.is_empty());
    }

    #[test]
    fn malformed_input_does_not_panic() {
        let db = parse_lmf_dump("<LexicalResource><Sense synset=".as_bytes());
        assert!(db.synsets.is_empty());
    }
}

pub mod tagger;

pub use tagger::{HeuristicTagger, Tagger};

/// Tokenize text into case-preserving word and punctuation tokens.
///
/// Words are runs of alphanumerics; apostrophes and hyphens stay inside a
/// word when flanked by alphanumerics ("cat's", "well-known"), and a
/// trailing possessive apostrophe is kept ("dogs'"). Every other
/// punctuation character becomes its own token. Position is significant:
/// downstream alignment compares token indices.
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_alphanumeric() {
            word.push(c);
        } else if (c == '\'' || c == '-') && !word.is_empty() {
            let next_alnum = chars.get(i + 1).map_or(false, |n| n.is_alphanumeric());
            // "cat's" / "well-known" continue the word; a trailing
            // apostrophe is the possessive marker ("dogs'").
            if next_alnum || c == '\'' {
                word.push(c);
            } else {
                tokens.push(std::mem::take(&mut word));
                tokens.push(c.to_string());
            }
        } else {
            if !word.is_empty() {
                tokens.push(std::mem::take(&mut word));
            }
            if !c.is_whitespace() {
                tokens.push(c.to_string());
            }
        }
        i += 1;
    }
    if !word.is_empty() {
        tokens.push(word);
    }
    tokens
}

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SENTENCE_RE: Regex = Regex::new(r"[^.!?]*[.!?]").expect("valid regex");
}

/// Split text into sentences at `.`, `!` and `?`. Each sentence keeps its
/// terminal punctuation and is trimmed; an unterminated trailing remainder is
/// emitted as the final sentence.
///
/// This is a deliberate best-effort heuristic: abbreviations and decimal
/// numbers produce spurious splits.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last_end = 0;
    for m in SENTENCE_RE.find_iter(text) {
        let s = m.as_str().trim();
        if !s.is_empty() {
            sentences.push(s.to_string());
        }
        last_end = m.end();
    }
    let rest = text[last_end..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

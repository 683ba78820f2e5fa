use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[A-Za-z0-9]+").expect("valid regex");
}

/// Tokenize text into lowercase ASCII-alphanumeric runs. Anything else is a
/// boundary; empty tokens never occur.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_punctuation() {
        let toks = tokenize("Hello, World! HTTP/2 rocks.");
        assert_eq!(toks, vec!["hello", "world", "http", "2", "rocks"]);
    }

    #[test]
    fn keeps_digits_inside_words() {
        assert_eq!(tokenize("utf8 v1.2"), vec!["utf8", "v1", "2"]);
    }

    #[test]
    fn empty_and_whitespace_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
        assert!(tokenize("--- ***").is_empty());
    }
}

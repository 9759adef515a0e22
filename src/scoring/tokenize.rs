//! Word tokenizer shared by the vectorizer and the keyword bonus.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything that is not an ASCII word char, a Swedish letter or whitespace.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_åäöÅÄÖ\s]").expect("tokenizer regex"));

/// Lower-cases `text`, blanks out punctuation and symbols, splits on
/// whitespace and drops single-character tokens.
///
/// Letters outside ASCII and `åäö` (e.g. `é`, `²`) are treated as separators.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Steg 1: Faktorisering, och KONTROLL!"),
            vec!["steg", "faktorisering", "och", "kontroll"]
        );
    }

    #[test]
    fn keeps_swedish_letters() {
        assert_eq!(
            tokenize("Lösning ÄR Överst"),
            vec!["lösning", "är", "överst"]
        );
    }

    #[test]
    fn splits_hyphenated_words_and_symbols() {
        // "ax²" loses the superscript; "c" and "0" are single chars
        assert_eq!(
            tokenize("pq-formeln ax² + bx + c = 0"),
            vec!["pq", "formeln", "ax", "bx"]
        );
    }

    #[test]
    fn empty_and_punctuation_only_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert!(tokenize("?! ... -- ²").is_empty());
    }

    #[test]
    fn multi_digit_numbers_survive() {
        assert_eq!(tokenize("x = 12"), vec!["12"]);
    }
}

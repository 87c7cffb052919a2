/**
 * Text Analyzer
 *
 * The token pipeline shared by indexing and querying. Stages, in order:
 *
 * 1. Word-boundary splitting (non-alphanumerics, case transitions,
 *    letter/digit boundaries)
 * 2. Lowercasing
 * 3. ASCII folding (NFKD decomposition, combining marks stripped)
 * 4. Porter stemming
 *
 * The same pipeline runs at index and query time; fuzzy matching stops
 * after stage 3 so edit distances are measured against surface forms
 * rather than stems.
 */

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::stemmer::stem;

/// One analyzed token: the folded surface form and its stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased, ASCII-folded form; what fuzzy matching compares.
    pub surface: String,
    /// Porter-stemmed form; what exact matching looks up.
    pub stemmed: String,
}

/// Run the full pipeline over a text.
pub fn analyze(text: &str) -> Vec<Token> {
    split_words(text)
        .into_iter()
        .map(|word| {
            let surface = fold_ascii(&word);
            let stemmed = stem(&surface);
            Token { surface, stemmed }
        })
        .filter(|t| !t.surface.is_empty())
        .collect()
}

/// Split a text into candidate words.
///
/// Runs of alphanumerics are split further at lower-to-upper case
/// transitions and letter/digit boundaries ("XmlHTTP2Request" yields
/// xml, http, 2, request after folding).
fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if !c.is_alphanumeric() {
            flush(&mut words, &mut current);
            prev = None;
            continue;
        }

        if let Some(p) = prev {
            let case_boundary = p.is_lowercase() && c.is_uppercase();
            let digit_boundary = p.is_ascii_digit() != c.is_ascii_digit();
            if case_boundary || digit_boundary {
                flush(&mut words, &mut current);
            }
        }

        current.push(c);
        prev = Some(c);
    }
    flush(&mut words, &mut current);

    words
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// Lowercase and fold a word to plain ASCII.
///
/// NFKD decomposition separates base characters from their diacritics;
/// combining marks and any remaining non-ASCII are dropped.
pub fn fold_ascii(word: &str) -> String {
    word.to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

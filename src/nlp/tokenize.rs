// Sentence splitting and token sets for similarity scoring.
// Boundaries are heuristic: an abbreviation followed by a capital letter
// ("Dr. Smith") still splits.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Sentences of this many characters or fewer are headers or bullets, not ranking units.
pub const MIN_SENTENCE_CHARS: usize = 15;

// Only the whitespace run (group 1) is the boundary; the punctuation stays
// with the previous sentence, the capital or quote starts the next one.
// Whitespace is ASCII only: a non-breaking space after a period does not split.
static BOUNDARY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.!?]((?-u:\s)+)[A-Z"']"#).unwrap()
});

static NON_WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_]+").unwrap()
});

static NUMERIC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").unwrap()
});

pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "is", "at", "which", "on", "and", "a", "an", "in", "to", "of",
        "for", "with", "as", "by", "that", "this", "it", "or", "be", "are",
        "from", "was", "were", "but", "not", "have", "has", "had", "they",
        "you", "we", "can", "will", "if", "would", "should", "could", "their", "there"
    ].iter().copied().collect()
});

pub fn split_sentences(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for cap in BOUNDARY_PATTERN.captures_iter(text) {
        if let Some(gap) = cap.get(1) {
            pieces.push(&text[start..gap.start()]);
            start = gap.end();
        }
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(|s| trim_ascii_control(s).replace('\n', " "))
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Strips leading and trailing characters at or below U+0020, leaving
/// Unicode spaces such as U+00A0 in place.
fn trim_ascii_control(s: &str) -> &str {
    s.trim_matches(|c: char| c <= ' ')
}

/// Lowercased words split on non-word runs, empty pieces dropped.
pub fn words(text: &str) -> Vec<String> {
    NON_WORD_PATTERN
        .split(&text.to_lowercase())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

pub fn tokenize(sentence: &str) -> HashSet<String> {
    words(sentence)
        .into_iter()
        .filter(|w| !is_stop_word(w) && !is_numeric(w))
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

pub fn is_numeric(word: &str) -> bool {
    NUMERIC_PATTERN.is_match(word)
}

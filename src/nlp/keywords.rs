// Frequency-based keyword extraction.
use super::tokenize::{is_numeric, is_stop_word, words};
use std::collections::HashMap;

pub const MAX_KEYWORDS: usize = 6;
/// Words must be longer than this to count as keywords.
pub const MIN_KEYWORD_LEN: usize = 4;

/// Most frequent content words, capitalized. Equal counts are ordered by
/// first appearance in the text.
pub fn extract_keywords(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // word -> (count, first position)
    let mut freq: HashMap<String, (usize, usize)> = HashMap::new();
    for (pos, word) in words(text)
        .into_iter()
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN && !is_stop_word(w) && !is_numeric(w))
        .enumerate()
    {
        freq.entry(word).or_insert((0, pos)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(word, _)| capitalize(&word))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

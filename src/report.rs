// Per-document result bundle with word-count statistics.
use crate::nlp::{analyze_sentiment, extract_keywords, DocumentSummarizer, Level, Sentiment, SummarySource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub file_name: String,
    pub level: Level,
    pub summary: String,
    pub source: SummarySource,
    pub keywords: Vec<String>,
    pub sentiment: Sentiment,
    pub original_words: usize,
    pub summary_words: usize,
    /// Percentage of words removed; negative when the summary is longer.
    pub compression: i64,
}

impl DocumentReport {
    /// Keywords and sentiment come from the original text regardless of
    /// which path produced the summary.
    pub fn build(file_name: &str, text: &str, level: Level, engine: &DocumentSummarizer) -> Self {
        let summary = engine.summarize(text, level);
        let original_words = count_words(text);
        let summary_words = count_words(&summary.text);

        Self {
            file_name: file_name.to_string(),
            level,
            keywords: extract_keywords(text),
            sentiment: analyze_sentiment(text),
            original_words,
            summary_words,
            compression: compression(original_words, summary_words),
            summary: summary.text,
            source: summary.source,
        }
    }

    /// Plain-text download form.
    pub fn render_text(&self) -> String {
        let keywords = if self.keywords.is_empty() {
            String::from("(no keywords)")
        } else {
            self.keywords.join(", ")
        };
        format!(
            "Document: {}\nLevel: {}\nSentiment: {}\nKeywords: {}\nOriginal words: {}\nSummary words: {}\nCompression: {}%\n\n{}\n",
            self.file_name,
            self.level,
            self.sentiment,
            keywords,
            self.original_words,
            self.summary_words,
            self.compression,
            self.summary
        )
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `100 - summary * 100 / original` with integer division; 0 for an empty original.
pub fn compression(original_words: usize, summary_words: usize) -> i64 {
    if original_words == 0 {
        return 0;
    }
    let ratio = (summary_words as u64 * 100) / original_words as u64;
    100 - ratio as i64
}

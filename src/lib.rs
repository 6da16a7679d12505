//! Document summarization: an optional external summarizer process with a
//! TextRank fallback, plus keyword extraction and lexicon sentiment.

pub mod config;
pub mod error;
pub mod external;
pub mod input;
pub mod nlp;
pub mod report;

use std::sync::Arc;

pub use config::Config;
pub use error::{ConfigError, ExternalError};
pub use external::{ExternalSummarizer, ProcessSummarizer};
pub use nlp::{analyze_sentiment, extract_keywords, DocumentSummarizer, Level, Sentiment, Summary, SummarySource};
pub use report::DocumentReport;

/// Engine wired from configuration; the external process is skipped when disabled.
pub fn engine_from_config(config: &Config) -> DocumentSummarizer {
    if config.external.enabled {
        DocumentSummarizer::with_external(Arc::new(ProcessSummarizer::from_config(&config.external)))
    } else {
        DocumentSummarizer::new()
    }
}

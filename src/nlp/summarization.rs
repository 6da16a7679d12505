// Text summarization: external summarizer first, TextRank fallback.
// Large documents are ranked in fixed-size chunks so the quadratic graph
// never grows past CHUNK_SIZE sentences.
use super::rank::rank_and_select;
use super::tokenize::split_sentences;
use crate::external::ExternalSummarizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;
use tracing::{debug, warn};

pub const NO_CONTENT: &str = "No content available.";

/// Documents with more sentences than this are summarized chunk by chunk.
pub const LARGE_DOCUMENT_SENTENCES: usize = 100;
pub const CHUNK_SIZE: usize = 50;

/// External output must be longer than this many characters.
pub const MIN_EXTERNAL_CHARS: usize = 50;
const ERROR_MARKER: &str = "Error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl Level {
    /// Case-insensitive; anything unrecognized (including "default") is `Medium`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "short" => Level::Short,
            "detailed" => Level::Detailed,
            _ => Level::Medium,
        }
    }

    /// Effort units handed to the external summarizer.
    pub fn external_intensity(self) -> u32 {
        match self {
            Level::Short => 2,
            Level::Medium => 4,
            Level::Detailed => 8,
        }
    }

    /// Sentences kept by the TextRank fallback.
    pub fn target_sentences(self) -> usize {
        match self {
            Level::Short => 5,
            Level::Medium => 15,
            Level::Detailed => 50,
        }
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Level::parse(s)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Short => "short",
            Level::Medium => "medium",
            Level::Detailed => "detailed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    /// Accepted output of the external summarizer.
    External,
    /// Sentences selected by TextRank.
    TextRank,
    /// Input already at or below the target length, returned as is.
    Passthrough,
    /// Blank input.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

impl Summary {
    fn new(text: impl Into<String>, source: SummarySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Summarization engine. Holds no per-request state, so one instance can
/// serve concurrent callers.
#[derive(Clone, Default)]
pub struct DocumentSummarizer {
    external: Option<Arc<dyn ExternalSummarizer>>,
}

impl DocumentSummarizer {
    /// Engine that only uses TextRank.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_external(external: Arc<dyn ExternalSummarizer>) -> Self {
        Self {
            external: Some(external),
        }
    }

    /// Never fails: every problem on the external path falls back to TextRank.
    pub fn summarize(&self, text: &str, level: Level) -> Summary {
        if text.trim().is_empty() {
            return Summary::new(NO_CONTENT, SummarySource::Empty);
        }

        if let Some(external) = &self.external {
            match external.summarize(text, level.external_intensity()) {
                Ok(output) if is_acceptable(&output) => {
                    debug!(chars = output.chars().count(), "using external summary");
                    return Summary::new(output, SummarySource::External);
                }
                Ok(output) => {
                    warn!(
                        chars = output.chars().count(),
                        "external summary rejected as low confidence, falling back to TextRank"
                    );
                }
                Err(err) => {
                    warn!(error = %err, "external summarizer failed, falling back to TextRank");
                }
            }
        }

        summarize_with_textrank(text, level.target_sentences())
    }
}

/// Coarse acceptance check for external output.
pub fn is_acceptable(output: &str) -> bool {
    output.chars().count() > MIN_EXTERNAL_CHARS && !output.starts_with(ERROR_MARKER)
}

pub fn summarize_with_textrank(text: &str, target: usize) -> Summary {
    if text.trim().is_empty() {
        return Summary::new(NO_CONTENT, SummarySource::Empty);
    }

    let sentences = split_sentences(text);
    if sentences.len() <= target {
        debug!(sentences = sentences.len(), target_sentences = target, "document already short enough");
        return Summary::new(text, SummarySource::Passthrough);
    }

    let summary = if sentences.len() > LARGE_DOCUMENT_SENTENCES {
        summarize_large_document(&sentences, target)
    } else {
        rank_and_select(&sentences, target)
    };
    Summary::new(summary, SummarySource::TextRank)
}

/// Contiguous chunk windows over `total` sentences and the number of
/// sentences each chunk contributes.
pub fn plan_chunks(total: usize, target: usize) -> (Vec<Range<usize>>, usize) {
    let windows: Vec<Range<usize>> = (0..total)
        .step_by(CHUNK_SIZE)
        .map(|start| start..(start + CHUNK_SIZE).min(total))
        .collect();
    let per_chunk = if windows.is_empty() {
        target.max(1)
    } else {
        (target / windows.len()).max(1)
    };
    (windows, per_chunk)
}

fn summarize_large_document(sentences: &[String], target: usize) -> String {
    let (windows, per_chunk) = plan_chunks(sentences.len(), target);
    debug!(chunks = windows.len(), per_chunk, "summarizing large document in chunks");

    windows
        .into_iter()
        .map(|window| rank_and_select(&sentences[window], per_chunk))
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

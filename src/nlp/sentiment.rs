// Sentiment Analysis module using lexicon-based approach
// Counts matches against fixed positive and negative word lists; no
// negation or intensifier handling.
use super::tokenize::words;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Positive words lexicon
static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "excellent", "good", "great", "success", "growth", "positive", "win",
        "happy", "love", "joy", "best", "improving", "solution", "effective"
    ].iter().copied().collect()
});

// Negative words lexicon
static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "fail", "bad", "loss", "error", "decline", "problem", "risk",
        "poor", "sad", "hate", "worst", "difficult", "issue", "mistake"
    ].iter().copied().collect()
});

/// Lexicon hit counts as `(positive, negative)`.
pub fn lexicon_counts(text: &str) -> (usize, usize) {
    words(text).iter().fold((0, 0), |(pos, neg), word| {
        if POSITIVE_WORDS.contains(word.as_str()) {
            (pos + 1, neg)
        } else if NEGATIVE_WORDS.contains(word.as_str()) {
            (pos, neg + 1)
        } else {
            (pos, neg)
        }
    })
}

pub fn analyze_sentiment(text: &str) -> Sentiment {
    let (pos, neg) = lexicon_counts(text);
    if pos > neg {
        Sentiment::Positive
    } else if neg > pos {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_sentiment_positive() {
        let text = "The project was a huge success and brought great growth and joy.";
        assert_eq!(lexicon_counts(text), (4, 0));
        assert_eq!(analyze_sentiment(text), Sentiment::Positive);
    }

    #[test]
    fn test_analyze_sentiment_negative() {
        let text = "Another bad quarter: the loss was a problem and a mistake.";
        assert_eq!(analyze_sentiment(text), Sentiment::Negative);
    }

    #[test]
    fn test_analyze_sentiment_tie_is_neutral() {
        assert_eq!(analyze_sentiment("A great plan with one risk."), Sentiment::Neutral);
        assert_eq!(analyze_sentiment("The sky is blue. The grass is green."), Sentiment::Neutral);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(analyze_sentiment("EXCELLENT work, Best team!"), Sentiment::Positive);
    }

    #[test]
    fn test_blank_is_neutral() {
        assert_eq!(analyze_sentiment(""), Sentiment::Neutral);
        assert_eq!(analyze_sentiment("   "), Sentiment::Neutral);
    }

    #[test]
    fn test_label_display() {
        assert_eq!(Sentiment::Negative.to_string(), "Negative");
        assert_eq!(serde_json::to_string(&Sentiment::Positive).unwrap(), "\"Positive\"");
    }
}

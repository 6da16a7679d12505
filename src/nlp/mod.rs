// NLP module for docdigest
pub mod graph;
pub mod keywords;
pub mod rank;
pub mod sentiment;
pub mod summarization;
pub mod tokenize;

pub use keywords::extract_keywords;
pub use sentiment::{analyze_sentiment, Sentiment};
pub use summarization::{DocumentSummarizer, Level, Summary, SummarySource};

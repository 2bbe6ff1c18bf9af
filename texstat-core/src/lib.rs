//! Structural and lexical statistics for LaTeX documents.
//!
//! A snapshot of a document goes through three stages:
//!
//! 1. [`analyzer::normalizer`] strips comments, counts markup and runs the
//!    ordered cleaning passes that remove non-prose constructs.
//! 2. [`stats::aggregator`] tokenizes the cleaned text, filters tokens, and
//!    builds word and stem frequency views with and without stopwords.
//! 3. [`stats::pipeline`] assembles both halves into an immutable
//!    [`StatisticsRecord`] and applies configured corrections.
//!
//! [`stats::report`] renders records as text, JSON, or CSV rows.

pub mod analyzer;
pub mod stats;

pub use stats::{Report, StatsPipeline};
pub use texstat_types::{
    AnalysisConfig, ConfigError, CorrectionRule, Frequency, Language, LexicalStats, RecordError,
    SnapshotMeta, StatisticsRecord, StemmerKind, StructuralCounts,
};

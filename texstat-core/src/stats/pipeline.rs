//! Snapshot text to statistics record.

use std::str;
use std::time::Instant;

use texstat_types::{
    AnalysisConfig, ConfigError, CorrectionRule, RecordError, SnapshotMeta, StatisticsRecord,
};
use tracing::debug;

use crate::analyzer::normalizer::{strip_comments, CleaningPass, LatexNormalizer};
use crate::stats::aggregator::{Aggregation, Aggregator};
use crate::stats::corrections::apply_corrections;

/// Everything needed to turn a snapshot into a [`StatisticsRecord`].
///
/// Built once from an [`AnalysisConfig`]; all later operations are
/// infallible for valid text. `Send + Sync`, so one pipeline can serve
/// many threads.
#[derive(Debug)]
pub struct StatsPipeline {
    normalizer: LatexNormalizer,
    aggregator: Aggregator,
    corrections: Vec<CorrectionRule>,
}

impl StatsPipeline {
    /// Validates the configuration and loads its resources.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable or empty stopword list, a stemmer without
    /// rules for the configured language, or an invalid correction rule.
    pub fn new(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        for rule in &config.corrections {
            rule.validate()?;
        }
        let pipeline = Self {
            normalizer: LatexNormalizer::new(&config.inputminted_language)?,
            aggregator: Aggregator::from_config(config)?,
            corrections: config.corrections.clone(),
        };
        debug!(
            language = %config.language,
            stemmer = pipeline.aggregator.stemmer().name(),
            stopwords = pipeline.aggregator.stopwords().len(),
            corrections = pipeline.corrections.len(),
            "pipeline ready"
        );
        Ok(pipeline)
    }

    /// Assembles a pipeline from prebuilt parts.
    pub fn from_parts(
        normalizer: LatexNormalizer,
        aggregator: Aggregator,
        corrections: Vec<CorrectionRule>,
    ) -> Self {
        Self {
            normalizer,
            aggregator,
            corrections,
        }
    }

    /// The normalizer in use.
    pub fn normalizer(&self) -> &LatexNormalizer {
        &self.normalizer
    }

    /// The aggregator in use.
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Builds the record for one snapshot.
    ///
    /// Structure is counted on comment-free text, words on fully cleaned
    /// text. Empty input gives an all-zero record.
    pub fn build_record(&self, raw: &str, meta: SnapshotMeta) -> StatisticsRecord {
        self.build_record_traced(raw, meta, |_, _| {})
    }

    /// Like [`build_record`](Self::build_record), handing the text to
    /// `trace` after each cleaning pass.
    pub fn build_record_traced<F>(&self, raw: &str, meta: SnapshotMeta, trace: F) -> StatisticsRecord
    where
        F: FnMut(CleaningPass, &str),
    {
        let started = Instant::now();

        let comment_free = strip_comments(raw);
        let structure = self.normalizer.analyze_structure(&comment_free);
        let cleaned = self.normalizer.clean_text_traced(&comment_free, trace);
        let Aggregation { tokens, stats } = self.aggregator.run(&cleaned);

        debug!(
            snapshot = %meta.name,
            bytes = raw.len(),
            words = stats.word_count,
            unique_words = stats.unique_word_count,
            commands = structure.command_total(),
            elapsed = ?started.elapsed(),
            "record built"
        );

        let record = StatisticsRecord::new(meta, structure, stats);
        apply_corrections(record, &self.corrections, &tokens)
    }

    /// Decodes UTF-8 bytes and builds the record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Encoding`] if `raw` is not valid UTF-8.
    pub fn build_record_from_bytes(
        &self,
        raw: &[u8],
        meta: SnapshotMeta,
    ) -> Result<StatisticsRecord, RecordError> {
        let text = str::from_utf8(raw).map_err(|source| RecordError::Encoding {
            name: meta.name.clone(),
            source,
        })?;
        Ok(self.build_record(text, meta))
    }
}

//! Core types for LaTeX revision statistics.
//!
//! This crate holds the values that cross the boundary between the analysis
//! engine and whatever drives it (a revision walker, a report writer, a
//! trend plotter). Keeping them separate means:
//!
//! - **One record shape**: the engine, the CLI driver and downstream tools
//!   all read and write the same `StatisticsRecord`
//! - **Serializable snapshots**: every type here round-trips through serde
//! - **No engine dependencies**: no regex, no stemmer, no I/O beyond config

#![warn(missing_docs)]

use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use config::{AnalysisConfig, CorrectionRule, Language, StemmerKind};
pub use error::{ConfigError, RecordError};

/// Multiset of keys that remembers the order in which keys were first seen.
///
/// Ranked views (`most_common`) break ties by first-encountered order, so the
/// insertion order of the source sequence must survive counting. Keys whose
/// count drops to zero are removed; a `Frequency` never stores a zero.
#[derive(Debug, Clone)]
pub struct Frequency<K> {
    entries: Vec<(K, u64)>,
    index: FxHashMap<K, usize>,
}

impl<K> Default for Frequency<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> Frequency<K> {
    /// Creates an empty frequency map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every item of a sequence, preserving first-seen order.
    pub fn count<I>(items: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut freq = Self::new();
        for item in items {
            freq.add(item, 1);
        }
        freq
    }

    /// Adds `n` occurrences of `key`. Adding zero is a no-op.
    pub fn add(&mut self, key: K, n: u64) {
        if n == 0 {
            return;
        }
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += n,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, n));
            }
        }
    }

    /// Returns the count for `key`, zero when absent.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map_or(0, |&slot| self.entries[slot].1)
    }

    /// Returns true if `key` has a non-zero count.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Removes `key` entirely and returns its count.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        let (_, count) = self.entries.remove(slot);
        for (_, pos) in self.index.iter_mut() {
            if *pos > slot {
                *pos -= 1;
            }
        }
        Some(count)
    }

    /// Subtracts up to `n` from `key`, removing it if the count reaches zero.
    ///
    /// Returns how much was actually subtracted.
    pub fn subtract<Q>(&mut self, key: &Q, n: u64) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&slot) = self.index.get(key) else {
            return 0;
        };
        let taken = n.min(self.entries[slot].1);
        self.entries[slot].1 -= taken;
        if self.entries[slot].1 == 0 {
            self.remove(key);
        }
        taken
    }

    /// Returns a copy keeping only keys for which `keep` returns true.
    ///
    /// Dropped keys are absent from the result, not zeroed.
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&K) -> bool,
    {
        self.entries
            .iter()
            .filter(|(key, _)| keep(key))
            .cloned()
            .collect()
    }

    /// Number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key has been counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Iterates `(key, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> + '_ {
        self.entries.iter().map(|(k, n)| (k, *n))
    }

    /// Returns the `n` most frequent keys, highest count first.
    ///
    /// Equal counts keep first-seen order (the sort is stable).
    pub fn most_common(&self, n: usize) -> Vec<(&K, u64)> {
        let mut ranked: Vec<(&K, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, u64)> for Frequency<K> {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut freq = Self::new();
        for (key, n) in iter {
            freq.add(key, n);
        }
        freq
    }
}

impl<K: PartialEq> PartialEq for Frequency<K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq> Eq for Frequency<K> {}

impl<K: Serialize> Serialize for Frequency<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de, K> Deserialize<'de> for Frequency<K>
where
    K: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(K, u64)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

impl<K: fmt::Display> fmt::Display for Frequency<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, n)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {n}")?;
        }
        f.write_str("}")
    }
}

/// Identity of one document snapshot.
///
/// Supplied by whatever walks the revision history; the engine only copies it
/// into the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    /// Logical document or file name (`all` for a whole-corpus snapshot).
    pub name: String,
    /// Revision identifier, usually a commit hash.
    pub commit_hash: String,
    /// Revision timestamp, seconds since the Unix epoch.
    pub date: i64,
    /// Free text, usually the commit message.
    pub description: String,
}

impl SnapshotMeta {
    /// Creates metadata with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the commit hash.
    pub fn with_commit(mut self, commit_hash: impl Into<String>) -> Self {
        self.commit_hash = commit_hash.into();
        self
    }

    /// Sets the revision timestamp.
    pub fn with_date(mut self, date: i64) -> Self {
        self.date = date;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Markup counts taken from comment-stripped text.
///
/// Every counter is a pattern-match count, not a semantic one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralCounts {
    /// `\part` commands.
    pub part_count: u64,
    /// `\chapter` commands.
    pub chapter_count: u64,
    /// `\section` commands.
    pub section_count: u64,
    /// `\subsection` commands.
    pub subsection_count: u64,
    /// `\subsubsection` commands.
    pub subsubsection_count: u64,
    /// `\pageref` commands.
    pub page_cross_ref_count: u64,
    /// `\ref` plus `\autoref` commands.
    pub other_cross_ref_count: u64,
    /// `figure` environments.
    pub figure_count: u64,
    /// `subfigure` environments.
    pub subfigure_count: u64,
    /// `\[ ... \]` display equations.
    pub display_equation_count: u64,
    /// `equation` / `equation*` environments.
    pub equation_environment_count: u64,
    /// Always `display_equation_count + equation_environment_count`.
    pub equation_count: u64,
    /// `\( ... \)` inline equations. Not part of `equation_count`.
    pub inline_equation_count: u64,
    /// `$...$` and `$$...$$` equations. Not part of `equation_count`.
    pub dollar_equation_count: u64,
    /// `subequations` environments.
    pub subequation_count: u64,
    /// `listing` environments.
    pub listing_count: u64,
    /// `table` environments.
    pub table_count: u64,
    /// `\includegraphics` commands.
    pub includegraphics_count: u64,
    /// `\inputminted` commands.
    pub inputminted_count: u64,
    /// `\cite` plus `\citeauthor` commands.
    pub citation_count: u64,
    /// `\index` commands.
    pub index_count: u64,
    /// `\footnote` commands.
    pub footnote_count: u64,
    /// Number of subfigures in a figure -> number of figures with that many.
    pub subfigures_per_figure: Frequency<u64>,
    /// Every `\command`, keyed with its leading backslash.
    pub command_frequency: Frequency<String>,
    /// Every `\begin{name}`, keyed by `name` without a trailing `*`.
    pub environment_frequency: Frequency<String>,
    /// Raw citation groups in usage order, duplicates kept (`"{key}"`, or
    /// `""` for a bare `\cite`).
    pub citation_keys_used: Vec<String>,
}

impl StructuralCounts {
    /// Total number of commands counted.
    pub fn command_total(&self) -> u64 {
        self.command_frequency.total()
    }

    /// Total number of environments counted.
    pub fn environment_total(&self) -> u64 {
        self.environment_frequency.total()
    }

    /// Checks the equation decomposition.
    pub fn invariants_hold(&self) -> bool {
        self.equation_count == self.display_equation_count + self.equation_environment_count
    }
}

/// Word and stem statistics taken from fully cleaned text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalStats {
    /// Tokens after filtering, duplicates included.
    pub word_count: u64,
    /// Distinct tokens after filtering.
    pub unique_word_count: u64,
    /// Stems of all tokens, duplicates included.
    pub stem_count: u64,
    /// Distinct stems.
    pub unique_stem_count: u64,
    /// Token -> count.
    pub word_frequency: Frequency<String>,
    /// Token -> count with stopwords removed.
    pub filtered_word_frequency: Frequency<String>,
    /// Stem -> count over all tokens.
    pub stem_frequency: Frequency<String>,
    /// Stem -> count over non-stopword tokens.
    pub filtered_stem_frequency: Frequency<String>,
}

impl LexicalStats {
    /// Checks the count and subset invariants between the views.
    pub fn invariants_hold(&self) -> bool {
        self.unique_word_count <= self.word_count
            && self.unique_stem_count <= self.stem_count
            && self
                .filtered_word_frequency
                .iter()
                .all(|(word, n)| n <= self.word_frequency.get(word.as_str()))
    }
}

/// Statistics for one document snapshot.
///
/// Built once by the engine and never mutated; corrections produce a new
/// record through [`StatisticsRecord::amended`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    #[serde(flatten)]
    meta: SnapshotMeta,
    #[serde(flatten)]
    structure: StructuralCounts,
    #[serde(flatten)]
    lexical: LexicalStats,
    #[serde(default)]
    corrections_applied: Vec<String>,
}

impl StatisticsRecord {
    /// Assembles a record from its three parts.
    pub fn new(meta: SnapshotMeta, structure: StructuralCounts, lexical: LexicalStats) -> Self {
        debug_assert!(structure.invariants_hold(), "equation count decomposition");
        debug_assert!(lexical.invariants_hold(), "lexical view invariants");
        Self {
            meta,
            structure,
            lexical,
            corrections_applied: Vec::new(),
        }
    }

    /// Returns a new record with replaced lexical statistics and the given
    /// correction descriptions appended to the audit list.
    pub fn amended<I>(&self, lexical: LexicalStats, applied: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        debug_assert!(lexical.invariants_hold(), "lexical view invariants");
        let mut corrections_applied = self.corrections_applied.clone();
        corrections_applied.extend(applied);
        Self {
            meta: self.meta.clone(),
            structure: self.structure.clone(),
            lexical,
            corrections_applied,
        }
    }

    /// Snapshot identity.
    #[inline]
    pub fn meta(&self) -> &SnapshotMeta {
        &self.meta
    }

    /// Structural counters.
    #[inline]
    pub fn structure(&self) -> &StructuralCounts {
        &self.structure
    }

    /// Lexical statistics.
    #[inline]
    pub fn lexical(&self) -> &LexicalStats {
        &self.lexical
    }

    /// Descriptions of the correction rules that changed this record.
    #[inline]
    pub fn corrections_applied(&self) -> &[String] {
        &self.corrections_applied
    }
}

/// Engine configuration.
///
/// Everything here is read once at start-up. Loading a config never touches
/// stopword files; that happens when the engine is built from it.
pub mod config {
    use std::fs;
    use std::path::{Path, PathBuf};

    use serde::{Deserialize, Serialize};

    use crate::error::ConfigError;

    /// Language used for stopwords and stemming.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Language {
        /// Portuguese.
        #[default]
        Portuguese,
        /// English.
        English,
        /// Spanish.
        Spanish,
        /// French.
        French,
        /// German.
        German,
        /// Italian.
        Italian,
    }

    impl core::fmt::Display for Language {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            let name = match self {
                Language::Portuguese => "portuguese",
                Language::English => "english",
                Language::Spanish => "spanish",
                Language::French => "french",
                Language::German => "german",
                Language::Italian => "italian",
            };
            f.write_str(name)
        }
    }

    /// Stemming algorithm.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum StemmerKind {
        /// Snowball stemmer for the configured language.
        #[default]
        Snowball,
        /// Removal Suffix Stemmer for Portuguese (Orengo & Huyck).
        Rslp,
    }

    /// A frequency fix-up applied after the lexical stats are built.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    pub enum CorrectionRule {
        /// Moves the count of `from` onto `to`.
        Rename {
            /// Key to remove.
            from: String,
            /// Key that receives the count.
            to: String,
        },
        /// Counts a multi-word phrase and takes that count away from its
        /// first word.
        Phrase {
            /// Whitespace-separated, lowercase words.
            phrase: String,
        },
    }

    impl CorrectionRule {
        /// Rejects rules with empty keys, a rename onto itself, or a key that
        /// must match tokens but is not lowercase.
        ///
        /// Tokens are lowercased before counting, so an uppercase `from` or
        /// phrase could never match. `to` may use any case.
        pub fn validate(&self) -> Result<(), ConfigError> {
            match self {
                CorrectionRule::Rename { from, to } => {
                    if from.is_empty() || to.is_empty() {
                        return Err(ConfigError::InvalidCorrection(format!(
                            "rename needs both keys: {self}"
                        )));
                    }
                    if has_uppercase(from) {
                        return Err(ConfigError::InvalidCorrection(format!(
                            "rename source must be lowercase: {self}"
                        )));
                    }
                    if from == to {
                        return Err(ConfigError::InvalidCorrection(format!(
                            "rename onto itself: {self}"
                        )));
                    }
                }
                CorrectionRule::Phrase { phrase } => {
                    if phrase.split_whitespace().count() < 2 {
                        return Err(ConfigError::InvalidCorrection(format!(
                            "phrase needs at least two words: {self}"
                        )));
                    }
                    if has_uppercase(phrase) {
                        return Err(ConfigError::InvalidCorrection(format!(
                            "phrase must be lowercase: {self}"
                        )));
                    }
                }
            }
            Ok(())
        }
    }

    fn has_uppercase(key: &str) -> bool {
        key.chars().any(char::is_uppercase)
    }

    impl core::fmt::Display for CorrectionRule {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            match self {
                CorrectionRule::Rename { from, to } => write!(f, "rename '{from}' -> '{to}'"),
                CorrectionRule::Phrase { phrase } => write!(f, "phrase '{phrase}'"),
            }
        }
    }

    /// Top-level analysis configuration.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AnalysisConfig {
        /// Language of the built-in stopword list and of the stemmer.
        pub language: Language,
        /// External stopword file, one word per line. Overrides the
        /// built-in list when set.
        pub stopwords_path: Option<PathBuf>,
        /// Single-character tokens that survive the single-letter filter.
        pub single_letter_whitelist: Vec<String>,
        /// Drop tokens with any non-alphabetic character.
        pub drop_non_alphabetic: bool,
        /// Drop single-character tokens not in the whitelist.
        pub drop_single_letters: bool,
        /// Language tag matched by the `\inputminted` cleaning pass.
        pub inputminted_language: String,
        /// Stemming algorithm.
        pub stemmer: StemmerKind,
        /// Length of ranked views in reports and rows.
        pub report_top_n: usize,
        /// Frequency corrections, applied in order.
        pub corrections: Vec<CorrectionRule>,
    }

    impl Default for AnalysisConfig {
        fn default() -> Self {
            Self {
                language: Language::Portuguese,
                stopwords_path: None,
                single_letter_whitelist: ["a", "e", "o", "é", "á", "à", "ó"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                drop_non_alphabetic: true,
                drop_single_letters: true,
                inputminted_language: String::from("python"),
                stemmer: StemmerKind::Snowball,
                report_top_n: 50,
                corrections: Vec::new(),
            }
        }
    }

    impl AnalysisConfig {
        /// Parses a TOML document. Missing fields take their defaults.
        pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
            let config: Self = toml::from_str(input)?;
            for rule in &config.corrections {
                rule.validate()?;
            }
            Ok(config)
        }

        /// Reads and parses a TOML file.
        ///
        /// A relative `stopwords_path` is resolved against the file's directory.
        pub fn load(path: &Path) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
                path: path.to_path_buf(),
                source,
            })?;
            let mut config = Self::from_toml_str(&content)?;
            if let (Some(stopwords), Some(dir)) = (&config.stopwords_path, path.parent()) {
                if stopwords.is_relative() {
                    config.stopwords_path = Some(dir.join(stopwords));
                }
            }
            Ok(config)
        }
    }
}

/// Error types.
pub mod error {
    use std::path::PathBuf;

    use thiserror::Error;

    /// Start-up failures. None of these can happen once an engine exists.
    #[derive(Debug, Error)]
    pub enum ConfigError {
        /// The config file could not be read.
        #[error("Failed to read config '{}': {source}", .path.display())]
        ReadConfig {
            /// Config file path.
            path: PathBuf,
            /// Underlying I/O error.
            source: std::io::Error,
        },

        /// The config file is not valid TOML for [`crate::AnalysisConfig`].
        #[error("Failed to parse config: {0}")]
        ParseConfig(#[from] toml::de::Error),

        /// The stopword file could not be read.
        #[error("Failed to read stopword list '{}': {source}", .path.display())]
        MissingStopwords {
            /// Stopword file path.
            path: PathBuf,
            /// Underlying I/O error.
            source: std::io::Error,
        },

        /// The stopword list contains no words.
        #[error("Stopword list is empty")]
        EmptyStopwords,

        /// A component has no data for the requested language.
        #[error("No {component} available for language '{language}'")]
        UnsupportedLanguage {
            /// Which component refused (stemmer, stopword list).
            component: &'static str,
            /// Requested language.
            language: crate::Language,
        },

        /// A pattern built from configuration did not compile.
        #[error("Invalid pattern '{pattern}': {reason}")]
        InvalidPattern {
            /// The offending pattern.
            pattern: String,
            /// Compiler message.
            reason: String,
        },

        /// A correction rule is malformed.
        #[error("Invalid correction rule: {0}")]
        InvalidCorrection(String),
    }

    /// Per-snapshot failures.
    #[derive(Debug, Error)]
    pub enum RecordError {
        /// The snapshot text is not valid UTF-8.
        #[error("Snapshot '{name}' is not valid UTF-8: {source}")]
        Encoding {
            /// Snapshot name.
            name: String,
            /// Decoding error.
            source: core::str::Utf8Error,
        },
    }
}

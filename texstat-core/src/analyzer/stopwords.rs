//! Stopword lists.
//!
//! A list is either built in (Portuguese and English ship with the crate)
//! or read from a plain text file with one word per line. Blank lines and
//! lines starting with `#` are ignored, and words are lowercased on load.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;
use texstat_types::{AnalysisConfig, ConfigError, Frequency, Language};

const PORTUGUESE: &str = include_str!("../../resources/stopwords/portuguese.txt");
const ENGLISH: &str = include_str!("../../resources/stopwords/english.txt");

/// A set of words excluded from the filtered frequency views.
#[derive(Debug, Clone)]
pub struct StopwordList {
    words: FxHashSet<String>,
}

impl StopwordList {
    /// The list named by the configuration: the file at `stopwords_path`
    /// when set, otherwise the built-in list for `language`.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        match &config.stopwords_path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(config.language),
        }
    }

    /// The list shipped with the crate for `language`.
    pub fn builtin(language: Language) -> Result<Self, ConfigError> {
        let content = match language {
            Language::Portuguese => PORTUGUESE,
            Language::English => ENGLISH,
            _ => {
                return Err(ConfigError::UnsupportedLanguage {
                    component: "built-in stopword list",
                    language,
                })
            }
        };
        Self::parse(content)
    }

    /// Reads a stopword file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::MissingStopwords {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses the one-word-per-line format.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::from_words(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Builds a list from words. Fails if there are none.
    pub fn from_words<I, S>(words: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: FxHashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        if words.is_empty() {
            return Err(ConfigError::EmptyStopwords);
        }
        Ok(Self { words })
    }

    /// Returns true if `word` is a stopword.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Copy of `freq` without stopword keys. Other counts are unchanged.
    pub fn remove_from(&self, freq: &Frequency<String>) -> Frequency<String> {
        freq.filtered(|word| !self.contains(word))
    }
}

//! Lexical aggregation.
//!
//! Cleaned text goes through tokenize, filter, count, stopword removal and
//! stemming. Every step preserves token order, so frequency ties always
//! rank by first appearance.

use texstat_types::{AnalysisConfig, ConfigError, Frequency, LexicalStats};

use crate::analyzer::stemmer::{self, Stemmer};
use crate::analyzer::{StopwordList, TokenFilter, WordTokenizer};

/// Output of [`Aggregator::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Filtered tokens in text order. Phrase corrections count over these.
    pub tokens: Vec<String>,
    /// The lexical half of a record.
    pub stats: LexicalStats,
}

/// Tokenizer, filter, stopwords and stemmer for one configuration.
pub struct Aggregator {
    tokenizer: WordTokenizer,
    filter: TokenFilter,
    stopwords: StopwordList,
    stemmer: Box<dyn Stemmer>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("filter", &self.filter)
            .field("stopwords", &self.stopwords.len())
            .field("stemmer", &self.stemmer.name())
            .finish()
    }
}

impl Aggregator {
    /// Assembles an aggregator from its parts.
    pub fn new(filter: TokenFilter, stopwords: StopwordList, stemmer: Box<dyn Stemmer>) -> Self {
        Self {
            tokenizer: WordTokenizer::new(),
            filter,
            stopwords,
            stemmer,
        }
    }

    /// Builds every part from the configuration. Loads the stopword file if
    /// one is configured.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            TokenFilter::from_config(config),
            StopwordList::from_config(config)?,
            stemmer::build(config.stemmer, config.language)?,
        ))
    }

    /// The stemmer in use.
    pub fn stemmer(&self) -> &dyn Stemmer {
        self.stemmer.as_ref()
    }

    /// The stopword list in use.
    pub fn stopwords(&self) -> &StopwordList {
        &self.stopwords
    }

    /// Lowercases and splits cleaned text.
    pub fn tokenize(&self, cleaned: &str) -> Vec<String> {
        self.tokenizer.tokens(cleaned)
    }

    /// Drops tokens rejected by the filter.
    pub fn filter_tokens(&self, tokens: Vec<String>) -> Vec<String> {
        self.filter.apply(tokens)
    }

    /// Stems each token, keeping order and duplicates.
    pub fn stem_all(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| self.stemmer.stem(t).into_owned())
            .collect()
    }

    /// Builds the lexical statistics of cleaned text.
    pub fn run(&self, cleaned: &str) -> Aggregation {
        let tokens = self.filter_tokens(self.tokenize(cleaned));
        let (word_count, unique_word_count) = count_words(&tokens);

        let word_frequency = Frequency::count(tokens.iter().cloned());
        let filtered_word_frequency = self.stopwords.remove_from(&word_frequency);

        let stems = self.stem_all(&tokens);
        let (stem_count, unique_stem_count) = count_words(&stems);

        let filtered_stem_frequency = Frequency::count(
            tokens
                .iter()
                .zip(&stems)
                .filter(|(token, _)| !self.stopwords.contains(token))
                .map(|(_, stem)| stem.clone()),
        );
        let stem_frequency = Frequency::count(stems);

        Aggregation {
            tokens,
            stats: LexicalStats {
                word_count,
                unique_word_count,
                stem_count,
                unique_stem_count,
                word_frequency,
                filtered_word_frequency,
                stem_frequency,
                filtered_stem_frequency,
            },
        }
    }
}

/// Returns `(total, distinct)` for a token sequence.
pub fn count_words(tokens: &[String]) -> (u64, u64) {
    let distinct: rustc_hash::FxHashSet<&str> = tokens.iter().map(String::as_str).collect();
    (tokens.len() as u64, distinct.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::stemmer::RslpStemmer;

    fn aggregator() -> Aggregator {
        Aggregator::new(
            TokenFilter::default(),
            StopwordList::from_words(["o", "a", "de"]).unwrap(),
            Box::new(RslpStemmer),
        )
    }

    #[test]
    fn counts_total_and_distinct() {
        let tokens: Vec<String> = ["a", "b", "a"].map(String::from).to_vec();
        assert_eq!(count_words(&tokens), (3, 2));
        assert_eq!(count_words(&[]), (0, 0));
    }

    #[test]
    fn simple_sentence() {
        let out = aggregator().run("O gato e o rato.");
        assert_eq!(out.tokens, vec!["o", "gato", "e", "o", "rato"]);
        let stats = &out.stats;
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.unique_word_count, 4);
        assert_eq!(stats.word_frequency.get("o"), 2);
        assert!(!stats.filtered_word_frequency.contains_key("o"));
        assert_eq!(stats.filtered_word_frequency.get("gato"), 1);
        assert_eq!(stats.filtered_word_frequency.get("e"), 1);
    }

    #[test]
    fn numbers_and_stray_letters_are_not_counted() {
        let out = aggregator().run("Em 2019 x foi v2 bom");
        assert_eq!(out.tokens, vec!["em", "foi", "bom"]);
        assert_eq!(out.stats.word_count, 3);
    }

    #[test]
    fn stems_are_counted_over_all_tokens() {
        let out = aggregator().run("meninas menino menina de");
        let stats = &out.stats;
        assert_eq!(stats.stem_count, 4);
        assert_eq!(stats.stem_frequency.get("menin"), 3);
        assert_eq!(stats.unique_stem_count, 2);
    }

    #[test]
    fn filtered_stems_skip_stopword_tokens() {
        let out = aggregator().run("de meninas de menino");
        let stats = &out.stats;
        assert_eq!(stats.filtered_stem_frequency.get("menin"), 2);
        assert!(!stats.filtered_stem_frequency.contains_key("de"));
        assert_eq!(stats.stem_frequency.get("de"), 2);
    }

    #[test]
    fn ties_rank_by_first_appearance() {
        let out = aggregator().run("zebra gato zebra gato rato");
        let ranked: Vec<&str> = out
            .stats
            .word_frequency
            .most_common(3)
            .into_iter()
            .map(|(w, _)| w.as_str())
            .collect();
        assert_eq!(ranked, vec!["zebra", "gato", "rato"]);
    }

    #[test]
    fn empty_text_gives_zero_stats() {
        let out = aggregator().run("");
        assert!(out.tokens.is_empty());
        assert_eq!(out.stats, LexicalStats::default());
    }

    #[test]
    fn views_satisfy_invariants() {
        let out = aggregator().run("O rato roeu a roupa do rei de Roma, e a rainha de raiva");
        assert!(out.stats.invariants_hold());
        assert_eq!(out.stats.word_frequency.total(), out.stats.word_count);
        assert_eq!(out.stats.stem_frequency.total(), out.stats.stem_count);
    }

    #[test]
    fn from_config_uses_builtin_stopwords() {
        let agg = Aggregator::from_config(&AnalysisConfig::default()).unwrap();
        assert!(agg.stopwords().contains("de"));
        assert_eq!(agg.stemmer().name(), "snowball");
    }
}

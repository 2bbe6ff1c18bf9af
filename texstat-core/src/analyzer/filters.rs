//! Token filters applied between tokenization and counting.

use rustc_hash::FxHashSet;
use texstat_types::AnalysisConfig;

/// Drops tokens that are not words of the prose.
///
/// Two independent rules, both on by default:
///
/// - tokens with any non-alphabetic character (`2019`, `v2`, `x_1`)
/// - single-character tokens outside a whitelist of real one-letter words
#[derive(Debug, Clone)]
pub struct TokenFilter {
    drop_non_alphabetic: bool,
    drop_single_letters: bool,
    whitelist: FxHashSet<String>,
}

impl Default for TokenFilter {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl TokenFilter {
    /// Creates a filter with explicit switches.
    pub fn new<I, S>(drop_non_alphabetic: bool, drop_single_letters: bool, whitelist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            drop_non_alphabetic,
            drop_single_letters,
            whitelist: whitelist.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a filter from the analysis configuration.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            config.drop_non_alphabetic,
            config.drop_single_letters,
            config.single_letter_whitelist.iter().cloned(),
        )
    }

    /// Returns true if `token` survives every enabled rule.
    #[inline]
    pub fn keeps(&self, token: &str) -> bool {
        if self.drop_non_alphabetic && !token.chars().all(char::is_alphabetic) {
            return false;
        }
        if self.drop_single_letters && is_single_char(token) && !self.whitelist.contains(token) {
            return false;
        }
        true
    }

    /// Keeps the surviving tokens, in order.
    pub fn apply(&self, mut tokens: Vec<String>) -> Vec<String> {
        tokens.retain(|t| self.keeps(t));
        tokens
    }
}

#[inline]
fn is_single_char(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some() && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn default_filter_drops_numbers_and_stray_letters() {
        let filter = TokenFilter::default();
        let kept = filter.apply(owned(&["o", "gato", "2019", "v2", "x", "é", "à"]));
        assert_eq!(kept, owned(&["o", "gato", "é", "à"]));
    }

    #[test]
    fn accented_words_are_alphabetic() {
        assert!(TokenFilter::default().keeps("ação"));
        assert!(TokenFilter::default().keeps("pôr"));
    }

    #[test]
    fn underscore_is_not_alphabetic() {
        assert!(!TokenFilter::default().keeps("x_1"));
        assert!(!TokenFilter::default().keeps("a_b"));
    }

    #[test]
    fn switches_are_independent() {
        let numbers_ok = TokenFilter::new(false, true, ["a"]);
        assert!(numbers_ok.keeps("2019"));
        assert!(!numbers_ok.keeps("x"));
        assert!(numbers_ok.keeps("a"));

        let letters_ok = TokenFilter::new(true, false, Vec::<String>::new());
        assert!(letters_ok.keeps("x"));
        assert!(!letters_ok.keeps("2019"));
    }

    #[test]
    fn multibyte_single_letter_counts_as_single() {
        let filter = TokenFilter::new(true, true, ["é"]);
        assert!(filter.keeps("é"));
        assert!(!filter.keeps("ç"));
    }

    #[test]
    fn single_digit_is_dropped_by_either_rule() {
        assert!(!TokenFilter::new(true, false, Vec::<String>::new()).keeps("7"));
        assert!(!TokenFilter::new(false, true, Vec::<String>::new()).keeps("7"));
    }
}

//! Word Tokenizer Module
//!
//! Splits cleaned LaTeX prose into word tokens. This is the first stage of
//! the lexical pipeline, run after the normalizer has removed equations,
//! labels and other non-prose constructs.
//!
//! ## What It Does
//!
//! A token is a maximal run of Unicode word characters, except for:
//!
//! - runs directly after `\`, which are command names (`\textbf`)
//! - runs directly after `{` or directly before `}`, which are usually
//!   arguments of surviving commands (`\emph{x}`, `\begin{itemize}`)
//!
//! Given lowercase input like `"o \emph{gato} dorme"`, it emits:
//!
//! ```ignore
//! ("o", 0)
//! ("dorme", 1)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use texstat_core::analyzer::tokenizer::WordTokenizer;
//!
//! let tokenizer = WordTokenizer::new();
//!
//! // Callback receives: text (&str), position (u32)
//! tokenizer.tokenize("o gato dorme", |text, position| {
//!     // text="o"/"gato"/"dorme", position=0/1/2
//! });
//!
//! // Or lowercase and collect owned tokens in one go
//! assert_eq!(tokenizer.tokens("O Gato"), vec!["o", "gato"]);
//! ```
//!
//! ## The Input Contract
//!
//! [`WordTokenizer::tokenize`] does not change case; callers that want
//! case-insensitive counts lowercase first, as [`WordTokenizer::tokens`]
//! does.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

/// Splits text into word tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Creates a tokenizer.
    pub const fn new() -> Self {
        Self
    }

    /// Emits each token with its position among emitted tokens.
    ///
    /// Tokens are slices of `text`; nothing is allocated.
    #[inline]
    pub fn tokenize<'t, F>(&self, text: &'t str, mut emit: F)
    where
        F: FnMut(&'t str, u32),
    {
        let bytes = text.as_bytes();
        let mut position = 0u32;
        for m in WORD.find_iter(text) {
            if m.start() > 0 && matches!(bytes[m.start() - 1], b'\\' | b'{') {
                continue;
            }
            if bytes.get(m.end()) == Some(&b'}') {
                continue;
            }
            emit(m.as_str(), position);
            position += 1;
        }
    }

    /// Lowercases `text` and returns its tokens in order.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut out = Vec::new();
        self.tokenize(&lowered, |token, _| out.push(token.to_owned()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(String, u32)> {
        let mut out = Vec::new();
        WordTokenizer::new().tokenize(text, |t, pos| out.push((t.to_owned(), pos)));
        out
    }

    #[test]
    fn splits_on_non_word_characters() {
        let toks = collect("olá, mundo! ação-reação");
        let words: Vec<&str> = toks.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(words, vec!["olá", "mundo", "ação", "reação"]);
    }

    #[test]
    fn positions_are_sequential() {
        let toks = collect("a b \\x c");
        let positions: Vec<u32> = toks.iter().map(|(_, p)| *p).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn skips_command_names() {
        let toks = WordTokenizer::new().tokens(r"\textbf negrito \item lista");
        assert_eq!(toks, vec!["negrito", "lista"]);
    }

    #[test]
    fn skips_brace_adjacent_runs() {
        let toks = WordTokenizer::new().tokens(r"\begin{itemize} o \emph{gato} {dorme} bem");
        assert_eq!(toks, vec!["o", "bem"]);
    }

    #[test]
    fn only_first_or_last_word_in_braces_is_dropped() {
        let toks = WordTokenizer::new().tokens(r"\caption{uma figura bonita}");
        assert_eq!(toks, vec!["figura"]);
    }

    #[test]
    fn lowercases_before_splitting() {
        let toks = WordTokenizer::new().tokens("Água ÉPOCA Ótimo");
        assert_eq!(toks, vec!["água", "época", "ótimo"]);
    }

    #[test]
    fn digits_are_word_characters() {
        let toks = WordTokenizer::new().tokens("em 2019 e v2");
        assert_eq!(toks, vec!["em", "2019", "e", "v2"]);
    }

    #[test]
    fn empty_and_whitespace_inputs() {
        assert!(WordTokenizer::new().tokens("").is_empty());
        assert!(WordTokenizer::new().tokens("  \n\t ").is_empty());
    }
}

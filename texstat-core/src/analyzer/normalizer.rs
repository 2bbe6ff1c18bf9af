//! LaTeX Normalizer Module
//!
//! Turns raw LaTeX source into two things: comment-free source for the
//! structure counters and cleaned prose for the word statistics.
//!
//! ## Comments
//!
//! [`strip_comments`] cuts every line at its first `%` that is not written
//! as `\%`. Line breaks are kept, so line-oriented patterns downstream see
//! the same layout as the source.
//!
//! ## Cleaning Passes
//!
//! [`LatexNormalizer::clean_text`] runs the [`CleaningPass`]es in a fixed
//! order. The passes do not commute: a label is removed before the dollar
//! pass so that a `$` inside `\label{...}` cannot open a bogus equation
//! that swallows the following prose. [`CleaningPass::CANONICAL`] is the
//! order every record is built with; [`LatexNormalizer::with_passes`]
//! exists so that order can be inspected and tested.
//!
//! ## Usage
//!
//! ```rust
//! use texstat_core::analyzer::normalizer::{strip_comments, LatexNormalizer};
//!
//! let normalizer = LatexNormalizer::new("python").unwrap();
//! let source = strip_comments("Veja \\label{x}a figura. % TODO\n");
//! assert_eq!(normalizer.clean_text(&source), "Veja a figura. \n");
//! ```

use std::borrow::Cow;

use memchr::memchr_iter;
use regex::Regex;
use smallvec::SmallVec;
use texstat_types::{ConfigError, StructuralCounts};

use crate::analyzer::patterns;
use crate::analyzer::structure;

/// Removes LaTeX line comments.
///
/// `\%` is an escaped percent sign and is kept. Idempotent.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::new();
    strip_comments_into(input, &mut out);
    out
}

/// Like [`strip_comments`], writing into an existing buffer.
///
/// Clears the buffer before writing and reuses its capacity.
pub fn strip_comments_into(input: &str, out: &mut String) {
    out.clear();
    out.reserve(input.len());

    let mut first = true;
    for line in input.split('\n') {
        if !first {
            out.push('\n');
        }
        first = false;
        let cut = comment_start(line.as_bytes()).unwrap_or(line.len());
        out.push_str(&line[..cut]);
    }
}

/// Byte offset of the first unescaped `%` in a line.
#[inline]
fn comment_start(line: &[u8]) -> Option<usize> {
    memchr_iter(b'%', line).find(|&i| i == 0 || line[i - 1] != b'\\')
}

/// One substitution step of the cleaning pipeline.
///
/// Each pass deletes every match of its pattern. Input is comment-free
/// text; output has no match of the pass's pattern left, unless a later
/// match only forms after an earlier one was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleaningPass {
    /// `\includegraphics[opts]{path}`.
    IncludeGraphics,
    /// `\label{...}`. Must precede [`CleaningPass::UnnumberedEquation`],
    /// label keys may contain `$`.
    Label,
    /// `\index{...}`.
    Index,
    /// `\cite{...}` and `\citeauthor{...}`.
    Citation,
    /// `\ref` and `\autoref` with their optional groups.
    CrossReference,
    /// `$...$` and `$$...$$`, then `\(...\)`, then `\[...\]`.
    UnnumberedEquation,
    /// Whole `equation` environments. An environment without its `\end`
    /// is left in place.
    EquationEnvironment,
    /// `\inputminted{<language>}{...}` for the configured language only.
    InputMinted,
    /// Whole `subfigure` environments, captions included.
    Subfigure,
}

impl CleaningPass {
    /// The order records are built with.
    pub const CANONICAL: [CleaningPass; 9] = [
        CleaningPass::IncludeGraphics,
        CleaningPass::Label,
        CleaningPass::Index,
        CleaningPass::Citation,
        CleaningPass::CrossReference,
        CleaningPass::UnnumberedEquation,
        CleaningPass::EquationEnvironment,
        CleaningPass::InputMinted,
        CleaningPass::Subfigure,
    ];

    /// Short stable name, used in traces.
    pub const fn name(self) -> &'static str {
        match self {
            CleaningPass::IncludeGraphics => "includegraphics",
            CleaningPass::Label => "label",
            CleaningPass::Index => "index",
            CleaningPass::Citation => "cite",
            CleaningPass::CrossReference => "ref",
            CleaningPass::UnnumberedEquation => "unnumbered equations",
            CleaningPass::EquationEnvironment => "equation environments",
            CleaningPass::InputMinted => "inputminted",
            CleaningPass::Subfigure => "subfigures",
        }
    }
}

/// Comment stripping, structure counting and prose cleaning for one
/// configuration.
///
/// Immutable after construction and safe to share across threads.
#[derive(Debug, Clone)]
pub struct LatexNormalizer {
    passes: SmallVec<[CleaningPass; 16]>,
    inputminted: Regex,
}

impl LatexNormalizer {
    /// Creates a normalizer using the canonical pass order.
    ///
    /// `inputminted_language` is matched literally.
    pub fn new(inputminted_language: &str) -> Result<Self, ConfigError> {
        let inputminted =
            patterns::inputminted(inputminted_language).map_err(|err| {
                ConfigError::InvalidPattern {
                    pattern: inputminted_language.to_owned(),
                    reason: err.to_string(),
                }
            })?;
        Ok(Self {
            passes: SmallVec::from_slice(&CleaningPass::CANONICAL),
            inputminted,
        })
    }

    /// Replaces the pass sequence. Passes may repeat or be left out.
    pub fn with_passes<I>(mut self, passes: I) -> Self
    where
        I: IntoIterator<Item = CleaningPass>,
    {
        self.passes = passes.into_iter().collect();
        self
    }

    /// The passes [`clean_text`](Self::clean_text) runs, in order.
    pub fn passes(&self) -> &[CleaningPass] {
        &self.passes
    }

    /// Counts markup in comment-free text.
    pub fn analyze_structure(&self, comment_free: &str) -> StructuralCounts {
        structure::analyze(comment_free)
    }

    /// Runs every cleaning pass over comment-free text.
    pub fn clean_text(&self, comment_free: &str) -> String {
        self.clean_text_traced(comment_free, |_, _| {})
    }

    /// Like [`clean_text`](Self::clean_text), handing the text to `trace`
    /// after each pass.
    pub fn clean_text_traced<F>(&self, comment_free: &str, mut trace: F) -> String
    where
        F: FnMut(CleaningPass, &str),
    {
        let mut text = comment_free.to_owned();
        for &pass in &self.passes {
            let next = match self.apply(pass, &text) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            if let Some(next) = next {
                text = next;
            }
            trace(pass, &text);
        }
        text
    }

    /// Strips comments, then returns the structure counts and cleaned text.
    pub fn run(&self, raw: &str) -> (StructuralCounts, String) {
        let comment_free = strip_comments(raw);
        let counts = self.analyze_structure(&comment_free);
        let cleaned = self.clean_text(&comment_free);
        (counts, cleaned)
    }

    fn apply<'t>(&self, pass: CleaningPass, text: &'t str) -> Cow<'t, str> {
        match pass {
            CleaningPass::IncludeGraphics => patterns::INCLUDEGRAPHICS.replace_all(text, ""),
            CleaningPass::Label => patterns::LABEL.replace_all(text, ""),
            CleaningPass::Index => patterns::INDEX.replace_all(text, ""),
            CleaningPass::Citation => patterns::CITATION.replace_all(text, ""),
            CleaningPass::CrossReference => patterns::CROSS_REFERENCE.replace_all(text, ""),
            CleaningPass::UnnumberedEquation => {
                let text = patterns::DOLLAR_EQUATION.replace_all(text, "");
                let text = erase(&patterns::PAREN_EQUATION, text);
                erase(&patterns::BRACKET_EQUATION, text)
            }
            CleaningPass::EquationEnvironment => patterns::EQUATION_ENV.replace_all(text, ""),
            CleaningPass::InputMinted => self.inputminted.replace_all(text, ""),
            CleaningPass::Subfigure => patterns::SUBFIGURE_ENV.replace_all(text, ""),
        }
    }
}

/// Deletes matches of `re`, keeping the input allocation when nothing matched.
fn erase<'t>(re: &Regex, text: Cow<'t, str>) -> Cow<'t, str> {
    match text {
        Cow::Borrowed(s) => re.replace_all(s, ""),
        Cow::Owned(s) => {
            let replaced = match re.replace_all(&s, "") {
                Cow::Owned(r) => Some(r),
                Cow::Borrowed(_) => None,
            };
            Cow::Owned(replaced.unwrap_or(s))
        }
    }
}

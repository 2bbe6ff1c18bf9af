//! Compiled LaTeX patterns shared by structure counting and cleaning.
//!
//! All patterns are heuristics over flat text: braces are matched lazily,
//! environments end at the first matching `\end`, and nothing nests.

use std::sync::LazyLock;

use regex::Regex;

/// Any `\command`, including its backslash.
pub(crate) static COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\w+").expect("valid command regex"));

/// `\begin{name}` with an optional `[...]` before the brace group. Captures
/// `name` without a trailing star, so `figure*` counts toward `figure_count`.
pub(crate) static ENVIRONMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\begin(?:\[.*?\])?\{(\w+)\*?\}").expect("valid environment regex")
});

/// A whole `figure` environment, up to the first `\end{figure}`.
pub(crate) static FIGURE_ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\begin\{figure\*?\}.*?\\end\{figure\*?\}").expect("valid figure regex")
});

/// A whole `subfigure` environment.
pub(crate) static SUBFIGURE_ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\begin\{subfigure\*?\}.*?\\end\{subfigure\*?\}")
        .expect("valid subfigure regex")
});

/// A whole `equation` environment.
pub(crate) static EQUATION_ENV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\begin\{equation\*?\}.*?\\end\{equation\*?\}")
        .expect("valid equation regex")
});

/// Start of an `equation` environment.
pub(crate) static EQUATION_BEGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\begin\{equation\*?\}").expect("valid equation regex"));

/// Start of a `subequations` environment.
pub(crate) static SUBEQUATIONS_BEGIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\begin\{subequations?\*?\}").expect("valid subequations regex")
});

/// `$...$` and `$$...$$` in one pattern, so a stray single `$` costs at most
/// one bad match instead of flipping every later pair.
pub(crate) static DOLLAR_EQUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$?\$.+?\$\$?").expect("valid dollar regex"));

/// `\( ... \)` on a single line.
pub(crate) static PAREN_EQUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\(.+?\\\)").expect("valid paren regex"));

/// `\[ ... \]`, possibly spanning lines.
pub(crate) static BRACKET_EQUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\\[.*?\\\]").expect("valid bracket regex"));

/// `\cite` or `\citeauthor` with an optional key group, captured with its
/// braces. `\b` keeps `\citep` and friends out.
pub(crate) static CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\cite(?:author)?\b(\{.*?\})?").expect("valid cite regex"));

/// `\includegraphics[...]{...}`.
pub(crate) static INCLUDEGRAPHICS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\includegraphics(?:\[.*?\])?\{.*?\}").expect("valid includegraphics regex")
});

/// `\label{...}`.
pub(crate) static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\label\{.*?\}").expect("valid label regex"));

/// `\index{...}`.
pub(crate) static INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\index\{.*?\}").expect("valid index regex"));

/// `\ref` or `\autoref` with optional `[...]` and `{...}` groups.
pub(crate) static CROSS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:auto)?ref\b(?:\[.*?\])?(?:\{.*?\})?").expect("valid ref regex")
});

/// Builds the `\inputminted{<language>}{...}` pattern for one literal tag.
pub(crate) fn inputminted(language: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"\\inputminted\{{{}\}}\{{.*?\}}",
        regex::escape(language)
    ))
}

//! Structure counting module.
//!
//! Counts sectioning, floats, equations, references and citations in
//! comment-free LaTeX. Every number is a pattern-match count: a command
//! inside a verbatim block counts the same as one in prose.
//!
//! Command keys keep their backslash (`\section`), environment keys do not
//! (`figure`). Starred environments fold into their base name.

use texstat_types::{Frequency, StructuralCounts};

use crate::analyzer::patterns;

/// Counts markup in comment-free text.
///
/// # Example
///
/// ```
/// use texstat_core::analyzer::structure::analyze;
///
/// let counts = analyze(r"\chapter{Intro} \section{A} \section*{B} $x$");
/// assert_eq!(counts.chapter_count, 1);
/// assert_eq!(counts.section_count, 2);
/// assert_eq!(counts.dollar_equation_count, 1);
/// ```
pub fn analyze(text: &str) -> StructuralCounts {
    let commands = command_frequency(text);
    let environments = environment_frequency(text);

    let display_equation_count = count(&patterns::BRACKET_EQUATION, text);
    let equation_environment_count = count(&patterns::EQUATION_BEGIN, text);

    StructuralCounts {
        part_count: commands.get(r"\part"),
        chapter_count: commands.get(r"\chapter"),
        section_count: commands.get(r"\section"),
        subsection_count: commands.get(r"\subsection"),
        subsubsection_count: commands.get(r"\subsubsection"),
        page_cross_ref_count: commands.get(r"\pageref"),
        other_cross_ref_count: commands.get(r"\ref") + commands.get(r"\autoref"),
        figure_count: environments.get("figure"),
        subfigure_count: environments.get("subfigure"),
        display_equation_count,
        equation_environment_count,
        equation_count: display_equation_count + equation_environment_count,
        inline_equation_count: count(&patterns::PAREN_EQUATION, text),
        dollar_equation_count: count(&patterns::DOLLAR_EQUATION, text),
        subequation_count: count(&patterns::SUBEQUATIONS_BEGIN, text),
        listing_count: environments.get("listing"),
        table_count: environments.get("table"),
        includegraphics_count: commands.get(r"\includegraphics"),
        inputminted_count: commands.get(r"\inputminted"),
        citation_count: commands.get(r"\cite") + commands.get(r"\citeauthor"),
        index_count: commands.get(r"\index"),
        footnote_count: commands.get(r"\footnote"),
        subfigures_per_figure: subfigures_per_figure(text),
        citation_keys_used: citation_keys(text),
        command_frequency: commands,
        environment_frequency: environments,
    }
}

/// `\command` -> occurrences, in first-seen order.
pub fn command_frequency(text: &str) -> Frequency<String> {
    Frequency::count(
        patterns::COMMAND
            .find_iter(text)
            .map(|m| m.as_str().to_owned()),
    )
}

/// Environment name -> number of `\begin`s.
pub fn environment_frequency(text: &str) -> Frequency<String> {
    Frequency::count(
        patterns::ENVIRONMENT
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned()),
    )
}

/// Histogram of how many subfigures each figure holds.
///
/// A figure ends at its first `\end{figure}`; nested figures are not
/// supported.
pub fn subfigures_per_figure(text: &str) -> Frequency<u64> {
    Frequency::count(
        patterns::FIGURE_ENV
            .find_iter(text)
            .map(|figure| patterns::SUBFIGURE_ENV.find_iter(figure.as_str()).count() as u64),
    )
}

/// Key groups of `\cite`/`\citeauthor`, braces included, in source order.
///
/// A citation without a key group contributes `""`.
pub fn citation_keys(text: &str) -> Vec<String> {
    patterns::CITATION
        .captures_iter(text)
        .map(|caps| caps.get(1).map_or_else(String::new, |m| m.as_str().to_owned()))
        .collect()
}

#[inline]
fn count(re: &regex::Regex, text: &str) -> u64 {
    re.find_iter(text).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIGURE_WITH_TWO_SUBFIGURES: &str = r"\begin{figure}[h]
\begin{subfigure}{.5\textwidth}\includegraphics{a.png}\end{subfigure}
\begin{subfigure}{.5\textwidth}\includegraphics{b.png}\end{subfigure}
\caption{Duas imagens}
\end{figure}";

    #[test]
    fn figure_with_two_subfigures() {
        let counts = analyze(FIGURE_WITH_TWO_SUBFIGURES);
        assert_eq!(counts.figure_count, 1);
        assert_eq!(counts.subfigure_count, 2);
        assert_eq!(counts.includegraphics_count, 2);
        assert_eq!(counts.subfigures_per_figure.get(&2u64), 1);
        assert_eq!(counts.subfigures_per_figure.len(), 1);
    }

    #[test]
    fn figure_without_subfigures_counts_zero_bucket() {
        let text = "\\begin{figure}\\includegraphics{x}\\end{figure}\n\\begin{figure*}\\end{figure*}";
        let counts = analyze(text);
        assert_eq!(counts.figure_count, 2);
        assert_eq!(counts.subfigures_per_figure.get(&0u64), 2);
    }

    #[test]
    fn citations_and_their_keys() {
        let counts = analyze(r"\cite{a} e \citeauthor{b, c} e \cite sem chave");
        assert_eq!(counts.citation_count, 3);
        assert_eq!(counts.citation_keys_used, vec!["{a}", "{b, c}", ""]);
    }

    #[test]
    fn repeated_citation_keys_keep_order() {
        let counts = analyze(r"\cite{A}\citeauthor{B}\cite{A}");
        assert_eq!(counts.citation_count, 3);
        assert_eq!(counts.citation_keys_used, vec!["{A}", "{B}", "{A}"]);
    }

    #[test]
    fn sectioning_commands() {
        let text = r"\part{I}\chapter{A}\section{B}\subsection{C}\subsection*{D}\subsubsection{E}";
        let counts = analyze(text);
        assert_eq!(counts.part_count, 1);
        assert_eq!(counts.chapter_count, 1);
        assert_eq!(counts.section_count, 1);
        assert_eq!(counts.subsection_count, 2);
        assert_eq!(counts.subsubsection_count, 1);
    }

    #[test]
    fn longer_commands_do_not_count_as_prefixes() {
        let counts = analyze(r"\partial \sections \chapterx");
        assert_eq!(counts.part_count, 0);
        assert_eq!(counts.section_count, 0);
        assert_eq!(counts.chapter_count, 0);
        assert_eq!(counts.command_frequency.get(r"\partial"), 1);
    }

    #[test]
    fn equations_are_decomposed() {
        let text = "\\[a\\]\n\\begin{equation}b\\end{equation}\n\\begin{equation*}c\\end{equation*}\n\\(d\\) $e$ $$f$$\n\\begin{subequations}\\end{subequations}";
        let counts = analyze(text);
        assert_eq!(counts.display_equation_count, 1);
        assert_eq!(counts.equation_environment_count, 2);
        assert_eq!(counts.equation_count, 3);
        assert_eq!(counts.inline_equation_count, 1);
        assert_eq!(counts.dollar_equation_count, 2);
        assert_eq!(counts.subequation_count, 1);
        assert!(counts.invariants_hold());
    }

    #[test]
    fn references_split_by_kind() {
        let counts = analyze(r"\ref{a} \autoref{b} \pageref{c} \ref{d}");
        assert_eq!(counts.other_cross_ref_count, 3);
        assert_eq!(counts.page_cross_ref_count, 1);
    }

    #[test]
    fn floats_and_listings() {
        let text = r"\begin{table}[t]\end{table}\begin{listing}\inputminted{python}{a.py}\end{listing}\footnote{x}\index{y}";
        let counts = analyze(text);
        assert_eq!(counts.table_count, 1);
        assert_eq!(counts.listing_count, 1);
        assert_eq!(counts.inputminted_count, 1);
        assert_eq!(counts.footnote_count, 1);
        assert_eq!(counts.index_count, 1);
    }

    #[test]
    fn starred_environments_fold_into_base_name() {
        let env = environment_frequency(r"\begin{table*}\begin{table}\begin[x]{itemize}");
        assert_eq!(env.get("table"), 2);
        assert_eq!(env.get("itemize"), 1);
        assert!(!env.contains_key("table*"));
    }

    #[test]
    fn command_totals_match_frequency() {
        let counts = analyze(r"\a \b \a \begin{x}");
        assert_eq!(counts.command_total(), 4);
        assert_eq!(counts.environment_total(), 1);
    }
}

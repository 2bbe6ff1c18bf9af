use std::sync::LazyLock;

use proptest::prelude::*;
use texstat_core::analyzer::{strip_comments, TokenFilter, WordTokenizer};
use texstat_core::{AnalysisConfig, SnapshotMeta, StatsPipeline};

static PIPELINE: LazyLock<StatsPipeline> =
    LazyLock::new(|| StatsPipeline::new(&AnalysisConfig::default()).unwrap());

/// Prose with enough LaTeX punctuation to hit every pattern.
fn latexish() -> impl Strategy<Value = String> {
    let pieces = prop_oneof![
        "[a-záéãçõ]{1,8}",
        Just(" ".to_string()),
        Just("\n".to_string()),
        Just("%".to_string()),
        Just(r"\%".to_string()),
        Just("$".to_string()),
        Just(r"\section{".to_string()),
        Just(r"\label{".to_string()),
        Just(r"\cite{".to_string()),
        Just(r"\ref{".to_string()),
        Just(r"\begin{figure}".to_string()),
        Just(r"\end{figure}".to_string()),
        Just(r"\begin{subfigure}".to_string()),
        Just(r"\end{subfigure}".to_string()),
        Just(r"\[".to_string()),
        Just(r"\]".to_string()),
        Just("}".to_string()),
        Just("{".to_string()),
        "[0-9]{1,3}",
    ];
    prop::collection::vec(pieces, 0..60).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn stripping_comments_is_idempotent(text in latexish()) {
        let once = strip_comments(&text);
        prop_assert_eq!(strip_comments(&once), once.clone());
        prop_assert_eq!(once.matches('\n').count(), text.matches('\n').count());
    }

    #[test]
    fn tokens_are_plain_words(text in latexish()) {
        let mut tokens = Vec::new();
        WordTokenizer::new().tokenize(&text, |t, _| tokens.push(t));
        for token in tokens {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn filtering_never_adds_tokens(tokens in prop::collection::vec("[a-zé0-9_]{1,4}", 0..40)) {
        let filter = TokenFilter::default();
        let kept = filter.apply(tokens.clone());
        prop_assert!(kept.len() <= tokens.len());
        prop_assert!(kept.iter().all(|t| filter.keeps(t)));
        let mut rest = tokens.iter();
        prop_assert!(kept.iter().all(|t| rest.any(|u| u == t)));
    }

    #[test]
    fn record_views_stay_consistent(text in latexish()) {
        let record = PIPELINE.build_record(&text, SnapshotMeta::new("p"));
        let lex = record.lexical();
        prop_assert!(lex.invariants_hold());
        prop_assert_eq!(lex.word_frequency.total(), lex.word_count);
        prop_assert_eq!(lex.word_frequency.len() as u64, lex.unique_word_count);
        prop_assert_eq!(lex.stem_count, lex.word_count);
        prop_assert!(lex.filtered_stem_frequency.total() <= lex.stem_frequency.total());
        prop_assert!(record.structure().invariants_hold());
    }

    #[test]
    fn records_are_deterministic(text in latexish()) {
        let a = PIPELINE.build_record(&text, SnapshotMeta::new("p"));
        let b = PIPELINE.build_record(&text, SnapshotMeta::new("p"));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn cleaning_accepts_any_text(text in any::<String>()) {
        let normalizer = PIPELINE.normalizer();
        let cleaned = normalizer.clean_text(&strip_comments(&text));
        prop_assert!(cleaned.len() <= text.len());
    }
}

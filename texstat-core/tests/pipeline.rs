//! End-to-end runs over a small thesis chapter.

use std::fs;

use texstat_core::stats::report::{self, COLUMNS};
use texstat_core::{AnalysisConfig, Report, SnapshotMeta, StatisticsRecord, StatsPipeline};

const THESIS: &str = include_str!("data/thesis.tex");
const DEMO_CONFIG: &str = include_str!("../../demos/thesis.toml");

fn build(config: &AnalysisConfig, text: &str) -> StatisticsRecord {
    StatsPipeline::new(config)
        .unwrap()
        .build_record(text, SnapshotMeta::new("cap1"))
}

fn default_record() -> StatisticsRecord {
    build(&AnalysisConfig::default(), THESIS)
}

#[test]
fn sectioning_skips_commented_lines() {
    let record = default_record();
    let s = record.structure();
    assert_eq!(s.chapter_count, 1);
    assert_eq!(s.section_count, 1);
    assert!(!record.lexical().word_frequency.contains_key("fantasma"));
}

#[test]
fn floats_and_subfigure_histogram() {
    let s = default_record().structure().clone();
    assert_eq!(s.figure_count, 1);
    assert_eq!(s.subfigure_count, 2);
    assert_eq!(s.includegraphics_count, 2);
    assert_eq!(s.subfigures_per_figure.get(&2u64), 1);
    assert_eq!(s.subfigures_per_figure.len(), 1);
    assert_eq!(s.listing_count, 1);
    assert_eq!(s.inputminted_count, 1);
}

#[test]
fn equations_and_references() {
    let s = default_record().structure().clone();
    assert_eq!(s.equation_environment_count, 1);
    assert_eq!(s.display_equation_count, 1);
    assert_eq!(s.equation_count, 2);
    assert_eq!(s.dollar_equation_count, 1);
    assert_eq!(s.page_cross_ref_count, 1);
    assert_eq!(s.other_cross_ref_count, 1);
    assert_eq!(s.footnote_count, 1);
    assert!(s.invariants_hold());
}

#[test]
fn citation_keys_in_source_order() {
    let s = default_record().structure().clone();
    assert_eq!(s.citation_count, 2);
    assert_eq!(s.citation_keys_used, vec!["{silva2019}", "{maxwell1867}"]);
}

#[test]
fn markup_never_reaches_word_counts() {
    let record = default_record();
    let words = &record.lexical().word_frequency;
    for markup in ["label", "cite", "silva2019", "ref", "includegraphics", "tau", "begin"] {
        assert!(!words.contains_key(markup), "{markup} was counted as a word");
    }
    assert!(record.structure().command_frequency.get(r"\label") >= 2);
    assert!(words.get("micelas") >= 3);
}

#[test]
fn stopwords_only_leave_the_filtered_views() {
    let lex = default_record().lexical().clone();
    assert!(lex.word_frequency.contains_key("e"));
    assert!(lex.word_frequency.contains_key("na"));
    assert!(!lex.filtered_word_frequency.contains_key("e"));
    assert!(!lex.filtered_word_frequency.contains_key("na"));
    assert!(lex.invariants_hold());
    assert_eq!(lex.word_frequency.total(), lex.word_count);
    assert_eq!(lex.stem_frequency.total(), lex.stem_count);
}

#[test]
fn same_input_same_record() {
    let pipeline = StatsPipeline::new(&AnalysisConfig::default()).unwrap();
    let a = pipeline.build_record(THESIS, SnapshotMeta::new("cap1"));
    let b = pipeline.build_record(THESIS, SnapshotMeta::new("cap1"));
    assert_eq!(a, b);
}

#[test]
fn empty_input_gives_zero_record() {
    let record = build(&AnalysisConfig::default(), "");
    assert_eq!(record.lexical().word_count, 0);
    assert_eq!(record.lexical().stem_count, 0);
    assert_eq!(record.structure().figure_count, 0);
    assert!(record.structure().subfigures_per_figure.is_empty());
    assert!(record.structure().citation_keys_used.is_empty());
}

#[test]
fn demo_config_parses_and_corrects() {
    let config = AnalysisConfig::from_toml_str(DEMO_CONFIG).unwrap();
    assert_eq!(config.corrections.len(), 2);

    let plain = default_record();
    let corrected = build(&config, THESIS);
    let before = &plain.lexical().word_frequency;
    let after = &corrected.lexical().word_frequency;

    assert_eq!(after.get("NaSal"), before.get("nasal"));
    assert!(!after.contains_key("nasal"));
    assert_eq!(after.get("micelas gigantes"), 2);
    assert_eq!(after.get("micelas"), before.get("micelas") - 2);
    assert_eq!(after.get("gigantes"), before.get("gigantes"));
    assert_eq!(corrected.corrections_applied().len(), 2);
    assert_eq!(corrected.lexical().word_count, plain.lexical().word_count);
    assert_eq!(corrected.structure(), plain.structure());
}

#[test]
fn config_file_resolves_stopwords_next_to_it() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stop.txt"), "# minhas\nmicelas\n").unwrap();
    let config_path = dir.path().join("texstat.toml");
    fs::write(&config_path, "stopwords_path = \"stop.txt\"\nstemmer = \"rslp\"\n").unwrap();

    let config = AnalysisConfig::load(&config_path).unwrap();
    let record = build(&config, THESIS);
    let lex = record.lexical();
    assert!(!lex.filtered_word_frequency.contains_key("micelas"));
    assert!(lex.filtered_word_frequency.contains_key("e"));
    assert!(lex.word_frequency.contains_key("micelas"));
}

#[test]
fn broken_config_is_rejected() {
    assert!(AnalysisConfig::from_toml_str("stemmer = \"porter\"").is_err());
    assert!(AnalysisConfig::from_toml_str("[[corrections]]\nkind = \"phrase\"\nphrase = \"x\"\n").is_err());

    let dir = tempfile::tempdir().unwrap();
    let config = AnalysisConfig {
        stopwords_path: Some(dir.path().join("missing.txt")),
        ..AnalysisConfig::default()
    };
    assert!(StatsPipeline::new(&config).is_err());
}

#[test]
fn renderings_agree() {
    let record = default_record();

    let text = Report::new(&record, 5).to_string();
    assert!(text.starts_with("Stats for cap1"));
    assert!(text.contains("figures: 1"));

    let mut csv = Vec::new();
    report::write_csv(std::slice::from_ref(&record), 5, &mut csv).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_slice());
    assert_eq!(reader.headers().unwrap().len(), COLUMNS.len());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[0], "cap1");
    assert_eq!(row[4], record.lexical().word_count.to_string());

    let json = report::to_json(&record).unwrap();
    let parsed: StatisticsRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

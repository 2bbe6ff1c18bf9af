//! Record renderings.
//!
//! - [`Report`]: multi-line text report, one section per topic
//! - [`to_row`]: flat `(column, value)` pairs in [`COLUMNS`] order
//! - [`write_csv`]: one header plus one row per record
//! - [`to_json`]: the full record, including every frequency map

use std::fmt;
use std::io;

use chrono::DateTime;
use csv::WriterBuilder;
use texstat_types::{Frequency, StatisticsRecord};

/// Column names of [`to_row`], in order.
pub const COLUMNS: [&str; 41] = [
    "filename",
    "commit_hash",
    "description",
    "date",
    "word_count",
    "unique_word_count",
    "stem_count",
    "unique_stem_count",
    "parts",
    "chapters",
    "sections",
    "subsections",
    "subsubsections",
    "page_cross_references",
    "figure_table_listing_cross_references",
    "figures",
    "subfigures",
    "subfigures_in_figures",
    "includegraphics",
    "equations",
    "display_equations",
    "equation_environments",
    "inline_equations",
    "dollar_equations",
    "subequations",
    "listings",
    "inputminted",
    "tables",
    "citations",
    "index_entries",
    "footnotes",
    "citation_keys",
    "latex_command_count",
    "latex_commands",
    "latex_env_count",
    "latex_environments",
    "most_common_words",
    "most_common_nonstopping_words",
    "most_common_stems",
    "most_common_nonstopping_stems",
    "corrections_applied",
];

/// Human-readable report of one record.
///
/// ```
/// use texstat_core::{Report, SnapshotMeta, StatsPipeline, AnalysisConfig};
///
/// let pipeline = StatsPipeline::new(&AnalysisConfig::default()).unwrap();
/// let record = pipeline.build_record(r"\section{A} Texto.", SnapshotMeta::new("tese"));
/// let text = Report::new(&record, 10).to_string();
/// assert!(text.starts_with("Stats for tese"));
/// assert!(text.contains("sections: 1"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    record: &'a StatisticsRecord,
    top_n: usize,
}

impl<'a> Report<'a> {
    /// Reports `record`, showing `top_n` entries of each ranked view.
    pub fn new(record: &'a StatisticsRecord, top_n: usize) -> Self {
        Self { record, top_n }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.record.meta();
        let s = self.record.structure();
        let lex = self.record.lexical();

        writeln!(
            f,
            "Stats for {} - commit {} - description - {} - date {}",
            meta.name,
            meta.commit_hash,
            meta.description,
            format_date(meta.date)
        )?;
        writeln!(f, "word count: {}", lex.word_count)?;
        writeln!(f, "unique word count: {}", lex.unique_word_count)?;
        writeln!(f, "stem count: {}", lex.stem_count)?;
        writeln!(f, "unique stem count: {}", lex.unique_stem_count)?;

        writeln!(f, "--- Sectioning of the text ---")?;
        writeln!(f, "parts: {}", s.part_count)?;
        writeln!(f, "chapters: {}", s.chapter_count)?;
        writeln!(f, "sections: {}", s.section_count)?;
        writeln!(f, "subsections: {}", s.subsection_count)?;
        writeln!(f, "subsubsections: {}", s.subsubsection_count)?;

        writeln!(f, "--- Referencing ---")?;
        writeln!(f, "page cross references: {}", s.page_cross_ref_count)?;
        writeln!(
            f,
            "figure/table/listing cross references: {}",
            s.other_cross_ref_count
        )?;

        writeln!(f, "--- Floats ---")?;
        writeln!(f, "figures: {}", s.figure_count)?;
        writeln!(f, "subfigures: {}", s.subfigure_count)?;
        writeln!(f, "subfigures in figures: {}", s.subfigures_per_figure)?;
        writeln!(f, "includegraphics: {}", s.includegraphics_count)?;
        writeln!(
            f,
            "equations: {} (display {}, environments {}; inline {}, dollar {}, subequations {})",
            s.equation_count,
            s.display_equation_count,
            s.equation_environment_count,
            s.inline_equation_count,
            s.dollar_equation_count,
            s.subequation_count
        )?;
        writeln!(f, "listings: {}", s.listing_count)?;
        writeln!(f, "inputminted: {}", s.inputminted_count)?;
        writeln!(f, "tables: {}", s.table_count)?;

        writeln!(f, "--- Bibliographic stuff ---")?;
        writeln!(f, "citations: {}", s.citation_count)?;
        writeln!(f, "index entries: {}", s.index_count)?;
        writeln!(f, "footnotes: {}", s.footnote_count)?;
        writeln!(f, "citation keys: {}", s.citation_keys_used.join(" "))?;

        writeln!(f, "--- LaTeX stuff ---")?;
        writeln!(f, "count of latex commands: {}", s.command_total())?;
        writeln!(f, "latex commands: {}", s.command_frequency)?;
        writeln!(f, "count of latex environments: {}", s.environment_total())?;
        writeln!(f, "latex environments: {}", s.environment_frequency)?;

        writeln!(f, "--- Most common words ---")?;
        writeln!(f, "most common words:\n {}", ranked(&lex.word_frequency, self.top_n))?;
        writeln!(
            f,
            "most common interesting words:\n {}",
            ranked(&lex.filtered_word_frequency, self.top_n)
        )?;
        writeln!(f, "most common stems:\n {}", ranked(&lex.stem_frequency, self.top_n))?;
        writeln!(
            f,
            "most common nonstopping stems:\n {}",
            ranked(&lex.filtered_stem_frequency, self.top_n)
        )?;

        let applied = self.record.corrections_applied();
        if !applied.is_empty() {
            writeln!(f, "--- Corrections ---")?;
            for rule in applied {
                writeln!(f, "{rule}")?;
            }
        }
        Ok(())
    }
}

/// Flattens a record into `(column, value)` pairs in [`COLUMNS`] order.
pub fn to_row(record: &StatisticsRecord, top_n: usize) -> Vec<(&'static str, String)> {
    let meta = record.meta();
    let s = record.structure();
    let lex = record.lexical();

    let values = [
        meta.name.clone(),
        meta.commit_hash.clone(),
        meta.description.clone(),
        format_date(meta.date),
        lex.word_count.to_string(),
        lex.unique_word_count.to_string(),
        lex.stem_count.to_string(),
        lex.unique_stem_count.to_string(),
        s.part_count.to_string(),
        s.chapter_count.to_string(),
        s.section_count.to_string(),
        s.subsection_count.to_string(),
        s.subsubsection_count.to_string(),
        s.page_cross_ref_count.to_string(),
        s.other_cross_ref_count.to_string(),
        s.figure_count.to_string(),
        s.subfigure_count.to_string(),
        s.subfigures_per_figure.to_string(),
        s.includegraphics_count.to_string(),
        s.equation_count.to_string(),
        s.display_equation_count.to_string(),
        s.equation_environment_count.to_string(),
        s.inline_equation_count.to_string(),
        s.dollar_equation_count.to_string(),
        s.subequation_count.to_string(),
        s.listing_count.to_string(),
        s.inputminted_count.to_string(),
        s.table_count.to_string(),
        s.citation_count.to_string(),
        s.index_count.to_string(),
        s.footnote_count.to_string(),
        s.citation_keys_used.join(" "),
        s.command_total().to_string(),
        s.command_frequency.to_string(),
        s.environment_total().to_string(),
        s.environment_frequency.to_string(),
        ranked(&lex.word_frequency, top_n),
        ranked(&lex.filtered_word_frequency, top_n),
        ranked(&lex.stem_frequency, top_n),
        ranked(&lex.filtered_stem_frequency, top_n),
        record.corrections_applied().join("; "),
    ];
    COLUMNS.into_iter().zip(values).collect()
}

/// Writes a header and one row per record.
pub fn write_csv<W: io::Write>(
    records: &[StatisticsRecord],
    top_n: usize,
    writer: W,
) -> Result<(), csv::Error> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(COLUMNS)?;
    for record in records {
        out.write_record(to_row(record, top_n).into_iter().map(|(_, value)| value))?;
    }
    out.flush()?;
    Ok(())
}

/// Pretty-printed JSON of a record.
pub fn to_json(record: &StatisticsRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

/// `[(key, n), ...]` for the `n` highest counts.
fn ranked(freq: &Frequency<String>, n: usize) -> String {
    let items: Vec<String> = freq
        .most_common(n)
        .into_iter()
        .map(|(key, count)| format!("({key:?}, {count})"))
        .collect();
    format!("[{}]", items.join(", "))
}

/// RFC 2822 for a Unix timestamp; unset dates (0) render empty.
fn format_date(secs: i64) -> String {
    if secs == 0 {
        return String::new();
    }
    DateTime::from_timestamp(secs, 0).map_or_else(|| secs.to_string(), |dt| dt.to_rfc2822())
}

#[cfg(test)]
mod tests {
    use super::*;
    use texstat_types::{LexicalStats, SnapshotMeta, StructuralCounts};

    fn record() -> StatisticsRecord {
        let tokens = ["de", "gato", "de", "rato", "gato", "de"].map(String::from);
        let word_frequency = Frequency::count(tokens.iter().cloned());
        let lexical = LexicalStats {
            word_count: 6,
            unique_word_count: 3,
            filtered_word_frequency: word_frequency.filtered(|w| w != "de"),
            word_frequency,
            ..LexicalStats::default()
        };
        let structure = StructuralCounts {
            section_count: 2,
            citation_keys_used: vec!["{a}".into(), String::new()],
            ..StructuralCounts::default()
        };
        let meta = SnapshotMeta::new("tese")
            .with_commit("abc123")
            .with_date(1_577_836_800)
            .with_description("primeira versão");
        StatisticsRecord::new(meta, structure, lexical)
    }

    #[test]
    fn report_has_every_section() {
        let text = Report::new(&record(), 2).to_string();
        for header in [
            "--- Sectioning of the text ---",
            "--- Referencing ---",
            "--- Floats ---",
            "--- Bibliographic stuff ---",
            "--- LaTeX stuff ---",
            "--- Most common words ---",
        ] {
            assert!(text.contains(header), "missing {header}");
        }
        assert!(text.starts_with("Stats for tese - commit abc123 - description - primeira versão"));
        assert!(text.contains("sections: 2"));
        assert!(!text.contains("--- Corrections ---"));
    }

    #[test]
    fn ranked_views_are_truncated() {
        let text = Report::new(&record(), 1).to_string();
        assert!(text.contains("most common words:\n [(\"de\", 3)]"));
        assert!(text.contains("most common interesting words:\n [(\"gato\", 2)]"));
    }

    #[test]
    fn row_follows_column_order() {
        let row = to_row(&record(), 50);
        let names: Vec<&str> = row.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, COLUMNS.to_vec());
        assert_eq!(row[0].1, "tese");
        assert_eq!(row[4].1, "6");
    }

    #[test]
    fn dates_render_as_rfc2822() {
        let date = format_date(1_577_836_800);
        assert!(date.starts_with("Wed, "));
        assert!(date.ends_with("Jan 2020 00:00:00 +0000"));
        assert_eq!(format_date(0), "");
    }

    #[test]
    fn csv_has_header_and_one_line_per_record() {
        let mut buf = Vec::new();
        write_csv(&[record(), record()], 5, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let header = reader.headers().unwrap().clone();
        assert_eq!(header.len(), COLUMNS.len());
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn json_round_trips() {
        let original = record();
        let json = to_json(&original).unwrap();
        let parsed: StatisticsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}

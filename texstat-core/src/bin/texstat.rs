//! LaTeX Statistics Tool
//!
//! This binary builds statistics records for a LaTeX document: sectioning,
//! floats, equations, references, command usage and word frequencies. It is
//! meant to be run once per revision of a thesis or paper, so the rows can
//! be collected into a time series.
//!
//! ## What It Builds
//!
//! 1. **Combined snapshot**: every `.tex` file under the input directory,
//!    sorted by path and joined with newlines, as one record named `all`
//! 2. **Per-file snapshots** (`--per-file`): one record per file, built in
//!    parallel
//!
//! ## Usage
//!
//! ```bash
//! # Text report for a thesis directory
//! ./target/release/texstat thesis/
//!
//! # CSV row for this revision, tagged with the commit
//! ./target/release/texstat thesis/ --format csv --commit "$(git rev-parse HEAD)" \
//!     --date "$(git log -1 --format=%ct)" -o stats.csv
//!
//! # Custom stopwords, stemmer and corrections
//! ./target/release/texstat thesis/ --config demos/thesis.toml
//!
//! # Dump the text after every cleaning pass
//! ./target/release/texstat thesis/ --trace passes.txt
//! ```
//!
//! ## Logging
//!
//! Progress goes to stderr through `tracing`. `RUST_LOG=debug` shows
//! per-stage timings and every applied correction.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use texstat_core::analyzer::normalizer::strip_comments;
use texstat_core::stats::report;
use texstat_core::{AnalysisConfig, Report, SnapshotMeta, StatisticsRecord, StatsPipeline};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const COMBINED_NAME: &str = "all";
const TRACE_WIDTH: usize = 80;

#[derive(Parser, Debug)]
#[command(name = "texstat", version, about = "Structural and lexical statistics for LaTeX sources")]
struct Cli {
    /// A `.tex` file, or a directory searched recursively for `.tex` files
    input: PathBuf,

    /// Analysis config (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also emit one record per file
    #[arg(long)]
    per_file: bool,

    /// Commit hash of this revision
    #[arg(long, default_value = "")]
    commit: String,

    /// Revision date as Unix seconds
    #[arg(long, default_value_t = 0)]
    date: i64,

    /// Free-form revision description
    #[arg(long, default_value = "")]
    description: String,

    /// Length of ranked views; overrides `report_top_n` from the config
    #[arg(long)]
    top: Option<usize>,

    /// Write the combined text after each cleaning pass to this file
    #[arg(long, value_name = "FILE")]
    trace: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
    Csv,
}

struct Source {
    name: String,
    bytes: Vec<u8>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    let top_n = cli.top.unwrap_or(config.report_top_n);
    let pipeline = StatsPipeline::new(&config).context("Failed to set up analysis")?;

    let sources = load_sources(&cli.input)?;
    let total_bytes: u64 = sources.iter().map(|s| s.bytes.len() as u64).sum();
    info!(
        files = sources.len(),
        size = %fmt_bytes(total_bytes),
        "loaded sources"
    );

    let meta = |name: &str| {
        SnapshotMeta::new(name)
            .with_commit(&cli.commit)
            .with_date(cli.date)
            .with_description(&cli.description)
    };

    let started = Instant::now();

    let combined = sources
        .iter()
        .map(|s| s.bytes.as_slice())
        .collect::<Vec<_>>()
        .join(&b'\n');
    let all = match &cli.trace {
        Some(path) => {
            let text = str::from_utf8(&combined).context("Combined sources are not valid UTF-8")?;
            build_traced(&pipeline, text, meta(COMBINED_NAME), path)?
        }
        None => pipeline.build_record_from_bytes(&combined, meta(COMBINED_NAME))?,
    };

    let mut records = vec![all];
    if cli.per_file {
        let per_file: Vec<StatisticsRecord> = sources
            .par_iter()
            .filter_map(
                |source| match pipeline.build_record_from_bytes(&source.bytes, meta(&source.name)) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        warn!(error = %err, "skipping snapshot");
                        None
                    }
                },
            )
            .collect();
        records.extend(per_file);
    }

    for record in &records {
        let lex = record.lexical();
        info!(
            snapshot = %record.meta().name,
            words = %fmt_count(lex.word_count),
            unique = %fmt_count(lex.unique_word_count),
            sections = record.structure().section_count,
            figures = record.structure().figure_count,
            "record built"
        );
    }
    let elapsed = started.elapsed();
    info!(
        records = records.len(),
        elapsed = ?elapsed,
        throughput = %fmt_rate(total_bytes, elapsed),
        "analysis finished"
    );

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };
    match cli.format {
        Format::Text => {
            for record in &records {
                writeln!(out, "{}", Report::new(record, top_n))?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &records)?;
            writeln!(out)?;
        }
        Format::Csv => report::write_csv(&records, top_n, &mut out)?,
    }
    out.flush()?;

    Ok(())
}

/// Reads every `.tex` file under `input`, sorted by path.
fn load_sources(input: &Path) -> Result<Vec<Source>> {
    let files = collect_tex_files(input)?;
    if files.is_empty() {
        bail!("No .tex files found under {}", input.display());
    }
    files
        .into_iter()
        .map(|path| {
            let bytes =
                fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            let name = path
                .strip_prefix(input)
                .ok()
                .filter(|rel| !rel.as_os_str().is_empty())
                .unwrap_or(path.as_path())
                .display()
                .to_string();
            Ok(Source { name, bytes })
        })
        .collect()
}

/// `.tex` files under `input` in path order. Symlinks are not followed, so
/// a link back up the tree cannot repeat a file.
fn collect_tex_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", input.display()))?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "tex") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Builds the record while writing the text before and after every pass.
fn build_traced(
    pipeline: &StatsPipeline,
    text: &str,
    meta: SnapshotMeta,
    path: &Path,
) -> Result<StatisticsRecord> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create trace file: {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write_section(&mut out, "original", text)?;
    write_section(&mut out, "without comments", &strip_comments(text))?;

    let mut status: io::Result<()> = Ok(());
    let record = pipeline.build_record_traced(text, meta, |pass, cleaned| {
        if status.is_ok() {
            status = write_section(&mut out, pass.name(), cleaned);
        }
    });
    status?;
    out.flush()?;

    info!(path = %path.display(), "wrote cleaning trace");
    Ok(record)
}

fn write_section<W: Write>(out: &mut W, title: &str, text: &str) -> io::Result<()> {
    let rule = "-".repeat(TRACE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{title:^width$}", width = TRACE_WIDTH)?;
    writeln!(out, "{rule}")?;
    out.write_all(text.as_bytes())?;
    writeln!(out)
}

fn fmt_rate(bytes: u64, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return String::from("-");
    }
    format!("{}/s", fmt_bytes((bytes as f64 / secs) as u64))
}

fn fmt_bytes(b: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = b as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{b} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// `1234567` as `1_234_567`.
fn fmt_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.char_indices() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out
}

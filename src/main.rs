// docdigest command line: summarize one file or a directory of files.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use docdigest::input::{is_supported, read_document};
use docdigest::{engine_from_config, Config, DocumentReport, DocumentSummarizer, Level, Sentiment};

#[derive(Parser)]
#[command(name = "docdigest", about = "Summaries, keywords and sentiment for documents")]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Skip the external summarizer and use TextRank only
    #[arg(long, global = true)]
    no_external: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Summarize {
        file: PathBuf,
        /// short, medium or detailed
        #[arg(short, long, default_value = "medium")]
        level: String,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long, default_value = "medium")]
        level: String,
        #[arg(short, long, default_value = "docdigest_reports.json")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Batch reports are labelled relative to the scanned directory, since
/// bare file names can repeat across subdirectories.
fn batch_label(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.to_string_lossy().to_string(),
        _ => file_label(path),
    }
}

fn print_report(report: &DocumentReport, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        Format::Text => {
            let mut stdout = StandardStream::stdout(ColorChoice::Auto);
            let color = match report.sentiment {
                Sentiment::Positive => Color::Green,
                Sentiment::Negative => Color::Red,
                Sentiment::Neutral => Color::Yellow,
            };
            stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            writeln!(stdout, "[{}]", report.sentiment)?;
            stdout.reset()?;
            write!(stdout, "{}", report.render_text())?;
        }
    }
    Ok(())
}

fn summarize_file(engine: &DocumentSummarizer, file: &Path, level: Level, format: Format) -> Result<()> {
    let text = read_document(file).with_context(|| format!("failed to read {}", file.display()))?;
    let report = DocumentReport::build(&file_label(file), &text, level, engine);
    info!(source = ?report.source, words = report.original_words, "summarized {}", file.display());
    print_report(&report, format)
}

fn summarize_dir(engine: &DocumentSummarizer, dir: &Path, level: Level, out: &Path) -> Result<()> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_supported(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let reports: Vec<DocumentReport> = files
        .par_iter()
        .filter_map(|p| {
            let report = match read_document(p) {
                Ok(text) => Some(DocumentReport::build(&batch_label(dir, p), &text, level, engine)),
                Err(e) => {
                    warn!(error = %e, "skipping {}", p.display());
                    None
                }
            };
            pb.inc(1);
            report
        })
        .collect();

    pb.finish_with_message("summarizing files");

    let fout = File::create(out)?;
    serde_json::to_writer_pretty(fout, &reports)?;
    println!("Wrote {} reports to {}", reports.len(), out.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.no_external {
        config.external.enabled = false;
    }
    let engine = engine_from_config(&config);

    match cli.command {
        Commands::Summarize { file, level, format } => {
            summarize_file(&engine, &file, Level::parse(&level), format)?
        }
        Commands::Batch { dir, level, out } => summarize_dir(&engine, &dir, Level::parse(&level), &out)?,
    }
    Ok(())
}

//! Quantview CLI - notebook/CSV viewing and export tool
//!
//! The command-line view boundary of the pipeline: renders uploaded
//! notebooks and CSV files to standalone HTML, previews them in the
//! terminal, and packages guide documents.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use quantview_core::{FileKind, JsonMetadataStore, MetadataStore, RatingSummary};
use quantview_render::{export_file, package_guide, preview_file, Preview};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Binary size scales, largest first.
const BYTE_UNITS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

/// Format bytes as a human-readable size (e.g., "1.5 MB")
fn format_bytes(bytes: u64) -> String {
    for (scale, unit) in BYTE_UNITS {
        if bytes >= scale {
            return format!("{:.1} {unit}", bytes as f64 / scale as f64);
        }
    }
    format!("{bytes} bytes")
}

/// Generate smart output path from an input file.
///
/// Given "analysis.ipynb", returns "analysis.html" in the same directory.
fn smart_output_path(input: &Path) -> PathBuf {
    input.with_extension("html")
}

#[derive(Parser, Debug)]
#[command(
    name = "quantview",
    about = "View and export notebook/CSV uploads as standalone HTML",
    long_about = "View and export notebook/CSV uploads.\n\
                  \n\
                  Renders .ipynb notebooks and .csv datasets to self-contained HTML\n\
                  documents, previews them in the terminal, and packages admin guide\n\
                  documents. .xlsx and .parquet are recognized but download-only.",
    version
)]
struct Cli {
    /// Suppress status output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Status lines are printed unless `-q` is given.
    fn show_status(&self) -> bool {
        !self.quiet
    }

    /// Extra processing detail is printed only with `-v`.
    fn trace_steps(&self) -> bool {
        self.verbose
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export a notebook or CSV file to a standalone HTML document
    #[command(long_about = "Export a notebook or CSV file to standalone HTML.\n\
                      \n\
                      The document inlines its own styling and references no external\n\
                      state, so it opens in any browser tab as-is.\n\
                      \n\
                      Examples:\n\
                        quantview export analysis.ipynb\n\
                        quantview export returns.csv -o report.html")]
    Export {
        /// Input file (.ipynb or .csv)
        input: PathBuf,

        /// Output file (default: input with .html extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Preview a notebook or CSV file in the terminal
    #[command(long_about = "Preview a notebook or CSV file in the terminal.\n\
                      \n\
                      Notebooks print their rendered cell fragment; CSV files print an\n\
                      aligned table capped at 50 rows with a 'showing N of M rows' line.")]
    Preview {
        /// Input file (.ipynb or .csv)
        input: PathBuf,
    },

    /// Package a guide document for standalone viewing
    #[command(long_about = "Package an admin-authored guide document.\n\
                      \n\
                      Content that already is a complete HTML document passes through\n\
                      unchanged; a fragment is wrapped in the standalone shell. Guide\n\
                      HTML is embedded raw (admin-authored content is trusted).")]
    Guide {
        /// Input HTML file (fragment or complete document)
        input: PathBuf,

        /// Output file (default: input with .html extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document title when wrapping a fragment (default: file stem)
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },

    /// List a model's files and rating summary from a metadata JSON file
    #[command(long_about = "List the files attached to a model.\n\
                      \n\
                      Reads a metadata JSON file (the local stand-in for the external\n\
                      metadata store) and prints each file record plus the model's\n\
                      mean rating.")]
    Catalog {
        /// Metadata JSON file
        metadata: PathBuf,

        /// Model identifier
        model: String,
    },

    /// List recognized file extensions and preview support
    Formats {
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for quantview.\n\
                      \n\
                      Examples:\n\
                        quantview completion bash > /usr/local/etc/bash_completion.d/quantview\n\
                        quantview completion zsh > ~/.zsh/completions/_quantview")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let show_status = cli.show_status();
    let trace_steps = cli.trace_steps();

    match cli.command {
        Commands::Export { input, output } => cmd_export(&input, output, show_status, trace_steps),
        Commands::Preview { input } => cmd_preview(&input),
        Commands::Guide {
            input,
            output,
            title,
        } => cmd_guide(&input, output, title, show_status),
        Commands::Catalog { metadata, model } => cmd_catalog(&metadata, &model),
        Commands::Formats { json } => cmd_formats(json),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "quantview", &mut io::stdout());
            Ok(())
        }
    }
}

fn cmd_export(
    input: &Path,
    output: Option<PathBuf>,
    show_status: bool,
    trace_steps: bool,
) -> Result<()> {
    let output = output.unwrap_or_else(|| smart_output_path(input));

    if trace_steps {
        eprintln!("Rendering {} ...", input.display());
    }

    let html = export_file(input)
        .with_context(|| format!("Failed to export {}", input.display()))?;

    fs::write(&output, &html)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if show_status {
        println!(
            "{} {} {} {} ({})",
            "Exported".green().bold(),
            input.display(),
            "->".dimmed(),
            output.display(),
            format_bytes(html.len() as u64)
        );
    }
    Ok(())
}

fn cmd_preview(input: &Path) -> Result<()> {
    let preview = preview_file(input)
        .with_context(|| format!("Failed to preview {}", input.display()))?;

    match preview {
        Preview::Notebook(html) => println!("{html}"),
        Preview::Tabular(table) => {
            print_text_table(&table.headers, &table.rows);
            println!("{}", table.summary().dimmed());
        }
    }
    Ok(())
}

/// Print rows as a column-aligned text table with a header separator.
fn print_text_table(headers: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in rows {
        for (i, field) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(field.len());
            } else {
                widths.push(field.len());
            }
        }
    }

    print_text_row(headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    print_text_row(&rule, &widths);
    for row in rows {
        print_text_row(row, &widths);
    }
}

fn print_text_row(fields: &[String], widths: &[usize]) {
    let cells: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let field = fields.get(i).map_or("", String::as_str);
            format!("{field:<w$}")
        })
        .collect();
    println!("| {} |", cells.join(" | "));
}

fn cmd_guide(
    input: &Path,
    output: Option<PathBuf>,
    title: Option<String>,
    show_status: bool,
) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let title = title.unwrap_or_else(|| {
        input
            .file_stem()
            .map_or_else(|| "Guide".to_string(), |s| s.to_string_lossy().into_owned())
    });

    let packaged = package_guide(&content, &title);
    let passthrough = packaged == content;

    let output = output.unwrap_or_else(|| smart_output_path(input));
    fs::write(&output, &packaged)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if show_status {
        let mode = if passthrough {
            "passed through"
        } else {
            "wrapped"
        };
        println!(
            "{} {} ({mode}) {} {}",
            "Packaged".green().bold(),
            input.display(),
            "->".dimmed(),
            output.display()
        );
    }
    Ok(())
}

fn cmd_catalog(metadata: &Path, model: &str) -> Result<()> {
    let store = JsonMetadataStore::from_path(metadata)
        .with_context(|| format!("Failed to load metadata from {}", metadata.display()))?;

    let files = store.files_for_model(model)?;
    let summary = RatingSummary::from_scores(&store.ratings_for_model(model)?);

    if files.is_empty() {
        println!("No files for model {model}");
    }
    for file in &files {
        let preview_marker = match FileKind::from_path(&file.name) {
            Some(kind) if kind.supports_inline_preview() => "previewable".green(),
            Some(_) => "download-only".yellow(),
            None => "unrecognized".red(),
        };
        println!(
            "{}  {}  {}  uploaded by {} on {}",
            file.name.bold(),
            format_bytes(file.size),
            preview_marker,
            file.uploader_display_name,
            file.created_at.format("%Y-%m-%d")
        );
        if !file.description.is_empty() {
            println!("    {}", file.description.dimmed());
        }
    }

    match summary.average {
        Some(avg) => println!(
            "Rating: {:.1} ({} {})",
            avg,
            summary.count,
            if summary.count == 1 { "rating" } else { "ratings" }
        ),
        None => println!("Rating: no ratings yet"),
    }
    Ok(())
}

fn cmd_formats(json: bool) -> Result<()> {
    let kinds = [
        FileKind::Notebook,
        FileKind::Csv,
        FileKind::Xlsx,
        FileKind::Parquet,
    ];

    if json {
        let entries: Vec<serde_json::Value> = kinds
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "kind": kind.to_string(),
                    "extension": kind.extension(),
                    "inline_preview": kind.supports_inline_preview(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{:<12} {:<10} PREVIEW", "KIND", "EXTENSION");
    for kind in kinds {
        let preview = if kind.supports_inline_preview() {
            "inline".green()
        } else {
            "download-only".yellow()
        };
        println!("{:<12} .{:<9} {}", kind.to_string(), kind.extension(), preview);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_output_path() {
        assert_eq!(
            smart_output_path(Path::new("analysis.ipynb")),
            PathBuf::from("analysis.html")
        );
        assert_eq!(
            smart_output_path(Path::new("data/returns.csv")),
            PathBuf::from("data/returns.html")
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(1_572_864), "1.5 MB");
        assert_eq!(format_bytes(2 * (1 << 30)), "2.0 GB");
    }

    #[test]
    fn test_output_flags() {
        let quiet = Cli::parse_from(["quantview", "-q", "formats"]);
        assert!(!quiet.show_status());

        let verbose = Cli::parse_from(["quantview", "-v", "formats"]);
        assert!(verbose.show_status());
        assert!(verbose.trace_steps());

        let plain = Cli::parse_from(["quantview", "formats"]);
        assert!(plain.show_status());
        assert!(!plain.trace_steps());
    }

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }
}

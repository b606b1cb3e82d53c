//! pdftoc CLI - PDF title and outline extraction tool

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdftoc::batch::{self, BatchOptions, BatchOutcome};
use pdftoc::{
    render, summarize_file_with_options, JsonFormat, LopdfSource, ParseOptions, PdfSource,
};

#[derive(Parser)]
#[command(name = "pdftoc")]
#[command(version)]
#[command(about = "Extract a title and heading outline from PDF documents", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (single PDF) or directory (batch)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    extract: ExtractArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize every PDF in a directory into one JSON file each
    Batch {
        /// Directory containing PDFs
        #[arg(short, long, value_name = "DIR", env = "PDFTOC_INPUT", default_value = batch::DEFAULT_INPUT_DIR)]
        input: PathBuf,

        /// Directory receiving JSON records
        #[arg(short, long, value_name = "DIR", env = "PDFTOC_OUTPUT", default_value = batch::DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Print the JSON outline of one PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Print a plain-text table of contents
    Toc {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Flags shared by every summarizing command.
#[derive(Args, Clone, Copy, Default)]
struct ExtractArgs {
    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Group glyph baselines into buckets of this height (round(y / EPS)) instead of exact matching
    #[arg(long, value_name = "EPS")]
    tolerance: Option<f32>,

    /// Fail a document if any page cannot be read
    #[arg(long)]
    strict: bool,
}

impl ExtractArgs {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if let Some(eps) = self.tolerance {
            options = options.with_line_tolerance(eps);
        }
        if self.strict {
            options = options.strict();
        }
        options
    }

    fn format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            sequential,
            extract,
        }) => cmd_batch(&input, &output, sequential, extract),
        Some(Commands::Outline {
            input,
            output,
            extract,
        }) => cmd_outline(&input, output.as_deref(), extract),
        Some(Commands::Toc { input, extract }) => cmd_toc(&input, extract),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            // Default behavior: directory => batch, file => single record
            Some(input) if input.is_dir() => {
                let output = cli
                    .output
                    .unwrap_or_else(|| PathBuf::from(batch::DEFAULT_OUTPUT_DIR));
                cmd_batch(&input, &output, false, cli.extract)
            }
            Some(input) => cmd_outline(&input, cli.output.as_deref(), cli.extract),
            None => {
                println!("{}", "Usage: pdftoc <INPUT> [OUTPUT]".yellow());
                println!("       pdftoc --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    extract: ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let parse = extract.parse_options().with_parallel(!sequential);
    let options = BatchOptions::new(input, output)
        .with_format(extract.format())
        .with_parse_options(parse);

    let total = batch::collect_inputs(input)?.len();
    if total == 0 {
        println!("{} {}", "No PDF files in".yellow(), input.display());
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = batch::process_dir_with_progress(&options, |entry| {
        let name = entry
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    println!();
    for entry in &report.entries {
        let name = entry.input.display();
        match &entry.outcome {
            BatchOutcome::Summarized { title, entries } => {
                println!("  {} {} ({}, {} headings)", "✓".green(), name, title, entries)
            }
            BatchOutcome::Placeholder { reason } => {
                println!("  {} {} ({})", "!".yellow(), name, reason.dimmed())
            }
            BatchOutcome::WriteFailed { error } => {
                println!("  {} {} ({})", "✗".red(), name, error)
            }
        }
    }

    println!(
        "\n{} {} summarized, {} placeholders, {} write failures -> {}",
        "Done!".green().bold(),
        report.summarized(),
        report.placeholders(),
        report.write_failures(),
        output.display()
    );

    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    extract: ExtractArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("Summarizing {}", input.display());
    // Unreadable documents yield the placeholder record
    let result = pdftoc::process_file(input, extract.parse_options());
    let json = render::to_json(&result, extract.format())?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_toc(input: &Path, extract: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let result = summarize_file_with_options(input, extract.parse_options())?;
    print!("{}", render::to_toc(&result));
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = LopdfSource::load_file(input)?;
    let options = ParseOptions::new();
    let content = pdftoc::parser::extract_content(&source, &options)?;
    let result = pdftoc::summarize_content(&content, &options);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), source.version());
    println!("{}: {}", "Pages".bold(), source.page_count());
    if let Some(ref title) = content.metadata_title {
        println!("{}: {}", "Metadata title".bold(), title);
    }
    let bookmarks: usize = content.bookmarks.iter().map(|b| b.total_nodes()).sum();
    println!("{}: {}", "Bookmarks".bold(), bookmarks);

    println!();
    println!("{}", "Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Resolved title".bold(), result.title);
    println!("{}: {}", "Glyphs".bold(), content.glyph_count());
    println!("{}: {}", "Outline entries".bold(), result.outline.len());
    let from_bookmarks = !pdftoc::outline::flatten_bookmarks(&content.bookmarks).is_empty();
    println!(
        "{}: {}",
        "Outline source".bold(),
        if from_bookmarks { "bookmarks" } else { "content" }
    );
    let levels: BTreeSet<_> = result.outline.iter().map(|e| e.level).collect();
    println!("{}: {}", "Heading levels".bold(), levels.len());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdftoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and outline extraction");
}

//! pdfoutline CLI - infer PDF titles and heading outlines

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{find_pdf_files, process_directory_with_progress};
use pdfoutline::render::{self, JsonFormat};
use pdfoutline::{BatchOptions, ClassifierConfig, ExtractOptions, FragmentExtractor, Outline, OutlineClassifier};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(version)]
#[command(about = "Infer a PDF's title and heading outline", long_about = None)]
struct Cli {
    /// Input PDF file or directory of PDFs
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file (single PDF) or directory (batch)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Classifier configuration file (JSON)
    #[arg(long, value_name = "FILE", env = "PDFOUTLINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outline of one PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Classifier configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Write one outline JSON per PDF in a directory
    Batch {
        /// Directory containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Directory for the JSON outlines
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Classifier configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Process one document at a time
        #[arg(long)]
        sequential: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail a document on its first unreadable page
        #[arg(long)]
        strict: bool,

        /// Only read the first N pages of each document
        #[arg(long, value_name = "N")]
        max_pages: Option<u32>,
    },

    /// Dump the extracted text fragments of a PDF as JSON
    Fragments {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only read the first N pages
        #[arg(long, value_name = "N")]
        max_pages: Option<u32>,
    },

    /// Classify a fragment list (JSON) produced by `fragments` or another extractor
    Classify {
        /// Fragment list JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Classifier configuration file (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Print the default classifier configuration as JSON
    Config,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `{"title", "outline"}` JSON
    Json,
    /// Markdown table of contents
    Markdown,
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Default)]
struct BatchArgs {
    sequential: bool,
    compact: bool,
    strict: bool,
    max_pages: Option<u32>,
}

impl BatchArgs {
    fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new();
        if !self.strict {
            options = options.lenient();
        }
        if let Some(n) = self.max_pages {
            options = options.with_max_pages(n);
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            format,
            compact,
            config,
        }) => cmd_outline(&input, output.as_deref(), format, compact, config.as_deref()),
        Some(Commands::Batch {
            input,
            output,
            config,
            sequential,
            compact,
            strict,
            max_pages,
        }) => {
            let batch = BatchArgs {
                sequential,
                compact,
                strict,
                max_pages,
            };
            cmd_batch(&input, &output, config.as_deref(), &batch)
        }
        Some(Commands::Fragments {
            input,
            output,
            max_pages,
        }) => cmd_fragments(&input, output.as_deref(), max_pages),
        Some(Commands::Classify {
            input,
            output,
            compact,
            config,
        }) => cmd_classify(&input, output.as_deref(), compact, config.as_deref()),
        Some(Commands::Config) => cmd_config(),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) if input.is_dir() => {
                let output = cli.output.unwrap_or_else(|| input.join("output"));
                cmd_batch(&input, &output, cli.config.as_deref(), &BatchArgs::default())
            }
            Some(input) => cmd_outline(
                &input,
                cli.output.as_deref(),
                OutputFormat::Json,
                false,
                cli.config.as_deref(),
            ),
            None => {
                println!("{}", "Usage: pdfoutline <INPUT> [OUTPUT]".yellow());
                println!("       pdfoutline --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<ClassifierConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let json = fs::read_to_string(p)?;
            Ok(ClassifierConfig::from_json(&json)?)
        }
        None => Ok(ClassifierConfig::default()),
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn emit(content: &str, output: Option<&Path>) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn render_outline(outline: &Outline, format: OutputFormat, compact: bool) -> pdfoutline::Result<String> {
    match format {
        OutputFormat::Json => render::to_json(outline, json_format(compact)),
        OutputFormat::Markdown => Ok(render::to_markdown(outline)),
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    config: Option<&Path>,
) -> CmdResult {
    let config = load_config(config)?;

    // Lenient: one unreadable page should not cost the whole outline
    let extractor = FragmentExtractor::open_with_options(input, ExtractOptions::new().lenient())?;
    let fragments = extractor.extract()?;
    let outline = OutlineClassifier::new(config).classify(&fragments);

    emit(&render_outline(&outline, format, compact)?, output)
}

fn cmd_batch(input: &Path, output: &Path, config: Option<&Path>, args: &BatchArgs) -> CmdResult {
    let mut options = BatchOptions::new()
        .with_classifier(load_config(config)?)
        .with_extract_options(args.extract_options())
        .with_format(json_format(args.compact));
    if args.sequential {
        options = options.sequential();
    }

    let total = find_pdf_files(input)?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            input.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_directory_with_progress(input, output, &options, |doc| {
        let name = doc
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Outlines:".green().bold());
    let last = report.documents.len().saturating_sub(1);
    for (i, doc) in report.documents.iter().enumerate() {
        let branch = if i == last { "└─" } else { "├─" };
        match &doc.result {
            Ok(outline) => println!(
                "  {} {} ({} headings)",
                branch.dimmed(),
                doc.output.display(),
                outline.headings.len()
            ),
            Err(e) => println!(
                "  {} {} {}",
                branch.dimmed(),
                doc.input.display(),
                format!("failed: {}", e).red()
            ),
        }
    }

    println!(
        "\n{} {} succeeded, {} failed",
        "Summary:".bold(),
        report.succeeded(),
        report.failed()
    );

    Ok(())
}

fn cmd_fragments(input: &Path, output: Option<&Path>, max_pages: Option<u32>) -> CmdResult {
    let mut options = ExtractOptions::new().lenient();
    if let Some(n) = max_pages {
        options = options.with_max_pages(n);
    }

    let extractor = FragmentExtractor::open_with_options(input, options)?;
    let fragments = extractor.extract()?;
    let json = render::fragments_to_json(&fragments, JsonFormat::Pretty)?;
    emit(&json, output)
}

fn cmd_classify(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    config: Option<&Path>,
) -> CmdResult {
    let config = load_config(config)?;
    let fragments = render::fragments_from_json(&fs::read_to_string(input)?)?;
    let outline = OutlineClassifier::new(config).classify(&fragments);
    emit(&render::to_json(&outline, json_format(compact))?, output)
}

fn cmd_config() -> CmdResult {
    let json = serde_json::to_string_pretty(&ClassifierConfig::default())?;
    println!("{}", json);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline inference");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfoutline::ErrorMode;

    #[test]
    fn test_batch_extract_options() {
        let lenient = BatchArgs::default().extract_options();
        assert_eq!(lenient.error_mode, ErrorMode::Lenient);
        assert_eq!(lenient.max_pages, None);

        let strict = BatchArgs {
            strict: true,
            max_pages: Some(2),
            ..BatchArgs::default()
        }
        .extract_options();
        assert_eq!(strict.error_mode, ErrorMode::Strict);
        assert_eq!(strict.max_pages, Some(2));
    }

    #[test]
    fn test_batch_flags_parse() {
        let cli = Cli::try_parse_from(["pdfoutline", "batch", "in", "out", "--strict", "--max-pages", "3"])
            .unwrap();
        match cli.command {
            Some(Commands::Batch {
                strict, max_pages, ..
            }) => {
                assert!(strict);
                assert_eq!(max_pages, Some(3));
            }
            _ => panic!("expected batch command"),
        }
    }
}

//! CLI binary for doc2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` and writes the produced PDF.

use anyhow::{Context, Result};
use clap::Parser;
use doc2pdf::{
    convert_to_file, download_filename, ConversionConfig, ConversionProgressCallback,
    PipelineStage, ProgressCallback, SourceDocument,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner that ticks through the pipeline
/// stages and prints one line per completed stage.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Converting");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, filename: &str) {
        self.bar.set_message(filename.to_string());
    }

    fn on_stage_complete(&self, stage: PipelineStage, duration_ms: u64) {
        self.bar.println(format!(
            "  {} {:<8} {}",
            green("✓"),
            stage,
            dim(&format!("{:.1}s", duration_ms as f64 / 1000.0)),
        ));
    }

    fn on_conversion_complete(&self, page_count: usize, pdf_len: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} page(s), {} bytes",
            green("✔"),
            bold(&page_count.to_string()),
            pdf_len
        );
    }

    fn on_conversion_error(&self, error: &str) {
        self.bar.finish_and_clear();
        eprintln!("{} {}", red("✘"), red(error));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert a Word document (writes converted-report.pdf)
  doc2pdf report.docx

  # Convert an image to a centred full-page PDF
  doc2pdf screenshot.png -o screenshot.pdf

  # Tighter margins, larger body text
  doc2pdf --margin 36 --font-size 12 notes.docx

  # Machine-readable run statistics
  doc2pdf report.docx --stats-json > stats.json

SUPPORTED INPUT:
  Word documents   .docx (OOXML). Routed by MIME type or extension.
  Raster images    PNG and JPEG, validated by content sniffing — a
                   mislabelled file is rejected with its real format named.
"#;

/// Convert Word documents and images to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "doc2pdf",
    version,
    about = "Convert Word documents and images to PDF",
    long_about = "Convert .docx documents and PNG/JPEG images to clean single-column A4 PDFs. \
Word documents are parsed, wrapped with real font metrics, and paginated; images are scaled \
to fit the page and centred.",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input file: a .docx document or a PNG/JPEG image.
    input: PathBuf,

    /// Write the PDF here instead of converted-<name>.pdf next to the input.
    #[arg(short, long, env = "DOC2PDF_OUTPUT")]
    output: Option<PathBuf>,

    /// Override the MIME type used for routing (guessed from the extension
    /// by default).
    #[arg(long, env = "DOC2PDF_MIME")]
    mime: Option<String>,

    /// Uniform page margin in points.
    #[arg(long, env = "DOC2PDF_MARGIN", default_value_t = 50.0)]
    margin: f32,

    /// Body text size in points.
    #[arg(long = "font-size", env = "DOC2PDF_FONT_SIZE", default_value_t = 11.0)]
    font_size: f32,

    /// Print run statistics as JSON to stdout.
    #[arg(long, env = "DOC2PDF_STATS_JSON")]
    stats_json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "DOC2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "DOC2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "DOC2PDF_QUIET")]
    quiet: bool,
}

/// Guess a MIME type from the file extension, for routing only.
fn guess_mime(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string()
        }
        "doc" => "application/msword".to_string(),
        "png" => "image/png".to_string(),
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let filename = cli
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("input")
        .to_string();
    let mime = cli.mime.clone().unwrap_or_else(|| guess_mime(&cli.input));
    let doc = SourceDocument::new(bytes, mime, filename.clone());

    let mut builder = ConversionConfig::builder()
        .margin(cli.margin)
        .body_font_size(cli.font_size);
    if show_progress {
        let callback: ProgressCallback = CliProgressCallback::new();
        builder = builder.progress_callback(callback);
    }
    let config = builder.build().context("invalid configuration")?;

    let output_path = cli.output.unwrap_or_else(|| {
        cli.input
            .with_file_name(download_filename(&filename))
    });

    let output = convert_to_file(&doc, &config, &output_path)
        .await
        .with_context(|| format!("conversion of {} failed", cli.input.display()))?;

    if cli.stats_json {
        println!("{}", serde_json::to_string_pretty(&output.stats)?);
    } else if !cli.quiet {
        eprintln!(
            "{} {}",
            dim("wrote"),
            bold(&output_path.display().to_string())
        );
    }

    Ok(())
}

//! CLI binary for resume2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PipelineConfig`, wires SIGINT/SIGTERM to the rollback path, and prints
//! a summary.

use anyhow::{Context, Result};
use clap::Parser;
use resume2pdf::pipeline::stages;
use resume2pdf::{generate, PipelineConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render resume.json in the current directory to resume.pdf
  resume2pdf

  # A resume kept elsewhere, with a different theme
  resume2pdf site/resume.json --theme jsonresume-theme-even

  # CI: forward browser flags for a sandboxless headless Chrome
  PUPPETEER_ARGS="--no-sandbox --disable-gpu" resume2pdf

  # Machine-readable run report
  resume2pdf --json

WHAT IT DOES:
  1. Backs up resume.json to resume.json.backup
  2. Removes basics.pdfUrl (stashed in .pdfurl.tmp) so the generated PDF
     does not link to itself
  3. Runs: resumed export -o resume.pdf --theme <theme>
  4. Restores basics.pdfUrl and deletes the temp files

  On any failure or Ctrl-C the original resume.json is restored from the
  backup and all temp files are removed. Exit code is 0 on success, 1
  otherwise.

ENVIRONMENT VARIABLES:
  PUPPETEER_ARGS                   Browser launch args forwarded to the
                                   renderer (also sets PUPPETEER_LAUNCH_ARGS
                                   and CHROME_ARGS)
  PUPPETEER_EXECUTABLE_PATH        Chrome/Chromium binary for the renderer
  PUPPETEER_SKIP_CHROMIUM_DOWNLOAD Skip the renderer's browser download
                                   (default "false")
  DISPLAY                          X display; defaults to :99 when unset
  RESUME2PDF_THEME                 Override the theme
  RESUME2PDF_RENDERER              Override the renderer command

SETUP:
  1. Install the renderer:  npm install -g resumed jsonresume-theme-macchiato-custom
  2. Render:                resume2pdf
"#;

/// Render a JSON Resume to PDF via the `resumed` exporter.
#[derive(Parser, Debug)]
#[command(
    name = "resume2pdf",
    version,
    about = "Render a JSON Resume to PDF, with safe backup/rollback of the data file",
    long_about = "Render a JSON Resume (resume.json) to PDF through the external `resumed` \
exporter. The self-referential basics.pdfUrl field is removed for the duration of the render \
and restored afterwards; every failure or interruption rolls the data file back to its \
original content.",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the resume document.
    #[arg(default_value = "resume.json", env = "RESUME2PDF_RESUME")]
    resume: PathBuf,

    /// Output PDF file name (resolved by the renderer in the resume's directory).
    #[arg(short, long, default_value = "resume.pdf", env = "RESUME2PDF_OUTPUT")]
    output: PathBuf,

    /// Theme passed to the renderer.
    #[arg(
        long,
        default_value = resume2pdf::config::DEFAULT_THEME,
        env = "RESUME2PDF_THEME"
    )]
    theme: String,

    /// Renderer command to invoke.
    #[arg(
        long,
        default_value = resume2pdf::config::DEFAULT_RENDERER,
        env = "RESUME2PDF_RENDERER"
    )]
    renderer: String,

    /// Browser launch args forwarded to the renderer's headless Chrome.
    #[arg(long, env = "PUPPETEER_ARGS")]
    puppeteer_args: Option<String>,

    /// Chrome/Chromium executable for the renderer.
    #[arg(long, env = "PUPPETEER_EXECUTABLE_PATH")]
    chrome_executable: Option<PathBuf>,

    /// Value forwarded as PUPPETEER_SKIP_CHROMIUM_DOWNLOAD.
    #[arg(long, env = "PUPPETEER_SKIP_CHROMIUM_DOWNLOAD")]
    skip_chromium_download: Option<String>,

    /// X display used when the environment has none (Xvfb convention).
    #[arg(long, default_value = ":99")]
    display: String,

    /// Print the run report as JSON instead of a summary line.
    #[arg(long, env = "RESUME2PDF_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUME2PDF_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    // ── Interrupt handling ───────────────────────────────────────────────
    // Destructors don't run on SIGINT/SIGTERM, so the in-process
    // RollbackGuard can't cover operator interruption; the handler runs the
    // same idempotent rollback on a clone of the config and exits 1.
    let rollback_config = config.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        tracing::warn!("Interrupted, rolling back");
        stages::rollback(&rollback_config);
        std::process::exit(1);
    })
    .context("Failed to install signal handler")?;

    // ── Run the pipeline ─────────────────────────────────────────────────
    let report = generate(&config).context("PDF generation failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{} {}  {}  {}",
            green("✔"),
            bold(&report.output.display().to_string()),
            dim(&format!(
                "{}ms (renderer {}ms)",
                report.total_duration_ms, report.render_duration_ms
            )),
            match report.removed_field {
                Some(ref url) => dim(&format!("pdfUrl restored: {url}")),
                None => dim("no pdfUrl field"),
            },
        );
    }

    Ok(())
}

/// Map CLI args to `PipelineConfig`.
fn build_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .resume_path(&cli.resume)
        .output(&cli.output)
        .theme(&cli.theme)
        .renderer_command(&cli.renderer)
        .display(&cli.display);

    if let Some(ref args) = cli.puppeteer_args {
        builder = builder.puppeteer_args(args);
    }
    if let Some(ref exe) = cli.chrome_executable {
        builder = builder.executable_path(exe);
    }
    if let Some(ref skip) = cli.skip_chromium_download {
        builder = builder.skip_chromium_download(skip);
    }

    builder.build().context("Invalid configuration")
}

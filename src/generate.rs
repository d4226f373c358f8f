//! Top-level pipeline orchestration.
//!
//! [`generate`] runs the five stages strictly in sequence in the calling
//! thread; the only suspension point is the blocking wait on the renderer
//! subprocess. Exactly one renderer process runs per invocation.
//!
//! ## Rollback guarantee
//!
//! The original implementation hung cleanup off process-wide signal handlers.
//! Here the in-process guarantee is structural instead: [`RollbackGuard`] is
//! armed right after the backup exists and disarmed only once the document
//! has been restored, so every early return, `?`, or panic in between runs
//! [`stages::rollback`] on drop. External interruption (SIGINT/SIGTERM)
//! cannot run destructors, so the CLI additionally wires a signal handler to
//! the same idempotent `rollback` — see `src/bin/resume2pdf.rs`.

use crate::config::PipelineConfig;
use crate::error::Resume2PdfError;
use crate::pipeline::{renderer, stages};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Summary of a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// The PDF file the renderer was asked to produce.
    pub output: PathBuf,
    /// The `basics.pdfUrl` value that was removed and restored, if any.
    pub removed_field: Option<String>,
    /// Wall-clock time of the whole pipeline.
    pub total_duration_ms: u64,
    /// Wall-clock time of the renderer subprocess alone.
    pub render_duration_ms: u64,
}

/// Scoped rollback: restores the document from backup unless disarmed.
///
/// Armed immediately after [`stages::backup`] succeeds; disarmed after
/// [`stages::restore_field`] has put the document back together. In between,
/// dropping the guard — normal unwind, `?`, or panic — runs the same
/// best-effort [`stages::rollback`] the signal handler uses.
pub struct RollbackGuard<'a> {
    config: &'a PipelineConfig,
    armed: bool,
}

impl<'a> RollbackGuard<'a> {
    /// Arm the guard. The backup file must already exist.
    pub fn arm(config: &'a PipelineConfig) -> Self {
        Self {
            config,
            armed: true,
        }
    }

    /// Disarm without rolling back: the happy path completed.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RollbackGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Pipeline did not complete, rolling back");
            stages::rollback(self.config);
        }
    }
}

/// Run the full backup → strip → render → restore → cleanup pipeline.
///
/// # Errors
/// Any stage error aborts the run; by the time the error reaches the caller
/// the document has been restored from backup and the backup and stash files
/// are gone.
pub fn generate(config: &PipelineConfig) -> Result<GenerationReport, Resume2PdfError> {
    let total_start = Instant::now();
    info!("Starting PDF generation for {}", config.resume_path.display());

    // ── Step 1: Backup ───────────────────────────────────────────────────
    stages::backup(config)?;

    // Every exit path below this line must leave the document as it was.
    let guard = RollbackGuard::arm(config);

    // ── Step 2: Remove the pdfUrl field ──────────────────────────────────
    let removed_field = stages::remove_field(config)?;

    // ── Step 3: Render ───────────────────────────────────────────────────
    let render_start = Instant::now();
    renderer::render(config)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;

    // ── Step 4: Restore the field ────────────────────────────────────────
    stages::restore_field(config, removed_field.as_ref().map(|f| f.position))?;

    // ── Step 5: Cleanup ──────────────────────────────────────────────────
    guard.disarm();
    stages::cleanup(config);

    let report = GenerationReport {
        output: config.output.clone(),
        removed_field: removed_field.map(|f| f.url),
        total_duration_ms: total_start.elapsed().as_millis() as u64,
        render_duration_ms,
    };
    info!(
        "PDF generation completed in {}ms (renderer: {}ms)",
        report.total_duration_ms, report.render_duration_ms
    );
    Ok(report)
}

//! # resume2pdf
//!
//! Render a [JSON Resume](https://jsonresume.org) to PDF through the
//! `resumed` exporter, without leaving fingerprints on the data file.
//!
//! ## Why this crate?
//!
//! A published resume usually carries a `basics.pdfUrl` field pointing at its
//! own PDF — but that field must not appear *inside* the PDF being generated
//! (the document would link to itself). This crate automates the dance:
//! back up `resume.json`, strip the field, run the renderer, put the field
//! back, clean up. Every failure and interrupt path restores the original
//! file byte-for-byte from the backup.
//!
//! ## Pipeline Overview
//!
//! ```text
//! resume.json
//!  │
//!  ├─ 1. Backup    copy to resume.json.backup
//!  ├─ 2. Strip     remove basics.pdfUrl, stash its value in .pdfurl.tmp
//!  ├─ 3. Render    resumed export -o resume.pdf --theme <theme>  (subprocess)
//!  ├─ 4. Restore   reinsert basics.pdfUrl from the stash
//!  └─ 5. Cleanup   remove backup + stash
//! ```
//!
//! Strictly sequential, single-threaded; the only wait is on the renderer
//! subprocess. On any error the pipeline rolls back (restore from backup,
//! sweep temp files) before returning.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume2pdf::{generate, PipelineConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipelineConfig::builder()
//!         .resume_path("resume.json")
//!         .build()?;
//!     let report = generate(&config)?;
//!     println!("wrote {} in {}ms", report.output.display(), report.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume2pdf` binary (clap + anyhow + ctrlc + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resume2pdf = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::Resume2PdfError;
pub use generate::{generate, GenerationReport, RollbackGuard};

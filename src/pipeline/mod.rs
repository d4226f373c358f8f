//! Pipeline stages for resume-to-PDF generation.
//!
//! Each submodule owns exactly one concern, keeping every stage
//! independently testable against a temp directory:
//!
//! ```text
//! backup ──▶ remove_field ──▶ render ──▶ restore_field ──▶ cleanup
//! (copy)     (strip pdfUrl)  (resumed)  (reinsert)        (sweep)
//! ```
//!
//! 1. [`document`] — load/store the resume JSON and the `basics.pdfUrl`
//!    take/insert operations (everything that understands the file format)
//! 2. [`stages`]   — the file-level stage functions and the shared
//!    [`stages::rollback`] error path
//! 3. [`renderer`] — the one subprocess invocation, with the Puppeteer and
//!    `DISPLAY` environment plumbing
//!
//! Orchestration and the rollback guard live in [`crate::generate`].

pub mod document;
pub mod renderer;
pub mod stages;

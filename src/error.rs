//! Error types for the resume2pdf library.
//!
//! Everything here is **fatal**: any variant aborts the pipeline and triggers
//! the rollback path (restore the document from backup, remove the backup and
//! stash files, exit non-zero). The two conditions that are *not* errors —
//! the `basics.pdfUrl` field being absent from the document, and the stash
//! file being absent at restore time — never reach this type; the stages log
//! them and continue.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All fatal errors returned by the resume2pdf library.
#[derive(Debug, Error)]
pub enum Resume2PdfError {
    // ── Document errors ───────────────────────────────────────────────────
    /// The resume document does not exist at the given path.
    #[error("Resume file not found: '{path}'\nCheck the path exists and is readable.")]
    DocumentNotFound { path: PathBuf },

    /// The resume document exists but could not be read.
    #[error("Failed to read resume file '{path}': {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resume document could not be written back.
    #[error("Failed to write resume file '{path}': {source}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resume document is not valid JSON.
    #[error("Resume file '{path}' is not valid JSON: {source}\nTry: jq . {path:?}")]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The resume document parsed, but its top level is not a JSON object.
    #[error("Resume file '{path}' must contain a JSON object at the top level")]
    NotAnObject { path: PathBuf },

    // ── Backup / stash errors ─────────────────────────────────────────────
    /// Copying the document to the backup path failed.
    #[error("Failed to back up '{path}' to '{backup}': {source}")]
    BackupFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the extracted field value to the stash file failed.
    #[error("Failed to write stash file '{path}': {source}")]
    StashWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the stash file back failed.
    #[error("Failed to read stash file '{path}': {source}")]
    StashRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// The renderer command could not be started at all.
    #[error(
        "Failed to launch renderer '{command}': {source}\n\
         Check the renderer is installed and on PATH (npm install -g resumed)."
    )]
    RendererSpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The renderer ran but exited with a non-zero status.
    #[error(
        "Renderer '{command}' failed with {status}\n\
         Its own output is printed above; to reproduce, run '{command}' \
         directly in the resume's directory."
    )]
    RendererFailed { command: String, status: ExitStatus },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

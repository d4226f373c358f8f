//! File-level pipeline stages: backup, field removal, restore, cleanup.
//!
//! State machine across one run:
//!
//! ```text
//! Clean ──backup──▶ Backed-up ──remove_field──▶ Field-removed
//!                                                    │ render
//! Clean ◀──cleanup── Restored ◀──restore_field── Rendered
//! ```
//!
//! Any error in a non-`Clean` state transitions back to `Clean` through
//! [`rollback`], which is shared by the in-process error path (via the
//! [`crate::generate::RollbackGuard`]) and the CLI's signal handler, and is
//! idempotent: every step checks file existence first, so running it twice —
//! or racing it against a completed run — is harmless.

use crate::config::PipelineConfig;
use crate::error::Resume2PdfError;
use crate::pipeline::document;
use tracing::{info, warn};

/// Copy the resume document to the backup path.
///
/// First stage of every run; errors here abort before anything was mutated.
pub fn backup(config: &PipelineConfig) -> Result<(), Resume2PdfError> {
    info!(
        "Backing up {} to {}",
        config.resume_path.display(),
        config.backup_path.display()
    );
    std::fs::copy(&config.resume_path, &config.backup_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Resume2PdfError::DocumentNotFound {
                path: config.resume_path.clone(),
            }
        } else {
            Resume2PdfError::BackupFailed {
                path: config.resume_path.clone(),
                backup: config.backup_path.clone(),
                source: e,
            }
        }
    })?;
    Ok(())
}

/// A field removed by [`remove_field`]: the URL and its original position
/// inside `basics`, kept in memory so [`restore_field`] can put it back in
/// the same slot. Only the URL itself is persisted (in the stash file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedField {
    pub url: String,
    pub position: usize,
}

/// Remove `basics.pdfUrl` from the document, stashing its value.
///
/// Returns the removed field, or `None` (and leaves the document untouched)
/// when the field is absent — which is not an error.
pub fn remove_field(config: &PipelineConfig) -> Result<Option<RemovedField>, Resume2PdfError> {
    let mut doc = document::load(&config.resume_path)?;

    let Some((url, position)) = document::take_pdf_url(&mut doc) else {
        info!("No {}.{} in {}, nothing to remove",
            document::PARENT_KEY,
            document::FIELD_KEY,
            config.resume_path.display());
        return Ok(None);
    };

    // A leftover stash from an earlier unclean run is overwritable: the
    // backup file, not the stash, is the integrity anchor.
    if config.stash_path.exists() {
        warn!(
            "Overwriting leftover stash file {}",
            config.stash_path.display()
        );
    }

    document::store(&config.resume_path, &doc)?;
    std::fs::write(&config.stash_path, &url).map_err(|e| Resume2PdfError::StashWrite {
        path: config.stash_path.clone(),
        source: e,
    })?;

    info!("Removed {}.{}: {url}", document::PARENT_KEY, document::FIELD_KEY);
    Ok(Some(RemovedField { url, position }))
}

/// Reinsert the stashed `basics.pdfUrl` into the document.
///
/// With `position` (as reported by [`remove_field`] earlier in the same run)
/// the field returns to its original slot, making the rewrite cycle
/// byte-identical; without one it is appended. A missing stash file means
/// [`remove_field`] had nothing to remove; this is a logged no-op, never an
/// error.
pub fn restore_field(
    config: &PipelineConfig,
    position: Option<usize>,
) -> Result<Option<String>, Resume2PdfError> {
    if !config.stash_path.exists() {
        info!("No stash file, nothing to restore");
        return Ok(None);
    }

    let url =
        std::fs::read_to_string(&config.stash_path).map_err(|e| Resume2PdfError::StashRead {
            path: config.stash_path.clone(),
            source: e,
        })?;

    let mut doc = document::load(&config.resume_path)?;
    document::insert_pdf_url(&mut doc, &url, position);
    document::store(&config.resume_path, &doc)?;

    // Cleanup sweeps the stash again at the end of the run, so a failed
    // delete here only costs a warning.
    if let Err(e) = std::fs::remove_file(&config.stash_path) {
        warn!("Failed to delete stash file {}: {e}", config.stash_path.display());
    }

    info!("Restored {}.{}: {url}", document::PARENT_KEY, document::FIELD_KEY);
    Ok(Some(url))
}

/// Remove the backup and stash files if present. Idempotent, never fails.
pub fn cleanup(config: &PipelineConfig) {
    for path in [&config.backup_path, &config.stash_path] {
        if path.exists() {
            if let Err(e) = std::fs::remove_file(path) {
                warn!("Failed to remove {}: {e}", path.display());
            }
        }
    }
}

/// Overwrite the document with the backup copy and delete the backup.
///
/// Error/interrupt path only. Best-effort: failures are logged, not
/// propagated, so this can run inside `Drop` and inside a signal handler.
pub fn restore_from_backup(config: &PipelineConfig) {
    if !config.backup_path.exists() {
        return;
    }
    info!(
        "Restoring {} from backup",
        config.resume_path.display()
    );
    match std::fs::copy(&config.backup_path, &config.resume_path) {
        Ok(_) => {
            if let Err(e) = std::fs::remove_file(&config.backup_path) {
                warn!("Failed to remove backup {}: {e}", config.backup_path.display());
            }
        }
        Err(e) => warn!(
            "Failed to restore {} from {}: {e}",
            config.resume_path.display(),
            config.backup_path.display()
        ),
    }
}

/// Full rollback: restore the document from backup, then sweep temp files.
///
/// Never fails; safe to run from any state, any number of times.
pub fn rollback(config: &PipelineConfig) {
    restore_from_backup(config);
    cleanup(config);
}

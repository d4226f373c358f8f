//! Resume document I/O and the `basics.pdfUrl` field operations.
//!
//! The document is read and written as a `serde_json` object with preserved
//! key order and 2-space indentation, so the remove/restore rewrite cycle
//! leaves the file byte-identical and any intermediate state diffs cleanly.
//! Removal records the field's position inside `basics` and restoration puts
//! it back in that exact slot; unrelated keys are never reordered
//! (`shift_remove`/`shift_insert`, not the swap-remove default).
//! There is deliberately no typed resume model here: the pipeline touches one
//! field and must not disturb anything else a theme might rely on.

use crate::error::Resume2PdfError;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Sub-record holding the field of interest.
pub const PARENT_KEY: &str = "basics";
/// The field removed for the renderer's benefit: the self-referential URL
/// the published resume points at its own PDF with.
pub const FIELD_KEY: &str = "pdfUrl";

/// Load the resume document as a JSON object.
pub fn load(path: &Path) -> Result<Map<String, Value>, Resume2PdfError> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Resume2PdfError::DocumentNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Resume2PdfError::DocumentRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let value: Value =
        serde_json::from_str(&text).map_err(|e| Resume2PdfError::InvalidDocument {
            path: path.to_path_buf(),
            source: e,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(Resume2PdfError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Write the resume document back, pretty-printed with 2-space indentation.
///
/// No trailing newline: that matches what the JSON Resume toolchain itself
/// produces, keeping a successful run byte-identical on disk.
pub fn store(path: &Path, doc: &Map<String, Value>) -> Result<(), Resume2PdfError> {
    let text = serde_json::to_string_pretty(doc).map_err(|e| Resume2PdfError::InvalidDocument {
        path: path.to_path_buf(),
        source: e,
    })?;
    std::fs::write(path, text).map_err(|e| Resume2PdfError::DocumentWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Remove `basics.pdfUrl` from the document, returning its value and its
/// position within `basics` so restoration can put it back in the same slot.
///
/// Returns `None` — leaving the document untouched — when `basics` is
/// missing, is not an object, or holds no non-empty string `pdfUrl`.
pub fn take_pdf_url(doc: &mut Map<String, Value>) -> Option<(String, usize)> {
    let basics = doc.get_mut(PARENT_KEY)?.as_object_mut()?;
    match basics.get(FIELD_KEY) {
        Some(Value::String(url)) if !url.is_empty() => {}
        Some(other) => {
            debug!(value = %other, "{PARENT_KEY}.{FIELD_KEY} is not a usable URL, leaving it in place");
            return None;
        }
        None => return None,
    }
    let position = basics.keys().position(|k| k == FIELD_KEY)?;
    // shift_remove keeps the surrounding keys in order; the default remove is
    // a swap-remove under preserve_order and would teleport the last key.
    match basics.shift_remove(FIELD_KEY) {
        Some(Value::String(url)) => Some((url, position)),
        _ => None,
    }
}

/// Reinsert `basics.pdfUrl`, creating the `basics` object if needed.
///
/// With `position` (as returned by [`take_pdf_url`]) the field goes back to
/// its original slot; without one it is appended. Positions past the end are
/// clamped, covering a `basics` that shrank in between.
pub fn insert_pdf_url(doc: &mut Map<String, Value>, url: &str, position: Option<usize>) {
    let basics = doc
        .entry(PARENT_KEY.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(basics) = basics.as_object_mut() else {
        return;
    };
    match position {
        Some(index) => {
            basics.shift_insert(
                index.min(basics.len()),
                FIELD_KEY.to_string(),
                Value::String(url.to_string()),
            );
        }
        None => {
            basics.insert(FIELD_KEY.to_string(), Value::String(url.to_string()));
        }
    }
}

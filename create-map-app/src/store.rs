//! Local store adapter
//!
//! Reads and writes the UTF-8 text and JSON documents that templates keep on
//! disk. JSON documents round-trip with their key order intact (serde_json's
//! `preserve_order` map) and are written pretty-printed with a trailing
//! newline, matching how npm tooling formats `package.json`.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::SyncError;

/// Read a UTF-8 text file.
///
/// # Errors
///
/// Returns [`SyncError::LocalRead`] if the file is missing or unreadable.
pub fn read_text(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|source| SyncError::LocalRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a UTF-8 text file, replacing any existing contents.
///
/// # Errors
///
/// Returns [`SyncError::Write`] if the file cannot be persisted.
pub fn write_text(path: &Path, contents: &str) -> Result<(), SyncError> {
    fs::write(path, contents).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse an order-preserving JSON document.
///
/// # Errors
///
/// Returns [`SyncError::LocalRead`] for I/O failures and [`SyncError::Json`]
/// if the document is corrupt.
pub fn read_json(path: &Path) -> Result<Value, SyncError> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| SyncError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a JSON document (two-space indent, trailing newline) and
/// persist it.
///
/// # Errors
///
/// Returns [`SyncError::Json`] if serialization fails and
/// [`SyncError::Write`] if the file cannot be persisted.
pub fn write_json(path: &Path, doc: &Value) -> Result<(), SyncError> {
    let mut text = serde_json::to_string_pretty(doc).map_err(|source| SyncError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    text.push('\n');
    write_text(path, &text)
}

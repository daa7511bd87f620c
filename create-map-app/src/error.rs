//! Error types for template synchronization and injection
//!
//! Every variant is localized: a failure in one template, package, or anchor
//! never aborts processing of its siblings. Each variant carries enough
//! context (URL or path, and anchor name where relevant) for an operator to
//! act on the report without re-running anything.

use std::path::PathBuf;

use thiserror::Error;

/// Engine error type
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or HTTP failure while fetching a remote document
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        /// URL that failed
        url: String,
        /// Underlying transport error
        #[source]
        source: Box<ureq::Error>,
    },

    /// Remote document was not valid JSON
    #[error("invalid JSON from {url}: {source}")]
    RemoteJson {
        /// URL the document came from
        url: String,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Remote document parsed but did not have the promised shape
    #[error("unexpected response from {url}: {detail}")]
    RemoteShape {
        /// URL the document came from
        url: String,
        /// What was missing or malformed
        detail: String,
    },

    /// Missing or unreadable local file
    #[error("failed to read {path}: {source}")]
    LocalRead {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Corrupt local JSON document
    #[error("invalid JSON in {path}: {source}")]
    Json {
        /// Path of the corrupt document
        path: PathBuf,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// An injection anchor did not match anywhere in the target file
    #[error("no {anchor} anchor matched in {path}")]
    AnchorNotFound {
        /// Which anchor missed (`imports` or `logic`)
        anchor: &'static str,
        /// File that was scanned
        path: PathBuf,
    },

    /// A snippet is already present in the target file
    #[error("{anchor} snippet already present in {path}")]
    SnippetAlreadyPresent {
        /// Which snippet was found (`imports` or `logic`)
        anchor: &'static str,
        /// File that was scanned
        path: PathBuf,
    },

    /// Persistence failure; the operation for this file aborts, others go on
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

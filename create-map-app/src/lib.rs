//! Template synchronization and snippet injection engine for `create-map-app`
//!
//! Keeps starter web-mapping templates in sync with their upstream sources
//! (the create-vite templates and the npm registry) and splices the optional
//! search feature into already-generated, framework-specific source files.
//!
//! The crate is organized as a set of small, pure stages over two thin I/O
//! boundaries:
//!
//! - [`remote`] fetches JSON documents over HTTP
//! - [`store`] reads and writes local text and JSON files
//! - [`diff`] compares configuration trees and emits change records
//! - [`version`] normalizes range-prefixed dependency versions
//! - [`cdn`] scans raw text for versioned CDN URL fragments
//! - [`patch`] applies structured and textual updates
//! - [`inject`] splices feature snippets at per-framework anchors
//! - [`check`] routes each tracked template through the right checker

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod cdn;
pub mod check;
pub mod diff;
pub mod error;
pub mod inject;
pub mod patch;
pub mod remote;
pub mod store;
pub mod version;

pub use cdn::{CdnPattern, CdnUpdate};
pub use check::{CdnFileReport, TemplateChecker, TemplateKind, TemplateReport};
pub use diff::{diff_trees, ChangeRecord};
pub use error::SyncError;
pub use inject::{add_search_feature, inject, Framework, InjectionOutcome, SnippetSet};
pub use remote::{HttpRemote, RemoteSource};

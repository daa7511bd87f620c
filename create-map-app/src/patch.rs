//! Patch appliers
//!
//! Structured patching of JSON configuration trees and literal textual
//! patching of versioned CDN fragments. Both build the complete output in
//! memory before any write, so a failed persistence never leaves a
//! half-written file behind.

use std::path::Path;

use serde_json::{Map, Value};

use crate::cdn::CdnUpdate;
use crate::diff::ChangeRecord;
use crate::error::SyncError;
use crate::store;

/// Apply a list of change records to a JSON tree in place.
///
/// Each record's path is walked from the root; missing intermediate
/// containers are created as empty objects (a non-object intermediate is
/// replaced by one), and the final segment is set to the record's new value.
/// Applying the same list twice yields the same tree as applying it once.
pub fn apply_changes(tree: &mut Value, changes: &[ChangeRecord]) {
    for change in changes {
        let Some((leaf, parents)) = change.path.split_last() else {
            continue;
        };

        let mut node = &mut *tree;
        for segment in parents {
            node = ensure_object(node)
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        ensure_object(node).insert(leaf.clone(), change.new_value.clone());
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value coerced to an object above"),
    }
}

/// Read, patch, and persist one JSON configuration file.
///
/// The patched tree is fully built in memory before the write, so a write
/// failure cannot leave a partially-updated document behind.
///
/// # Errors
///
/// Returns [`SyncError::LocalRead`] / [`SyncError::Json`] if the current
/// document cannot be loaded and [`SyncError::Write`] if persisting fails.
pub fn apply_changes_to_file(path: &Path, changes: &[ChangeRecord]) -> Result<(), SyncError> {
    let mut tree = store::read_json(path)?;
    apply_changes(&mut tree, changes);
    store::write_json(path, &tree)
}

/// Replace every occurrence of one versioned CDN fragment.
///
/// The needle is the literal `<fragment>/v<old>/` shape, so unrelated
/// numeric substrings elsewhere in the text are never touched.
#[must_use]
pub fn replace_versioned_fragment(
    text: &str,
    fragment: &str,
    old_version: &str,
    new_version: &str,
) -> String {
    let old = format!("{fragment}/v{old_version}/");
    let new = format!("{fragment}/v{new_version}/");
    text.replace(&old, &new)
}

/// Apply a set of CDN updates to one text file.
///
/// All substitutions run against the in-memory buffer; the file is written
/// once at the end.
///
/// # Errors
///
/// Returns [`SyncError::LocalRead`] if the file cannot be loaded and
/// [`SyncError::Write`] if persisting fails.
pub fn apply_cdn_updates_to_file(path: &Path, updates: &[CdnUpdate]) -> Result<(), SyncError> {
    let mut text = store::read_text(path)?;
    for update in updates {
        text = update.apply(&text);
    }
    store::write_text(path, &text)
}

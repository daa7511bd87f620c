//! Config tree differ
//!
//! Recursively compares a remote-authoritative JSON tree against a local one
//! and emits the minimal ordered list of corrections. Only the remote side's
//! keys are ground truth: keys present only locally are never reported.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

/// A single correction derived from comparing two configuration trees.
///
/// `path` addresses a scalar leaf under the remote tree. `old_value` is
/// `None` when the local tree has no value at that path; the structured
/// patch applier is permitted to create it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    /// Key path from the document root to the leaf
    pub path: Vec<String>,
    /// Local value being replaced, if any
    pub old_value: Option<Value>,
    /// Remote-authoritative replacement value
    pub new_value: Value,
}

impl ChangeRecord {
    /// Dotted rendering of the key path, for reports.
    #[must_use]
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Compare `remote` against `local` and report every leaf where the local
/// tree diverges.
///
/// Walks `remote`'s keys in stored order (depth-first, pre-order), skipping
/// `ignore_keys` at every depth. Where both sides hold nested objects the
/// walk recurses; anything else is compared by strict inequality, so a key
/// whose shape differs between the trees (object on one side, scalar on the
/// other) is reported unconditionally. Arrays are opaque and compared whole.
#[must_use]
pub fn diff_trees(remote: &Value, local: &Value, ignore_keys: &HashSet<&str>) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();
    let mut path = Vec::new();
    walk(remote, Some(local), ignore_keys, &mut path, &mut changes);
    changes
}

fn walk(
    remote: &Value,
    local: Option<&Value>,
    ignore_keys: &HashSet<&str>,
    path: &mut Vec<String>,
    changes: &mut Vec<ChangeRecord>,
) {
    let Some(remote_map) = remote.as_object() else {
        return;
    };

    for (key, remote_value) in remote_map {
        if ignore_keys.contains(key.as_str()) {
            continue;
        }

        let local_value = local.and_then(|v| v.get(key));
        path.push(key.clone());

        if remote_value.is_object() && local_value.is_some_and(Value::is_object) {
            walk(remote_value, local_value, ignore_keys, path, changes);
        } else if local_value != Some(remote_value) {
            changes.push(ChangeRecord {
                path: path.clone(),
                old_value: local_value.cloned(),
                new_value: remote_value.clone(),
            });
        }

        path.pop();
    }
}

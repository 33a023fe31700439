//! Task type shared by the in-memory store and its persisted snapshot.

use serde::{Deserialize, Serialize};

/// Task identifier: creation time in milliseconds since the Unix epoch.
pub type TaskId = i64;

/// A single to-do item.
///
/// The label is serialized as `"task"` to stay compatible with snapshots
/// written by earlier releases of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "task")]
    pub label: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            completed: false,
        }
    }
}

/// Returns true if `label` is usable as a task label.
pub fn is_valid_label(label: &str) -> bool {
    !label.trim().is_empty()
}

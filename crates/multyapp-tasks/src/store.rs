//! In-memory task list mirrored to a key-value store.
//!
//! The list in memory is authoritative for the session. Every successful
//! mutation writes the whole list as one JSON snapshot on a blocking worker and
//! hands back a [`PersistHandle`] the caller may await or drop. Storage failures
//! are logged and swallowed.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::storage::KeyValueStore;
use crate::task::{is_valid_label, Task, TaskId};

/// Storage key holding the task list snapshot.
pub const TASK_LIST_KEY: &str = "taskList";

/// How a snapshot write ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Snapshot was written.
    Written,
    /// A newer snapshot had already been written; this one was dropped.
    Superseded,
    /// Serialization or storage failed (already logged).
    Failed,
}

/// Completion handle for a background snapshot write.
///
/// Dropping the handle does not cancel the write.
#[derive(Debug)]
pub struct PersistHandle(JoinHandle<PersistOutcome>);

impl PersistHandle {
    /// Wait for the write to finish.
    pub async fn finished(self) -> PersistOutcome {
        match self.0.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Task list write did not complete: {}", e);
                PersistOutcome::Failed
            }
        }
    }
}

/// Owned to-do list state with an injectable persistence port.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Arc<dyn KeyValueStore>,
    /// Runtime that runs storage I/O; mutations may be called from any thread.
    runtime: Handle,
    /// Generation of the most recently issued snapshot.
    generation: u64,
    /// Generation of the most recently written snapshot.
    written: Arc<Mutex<u64>>,
}

impl TaskStore {
    /// Create an empty store backed by `storage`. Storage reads and writes run
    /// on `runtime`'s blocking pool. Call [`TaskStore::load`] to pick up the
    /// persisted list.
    pub fn new(storage: Arc<dyn KeyValueStore>, runtime: Handle) -> Self {
        Self {
            tasks: Vec::new(),
            storage,
            runtime,
            generation: 0,
            written: Arc::new(Mutex::new(0)),
        }
    }

    /// Tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Replace the in-memory list with the persisted snapshot.
    ///
    /// A missing or unparseable snapshot leaves the list empty. When the read
    /// succeeded, the current list is written back once so storage holds a
    /// normalized snapshot. When the read itself failed, nothing is written and
    /// `None` is returned.
    pub async fn load(&mut self) -> Option<PersistHandle> {
        let storage = Arc::clone(&self.storage);
        let read = self
            .runtime
            .spawn_blocking(move || storage.get(TASK_LIST_KEY))
            .await;

        match read {
            Ok(Ok(Some(json))) => match serde_json::from_str::<Vec<Task>>(&json) {
                Ok(tasks) => {
                    tracing::info!("Loaded {} tasks from storage", tasks.len());
                    self.tasks = tasks;
                }
                Err(e) => {
                    tracing::warn!("Error parsing saved task list, starting empty: {}", e);
                }
            },
            Ok(Ok(None)) => {
                tracing::debug!("No saved task list");
            }
            Ok(Err(e)) => {
                tracing::warn!("Error loading task list from storage: {}", e);
                return None;
            }
            Err(e) => {
                tracing::warn!("Task list read did not complete: {}", e);
                return None;
            }
        }

        Some(self.persist())
    }

    /// Prepend a new task. Blank labels are ignored.
    pub fn add(&mut self, label: &str) -> Option<PersistHandle> {
        if !is_valid_label(label) {
            tracing::debug!("Ignoring blank task label");
            return None;
        }

        let task = Task::new(self.next_id(), label);
        tracing::debug!("Adding task {}", task.id);
        self.tasks.insert(0, task);
        Some(self.persist())
    }

    /// Flip the completion flag of a task. Unknown ids are ignored.
    pub fn toggle(&mut self, id: TaskId) -> Option<PersistHandle> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!("Toggle ignored, no task {}", id);
            return None;
        };
        task.completed = !task.completed;
        Some(self.persist())
    }

    /// Remove a task. Unknown ids are ignored.
    pub fn remove(&mut self, id: TaskId) -> Option<PersistHandle> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            tracing::debug!("Remove ignored, no task {}", id);
            return None;
        }
        Some(self.persist())
    }

    /// Write the whole list to storage in the background.
    ///
    /// Snapshots are numbered; a snapshot older than one already written is
    /// dropped instead of overwriting newer data.
    pub fn persist(&mut self) -> PersistHandle {
        self.generation += 1;
        let generation = self.generation;
        let snapshot = serde_json::to_string(&self.tasks);
        let storage = Arc::clone(&self.storage);
        let written = Arc::clone(&self.written);

        PersistHandle(self.runtime.spawn_blocking(move || {
            let json = match snapshot {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("Error serializing task list: {}", e);
                    return PersistOutcome::Failed;
                }
            };

            let mut last = written.lock();
            if *last > generation {
                tracing::debug!(
                    "Skipping stale task list snapshot {} (already wrote {})",
                    generation,
                    *last
                );
                return PersistOutcome::Superseded;
            }

            match storage.set(TASK_LIST_KEY, &json) {
                Ok(()) => {
                    *last = generation;
                    PersistOutcome::Written
                }
                Err(e) => {
                    tracing::warn!("Error saving task list to storage: {}", e);
                    PersistOutcome::Failed
                }
            }
        }))
    }

    /// Creation timestamp in milliseconds, bumped past the newest existing id
    /// so ids stay unique when two tasks land in the same millisecond.
    fn next_id(&self) -> TaskId {
        let now = chrono::Utc::now().timestamp_millis();
        let Some(max) = self.tasks.iter().map(|t| t.id).max() else {
            return now;
        };
        if max < now {
            return now;
        }

        match max.checked_add(1) {
            Some(id) => id,
            None => {
                // Loaded ids reach the top of the range; take the first free one.
                tracing::warn!("No task id above {} available, reusing a free id", max);
                (now..=max).find(|id| self.get(*id).is_none()).unwrap_or(now)
            }
        }
    }
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//! To-do list state for MultyApp.
//!
//! `TaskStore` owns the task list in memory and mirrors every change to a
//! key-value store as a single JSON snapshot.

mod error_mapping;
pub mod sqlite_store;
pub mod storage;
pub mod store;
pub mod task;

pub use sqlite_store::SqliteStore;
pub use storage::{KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use store::{PersistHandle, PersistOutcome, TaskStore, TASK_LIST_KEY};
pub use task::{Task, TaskId};

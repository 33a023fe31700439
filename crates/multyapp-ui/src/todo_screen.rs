//! To-do list screen: city search box plus the task list.

use multyapp_core::AppError;
use multyapp_tasks::{PersistHandle, TaskId, TaskStore};
use multyapp_weather::normalize_city;

use crate::route::Route;

pub const APP_TITLE: &str = "MultyApp";
pub const EMPTY_LIST_TEXT: &str = "No ToDo";

/// One rendered task row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub label: String,
    /// Rendered struck through
    pub completed: bool,
}

/// What the list area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskListView {
    /// Placeholder text [`EMPTY_LIST_TEXT`]
    Empty,
    Items(Vec<TaskRow>),
}

pub struct TodoScreen {
    task_input: String,
    city_input: String,
    store: TaskStore,
}

impl TodoScreen {
    pub fn new(store: TaskStore) -> Self {
        Self {
            task_input: String::new(),
            city_input: String::new(),
            store,
        }
    }

    /// Load the saved list. Call once when the screen is first shown.
    pub async fn mount(&mut self) -> Option<PersistHandle> {
        self.store.load().await
    }

    pub fn task_input(&self) -> &str {
        &self.task_input
    }

    pub fn set_task_input(&mut self, text: impl Into<String>) {
        self.task_input = text.into();
    }

    pub fn city_input(&self) -> &str {
        &self.city_input
    }

    pub fn set_city_input(&mut self, text: impl Into<String>) {
        self.city_input = text.into();
    }

    /// "add" button. The input is cleared only when a task was created.
    pub fn add_task(&mut self) -> Option<PersistHandle> {
        let handle = self.store.add(&self.task_input)?;
        self.task_input.clear();
        Some(handle)
    }

    /// Tap on a task.
    pub fn toggle_task(&mut self, id: TaskId) -> Option<PersistHandle> {
        self.store.toggle(id)
    }

    /// "Delete" button.
    pub fn delete_task(&mut self, id: TaskId) -> Option<PersistHandle> {
        self.store.remove(id)
    }

    /// "Weather" button: navigate with the normalized city.
    ///
    /// # Errors
    /// Returns `AppError::Weather(MissingCity)` when the city box is empty; show
    /// its `user_message()` and stay on this screen.
    pub fn weather_pressed(&self) -> Result<Route, AppError> {
        let city = normalize_city(&self.city_input)?;
        tracing::info!("Navigating to weather for {}", city);
        Ok(Route::Weather { city })
    }

    pub fn task_list(&self) -> TaskListView {
        if self.store.is_empty() {
            return TaskListView::Empty;
        }

        TaskListView::Items(
            self.store
                .tasks()
                .iter()
                .map(|t| TaskRow {
                    id: t.id,
                    label: t.label.clone(),
                    completed: t.completed,
                })
                .collect(),
        )
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use multyapp_tasks::{KeyValueStore, MemoryStore, PersistOutcome, TASK_LIST_KEY};
    use std::sync::Arc;
    use tokio::runtime::{Handle, Runtime};

    fn screen(runtime: Handle) -> TodoScreen {
        TodoScreen::new(TaskStore::new(Arc::new(MemoryStore::new()), runtime))
    }

    #[tokio::test]
    async fn test_add_clears_input() {
        let mut screen = screen(Handle::current());
        screen.set_task_input("Buy milk");
        screen.add_task().unwrap().finished().await;

        assert_eq!(screen.task_input(), "");
        assert!(matches!(screen.task_list(), TaskListView::Items(ref rows) if rows.len() == 1));
    }

    #[tokio::test]
    async fn test_blank_add_keeps_input() {
        let mut screen = screen(Handle::current());
        screen.set_task_input("   ");

        assert!(screen.add_task().is_none());
        assert_eq!(screen.task_input(), "   ");
        assert_eq!(screen.task_list(), TaskListView::Empty);
    }

    #[test]
    fn test_actions_from_ui_thread_without_runtime_context() {
        let runtime = Runtime::new().unwrap();
        let storage = Arc::new(MemoryStore::new());
        let mut screen =
            TodoScreen::new(TaskStore::new(storage.clone(), runtime.handle().clone()));

        screen.set_task_input("Buy milk");
        let handle = screen.add_task().unwrap();
        assert_eq!(runtime.block_on(handle.finished()), PersistOutcome::Written);

        let id = match screen.task_list() {
            TaskListView::Items(rows) => rows[0].id,
            TaskListView::Empty => panic!("task was not added"),
        };
        runtime.block_on(screen.toggle_task(id).unwrap().finished());
        runtime.block_on(screen.delete_task(id).unwrap().finished());

        assert_eq!(screen.task_list(), TaskListView::Empty);
        assert_eq!(storage.get(TASK_LIST_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_weather_pressed_without_city_prompts() {
        let runtime = Runtime::new().unwrap();
        let screen = screen(runtime.handle().clone());
        let err = screen.weather_pressed().unwrap_err();
        assert_eq!(err.user_message(), "Please enter a city");
    }

    #[test]
    fn test_weather_pressed_navigates_with_normalized_city() {
        let runtime = Runtime::new().unwrap();
        let mut screen = screen(runtime.handle().clone());
        screen.set_city_input("new-york");

        match screen.weather_pressed().unwrap() {
            Route::Weather { city } => assert_eq!(city.normalized(), "New%20York"),
            other => panic!("unexpected route {:?}", other),
        }
    }
}

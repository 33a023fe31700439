//! Screen state for MultyApp.
//!
//! Rendering lives outside this crate; these types hold what each screen shows
//! and turn user actions into task store mutations, weather lookups and
//! navigation.

pub mod bridge;
pub mod route;
pub mod todo_screen;
pub mod weather_screen;

pub use route::Route;
pub use todo_screen::{TaskListView, TaskRow, TodoScreen, APP_TITLE, EMPTY_LIST_TEXT};
pub use weather_screen::{request_fetch, WeatherScreen, WeatherServiceMessage};

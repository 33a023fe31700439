//! End-to-end screen flows against in-memory storage and a mock weather API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use multyapp_tasks::{KeyValueStore, MemoryStore, TaskStore, TASK_LIST_KEY};
use multyapp_ui::{Route, TaskListView, TodoScreen, WeatherScreen};
use multyapp_weather::{WeatherImage, WeatherProvider, WeatherResult, NOT_FOUND_TITLE};
use tokio::runtime::Handle;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_todo_flow_persists_each_step() {
    let storage = Arc::new(MemoryStore::new());
    let mut screen = TodoScreen::new(TaskStore::new(storage.clone(), Handle::current()));
    if let Some(handle) = screen.mount().await {
        handle.finished().await;
    }
    assert_eq!(screen.task_list(), TaskListView::Empty);

    screen.set_task_input("Buy milk");
    screen.add_task().unwrap().finished().await;

    let id = match screen.task_list() {
        TaskListView::Items(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].label, "Buy milk");
            assert!(!rows[0].completed);
            rows[0].id
        }
        TaskListView::Empty => panic!("task was not added"),
    };

    screen.toggle_task(id).unwrap().finished().await;
    let saved = storage.get(TASK_LIST_KEY).unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(saved[0]["task"], "Buy milk");
    assert_eq!(saved[0]["completed"], true);

    screen.delete_task(id).unwrap().finished().await;
    assert_eq!(screen.task_list(), TaskListView::Empty);
    assert_eq!(storage.get(TASK_LIST_KEY).unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_saved_list_is_shown_on_mount() {
    let storage = Arc::new(MemoryStore::with_entry(
        TASK_LIST_KEY,
        r#"[{"id":2,"task":"Walk dog","completed":true},{"id":1,"task":"Buy milk","completed":false}]"#,
    ));
    let mut screen = TodoScreen::new(TaskStore::new(storage, Handle::current()));
    screen.mount().await;

    match screen.task_list() {
        TaskListView::Items(rows) => {
            let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
            assert_eq!(labels, ["Walk dog", "Buy milk"]);
            assert!(rows[0].completed);
        }
        TaskListView::Empty => panic!("saved tasks were not loaded"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_weather_screen_shows_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "weather": [{ "main": "Clouds" }],
            "main": { "temp": 7.4 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Arc::new(WeatherProvider::with_base_url("test-key", &mock_server.uri()).unwrap());

    let mut todo = TodoScreen::new(TaskStore::new(Arc::new(MemoryStore::new()), Handle::current()));
    todo.set_city_input("new-york");
    let route = todo.weather_pressed().unwrap();
    assert_eq!(route.title(), "Weather");

    let mut screen = WeatherScreen::from_route(&route).unwrap();
    assert_eq!(screen.display().title, "New-York");
    assert!(screen.display().image.is_none());

    screen.mount(&Handle::current(), provider.clone());
    // Second mount must not issue another request.
    screen.mount(&Handle::current(), provider);
    assert!(screen.wait_for_result(Duration::from_secs(5)).await);

    let display = screen.display();
    assert_eq!(display.title, "New-York");
    assert_eq!(display.image, Some(WeatherImage::Cloud));
    let details = display.details.unwrap();
    assert_eq!(details.temperature, "7°C");
    assert_eq!(details.condition, "clouds");

    assert_eq!(screen.back(), Route::TodoList);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_weather_screen_unknown_city() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let provider = Arc::new(WeatherProvider::with_base_url("test-key", &mock_server.uri()).unwrap());
    let mut screen = WeatherScreen::new(multyapp_weather::normalize_city("atlantis").unwrap());

    screen.mount(&Handle::current(), provider);
    assert!(screen.wait_for_result(Duration::from_secs(5)).await);

    assert_eq!(screen.state(), &WeatherResult::NotFound);
    assert_eq!(screen.display().title, NOT_FOUND_TITLE);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_leaving_before_response_discards_it() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "weather": [{ "main": "Snow" }],
                    "main": { "temp": -2.0 }
                }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let provider = Arc::new(WeatherProvider::with_base_url("test-key", &mock_server.uri()).unwrap());
    let mut screen = WeatherScreen::new(multyapp_weather::normalize_city("oslo").unwrap());

    screen.mount(&Handle::current(), provider);
    screen.unmount();
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert!(!screen.poll());
    assert!(screen.state().is_pending());
}

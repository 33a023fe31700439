use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use multyapp_core::{AppError, Config};
use multyapp_tasks::{KeyValueStore, MemoryStore, SqliteStore, TaskStore};
use multyapp_ui::{bridge, TaskListView, TodoScreen, WeatherScreen, APP_TITLE, EMPTY_LIST_TEXT};
use multyapp_weather::WeatherProvider;

fn open_storage(config: &Config) -> Arc<dyn KeyValueStore> {
    let path = config.storage_path();
    match SqliteStore::open(&path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!("Failed to open task storage: {}", e);
            let err = AppError::from(e);
            eprintln!("{} Tasks will not be saved.", err.user_message());
            Arc::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    // Initialize core
    multyapp_core::init()?;

    let (config, _validation) = match Config::load_validated() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };
    let runtime = bridge::runtime()?;

    tracing::info!("MultyApp started");
    println!("{}", APP_TITLE);

    let mut screen = TodoScreen::new(TaskStore::new(open_storage(&config), runtime.handle().clone()));
    runtime.block_on(async {
        if let Some(handle) = screen.mount().await {
            handle.finished().await;
        }
    });

    match screen.task_list() {
        TaskListView::Empty => println!("  {}", EMPTY_LIST_TEXT),
        TaskListView::Items(rows) => {
            for row in rows {
                let mark = if row.completed { "x" } else { " " };
                println!("  [{}] {}", mark, row.label);
            }
        }
    }

    // Optional city argument: show its weather like the weather screen does.
    if let Some(city) = std::env::args().nth(1) {
        screen.set_city_input(city);
        match screen.weather_pressed() {
            Ok(route) => {
                if let Some(mut weather) = WeatherScreen::from_route(&route) {
                    let provider = Arc::new(WeatherProvider::from_config(&config.weather)?);
                    weather.mount(runtime.handle(), provider);
                    // Request timeout plus a margin for the result to reach us.
                    let limit = Duration::from_secs(config.weather.request_timeout_secs + 5);
                    runtime.block_on(weather.wait_for_result(limit));

                    let display = weather.display();
                    println!("\n{}", display.title);
                    if let Some(image) = display.image {
                        println!("  [{}]", image.asset_name());
                    }
                    if let Some(details) = display.details {
                        println!("  {} {}", details.temperature, details.condition);
                    }
                }
            }
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    tracing::info!("MultyApp shutting down");
    Ok(())
}

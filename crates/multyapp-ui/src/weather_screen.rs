//! Weather screen: one lookup per visit.
//! Network work runs on the runtime; results come back via mpsc and are
//! applied by `poll()` on the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use multyapp_weather::{
    fetch_weather, CityQuery, WeatherDisplay, WeatherLookup, WeatherProvider, WeatherResult,
};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::route::Route;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Lookup finished; `None` if it was cancelled first.
    FetchDone(Option<WeatherResult>),
}

/// Request a weather lookup asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    provider: Arc<WeatherProvider>,
    city: CityQuery,
    cancel: CancellationToken,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = fetch_weather(&provider, &city, &cancel).await;
        // Receiver is gone if the screen was dropped; nothing to do.
        let _ = tx.send(WeatherServiceMessage::FetchDone(result));
    });
}

pub struct WeatherScreen {
    lookup: WeatherLookup,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
    requested: bool,
}

impl WeatherScreen {
    pub fn new(city: CityQuery) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            lookup: WeatherLookup::new(city),
            tx,
            rx,
            requested: false,
        }
    }

    /// Build the screen for a `Route::Weather`.
    pub fn from_route(route: &Route) -> Option<Self> {
        match route {
            Route::Weather { city } => Some(Self::new(city.clone())),
            Route::TodoList => None,
        }
    }

    /// Start the lookup. Only the first call has an effect.
    pub fn mount(&mut self, runtime: &Handle, provider: Arc<WeatherProvider>) {
        if self.requested || self.lookup.is_cancelled() {
            return;
        }
        self.requested = true;
        tracing::info!("Fetching weather for {}", self.lookup.city());
        request_fetch(
            &self.tx,
            runtime,
            provider,
            self.lookup.city().clone(),
            self.lookup.cancel_token(),
        );
    }

    /// Apply any finished lookup. Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(WeatherServiceMessage::FetchDone(result)) = self.rx.try_recv() {
            if let Some(result) = result {
                changed |= self.lookup.complete(result);
            }
        }
        changed
    }

    /// Poll until the lookup resolves, giving up after `limit`.
    ///
    /// On timeout the request is cancelled and false is returned.
    pub async fn wait_for_result(&mut self, limit: Duration) -> bool {
        let waited = tokio::time::timeout(limit, async {
            while !self.poll() {
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        })
        .await;

        if waited.is_err() {
            tracing::warn!("Weather lookup for {} timed out", self.lookup.city());
            self.unmount();
            return false;
        }
        true
    }

    /// Screen is going away; abort the request and ignore its result.
    pub fn unmount(&mut self) {
        self.lookup.cancel();
    }

    /// Back button.
    pub fn back(&mut self) -> Route {
        self.unmount();
        Route::TodoList
    }

    pub fn state(&self) -> &WeatherResult {
        self.lookup.state()
    }

    pub fn display(&self) -> WeatherDisplay {
        self.lookup.display()
    }
}

impl Drop for WeatherScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

//! Process-wide tokio runtime shared by the screens.

use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};

// Static tokio runtime that lives for the duration of the application
static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get the shared runtime, creating it on first use.
pub fn runtime() -> std::io::Result<&'static Runtime> {
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .thread_name("multyapp-tokio")
        .build()?;
    tracing::debug!("Created shared tokio runtime");

    // If another thread won the race, ours is dropped here.
    Ok(RUNTIME.get_or_init(|| runtime))
}

/// Handle to the shared runtime if it has been created.
pub fn get_runtime() -> Option<Handle> {
    RUNTIME.get().map(|r| r.handle().clone())
}

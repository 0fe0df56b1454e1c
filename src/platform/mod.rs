//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger setup (console on web, `env_logger` natively)
//! - Key-value storage (LocalStorage on web, in-memory natively)

pub mod storage;

pub use storage::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Install the logger for the current platform.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    if env_logger::try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

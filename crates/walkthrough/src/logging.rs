#![forbid(unsafe_code)]

//! Log subscriber setup for hosts that do not install their own.
//!
//! Tours log transitions and dropped stale completions at `debug`, and
//! empty starts and storage write failures at `warn`. Nothing is printed
//! unless a subscriber is installed.

pub use wt_core::logging::LOG_FILTER_ENV;

#[cfg(feature = "tracing-json")]
pub use wt_core::logging::init_json_subscriber;

/// Install a global human-readable subscriber filtered by `RUST_LOG`
/// (default `warn`).
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-subscriber")]
pub fn init_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

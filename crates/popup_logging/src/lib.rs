#![deny(missing_docs)]
//! Shared logging utilities for the popup workspace.
//!
//! This crate provides the `popup_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.
//!
//! Every macro takes a component name as its first argument; it becomes the
//! `target` of the log record so records can be filtered per component
//! (`storage`, `channel`, `controller`, ...).

/// Logs a trace-level message for the given component.
#[macro_export]
macro_rules! popup_trace {
    ($component:expr, $($arg:tt)*) => {{
        log::trace!(target: $component, $($arg)*);
    }};
}

/// Logs an info-level message for the given component.
#[macro_export]
macro_rules! popup_info {
    ($component:expr, $($arg:tt)*) => {{
        log::info!(target: $component, $($arg)*);
    }};
}

/// Logs a debug-level message for the given component.
#[macro_export]
macro_rules! popup_debug {
    ($component:expr, $($arg:tt)*) => {{
        log::debug!(target: $component, $($arg)*);
    }};
}

/// Logs a warn-level message for the given component.
#[macro_export]
macro_rules! popup_warn {
    ($component:expr, $($arg:tt)*) => {{
        log::warn!(target: $component, $($arg)*);
    }};
}

/// Logs an error-level message for the given component.
#[macro_export]
macro_rules! popup_error {
    ($component:expr, $($arg:tt)*) => {{
        log::error!(target: $component, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

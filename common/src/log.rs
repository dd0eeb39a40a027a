//! Logging macros.
//!
//! Thin wrappers over [`tracing`] so every crate logs through the same targets.
//! `success!` is an `INFO` event on [`SUCCESS_TARGET`], which the CLI formatter
//! renders with its own symbol.

/// Target used by [`success!`](crate::success) events.
pub const SUCCESS_TARGET: &str = "cfscout::success";

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::tracing::debug!($($arg)*) };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::tracing::info!($($arg)*) };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => { $crate::tracing::info!(target: "cfscout::success", $($arg)*) };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::tracing::warn!($($arg)*) };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::tracing::error!($($arg)*) };
}

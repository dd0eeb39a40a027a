//! # cfscout common
//!
//! Value objects and helpers shared by every crate in the workspace.
//!
//! * **[`models`]**: candidates, per-source telemetry and probe outcomes.
//! * **[`config`]**: tunable settings and their validation.
//! * **[`utils`]**: address extraction and serde helpers.
//! * **[`log`]**: logging macros forwarding to [`tracing`].

pub mod config;
pub mod log;
pub mod models;
pub mod utils;

pub use tracing;

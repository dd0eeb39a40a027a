//! # Domain Models
//!
//! Immutable value objects produced by each pipeline stage. Stages build new
//! values rather than mutating their inputs.

pub mod candidate;
pub mod probe;
pub mod source;

pub use candidate::Candidate;
pub use probe::{BatchResult, ProbeErrorKind, ProbeOutcome};
pub use source::{CollectionResult, SourceOutcome};

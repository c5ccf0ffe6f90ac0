//! Observability
//!
//! Structured JSON logging for boot and serving events. Logging is
//! synchronous, read-only, and has no side effects on request handling.

mod logger;

pub use logger::{Logger, Severity};

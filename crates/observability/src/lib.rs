//! # voicegate-observability
//!
//! Structured Logging fuer voicegate via tracing-subscriber (Text oder
//! JSON, Filter per `EnvFilter`).

pub mod logging;

pub use logging::{logging_initialisieren, LogFormat, LogKonfig};

//! voicegate-core – Gemeinsame Typen und Fehlertypen
//!
//! Dieses Crate stellt die Bausteine bereit, die von Protokoll, Zustands-
//! maschine und Server-Front gemeinsam genutzt werden.

pub mod error;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::{GatewayError, Result};
pub use types::{Pose, Vektor3, ACCOUNT_HANDLE, CONNECTOR_HANDLE, SESSION_HANDLE};

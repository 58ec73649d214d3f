//! voicegate-signaling – TCP-Front der Steuerebene
//!
//! Verbindet einen Client ueber TCP mit dem [`voicegate_voice::Gateway`].
//!
//! ## Architektur
//!
//! ```text
//! TCP Listener (SignalingServer)
//!     |  eine Verbindung zur Zeit
//!     v
//! ClientConnection (Framed<TcpStream, TerminatorCodec>)
//!     |
//!     v
//! RequestQueue (mpsc, begrenzt)
//!     |
//!     v
//! Worker (spawn_blocking) -> Gateway::verarbeiten
//! ```

pub mod connection;
pub mod error;
pub mod queue;
pub mod tcp;

// Bequeme Re-Exporte
pub use connection::{ClientConnection, VerbindungsEnde};
pub use error::{SignalingError, SignalingResult};
pub use queue::RequestQueue;
pub use tcp::SignalingServer;

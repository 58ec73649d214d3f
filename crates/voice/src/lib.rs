//! voicegate-voice – Steuerebene des Gateways
//!
//! Zustandsmaschine, Zustandsspeicher und Anbindung an das
//! Echtzeit-Backend. Ein [`Gateway`] verarbeitet genau einen Befehl nach
//! dem anderen und liefert pro Befehl die geordnete Nachrichtenfolge.
//!
//! ## Module
//! - [`dispatcher`] – Befehl -> Region/Ereignis, Standard-Responses
//! - [`lifecycle`] – Start / Connector / Account / Session / Stop
//! - [`connector`] – Orthogonale Connector-Region (Idle / Active)
//! - [`apply`] – Befehle auf den Zustandsspeicher anwenden
//! - [`state`] – Datensaetze der Steuerebene
//! - [`bridge`] – Call-Bridge-Trait, simulierte Bruecke, Test-Double
//!   (Feature `test-support`)

pub mod apply;
pub mod bridge;
pub mod connector;
pub mod dispatcher;
pub mod lifecycle;
pub mod state;

pub use bridge::{BridgeError, BrueckenKonfig, CallBridge, SimulierteBruecke};

#[cfg(any(test, feature = "test-support"))]
pub use bridge::RecordingBridge;
pub use dispatcher::Gateway;
pub use lifecycle::LebenszyklusZustand;
pub use state::ZustandsSpeicher;

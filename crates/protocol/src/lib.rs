//! voicegate-protocol – Steuerprotokoll des Gateways
//!
//! Dieses Crate definiert das Nachrichtenmodell zwischen Client und
//! Gateway: eingehende Befehle (XML-Requests), ausgehende Responses und
//! asynchrone Events samt ihrer Textserialisierung.
//!
//! ## Module
//! - [`action`] – Aktionstabelle und Klassifizierung des `action`-Attributs
//! - [`command`] – Typisierte Befehle und ihr Decoder
//! - [`response`] – Responses (eine Variante pro Befehl)
//! - [`event`] – Asynchrone Events
//! - [`message`] – Ausgehende Nachrichten und Nachrichten-Terminator
//! - [`wire`] – tokio-util Codec fuer terminator-getrennte Frames
//! - [`xml`] – Minimaler Elementbaum ueber quick-xml
//! - [`config`] – Protokoll-Konfiguration (Version, Voice-Server-URI)

pub mod action;
pub mod command;
pub mod config;
pub mod event;
pub mod message;
pub mod response;
pub mod wire;
pub mod xml;

pub use action::AktionsTyp;
pub use command::{Anfrage, Befehl, DekodierFehler};
pub use config::ProtokollKonfig;
pub use event::Event;
pub use message::{Nachricht, NACHRICHTEN_ENDE};
pub use response::{AntwortDaten, Response};

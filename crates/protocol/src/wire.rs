//! Wire-Format fuer TCP-Verbindungen
//!
//! Textbasiertes Protokoll: jede Nachricht ist ein XML-Dokument, gefolgt
//! von der Endemarke `"\n\n\n"`.
//!
//! ## Frame-Format
//!
//! ```text
//! <Request requestId="1" action="Connector.Create.1">...</Request>\n\n\n
//! <Request requestId="2" action="Account.Login.1">...</Request>\n\n\n
//! ```
//!
//! Fuehrende Leerzeichen und leere Frames werden verworfen.
//! Maximale Frame-Groesse ist konfigurierbar (Standard: 1 MB).

use bytes::{BufMut, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};

use crate::message::NACHRICHTEN_ENDE;

// ---------------------------------------------------------------------------
// Konstanten
// ---------------------------------------------------------------------------

/// Standard-maximale Frame-Groesse (1 MB)
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;

const ENDE: &[u8] = NACHRICHTEN_ENDE.as_bytes();

// ---------------------------------------------------------------------------
// TerminatorCodec
// ---------------------------------------------------------------------------

/// tokio-util Codec fuer terminator-getrennte Text-Frames
///
/// Implementiert `Decoder` (liefert ein Dokument pro Frame) und
/// `Encoder<String>` fuer bereits serialisierte Nachrichten.
///
/// # Beispiel
///
/// ```rust,no_run
/// use tokio_util::codec::Framed;
/// use voicegate_protocol::wire::TerminatorCodec;
///
/// // let stream = listener.accept().await?.0;
/// // let framed = Framed::new(stream, TerminatorCodec::new());
/// ```
#[derive(Debug, Clone)]
pub struct TerminatorCodec {
    /// Maximale erlaubte Frame-Groesse in Bytes
    max_frame_size: usize,
    /// Bereits durchsuchter Teil des Buffers
    gesucht_bis: usize,
}

impl TerminatorCodec {
    /// Erstellt einen neuen `TerminatorCodec` mit Standard-Limits
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_FRAME_SIZE)
    }

    /// Erstellt einen `TerminatorCodec` mit benutzerdefinierter maximaler Frame-Groesse
    pub fn with_max_size(max_frame_size: usize) -> Self {
        Self {
            max_frame_size,
            gesucht_bis: 0,
        }
    }

    /// Gibt die konfigurierte maximale Frame-Groesse zurueck
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

impl Default for TerminatorCodec {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Decoder-Implementierung
// ---------------------------------------------------------------------------

impl Decoder for TerminatorCodec {
    type Item = String;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            // Suche ab der letzten Position, Endemarke kann ueber zwei Reads verteilt sein
            let start = self.gesucht_bis.saturating_sub(ENDE.len() - 1);
            let fund = src[start..]
                .windows(ENDE.len())
                .position(|w| w == ENDE)
                .map(|p| start + p);

            let Some(ende) = fund else {
                if src.len() > self.max_frame_size {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!(
                            "Frame zu gross: {} Bytes (Maximum: {} Bytes)",
                            src.len(),
                            self.max_frame_size
                        ),
                    ));
                }
                self.gesucht_bis = src.len();
                return Ok(None);
            };

            self.gesucht_bis = 0;
            let frame = src.split_to(ende + ENDE.len());
            let payload = &frame[..ende];

            if payload.len() > self.max_frame_size {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "Frame zu gross: {} Bytes (Maximum: {} Bytes)",
                        payload.len(),
                        self.max_frame_size
                    ),
                ));
            }

            let text = std::str::from_utf8(payload).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Frame ist kein UTF-8: {}", e),
                )
            })?;

            let text = text.trim_start();
            if text.is_empty() {
                // Leerer Frame (z.B. zusaetzliche Zeilenumbrueche)
                continue;
            }
            return Ok(Some(text.to_string()));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None => {
                // Reste ohne Endemarke am Verbindungsende verwerfen
                src.clear();
                self.gesucht_bis = 0;
                Ok(None)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Encoder-Implementierung
// ---------------------------------------------------------------------------

impl Encoder<String> for TerminatorCodec {
    type Error = io::Error;

    /// Ausgehende Nachrichten haben kein Limit: eine Response enthaelt
    /// das Eingabedokument vollstaendig und ist immer groesser als dieses
    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        // Serialisierte Nachrichten enden bereits mit der Endemarke
        dst.reserve(item.len() + ENDE.len());
        dst.put_slice(item.as_bytes());
        if !item.ends_with(NACHRICHTEN_ENDE) {
            dst.put_slice(ENDE);
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

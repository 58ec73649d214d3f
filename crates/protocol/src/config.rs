//! Protokoll-Konfiguration
//!
//! Wird aus dem `[protokoll]`-Abschnitt der Server-Konfiguration geladen
//! und explizit an Decoder, Serialisierer und Zustandsmaschine uebergeben.

use serde::{Deserialize, Serialize};

/// Erste Protokollversion mit den neuen Event-Namen (v1.22)
pub const KOMPATIBILITAETS_VERSION: u32 = 122;

/// Protokoll-Einstellungen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtokollKonfig {
    /// Protokollversion des Clients (z.B. 120 oder 122)
    pub version: u32,
    /// Fest konfigurierte Voice-Server-URI (leer = aus AccountManagementServer ableiten)
    pub voice_server_uri: String,
    /// Versionskennung in der Connector.Create-Response
    pub version_id: String,
}

impl Default for ProtokollKonfig {
    fn default() -> Self {
        Self {
            version: KOMPATIBILITAETS_VERSION,
            voice_server_uri: String::new(),
            version_id: format!("voicegate-{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ProtokollKonfig {
    /// Konfiguration fuer eine bestimmte Protokollversion
    pub fn mit_version(version: u32) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Gibt true zurueck wenn die Post-Kompatibilitaets-Namen gelten
    pub fn ist_kompatibel(&self) -> bool {
        self.version >= KOMPATIBILITAETS_VERSION
    }

    /// Status-Code fuer "OK" in Events
    pub fn ok_code(&self) -> &'static str {
        if self.ist_kompatibel() {
            "0"
        } else {
            "200"
        }
    }
}

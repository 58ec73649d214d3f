//! Session-Zustandsspeicher
//!
//! Verwaltet die Datensaetze, die die Zustandsmaschine exklusiv besitzt:
//! - Connector (Handle, Voice-Server-URL, Audio-Spiegel)
//! - Account (Name, Passwort, URI, Login-Handle)
//! - Session (Handle, Name, URI, Verbindungstyp, Bridge-Status)
//! - Audio (Geraete, Lautstaerken, Stummschaltung)
//! - Orientierung (Sprecher- und Zuhoerer-Pose)
//!
//! Kein Locking: Der Speicher wird nur im Befehlsschritt des einzelnen
//! Worker-Threads veraendert.

use crate::bridge::{CallBridge, GeraeteArt, Zugangsdaten};
use voicegate_core::Pose;

// ---------------------------------------------------------------------------
// Connector
// ---------------------------------------------------------------------------

/// Gespiegelte Lautstaerken aus den Connector-Befehlen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioSpiegel {
    pub mikrofon_lautstaerke: f32,
    pub lautsprecher_lautstaerke: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorInfo {
    /// Leer solange der Connector nicht aktiv ist
    pub handle: String,
    /// Backend-Endpunkt (Voice-Server)
    pub voice_server_url: String,
    pub audio: AudioSpiegel,
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountInfo {
    pub name: String,
    pub passwort: String,
    pub uri: String,
    pub handle: String,
}

impl AccountInfo {
    pub fn zugangsdaten(&self) -> Zugangsdaten {
        Zugangsdaten {
            name: self.name.clone(),
            passwort: self.passwort.clone(),
            uri: self.uri.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionInfo {
    pub handle: String,
    pub name: String,
    pub passwort: String,
    pub uri: String,
    /// 0 = Privatchat, 1 = Server
    pub verbindungs_typ: String,
    /// Backend-Handle aus `CallBridge::registrieren`, leer ohne Registrierung
    pub registrierung: String,
    /// Gesetzt wenn Registrierung oder Beitritt beim Eintritt fehlschlug
    pub bridge_fehler: Option<String>,
    /// true zwischen Session-Eintritt und -Austritt
    pub aktiv: bool,
}

impl SessionInfo {
    /// Uebertraegt die aktuellen Pegel auf alle aktiven Gespraechs-Legs
    ///
    /// Stummgeschaltete Richtungen werden mit Pegel 0 gesetzt.
    pub fn audio_pegel_steuern(&self, audio: &AudioState, bridge: &mut dyn CallBridge) {
        if !self.aktiv {
            return;
        }
        let mikrofon = if audio.mikrofon_stumm {
            0.0
        } else {
            audio.mikrofon_lautstaerke
        };
        let lautsprecher = if audio.lautsprecher_stumm {
            0.0
        } else {
            audio.lautsprecher_lautstaerke
        };
        bridge.lautstaerke_setzen(GeraeteArt::Aufnahme, mikrofon);
        bridge.lautstaerke_setzen(GeraeteArt::Wiedergabe, lautsprecher);
        tracing::debug!(
            session = %self.handle,
            mikrofon,
            lautsprecher,
            "Pegel an Session uebertragen"
        );
    }
}

// ---------------------------------------------------------------------------
// Audio / Orientierung
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioState {
    pub aufnahme_geraet: String,
    pub wiedergabe_geraet: String,
    pub mikrofon_lautstaerke: f32,
    pub lautsprecher_lautstaerke: f32,
    pub mikrofon_stumm: bool,
    pub lautsprecher_stumm: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Orientierung {
    pub sprecher: Pose,
    pub zuhoerer: Pose,
}

// ---------------------------------------------------------------------------
// ZustandsSpeicher
// ---------------------------------------------------------------------------

/// Alle Datensaetze der Steuerebene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZustandsSpeicher {
    pub connector: ConnectorInfo,
    pub account: AccountInfo,
    pub session: SessionInfo,
    pub audio: AudioState,
    pub orientierung: Orientierung,
}

impl ZustandsSpeicher {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Connector-Shutdown: Handle leeren, Audio und Orientierung zuruecksetzen
    pub fn connector_beenden(&mut self) {
        self.connector.handle.clear();
        self.connector.audio = AudioSpiegel::default();
        self.audio = AudioState::default();
        self.orientierung = Orientierung::default();
    }

    /// Setzt alle Datensaetze zurueck (Verbindungsende)
    pub fn leeren(&mut self) {
        *self = Self::default();
    }
}

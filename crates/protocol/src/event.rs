//! Asynchrone Events
//!
//! Events tragen keine Request-ID, sondern die Handles der Entitaeten, die
//! sie beschreiben. Zwei Event-Typen haben je nach Protokollversion einen
//! anderen Namen.

use crate::config::ProtokollKonfig;
use crate::message::NACHRICHTEN_ENDE;
use crate::response::feld;
use crate::xml::maskieren;
use std::fmt::Write;

/// Login-Zustand "angemeldet"
pub const LOGIN_ANGEMELDET: u32 = 1;
/// Session-Zustand "verbunden"
pub const SESSION_VERBUNDEN: u32 = 4;
/// Session-Zustand "getrennt"
pub const SESSION_GETRENNT: u32 = 5;
/// Teilnehmer-Zustand "hinzugefuegt"
pub const TEILNEHMER_HINZUGEFUEGT: u32 = 7;
/// Medienstrom-Zustand "getrennt"
pub const MEDIEN_GETRENNT: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginStatus {
    pub account_handle: String,
    pub status_code: String,
    pub status_string: String,
    pub zustand: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStatus {
    pub session_handle: String,
    pub status_code: String,
    pub status_string: String,
    pub zustand: u32,
    pub uri: String,
    pub ist_kanal: bool,
    pub kanal_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeilnehmerStatus {
    pub status_code: String,
    pub status_string: String,
    pub zustand: u32,
    pub teilnehmer_uri: String,
    pub account_name: String,
    pub anzeige_name: String,
    pub teilnehmer_typ: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeilnehmerEigenschaften {
    pub session_handle: String,
    pub teilnehmer_uri: String,
    pub lokal_stumm: bool,
    pub moderator_stumm: bool,
    pub lautstaerke: f32,
    pub energie: f32,
    pub spricht: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioEigenschaften {
    pub mikrofon_aktiv: bool,
    pub mikrofon_energie: f32,
    pub mikrofon_lautstaerke: f32,
    pub lautsprecher_lautstaerke: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedienStatus {
    pub session_handle: String,
    pub session_gruppen_handle: String,
    pub zustand: u32,
    pub status_code: String,
    pub status_string: String,
    pub eingehend: bool,
}

/// Alle Event-Typen des Protokolls
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoginStateChange(LoginStatus),
    SessionStateChange(SessionStatus),
    ParticipantStateChange(TeilnehmerStatus),
    ParticipantProperties(TeilnehmerEigenschaften),
    AuxAudioProperties(AudioEigenschaften),
    MediaStreamUpdated(MedienStatus),
}

impl Event {
    /// Event-Name fuer das `type`-Attribut
    pub fn typ_name(&self, konfig: &ProtokollKonfig) -> &'static str {
        match self {
            Self::LoginStateChange(_) if konfig.ist_kompatibel() => "AccountLoginStateChangeEvent",
            Self::LoginStateChange(_) => "LoginStateChangeEvent",
            Self::SessionStateChange(_) => "SessionStateChangeEvent",
            Self::ParticipantStateChange(_) => "ParticipantStateChangeEvent",
            Self::ParticipantProperties(_) if konfig.ist_kompatibel() => "ParticipantUpdatedEvent",
            Self::ParticipantProperties(_) => "ParticipantPropertiesEvent",
            Self::AuxAudioProperties(_) => "AuxAudioPropertiesEvent",
            Self::MediaStreamUpdated(_) => "MediaStreamUpdatedEvent",
        }
    }

    /// Kanonische Textform inklusive Nachrichten-Ende
    pub fn serialisieren(&self, konfig: &ProtokollKonfig) -> String {
        let mut out = String::with_capacity(256);
        let _ = write!(out, r#"<Event type="{}">"#, self.typ_name(konfig));

        match self {
            Self::LoginStateChange(e) => {
                feld(&mut out, "AccountHandle", &e.account_handle);
                status(&mut out, &e.status_code, &e.status_string, konfig.ok_code());
                zahl(&mut out, "State", e.zustand);
            }
            Self::SessionStateChange(e) => {
                feld(&mut out, "SessionHandle", &e.session_handle);
                status(&mut out, &e.status_code, &e.status_string, "0");
                zahl(&mut out, "State", e.zustand);
                feld(&mut out, "URI", &e.uri);
                zahl(&mut out, "IsChannel", e.ist_kanal);
                feld(&mut out, "ChannelName", &e.kanal_name);
            }
            Self::ParticipantStateChange(e) => {
                status(&mut out, &e.status_code, &e.status_string, "0");
                zahl(&mut out, "State", e.zustand);
                feld(&mut out, "ParticipantURI", &e.teilnehmer_uri);
                feld(&mut out, "AccountName", &e.account_name);
                feld(&mut out, "DisplayName", &e.anzeige_name);
                zahl(&mut out, "ParticipantType", e.teilnehmer_typ);
            }
            Self::ParticipantProperties(e) => {
                feld(&mut out, "SessionHandle", &e.session_handle);
                feld(&mut out, "ParticipantURI", &e.teilnehmer_uri);
                zahl(&mut out, "IsLocallyMuted", e.lokal_stumm);
                zahl(&mut out, "IsModeratorMuted", e.moderator_stumm);
                zahl(&mut out, "Volume", e.lautstaerke);
                zahl(&mut out, "Energy", e.energie);
                zahl(&mut out, "IsSpeaking", e.spricht);
            }
            Self::AuxAudioProperties(e) => {
                zahl(&mut out, "MicIsActive", e.mikrofon_aktiv);
                zahl(&mut out, "MicEnergy", e.mikrofon_energie);
                zahl(&mut out, "MicVolume", e.mikrofon_lautstaerke);
                zahl(&mut out, "SpeakerVolume", e.lautsprecher_lautstaerke);
            }
            Self::MediaStreamUpdated(e) => {
                feld(&mut out, "SessionHandle", &e.session_handle);
                feld(&mut out, "SessionGroupHandle", &e.session_gruppen_handle);
                zahl(&mut out, "State", e.zustand);
                status(&mut out, &e.status_code, &e.status_string, "0");
                zahl(&mut out, "Incoming", e.eingehend);
            }
        }

        out.push_str("</Event>");
        out.push_str(NACHRICHTEN_ENDE);
        out
    }
}

fn status(out: &mut String, code: &str, text: &str, ok_code: &str) {
    let code = if code.is_empty() { ok_code } else { code };
    let text = if text.is_empty() { "OK" } else { text };
    let _ = write!(
        out,
        "<StatusCode>{}</StatusCode><StatusString>{}</StatusString>",
        maskieren(code),
        maskieren(text)
    );
}

fn zahl(out: &mut String, name: &str, wert: impl std::fmt::Display) {
    let _ = write!(out, "<{name}>{wert}</{name}>");
}

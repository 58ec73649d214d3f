//! Responses (Antworten auf Requests)
//!
//! Jede Anfrage erzeugt genau eine Response. Die Serialisierung ist eine
//! reine Funktion der Felder; leere Status-Felder werden als `0` / `OK`
//! ausgegeben.

use crate::action::AktionsTyp;
use crate::command::Anfrage;
use crate::message::NACHRICHTEN_ENDE;
use crate::xml::maskieren;
use std::fmt::Write;
use voicegate_core::GatewayError;

/// Geraeteliste fuer GetCaptureDevices / GetRenderDevices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeraeteListe {
    pub geraete: Vec<String>,
    pub aktuell: String,
}

/// Variantenspezifische Ergebnisfelder, eine Variante pro Aktion
#[derive(Debug, Clone, PartialEq)]
pub enum AntwortDaten {
    AuxCaptureAudioStart,
    AuxCaptureAudioStop,
    AuxGetCaptureDevices(GeraeteListe),
    AuxGetRenderDevices(GeraeteListe),
    AuxSetCaptureDevice,
    AuxSetRenderDevice,
    AuxSetMicLevel,
    AuxSetSpeakerLevel,
    AccountLogin { account_handle: String },
    AccountLogout,
    AccountBlockListRules,
    AccountListAutoAcceptRules,
    ConnectorCreate { version_id: String, connector_handle: String },
    ConnectorInitiateShutdown,
    ConnectorMuteLocalMic,
    ConnectorMuteLocalSpeaker,
    ConnectorSetLocalMicVolume,
    ConnectorSetLocalSpeakerVolume,
    SessionCreate { session_handle: String },
    SessionTerminate,
    SessionConnect,
    SessionSet3DPosition,
    SessionSetParticipantMuteForMe,
    SessionSetParticipantVolumeForMe,
    SessionMediaDisconnect,
    SessionRenderAudioStart,
    SessionRenderAudioStop,
}

impl From<AktionsTyp> for AntwortDaten {
    fn from(typ: AktionsTyp) -> Self {
        match typ {
            AktionsTyp::AuxCaptureAudioStart => Self::AuxCaptureAudioStart,
            AktionsTyp::AuxCaptureAudioStop => Self::AuxCaptureAudioStop,
            AktionsTyp::AuxGetCaptureDevices => Self::AuxGetCaptureDevices(GeraeteListe::default()),
            AktionsTyp::AuxGetRenderDevices => Self::AuxGetRenderDevices(GeraeteListe::default()),
            AktionsTyp::AuxSetCaptureDevice => Self::AuxSetCaptureDevice,
            AktionsTyp::AuxSetRenderDevice => Self::AuxSetRenderDevice,
            AktionsTyp::AuxSetMicLevel => Self::AuxSetMicLevel,
            AktionsTyp::AuxSetSpeakerLevel => Self::AuxSetSpeakerLevel,
            AktionsTyp::AccountLogin => Self::AccountLogin {
                account_handle: String::new(),
            },
            AktionsTyp::AccountLogout => Self::AccountLogout,
            AktionsTyp::AccountBlockListRules => Self::AccountBlockListRules,
            AktionsTyp::AccountListAutoAcceptRules => Self::AccountListAutoAcceptRules,
            AktionsTyp::ConnectorCreate => Self::ConnectorCreate {
                version_id: String::new(),
                connector_handle: String::new(),
            },
            AktionsTyp::ConnectorInitiateShutdown => Self::ConnectorInitiateShutdown,
            AktionsTyp::ConnectorMuteLocalMic => Self::ConnectorMuteLocalMic,
            AktionsTyp::ConnectorMuteLocalSpeaker => Self::ConnectorMuteLocalSpeaker,
            AktionsTyp::ConnectorSetLocalMicVolume => Self::ConnectorSetLocalMicVolume,
            AktionsTyp::ConnectorSetLocalSpeakerVolume => Self::ConnectorSetLocalSpeakerVolume,
            AktionsTyp::SessionCreate => Self::SessionCreate {
                session_handle: String::new(),
            },
            AktionsTyp::SessionTerminate => Self::SessionTerminate,
            AktionsTyp::SessionConnect => Self::SessionConnect,
            AktionsTyp::SessionSet3DPosition => Self::SessionSet3DPosition,
            AktionsTyp::SessionSetParticipantMuteForMe => Self::SessionSetParticipantMuteForMe,
            AktionsTyp::SessionSetParticipantVolumeForMe => Self::SessionSetParticipantVolumeForMe,
            AktionsTyp::SessionMediaDisconnect => Self::SessionMediaDisconnect,
            AktionsTyp::SessionRenderAudioStart => Self::SessionRenderAudioStart,
            AktionsTyp::SessionRenderAudioStop => Self::SessionRenderAudioStop,
        }
    }
}

impl AntwortDaten {
    /// Aktions-Typ, zu dem diese Ergebnisfelder gehoeren
    pub fn typ(&self) -> AktionsTyp {
        match self {
            Self::AuxCaptureAudioStart => AktionsTyp::AuxCaptureAudioStart,
            Self::AuxCaptureAudioStop => AktionsTyp::AuxCaptureAudioStop,
            Self::AuxGetCaptureDevices(_) => AktionsTyp::AuxGetCaptureDevices,
            Self::AuxGetRenderDevices(_) => AktionsTyp::AuxGetRenderDevices,
            Self::AuxSetCaptureDevice => AktionsTyp::AuxSetCaptureDevice,
            Self::AuxSetRenderDevice => AktionsTyp::AuxSetRenderDevice,
            Self::AuxSetMicLevel => AktionsTyp::AuxSetMicLevel,
            Self::AuxSetSpeakerLevel => AktionsTyp::AuxSetSpeakerLevel,
            Self::AccountLogin { .. } => AktionsTyp::AccountLogin,
            Self::AccountLogout => AktionsTyp::AccountLogout,
            Self::AccountBlockListRules => AktionsTyp::AccountBlockListRules,
            Self::AccountListAutoAcceptRules => AktionsTyp::AccountListAutoAcceptRules,
            Self::ConnectorCreate { .. } => AktionsTyp::ConnectorCreate,
            Self::ConnectorInitiateShutdown => AktionsTyp::ConnectorInitiateShutdown,
            Self::ConnectorMuteLocalMic => AktionsTyp::ConnectorMuteLocalMic,
            Self::ConnectorMuteLocalSpeaker => AktionsTyp::ConnectorMuteLocalSpeaker,
            Self::ConnectorSetLocalMicVolume => AktionsTyp::ConnectorSetLocalMicVolume,
            Self::ConnectorSetLocalSpeakerVolume => AktionsTyp::ConnectorSetLocalSpeakerVolume,
            Self::SessionCreate { .. } => AktionsTyp::SessionCreate,
            Self::SessionTerminate => AktionsTyp::SessionTerminate,
            Self::SessionConnect => AktionsTyp::SessionConnect,
            Self::SessionSet3DPosition => AktionsTyp::SessionSet3DPosition,
            Self::SessionSetParticipantMuteForMe => AktionsTyp::SessionSetParticipantMuteForMe,
            Self::SessionSetParticipantVolumeForMe => AktionsTyp::SessionSetParticipantVolumeForMe,
            Self::SessionMediaDisconnect => AktionsTyp::SessionMediaDisconnect,
            Self::SessionRenderAudioStart => AktionsTyp::SessionRenderAudioStart,
            Self::SessionRenderAudioStop => AktionsTyp::SessionRenderAudioStop,
        }
    }

    /// v1.22-Kompatibilitaets-Responses melden immer 0 / OK
    fn status_fest(&self) -> bool {
        matches!(
            self,
            Self::AccountBlockListRules
                | Self::AccountListAutoAcceptRules
                | Self::SessionMediaDisconnect
        )
    }

    fn felder_schreiben(&self, out: &mut String) {
        match self {
            Self::AuxGetCaptureDevices(liste) => {
                geraete_schreiben(out, "Capture", liste);
            }
            Self::AuxGetRenderDevices(liste) => {
                geraete_schreiben(out, "Render", liste);
            }
            Self::AccountLogin { account_handle } => {
                feld(out, "AccountHandle", account_handle);
            }
            Self::ConnectorCreate {
                version_id,
                connector_handle,
            } => {
                feld(out, "VersionID", version_id);
                feld(out, "ConnectorHandle", connector_handle);
            }
            Self::SessionCreate { session_handle } => {
                feld(out, "SessionHandle", session_handle);
            }
            _ => {}
        }
    }
}

/// Antwort auf genau eine Anfrage
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub request_id: String,
    pub action: String,
    pub return_code: u32,
    /// Leer = "0"
    pub status_code: String,
    /// Leer = "OK"
    pub status_string: String,
    /// Unveraendert gespiegeltes Eingabedokument
    pub input_xml: String,
    /// `None` bei Fehler-Responses ohne erkannte Aktion
    pub daten: Option<AntwortDaten>,
}

impl Response {
    /// Standard-Response fuer eine dekodierte Anfrage
    pub fn fuer_anfrage(anfrage: &Anfrage) -> Self {
        Self {
            request_id: anfrage.request_id.clone(),
            action: anfrage.action.clone(),
            return_code: 0,
            status_code: String::new(),
            status_string: String::new(),
            input_xml: anfrage.eingabe_xml.clone(),
            daten: Some(AntwortDaten::from(anfrage.typ())),
        }
    }

    /// Vom Gateway selbst erzeugte Response mit kanonischem Aktionsnamen
    pub fn synthetisch(typ: AktionsTyp, request_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            action: typ.kanonischer_name().to_string(),
            return_code: 0,
            status_code: String::new(),
            status_string: String::new(),
            input_xml: String::new(),
            daten: Some(AntwortDaten::from(typ)),
        }
    }

    /// Fehler-Response (ReturnCode 1, StatusCode = Fehler-Code)
    pub fn fehler(request_id: &str, action: &str, eingabe: &str, fehler: &GatewayError) -> Self {
        Self {
            request_id: request_id.to_string(),
            action: action.to_string(),
            return_code: 1,
            status_code: fehler.fehler_code().to_string(),
            status_string: fehler.to_string(),
            input_xml: eingabe.to_string(),
            daten: None,
        }
    }

    /// Aktions-Typ der Ergebnisfelder, falls vorhanden
    pub fn typ(&self) -> Option<AktionsTyp> {
        self.daten.as_ref().map(AntwortDaten::typ)
    }

    /// Kanonische Textform inklusive Nachrichten-Ende
    pub fn serialisieren(&self) -> String {
        let fest = self.daten.as_ref().is_some_and(AntwortDaten::status_fest);
        let status_code = if fest || self.status_code.is_empty() {
            "0"
        } else {
            self.status_code.as_str()
        };
        let status_string = if fest || self.status_string.is_empty() {
            "OK"
        } else {
            self.status_string.as_str()
        };

        let mut out = String::with_capacity(256 + self.input_xml.len());
        let _ = write!(
            out,
            r#"<Response requestId="{}" action="{}"><ReturnCode>{}</ReturnCode><Results>"#,
            maskieren(&self.request_id),
            maskieren(&self.action),
            self.return_code
        );
        feld(&mut out, "StatusCode", status_code);
        feld(&mut out, "StatusString", status_string);
        if let Some(daten) = &self.daten {
            daten.felder_schreiben(&mut out);
        }
        out.push_str("</Results><InputXml>");
        out.push_str(&self.input_xml);
        out.push_str("</InputXml></Response>");
        out.push_str(NACHRICHTEN_ENDE);
        out
    }
}

pub(crate) fn feld(out: &mut String, name: &str, wert: &str) {
    let _ = write!(out, "<{name}>{}</{name}>", maskieren(wert));
}

fn geraete_schreiben(out: &mut String, art: &str, liste: &GeraeteListe) {
    let _ = write!(out, "<{art}Devices>");
    for geraet in &liste.geraete {
        let _ = write!(
            out,
            "<{art}Device><Device>{}</Device></{art}Device>",
            maskieren(geraet)
        );
    }
    let _ = write!(
        out,
        "</{art}Devices><Current{art}Device><Device>{}</Device></Current{art}Device>",
        maskieren(&liste.aktuell)
    );
}

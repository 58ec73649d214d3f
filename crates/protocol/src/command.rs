//! Befehle (dekodierte Requests)
//!
//! Ein eingehendes XML-Dokument wird atomar in genau eine [`Befehl`]-Variante
//! uebersetzt. Fehlt ein Pflichtfeld, entsteht kein Teil-Befehl, sondern ein
//! [`DekodierFehler`] mit dem Namen des Feldes.

use crate::action::AktionsTyp;
use crate::response::Response;
use crate::xml::Element;
use voicegate_core::{GatewayError, Pose, Vektor3};

// ---------------------------------------------------------------------------
// Variantenfelder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AccountLogin {
    pub connector_handle: String,
    pub account_name: String,
    pub account_password: String,
    pub account_uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorCreate {
    pub account_management_server: String,
    pub proxy_management_server: Option<String>,
    pub client_name: Option<String>,
}

/// Connector-Handle plus Rohwert (Mute- und Lautstaerke-Befehle)
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorWert {
    pub connector_handle: String,
    pub wert: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionCreate {
    pub account_handle: String,
    pub uri: String,
    pub name: Option<String>,
    pub passwort: Option<String>,
    /// Verbindungstyp (`Type`), 0 = Privatchat, 1 = Server
    pub verbindungs_typ: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Position3D {
    pub session_handle: String,
    pub sprecher: Pose,
    pub zuhoerer: Pose,
}

/// Einstellung fuer einen einzelnen Teilnehmer
#[derive(Debug, Clone, PartialEq)]
pub struct TeilnehmerWert {
    pub session_handle: String,
    pub teilnehmer_uri: String,
    pub wert: String,
}

/// Geschlossene Menge aller Befehle, eine Variante pro Aktion
#[derive(Debug, Clone, PartialEq)]
pub enum Befehl {
    AuxCaptureAudioStart { dauer: String },
    AuxCaptureAudioStop,
    AuxGetCaptureDevices,
    AuxGetRenderDevices,
    AuxSetCaptureDevice { geraet: String },
    AuxSetRenderDevice { geraet: String },
    AuxSetMicLevel { pegel: String },
    AuxSetSpeakerLevel { pegel: String },

    AccountLogin(AccountLogin),
    AccountLogout { account_handle: String },
    AccountBlockListRules,
    AccountListAutoAcceptRules,

    ConnectorCreate(ConnectorCreate),
    ConnectorInitiateShutdown { connector_handle: String },
    ConnectorMuteLocalMic(ConnectorWert),
    ConnectorMuteLocalSpeaker(ConnectorWert),
    ConnectorSetLocalMicVolume(ConnectorWert),
    ConnectorSetLocalSpeakerVolume(ConnectorWert),

    SessionCreate(SessionCreate),
    SessionTerminate { session_handle: String },
    SessionConnect { session_handle: String, audio_media: String },
    SessionSet3DPosition(Position3D),
    SessionSetParticipantMuteForMe(TeilnehmerWert),
    SessionSetParticipantVolumeForMe(TeilnehmerWert),
    SessionMediaDisconnect,
    SessionRenderAudioStart,
    SessionRenderAudioStop,
}

impl Befehl {
    /// Aktions-Typ dieser Variante
    pub fn typ(&self) -> AktionsTyp {
        match self {
            Self::AuxCaptureAudioStart { .. } => AktionsTyp::AuxCaptureAudioStart,
            Self::AuxCaptureAudioStop => AktionsTyp::AuxCaptureAudioStop,
            Self::AuxGetCaptureDevices => AktionsTyp::AuxGetCaptureDevices,
            Self::AuxGetRenderDevices => AktionsTyp::AuxGetRenderDevices,
            Self::AuxSetCaptureDevice { .. } => AktionsTyp::AuxSetCaptureDevice,
            Self::AuxSetRenderDevice { .. } => AktionsTyp::AuxSetRenderDevice,
            Self::AuxSetMicLevel { .. } => AktionsTyp::AuxSetMicLevel,
            Self::AuxSetSpeakerLevel { .. } => AktionsTyp::AuxSetSpeakerLevel,
            Self::AccountLogin(_) => AktionsTyp::AccountLogin,
            Self::AccountLogout { .. } => AktionsTyp::AccountLogout,
            Self::AccountBlockListRules => AktionsTyp::AccountBlockListRules,
            Self::AccountListAutoAcceptRules => AktionsTyp::AccountListAutoAcceptRules,
            Self::ConnectorCreate(_) => AktionsTyp::ConnectorCreate,
            Self::ConnectorInitiateShutdown { .. } => AktionsTyp::ConnectorInitiateShutdown,
            Self::ConnectorMuteLocalMic(_) => AktionsTyp::ConnectorMuteLocalMic,
            Self::ConnectorMuteLocalSpeaker(_) => AktionsTyp::ConnectorMuteLocalSpeaker,
            Self::ConnectorSetLocalMicVolume(_) => AktionsTyp::ConnectorSetLocalMicVolume,
            Self::ConnectorSetLocalSpeakerVolume(_) => AktionsTyp::ConnectorSetLocalSpeakerVolume,
            Self::SessionCreate(_) => AktionsTyp::SessionCreate,
            Self::SessionTerminate { .. } => AktionsTyp::SessionTerminate,
            Self::SessionConnect { .. } => AktionsTyp::SessionConnect,
            Self::SessionSet3DPosition(_) => AktionsTyp::SessionSet3DPosition,
            Self::SessionSetParticipantMuteForMe(_) => AktionsTyp::SessionSetParticipantMuteForMe,
            Self::SessionSetParticipantVolumeForMe(_) => {
                AktionsTyp::SessionSetParticipantVolumeForMe
            }
            Self::SessionMediaDisconnect => AktionsTyp::SessionMediaDisconnect,
            Self::SessionRenderAudioStart => AktionsTyp::SessionRenderAudioStart,
            Self::SessionRenderAudioStop => AktionsTyp::SessionRenderAudioStop,
        }
    }

    /// Dekodiert die Variantenfelder aus dem Wurzelelement
    pub fn dekodieren(typ: AktionsTyp, wurzel: &Element) -> Result<Befehl, GatewayError> {
        let befehl = match typ {
            AktionsTyp::AuxCaptureAudioStart => Self::AuxCaptureAudioStart {
                dauer: pflicht(wurzel, "Duration")?,
            },
            AktionsTyp::AuxCaptureAudioStop => Self::AuxCaptureAudioStop,
            AktionsTyp::AuxGetCaptureDevices => Self::AuxGetCaptureDevices,
            AktionsTyp::AuxGetRenderDevices => Self::AuxGetRenderDevices,
            AktionsTyp::AuxSetCaptureDevice => Self::AuxSetCaptureDevice {
                geraet: pflicht(wurzel, "CaptureDeviceSpecifier")?,
            },
            AktionsTyp::AuxSetRenderDevice => Self::AuxSetRenderDevice {
                geraet: pflicht(wurzel, "RenderDeviceSpecifier")?,
            },
            AktionsTyp::AuxSetMicLevel => Self::AuxSetMicLevel {
                pegel: pflicht(wurzel, "Level")?,
            },
            AktionsTyp::AuxSetSpeakerLevel => Self::AuxSetSpeakerLevel {
                pegel: pflicht(wurzel, "Level")?,
            },

            AktionsTyp::AccountLogin => Self::AccountLogin(AccountLogin {
                connector_handle: pflicht(wurzel, "ConnectorHandle")?,
                account_name: pflicht(wurzel, "AccountName")?,
                account_password: pflicht(wurzel, "AccountPassword")?,
                account_uri: pflicht(wurzel, "AccountURI")?,
            }),
            AktionsTyp::AccountLogout => Self::AccountLogout {
                account_handle: pflicht(wurzel, "AccountHandle")?,
            },
            AktionsTyp::AccountBlockListRules => Self::AccountBlockListRules,
            AktionsTyp::AccountListAutoAcceptRules => Self::AccountListAutoAcceptRules,

            AktionsTyp::ConnectorCreate => Self::ConnectorCreate(ConnectorCreate {
                account_management_server: pflicht(wurzel, "AccountManagementServer")?,
                proxy_management_server: optional(wurzel, "ProxyManagementServer"),
                client_name: optional(wurzel, "ClientName"),
            }),
            AktionsTyp::ConnectorInitiateShutdown => Self::ConnectorInitiateShutdown {
                connector_handle: pflicht(wurzel, "ConnectorHandle")?,
            },
            AktionsTyp::ConnectorMuteLocalMic => {
                Self::ConnectorMuteLocalMic(ConnectorWert::dekodieren(wurzel)?)
            }
            AktionsTyp::ConnectorMuteLocalSpeaker => {
                Self::ConnectorMuteLocalSpeaker(ConnectorWert::dekodieren(wurzel)?)
            }
            AktionsTyp::ConnectorSetLocalMicVolume => {
                Self::ConnectorSetLocalMicVolume(ConnectorWert::dekodieren(wurzel)?)
            }
            AktionsTyp::ConnectorSetLocalSpeakerVolume => {
                Self::ConnectorSetLocalSpeakerVolume(ConnectorWert::dekodieren(wurzel)?)
            }

            AktionsTyp::SessionCreate => Self::SessionCreate(SessionCreate {
                account_handle: pflicht(wurzel, "AccountHandle")?,
                uri: pflicht(wurzel, "URI")?,
                name: optional(wurzel, "Name"),
                passwort: optional(wurzel, "Password"),
                verbindungs_typ: optional(wurzel, "Type"),
            }),
            AktionsTyp::SessionTerminate => Self::SessionTerminate {
                session_handle: pflicht(wurzel, "SessionHandle")?,
            },
            AktionsTyp::SessionConnect => Self::SessionConnect {
                session_handle: pflicht(wurzel, "SessionHandle")?,
                audio_media: pflicht(wurzel, "AudioMedia")?,
            },
            AktionsTyp::SessionSet3DPosition => Self::SessionSet3DPosition(Position3D {
                session_handle: pflicht(wurzel, "SessionHandle")?,
                sprecher: pose(wurzel, "SpeakerPosition")?,
                zuhoerer: pose(wurzel, "ListenerPosition")?,
            }),
            AktionsTyp::SessionSetParticipantMuteForMe => {
                Self::SessionSetParticipantMuteForMe(TeilnehmerWert::dekodieren(wurzel, "Mute")?)
            }
            AktionsTyp::SessionSetParticipantVolumeForMe => Self::SessionSetParticipantVolumeForMe(
                TeilnehmerWert::dekodieren(wurzel, "Volume")?,
            ),
            AktionsTyp::SessionMediaDisconnect => Self::SessionMediaDisconnect,
            AktionsTyp::SessionRenderAudioStart => Self::SessionRenderAudioStart,
            AktionsTyp::SessionRenderAudioStop => Self::SessionRenderAudioStop,
        };
        Ok(befehl)
    }
}

impl ConnectorWert {
    fn dekodieren(wurzel: &Element) -> Result<Self, GatewayError> {
        Ok(Self {
            connector_handle: pflicht(wurzel, "ConnectorHandle")?,
            wert: pflicht(wurzel, "Value")?,
        })
    }
}

impl TeilnehmerWert {
    fn dekodieren(wurzel: &Element, wert_feld: &str) -> Result<Self, GatewayError> {
        Ok(Self {
            session_handle: pflicht(wurzel, "SessionHandle")?,
            teilnehmer_uri: pflicht(wurzel, "ParticipantURI")?,
            wert: pflicht(wurzel, wert_feld)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Anfrage
// ---------------------------------------------------------------------------

/// Vollstaendig dekodierte Anfrage
#[derive(Debug, Clone, PartialEq)]
pub struct Anfrage {
    pub request_id: String,
    /// Aktions-String wie vom Client gesendet (wird in der Response gespiegelt)
    pub action: String,
    /// Rohes Eingabedokument (fuer `InputXml`)
    pub eingabe_xml: String,
    pub befehl: Befehl,
}

impl Anfrage {
    /// Klassifiziert und dekodiert ein rohes Eingabedokument
    pub fn dekodieren(eingabe: &str) -> Result<Anfrage, DekodierFehler> {
        let mut fehler = DekodierFehler {
            request_id: String::new(),
            action: String::new(),
            eingabe: eingabe.to_string(),
            typ: None,
            fehler: GatewayError::UngueltigesXml(String::new()),
        };

        let wurzel = match Element::parsen(eingabe) {
            Ok(w) => w,
            Err(e) => return Err(fehler.mit(e)),
        };

        // Was extrahiert werden kann, wird im Fehlerfall gespiegelt
        fehler.request_id = wurzel.attribut("requestId").unwrap_or_default().to_string();
        fehler.action = wurzel.attribut("action").unwrap_or_default().to_string();

        let request_id = match wurzel.attribut("requestId") {
            Some(id) => id.to_string(),
            None => return Err(fehler.mit(GatewayError::dekodierung("requestId"))),
        };
        let action = match wurzel.attribut("action") {
            Some(a) => a.to_string(),
            None => return Err(fehler.mit(GatewayError::dekodierung("action"))),
        };

        let typ = match AktionsTyp::klassifizieren(&action) {
            Ok(t) => t,
            Err(e) => return Err(fehler.mit(e)),
        };
        fehler.typ = Some(typ);

        let befehl = match Befehl::dekodieren(typ, &wurzel) {
            Ok(b) => b,
            Err(e) => return Err(fehler.mit(e)),
        };

        Ok(Anfrage {
            request_id,
            action,
            eingabe_xml: eingabe.to_string(),
            befehl,
        })
    }

    pub fn typ(&self) -> AktionsTyp {
        self.befehl.typ()
    }

    /// Standard-Response dieser Anfrage (ReturnCode 0, Status OK)
    pub fn antwort(&self) -> Response {
        Response::fuer_anfrage(self)
    }
}

/// Fehlgeschlagene Dekodierung mit allem, was fuer die Fehler-Response
/// extrahiert werden konnte
#[derive(Debug)]
pub struct DekodierFehler {
    pub request_id: String,
    pub action: String,
    pub eingabe: String,
    /// Erkannter Aktions-Typ, falls die Klassifizierung gelang
    pub typ: Option<AktionsTyp>,
    pub fehler: GatewayError,
}

impl DekodierFehler {
    fn mit(mut self, fehler: GatewayError) -> Self {
        self.fehler = fehler;
        self
    }

    /// Fehler-Response mit ReturnCode 1 und dem Fehler-Code als StatusCode
    pub fn antwort(&self) -> Response {
        Response::fehler(&self.request_id, &self.action, &self.eingabe, &self.fehler)
    }
}

impl std::fmt::Display for DekodierFehler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (requestId={:?}, action={:?})", self.fehler, self.request_id, self.action)
    }
}

impl std::error::Error for DekodierFehler {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.fehler)
    }
}

// ---------------------------------------------------------------------------
// Hilfsfunktionen
// ---------------------------------------------------------------------------

fn pflicht(wurzel: &Element, feld: &str) -> Result<String, GatewayError> {
    wurzel
        .kind_text(feld)
        .map(str::to_string)
        .ok_or_else(|| GatewayError::dekodierung(feld))
}

fn optional(wurzel: &Element, feld: &str) -> Option<String> {
    wurzel.kind_text(feld).map(str::to_string)
}

fn pose(wurzel: &Element, feld: &str) -> Result<Pose, GatewayError> {
    let element = wurzel
        .kind(feld)
        .ok_or_else(|| GatewayError::dekodierung(feld))?;
    Ok(Pose {
        position: vektor(element.kind("Position")),
        geschwindigkeit: vektor(element.kind("Velocity")),
        at: vektor(element.kind("AtOrientation")),
        up: vektor(element.kind("UpOrientation")),
        left: vektor(element.kind("LeftOrientation")),
    })
}

/// Liest X/Y/Z aus Attributen oder Kind-Elementen, fehlende Achsen sind 0
fn vektor(element: Option<&Element>) -> Vektor3 {
    let Some(e) = element else {
        return Vektor3::NULL;
    };
    let achse = |name: &str| {
        e.attribut(name)
            .or_else(|| e.kind_text(name))
            .map(als_f32)
            .unwrap_or(0.0)
    };
    Vektor3::neu(achse("X"), achse("Y"), achse("Z"))
}

/// Zahl wie `atof`: laengster gueltiger endlicher Praefix, sonst 0.0
///
/// `NaN` und Unendlich gelten nicht als Zahl.
pub fn als_f32(wert: &str) -> f32 {
    let endlich = |text: &str| text.parse::<f32>().ok().filter(|v| v.is_finite());
    let wert = wert.trim();
    if let Some(v) = endlich(wert) {
        return v;
    }
    (1..wert.len())
        .rev()
        .filter(|&ende| wert.is_char_boundary(ende))
        .find_map(|ende| endlich(&wert[..ende]))
        .unwrap_or(0.0)
}

/// Wahrheitswert aus `true`/`1` bzw. `false`/`0`
pub fn als_bool(wert: &str) -> Option<bool> {
    match wert.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anfrage(action: &str, felder: &str) -> String {
        format!(r#"<Request requestId="42" action="{action}">{felder}</Request>"#)
    }

    #[test]
    fn account_login_dekodieren() {
        let doc = anfrage(
            "Account.Login.1",
            "<ConnectorHandle>vgc-0001</ConnectorHandle><AccountName>alice</AccountName>\
             <AccountPassword>geheim</AccountPassword><AccountURI>sip:alice@example.org</AccountURI>",
        );
        let a = Anfrage::dekodieren(&doc).unwrap();
        assert_eq!(a.request_id, "42");
        assert_eq!(a.action, "Account.Login.1");
        assert_eq!(a.eingabe_xml, doc);
        match a.befehl {
            Befehl::AccountLogin(login) => {
                assert_eq!(login.account_name, "alice");
                assert_eq!(login.account_uri, "sip:alice@example.org");
            }
            andere => panic!("falsche Variante: {andere:?}"),
        }
    }

    #[test]
    fn fehlendes_pflichtfeld_nennt_feld() {
        let doc = anfrage(
            "Account.Login.1",
            "<ConnectorHandle>vgc-0001</ConnectorHandle><AccountName>alice</AccountName>\
             <AccountURI>sip:alice@example.org</AccountURI>",
        );
        let f = Anfrage::dekodieren(&doc).unwrap_err();
        assert_eq!(f.typ, Some(AktionsTyp::AccountLogin));
        assert_eq!(f.request_id, "42");
        match f.fehler {
            GatewayError::Dekodierung { feld } => assert_eq!(feld, "AccountPassword"),
            andere => panic!("falscher Fehler: {andere:?}"),
        }
    }

    #[test]
    fn unbekannte_aktion_gibt_fehler_response() {
        let f = Anfrage::dekodieren(&anfrage("Buddy.Add.1", "")).unwrap_err();
        assert!(matches!(f.fehler, GatewayError::UnbekannteAktion(_)));
        assert_eq!(f.typ, None);

        let r = f.antwort();
        assert_eq!(r.request_id, "42");
        assert_eq!(r.action, "Buddy.Add.1");
        assert_eq!(r.return_code, 1);
        assert_eq!(r.status_code, "1002");
        assert!(r.status_string.contains("Buddy.Add.1"));
    }

    #[test]
    fn fehlende_wurzel_attribute() {
        let f = Anfrage::dekodieren(r#"<Request action="Aux.CaptureAudioStop.1"/>"#).unwrap_err();
        assert!(matches!(f.fehler, GatewayError::Dekodierung { ref feld } if feld == "requestId"));

        let f = Anfrage::dekodieren(r#"<Request requestId="1"/>"#).unwrap_err();
        assert!(matches!(f.fehler, GatewayError::Dekodierung { ref feld } if feld == "action"));
        assert_eq!(f.request_id, "1");
    }

    #[test]
    fn kaputtes_xml() {
        let f = Anfrage::dekodieren("<Request requestId=").unwrap_err();
        assert!(matches!(f.fehler, GatewayError::UngueltigesXml(_)));
        assert_eq!(f.antwort().status_code, "1003");
    }

    #[test]
    fn connector_create_optionale_felder() {
        let doc = anfrage(
            "Connector.Create.1",
            "<AccountManagementServer>https://login.example.org/</AccountManagementServer>",
        );
        match Anfrage::dekodieren(&doc).unwrap().befehl {
            Befehl::ConnectorCreate(c) => {
                assert_eq!(c.account_management_server, "https://login.example.org/");
                assert_eq!(c.proxy_management_server, None);
                assert_eq!(c.client_name, None);
            }
            andere => panic!("falsche Variante: {andere:?}"),
        }
    }

    #[test]
    fn session_create_mit_typ() {
        let doc = anfrage(
            "Session.Create.1",
            "<AccountHandle>vga-0001</AccountHandle><URI>sip:conf@example.org</URI><Type>1</Type>",
        );
        match Anfrage::dekodieren(&doc).unwrap().befehl {
            Befehl::SessionCreate(s) => {
                assert_eq!(s.uri, "sip:conf@example.org");
                assert_eq!(s.verbindungs_typ.as_deref(), Some("1"));
                assert_eq!(s.name, None);
            }
            andere => panic!("falsche Variante: {andere:?}"),
        }
    }

    #[test]
    fn position_aus_attributen_und_kindern() {
        let doc = anfrage(
            "Session.Set3DPosition.1",
            r#"<SessionHandle>vgs-0001</SessionHandle>
               <SpeakerPosition>
                 <Position X="1.5" Y="2" Z="-3"/>
                 <AtOrientation><X>0</X><Y>1</Y><Z>0</Z></AtOrientation>
               </SpeakerPosition>
               <ListenerPosition><Position X="4"/></ListenerPosition>"#,
        );
        match Anfrage::dekodieren(&doc).unwrap().befehl {
            Befehl::SessionSet3DPosition(p) => {
                assert_eq!(p.sprecher.position, Vektor3::neu(1.5, 2.0, -3.0));
                assert_eq!(p.sprecher.at, Vektor3::neu(0.0, 1.0, 0.0));
                assert_eq!(p.sprecher.geschwindigkeit, Vektor3::NULL);
                assert_eq!(p.zuhoerer.position, Vektor3::neu(4.0, 0.0, 0.0));
            }
            andere => panic!("falsche Variante: {andere:?}"),
        }
    }

    #[test]
    fn position_ohne_zuhoerer_ist_fehler() {
        let doc = anfrage(
            "Session.Set3DPosition.1",
            "<SessionHandle>vgs-0001</SessionHandle><SpeakerPosition/>",
        );
        let f = Anfrage::dekodieren(&doc).unwrap_err();
        assert!(matches!(f.fehler, GatewayError::Dekodierung { ref feld } if feld == "ListenerPosition"));
    }

    #[test]
    fn teilnehmer_lautstaerke() {
        let doc = anfrage(
            "Session.SetParticipantVolumeForMe.1",
            "<SessionHandle>vgs-0001</SessionHandle><ParticipantURI>sip:bob@example.org</ParticipantURI>\
             <Volume>75</Volume>",
        );
        let a = Anfrage::dekodieren(&doc).unwrap();
        assert_eq!(a.typ(), AktionsTyp::SessionSetParticipantVolumeForMe);
        match a.befehl {
            Befehl::SessionSetParticipantVolumeForMe(t) => assert_eq!(t.wert, "75"),
            andere => panic!("falsche Variante: {andere:?}"),
        }
    }

    #[test]
    fn leeres_pflichtfeld_ist_vorhanden() {
        let doc = anfrage("Aux.SetRenderDevice.1", "<RenderDeviceSpecifier/>");
        match Anfrage::dekodieren(&doc).unwrap().befehl {
            Befehl::AuxSetRenderDevice { geraet } => assert!(geraet.is_empty()),
            andere => panic!("falsche Variante: {andere:?}"),
        }
    }

    #[test]
    fn zahlen_wie_atof() {
        assert_eq!(als_f32("0.5"), 0.5);
        assert_eq!(als_f32(" 42 "), 42.0);
        assert_eq!(als_f32("12abc"), 12.0);
        assert_eq!(als_f32("abc"), 0.0);
        assert_eq!(als_f32(""), 0.0);
        assert_eq!(als_f32("NaN"), 0.0);
        assert_eq!(als_f32("inf"), 0.0);
        assert_eq!(als_f32("-infinity"), 0.0);
        assert_eq!(als_f32("1e39"), 1000.0);
    }

    #[test]
    fn wahrheitswerte() {
        assert_eq!(als_bool("true"), Some(true));
        assert_eq!(als_bool("1"), Some(true));
        assert_eq!(als_bool("false"), Some(false));
        assert_eq!(als_bool("0"), Some(false));
        assert_eq!(als_bool("ja"), None);
    }
}

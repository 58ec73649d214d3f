//! Lebenszyklus-Zustandsmaschine
//!
//! ```text
//! Start --Verbindung--> Connector --Account--> Account --Session--> Session --Stop--> Stop
//! ```
//!
//! Jeder Zustand reagiert nur auf seine deklarierten Ereignisse. Eine
//! Reaktion liefert die ausgehenden Nachrichten und einen expliziten
//! Uebergang. Ein- und Austritt der Session tragen die Lebensdauer der
//! Call Bridge (Registrieren + Beitreten bzw. Verlassen).

use crate::apply::anwenden;
use crate::bridge::{CallBridge, GeraeteArt};
use crate::state::{SessionInfo, ZustandsSpeicher};
use voicegate_core::{GatewayError, SESSION_HANDLE};
use voicegate_protocol::event::{
    LoginStatus, SessionStatus, TeilnehmerEigenschaften, TeilnehmerStatus, LOGIN_ANGEMELDET,
    SESSION_GETRENNT, SESSION_VERBUNDEN, TEILNEHMER_HINZUGEFUEGT,
};
use voicegate_protocol::response::GeraeteListe;
use voicegate_protocol::{
    AktionsTyp, Anfrage, AntwortDaten, Event, Nachricht, ProtokollKonfig, Response,
};

// ---------------------------------------------------------------------------
// Kontext
// ---------------------------------------------------------------------------

/// Alles, worauf eine Reaktion zugreifen darf
pub struct Kontext<'a> {
    pub speicher: &'a mut ZustandsSpeicher,
    pub bridge: &'a mut dyn CallBridge,
    pub konfig: &'a ProtokollKonfig,
    /// Die Anfrage, die das Ereignis ausgeloest hat (None beim Zuruecksetzen)
    pub anfrage: Option<&'a Anfrage>,
}

impl Kontext<'_> {
    fn request_id(&self) -> &str {
        self.anfrage.map(|a| a.request_id.as_str()).unwrap_or_default()
    }

    /// Standard-Response der Anfrage, oder synthetisch falls der Typ abweicht
    fn antwort_fuer(&self, typ: AktionsTyp) -> Response {
        match self.anfrage {
            Some(a) if a.typ() == typ => a.antwort(),
            _ => Response::synthetisch(typ, self.request_id()),
        }
    }

    /// Wendet den Befehl der Anfrage an, wenn er den erwarteten Typ hat
    fn befehl_anwenden(&mut self, typ: AktionsTyp) {
        if let Some(a) = self.anfrage.filter(|a| a.typ() == typ) {
            anwenden(&a.befehl, self.speicher, self.bridge, self.konfig);
        }
    }
}

// ---------------------------------------------------------------------------
// Zustaende und Ereignisse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LebenszyklusZustand {
    Start,
    Connector,
    Account,
    Session,
    Stop,
}

impl LebenszyklusZustand {
    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Connector => "Connector",
            Self::Account => "Account",
            Self::Session => "Session",
            Self::Stop => "Stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LebenszyklusEreignis {
    Verbindung,
    Account,
    Session,
    Position,
    Stop,
}

impl LebenszyklusEreignis {
    pub fn name(self) -> &'static str {
        match self {
            Self::Verbindung => "Verbindung",
            Self::Account => "Account",
            Self::Session => "Session",
            Self::Position => "Position",
            Self::Stop => "Stop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uebergang {
    /// Ereignis verarbeitet, Zustand bleibt
    Bleiben,
    Wechsel(LebenszyklusZustand),
}

#[derive(Debug)]
pub struct Reaktion {
    pub uebergang: Uebergang,
    pub nachrichten: Vec<Nachricht>,
}

impl Reaktion {
    fn wechsel(ziel: LebenszyklusZustand, nachrichten: Vec<Nachricht>) -> Self {
        Self {
            uebergang: Uebergang::Wechsel(ziel),
            nachrichten,
        }
    }

    fn bleiben() -> Self {
        Self {
            uebergang: Uebergang::Bleiben,
            nachrichten: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Uebergangsfunktion
// ---------------------------------------------------------------------------

/// `(Zustand, Ereignis) -> (Uebergang, Nachrichten)`
///
/// Nicht deklarierte Kombinationen ergeben `UnzulaessigerUebergang`.
pub fn reaktion(
    zustand: LebenszyklusZustand,
    ereignis: LebenszyklusEreignis,
    ctx: &mut Kontext<'_>,
) -> Result<Reaktion, GatewayError> {
    use LebenszyklusEreignis as E;
    use LebenszyklusZustand as Z;

    match (zustand, ereignis) {
        (Z::Start, E::Verbindung) => Ok(start_verbindung(ctx)),
        (Z::Connector, E::Account) => Ok(connector_account(ctx)),
        (Z::Account, E::Session) => Ok(account_session(ctx)),
        (Z::Session, E::Position) => {
            // Nur ein echter Set3DPosition-Befehl veraendert die Orientierung
            ctx.befehl_anwenden(AktionsTyp::SessionSet3DPosition);
            Ok(Reaktion::bleiben())
        }
        (Z::Session, E::Stop) => Ok(Reaktion::wechsel(Z::Stop, Vec::new())),
        _ => Err(GatewayError::UnzulaessigerUebergang {
            zustand: zustand.name(),
            ereignis: ereignis.name(),
        }),
    }
}

fn start_verbindung(ctx: &mut Kontext<'_>) -> Reaktion {
    ctx.befehl_anwenden(AktionsTyp::ConnectorCreate);

    let mut nachrichten = Vec::with_capacity(3);
    nachrichten.push(geraete_antwort(ctx, GeraeteArt::Aufnahme).into());
    nachrichten.push(geraete_antwort(ctx, GeraeteArt::Wiedergabe).into());

    nachrichten.push(connector_create_antwort(ctx).into());

    Reaktion::wechsel(LebenszyklusZustand::Connector, nachrichten)
}

/// Connector.Create-Response ohne Handle
///
/// Der Handle wird erst von Idle.Initialisieren eingetragen.
pub(crate) fn connector_create_antwort(ctx: &Kontext<'_>) -> Response {
    let mut create = ctx.antwort_fuer(AktionsTyp::ConnectorCreate);
    create.daten = Some(AntwortDaten::ConnectorCreate {
        version_id: ctx.konfig.version_id.clone(),
        connector_handle: String::new(),
    });
    create
}

fn connector_account(ctx: &mut Kontext<'_>) -> Reaktion {
    ctx.befehl_anwenden(AktionsTyp::AccountLogin);
    let handle = ctx.speicher.account.handle.clone();

    let mut login = ctx.antwort_fuer(AktionsTyp::AccountLogin);
    login.daten = Some(AntwortDaten::AccountLogin {
        account_handle: handle.clone(),
    });
    let status = Event::LoginStateChange(LoginStatus {
        account_handle: handle,
        zustand: LOGIN_ANGEMELDET,
        ..Default::default()
    });

    Reaktion::wechsel(LebenszyklusZustand::Account, vec![login.into(), status.into()])
}

fn account_session(ctx: &mut Kontext<'_>) -> Reaktion {
    ctx.befehl_anwenden(AktionsTyp::SessionCreate);
    ctx.speicher.session.handle = SESSION_HANDLE.to_string();

    let session = &ctx.speicher.session;
    let account = &ctx.speicher.account;

    let mut create = ctx.antwort_fuer(AktionsTyp::SessionCreate);
    create.daten = Some(AntwortDaten::SessionCreate {
        session_handle: session.handle.clone(),
    });

    let session_status = Event::SessionStateChange(SessionStatus {
        session_handle: session.handle.clone(),
        zustand: SESSION_VERBUNDEN,
        uri: session.uri.clone(),
        ist_kanal: session.verbindungs_typ == "1",
        kanal_name: session.name.clone(),
        ..Default::default()
    });
    let teilnehmer_status = Event::ParticipantStateChange(TeilnehmerStatus {
        zustand: TEILNEHMER_HINZUGEFUEGT,
        teilnehmer_uri: account.uri.clone(),
        account_name: account.name.clone(),
        anzeige_name: account.name.clone(),
        ..Default::default()
    });
    let teilnehmer_eigenschaften = Event::ParticipantProperties(TeilnehmerEigenschaften {
        session_handle: session.handle.clone(),
        teilnehmer_uri: account.uri.clone(),
        ..Default::default()
    });

    Reaktion::wechsel(
        LebenszyklusZustand::Session,
        vec![
            create.into(),
            session_status.into(),
            teilnehmer_status.into(),
            teilnehmer_eigenschaften.into(),
        ],
    )
}

/// Response mit der Geraeteliste der Bridge
pub(crate) fn geraete_antwort(ctx: &Kontext<'_>, art: GeraeteArt) -> Response {
    let liste = GeraeteListe {
        geraete: ctx.bridge.audio_geraete(art),
        aktuell: ctx.bridge.aktuelles_geraet(art),
    };
    let (typ, daten) = match art {
        GeraeteArt::Aufnahme => (
            AktionsTyp::AuxGetCaptureDevices,
            AntwortDaten::AuxGetCaptureDevices(liste),
        ),
        GeraeteArt::Wiedergabe => (
            AktionsTyp::AuxGetRenderDevices,
            AntwortDaten::AuxGetRenderDevices(liste),
        ),
    };
    let mut antwort = ctx.antwort_fuer(typ);
    antwort.daten = Some(daten);
    antwort
}

// ---------------------------------------------------------------------------
// Ein- und Austritt
// ---------------------------------------------------------------------------

fn eintreten(zustand: LebenszyklusZustand, ctx: &mut Kontext<'_>) -> Vec<Nachricht> {
    tracing::debug!(zustand = zustand.name(), "Zustand betreten");

    if zustand == LebenszyklusZustand::Session {
        let session = &mut ctx.speicher.session;
        session.aktiv = true;
        session.bridge_fehler = None;

        let zugang = ctx.speicher.account.zugangsdaten();
        let uri = ctx.speicher.session.uri.clone();
        let ergebnis = ctx.bridge.registrieren(&zugang).and_then(|registrierung| {
            ctx.speicher.session.registrierung = registrierung;
            ctx.bridge.beitreten(&uri)
        });

        match ergebnis {
            Ok(()) => tracing::info!(
                uri = %uri,
                registrierung = %ctx.speicher.session.registrierung,
                "Call Bridge verbunden"
            ),
            Err(e) => {
                tracing::warn!(fehler = %e, "Call Bridge konnte nicht aufgebaut werden");
                ctx.speicher.session.bridge_fehler = Some(e.to_string());
            }
        }
    }
    Vec::new()
}

fn verlassen(zustand: LebenszyklusZustand, ctx: &mut Kontext<'_>) -> Vec<Nachricht> {
    tracing::debug!(zustand = zustand.name(), "Zustand verlassen");

    if zustand != LebenszyklusZustand::Session {
        return Vec::new();
    }

    let session = &mut ctx.speicher.session;
    match ctx.bridge.verlassen() {
        Ok(()) => tracing::info!(registrierung = %session.registrierung, "Call Bridge abgebaut"),
        Err(e) => tracing::warn!(fehler = %e, "Call Bridge konnte nicht abgebaut werden"),
    }

    let (status_code, status_string) = match session.bridge_fehler.take() {
        Some(fehler) => {
            let fehler = GatewayError::Backend(fehler);
            (fehler.fehler_code().to_string(), fehler.to_string())
        }
        None => (String::new(), String::new()),
    };
    let status = Event::SessionStateChange(SessionStatus {
        session_handle: session.handle.clone(),
        status_code,
        status_string,
        zustand: SESSION_GETRENNT,
        uri: session.uri.clone(),
        ist_kanal: session.verbindungs_typ == "1",
        kanal_name: session.name.clone(),
    });
    // Nach dem Austritt gibt es keine Session mehr
    *session = SessionInfo::default();

    let terminate = ctx.antwort_fuer(AktionsTyp::SessionTerminate);
    vec![terminate.into(), status.into()]
}

// ---------------------------------------------------------------------------
// Lebenszyklus
// ---------------------------------------------------------------------------

/// Zustandsmaschine des Lebenszyklus
#[derive(Debug)]
pub struct Lebenszyklus {
    zustand: LebenszyklusZustand,
}

impl Default for Lebenszyklus {
    fn default() -> Self {
        Self::neu()
    }
}

impl Lebenszyklus {
    pub fn neu() -> Self {
        Self {
            zustand: LebenszyklusZustand::Start,
        }
    }

    pub fn zustand(&self) -> LebenszyklusZustand {
        self.zustand
    }

    /// Verarbeitet ein Ereignis inklusive Austritt/Eintritt bei Wechsel
    pub fn reagieren(
        &mut self,
        ereignis: LebenszyklusEreignis,
        ctx: &mut Kontext<'_>,
    ) -> Result<Vec<Nachricht>, GatewayError> {
        let Reaktion {
            uebergang,
            mut nachrichten,
        } = reaktion(self.zustand, ereignis, ctx)?;

        if let Uebergang::Wechsel(ziel) = uebergang {
            nachrichten.extend(verlassen(self.zustand, ctx));
            tracing::debug!(
                von = self.zustand.name(),
                nach = ziel.name(),
                ereignis = ereignis.name(),
                "Zustandswechsel"
            );
            self.zustand = ziel;
            nachrichten.extend(eintreten(ziel, ctx));
        }
        Ok(nachrichten)
    }

    /// Zurueck nach Start; eine aktive Session wird regulaer verlassen
    pub fn zuruecksetzen(&mut self, ctx: &mut Kontext<'_>) -> Vec<Nachricht> {
        let nachrichten = verlassen(self.zustand, ctx);
        self.zustand = LebenszyklusZustand::Start;
        nachrichten
    }
}

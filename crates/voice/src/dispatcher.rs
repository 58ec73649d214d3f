//! Gateway – Klassifizierung, Dispatch und Antwortfolge
//!
//! Nimmt ein rohes Eingabedokument entgegen und liefert die geordnete
//! Folge ausgehender Nachrichten. Der Lebenszyklus und die
//! Connector-Region sind zwei kleine Maschinen, die hier pro Befehl
//! angesprochen werden.

use crate::apply::anwenden;
use crate::bridge::{CallBridge, GeraeteArt};
use crate::connector::{ConnectorEreignis, ConnectorRegion, ConnectorZustand};
use crate::lifecycle::{
    connector_create_antwort, geraete_antwort, Kontext, Lebenszyklus, LebenszyklusEreignis,
    LebenszyklusZustand,
};
use crate::state::ZustandsSpeicher;
use voicegate_core::GatewayError;
use voicegate_protocol::command::{als_bool, als_f32, TeilnehmerWert};
use voicegate_protocol::event::{
    AudioEigenschaften, MedienStatus, TeilnehmerEigenschaften, MEDIEN_GETRENNT,
};
use voicegate_protocol::{AktionsTyp, Anfrage, Befehl, Event, Nachricht, ProtokollKonfig};

/// Steuerebene eines Connectors
///
/// Besitzt Zustandsspeicher, Call Bridge und beide Regionen exklusiv.
/// Ein Befehl wird immer vollstaendig abgearbeitet, bevor der naechste
/// beginnt.
pub struct Gateway {
    konfig: ProtokollKonfig,
    speicher: ZustandsSpeicher,
    bridge: Box<dyn CallBridge>,
    lebenszyklus: Lebenszyklus,
    connector: ConnectorRegion,
}

impl Gateway {
    pub fn neu(konfig: ProtokollKonfig, bridge: Box<dyn CallBridge>) -> Self {
        tracing::debug!(version = konfig.version, "Gateway erstellt");
        Self {
            konfig,
            speicher: ZustandsSpeicher::neu(),
            bridge,
            lebenszyklus: Lebenszyklus::neu(),
            connector: ConnectorRegion::neu(),
        }
    }

    pub fn konfig(&self) -> &ProtokollKonfig {
        &self.konfig
    }

    pub fn speicher(&self) -> &ZustandsSpeicher {
        &self.speicher
    }

    pub fn zustand(&self) -> LebenszyklusZustand {
        self.lebenszyklus.zustand()
    }

    pub fn connector_zustand(&self) -> ConnectorZustand {
        self.connector.zustand()
    }

    /// Verarbeitet ein rohes Eingabedokument
    ///
    /// Dekodierfehler werden zur Fehler-Response, die Verbindung bleibt
    /// bestehen.
    pub fn verarbeiten(&mut self, eingabe: &str) -> Vec<Nachricht> {
        match Anfrage::dekodieren(eingabe) {
            Ok(anfrage) => self.befehl_verarbeiten(&anfrage),
            Err(fehler) => {
                tracing::warn!(
                    request_id = %fehler.request_id,
                    action = %fehler.action,
                    code = fehler.fehler.fehler_code(),
                    fehler = %fehler.fehler,
                    "Anfrage abgelehnt"
                );
                vec![fehler.antwort().into()]
            }
        }
    }

    /// Dispatch eines bereits dekodierten Befehls
    pub fn befehl_verarbeiten(&mut self, anfrage: &Anfrage) -> Vec<Nachricht> {
        let typ = anfrage.typ();
        tracing::debug!(request_id = %anfrage.request_id, action = %typ, "Befehl empfangen");

        let Self {
            konfig,
            speicher,
            bridge,
            lebenszyklus,
            connector,
        } = self;
        let mut ctx = Kontext {
            speicher,
            bridge: bridge.as_mut(),
            konfig,
            anfrage: Some(anfrage),
        };

        match &anfrage.befehl {
            Befehl::ConnectorCreate(_) => {
                // Die Connector-Region laesst sich nach einem Shutdown erneut
                // initialisieren, auch wenn der Lebenszyklus Start verlassen hat
                let (mut nachrichten, gestartet) =
                    match lebenszyklus.reagieren(LebenszyklusEreignis::Verbindung, &mut ctx) {
                        Ok(nachrichten) => (nachrichten, true),
                        Err(fehler) => {
                            tracing::debug!(
                                fehler = %fehler,
                                "Connector.Create ohne Lebenszyklus-Wechsel"
                            );
                            (vec![connector_create_antwort(&ctx).into()], false)
                        }
                    };
                let offen = nachrichten.iter_mut().find_map(|n| match n {
                    Nachricht::Antwort(r) if r.typ() == Some(AktionsTyp::ConnectorCreate) => {
                        Some(r)
                    }
                    _ => None,
                });
                let initialisiert = verworfen_loggen(
                    connector.reagieren(ConnectorEreignis::Initialisieren(offen), &mut ctx),
                    anfrage,
                )
                .is_some();

                match (gestartet, initialisiert) {
                    (true, _) => nachrichten,
                    (false, true) => {
                        anwenden(&anfrage.befehl, ctx.speicher, ctx.bridge, ctx.konfig);
                        nachrichten
                    }
                    (false, false) => Vec::new(),
                }
            }
            Befehl::AccountLogin(_) => {
                lebenszyklus_schritt(lebenszyklus, LebenszyklusEreignis::Account, &mut ctx)
            }
            Befehl::SessionCreate(_) => {
                lebenszyklus_schritt(lebenszyklus, LebenszyklusEreignis::Session, &mut ctx)
            }
            Befehl::SessionTerminate { .. } => {
                lebenszyklus_schritt(lebenszyklus, LebenszyklusEreignis::Stop, &mut ctx)
            }
            Befehl::SessionSet3DPosition(_) => {
                let Some(weitere) = verworfen_loggen(
                    lebenszyklus.reagieren(LebenszyklusEreignis::Position, &mut ctx),
                    anfrage,
                ) else {
                    return Vec::new();
                };
                let mut nachrichten = vec![anfrage.antwort().into()];
                nachrichten.extend(weitere);
                nachrichten
            }

            Befehl::ConnectorInitiateShutdown { .. } => {
                match verworfen_loggen(
                    connector.reagieren(ConnectorEreignis::Herunterfahren, &mut ctx),
                    anfrage,
                ) {
                    Some(()) => vec![anfrage.antwort().into()],
                    None => Vec::new(),
                }
            }
            _ if typ.ist_audio() => {
                match verworfen_loggen(connector.reagieren(ConnectorEreignis::Audio, &mut ctx), anfrage)
                {
                    Some(()) => vec![anfrage.antwort().into()],
                    None => Vec::new(),
                }
            }

            // Zustandsunabhaengige Befehle
            Befehl::AuxGetCaptureDevices => {
                vec![geraete_antwort(&ctx, GeraeteArt::Aufnahme).into()]
            }
            Befehl::AuxGetRenderDevices => {
                vec![geraete_antwort(&ctx, GeraeteArt::Wiedergabe).into()]
            }
            Befehl::AuxCaptureAudioStart { .. } => {
                mit_antwort(anfrage, vec![audio_eigenschaften(ctx.speicher, true)])
            }
            Befehl::AuxCaptureAudioStop => {
                mit_antwort(anfrage, vec![audio_eigenschaften(ctx.speicher, false)])
            }
            Befehl::AccountLogout { .. } => {
                anwenden(&anfrage.befehl, ctx.speicher, ctx.bridge, ctx.konfig);
                vec![anfrage.antwort().into()]
            }
            Befehl::SessionSetParticipantMuteForMe(w) => {
                let ereignisse = teilnehmer_eigenschaften(ctx.speicher, w, |e| {
                    e.lokal_stumm = als_bool(&w.wert).unwrap_or(false);
                });
                mit_antwort(anfrage, ereignisse)
            }
            Befehl::SessionSetParticipantVolumeForMe(w) => {
                let ereignisse = teilnehmer_eigenschaften(ctx.speicher, w, |e| {
                    e.lautstaerke = als_f32(&w.wert);
                });
                mit_antwort(anfrage, ereignisse)
            }
            Befehl::SessionMediaDisconnect => {
                let session = &ctx.speicher.session;
                let ereignisse = if session.aktiv {
                    vec![Event::MediaStreamUpdated(MedienStatus {
                        session_handle: session.handle.clone(),
                        zustand: MEDIEN_GETRENNT,
                        ..Default::default()
                    })]
                } else {
                    Vec::new()
                };
                mit_antwort(anfrage, ereignisse)
            }
            _ => vec![anfrage.antwort().into()],
        }
    }

    /// Setzt beide Regionen und den Speicher zurueck (Verbindungsende)
    ///
    /// Eine aktive Session wird regulaer verlassen, ihre Nachrichten
    /// gehen aber an niemanden mehr.
    pub fn zuruecksetzen(&mut self) {
        let mut ctx = Kontext {
            speicher: &mut self.speicher,
            bridge: self.bridge.as_mut(),
            konfig: &self.konfig,
            anfrage: None,
        };
        for nachricht in self.lebenszyklus.zuruecksetzen(&mut ctx) {
            tracing::debug!(
                nachricht = %nachricht.serialisieren(&self.konfig).trim_end(),
                "Nachricht beim Zuruecksetzen verworfen"
            );
        }
        self.connector.zuruecksetzen();
        self.speicher.leeren();
        tracing::info!("Gateway zurueckgesetzt");
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("zustand", &self.lebenszyklus.zustand())
            .field("connector", &self.connector.zustand())
            .field("speicher", &self.speicher)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Hilfsfunktionen
// ---------------------------------------------------------------------------

/// Loggt einen abgelehnten Uebergang; die Anfrage bleibt ohne Antwort
fn verworfen_loggen<T>(ergebnis: Result<T, GatewayError>, anfrage: &Anfrage) -> Option<T> {
    match ergebnis {
        Ok(wert) => Some(wert),
        Err(fehler) => {
            tracing::warn!(
                request_id = %anfrage.request_id,
                action = %anfrage.action,
                fehler = %fehler,
                "Ereignis im aktuellen Zustand nicht behandelt, verworfen"
            );
            None
        }
    }
}

fn lebenszyklus_schritt(
    lebenszyklus: &mut Lebenszyklus,
    ereignis: LebenszyklusEreignis,
    ctx: &mut Kontext<'_>,
) -> Vec<Nachricht> {
    let ergebnis = lebenszyklus.reagieren(ereignis, ctx);
    match ctx.anfrage {
        Some(anfrage) => verworfen_loggen(ergebnis, anfrage).unwrap_or_default(),
        None => ergebnis.unwrap_or_default(),
    }
}

/// Standard-Response vor den Events des Befehls
fn mit_antwort(anfrage: &Anfrage, ereignisse: Vec<Event>) -> Vec<Nachricht> {
    let mut nachrichten = Vec::with_capacity(1 + ereignisse.len());
    nachrichten.push(anfrage.antwort().into());
    nachrichten.extend(ereignisse.into_iter().map(Nachricht::from));
    nachrichten
}

fn audio_eigenschaften(speicher: &ZustandsSpeicher, mikrofon_aktiv: bool) -> Event {
    Event::AuxAudioProperties(AudioEigenschaften {
        mikrofon_aktiv,
        mikrofon_energie: 0.0,
        mikrofon_lautstaerke: speicher.audio.mikrofon_lautstaerke,
        lautsprecher_lautstaerke: speicher.audio.lautsprecher_lautstaerke,
    })
}

fn teilnehmer_eigenschaften(
    speicher: &ZustandsSpeicher,
    wert: &TeilnehmerWert,
    setzen: impl FnOnce(&mut TeilnehmerEigenschaften),
) -> Vec<Event> {
    if !speicher.session.aktiv {
        return Vec::new();
    }
    let mut eigenschaften = TeilnehmerEigenschaften {
        session_handle: speicher.session.handle.clone(),
        teilnehmer_uri: wert.teilnehmer_uri.clone(),
        ..Default::default()
    };
    setzen(&mut eigenschaften);
    vec![Event::ParticipantProperties(eigenschaften)]
}

//! Connector-Region: Idle / Active
//!
//! Orthogonal zum Lebenszyklus. Audio-Befehle landen hier unabhaengig
//! davon, ob gerade ein Account oder eine Session besteht.

use crate::apply::anwenden;
use crate::lifecycle::Kontext;
use voicegate_core::{GatewayError, CONNECTOR_HANDLE};
use voicegate_protocol::{AntwortDaten, Response};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorZustand {
    Idle,
    Active,
}

impl ConnectorZustand {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Active => "Active",
        }
    }
}

/// Ereignisse der Connector-Region
#[derive(Debug)]
pub enum ConnectorEreignis<'r> {
    /// Traegt die noch offene Connector.Create-Response, falls vorhanden
    Initialisieren(Option<&'r mut Response>),
    Herunterfahren,
    /// Befehl kommt aus `Kontext::anfrage`
    Audio,
}

impl ConnectorEreignis<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialisieren(_) => "Initialisieren",
            Self::Herunterfahren => "Herunterfahren",
            Self::Audio => "Audio",
        }
    }
}

#[derive(Debug)]
pub struct ConnectorRegion {
    zustand: ConnectorZustand,
}

impl Default for ConnectorRegion {
    fn default() -> Self {
        Self::neu()
    }
}

impl ConnectorRegion {
    pub fn neu() -> Self {
        Self {
            zustand: ConnectorZustand::Idle,
        }
    }

    pub fn zustand(&self) -> ConnectorZustand {
        self.zustand
    }

    pub fn zuruecksetzen(&mut self) {
        self.zustand = ConnectorZustand::Idle;
    }

    pub fn reagieren(
        &mut self,
        ereignis: ConnectorEreignis<'_>,
        ctx: &mut Kontext<'_>,
    ) -> Result<(), GatewayError> {
        match (self.zustand, ereignis) {
            (ConnectorZustand::Idle, ConnectorEreignis::Initialisieren(offen)) => {
                ctx.speicher.connector.handle = CONNECTOR_HANDLE.to_string();
                if let Some(antwort) = offen {
                    if let Some(AntwortDaten::ConnectorCreate {
                        connector_handle, ..
                    }) = antwort.daten.as_mut()
                    {
                        *connector_handle = ctx.speicher.connector.handle.clone();
                    }
                }
                self.wechseln(ConnectorZustand::Active);
                tracing::info!(handle = CONNECTOR_HANDLE, "Connector initialisiert");
                Ok(())
            }
            (ConnectorZustand::Active, ConnectorEreignis::Herunterfahren) => {
                ctx.speicher.connector_beenden();
                self.wechseln(ConnectorZustand::Idle);
                tracing::info!("Connector heruntergefahren");
                Ok(())
            }
            (ConnectorZustand::Active, ConnectorEreignis::Audio) => {
                let Kontext {
                    speicher,
                    bridge,
                    konfig,
                    anfrage,
                } = ctx;
                if let Some(anfrage) = anfrage {
                    anwenden(&anfrage.befehl, speicher, &mut **bridge, konfig);
                }
                speicher.session.audio_pegel_steuern(&speicher.audio, &mut **bridge);
                Ok(())
            }
            (zustand, ereignis) => Err(GatewayError::UnzulaessigerUebergang {
                zustand: zustand.name(),
                ereignis: ereignis.name(),
            }),
        }
    }

    fn wechseln(&mut self, ziel: ConnectorZustand) {
        tracing::debug!(von = self.zustand.name(), nach = ziel.name(), "Connector-Zustandswechsel");
        self.zustand = ziel;
    }
}

//! Request-Queue – serialisiert alle Befehle auf einen Worker
//!
//! Der [`Gateway`] gehoert exklusiv einem blockierenden Worker-Thread
//! (`spawn_blocking`). Verbindungen reichen Auftraege ueber einen
//! begrenzten mpsc-Kanal ein und erhalten die serialisierte
//! Nachrichtenfolge ueber einen oneshot-Kanal zurueck. Dadurch laeuft
//! immer genau ein Befehl gleichzeitig, in Ankunftsreihenfolge.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use voicegate_voice::Gateway;

use crate::error::{SignalingError, SignalingResult};

/// Standard-Kapazitaet der Queue
pub const DEFAULT_KAPAZITAET: usize = 64;

/// Auftrag an den Worker
#[derive(Debug)]
enum Auftrag {
    /// Rohes Eingabedokument verarbeiten
    Verarbeiten {
        eingabe: String,
        antwort: oneshot::Sender<Vec<String>>,
    },
    /// Zustandsmaschine und Speicher zuruecksetzen
    Zuruecksetzen { fertig: oneshot::Sender<()> },
}

/// Handle auf die Queue; Klone teilen sich denselben Worker
#[derive(Debug, Clone)]
pub struct RequestQueue {
    tx: mpsc::Sender<Auftrag>,
}

impl RequestQueue {
    /// Startet den Worker und gibt Queue und Worker-Handle zurueck
    ///
    /// Der Worker endet, sobald alle Klone der Queue verworfen wurden.
    pub fn starten(gateway: Gateway, kapazitaet: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(kapazitaet.max(1));
        let worker = tokio::task::spawn_blocking(move || worker(gateway, rx));
        (Self { tx }, worker)
    }

    /// Reiht ein Eingabedokument ein und wartet auf die Antwortfolge
    pub async fn einreihen(&self, eingabe: String) -> SignalingResult<Vec<String>> {
        let (antwort, empfang) = oneshot::channel();
        self.tx
            .send(Auftrag::Verarbeiten { eingabe, antwort })
            .await
            .map_err(|_| SignalingError::WorkerBeendet)?;
        empfang.await.map_err(|_| SignalingError::WorkerBeendet)
    }

    /// Setzt den Gateway zurueck (Verbindungsende)
    pub async fn zuruecksetzen(&self) -> SignalingResult<()> {
        let (fertig, empfang) = oneshot::channel();
        self.tx
            .send(Auftrag::Zuruecksetzen { fertig })
            .await
            .map_err(|_| SignalingError::WorkerBeendet)?;
        empfang.await.map_err(|_| SignalingError::WorkerBeendet)
    }
}

fn worker(mut gateway: Gateway, mut rx: mpsc::Receiver<Auftrag>) {
    tracing::debug!("Gateway-Worker gestartet");

    while let Some(auftrag) = rx.blocking_recv() {
        match auftrag {
            Auftrag::Verarbeiten { eingabe, antwort } => {
                let texte: Vec<String> = gateway
                    .verarbeiten(&eingabe)
                    .iter()
                    .map(|n| n.serialisieren(gateway.konfig()))
                    .collect();
                if antwort.send(texte).is_err() {
                    tracing::debug!("Empfaenger der Antwortfolge bereits weg");
                }
            }
            Auftrag::Zuruecksetzen { fertig } => {
                gateway.zuruecksetzen();
                let _ = fertig.send(());
            }
        }
    }

    tracing::debug!("Gateway-Worker beendet");
}

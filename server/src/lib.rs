//! voicegate-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Call Bridge, Gateway, Request-Queue und
//! TCP-Front und stellt den Einstiegspunkt fuer Integrationstests bereit.

pub mod config;

use anyhow::Result;
use config::ServerConfig;
use tokio::net::TcpListener;
use voicegate_signaling::{RequestQueue, SignalingServer};
use voicegate_voice::{CallBridge, Gateway, SimulierteBruecke};

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Subsysteme und laeuft bis Ctrl-C
    pub async fn starten(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_adresse()?).await?;
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        let lauf = tokio::spawn(self.ausfuehren(listener, shutdown_rx));

        tracing::info!("Server laeuft. Warte auf Shutdown-Signal (Ctrl-C)...");
        tokio::signal::ctrl_c().await?;
        tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
        let _ = shutdown_tx.send(true);

        lauf.await??;
        Ok(())
    }

    /// Bedient den Listener bis `shutdown_rx` ein `true`-Signal empfaengt
    ///
    /// Verwendet die simulierte Call Bridge aus `[bruecke]`.
    pub async fn ausfuehren(
        self,
        listener: TcpListener,
        shutdown_rx: tokio::sync::watch::Receiver<bool>,
    ) -> Result<()> {
        let bridge = SimulierteBruecke::neu(self.config.bruecke.clone());
        self.ausfuehren_mit_bridge(listener, Box::new(bridge), shutdown_rx)
            .await
    }

    /// Wie [`Server::ausfuehren`], aber mit beliebiger Call Bridge
    pub async fn ausfuehren_mit_bridge(
        self,
        listener: TcpListener,
        bridge: Box<dyn CallBridge>,
        shutdown_rx: tokio::sync::watch::Receiver<bool>,
    ) -> Result<()> {
        let config = self.config;
        tracing::info!(
            adresse = %listener.local_addr()?,
            protokoll_version = config.protokoll.version,
            voice_server = %config.protokoll.voice_server_uri,
            "Server startet"
        );

        let gateway = Gateway::neu(config.protokoll.clone(), bridge);
        let (queue, worker) = RequestQueue::starten(gateway, config.server.queue_kapazitaet);

        SignalingServer::neu(queue)
            .mit_max_frame_size(config.server.max_frame_size)
            .bedienen(listener, shutdown_rx)
            .await?;

        // Alle Queue-Handles sind verworfen, der Worker endet
        worker.await?;
        tracing::info!("Server gestoppt");
        Ok(())
    }
}

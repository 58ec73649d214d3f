//! TCP-Listener – Bindet Socket, akzeptiert Verbindungen
//!
//! Ein Server-Prozess bedient genau einen Connector. Der
//! `SignalingServer` akzeptiert deshalb immer nur eine Verbindung
//! gleichzeitig; weitere Clients warten im Backlog des Sockets, bis die
//! aktuelle Verbindung endet.

use tokio::net::TcpListener;
use voicegate_protocol::wire::DEFAULT_MAX_FRAME_SIZE;

use crate::connection::{ClientConnection, VerbindungsEnde};
use crate::queue::RequestQueue;

/// TCP-Server der Steuerebene
pub struct SignalingServer {
    queue: RequestQueue,
    max_frame_size: usize,
}

impl SignalingServer {
    /// Erstellt einen neuen SignalingServer
    pub fn neu(queue: RequestQueue) -> Self {
        Self {
            queue,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }

    /// Setzt die maximale Frame-Groesse eingehender Dokumente
    pub fn mit_max_frame_size(mut self, max_frame_size: usize) -> Self {
        self.max_frame_size = max_frame_size;
        self
    }

    /// Accept-Loop auf einem bereits gebundenen Listener
    ///
    /// Laeuft bis `shutdown_rx` ein `true`-Signal empfaengt.
    pub async fn bedienen(
        self,
        listener: TcpListener,
        mut shutdown_rx: tokio::sync::watch::Receiver<bool>,
    ) -> std::io::Result<()> {
        let lokale_addr = listener.local_addr()?;
        tracing::info!(adresse = %lokale_addr, "TCP-Server gestartet");

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, peer_addr)) => {
                            tracing::debug!(peer = %peer_addr, "Verbindung akzeptiert");
                            if let Err(e) = stream.set_nodelay(true) {
                                tracing::debug!(fehler = %e, "TCP_NODELAY nicht gesetzt");
                            }

                            let verbindung = ClientConnection::neu(
                                self.queue.clone(),
                                peer_addr,
                                self.max_frame_size,
                            );
                            // Eine Verbindung zur Zeit
                            let ende = verbindung.verarbeiten(stream, shutdown_rx.clone()).await;
                            if ende == VerbindungsEnde::Shutdown {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::error!(fehler = %e, "TCP-Accept-Fehler");
                            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
                        }
                    }
                }

                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!("TCP-Server: Shutdown-Signal empfangen");
                        break;
                    }
                }
            }
        }

        tracing::info!("TCP-Server gestoppt");
        Ok(())
    }
}

//! Client-Connection – Verwaltet die TCP-Verbindung des Clients
//!
//! Liest terminator-getrennte Dokumente, reicht sie an die
//! [`RequestQueue`] weiter und schreibt die Antwortfolge in
//! Reihenfolge zurueck. Beim Verbindungsende wird der Gateway
//! zurueckgesetzt.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::Framed;
use uuid::Uuid;
use voicegate_protocol::wire::TerminatorCodec;

use crate::error::{SignalingError, SignalingResult};
use crate::queue::RequestQueue;

/// Grund fuer das Ende einer Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbindungsEnde {
    /// Client hat die Verbindung geschlossen
    Getrennt,
    /// Lese- oder Schreibfehler
    Fehler,
    /// Shutdown-Signal des Servers
    Shutdown,
}

/// Verarbeitet eine einzelne Client-Verbindung
pub struct ClientConnection {
    id: Uuid,
    queue: RequestQueue,
    peer_addr: SocketAddr,
    max_frame_size: usize,
}

impl ClientConnection {
    /// Erstellt eine neue ClientConnection
    pub fn neu(queue: RequestQueue, peer_addr: SocketAddr, max_frame_size: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            queue,
            peer_addr,
            max_frame_size,
        }
    }

    /// Startet die Verarbeitungsschleife
    ///
    /// Laeuft bis der Client trennt, ein IO-Fehler auftritt oder
    /// `shutdown_rx` ein `true`-Signal empfaengt.
    pub async fn verarbeiten<S>(
        self,
        stream: S,
        mut shutdown_rx: tokio::sync::watch::Receiver<bool>,
    ) -> VerbindungsEnde
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let peer_addr = self.peer_addr;
        let verbindung = self.id;
        tracing::info!(peer = %peer_addr, verbindung = %verbindung, "Neue Verbindung");

        let mut framed = Framed::new(stream, TerminatorCodec::with_max_size(self.max_frame_size));

        let ende = loop {
            tokio::select! {
                frame = framed.next() => {
                    match frame {
                        Some(Ok(dokument)) => {
                            tracing::trace!(
                                verbindung = %verbindung,
                                bytes = dokument.len(),
                                "Dokument empfangen"
                            );
                            if let Err(e) = self.beantworten(&mut framed, dokument).await {
                                tracing::warn!(
                                    verbindung = %verbindung,
                                    fehler = %e,
                                    "Antwort konnte nicht gesendet werden"
                                );
                                break VerbindungsEnde::Fehler;
                            }
                        }
                        Some(Err(e)) => {
                            tracing::warn!(
                                verbindung = %verbindung,
                                fehler = %e,
                                "Frame-Lesefehler"
                            );
                            break VerbindungsEnde::Fehler;
                        }
                        None => {
                            tracing::info!(verbindung = %verbindung, "Verbindung vom Client getrennt");
                            break VerbindungsEnde::Getrennt;
                        }
                    }
                }

                Ok(()) = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::info!(
                            verbindung = %verbindung,
                            "Shutdown-Signal – Verbindung wird getrennt"
                        );
                        break VerbindungsEnde::Shutdown;
                    }
                }
            }
        };

        // Ohne Client gibt es keinen Connector mehr
        if let Err(e) = self.queue.zuruecksetzen().await {
            tracing::warn!(verbindung = %verbindung, fehler = %e, "Zuruecksetzen fehlgeschlagen");
        }

        tracing::info!(verbindung = %verbindung, ende = ?ende, "Verbindungs-Task beendet");
        ende
    }

    async fn beantworten<S>(
        &self,
        framed: &mut Framed<S, TerminatorCodec>,
        dokument: String,
    ) -> SignalingResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let texte = self.queue.einreihen(dokument).await?;
        for text in texte {
            framed.feed(text).await?;
        }
        framed.flush().await.map_err(SignalingError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use voicegate_protocol::ProtokollKonfig;
    use voicegate_voice::{Gateway, RecordingBridge};

    fn queue() -> RequestQueue {
        let gateway = Gateway::neu(ProtokollKonfig::default(), Box::new(RecordingBridge::neu()));
        RequestQueue::starten(gateway, 8).0
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:50000".parse().unwrap()
    }

    #[tokio::test]
    async fn antwortet_auf_fehlerhafte_anfrage_und_bleibt_offen() {
        let (mut client, server) = tokio::io::duplex(64 * 1024);
        let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let verbindung = ClientConnection::neu(queue(), peer(), 1024 * 1024);
        let task = tokio::spawn(verbindung.verarbeiten(server, shutdown_rx));

        client
            .write_all(b"<Request requestId=\"3\" action=\"Nope.Nope.1\"/>\n\n\n")
            .await
            .unwrap();

        let mut puffer = vec![0u8; 4096];
        let mut gelesen = String::new();
        while !gelesen.ends_with("\n\n\n") {
            let n = client.read(&mut puffer).await.unwrap();
            assert!(n > 0);
            gelesen.push_str(std::str::from_utf8(&puffer[..n]).unwrap());
        }
        assert!(gelesen.starts_with(r#"<Response requestId="3" action="Nope.Nope.1"><ReturnCode>1</ReturnCode>"#));

        drop(client);
        assert_eq!(task.await.unwrap(), VerbindungsEnde::Getrennt);
    }

    #[tokio::test]
    async fn antwort_darf_groesser_als_eingangslimit_sein() {
        let anfrage = format!(
            r#"<Request requestId="4" action="Aux.CaptureAudioStop.1"><Kommentar>{}</Kommentar></Request>"#,
            "k".repeat(256)
        );
        let (mut client, server) = tokio::io::duplex(64 * 1024);
        let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let verbindung = ClientConnection::neu(queue(), peer(), anfrage.len() + 10);
        let task = tokio::spawn(verbindung.verarbeiten(server, shutdown_rx));

        client
            .write_all(format!("{anfrage}\n\n\n").as_bytes())
            .await
            .unwrap();

        let mut puffer = vec![0u8; 4096];
        let mut gelesen = String::new();
        while !gelesen.ends_with("\n\n\n") {
            let n = client.read(&mut puffer).await.unwrap();
            assert!(n > 0, "Verbindung ohne Antwort geschlossen");
            gelesen.push_str(std::str::from_utf8(&puffer[..n]).unwrap());
        }
        assert!(gelesen.len() > anfrage.len() + 10);
        assert!(gelesen.contains(&format!("<InputXml>{anfrage}</InputXml>")));

        drop(client);
        assert_eq!(task.await.unwrap(), VerbindungsEnde::Getrennt);
    }

    #[tokio::test]
    async fn shutdown_beendet_verbindung() {
        let (_client, server) = tokio::io::duplex(1024);
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        let verbindung = ClientConnection::neu(queue(), peer(), 1024);
        let task = tokio::spawn(verbindung.verarbeiten(server, shutdown_rx));

        shutdown_tx.send(true).unwrap();
        assert_eq!(task.await.unwrap(), VerbindungsEnde::Shutdown);
    }
}

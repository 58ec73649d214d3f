//! Integration-Test fuer den verdrahteten Server (simulierte Bruecke)

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;
use voicegate_protocol::wire::TerminatorCodec;
use voicegate_server::config::ServerConfig;
use voicegate_server::Server;

#[tokio::test]
async fn server_beantwortet_connector_create() {
    let config = ServerConfig::aus_toml(
        r#"
        [protokoll]
        version_id = "voicegate-test"

        [bruecke]
        capture_geraete = ["Headset"]
        "#,
    )
    .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let adresse = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let lauf = tokio::spawn(Server::neu(config).ausfuehren(listener, shutdown_rx));

    let stream = TcpStream::connect(adresse).await.unwrap();
    let mut client = Framed::new(stream, TerminatorCodec::new());
    client
        .send(
            r#"<Request requestId="1" action="Connector.Create.1"><AccountManagementServer>https://a/</AccountManagementServer></Request>"#
                .to_string(),
        )
        .await
        .unwrap();

    let mut antworten = Vec::new();
    for _ in 0..3 {
        antworten.push(client.next().await.unwrap().unwrap());
    }
    assert!(antworten[0].contains("<CurrentCaptureDevice><Device>Headset</Device></CurrentCaptureDevice>"));
    assert!(antworten[2].contains("<VersionID>voicegate-test</VersionID>"));

    shutdown_tx.send(true).unwrap();
    lauf.await.unwrap().unwrap();
}

//! Integration-Tests fuer den TCP-Server (echter Socket auf 127.0.0.1)

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::Framed;
use voicegate_protocol::wire::TerminatorCodec;
use voicegate_protocol::ProtokollKonfig;
use voicegate_signaling::{RequestQueue, SignalingServer};
use voicegate_voice::{Gateway, RecordingBridge};

const CREATE: &str = r#"<Request requestId="1" action="Connector.Create.1"><AccountManagementServer>https://login.example.org/</AccountManagementServer></Request>"#;
const LOGIN: &str = r#"<Request requestId="2" action="Account.Login.1"><ConnectorHandle>vgc-0001</ConnectorHandle><AccountName>alice</AccountName><AccountPassword>pw</AccountPassword><AccountURI>sip:alice@example.org</AccountURI></Request>"#;

async fn server() -> (
    std::net::SocketAddr,
    tokio::sync::watch::Sender<bool>,
    tokio::task::JoinHandle<std::io::Result<()>>,
) {
    let gateway = Gateway::neu(
        ProtokollKonfig::default(),
        Box::new(RecordingBridge::mit_geraeten(&["Mic"], &["Box"])),
    );
    let (queue, _worker) = RequestQueue::starten(gateway, 16);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Listener konnte nicht gebunden werden");
    let adresse = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let server = SignalingServer::neu(queue);
    let task = tokio::spawn(server.bedienen(listener, shutdown_rx));
    (adresse, shutdown_tx, task)
}

async fn naechstes(client: &mut Framed<TcpStream, TerminatorCodec>) -> String {
    client
        .next()
        .await
        .expect("Verbindung unerwartet geschlossen")
        .expect("Frame-Lesefehler")
}

#[tokio::test]
async fn create_und_login_ueber_tcp() {
    let (adresse, shutdown_tx, task) = server().await;

    let stream = TcpStream::connect(adresse).await.unwrap();
    let mut client = Framed::new(stream, TerminatorCodec::new());

    client.send(CREATE.to_string()).await.unwrap();
    let erste = naechstes(&mut client).await;
    assert!(erste.starts_with(r#"<Response requestId="1" action="Aux.GetCaptureDevices.1">"#));
    let zweite = naechstes(&mut client).await;
    assert!(zweite.contains("<RenderDevices>"));
    let dritte = naechstes(&mut client).await;
    assert!(dritte.contains("<ConnectorHandle>vgc-0001</ConnectorHandle>"));

    client.send(LOGIN.to_string()).await.unwrap();
    assert!(naechstes(&mut client).await.contains("<AccountHandle>vga-0001</AccountHandle>"));
    assert!(naechstes(&mut client)
        .await
        .starts_with(r#"<Event type="AccountLoginStateChangeEvent">"#));

    shutdown_tx.send(true).unwrap();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn neue_verbindung_beginnt_bei_start() {
    let (adresse, shutdown_tx, task) = server().await;

    {
        let stream = TcpStream::connect(adresse).await.unwrap();
        let mut client = Framed::new(stream, TerminatorCodec::new());
        client.send(CREATE.to_string()).await.unwrap();
        for _ in 0..3 {
            naechstes(&mut client).await;
        }
    }

    // Nach dem Trennen ist der Gateway zurueckgesetzt
    let stream = TcpStream::connect(adresse).await.unwrap();
    let mut client = Framed::new(stream, TerminatorCodec::new());
    client.send(CREATE.to_string()).await.unwrap();
    let erste = naechstes(&mut client).await;
    assert!(erste.contains("Aux.GetCaptureDevices.1"));

    shutdown_tx.send(true).unwrap();
    task.await.unwrap().unwrap();
}

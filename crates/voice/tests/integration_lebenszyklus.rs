//! Integration-Tests fuer den Gateway (vollstaendiger Lebenszyklus)

use voicegate_protocol::{Nachricht, ProtokollKonfig};
use voicegate_voice::bridge::BridgeAufruf;
use voicegate_voice::connector::ConnectorZustand;
use voicegate_voice::state::SessionInfo;
use voicegate_voice::{
    BrueckenKonfig, Gateway, LebenszyklusZustand, RecordingBridge, SimulierteBruecke,
};

const CREATE: &str = r#"<Request requestId="1" action="Connector.Create.1"><AccountManagementServer>https://login.example.org/</AccountManagementServer><ClientName>test</ClientName></Request>"#;
const LOGIN: &str = r#"<Request requestId="2" action="Account.Login.1"><ConnectorHandle>vgc-0001</ConnectorHandle><AccountName>alice</AccountName><AccountPassword>geheim</AccountPassword><AccountURI>sip:alice@voice.example.org</AccountURI></Request>"#;
const SESSION: &str = r#"<Request requestId="3" action="Session.Create.1"><AccountHandle>vga-0001</AccountHandle><URI>sip:lobby@voice.example.org</URI><Name>Lobby</Name><Type>1</Type></Request>"#;
const TERMINATE: &str = r#"<Request requestId="4" action="Session.Terminate.1"><SessionHandle>vgs-0001</SessionHandle></Request>"#;

/// Verarbeitet ein Dokument und serialisiert die Antwortfolge
fn senden(gw: &mut Gateway, eingabe: &str) -> Vec<String> {
    let nachrichten: Vec<Nachricht> = gw.verarbeiten(eingabe);
    nachrichten
        .iter()
        .map(|n| n.serialisieren(gw.konfig()))
        .collect()
}

fn gateway(konfig: ProtokollKonfig) -> (Gateway, RecordingBridge) {
    let bridge = RecordingBridge::mit_geraeten(&["Headset"], &["Lautsprecher"]);
    (Gateway::neu(konfig, Box::new(bridge.clone())), bridge)
}

#[test]
fn vollstaendiger_lebenszyklus() {
    let (mut gw, bridge) = gateway(ProtokollKonfig::default());

    let t = senden(&mut gw, CREATE);
    assert_eq!(t.len(), 3);
    assert!(t[0].starts_with(r#"<Response requestId="1" action="Aux.GetCaptureDevices.1">"#));
    assert!(t[0].contains("<CaptureDevice><Device>Headset</Device></CaptureDevice>"));
    assert!(t[1].starts_with(r#"<Response requestId="1" action="Aux.GetRenderDevices.1">"#));
    assert!(t[2].contains("<ConnectorHandle>vgc-0001</ConnectorHandle>"));
    assert!(t[2].contains(CREATE));
    assert!(t.iter().all(|s| s.ends_with("\n\n\n")));

    let t = senden(&mut gw, LOGIN);
    assert_eq!(t.len(), 2);
    assert!(t[0].contains("<AccountHandle>vga-0001</AccountHandle>"));
    assert!(t[1].starts_with(r#"<Event type="AccountLoginStateChangeEvent">"#));
    assert!(t[1].contains("<State>1</State>"));

    let t = senden(&mut gw, SESSION);
    assert_eq!(t.len(), 4);
    assert!(t[0].contains("<SessionHandle>vgs-0001</SessionHandle>"));
    assert!(t[1].starts_with(r#"<Event type="SessionStateChangeEvent">"#));
    assert!(t[1].contains("<State>4</State>"));
    assert!(t[2].starts_with(r#"<Event type="ParticipantStateChangeEvent">"#));
    assert!(t[2].contains("<ParticipantURI>sip:alice@voice.example.org</ParticipantURI>"));
    assert!(t[3].starts_with(r#"<Event type="ParticipantUpdatedEvent">"#));
    assert_eq!(gw.zustand(), LebenszyklusZustand::Session);

    let t = senden(&mut gw, TERMINATE);
    assert_eq!(t.len(), 2);
    assert!(t[0].starts_with(r#"<Response requestId="4" action="Session.Terminate.1">"#));
    assert!(t[1].contains("<State>5</State>"));
    assert!(t[1].contains("<StatusCode>0</StatusCode>"));
    assert_eq!(gw.zustand(), LebenszyklusZustand::Stop);
    assert_eq!(gw.speicher().session, SessionInfo::default());

    assert_eq!(
        bridge.aufrufe(),
        vec![
            BridgeAufruf::Registrieren(voicegate_voice::bridge::Zugangsdaten {
                name: "alice".into(),
                passwort: "geheim".into(),
                uri: "sip:alice@voice.example.org".into(),
            }),
            BridgeAufruf::Beitreten("sip:lobby@voice.example.org".into()),
            BridgeAufruf::Verlassen,
        ]
    );

    // Stop ist terminal
    assert!(gw.verarbeiten(SESSION).is_empty());
}

#[test]
fn alte_protokollversion_nutzt_alte_event_namen() {
    let (mut gw, _) = gateway(ProtokollKonfig::mit_version(121));
    gw.verarbeiten(CREATE);

    let t = senden(&mut gw, LOGIN);
    assert!(t[1].starts_with(r#"<Event type="LoginStateChangeEvent">"#));
    assert!(t[1].contains("<StatusCode>200</StatusCode>"));

    let t = senden(&mut gw, SESSION);
    assert!(t[3].starts_with(r#"<Event type="ParticipantPropertiesEvent">"#));
}

#[test]
fn audio_befehle_in_jeder_phase() {
    let (mut gw, bridge) = gateway(ProtokollKonfig::default());
    gw.verarbeiten(CREATE);
    gw.verarbeiten(LOGIN);
    gw.verarbeiten(SESSION);
    bridge.aufrufe_leeren();

    let n = gw.verarbeiten(
        r#"<Request requestId="5" action="Connector.SetLocalMicVolume.1"><ConnectorHandle>vgc-0001</ConnectorHandle><Value>70</Value></Request>"#,
    );
    assert_eq!(n.len(), 1);
    assert_eq!(gw.speicher().connector.audio.mikrofon_lautstaerke, 70.0);
    assert!(bridge
        .aufrufe()
        .contains(&BridgeAufruf::LautstaerkeSetzen(
            voicegate_voice::bridge::GeraeteArt::Aufnahme,
            70.0
        )));
    assert_eq!(gw.connector_zustand(), ConnectorZustand::Active);

    // Session-Zustand bleibt unberuehrt
    assert_eq!(gw.zustand(), LebenszyklusZustand::Session);
}

#[test]
fn position_erhaelt_standard_response() {
    let (mut gw, _) = gateway(ProtokollKonfig::default());
    gw.verarbeiten(CREATE);
    gw.verarbeiten(LOGIN);
    gw.verarbeiten(SESSION);

    let n = gw.verarbeiten(
        r#"<Request requestId="6" action="Session.Set3DPosition.1"><SessionHandle>vgs-0001</SessionHandle><SpeakerPosition><Position X="1" Y="0" Z="2"/></SpeakerPosition><ListenerPosition><Position X="1" Y="0" Z="2"/></ListenerPosition></Request>"#,
    );
    assert_eq!(n.len(), 1);
    assert_eq!(n[0].als_antwort().map(|a| a.request_id.as_str()), Some("6"));
    assert_eq!(gw.speicher().orientierung.zuhoerer.position.z, 2.0);
}

#[test]
fn simulierte_bruecke_degradiert_bei_ungueltiger_uri() {
    let bruecke = SimulierteBruecke::neu(BrueckenKonfig::default());
    let mut gw = Gateway::neu(ProtokollKonfig::default(), Box::new(bruecke));
    gw.verarbeiten(CREATE);
    gw.verarbeiten(
        r#"<Request requestId="2" action="Account.Login.1"><ConnectorHandle>vgc-0001</ConnectorHandle><AccountName>alice</AccountName><AccountPassword>pw</AccountPassword><AccountURI>alice</AccountURI></Request>"#,
    );

    // Eintritt gelingt trotz Bridge-Fehler
    let n = gw.verarbeiten(SESSION);
    assert_eq!(n.len(), 4);
    assert_eq!(gw.zustand(), LebenszyklusZustand::Session);

    let t = senden(&mut gw, TERMINATE);
    assert!(t[1].contains("<StatusCode>1100</StatusCode>"));
    assert!(t[1].contains("Registrierung fehlgeschlagen"));
}

#[test]
fn zuruecksetzen_erlaubt_neuen_connector() {
    let (mut gw, _) = gateway(ProtokollKonfig::default());
    gw.verarbeiten(CREATE);
    gw.verarbeiten(LOGIN);
    gw.zuruecksetzen();

    assert_eq!(gw.zustand(), LebenszyklusZustand::Start);
    assert_eq!(gw.verarbeiten(CREATE).len(), 3);
    assert_eq!(gw.connector_zustand(), ConnectorZustand::Active);
}

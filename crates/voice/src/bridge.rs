//! Call Bridge – Adapter zum Echtzeit-Backend
//!
//! Die Zustandsmaschine spricht das Backend (SIP-Stack, Konferenzserver)
//! nur ueber den [`CallBridge`]-Trait an. Alle Aufrufe sind aus Sicht der
//! Maschine blockierend und "best effort": Fehler werden gemeldet und
//! geloggt, fuehren aber nie zum Abbruch eines Uebergangs.
//!
//! Implementierungen:
//! - [`SimulierteBruecke`] – Backend ohne SIP-Stack (Standard im Server)
//! - `RecordingBridge` – Test-Double, zeichnet jeden Aufruf auf
//!   (nur mit Feature `test-support`)

#[cfg(any(test, feature = "test-support"))]
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
#[cfg(any(test, feature = "test-support"))]
use std::sync::Arc;
use thiserror::Error;
use voicegate_core::GatewayError;

// ---------------------------------------------------------------------------
// Typen
// ---------------------------------------------------------------------------

/// Art eines Audiogeraets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeraeteArt {
    /// Mikrofon (Capture)
    Aufnahme,
    /// Lautsprecher (Render)
    Wiedergabe,
}

impl std::fmt::Display for GeraeteArt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aufnahme => f.write_str("aufnahme"),
            Self::Wiedergabe => f.write_str("wiedergabe"),
        }
    }
}

/// Zugangsdaten fuer die Registrierung eines Accounts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zugangsdaten {
    pub name: String,
    pub passwort: String,
    pub uri: String,
}

/// Fehler der Call Bridge
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Registrierung fehlgeschlagen: {0}")]
    Registrierung(String),

    #[error("Beitritt fehlgeschlagen: {0}")]
    Beitritt(String),

    #[error("Audiogeraet nicht gefunden: {0}")]
    GeraetNichtGefunden(String),

    #[error("Kein Account registriert")]
    NichtRegistriert,

    #[error("Interner Bridge-Fehler: {0}")]
    Intern(String),
}

impl From<BridgeError> for GatewayError {
    fn from(e: BridgeError) -> Self {
        GatewayError::Backend(e.to_string())
    }
}

/// Schnittstelle zum Echtzeit-Backend
pub trait CallBridge: Send {
    /// Registriert einen Account und gibt dessen Backend-Handle zurueck
    fn registrieren(&mut self, zugang: &Zugangsdaten) -> Result<String, BridgeError>;

    /// Tritt einer Konferenz bei
    fn beitreten(&mut self, ziel: &str) -> Result<(), BridgeError>;

    /// Verlaesst alle laufenden Gespraeche
    fn verlassen(&mut self) -> Result<(), BridgeError>;

    /// Namen aller verfuegbaren Geraete einer Art
    fn audio_geraete(&self, art: GeraeteArt) -> Vec<String>;

    /// Name des aktuell verwendeten Geraets
    fn aktuelles_geraet(&self, art: GeraeteArt) -> String;

    /// Wechselt das Audiogeraet
    fn audio_geraet_setzen(&mut self, art: GeraeteArt, name: &str) -> Result<(), BridgeError>;

    /// Setzt den Pegel aller aktiven Gespraechs-Legs
    fn lautstaerke_setzen(&mut self, art: GeraeteArt, pegel: f32);
}

// ---------------------------------------------------------------------------
// SIP-URIs
// ---------------------------------------------------------------------------

/// Zerlegt `sip:benutzer@domain` in Benutzer und Domain
///
/// Ohne `sip:` sind beide Teile leer, ohne `@` ist die Domain leer und der
/// gesamte Rest gilt als Benutzer.
pub fn sip_uri_zerlegen(uri: &str) -> (String, String) {
    let adresse = match uri.find("sip:") {
        Some(p) => &uri[p + 4..],
        None => "",
    };
    match adresse.find('@') {
        Some(p) => (adresse[..p].to_string(), adresse[p + 1..].to_string()),
        None => (adresse.to_string(), String::new()),
    }
}

// ---------------------------------------------------------------------------
// BrueckenKonfig
// ---------------------------------------------------------------------------

/// Einstellungen der simulierten Bruecke (`[bruecke]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrueckenKonfig {
    /// Konferenz, falls Session.Create keine URI liefert
    pub konferenz_uri: String,
    /// Registrar, z.B. `sip:voice.example.org`
    pub registrar_uri: String,
    pub capture_geraete: Vec<String>,
    pub render_geraete: Vec<String>,
}

impl Default for BrueckenKonfig {
    fn default() -> Self {
        Self {
            konferenz_uri: String::new(),
            registrar_uri: String::new(),
            capture_geraete: vec!["Standard-Mikrofon".into()],
            render_geraete: vec!["Standard-Lautsprecher".into()],
        }
    }
}

// ---------------------------------------------------------------------------
// SimulierteBruecke
// ---------------------------------------------------------------------------

/// Call Bridge ohne SIP-Stack
///
/// Prueft URIs, verfolgt Registrierungs- und Beitrittszustand und
/// verwaltet die konfigurierten Geraete.
#[derive(Debug)]
pub struct SimulierteBruecke {
    konfig: BrueckenKonfig,
    registriert: Option<Zugangsdaten>,
    konferenz: Option<String>,
    aufnahme: String,
    wiedergabe: String,
    mikrofon_pegel: f32,
    lautsprecher_pegel: f32,
}

impl SimulierteBruecke {
    pub fn neu(konfig: BrueckenKonfig) -> Self {
        let aufnahme = konfig.capture_geraete.first().cloned().unwrap_or_default();
        let wiedergabe = konfig.render_geraete.first().cloned().unwrap_or_default();
        Self {
            konfig,
            registriert: None,
            konferenz: None,
            aufnahme,
            wiedergabe,
            mikrofon_pegel: 0.0,
            lautsprecher_pegel: 0.0,
        }
    }

    pub fn ist_registriert(&self) -> bool {
        self.registriert.is_some()
    }

    /// URI der aktuell beigetretenen Konferenz
    pub fn konferenz(&self) -> Option<&str> {
        self.konferenz.as_deref()
    }

    pub fn pegel(&self, art: GeraeteArt) -> f32 {
        match art {
            GeraeteArt::Aufnahme => self.mikrofon_pegel,
            GeraeteArt::Wiedergabe => self.lautsprecher_pegel,
        }
    }
}

impl CallBridge for SimulierteBruecke {
    fn registrieren(&mut self, zugang: &Zugangsdaten) -> Result<String, BridgeError> {
        let (benutzer, domain) = sip_uri_zerlegen(&zugang.uri);
        if benutzer.is_empty() || domain.is_empty() {
            return Err(BridgeError::Registrierung(format!(
                "ungueltige Account-URI: {:?}",
                zugang.uri
            )));
        }

        tracing::info!(
            benutzer = %benutzer,
            domain = %domain,
            registrar = %self.konfig.registrar_uri,
            "Account registriert (simuliert)"
        );
        self.registriert = Some(zugang.clone());
        Ok(format!("{benutzer}@{domain}"))
    }

    fn beitreten(&mut self, ziel: &str) -> Result<(), BridgeError> {
        if self.registriert.is_none() {
            return Err(BridgeError::NichtRegistriert);
        }

        let ziel = if ziel.is_empty() {
            self.konfig.konferenz_uri.as_str()
        } else {
            ziel
        };
        let (konferenz, domain) = sip_uri_zerlegen(ziel);
        if konferenz.is_empty() || domain.is_empty() {
            return Err(BridgeError::Beitritt(format!("ungueltige Konferenz-URI: {ziel:?}")));
        }

        tracing::info!(konferenz = %konferenz, domain = %domain, "Konferenz beigetreten (simuliert)");
        self.konferenz = Some(ziel.to_string());
        Ok(())
    }

    fn verlassen(&mut self) -> Result<(), BridgeError> {
        match self.konferenz.take() {
            Some(ziel) => tracing::info!(konferenz = %ziel, "Konferenz verlassen (simuliert)"),
            None => tracing::debug!("Verlassen ohne aktive Konferenz"),
        }
        Ok(())
    }

    fn audio_geraete(&self, art: GeraeteArt) -> Vec<String> {
        match art {
            GeraeteArt::Aufnahme => self.konfig.capture_geraete.clone(),
            GeraeteArt::Wiedergabe => self.konfig.render_geraete.clone(),
        }
    }

    fn aktuelles_geraet(&self, art: GeraeteArt) -> String {
        match art {
            GeraeteArt::Aufnahme => self.aufnahme.clone(),
            GeraeteArt::Wiedergabe => self.wiedergabe.clone(),
        }
    }

    fn audio_geraet_setzen(&mut self, art: GeraeteArt, name: &str) -> Result<(), BridgeError> {
        if !self.audio_geraete(art).iter().any(|g| g == name) {
            return Err(BridgeError::GeraetNichtGefunden(name.to_string()));
        }
        tracing::info!(art = %art, geraet = %name, "Audiogeraet gewechselt (simuliert)");
        match art {
            GeraeteArt::Aufnahme => self.aufnahme = name.to_string(),
            GeraeteArt::Wiedergabe => self.wiedergabe = name.to_string(),
        }
        Ok(())
    }

    fn lautstaerke_setzen(&mut self, art: GeraeteArt, pegel: f32) {
        tracing::debug!(art = %art, pegel, "Pegel gesetzt (simuliert)");
        match art {
            GeraeteArt::Aufnahme => self.mikrofon_pegel = pegel,
            GeraeteArt::Wiedergabe => self.lautsprecher_pegel = pegel,
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingBridge
// ---------------------------------------------------------------------------

#[cfg(any(test, feature = "test-support"))]
/// Ein aufgezeichneter Aufruf der [`RecordingBridge`]
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeAufruf {
    Registrieren(Zugangsdaten),
    Beitreten(String),
    Verlassen,
    GeraetSetzen(GeraeteArt, String),
    LautstaerkeSetzen(GeraeteArt, f32),
}

#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
struct Aufzeichnung {
    aufrufe: Vec<BridgeAufruf>,
    registrieren_fehlschlagen: bool,
    beitreten_fehlschlagen: bool,
    verlassen_fehlschlagen: bool,
    capture_geraete: Vec<String>,
    render_geraete: Vec<String>,
    aufnahme: String,
    wiedergabe: String,
}

#[cfg(any(test, feature = "test-support"))]
/// Test-Double: zeichnet alle Aufrufe auf und kann Fehler ausloesen
///
/// Klone teilen sich dieselbe Aufzeichnung, damit ein Test die Bruecke an
/// den Gateway uebergeben und danach die Aufrufe pruefen kann.
#[derive(Debug, Clone, Default)]
pub struct RecordingBridge {
    inner: Arc<Mutex<Aufzeichnung>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingBridge {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Bruecke mit vorgegebenen Geraetelisten
    pub fn mit_geraeten(capture: &[&str], render: &[&str]) -> Self {
        let bruecke = Self::neu();
        {
            let mut a = bruecke.inner.lock();
            a.capture_geraete = capture.iter().map(|s| s.to_string()).collect();
            a.render_geraete = render.iter().map(|s| s.to_string()).collect();
            a.aufnahme = a.capture_geraete.first().cloned().unwrap_or_default();
            a.wiedergabe = a.render_geraete.first().cloned().unwrap_or_default();
        }
        bruecke
    }

    pub fn registrieren_fehlschlagen(&self, an: bool) {
        self.inner.lock().registrieren_fehlschlagen = an;
    }

    pub fn beitreten_fehlschlagen(&self, an: bool) {
        self.inner.lock().beitreten_fehlschlagen = an;
    }

    pub fn verlassen_fehlschlagen(&self, an: bool) {
        self.inner.lock().verlassen_fehlschlagen = an;
    }

    /// Kopie aller bisherigen Aufrufe
    pub fn aufrufe(&self) -> Vec<BridgeAufruf> {
        self.inner.lock().aufrufe.clone()
    }

    pub fn aufrufe_leeren(&self) {
        self.inner.lock().aufrufe.clear();
    }
}

#[cfg(any(test, feature = "test-support"))]
impl CallBridge for RecordingBridge {
    fn registrieren(&mut self, zugang: &Zugangsdaten) -> Result<String, BridgeError> {
        let mut a = self.inner.lock();
        a.aufrufe.push(BridgeAufruf::Registrieren(zugang.clone()));
        if a.registrieren_fehlschlagen {
            return Err(BridgeError::Registrierung("aufgezeichneter Fehler".into()));
        }
        Ok(zugang.name.clone())
    }

    fn beitreten(&mut self, ziel: &str) -> Result<(), BridgeError> {
        let mut a = self.inner.lock();
        a.aufrufe.push(BridgeAufruf::Beitreten(ziel.to_string()));
        if a.beitreten_fehlschlagen {
            return Err(BridgeError::Beitritt("aufgezeichneter Fehler".into()));
        }
        Ok(())
    }

    fn verlassen(&mut self) -> Result<(), BridgeError> {
        let mut a = self.inner.lock();
        a.aufrufe.push(BridgeAufruf::Verlassen);
        if a.verlassen_fehlschlagen {
            return Err(BridgeError::Intern("aufgezeichneter Fehler".into()));
        }
        Ok(())
    }

    fn audio_geraete(&self, art: GeraeteArt) -> Vec<String> {
        let a = self.inner.lock();
        match art {
            GeraeteArt::Aufnahme => a.capture_geraete.clone(),
            GeraeteArt::Wiedergabe => a.render_geraete.clone(),
        }
    }

    fn aktuelles_geraet(&self, art: GeraeteArt) -> String {
        let a = self.inner.lock();
        match art {
            GeraeteArt::Aufnahme => a.aufnahme.clone(),
            GeraeteArt::Wiedergabe => a.wiedergabe.clone(),
        }
    }

    fn audio_geraet_setzen(&mut self, art: GeraeteArt, name: &str) -> Result<(), BridgeError> {
        let mut a = self.inner.lock();
        a.aufrufe.push(BridgeAufruf::GeraetSetzen(art, name.to_string()));
        match art {
            GeraeteArt::Aufnahme => a.aufnahme = name.to_string(),
            GeraeteArt::Wiedergabe => a.wiedergabe = name.to_string(),
        }
        Ok(())
    }

    fn lautstaerke_setzen(&mut self, art: GeraeteArt, pegel: f32) {
        self.inner
            .lock()
            .aufrufe
            .push(BridgeAufruf::LautstaerkeSetzen(art, pegel));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zugang(uri: &str) -> Zugangsdaten {
        Zugangsdaten {
            name: "alice".into(),
            passwort: "geheim".into(),
            uri: uri.into(),
        }
    }

    #[test]
    fn sip_uri_wird_zerlegt() {
        assert_eq!(
            sip_uri_zerlegen("sip:alice@voice.example.org"),
            ("alice".to_string(), "voice.example.org".to_string())
        );
        assert_eq!(
            sip_uri_zerlegen("sip:voice.example.org"),
            ("voice.example.org".to_string(), String::new())
        );
        assert_eq!(sip_uri_zerlegen("alice@x"), (String::new(), String::new()));
    }

    #[test]
    fn simulierte_bruecke_beitritt_nur_nach_registrierung() {
        let mut b = SimulierteBruecke::neu(BrueckenKonfig::default());
        assert_eq!(
            b.beitreten("sip:conf@example.org"),
            Err(BridgeError::NichtRegistriert)
        );

        b.registrieren(&zugang("sip:alice@example.org")).unwrap();
        assert!(b.ist_registriert());
        b.beitreten("sip:conf@example.org").unwrap();
        assert_eq!(b.konferenz(), Some("sip:conf@example.org"));

        b.verlassen().unwrap();
        assert_eq!(b.konferenz(), None);
    }

    #[test]
    fn simulierte_bruecke_lehnt_ungueltige_uris_ab() {
        let mut b = SimulierteBruecke::neu(BrueckenKonfig::default());
        assert!(matches!(
            b.registrieren(&zugang("alice")),
            Err(BridgeError::Registrierung(_))
        ));

        b.registrieren(&zugang("sip:alice@example.org")).unwrap();
        assert!(matches!(b.beitreten("sip:nurdomain"), Err(BridgeError::Beitritt(_))));
    }

    #[test]
    fn simulierte_bruecke_nutzt_standard_konferenz() {
        let mut b = SimulierteBruecke::neu(BrueckenKonfig {
            konferenz_uri: "sip:lobby@example.org".into(),
            ..Default::default()
        });
        b.registrieren(&zugang("sip:alice@example.org")).unwrap();
        b.beitreten("").unwrap();
        assert_eq!(b.konferenz(), Some("sip:lobby@example.org"));
    }

    #[test]
    fn simulierte_bruecke_geraete() {
        let mut b = SimulierteBruecke::neu(BrueckenKonfig {
            render_geraete: vec!["A".into(), "B".into()],
            ..Default::default()
        });
        assert_eq!(b.aktuelles_geraet(GeraeteArt::Wiedergabe), "A");
        b.audio_geraet_setzen(GeraeteArt::Wiedergabe, "B").unwrap();
        assert_eq!(b.aktuelles_geraet(GeraeteArt::Wiedergabe), "B");
        assert_eq!(
            b.audio_geraet_setzen(GeraeteArt::Wiedergabe, "C"),
            Err(BridgeError::GeraetNichtGefunden("C".into()))
        );

        b.lautstaerke_setzen(GeraeteArt::Aufnahme, 0.75);
        assert_eq!(b.pegel(GeraeteArt::Aufnahme), 0.75);
    }

    #[test]
    fn recording_bridge_teilt_aufzeichnung() {
        let pruefer = RecordingBridge::neu();
        let mut b: Box<dyn CallBridge> = Box::new(pruefer.clone());

        b.registrieren(&zugang("sip:alice@example.org")).unwrap();
        b.lautstaerke_setzen(GeraeteArt::Wiedergabe, 0.5);

        assert_eq!(
            pruefer.aufrufe(),
            vec![
                BridgeAufruf::Registrieren(zugang("sip:alice@example.org")),
                BridgeAufruf::LautstaerkeSetzen(GeraeteArt::Wiedergabe, 0.5),
            ]
        );
    }

    #[test]
    fn recording_bridge_fehler_ausloesen() {
        let pruefer = RecordingBridge::neu();
        pruefer.beitreten_fehlschlagen(true);
        let mut b = pruefer.clone();
        assert!(b.beitreten("sip:x@y").is_err());
        assert_eq!(pruefer.aufrufe(), vec![BridgeAufruf::Beitreten("sip:x@y".into())]);
    }

    #[test]
    fn bridge_fehler_wird_backend_fehler() {
        let e: GatewayError = BridgeError::NichtRegistriert.into();
        assert_eq!(e.fehler_code(), 1100);
    }
}

//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use voicegate_core::GatewayError;
use voicegate_observability::LogKonfig;
use voicegate_protocol::wire::DEFAULT_MAX_FRAME_SIZE;
use voicegate_protocol::ProtokollKonfig;
use voicegate_signaling::queue::DEFAULT_KAPAZITAET;
use voicegate_voice::BrueckenKonfig;

/// Umgebungsvariable mit dem Pfad der Konfigurationsdatei
pub const ENV_CONFIG: &str = "VOICEGATE_CONFIG";
/// Standardpfad der Konfigurationsdatei
pub const STANDARD_PFAD: &str = "voicegate.toml";
/// Standard-Port des Gateways
pub const STANDARD_PORT: u16 = 44124;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen der TCP-Front
    pub server: ServerEinstellungen,
    /// Protokollversion und Voice-Server
    pub protokoll: ProtokollKonfig,
    /// Simulierte Call Bridge
    pub bruecke: BrueckenKonfig,
    /// Logging-Einstellungen
    pub logging: LogKonfig,
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Bind-Adresse fuer die TCP-Verbindung
    pub bind_adresse: String,
    pub port: u16,
    /// Maximale Groesse eines eingehenden Dokuments in Bytes
    pub max_frame_size: usize,
    /// Kapazitaet der Request-Queue
    pub queue_kapazitaet: usize,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "127.0.0.1".into(),
            port: STANDARD_PORT,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            queue_kapazitaet: DEFAULT_KAPAZITAET,
        }
    }
}

/// Herkunft einer geladenen Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quelle {
    Datei,
    /// Datei fehlte, Standardwerte
    Standard,
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<(Self, Quelle)> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config = Self::aus_toml(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok((config, Quelle::Datei))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok((Self::default(), Quelle::Standard))
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Parst und prueft einen TOML-Text
    pub fn aus_toml(inhalt: &str) -> Result<Self, GatewayError> {
        let config: Self =
            toml::from_str(inhalt).map_err(|e| GatewayError::Konfiguration(e.to_string()))?;
        config.pruefen()?;
        Ok(config)
    }

    /// Prueft Werte, die serde allein nicht abfangen kann
    pub fn pruefen(&self) -> Result<(), GatewayError> {
        self.bind_adresse()?;
        if self.server.max_frame_size == 0 {
            return Err(GatewayError::Konfiguration(
                "server.max_frame_size muss groesser als 0 sein".into(),
            ));
        }
        if self.server.queue_kapazitaet == 0 {
            return Err(GatewayError::Konfiguration(
                "server.queue_kapazitaet muss groesser als 0 sein".into(),
            ));
        }
        Ok(())
    }

    /// Gibt die vollstaendige Bind-Adresse fuer TCP zurueck
    pub fn bind_adresse(&self) -> Result<SocketAddr, GatewayError> {
        let text = format!("{}:{}", self.server.bind_adresse, self.server.port);
        text.parse().map_err(|_| {
            GatewayError::Konfiguration(format!("ungueltige Bind-Adresse: {text}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voicegate_observability::LogFormat;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.server.port, 44124);
        assert_eq!(cfg.protokoll.version, 122);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.pruefen().is_ok());
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_adresse().unwrap().to_string(), "127.0.0.1:44124");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [server]
            port = 45000

            [protokoll]
            version = 120
            voice_server_uri = "http://voice.example.org/"

            [bruecke]
            konferenz_uri = "sip:lobby@voice.example.org"

            [logging]
            format = "json"
        "#;
        let cfg = ServerConfig::aus_toml(toml).unwrap();
        assert_eq!(cfg.server.port, 45000);
        assert_eq!(cfg.protokoll.version, 120);
        assert!(!cfg.protokoll.ist_kompatibel());
        assert_eq!(cfg.bruecke.konferenz_uri, "sip:lobby@voice.example.org");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.server.bind_adresse, "127.0.0.1");
        assert_eq!(cfg.bruecke.capture_geraete, vec!["Standard-Mikrofon"]);
    }

    #[test]
    fn ungueltige_werte_werden_abgelehnt() {
        let f = ServerConfig::aus_toml("[server]\nbind_adresse = \"kein host\"").unwrap_err();
        assert_eq!(f.fehler_code(), 5000);
        assert!(ServerConfig::aus_toml("[server]\nqueue_kapazitaet = 0").is_err());
        assert!(ServerConfig::aus_toml("[server]\nport = \"abc\"").is_err());
    }

    #[test]
    fn fehlende_datei_ergibt_standardwerte() {
        let (cfg, quelle) = ServerConfig::laden("/gibt/es/nicht/voicegate.toml").unwrap();
        assert_eq!(quelle, Quelle::Standard);
        assert_eq!(cfg, ServerConfig::default());
    }
}

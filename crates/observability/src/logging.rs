//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per `[logging]`-Abschnitt und Umgebungsvariable:
//! - `VG_LOG_LEVEL`: Filter-Ausdruck (z.B. `debug` oder
//!   `info,voicegate_voice=trace`), ueberschreibt `level`
//! - `VG_LOG_FORMAT`: Format (text/json), ueberschreibt `format`

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Umgebungsvariable fuer den Log-Filter
pub const ENV_LOG_LEVEL: &str = "VG_LOG_LEVEL";
/// Umgebungsvariable fuer das Log-Format
pub const ENV_LOG_FORMAT: &str = "VG_LOG_FORMAT";

/// Ausgabeformat der Log-Zeilen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parst `text` oder `json` (Gross-/Kleinschreibung zaehlt)
    pub fn parsen(wert: &str) -> Option<Self> {
        match wert {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Logging-Einstellungen (`[logging]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogKonfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogKonfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
        }
    }
}

impl LogKonfig {
    /// Wendet die Umgebungs-Overrides an
    ///
    /// Ein unbekanntes Format aus der Umgebung wird ignoriert.
    pub fn mit_overrides(mut self, level: Option<String>, format: Option<String>) -> Self {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = format.as_deref().and_then(LogFormat::parsen) {
            self.format = format;
        }
        self
    }

    /// Liest `VG_LOG_LEVEL` und `VG_LOG_FORMAT` aus der Umgebung
    pub fn aus_umgebung(self) -> Self {
        self.mit_overrides(
            std::env::var(ENV_LOG_LEVEL).ok(),
            std::env::var(ENV_LOG_FORMAT).ok(),
        )
    }

    /// Baut den Filter; ungueltige Ausdruecke fallen auf `info` zurueck
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialisiert das Logging-System.
///
/// Umgebungsvariablen haben Vorrang vor der Konfiguration. Schlaegt fehl,
/// wenn bereits ein globaler Subscriber gesetzt ist.
pub fn logging_initialisieren(konfig: &LogKonfig) -> anyhow::Result<()> {
    let konfig = konfig.clone().aus_umgebung();
    let filter = konfig.filter();

    let ergebnis = match konfig.format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_current_span(true)
            .try_init(),
        LogFormat::Text => fmt().with_env_filter(filter).with_target(true).try_init(),
    };
    ergebnis.map_err(|e| anyhow::anyhow!("Logging konnte nicht initialisiert werden: {e}"))?;

    tracing::debug!(level = %konfig.level, format = ?konfig.format, "Logging initialisiert");
    Ok(())
}

//! Fehlertypen fuer voicegate
//!
//! Zentraler Fehler-Enum fuer die Steuerebene. Die vier Fehlerarten des
//! Gateways (Dekodierung, unbekannte Aktion, unzulaessiger Uebergang,
//! Backend) haben eigene Varianten mit festen Fehler-Codes, damit die
//! Klassifizierungsgrenze sie in eine Fehler-Response uebersetzen kann.

use thiserror::Error;

/// Globaler Result-Alias fuer voicegate
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Alle moeglichen Fehler der Steuerebene
#[derive(Debug, Error)]
pub enum GatewayError {
    // --- Klassifizierung ---
    /// Ein Pflichtfeld fehlt in einer ansonsten erkannten Aktion
    #[error("Pflichtfeld fehlt: {feld}")]
    Dekodierung { feld: String },

    /// Der Aktions-String passt zu keinem bekannten Familie/Verb-Paar
    #[error("Unbekannte Aktion: {0}")]
    UnbekannteAktion(String),

    /// Die Nutzlast ist kein wohlgeformtes XML
    #[error("Ungueltiges XML: {0}")]
    UngueltigesXml(String),

    // --- Zustandsmaschine ---
    /// Ereignis ohne deklarierte Reaktion im aktuellen Zustand
    #[error("Unzulaessiger Uebergang: {ereignis} im Zustand {zustand}")]
    UnzulaessigerUebergang {
        zustand: &'static str,
        ereignis: &'static str,
    },

    // --- Backend ---
    /// Operation der Call Bridge fehlgeschlagen
    #[error("Backend-Fehler: {0}")]
    Backend(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),
}

impl GatewayError {
    /// Erstellt einen Dekodierungsfehler fuer ein fehlendes Feld
    pub fn dekodierung(feld: impl Into<String>) -> Self {
        Self::Dekodierung { feld: feld.into() }
    }

    /// Fehler-Code fuer StatusCode-Felder in Fehler-Responses
    pub fn fehler_code(&self) -> u32 {
        match self {
            Self::Dekodierung { .. } => 1001,
            Self::UnbekannteAktion(_) => 1002,
            Self::UngueltigesXml(_) => 1003,
            Self::UnzulaessigerUebergang { .. } => 1004,
            Self::Backend(_) => 1100,
            Self::Konfiguration(_) => 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fehler_anzeige_nennt_feld() {
        let e = GatewayError::dekodierung("AccountName");
        assert_eq!(e.to_string(), "Pflichtfeld fehlt: AccountName");
    }

    #[test]
    fn unbekannte_aktion_nennt_rohstring() {
        let e = GatewayError::UnbekannteAktion("Foo.Bar.1".into());
        assert!(e.to_string().contains("Foo.Bar.1"));
    }

    #[test]
    fn fehler_codes_sind_nicht_null() {
        assert_eq!(GatewayError::dekodierung("x").fehler_code(), 1001);
        assert_eq!(GatewayError::UnbekannteAktion("x".into()).fehler_code(), 1002);
        assert_eq!(GatewayError::Backend("x".into()).fehler_code(), 1100);
    }

    #[test]
    fn uebergangsfehler_nennt_zustand_und_ereignis() {
        let e = GatewayError::UnzulaessigerUebergang {
            zustand: "Start",
            ereignis: "Stop",
        };
        assert_eq!(e.fehler_code(), 1004);
        assert_eq!(e.to_string(), "Unzulaessiger Uebergang: Stop im Zustand Start");
    }
}

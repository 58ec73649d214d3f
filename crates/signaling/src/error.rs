//! Fehlertypen fuer die Server-Front

use thiserror::Error;

/// Fehlertyp fuer die Server-Front
#[derive(Debug, Error)]
pub enum SignalingError {
    /// IO-Fehler (TCP, Socket)
    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),

    /// Der Worker mit dem Gateway laeuft nicht mehr
    #[error("Gateway-Worker beendet")]
    WorkerBeendet,
}

/// Result-Typ fuer die Server-Front
pub type SignalingResult<T> = Result<T, SignalingError>;

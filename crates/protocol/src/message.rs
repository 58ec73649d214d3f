//! Ausgehende Nachrichten

use crate::config::ProtokollKonfig;
use crate::event::Event;
use crate::response::Response;

/// Endemarke nach jeder serialisierten Nachricht
pub const NACHRICHTEN_ENDE: &str = "\n\n\n";

/// Eine ausgehende Nachricht (Response oder Event)
#[derive(Debug, Clone, PartialEq)]
pub enum Nachricht {
    Antwort(Response),
    Ereignis(Event),
}

impl Nachricht {
    pub fn serialisieren(&self, konfig: &ProtokollKonfig) -> String {
        match self {
            Self::Antwort(r) => r.serialisieren(),
            Self::Ereignis(e) => e.serialisieren(konfig),
        }
    }

    pub fn als_antwort(&self) -> Option<&Response> {
        match self {
            Self::Antwort(r) => Some(r),
            Self::Ereignis(_) => None,
        }
    }

    pub fn als_ereignis(&self) -> Option<&Event> {
        match self {
            Self::Antwort(_) => None,
            Self::Ereignis(e) => Some(e),
        }
    }
}

impl From<Response> for Nachricht {
    fn from(r: Response) -> Self {
        Self::Antwort(r)
    }
}

impl From<Event> for Nachricht {
    fn from(e: Event) -> Self {
        Self::Ereignis(e)
    }
}

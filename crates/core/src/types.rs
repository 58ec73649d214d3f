//! Gemeinsame Werttypen fuer voicegate
//!
//! 3D-Vektoren und Posen fuer die raeumliche Audio-Positionierung sowie
//! die Handle-Literale, die der Gateway an den Client vergibt.

use serde::{Deserialize, Serialize};

/// Handle des aktiven Connectors (nicht leer)
pub const CONNECTOR_HANDLE: &str = "vgc-0001";

/// Handle des angemeldeten Accounts
pub const ACCOUNT_HANDLE: &str = "vga-0001";

/// Handle der Voice-Session
pub const SESSION_HANDLE: &str = "vgs-0001";

/// Dreidimensionaler Vektor (Weltkoordinaten des Clients)
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vektor3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vektor3 {
    pub const NULL: Vektor3 = Vektor3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn neu(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Vektor3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Pose eines Sprechers oder Zuhoerers
///
/// Position, Geschwindigkeit und die drei Orientierungsachsen
/// (Blickrichtung, oben, links).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vektor3,
    pub geschwindigkeit: Vektor3,
    pub at: Vektor3,
    pub up: Vektor3,
    pub left: Vektor3,
}

//! Mesh-Parameter (shared zwischen Editor, Persistenz und Optionen).

use crate::core::{CapStyle, FrameMode};
use serde::{Deserialize, Serialize};

/// Standard-Breite des Bands.
pub const RIBBON_WIDTH_DEFAULT: f32 = 10.0;
/// Standard-Radius der Röhre.
pub const TUBE_RADIUS_DEFAULT: f32 = 10.0;
/// Standard-Segmente pro Röhren-Ring.
pub const TUBE_RESOLUTION_DEFAULT: usize = 10;
/// Basis-Samples pro Bézier-Segment.
pub const CURVE_RESOLUTION_DEFAULT: usize = 20;
/// Bogenpunkte einer runden Band-Kappe.
pub const RIBBON_CAP_RESOLUTION_DEFAULT: usize = 20;
/// Ring-Schritte einer Röhren-Kappe.
pub const TUBE_CAP_RINGS_DEFAULT: usize = 8;

/// Parameter für Sampling, Band und Röhre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParameters {
    pub use_ribbon_mesh: bool,
    pub ribbon_width: f32,
    pub use_tube_mesh: bool,
    pub tube_radius: f32,
    /// Segmente pro Ring
    pub tube_resolution: usize,
    /// Multiplikator auf `curve_resolution`
    pub mesh_length_precision: usize,
    pub curve_resolution: usize,
    pub cap_style: CapStyle,
    pub ribbon_cap_resolution: usize,
    pub tube_cap_rings: usize,
    pub frame_mode: FrameMode,
}

impl Default for MeshParameters {
    fn default() -> Self {
        Self {
            use_ribbon_mesh: false,
            ribbon_width: RIBBON_WIDTH_DEFAULT,
            use_tube_mesh: false,
            tube_radius: TUBE_RADIUS_DEFAULT,
            tube_resolution: TUBE_RESOLUTION_DEFAULT,
            mesh_length_precision: 1,
            curve_resolution: CURVE_RESOLUTION_DEFAULT,
            cap_style: CapStyle::None,
            ribbon_cap_resolution: RIBBON_CAP_RESOLUTION_DEFAULT,
            tube_cap_rings: TUBE_CAP_RINGS_DEFAULT,
            // Röhren im Raum brauchen drehungsminimierte Rahmen
            frame_mode: FrameMode::Transported,
        }
    }
}

impl MeshParameters {
    /// Effektive Samples pro Segment (mindestens 1).
    pub fn subdivision(&self) -> usize {
        (self.curve_resolution * self.mesh_length_precision).max(1)
    }
}

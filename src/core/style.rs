//! Darstellungsattribute einer Kurve (Füllung, Farben).

use serde::{Deserialize, Serialize};

/// Standard-Füllfarbe (RGBA 0–255).
pub const FILL_COLOR_DEFAULT: Rgba8 = Rgba8::new(188, 4, 62, 100);
/// Standard-Linienfarbe (RGBA 0–255).
pub const STROKE_COLOR_DEFAULT: Rgba8 = Rgba8::new(2, 189, 190, 100);

/// 8-Bit-RGBA-Farbe, so wie sie in der Kurvendatei steht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Erstellt eine Farbe aus vier Kanälen.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Füll-Flag und Farben einer Kurve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveStyle {
    /// Geschlossene Kurven werden gefüllt gezeichnet
    pub fill: bool,
    pub fill_color: Rgba8,
    pub stroke_color: Rgba8,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            fill: true,
            fill_color: FILL_COLOR_DEFAULT,
            stroke_color: STROKE_COLOR_DEFAULT,
        }
    }
}

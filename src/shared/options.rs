//! Zentrale Konfiguration für den Bézier-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use super::MeshParameters;
use crate::core::{Rgba8, FILL_COLOR_DEFAULT, STROKE_COLOR_DEFAULT};
use serde::{Deserialize, Serialize};

// ── Interaktion ─────────────────────────────────────────────────────

/// Pick-Radius für Vertices in Pixeln.
pub const VERTEX_PICK_RADIUS: f32 = 8.0;
/// Pick-Radius für Kontrollpunkte in Pixeln.
pub const CONTROL_POINT_PICK_RADIUS: f32 = 6.0;
/// Schrittweite der Pfeiltasten-Feinjustierung.
pub const NUDGE_STEP: f32 = 1.0;

// ── Persistenz ──────────────────────────────────────────────────────

/// Standard-Dateiname der Kurvendatei.
pub const DOCUMENT_FILE_NAME: &str = "bezier_curve.json";

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `bezier_mesh_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Interaktion ─────────────────────────────────────────────
    /// Pick-Radius für Vertices in Pixeln
    pub vertex_pick_radius: f32,
    /// Pick-Radius für Kontrollpunkte in Pixeln
    pub control_point_pick_radius: f32,
    /// Schrittweite für Pfeiltasten
    #[serde(default = "default_nudge_step")]
    pub nudge_step: f32,

    // ── Persistenz ──────────────────────────────────────────────
    /// Dateiname für Speichern/Laden ohne expliziten Pfad
    #[serde(default = "default_document_file_name")]
    pub document_file_name: String,

    // ── Darstellung ─────────────────────────────────────────────
    /// Füllfarbe neuer Kurven
    pub fill_color: Rgba8,
    /// Linienfarbe neuer Kurven
    pub stroke_color: Rgba8,

    // ── Meshes ──────────────────────────────────────────────────
    #[serde(default)]
    pub mesh: MeshParameters,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            vertex_pick_radius: VERTEX_PICK_RADIUS,
            control_point_pick_radius: CONTROL_POINT_PICK_RADIUS,
            nudge_step: NUDGE_STEP,
            fill_color: FILL_COLOR_DEFAULT,
            stroke_color: STROKE_COLOR_DEFAULT,
            document_file_name: DOCUMENT_FILE_NAME.to_string(),
            mesh: MeshParameters::default(),
        }
    }
}

/// Serde-Default für `nudge_step` (ältere TOML-Dateien).
fn default_nudge_step() -> f32 {
    NUDGE_STEP
}

fn default_document_file_name() -> String {
    DOCUMENT_FILE_NAME.to_string()
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("bezier_mesh_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("bezier_mesh_editor.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("options_roundtrip.toml");
        let mut options = EditorOptions::default();
        options.vertex_pick_radius = 12.0;
        options.mesh.use_tube_mesh = true;
        options.mesh.tube_resolution = 16;
        options.save_to_file(&path).expect("Speichern erwartet");

        let loaded = EditorOptions::load_from_file(&path);
        assert_eq!(loaded, options);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let loaded = EditorOptions::load_from_file(&temp_path("does_not_exist.toml"));
        assert_eq!(loaded, EditorOptions::default());
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let path = temp_path("options_broken.toml");
        std::fs::write(&path, "vertex_pick_radius = \"breit\"").expect("Schreiben erwartet");
        assert_eq!(EditorOptions::load_from_file(&path), EditorOptions::default());
        let _ = std::fs::remove_file(&path);
    }
}

//! Fehlertypen der Geometrie- und Persistenz-Schicht.

use super::HandleKind;
use std::path::PathBuf;

/// Fehler beim Zugriff auf das Kurvenmodell oder beim Sampling.
///
/// Wird nie als Panic propagiert: Index-Fehler werden vor der Mutation
/// abgewiesen, degenerierte Kurven führen zu leeren Ergebnissen.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Index außerhalb von `[0, len)`
    #[error("Index {index} außerhalb des gültigen Bereichs (Länge {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// Weniger als 2 Vertices, keine Tangente definiert
    #[error("Kurve mit {vertex_count} Vertices ist degeneriert (mindestens 2 benötigt)")]
    DegenerateCurve { vertex_count: usize },
    /// Für diesen Punkt liegt (noch) keine Geo-Koordinate vor
    #[error("Keine Geo-Koordinate für {kind:?} #{index}")]
    UnprojectedPoint { kind: HandleKind, index: usize },
}

/// Fehler beim Laden/Speichern einer Kurvendatei.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Die angeforderte Datei existiert nicht
    #[error("Kurvendatei nicht gefunden: {}", .0.display())]
    MissingSourceFile(PathBuf),
    /// JSON vorhanden, aber Felder fehlen oder haben falsche Typen
    #[error("Kurvendatei fehlerhaft: {0}")]
    MalformedDocument(String),
    /// Lese-/Schreibfehler des Dateisystems
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

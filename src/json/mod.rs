//! JSON Import/Export für Kurvendateien.
//!
//! Das Format speichert Vertices und Kontrollpunkte als parallele Listen
//! unter dem Schlüssel `bezier`, zusammen mit Füll-/Farb- und
//! Mesh-Einstellungen.

pub mod document;
pub mod parser;
pub mod writer;

pub use document::{CurveDocument, StoredMeshFields};
pub use parser::{load_curve_document, parse_curve_document};
pub use writer::{save_curve_document, write_curve_document};

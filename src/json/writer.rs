//! Writer für Kurvendateien.

use super::document::CurveDocument;
use crate::core::DocumentError;
use std::path::Path;

/// Serialisiert das Dokument als eingerücktes JSON.
pub fn write_curve_document(document: &CurveDocument) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(&document.to_record())
        .map_err(|e| DocumentError::MalformedDocument(e.to_string()))
}

/// Schreibt das Dokument in eine Datei.
pub fn save_curve_document(path: &Path, document: &CurveDocument) -> Result<(), DocumentError> {
    let content = write_curve_document(document)?;
    std::fs::write(path, content)?;
    log::info!(
        "Kurvendatei gespeichert: {} ({} Vertices)",
        path.display(),
        document.model.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CurveModel, CurveStyle};
    use crate::shared::MeshParameters;
    use glam::Vec3;

    #[test]
    fn test_writes_camel_case_keys_and_omits_zero_z() {
        let mut model = CurveModel::new();
        model.append_vertex(Vec3::new(1.5, 2.0, 0.0));
        model.append_vertex(Vec3::new(4.0, 8.0, 3.0));
        let document = CurveDocument::new(model, CurveStyle::default(), &MeshParameters::default());

        let json = write_curve_document(&document).expect("Schreiben erwartet");
        let value: serde_json::Value = serde_json::from_str(&json).expect("gültiges JSON");
        let bezier = &value["bezier"];

        assert_eq!(bezier["useRibbonMesh"], false);
        assert_eq!(bezier["meshLengthPrecision"], 1);
        assert_eq!(bezier["colorFill"]["r"], 188);
        assert_eq!(bezier["colorStroke"]["b"], 190);
        assert_eq!(bezier["vertices"][0]["x"], 1.5);
        assert!(bezier["vertices"][0].get("z").is_none());
        assert_eq!(bezier["vertices"][1]["z"], 3.0);
        assert_eq!(bezier["cp1"].as_array().map(Vec::len), Some(2));
    }
}

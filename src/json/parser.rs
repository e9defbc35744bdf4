//! Parser für Kurvendateien.
//!
//! Das Dokument wird vollständig gelesen und geprüft, bevor der Aufrufer
//! es übernimmt. Ein Fehler lässt daher keinen halb geladenen Zustand
//! zurück.

use super::document::{CurveDocument, CurveFile, PointRecord, StoredMeshFields};
use crate::core::{CurveModel, CurveStyle, DocumentError};
use glam::Vec3;
use std::path::Path;

/// Parst eine Kurvendatei aus einem JSON-String.
pub fn parse_curve_document(json: &str) -> Result<CurveDocument, DocumentError> {
    let file: CurveFile = serde_json::from_str(json)
        .map_err(|e| DocumentError::MalformedDocument(e.to_string()))?;
    let record = file.bezier;

    if record.cp1.len() != record.vertices.len() || record.cp2.len() != record.vertices.len() {
        return Err(DocumentError::MalformedDocument(format!(
            "Listen ungleich lang: {} Vertices, {} cp1, {} cp2",
            record.vertices.len(),
            record.cp1.len(),
            record.cp2.len()
        )));
    }
    let non_finite = record
        .vertices
        .iter()
        .chain(&record.cp1)
        .chain(&record.cp2)
        .any(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()));
    if non_finite {
        return Err(DocumentError::MalformedDocument(
            "Koordinate ist keine endliche Zahl".to_string(),
        ));
    }
    for (name, value) in [
        ("ribbonWidth", record.ribbon_width),
        ("tubeRadius", record.tube_radius),
    ] {
        if !value.is_finite() {
            return Err(DocumentError::MalformedDocument(format!(
                "{} ist keine endliche Zahl",
                name
            )));
        }
    }

    let to_points =
        |list: Vec<PointRecord>| -> Vec<Vec3> { list.into_iter().map(Vec3::from).collect() };
    let model = CurveModel::from_parts(
        to_points(record.vertices),
        to_points(record.cp1),
        to_points(record.cp2),
        record.closed,
    )
    .ok_or_else(|| DocumentError::MalformedDocument("Listen ungleich lang".to_string()))?;

    Ok(CurveDocument {
        model,
        style: CurveStyle {
            fill: record.fill,
            fill_color: record.color_fill,
            stroke_color: record.color_stroke,
        },
        mesh: StoredMeshFields {
            use_ribbon_mesh: record.use_ribbon_mesh,
            ribbon_width: record.ribbon_width,
            mesh_length_precision: record.mesh_length_precision,
            use_tube_mesh: record.use_tube_mesh,
            tube_radius: record.tube_radius,
            tube_resolution: record.tube_resolution,
        },
    })
}

/// Liest und parst eine Kurvendatei.
pub fn load_curve_document(path: &Path) -> Result<CurveDocument, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::MissingSourceFile(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let document = parse_curve_document(&content)?;
    log::info!(
        "Kurvendatei geladen: {} ({} Vertices)",
        path.display(),
        document.model.len()
    );
    Ok(document)
}

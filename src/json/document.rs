//! Dateiformat der Kurvendatei und das daraus gelesene Dokument.
//!
//! ```json
//! { "bezier": { "fill": true, "closed": false, "useRibbonMesh": false,
//!   "ribbonWidth": 10.0, "meshLengthPrecision": 1, "useTubeMesh": false,
//!   "tubeRadius": 10.0, "tubeResolution": 10,
//!   "colorFill": {"r":188,"g":4,"b":62,"a":100}, "colorStroke": {...},
//!   "vertices": [{"x":0.0,"y":0.0}], "cp1": [...], "cp2": [...] } }
//! ```

use crate::core::{CurveModel, CurveStyle, Rgba8};
use crate::shared::MeshParameters;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wurzel-Objekt der Datei
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CurveFile {
    pub bezier: BezierRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BezierRecord {
    pub fill: bool,
    pub closed: bool,
    pub use_ribbon_mesh: bool,
    pub ribbon_width: f32,
    pub mesh_length_precision: usize,
    pub use_tube_mesh: bool,
    pub tube_radius: f32,
    pub tube_resolution: usize,
    pub color_fill: Rgba8,
    pub color_stroke: Rgba8,
    pub vertices: Vec<PointRecord>,
    pub cp1: Vec<PointRecord>,
    pub cp2: Vec<PointRecord>,
}

/// Punkt als `{x, y}`; `z` nur wenn ungleich 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct PointRecord {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub z: f32,
}

fn is_zero(value: &f32) -> bool {
    *value == 0.0
}

impl From<Vec3> for PointRecord {
    fn from(p: Vec3) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }
}

impl From<PointRecord> for Vec3 {
    fn from(p: PointRecord) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// Die in der Datei gespeicherten Mesh-Felder.
///
/// Kappen-Stil, Rahmen-Modus und Auflösungen der Kappen stehen nicht in
/// der Datei und bleiben beim Laden unverändert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredMeshFields {
    pub use_ribbon_mesh: bool,
    pub ribbon_width: f32,
    pub mesh_length_precision: usize,
    pub use_tube_mesh: bool,
    pub tube_radius: f32,
    pub tube_resolution: usize,
}

impl StoredMeshFields {
    pub fn from_params(params: &MeshParameters) -> Self {
        Self {
            use_ribbon_mesh: params.use_ribbon_mesh,
            ribbon_width: params.ribbon_width,
            mesh_length_precision: params.mesh_length_precision,
            use_tube_mesh: params.use_tube_mesh,
            tube_radius: params.tube_radius,
            tube_resolution: params.tube_resolution,
        }
    }

    /// Überschreibt die gespeicherten Felder, der Rest bleibt.
    pub fn apply_to(&self, params: &mut MeshParameters) {
        params.use_ribbon_mesh = self.use_ribbon_mesh;
        params.ribbon_width = self.ribbon_width;
        params.mesh_length_precision = self.mesh_length_precision;
        params.use_tube_mesh = self.use_tube_mesh;
        params.tube_radius = self.tube_radius;
        params.tube_resolution = self.tube_resolution;
    }
}

/// Vollständig gelesene Kurvendatei
#[derive(Debug, Clone, PartialEq)]
pub struct CurveDocument {
    pub model: CurveModel,
    pub style: CurveStyle,
    pub mesh: StoredMeshFields,
}

impl CurveDocument {
    pub fn new(model: CurveModel, style: CurveStyle, params: &MeshParameters) -> Self {
        Self {
            model,
            style,
            mesh: StoredMeshFields::from_params(params),
        }
    }

    pub(crate) fn to_record(&self) -> CurveFile {
        let points = |list: &[Vec3]| -> Vec<PointRecord> {
            list.iter().copied().map(PointRecord::from).collect()
        };
        CurveFile {
            bezier: BezierRecord {
                fill: self.style.fill,
                closed: self.model.is_closed(),
                use_ribbon_mesh: self.mesh.use_ribbon_mesh,
                ribbon_width: self.mesh.ribbon_width,
                mesh_length_precision: self.mesh.mesh_length_precision,
                use_tube_mesh: self.mesh.use_tube_mesh,
                tube_radius: self.mesh.tube_radius,
                tube_resolution: self.mesh.tube_resolution,
                color_fill: self.style.fill_color,
                color_stroke: self.style.stroke_color,
                vertices: points(self.model.vertices()),
                cp1: points(self.model.control_points1()),
                cp2: points(self.model.control_points2()),
            },
        }
    }
}

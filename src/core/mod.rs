//! Core-Domänentypen: Kurvenmodell, Sampling und Mesh-Erzeugung.

pub mod curve_model;
pub mod error;
pub mod geo;
pub mod mesh;
pub mod ribbon;
pub mod sampler;
pub mod style;
/// Röhren-Mesh mit runden oder flachen Kappen
pub mod tube;

pub use curve_model::{
    cubic_bezier, CubicSegment, CurveModel, Handle, HandleKind, CONTROL_POINT_FAR,
    CONTROL_POINT_NEAR,
};
pub use error::{CurveError, DocumentError};
pub use geo::{GeoCurve, GeoProjection, ProjectionReport};
pub use mesh::{CapEnd, CapStyle, Mesh, MeshVertex};
pub use ribbon::{build_ribbon, RibbonMesh};
pub use sampler::{sample_curve, sample_or_empty, Bounds, CurveSample, FrameMode, SampledCurve};
pub use style::{CurveStyle, Rgba8, FILL_COLOR_DEFAULT, STROKE_COLOR_DEFAULT};
pub use tube::{build_tube, TubeMesh};

//! Bézier Mesh Editor Library.
//! Kurvenmodell, Polyline-Sampling sowie Ribbon- und Tube-Meshes als
//! Library exportiert für Hosts, Tests und Benchmarks.

pub mod app;
pub mod core;
pub mod json;
pub mod shared;

pub use app::{BezierEditor, EditorKey, InteractionController, InteractionResponse, PointerButton};
pub use core::{
    build_ribbon, build_tube, sample_curve, CapStyle, CurveError, CurveModel, CurveStyle,
    DocumentError, FrameMode, Handle, HandleKind, Mesh, MeshVertex, RibbonMesh, SampledCurve,
    TubeMesh,
};
pub use core::{GeoCurve, GeoProjection, ProjectionReport};
pub use json::{load_curve_document, parse_curve_document, save_curve_document, CurveDocument};
pub use shared::{EditorOptions, MeshParameters};

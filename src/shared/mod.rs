//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Optionen und Mesh-Parameter, die zwischen `app`, `json`
//! und den Demos geteilt werden.

mod mesh_params;
pub mod options;

pub use mesh_params::MeshParameters;
pub use mesh_params::{
    CURVE_RESOLUTION_DEFAULT, RIBBON_CAP_RESOLUTION_DEFAULT, RIBBON_WIDTH_DEFAULT,
    TUBE_CAP_RINGS_DEFAULT, TUBE_RADIUS_DEFAULT, TUBE_RESOLUTION_DEFAULT,
};
pub use options::EditorOptions;
pub use options::{CONTROL_POINT_PICK_RADIUS, NUDGE_STEP, VERTEX_PICK_RADIUS};

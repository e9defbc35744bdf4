//! Application-Layer: Editor-Fassade und Interaktions-Controller.

/// Kurvenmodell mit automatischer Regenerierung der Geometrie
pub mod editor;
pub mod interaction;

pub use editor::BezierEditor;
pub use interaction::{EditorKey, InteractionController, InteractionResponse, PointerButton};

//! Baut eine kleine Kurve, erzeugt Ribbon und Tube und speichert sie als JSON.

use bezier_mesh_editor::{BezierEditor, CapStyle, EditorOptions};
use glam::Vec3;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = EditorOptions::load_from_file(&EditorOptions::config_path());
    let mut editor = BezierEditor::new(&options);
    editor.update_params(|p| {
        p.use_ribbon_mesh = true;
        p.use_tube_mesh = true;
        p.cap_style = CapStyle::Round;
    });

    for position in [
        Vec3::new(100.0, 300.0, 0.0),
        Vec3::new(250.0, 120.0, 0.0),
        Vec3::new(420.0, 260.0, 0.0),
        Vec3::new(560.0, 140.0, 0.0),
    ] {
        editor.append_vertex(position);
    }

    let curve = editor.sampled_curve();
    log::info!(
        "{} Samples, Länge {:.1}",
        curve.len(),
        curve.total_length()
    );
    if let Some(ribbon) = editor.ribbon() {
        log::info!(
            "Ribbon: {} Vertices, {} Dreiecke",
            ribbon.mesh().vertices().len(),
            ribbon.mesh().triangle_count()
        );
    }
    if let Some(tube) = editor.tube() {
        log::info!(
            "Tube: {} Vertices, {} Dreiecke, {} Bytes Vertex-Daten",
            tube.mesh().vertices().len(),
            tube.mesh().triangle_count(),
            tube.mesh().vertex_bytes().len()
        );
    }

    let path = std::env::temp_dir().join(&options.document_file_name);
    editor.save_to_file(&path)?;
    Ok(())
}

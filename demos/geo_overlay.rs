//! Kurve auf einer verschiebbaren Kartenansicht: Pixel-Positionen werden
//! nach einem Pan aus den Geo-Koordinaten neu berechnet.

use bezier_mesh_editor::{BezierEditor, GeoProjection};
use glam::{Vec2, Vec3};

/// Lineare Kartenansicht: `scale` Pixel pro Grad, Ursprung bei `origin`.
struct FlatMapView {
    origin: Vec2,
    scale: f32,
    size: Vec2,
}

impl GeoProjection for FlatMapView {
    fn pixels_to_geo(&self, pixel: Vec2) -> Option<Vec2> {
        Some(self.origin + pixel / self.scale)
    }

    fn geo_to_pixels(&self, geo: Vec2) -> Option<Vec2> {
        let pixel = (geo - self.origin) * self.scale;
        let visible = pixel.cmpge(Vec2::ZERO).all() && pixel.cmple(self.size).all();
        visible.then_some(pixel)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut view = FlatMapView {
        origin: Vec2::new(13.30, 52.50),
        scale: 2000.0,
        size: Vec2::new(800.0, 600.0),
    };

    let mut editor = BezierEditor::default();
    editor.append_vertex(Vec3::new(100.0, 100.0, 0.0));
    editor.append_vertex(Vec3::new(300.0, 250.0, 0.0));
    editor.append_vertex(Vec3::new(500.0, 120.0, 0.0));

    let report = editor.sync_geo(&view);
    log::info!("Geo-Abgleich: {} konvertiert", report.converted);

    // Pan um 0.05 Grad nach Osten
    view.origin.x += 0.05;
    let report = editor.apply_geo(&view);
    log::info!(
        "Nach Pan: {} konvertiert, {} außerhalb der Ansicht",
        report.converted,
        report.skipped
    );
    for (i, vertex) in editor.model().vertices().iter().enumerate() {
        log::info!("Vertex #{}: ({:.1}, {:.1})", i, vertex.x, vertex.y);
    }
    if let Some(center) = editor.center() {
        log::info!("Kurvenmitte: ({:.1}, {:.1})", center.x, center.y);
    }
    Ok(())
}

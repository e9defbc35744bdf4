//! Editor-Fassade: Kurvenmodell plus abgeleitete Geometrie.
//!
//! Jede Mutation löst `regenerate()` aus: Sampling und alle aktivierten
//! Meshes werden komplett neu gebaut und danach als neue `Arc`s
//! veröffentlicht. Ein Renderer, der noch eine alte `Arc` hält, liest
//! unverändert weiter.

use crate::core::{
    build_ribbon, build_tube, sample_or_empty, Bounds, CurveError, CurveModel, CurveStyle,
    DocumentError, GeoCurve, GeoProjection, Handle, ProjectionReport, RibbonMesh, SampledCurve,
    TubeMesh,
};
use crate::json::{self, CurveDocument};
use crate::shared::{EditorOptions, MeshParameters};
use glam::Vec3;
use std::path::Path;
use std::sync::Arc;

/// Kurven-Editor ohne UI-Anbindung
#[derive(Debug, Clone)]
pub struct BezierEditor {
    model: CurveModel,
    style: CurveStyle,
    params: MeshParameters,
    curve: Arc<SampledCurve>,
    ribbon: Option<Arc<RibbonMesh>>,
    tube: Option<Arc<TubeMesh>>,
    geo: GeoCurve,
    generation: u64,
}

impl Default for BezierEditor {
    fn default() -> Self {
        Self::new(&EditorOptions::default())
    }
}

impl BezierEditor {
    /// Leerer Editor mit Farben und Mesh-Parametern aus den Optionen.
    pub fn new(options: &EditorOptions) -> Self {
        let style = CurveStyle {
            fill_color: options.fill_color,
            stroke_color: options.stroke_color,
            ..CurveStyle::default()
        };
        Self::with_model(CurveModel::new(), style, options.mesh)
    }

    pub fn with_model(model: CurveModel, style: CurveStyle, params: MeshParameters) -> Self {
        let mut editor = Self {
            model,
            style,
            params,
            curve: Arc::new(SampledCurve::empty()),
            ribbon: None,
            tube: None,
            geo: GeoCurve::new(),
            generation: 0,
        };
        editor.regenerate();
        editor
    }

    pub fn model(&self) -> &CurveModel {
        &self.model
    }

    pub fn style(&self) -> &CurveStyle {
        &self.style
    }

    pub fn params(&self) -> &MeshParameters {
        &self.params
    }

    /// Aktuelle abgetastete Kurve (Outline-Polyline).
    pub fn sampled_curve(&self) -> Arc<SampledCurve> {
        Arc::clone(&self.curve)
    }

    /// Band-Mesh, falls aktiviert.
    pub fn ribbon(&self) -> Option<Arc<RibbonMesh>> {
        self.ribbon.clone()
    }

    /// Röhren-Mesh, falls aktiviert.
    pub fn tube(&self) -> Option<Arc<TubeMesh>> {
        self.tube.clone()
    }

    /// Zählt jede Regenerierung (für Renderer-Caches).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn geo(&self) -> &GeoCurve {
        &self.geo
    }

    /// Bounding-Box der abgetasteten Kurve.
    pub fn bounds(&self) -> Option<Bounds> {
        self.curve.bounds()
    }

    pub fn center(&self) -> Option<Vec3> {
        self.bounds().map(|b| b.center())
    }

    // ── Regenerierung ───────────────────────────────────────────

    /// Baut Sampling und aktivierte Meshes neu und tauscht sie aus.
    pub fn regenerate(&mut self) {
        let curve = sample_or_empty(
            &self.model,
            self.params.subdivision(),
            self.params.frame_mode,
        );

        self.ribbon = self.params.use_ribbon_mesh.then(|| {
            Arc::new(build_ribbon(
                &curve,
                self.params.ribbon_width,
                self.params.cap_style,
                self.params.ribbon_cap_resolution,
            ))
        });
        self.tube = self.params.use_tube_mesh.then(|| {
            Arc::new(build_tube(
                &curve,
                self.params.tube_radius,
                self.params.tube_resolution,
                self.params.cap_style,
                self.params.tube_cap_rings,
            ))
        });
        self.curve = Arc::new(curve);
        self.generation += 1;

        log::debug!(
            "Regeneriert #{}: {} Vertices, {} Samples, Ribbon {} Vertices, Tube {} Vertices",
            self.generation,
            self.model.len(),
            self.curve.len(),
            self.ribbon.as_ref().map_or(0, |r| r.mesh().vertices().len()),
            self.tube.as_ref().map_or(0, |t| t.mesh().vertices().len()),
        );
    }

    // ── Mutationen ──────────────────────────────────────────────

    pub fn append_vertex(&mut self, position: Vec3) -> usize {
        let index = self.model.append_vertex(position);
        self.regenerate();
        index
    }

    pub fn insert_vertex_between(
        &mut self,
        a: usize,
        b: usize,
        position: Vec3,
    ) -> Result<usize, CurveError> {
        let index = self.model.insert_vertex_between(a, b, position)?;
        self.geo.insert_slot(index);
        self.regenerate();
        Ok(index)
    }

    pub fn remove_vertex(&mut self, index: usize) -> Result<Vec3, CurveError> {
        let removed = self.model.remove_vertex(index)?;
        self.geo.remove_slot(index);
        self.regenerate();
        Ok(removed)
    }

    pub fn pop_vertex(&mut self) -> Option<Vec3> {
        let removed = self.model.pop_vertex()?;
        self.geo.remove_slot(self.model.len());
        self.regenerate();
        Some(removed)
    }

    pub fn set_position(&mut self, handle: Handle, position: Vec3) -> Result<(), CurveError> {
        self.model.set_position(handle, position)?;
        self.regenerate();
        Ok(())
    }

    pub fn nudge(&mut self, handle: Handle, delta: Vec3) -> Result<Vec3, CurveError> {
        let position = self.model.nudge(handle, delta)?;
        self.regenerate();
        Ok(position)
    }

    pub fn translate(&mut self, delta: Vec3) {
        self.model.translate(delta);
        self.regenerate();
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.model.set_closed(closed);
        self.regenerate();
    }

    /// Ersetzt das ganze Modell (z.B. nach Import). Geo-Koordinaten
    /// werden verworfen.
    pub fn set_model(&mut self, model: CurveModel) {
        self.model = model;
        self.geo = GeoCurve::new();
        self.regenerate();
    }

    /// Füllung betrifft nur die Darstellung, keine Geometrie.
    pub fn set_fill(&mut self, fill: bool) {
        self.style.fill = fill;
    }

    pub fn set_style(&mut self, style: CurveStyle) {
        self.style = style;
    }

    pub fn set_params(&mut self, params: MeshParameters) {
        self.params = params;
        self.regenerate();
    }

    /// Ändert einzelne Parameter und regeneriert einmal.
    pub fn update_params(&mut self, update: impl FnOnce(&mut MeshParameters)) {
        update(&mut self.params);
        self.regenerate();
    }

    // ── Persistenz ──────────────────────────────────────────────

    /// Aktueller Zustand als speicherbares Dokument.
    pub fn to_document(&self) -> CurveDocument {
        CurveDocument::new(self.model.clone(), self.style, &self.params)
    }

    /// Übernimmt ein vollständig gelesenes Dokument.
    pub fn apply_document(&mut self, document: CurveDocument) {
        self.model = document.model;
        self.geo = GeoCurve::new();
        self.style = document.style;
        document.mesh.apply_to(&mut self.params);
        self.regenerate();
    }

    /// Lädt aus einem JSON-String; bei Fehler bleibt der Zustand unverändert.
    pub fn load_from_str(&mut self, content: &str) -> Result<(), DocumentError> {
        let document = json::parse_curve_document(content)?;
        self.apply_document(document);
        Ok(())
    }

    /// Lädt aus einer Datei; bei Fehler bleibt der Zustand unverändert.
    pub fn load_from_file(&mut self, path: &Path) -> Result<(), DocumentError> {
        let document = json::load_curve_document(path)?;
        self.apply_document(document);
        Ok(())
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), DocumentError> {
        json::save_curve_document(path, &self.to_document())
    }

    // ── Geo ─────────────────────────────────────────────────────

    /// Aktualisiert die Geo-Koordinaten aus den Pixel-Positionen.
    pub fn sync_geo(&mut self, projection: &dyn GeoProjection) -> ProjectionReport {
        self.geo.sync_from_pixels(&self.model, projection)
    }

    /// Setzt die Pixel-Positionen aus den Geo-Koordinaten neu (Kartenansicht
    /// hat sich geändert) und regeneriert.
    pub fn apply_geo(&mut self, projection: &dyn GeoProjection) -> ProjectionReport {
        let report = self.geo.apply_to_pixels(&mut self.model, projection);
        self.regenerate();
        report
    }

    /// Übernimmt Geo-Koordinaten und berechnet daraus die Pixel-Positionen.
    pub fn set_geo(&mut self, geo: GeoCurve, projection: &dyn GeoProjection) -> ProjectionReport {
        self.geo = geo;
        self.apply_geo(projection)
    }
}

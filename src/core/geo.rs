//! Geo-Koordinaten parallel zum Pixel-Modell (Karten-Overlay).
//!
//! Die Projektion selbst ist ein injizierter Kollaborator. Liefert sie
//! keinen Wert (Punkt außerhalb der Kartenansicht), bleibt der bisherige
//! Wert des Slots erhalten und der Punkt wird im Report gezählt.

use super::{CurveError, CurveModel, Handle, HandleKind};
use glam::{Vec2, Vec3};

/// Umrechnung zwischen Bildschirm-Pixeln und Geo-Koordinaten.
pub trait GeoProjection {
    /// Pixel → Geo (z.B. Längen-/Breitengrad). `None` wenn undefiniert.
    fn pixels_to_geo(&self, pixel: Vec2) -> Option<Vec2>;
    /// Geo → Pixel. `None` wenn undefiniert.
    fn geo_to_pixels(&self, geo: Vec2) -> Option<Vec2>;
}

/// Ergebnis eines Abgleichs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionReport {
    pub converted: usize,
    pub skipped: usize,
}

impl ProjectionReport {
    /// `true` wenn kein Punkt übersprungen wurde.
    pub fn is_complete(&self) -> bool {
        self.skipped == 0
    }

    fn record(&mut self, handle: Handle, converted: bool) {
        if converted {
            self.converted += 1;
        } else {
            log::debug!(
                "Keine Projektion für {:?} #{}",
                handle.kind,
                handle.index
            );
            self.skipped += 1;
        }
    }
}

/// Geo-Koordinaten für Vertices und Kontrollpunkte (gleiche Indizierung
/// wie [`CurveModel`]). `None` = noch nie erfolgreich projiziert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoCurve {
    vertices: Vec<Option<Vec2>>,
    cp1: Vec<Option<Vec2>>,
    cp2: Vec<Option<Vec2>>,
}

impl GeoCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn slots(&self, kind: HandleKind) -> &Vec<Option<Vec2>> {
        match kind {
            HandleKind::Vertex => &self.vertices,
            HandleKind::ControlPoint1 => &self.cp1,
            HandleKind::ControlPoint2 => &self.cp2,
        }
    }

    fn slots_mut(&mut self, kind: HandleKind) -> &mut Vec<Option<Vec2>> {
        match kind {
            HandleKind::Vertex => &mut self.vertices,
            HandleKind::ControlPoint1 => &mut self.cp1,
            HandleKind::ControlPoint2 => &mut self.cp2,
        }
    }

    /// Geo-Koordinate eines Punkts, falls bekannt.
    pub fn get(&self, handle: Handle) -> Option<Vec2> {
        self.slots(handle.kind).get(handle.index).copied().flatten()
    }

    /// Setzt eine Geo-Koordinate direkt (z.B. aus einer Geo-Datei).
    pub fn set(&mut self, handle: Handle, geo: Vec2) -> Result<(), CurveError> {
        let len = self.len();
        let slot = self
            .slots_mut(handle.kind)
            .get_mut(handle.index)
            .ok_or(CurveError::IndexOutOfRange {
                index: handle.index,
                len,
            })?;
        *slot = Some(geo);
        Ok(())
    }

    fn resize(&mut self, len: usize) {
        self.vertices.resize(len, None);
        self.cp1.resize(len, None);
        self.cp2.resize(len, None);
    }

    /// Spiegelt `CurveModel::insert_vertex_between`: neuer, noch
    /// unbekannter Slot an `at`, nachfolgende Slots rücken auf.
    pub fn insert_slot(&mut self, at: usize) {
        if at > self.len() {
            return;
        }
        self.vertices.insert(at, None);
        self.cp1.insert(at, None);
        self.cp2.insert(at, None);
    }

    /// Spiegelt `CurveModel::remove_vertex`.
    pub fn remove_slot(&mut self, at: usize) {
        if at >= self.len() {
            return;
        }
        self.vertices.remove(at);
        self.cp1.remove(at);
        self.cp2.remove(at);
    }

    /// Übernimmt ein Modell in Geo-Koordinaten (x/y = Geo-Achsen).
    pub fn from_geo_model(model: &CurveModel) -> Self {
        let convert = |points: &[Vec3]| -> Vec<Option<Vec2>> {
            points.iter().map(|p| Some(p.truncate())).collect()
        };
        Self {
            vertices: convert(model.vertices()),
            cp1: convert(model.control_points1()),
            cp2: convert(model.control_points2()),
        }
    }

    /// Aktualisiert die Geo-Koordinaten nach einer Bearbeitung in Pixeln.
    ///
    /// Die Slot-Anzahl folgt dem Modell; fehlgeschlagene Projektionen
    /// behalten den vorherigen Wert.
    pub fn sync_from_pixels(
        &mut self,
        model: &CurveModel,
        projection: &dyn GeoProjection,
    ) -> ProjectionReport {
        self.resize(model.len());
        let mut report = ProjectionReport::default();
        for (handle, pixel) in model.handles() {
            match projection.pixels_to_geo(pixel.truncate()) {
                Some(geo) => {
                    self.slots_mut(handle.kind)[handle.index] = Some(geo);
                    report.record(handle, true);
                }
                None => report.record(handle, false),
            }
        }
        report
    }

    /// Schreibt die Pixel-Positionen neu, z.B. nach Zoom/Pan der Karte.
    ///
    /// Unbekannte Slots und fehlgeschlagene Projektionen lassen die
    /// Pixel-Position unverändert; `z` bleibt immer erhalten.
    pub fn apply_to_pixels(
        &self,
        model: &mut CurveModel,
        projection: &dyn GeoProjection,
    ) -> ProjectionReport {
        let mut report = ProjectionReport::default();
        let handles: Vec<(Handle, Vec3)> = model.handles().collect();
        for (handle, current) in handles {
            let pixel = self
                .get(handle)
                .and_then(|geo| projection.geo_to_pixels(geo));
            match pixel {
                Some(pixel) => {
                    let converted = model
                        .set_position(handle, pixel.extend(current.z))
                        .is_ok();
                    report.record(handle, converted);
                }
                None => report.record(handle, false),
            }
        }
        report
    }

    /// Geo-Koordinaten als eigenes Modell; scheitert am ersten
    /// unbekannten Slot.
    pub fn to_geo_model(&self, closed: bool) -> Result<CurveModel, CurveError> {
        let collect = |kind: HandleKind| -> Result<Vec<Vec3>, CurveError> {
            self.slots(kind)
                .iter()
                .enumerate()
                .map(|(index, slot)| {
                    slot.map(|geo| geo.extend(0.0))
                        .ok_or(CurveError::UnprojectedPoint { kind, index })
                })
                .collect()
        };
        let vertices = collect(HandleKind::Vertex)?;
        let cp1 = collect(HandleKind::ControlPoint1)?;
        let cp2 = collect(HandleKind::ControlPoint2)?;
        // Slots haben immer gleiche Länge
        Ok(CurveModel::from_parts(vertices, cp1, cp2, closed).unwrap_or_default())
    }
}

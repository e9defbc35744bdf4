//! Das Kurvenmodell: Vertices plus zwei Kontrollpunkte je Segment.
//!
//! Index `i` der Kontrollpunkt-Listen beschreibt das Segment, das bei
//! Vertex `i` ankommt (von Vertex `i-1`). Index 0 schließt die Kurve
//! (Vertex N-1 → Vertex 0) und wird bei offenen Kurven nicht benutzt.

use super::CurveError;
use glam::Vec3;

/// Lerp-Anteil des ersten Kontrollpunkts auf der Sehne eines neuen Segments.
pub const CONTROL_POINT_NEAR: f32 = 1.0 / 3.0;
/// Lerp-Anteil des zweiten Kontrollpunkts auf der Sehne eines neuen Segments.
pub const CONTROL_POINT_FAR: f32 = 2.0 / 3.0;

/// Art eines editierbaren Punkts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Vertex,
    ControlPoint1,
    ControlPoint2,
}

/// Adresse eines editierbaren Punkts (Art + Index in der parallelen Liste)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub kind: HandleKind,
    pub index: usize,
}

impl Handle {
    pub fn vertex(index: usize) -> Self {
        Self {
            kind: HandleKind::Vertex,
            index,
        }
    }

    pub fn control_point1(index: usize) -> Self {
        Self {
            kind: HandleKind::ControlPoint1,
            index,
        }
    }

    pub fn control_point2(index: usize) -> Self {
        Self {
            kind: HandleKind::ControlPoint2,
            index,
        }
    }
}

/// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
pub fn cubic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    inv2 * inv * p0 + 3.0 * inv2 * t * p1 + 3.0 * inv * t2 * p2 + t2 * t * p3
}

/// Ein kubisches Bézier-Segment zwischen zwei Vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub start: Vec3,
    pub cp1: Vec3,
    pub cp2: Vec3,
    pub end: Vec3,
}

impl CubicSegment {
    /// Position auf dem Segment für `t ∈ [0, 1]`.
    pub fn eval(&self, t: f32) -> Vec3 {
        cubic_bezier(self.start, self.cp1, self.cp2, self.end, t)
    }
}

/// Geordnete Vertices mit parallel indizierten Kontrollpunkten.
///
/// Invariante: alle drei Listen haben dieselbe Länge. Mutationen mit
/// ungültigem Index werden abgewiesen, bevor eine Liste verändert wird.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveModel {
    vertices: Vec<Vec3>,
    cp1: Vec<Vec3>,
    cp2: Vec<Vec3>,
    closed: bool,
}

impl CurveModel {
    /// Erstellt ein leeres, offenes Modell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Baut ein Modell aus parallelen Listen. `None` bei ungleichen Längen.
    pub fn from_parts(
        vertices: Vec<Vec3>,
        cp1: Vec<Vec3>,
        cp2: Vec<Vec3>,
        closed: bool,
    ) -> Option<Self> {
        if vertices.len() != cp1.len() || vertices.len() != cp2.len() {
            return None;
        }
        Some(Self {
            vertices,
            cp1,
            cp2,
            closed,
        })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn control_points1(&self) -> &[Vec3] {
        &self.cp1
    }

    pub fn control_points2(&self) -> &[Vec3] {
        &self.cp2
    }

    fn check_index(&self, index: usize) -> Result<(), CurveError> {
        if index < self.vertices.len() {
            Ok(())
        } else {
            Err(CurveError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
        }
    }

    fn list(&self, kind: HandleKind) -> &Vec<Vec3> {
        match kind {
            HandleKind::Vertex => &self.vertices,
            HandleKind::ControlPoint1 => &self.cp1,
            HandleKind::ControlPoint2 => &self.cp2,
        }
    }

    fn list_mut(&mut self, kind: HandleKind) -> &mut Vec<Vec3> {
        match kind {
            HandleKind::Vertex => &mut self.vertices,
            HandleKind::ControlPoint1 => &mut self.cp1,
            HandleKind::ControlPoint2 => &mut self.cp2,
        }
    }

    /// Position eines Vertex.
    pub fn vertex(&self, index: usize) -> Result<Vec3, CurveError> {
        self.position(Handle::vertex(index))
    }

    /// Setzt die Position eines Vertex (Kontrollpunkte bleiben stehen).
    pub fn set_vertex(&mut self, index: usize, position: Vec3) -> Result<(), CurveError> {
        self.set_position(Handle::vertex(index), position)
    }

    /// Position eines beliebigen Punkts.
    pub fn position(&self, handle: Handle) -> Result<Vec3, CurveError> {
        self.check_index(handle.index)?;
        Ok(self.list(handle.kind)[handle.index])
    }

    /// Setzt die Position eines beliebigen Punkts.
    pub fn set_position(&mut self, handle: Handle, position: Vec3) -> Result<(), CurveError> {
        self.check_index(handle.index)?;
        self.list_mut(handle.kind)[handle.index] = position;
        Ok(())
    }

    /// Verschiebt einen Punkt relativ (Feinjustierung per Pfeiltasten).
    pub fn nudge(&mut self, handle: Handle, delta: Vec3) -> Result<Vec3, CurveError> {
        self.check_index(handle.index)?;
        let slot = &mut self.list_mut(handle.kind)[handle.index];
        *slot += delta;
        Ok(*slot)
    }

    /// Hängt einen Vertex an das Ende an und gibt seinen Index zurück.
    ///
    /// Die Kontrollpunkte des neuen Segments liegen auf 1/3 bzw. 2/3 der
    /// Sehne vom bisherigen letzten Vertex. Der erste Vertex hat keinen
    /// Vorgänger; seine Kontrollpunkte liegen auf ihm selbst.
    pub fn append_vertex(&mut self, position: Vec3) -> usize {
        let previous = self.vertices.last().copied().unwrap_or(position);
        self.vertices.push(position);
        self.cp1.push(previous.lerp(position, CONTROL_POINT_NEAR));
        self.cp2.push(previous.lerp(position, CONTROL_POINT_FAR));
        self.vertices.len() - 1
    }

    /// Fügt einen Vertex zwischen den Vertices `a` und `b` ein.
    ///
    /// Benachbarte Indizes: Einfügen vor dem größeren Index. Das Paar
    /// `(0, N-1)` einer geschlossenen Kurve meint das Schließ-Segment,
    /// dort wird am Ende angehängt. Gibt den Index des neuen Vertex zurück.
    pub fn insert_vertex_between(
        &mut self,
        a: usize,
        b: usize,
        position: Vec3,
    ) -> Result<usize, CurveError> {
        self.check_index(a)?;
        self.check_index(b)?;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if lo == hi {
            return Err(CurveError::IndexOutOfRange {
                index: hi,
                len: self.vertices.len(),
            });
        }

        let last = self.vertices.len() - 1;
        let at = if self.closed && lo == 0 && hi == last && hi - lo > 1 {
            self.vertices.len()
        } else {
            hi
        };

        let previous = self.vertices[at - 1];
        self.vertices.insert(at, position);
        self.cp1
            .insert(at, previous.lerp(position, CONTROL_POINT_NEAR));
        self.cp2
            .insert(at, previous.lerp(position, CONTROL_POINT_FAR));
        Ok(at)
    }

    /// Entfernt einen Vertex samt Kontrollpunkten.
    pub fn remove_vertex(&mut self, index: usize) -> Result<Vec3, CurveError> {
        self.check_index(index)?;
        self.cp1.remove(index);
        self.cp2.remove(index);
        Ok(self.vertices.remove(index))
    }

    /// Entfernt den zuletzt angehängten Vertex.
    pub fn pop_vertex(&mut self) -> Option<Vec3> {
        self.cp1.pop();
        self.cp2.pop();
        self.vertices.pop()
    }

    /// Verschiebt alle Vertices und Kontrollpunkte.
    pub fn translate(&mut self, delta: Vec3) {
        for p in self
            .vertices
            .iter_mut()
            .chain(self.cp1.iter_mut())
            .chain(self.cp2.iter_mut())
        {
            *p += delta;
        }
    }

    /// Anzahl der Bézier-Segmente (offen: N-1, geschlossen: N).
    pub fn segment_count(&self) -> usize {
        match self.vertices.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Segment `i` in Laufrichtung; das letzte Segment einer geschlossenen
    /// Kurve läuft von Vertex N-1 zurück zu Vertex 0.
    pub fn segment(&self, i: usize) -> Option<CubicSegment> {
        if i >= self.segment_count() {
            return None;
        }
        let n = self.vertices.len();
        let end = (i + 1) % n;
        Some(CubicSegment {
            start: self.vertices[i],
            cp1: self.cp1[end],
            cp2: self.cp2[end],
            end: self.vertices[end],
        })
    }

    /// Alle Segmente in Laufrichtung.
    pub fn segments(&self) -> impl Iterator<Item = CubicSegment> + '_ {
        (0..self.segment_count()).filter_map(move |i| self.segment(i))
    }

    /// Gesamtzahl editierbarer Punkte (Vertices + beide Kontrollpunkt-Listen).
    pub fn handle_count(&self) -> usize {
        self.vertices.len() * 3
    }

    /// Flacher Index → Handle: erst alle Vertices, dann alle CP1, dann alle CP2.
    pub fn handle_at(&self, flat_index: usize) -> Option<Handle> {
        let n = self.vertices.len();
        if n == 0 || flat_index >= n * 3 {
            return None;
        }
        let index = flat_index % n;
        let kind = match flat_index / n {
            0 => HandleKind::Vertex,
            1 => HandleKind::ControlPoint1,
            _ => HandleKind::ControlPoint2,
        };
        Some(Handle { kind, index })
    }

    /// Iterator über alle Punkte mit ihrer Adresse.
    pub fn handles(&self) -> impl Iterator<Item = (Handle, Vec3)> + '_ {
        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, p)| (Handle::vertex(i), *p));
        let cp1 = self
            .cp1
            .iter()
            .enumerate()
            .map(|(i, p)| (Handle::control_point1(i), *p));
        let cp2 = self
            .cp2
            .iter()
            .enumerate()
            .map(|(i, p)| (Handle::control_point2(i), *p));
        vertices.chain(cp1).chain(cp2)
    }
}

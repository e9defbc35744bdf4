//! Polyline-Sampling der Bézier-Kette mit Tangenten und Normalen.
//!
//! Jedes Segment wird an `subdivision` gleichverteilten Parametern
//! `t ∈ [0, 1)` ausgewertet; nur das letzte Segment einer offenen Kurve
//! schließt seinen Endpunkt mit ein. Tangenten per Vorwärtsdifferenz
//! (letzter Punkt einer offenen Kurve: Rückwärtsdifferenz).

use super::{CurveError, CurveModel};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Ab diesem |cos| gilt die Referenzachse als parallel zur Start-Tangente.
const REFERENCE_PARALLEL_LIMIT: f32 = 0.999;

/// Wie die Normale pro Sample bestimmt wird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameMode {
    /// 2D-Screen-Space: Tangente um 90° in der xy-Ebene gedreht
    #[default]
    Planar,
    /// 3D: Start-Normale aus Referenzachse, danach Parallel-Transport
    /// (minimale Rotation zwischen aufeinanderfolgenden Tangenten)
    Transported,
}

/// Ein Abtastpunkt der Kurve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub position: Vec3,
    /// Einheitsvektor in Laufrichtung
    pub tangent: Vec3,
    /// Einheitsvektor senkrecht zur Tangente
    pub normal: Vec3,
    /// Kurvenparameter `segment + t`
    pub parameter: f32,
    /// Kumulierte Bogenlänge ab dem ersten Sample
    pub distance: f32,
}

/// Achsenparallele Bounding-Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Prüft ob ein Punkt in der xy-Projektion der Box liegt.
    pub fn contains_xy(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Abgetastete Kurve. Wird bei jeder Änderung komplett neu berechnet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledCurve {
    samples: Vec<CurveSample>,
    closed: bool,
    total_length: f32,
}

impl SampledCurve {
    /// Leere Kurve (Ergebnis für degenerierte Eingaben).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn samples(&self) -> &[CurveSample] {
        &self.samples
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.samples.iter().map(|s| s.position)
    }

    /// Gesamtlänge inklusive Schließ-Kante bei geschlossenen Kurven.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Textur-Koordinate entlang der Kurve: Bogenlänge / Gesamtlänge.
    pub fn texture_v(&self, index: usize) -> f32 {
        if self.total_length <= f32::EPSILON {
            return 0.0;
        }
        self.samples
            .get(index)
            .map_or(0.0, |s| s.distance / self.total_length)
    }

    /// Bounding-Box aller Samples, `None` bei leerer Kurve.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.samples.first()?.position;
        let (min, max) = self
            .positions()
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Bounds { min, max })
    }
}

/// Tastet das Modell ab. Weniger als 2 Vertices → `DegenerateCurve`.
pub fn sample_curve(
    model: &CurveModel,
    subdivision: usize,
    mode: FrameMode,
) -> Result<SampledCurve, CurveError> {
    if model.len() < 2 {
        return Err(CurveError::DegenerateCurve {
            vertex_count: model.len(),
        });
    }

    let subdivision = subdivision.max(1);
    let closed = model.is_closed();
    let segment_count = model.segment_count();

    let mut points = Vec::with_capacity(segment_count * subdivision + 1);
    let mut parameters = Vec::with_capacity(segment_count * subdivision + 1);
    for (i, segment) in model.segments().enumerate() {
        let steps = if !closed && i + 1 == segment_count {
            subdivision + 1 // letztes offenes Segment: Endpunkt einschließen
        } else {
            subdivision
        };
        for k in 0..steps {
            let t = k as f32 / subdivision as f32;
            points.push(segment.eval(t));
            parameters.push(i as f32 + t);
        }
    }

    let tangents = forward_tangents(&points, closed);
    let normals = match mode {
        FrameMode::Planar => tangents.iter().map(|t| planar_normal(*t)).collect(),
        FrameMode::Transported => transported_normals(&tangents, closed),
    };

    let mut samples = Vec::with_capacity(points.len());
    let mut distance = 0.0f32;
    for (k, position) in points.iter().enumerate() {
        if k > 0 {
            distance += points[k - 1].distance(*position);
        }
        samples.push(CurveSample {
            position: *position,
            tangent: tangents[k],
            normal: normals[k],
            parameter: parameters[k],
            distance,
        });
    }

    let mut total_length = distance;
    if closed {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            total_length += last.distance(*first);
        }
    }

    Ok(SampledCurve {
        samples,
        closed,
        total_length,
    })
}

/// Wie [`sample_curve`], aber degenerierte Kurven ergeben eine leere Kurve.
pub fn sample_or_empty(model: &CurveModel, subdivision: usize, mode: FrameMode) -> SampledCurve {
    match sample_curve(model, subdivision, mode) {
        Ok(curve) => curve,
        Err(e) => {
            log::debug!("Sampling übersprungen: {}", e);
            SampledCurve::empty()
        }
    }
}

/// Normierte Vorwärtsdifferenzen; Null-Längen übernehmen die nächste
/// definierte Tangente, komplett degenerierte Kurven fallen auf +X zurück.
fn forward_tangents(points: &[Vec3], closed: bool) -> Vec<Vec3> {
    let n = points.len();
    let mut tangents: Vec<Vec3> = (0..n)
        .map(|k| {
            let delta = if k + 1 < n {
                points[k + 1] - points[k]
            } else if closed {
                points[0] - points[k]
            } else {
                points[k] - points[k - 1]
            };
            delta.normalize_or_zero()
        })
        .collect();

    let Some(first_defined) = tangents.iter().position(|t| *t != Vec3::ZERO) else {
        return vec![Vec3::X; n];
    };
    let mut carry = tangents[first_defined];
    for t in tangents.iter_mut() {
        if *t == Vec3::ZERO {
            *t = carry;
        } else {
            carry = *t;
        }
    }
    tangents
}

fn planar_normal(tangent: Vec3) -> Vec3 {
    Vec3::new(-tangent.y, tangent.x, 0.0)
        .try_normalize()
        .unwrap_or_else(|| tangent.any_orthonormal_vector())
}

/// Parallel-Transport: die vorige Normale wird genau um die Rotation
/// zwischen den beiden Tangenten mitgedreht, nie gespiegelt.
///
/// Geschlossene Kurven: der Restwinkel über die Schließ-Kante wird
/// gleichmäßig auf alle Samples verteilt, damit die Naht nicht verdreht.
fn transported_normals(tangents: &[Vec3], closed: bool) -> Vec<Vec3> {
    let Some(&t0) = tangents.first() else {
        return Vec::new();
    };
    let reference = if t0.dot(Vec3::Z).abs() > REFERENCE_PARALLEL_LIMIT {
        Vec3::X
    } else {
        Vec3::Z
    };

    let mut normal = reference
        .cross(t0)
        .try_normalize()
        .unwrap_or_else(|| t0.any_orthonormal_vector());
    let mut normals = Vec::with_capacity(tangents.len());
    normals.push(normal);

    for pair in tangents.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let rotated = Quat::from_rotation_arc(prev, next) * normal;
        // Rundungsfehler: zurück in die Ebene senkrecht zur Tangente
        normal = (rotated - next * rotated.dot(next))
            .try_normalize()
            .unwrap_or_else(|| next.any_orthonormal_vector());
        normals.push(normal);
    }

    if closed {
        distribute_closing_twist(tangents, &mut normals);
    }
    normals
}

/// Dreht Normale `k` um ihre Tangente um `winkel · k / n`, wobei `winkel`
/// die Abweichung der über die Schließ-Kante transportierten letzten
/// Normale von der ersten ist.
fn distribute_closing_twist(tangents: &[Vec3], normals: &mut [Vec3]) {
    let n = normals.len();
    let (Some(&t_first), Some(&t_last), Some(&n_first), Some(&n_last)) = (
        tangents.first(),
        tangents.last(),
        normals.first(),
        normals.last(),
    ) else {
        return;
    };

    let carried = Quat::from_rotation_arc(t_last, t_first) * n_last;
    let carried = carried - t_first * carried.dot(t_first);
    let angle = t_first
        .dot(carried.cross(n_first))
        .atan2(carried.dot(n_first));
    if angle.abs() <= f32::EPSILON {
        return;
    }

    for (k, (normal, tangent)) in normals.iter_mut().zip(tangents).enumerate() {
        let rotated = Quat::from_axis_angle(*tangent, angle * k as f32 / n as f32) * *normal;
        *normal = (rotated - *tangent * rotated.dot(*tangent))
            .try_normalize()
            .unwrap_or(*normal);
    }
}

#[cfg(test)]
mod tests;

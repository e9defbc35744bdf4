//! Flaches Band entlang der abgetasteten Kurve.
//!
//! Pro Sample ein Vertex-Paar links/rechts der Kurve (Breite `width`),
//! verbunden als Triangle-Strip L0 R0 L1 R1 … Optional halbrunde Kappen
//! an den Enden offener Kurven als Fächer im selben Strip.

use super::mesh::{CapEnd, CapStyle, Mesh, MeshVertex};
use super::sampler::{CurveSample, SampledCurve};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;
use std::ops::Range;

/// Mindestanzahl Bogenpunkte einer runden Kappe.
const MIN_CAP_POINTS: usize = 3;

/// Band-Mesh mit bekannter Vertex-Anordnung.
///
/// Layout: zuerst die Körper-Paare (`2k` links, `2k+1` rechts), danach die
/// Vertices der Start-Kappe, danach die der End-Kappe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonMesh {
    mesh: Mesh,
    pair_count: usize,
    start_cap: Range<usize>,
    end_cap: Range<usize>,
}

impl RibbonMesh {
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Anzahl der Körper-Paare (geschlossen: inklusive Naht-Paar).
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Linker und rechter Vertex am Sample `k`.
    pub fn sample_pair(&self, k: usize) -> Option<(MeshVertex, MeshVertex)> {
        if k >= self.pair_count {
            return None;
        }
        let vertices = self.mesh.vertices();
        Some((vertices[2 * k], vertices[2 * k + 1]))
    }

    /// Vertices einer Kappe (Bogenpunkte und Mittelpunkt), leer ohne Kappe.
    pub fn cap_vertices(&self, end: CapEnd) -> &[MeshVertex] {
        let range = match end {
            CapEnd::Start => self.start_cap.clone(),
            CapEnd::End => self.end_cap.clone(),
        };
        &self.mesh.vertices()[range]
    }
}

/// Senkrechte in der xy-Ebene (Tangente um 90° gedreht).
fn ribbon_perpendicular(sample: &CurveSample) -> Vec3 {
    Vec3::new(-sample.tangent.y, sample.tangent.x, 0.0)
        .try_normalize()
        .unwrap_or(sample.normal)
}

/// Flächennormale des Bands: für Kurven in der xy-Ebene immer -Z.
fn ribbon_face_normal(perp: Vec3, tangent: Vec3) -> Vec3 {
    perp.cross(tangent).normalize_or_zero()
}

/// Baut das Band. Weniger als 2 Samples → leeres Mesh.
///
/// `cap_points` ist die Anzahl der Bogenpunkte je runder Kappe (inklusive
/// der beiden Eckpunkte links/rechts). Kappen nur bei offenen Kurven und
/// `CapStyle::Round`; `Flat` und `None` enden am letzten Paar.
pub fn build_ribbon(
    curve: &SampledCurve,
    width: f32,
    cap: CapStyle,
    cap_points: usize,
) -> RibbonMesh {
    let samples = curve.samples();
    if samples.len() < 2 {
        return RibbonMesh::default();
    }

    let half = width * 0.5;
    let closed = curve.is_closed();
    let round_caps = cap == CapStyle::Round && !closed;
    let cap_points = cap_points.max(MIN_CAP_POINTS);

    let pair_count = samples.len() + usize::from(closed);
    let cap_vertex_count = if round_caps { 2 * (cap_points + 1) } else { 0 };
    let mut mesh = Mesh::with_capacity(
        2 * pair_count + cap_vertex_count,
        2 * pair_count + 2 * cap_vertex_count + 8,
    );

    for (k, sample) in samples.iter().enumerate() {
        push_pair(&mut mesh, sample, half, curve.texture_v(k));
    }
    if closed {
        // Naht-Paar: Position wie Sample 0, aber v = 1
        push_pair(&mut mesh, &samples[0], half, 1.0);
    }
    let body: Vec<u32> = (0..(2 * pair_count) as u32).collect();

    let mut ribbon = RibbonMesh {
        pair_count,
        ..RibbonMesh::default()
    };

    if round_caps {
        let start_first = mesh.vertices().len();
        let start_run = push_round_cap(&mut mesh, &samples[0], half, cap_points, CapEnd::Start);
        let end_first = mesh.vertices().len();
        let last = samples.len() - 1;
        let end_run = push_round_cap(&mut mesh, &samples[last], half, cap_points, CapEnd::End);

        mesh.push_strip(&start_run);
        mesh.push_strip(&body);
        mesh.push_strip(&end_run);

        ribbon.start_cap = start_first..end_first;
        ribbon.end_cap = end_first..mesh.vertices().len();
    } else {
        mesh.push_strip(&body);
    }

    ribbon.mesh = mesh;
    ribbon
}

fn push_pair(mesh: &mut Mesh, sample: &CurveSample, half: f32, v: f32) {
    let perp = ribbon_perpendicular(sample);
    let normal = ribbon_face_normal(perp, sample.tangent);
    let left = sample.position - perp * half;
    let right = sample.position + perp * half;
    mesh.push_vertex(MeshVertex::new(left, normal, Vec2::new(0.0, v)));
    mesh.push_vertex(MeshVertex::new(right, normal, Vec2::new(1.0, v)));
}

/// Halbkreis-Fächer um das Sample; gibt den Strip-Abschnitt
/// `[A0, C, A1, C, …, A_last]` zurück.
///
/// Start-Kappe läuft von rechts nach links hinter dem Startpunkt, End-Kappe
/// von links nach rechts vor dem Endpunkt. So zeigen alle Fächer-Dreiecke
/// zur selben Seite wie der Körper.
fn push_round_cap(
    mesh: &mut Mesh,
    sample: &CurveSample,
    half: f32,
    cap_points: usize,
    end: CapEnd,
) -> Vec<u32> {
    let perp = ribbon_perpendicular(sample);
    let tangent = sample.tangent;
    let normal = ribbon_face_normal(perp, tangent);
    let (outward, v) = match end {
        CapEnd::Start => (-1.0, 0.0),
        CapEnd::End => (1.0, 1.0),
    };

    let center = mesh.push_vertex(MeshVertex::new(
        sample.position,
        normal,
        Vec2::new(0.5, v),
    ));

    let mut run = Vec::with_capacity(2 * cap_points - 1);
    for i in 0..cap_points {
        let theta = PI * i as f32 / (cap_points - 1) as f32;
        let dir = (tangent * theta.sin() - perp * theta.cos()) * outward;
        let u = 0.5 + 0.5 * dir.dot(perp);
        let index = mesh.push_vertex(MeshVertex::new(
            sample.position + dir * half,
            normal,
            Vec2::new(u, v),
        ));
        if i > 0 {
            run.push(center);
        }
        run.push(index);
    }
    run
}

#[cfg(test)]
mod tests;

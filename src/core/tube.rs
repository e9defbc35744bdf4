//! Röhre (verallgemeinerter Zylinder) entlang der abgetasteten Kurve.
//!
//! Pro Sample ein Ring aus `resolution + 1` Vertices (der letzte
//! dupliziert den ersten für die Textur-Naht). Benachbarte Ringe werden
//! als Strip-Band verbunden. Offene Kurven bekommen optional
//! Halbkugel- oder Scheiben-Kappen.

use super::mesh::{CapEnd, CapStyle, Mesh, MeshVertex};
use super::sampler::{CurveSample, SampledCurve};
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::Range;

/// Mindestanzahl Segmente pro Ring.
const MIN_RESOLUTION: usize = 3;
/// Mindestanzahl Ring-Schritte pro Kappe.
const MIN_CAP_RINGS: usize = 2;

/// Röhren-Mesh mit bekannter Ring-Anordnung.
///
/// Layout: Körper-Ringe in Sample-Reihenfolge (bei geschlossenen Kurven
/// plus Naht-Ring), danach die Ringe der Start-Kappe, danach die der
/// End-Kappe. Jeder Ring hat `ring_len()` Vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TubeMesh {
    mesh: Mesh,
    ring_len: usize,
    sample_rings: usize,
    start_cap: Range<usize>,
    end_cap: Range<usize>,
}

impl TubeMesh {
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.is_empty()
    }

    /// Vertices pro Ring (`resolution + 1`).
    pub fn ring_len(&self) -> usize {
        self.ring_len
    }

    /// Anzahl der Körper-Ringe ohne Naht-Ring (= Anzahl Samples).
    pub fn ring_count(&self) -> usize {
        self.sample_rings
    }

    /// Ring am Sample `k`.
    pub fn body_ring(&self, k: usize) -> Option<&[MeshVertex]> {
        if k >= self.sample_rings {
            return None;
        }
        let start = k * self.ring_len;
        Some(&self.mesh.vertices()[start..start + self.ring_len])
    }

    /// Alle Vertices einer Kappe, leer ohne Kappe.
    pub fn cap_vertices(&self, end: CapEnd) -> &[MeshVertex] {
        let range = match end {
            CapEnd::Start => self.start_cap.clone(),
            CapEnd::End => self.end_cap.clone(),
        };
        &self.mesh.vertices()[range]
    }
}

/// Einheitsrichtungen eines Rings: Normale um die Tangente gedreht.
///
/// Gedreht wird um `-tangent`, damit die Bänder (Ring i, Ring i+1) nach
/// außen gewickelt sind. Der letzte Eintrag ist exakt der erste.
fn ring_directions(normal: Vec3, tangent: Vec3, resolution: usize) -> Vec<Vec3> {
    let mut directions: Vec<Vec3> = (0..resolution)
        .map(|j| {
            let angle = TAU * j as f32 / resolution as f32;
            Quat::from_axis_angle(-tangent, angle) * normal
        })
        .collect();
    directions.push(normal);
    directions
}

/// Ring-Parameter: Mittelpunkt, Radius, v-Koordinate und Normalen-Quelle.
struct RingSpec {
    center: Vec3,
    radius: f32,
    v: f32,
    normals: RingNormals,
}

enum RingNormals {
    /// Normale = Richtung vom Achsenpunkt aus (Körper)
    Radial,
    /// Normale = Richtung vom Kugel-Mittelpunkt aus (runde Kappe)
    Sphere(Vec3),
    /// Feste Normale (flache Kappe)
    Fixed(Vec3),
}

fn push_ring(mesh: &mut Mesh, directions: &[Vec3], spec: &RingSpec) -> Vec<u32> {
    let resolution = directions.len() - 1;
    directions
        .iter()
        .enumerate()
        .map(|(j, dir)| {
            let position = spec.center + *dir * spec.radius;
            let normal = match spec.normals {
                RingNormals::Radial => *dir,
                RingNormals::Sphere(sphere_center) => (position - sphere_center)
                    .try_normalize()
                    .unwrap_or(*dir),
                RingNormals::Fixed(n) => n,
            };
            let uv = Vec2::new(j as f32 / resolution as f32, spec.v);
            mesh.push_vertex(MeshVertex::new(position, normal, uv))
        })
        .collect()
}

/// Verbindet zwei Ringe (in Laufrichtung) als Strip-Band.
fn push_band(mesh: &mut Mesh, from: &[u32], to: &[u32]) {
    let run: Vec<u32> = from
        .iter()
        .zip(to)
        .flat_map(|(a, b)| [*a, *b])
        .collect();
    mesh.push_strip(&run);
}

/// Baut die Röhre. Weniger als 2 Samples → leeres Mesh.
///
/// `cap_rings` ist die Anzahl der Ring-Schritte pro Kappe. Kappen nur bei
/// offenen Kurven.
pub fn build_tube(
    curve: &SampledCurve,
    radius: f32,
    resolution: usize,
    cap: CapStyle,
    cap_rings: usize,
) -> TubeMesh {
    let samples = curve.samples();
    if samples.len() < 2 {
        return TubeMesh::default();
    }

    let resolution = resolution.max(MIN_RESOLUTION);
    let cap_rings = cap_rings.max(MIN_CAP_RINGS);
    let ring_len = resolution + 1;
    let closed = curve.is_closed();
    let cap = if closed { CapStyle::None } else { cap };

    let body_rings = samples.len() + usize::from(closed);
    let cap_ring_total = if cap == CapStyle::None {
        0
    } else {
        2 * (cap_rings + 1)
    };
    let vertex_count = (body_rings + cap_ring_total) * ring_len;
    let mut mesh = Mesh::with_capacity(vertex_count, 2 * vertex_count + 4 * body_rings);

    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(body_rings);
    for (k, sample) in samples.iter().enumerate() {
        let directions = ring_directions(sample.normal, sample.tangent, resolution);
        let spec = RingSpec {
            center: sample.position,
            radius,
            v: curve.texture_v(k),
            normals: RingNormals::Radial,
        };
        rings.push(push_ring(&mut mesh, &directions, &spec));
    }
    if closed {
        // Naht-Ring: Geometrie von Ring 0, v = 1
        let first = &samples[0];
        let directions = ring_directions(first.normal, first.tangent, resolution);
        let spec = RingSpec {
            center: first.position,
            radius,
            v: 1.0,
            normals: RingNormals::Radial,
        };
        rings.push(push_ring(&mut mesh, &directions, &spec));
    }

    let mut tube = TubeMesh {
        ring_len,
        sample_rings: samples.len(),
        ..TubeMesh::default()
    };

    let last = samples.len() - 1;
    let start_first = mesh.vertices().len();
    let start_rings = build_cap_rings(
        &mut mesh,
        &samples[0],
        radius,
        resolution,
        cap,
        cap_rings,
        CapEnd::Start,
    );
    let end_first = mesh.vertices().len();
    let end_rings = build_cap_rings(
        &mut mesh,
        &samples[last],
        radius,
        resolution,
        cap,
        cap_rings,
        CapEnd::End,
    );
    tube.start_cap = start_first..end_first;
    tube.end_cap = end_first..mesh.vertices().len();

    // Start-Kappe: Pol → Äquator, bei runder Kappe an Ring 0 angeschlossen
    for pair in start_rings.windows(2) {
        push_band(&mut mesh, &pair[0], &pair[1]);
    }
    if cap == CapStyle::Round {
        if let (Some(equator), Some(body)) = (start_rings.last(), rings.first()) {
            push_band(&mut mesh, equator, body);
        }
    }

    for pair in rings.windows(2) {
        push_band(&mut mesh, &pair[0], &pair[1]);
    }

    // End-Kappe: Äquator → Pol
    if cap == CapStyle::Round {
        if let (Some(body), Some(equator)) = (rings.get(last), end_rings.first()) {
            push_band(&mut mesh, body, equator);
        }
    }
    for pair in end_rings.windows(2) {
        push_band(&mut mesh, &pair[0], &pair[1]);
    }

    tube.mesh = mesh;
    tube
}

/// Ringe einer Kappe, geordnet in Laufrichtung der Kurve.
///
/// Rund: Halbkugel um den Mittelpunkt einen Radius jenseits des Endpunkts;
/// Ring im axialen Abstand `d` hat Radius `sqrt(r² - d²)`, der Pol-Ring
/// Radius 0. Flach: konzentrische Ringe in der Endpunkt-Ebene.
fn build_cap_rings(
    mesh: &mut Mesh,
    sample: &CurveSample,
    radius: f32,
    resolution: usize,
    cap: CapStyle,
    cap_rings: usize,
    end: CapEnd,
) -> Vec<Vec<u32>> {
    if cap == CapStyle::None {
        return Vec::new();
    }

    let tangent = sample.tangent;
    let directions = ring_directions(sample.normal, tangent, resolution);
    let (outward, v) = match end {
        CapEnd::Start => (-1.0, 0.0),
        CapEnd::End => (1.0, 1.0),
    };
    let sphere_center = sample.position + tangent * (radius * outward);

    (0..=cap_rings)
        .map(|m| {
            // Schritt in Laufrichtung: Start-Kappe beginnt am Pol
            let step = match end {
                CapEnd::Start => cap_rings - m,
                CapEnd::End => m,
            };
            let fraction = step as f32 / cap_rings as f32;
            let spec = if cap == CapStyle::Round {
                let phi = FRAC_PI_2 * fraction;
                let axial = radius * phi.sin();
                let ring_radius = if step == cap_rings {
                    0.0
                } else {
                    (radius * radius - axial * axial).max(0.0).sqrt()
                };
                RingSpec {
                    center: sphere_center + tangent * (axial * outward),
                    radius: ring_radius,
                    v,
                    normals: RingNormals::Sphere(sphere_center),
                }
            } else {
                RingSpec {
                    center: sample.position,
                    radius: radius * (1.0 - fraction),
                    v,
                    normals: RingNormals::Fixed(tangent * outward),
                }
            };
            push_ring(mesh, &directions, &spec)
        })
        .collect()
}

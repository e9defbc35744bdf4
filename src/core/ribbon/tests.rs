use super::*;
use crate::core::sampler::{sample_curve, FrameMode};
use crate::core::CurveModel;
use approx::assert_relative_eq;

fn gentle_curve() -> SampledCurve {
    let model = CurveModel::from_parts(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(120.0, 0.0, 0.0),
            Vec3::new(220.0, 80.0, 0.0),
        ],
        vec![
            Vec3::ZERO,
            Vec3::new(40.0, 30.0, 0.0),
            Vec3::new(160.0, -10.0, 0.0),
        ],
        vec![
            Vec3::ZERO,
            Vec3::new(80.0, 30.0, 0.0),
            Vec3::new(200.0, 40.0, 0.0),
        ],
        false,
    )
    .expect("gleich lange Listen");
    sample_curve(&model, 16, FrameMode::Planar).expect("Sampling erwartet")
}

fn closed_triangle() -> SampledCurve {
    let mut model = CurveModel::new();
    model.append_vertex(Vec3::new(0.0, 0.0, 0.0));
    model.append_vertex(Vec3::new(100.0, 0.0, 0.0));
    model.append_vertex(Vec3::new(50.0, 80.0, 0.0));
    model.set_closed(true);
    sample_curve(&model, 8, FrameMode::Planar).expect("Sampling erwartet")
}

fn face_normal(mesh: &Mesh, tri: [u32; 3]) -> Vec3 {
    let v = mesh.vertices();
    let a = v[tri[0] as usize].position();
    let b = v[tri[1] as usize].position();
    let c = v[tri[2] as usize].position();
    (b - a).cross(c - a)
}

#[test]
fn test_pair_distance_equals_width() {
    let curve = gentle_curve();
    let ribbon = build_ribbon(&curve, 10.0, CapStyle::None, 20);
    assert_eq!(ribbon.pair_count(), curve.len());
    for k in 0..ribbon.pair_count() {
        let (left, right) = ribbon.sample_pair(k).expect("Paar erwartet");
        assert_relative_eq!(left.position().distance(right.position()), 10.0, epsilon = 1e-3);
        // Mittelpunkt des Paars liegt auf der Kurve
        let mid = (left.position() + right.position()) * 0.5;
        assert!((mid - curve.samples()[k].position).length() < 1e-3);
    }
    assert!(ribbon.sample_pair(ribbon.pair_count()).is_none());
}

#[test]
fn test_degenerate_curve_gives_empty_mesh() {
    let ribbon = build_ribbon(&SampledCurve::empty(), 10.0, CapStyle::Round, 20);
    assert!(ribbon.is_empty());
    assert_eq!(ribbon.mesh().triangle_count(), 0);
    assert!(ribbon.cap_vertices(CapEnd::End).is_empty());
}

#[test]
fn test_strip_order_left_right() {
    let ribbon = build_ribbon(&gentle_curve(), 6.0, CapStyle::None, 20);
    assert_eq!(&ribbon.mesh().indices()[..4], &[0, 1, 2, 3]);
    // Für +X-Tangente liegt links bei -Y
    let (left, right) = ribbon.sample_pair(0).expect("Paar erwartet");
    assert!(left.position().y < right.position().y);
}

#[test]
fn test_all_triangles_face_negative_z() {
    let ribbon = build_ribbon(&gentle_curve(), 6.0, CapStyle::Round, 20);
    let mesh = ribbon.mesh();
    let mut checked = 0;
    for tri in mesh.triangles() {
        let n = face_normal(mesh, tri);
        if n.length() < 1e-6 {
            continue;
        }
        assert!(n.z < 0.0, "Dreieck {tri:?} zeigt nach {n:?}");
        checked += 1;
    }
    assert!(checked > 2 * 32);
    for vertex in mesh.vertices() {
        assert!((vertex.normal() - Vec3::NEG_Z).length() < 1e-4);
    }
}

#[test]
fn test_round_caps_are_half_discs_outside_the_body() {
    let curve = gentle_curve();
    let ribbon = build_ribbon(&curve, 8.0, CapStyle::Round, 12);
    let first = curve.samples()[0];
    let last = curve.samples()[curve.len() - 1];

    let start = ribbon.cap_vertices(CapEnd::Start);
    let end = ribbon.cap_vertices(CapEnd::End);
    // Mittelpunkt + Bogenpunkte
    assert_eq!(start.len(), 13);
    assert_eq!(end.len(), 13);

    for vertex in &start[1..] {
        let offset = vertex.position() - first.position;
        assert_relative_eq!(offset.length(), 4.0, epsilon = 1e-3);
        assert!(offset.dot(first.tangent) <= 1e-3);
    }
    for vertex in &end[1..] {
        let offset = vertex.position() - last.position;
        assert_relative_eq!(offset.length(), 4.0, epsilon = 1e-3);
        assert!(offset.dot(last.tangent) >= -1e-3);
    }
}

#[test]
fn test_flat_cap_style_has_no_ribbon_caps() {
    let flat = build_ribbon(&gentle_curve(), 8.0, CapStyle::Flat, 20);
    let none = build_ribbon(&gentle_curve(), 8.0, CapStyle::None, 20);
    assert_eq!(flat, none);
}

#[test]
fn test_texture_coordinates_follow_arc_length() {
    let curve = gentle_curve();
    let ribbon = build_ribbon(&curve, 8.0, CapStyle::None, 20);
    let mut previous_v = -1.0;
    for k in 0..ribbon.pair_count() {
        let (left, right) = ribbon.sample_pair(k).expect("Paar erwartet");
        assert_eq!(left.uv().x, 0.0);
        assert_eq!(right.uv().x, 1.0);
        assert_eq!(left.uv().y, right.uv().y);
        assert!(left.uv().y > previous_v);
        previous_v = left.uv().y;
    }
    assert_relative_eq!(previous_v, 1.0, epsilon = 1e-5);
}

#[test]
fn test_closed_ribbon_has_seam_pair_and_no_caps() {
    let curve = closed_triangle();
    let ribbon = build_ribbon(&curve, 5.0, CapStyle::Round, 20);
    assert_eq!(ribbon.pair_count(), curve.len() + 1);
    assert!(ribbon.cap_vertices(CapEnd::Start).is_empty());

    let (first_left, _) = ribbon.sample_pair(0).expect("Paar erwartet");
    let (seam_left, _) = ribbon
        .sample_pair(curve.len())
        .expect("Naht-Paar erwartet");
    assert_eq!(first_left.position(), seam_left.position());
    assert_eq!(seam_left.uv().y, 1.0);
}

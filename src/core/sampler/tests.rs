use super::*;
use crate::core::CurveModel;
use approx::assert_relative_eq;
use glam::{Quat, Vec3};

/// Offene S-Kurve mit drei Vertices und gebogenen Kontrollpunkten.
fn s_curve() -> CurveModel {
    CurveModel::from_parts(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(200.0, 50.0, 0.0),
        ],
        vec![
            Vec3::ZERO,
            Vec3::new(30.0, 60.0, 0.0),
            Vec3::new(130.0, -40.0, 0.0),
        ],
        vec![
            Vec3::ZERO,
            Vec3::new(70.0, 60.0, 0.0),
            Vec3::new(170.0, 80.0, 0.0),
        ],
        false,
    )
    .expect("gleich lange Listen")
}

fn closed_square() -> CurveModel {
    let mut model = CurveModel::new();
    for p in [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(100.0, 0.0, 0.0),
        Vec3::new(100.0, 100.0, 0.0),
        Vec3::new(0.0, 100.0, 0.0),
    ] {
        model.append_vertex(p);
    }
    model.set_closed(true);
    // Schließ-Segment 3 → 0 auf der Sehne
    model
        .set_position(crate::core::Handle::control_point1(0), Vec3::new(0.0, 66.0, 0.0))
        .expect("Index 0 existiert");
    model
        .set_position(crate::core::Handle::control_point2(0), Vec3::new(0.0, 33.0, 0.0))
        .expect("Index 0 existiert");
    model
}

fn distance_to_polyline(point: Vec3, polyline: &[Vec3]) -> f32 {
    polyline
        .windows(2)
        .map(|w| {
            let seg = w[1] - w[0];
            let len2 = seg.length_squared();
            let t = if len2 > 0.0 {
                ((point - w[0]).dot(seg) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            point.distance(w[0] + seg * t)
        })
        .fold(f32::MAX, f32::min)
}

#[test]
fn test_degenerate_model_is_rejected() {
    let mut model = CurveModel::new();
    assert_eq!(
        sample_curve(&model, 4, FrameMode::Planar),
        Err(CurveError::DegenerateCurve { vertex_count: 0 })
    );
    model.append_vertex(Vec3::ONE);
    assert_eq!(
        sample_curve(&model, 4, FrameMode::Planar),
        Err(CurveError::DegenerateCurve { vertex_count: 1 })
    );
    assert!(sample_or_empty(&model, 4, FrameMode::Planar).is_empty());
}

#[test]
fn test_open_sample_count_includes_endpoint() {
    let model = s_curve();
    let curve = sample_curve(&model, 8, FrameMode::Planar).expect("Sampling erwartet");
    // (N-1)·s + 1
    assert_eq!(curve.len(), 2 * 8 + 1);
    assert_eq!(curve.samples()[0].position, model.vertices()[0]);
    let last = curve.samples().last().expect("Samples erwartet").position;
    assert!((last - model.vertices()[2]).length() < 1e-3);
}

#[test]
fn test_closed_sample_count_without_duplicate() {
    let model = closed_square();
    let curve = sample_curve(&model, 5, FrameMode::Planar).expect("Sampling erwartet");
    assert_eq!(curve.len(), 4 * 5);
    assert!(curve.is_closed());
}

#[test]
fn test_closed_curve_returns_to_start() {
    let model = closed_square();
    let curve = sample_curve(&model, 16, FrameMode::Planar).expect("Sampling erwartet");
    let closing = model
        .segment(model.segment_count() - 1)
        .expect("Schließ-Segment erwartet");
    let first = curve.samples()[0].position;
    assert!((closing.eval(1.0) - first).length() < 1e-4);

    // Letztes Sample liegt eine Schrittweite vor dem Start
    let last = curve.samples().last().expect("Samples erwartet");
    let step = last.position.distance(first);
    assert!(step > 0.0 && step < 10.0, "Schritt {step}");
    // Vorwärts-Tangente des letzten Samples zeigt auf das erste
    let expected = (first - last.position).normalize();
    assert!((last.tangent - expected).length() < 1e-4);
}

#[test]
fn test_higher_subdivision_refines_samples() {
    let model = s_curve();
    let coarse = sample_curve(&model, 4, FrameMode::Planar).expect("Sampling erwartet");
    let fine = sample_curve(&model, 8, FrameMode::Planar).expect("Sampling erwartet");

    // Vielfaches: jedes grobe Sample liegt exakt auf einem feinen
    for (k, sample) in coarse.samples().iter().enumerate() {
        let twin = fine.samples()[k * 2];
        assert_relative_eq!(sample.parameter, twin.parameter);
        assert!((sample.position - twin.position).length() < 1e-4);
    }

    // Kein Vielfaches: grobe Samples liegen nahe der feinen Polyline
    let odd = sample_curve(&model, 3, FrameMode::Planar).expect("Sampling erwartet");
    let dense = sample_curve(&model, 64, FrameMode::Planar).expect("Sampling erwartet");
    let dense_points: Vec<Vec3> = dense.positions().collect();
    for sample in odd.samples() {
        assert!(distance_to_polyline(sample.position, &dense_points) < 0.25);
    }
}

#[test]
fn test_tangents_and_normals_are_unit_and_perpendicular() {
    let curve = sample_curve(&s_curve(), 10, FrameMode::Planar).expect("Sampling erwartet");
    for sample in curve.samples() {
        assert_relative_eq!(sample.tangent.length(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(sample.normal.length(), 1.0, epsilon = 1e-4);
        assert!(sample.tangent.dot(sample.normal).abs() < 1e-4);
    }
}

#[test]
fn test_last_open_tangent_uses_backward_difference() {
    let curve = sample_curve(&s_curve(), 6, FrameMode::Planar).expect("Sampling erwartet");
    let n = curve.len();
    let expected = (curve.samples()[n - 1].position - curve.samples()[n - 2].position).normalize();
    assert!((curve.samples()[n - 1].tangent - expected).length() < 1e-5);
}

#[test]
fn test_planar_normal_is_left_rotation() {
    let mut model = CurveModel::new();
    model.append_vertex(Vec3::ZERO);
    model.append_vertex(Vec3::new(10.0, 0.0, 0.0));
    let curve = sample_curve(&model, 4, FrameMode::Planar).expect("Sampling erwartet");
    for sample in curve.samples() {
        assert!((sample.normal - Vec3::Y).length() < 1e-5);
    }
}

#[test]
fn test_transported_frame_matches_planar_on_flat_curve() {
    let model = s_curve();
    let planar = sample_curve(&model, 12, FrameMode::Planar).expect("Sampling erwartet");
    let transported = sample_curve(&model, 12, FrameMode::Transported).expect("Sampling erwartet");
    for (a, b) in planar.samples().iter().zip(transported.samples()) {
        assert!((a.normal - b.normal).length() < 1e-3);
    }
}

#[test]
fn test_transported_frame_never_flips() {
    // Räumliche Helix-artige Kurve
    let mut model = CurveModel::new();
    for i in 0..8 {
        let a = i as f32 * 0.3;
        model.append_vertex(Vec3::new(a.cos() * 50.0, a.sin() * 50.0, i as f32 * 20.0));
    }
    let curve = sample_curve(&model, 16, FrameMode::Transported).expect("Sampling erwartet");
    for pair in curve.samples().windows(2) {
        assert!(pair[0].normal.dot(pair[1].normal) > 0.9);
        assert!(pair[1].normal.dot(pair[1].tangent).abs() < 1e-3);
    }
}

/// Vorzeichenbehafteter Winkel, um den `next_normal` gegenüber der
/// transportierten vorigen Normale um `next_tangent` verdreht ist.
fn transport_twist(prev: &CurveSample, next_tangent: Vec3, next_normal: Vec3) -> f32 {
    let carried = Quat::from_rotation_arc(prev.tangent, next_tangent) * prev.normal;
    let carried = carried - next_tangent * carried.dot(next_tangent);
    next_tangent
        .dot(carried.cross(next_normal))
        .atan2(carried.dot(next_normal))
}

#[test]
fn test_closed_spatial_loop_has_no_seam_twist() {
    // Geschlossene Schleife, die auf und ab läuft
    let mut model = CurveModel::new();
    for i in 0..6 {
        let a = i as f32 * std::f32::consts::TAU / 6.0;
        model.append_vertex(Vec3::new(
            a.cos() * 200.0,
            a.sin() * 200.0,
            (2.0 * a).sin() * 80.0,
        ));
    }
    model.set_closed(true);
    let curve = sample_curve(&model, 20, FrameMode::Transported).expect("Sampling erwartet");
    let samples = curve.samples();
    let first = &samples[0];
    let last = &samples[samples.len() - 1];

    let seam = transport_twist(last, first.tangent, first.normal);
    let steps: Vec<f32> = samples
        .windows(2)
        .map(|w| transport_twist(&w[0], w[1].tangent, w[1].normal))
        .collect();

    // Restverdrehung gleichmäßig verteilt, an der Naht nicht größer
    assert!(seam.abs().to_degrees() < 0.5, "Naht: {}°", seam.to_degrees());
    for step in &steps {
        assert!((step - seam).abs() < 1e-3);
    }
    for s in samples {
        assert!(s.normal.dot(s.tangent).abs() < 1e-3);
        assert_relative_eq!(s.normal.length(), 1.0, epsilon = 1e-4);
    }
}

#[test]
fn test_arc_length_and_texture_v() {
    let mut model = CurveModel::new();
    model.append_vertex(Vec3::ZERO);
    model.append_vertex(Vec3::new(90.0, 0.0, 0.0));
    let curve = sample_curve(&model, 3, FrameMode::Planar).expect("Sampling erwartet");
    assert_relative_eq!(curve.total_length(), 90.0, epsilon = 1e-3);
    assert_relative_eq!(curve.texture_v(0), 0.0);
    assert_relative_eq!(curve.texture_v(3), 1.0, epsilon = 1e-5);
    // Gleichmäßig verteilte Kontrollpunkte → gleichmäßige Bogenlänge
    assert_relative_eq!(curve.texture_v(1), 1.0 / 3.0, epsilon = 1e-3);
}

#[test]
fn test_coincident_vertices_fall_back_to_x_axis() {
    let mut model = CurveModel::new();
    model.append_vertex(Vec3::ONE);
    model.append_vertex(Vec3::ONE);
    let curve = sample_curve(&model, 2, FrameMode::Transported).expect("Sampling erwartet");
    assert!(curve.samples().iter().all(|s| s.tangent == Vec3::X));
}

#[test]
fn test_bounds_and_center() {
    let curve = sample_curve(&closed_square(), 8, FrameMode::Planar).expect("Sampling erwartet");
    let bounds = curve.bounds().expect("Bounds erwartet");
    assert_relative_eq!(bounds.min.x, 0.0, epsilon = 1e-3);
    assert_relative_eq!(bounds.max.y, 100.0, epsilon = 1e-3);
    assert!((bounds.center() - Vec3::new(50.0, 50.0, 0.0)).length() < 1e-2);
    assert!(SampledCurve::empty().bounds().is_none());
}

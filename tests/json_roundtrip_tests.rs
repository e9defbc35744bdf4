use bezier_mesh_editor::{parse_curve_document, BezierEditor, DocumentError};
use glam::Vec3;
use std::path::PathBuf;

const FIXTURE: &str = include_str!("fixtures/three_vertex_open.json");

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}", std::process::id(), name))
}

#[test]
fn test_fixture_loads_into_editor() {
    let mut editor = BezierEditor::default();
    editor.load_from_str(FIXTURE).expect("Fixture gültig");

    assert_eq!(editor.model().len(), 3);
    assert!(!editor.model().is_closed());
    assert!(!editor.style().fill);
    assert_eq!(editor.model().vertices()[2], Vec3::new(300.0, 100.0, 4.0));
    assert_eq!(editor.params().ribbon_width, 10.0);
    assert_eq!(editor.params().tube_radius, 5.0);
    assert_eq!(editor.params().tube_resolution, 8);

    let tube = editor.tube().expect("Tube aktiviert");
    assert_eq!(tube.ring_len(), 9);
    assert!(editor.ribbon().is_some_and(|r| !r.is_empty()));
}

#[test]
fn test_save_and_reload_reproduces_document() {
    let mut editor = BezierEditor::default();
    editor.load_from_str(FIXTURE).expect("Fixture gültig");
    let path = temp_path("roundtrip_curve.json");
    editor.save_to_file(&path).expect("Speichern fehlgeschlagen");

    let mut reloaded = BezierEditor::default();
    reloaded.load_from_file(&path).expect("Laden fehlgeschlagen");
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded.to_document(), editor.to_document());
    let reparsed = parse_curve_document(
        &bezier_mesh_editor::json::write_curve_document(&editor.to_document())
            .expect("Serialisierung fehlgeschlagen"),
    )
    .expect("Re-Parsing fehlgeschlagen");
    assert_eq!(reparsed, editor.to_document());
}

#[test]
fn test_failed_load_keeps_editor_state() {
    let mut editor = BezierEditor::default();
    editor.load_from_str(FIXTURE).expect("Fixture gültig");
    let before = editor.to_document();
    let generation = editor.generation();

    let missing = temp_path("does_not_exist.json");
    assert!(matches!(
        editor.load_from_file(&missing),
        Err(DocumentError::MissingSourceFile(_))
    ));

    let broken = FIXTURE.replace("\"tubeResolution\": 8,", "");
    assert!(matches!(
        editor.load_from_str(&broken),
        Err(DocumentError::MalformedDocument(_))
    ));

    assert_eq!(editor.to_document(), before);
    assert_eq!(editor.generation(), generation);
}

//! Maus-/Tastatur-Interaktion als reine Zustandsmaschine.
//!
//! Der Host ruft die `pointer_*`- und `key`-Methoden direkt auf; es gibt
//! keinen Event-Bus. Alle Änderungen laufen über [`BezierEditor`], damit
//! jede Mutation eine Regenerierung auslöst.

use super::BezierEditor;
use crate::core::{CurveModel, Handle, HandleKind};
use crate::shared::EditorOptions;
use glam::{Vec2, Vec3};
use indexmap::IndexSet;

/// Maustaste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Tastatur-Befehle des Editors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    ToggleEdit,
    ToggleClosed,
    ToggleFill,
    ToggleBoundingBox,
    /// Nächsten Punkt für die Feinjustierung wählen
    NextHandle,
    PreviousHandle,
    NudgeLeft,
    NudgeRight,
    NudgeUp,
    NudgeDown,
    RemoveLastVertex,
    RemoveLastSelected,
    Save,
    Load,
}

/// Was der Host nach einem Ereignis tun soll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResponse {
    /// Nichts geändert
    Ignored,
    /// Modell oder Editor-Zustand geändert
    Changed,
    /// Host soll speichern (Pfad kennt nur der Host)
    SaveRequested,
    /// Host soll laden
    LoadRequested,
}

/// Laufender Drag
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Handle(Handle),
    /// Ganze Kurve verschieben, letzte Zeigerposition
    BoundingBox { last: Vec2 },
}

/// Zustand von Hover, Drag, Selektion und Feinjustierung.
#[derive(Debug, Clone)]
pub struct InteractionController {
    edit_mode: bool,
    bounding_box_mode: bool,
    hovered: Option<Handle>,
    drag: Option<DragState>,
    /// Selektierte Vertex-Indizes in Klick-Reihenfolge
    selection: IndexSet<usize>,
    /// Flacher Handle-Index für die Pfeiltasten
    fine_tune: usize,
    /// Vertex-Anzahl, auf die sich `fine_tune` bezieht
    fine_tune_len: usize,
    vertex_pick_radius: f32,
    control_point_pick_radius: f32,
    nudge_step: f32,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&EditorOptions::default())
    }
}

impl InteractionController {
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            edit_mode: true,
            bounding_box_mode: false,
            hovered: None,
            drag: None,
            selection: IndexSet::new(),
            fine_tune: 0,
            fine_tune_len: 0,
            vertex_pick_radius: options.vertex_pick_radius,
            control_point_pick_radius: options.control_point_pick_radius,
            nudge_step: options.nudge_step,
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_bounding_box_mode(&self) -> bool {
        self.bounding_box_mode
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn hovered(&self) -> Option<Handle> {
        self.hovered
    }

    pub fn selection(&self) -> &IndexSet<usize> {
        &self.selection
    }

    /// Punkt, den die Pfeiltasten bewegen. Nach einer Änderung der
    /// Vertex-Anzahl beginnt die Auswahl wieder bei Vertex 0.
    pub fn fine_tune_handle(&self, model: &CurveModel) -> Option<Handle> {
        if model.len() != self.fine_tune_len {
            return model.handle_at(0);
        }
        model.handle_at(self.fine_tune)
    }

    fn sync_fine_tune(&mut self, model: &CurveModel) {
        if model.len() != self.fine_tune_len {
            self.fine_tune = 0;
            self.fine_tune_len = model.len();
        }
    }

    /// Nächster Punkt innerhalb seines Pick-Radius; Vertices gewinnen
    /// bei gleichem Abstand. Ungenutzte Kontrollpunkte offener Kurven
    /// sind nicht greifbar.
    pub fn hit_test(&self, model: &CurveModel, pos: Vec2) -> Option<Handle> {
        let mut best: Option<(Handle, f32)> = None;
        for (handle, point) in model.handles() {
            // Kontrollpunkte von Index 0 gehören zum Schließ-Segment
            if handle.kind != HandleKind::Vertex && handle.index == 0 && !model.is_closed() {
                continue;
            }
            let radius = match handle.kind {
                HandleKind::Vertex => self.vertex_pick_radius,
                HandleKind::ControlPoint1 | HandleKind::ControlPoint2 => {
                    self.control_point_pick_radius
                }
            };
            let dist = point.truncate().distance(pos);
            if dist > radius {
                continue;
            }
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((handle, dist));
            }
        }
        best.map(|(handle, _)| handle)
    }

    /// Zeiger bewegt: Hover aktualisieren oder Drag fortsetzen.
    pub fn pointer_moved(&mut self, editor: &mut BezierEditor, pos: Vec2) -> InteractionResponse {
        match self.drag {
            Some(DragState::Handle(handle)) => {
                let z = editor.model().position(handle).map_or(0.0, |p| p.z);
                match editor.set_position(handle, pos.extend(z)) {
                    Ok(()) => InteractionResponse::Changed,
                    Err(e) => {
                        log::warn!("Drag abgebrochen: {}", e);
                        self.drag = None;
                        InteractionResponse::Ignored
                    }
                }
            }
            Some(DragState::BoundingBox { last }) => {
                editor.translate((pos - last).extend(0.0));
                self.drag = Some(DragState::BoundingBox { last: pos });
                InteractionResponse::Changed
            }
            None => {
                let hovered = if self.edit_mode {
                    self.hit_test(editor.model(), pos)
                } else {
                    None
                };
                self.hovered = hovered;
                InteractionResponse::Ignored
            }
        }
    }

    /// Maustaste gedrückt.
    ///
    /// Links: Punkt greifen, im Bounding-Box-Modus die ganze Kurve greifen,
    /// sonst neuen Vertex anhängen. Rechts: Vertex-Selektion umschalten
    /// oder, bei mindestens zwei selektierten Vertices, einen Vertex
    /// zwischen den beiden zuletzt selektierten einfügen.
    pub fn pointer_pressed(
        &mut self,
        editor: &mut BezierEditor,
        pos: Vec2,
        button: PointerButton,
    ) -> InteractionResponse {
        if !self.edit_mode {
            return InteractionResponse::Ignored;
        }
        let hit = self.hit_test(editor.model(), pos);

        match button {
            PointerButton::Left => {
                // Bounding-Box-Modus verschiebt nur, hängt nie an
                if self.bounding_box_mode {
                    let inside = editor
                        .bounds()
                        .is_some_and(|b| b.contains_xy(pos.extend(0.0)));
                    if !inside {
                        return InteractionResponse::Ignored;
                    }
                    self.drag = Some(DragState::BoundingBox { last: pos });
                    return InteractionResponse::Changed;
                }
                if let Some(handle) = hit {
                    self.drag = Some(DragState::Handle(handle));
                    return InteractionResponse::Changed;
                }
                let index = editor.append_vertex(pos.extend(0.0));
                log::debug!("Vertex #{} angehängt", index);
                InteractionResponse::Changed
            }
            PointerButton::Right => match hit {
                Some(Handle {
                    kind: HandleKind::Vertex,
                    index,
                }) => {
                    if !self.selection.shift_remove(&index) {
                        self.selection.insert(index);
                    }
                    InteractionResponse::Changed
                }
                _ => self.insert_between_selected(editor, pos),
            },
        }
    }

    fn insert_between_selected(
        &mut self,
        editor: &mut BezierEditor,
        pos: Vec2,
    ) -> InteractionResponse {
        let count = self.selection.len();
        if count < 2 {
            return InteractionResponse::Ignored;
        }
        let (Some(&a), Some(&b)) = (
            self.selection.get_index(count - 2),
            self.selection.get_index(count - 1),
        ) else {
            return InteractionResponse::Ignored;
        };
        match editor.insert_vertex_between(a, b, pos.extend(0.0)) {
            Ok(index) => {
                log::debug!("Vertex #{} zwischen #{} und #{} eingefügt", index, a, b);
                self.selection.clear();
                InteractionResponse::Changed
            }
            Err(e) => {
                log::warn!("Einfügen nicht möglich: {}", e);
                InteractionResponse::Ignored
            }
        }
    }

    /// Maustaste losgelassen: Drag beenden.
    pub fn pointer_released(&mut self) -> InteractionResponse {
        match self.drag.take() {
            Some(_) => InteractionResponse::Changed,
            None => InteractionResponse::Ignored,
        }
    }

    /// Tastatur-Befehl ausführen.
    pub fn key(&mut self, editor: &mut BezierEditor, key: EditorKey) -> InteractionResponse {
        if key == EditorKey::ToggleEdit {
            self.edit_mode = !self.edit_mode;
            self.drag = None;
            self.hovered = None;
            return InteractionResponse::Changed;
        }
        if !self.edit_mode {
            return InteractionResponse::Ignored;
        }

        match key {
            EditorKey::ToggleEdit => InteractionResponse::Ignored,
            EditorKey::ToggleClosed => {
                let closed = !editor.model().is_closed();
                editor.set_closed(closed);
                InteractionResponse::Changed
            }
            EditorKey::ToggleFill => {
                let fill = !editor.style().fill;
                editor.set_fill(fill);
                InteractionResponse::Changed
            }
            EditorKey::ToggleBoundingBox => {
                self.bounding_box_mode = !self.bounding_box_mode;
                InteractionResponse::Changed
            }
            EditorKey::NextHandle | EditorKey::PreviousHandle => {
                self.sync_fine_tune(editor.model());
                let count = editor.model().handle_count();
                if count == 0 {
                    return InteractionResponse::Ignored;
                }
                self.fine_tune = if key == EditorKey::NextHandle {
                    (self.fine_tune + 1) % count
                } else {
                    (self.fine_tune + count - 1) % count
                };
                InteractionResponse::Changed
            }
            EditorKey::NudgeLeft => self.nudge(editor, Vec3::new(-self.nudge_step, 0.0, 0.0)),
            EditorKey::NudgeRight => self.nudge(editor, Vec3::new(self.nudge_step, 0.0, 0.0)),
            EditorKey::NudgeUp => self.nudge(editor, Vec3::new(0.0, -self.nudge_step, 0.0)),
            EditorKey::NudgeDown => self.nudge(editor, Vec3::new(0.0, self.nudge_step, 0.0)),
            EditorKey::RemoveLastVertex => match editor.pop_vertex() {
                Some(_) => {
                    self.sanitize(editor.model());
                    InteractionResponse::Changed
                }
                None => InteractionResponse::Ignored,
            },
            EditorKey::RemoveLastSelected => self.remove_last_selected(editor),
            EditorKey::Save => InteractionResponse::SaveRequested,
            EditorKey::Load => InteractionResponse::LoadRequested,
        }
    }

    fn nudge(&mut self, editor: &mut BezierEditor, delta: Vec3) -> InteractionResponse {
        let Some(handle) = self.fine_tune_handle(editor.model()) else {
            return InteractionResponse::Ignored;
        };
        match editor.nudge(handle, delta) {
            Ok(_) => InteractionResponse::Changed,
            Err(_) => InteractionResponse::Ignored,
        }
    }

    fn remove_last_selected(&mut self, editor: &mut BezierEditor) -> InteractionResponse {
        let Some(index) = self.selection.pop() else {
            return InteractionResponse::Ignored;
        };
        if let Err(e) = editor.remove_vertex(index) {
            log::warn!("Entfernen nicht möglich: {}", e);
            return InteractionResponse::Ignored;
        }
        // Nachfolgende Indizes rücken nach
        self.selection = self
            .selection
            .iter()
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
        self.sanitize(editor.model());
        InteractionResponse::Changed
    }

    /// Entfernt Verweise auf nicht mehr existierende Punkte.
    fn sanitize(&mut self, model: &CurveModel) {
        self.selection.retain(|&i| i < model.len());
        self.sync_fine_tune(model);
        if let Some(handle) = self.hovered {
            if handle.index >= model.len() {
                self.hovered = None;
            }
        }
    }
}

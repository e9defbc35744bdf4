//! Gemeinsame Mesh-Typen für Ribbon und Tube.
//!
//! Alle Meshes liegen als indizierter Triangle-Strip vor. Getrennte
//! Strip-Abschnitte (Kappen, Ring-Bänder) werden über degenerierte
//! Indizes verbunden; jeder Abschnitt beginnt an einer geraden
//! Strip-Position, damit die Wicklung erhalten bleibt.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Abschluss offener Kurven-Enden
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapStyle {
    /// Strip endet am ersten/letzten Sample
    #[default]
    None,
    /// Halbkreis (Ribbon) bzw. Halbkugel (Tube)
    Round,
    /// Flache Scheibe (nur Tube; Ribbon endet wie `None`)
    Flat,
}

/// Welches Ende der Kurve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapEnd {
    Start,
    End,
}

/// Vertex mit Position, Normale und Textur-Koordinate (GPU-Layout).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }

    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

/// Indizierter Triangle-Strip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Rohdaten des Vertex-Buffers für den Upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Rohdaten des Index-Buffers für den Upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub(crate) fn push_vertex(&mut self, vertex: MeshVertex) -> u32 {
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u32
    }

    /// Hängt einen Strip-Abschnitt an, verbunden über degenerierte Indizes.
    pub(crate) fn push_strip(&mut self, run: &[u32]) {
        let Some(&first) = run.first() else {
            return;
        };
        if let Some(&last) = self.indices.last() {
            self.indices.push(last);
            self.indices.push(first);
            if self.indices.len() % 2 == 1 {
                self.indices.push(first);
            }
        }
        self.indices.extend_from_slice(run);
    }

    /// Dekodiert den Strip in Dreiecke mit einheitlicher Wicklung.
    ///
    /// Ungerade Strip-Dreiecke werden getauscht, Tripel mit doppeltem
    /// Index (Verbindungsstücke) übersprungen.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .windows(3)
            .enumerate()
            .filter(|(_, w)| w[0] != w[1] && w[1] != w[2] && w[0] != w[2])
            .map(|(k, w)| {
                if k % 2 == 1 {
                    [w[1], w[0], w[2]]
                } else {
                    [w[0], w[1], w[2]]
                }
            })
    }

    /// Anzahl nicht-degenerierter Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.triangles().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_with_vertices(count: usize) -> Mesh {
        let mut mesh = Mesh::default();
        for i in 0..count {
            mesh.push_vertex(MeshVertex::new(
                Vec3::new(i as f32, 0.0, 0.0),
                Vec3::Z,
                Vec2::ZERO,
            ));
        }
        mesh
    }

    #[test]
    fn test_strip_decodes_with_alternating_swap() {
        let mut mesh = mesh_with_vertices(4);
        mesh.push_strip(&[0, 1, 2, 3]);
        let tris: Vec<[u32; 3]> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [2, 1, 3]]);
    }

    #[test]
    fn test_second_run_starts_on_even_position() {
        let mut mesh = mesh_with_vertices(9);
        mesh.push_strip(&[0, 1, 2]);
        mesh.push_strip(&[4, 5, 6, 7]);
        let start = mesh
            .indices()
            .windows(3)
            .position(|w| w == [4, 5, 6])
            .expect("zweiter Abschnitt erwartet");
        assert_eq!(start % 2, 0);

        let tris: Vec<[u32; 3]> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [4, 5, 6], [6, 5, 7]]);
    }

    #[test]
    fn test_byte_views_match_lengths() {
        let mut mesh = mesh_with_vertices(2);
        mesh.push_strip(&[0, 1]);
        assert_eq!(mesh.vertex_bytes().len(), 2 * std::mem::size_of::<MeshVertex>());
        assert_eq!(mesh.index_bytes().len(), 2 * 4);
        assert_eq!(std::mem::size_of::<MeshVertex>(), 32);
    }
}

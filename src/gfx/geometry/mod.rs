//! # Procedural Geometry Generation
//!
//! Generates the handful of shapes the scenes need without external model files.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with per-face normals
//! - **Icosahedron**: subdivided icosphere, flat normals at detail 0
//! - **Plane**: horizontal plane in XZ, normal +Y
//! - **Grid**: line grid in XZ, drawn as a line list
//!
//! ## Usage
//!
//! ```rust
//! use vignette::gfx::geometry::{generate_box, generate_icosahedron};
//!
//! let cube = generate_box(1.0, 1.0, 1.0);
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let ico = generate_icosahedron(1.0, 0);
//! assert_eq!(ico.edge_indices().len() / 2, 60);
//! ```

pub mod primitives;

pub use primitives::*;

use std::collections::HashSet;

use crate::gfx::scene::vertex::Vertex3D;

/// How the index buffer is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Index triples form triangles (counter-clockwise winding).
    #[default]
    Triangles,
    /// Index pairs form line segments.
    Lines,
}

/// Generated geometry ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles, zero for line geometry.
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }

    /// Index pairs for drawing this geometry as a wireframe.
    ///
    /// Edges run between a triangle's own vertices, so each one keeps the
    /// normals of the face it belongs to. An index pair shared by two
    /// triangles is emitted once.
    pub fn edge_indices(&self) -> Vec<u32> {
        if self.topology == Topology::Lines {
            return self.indices.clone();
        }

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                let (a, b) = (tri[a], tri[b]);
                if a != b && seen.insert((a.min(b), a.max(b))) {
                    edges.push(a);
                    edges.push(b);
                }
            }
        }
        edges
    }

    /// Interleaves positions and normals into the renderer's vertex format.
    pub fn to_scene_format(&self) -> (Vec<Vertex3D>, Vec<u32>) {
        let vertices = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

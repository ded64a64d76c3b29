//! # Primitive Shape Generation
//!
//! All triangle shapes use counter-clockwise winding seen from outside.

use super::{GeometryData, Topology};

/// Axis-aligned box centered at the origin.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);
    let mut data = GeometryData::new();

    // (normal, four corners counter-clockwise seen along -normal)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]]),
        ([0.0, 0.0, -1.0], [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]]),
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]]),
        ([1.0, 0.0, 0.0], [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]]),
        ([0.0, 1.0, 0.0], [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]]),
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]]),
    ];

    for (normal, corners) in faces {
        let base = data.vertices.len() as u32;
        for corner in corners {
            data.vertices.push(corner);
            data.normals.push(normal);
        }
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    data
}

/// Icosahedron of `radius`, each face split into `(detail + 1)^2` triangles
/// and pushed out onto the sphere.
///
/// Triangles do not share vertices. Detail 0 gets face normals (faceted),
/// higher details get radial normals.
pub fn generate_icosahedron(radius: f32, detail: u32) -> GeometryData {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    #[rustfmt::skip]
    let corners: [[f32; 3]; 12] = [
        [-1.0, t, 0.0], [1.0, t, 0.0], [-1.0, -t, 0.0], [1.0, -t, 0.0],
        [0.0, -1.0, t], [0.0, 1.0, t], [0.0, -1.0, -t], [0.0, 1.0, -t],
        [t, 0.0, -1.0], [t, 0.0, 1.0], [-t, 0.0, -1.0], [-t, 0.0, 1.0],
    ];
    #[rustfmt::skip]
    let faces: [[usize; 3]; 20] = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];

    let mut positions = Vec::new();
    for [a, b, c] in faces {
        subdivide_face(corners[a], corners[b], corners[c], detail + 1, &mut positions);
    }

    let mut data = GeometryData::new();
    for p in positions.iter_mut() {
        let n = normalize(*p);
        *p = [n[0] * radius, n[1] * radius, n[2] * radius];
    }

    for tri in positions.chunks_exact(3) {
        let face_normal = normalize(cross(sub(tri[1], tri[0]), sub(tri[2], tri[0])));
        for p in tri {
            data.vertices.push(*p);
            data.normals.push(if detail == 0 { face_normal } else { normalize(*p) });
        }
    }
    data.indices = (0..data.vertices.len() as u32).collect();
    data
}

fn subdivide_face(a: [f32; 3], b: [f32; 3], c: [f32; 3], cols: u32, out: &mut Vec<[f32; 3]>) {
    let cols = cols as usize;
    let mut rows: Vec<Vec<[f32; 3]>> = Vec::with_capacity(cols + 1);

    for i in 0..=cols {
        let s = i as f32 / cols as f32;
        let left = lerp(a, c, s);
        let right = lerp(b, c, s);
        let steps = cols - i;
        let row = (0..=steps)
            .map(|j| {
                if steps == 0 {
                    left
                } else {
                    lerp(left, right, j as f32 / steps as f32)
                }
            })
            .collect();
        rows.push(row);
    }

    for i in 0..cols {
        for j in 0..(2 * (cols - i) - 1) {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend_from_slice(&[rows[i][k + 1], rows[i + 1][k], rows[i][k]]);
            } else {
                out.extend_from_slice(&[rows[i][k + 1], rows[i + 1][k + 1], rows[i + 1][k]]);
            }
        }
    }
}

/// Horizontal plane in XZ centered at the origin, normal +Y.
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for row in 0..=d_segs {
        let z = (row as f32 / d_segs as f32 - 0.5) * depth;
        for col in 0..=w_segs {
            let x = (col as f32 / w_segs as f32 - 0.5) * width;
            data.vertices.push([x, 0.0, z]);
            data.normals.push([0.0, 1.0, 0.0]);
        }
    }

    for row in 0..d_segs {
        for col in 0..w_segs {
            let i = row * (w_segs + 1) + col;
            let next_row = i + w_segs + 1;
            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Square line grid in XZ centered at the origin.
pub fn generate_grid(size: f32, divisions: u32) -> GeometryData {
    let divisions = divisions.max(1);
    let half = size * 0.5;
    let step = size / divisions as f32;

    let mut data = GeometryData {
        topology: Topology::Lines,
        ..GeometryData::new()
    };

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        for p in [[-half, 0.0, k], [half, 0.0, k], [k, 0.0, -half], [k, 0.0, half]] {
            data.vertices.push(p);
            data.normals.push([0.0, 1.0, 0.0]);
        }
    }
    data.indices = (0..data.vertices.len() as u32).collect();
    data
}

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box(1.0, 1.0, 1.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        // four sides plus the diagonal, per face
        assert_eq!(cube.edge_indices().len() / 2, 30);
    }

    #[test]
    fn test_box_edges_keep_their_face_normal() {
        let cube = generate_box(1.0, 1.0, 1.0);
        let edges = cube.edge_indices();
        for pair in edges.chunks_exact(2) {
            assert_eq!(cube.normals[pair[0] as usize], cube.normals[pair[1] as usize]);
        }

        // the top front edge is drawn once for the front face and once for the top
        let front_top: Vec<[f32; 3]> = edges
            .chunks_exact(2)
            .filter(|pair| {
                pair.iter().all(|&i| {
                    let p = cube.vertices[i as usize];
                    p[1] == 0.5 && p[2] == 0.5
                })
            })
            .map(|pair| cube.normals[pair[0] as usize])
            .collect();
        assert_eq!(front_top.len(), 2);
        assert!(front_top.contains(&[0.0, 0.0, 1.0]));
        assert!(front_top.contains(&[0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_box_winding_faces_outward() {
        let cube = generate_box(2.0, 1.0, 3.0);
        for tri in cube.indices.chunks_exact(3) {
            let (a, b, c) = (
                cube.vertices[tri[0] as usize],
                cube.vertices[tri[1] as usize],
                cube.vertices[tri[2] as usize],
            );
            let n = cross(sub(b, a), sub(c, a));
            assert!(dot(n, cube.normals[tri[0] as usize]) > 0.0);
        }
    }

    #[test]
    fn test_icosahedron_counts() {
        let ico = generate_icosahedron(1.0, 0);
        assert_eq!(ico.triangle_count(), 20);
        assert_eq!(ico.vertex_count(), 60);
        // triangles keep separate vertices, so no edge is shared
        assert_eq!(ico.edge_indices().len() / 2, 60);

        let detailed = generate_icosahedron(1.0, 1);
        assert_eq!(detailed.triangle_count(), 80);
        assert_eq!(detailed.edge_indices().len() / 2, 240);
    }

    #[test]
    fn test_icosahedron_lies_on_sphere_and_faces_outward() {
        let ico = generate_icosahedron(2.0, 1);
        for p in &ico.vertices {
            assert!((dot(*p, *p).sqrt() - 2.0).abs() < 1e-4);
        }
        for tri in ico.vertices.chunks_exact(3) {
            let n = cross(sub(tri[1], tri[0]), sub(tri[2], tri[0]));
            assert!(dot(n, tri[0]) > 0.0);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2.0, 2.0, 2, 2);
        assert_eq!(plane.vertices.len(), 9);
        assert_eq!(plane.indices.len(), 24);
        for tri in plane.indices.chunks_exact(3) {
            let (a, b, c) = (
                plane.vertices[tri[0] as usize],
                plane.vertices[tri[1] as usize],
                plane.vertices[tri[2] as usize],
            );
            assert!(cross(sub(b, a), sub(c, a))[1] > 0.0);
        }
    }

    #[test]
    fn test_grid_is_line_list() {
        let grid = generate_grid(10.0, 10);
        assert_eq!(grid.topology, Topology::Lines);
        assert_eq!(grid.vertex_count(), 44);
        assert_eq!(grid.triangle_count(), 0);
        assert_eq!(grid.edge_indices(), grid.indices);
    }
}

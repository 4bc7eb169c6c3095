//! Flat shaded mesh generation.
//!
//! A [`Mesh`] is the non-indexed triangle soup for a [`Solid`] at a given scale: nine position
//! floats and nine normal floats per triangle, with the same face normal repeated for each of
//! the three vertices.

use glam::Vec3;

use crate::{
    MeshError,
    solid::{Solid, SolidName, registry},
};

/// Cross product length under which a triangle is treated as having no area.
pub const DEGENERATE_EPSILON: f32 = 1e-8;

/// Tolerance used when deciding whether a normal has unit length.
const UNIT_TOLERANCE: f32 = 1e-4;

/// Flat shaded, non-indexed triangle data ready for a vertex buffer upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub triangle_count: usize,
}

impl Mesh {
    /// Returns the number of vertices, three per triangle.
    pub fn vertex_count(&self) -> usize {
        self.triangle_count * 3
    }

    /// Returns the three corners of the triangle at `index`.
    pub fn triangle(&self, index: usize) -> Option<[Vec3; 3]> {
        let t = self.positions.get(index * 9..index * 9 + 9)?;
        Some([
            Vec3::from_slice(&t[0..3]),
            Vec3::from_slice(&t[3..6]),
            Vec3::from_slice(&t[6..9]),
        ])
    }

    /// Returns the face normal of the triangle at `index`.
    pub fn normal(&self, index: usize) -> Option<Vec3> {
        self.normals
            .get(index * 9..index * 9 + 3)
            .map(Vec3::from_slice)
    }

    /// Returns the indices of triangles whose normal is not of unit length.
    pub fn degenerate_triangles(&self) -> Vec<usize> {
        (0..self.triangle_count)
            .filter(|&i| {
                self.normal(i)
                    .is_none_or(|n| (n.length() - 1.0).abs() > UNIT_TOLERANCE)
            })
            .collect()
    }

    /// Interleaves positions and normals as `px, py, pz, nx, ny, nz` per vertex.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.positions.len() * 2);
        for (position, normal) in self
            .positions
            .chunks_exact(3)
            .zip(self.normals.chunks_exact(3))
        {
            data.extend_from_slice(position);
            data.extend_from_slice(normal);
        }
        data
    }
}

/// Computes the unit normal of the triangle `v0, v1, v2` using the right hand rule.
///
/// Returns `None` for triangles with (nearly) zero area.
#[inline]
pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Vec3> {
    let cross = (v1 - v0).cross(v2 - v0);
    let length = cross.length();
    if length < DEGENERATE_EPSILON {
        None
    } else {
        Some(cross / length)
    }
}

impl Solid {
    /// Generates the flat shaded mesh of this solid, uniformly scaled by `scale`.
    ///
    /// Only the positions are scaled; the normals are the same for every positive `scale`. Zero
    /// area triangles get a zero normal and a warning; generation carries on.
    pub fn generate(&self, scale: f32) -> Mesh {
        let triangle_count = self.triangle_count();
        let mut positions = Vec::with_capacity(triangle_count * 9);
        let mut normals = Vec::with_capacity(triangle_count * 9);

        for (index, &[v0, v1, v2]) in self.triangles().iter().enumerate() {
            // Normals come from the unscaled corners so they are identical for every scale.
            let normal = face_normal(v0, v1, v2).unwrap_or_else(|| {
                log::warn!(
                    "Degenerate triangle {} in solid '{}', using a zero normal",
                    index,
                    self.label()
                );
                Vec3::ZERO
            });

            for v in [v0, v1, v2] {
                positions.extend_from_slice(&(v * scale).to_array());
                normals.extend_from_slice(&normal.to_array());
            }
        }

        Mesh {
            positions,
            normals,
            triangle_count,
        }
    }
}

/// Generates the mesh of a built-in solid.
pub fn generate(name: SolidName, scale: f32) -> Mesh {
    registry().get(name).generate(scale)
}

/// Generates the mesh of a built-in solid looked up by name.
pub fn generate_named(name: &str, scale: f32) -> Result<Mesh, MeshError> {
    Ok(registry().lookup(name)?.generate(scale))
}

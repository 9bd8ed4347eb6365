//! This module handles indexed triangle meshes and the primitive shapes built from them.

use crate::GenerationError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// An indexed triangle mesh with per-vertex normals.
///
/// Triangles wind counter-clockwise when seen from the side their face normal points to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// The vertex positions.
    pub positions: Vec<Vec3>,

    /// The vertex normals. Always the same length as [`positions`](Self::positions).
    pub normals: Vec<Vec3>,

    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// The number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// The number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recompute the normals by averaging the face normals around each vertex.
    ///
    /// Faces are weighted by their area. A vertex that only touches degenerate faces gets a zero
    /// normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
            let face_normal =
                (self.positions[b] - self.positions[a]).cross(self.positions[c] - self.positions[a]);

            normals[a] += face_normal;
            normals[b] += face_normal;
            normals[c] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = normals;
    }

    /// Check that every vertex is finite and every index is in range.
    pub fn validate(&self, what: &'static str) -> Result<(), GenerationError> {
        if self.normals.len() != self.positions.len() || self.indices.len() % 3 != 0 {
            return Err(GenerationError::MismatchedBuffers { what });
        }

        if let Some(index) = self
            .positions
            .iter()
            .zip(&self.normals)
            .position(|(p, n)| !p.is_finite() || !n.is_finite())
        {
            return Err(GenerationError::NonFiniteVertex { what, index });
        }

        let vertices = self.positions.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(GenerationError::IndexOutOfRange {
                what,
                index,
                vertices,
            });
        }

        Ok(())
    }

    /// Move every vertex by the given offset.
    #[must_use = ".translated() returns a new mesh and does not mutate in-place"]
    pub fn translated(mut self, offset: Vec3) -> Self {
        for position in &mut self.positions {
            *position += offset;
        }
        self
    }

    /// Build a flat rectangle in the xy plane, centred on the origin and facing +z, split into a
    /// grid of `width_segments` by `height_segments` quads.
    ///
    /// Vertices run row by row from the top-left (`-width/2`, `height/2`).
    pub fn plane(width: f32, height: f32, width_segments: usize, height_segments: usize) -> Self {
        let grid_x = width_segments.max(1);
        let grid_y = height_segments.max(1);
        let segment_width = width / grid_x as f32;
        let segment_height = height / grid_y as f32;

        let mut positions = Vec::with_capacity((grid_x + 1) * (grid_y + 1));
        for iy in 0..=grid_y {
            let y = iy as f32 * segment_height - height / 2.;
            for ix in 0..=grid_x {
                let x = ix as f32 * segment_width - width / 2.;
                positions.push(Vec3::new(x, -y, 0.));
            }
        }

        let row = grid_x as u32 + 1;
        let mut indices = Vec::with_capacity(grid_x * grid_y * 6);
        for iy in 0..grid_y as u32 {
            for ix in 0..grid_x as u32 {
                let a = ix + row * iy;
                let b = ix + row * (iy + 1);
                let c = (ix + 1) + row * (iy + 1);
                let d = (ix + 1) + row * iy;
                indices.extend([a, b, d, b, c, d]);
            }
        }

        let normals = vec![Vec3::Z; positions.len()];
        Self {
            positions,
            normals,
            indices,
        }
    }

    /// Build a frustum around the y axis, centred on the origin.
    ///
    /// A top radius of zero makes a cone. If `open_ended` is false, the non-degenerate ends get
    /// flat caps.
    pub fn frustum(
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        radial_segments: usize,
        open_ended: bool,
    ) -> Self {
        let radial = radial_segments.max(3);
        let half_height = height / 2.;
        let slope = if height > 0. {
            (radius_bottom - radius_top) / height
        } else {
            0.
        };

        let mut mesh = Self::default();

        // Two rings: the top one (row 0) and the bottom one (row 1). The seam vertex is
        // duplicated so that every quad has its own pair.
        for (row, radius) in [radius_top, radius_bottom].into_iter().enumerate() {
            let y = half_height - row as f32 * height;
            for x in 0..=radial {
                let theta = x as f32 / radial as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                mesh.positions.push(Vec3::new(radius * sin, y, radius * cos));
                mesh.normals
                    .push(Vec3::new(sin, slope, cos).normalize_or_zero());
            }
        }

        let row = radial as u32 + 1;
        for x in 0..radial as u32 {
            let a = x;
            let b = x + row;
            let c = x + 1 + row;
            let d = x + 1;
            mesh.indices.extend([a, b, d, b, c, d]);
        }

        if !open_ended {
            if radius_top > 0. {
                mesh.add_cap(radius_top, half_height, radial, true);
            }
            if radius_bottom > 0. {
                mesh.add_cap(radius_bottom, -half_height, radial, false);
            }
        }

        mesh
    }

    /// Add a flat disc at height `y` facing up or down.
    fn add_cap(&mut self, radius: f32, y: f32, radial: usize, facing_up: bool) {
        let normal = if facing_up { Vec3::Y } else { Vec3::NEG_Y };
        let centre = self.positions.len() as u32;

        self.positions.push(Vec3::new(0., y, 0.));
        self.normals.push(normal);

        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.positions.push(Vec3::new(radius * sin, y, radius * cos));
            self.normals.push(normal);
        }

        for x in 0..radial as u32 {
            let current = centre + 1 + x;
            let next = current + 1;
            if facing_up {
                self.indices.extend([centre, current, next]);
            } else {
                self.indices.extend([centre, next, current]);
            }
        }
    }

    /// Build an axis-aligned box with the given side lengths, centred on the origin.
    ///
    /// Each face has its own four vertices so that the normals stay flat.
    pub fn cuboid(size: Vec3) -> Self {
        /// The faces as (normal, u, v) with `u × v = normal`.
        const FACES: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let half = size * 0.5;
        let mut mesh = Self::default();

        for (normal, u, v) in FACES {
            let first = mesh.positions.len() as u32;
            for (su, sv) in [(-1., -1.), (1., -1.), (1., 1.), (-1., 1.)] {
                mesh.positions.push((normal + su * u + sv * v) * half);
                mesh.normals.push(normal);
            }
            mesh.indices
                .extend([first, first + 1, first + 2, first, first + 2, first + 3]);
        }

        mesh
    }
}

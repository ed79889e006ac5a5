// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures
//!
//! A [`Mesh`] shares one index space across positions, normals and UVs:
//! vertex `i` is the bundle `(vertices[i], normals[i], uvs[i])`.

use crate::error::{Error, Result};
use nalgebra::{Point2, Point3, Vector3};

/// Triangle as three zero-based vertex indices
pub type Triangle = [u32; 3];

/// Decoded triangle mesh. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    uvs: Vec<Point2<f32>>,
    faces: Vec<Triangle>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex positions in decode order
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Per-vertex normals, index-aligned with [`Mesh::vertices`]
    #[inline]
    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    /// Per-vertex texture coordinates, index-aligned with [`Mesh::vertices`]
    #[inline]
    pub fn uvs(&self) -> &[Point2<f32>] {
        &self.uvs
    }

    /// Triangles in decode order
    #[inline]
    pub fn faces(&self) -> &[Triangle] {
        &self.faces
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh has no vertices and no faces
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Check that every face index addresses an existing vertex.
    ///
    /// The decoder trusts the file; call this when garbage indices must be rejected.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(Error::MalformedGeometry(format!(
                    "face {} references vertex {} but mesh has {} vertices",
                    face_idx, index, vertex_count
                )));
            }
        }
        Ok(())
    }
}

/// Incremental mesh construction
///
/// Collects vertex bundles and faces while a decoder walks the file, then
/// finalizes into an immutable [`Mesh`]. When built with expected counts,
/// [`MeshBuilder::build`] refuses to finish until both are met.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    mesh: Mesh,
    expected: Option<(usize, usize)>,
}

impl MeshBuilder {
    /// Create a builder without count expectations
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder that expects exactly `vertex_count` vertices and `face_count` faces
    pub fn with_counts(vertex_count: usize, face_count: usize) -> Self {
        Self {
            mesh: Mesh {
                vertices: Vec::with_capacity(vertex_count),
                normals: Vec::with_capacity(vertex_count),
                uvs: Vec::with_capacity(vertex_count),
                faces: Vec::with_capacity(face_count),
            },
            expected: Some((vertex_count, face_count)),
        }
    }

    /// Add one vertex bundle
    #[inline]
    pub fn push_vertex(&mut self, position: Point3<f32>, normal: Vector3<f32>, uv: Point2<f32>) {
        self.mesh.vertices.push(position);
        self.mesh.normals.push(normal);
        self.mesh.uvs.push(uv);
    }

    /// Add a triangle
    #[inline]
    pub fn push_face(&mut self, face: Triangle) {
        self.mesh.faces.push(face);
    }

    /// Finalize into a [`Mesh`]
    pub fn build(self) -> Result<Mesh> {
        if let Some((vertex_count, face_count)) = self.expected {
            let mesh = &self.mesh;
            if mesh.vertices.len() != vertex_count || mesh.faces.len() != face_count {
                return Err(Error::MalformedGeometry(format!(
                    "expected {} vertices and {} faces, got {} and {}",
                    vertex_count,
                    face_count,
                    mesh.vertices.len(),
                    mesh.faces.len()
                )));
            }
        }
        Ok(self.mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(x: f32) -> (Point3<f32>, Vector3<f32>, Point2<f32>) {
        (Point3::new(x, 0.0, 0.0), Vector3::z(), Point2::new(x, 0.0))
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_builder_keeps_attributes_aligned() {
        let mut builder = MeshBuilder::new();
        for x in [0.0, 1.0, 2.0] {
            let (p, n, uv) = bundle(x);
            builder.push_vertex(p, n, uv);
        }
        builder.push_face([0, 2, 1]);

        let mesh = builder.build().unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.normals().len(), 3);
        assert_eq!(mesh.uvs().len(), 3);
        assert_eq!(mesh.faces(), &[[0, 2, 1]]);
        assert_eq!(mesh.vertices()[2], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_builder_count_mismatch() {
        let mut builder = MeshBuilder::with_counts(2, 0);
        let (p, n, uv) = bundle(0.0);
        builder.push_vertex(p, n, uv);

        let err = builder.build().unwrap_err();
        assert!(matches!(err, Error::MalformedGeometry(_)));
    }

    #[test]
    fn test_validate_out_of_range_index() {
        let mut builder = MeshBuilder::new();
        let (p, n, uv) = bundle(0.0);
        builder.push_vertex(p, n, uv);
        builder.push_face([0, 0, 3]);

        let mesh = builder.build().unwrap();
        let err = mesh.validate().unwrap_err();
        assert_eq!(
            err,
            Error::MalformedGeometry("face 0 references vertex 3 but mesh has 1 vertices".into())
        );
    }
}

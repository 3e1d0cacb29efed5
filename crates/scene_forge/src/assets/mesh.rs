//! Mesh geometry bound to mesh-instance nodes

use crate::foundation::math::Vec3;

/// Vertex with position, normal and texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Triangle mesh: vertices plus triangle indices
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Unit cube centered at the origin (side length 1.0)
    ///
    /// Uses a right-handed, Y-up coordinate system; normals point outward.
    pub fn unit_cube() -> Self {
        const H: f32 = 0.5;
        let vertices = vec![
            // Front face
            Vertex::new([-H, -H, H], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([H, -H, H], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([H, H, H], [0.0, 0.0, 1.0], [1.0, 1.0]),
            Vertex::new([-H, H, H], [0.0, 0.0, 1.0], [0.0, 1.0]),
            // Back face
            Vertex::new([-H, -H, -H], [0.0, 0.0, -1.0], [1.0, 0.0]),
            Vertex::new([-H, H, -H], [0.0, 0.0, -1.0], [1.0, 1.0]),
            Vertex::new([H, H, -H], [0.0, 0.0, -1.0], [0.0, 1.0]),
            Vertex::new([H, -H, -H], [0.0, 0.0, -1.0], [0.0, 0.0]),
        ];

        let indices = vec![
            // Front
            0, 1, 2, 2, 3, 0,
            // Back
            4, 5, 6, 6, 7, 4,
            // Left
            4, 0, 3, 3, 5, 4,
            // Right
            1, 7, 6, 6, 2, 1,
            // Top
            3, 2, 6, 6, 5, 3,
            // Bottom
            4, 7, 1, 1, 0, 4,
        ];

        Self::new(vertices, indices)
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = Vec3::from(self.vertices.first()?.position);
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            let p = Vec3::from(v.position);
            (min.inf(&p), max.sup(&p))
        }))
    }

    /// Extent of the bounding box along each axis
    pub fn size(&self) -> Vec3 {
        self.bounds().map_or_else(Vec3::zeros, |(min, max)| max - min)
    }
}

/// Vertex and index buffer accumulation
use std::mem::size_of;

use crate::attribute::AttributePool;
use crate::error::Result;
use crate::face::FaceResolver;

/// Interleaved vertex data plus the per-corner slot list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
}

impl MeshBuffers {
    pub fn new(vertices: Vec<f32>, indices: Vec<u16>) -> Self {
        Self { vertices, indices }
    }

    /// Size of the vertex section, which is also the length prefix value
    pub fn vertex_byte_len(&self) -> usize {
        self.vertices.len() * size_of::<f32>()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Total size once encoded, prefix included
    pub fn encoded_len(&self) -> usize {
        size_of::<i32>() + self.vertex_byte_len() + self.indices.len() * size_of::<u16>()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }
}

/// Counts reported after a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub positions: usize,
    pub tex_coords: usize,
    pub normals: usize,
    pub unique_vertices: usize,
    pub indices: usize,
}

/// Builds the index buffer one face corner at a time
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    resolver: FaceResolver,
    vertices: Vec<f32>,
    indices: Vec<u16>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `token` against `pool` and append its slot to the index buffer
    pub fn add_face_vertex(&mut self, token: &str, pool: &AttributePool) -> Result<u16> {
        let slot = self.resolver.resolve(token, pool, &mut self.vertices)?;
        self.indices.push(slot);
        Ok(slot)
    }

    /// Snapshot of the buffers built so far. Calling it again without
    /// adding vertices returns an identical copy.
    pub fn finalize(&self) -> MeshBuffers {
        MeshBuffers::new(self.vertices.clone(), self.indices.clone())
    }

    /// Consume the builder without copying the buffers
    pub fn into_buffers(self) -> MeshBuffers {
        MeshBuffers::new(self.vertices, self.indices)
    }

    pub fn unique_vertices(&self) -> usize {
        self.resolver.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeKind;

    fn triangle_pool() -> AttributePool {
        let mut pool = AttributePool::new();
        pool.record(AttributeKind::Position, &[0.0, 0.0, 0.0]).unwrap();
        pool.record(AttributeKind::Position, &[1.0, 0.0, 0.0]).unwrap();
        pool.record(AttributeKind::Position, &[0.0, 1.0, 0.0]).unwrap();
        pool.record(AttributeKind::Position, &[1.0, 1.0, 0.0]).unwrap();
        pool
    }

    #[test]
    fn test_shared_corners() {
        let pool = triangle_pool();
        let mut builder = MeshBuilder::new();
        for token in ["1", "2", "3", "3", "2", "4"] {
            builder.add_face_vertex(token, &pool).unwrap();
        }

        let buffers = builder.finalize();
        assert_eq!(buffers.indices, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(buffers.vertices.len(), 12);
        assert_eq!(builder.unique_vertices(), 4);
        assert_eq!(builder.index_count(), 6);
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let pool = triangle_pool();
        let mut builder = MeshBuilder::new();
        builder.add_face_vertex("1", &pool).unwrap();

        let first = builder.finalize();
        let second = builder.finalize();
        assert_eq!(first, second);
        assert_eq!(builder.into_buffers(), first);
    }

    #[test]
    fn test_failed_corner_not_indexed() {
        let pool = triangle_pool();
        let mut builder = MeshBuilder::new();
        builder.add_face_vertex("1", &pool).unwrap();
        assert!(builder.add_face_vertex("5", &pool).is_err());

        assert_eq!(builder.finalize().indices, vec![0]);
    }

    #[test]
    fn test_sizes() {
        let buffers = MeshBuffers::new(vec![0.0; 9], vec![0, 1, 2]);
        assert_eq!(buffers.vertex_byte_len(), 36);
        assert_eq!(buffers.index_count(), 3);
        assert_eq!(buffers.encoded_len(), 4 + 36 + 6);
        assert!(MeshBuffers::default().is_empty());
    }
}

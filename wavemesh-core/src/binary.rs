/// Binary mesh encoder and decoder
///
/// Layout, all little-endian, no header beyond the length prefix:
/// ```text
/// i32        byte length of the vertex section
/// [f32]      interleaved vertex records
/// [u16]      index buffer, to the end of the data
/// ```
use std::io::Write;
use std::mem::size_of;

use crate::error::{MeshError, Result};
use crate::mesh::MeshBuffers;

const PREFIX_LEN: usize = size_of::<i32>();

/// Stream `mesh` into `writer` in the binary layout
pub fn write_mesh<W: Write>(writer: &mut W, mesh: &MeshBuffers) -> Result<()> {
    let bytes = mesh.vertex_byte_len();
    let prefix = i32::try_from(bytes).map_err(|_| MeshError::VertexBufferTooLarge { bytes })?;

    writer.write_all(&prefix.to_le_bytes())?;
    for component in &mesh.vertices {
        writer.write_all(&component.to_le_bytes())?;
    }
    for index in &mesh.indices {
        writer.write_all(&index.to_le_bytes())?;
    }
    Ok(())
}

/// Encode `mesh` into a freshly allocated byte buffer
pub fn encode(mesh: &MeshBuffers) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(mesh.encoded_len());
    write_mesh(&mut out, mesh)?;
    Ok(out)
}

/// Decode a binary mesh back into its vertex and index buffers
pub fn decode(data: &[u8]) -> Result<MeshBuffers> {
    if data.len() < PREFIX_LEN {
        return Err(MeshError::Truncated {
            expected: PREFIX_LEN,
            found: data.len(),
        });
    }

    let prefix = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    if prefix < 0 || prefix as usize % size_of::<f32>() != 0 {
        return Err(MeshError::InvalidLengthPrefix(prefix));
    }
    let vertex_bytes = prefix as usize;

    let body = &data[PREFIX_LEN..];
    if body.len() < vertex_bytes {
        return Err(MeshError::Truncated {
            expected: PREFIX_LEN + vertex_bytes,
            found: data.len(),
        });
    }

    let (vertex_data, index_data) = body.split_at(vertex_bytes);
    if index_data.len() % size_of::<u16>() != 0 {
        return Err(MeshError::MisalignedIndexData(index_data.len()));
    }

    let vertices = vertex_data
        .chunks_exact(size_of::<f32>())
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let indices = index_data
        .chunks_exact(size_of::<u16>())
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    Ok(MeshBuffers::new(vertices, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_triangle_bytes() {
        let mesh = MeshBuffers::new(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        );
        let bytes = encode(&mesh).unwrap();

        assert_eq!(bytes.len(), 4 + 36 + 6);
        assert_eq!(&bytes[0..4], &36i32.to_le_bytes());
        assert_eq!(&bytes[4 + 12..4 + 16], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[40..], &[0x00, 0x00, 0x01, 0x00, 0x02, 0x00]);
    }

    #[test]
    fn test_length_prefix_ignores_indices() {
        let vertices = vec![0.5; 6];
        for index_count in [0, 1, 7, 300] {
            let mesh = MeshBuffers::new(vertices.clone(), vec![0; index_count]);
            let bytes = encode(&mesh).unwrap();
            assert_eq!(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), 24);
            assert_eq!(bytes.len(), mesh.encoded_len());
        }
    }

    #[test]
    fn test_empty_mesh() {
        let bytes = encode(&MeshBuffers::default()).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 0]);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_roundtrip_preserves_bits() {
        let vertices = vec![-0.0, f32::MIN_POSITIVE, f32::MAX, -1.5e-7, f32::NAN, f32::INFINITY];
        let mesh = MeshBuffers::new(vertices.clone(), vec![0, 65535, 1, 1]);

        let decoded = decode(&encode(&mesh).unwrap()).unwrap();
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&decoded.vertices), bits(&vertices));
        assert_eq!(decoded.indices, mesh.indices);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let mesh = MeshBuffers::new(vec![0.25, 3.0, -8.0], vec![2, 0, 1]);
        assert_eq!(encode(&mesh).unwrap(), encode(&mesh).unwrap());
    }

    #[test]
    fn test_decode_rejects_short_prefix() {
        assert!(matches!(
            decode(&[1, 0]),
            Err(MeshError::Truncated { expected: 4, found: 2 })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_prefix() {
        assert!(matches!(
            decode(&(-4i32).to_le_bytes()),
            Err(MeshError::InvalidLengthPrefix(-4))
        ));
        assert!(matches!(
            decode(&6i32.to_le_bytes()),
            Err(MeshError::InvalidLengthPrefix(6))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_vertices() {
        let mut data = 8i32.to_le_bytes().to_vec();
        data.extend_from_slice(&1.0f32.to_le_bytes());
        assert!(matches!(
            decode(&data),
            Err(MeshError::Truncated { expected: 12, found: 8 })
        ));
    }

    #[test]
    fn test_decode_rejects_odd_index_tail() {
        let mut data = 4i32.to_le_bytes().to_vec();
        data.extend_from_slice(&1.0f32.to_le_bytes());
        data.extend_from_slice(&[1, 0, 2]);
        assert!(matches!(decode(&data), Err(MeshError::MisalignedIndexData(3))));
    }
}

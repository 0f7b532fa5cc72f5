/// wavemesh core - text geometry to binary mesh conversion
///
/// Parses `v`/`vt`/`vn`/`f` text into an interleaved vertex buffer and a u16
/// index buffer, deduplicating face references by their literal token, and
/// encodes the result as `[i32 vertex bytes][f32 vertices][u16 indices]`.

pub mod attribute;
pub mod binary;
pub mod error;
pub mod face;
pub mod mesh;
pub mod parser;

use std::io::{BufRead, Write};

// Re-export commonly used types
pub use attribute::{AttributeKind, AttributePool};
pub use binary::{decode, encode, write_mesh};
pub use error::{MeshError, Result};
pub use face::{FaceResolver, VertexRef, MAX_UNIQUE_VERTICES};
pub use mesh::{MeshBuffers, MeshBuilder, MeshStats};
pub use parser::TextParser;

/// Parse the whole of `reader`, then write the binary mesh to `writer`.
///
/// Nothing is written unless parsing succeeds.
pub fn convert<R: BufRead, W: Write>(reader: R, writer: &mut W) -> Result<MeshStats> {
    let mut parser = TextParser::new();
    parser.read(reader)?;
    let (mesh, stats) = parser.finish();
    write_mesh(writer, &mesh)?;
    Ok(stats)
}

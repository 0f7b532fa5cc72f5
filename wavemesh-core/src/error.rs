/// Error type shared by the parser, resolver and binary codec
use thiserror::Error;

use crate::attribute::AttributeKind;

pub type Result<T> = std::result::Result<T, MeshError>;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `v`, `vt` or `vn` component that is not a float
    #[error("line {line}: malformed number {token:?}")]
    MalformedNumber { line: usize, token: String },

    /// A face token that is not `p`, `p/t`, `p/t/n` or `p//n`
    #[error("line {line}: malformed vertex reference {token:?}")]
    MalformedVertexRef { line: usize, token: String },

    #[error("line {line}: {kind} needs {expected} components, found {found}")]
    MissingComponents {
        line: usize,
        kind: AttributeKind,
        expected: usize,
        found: usize,
    },

    /// 1-based `index` does not name one of the `len` recorded attributes
    #[error("{kind} index {index} out of range (1..={len})")]
    IndexOutOfRange {
        kind: AttributeKind,
        index: u32,
        len: usize,
    },

    #[error("more than {limit} unique vertices, indices would not fit in 16 bits")]
    VertexCountOverflow { limit: usize },

    #[error("vertex buffer of {bytes} bytes does not fit the int32 length prefix")]
    VertexBufferTooLarge { bytes: usize },

    #[error("truncated mesh data: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("invalid vertex length prefix {0}")]
    InvalidLengthPrefix(i32),

    #[error("index data of {0} bytes is not a whole number of u16 values")]
    MisalignedIndexData(usize),
}

impl MeshError {
    /// Attach a 1-based line number to errors raised below the line level
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            MeshError::MalformedNumber { token, .. } => MeshError::MalformedNumber { line, token },
            MeshError::MalformedVertexRef { token, .. } => {
                MeshError::MalformedVertexRef { line, token }
            }
            MeshError::MissingComponents {
                kind,
                expected,
                found,
                ..
            } => MeshError::MissingComponents {
                line,
                kind,
                expected,
                found,
            },
            other => other,
        }
    }
}

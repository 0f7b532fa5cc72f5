/// Raw vertex attributes collected from `v`, `vt` and `vn` lines
use std::fmt;

use nalgebra::{Point3, Vector2, Vector3};

use crate::error::{MeshError, Result};

/// The three attribute streams a face reference can index into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Normal,
}

impl AttributeKind {
    /// Segment order inside a face reference (`p/t/n`)
    pub const ALL: [AttributeKind; 3] = [
        AttributeKind::Position,
        AttributeKind::TexCoord,
        AttributeKind::Normal,
    ];

    /// Number of float32 components one entry contributes to a vertex record
    pub const fn width(self) -> usize {
        match self {
            AttributeKind::Position => 3,
            AttributeKind::TexCoord => 2,
            AttributeKind::Normal => 3,
        }
    }

    /// Map a line-leading token to its attribute kind
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "v" => Some(AttributeKind::Position),
            "vt" => Some(AttributeKind::TexCoord),
            "vn" => Some(AttributeKind::Normal),
            _ => None,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            AttributeKind::Position => "v",
            AttributeKind::TexCoord => "vt",
            AttributeKind::Normal => "vn",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Append-only storage for parsed attributes.
///
/// Entries are referenced with 1-based indices, matching face lines.
#[derive(Debug, Clone, Default)]
pub struct AttributePool {
    positions: Vec<Point3<f32>>,
    tex_coords: Vec<Vector2<f32>>,
    normals: Vec<Vector3<f32>>,
}

impl AttributePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry of `kind`.
    ///
    /// Components past the kind's width (the optional `w` of `v` and `vt`)
    /// are dropped.
    pub fn record(&mut self, kind: AttributeKind, components: &[f32]) -> Result<()> {
        let expected = kind.width();
        if components.len() < expected {
            return Err(MeshError::MissingComponents {
                line: 0,
                kind,
                expected,
                found: components.len(),
            });
        }
        if components.len() > expected {
            log::debug!(
                "ignoring {} extra {} component(s)",
                components.len() - expected,
                kind
            );
        }

        let c = components;
        match kind {
            AttributeKind::Position => self.positions.push(Point3::new(c[0], c[1], c[2])),
            AttributeKind::TexCoord => self.tex_coords.push(Vector2::new(c[0], c[1])),
            AttributeKind::Normal => self.normals.push(Vector3::new(c[0], c[1], c[2])),
        }
        Ok(())
    }

    /// Components of the entry at 1-based `index`
    pub fn fetch(&self, kind: AttributeKind, index: u32) -> Result<&[f32]> {
        let out_of_range = || MeshError::IndexOutOfRange {
            kind,
            index,
            len: self.len(kind),
        };
        let slot = (index as usize).checked_sub(1).ok_or_else(out_of_range)?;

        let components = match kind {
            AttributeKind::Position => self.positions.get(slot).map(|p| p.coords.as_slice()),
            AttributeKind::TexCoord => self.tex_coords.get(slot).map(|t| t.as_slice()),
            AttributeKind::Normal => self.normals.get(slot).map(|n| n.as_slice()),
        };
        components.ok_or_else(out_of_range)
    }

    pub fn len(&self, kind: AttributeKind) -> usize {
        match kind {
            AttributeKind::Position => self.positions.len(),
            AttributeKind::TexCoord => self.tex_coords.len(),
            AttributeKind::Normal => self.normals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        AttributeKind::ALL.iter().all(|&kind| self.len(kind) == 0)
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn tex_coords(&self) -> &[Vector2<f32>] {
        &self.tex_coords
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }
}

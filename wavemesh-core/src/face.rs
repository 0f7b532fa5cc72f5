/// Face vertex references and their deduplication into vertex slots
use std::collections::HashMap;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, u32 as index},
    combinator::{all_consuming, map},
    sequence::{preceded, separated_pair, tuple},
    IResult,
};

use crate::attribute::{AttributeKind, AttributePool};
use crate::error::{MeshError, Result};

/// Slots are written as u16, so at most this many unique references fit
pub const MAX_UNIQUE_VERTICES: usize = u16::MAX as usize + 1;

/// Widest interleaved record a single reference can produce
const MAX_RECORD_WIDTH: usize = AttributeKind::Position.width()
    + AttributeKind::TexCoord.width()
    + AttributeKind::Normal.width();

/// One decomposed face token: 1-based indices into the attribute streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    pub position: u32,
    pub tex_coord: Option<u32>,
    pub normal: Option<u32>,
}

impl VertexRef {
    /// Parse `p`, `p/t`, `p/t/n` or `p//n`
    pub fn parse(token: &str) -> Result<Self> {
        match all_consuming(parse_vertex_ref)(token) {
            Ok((_, vertex_ref)) => Ok(vertex_ref),
            Err(_) => Err(MeshError::MalformedVertexRef {
                line: 0,
                token: token.to_string(),
            }),
        }
    }

    /// Present indices in segment order
    pub fn indices(&self) -> [(AttributeKind, Option<u32>); 3] {
        [
            (AttributeKind::Position, Some(self.position)),
            (AttributeKind::TexCoord, self.tex_coord),
            (AttributeKind::Normal, self.normal),
        ]
    }
}

fn parse_vertex_ref(input: &str) -> IResult<&str, VertexRef> {
    let (input, (position, tex_coord, normal)) = alt((
        map(separated_pair(index, tag("//"), index), |(p, n)| {
            (p, None, Some(n))
        }),
        map(
            tuple((index, preceded(char('/'), index), preceded(char('/'), index))),
            |(p, t, n)| (p, Some(t), Some(n)),
        ),
        map(separated_pair(index, char('/'), index), |(p, t)| {
            (p, Some(t), None)
        }),
        map(index, |p| (p, None, None)),
    ))(input)?;

    Ok((
        input,
        VertexRef {
            position,
            tex_coord,
            normal,
        },
    ))
}

/// Assigns slot numbers to face tokens in first-seen order.
///
/// The cache is keyed by the raw token text, so `1/1/1` and `01/1/1` get
/// separate slots even though they resolve to the same attributes.
#[derive(Debug, Clone, Default)]
pub struct FaceResolver {
    cache: HashMap<String, u16>,
}

impl FaceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the slot for `token`, appending its interleaved record to
    /// `vertices` the first time it is seen.
    ///
    /// On error neither `vertices` nor the cache is modified.
    pub fn resolve(
        &mut self,
        token: &str,
        pool: &AttributePool,
        vertices: &mut Vec<f32>,
    ) -> Result<u16> {
        if let Some(&slot) = self.cache.get(token) {
            return Ok(slot);
        }

        let slot = u16::try_from(self.cache.len()).map_err(|_| MeshError::VertexCountOverflow {
            limit: MAX_UNIQUE_VERTICES,
        })?;
        let vertex_ref = VertexRef::parse(token)?;

        let mut record = [0.0f32; MAX_RECORD_WIDTH];
        let mut width = 0;
        for (kind, index) in vertex_ref.indices() {
            if let Some(index) = index {
                let components = pool.fetch(kind, index)?;
                record[width..width + components.len()].copy_from_slice(components);
                width += components.len();
            }
        }
        vertices.extend_from_slice(&record[..width]);

        self.cache.insert(token.to_owned(), slot);
        log::trace!("slot {} <- {:?} ({} components)", slot, token, width);
        Ok(slot)
    }

    /// Slot previously assigned to `token`, if any
    pub fn slot(&self, token: &str) -> Option<u16> {
        self.cache.get(token).copied()
    }

    /// Number of unique references seen so far
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

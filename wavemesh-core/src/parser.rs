/// Line-oriented geometry text parser
use std::io::BufRead;

use nom::{combinator::all_consuming, number::complete::float, IResult};

use crate::attribute::{AttributeKind, AttributePool};
use crate::error::{MeshError, Result};
use crate::mesh::{MeshBuffers, MeshBuilder, MeshStats};

/// Consumes input one line at a time.
///
/// `v`, `vt` and `vn` lines feed the attribute pool, `f` lines feed the mesh
/// builder, anything else (comments, `o`, `g`, `s`, `usemtl`, blank lines)
/// is skipped. Face references only see attributes from earlier lines.
#[derive(Debug, Default)]
pub struct TextParser {
    pool: AttributePool,
    builder: MeshBuilder,
    line: usize,
}

impl TextParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole input into mesh buffers
    pub fn parse<R: BufRead>(reader: R) -> Result<MeshBuffers> {
        let mut parser = Self::new();
        parser.read(reader)?;
        Ok(parser.finish().0)
    }

    pub fn parse_str(input: &str) -> Result<MeshBuffers> {
        Self::parse(input.as_bytes())
    }

    /// Feed every line of `reader`
    pub fn read<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            self.feed_line(&line?)?;
        }
        Ok(())
    }

    /// Process the next input line. Errors carry its 1-based line number.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.line += 1;
        self.dispatch(line).map_err(|e| e.at_line(self.line))
    }

    fn dispatch(&mut self, line: &str) -> Result<()> {
        let mut tokens = line.split_ascii_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(());
        };

        if keyword == "f" {
            for token in tokens {
                self.builder.add_face_vertex(token, &self.pool)?;
            }
            return Ok(());
        }

        match AttributeKind::from_keyword(keyword) {
            Some(kind) => {
                let components = tokens
                    .map(parse_component)
                    .collect::<Result<Vec<f32>>>()?;
                self.pool.record(kind, &components)
            }
            None => {
                log::trace!("line {}: skipping {:?}", self.line, keyword);
                Ok(())
            }
        }
    }

    /// Lines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn pool(&self) -> &AttributePool {
        &self.pool
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            positions: self.pool.len(AttributeKind::Position),
            tex_coords: self.pool.len(AttributeKind::TexCoord),
            normals: self.pool.len(AttributeKind::Normal),
            unique_vertices: self.builder.unique_vertices(),
            indices: self.builder.index_count(),
        }
    }

    /// Snapshot of the buffers built so far
    pub fn finalize(&self) -> MeshBuffers {
        self.builder.finalize()
    }

    /// End of input: hand over the buffers and the run summary
    pub fn finish(self) -> (MeshBuffers, MeshStats) {
        let stats = self.stats();
        log::debug!(
            "parsed {} lines: {} positions, {} tex coords, {} normals -> {} vertices, {} indices",
            self.line,
            stats.positions,
            stats.tex_coords,
            stats.normals,
            stats.unique_vertices,
            stats.indices
        );
        (self.builder.into_buffers(), stats)
    }
}

fn parse_component(token: &str) -> Result<f32> {
    let parsed: IResult<&str, f32> = all_consuming(float)(token);
    match parsed {
        Ok((_, value)) => Ok(value),
        Err(_) => Err(MeshError::MalformedNumber {
            line: 0,
            token: token.to_string(),
        }),
    }
}

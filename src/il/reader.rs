//! Reading raw quads from text.
//!
//! Every non-empty line holds exactly four whitespace-separated fields in
//! `op arg1 arg2 res` order. `_` marks an absent field and `#` starts a comment
//! that runs to the end of the line.

use thiserror::Error;

use super::RawQuad;

/// Placeholder for an absent field.
pub const ABSENT: &str = "_";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: expected 4 fields, found {found}")]
pub struct ReadError {
    pub line: usize,
    pub found: usize,
}

pub fn read_quads(source: &str) -> Result<Vec<RawQuad>, ReadError> {
    let mut quads = vec![];

    for (line_idx, line) in source.lines().enumerate() {
        let content = match line.find('#') {
            Some(start) => &line[..start],
            None => line,
        };
        let fields: Vec<_> = content
            .split_whitespace()
            .map(|field| (field != ABSENT).then_some(field))
            .collect();

        match fields[..] {
            [] => continue,
            [op, arg1, arg2, res] => quads.push(RawQuad::new(op, arg1, arg2, res)),
            _ => {
                return Err(ReadError {
                    line: line_idx + 1,
                    found: fields.len(),
                })
            }
        }
    }

    Ok(quads)
}

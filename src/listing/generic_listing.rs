use std::slice::Iter;

use thiserror::Error;

use super::position::*;

/// Raised when a bounded listing has no free slot left.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("listing is full ({capacity} slots, slot 0 reserved)")]
pub struct ListingFull {
    pub capacity: usize,
}

/// An append-only, 1-indexed sequence of lines.
///
/// A bounded listing has `capacity` slots, the first of which is reserved,
/// so it holds at most `capacity - 1` lines.
#[derive(Debug)]
pub struct Listing<T> {
    lines: Vec<T>,
    capacity: Option<usize>,
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self {
            lines: vec![],
            capacity: None,
        }
    }

    pub fn bounded(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity.saturating_sub(1)),
            capacity: Some(capacity),
        }
    }

    /// The position the next pushed line will occupy.
    pub fn next_position(&self) -> Position {
        Position::FIRST + self.lines.len()
    }

    /// Append a line, returning the position it was written to.
    pub fn push(&mut self, line: T) -> Result<Position, ListingFull> {
        let position = self.next_position();
        if let Some(capacity) = self.capacity {
            if position.0 >= capacity {
                return Err(ListingFull { capacity });
            }
        }
        self.lines.push(line);
        Ok(position)
    }

    /// Drop every line, keeping the capacity.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        position
            .0
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
    }

    pub fn iter_lines(&self) -> LinesIter<T> {
        LinesIter {
            inner: self.lines.iter(),
            position: Position::FIRST,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LinesIter<'item, T> {
    inner: Iter<'item, T>,
    position: Position,
}

impl<'item, T> Iterator for LinesIter<'item, T> {
    type Item = (Position, &'item T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|v| {
            let current = self.position;
            self.position = current + 1;
            (current, v)
        })
    }
}

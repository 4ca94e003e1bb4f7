use std::{
    fmt::{Display, Formatter},
    ops::Add,
};

/// A position in a listing, indicated by a 1-based line number.
///
/// Position 0 is never occupied by an instruction, so callers may use it as a
/// "no target yet" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub usize);

impl Position {
    /// The position of the first instruction in a listing.
    pub const FIRST: Position = Position(1);
    /// The reserved position that never holds an instruction.
    pub const NONE: Position = Position(0);
}

impl Add<usize> for Position {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

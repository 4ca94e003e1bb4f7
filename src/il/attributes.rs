use crate::listing::Position;

use super::{opcode::SemanticType, Address};

/// Synthesized attributes that grammar actions pass between productions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    /// Where the value lives.
    pub addr: Address,
    pub ty: SemanticType,
    /// Index of the first quad of an enclosing loop, or [`Position::NONE`].
    pub label: Position,
    /// Hidden counter of a counted loop.
    pub counter: Option<Address>,
}
impl Attributes {
    pub fn new<A: Into<Address>>(addr: A, ty: SemanticType) -> Self {
        Self {
            addr: addr.into(),
            ty,
            label: Position::NONE,
            counter: None,
        }
    }

    pub fn int<A: Into<Address>>(addr: A) -> Self {
        Self::new(addr, SemanticType::Integer)
    }

    pub fn float<A: Into<Address>>(addr: A) -> Self {
        Self::new(addr, SemanticType::Float)
    }
}

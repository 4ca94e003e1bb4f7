use thiserror::Error;

use crate::listing::ListingFull;

/// An error raised while emitting quads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error("instruction limit exceeded: the store holds at most {} quads", .capacity.saturating_sub(1))]
    CapacityExceeded { capacity: usize },
    #[error("loop over '{0}' has no counter variable")]
    MissingLoopCounter(String),
}
impl From<ListingFull> for EmitError {
    fn from(full: ListingFull) -> Self {
        Self::CapacityExceeded {
            capacity: full.capacity,
        }
    }
}

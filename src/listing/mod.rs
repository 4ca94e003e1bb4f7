//! Generic logic for instruction listings.

mod generic_listing;
mod position;

pub use generic_listing::*;
pub use position::*;

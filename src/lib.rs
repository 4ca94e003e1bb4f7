//! Three-address code emission and rendering for a small compiler backend.

pub mod error;
pub mod il;
pub mod listing;

pub use error::EmitError;

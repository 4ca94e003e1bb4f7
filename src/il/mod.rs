//! Intermediate code generation.

pub mod actions;
mod attributes;
mod generator;
mod name_generator;
pub mod opcode;
mod quad;
pub mod reader;

pub use attributes::Attributes;
pub use generator::*;
pub use name_generator::{NameGenerator, TEMP_PREFIX};
pub use quad::*;

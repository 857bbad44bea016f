//! Procedural generation for the city: buildings and their layout.

pub mod district;
pub mod structure;

pub use district::*;
pub use structure::*;

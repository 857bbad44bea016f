//! Rendering boundary for rotorcity.
//!
//! The scene core never talks to a GPU directly. It composes transforms on a
//! [`engine_core::TransformStack`], and hands each part to a [`RenderBackend`]
//! as "upload this model matrix, then draw this primitive in this colour".

pub mod backend;
pub mod camera;
pub mod context;
pub mod recorder;

pub use backend::*;
pub use camera::*;
pub use context::*;
pub use recorder::*;

//! Core engine types and utilities for rotorcity.
//!
//! This crate provides the foundational types used across all scene systems:
//! - The model-view transform stack and its scope guard
//! - Frame timing
//! - Smoothing and lifetime helpers shared by animated entities

pub mod components;
pub mod error;
pub mod time;
pub mod transform;

pub use components::*;
pub use error::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Vec2, Vec3, Vec4};

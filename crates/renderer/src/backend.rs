//! Backend trait and the data handed across it.

use bytemuck::{Pod, Zeroable};
use engine_core::Color;
use glam::Mat4;

/// Sky colour used to clear each frame.
pub const SKY_COLOR: Color = [132.0 / 256.0, 207.0 / 256.0, 1.0, 1.0];

/// Meshes every backend must provide. All are unit sized and centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Sphere,
    Cube,
    Cylinder,
}

impl Primitive {
    pub const ALL: [Primitive; 3] = [Primitive::Sphere, Primitive::Cube, Primitive::Cylinder];
}

/// How primitives are rasterized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

/// Per-frame state, computed once and shared by every draw in the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub fill_mode: FillMode,
    pub clear_color: Color,
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            fill_mode: FillMode::Solid,
            clear_color: SKY_COLOR,
        }
    }
}

/// Per-draw data in the layout a GPU instance buffer expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Model matrix (4x4, column major)
    pub model: [[f32; 4]; 4],
    /// Color tint
    pub color: [f32; 4],
}

impl InstanceData {
    pub fn new(model: &Mat4, color: Color) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }
}

/// Receives draw traffic from the scene core.
///
/// Within a frame the sequence is `begin_frame`, then any number of
/// `upload_model` / `draw` pairs, then `end_frame`.
pub trait RenderBackend {
    /// Start a frame with the projection and view for every draw in it.
    fn begin_frame(&mut self, uniforms: &FrameUniforms);

    /// Set the model matrix used by the next `draw`.
    fn upload_model(&mut self, model: &Mat4);

    /// Rasterize one primitive with the last uploaded model matrix.
    fn draw(&mut self, primitive: Primitive, color: Color);

    fn end_frame(&mut self) {}
}

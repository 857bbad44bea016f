//! Backends that keep draw traffic in memory instead of rasterizing it.
//!
//! [`DrawRecorder`] captures every call of the last frame (used by tests and
//! the headless flight). [`FrameStats`] only counts, and is what the windowed
//! binary drives while no GPU backend is attached.

use std::collections::HashMap;

use engine_core::Color;
use glam::Mat4;

use crate::backend::{FrameUniforms, InstanceData, Primitive, RenderBackend};

/// One recorded draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub primitive: Primitive,
    pub color: Color,
    pub model: Mat4,
}

impl DrawCall {
    pub fn instance(&self) -> InstanceData {
        InstanceData::new(&self.model, self.color)
    }
}

/// Records the uniforms and draw calls of the most recent frame.
#[derive(Debug, Default)]
pub struct DrawRecorder {
    uniforms: Option<FrameUniforms>,
    model: Mat4,
    calls: Vec<DrawCall>,
    frames: u64,
}

impl DrawRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uniforms passed to the last `begin_frame`, if any.
    pub fn uniforms(&self) -> Option<&FrameUniforms> {
        self.uniforms.as_ref()
    }

    /// Draw calls since the last `begin_frame`.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn count(&self, primitive: Primitive) -> usize {
        self.calls.iter().filter(|c| c.primitive == primitive).count()
    }

    /// Recorded draws packed for an instance buffer.
    pub fn instances(&self) -> Vec<InstanceData> {
        self.calls.iter().map(DrawCall::instance).collect()
    }

    /// Size of the last frame's instance buffer in bytes.
    pub fn instance_bytes(&self) -> usize {
        let instances = self.instances();
        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        bytes.len()
    }
}

impl RenderBackend for DrawRecorder {
    fn begin_frame(&mut self, uniforms: &FrameUniforms) {
        self.uniforms = Some(*uniforms);
        self.model = Mat4::IDENTITY;
        self.calls.clear();
    }

    fn upload_model(&mut self, model: &Mat4) {
        self.model = *model;
    }

    fn draw(&mut self, primitive: Primitive, color: Color) {
        self.calls.push(DrawCall {
            primitive,
            color,
            model: self.model,
        });
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

/// Counts draws per primitive and reports them periodically.
#[derive(Debug)]
pub struct FrameStats {
    /// Log a summary every this many frames (0 disables logging).
    pub report_every: u64,
    frames: u64,
    frame_draws: HashMap<Primitive, usize>,
    total_draws: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(300)
    }
}

impl FrameStats {
    pub fn new(report_every: u64) -> Self {
        Self {
            report_every,
            frames: 0,
            frame_draws: HashMap::new(),
            total_draws: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn total_draws(&self) -> u64 {
        self.total_draws
    }

    /// Draws of `primitive` in the current (or last finished) frame.
    pub fn frame_draws(&self, primitive: Primitive) -> usize {
        self.frame_draws.get(&primitive).copied().unwrap_or(0)
    }
}

impl RenderBackend for FrameStats {
    fn begin_frame(&mut self, _uniforms: &FrameUniforms) {
        self.frame_draws.clear();
    }

    fn upload_model(&mut self, _model: &Mat4) {}

    fn draw(&mut self, primitive: Primitive, _color: Color) {
        *self.frame_draws.entry(primitive).or_insert(0) += 1;
        self.total_draws += 1;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
        if self.report_every > 0 && self.frames % self.report_every == 0 {
            let per_primitive: Vec<String> = Primitive::ALL
                .iter()
                .map(|&p| format!("{:?} {}", p, self.frame_draws(p)))
                .collect();
            log::info!(
                "frame {}: {} ({} draws total)",
                self.frames,
                per_primitive.join(", "),
                self.total_draws
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_clears_on_begin_frame() {
        let mut recorder = DrawRecorder::new();
        recorder.begin_frame(&FrameUniforms::default());
        recorder.draw(Primitive::Cube, [1.0; 4]);
        recorder.end_frame();
        assert_eq!(recorder.calls().len(), 1);

        recorder.begin_frame(&FrameUniforms::default());
        assert!(recorder.calls().is_empty());
        assert_eq!(recorder.frames(), 1);
    }

    #[test]
    fn instance_bytes_cover_every_draw() {
        let mut recorder = DrawRecorder::new();
        recorder.begin_frame(&FrameUniforms::default());
        recorder.upload_model(&Mat4::from_translation(glam::Vec3::X));
        recorder.draw(Primitive::Cube, [1.0; 4]);
        recorder.draw(Primitive::Sphere, [0.5; 4]);
        assert_eq!(recorder.instance_bytes(), 2 * 80);
        assert_eq!(recorder.instances()[1].model[3], [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn stats_count_per_frame_and_total() {
        let mut stats = FrameStats::new(0);
        for _ in 0..2 {
            stats.begin_frame(&FrameUniforms::default());
            stats.draw(Primitive::Sphere, [1.0; 4]);
            stats.draw(Primitive::Sphere, [1.0; 4]);
            stats.draw(Primitive::Cylinder, [1.0; 4]);
            stats.end_frame();
        }
        assert_eq!(stats.frames(), 2);
        assert_eq!(stats.frame_draws(Primitive::Sphere), 2);
        assert_eq!(stats.frame_draws(Primitive::Cube), 0);
        assert_eq!(stats.total_draws(), 6);
    }
}

//! Draw context: the transform stack paired with a backend for one draw pass.

use engine_core::{Color, Mat4, TransformStack, Vec3};

use crate::backend::{Primitive, RenderBackend};

/// Everything a scene part needs to emit its geometry.
///
/// Nested parts are drawn through [`DrawContext::scoped`], which pushes the
/// stack before the closure runs and pops it afterwards on every exit path.
/// Operators applied outside a scope mutate the caller's frame, so a part
/// drawn last in a sequence may skip its own scope.
pub struct DrawContext<'a, B: RenderBackend + ?Sized> {
    stack: &'a mut TransformStack,
    backend: &'a mut B,
}

impl<'a, B: RenderBackend + ?Sized> DrawContext<'a, B> {
    pub fn new(stack: &'a mut TransformStack, backend: &'a mut B) -> Self {
        Self { stack, backend }
    }

    /// Run `f` one stack level deeper.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut DrawContext<'_, B>) -> R) -> R {
        let mut scope = self.stack.scope();
        let mut inner = DrawContext {
            stack: &mut *scope,
            backend: &mut *self.backend,
        };
        f(&mut inner)
    }

    /// The composed model transform at this point of the pass.
    pub fn current(&self) -> Mat4 {
        self.stack.current()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn translate(&mut self, offset: impl Into<Vec3>) {
        self.stack.translate(offset.into());
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.stack.rotate_x(degrees);
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.stack.rotate_y(degrees);
    }

    pub fn rotate_z(&mut self, degrees: f32) {
        self.stack.rotate_z(degrees);
    }

    pub fn scale(&mut self, factors: impl Into<Vec3>) {
        self.stack.scale(factors.into());
    }

    /// Upload the current transform and draw one primitive with it.
    pub fn draw(&mut self, primitive: Primitive, color: Color) {
        let model = self.stack.current();
        self.backend.upload_model(&model);
        self.backend.draw(primitive, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::DrawRecorder;

    #[test]
    fn scoped_restores_depth_and_matrix() {
        let mut stack = TransformStack::new();
        let mut recorder = DrawRecorder::new();
        let mut ctx = DrawContext::new(&mut stack, &mut recorder);
        ctx.translate([1.0, 0.0, 0.0]);
        let before = ctx.current();

        let depth_inside = ctx.scoped(|ctx| {
            ctx.rotate_y(90.0);
            ctx.scale([2.0, 2.0, 2.0]);
            ctx.scoped(|ctx| ctx.depth())
        });

        assert_eq!(depth_inside, 3);
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.current(), before);
    }

    #[test]
    fn draw_uploads_current_transform() {
        let mut stack = TransformStack::new();
        let mut recorder = DrawRecorder::new();
        {
            let mut ctx = DrawContext::new(&mut stack, &mut recorder);
            ctx.scoped(|ctx| {
                ctx.translate([0.0, 3.0, 0.0]);
                ctx.draw(Primitive::Cube, [1.0, 1.0, 1.0, 1.0]);
            });
            ctx.draw(Primitive::Sphere, [0.0, 0.0, 0.0, 1.0]);
        }
        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].primitive, Primitive::Cube);
        assert_eq!(calls[0].model.w_axis.y, 3.0);
        assert_eq!(calls[1].model, Mat4::IDENTITY);
    }

    #[test]
    fn works_through_trait_object() {
        let mut stack = TransformStack::new();
        let mut recorder = DrawRecorder::new();
        let backend: &mut dyn RenderBackend = &mut recorder;
        let mut ctx = DrawContext::new(&mut stack, backend);
        ctx.scoped(|ctx| ctx.draw(Primitive::Cylinder, [0.5; 4]));
        assert_eq!(recorder.calls().len(), 1);
    }
}

//! Model-view transform stack and utilities for hierarchical positioning.

use std::ops::{Deref, DerefMut};

use glam::{Mat4, Vec3};

use crate::error::StackError;

/// A stack of 4x4 model-view matrices.
///
/// The bottom entry is the base transform and is never removed. Every
/// operator right-multiplies the top entry, so calls read in the same order
/// as a path down the scene graph.
#[derive(Debug, Clone)]
pub struct TransformStack {
    frames: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Create a stack holding only the identity base.
    pub fn new() -> Self {
        Self {
            frames: vec![Mat4::IDENTITY],
        }
    }

    /// Number of entries, including the base.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The composed transform on top of the stack.
    pub fn current(&self) -> Mat4 {
        *self.top()
    }

    /// Duplicate the top transform.
    pub fn push(&mut self) {
        let top = self.current();
        self.frames.push(top);
    }

    /// Discard the top transform, restoring the one below it.
    pub fn pop(&mut self) -> Result<(), StackError> {
        if self.frames.len() <= 1 {
            return Err(StackError::Unbalanced {
                depth: self.frames.len(),
            });
        }
        self.frames.pop();
        Ok(())
    }

    /// Push and return a guard that restores the current depth when dropped.
    pub fn scope(&mut self) -> StackScope<'_> {
        let restore_depth = self.depth();
        self.push();
        StackScope {
            stack: self,
            restore_depth,
        }
    }

    /// Replace the top transform.
    pub fn load(&mut self, matrix: Mat4) {
        *self.top_mut() = matrix;
    }

    /// Replace the top transform with the identity.
    pub fn load_identity(&mut self) {
        self.load(Mat4::IDENTITY);
    }

    /// Drop everything above the base and reset the base to the identity.
    pub fn reset(&mut self) {
        self.frames.truncate(1);
        self.load_identity();
    }

    /// Right-multiply the top by an arbitrary matrix.
    pub fn multiply(&mut self, matrix: Mat4) {
        let top = self.top_mut();
        *top *= matrix;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    /// Rotate about the local X axis, angle in degrees.
    pub fn rotate_x(&mut self, degrees: f32) {
        self.multiply(Mat4::from_rotation_x(degrees.to_radians()));
    }

    /// Rotate about the local Y axis, angle in degrees.
    pub fn rotate_y(&mut self, degrees: f32) {
        self.multiply(Mat4::from_rotation_y(degrees.to_radians()));
    }

    /// Rotate about the local Z axis, angle in degrees.
    pub fn rotate_z(&mut self, degrees: f32) {
        self.multiply(Mat4::from_rotation_z(degrees.to_radians()));
    }

    /// Non-uniform scale. Negative components mirror.
    pub fn scale(&mut self, factors: Vec3) {
        self.multiply(Mat4::from_scale(factors));
    }

    fn top(&self) -> &Mat4 {
        // The base entry is never removed.
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Mat4 {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}

/// Scoped stack frame returned by [`TransformStack::scope`].
///
/// Derefs to the stack so nested parts can keep composing; on drop the
/// stack is truncated back to the depth it had before the push.
#[derive(Debug)]
pub struct StackScope<'a> {
    stack: &'a mut TransformStack,
    restore_depth: usize,
}

impl Deref for StackScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &Self::Target {
        self.stack
    }
}

impl DerefMut for StackScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.stack
    }
}

impl Drop for StackScope<'_> {
    fn drop(&mut self) {
        if self.stack.frames.len() < self.restore_depth + 1 {
            log::error!(
                "transform scope closed at depth {} (expected at least {})",
                self.stack.frames.len(),
                self.restore_depth + 1
            );
        }
        self.stack.frames.truncate(self.restore_depth.max(1));
    }
}

/// Transform a point (w = 1) by a matrix.
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    matrix.transform_point3(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn new_stack_is_identity_at_depth_one() {
        let stack = TransformStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }

    #[test]
    fn pop_on_base_is_unbalanced() {
        let mut stack = TransformStack::new();
        assert_eq!(stack.pop(), Err(StackError::Unbalanced { depth: 1 }));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn push_pop_restores_matrix() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::new(1.0, 2.0, 3.0));
        let before = stack.current();

        stack.push();
        stack.rotate_y(45.0);
        stack.scale(Vec3::splat(2.0));
        stack.push();
        stack.rotate_x(10.0);
        stack.pop().unwrap();
        stack.pop().unwrap();

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), before);
    }

    #[test]
    fn operators_right_multiply() {
        let mut stack = TransformStack::new();
        stack.rotate_y(90.0);
        stack.translate(Vec3::X);
        // Local +X after a 90 degree yaw points along world -Z.
        let p = transform_point(&stack.current(), Vec3::ZERO);
        assert!((p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn rotate_z_uses_degrees() {
        let mut stack = TransformStack::new();
        stack.rotate_z(90.0);
        let p = transform_point(&stack.current(), Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn negative_scale_mirrors() {
        let mut stack = TransformStack::new();
        stack.scale(Vec3::new(1.0, 1.0, -1.0));
        let p = transform_point(&stack.current(), Vec3::new(0.0, 0.0, 0.8));
        assert!((p.z + 0.8).abs() < 1e-6);
    }

    #[test]
    fn scope_restores_on_drop() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::Y);
        let before = stack.current();
        {
            let mut scope = stack.scope();
            assert_eq!(scope.depth(), 2);
            scope.rotate_x(30.0);
            scope.push();
            scope.scale(Vec3::splat(3.0));
            // Inner push left unmatched on purpose; the guard still unwinds it.
        }
        assert_eq!(stack.depth(), 1);
        assert!(approx_eq(stack.current(), before));
    }

    #[test]
    fn scope_restores_on_early_return() {
        fn draw_part(stack: &mut TransformStack, bail: bool) -> Option<Mat4> {
            let mut scope = stack.scope();
            scope.translate(Vec3::X);
            if bail {
                return None;
            }
            Some(scope.current())
        }

        let mut stack = TransformStack::new();
        assert!(draw_part(&mut stack, true).is_none());
        assert_eq!(stack.depth(), 1);
        assert!(draw_part(&mut stack, false).is_some());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }

    #[test]
    fn reset_drops_all_frames() {
        let mut stack = TransformStack::new();
        stack.translate(Vec3::Z);
        stack.push();
        stack.push();
        stack.reset();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }

    #[test]
    fn load_replaces_top_only() {
        let mut stack = TransformStack::new();
        stack.push();
        let m = Mat4::from_translation(Vec3::new(4.0, 0.0, 0.0));
        stack.load(m);
        assert_eq!(stack.current(), m);
        stack.pop().unwrap();
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }
}

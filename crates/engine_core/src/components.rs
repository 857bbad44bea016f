//! Small value types shared by animated scene entities.

/// RGBA colour with components in 0..=1.
pub type Color = [f32; 4];

/// Move `current` a fixed fraction of the way toward `target`.
///
/// Applied once per update call; the blend does not depend on frame time.
/// Once the step is too small to change an `f32`, the value lands on the target.
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    let next = current + (target - current) * factor;
    if next == current && factor > 0.0 {
        target
    } else {
        next
    }
}

/// Age-based lifetime for temporary entities (dropped boxes, effects).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub age: f32,
    pub max_age: f32,
}

impl Lifetime {
    pub fn new(max_age: f32) -> Self {
        Self { age: 0.0, max_age }
    }

    /// Advance the age. Returns true while still alive.
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.is_alive()
    }

    /// Alive while the age has not passed the budget (inclusive).
    pub fn is_alive(&self) -> bool {
        self.age <= self.max_age
    }
}

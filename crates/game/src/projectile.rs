//! Boxes dropped by the helicopter: free fall, floor contact and expiry.

use engine_core::{approach, Color, Lifetime};
use glam::Vec3;
use rand::Rng;
use renderer::{DrawContext, Primitive, RenderBackend};

/// Edge length of a dropped box.
pub const BOX_SIZE: f32 = 1.1;
/// Seconds a box stays in the world.
pub const MAX_LIFETIME: f32 = 5.0;
/// Height lost per update on top of the carried velocity.
const FALL_PER_UPDATE: f32 = 0.4;
/// Horizontal slowdown per update while resting on the floor.
const FLOOR_DAMPING: f32 = 0.1;

/// A dropped box.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    lifetime: Lifetime,
    floor: f32,
}

impl Projectile {
    /// Spawn a box with a random opaque colour.
    pub fn new(position: Vec3, velocity: Vec3, floor: f32, rng: &mut impl Rng) -> Self {
        let color = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>(), 1.0];
        Self::with_color(position, velocity, floor, color)
    }

    pub fn with_color(position: Vec3, velocity: Vec3, floor: f32, color: Color) -> Self {
        Self {
            position,
            velocity,
            color,
            lifetime: Lifetime::new(MAX_LIFETIME),
            floor,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime.is_alive()
    }

    /// Resting on the floor height.
    #[cfg(test)]
    pub fn is_grounded(&self) -> bool {
        self.position.y <= self.floor
    }

    pub fn update(&mut self, dt: f32) {
        self.lifetime.update(dt);
        self.position.y -= FALL_PER_UPDATE;
        self.position += self.velocity;

        if self.position.y < self.floor {
            self.velocity = Vec3::new(
                approach(self.velocity.x, 0.0, FLOOR_DAMPING),
                0.0,
                approach(self.velocity.z, 0.0, FLOOR_DAMPING),
            );
        }
        self.position.y = self.position.y.max(self.floor);
    }

    pub fn draw<B: RenderBackend + ?Sized>(&self, ctx: &mut DrawContext<'_, B>) {
        ctx.scoped(|ctx| {
            ctx.translate(self.position);
            ctx.translate([0.0, BOX_SIZE / 2.0, 0.0]);
            ctx.scale(Vec3::splat(BOX_SIZE));
            ctx.draw(Primitive::Cube, self.color);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::TransformStack;
    use rand::{rngs::StdRng, SeedableRng};
    use renderer::DrawRecorder;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn random_color_is_opaque_and_seeded() {
        let a = Projectile::new(Vec3::ZERO, Vec3::ZERO, 0.0, &mut StdRng::seed_from_u64(5));
        let b = Projectile::new(Vec3::ZERO, Vec3::ZERO, 0.0, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.color, b.color);
        assert_eq!(a.color[3], 1.0);
        assert!(a.color[..3].iter().all(|c| (0.0..1.0).contains(c)));
    }

    #[test]
    fn falls_by_fixed_step_plus_velocity() {
        let mut p = Projectile::with_color(
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::new(1.0, 0.5, 0.0),
            0.0,
            [1.0; 4],
        );
        p.update(DT);
        assert!((p.position - Vec3::new(1.0, 20.1, 0.0)).length() < 1e-5);
    }

    #[test]
    fn never_goes_below_floor() {
        let mut p = Projectile::with_color(
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(0.3, -2.0, 0.2),
            0.0,
            [1.0; 4],
        );
        let mut landed = false;
        for _ in 0..300 {
            p.update(DT);
            assert!(p.position.y >= 0.0);
            if landed {
                assert_eq!(p.position.y, 0.0);
            }
            landed |= p.is_grounded();
        }
        assert!(landed);
    }

    #[test]
    fn horizontal_velocity_decays_on_floor() {
        let mut p = Projectile::with_color(Vec3::ZERO, Vec3::new(2.0, 0.0, -1.0), 0.0, [1.0; 4]);
        p.update(DT);
        assert_eq!(p.velocity.y, 0.0);
        assert!((p.velocity.x - 1.8).abs() < 1e-5);
        for _ in 0..200 {
            p.update(DT);
        }
        assert!(p.velocity.x.abs() < 1e-6);
        assert!(p.velocity.z.abs() < 1e-6);
    }

    #[test]
    fn floor_is_respected_when_not_zero() {
        let mut p = Projectile::with_color(Vec3::new(0.0, 12.0, 0.0), Vec3::ZERO, 10.0, [1.0; 4]);
        for _ in 0..20 {
            p.update(DT);
        }
        assert_eq!(p.position.y, 10.0);
    }

    #[test]
    fn expires_after_lifetime() {
        let mut p = Projectile::with_color(Vec3::ZERO, Vec3::ZERO, 0.0, [1.0; 4]);
        p.update(MAX_LIFETIME);
        assert!(p.is_alive());
        p.update(0.01);
        assert!(!p.is_alive());
    }

    #[test]
    fn draw_sits_box_on_its_position() {
        let p = Projectile::with_color(Vec3::new(4.0, 0.0, -2.0), Vec3::ZERO, 0.0, [0.2; 4]);
        let mut stack = TransformStack::new();
        let mut recorder = DrawRecorder::new();
        {
            let mut ctx = DrawContext::new(&mut stack, &mut recorder);
            p.draw(&mut ctx);
        }
        assert_eq!(stack.depth(), 1);
        let call = recorder.calls()[0];
        assert_eq!(call.primitive, Primitive::Cube);
        let bottom = call.model.transform_point3(Vec3::new(0.0, -0.5, 0.0));
        assert!((bottom - Vec3::new(4.0, 0.0, -2.0)).length() < 1e-5);
    }
}

//! Procedural buildings: a pillared tower with a roof slab and a narrower
//! second tier on top.

use engine_core::Color;
use glam::Vec3;
use rand::Rng;
use renderer::{DrawContext, Primitive, RenderBackend};

/// Primary tier height range (integer metres, upper bound exclusive).
pub const TOWER_HEIGHT_RANGE: (u32, u32) = (30, 50);
/// Secondary tier height range.
pub const UPPER_TIER_HEIGHT_RANGE: (u32, u32) = (10, 30);

/// Footprint edge of the primary tier.
pub const FOOTPRINT: f32 = 15.0;
const ROOF_SIZE: f32 = FOOTPRINT + 1.0;
const ROOF_HEIGHT: f32 = 1.0;

const PILLARS_PER_FACE: usize = 10;
const CORNER_PILLAR_SIZE: f32 = 0.8;
const PILLAR_SIZE: f32 = 0.5;

/// Horizontal shrink of the secondary tier.
const UPPER_TIER_SCALE: f32 = 0.7;

/// Glass tones for tower bodies.
pub const BODY_PALETTE: [Color; 4] = [
    [0.28, 0.6, 0.8, 1.0],
    [0.47, 0.73, 0.89, 1.0],
    [0.5, 0.67, 0.78, 1.0],
    [0.67, 0.85, 0.93, 1.0],
];

/// Dark tones for pillars and roofs.
pub const DECOR_PALETTE: [Color; 5] = [
    [0.12, 0.145, 0.16, 1.0],
    [0.12, 0.22, 0.28, 1.0],
    [0.29, 0.34, 0.46, 1.0],
    [0.012, 0.11, 0.15, 1.0],
    [0.21, 0.233, 0.24, 1.0],
];

/// One building. Randomized once at generation, immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    position: Vec3,
    body_color: Color,
    decor_color: Color,
    height: f32,
    upper_height: f32,
}

impl Structure {
    /// Generate a building standing at `position`.
    pub fn generate(position: Vec3, rng: &mut impl Rng) -> Self {
        let body_color = BODY_PALETTE[rng.gen_range(0..BODY_PALETTE.len())];
        let decor_color = DECOR_PALETTE[rng.gen_range(0..DECOR_PALETTE.len())];
        let height = rng.gen_range(TOWER_HEIGHT_RANGE.0..TOWER_HEIGHT_RANGE.1) as f32;
        let upper_height =
            rng.gen_range(UPPER_TIER_HEIGHT_RANGE.0..UPPER_TIER_HEIGHT_RANGE.1) as f32;

        Self {
            position,
            body_color,
            decor_color,
            height,
            upper_height,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn body_color(&self) -> Color {
        self.body_color
    }

    pub fn decor_color(&self) -> Color {
        self.decor_color
    }

    /// Height of the primary tier.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Height of the secondary tier (0 = none).
    pub fn upper_height(&self) -> f32 {
        self.upper_height
    }

    /// Roof line of the whole building.
    pub fn total_height(&self) -> f32 {
        let upper = if self.upper_height > 0.0 {
            self.upper_height + ROOF_HEIGHT
        } else {
            ROOF_HEIGHT
        };
        self.height + upper
    }

    pub fn draw<B: RenderBackend + ?Sized>(&self, ctx: &mut DrawContext<'_, B>) {
        ctx.scoped(|ctx| {
            ctx.translate(self.position);
            ctx.scoped(|ctx| self.draw_tier(ctx, self.height));

            if self.upper_height > 0.0 {
                ctx.translate([0.0, self.height, 0.0]);
                ctx.scale([UPPER_TIER_SCALE, 1.0, UPPER_TIER_SCALE]);
                self.draw_tier(ctx, self.upper_height);
            }
        });
    }

    /// Roof, pillar faces and body of one tier. Leaves the body transform applied.
    fn draw_tier<B: RenderBackend + ?Sized>(&self, ctx: &mut DrawContext<'_, B>, height: f32) {
        ctx.scoped(|ctx| {
            ctx.translate([0.0, height + ROOF_HEIGHT / 2.0, 0.0]);
            ctx.scale([ROOF_SIZE, ROOF_HEIGHT, ROOF_SIZE]);
            ctx.draw(Primitive::Cube, self.decor_color);
        });

        for angle in [0.0, 90.0, 180.0, 270.0] {
            ctx.scoped(|ctx| self.draw_face(ctx, angle, height));
        }

        ctx.translate([0.0, height / 2.0, 0.0]);
        ctx.scale([FOOTPRINT, height, FOOTPRINT]);
        ctx.draw(Primitive::Cube, self.body_color);
    }

    /// A row of pillars along one face, the first one thicker.
    fn draw_face<B: RenderBackend + ?Sized>(
        &self,
        ctx: &mut DrawContext<'_, B>,
        angle: f32,
        height: f32,
    ) {
        ctx.rotate_y(angle);
        for i in 0..PILLARS_PER_FACE {
            ctx.scoped(|ctx| {
                let x = i as f32 * FOOTPRINT / PILLARS_PER_FACE as f32 - FOOTPRINT / 2.0;
                ctx.translate([x, height / 2.0, -FOOTPRINT / 2.0]);
                let size = if i == 0 { CORNER_PILLAR_SIZE } else { PILLAR_SIZE };
                ctx.scale([size, height, size]);
                ctx.draw(Primitive::Cube, self.decor_color);
            });
        }
    }
}

/// Draw calls one tier emits: roof, four faces of pillars, body.
pub const DRAWS_PER_TIER: usize = 1 + 4 * PILLARS_PER_FACE + 1;

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::TransformStack;
    use rand::{rngs::StdRng, SeedableRng};
    use renderer::DrawRecorder;

    #[test]
    fn generated_parameters_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let s = Structure::generate(Vec3::ZERO, &mut rng);
            assert!(s.height() >= 30.0 && s.height() < 50.0);
            assert!(s.upper_height() >= 10.0 && s.upper_height() < 30.0);
            assert_eq!(s.height().fract(), 0.0);
            assert!(BODY_PALETTE.contains(&s.body_color()));
            assert!(DECOR_PALETTE.contains(&s.decor_color()));
        }
    }

    #[test]
    fn same_seed_same_building() {
        let a = Structure::generate(Vec3::X, &mut StdRng::seed_from_u64(42));
        let b = Structure::generate(Vec3::X, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn draw_emits_two_tiers_and_balances_stack() {
        let s = Structure::generate(Vec3::new(-50.0, 0.0, 50.0), &mut StdRng::seed_from_u64(1));
        let mut stack = TransformStack::new();
        let mut recorder = DrawRecorder::new();
        {
            let mut ctx = DrawContext::new(&mut stack, &mut recorder);
            s.draw(&mut ctx);
        }
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), glam::Mat4::IDENTITY);
        assert_eq!(recorder.calls().len(), 2 * DRAWS_PER_TIER);

        // First draw is the primary roof: centred on the building, just above the tier.
        let roof = recorder.calls()[0].model.transform_point3(Vec3::ZERO);
        let expected = Vec3::new(-50.0, s.height() + 0.5, 50.0);
        assert!((roof - expected).length() < 1e-3);

        // Last draw is the upper tier body, narrowed by the tier scale.
        let body = recorder.calls().last().unwrap();
        assert_eq!(body.color, s.body_color());
        assert!((body.model.x_axis.x - FOOTPRINT * UPPER_TIER_SCALE).abs() < 1e-4);
    }

    #[test]
    fn corner_pillar_is_thicker() {
        let s = Structure::generate(Vec3::ZERO, &mut StdRng::seed_from_u64(3));
        let mut stack = TransformStack::new();
        let mut recorder = DrawRecorder::new();
        {
            let mut ctx = DrawContext::new(&mut stack, &mut recorder);
            s.draw(&mut ctx);
        }
        let calls = recorder.calls();
        // calls[1] is the first pillar of the first face, calls[2] the next one.
        assert!((calls[1].model.x_axis.length() - CORNER_PILLAR_SIZE).abs() < 1e-4);
        assert!((calls[2].model.x_axis.length() - PILLAR_SIZE).abs() < 1e-4);
    }
}

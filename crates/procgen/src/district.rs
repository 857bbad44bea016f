//! City district: fixed building layout, ring road, radial roads and ground slab.

use engine_core::Color;
use glam::Vec3;
use rand::{rngs::StdRng, SeedableRng};
use renderer::{DrawContext, Primitive, RenderBackend};

use crate::structure::Structure;

/// Radius of the circular flight path the ring road is laid around.
pub const ORBIT_RADIUS: f32 = 30.0;

const FLOOR_SIZE: f32 = 140.0;
const FLOOR_HEIGHT: f32 = 5.0;
const FLOOR_COLOR: Color = [0.64, 0.67, 0.68, 1.0];

const ROAD_WIDTH: f32 = 20.0;
const ROAD_COLOR: Color = [0.23, 0.27, 0.27, 1.0];

/// Ground level; nothing simulated goes below it.
pub const DISTRICT_MIN_HEIGHT: f32 = 0.0;
/// Flight ceiling.
pub const DISTRICT_MAX_HEIGHT: f32 = 50.0;

/// Building footprint centres. One in the middle, three per corner cluster.
pub const STRUCTURE_SITES: [[f32; 3]; 10] = [
    [0.0, 0.0, 0.0],
    [-50.0, 0.0, 50.0],
    [-30.0, 0.0, 50.0],
    [-50.0, 0.0, 30.0],
    [50.0, 0.0, -50.0],
    [30.0, 0.0, -50.0],
    [50.0, 0.0, -30.0],
    [-50.0, 0.0, -50.0],
    [-30.0, 0.0, -50.0],
    [-50.0, 0.0, -30.0],
];

/// Vertical limits shared with everything that moves in the district.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBounds {
    pub min: f32,
    pub max: f32,
}

impl HeightBounds {
    pub fn clamp(&self, y: f32) -> f32 {
        y.clamp(self.min, self.max)
    }

    pub fn contains(&self, y: f32) -> bool {
        (self.min..=self.max).contains(&y)
    }
}

/// The whole static city.
#[derive(Debug, Clone)]
pub struct District {
    seed: u64,
    structures: Vec<Structure>,
    bounds: HeightBounds,
}

impl District {
    /// Generate the district; the seed picks building colours and heights.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let structures: Vec<Structure> = STRUCTURE_SITES
            .iter()
            .map(|&site| Structure::generate(Vec3::from(site), &mut rng))
            .collect();

        let tallest = structures
            .iter()
            .map(Structure::total_height)
            .fold(0.0_f32, f32::max);
        log::info!(
            "Generated district (seed {}): {} structures, tallest {:.0}m",
            seed,
            structures.len(),
            tallest
        );

        Self {
            seed,
            structures,
            bounds: HeightBounds {
                min: DISTRICT_MIN_HEIGHT,
                max: DISTRICT_MAX_HEIGHT,
            },
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    pub fn bounds(&self) -> HeightBounds {
        self.bounds
    }

    pub fn min_height(&self) -> f32 {
        self.bounds.min
    }

    pub fn max_height(&self) -> f32 {
        self.bounds.max
    }

    pub fn draw<B: RenderBackend + ?Sized>(&self, ctx: &mut DrawContext<'_, B>) {
        ctx.scoped(|ctx| {
            for structure in &self.structures {
                structure.draw(ctx);
            }
        });
        ctx.scoped(|ctx| Self::draw_roads(ctx));
        ctx.scoped(|ctx| Self::draw_floor(ctx));
    }

    /// Plaza disc, ring road and four radial roads out to the slab edge.
    fn draw_roads<B: RenderBackend + ?Sized>(ctx: &mut DrawContext<'_, B>) {
        let inner = 2.0 * ORBIT_RADIUS - ROAD_WIDTH / 2.0;
        let outer = 2.0 * ORBIT_RADIUS + ROAD_WIDTH / 2.0;

        ctx.scoped(|ctx| {
            ctx.scale([inner, 0.02, inner]);
            ctx.draw(Primitive::Cylinder, FLOOR_COLOR);
        });
        ctx.scoped(|ctx| {
            ctx.scale([outer, 0.01, outer]);
            ctx.draw(Primitive::Cylinder, ROAD_COLOR);
        });

        for angle in [0.0, 90.0, 180.0, 270.0] {
            ctx.scoped(|ctx| {
                ctx.rotate_y(angle);
                ctx.translate([outer / 2.0, 0.0, 0.0]);
                ctx.scale([FLOOR_SIZE - outer, 0.01, ROAD_WIDTH / 2.0]);
                ctx.draw(Primitive::Cube, ROAD_COLOR);
            });
        }
    }

    fn draw_floor<B: RenderBackend + ?Sized>(ctx: &mut DrawContext<'_, B>) {
        ctx.translate([0.0, -FLOOR_HEIGHT / 2.0, 0.0]);
        ctx.scale([FLOOR_SIZE, FLOOR_HEIGHT, FLOOR_SIZE]);
        ctx.draw(Primitive::Cube, FLOOR_COLOR);
    }
}

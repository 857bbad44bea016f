//! The helicopter: orbit flight model, rotor animation and box drops.
//!
//! Flight is constrained to a circle of [`ORBIT_RADIUS`] around the district
//! centre. Forward speed advances the yaw around that circle, vertical speed
//! changes altitude. Every smoothed quantity moves a fixed fraction toward its
//! target per update call, independent of frame time.

use engine_core::{approach, transform_point, Color};
use glam::{Mat4, Vec3};
use rand::{rngs::StdRng, SeedableRng};
use renderer::{DrawContext, Primitive, RenderBackend};

use procgen::{HeightBounds, ORBIT_RADIUS};

use crate::projectile::Projectile;

/// Heading of the body relative to the orbit tangent, degrees.
const START_ORIENTATION: f32 = 270.0;
/// Fraction of the remaining gap closed per update.
pub const SMOOTH_FACTOR: f32 = 0.01;
/// Nose-down pitch while flying forward, degrees.
pub const MAX_INCLINATION: f32 = 30.0;
/// Below this altitude forward flight is refused.
pub const MIN_FORWARD_ALTITUDE: f32 = 1.0;
/// Rotor spin at full power, degrees per update.
pub const ROTOR_SPEED: f32 = 60.0;

/// Nose reference point in body space (the body points along -X).
const NOSE: Vec3 = Vec3::new(-2.0, 0.0, 0.0);
/// Body centre above the skids.
const BODY_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 0.0);

const HULL_COLOR: Color = [85.0 / 256.0, 107.0 / 256.0, 47.0 / 256.0, 1.0];
const ROTOR_COLOR: Color = [0.0, 0.0, 0.0, 1.0];
const MAST_COLOR: Color = [1.0, 1.0, 0.0, 1.0];
const STRUT_COLOR: Color = [0.5, 0.5, 0.5, 1.0];
const SKID_COLOR: Color = [1.0, 1.0, 0.0, 1.0];

const MAIN_ROTOR_LENGTH: f32 = 4.5;
const TAIL_ROTOR_LENGTH: f32 = 0.7;
const BLADE_HEIGHT: f32 = 0.02;
const BLADE_WIDTH: f32 = 0.4;
const BLADE_TILT: f32 = 15.0;
const MAST_SCALE: [f32; 3] = [0.1, 0.5, 0.1];

const BODY_SCALE: [f32; 3] = [5.0, 2.5, 2.5];
const TAIL_BOOM_OFFSET: [f32; 3] = [3.8, 0.4, 0.0];
const TAIL_BOOM_SCALE: [f32; 3] = [5.0, 0.7, 0.7];
const TAIL_END_OFFSET: [f32; 3] = [6.3, 0.8, 0.0];
const FIN_SCALE: [f32; 3] = [1.0, 0.5, 0.5];
const FIN_TILT: f32 = 70.0;
const TAIL_ROTOR_OFFSET: [f32; 3] = [0.0, 0.0, 0.4];

const STRUT_SCALE: [f32; 3] = [1.5, 0.2, 0.2];
const STRUT_TILT: f32 = -20.0;
const SKID_SCALE: [f32; 3] = [0.25, 5.0, 0.25];
const SKID_SIDE_OFFSET: f32 = 0.8;

/// Draw calls for the airframe alone (no boxes).
#[cfg(test)]
pub const AIRFRAME_DRAWS: usize = 18;

/// Helicopter flight state and the boxes it has dropped.
#[derive(Debug, Clone)]
pub struct Vehicle {
    /// Position in the orbit frame: x is the orbit radius, y the altitude.
    pub position: Vec3,
    /// Progress around the orbit, degrees.
    pub yaw: f32,
    /// Current forward pitch, degrees.
    pub inclination: f32,
    pub target_inclination: f32,
    pub velocity_x: f32,
    pub target_velocity_x: f32,
    pub velocity_y: f32,
    pub target_velocity_y: f32,
    /// Main rotor angle, degrees. The tail rotor shares it.
    pub rotor_angle: f32,
    pub rotor_velocity: f32,
    pub target_rotor_velocity: f32,
    bounds: HeightBounds,
    projectiles: Vec<Projectile>,
    rng: StdRng,
}

impl Vehicle {
    /// A landed helicopter on the orbit, rotors idle.
    pub fn new(bounds: HeightBounds, seed: u64) -> Self {
        Self {
            position: Vec3::new(ORBIT_RADIUS, bounds.min, 0.0),
            yaw: 0.0,
            inclination: 0.0,
            target_inclination: 0.0,
            velocity_x: 0.0,
            target_velocity_x: 0.0,
            velocity_y: 0.0,
            target_velocity_y: 0.0,
            rotor_angle: 0.0,
            rotor_velocity: 0.0,
            target_rotor_velocity: 0.0,
            bounds,
            projectiles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[cfg(test)]
    pub fn bounds(&self) -> HeightBounds {
        self.bounds
    }

    pub fn altitude(&self) -> f32 {
        self.position.y
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Set the forward speed to approach. Refused while too close to the ground.
    pub fn set_forward_target(&mut self, speed: f32) {
        self.target_velocity_x = if self.position.y < MIN_FORWARD_ALTITUDE {
            0.0
        } else {
            speed
        };

        if self.target_velocity_x != 0.0 {
            self.target_inclination = MAX_INCLINATION;
            self.target_rotor_velocity = ROTOR_SPEED;
        } else {
            self.target_inclination = 0.0;
        }
    }

    /// Set the climb rate to approach. Descending while landed idles the rotors.
    pub fn set_vertical_target(&mut self, speed: f32) {
        self.target_velocity_y = speed;
        if speed < 0.0 && self.position.y == self.bounds.min {
            self.target_rotor_velocity = 0.0;
        } else if speed != 0.0 {
            self.target_rotor_velocity = ROTOR_SPEED;
        }
    }

    /// Release a box at the current position, carrying the helicopter's velocity.
    pub fn drop_projectile(&mut self) {
        let projectile = Projectile::new(
            self.world_position(),
            self.world_velocity(),
            self.bounds.min,
            &mut self.rng,
        );
        log::debug!(
            "Dropped box at {:.1?} ({} live)",
            projectile.position,
            self.projectiles.len() + 1
        );
        self.projectiles.push(projectile);
    }

    pub fn update(&mut self, dt: f32) {
        self.inclination = approach(self.inclination, self.target_inclination, SMOOTH_FACTOR);

        self.rotor_velocity =
            approach(self.rotor_velocity, self.target_rotor_velocity, SMOOTH_FACTOR);
        self.rotor_angle = (self.rotor_angle + self.rotor_velocity).rem_euclid(360.0);

        // Arc length to angle on the orbit circle.
        self.yaw = (self.yaw + (self.velocity_x / ORBIT_RADIUS).to_degrees()).rem_euclid(360.0);

        self.velocity_x = approach(self.velocity_x, self.target_velocity_x, SMOOTH_FACTOR);
        self.velocity_y = approach(self.velocity_y, self.target_velocity_y, SMOOTH_FACTOR);
        self.position.y = self.bounds.clamp(self.position.y + self.velocity_y);

        self.projectiles.retain(Projectile::is_alive);
        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }
    }

    /// Orbit frame plus heading and pitch: the frame the airframe hangs from.
    fn airframe_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(START_ORIENTATION.to_radians())
            * Mat4::from_rotation_z(self.inclination.to_radians())
    }

    /// World transform of the body centre.
    pub fn model_matrix(&self) -> Mat4 {
        self.airframe_matrix() * Mat4::from_translation(BODY_OFFSET)
    }

    pub fn world_position(&self) -> Vec3 {
        transform_point(&self.model_matrix(), Vec3::ZERO)
    }

    pub fn nose_position(&self) -> Vec3 {
        transform_point(&self.model_matrix(), NOSE)
    }

    /// Displacement per update in world space.
    pub fn world_velocity(&self) -> Vec3 {
        let model = self.model_matrix();
        transform_point(&model, Vec3::new(-self.velocity_x, 0.0, 0.0))
            - transform_point(&model, Vec3::ZERO)
    }

    /// Unit heading in world space, from the body centre toward the nose.
    #[cfg(test)]
    pub fn forward_direction(&self) -> Vec3 {
        (self.nose_position() - self.world_position()).normalize_or_zero()
    }

    /// Chase camera base: looking from the body centre toward the nose.
    pub fn view_direction(&self) -> Mat4 {
        Mat4::look_at_rh(self.world_position(), self.nose_position(), Vec3::Y)
    }

    /// Draw the airframe, then every live box. Leaves the stack unchanged.
    pub fn draw<B: RenderBackend + ?Sized>(&self, ctx: &mut DrawContext<'_, B>) {
        ctx.scoped(|ctx| {
            ctx.rotate_y(self.yaw);
            ctx.translate(self.position);
            ctx.rotate_y(START_ORIENTATION);
            ctx.rotate_z(self.inclination);

            ctx.scoped(|ctx| {
                ctx.translate(BODY_OFFSET);

                ctx.scoped(|ctx| {
                    ctx.translate([0.0, 1.4, 0.0]);
                    draw_rotor(ctx, self.rotor_angle, MAIN_ROTOR_LENGTH);
                });
                ctx.scoped(|ctx| {
                    ctx.translate([0.0, 1.7, 0.0]);
                    draw_rotor(ctx, -self.rotor_angle + 90.0, MAIN_ROTOR_LENGTH);
                });
                ctx.scoped(|ctx| {
                    ctx.scale(BODY_SCALE);
                    ctx.draw(Primitive::Sphere, HULL_COLOR);
                });
                ctx.scoped(|ctx| {
                    ctx.translate(TAIL_BOOM_OFFSET);
                    ctx.scale(TAIL_BOOM_SCALE);
                    ctx.draw(Primitive::Sphere, HULL_COLOR);
                });
                self.draw_tail_end(ctx);
            });

            ctx.scoped(|ctx| {
                ctx.translate([0.0, 0.0, SKID_SIDE_OFFSET]);
                draw_landing_gear(ctx);
            });

            // Far side: mirror of the near gear.
            ctx.translate([0.0, 0.0, -SKID_SIDE_OFFSET]);
            ctx.scale([1.0, 1.0, -1.0]);
            draw_landing_gear(ctx);
        });

        for projectile in self.projectiles.iter().filter(|p| p.is_alive()) {
            projectile.draw(ctx);
        }
    }

    /// Vertical fin and tail rotor at the end of the boom.
    fn draw_tail_end<B: RenderBackend + ?Sized>(&self, ctx: &mut DrawContext<'_, B>) {
        ctx.translate(TAIL_END_OFFSET);
        ctx.scoped(|ctx| {
            ctx.rotate_z(FIN_TILT);
            ctx.scale(FIN_SCALE);
            ctx.draw(Primitive::Sphere, HULL_COLOR);
        });

        ctx.translate(TAIL_ROTOR_OFFSET);
        ctx.rotate_x(90.0);
        draw_rotor(ctx, self.rotor_angle, TAIL_ROTOR_LENGTH);
    }
}

/// Two opposed blades around a mast. Leaves the mast transform applied.
fn draw_rotor<B: RenderBackend + ?Sized>(ctx: &mut DrawContext<'_, B>, angle: f32, length: f32) {
    ctx.scoped(|ctx| {
        ctx.rotate_y(angle);
        ctx.rotate_x(BLADE_TILT);
        ctx.scoped(|ctx| draw_blade(ctx, length));
        ctx.rotate_y(180.0);
        draw_blade(ctx, length);
    });
    ctx.scale(MAST_SCALE);
    ctx.draw(Primitive::Cylinder, MAST_COLOR);
}

fn draw_blade<B: RenderBackend + ?Sized>(ctx: &mut DrawContext<'_, B>, length: f32) {
    ctx.translate([length / 2.0, 0.0, 0.0]);
    ctx.scale([length, BLADE_HEIGHT, BLADE_WIDTH]);
    ctx.draw(Primitive::Sphere, ROTOR_COLOR);
}

/// Skid bar with its two struts.
fn draw_landing_gear<B: RenderBackend + ?Sized>(ctx: &mut DrawContext<'_, B>) {
    ctx.scoped(|ctx| {
        ctx.rotate_z(90.0);
        ctx.scale(SKID_SCALE);
        ctx.draw(Primitive::Cylinder, SKID_COLOR);
    });
    ctx.scoped(|ctx| draw_strut(ctx, -1.0, 60.0));
    draw_strut(ctx, 1.0, 120.0);
}

fn draw_strut<B: RenderBackend + ?Sized>(ctx: &mut DrawContext<'_, B>, offset_x: f32, lean: f32) {
    ctx.translate([offset_x, 0.65, -0.2]);
    ctx.rotate_x(STRUT_TILT);
    ctx.rotate_z(lean);
    ctx.scale(STRUT_SCALE);
    ctx.draw(Primitive::Cube, STRUT_COLOR);
}

//! Scene controller: input commands in, one update-then-draw pass per frame out.

use engine_core::{FrameClock, TransformStack};
use glam::{Mat4, Vec2};
use input::{SceneInput, VerticalDirection};
use procgen::District;
use renderer::{Camera, DrawContext, FillMode, FrameUniforms, RenderBackend, SKY_COLOR};

use crate::config::SceneConfig;
use crate::vehicle::Vehicle;

/// View and frame state owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    pub camera: Camera,
    pub clock: FrameClock,
    pub fill_mode: FillMode,
}

/// What happened in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub delta_time: f32,
    pub fps: f32,
    pub altitude: f32,
    pub live_projectiles: usize,
}

/// Owns the world and drives it from input commands and frame callbacks.
pub struct SceneController {
    state: SceneState,
    district: District,
    vehicle: Vehicle,
    stack: TransformStack,
    /// Speed the movement keys ask for.
    vehicle_speed: f32,
    running: bool,
}

impl SceneController {
    pub fn new(config: &SceneConfig) -> Self {
        let district = District::generate(config.city_seed);
        let vehicle = Vehicle::new(district.bounds(), config.vehicle_seed);
        let state = SceneState {
            camera: Camera::new(config.aspect()),
            ..Default::default()
        };
        let mut controller = Self {
            state,
            district,
            vehicle,
            stack: TransformStack::new(),
            vehicle_speed: config.vehicle_speed,
            running: true,
        };
        if let Some((yaw, pitch)) = config.camera_angles {
            controller.handle(SceneInput::SetAngles { yaw, pitch });
        }
        controller
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn district(&self) -> &District {
        &self.district
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    #[cfg(test)]
    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    /// False once an exit command was handled.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn on_forward_key(&mut self, pressed: bool) {
        let speed = if pressed { self.vehicle_speed } else { 0.0 };
        self.vehicle.set_forward_target(speed);
    }

    pub fn on_vertical_key(&mut self, direction: VerticalDirection, pressed: bool) {
        let speed = match (pressed, direction) {
            (false, _) => 0.0,
            (true, VerticalDirection::Up) => self.vehicle_speed,
            (true, VerticalDirection::Down) => -self.vehicle_speed,
        };
        self.vehicle.set_vertical_target(speed);
    }

    pub fn on_drop_key(&mut self) {
        self.vehicle.drop_projectile();
    }

    /// Switch to preset `number` (1..=6). Returns false for unknown presets.
    pub fn on_projection_preset(&mut self, number: u8) -> bool {
        self.state.camera.apply_preset(number)
    }

    pub fn on_drag_start(&mut self, position: Vec2) {
        self.state.camera.begin_drag(position);
    }

    pub fn on_drag_move(&mut self, position: Vec2) {
        self.state.camera.drag_to(position);
    }

    pub fn on_drag_end(&mut self, _position: Vec2) {
        self.state.camera.end_drag();
    }

    pub fn on_zoom(&mut self, delta: f32) {
        self.state.camera.zoom(delta);
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.state.camera.set_aspect(width, height);
    }

    pub fn on_fill_mode(&mut self, fill_mode: FillMode) {
        self.state.fill_mode = fill_mode;
    }

    /// Set the view angles directly, in degrees.
    pub fn set_camera_angles(&mut self, yaw: f32, pitch: f32) {
        self.state.camera.set_yaw_pitch(yaw, pitch);
    }

    /// Dispatch one translated input event.
    pub fn handle(&mut self, command: SceneInput) {
        match command {
            SceneInput::Forward { pressed } => self.on_forward_key(pressed),
            SceneInput::Vertical { direction, pressed } => self.on_vertical_key(direction, pressed),
            SceneInput::Drop => self.on_drop_key(),
            SceneInput::ProjectionPreset(n) => {
                self.on_projection_preset(n);
            }
            SceneInput::Wireframe(on) => self.on_fill_mode(if on {
                FillMode::Wireframe
            } else {
                FillMode::Solid
            }),
            SceneInput::DragStart(p) => self.on_drag_start(p),
            SceneInput::DragMove(p) => self.on_drag_move(p),
            SceneInput::DragEnd(p) => self.on_drag_end(p),
            SceneInput::Zoom(delta) => self.on_zoom(delta),
            SceneInput::Resize { width, height } => self.on_resize(width, height),
            SceneInput::SetAngles { yaw, pitch } => self.set_camera_angles(yaw, pitch),
            SceneInput::Exit => {
                log::info!("Exit requested");
                self.running = false;
            }
        }
    }

    /// Projection and view for the current camera mode and vehicle pose.
    pub fn frame_uniforms(&self) -> FrameUniforms {
        let camera = &self.state.camera;
        let base: Mat4 = if camera.mode.is_chase() {
            self.vehicle.view_direction()
        } else {
            Camera::orbit_base()
        };
        FrameUniforms {
            projection: camera.projection_matrix(),
            view: camera.view_matrix(base),
            fill_mode: self.state.fill_mode,
            clear_color: SKY_COLOR,
        }
    }

    /// Advance the simulation to `timestamp_seconds` and draw the frame.
    pub fn on_frame<B: RenderBackend + ?Sized>(
        &mut self,
        timestamp_seconds: f64,
        backend: &mut B,
    ) -> FrameReport {
        let dt = self.state.clock.tick(timestamp_seconds);
        self.vehicle.update(dt);

        let uniforms = self.frame_uniforms();
        backend.begin_frame(&uniforms);

        self.stack.reset();
        {
            let mut ctx = DrawContext::new(&mut self.stack, &mut *backend);
            ctx.scoped(|ctx| self.vehicle.draw(ctx));
            self.district.draw(&mut ctx);
        }
        if self.stack.depth() != 1 {
            log::error!("transform stack left at depth {} after frame", self.stack.depth());
        }

        backend.end_frame();

        let report = FrameReport {
            frame: self.state.clock.frame_count(),
            delta_time: dt,
            fps: self.state.clock.fps(),
            altitude: self.vehicle.altitude(),
            live_projectiles: self.vehicle.projectiles().len(),
        };
        log::trace!("{:?}", report);
        report
    }
}

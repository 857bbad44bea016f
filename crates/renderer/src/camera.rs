//! Camera system: free orbit view and two chase views with orthographic presets.

use glam::{Mat4, Vec2, Vec3};

/// Distance the free-orbit camera starts at.
pub const DEFAULT_DISTANCE: f32 = 30.0;
/// Distance change per wheel notch.
pub const SCROLL_STEP: f32 = 5.0;
/// Drag sensitivity divisor (pixels per radian, scaled by distance).
const DRAG_DIVISOR: f32 = 5.0;

/// Which projection/view pair the camera uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    /// Orbit a fixed look-at point; drag rotates, wheel zooms.
    #[default]
    FreeOrbit,
    /// Attached to the vehicle, wide frustum.
    ChaseWide,
    /// Attached to the vehicle, narrow frustum.
    ChaseNarrow,
}

impl ProjectionMode {
    pub fn is_chase(self) -> bool {
        !matches!(self, ProjectionMode::FreeOrbit)
    }
}

/// A discrete camera setup selected by the number keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionPreset {
    pub yaw: f32,
    pub pitch: f32,
    pub mode: ProjectionMode,
    /// Chase presets pin the distance; orbit presets keep the current one.
    pub distance: Option<f32>,
}

/// Presets 1 through 6, in key order.
pub const PRESETS: [ProjectionPreset; 6] = [
    // Isometric-ish overview
    ProjectionPreset { yaw: -45.0, pitch: 45.0, mode: ProjectionMode::FreeOrbit, distance: None },
    // Front
    ProjectionPreset { yaw: 0.0, pitch: 0.0, mode: ProjectionMode::FreeOrbit, distance: None },
    // Top
    ProjectionPreset { yaw: 0.0, pitch: 90.0, mode: ProjectionMode::FreeOrbit, distance: None },
    // Side
    ProjectionPreset { yaw: 90.0, pitch: 0.0, mode: ProjectionMode::FreeOrbit, distance: None },
    ProjectionPreset { yaw: 0.0, pitch: 0.0, mode: ProjectionMode::ChaseWide, distance: Some(80.0) },
    ProjectionPreset { yaw: 0.0, pitch: 0.0, mode: ProjectionMode::ChaseNarrow, distance: Some(80.0) },
];

/// Look up a preset by its 1-based key number.
pub fn preset(number: u8) -> Option<&'static ProjectionPreset> {
    (number as usize).checked_sub(1).and_then(|i| PRESETS.get(i))
}

/// Wrap an angle in degrees into [-180, 180).
pub fn wrap_degrees(angle: f32) -> f32 {
    angle - ((angle + 180.0) / 360.0).floor() * 360.0
}

/// Scene camera. Angles are stored in degrees.
#[derive(Debug, Clone)]
pub struct Camera {
    pub mode: ProjectionMode,
    /// Orbit distance; also scales the free-orbit frustum.
    pub distance: f32,
    /// Yaw (theta) in degrees.
    pub yaw: f32,
    /// Pitch (gamma) in degrees.
    pub pitch: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Pointer position at the last drag step, while dragging.
    drag_anchor: Option<Vec2>,
}

impl Default for Camera {
    fn default() -> Self {
        let first = PRESETS[0];
        Self {
            mode: first.mode,
            distance: DEFAULT_DISTANCE,
            yaw: first.yaw,
            pitch: first.pitch,
            aspect: 16.0 / 9.0,
            drag_anchor: None,
        }
    }
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            ..Default::default()
        }
    }

    /// Update aspect ratio (call on window resize). A zero-sized window
    /// (minimised) keeps the previous aspect.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring {}x{} resize", width, height);
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Apply preset `number` (1..=6). Unknown numbers leave the camera as is.
    pub fn apply_preset(&mut self, number: u8) -> bool {
        let Some(p) = preset(number) else {
            log::warn!("Ignoring unknown projection preset {}", number);
            return false;
        };
        self.yaw = p.yaw;
        self.pitch = p.pitch;
        self.mode = p.mode;
        if let Some(distance) = p.distance {
            self.distance = distance;
        }
        self.drag_anchor = None;
        log::debug!("Projection preset {} -> {:?}", number, p.mode);
        true
    }

    /// Set yaw and pitch directly (in degrees).
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Start a drag at a screen position. Free orbit only.
    pub fn begin_drag(&mut self, position: Vec2) {
        if self.mode.is_chase() {
            return;
        }
        self.drag_anchor = Some(position);
    }

    /// Rotate by the pointer movement since the last drag step.
    pub fn drag_to(&mut self, position: Vec2) {
        if self.mode.is_chase() {
            return;
        }
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let delta = position - anchor;
        self.yaw = wrap_degrees(self.yaw + self.drag_angle(delta.x));
        self.pitch = wrap_degrees(self.pitch + self.drag_angle(delta.y));
        self.drag_anchor = Some(position);
    }

    pub fn end_drag(&mut self) {
        if self.mode.is_chase() {
            return;
        }
        self.drag_anchor = None;
    }

    /// Wheel zoom: positive delta moves in, anything else moves out.
    pub fn zoom(&mut self, delta: f32) {
        if self.mode.is_chase() || delta == 0.0 {
            return;
        }
        let step = if delta > 0.0 { -SCROLL_STEP } else { SCROLL_STEP };
        self.distance = (self.distance + step).max(SCROLL_STEP);
    }

    fn drag_angle(&self, pixels: f32) -> f32 {
        let s = (pixels / self.distance / DRAG_DIVISOR).clamp(-1.0, 1.0);
        (s.asin() * 2.0).to_degrees()
    }

    /// Orthographic projection for the current mode.
    pub fn projection_matrix(&self) -> Mat4 {
        let a = self.aspect;
        let d = self.distance;
        match self.mode {
            ProjectionMode::FreeOrbit => {
                Mat4::orthographic_rh_gl(-d * a, d * a, -d, d, -3.0 * d, 3.0 * d)
            }
            ProjectionMode::ChaseWide => {
                Mat4::orthographic_rh_gl(-10.0 * a, 10.0 * a, -20.0, 0.0, -10.0, d)
            }
            ProjectionMode::ChaseNarrow => {
                Mat4::orthographic_rh_gl(-8.0 * a, 8.0 * a, -10.5, 5.5, 12.0, d)
            }
        }
    }

    /// Fixed look-at used as the free-orbit base view.
    pub fn orbit_base() -> Mat4 {
        Mat4::look_at_rh(Vec3::new(0.0, 0.0, DEFAULT_DISTANCE), Vec3::ZERO, Vec3::Y)
    }

    /// Apply the camera offset and yaw/pitch on top of a base view.
    ///
    /// `base` is [`Camera::orbit_base`] in free orbit and the vehicle's
    /// look-at in the chase modes.
    pub fn view_matrix(&self, base: Mat4) -> Mat4 {
        base * Mat4::from_translation(Vec3::new(0.0, -self.distance / 6.0, 0.0))
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_first_preset() {
        let camera = Camera::default();
        assert_eq!(camera.mode, ProjectionMode::FreeOrbit);
        assert_eq!(camera.yaw, -45.0);
        assert_eq!(camera.pitch, 45.0);
        assert_eq!(camera.distance, DEFAULT_DISTANCE);
    }

    #[test]
    fn preset_lookup_is_one_based() {
        assert!(preset(0).is_none());
        assert_eq!(preset(1).map(|p| p.mode), Some(ProjectionMode::FreeOrbit));
        assert_eq!(preset(6).map(|p| p.mode), Some(ProjectionMode::ChaseNarrow));
        assert!(preset(7).is_none());
    }

    #[test]
    fn chase_preset_sets_distance_orbit_preset_keeps_it() {
        let mut camera = Camera::default();
        assert!(camera.apply_preset(5));
        assert_eq!(camera.distance, 80.0);
        assert!(camera.apply_preset(3));
        assert_eq!(camera.distance, 80.0);
        assert_eq!(camera.pitch, 90.0);
        assert_eq!(camera.mode, ProjectionMode::FreeOrbit);
    }

    #[test]
    fn unknown_preset_is_ignored() {
        let mut camera = Camera::default();
        camera.yaw = 12.0;
        assert!(!camera.apply_preset(9));
        assert_eq!(camera.yaw, 12.0);
    }

    #[test]
    fn wrap_degrees_range() {
        assert_eq!(wrap_degrees(180.0), -180.0);
        assert_eq!(wrap_degrees(-180.0), -180.0);
        assert_eq!(wrap_degrees(190.0), -170.0);
        assert_eq!(wrap_degrees(-190.0), 170.0);
        assert_eq!(wrap_degrees(45.0), 45.0);
    }

    #[test]
    fn drag_rotates_in_free_orbit() {
        let mut camera = Camera::default();
        camera.set_yaw_pitch(0.0, 0.0);
        camera.begin_drag(Vec2::new(100.0, 100.0));
        camera.drag_to(Vec2::new(130.0, 100.0));
        // 2 * asin(30 / 30 / 5) in degrees
        let expected = (0.2f32.asin() * 2.0).to_degrees();
        assert!((camera.yaw - expected).abs() < 1e-4);
        assert_eq!(camera.pitch, 0.0);
        camera.end_drag();
        assert!(!camera.is_dragging());
    }

    #[test]
    fn drag_and_zoom_ignored_in_chase_modes() {
        let mut camera = Camera::default();
        camera.apply_preset(6);
        camera.begin_drag(Vec2::ZERO);
        camera.drag_to(Vec2::new(50.0, 50.0));
        camera.zoom(1.0);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
        assert_eq!(camera.distance, 80.0);
    }

    #[test]
    fn huge_drag_stays_finite() {
        let mut camera = Camera::default();
        camera.begin_drag(Vec2::ZERO);
        camera.drag_to(Vec2::new(10_000.0, -10_000.0));
        assert!(camera.yaw.is_finite());
        assert!(camera.pitch.is_finite());
    }

    #[test]
    fn zoom_direction_and_floor() {
        let mut camera = Camera::default();
        camera.zoom(120.0);
        assert_eq!(camera.distance, 25.0);
        camera.zoom(-120.0);
        assert_eq!(camera.distance, 30.0);
        for _ in 0..20 {
            camera.zoom(1.0);
        }
        assert_eq!(camera.distance, SCROLL_STEP);
    }

    #[test]
    fn zero_sized_resize_keeps_aspect() {
        let mut camera = Camera::default();
        camera.set_aspect(800, 400);
        assert_eq!(camera.aspect, 2.0);

        camera.set_aspect(800, 0);
        camera.set_aspect(0, 600);
        camera.set_aspect(0, 0);
        assert_eq!(camera.aspect, 2.0);
        assert!(camera.projection_matrix().is_finite());
    }

    #[test]
    fn free_orbit_projection_scales_with_distance() {
        let mut camera = Camera::new(1.0);
        let near = camera.projection_matrix();
        camera.zoom(-1.0);
        let far = camera.projection_matrix();
        // Wider frustum means a smaller x scale.
        assert!(far.x_axis.x < near.x_axis.x);
    }

    #[test]
    fn front_view_maps_origin_below_centre() {
        let mut camera = Camera::default();
        camera.apply_preset(2);
        let view = camera.view_matrix(Camera::orbit_base());
        let p = view.transform_point3(Vec3::ZERO);
        assert!((p.x).abs() < 1e-5);
        assert!((p.y + DEFAULT_DISTANCE / 6.0).abs() < 1e-5);
        assert!((p.z + DEFAULT_DISTANCE).abs() < 1e-5);
    }
}

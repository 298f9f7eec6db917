use glam::{Mat4, Vec3};
use rustc_hash::FxHashSet;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config;

/// Logical inputs the demo reacts to. Key codes are translated once, here,
/// instead of being tracked in a raw key array.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    ToggleWireframe,
    Exit,
}

fn action_for(key: PhysicalKey) -> Option<Action> {
    match key {
        PhysicalKey::Code(KeyCode::KeyW) => Some(Action::MoveForward),
        PhysicalKey::Code(KeyCode::KeyS) => Some(Action::MoveBack),
        PhysicalKey::Code(KeyCode::KeyA) => Some(Action::StrafeLeft),
        PhysicalKey::Code(KeyCode::KeyD) => Some(Action::StrafeRight),
        PhysicalKey::Code(KeyCode::KeyZ) => Some(Action::ToggleWireframe),
        PhysicalKey::Code(KeyCode::Escape) => Some(Action::Exit),
        _ => None,
    }
}

const WORLD_UP: Vec3 = Vec3::Y;
const PITCH_LIMIT: f32 = 89.0;

/// First-person walk camera. Keyboard translation is flattened onto the
/// ground plane and the eye height is pinned after every update; mouse
/// rotation accumulates yaw/pitch from center-relative pointer offsets and
/// rebuilds the front vector on every event.
pub struct WalkCamera {
    position: Vec3,
    front: Vec3,
    yaw: f32,
    pitch: f32,
    held: FxHashSet<Action>,
}

impl WalkCamera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, config::EYE_HEIGHT, 5.0),
            front: Vec3::NEG_Z,
            yaw: -90.0,
            pitch: 0.0,
            held: FxHashSet::default(),
        }
    }

    /// Tracks held movement keys and reports one-shot actions back to the
    /// caller. One-shot actions fire on fresh presses only, never on repeats.
    pub fn process_input(&mut self, event: &winit::event::KeyEvent) -> Option<Action> {
        let action = action_for(event.physical_key)?;
        match action {
            Action::MoveForward | Action::MoveBack | Action::StrafeLeft | Action::StrafeRight => {
                match event.state {
                    ElementState::Pressed => self.press(action),
                    ElementState::Released => self.release(action),
                }
                None
            }
            Action::ToggleWireframe | Action::Exit => {
                (event.state == ElementState::Pressed && !event.repeat).then_some(action)
            }
        }
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    /// Applies the held movement keys over `dt` seconds. Walking must not
    /// pick up the vertical component of the view direction, so translation
    /// uses the flattened front and right vectors; the eye height is forced
    /// afterwards, which is the sole floor mechanism.
    pub fn advance(&mut self, dt: f32) {
        let step = config::WALK_SPEED * dt;
        let front_flat = Vec3::new(self.front.x, 0.0, self.front.z).normalize();
        let right_flat = self.front.cross(WORLD_UP).normalize();

        if self.held.contains(&Action::MoveForward) {
            self.position += step * front_flat;
        }
        if self.held.contains(&Action::MoveBack) {
            self.position -= step * front_flat;
        }
        if self.held.contains(&Action::StrafeLeft) {
            self.position -= step * right_flat;
        }
        if self.held.contains(&Action::StrafeRight) {
            self.position += step * right_flat;
        }

        self.position.y = config::EYE_HEIGHT;
    }

    /// Applies one pointer event given the current window center. Returns
    /// `true` when the event was real user motion, in which case the caller
    /// must warp the pointer back to the center. The warp itself echoes back
    /// as an event at exactly the center coordinate and must not be counted
    /// again, so such events return `false` with the state untouched.
    pub fn look(&mut self, position: (f64, f64), center: (f64, f64)) -> bool {
        if position == center {
            return false;
        }

        let x_offset = (position.0 - center.0) as f32 * config::MOUSE_SENSITIVITY;
        // window y grows downward, pitch grows upward
        let y_offset = (center.1 - position.1) as f32 * config::MOUSE_SENSITIVITY;

        self.yaw += x_offset;
        self.pitch = (self.pitch + y_offset).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        true
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, WORLD_UP)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

impl Default for WalkCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Perspective projection for the current viewport.
pub fn projection(width: u32, height: u32) -> Mat4 {
    let aspect = width as f32 / height as f32;
    Mat4::perspective_rh_gl(
        config::FOV_Y_DEG.to_radians(),
        aspect,
        config::Z_NEAR,
        config::Z_FAR,
    )
}

#[cfg(test)]
mod tests {
    use super::{projection, Action, WalkCamera};
    use crate::config;

    const CENTER: (f64, f64) = (600.0, 400.0);
    const MOVES: [Action; 4] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::StrafeLeft,
        Action::StrafeRight,
    ];

    #[test]
    fn eye_height_pinned_for_every_key_combination() {
        for mask in 0_u32..16 {
            let mut camera = WalkCamera::new();
            for (bit, action) in MOVES.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    camera.press(*action);
                }
            }
            // look up first so the raw front has a vertical component
            camera.look((600.0, 150.0), CENTER);
            for _ in 0..10 {
                camera.advance(0.016);
            }
            assert_eq!(camera.position().y, config::EYE_HEIGHT, "mask {mask:04b}");
        }
    }

    #[test]
    fn pitch_clamps_at_both_limits() {
        let mut camera = WalkCamera::new();
        for _ in 0..50 {
            camera.look((600.0, -5000.0), CENTER);
            assert!(camera.pitch() <= 89.0);
        }
        assert_eq!(camera.pitch(), 89.0);

        for _ in 0..50 {
            camera.look((600.0, 5000.0), CENTER);
            assert!(camera.pitch() >= -89.0);
        }
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn front_stays_unit_length_under_rotation() {
        let mut camera = WalkCamera::new();
        for step in 0..100_u32 {
            let x = 600.0 + f64::from(step * 37 % 250) - 125.0;
            let y = 400.0 + f64::from(step * 53 % 190) - 95.0;
            camera.look((x, y), CENTER);
            assert!((camera.front().length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn recentering_echo_is_ignored() {
        let mut camera = WalkCamera::new();
        let before = (camera.yaw(), camera.pitch());
        assert!(!camera.look(CENTER, CENTER));
        assert_eq!((camera.yaw(), camera.pitch()), before);
    }

    #[test]
    fn pointer_right_of_center_turns_right() {
        let mut camera = WalkCamera::new();
        assert!(camera.look((700.0, 400.0), CENTER));
        assert!((camera.yaw() + 80.0).abs() < 1e-5);
        assert!(camera.pitch().abs() < 1e-5);
    }

    #[test]
    fn one_second_walk_covers_the_walk_speed() {
        let mut camera = WalkCamera::new();
        camera.press(Action::MoveForward);
        camera.advance(1.0);

        let pos = camera.position();
        assert!(pos.x.abs() < 1e-5);
        assert_eq!(pos.y, config::EYE_HEIGHT);
        assert!((pos.z - (5.0 - config::WALK_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn opposing_keys_cancel_out() {
        let mut camera = WalkCamera::new();
        camera.press(Action::StrafeLeft);
        camera.press(Action::StrafeRight);
        camera.advance(1.0);
        assert!((camera.position() - WalkCamera::new().position()).length() < 1e-5);
    }

    #[test]
    fn projection_matches_the_reference_formula() {
        for (width, height) in [(1200_u32, 800_u32), (800, 600), (1920, 1080)] {
            let aspect = width as f32 / height as f32;
            let f = 1.0 / (config::FOV_Y_DEG.to_radians() / 2.0).tan();
            let m = projection(width, height).to_cols_array_2d();

            assert!((m[0][0] - f / aspect).abs() < 1e-5);
            assert!((m[1][1] - f).abs() < 1e-5);
            let depth = config::Z_NEAR - config::Z_FAR;
            assert!((m[2][2] - (config::Z_FAR + config::Z_NEAR) / depth).abs() < 1e-5);
            assert!((m[2][3] + 1.0).abs() < 1e-5);
            assert!((m[3][2] - 2.0 * config::Z_FAR * config::Z_NEAR / depth).abs() < 1e-4);
        }
    }
}

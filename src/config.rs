//! Compiled-in configuration. The demo takes no command-line arguments;
//! every tunable lives here.

pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 800;
pub const WINDOW_TITLE: &str = "3D Car Showroom";

/// Standing height of the viewer's eyes, in meters.
pub const EYE_HEIGHT: f32 = 1.7;
/// Walking speed in meters per second.
pub const WALK_SPEED: f32 = 2.5;
/// Degrees of yaw/pitch per pixel of pointer offset.
pub const MOUSE_SENSITIVITY: f32 = 0.1;

pub const FOV_Y_DEG: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub const CLEAR_COLOR: (f32, f32, f32, f32) = (0.1, 0.1, 0.1, 1.0);
pub const LIGHT_POSITION: [f32; 3] = [0.0, 20.0, 0.0];
pub const LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

pub const CAR_COUNT: usize = 5;
/// Distance between car slots, in meters.
pub const CAR_SPACING: f32 = 3.0;
/// Vertical offset lifting the chassis onto its wheels.
pub const CAR_LIFT: f32 = 0.65;
pub const CAR_SCALE: f32 = 2.0;

/// Half-extent of the square ground plane.
pub const FLOOR_EXTENT: f32 = 10.0;
pub const FLOOR_TILING: f32 = 10.0;

pub const FLOOR_TEXTURE: &str = "textures/floor.png";
pub const TIRE_TEXTURE: &str = "textures/tire_texture.jpg";
pub const STEEL_TEXTURE: &str = "textures/steel_texture.jpg";
pub const GLASS_TEXTURE: &str = "textures/glass_texture.jpg";
pub const RED_TEXTURE: &str = "textures/red_texture.jpg";
pub const LIGHT_TEXTURE: &str = "textures/light_texture.jpg";

pub fn car_model_path(slot: usize) -> String {
    format!("models/car-{slot}.obj")
}

pub fn car_paint_path(slot: usize) -> String {
    format!("textures/car_paint_{slot}.jpg")
}

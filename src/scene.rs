use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use glium::texture::SrgbTexture2d;
use glium::{uniform, Display, DrawParameters, Frame, PolygonMode, Program, Surface};
use glutin::surface::WindowSurface;
use winit::dpi::PhysicalPosition;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::Window;

use crate::camera::{self, Action, WalkCamera};
use crate::config;
use crate::material::{Finish, RuleSet};
use crate::mesh::{Mesh, TextureKind, TextureRef, Vertex};
use crate::model::Model;
use crate::texture::{self, TextureCache};

/// The fixed showroom textures shared by every car.
pub struct Garage {
    pub tire: Rc<SrgbTexture2d>,
    pub steel: Rc<SrgbTexture2d>,
    pub red: Rc<SrgbTexture2d>,
    pub lamp: Rc<SrgbTexture2d>,
    pub glass: Rc<SrgbTexture2d>,
}

impl Garage {
    pub fn load(display: &Display<WindowSurface>, cache: &mut TextureCache) -> Result<Self> {
        Ok(Self {
            tire: cache.fetch(display, config::TIRE_TEXTURE)?,
            steel: cache.fetch(display, config::STEEL_TEXTURE)?,
            red: cache.fetch(display, config::RED_TEXTURE)?,
            lamp: cache.fetch(display, config::LIGHT_TEXTURE)?,
            glass: cache.fetch(display, config::GLASS_TEXTURE)?,
        })
    }

    /// Texture for a resolved finish; `Paint` selects the instance's own coat.
    fn select<'a>(&'a self, finish: Finish, paint: &'a SrgbTexture2d) -> &'a SrgbTexture2d {
        match finish {
            Finish::Tire => &self.tire,
            Finish::Steel => &self.steel,
            Finish::RedLight => &self.red,
            Finish::Lamp => &self.lamp,
            Finish::Glass => &self.glass,
            Finish::Paint => paint,
        }
    }
}

/// One car slot: the loaded model, its assigned paint texture and the
/// dispatch ordering that scene variant uses.
pub struct CarInstance {
    pub model: Model,
    pub paint: Rc<SrgbTexture2d>,
    pub coats: &'static RuleSet,
}

/// X offset of a car slot; slots are spaced evenly and centered on x = 0.
pub fn slot_offset(slot: usize, count: usize, spacing: f32) -> f32 {
    let start = -(count.saturating_sub(1) as f32 * spacing) / 2.0;
    start + slot as f32 * spacing
}

pub struct Scene {
    program: Program,
    params: DrawParameters<'static>,
    floor: Mesh,
    floor_texture: Rc<SrgbTexture2d>,
    garage: Garage,
    pub cars: Vec<CarInstance>,
    pub camera: WalkCamera,
    viewport: (u32, u32),
}

impl Scene {
    pub fn new(
        display: &Display<WindowSurface>,
        cache: &mut TextureCache,
        viewport: (u32, u32),
    ) -> Result<Self> {
        let program = crate::shader::scene(display).context("building the scene shader program")?;
        let floor_texture = cache.fetch(display, config::FLOOR_TEXTURE)?;
        let floor = floor_mesh(display, Rc::clone(&floor_texture))?;
        let garage = Garage::load(display, cache)?;

        Ok(Self {
            program,
            params: DrawParameters {
                depth: glium::Depth {
                    test: glium::DepthTest::IfLess,
                    write: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            floor,
            floor_texture,
            garage,
            cars: Vec::new(),
            camera: WalkCamera::new(),
            viewport,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Window center in physical pixels, the reference point for mouse look.
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.viewport.0 / 2), f64::from(self.viewport.1 / 2))
    }

    pub fn toggle_wireframe(&mut self) {
        self.params.polygon_mode = match self.params.polygon_mode {
            PolygonMode::Line => PolygonMode::Fill,
            _ => PolygonMode::Line,
        };
    }

    /// Renders one frame: movement update, clear, ground plane, then every
    /// car with per-mesh material dispatch.
    pub fn draw_frame(&mut self, frame: &mut Frame, dt: f32) -> Result<(), glium::DrawError> {
        self.camera.advance(dt);

        let (r, g, b, a) = config::CLEAR_COLOR;
        frame.clear_color_and_depth((r, g, b, a), 1.0);

        let view = self.camera.view().to_cols_array_2d();
        let projection = camera::projection(self.viewport.0, self.viewport.1).to_cols_array_2d();
        let view_pos: [f32; 3] = self.camera.position().into();

        let floor_uniforms = uniform! {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: view,
            projection: projection,
            light_pos: config::LIGHT_POSITION,
            light_color: config::LIGHT_COLOR,
            view_pos: view_pos,
            tiling: config::FLOOR_TILING,
            surface: texture::sampled(&self.floor_texture),
        };
        self.floor
            .draw(frame, &self.program, &floor_uniforms, &self.params)?;

        for (slot, car) in self.cars.iter().enumerate() {
            let x = slot_offset(slot, self.cars.len(), config::CAR_SPACING);
            let transform = Mat4::from_translation(Vec3::new(x, config::CAR_LIFT, 0.0))
                * Mat4::from_scale(Vec3::splat(config::CAR_SCALE));
            let model_matrix = transform.to_cols_array_2d();

            for mesh in &car.model.meshes {
                let name = mesh.material.as_deref().unwrap_or("");
                let coat = car.coats.resolve(name);
                let surface = self.garage.select(coat.finish, &car.paint);

                let uniforms = uniform! {
                    model: model_matrix,
                    view: view,
                    projection: projection,
                    light_pos: config::LIGHT_POSITION,
                    light_color: config::LIGHT_COLOR,
                    view_pos: view_pos,
                    tiling: coat.tiling,
                    surface: texture::sampled(surface),
                };
                mesh.draw(frame, &self.program, &uniforms, &self.params)?;
            }
        }
        Ok(())
    }
}

/// Ground quad at y = 0, UV-mapped so the floor texture repeats with the
/// tiling uniform on top.
fn floor_mesh(display: &Display<WindowSurface>, texture: Rc<SrgbTexture2d>) -> Result<Mesh> {
    let e = config::FLOOR_EXTENT;
    let up = [0.0, 1.0, 0.0];
    let vertices = [
        Vertex { position: [-e, 0.0, -e], normal: up, tex_coords: [0.0, 10.0] },
        Vertex { position: [e, 0.0, -e], normal: up, tex_coords: [10.0, 10.0] },
        Vertex { position: [-e, 0.0, e], normal: up, tex_coords: [0.0, 0.0] },
        Vertex { position: [e, 0.0, e], normal: up, tex_coords: [10.0, 0.0] },
    ];
    let indices = [0_u32, 1, 2, 1, 3, 2];
    let floor_ref = TextureRef {
        texture,
        kind: TextureKind::Diffuse,
        path: config::FLOOR_TEXTURE.into(),
    };
    Mesh::new(display, &vertices, &indices, vec![floor_ref], None)
}

/// Drives the windowing event loop shared by the walkthrough demos: frame
/// timing, input dispatch, cursor recentering, resize handling and the
/// per-frame redraw. The loop never idles; every finished frame immediately
/// requests the next.
pub fn run(
    event_loop: EventLoop<()>,
    window: Window,
    display: Display<WindowSurface>,
    mut scene: Scene,
) -> Result<()> {
    window.set_cursor_visible(false);
    warp_cursor(&window, scene.center());

    let mut last_frame = Instant::now();
    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => window_target.exit(),

                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let dt = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;

                    let mut frame = display.draw();
                    scene.draw_frame(&mut frame, dt).unwrap();
                    frame.finish().unwrap();
                }

                // takes effect on the next frame's projection and mouse center
                WindowEvent::Resized(size) => {
                    display.resize(size.into());
                    scene.resize(size.width, size.height);
                }

                WindowEvent::KeyboardInput { event, .. } => {
                    match scene.camera.process_input(&event) {
                        Some(Action::Exit) => window_target.exit(),
                        Some(Action::ToggleWireframe) => scene.toggle_wireframe(),
                        _ => (),
                    }
                }

                WindowEvent::CursorMoved { position, .. } => {
                    let center = scene.center();
                    if scene.camera.look((position.x, position.y), center) {
                        warp_cursor(&window, center);
                    }
                }

                _ => (),
            },
            // ensures continuous rendering
            Event::AboutToWait => window.request_redraw(),
            _ => (),
        })
        .context("running the event loop")?;
    Ok(())
}

fn warp_cursor(window: &Window, center: (f64, f64)) {
    if let Err(err) = window.set_cursor_position(PhysicalPosition::new(center.0, center.1)) {
        log::warn!("failed to recenter the cursor: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::slot_offset;

    #[test]
    fn five_slots_line_up_centered() {
        let offsets: Vec<f32> = (0..5_usize).map(|slot| slot_offset(slot, 5, 3.0)).collect();
        assert_eq!(offsets, [-6.0, -3.0, 0.0, 3.0, 6.0]);
    }

    #[test]
    fn single_slot_sits_at_the_origin() {
        assert!(slot_offset(0, 1, 3.0).abs() < f32::EPSILON);
    }
}

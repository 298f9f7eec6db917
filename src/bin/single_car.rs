use anyhow::Result;
use showroom::model::Model;
use showroom::scene::{self, CarInstance, Scene};
use showroom::texture::TextureCache;
use showroom::{config, material};

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = winit::event_loop::EventLoopBuilder::new().build()?;
    let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
        .with_title(config::WINDOW_TITLE)
        .with_inner_size(config::WINDOW_WIDTH, config::WINDOW_HEIGHT)
        .build(&event_loop);

    let mut cache = TextureCache::default();
    let mut scene = Scene::new(
        &display,
        &mut cache,
        (config::WINDOW_WIDTH, config::WINDOW_HEIGHT),
    )?;

    let model = Model::load(&display, config::car_model_path(1))?;
    let paint = cache.fetch(&display, config::car_paint_path(1))?;
    scene.cars.push(CarInstance {
        model,
        paint,
        coats: &material::SINGLE_CAR,
    });

    scene::run(event_loop, window, display, scene)
}

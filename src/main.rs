#![warn(clippy::pedantic)]
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

    log::info!("loading {} cars", config::CAR_COUNT);
    for slot in 1..=config::CAR_COUNT {
        let model_path = config::car_model_path(slot);
        log::info!("loading {model_path}");

        let model = Model::load(&display, &model_path)?;
        let paint = cache.fetch(&display, config::car_paint_path(slot))?;
        // the first slot is the skinned showpiece, the rest use material mapping
        let coats = if slot == 1 {
            &material::SHOWPIECE
        } else {
            &material::SHOWROOM
        };
        scene.cars.push(CarInstance { model, paint, coats });
    }

    scene::run(event_loop, window, display, scene)
}

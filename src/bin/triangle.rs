use anyhow::{Context, Result};
use glium::{implement_vertex, Surface};
use showroom::{config, shader};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Copy, Clone)]
struct FlatVertex {
    position: [f32; 2],
    color: [f32; 3],
}

implement_vertex!(FlatVertex, position, color);

fn main() -> Result<()> {
    env_logger::init();

    let event_loop = winit::event_loop::EventLoopBuilder::new().build()?;
    let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
        .with_title(config::WINDOW_TITLE)
        .with_inner_size(config::WINDOW_WIDTH, config::WINDOW_HEIGHT)
        .build(&event_loop);

    let vertices = [
        FlatVertex { position: [-0.5, -0.5], color: [1.0, 0.0, 0.0] },
        FlatVertex { position: [0.5, -0.5], color: [0.0, 1.0, 0.0] },
        FlatVertex { position: [0.0, 0.5], color: [0.0, 0.0, 1.0] },
    ];
    let vertex_buffer = glium::VertexBuffer::new(&display, &vertices)?;
    let indices = glium::index::NoIndices(glium::index::PrimitiveType::TrianglesList);
    let program = shader::flat(&display).context("building the triangle shader program")?;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => window_target.exit(),

                WindowEvent::RedrawRequested => {
                    let (r, g, b, a) = config::CLEAR_COLOR;
                    let mut frame = display.draw();
                    frame.clear_color(r, g, b, a);
                    frame
                        .draw(
                            &vertex_buffer,
                            indices,
                            &program,
                            &glium::uniforms::EmptyUniforms,
                            &glium::DrawParameters::default(),
                        )
                        .unwrap();
                    frame.finish().unwrap();
                }

                WindowEvent::Resized(size) => display.resize(size.into()),

                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            physical_key: PhysicalKey::Code(KeyCode::Escape),
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                } => window_target.exit(),

                _ => (),
            },
            // ensures continuous rendering
            Event::AboutToWait => window.request_redraw(),
            _ => (),
        })
        .context("running the event loop")?;
    Ok(())
}

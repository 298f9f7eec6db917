use glium::program::{ProgramChooserCreationError, ProgramCreationError};
use glium::{program, Display, Program};
use glutin::surface::WindowSurface;

/// Lit, textured program used by the walkthrough scenes. The sources live
/// under `shaders/`; a compile or link failure is fatal for the program and
/// propagates to startup, so a partially linked program is never used.
pub fn scene(display: &Display<WindowSurface>) -> Result<Program, ProgramCreationError> {
    Program::from_source(
        display,
        include_str!("../shaders/scene.vert"),
        include_str!("../shaders/scene.frag"),
        None,
    )
}

/// Minimal color-interpolated program for the bare-triangle demo.
pub fn flat(display: &Display<WindowSurface>) -> Result<Program, ProgramChooserCreationError> {
    program!(display,
        140 => {
            vertex: "
                #version 140

                in vec2 position;
                in vec3 color;

                out vec3 v_color;

                void main() {
                    v_color = color;
                    gl_Position = vec4(position, 0.0, 1.0);
                }
            ",

            fragment: "
                #version 140

                in vec3 v_color;
                out vec4 f_color;

                void main() {
                    f_color = vec4(v_color, 1.0);
                }
            ",
        },
    )
}

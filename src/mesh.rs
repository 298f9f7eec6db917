use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use glium::index::PrimitiveType;
use glium::texture::SrgbTexture2d;
use glium::uniforms::{UniformValue, Uniforms};
use glium::{
    implement_vertex, Display, DrawError, DrawParameters, Frame, IndexBuffer, Program, Surface,
    VertexBuffer,
};
use glutin::surface::WindowSurface;

use crate::texture;

#[derive(Copy, Clone, Debug, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coords: [f32; 2],
}

implement_vertex!(Vertex, position, normal, tex_coords);

/// Role of a texture within a material, used to derive its uniform name.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    fn tag(self) -> &'static str {
        match self {
            TextureKind::Diffuse => "texture_diffuse",
            TextureKind::Specular => "texture_specular",
        }
    }
}

/// Shared handle to a GPU texture plus the metadata needed to bind it.
pub struct TextureRef {
    pub texture: Rc<SrgbTexture2d>,
    pub kind: TextureKind,
    pub path: PathBuf,
}

/// Uniform names for a texture list: the kind tag plus a running per-kind
/// counter, so the first diffuse map becomes `texture_diffuse1`, the second
/// `texture_diffuse2`, and so on.
fn uniform_names(kinds: &[TextureKind]) -> Vec<String> {
    let mut diffuse = 0_u32;
    let mut specular = 0_u32;
    kinds
        .iter()
        .map(|kind| {
            let counter = match kind {
                TextureKind::Diffuse => {
                    diffuse += 1;
                    diffuse
                }
                TextureKind::Specular => {
                    specular += 1;
                    specular
                }
            };
            format!("{}{counter}", kind.tag())
        })
        .collect()
}

/// One drawable surface: immutable vertex/index buffers, the textures it
/// owns and the material name it was authored under.
pub struct Mesh {
    vertex_buffer: VertexBuffer<Vertex>,
    index_buffer: IndexBuffer<u32>,
    textures: Vec<TextureRef>,
    names: Vec<String>,
    pub material: Option<String>,
}

impl Mesh {
    /// Uploads the lists into static buffers. The buffers never change after
    /// construction; the uniform name of every owned texture is derived here
    /// for the same reason.
    pub fn new(
        display: &Display<WindowSurface>,
        vertices: &[Vertex],
        indices: &[u32],
        textures: Vec<TextureRef>,
        material: Option<String>,
    ) -> Result<Self> {
        let kinds: Vec<TextureKind> = textures.iter().map(|texture| texture.kind).collect();
        Ok(Self {
            vertex_buffer: VertexBuffer::new(display, vertices)?,
            index_buffer: IndexBuffer::new(display, PrimitiveType::TrianglesList, indices)?,
            textures,
            names: uniform_names(&kinds),
            material,
        })
    }

    /// Issues one indexed triangle-list draw over the whole index buffer,
    /// binding the owned textures under their derived names alongside the
    /// caller's uniforms. Texture units are assigned by glium per draw call.
    pub fn draw<U: Uniforms>(
        &self,
        frame: &mut Frame,
        program: &Program,
        uniforms: &U,
        params: &DrawParameters<'_>,
    ) -> Result<(), DrawError> {
        let uniforms = MaterialUniforms {
            base: uniforms,
            mesh: self,
        };
        frame.draw(
            &self.vertex_buffer,
            &self.index_buffer,
            program,
            &uniforms,
            params,
        )
    }
}

/// The caller's uniforms plus the mesh's own texture bindings.
struct MaterialUniforms<'m, U> {
    base: &'m U,
    mesh: &'m Mesh,
}

impl<U: Uniforms> Uniforms for MaterialUniforms<'_, U> {
    fn visit_values<'a, F: FnMut(&str, UniformValue<'a>)>(&'a self, mut output: F) {
        self.base.visit_values(|name, value| output(name, value));
        for (texture, name) in self.mesh.textures.iter().zip(&self.mesh.names) {
            output(
                name.as_str(),
                UniformValue::SrgbTexture2d(&texture.texture, Some(texture::sample_params())),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{uniform_names, TextureKind};

    #[test]
    fn names_count_per_kind_starting_at_one() {
        let names = uniform_names(&[
            TextureKind::Diffuse,
            TextureKind::Diffuse,
            TextureKind::Specular,
            TextureKind::Diffuse,
        ]);
        assert_eq!(
            names,
            [
                "texture_diffuse1",
                "texture_diffuse2",
                "texture_specular1",
                "texture_diffuse3",
            ]
        );
    }

    #[test]
    fn empty_texture_list_derives_no_names() {
        assert!(uniform_names(&[]).is_empty());
    }
}

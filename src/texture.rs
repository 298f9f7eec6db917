use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use glium::texture::{ClientFormat, MipmapsOption, RawImage2d, SrgbTexture2d};
use glium::uniforms::{
    MagnifySamplerFilter, MinifySamplerFilter, Sampler, SamplerBehavior, SamplerWrapFunction,
};
use glium::Display;
use glutin::surface::WindowSurface;
use image::{DynamicImage, GenericImageView};
use rustc_hash::FxHashMap;

/// Sampling used for every scene texture: repeat wrapping with trilinear
/// minification and linear magnification.
pub fn sample_params() -> SamplerBehavior {
    SamplerBehavior {
        wrap_function: (
            SamplerWrapFunction::Repeat,
            SamplerWrapFunction::Repeat,
            SamplerWrapFunction::Repeat,
        ),
        minify_filter: MinifySamplerFilter::LinearMipmapLinear,
        magnify_filter: MagnifySamplerFilter::Linear,
        ..SamplerBehavior::default()
    }
}

pub fn sampled(texture: &SrgbTexture2d) -> Sampler<'_, SrgbTexture2d> {
    Sampler(texture, sample_params())
}

/// Decodes an image file and uploads it as an sRGB texture with generated
/// mipmaps. The channel layout is inferred from the decoded image and rows
/// are flipped so the image origin matches the GL texture origin. Failures
/// are reported as errors instead of handing back a handle bound to no data.
pub fn load(display: &Display<WindowSurface>, path: impl AsRef<Path>) -> Result<SrgbTexture2d> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("reading texture {}", path.display()))?;
    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::error!("failed to decode texture {}: {err}", path.display());
            return Err(err).with_context(|| format!("decoding texture {}", path.display()));
        }
    };

    let (width, height) = (decoded.width(), decoded.height());
    let (format, pixels) = match decoded {
        DynamicImage::ImageLuma8(buffer) => (ClientFormat::U8, buffer.into_raw()),
        DynamicImage::ImageRgb8(buffer) => (ClientFormat::U8U8U8, buffer.into_raw()),
        DynamicImage::ImageRgba8(buffer) => (ClientFormat::U8U8U8U8, buffer.into_raw()),
        other => (ClientFormat::U8U8U8U8, other.to_rgba8().into_raw()),
    };

    let raw = RawImage2d {
        data: Cow::Owned(flip_rows(pixels, height as usize)),
        width,
        height,
        format,
    };
    SrgbTexture2d::with_mipmaps(display, raw, MipmapsOption::AutoGeneratedMipmaps)
        .with_context(|| format!("uploading texture {}", path.display()))
}

/// Reverses the row order of a tightly packed pixel buffer.
fn flip_rows(pixels: Vec<u8>, rows: usize) -> Vec<u8> {
    if rows == 0 {
        return pixels;
    }
    let stride = pixels.len() / rows;
    let mut flipped = Vec::with_capacity(pixels.len());
    for row in pixels.chunks(stride).rev() {
        flipped.extend_from_slice(row);
    }
    flipped
}

/// Loads each distinct image file once and hands out shared references, so
/// meshes using the same image share one GPU texture.
#[derive(Default)]
pub struct TextureCache {
    loaded: FxHashMap<PathBuf, Rc<SrgbTexture2d>>,
}

impl TextureCache {
    pub fn fetch(
        &mut self,
        display: &Display<WindowSurface>,
        path: impl AsRef<Path>,
    ) -> Result<Rc<SrgbTexture2d>> {
        let path = path.as_ref();
        if let Some(texture) = self.loaded.get(path) {
            return Ok(Rc::clone(texture));
        }
        let texture = Rc::new(load(display, path)?);
        self.loaded.insert(path.to_path_buf(), Rc::clone(&texture));
        Ok(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::flip_rows;

    #[test]
    fn flip_reverses_row_order() {
        // three rows with a stride of two
        let pixels = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(flip_rows(pixels, 3), vec![5, 6, 3, 4, 1, 2]);
    }

    #[test]
    fn flip_of_empty_buffer_is_empty() {
        assert!(flip_rows(Vec::new(), 0).is_empty());
    }
}

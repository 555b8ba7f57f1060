//! 2D textures.
//!
//! Textures are created from raw texels ([`Texture::new_raw`]) or from a decoded image
//! ([`Texture::from_image`]). Images are read from disk with [`load_image`], which supports
//! JPEG and PNG files.
//!
//! OpenGL expects the first row of texels to be the bottom one, whereas images store the top
//! row first; [`Texture::from_image`] flips images vertically before uploading them.

use crate::backend::texture::Texture as TextureBackend;
use crate::context::GraphicsContext;
use image::{DynamicImage, GenericImageView as _, ImageError};
use std::{error, fmt, path::Path};

/// What happens to texture coordinates outside of *[0;1]*.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Wrap {
  /// Coordinates stick to the closest edge.
  ClampToEdge,
  /// The texture tiles.
  Repeat,
  /// The texture tiles, every other tile being mirrored.
  MirroredRepeat,
}

/// Filter used when a texel covers less than a pixel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MinFilter {
  /// Closest texel of the base level.
  Nearest,
  /// Weighted average of the four closest texels of the base level.
  Linear,
  /// Closest texel of the closest mipmap.
  NearestMipmapNearest,
  /// Closest texel of the two closest mipmaps, blended.
  NearestMipmapLinear,
  /// Weighted average of the four closest texels of the closest mipmap.
  LinearMipmapNearest,
  /// Weighted average of the four closest texels of the two closest mipmaps, blended
  /// (trilinear filtering).
  LinearMipmapLinear,
}

impl MinFilter {
  /// Whether sampling with this filter reads mipmaps.
  pub fn uses_mipmaps(self) -> bool {
    !matches!(self, MinFilter::Nearest | MinFilter::Linear)
  }
}

/// Filter used when a texel covers more than a pixel.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MagFilter {
  /// Closest texel; gives a blocky look.
  Nearest,
  /// Weighted average of the four closest texels; gives a smooth look.
  Linear,
}

/// How a texture is read from shaders.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sampler {
  /// Wrapping along the horizontal (*s*) axis.
  pub wrap_s: Wrap,
  /// Wrapping along the vertical (*t*) axis.
  pub wrap_t: Wrap,
  /// Minification filter.
  pub min_filter: MinFilter,
  /// Magnification filter.
  pub mag_filter: MagFilter,
}

/// The default sampler:
///
/// - Both coordinates repeat.
/// - Trilinear minification ([`MinFilter::LinearMipmapLinear`]).
/// - Linear magnification.
impl Default for Sampler {
  fn default() -> Self {
    Sampler {
      wrap_s: Wrap::Repeat,
      wrap_t: Wrap::Repeat,
      min_filter: MinFilter::LinearMipmapLinear,
      mag_filter: MagFilter::Linear,
    }
  }
}

/// Whether to build the mipmap chain after uploading the base level.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GenMipmaps {
  /// Mipmaps should be generated after the base level is uploaded.
  Yes,
  /// Only the base level exists.
  No,
}

/// Texel formats accepted when uploading raw texels.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
  /// Normalized red, green and blue channels, 8 bits each.
  RGB8,
  /// Normalized red, green, blue and alpha channels, 8 bits each.
  RGBA8,
}

impl PixelFormat {
  /// Number of bytes per texel.
  pub fn channels(self) -> usize {
    match self {
      PixelFormat::RGB8 => 3,
      PixelFormat::RGBA8 => 4,
    }
  }
}

/// Texture creation errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum TextureError {
  /// The image could not be opened or decoded.
  Image(ImageError),
  /// One of the dimensions is zero.
  EmptySize([u32; 2]),
  /// Not enough or too many texels were provided.
  ///
  /// Holds the expected and the provided number of bytes.
  TexelCountMismatch(usize, usize),
  /// The backend failed to create the texture.
  CreationFailed(String),
}

impl fmt::Display for TextureError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      TextureError::Image(ref e) => write!(f, "cannot load image: {}", e),
      TextureError::EmptySize([w, h]) => write!(f, "empty texture size: {}×{}", w, h),
      TextureError::TexelCountMismatch(expected, provided) => write!(
        f,
        "wrong texel buffer size: expected {} bytes, got {}",
        expected, provided
      ),
      TextureError::CreationFailed(ref reason) => write!(f, "cannot create texture: {}", reason),
    }
  }
}

impl error::Error for TextureError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      TextureError::Image(e) => Some(e),
      _ => None,
    }
  }
}

impl From<ImageError> for TextureError {
  fn from(e: ImageError) -> Self {
    TextureError::Image(e)
  }
}

/// Read and decode an image from disk.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, TextureError> {
  let path = path.as_ref();
  let img = image::open(path)?;
  log::debug!(
    "loaded image {} ({}×{})",
    path.display(),
    img.width(),
    img.height()
  );

  Ok(img)
}

/// A 2D texture.
pub struct Texture<S>
where
  S: TextureBackend,
{
  repr: S::TextureRepr,
  size: [u32; 2],
  sampler: Sampler,
  mipmaps: bool,
}

impl<S> Texture<S>
where
  S: TextureBackend,
{
  /// Create a texture from raw texels, stored row by row from the bottom one.
  pub fn new_raw<C>(
    ctx: &mut C,
    size: [u32; 2],
    sampler: Sampler,
    gen_mipmaps: GenMipmaps,
    format: PixelFormat,
    texels: &[u8],
  ) -> Result<Self, TextureError>
  where
    C: GraphicsContext<Backend = S>,
  {
    let [w, h] = size;

    if w == 0 || h == 0 {
      return Err(TextureError::EmptySize(size));
    }

    let expected = w as usize * h as usize * format.channels();
    if texels.len() != expected {
      return Err(TextureError::TexelCountMismatch(expected, texels.len()));
    }

    let repr = unsafe {
      ctx
        .backend()
        .new_texture(size, sampler, gen_mipmaps, format, texels)?
    };

    Ok(Texture {
      repr,
      size,
      sampler,
      mipmaps: gen_mipmaps == GenMipmaps::Yes,
    })
  }

  /// Create a texture from a decoded image, flipped vertically and converted to RGB8, with
  /// mipmaps.
  pub fn from_image<C>(ctx: &mut C, img: &DynamicImage, sampler: Sampler) -> Result<Self, TextureError>
  where
    C: GraphicsContext<Backend = S>,
  {
    let rgb = img.flipv().to_rgb8();
    let (width, height) = rgb.dimensions();

    Self::new_raw(
      ctx,
      [width, height],
      sampler,
      GenMipmaps::Yes,
      PixelFormat::RGB8,
      &rgb.into_raw(),
    )
  }

  /// Size of the texture, in texels.
  pub fn size(&self) -> [u32; 2] {
    self.size
  }

  /// Sampler the texture was created with.
  pub fn sampler(&self) -> Sampler {
    self.sampler
  }

  /// Whether mipmaps were generated.
  pub fn has_mipmaps(&self) -> bool {
    self.mipmaps
  }

  /// Bind the texture to a texture unit, for the next draw calls.
  pub fn bind(&self, unit: u32) {
    unsafe { S::bind_texture(&self.repr, unit) }
  }
}

impl<S> Drop for Texture<S>
where
  S: TextureBackend,
{
  fn drop(&mut self) {
    unsafe { S::destroy_texture(&mut self.repr) }
  }
}

impl<S> fmt::Debug for Texture<S>
where
  S: TextureBackend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Texture")
      .field("size", &self.size)
      .field("sampler", &self.sampler)
      .field("mipmaps", &self.mipmaps)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_backend::MockContext;
  use image::{Rgb, RgbImage};

  #[test]
  fn default_sampler_repeats_and_filters_trilinearly() {
    let sampler = Sampler::default();

    assert_eq!(sampler.wrap_s, Wrap::Repeat);
    assert_eq!(sampler.wrap_t, Wrap::Repeat);
    assert_eq!(sampler.min_filter, MinFilter::LinearMipmapLinear);
    assert_eq!(sampler.mag_filter, MagFilter::Linear);
    assert!(sampler.min_filter.uses_mipmaps());
    assert!(!MinFilter::Linear.uses_mipmaps());
  }

  #[test]
  fn raw_texels_must_match_the_size() {
    let mut ctx = MockContext::new();
    let texels = [0u8; 2 * 2 * 3];

    let ok = Texture::new_raw(
      &mut ctx,
      [2, 2],
      Sampler::default(),
      GenMipmaps::No,
      PixelFormat::RGB8,
      &texels,
    );
    assert!(ok.is_ok());

    let too_few = Texture::new_raw(
      &mut ctx,
      [2, 2],
      Sampler::default(),
      GenMipmaps::No,
      PixelFormat::RGBA8,
      &texels,
    );
    assert!(matches!(
      too_few,
      Err(TextureError::TexelCountMismatch(16, 12))
    ));

    let empty = Texture::new_raw(
      &mut ctx,
      [0, 2],
      Sampler::default(),
      GenMipmaps::No,
      PixelFormat::RGB8,
      &[],
    );
    assert!(matches!(empty, Err(TextureError::EmptySize([0, 2]))));
  }

  #[test]
  fn images_are_flipped_before_upload() {
    let mut ctx = MockContext::new();
    let mut img = RgbImage::new(1, 2);
    img.put_pixel(0, 0, Rgb([255, 0, 0])); // top
    img.put_pixel(0, 1, Rgb([0, 0, 255])); // bottom

    let tex = Texture::from_image(&mut ctx, &DynamicImage::ImageRgb8(img), Sampler::default())
      .unwrap();

    assert_eq!(tex.size(), [1, 2]);
    assert!(tex.has_mipmaps());
    assert_eq!(ctx.state().last_texels, vec![0, 0, 255, 255, 0, 0]);
  }

  #[test]
  fn missing_image_is_an_error() {
    let err = load_image("this/does/not/exist.jpeg").unwrap_err();

    assert!(matches!(err, TextureError::Image(_)));
  }

  #[test]
  fn binding_and_dropping() {
    let mut ctx = MockContext::new();
    let tex = Texture::new_raw(
      &mut ctx,
      [1, 1],
      Sampler::default(),
      GenMipmaps::No,
      PixelFormat::RGBA8,
      &[1, 2, 3, 4],
    )
    .unwrap();

    tex.bind(3);
    assert_eq!(ctx.state().bound_textures.get(&3).copied(), Some(1));

    drop(tex);
    assert_eq!(ctx.state().live_textures, 0);
  }
}

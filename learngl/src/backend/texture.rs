//! Texture backend interface.

use crate::texture::{GenMipmaps, PixelFormat, Sampler, TextureError};

/// 2D textures.
pub unsafe trait Texture {
  /// Backend representation of a texture.
  type TextureRepr;

  /// Create a 2D texture and upload `texels` into its base level.
  ///
  /// The length of `texels` has already been checked against `size` and `format`.
  unsafe fn new_texture(
    &mut self,
    size: [u32; 2],
    sampler: Sampler,
    gen_mipmaps: GenMipmaps,
    format: PixelFormat,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError>;

  /// Bind the texture to a texture unit.
  unsafe fn bind_texture(texture: &Self::TextureRepr, unit: u32);

  /// Destroy a texture.
  unsafe fn destroy_texture(texture: &mut Self::TextureRepr);
}

use crate::gl33::{state::GLState, GL33};
use gl::{self, types::*};
use learngl::{
  backend::texture::Texture as TextureBackend,
  texture::{GenMipmaps, MagFilter, MinFilter, PixelFormat, Sampler, TextureError, Wrap},
};
use std::{cell::RefCell, os::raw::c_void, rc::Rc};

#[derive(Debug)]
pub struct Texture {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

unsafe impl TextureBackend for GL33 {
  type TextureRepr = Texture;

  unsafe fn new_texture(
    &mut self,
    size: [u32; 2],
    sampler: Sampler,
    gen_mipmaps: GenMipmaps,
    format: PixelFormat,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError> {
    let mut handle: GLuint = 0;
    gl::GenTextures(1, &mut handle);

    if handle == 0 {
      return Err(TextureError::CreationFailed(
        "unable to create texture".to_owned(),
      ));
    }

    self
      .state
      .borrow_mut()
      .bind_texture(gl::TEXTURE_2D, handle);

    apply_sampler_to_texture(gl::TEXTURE_2D, sampler);

    let (gl_format, iformat) = opengl_pixel_format(format);

    // RGB rows are not necessarily 4-byte aligned
    gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
    gl::TexImage2D(
      gl::TEXTURE_2D,
      0,
      iformat as GLint,
      size[0] as GLsizei,
      size[1] as GLsizei,
      0,
      gl_format,
      gl::UNSIGNED_BYTE,
      texels.as_ptr() as *const c_void,
    );

    match gen_mipmaps {
      GenMipmaps::Yes => gl::GenerateMipmap(gl::TEXTURE_2D),
      GenMipmaps::No => {
        // without mipmaps, a mipmapped minification filter would leave the texture incomplete
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAX_LEVEL, 0);
      }
    }

    log::trace!("created texture {} ({}×{})", handle, size[0], size[1]);

    Ok(Texture {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_texture(texture: &Self::TextureRepr, unit: u32) {
    let mut state = texture.state.borrow_mut();
    state.set_texture_unit(unit);
    state.bind_texture(gl::TEXTURE_2D, texture.handle);
  }

  unsafe fn destroy_texture(texture: &mut Self::TextureRepr) {
    texture.state.borrow_mut().unbind_texture(texture.handle);
    gl::DeleteTextures(1, &texture.handle);
  }
}

fn apply_sampler_to_texture(target: GLenum, sampler: Sampler) {
  unsafe {
    gl::TexParameteri(
      target,
      gl::TEXTURE_WRAP_S,
      opengl_wrap(sampler.wrap_s) as GLint,
    );
    gl::TexParameteri(
      target,
      gl::TEXTURE_WRAP_T,
      opengl_wrap(sampler.wrap_t) as GLint,
    );
    gl::TexParameteri(
      target,
      gl::TEXTURE_MIN_FILTER,
      opengl_min_filter(sampler.min_filter) as GLint,
    );
    gl::TexParameteri(
      target,
      gl::TEXTURE_MAG_FILTER,
      opengl_mag_filter(sampler.mag_filter) as GLint,
    );
  }
}

fn opengl_wrap(wrap: Wrap) -> GLenum {
  match wrap {
    Wrap::ClampToEdge => gl::CLAMP_TO_EDGE,
    Wrap::Repeat => gl::REPEAT,
    Wrap::MirroredRepeat => gl::MIRRORED_REPEAT,
  }
}

fn opengl_min_filter(filter: MinFilter) -> GLenum {
  match filter {
    MinFilter::Nearest => gl::NEAREST,
    MinFilter::Linear => gl::LINEAR,
    MinFilter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
    MinFilter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
    MinFilter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
    MinFilter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
  }
}

fn opengl_mag_filter(filter: MagFilter) -> GLenum {
  match filter {
    MagFilter::Nearest => gl::NEAREST,
    MagFilter::Linear => gl::LINEAR,
  }
}

// Format and internal format.
fn opengl_pixel_format(format: PixelFormat) -> (GLenum, GLenum) {
  match format {
    PixelFormat::RGB8 => (gl::RGB, gl::RGB8),
    PixelFormat::RGBA8 => (gl::RGBA, gl::RGBA8),
  }
}

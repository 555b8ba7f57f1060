//! learngl tutorial programs.
//!
//! Every program is a module exposing a `LocalExample` type implementing [`Example`]. Programs
//! don’t know anything about windows or system events: the runner (see `main.rs`) opens the
//! window, turns system events into [`InputAction`]s and hands the program a graphics context
//! every frame.
//!
//! Files (shaders, textures) are resolved through [`PlatformServices`], so that the same program
//! can be pointed at different asset directories.

use image::DynamicImage;
use learngl::{
  context::GraphicsContext, shader::ShaderError, tess::TessError, texture::TextureError,
};
use learngl_gl::GL33;
use std::{error::Error, fmt, path::PathBuf};

pub mod hello_quad;
pub mod hello_window;
pub mod shader_uniforms;
mod shared;
pub mod texture;

/// Example interface.
pub trait Example: Sized {
  /// Bootstrap the example.
  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = GL33>,
  ) -> Result<Self, DemoError>;

  /// Render a frame of the example.
  fn render_frame(
    &mut self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = GL33>,
  ) -> LoopFeedback;
}

/// A type used to pass “inputs” to examples.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Framebuffer size changed.
  Resized { width: u32, height: u32 },
}

/// What the runner should do after a frame.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum LoopFeedback {
  Continue,
  Exit,
}

/// Services an example can ask the platform for.
pub trait PlatformServices {
  /// Error raised when an asset cannot be fetched.
  type FetchError: Error;

  /// Path of a shader file, by name.
  fn shader_path(&self, name: &str) -> PathBuf;

  /// Load a texture image, by name.
  fn fetch_texture(&mut self, name: &str) -> Result<&DynamicImage, Self::FetchError>;
}

/// Errors that make an example unable to start.
#[derive(Debug)]
pub enum DemoError {
  /// A shader program could not be built.
  Shader(ShaderError),
  /// A vertex array could not be built.
  Tess(TessError),
  /// A texture could not be created.
  Texture(TextureError),
}

impl fmt::Display for DemoError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      DemoError::Shader(ref e) => write!(f, "shader error: {}", e),
      DemoError::Tess(ref e) => write!(f, "tessellation error: {}", e),
      DemoError::Texture(ref e) => write!(f, "texture error: {}", e),
    }
  }
}

impl Error for DemoError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      DemoError::Shader(e) => Some(e),
      DemoError::Tess(e) => Some(e),
      DemoError::Texture(e) => Some(e),
    }
  }
}

impl From<ShaderError> for DemoError {
  fn from(e: ShaderError) -> Self {
    DemoError::Shader(e)
  }
}

impl From<TessError> for DemoError {
  fn from(e: TessError) -> Self {
    DemoError::Tess(e)
  }
}

impl From<TextureError> for DemoError {
  fn from(e: TextureError) -> Self {
    DemoError::Texture(e)
  }
}

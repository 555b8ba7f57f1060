//! Draw a textured quad.
//!
//! The quad carries a color and texture coordinates per corner. If the `container.png` texture
//! cannot be loaded, the error is logged and the quad is drawn with its vertex colors only.

use crate::{
  shared::{handle_actions, CLEAR_COLOR},
  DemoError, Example, InputAction, LoopFeedback, PlatformServices,
};
use learngl::{
  context::GraphicsContext,
  geometry::{textured_layout, QUAD_INDICES, TEXTURED_QUAD},
  shader::ShaderProgram,
  tess::{Tess, TessBuilder},
  texture::{Sampler, Texture},
};
use learngl_gl::GL33;

const TEXTURE_NAME: &str = "container.png";

pub struct LocalExample {
  program: ShaderProgram<GL33>,
  quad: Tess<GL33>,
  texture: Option<Texture<GL33>>,
}

impl Example for LocalExample {
  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = GL33>,
  ) -> Result<Self, DemoError> {
    let mut program = ShaderProgram::from_files(
      context,
      platform.shader_path("texture.vs"),
      platform.shader_path("texture.fs"),
    )?;

    let quad = TessBuilder::new(context)
      .set_vertices(&TEXTURED_QUAD, textured_layout())
      .set_indices(&QUAD_INDICES)
      .build()?;

    let texture = match platform.fetch_texture(TEXTURE_NAME) {
      Ok(img) => Some(Texture::from_image(context, img, Sampler::default())?),
      Err(e) => {
        log::error!("failed to load texture: {}", e);
        None
      }
    };

    program.set_int("texture1", 0);
    program.set_bool("useTexture", texture.is_some());
    program.set_float("mixValue", 0.8);

    Ok(LocalExample {
      program,
      quad,
      texture,
    })
  }

  fn render_frame(
    &mut self,
    _: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = GL33>,
  ) -> LoopFeedback {
    if !handle_actions(context, actions) {
      return LoopFeedback::Exit;
    }

    context.clear_back_buffer(CLEAR_COLOR);

    if let Some(ref texture) = self.texture {
      texture.bind(0);
    }

    self.program.use_program();
    self.quad.render();

    LoopFeedback::Continue
  }
}

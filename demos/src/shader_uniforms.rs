//! Draw a quad whose color pulses over time.
//!
//! The location of the `ourColor` uniform is resolved once; every frame, the green channel is
//! written through it.

use crate::{
  shared::{handle_actions, CLEAR_COLOR},
  DemoError, Example, InputAction, LoopFeedback, PlatformServices,
};
use learngl::{
  context::GraphicsContext,
  geometry::{position_layout, QUAD_INDICES, QUAD_POSITIONS},
  shader::{ShaderProgram, UniformLocation, UniformValue},
  tess::{Tess, TessBuilder},
};
use learngl_gl::GL33;

pub struct LocalExample {
  program: ShaderProgram<GL33>,
  color: Option<UniformLocation>,
  quad: Tess<GL33>,
}

impl Example for LocalExample {
  fn bootstrap(
    platform: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = GL33>,
  ) -> Result<Self, DemoError> {
    let program = ShaderProgram::from_files(
      context,
      platform.shader_path("uniforms.vs"),
      platform.shader_path("uniforms.fs"),
    )?;

    let color = program.uniform("ourColor");
    if color.is_none() {
      log::warn!("ourColor is not an active uniform; the quad will stay black");
    }

    let quad = TessBuilder::new(context)
      .set_vertices(&QUAD_POSITIONS, position_layout())
      .set_indices(&QUAD_INDICES)
      .build()?;

    Ok(LocalExample {
      program,
      color,
      quad,
    })
  }

  fn render_frame(
    &mut self,
    t: f32,
    actions: impl Iterator<Item = InputAction>,
    context: &mut impl GraphicsContext<Backend = GL33>,
  ) -> LoopFeedback {
    if !handle_actions(context, actions) {
      return LoopFeedback::Exit;
    }

    context.clear_back_buffer(CLEAR_COLOR);

    if let Some(color) = self.color {
      let green = t.sin() * 0.5 + 0.5;
      self
        .program
        .set(color, UniformValue::Vec4([0., green, 0., 1.]));
    }

    self.program.use_program();
    self.quad.render();

    LoopFeedback::Continue
  }
}

//! Draw an orange quad made of two indexed triangles.
//!
//! The shaders are embedded in the binary and built with [`ShaderProgram::from_strings`]. If
//! either of them fails to compile, the errors are logged and the program still runs; nothing
//! gets drawn though.

use crate::{
  shared::{handle_actions, CLEAR_COLOR},
  DemoError, Example, InputAction, LoopFeedback, PlatformServices,
};
use learngl::{
  context::GraphicsContext,
  geometry::{position_layout, QUAD_INDICES, QUAD_POSITIONS},
  shader::ShaderProgram,
  tess::{Tess, TessBuilder},
};
use learngl_gl::GL33;

const VS: &str = include_str!("../shaders/quad.vs");
const FS: &str = include_str!("../shaders/quad.fs");

pub struct LocalExample {
  program: ShaderProgram<GL33>,
  quad: Tess<GL33>,
}

impl Example for LocalExample {
  fn bootstrap(
    _: &mut impl PlatformServices,
    context: &mut impl GraphicsContext<Backend = GL33>,
  ) -> Result<Self, DemoError> {
    let program = ShaderProgram::from_strings(context, VS, FS)?;
    let quad = TessBuilder::new(context)
      .set_vertices(&QUAD_POSITIONS, position_layout())
      .set_indices(&QUAD_INDICES)
      .build()?;

    Ok(LocalExample { program, quad })
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
    self.program.use_program();
    self.quad.render();

    LoopFeedback::Continue
  }
}

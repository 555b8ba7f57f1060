//! Open a window and clear it every frame. Press escape to quit.

use crate::{
  shared::{handle_actions, CLEAR_COLOR},
  DemoError, Example, InputAction, LoopFeedback, PlatformServices,
};
use learngl::context::GraphicsContext;
use learngl_gl::GL33;

pub struct LocalExample;

impl Example for LocalExample {
  fn bootstrap(
    _: &mut impl PlatformServices,
    _: &mut impl GraphicsContext<Backend = GL33>,
  ) -> Result<Self, DemoError> {
    Ok(LocalExample)
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
    LoopFeedback::Continue
  }
}

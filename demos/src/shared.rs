//! Values shared by all the tutorial programs.

use crate::InputAction;
use learngl::{backend::framebuffer::BackBuffer, context::GraphicsContext};

/// Color the back buffer is cleared with every frame.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.];

/// Apply the actions every example reacts to the same way.
///
/// Returns `false` if the example should stop.
pub fn handle_actions<C>(ctx: &mut C, actions: impl Iterator<Item = InputAction>) -> bool
where
  C: GraphicsContext,
  C::Backend: BackBuffer,
{
  for action in actions {
    match action {
      InputAction::Quit => return false,
      InputAction::Resized { width, height } => {
        log::debug!("new framebuffer size: {}×{}", width, height);
        ctx.set_viewport(0, 0, width, height);
      }
    }
  }

  true
}

//! OpenGL 3.3 backend.
//!
//! This module implements an OpenGL 3.3 backend for learngl. The backend type is [`GL33`].

mod framebuffer;
mod shader;
mod state;
mod tess;
mod texture;

use self::state::GLState;
pub use self::state::StateQueryError;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 3.3 backend.
///
/// This type is to be used as a learngl backend type. It implements the whole public API.
#[derive(Debug)]
pub struct GL33 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL33 {
  /// Create a new OpenGL 3.3 backend.
  ///
  /// Fails if a backend was already created on the current thread.
  pub fn new() -> Result<Self, StateQueryError> {
    let state = GLState::new()?;
    log::debug!("acquired OpenGL 3.3 graphics state");

    Ok(GL33 {
      state: Rc::new(RefCell::new(state)),
    })
  }
}

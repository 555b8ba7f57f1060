//! Per-thread OpenGL state mirror.
//!
//! OpenGL is a big state machine. [`GLState`] keeps a copy of the few bits of it that learngl
//! touches (viewport, clear color, program, vertex array, array buffer, texture bindings) so that
//! asking for a value that is already set doesn’t reach the driver.

use gl::types::*;
use std::{cell::Cell, error, fmt, marker::PhantomData};

// Whether the current thread may still acquire its graphics state.
thread_local!(static STATE_AVAILABLE: Cell<bool> = Cell::new(true));

/// Number of texture units tracked up front; more are tracked on demand.
const TRACKED_TEXTURE_UNITS: usize = 16;

/// A value mirrored from the driver.
///
/// `None` means we don’t know what the driver holds, so the next write always goes through.
#[derive(Debug)]
struct Cached<T>(Option<T>);

impl<T> Cached<T>
where
  T: Copy + PartialEq,
{
  fn known(value: T) -> Self {
    Cached(Some(value))
  }

  fn get(&self) -> Option<T> {
    self.0
  }

  /// Record `value`; returns `true` if the driver must be told about it.
  fn update(&mut self, value: T) -> bool {
    if self.0 == Some(value) {
      false
    } else {
      self.0 = Some(value);
      true
    }
  }

  fn forget(&mut self) {
    self.0 = None;
  }
}

/// Whether a binding should go through the cache or be forced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Bind {
  Forced,
  Cached,
}

/// The graphics state of the current thread.
///
/// Only one can exist per thread; it is neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct GLState {
  _not_send: PhantomData<*const ()>,
  viewport: Cached<[GLint; 4]>,
  clear_color: Cached<[GLfloat; 4]>,
  texture_unit: Cached<u32>,
  // (target, texture) per texture unit
  textures: Vec<(GLenum, GLuint)>,
  array_buffer: Cached<GLuint>,
  vertex_array: Cached<GLuint>,
  program: Cached<GLuint>,
}

impl GLState {
  /// Acquire the state of the current thread, reading the initial values from the driver.
  ///
  /// Fails if it was already acquired.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    let available = STATE_AVAILABLE.with(|available| available.replace(false));

    if !available {
      return Err(StateQueryError::UnavailableGLState);
    }

    unsafe {
      Ok(GLState {
        _not_send: PhantomData,
        viewport: Cached::known(query_viewport()),
        clear_color: Cached::known(query_clear_color()),
        texture_unit: Cached::known(query_texture_unit()),
        textures: vec![(gl::TEXTURE_2D, 0); TRACKED_TEXTURE_UNITS],
        array_buffer: Cached(None),
        vertex_array: Cached::known(query_integer(gl::VERTEX_ARRAY_BINDING)),
        program: Cached::known(query_integer(gl::CURRENT_PROGRAM)),
      })
    }
  }

  pub(crate) unsafe fn set_viewport(&mut self, [x, y, w, h]: [GLint; 4]) {
    if self.viewport.update([x, y, w, h]) {
      gl::Viewport(x, y, w, h);
    }
  }

  pub(crate) unsafe fn set_clear_color(&mut self, [r, g, b, a]: [GLfloat; 4]) {
    if self.clear_color.update([r, g, b, a]) {
      gl::ClearColor(r, g, b, a);
    }
  }

  pub(crate) unsafe fn set_texture_unit(&mut self, unit: u32) {
    if self.texture_unit.update(unit) {
      gl::ActiveTexture(gl::TEXTURE0 + unit as GLenum);
    }
  }

  /// Bind a texture to the active texture unit.
  pub(crate) unsafe fn bind_texture(&mut self, target: GLenum, handle: GLuint) {
    let unit = self.texture_unit.get().unwrap_or(0) as usize;

    if unit >= self.textures.len() {
      self.textures.resize(unit + 1, (gl::TEXTURE_2D, 0));
    }

    if self.textures[unit] != (target, handle) {
      gl::BindTexture(target, handle);
      self.textures[unit] = (target, handle);
    }
  }

  /// Forget every binding of a texture about to be deleted.
  pub(crate) fn unbind_texture(&mut self, handle: GLuint) {
    for binding in self.textures.iter_mut().filter(|(_, h)| *h == handle) {
      binding.1 = 0;
    }
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced {
      self.array_buffer.forget();
    }

    if self.array_buffer.update(handle) {
      gl::BindBuffer(gl::ARRAY_BUFFER, handle);
    }
  }

  /// Unbind the array buffer if it is `handle`.
  pub(crate) unsafe fn unbind_buffer(&mut self, handle: GLuint) {
    if self.array_buffer.get() == Some(handle) {
      self.bind_array_buffer(0, Bind::Cached);
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint, bind: Bind) {
    if bind == Bind::Forced {
      self.vertex_array.forget();
    }

    if self.vertex_array.update(handle) {
      gl::BindVertexArray(handle);
    }
  }

  pub(crate) unsafe fn unbind_vertex_array(&mut self) {
    self.bind_vertex_array(0, Bind::Cached)
  }

  pub(crate) fn bound_vertex_array(&self) -> Option<GLuint> {
    self.vertex_array.get()
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    if self.program.update(handle) {
      gl::UseProgram(handle);
    }
  }

  pub(crate) fn current_program(&self) -> Option<GLuint> {
    self.program.get()
  }
}

/// An error that might happen when the graphics state is acquired.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The graphics state of the current thread was already acquired.
  UnavailableGLState,
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => {
        f.write_str("graphics state already acquired on this thread")
      }
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn query_integer(name: GLenum) -> GLuint {
  let mut value: GLint = 0;
  gl::GetIntegerv(name, &mut value);
  value as GLuint
}

unsafe fn query_viewport() -> [GLint; 4] {
  let mut viewport = [0; 4];
  gl::GetIntegerv(gl::VIEWPORT, viewport.as_mut_ptr());
  viewport
}

unsafe fn query_clear_color() -> [GLfloat; 4] {
  let mut color = [0.; 4];
  gl::GetFloatv(gl::COLOR_CLEAR_VALUE, color.as_mut_ptr());
  color
}

unsafe fn query_texture_unit() -> u32 {
  query_integer(gl::ACTIVE_TEXTURE) - gl::TEXTURE0
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cached_values_only_update_on_change() {
    let mut program = Cached::known(3);

    assert!(!program.update(3));
    assert!(program.update(4));
    assert_eq!(program.get(), Some(4));

    program.forget();
    assert!(program.update(4));
  }
}

//! Graphics context.
//!
//! A graphics context is an object giving access to a backend bound to a live, current OpenGL
//! context. This crate doesn’t create such contexts; windowing crates do.
//!
//! # On context and threads
//!
//! - An object which type implements `GraphicsContext` must be `!Send` and `!Sync`.
//! - You can only create a single context per thread.

use crate::backend::framebuffer::BackBuffer;

/// Class of graphics context.
///
/// Such a context must not be Send nor Sync, which means that you cannot share it between
/// threads in any way (move / borrow).
pub unsafe trait GraphicsContext {
  /// Backend type this context gives access to.
  type Backend: ?Sized;

  /// Access the backend.
  fn backend(&mut self) -> &mut Self::Backend;

  /// Set the viewport of the back buffer, in pixels.
  fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32)
  where
    Self::Backend: BackBuffer,
  {
    unsafe {
      self
        .backend()
        .set_viewport([x, y, width as i32, height as i32])
    }
  }

  /// Clear the color buffer of the back buffer with the given color.
  fn clear_back_buffer(&mut self, color: [f32; 4])
  where
    Self::Backend: BackBuffer,
  {
    unsafe {
      let backend = self.backend();
      backend.set_clear_color(color);
      backend.clear_color_buffer();
    }
  }

  /// Read back RGBA8 pixels from the back buffer.
  ///
  /// `(x, y)` is the lower-left corner of the region. Texels are returned row by row, from the
  /// bottom row up.
  fn read_back_buffer(&mut self, x: i32, y: i32, width: u32, height: u32) -> Vec<[u8; 4]>
  where
    Self::Backend: BackBuffer,
  {
    unsafe { self.backend().read_pixels([x, y], [width, height]) }
  }
}

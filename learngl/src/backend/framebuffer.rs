//! Back buffer backend interface.

/// Operations on the default framebuffer (the back buffer of the window).
pub unsafe trait BackBuffer {
  /// Set the viewport as `[x, y, width, height]`.
  unsafe fn set_viewport(&mut self, viewport: [i32; 4]);

  /// Set the color used when clearing the color buffer.
  unsafe fn set_clear_color(&mut self, color: [f32; 4]);

  /// Clear the color buffer with the current clear color.
  unsafe fn clear_color_buffer(&mut self);

  /// Read RGBA8 pixels from the back buffer.
  unsafe fn read_pixels(&mut self, origin: [i32; 2], size: [u32; 2]) -> Vec<[u8; 4]>;
}

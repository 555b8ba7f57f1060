use crate::gl33::GL33;
use gl::{self, types::*};
use learngl::backend::framebuffer::BackBuffer;
use std::os::raw::c_void;

unsafe impl BackBuffer for GL33 {
  unsafe fn set_viewport(&mut self, viewport: [i32; 4]) {
    self.state.borrow_mut().set_viewport(viewport);
  }

  unsafe fn set_clear_color(&mut self, color: [f32; 4]) {
    self.state.borrow_mut().set_clear_color(color);
  }

  unsafe fn clear_color_buffer(&mut self) {
    gl::Clear(gl::COLOR_BUFFER_BIT);
  }

  unsafe fn read_pixels(&mut self, origin: [i32; 2], size: [u32; 2]) -> Vec<[u8; 4]> {
    let mut texels = vec![[0u8; 4]; size[0] as usize * size[1] as usize];

    gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
    gl::ReadPixels(
      origin[0],
      origin[1],
      size[0] as GLsizei,
      size[1] as GLsizei,
      gl::RGBA,
      gl::UNSIGNED_BYTE,
      texels.as_mut_ptr() as *mut c_void,
    );

    texels
  }
}

//! The demo quad shaders, loaded from disk, fill both triangles of the indexed quad with the
//! fragment color and leave the corners of the viewport untouched.

use crate::hidden_surface;
use learngl::{
  context::GraphicsContext as _,
  geometry::{position_layout, QUAD_INDICES, QUAD_POSITIONS},
  shader::ShaderProgram,
  tess::TessBuilder,
};
use learngl_gl::GL33;
use std::path::Path;

const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.];
const CLEAR_TEXEL: [u8; 4] = [51, 77, 77, 255];
const QUAD_TEXEL: [u8; 4] = [255, 128, 51, 255];

fn close_enough(a: [u8; 4], b: [u8; 4]) -> bool {
  a.iter().zip(&b).all(|(x, y)| (*x as i16 - *y as i16).abs() <= 1)
}

pub fn fixture() -> Result<(), String> {
  let surface = hidden_surface("quad-fill")?;
  let mut ctx = surface.context;

  let shaders = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/shaders");
  let mut program: ShaderProgram<GL33> =
    ShaderProgram::from_files(&mut ctx, shaders.join("quad.vs"), shaders.join("quad.fs"))
      .map_err(|e| format!("cannot create program: {}", e))?;

  if !program.is_valid() {
    return Err(format!("unexpected diagnostics: {:?}", program.diagnostics()));
  }

  let quad = TessBuilder::new(&mut ctx)
    .set_vertices(&QUAD_POSITIONS, position_layout())
    .set_indices(&QUAD_INDICES)
    .build()
    .map_err(|e| format!("cannot create quad: {}", e))?;

  let [width, height] = ctx.framebuffer_size();
  ctx.set_viewport(0, 0, width, height);
  ctx.clear_back_buffer(CLEAR_COLOR);
  program.use_program();
  quad.render();

  let (w, h) = (width as f32, height as f32);
  let at = |x: f32, y: f32| (x as i32, y as i32);

  // (0.6, 0.6) lies in the first triangle (0, 1, 3), (0.4, 0.4) in the second one (1, 2, 3)
  let inside = [at(w * 0.6, h * 0.6), at(w * 0.4, h * 0.4)];
  let outside = [(0, 0), (width as i32 - 1, height as i32 - 1)];

  for &(x, y) in &inside {
    let texel = ctx.read_back_buffer(x, y, 1, 1).first().copied();

    match texel {
      Some(t) if close_enough(t, QUAD_TEXEL) => (),
      t => return Err(format!("({}, {}) should be covered by the quad, got {:?}", x, y, t)),
    }
  }

  for &(x, y) in &outside {
    let texel = ctx.read_back_buffer(x, y, 1, 1).first().copied();

    match texel {
      Some(t) if close_enough(t, CLEAR_TEXEL) => (),
      t => return Err(format!("({}, {}) should be cleared, got {:?}", x, y, t)),
    }
  }

  Ok(())
}

//! Geometry shared by the tutorial programs.
//!
//! A unit quad centred on the origin, made of two triangles sharing an edge.

use crate::tess::{VertexAttrib, VertexLayout};

/// Positions of the quad corners: top right, bottom right, bottom left, top left.
#[rustfmt::skip]
pub const QUAD_POSITIONS: [f32; 12] = [
   0.5,  0.5, 0.0,
   0.5, -0.5, 0.0,
  -0.5, -0.5, 0.0,
  -0.5,  0.5, 0.0,
];

/// Indices of the two triangles of the quad.
pub const QUAD_INDICES: [u32; 6] = [
  0, 1, 3, // first triangle
  1, 2, 3, // second triangle
];

/// Quad corners with a position, a color and texture coordinates each.
#[rustfmt::skip]
pub const TEXTURED_QUAD: [f32; 32] = [
  // positions       // colors        // texture coords
   0.5,  0.5, 0.0,   1.0, 0.0, 0.0,   1.0, 1.0,
   0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   1.0, 0.0,
  -0.5, -0.5, 0.0,   0.0, 0.0, 1.0,   0.0, 0.0,
  -0.5,  0.5, 0.0,   1.0, 1.0, 0.0,   0.0, 1.0,
];

/// Layout of [`QUAD_POSITIONS`]: a `vec3` at location 0.
pub fn position_layout() -> VertexLayout {
  VertexLayout::new(vec![VertexAttrib::new(0, 3)])
}

/// Layout of [`TEXTURED_QUAD`]: position at location 0, color at 1, texture coordinates at 2.
pub fn textured_layout() -> VertexLayout {
  VertexLayout::new(vec![
    VertexAttrib::new(0, 3),
    VertexAttrib::new(1, 3),
    VertexAttrib::new(2, 2),
  ])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn textured_quad_matches_its_layout() {
    let layout = textured_layout();

    assert_eq!(TEXTURED_QUAD.len() % layout.components(), 0);
    assert_eq!(layout.stride(), 32);
    assert_eq!(layout.offsets(), vec![0, 12, 24]);
  }

  #[test]
  fn quad_indices_cover_every_corner() {
    let vert_nb = QUAD_POSITIONS.len() / position_layout().components();

    for corner in 0..vert_nb as u32 {
      assert!(QUAD_INDICES.contains(&corner));
    }
  }
}

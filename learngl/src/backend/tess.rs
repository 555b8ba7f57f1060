//! Tessellation backend interface.

use crate::tess::{Mode, TessError, VertexLayout};

/// Vertex arrays.
pub unsafe trait Tess {
  /// Backend representation of a tessellation.
  type TessRepr;

  /// Upload interleaved `vertices` described by `layout`, and `indices` if any.
  ///
  /// Inputs have already been validated against each other.
  unsafe fn new_tess(
    &mut self,
    vertices: &[f32],
    layout: &VertexLayout,
    indices: Option<&[u32]>,
  ) -> Result<Self::TessRepr, TessError>;

  /// Draw `count` vertices (or indices, if `indexed`) with the given primitive mode.
  unsafe fn render(tess: &Self::TessRepr, mode: Mode, count: usize, indexed: bool);

  /// Destroy a tessellation.
  unsafe fn destroy_tess(tess: &mut Self::TessRepr);
}

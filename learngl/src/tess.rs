//! Vertex arrays.
//!
//! A [`Tess`] owns interleaved vertex data, an optional index buffer and the primitive mode used
//! to draw them. Vertex data is a flat slice of `f32`; a [`VertexLayout`] tells which attribute
//! lives where:
//!
//! ```
//! use learngl::tess::{VertexAttrib, VertexLayout};
//!
//! // position (vec3), color (vec3), texture coordinates (vec2)
//! let layout = VertexLayout::new(vec![
//!   VertexAttrib::new(0, 3),
//!   VertexAttrib::new(1, 3),
//!   VertexAttrib::new(2, 2),
//! ]);
//!
//! assert_eq!(layout.stride(), 8 * 4);
//! assert_eq!(layout.offsets(), vec![0, 12, 24]);
//! ```

use crate::backend::tess::Tess as TessBackend;
use crate::context::GraphicsContext;
use std::{error, fmt, mem};

/// Primitive mode used to assemble vertices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
  /// A single point per vertex.
  Point,
  /// A line, defined by two vertices.
  Line,
  /// A strip line, defined by at least two vertices.
  LineStrip,
  /// A triangle, defined by three vertices.
  Triangle,
  /// A triangle fan, defined by at least three vertices.
  TriangleFan,
  /// A triangle strip, defined by at least three vertices.
  TriangleStrip,
}

/// A single floating-point vertex attribute.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VertexAttrib {
  /// Attribute index, as in `layout (location = index)` in the vertex shader.
  pub index: u32,
  /// Number of `f32` components (1 to 4).
  pub components: usize,
}

impl VertexAttrib {
  /// Create a new attribute.
  pub const fn new(index: u32, components: usize) -> Self {
    VertexAttrib { index, components }
  }
}

/// Ordered description of the attributes of an interleaved vertex.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VertexLayout {
  attribs: Vec<VertexAttrib>,
}

impl VertexLayout {
  /// Create a layout; attributes are packed in the given order.
  pub fn new(attribs: Vec<VertexAttrib>) -> Self {
    VertexLayout { attribs }
  }

  /// Attributes of the layout.
  pub fn attribs(&self) -> &[VertexAttrib] {
    &self.attribs
  }

  /// Number of `f32` components in a single vertex.
  pub fn components(&self) -> usize {
    self.attribs.iter().map(|a| a.components).sum()
  }

  /// Size of a single vertex, in bytes.
  pub fn stride(&self) -> usize {
    self.components() * mem::size_of::<f32>()
  }

  /// Byte offset of every attribute within a vertex.
  pub fn offsets(&self) -> Vec<usize> {
    let mut off = 0;

    self
      .attribs
      .iter()
      .map(|a| {
        let current = off;
        off += a.components * mem::size_of::<f32>();
        current
      })
      .collect()
  }
}

/// Errors that can occur while building a [`Tess`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TessError {
  /// No vertex data was provided.
  NoVertices,
  /// The vertex layout has no attribute, or an attribute with an invalid component count.
  InvalidLayout,
  /// The vertex data length is not a multiple of the number of components per vertex.
  ///
  /// Holds the data length and the number of components per vertex.
  LengthMismatch(usize, usize),
  /// An index refers to a vertex that doesn’t exist.
  ///
  /// Holds the faulty index and the number of vertices.
  IndexOutOfRange(u32, usize),
  /// The backend failed to allocate the vertex array.
  CreationFailed(String),
}

impl fmt::Display for TessError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      TessError::NoVertices => f.write_str("no vertices"),
      TessError::InvalidLayout => f.write_str("invalid vertex layout"),
      TessError::LengthMismatch(len, comps) => write!(
        f,
        "vertex data length {} is not a multiple of {} components",
        len, comps
      ),
      TessError::IndexOutOfRange(index, vert_nb) => {
        write!(f, "index {} out of range ({} vertices)", index, vert_nb)
      }
      TessError::CreationFailed(ref reason) => write!(f, "cannot create tessellation: {}", reason),
    }
  }
}

impl error::Error for TessError {}

/// Builder of [`Tess`].
pub struct TessBuilder<'a, C> {
  ctx: &'a mut C,
  vertices: &'a [f32],
  layout: VertexLayout,
  indices: Option<&'a [u32]>,
  mode: Mode,
}

impl<'a, C> TessBuilder<'a, C>
where
  C: GraphicsContext,
  C::Backend: TessBackend + Sized,
{
  /// Start building a tessellation. The default mode is [`Mode::Triangle`].
  pub fn new(ctx: &'a mut C) -> Self {
    TessBuilder {
      ctx,
      vertices: &[],
      layout: VertexLayout::new(Vec::new()),
      indices: None,
      mode: Mode::Triangle,
    }
  }

  /// Set the interleaved vertex data and its layout.
  pub fn set_vertices(mut self, vertices: &'a [f32], layout: VertexLayout) -> Self {
    self.vertices = vertices;
    self.layout = layout;
    self
  }

  /// Set the index data; the tessellation is then drawn with indexed draw calls.
  pub fn set_indices(mut self, indices: &'a [u32]) -> Self {
    self.indices = Some(indices);
    self
  }

  /// Set the primitive mode.
  pub fn set_mode(mut self, mode: Mode) -> Self {
    self.mode = mode;
    self
  }

  /// Validate the inputs and upload them.
  pub fn build(self) -> Result<Tess<C::Backend>, TessError> {
    let comps = self.layout.components();

    if self.layout.attribs().is_empty()
      || self
        .layout
        .attribs()
        .iter()
        .any(|a| a.components == 0 || a.components > 4)
    {
      return Err(TessError::InvalidLayout);
    }

    if self.vertices.is_empty() {
      return Err(TessError::NoVertices);
    }

    if self.vertices.len() % comps != 0 {
      return Err(TessError::LengthMismatch(self.vertices.len(), comps));
    }

    let vert_nb = self.vertices.len() / comps;

    if let Some(indices) = self.indices {
      if let Some(&index) = indices.iter().find(|&&i| i as usize >= vert_nb) {
        return Err(TessError::IndexOutOfRange(index, vert_nb));
      }
    }

    let repr = unsafe {
      self
        .ctx
        .backend()
        .new_tess(self.vertices, &self.layout, self.indices)?
    };

    log::debug!(
      "created tessellation: {} vertices, {:?} indices, {:?}",
      vert_nb,
      self.indices.map(<[u32]>::len),
      self.mode
    );

    Ok(Tess {
      repr,
      mode: self.mode,
      vert_nb,
      index_nb: self.indices.map(<[u32]>::len),
    })
  }
}

/// GPU vertex array with its buffers.
pub struct Tess<S>
where
  S: TessBackend,
{
  repr: S::TessRepr,
  mode: Mode,
  vert_nb: usize,
  index_nb: Option<usize>,
}

impl<S> Tess<S>
where
  S: TessBackend,
{
  /// Primitive mode.
  pub fn mode(&self) -> Mode {
    self.mode
  }

  /// Number of vertices.
  pub fn vert_nb(&self) -> usize {
    self.vert_nb
  }

  /// Number of indices, if indexed.
  pub fn index_nb(&self) -> Option<usize> {
    self.index_nb
  }

  /// Draw the whole tessellation with the current program.
  pub fn render(&self) {
    unsafe {
      match self.index_nb {
        Some(count) => S::render(&self.repr, self.mode, count, true),
        None => S::render(&self.repr, self.mode, self.vert_nb, false),
      }
    }
  }
}

impl<S> Drop for Tess<S>
where
  S: TessBackend,
{
  fn drop(&mut self) {
    unsafe { S::destroy_tess(&mut self.repr) }
  }
}

impl<S> fmt::Debug for Tess<S>
where
  S: TessBackend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Tess")
      .field("mode", &self.mode)
      .field("vert_nb", &self.vert_nb)
      .field("index_nb", &self.index_nb)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::{position_layout, textured_layout, QUAD_INDICES, QUAD_POSITIONS, TEXTURED_QUAD};
  use crate::test_backend::MockContext;

  #[test]
  fn layout_offsets_accumulate() {
    let layout = VertexLayout::new(vec![VertexAttrib::new(0, 2), VertexAttrib::new(1, 4)]);

    assert_eq!(layout.components(), 6);
    assert_eq!(layout.stride(), 24);
    assert_eq!(layout.offsets(), vec![0, 8]);
  }

  #[test]
  fn indexed_quad_draws_six_indices() {
    let mut ctx = MockContext::new();
    let tess = TessBuilder::new(&mut ctx)
      .set_vertices(&QUAD_POSITIONS, position_layout())
      .set_indices(&QUAD_INDICES)
      .build()
      .unwrap();

    tess.render();

    assert_eq!(tess.vert_nb(), 4);
    assert_eq!(tess.index_nb(), Some(6));
    assert_eq!(ctx.state().draws, vec![(Mode::Triangle, 6, true)]);
  }

  #[test]
  fn direct_draw_without_indices() {
    let mut ctx = MockContext::new();
    let tess = TessBuilder::new(&mut ctx)
      .set_vertices(&QUAD_POSITIONS, position_layout())
      .set_mode(Mode::TriangleFan)
      .build()
      .unwrap();

    tess.render();

    assert_eq!(ctx.state().draws, vec![(Mode::TriangleFan, 4, false)]);
  }

  #[test]
  fn textured_quad_layout() {
    let mut ctx = MockContext::new();
    let tess = TessBuilder::new(&mut ctx)
      .set_vertices(&TEXTURED_QUAD, textured_layout())
      .set_indices(&QUAD_INDICES)
      .build()
      .unwrap();

    assert_eq!(tess.vert_nb(), 4);
  }

  #[test]
  fn rejects_bad_inputs() {
    let mut ctx = MockContext::new();

    let no_vertices = TessBuilder::new(&mut ctx)
      .set_vertices(&[], position_layout())
      .build();
    assert_eq!(no_vertices.unwrap_err(), TessError::NoVertices);

    let empty_layout = TessBuilder::new(&mut ctx)
      .set_vertices(&QUAD_POSITIONS, VertexLayout::new(Vec::new()))
      .build();
    assert_eq!(empty_layout.unwrap_err(), TessError::InvalidLayout);

    let mismatch = TessBuilder::new(&mut ctx)
      .set_vertices(&QUAD_POSITIONS[..10], position_layout())
      .build();
    assert_eq!(mismatch.unwrap_err(), TessError::LengthMismatch(10, 3));

    let out_of_range = TessBuilder::new(&mut ctx)
      .set_vertices(&QUAD_POSITIONS, position_layout())
      .set_indices(&[0, 1, 4])
      .build();
    assert_eq!(out_of_range.unwrap_err(), TessError::IndexOutOfRange(4, 4));

    assert_eq!(ctx.state().live_tess, 0);
  }

  #[test]
  fn dropping_releases_the_vertex_array() {
    let mut ctx = MockContext::new();
    let tess = TessBuilder::new(&mut ctx)
      .set_vertices(&QUAD_POSITIONS, position_layout())
      .build()
      .unwrap();

    assert_eq!(ctx.state().live_tess, 1);
    drop(tess);
    assert_eq!(ctx.state().live_tess, 0);
  }
}

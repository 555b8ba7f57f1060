use crate::gl33::{
  state::{Bind, GLState},
  GL33,
};
use gl::{self, types::*};
use learngl::{
  backend::tess::Tess as TessBackend,
  tess::{Mode, TessError, VertexLayout},
};
use std::{cell::RefCell, mem, os::raw::c_void, ptr, rc::Rc};

#[derive(Debug)]
pub struct Tess {
  vao: GLuint,
  vbo: GLuint,
  ebo: Option<GLuint>,
  state: Rc<RefCell<GLState>>,
}

unsafe impl TessBackend for GL33 {
  type TessRepr = Tess;

  unsafe fn new_tess(
    &mut self,
    vertices: &[f32],
    layout: &VertexLayout,
    indices: Option<&[u32]>,
  ) -> Result<Self::TessRepr, TessError> {
    let mut state = self.state.borrow_mut();

    let mut vao: GLuint = 0;
    gl::GenVertexArrays(1, &mut vao);

    if vao == 0 {
      return Err(TessError::CreationFailed(
        "unable to create vertex array".to_owned(),
      ));
    }

    state.bind_vertex_array(vao, Bind::Forced);

    let vbo = upload_buffer(gl::ARRAY_BUFFER, vertices);
    state.bind_array_buffer(vbo, Bind::Forced);

    // the element array binding is part of the vertex array state, so it must be bound while
    // the vertex array is
    let ebo = indices.map(|indices| upload_buffer(gl::ELEMENT_ARRAY_BUFFER, indices));

    set_vertex_pointers(layout);

    state.unbind_vertex_array();

    Ok(Tess {
      vao,
      vbo,
      ebo,
      state: self.state.clone(),
    })
  }

  unsafe fn render(tess: &Self::TessRepr, mode: Mode, count: usize, indexed: bool) {
    tess
      .state
      .borrow_mut()
      .bind_vertex_array(tess.vao, Bind::Cached);

    if indexed {
      gl::DrawElements(
        opengl_mode(mode),
        count as GLsizei,
        gl::UNSIGNED_INT,
        ptr::null(),
      );
    } else {
      gl::DrawArrays(opengl_mode(mode), 0, count as GLsizei);
    }
  }

  unsafe fn destroy_tess(tess: &mut Self::TessRepr) {
    let mut state = tess.state.borrow_mut();

    if state.bound_vertex_array() == Some(tess.vao) {
      state.unbind_vertex_array();
    }

    state.unbind_buffer(tess.vbo);
    gl::DeleteBuffers(1, &tess.vbo);

    if let Some(ebo) = tess.ebo {
      gl::DeleteBuffers(1, &ebo);
    }

    gl::DeleteVertexArrays(1, &tess.vao);
  }
}

// Create a buffer, bind it to `target` and fill it with `data`.
unsafe fn upload_buffer<T>(target: GLenum, data: &[T]) -> GLuint {
  let mut handle: GLuint = 0;

  gl::GenBuffers(1, &mut handle);
  gl::BindBuffer(target, handle);
  gl::BufferData(
    target,
    (mem::size_of::<T>() * data.len()) as GLsizeiptr,
    data.as_ptr() as *const c_void,
    gl::STATIC_DRAW,
  );

  handle
}

// Give OpenGL types information on the content of the VBO by setting vertex descriptors and
// pointers to buffer memory.
unsafe fn set_vertex_pointers(layout: &VertexLayout) {
  let stride = layout.stride() as GLsizei;

  for (attrib, off) in layout.attribs().iter().zip(layout.offsets()) {
    gl::VertexAttribPointer(
      attrib.index as GLuint,
      attrib.components as GLint,
      gl::FLOAT,
      gl::FALSE,
      stride,
      off as *const c_void,
    );
    gl::EnableVertexAttribArray(attrib.index as GLuint);
  }
}

fn opengl_mode(mode: Mode) -> GLenum {
  match mode {
    Mode::Point => gl::POINTS,
    Mode::Line => gl::LINES,
    Mode::LineStrip => gl::LINE_STRIP,
    Mode::Triangle => gl::TRIANGLES,
    Mode::TriangleFan => gl::TRIANGLE_FAN,
    Mode::TriangleStrip => gl::TRIANGLE_STRIP,
  }
}

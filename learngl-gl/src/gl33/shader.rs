use crate::gl33::{state::GLState, GL33};
use gl::{self, types::*};
use learngl::{
  backend::shader::Shader,
  shader::{ProgramError, StageError, StageType, UniformValue},
};
use std::{
  cell::RefCell,
  ffi::CString,
  ptr::{null, null_mut},
  rc::Rc,
};

#[derive(Debug)]
pub struct Stage {
  handle: GLuint,
  ty: StageType,
}

#[derive(Debug)]
pub struct Program {
  pub(crate) handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

unsafe impl Shader for GL33 {
  type StageRepr = Stage;

  type ProgramRepr = Program;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let handle = gl::CreateShader(opengl_shader_type(ty));

    if handle == 0 {
      return Err(StageError::CreationFailed(ty));
    }

    // interior NUL bytes cannot be passed to the driver; everything after the first one is
    // dropped, which the compiler will complain about
    let src = src.split('\0').next().unwrap_or_default();
    let c_src = CString::new(src.as_bytes()).unwrap_or_default();
    gl::ShaderSource(handle, 1, [c_src.as_ptr()].as_ptr(), null());
    gl::CompileShader(handle);

    Ok(Stage { handle, ty })
  }

  unsafe fn stage_status(stage: &Self::StageRepr) -> Result<(), StageError> {
    let mut compiled: GLint = gl::FALSE.into();
    gl::GetShaderiv(stage.handle, gl::COMPILE_STATUS, &mut compiled);

    if compiled == gl::TRUE.into() {
      Ok(())
    } else {
      let mut log_len: GLint = 0;
      gl::GetShaderiv(stage.handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      gl::GetShaderInfoLog(
        stage.handle,
        log_len,
        null_mut(),
        log.as_mut_ptr() as *mut GLchar,
      );

      Err(StageError::compilation_failed(stage.ty, info_log(log)))
    }
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    gl::DeleteShader(stage.handle);
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let handle = gl::CreateProgram();

    if handle == 0 {
      return Err(ProgramError::CreationFailed);
    }

    gl::AttachShader(handle, vertex.handle);
    gl::AttachShader(handle, fragment.handle);
    gl::LinkProgram(handle);

    // stages can go away once linked
    gl::DetachShader(handle, vertex.handle);
    gl::DetachShader(handle, fragment.handle);

    Ok(Program {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn link_status(program: &Self::ProgramRepr) -> Result<(), ProgramError> {
    let mut linked: GLint = gl::FALSE.into();
    gl::GetProgramiv(program.handle, gl::LINK_STATUS, &mut linked);

    if linked == gl::TRUE.into() {
      Ok(())
    } else {
      let mut log_len: GLint = 0;
      gl::GetProgramiv(program.handle, gl::INFO_LOG_LENGTH, &mut log_len);

      let mut log: Vec<u8> = vec![0; log_len.max(0) as usize];
      gl::GetProgramInfoLog(
        program.handle,
        log_len,
        null_mut(),
        log.as_mut_ptr() as *mut GLchar,
      );

      Err(ProgramError::link_failed(info_log(log)))
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    let mut state = program.state.borrow_mut();

    if state.current_program() == Some(program.handle) {
      state.use_program(0);
    }

    gl::DeleteProgram(program.handle);
  }

  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32 {
    program.handle
  }

  unsafe fn use_program(program: &mut Self::ProgramRepr) {
    program.state.borrow_mut().use_program(program.handle);
  }

  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> Option<i32> {
    let c_name = CString::new(name.as_bytes()).ok()?;
    let location = gl::GetUniformLocation(program.handle, c_name.as_ptr() as *const GLchar);

    // inactive or unknown uniforms have a negative location
    if location < 0 {
      None
    } else {
      Some(location)
    }
  }

  unsafe fn set_uniform(_: &mut Self::ProgramRepr, location: i32, value: UniformValue) {
    match value {
      UniformValue::Bool(b) => gl::Uniform1i(location, b as GLint),
      UniformValue::Int(i) => gl::Uniform1i(location, i),
      UniformValue::Float(x) => gl::Uniform1f(location, x),
      UniformValue::Vec4(v) => gl::Uniform4fv(location, 1, v.as_ptr()),
    }
  }
}

fn opengl_shader_type(t: StageType) -> GLenum {
  match t {
    StageType::VertexShader => gl::VERTEX_SHADER,
    StageType::FragmentShader => gl::FRAGMENT_SHADER,
  }
}

// Turn a raw, NUL-terminated info log into a string.
fn info_log(mut log: Vec<u8>) -> String {
  while log.last() == Some(&0) {
    log.pop();
  }

  String::from_utf8_lossy(&log).trim_end().to_owned()
}

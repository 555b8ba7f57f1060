//! In-memory backend used by unit tests.
//!
//! It “compiles” a stage by checking it has a `main` function and balanced braces, fails linking
//! when a stage failed to compile, and treats every `uniform <type> <name>;` declaration as an
//! active uniform. Every call is recorded in a shared [`MockState`].

use crate::backend::{
  framebuffer::BackBuffer,
  shader::Shader,
  tess::Tess,
  texture::Texture,
};
use crate::context::GraphicsContext;
use crate::shader::{ProgramError, StageError, StageType, UniformValue};
use crate::tess::{Mode, TessError, VertexLayout};
use crate::texture::{GenMipmaps, PixelFormat, Sampler, TextureError};
use std::{
  cell::{Ref, RefCell},
  collections::HashMap,
  rc::Rc,
};

pub const VS_PASSTHROUGH: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
void main() {
  gl_Position = vec4(aPos, 1.0);
}
";

pub const FS_ORANGE: &str = "#version 330 core
out vec4 FragColor;
void main() {
  FragColor = vec4(1.0, 0.5, 0.2, 1.0);
}
";

#[derive(Debug, Default)]
pub struct MockState {
  next_handle: u32,
  pub stages_created: usize,
  pub live_stages: usize,
  pub live_programs: usize,
  pub current_program: u32,
  pub uniform_writes: Vec<(u32, i32, UniformValue)>,
  pub live_tess: usize,
  pub draws: Vec<(Mode, usize, bool)>,
  pub live_textures: usize,
  next_texture: u32,
  pub last_texels: Vec<u8>,
  pub bound_textures: HashMap<u32, u32>,
  pub viewport: [i32; 4],
  pub clear_color: [f32; 4],
  pub clears: usize,
  pub refuse_stages: bool,
}

impl MockState {
  fn gen_handle(&mut self) -> u32 {
    self.next_handle += 1;
    self.next_handle
  }
}

#[derive(Debug)]
pub struct MockBackend {
  state: Rc<RefCell<MockState>>,
}

#[derive(Debug)]
pub struct MockContext {
  backend: MockBackend,
}

impl MockContext {
  pub fn new() -> Self {
    MockContext {
      backend: MockBackend {
        state: Rc::new(RefCell::new(MockState::default())),
      },
    }
  }

  pub fn state(&self) -> Ref<MockState> {
    self.backend.state.borrow()
  }

  /// Make every subsequent stage allocation fail, as a driver returning a null handle would.
  pub fn refuse_stages(&self) {
    self.backend.state.borrow_mut().refuse_stages = true;
  }
}

unsafe impl GraphicsContext for MockContext {
  type Backend = MockBackend;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}

pub struct MockStage {
  ty: StageType,
  src: String,
  state: Rc<RefCell<MockState>>,
}

pub struct MockProgram {
  handle: u32,
  uniforms: Vec<String>,
  link_log: Option<String>,
  state: Rc<RefCell<MockState>>,
}

fn compiles(src: &str) -> bool {
  let opened = src.matches('{').count();
  let closed = src.matches('}').count();

  src.contains("void main()") && opened == closed
}

fn declared_uniforms(src: &str) -> impl Iterator<Item = String> + '_ {
  src.lines().filter_map(|line| {
    let line = line.trim();

    if line.starts_with("uniform ") {
      line
        .trim_end_matches(';')
        .split_whitespace()
        .last()
        .map(str::to_owned)
    } else {
      None
    }
  })
}

unsafe impl Shader for MockBackend {
  type StageRepr = MockStage;

  type ProgramRepr = MockProgram;

  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    let mut state = self.state.borrow_mut();

    if state.refuse_stages {
      return Err(StageError::CreationFailed(ty));
    }

    state.stages_created += 1;
    state.live_stages += 1;

    Ok(MockStage {
      ty,
      src: src.to_owned(),
      state: self.state.clone(),
    })
  }

  unsafe fn stage_status(stage: &Self::StageRepr) -> Result<(), StageError> {
    if compiles(&stage.src) {
      Ok(())
    } else {
      Err(StageError::compilation_failed(
        stage.ty,
        "0:1(1): error: syntax error, unexpected end of file",
      ))
    }
  }

  unsafe fn destroy_stage(stage: &mut Self::StageRepr) {
    stage.state.borrow_mut().live_stages -= 1;
  }

  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    let mut state = self.state.borrow_mut();
    state.live_programs += 1;
    let handle = state.gen_handle();

    let link_log = if compiles(&vertex.src) && compiles(&fragment.src) {
      None
    } else {
      Some("error: linking with uncompiled shader".to_owned())
    };

    let uniforms = declared_uniforms(&vertex.src)
      .chain(declared_uniforms(&fragment.src))
      .collect();

    Ok(MockProgram {
      handle,
      uniforms,
      link_log,
      state: self.state.clone(),
    })
  }

  unsafe fn link_status(program: &Self::ProgramRepr) -> Result<(), ProgramError> {
    match program.link_log {
      Some(ref log) => Err(ProgramError::link_failed(log.clone())),
      None => Ok(()),
    }
  }

  unsafe fn destroy_program(program: &mut Self::ProgramRepr) {
    let mut state = program.state.borrow_mut();
    state.live_programs -= 1;

    if state.current_program == program.handle {
      state.current_program = 0;
    }
  }

  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32 {
    program.handle
  }

  unsafe fn use_program(program: &mut Self::ProgramRepr) {
    program.state.borrow_mut().current_program = program.handle;
  }

  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> Option<i32> {
    program
      .uniforms
      .iter()
      .position(|u| u == name)
      .map(|i| i as i32)
  }

  unsafe fn set_uniform(program: &mut Self::ProgramRepr, location: i32, value: UniformValue) {
    program
      .state
      .borrow_mut()
      .uniform_writes
      .push((program.handle, location, value));
  }
}

pub struct MockTess {
  state: Rc<RefCell<MockState>>,
}

unsafe impl Tess for MockBackend {
  type TessRepr = MockTess;

  unsafe fn new_tess(
    &mut self,
    _: &[f32],
    _: &VertexLayout,
    _: Option<&[u32]>,
  ) -> Result<Self::TessRepr, TessError> {
    self.state.borrow_mut().live_tess += 1;

    Ok(MockTess {
      state: self.state.clone(),
    })
  }

  unsafe fn render(tess: &Self::TessRepr, mode: Mode, count: usize, indexed: bool) {
    tess.state.borrow_mut().draws.push((mode, count, indexed));
  }

  unsafe fn destroy_tess(tess: &mut Self::TessRepr) {
    tess.state.borrow_mut().live_tess -= 1;
  }
}

pub struct MockTexture {
  handle: u32,
  state: Rc<RefCell<MockState>>,
}

unsafe impl Texture for MockBackend {
  type TextureRepr = MockTexture;

  unsafe fn new_texture(
    &mut self,
    _: [u32; 2],
    _: Sampler,
    _: GenMipmaps,
    _: PixelFormat,
    texels: &[u8],
  ) -> Result<Self::TextureRepr, TextureError> {
    let mut state = self.state.borrow_mut();
    state.live_textures += 1;
    state.next_texture += 1;
    state.last_texels = texels.to_vec();

    Ok(MockTexture {
      handle: state.next_texture,
      state: self.state.clone(),
    })
  }

  unsafe fn bind_texture(texture: &Self::TextureRepr, unit: u32) {
    texture
      .state
      .borrow_mut()
      .bound_textures
      .insert(unit, texture.handle);
  }

  unsafe fn destroy_texture(texture: &mut Self::TextureRepr) {
    let mut state = texture.state.borrow_mut();
    state.live_textures -= 1;
    state.bound_textures.retain(|_, h| *h != texture.handle);
  }
}

unsafe impl BackBuffer for MockBackend {
  unsafe fn set_viewport(&mut self, viewport: [i32; 4]) {
    self.state.borrow_mut().viewport = viewport;
  }

  unsafe fn set_clear_color(&mut self, color: [f32; 4]) {
    self.state.borrow_mut().clear_color = color;
  }

  unsafe fn clear_color_buffer(&mut self) {
    self.state.borrow_mut().clears += 1;
  }

  unsafe fn read_pixels(&mut self, _: [i32; 2], size: [u32; 2]) -> Vec<[u8; 4]> {
    let color = self.state.borrow().clear_color;
    let texel = [
      (color[0] * 255.).round() as u8,
      (color[1] * 255.).round() as u8,
      (color[2] * 255.).round() as u8,
      (color[3] * 255.).round() as u8,
    ];

    vec![texel; size[0] as usize * size[1] as usize]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clearing_and_reading_back() {
    let mut ctx = MockContext::new();

    ctx.set_viewport(0, 0, 800, 600);
    ctx.clear_back_buffer([0.2, 0.3, 0.3, 1.0]);
    let pixels = ctx.read_back_buffer(0, 0, 2, 1);

    assert_eq!(ctx.state().viewport, [0, 0, 800, 600]);
    assert_eq!(ctx.state().clears, 1);
    assert_eq!(pixels, vec![[51, 77, 77, 255]; 2]);
  }
}

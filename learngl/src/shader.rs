//! Shader programs.
//!
//! A [`ShaderProgram`] is made of a vertex stage and a fragment stage, compiled and linked
//! together. Construction is *best-effort*: compilation and link failures are logged and kept on
//! the program (see [`ShaderProgram::diagnostics`]) but never abort construction. You still get
//! a program back, which will most likely render nothing.
//!
//! Once built, a program is made current with [`ShaderProgram::use_program`] and fed with
//! uniform values by name. Setting a uniform that the linked program doesn’t know about is a
//! no-op.

use crate::backend::shader::Shader;
use crate::context::GraphicsContext;
use std::{
  error, fmt, fs, io,
  path::{Path, PathBuf},
};

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StageError {
  /// Occurs when a shader fails to compile.
  CompilationFailed(StageType, String),
  /// The driver could not allocate the stage object.
  CreationFailed(StageType),
}

impl StageError {
  /// Create a compilation failure.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }

  /// Stage type the error is about.
  pub fn stage_type(&self) -> StageType {
    match *self {
      StageError::CompilationFailed(ty, _) | StageError::CreationFailed(ty) => ty,
    }
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),

      StageError::CreationFailed(ty) => write!(f, "unable to create {}", ty),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`ShaderProgram`] can generate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
  /// A shader stage failed to compile.
  StageError(StageError),
  /// The program object could not be created.
  CreationFailed,
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl ProgramError {
  /// Create a link failure.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::StageError(ref e) => write!(f, "shader program has stage error: {}", e),

      ProgramError::CreationFailed => f.write_str("unable to create shader program"),

      ProgramError::LinkFailed(ref s) => write!(f, "shader program failed to link: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    }
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::StageError(e)
  }
}

/// Hard errors preventing a [`ShaderProgram`] from being built at all.
#[derive(Debug)]
pub enum ShaderError {
  /// A shader source file could not be read.
  Read {
    /// Path of the file.
    path: PathBuf,
    /// Underlying I/O error.
    source: io::Error,
  },
  /// A stage object could not be created.
  Stage(StageError),
  /// The program object could not be created.
  Program(ProgramError),
}

impl fmt::Display for ShaderError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ShaderError::Read { ref path, ref source } => {
        write!(f, "cannot read shader file {}: {}", path.display(), source)
      }
      ShaderError::Stage(ref e) => write!(f, "cannot create shader stage: {}", e),
      ShaderError::Program(ref e) => write!(f, "cannot create shader program: {}", e),
    }
  }
}

impl error::Error for ShaderError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ShaderError::Read { source, .. } => Some(source),
      ShaderError::Stage(e) => Some(e),
      ShaderError::Program(e) => Some(e),
    }
  }
}

impl From<StageError> for ShaderError {
  fn from(e: StageError) -> Self {
    ShaderError::Stage(e)
  }
}

impl From<ProgramError> for ShaderError {
  fn from(e: ProgramError) -> Self {
    ShaderError::Program(e)
  }
}

/// Values that can be written into a uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
  /// Boolean, sent as an integer (`0` or `1`).
  Bool(bool),
  /// 32-bit signed integer; also used to select texture units for samplers.
  Int(i32),
  /// 32-bit floating point.
  Float(f32),
  /// Four 32-bit floating points.
  Vec4([f32; 4]),
}

/// Resolved location of an active uniform in a given program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct UniformLocation {
  index: i32,
}

impl UniformLocation {
  /// Raw location index.
  pub fn index(self) -> i32 {
    self.index
  }
}

// A compiled stage, destroyed as soon as it goes out of scope; programs keep their own copy of
// the linked code.
struct Stage<S>
where
  S: Shader,
{
  repr: S::StageRepr,
}

impl<S> Stage<S>
where
  S: Shader,
{
  fn new<C>(ctx: &mut C, ty: StageType, src: &str) -> Result<Self, StageError>
  where
    C: GraphicsContext<Backend = S>,
  {
    unsafe { ctx.backend().new_stage(ty, src).map(|repr| Stage { repr }) }
  }

  fn status(&self) -> Result<(), StageError> {
    unsafe { S::stage_status(&self.repr) }
  }
}

impl<S> Drop for Stage<S>
where
  S: Shader,
{
  fn drop(&mut self) {
    unsafe { S::destroy_stage(&mut self.repr) }
  }
}

/// A linked shader program.
///
/// The underlying program object is released when this value is dropped.
pub struct ShaderProgram<S>
where
  S: Shader,
{
  repr: S::ProgramRepr,
  diagnostics: Vec<ProgramError>,
}

impl<S> ShaderProgram<S>
where
  S: Shader,
{
  /// Read a vertex and a fragment shader from disk, then compile and link them.
  ///
  /// Both files are read before anything is compiled: if either of them cannot be read, an error
  /// is returned and no GPU object is created.
  pub fn from_files<C>(
    ctx: &mut C,
    vertex_path: impl AsRef<Path>,
    fragment_path: impl AsRef<Path>,
  ) -> Result<Self, ShaderError>
  where
    C: GraphicsContext<Backend = S>,
  {
    let vertex_src = read_source(vertex_path.as_ref())?;
    let fragment_src = read_source(fragment_path.as_ref())?;

    Self::from_strings(ctx, &vertex_src, &fragment_src)
  }

  /// Compile and link a vertex and a fragment shader from their sources.
  ///
  /// Compilation and link failures are logged and recorded but do not make this function fail;
  /// only the inability to create the GPU objects does.
  pub fn from_strings<C>(ctx: &mut C, vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError>
  where
    C: GraphicsContext<Backend = S>,
  {
    let mut diagnostics = Vec::new();

    let vertex = Stage::new(ctx, StageType::VertexShader, vertex_src)?;
    check(vertex.status().map_err(ProgramError::from), &mut diagnostics);

    let fragment = Stage::new(ctx, StageType::FragmentShader, fragment_src)?;
    check(fragment.status().map_err(ProgramError::from), &mut diagnostics);

    let repr = unsafe { ctx.backend().new_program(&vertex.repr, &fragment.repr)? };
    check(unsafe { S::link_status(&repr) }, &mut diagnostics);

    let program = ShaderProgram { repr, diagnostics };
    log::debug!(
      "created shader program {} ({} diagnostic(s))",
      program.handle(),
      program.diagnostics.len()
    );

    Ok(program)
  }

  /// Raw handle of the program object.
  pub fn handle(&self) -> u32 {
    unsafe { S::program_handle(&self.repr) }
  }

  /// Compilation and link failures that occurred while building this program, in order.
  pub fn diagnostics(&self) -> &[ProgramError] {
    &self.diagnostics
  }

  /// Whether both stages compiled and the program linked.
  pub fn is_valid(&self) -> bool {
    self.diagnostics.is_empty()
  }

  /// Make this program the current one for subsequent draw calls.
  pub fn use_program(&mut self) {
    unsafe { S::use_program(&mut self.repr) }
  }

  /// Look up the location of an active uniform.
  pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
    unsafe { S::uniform_location(&self.repr, name) }.map(|index| UniformLocation { index })
  }

  /// Write a value at an already resolved location.
  ///
  /// The program is made current first.
  pub fn set(&mut self, location: UniformLocation, value: UniformValue) {
    unsafe {
      S::use_program(&mut self.repr);
      S::set_uniform(&mut self.repr, location.index, value);
    }
  }

  /// Write a value into the uniform called `name`.
  ///
  /// Does nothing if `name` is not an active uniform of this program.
  pub fn set_value(&mut self, name: &str, value: UniformValue) {
    match self.uniform(name) {
      Some(location) => self.set(location, value),
      None => log::trace!("no active uniform {} in program {}", name, self.handle()),
    }
  }

  /// Set a boolean uniform.
  pub fn set_bool(&mut self, name: &str, value: bool) {
    self.set_value(name, UniformValue::Bool(value))
  }

  /// Set an integer uniform.
  pub fn set_int(&mut self, name: &str, value: i32) {
    self.set_value(name, UniformValue::Int(value))
  }

  /// Set a float uniform.
  pub fn set_float(&mut self, name: &str, value: f32) {
    self.set_value(name, UniformValue::Float(value))
  }

  /// Set a `vec4` uniform.
  pub fn set_vec4(&mut self, name: &str, value: [f32; 4]) {
    self.set_value(name, UniformValue::Vec4(value))
  }
}

impl<S> Drop for ShaderProgram<S>
where
  S: Shader,
{
  fn drop(&mut self) {
    unsafe { S::destroy_program(&mut self.repr) }
  }
}

impl<S> fmt::Debug for ShaderProgram<S>
where
  S: Shader,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("ShaderProgram")
      .field("handle", &self.handle())
      .field("diagnostics", &self.diagnostics)
      .finish()
  }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
  fs::read_to_string(path).map_err(|source| ShaderError::Read {
    path: path.to_owned(),
    source,
  })
}

fn check(status: Result<(), ProgramError>, diagnostics: &mut Vec<ProgramError>) {
  if let Err(e) = status {
    log::error!("{}", e);
    diagnostics.push(e);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_backend::{MockContext, FS_ORANGE, VS_PASSTHROUGH};
  use std::env;

  #[test]
  fn valid_sources_build_a_clean_program() {
    let mut ctx = MockContext::new();
    let program = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, FS_ORANGE).unwrap();

    assert!(program.is_valid());
    assert!(program.diagnostics().is_empty());
    assert_ne!(program.handle(), 0);
  }

  #[test]
  fn stages_are_released_once_linked() {
    let mut ctx = MockContext::new();
    let _program = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, FS_ORANGE).unwrap();

    let state = ctx.state();
    assert_eq!(state.live_stages, 0);
    assert_eq!(state.live_programs, 1);
  }

  #[test]
  fn broken_fragment_stage_is_reported_once() {
    let mut ctx = MockContext::new();
    let broken = "#version 330 core\nout vec4 FragColor;\nvoid main() {\n  FragColor = vec4(1.);\n";
    let program = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, broken).unwrap();

    let stage_errors: Vec<_> = program
      .diagnostics()
      .iter()
      .filter_map(|d| match d {
        ProgramError::StageError(e) => Some(e.stage_type()),
        _ => None,
      })
      .collect();

    assert_eq!(stage_errors, vec![StageType::FragmentShader]);
    assert!(!program.is_valid());
    assert_ne!(program.handle(), 0);
  }

  #[test]
  fn broken_vertex_stage_still_yields_a_program() {
    let mut ctx = MockContext::new();
    let program = ShaderProgram::from_strings(&mut ctx, "void mian(", FS_ORANGE).unwrap();

    assert!(matches!(
      program.diagnostics().first(),
      Some(ProgramError::StageError(StageError::CompilationFailed(
        StageType::VertexShader,
        _
      )))
    ));
    assert!(matches!(
      program.diagnostics().last(),
      Some(ProgramError::LinkFailed(_))
    ));
    assert!(program.diagnostics()[0]
      .to_string()
      .contains("vertex shader compilation error"));
  }

  #[test]
  fn stage_allocation_failure_is_a_hard_error() {
    let mut ctx = MockContext::new();
    ctx.refuse_stages();

    let result = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, FS_ORANGE);

    match result {
      Err(ShaderError::Stage(ref e @ StageError::CreationFailed(StageType::VertexShader))) => {
        assert_eq!(e.to_string(), "unable to create vertex shader");
      }
      other => panic!("expected a stage creation error, got {:?}", other),
    }

    let state = ctx.state();
    assert_eq!(state.live_programs, 0);
    assert_eq!(state.live_stages, 0);
  }

  #[test]
  fn missing_file_fails_before_compiling() {
    let mut ctx = MockContext::new();
    let dir = env::temp_dir().join("learngl-missing-shader-dir");
    let result = ShaderProgram::from_files(&mut ctx, dir.join("nope.vs"), dir.join("nope.fs"));

    match result {
      Err(ShaderError::Read { path, source }) => {
        assert_eq!(path, dir.join("nope.vs"));
        assert_eq!(source.kind(), io::ErrorKind::NotFound);
      }
      other => panic!("expected a read error, got {:?}", other),
    }

    assert_eq!(ctx.state().stages_created, 0);
  }

  #[test]
  fn missing_fragment_file_fails_before_compiling() {
    let mut ctx = MockContext::new();
    let dir = env::temp_dir().join(format!("learngl-shader-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let vs_path = dir.join("ok.vs");
    fs::write(&vs_path, VS_PASSTHROUGH).unwrap();

    let result = ShaderProgram::from_files(&mut ctx, &vs_path, dir.join("absent.fs"));

    assert!(matches!(result, Err(ShaderError::Read { .. })));
    assert_eq!(ctx.state().stages_created, 0);

    fs::remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn files_are_read_and_compiled() {
    let mut ctx = MockContext::new();
    let dir = env::temp_dir().join(format!("learngl-shader-files-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("shader.vs"), VS_PASSTHROUGH).unwrap();
    fs::write(dir.join("shader.fs"), FS_ORANGE).unwrap();

    let program =
      ShaderProgram::from_files(&mut ctx, dir.join("shader.vs"), dir.join("shader.fs")).unwrap();

    assert!(program.is_valid());
    assert_eq!(ctx.state().stages_created, 2);

    fs::remove_dir_all(&dir).unwrap();
  }

  #[test]
  fn absent_uniforms_are_ignored() {
    let mut ctx = MockContext::new();
    let mut program = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, FS_ORANGE).unwrap();

    program.set_int("doesNotExist", 3);
    program.set_float("doesNotExist", 0.5);
    program.set_bool("doesNotExist", true);

    assert!(program.uniform("doesNotExist").is_none());
    assert!(ctx.state().uniform_writes.is_empty());
  }

  #[test]
  fn uniforms_are_written_by_name() {
    let mut ctx = MockContext::new();
    let fs = "#version 330 core\nout vec4 FragColor;\nuniform vec4 ourColor;\nuniform bool enabled;\nvoid main() {\n  FragColor = ourColor;\n}\n";
    let mut program = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, fs).unwrap();

    program.set_vec4("ourColor", [0., 0.5, 0., 1.]);
    program.set_bool("enabled", true);

    let handle = program.handle();
    let color = program.uniform("ourColor").unwrap();
    let enabled = program.uniform("enabled").unwrap();
    let state = ctx.state();

    assert_eq!(
      state.uniform_writes,
      vec![
        (handle, color.index(), UniformValue::Vec4([0., 0.5, 0., 1.])),
        (handle, enabled.index(), UniformValue::Bool(true)),
      ]
    );
    assert_eq!(state.current_program, handle);
  }

  #[test]
  fn use_program_makes_it_current() {
    let mut ctx = MockContext::new();
    let mut a = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, FS_ORANGE).unwrap();
    let mut b = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, FS_ORANGE).unwrap();

    a.use_program();
    assert_eq!(ctx.state().current_program, a.handle());

    b.use_program();
    assert_eq!(ctx.state().current_program, b.handle());
  }

  #[test]
  fn dropping_releases_the_program() {
    let mut ctx = MockContext::new();
    let mut program = ShaderProgram::from_strings(&mut ctx, VS_PASSTHROUGH, FS_ORANGE).unwrap();
    program.use_program();

    drop(program);

    let state = ctx.state();
    assert_eq!(state.live_programs, 0);
    assert_eq!(state.current_program, 0);
  }
}

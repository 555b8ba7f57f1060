//! Shader backend interface.

use crate::shader::{ProgramError, StageError, StageType, UniformValue};

/// Shader stages and programs.
///
/// Compilation and linking are split from their status queries: a stage that fails to compile is
/// still a valid object that can be attached and linked, which is what the best-effort
/// construction of [`ShaderProgram`](crate::shader::ShaderProgram) relies on.
pub unsafe trait Shader {
  /// Backend representation of a shader stage.
  type StageRepr;

  /// Backend representation of a shader program.
  type ProgramRepr;

  /// Create a stage and compile `src` into it.
  ///
  /// Only fails if the stage object itself cannot be created; compilation errors are reported by
  /// [`Shader::stage_status`].
  unsafe fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Compilation status of a stage, with the compiler log on failure.
  unsafe fn stage_status(stage: &Self::StageRepr) -> Result<(), StageError>;

  /// Destroy a stage.
  unsafe fn destroy_stage(stage: &mut Self::StageRepr);

  /// Create a program, attach both stages to it and link it.
  ///
  /// Only fails if the program object itself cannot be created; link errors are reported by
  /// [`Shader::link_status`].
  unsafe fn new_program(
    &mut self,
    vertex: &Self::StageRepr,
    fragment: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Link status of a program, with the linker log on failure.
  unsafe fn link_status(program: &Self::ProgramRepr) -> Result<(), ProgramError>;

  /// Destroy a program.
  unsafe fn destroy_program(program: &mut Self::ProgramRepr);

  /// Raw handle of the program.
  unsafe fn program_handle(program: &Self::ProgramRepr) -> u32;

  /// Make the program the current one.
  unsafe fn use_program(program: &mut Self::ProgramRepr);

  /// Location of an active uniform, if any.
  unsafe fn uniform_location(program: &Self::ProgramRepr, name: &str) -> Option<i32>;

  /// Write a value into a uniform slot of the program.
  unsafe fn set_uniform(program: &mut Self::ProgramRepr, location: i32, value: UniformValue);
}

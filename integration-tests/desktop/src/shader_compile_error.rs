//! A fragment stage with a syntax error is reported exactly once, yet a program is returned.

use crate::{hidden_surface, VS};
use learngl::shader::{ProgramError, ShaderProgram, StageType};

const BROKEN_FS: &str = "#version 330 core
out vec4 FragColor;

void main() {
  FragColor = vec4(1.0, 0.5, 0.2, 1.0)
}";

pub fn fixture() -> Result<(), String> {
  let mut surface = hidden_surface("shader-compile-error")?;
  let program = ShaderProgram::from_strings(&mut surface.context, VS, BROKEN_FS)
    .map_err(|e| format!("construction should not fail: {}", e))?;

  let stage_errors: Vec<_> = program
    .diagnostics()
    .iter()
    .filter_map(|d| match d {
      ProgramError::StageError(e) => Some(e),
      _ => None,
    })
    .collect();

  match stage_errors.as_slice() {
    [e] if e.stage_type() == StageType::FragmentShader => Ok(()),
    _ => Err(format!(
      "expected a single fragment diagnostic, got {:?}",
      program.diagnostics()
    )),
  }
}

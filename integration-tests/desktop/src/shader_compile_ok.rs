//! Valid sources yield a valid program with no diagnostics.

use crate::{hidden_surface, FS, VS};
use learngl::shader::ShaderProgram;

pub fn fixture() -> Result<(), String> {
  let mut surface = hidden_surface("shader-compile-ok")?;
  let program = ShaderProgram::from_strings(&mut surface.context, VS, FS)
    .map_err(|e| format!("cannot create program: {}", e))?;

  if program.handle() == 0 {
    return Err("null program handle".to_owned());
  }

  if !program.is_valid() {
    return Err(format!("unexpected diagnostics: {:?}", program.diagnostics()));
  }

  Ok(())
}

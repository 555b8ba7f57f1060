//! Setting uniforms the program doesn’t know about does nothing; known ones are resolved.

use crate::{hidden_surface, FS, VS};
use learngl::shader::ShaderProgram;

pub fn fixture() -> Result<(), String> {
  let mut surface = hidden_surface("uniform-absent-name")?;
  let mut program = ShaderProgram::from_strings(&mut surface.context, VS, FS)
    .map_err(|e| format!("cannot create program: {}", e))?;

  program.set_int("doesNotExist", 3);
  program.set_float("doesNotExist", 1.5);
  program.set_bool("doesNotExist", true);

  if program.uniform("doesNotExist").is_some() {
    return Err("absent uniform resolved to a location".to_owned());
  }

  if program.uniform("intensity").is_none() {
    return Err("active uniform intensity has no location".to_owned());
  }

  program.set_float("intensity", 0.5);

  Ok(())
}

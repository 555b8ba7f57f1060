//! A missing shader file is an error, reported before anything is compiled.

use crate::hidden_surface;
use learngl::shader::{ShaderError, ShaderProgram};
use learngl_gl::GL33;

pub fn fixture() -> Result<(), String> {
  let mut surface = hidden_surface("shader-missing-file")?;
  let result: Result<ShaderProgram<GL33>, _> = ShaderProgram::from_files(
    &mut surface.context,
    "does/not/exist.vs",
    "does/not/exist.fs",
  );

  match result {
    Err(ShaderError::Read { ref path, .. }) if path.ends_with("exist.vs") => Ok(()),
    Err(e) => Err(format!("unexpected error: {}", e)),
    Ok(_) => Err("a program was created from missing files".to_owned()),
  }
}

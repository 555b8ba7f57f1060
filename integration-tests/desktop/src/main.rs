use colored::Colorize as _;
use learngl_glfw::GlfwSurface;
use learngl_windowing::{WindowDim, WindowOpt};

macro_rules! tests {
  ($($name:expr, $module:ident),*) => {
    // declare the modules for all tests
    $(
      mod $module;
    )*

    // list of all available integration tests
    const TEST_NAMES: &[&str] = &[$( $name ),*];

    // run a given test
    fn run_test(name: &str) -> Option<Result<(), String>> {
      $(
        if name == $name {
          return Some($module::fixture());
        }
      )*

      None
    }
  }
}

tests! {
  "shader-compile-ok", shader_compile_ok,
  "shader-compile-error", shader_compile_error,
  "shader-missing-file", shader_missing_file,
  "uniform-absent-name", uniform_absent_name,
  "quad-fill", quad_fill
}

/// Vertex shader shared by the fixtures.
pub const VS: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

void main() {
  gl_Position = vec4(aPos, 1.0);
}";

/// Fragment shader shared by the fixtures.
pub const FS: &str = "#version 330 core
out vec4 FragColor;

uniform float intensity;

void main() {
  FragColor = vec4(vec3(1.0, 0.5, 0.2) * intensity, 1.0);
}";

/// Open a hidden window; fixtures don’t need to be seen to be checked.
pub fn hidden_surface(name: &str) -> Result<GlfwSurface, String> {
  let opt = WindowOpt::default()
    .set_dim(WindowDim::Windowed {
      width: 800,
      height: 600,
    })
    .set_visible(false);

  GlfwSurface::new(name, opt).map_err(|e| format!("cannot create surface: {}", e))
}

fn show_tests() {
  for test_name in TEST_NAMES {
    println!("  -> {}", test_name.blue());
  }
}

fn main() {
  env_logger::init();

  let test_name = std::env::args().nth(1);

  if let Some(test_name) = test_name {
    println!("test name: {}", test_name.green());

    match run_test(&test_name) {
      Some(Ok(())) => println!("{}", "ok".green()),

      Some(Err(reason)) => {
        println!("{}: {}", "failed".red(), reason);
        std::process::exit(1);
      }

      None => {
        println!("{} is not a valid test. Possible values", test_name.red());
        show_tests();
        std::process::exit(2);
      }
    }
  } else {
    println!("Please provide a test name. Possible values");
    show_tests();
  }
}

mod platform;

use glfw::{Action, Key, WindowEvent};
use learngl_demos::{Example, InputAction, LoopFeedback};
use learngl_glfw::GlfwSurface;
use learngl_windowing::{WindowDim, WindowOpt};
use platform::DesktopPlatformServices;
use std::{iter, path::PathBuf, process, time::Instant};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// Directory where to pick shaders from.
  shaders: Option<PathBuf>,

  #[structopt(short, long)]
  /// Directory where to pick textures from.
  textures: Option<PathBuf>,

  #[structopt(short, long)]
  /// List available examples.
  list_examples: bool,

  #[structopt(long, default_value = "800")]
  /// Width of the window.
  width: u32,

  #[structopt(long, default_value = "600")]
  /// Height of the window.
  height: u32,

  /// Example to run.
  example: Option<String>,
}

/// Macro to declaratively add examples.
macro_rules! examples {
  ($($ex_name:literal, $ex_ident:ident),* $(,)?) => {
    fn show_available_examples() {
      println!("available examples:");
      $( println!("  - {}", $ex_name); )*
    }

    // create a function that will run an example based on its name
    fn pick_and_run_example(cli_opts: CLIOpts) -> Result<(), String> {
      let example_name = cli_opts.example.as_deref();
      match example_name {
        $(
          Some($ex_name) => {
            run_example::<learngl_demos::$ex_ident::LocalExample>(&cli_opts, $ex_name)
          }
        ),*

        _ => {
          log::error!("no example found");
          show_available_examples();
          Ok(())
        }
      }
    }
  }
}

// Run an example.
fn run_example<E>(cli_opts: &CLIOpts, name: &str) -> Result<(), String>
where
  E: Example,
{
  let mut services = DesktopPlatformServices::new(cli_opts);

  // First thing first: we create a new surface to render to and get events from.
  let dim = WindowDim::Windowed {
    width: cli_opts.width,
    height: cli_opts.height,
  };
  let surface = GlfwSurface::new(name, WindowOpt::default().set_dim(dim))
    .map_err(|e| format!("cannot create GLFW surface: {}", e))?;
  let mut context = surface.context;
  let events = surface.events_rx;

  let mut example = E::bootstrap(&mut services, &mut context)
    .map_err(|e| format!("cannot bootstrap {}: {}", name, e))?;
  let start_t = Instant::now();

  // pass the initial framebuffer size, which might differ from the requested window size on
  // high-DPI screens
  let [fb_w, fb_h] = context.framebuffer_size();
  let initial = iter::once(InputAction::Resized {
    width: fb_w,
    height: fb_h,
  });
  if example.render_frame(0., initial, &mut context) == LoopFeedback::Exit {
    return Ok(());
  }
  context.swap_buffers();

  'app: loop {
    // handle events
    context.window.glfw.poll_events();
    let actions = glfw::flush_messages(&events).flat_map(|(_, event)| adapt_events(event));

    let t = start_t.elapsed().as_secs_f32();
    let feedback = example.render_frame(t, actions, &mut context);

    if feedback == LoopFeedback::Continue {
      context.swap_buffers();
    } else {
      break 'app;
    }
  }

  log::info!("{} exited", name);
  Ok(())
}

fn adapt_events(event: WindowEvent) -> Option<InputAction> {
  match event {
    WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
      Some(InputAction::Quit)
    }

    WindowEvent::FramebufferSize(width, height) => Some(InputAction::Resized {
      width: width.max(0) as _,
      height: height.max(0) as _,
    }),

    _ => None,
  }
}

examples! {
  "window", hello_window,
  "triangle", hello_quad,
  "texture", texture,
  "shader-uniforms", shader_uniforms,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_examples {
    show_available_examples();
  } else if let Err(e) = pick_and_run_example(cli_opts) {
    log::error!("{}", e);
    process::exit(1);
  }
}

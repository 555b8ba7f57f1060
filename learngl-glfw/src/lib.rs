//! [GLFW](https://crates.io/crates/glfw) backend for [learngl](https://crates.io/crates/learngl).
//!
//! [`GlfwSurface::new`] does what every tutorial program starts with: initialize GLFW, ask for
//! an OpenGL core context, open a window, make its context current and load the OpenGL
//! symbols.

#![deny(missing_docs)]

use glfw::{self, Context as _, InitError, SwapInterval, Window, WindowEvent, WindowMode};
use learngl::context::GraphicsContext;
pub use learngl_gl::gl33::StateQueryError;
use learngl_gl::GL33;
use learngl_windowing::{CursorMode, WindowDim, WindowOpt};
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Errors raised while opening a [`GlfwSurface`].
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// GLFW could not be initialized.
  InitError(InitError),

  /// The window (or its OpenGL context) could not be created.
  WindowCreationFailed,

  /// Another surface was already opened on this thread.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "cannot initialize GLFW: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create GLFW window"),
      GlfwSurfaceError::GraphicsStateError(ref e) => write!(f, "no graphics state: {}", e),
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl From<StateQueryError> for GlfwSurfaceError {
  fn from(e: StateQueryError) -> Self {
    GlfwSurfaceError::GraphicsStateError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// GLFW surface.
///
/// This type is a helper that exposes two important concepts: the GLFW event receiver that you
/// can use to poll events and the [`GL33Context`], which allows you to perform the rendering
/// part.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Window events, filled by [`glfw::Glfw::poll_events`].
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped learngl context.
  pub context: GL33Context,
}

impl GlfwSurface {
  /// Initialize GLFW, open a window and bootstrap an OpenGL 3.3 learngl environment in it.
  ///
  /// Key, close and framebuffer size events are polled. The viewport is set to the size of the
  /// framebuffer.
  pub fn new(title: &str, win_opt: WindowOpt) -> Result<Self, GlfwSurfaceError> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    let (major, minor) = win_opt.gl_version();
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    #[cfg(target_os = "macos")]
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(major));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(minor));
    glfw.window_hint(glfw::WindowHint::Samples(win_opt.num_samples()));
    glfw.window_hint(glfw::WindowHint::Visible(win_opt.visible()));

    let created = match *win_opt.dim() {
      WindowDim::Windowed { width, height } => {
        glfw.create_window(width, height, title, WindowMode::Windowed)
      }

      WindowDim::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| {
        let monitor: &glfw::Monitor = &*monitor?;
        let vmode = monitor.get_video_mode()?;
        glfw.create_window(
          vmode.width,
          vmode.height,
          title,
          WindowMode::FullScreen(monitor),
        )
      }),

      WindowDim::FullscreenRestricted { width, height } => {
        glfw.with_primary_monitor(|glfw, monitor| {
          let monitor: &glfw::Monitor = &*monitor?;
          glfw.create_window(width, height, title, WindowMode::FullScreen(monitor))
        })
      }
    };

    let (mut window, events_rx) = created.ok_or(GlfwSurfaceError::WindowCreationFailed)?;

    window.make_current();
    window.set_key_polling(true);
    window.set_close_polling(true);
    window.set_framebuffer_size_polling(true);
    window.set_cursor_mode(match win_opt.cursor_mode() {
      CursorMode::Visible => glfw::CursorMode::Normal,
      CursorMode::Invisible => glfw::CursorMode::Hidden,
      CursorMode::Disabled => glfw::CursorMode::Disabled,
    });

    glfw.set_swap_interval(if win_opt.vsync() {
      SwapInterval::Sync(1)
    } else {
      SwapInterval::None
    });

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL33::new()?;
    let mut context = GL33Context { window, gl };

    let [width, height] = context.framebuffer_size();
    context.set_viewport(0, 0, width, height);
    log::info!("opened “{}” with a {}×{} framebuffer", title, width, height);

    Ok(GlfwSurface { events_rx, context })
  }
}

/// learngl OpenGL 3.3 context.
///
/// The GLFW window is public, for event polling and anything learngl doesn’t cover.
#[derive(Debug)]
pub struct GL33Context {
  /// Wrapped GLFW window.
  pub window: Window,

  /// OpenGL 3.3 state.
  gl: GL33,
}

impl GL33Context {
  /// Size of the window’s framebuffer, in pixels.
  pub fn framebuffer_size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w.max(0) as u32, h.max(0) as u32]
  }

  /// Swap the back and front buffers.
  pub fn swap_buffers(&mut self) {
    self.window.swap_buffers();
  }
}

unsafe impl GraphicsContext for GL33Context {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}

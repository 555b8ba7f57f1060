//! # learngl windowing
//!
//! This is the base, abstract crate for windowing common types in learngl. The `learngl` crate
//! abstracts over OpenGL objects but doesn’t give you a way to create an OpenGL context: that
//! is tightly related to the windowing library you pick. Backend crates (`learngl-glfw`) use the
//! types from this crate to know what kind of window and context to open.
//!
//! # What’s included
//!
//! - [`WindowDim`]: abstraction over the dimension of a window and its mode (windowed,
//!   fullscreen, fullscreen restricted).
//! - [`WindowOpt`]: an opaque type giving access to hints to customize the window integration,
//!   such as whether the cursor should be hidden or which OpenGL version to ask for.

#![deny(missing_docs)]

/// Size and mode of a window.
///
/// Fullscreen variants use the primary monitor. `Fullscreen` takes the monitor’s current video
/// mode; `FullscreenRestricted` asks for the given resolution instead.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
  /// Fullscreen, at the monitor resolution.
  Fullscreen,
  /// Fullscreen, at the given resolution.
  FullscreenRestricted {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
}

/// How the cursor behaves over the window.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CursorMode {
  /// Regular cursor.
  Visible,
  /// Hidden while over the window, but free to leave it.
  Invisible,
  /// Hidden and grabbed by the window.
  Disabled,
}

/// Options of the window (and of its OpenGL context) to open.
///
/// Start from [`WindowOpt::default`], which matches the tutorial window, and change what you
/// need with the `set_*` methods.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  cursor_mode: CursorMode,
  num_samples: Option<u32>,
  vsync: bool,
  gl_version: (u32, u32),
  visible: bool,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to `WindowDim::Windowed { width: 800, height: 600 }`.
  /// - `cursor_mode` set to `CursorMode::Visible`.
  /// - `num_samples` set to `None`.
  /// - `vsync` enabled.
  /// - `gl_version` set to OpenGL 3.3.
  /// - `visible` set to `true`.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 800,
        height: 600,
      },
      cursor_mode: CursorMode::Visible,
      num_samples: None,
      vsync: true,
      gl_version: (3, 3),
      visible: true,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> &WindowDim {
    &self.dim
  }

  /// Set the cursor mode.
  #[inline]
  pub fn set_cursor_mode(self, mode: CursorMode) -> Self {
    WindowOpt {
      cursor_mode: mode,
      ..self
    }
  }

  /// Get the cursor mode.
  #[inline]
  pub fn cursor_mode(&self) -> CursorMode {
    self.cursor_mode
  }

  /// Ask for a multisampled back buffer with `samples` samples per pixel; `None` turns
  /// multisampling off.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Samples per pixel, if multisampling.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }

  /// Enable or disable waiting for the vertical blank when swapping buffers.
  #[inline]
  pub fn set_vsync(self, vsync: bool) -> Self {
    WindowOpt { vsync, ..self }
  }

  /// Whether buffer swaps wait for the vertical blank.
  #[inline]
  pub fn vsync(&self) -> bool {
    self.vsync
  }

  /// Set the OpenGL version to ask for, as `(major, minor)`.
  ///
  /// A core profile context is always requested.
  #[inline]
  pub fn set_gl_version(self, major: u32, minor: u32) -> Self {
    WindowOpt {
      gl_version: (major, minor),
      ..self
    }
  }

  /// Get the OpenGL version to ask for.
  #[inline]
  pub fn gl_version(&self) -> (u32, u32) {
    self.gl_version
  }

  /// Show or hide the window. Hidden windows still have a working back buffer.
  #[inline]
  pub fn set_visible(self, visible: bool) -> Self {
    WindowOpt { visible, ..self }
  }

  /// Whether the window is visible.
  #[inline]
  pub fn visible(&self) -> bool {
    self.visible
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_the_tutorial_window() {
    let opt = WindowOpt::default();

    assert_eq!(
      *opt.dim(),
      WindowDim::Windowed {
        width: 800,
        height: 600
      }
    );
    assert_eq!(opt.gl_version(), (3, 3));
    assert_eq!(opt.cursor_mode(), CursorMode::Visible);
    assert_eq!(opt.num_samples(), None);
    assert!(opt.vsync());
    assert!(opt.visible());
  }

  #[test]
  fn builder_only_touches_what_it_sets() {
    let opt = WindowOpt::default()
      .set_dim(WindowDim::Fullscreen)
      .set_num_samples(4)
      .set_visible(false);

    assert_eq!(*opt.dim(), WindowDim::Fullscreen);
    assert_eq!(opt.num_samples(), Some(4));
    assert!(!opt.visible());
    assert_eq!(opt.gl_version(), (3, 3));
    assert!(opt.vsync());

    let opt = opt.set_num_samples(None).set_gl_version(4, 1);
    assert_eq!(opt.num_samples(), None);
    assert_eq!(opt.gl_version(), (4, 1));
  }
}

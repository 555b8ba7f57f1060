//! OpenGL backends.
//!
//! This crate exports an [OpenGL](https://www.khronos.org/opengl/) 3.3 core backend for
//! [learngl](https://crates.io/crates/learngl). OpenGL symbols must have been loaded (e.g. with
//! [`gl::load_with`]) and a context made current before creating the backend; windowing crates
//! such as `learngl-glfw` do that for you.

pub mod gl33;

pub use gl33::GL33;

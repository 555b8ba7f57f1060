//! # Step-by-step OpenGL building blocks
//!
//! This crate exposes the few reusable pieces the tutorial programs need, expressed as owned
//! resources parametrized by a backend type:
//!
//! - [`ShaderProgram`](crate::shader::ShaderProgram): reads, compiles and links a vertex and a
//!   fragment stage, and sets uniforms by name.
//! - [`Tess`](crate::tess::Tess): a vertex array owning a vertex buffer and an optional index
//!   buffer.
//! - [`Texture`](crate::texture::Texture): a 2D texture uploaded from raw texels or a decoded
//!   image.
//!
//! Every resource releases its GPU object when dropped.
//!
//! # Backends
//!
//! Nothing in this crate talks to a GPU directly. Operations go through the `unsafe` traits of
//! the [`backend`] module, implemented for OpenGL 3.3 by the `learngl-gl` crate. A
//! [`GraphicsContext`](crate::context::GraphicsContext) gives access to a backend; windowing
//! crates (e.g. `learngl-glfw`) create one.
//!
//! # Error handling
//!
//! Shader compilation and link failures are *not* hard errors: they are logged with the [`log`]
//! crate, recorded on the program and construction carries on, so that a broken shader shows a
//! black quad rather than aborting the tutorial. Failing to read a shader file, on the other
//! hand, is reported as an error before anything is compiled.

#![deny(missing_docs)]

pub mod backend;
pub mod context;
pub mod geometry;
pub mod shader;
pub mod tess;
pub mod texture;

#[cfg(test)]
mod test_backend;

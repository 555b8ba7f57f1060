//! Backend interfaces.
//!
//! Those traits are implemented by backend crates and are not supposed to be used directly; use
//! the types of the API modules ([`crate::shader`], [`crate::tess`], [`crate::texture`]) instead.
//!
//! All functions are `unsafe` because they assume a valid graphics context is current on the
//! calling thread.

pub mod framebuffer;
pub mod shader;
pub mod tess;
pub mod texture;

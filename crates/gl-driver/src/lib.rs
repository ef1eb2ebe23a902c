//! OpenGL driver seam for the compute-render bridge.
//!
//! This crate defines the [`GlApi`] trait, the narrow set of driver entry
//! points the bridge consumes: shader compile/link, immutable texture
//! storage, image-unit binding, compute dispatch, memory barriers, vertex
//! arrays, viewport, draw submission, and binding queries.
//!
//! [`RawGl`] implements it over the global function pointers of the `gl`
//! crate. Call [`load_gl`] once, after the host has made its context current,
//! before touching [`RawGl`].

pub mod api;
pub use api::GlApi;

mod loader;
pub use loader::{is_loaded, load_gl};

mod raw;
pub use raw::RawGl;

pub use gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};

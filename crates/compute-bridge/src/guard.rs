//! Scoped save/restore of the host's GL bindings around an injected callback,
//! plus the panel viewport computation.
//!
//! The host GUI owns the current program and vertex array for its own draw
//! calls. [`StateGuard::enter`] snapshots both before the bridge touches any
//! global GL state, and dropping the guard puts them back. Restoring on drop
//! means every exit path (early return, unwinding) restores exactly once.

use gl::types::{GLint, GLsizei, GLuint};
use gl_driver::GlApi;

use crate::quad::GeometryHandle;

/// Screen-space bounds of a panel's visible content, in GUI points with a
/// top-left origin.
///
/// Field order follows the usual `(x, y, z, w)` packing: `z` is the right edge
/// and `w` the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x: f32,
    pub y: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ClipRect {
    pub fn new(x: f32, y: f32, right: f32, bottom: f32) -> Self {
        Self {
            x,
            y,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.x
    }

    /// Row height of the panel content.
    pub fn height(&self) -> f32 {
        self.bottom - self.y
    }
}

/// Size and scale of the display the GUI renders to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Display height in GUI points.
    pub height: f32,
    /// Physical pixels per GUI point.
    pub dpi_scale: f32,
}

/// A device viewport in pixels with a bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: GLint,
    pub y: GLint,
    pub width: GLsizei,
    pub height: GLsizei,
}

impl Viewport {
    /// Map a top-left-origin clip rect to a bottom-left-origin device
    /// viewport.
    pub fn from_clip(clip: &ClipRect, display: &DisplayMetrics) -> Self {
        let dpi = display.dpi_scale;
        let row_height = clip.height();
        Self {
            x: (clip.x * dpi).round() as GLint,
            y: ((display.height - clip.y - row_height) * dpi).round() as GLint,
            width: (clip.width() * dpi).round() as GLsizei,
            height: (row_height * dpi).round() as GLsizei,
        }
    }

    pub fn apply(&self, gl: &impl GlApi) {
        gl.viewport(self.x, self.y, self.width, self.height);
    }
}

/// The host bindings captured on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedGraphicsState {
    pub program: GLuint,
    pub vertex_array: GLuint,
}

impl SavedGraphicsState {
    pub fn capture(gl: &impl GlApi) -> Self {
        Self {
            program: gl.current_program(),
            vertex_array: gl.current_vertex_array(),
        }
    }

    pub fn restore(&self, gl: &impl GlApi) {
        gl.bind_vertex_array(self.vertex_array);
        gl.use_program(self.program);
    }
}

/// Restores the captured host bindings when dropped.
#[must_use = "the host state is restored as soon as the guard is dropped"]
pub struct StateGuard<'a, G: GlApi> {
    gl: &'a G,
    saved: SavedGraphicsState,
    viewport: Viewport,
}

impl<'a, G: GlApi> StateGuard<'a, G> {
    /// Snapshot the host bindings, bind `geometry`, and apply the viewport
    /// for `clip`.
    pub fn enter(
        gl: &'a G,
        geometry: &GeometryHandle,
        clip: &ClipRect,
        display: &DisplayMetrics,
    ) -> Self {
        let saved = SavedGraphicsState::capture(gl);
        geometry.bind(gl);
        let viewport = Viewport::from_clip(clip, display);
        viewport.apply(gl);
        Self {
            gl,
            saved,
            viewport,
        }
    }

    pub fn saved(&self) -> SavedGraphicsState {
        self.saved
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Restore now. Equivalent to dropping the guard.
    pub fn exit(self) {}
}

impl<G: GlApi> Drop for StateGuard<'_, G> {
    fn drop(&mut self) {
        self.saved.restore(self.gl);
    }
}

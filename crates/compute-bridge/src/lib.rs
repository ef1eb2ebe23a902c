//! Compute-render bridge: a GL compute pass embedded in an immediate-mode GUI
//! frame.
//!
//! A compute kernel writes a procedural image into a texture every frame, and
//! a draw-list callback samples that texture onto a full-screen quad inside a
//! GUI panel, leaving the host GUI's own GL bindings exactly as it found them.
//!
//! # Overview
//!
//! - [`shader`] compiles and links GLSL programs, returning [`BuildError`] on
//!   failure.
//! - [`ComputeResources`] owns the image texture and the kernel that fills it.
//! - [`QuadResources`] owns the empty vertex array and the display program.
//! - [`StateGuard`] snapshots the host's program/VAO bindings and restores
//!   them when dropped, and applies the panel viewport.
//! - [`BridgeContext`] owns all of the above, built by one explicit
//!   [`BridgeContext::init`].
//! - [`FrameOrchestrator`] opens the panel each frame and attaches a
//!   [`ComputeRenderPass`] to its draw list through the [`PanelHost`] and
//!   [`DrawList`] seams.

pub mod compute;
pub mod config;
pub mod context;
pub mod frame;
pub mod guard;
pub mod quad;
pub mod shader;

#[cfg(test)]
pub(crate) mod testing;

pub use compute::{ComputeResources, ImageResource};
pub use config::BridgeConfig;
pub use context::BridgeContext;
pub use frame::{
    CallbackInfo, ComputeRenderPass, DrawList, FrameOrchestrator, PanelHost, PanelRenderer,
    PanelSpec,
};
pub use guard::{ClipRect, DisplayMetrics, SavedGraphicsState, StateGuard, Viewport};
pub use quad::{GeometryHandle, QuadResources};
pub use shader::{BuildError, Program, ShaderStage};

//! Frame orchestrator: opens the panel and attaches the compute-render pass
//! to its draw list once per GUI frame.
//!
//! The host GUI is reached only through [`PanelHost`] and [`DrawList`]; the
//! injected work is the [`PanelRenderer`] capability, so everything the
//! callback touches is visible where it is registered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gl_driver::GlApi;
use tracing::trace;

use crate::config::BridgeConfig;
use crate::context::BridgeContext;
use crate::guard::{ClipRect, DisplayMetrics, StateGuard};

/// Geometry handed to a draw-list callback when the host renderer reaches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallbackInfo {
    pub clip: ClipRect,
    pub display: DisplayMetrics,
}

/// Native rendering run from inside the host's draw list.
pub trait PanelRenderer: Send + Sync {
    fn render(&self, info: &CallbackInfo);
}

/// The draw list of an open panel.
pub trait DrawList {
    /// Queue `renderer` at the current position of the command list. It runs
    /// later, when the host renders the frame.
    fn add_callback(&mut self, renderer: Arc<dyn PanelRenderer>);
}

/// How a panel is requested from the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSpec {
    pub title: String,
    pub size: [f32; 2],
    pub resizable: bool,
}

impl From<&BridgeConfig> for PanelSpec {
    fn from(config: &BridgeConfig) -> Self {
        Self {
            title: config.panel_title.clone(),
            size: config.panel_size,
            resizable: config.panel_resizable,
        }
    }
}

/// The host GUI's panel API.
pub trait PanelHost {
    /// Open the panel described by `spec`. `contents` runs only while the
    /// panel is open and visible this frame.
    fn show_panel(&mut self, spec: &PanelSpec, contents: &mut dyn FnMut(&mut dyn DrawList));
}

/// Compute dispatch followed by the quad draw, under a [`StateGuard`].
pub struct ComputeRenderPass<G: GlApi> {
    context: Arc<BridgeContext<G>>,
    frames: AtomicU64,
}

impl<G: GlApi> ComputeRenderPass<G> {
    pub fn new(context: Arc<BridgeContext<G>>) -> Self {
        Self {
            context,
            frames: AtomicU64::new(0),
        }
    }

    /// Fill the image and fence it.
    pub fn dispatch(&self) {
        self.context.compute().dispatch(self.context.gl());
    }

    /// Draw the image into the current viewport.
    pub fn draw(&self) {
        self.context
            .quad()
            .draw(self.context.gl(), self.context.compute().image());
    }

    /// Number of passes rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl<G: GlApi> PanelRenderer for ComputeRenderPass<G> {
    fn render(&self, info: &CallbackInfo) {
        let gl = self.context.gl();
        let guard = StateGuard::enter(
            gl,
            &self.context.quad().geometry(),
            &info.clip,
            &info.display,
        );
        self.dispatch();
        self.draw();
        let frame = self.frames.fetch_add(1, Ordering::Relaxed);
        trace!(frame, viewport = ?guard.viewport(), "rendered compute pass");
        guard.exit();
    }
}

/// Per-frame driver of the bridge.
pub struct FrameOrchestrator<G: GlApi> {
    spec: PanelSpec,
    pass: Arc<ComputeRenderPass<G>>,
}

impl<G: GlApi + 'static> FrameOrchestrator<G> {
    pub fn new(context: Arc<BridgeContext<G>>, config: &BridgeConfig) -> Self {
        Self {
            spec: PanelSpec::from(config),
            pass: Arc::new(ComputeRenderPass::new(context)),
        }
    }

    pub fn panel_spec(&self) -> &PanelSpec {
        &self.spec
    }

    pub fn pass(&self) -> &Arc<ComputeRenderPass<G>> {
        &self.pass
    }

    /// Build this frame's panel. Nothing reaches the GPU here; the attached
    /// callback runs when the host renders its draw lists.
    pub fn frame(&self, host: &mut dyn PanelHost) {
        host.show_panel(&self.spec, &mut |draw_list: &mut dyn DrawList| {
            draw_list.add_callback(self.pass.clone());
        });
    }
}

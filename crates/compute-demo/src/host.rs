//! egui adapter for the bridge's panel and draw-list seams.
//!
//! Panels are egui [`Window`]s; callbacks become [`egui::PaintCallback`]s
//! backed by [`egui_glow::CallbackFn`], so they run inside egui_glow's paint
//! pass with the GL context current.

use std::sync::Arc;

use compute_bridge::{
    CallbackInfo, ClipRect, DisplayMetrics, DrawList, PanelHost, PanelRenderer, PanelSpec,
};
use eframe::egui_glow;
use egui::{Rect, Window};

/// Shows bridge panels in an egui context for one frame.
pub struct EguiPanelHost<'a> {
    ctx: &'a egui::Context,
    open: &'a mut bool,
}

impl<'a> EguiPanelHost<'a> {
    /// `open` backs the panel's close button.
    pub fn new(ctx: &'a egui::Context, open: &'a mut bool) -> Self {
        Self { ctx, open }
    }
}

impl PanelHost for EguiPanelHost<'_> {
    fn show_panel(&mut self, spec: &PanelSpec, contents: &mut dyn FnMut(&mut dyn DrawList)) {
        // A closed or collapsed window never runs its body.
        Window::new(spec.title.as_str())
            .open(&mut *self.open)
            .fixed_size(spec.size)
            .resizable(spec.resizable)
            .show(self.ctx, |ui| {
                let mut draw_list = EguiDrawList { ui };
                contents(&mut draw_list);
            });
    }
}

/// The painter of the panel currently being built.
struct EguiDrawList<'u> {
    ui: &'u mut egui::Ui,
}

impl DrawList for EguiDrawList<'_> {
    fn add_callback(&mut self, renderer: Arc<dyn PanelRenderer>) {
        let size = self.ui.available_size();
        let (rect, _) = self.ui.allocate_exact_size(size, egui::Sense::hover());

        let callback = egui_glow::CallbackFn::new(move |info, _painter| {
            renderer.render(&callback_info(&info));
        });

        self.ui.painter().add(egui::PaintCallback {
            rect,
            callback: Arc::new(callback),
        });
    }
}

fn clip_rect(rect: Rect) -> ClipRect {
    ClipRect::new(rect.min.x, rect.min.y, rect.max.x, rect.max.y)
}

/// Visible panel area and display metrics, in points.
fn callback_info(info: &egui::PaintCallbackInfo) -> CallbackInfo {
    let dpi_scale = info.pixels_per_point;
    CallbackInfo {
        clip: clip_rect(info.viewport.intersect(info.clip_rect)),
        display: DisplayMetrics {
            height: info.screen_size_px[1] as f32 / dpi_scale,
            dpi_scale,
        },
    }
}

//! Static configuration of the bridge.

/// Panel and image settings, fixed for the lifetime of a [`BridgeContext`].
///
/// [`BridgeContext`]: crate::BridgeContext
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Title (and identity) of the GUI panel.
    pub panel_title: String,
    /// Requested panel size in points.
    pub panel_size: [f32; 2],
    /// Whether the panel shows a resize affordance.
    pub panel_resizable: bool,
    /// Width of the compute target in texels.
    pub image_width: u32,
    /// Height of the compute target in texels.
    pub image_height: u32,
}

/// Side of the square compute target and panel.
pub const DEFAULT_IMAGE_SIZE: u32 = 512;

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            panel_title: "Compute".to_string(),
            panel_size: [DEFAULT_IMAGE_SIZE as f32; 2],
            panel_resizable: false,
            image_width: DEFAULT_IMAGE_SIZE,
            image_height: DEFAULT_IMAGE_SIZE,
        }
    }
}

//! The eframe application: one-time bridge setup chained after the host's
//! own GL context creation, then one bridge frame per GUI frame.

use std::sync::Arc;

use anyhow::anyhow;
use compute_bridge::{BridgeConfig, BridgeContext, BuildError, FrameOrchestrator};
use gl_driver::RawGl;
use tracing::{error, info};

use crate::host::EguiPanelHost;

pub struct ComputeDemoApp {
    frames: FrameOrchestrator<RawGl>,
    panel_open: bool,
}

impl ComputeDemoApp {
    pub fn new(frames: FrameOrchestrator<RawGl>) -> Self {
        Self {
            frames,
            panel_open: true,
        }
    }
}

impl eframe::App for ComputeDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut host = EguiPanelHost::new(ctx, &mut self.panel_open);
        self.frames.frame(&mut host);
    }
}

/// Either plumbing (no usable GL) or a shader build failure.
pub enum SetupError {
    Driver(anyhow::Error),
    Build(BuildError),
}

/// Load the GL entry points and build every bridge resource.
///
/// Runs inside eframe's app-creator hook, after eframe has created and made
/// current its glow context.
pub fn setup(
    cc: &eframe::CreationContext<'_>,
    config: &BridgeConfig,
) -> Result<FrameOrchestrator<RawGl>, SetupError> {
    if cc.gl.is_none() {
        return Err(SetupError::Driver(anyhow!(
            "eframe did not create an OpenGL context"
        )));
    }
    gl_driver::load_gl().map_err(SetupError::Driver)?;
    let gl = RawGl::new()
        .ok_or_else(|| SetupError::Driver(anyhow!("OpenGL entry points are not loaded")))?;

    let context = BridgeContext::init(gl, config).map_err(SetupError::Build)?;
    info!(
        panel = %config.panel_title,
        width = config.image_width,
        height = config.image_height,
        "compute bridge ready"
    );
    Ok(FrameOrchestrator::new(Arc::new(context), config))
}

/// Fail-fast policy for setup errors: log and terminate.
///
/// Build failures exit with [`BuildError::exit_code`]; anything else with 3.
pub fn exit_on_setup_error(err: SetupError) -> ! {
    let code = match &err {
        SetupError::Build(build) => {
            error!("ERROR {build}");
            build.exit_code()
        }
        SetupError::Driver(driver) => {
            error!("ERROR {driver:#}");
            3
        }
    };
    std::process::exit(code)
}

//! [`BridgeContext`]: sole owner of the bridge's GPU resources.

use gl_driver::GlApi;
use tracing::debug;

use crate::compute::ComputeResources;
use crate::config::BridgeConfig;
use crate::quad::QuadResources;
use crate::shader::BuildError;

/// Owns the driver handle, the compute resource set and the quad resource set
/// for the lifetime of the process.
///
/// Resources are created once by [`BridgeContext::init`] and never resized or
/// rebuilt; the image is fully overwritten every frame.
#[derive(Debug)]
pub struct BridgeContext<G: GlApi> {
    gl: G,
    compute: ComputeResources,
    quad: QuadResources,
}

impl<G: GlApi> BridgeContext<G> {
    /// One-time GPU setup. The host's GL context must be current.
    ///
    /// Any shader build failure is returned before a single dispatch can
    /// happen.
    pub fn init(gl: G, config: &BridgeConfig) -> Result<Self, BuildError> {
        if let Some(version) = gl.version_string() {
            debug!("OPENGL_VERSION {version}");
        }

        let quad = QuadResources::new(&gl)?;
        let compute = ComputeResources::new(&gl, config.image_width, config.image_height)?;

        Ok(Self { gl, compute, quad })
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    pub fn compute(&self) -> &ComputeResources {
        &self.compute
    }

    pub fn quad(&self) -> &QuadResources {
        &self.quad
    }
}

//! One-time loading of the `gl` crate's function pointers.

use std::sync::Once;

use anyhow::{bail, Result};
use tracing::debug;

static GL_INIT_ONCE: Once = Once::new();

/// Load GL function pointers from the system OpenGL library.
///
/// Pointers are resolved exactly once via `gl_loader`; later calls only
/// re-check that the entry points the bridge needs are present. The host must
/// have made its GL context current before the first call.
pub fn load_gl() -> Result<()> {
    GL_INIT_ONCE.call_once(|| {
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
        debug!("loaded OpenGL function pointers");
    });

    if !is_loaded() {
        bail!("OpenGL 4.5 entry points (compute, direct state access) are unavailable");
    }
    Ok(())
}

/// Whether every entry point used by [`RawGl`](crate::RawGl) resolved.
pub fn is_loaded() -> bool {
    gl::CreateShader::is_loaded()
        && gl::CreateTextures::is_loaded()
        && gl::TextureStorage2D::is_loaded()
        && gl::TextureParameteri::is_loaded()
        && gl::BindImageTexture::is_loaded()
        && gl::BindTextureUnit::is_loaded()
        && gl::DispatchCompute::is_loaded()
        && gl::MemoryBarrier::is_loaded()
        && gl::GenVertexArrays::is_loaded()
}

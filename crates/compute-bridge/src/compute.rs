//! Compute resource set: the image texture and the kernel that fills it.

use gl::types::{GLbitfield, GLint, GLsizei, GLuint};
use gl_driver::GlApi;
use tracing::debug;

use crate::shader::{build_program, BuildError, Program, ShaderStage};

/// Image unit the kernel's `image2D` is bound to.
pub const IMAGE_BINDING: GLuint = 0;

/// Constant blue channel written by the kernel.
pub const GRADIENT_BLUE: f32 = 0.2;

/// Barriers between the kernel's image stores and the display program's
/// texture fetch.
pub const COMPUTE_TO_SAMPLE_BARRIER: GLbitfield =
    gl::SHADER_IMAGE_ACCESS_BARRIER_BIT | gl::TEXTURE_FETCH_BARRIER_BIT;

/// One invocation per texel: writes `(x / w, y / h, 0.2, 1.0)`.
pub const GRADIENT_KERNEL: &str = r#"#version 460
layout(local_size_x = 1, local_size_y = 1) in;
layout(rgba32f, binding = 0) uniform image2D color;

void main() {
    ivec2 uv = ivec2(gl_GlobalInvocationID.xy);
    ivec2 size = imageSize(color);
    vec4 texel = vec4(float(uv.x) / float(size.x), float(uv.y) / float(size.y), 0.2, 1.0);
    imageStore(color, uv, texel);
}
"#;

/// CPU reference of [`GRADIENT_KERNEL`] for the texel at `(x, y)`.
pub fn gradient_texel(x: u32, y: u32, width: u32, height: u32) -> [f32; 4] {
    [
        x as f32 / width as f32,
        y as f32 / height as f32,
        GRADIENT_BLUE,
        1.0,
    ]
}

/// A fixed-size RGBA32F 2D texture with a single mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageResource {
    texture: GLuint,
    width: u32,
    height: u32,
}

impl ImageResource {
    /// Allocate immutable storage with linear filtering and no mip chain.
    pub fn new(gl: &impl GlApi, width: u32, height: u32) -> Self {
        let texture = gl.create_texture_2d();
        gl.texture_parameter(texture, gl::TEXTURE_MAX_LEVEL, 0);
        gl.texture_parameter(texture, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
        gl.texture_parameter(texture, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
        gl.texture_storage_2d(
            texture,
            1,
            gl::RGBA32F,
            width as GLsizei,
            height as GLsizei,
        );
        Self {
            texture,
            width,
            height,
        }
    }

    /// GL texture name.
    pub fn texture(&self) -> GLuint {
        self.texture
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// The compute target plus the program that writes it.
#[derive(Debug)]
pub struct ComputeResources {
    image: ImageResource,
    program: Program,
}

impl ComputeResources {
    /// Allocate the image and build the gradient kernel.
    pub fn new(gl: &impl GlApi, width: u32, height: u32) -> Result<Self, BuildError> {
        let image = ImageResource::new(gl, width, height);
        let program = build_program(gl, &[(ShaderStage::Compute, GRADIENT_KERNEL)])?;
        debug!(
            texture = image.texture,
            program = program.id(),
            width,
            height,
            "compute resources ready"
        );
        Ok(Self { image, program })
    }

    pub fn image(&self) -> &ImageResource {
        &self.image
    }

    pub fn program(&self) -> Program {
        self.program
    }

    /// Overwrite the whole image, then fence the writes before any sampling.
    ///
    /// Leaves the compute program bound.
    pub fn dispatch(&self, gl: &impl GlApi) {
        gl.bind_image_texture(
            IMAGE_BINDING,
            self.image.texture,
            gl::WRITE_ONLY,
            gl::RGBA32F,
        );
        self.program.bind(gl);
        gl.dispatch_compute(self.image.width, self.image.height, 1);
        gl.memory_barrier(COMPUTE_TO_SAMPLE_BARRIER);
    }
}

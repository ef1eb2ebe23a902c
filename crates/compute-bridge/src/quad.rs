//! Full-screen quad resource set: an attribute-less VAO and the display
//! program that samples the compute image.

use gl::types::GLuint;
use gl_driver::GlApi;
use tracing::debug;

use crate::compute::ImageResource;
use crate::shader::{build_program, BuildError, Program, ShaderStage};

/// Texture unit the display program samples from.
pub const SAMPLE_UNIT: GLuint = 0;

/// Vertices per draw: two triangles.
pub const QUAD_VERTEX_COUNT: usize = 6;

/// Clip-space corners, counter-clockwise from bottom-left.
pub const QUAD_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

/// Corner indices for the two triangles.
pub const QUAD_INDICES: [usize; QUAD_VERTEX_COUNT] = [0, 1, 2, 0, 2, 3];

/// Positions come from `gl_VertexID`; no vertex buffer is bound.
pub const QUAD_VERTEX_SHADER: &str = r#"#version 460 core
layout (location = 0) out vec2 uv;

const vec2 pos[4] = vec2[4](
    vec2(-1.0, -1.0),
    vec2( 1.0, -1.0),
    vec2( 1.0,  1.0),
    vec2(-1.0,  1.0)
);
const uint index[6] = uint[6](0, 1, 2, 0, 2, 3);

void main() {
    vec2 v = pos[index[gl_VertexID]];
    gl_Position = vec4(v, 0.0, 1.0);
    uv = v * 0.5 + 0.5;
}
"#;

pub const QUAD_FRAGMENT_SHADER: &str = r#"#version 460 core
layout (location = 0) in vec2 uv;
layout (location = 0) out vec4 color;
layout (binding = 0) uniform sampler2D image;

void main() {
    color = texture(image, uv);
}
"#;

/// CPU reference of [`QUAD_VERTEX_SHADER`]: clip position and UV of vertex
/// `vertex_id`.
pub fn quad_vertex(vertex_id: usize) -> ([f32; 2], [f32; 2]) {
    let [x, y] = QUAD_CORNERS[QUAD_INDICES[vertex_id]];
    ([x, y], [x * 0.5 + 0.5, y * 0.5 + 0.5])
}

/// An empty vertex array object.
///
/// Core profiles refuse to draw without some VAO bound, even when the program
/// declares no attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryHandle {
    vao: GLuint,
}

impl GeometryHandle {
    pub fn new(gl: &impl GlApi) -> Self {
        Self {
            vao: gl.create_vertex_array(),
        }
    }

    /// GL vertex array name.
    pub fn vao(&self) -> GLuint {
        self.vao
    }

    pub fn bind(&self, gl: &impl GlApi) {
        gl.bind_vertex_array(self.vao);
    }
}

/// The geometry handle plus the program that draws the image.
#[derive(Debug)]
pub struct QuadResources {
    geometry: GeometryHandle,
    program: Program,
}

impl QuadResources {
    pub fn new(gl: &impl GlApi) -> Result<Self, BuildError> {
        let program = build_program(
            gl,
            &[
                (ShaderStage::Vertex, QUAD_VERTEX_SHADER),
                (ShaderStage::Fragment, QUAD_FRAGMENT_SHADER),
            ],
        )?;
        let geometry = GeometryHandle::new(gl);
        debug!(vao = geometry.vao, program = program.id(), "quad resources ready");
        Ok(Self { geometry, program })
    }

    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    pub fn program(&self) -> Program {
        self.program
    }

    /// Draw `image` over the current viewport.
    pub fn draw(&self, gl: &impl GlApi, image: &ImageResource) {
        self.geometry.bind(gl);
        self.program.bind(gl);
        gl.bind_texture_unit(SAMPLE_UNIT, image.texture());
        gl.draw_arrays(gl::TRIANGLES, 0, QUAD_VERTEX_COUNT as i32);
    }
}

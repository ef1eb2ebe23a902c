//! Common interface over the OpenGL driver.

use gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};

/// The OpenGL entry points used by the compute-render bridge.
///
/// Names and enums follow the GL API one-to-one; object names are plain
/// `GLuint`s with `0` meaning "none". Implementations are called only from the
/// thread that owns the current GL context.
///
/// Implementations must be `Send + Sync` to live inside a GUI paint callback;
/// calls still happen on the GL thread only.
pub trait GlApi: Send + Sync {
    // -- shaders and programs ---------------------------------------------

    /// `glCreateShader`. `kind` is one of `VERTEX_SHADER`, `FRAGMENT_SHADER`
    /// or `COMPUTE_SHADER`.
    fn create_shader(&self, kind: GLenum) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &str);
    fn compile_shader(&self, shader: GLuint);
    /// `COMPILE_STATUS` of `shader`.
    fn shader_compile_status(&self, shader: GLuint) -> bool;
    /// Info log of `shader`, read into a buffer of `capacity` bytes (including
    /// the terminator). Longer logs are cut by the driver.
    fn shader_info_log(&self, shader: GLuint, capacity: usize) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    /// `LINK_STATUS` of `program`.
    fn program_link_status(&self, program: GLuint) -> bool;
    /// Info log of `program`, bounded like [`GlApi::shader_info_log`].
    fn program_info_log(&self, program: GLuint, capacity: usize) -> String;
    fn use_program(&self, program: GLuint);

    // -- textures and images ----------------------------------------------

    /// `glCreateTextures(TEXTURE_2D, 1, ..)`.
    fn create_texture_2d(&self) -> GLuint;
    fn texture_parameter(&self, texture: GLuint, pname: GLenum, value: GLint);
    /// `glTextureStorage2D`: immutable storage, only contents may change.
    fn texture_storage_2d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
    /// `glBindImageTexture` for level 0 of a non-layered 2D texture.
    fn bind_image_texture(&self, unit: GLuint, texture: GLuint, access: GLenum, format: GLenum);
    fn bind_texture_unit(&self, unit: GLuint, texture: GLuint);

    // -- compute ----------------------------------------------------------

    fn dispatch_compute(&self, groups_x: GLuint, groups_y: GLuint, groups_z: GLuint);
    fn memory_barrier(&self, barriers: GLbitfield);

    // -- geometry and drawing ---------------------------------------------

    fn create_vertex_array(&self) -> GLuint;
    fn bind_vertex_array(&self, vao: GLuint);
    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei);

    // -- state queries ----------------------------------------------------

    /// `GetIntegerv(CURRENT_PROGRAM)`.
    fn current_program(&self) -> GLuint;
    /// `GetIntegerv(VERTEX_ARRAY_BINDING)`.
    fn current_vertex_array(&self) -> GLuint;
    /// `GetString(VERSION)`, or `None` when no context is current.
    fn version_string(&self) -> Option<String>;
}

//! [`RawGl`]: the [`GlApi`] implementation over the `gl` crate.

use std::ffi::CStr;

use gl::types::{GLbitfield, GLchar, GLenum, GLint, GLsizei, GLuint};

use crate::GlApi;

/// Direct OpenGL driver calls.
///
/// Zero-sized: the `gl` crate keeps its function pointers in process globals,
/// loaded by [`load_gl`](crate::load_gl).
#[derive(Debug, Clone, Copy, Default)]
pub struct RawGl;

impl RawGl {
    /// Driver handle for the current context.
    ///
    /// Returns `None` until [`load_gl`](crate::load_gl) has succeeded.
    pub fn new() -> Option<Self> {
        crate::is_loaded().then_some(Self)
    }
}

/// Read an info log into a `capacity`-byte buffer, dropping the terminator.
fn read_info_log(
    object: GLuint,
    capacity: usize,
    getter: unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar),
) -> String {
    if capacity == 0 {
        return String::new();
    }
    let mut buffer = vec![0u8; capacity];
    let mut written: GLsizei = 0;
    unsafe {
        getter(
            object,
            capacity as GLsizei,
            &mut written,
            buffer.as_mut_ptr().cast(),
        );
    }
    buffer.truncate((written.max(0) as usize).min(capacity));
    String::from_utf8_lossy(&buffer).into_owned()
}

fn get_integer(pname: GLenum) -> GLint {
    let mut value: GLint = 0;
    unsafe {
        gl::GetIntegerv(pname, &mut value);
    }
    value
}

impl GlApi for RawGl {
    fn create_shader(&self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        let ptr = source.as_ptr() as *const GLchar;
        let len = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &ptr, &len);
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        let mut status: GLint = 0;
        unsafe {
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
        }
        status != gl::FALSE as GLint
    }

    fn shader_info_log(&self, shader: GLuint, capacity: usize) -> String {
        read_info_log(shader, capacity, gl::GetShaderInfoLog)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        let mut status: GLint = 0;
        unsafe {
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
        }
        status != gl::FALSE as GLint
    }

    fn program_info_log(&self, program: GLuint, capacity: usize) -> String {
        read_info_log(program, capacity, gl::GetProgramInfoLog)
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn create_texture_2d(&self) -> GLuint {
        let mut texture: GLuint = 0;
        unsafe {
            gl::CreateTextures(gl::TEXTURE_2D, 1, &mut texture);
        }
        texture
    }

    fn texture_parameter(&self, texture: GLuint, pname: GLenum, value: GLint) {
        unsafe { gl::TextureParameteri(texture, pname, value) }
    }

    fn texture_storage_2d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        unsafe { gl::TextureStorage2D(texture, levels, format, width, height) }
    }

    fn bind_image_texture(&self, unit: GLuint, texture: GLuint, access: GLenum, format: GLenum) {
        unsafe { gl::BindImageTexture(unit, texture, 0, gl::FALSE, 0, access, format) }
    }

    fn bind_texture_unit(&self, unit: GLuint, texture: GLuint) {
        unsafe { gl::BindTextureUnit(unit, texture) }
    }

    fn dispatch_compute(&self, groups_x: GLuint, groups_y: GLuint, groups_z: GLuint) {
        unsafe { gl::DispatchCompute(groups_x, groups_y, groups_z) }
    }

    fn memory_barrier(&self, barriers: GLbitfield) {
        unsafe { gl::MemoryBarrier(barriers) }
    }

    fn create_vertex_array(&self) -> GLuint {
        let mut vao: GLuint = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
        }
        vao
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        unsafe { gl::BindVertexArray(vao) }
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        unsafe { gl::Viewport(x, y, width, height) }
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        unsafe { gl::DrawArrays(mode, first, count) }
    }

    fn current_program(&self) -> GLuint {
        get_integer(gl::CURRENT_PROGRAM) as GLuint
    }

    fn current_vertex_array(&self) -> GLuint {
        get_integer(gl::VERTEX_ARRAY_BINDING) as GLuint
    }

    fn version_string(&self) -> Option<String> {
        let ptr = unsafe { gl::GetString(gl::VERSION) };
        if ptr.is_null() {
            return None;
        }
        let version = unsafe { CStr::from_ptr(ptr.cast()) };
        Some(version.to_string_lossy().into_owned())
    }
}

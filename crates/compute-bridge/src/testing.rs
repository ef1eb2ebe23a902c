//! [`RecordingGl`]: a software stand-in for the GL driver used by unit tests.
//!
//! It keeps the binding state a real context would, records every mutating
//! call in order, syntax-checks GLSL just enough to produce compile errors,
//! runs the gradient kernel on the CPU when a compute program is dispatched,
//! and counts draws that sample an image still carrying unfenced compute
//! writes.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};
use gl_driver::GlApi;

use crate::compute::gradient_texel;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(GLenum),
    ShaderSource(GLuint),
    CompileShader(GLuint),
    DeleteShader(GLuint),
    CreateProgram(GLuint),
    AttachShader(GLuint, GLuint),
    LinkProgram(GLuint),
    UseProgram(GLuint),
    CreateTexture(GLuint),
    TextureParameter(GLuint, GLenum, GLint),
    TextureStorage2D(GLuint, GLsizei, GLenum, GLsizei, GLsizei),
    BindImageTexture(GLuint, GLuint, GLenum, GLenum),
    BindTextureUnit(GLuint, GLuint),
    DispatchCompute(GLuint, GLuint, GLuint),
    MemoryBarrier(GLbitfield),
    CreateVertexArray(GLuint),
    BindVertexArray(GLuint),
    Viewport(GLint, GLint, GLsizei, GLsizei),
    DrawArrays(GLenum, GLint, GLsizei),
}

#[derive(Debug, Clone, Default)]
struct ShaderObject {
    kind: GLenum,
    source: String,
    compiled: bool,
    log: String,
}

#[derive(Debug, Clone, Default)]
struct ProgramObject {
    shaders: Vec<GLuint>,
    linked: bool,
    log: String,
}

/// Storage and contents of a recorded texture.
#[derive(Debug, Clone, Default)]
pub struct TextureObject {
    pub levels: GLsizei,
    pub format: GLenum,
    pub width: u32,
    pub height: u32,
    parameters: HashMap<GLenum, GLint>,
    texels: Vec<[f32; 4]>,
}

impl TextureObject {
    pub fn parameter(&self, pname: GLenum) -> Option<GLint> {
        self.parameters.get(&pname).copied()
    }

    pub fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        self.texels[(y * self.width + x) as usize]
    }
}

#[derive(Debug, Default)]
struct State {
    next_name: GLuint,
    calls: Vec<Call>,
    shaders: HashMap<GLuint, ShaderObject>,
    programs: HashMap<GLuint, ProgramObject>,
    textures: HashMap<GLuint, TextureObject>,
    vertex_arrays: HashSet<GLuint>,
    current_program: GLuint,
    current_vertex_array: GLuint,
    image_units: HashMap<GLuint, GLuint>,
    texture_units: HashMap<GLuint, GLuint>,
    unfenced: HashSet<GLuint>,
    stale_reads: usize,
    draws_without_vao: usize,
    forced_compile_failures: HashSet<GLenum>,
    log_padding: usize,
}

impl State {
    fn name(&mut self) -> GLuint {
        self.next_name += 1;
        self.next_name
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingGl {
    state: Arc<Mutex<State>>,
}

/// Minimal GLSL sanity check: a version line, a `main`, balanced delimiters.
fn check_source(source: &str) -> Result<(), String> {
    if !source.trim_start().starts_with("#version") {
        return Err("0:1(1): error: missing #version directive".to_string());
    }
    if !source.contains("main(") {
        return Err("0:1(1): error: no function with name 'main'".to_string());
    }
    let lines = source.lines().count().max(1);
    for (open, close) in [('{', '}'), ('(', ')'), ('[', ']')] {
        let depth = source.chars().fold(0i64, |depth, c| {
            if c == open {
                depth + 1
            } else if c == close {
                depth - 1
            } else {
                depth
            }
        });
        if depth != 0 {
            return Err(format!(
                "0:{lines}(1): error: syntax error, unbalanced '{open}{close}'"
            ));
        }
    }
    Ok(())
}

fn bounded(mut log: String, capacity: usize) -> String {
    log.truncate(capacity.saturating_sub(1));
    log
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn record(&self, call: Call) -> MutexGuard<'_, State> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    /// Make every later compile of `kind` fail.
    pub fn fail_compile_of(&self, kind: GLenum) {
        self.lock().forced_compile_failures.insert(kind);
    }

    /// Append `bytes` of filler to every compile log.
    pub fn set_log_padding(&self, bytes: usize) {
        self.lock().log_padding = bytes;
    }

    pub fn is_linked(&self, program: GLuint) -> bool {
        self.lock()
            .programs
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    pub fn texture(&self, texture: GLuint) -> TextureObject {
        self.lock().textures[&texture].clone()
    }

    pub fn has_unfenced_writes(&self, texture: GLuint) -> bool {
        self.lock().unfenced.contains(&texture)
    }

    pub fn stale_reads(&self) -> usize {
        self.lock().stale_reads
    }

    pub fn draws_without_vao(&self) -> usize {
        self.lock().draws_without_vao
    }
}

impl GlApi for RecordingGl {
    fn create_shader(&self, kind: GLenum) -> GLuint {
        let mut state = self.record(Call::CreateShader(kind));
        let name = state.name();
        state.shaders.insert(
            name,
            ShaderObject {
                kind,
                ..Default::default()
            },
        );
        name
    }

    fn shader_source(&self, shader: GLuint, source: &str) {
        let mut state = self.record(Call::ShaderSource(shader));
        if let Some(object) = state.shaders.get_mut(&shader) {
            object.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        let mut state = self.record(Call::CompileShader(shader));
        let forced = state.forced_compile_failures.clone();
        let padding = state.log_padding;
        if let Some(object) = state.shaders.get_mut(&shader) {
            let result = if forced.contains(&object.kind) {
                Err("0:1(1): error: forced failure".to_string())
            } else {
                check_source(&object.source)
            };
            match result {
                Ok(()) => {
                    object.compiled = true;
                    object.log.clear();
                }
                Err(log) => {
                    object.compiled = false;
                    object.log = log + &"x".repeat(padding);
                }
            }
        }
    }

    fn shader_compile_status(&self, shader: GLuint) -> bool {
        self.lock().shaders.get(&shader).is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: GLuint, capacity: usize) -> String {
        let log = self
            .lock()
            .shaders
            .get(&shader)
            .map(|s| s.log.clone())
            .unwrap_or_default();
        bounded(log, capacity)
    }

    fn delete_shader(&self, shader: GLuint) {
        // Attached shaders live on until their program goes away.
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> GLuint {
        let mut state = self.lock();
        let name = state.name();
        state.calls.push(Call::CreateProgram(name));
        state.programs.insert(name, ProgramObject::default());
        name
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        let mut state = self.record(Call::AttachShader(program, shader));
        if let Some(object) = state.programs.get_mut(&program) {
            object.shaders.push(shader);
        }
    }

    fn link_program(&self, program: GLuint) {
        let mut state = self.record(Call::LinkProgram(program));
        let Some(shaders) = state.programs.get(&program).map(|p| p.shaders.clone()) else {
            return;
        };
        let stages: Vec<_> = shaders
            .iter()
            .filter_map(|s| state.shaders.get(s))
            .filter(|s| s.compiled)
            .map(|s| s.kind)
            .collect();

        let has = |kind| stages.contains(&kind);
        let complete = stages.len() == shaders.len()
            && if has(gl::COMPUTE_SHADER) {
                stages.len() == 1
            } else {
                has(gl::VERTEX_SHADER) && has(gl::FRAGMENT_SHADER)
            };

        if let Some(object) = state.programs.get_mut(&program) {
            object.linked = complete;
            object.log = if complete {
                String::new()
            } else {
                "error: program stages are missing or incompatible".to_string()
            };
        }
    }

    fn program_link_status(&self, program: GLuint) -> bool {
        self.is_linked(program)
    }

    fn program_info_log(&self, program: GLuint, capacity: usize) -> String {
        let log = self
            .lock()
            .programs
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default();
        bounded(log, capacity)
    }

    fn use_program(&self, program: GLuint) {
        self.record(Call::UseProgram(program)).current_program = program;
    }

    fn create_texture_2d(&self) -> GLuint {
        let mut state = self.lock();
        let name = state.name();
        state.calls.push(Call::CreateTexture(name));
        state.textures.insert(name, TextureObject::default());
        name
    }

    fn texture_parameter(&self, texture: GLuint, pname: GLenum, value: GLint) {
        let mut state = self.record(Call::TextureParameter(texture, pname, value));
        if let Some(object) = state.textures.get_mut(&texture) {
            object.parameters.insert(pname, value);
        }
    }

    fn texture_storage_2d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        format: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        let mut state =
            self.record(Call::TextureStorage2D(texture, levels, format, width, height));
        if let Some(object) = state.textures.get_mut(&texture) {
            object.levels = levels;
            object.format = format;
            object.width = width as u32;
            object.height = height as u32;
            object.texels = vec![[0.0; 4]; (width * height) as usize];
        }
    }

    fn bind_image_texture(&self, unit: GLuint, texture: GLuint, access: GLenum, format: GLenum) {
        let mut state = self.record(Call::BindImageTexture(unit, texture, access, format));
        state.image_units.insert(unit, texture);
    }

    fn bind_texture_unit(&self, unit: GLuint, texture: GLuint) {
        let mut state = self.record(Call::BindTextureUnit(unit, texture));
        state.texture_units.insert(unit, texture);
    }

    fn dispatch_compute(&self, groups_x: GLuint, groups_y: GLuint, groups_z: GLuint) {
        let mut state = self.record(Call::DispatchCompute(groups_x, groups_y, groups_z));
        let program = state.current_program;
        let is_compute = state.programs.get(&program).is_some_and(|p| {
            p.linked
                && p.shaders
                    .iter()
                    .filter_map(|s| state.shaders.get(s))
                    .any(|s| s.kind == gl::COMPUTE_SHADER)
        });
        let Some(texture) = state.image_units.get(&0).copied() else {
            return;
        };
        if !is_compute || groups_z == 0 {
            return;
        }
        let Some(image) = state.textures.get_mut(&texture) else {
            return;
        };
        let (width, height) = (image.width, image.height);
        for y in 0..groups_y.min(height) {
            for x in 0..groups_x.min(width) {
                image.texels[(y * width + x) as usize] = gradient_texel(x, y, width, height);
            }
        }
        state.unfenced.insert(texture);
    }

    fn memory_barrier(&self, barriers: GLbitfield) {
        let mut state = self.record(Call::MemoryBarrier(barriers));
        if barriers & (gl::SHADER_IMAGE_ACCESS_BARRIER_BIT | gl::TEXTURE_FETCH_BARRIER_BIT) != 0 {
            state.unfenced.clear();
        }
    }

    fn create_vertex_array(&self) -> GLuint {
        let mut state = self.lock();
        let name = state.name();
        state.calls.push(Call::CreateVertexArray(name));
        state.vertex_arrays.insert(name);
        name
    }

    fn bind_vertex_array(&self, vao: GLuint) {
        self.record(Call::BindVertexArray(vao)).current_vertex_array = vao;
    }

    fn viewport(&self, x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn draw_arrays(&self, mode: GLenum, first: GLint, count: GLsizei) {
        let mut state = self.record(Call::DrawArrays(mode, first, count));
        if !state.vertex_arrays.contains(&state.current_vertex_array) {
            state.draws_without_vao += 1;
        }
        let sampled = state.texture_units.get(&0).copied();
        if sampled.is_some_and(|t| state.unfenced.contains(&t)) {
            state.stale_reads += 1;
        }
    }

    fn current_program(&self) -> GLuint {
        self.lock().current_program
    }

    fn current_vertex_array(&self) -> GLuint {
        self.lock().current_vertex_array
    }

    fn version_string(&self) -> Option<String> {
        Some("4.6 (recording)".to_string())
    }
}

//! OpenGL implementation of [`GraphicsBackend`] on top of the `gl` crate
//!
//! The `gl` crate exposes raw, global function pointers. An [`OpenGlBackend`]
//! can only be obtained through [`OpenGlBackend::load`], which runs after a
//! context has been made current, so every call below has a current context
//! with loaded entry points.

#![allow(unsafe_code)]

use crate::config::ClearColor;
use crate::error::{BootstrapError, BootstrapResult};
use crate::render::backend::{
    BufferHandle, BufferTarget, GraphicsBackend, ProgramHandle, ShaderHandle, ShaderStage,
    VertexArrayHandle, VertexAttribute,
};
use crate::render::shader::{InfoLog, MAX_INFO_LOG_BYTES};
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLsizeiptr, GLuint};
use std::ffi::c_void;
use std::fmt;

/// Context version reported by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlVersion {
    /// Major version
    pub major: i32,
    /// Minor version
    pub minor: i32,
}

impl GlVersion {
    /// Whether this context is at least `major.minor`
    pub fn satisfies(self, major: u32, minor: u32) -> bool {
        (i64::from(self.major), i64::from(self.minor)) >= (i64::from(major), i64::from(minor))
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Live OpenGL function table bound to the current context
pub struct OpenGlBackend {
    version: GlVersion,
}

impl OpenGlBackend {
    /// Load GL entry points through `loader` and verify the context
    ///
    /// The context the loader belongs to must be current on this thread.
    pub(crate) fn load<F>(loader: F) -> BootstrapResult<Self>
    where
        F: FnMut(&'static str) -> *const c_void,
    {
        gl::load_with(loader);

        let missing: Vec<&str> = [
            ("glGetIntegerv", gl::GetIntegerv::is_loaded()),
            ("glCreateShader", gl::CreateShader::is_loaded()),
            ("glCreateProgram", gl::CreateProgram::is_loaded()),
            ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
            ("glBufferData", gl::BufferData::is_loaded()),
            ("glDrawElements", gl::DrawElements::is_loaded()),
        ]
        .into_iter()
        .filter_map(|(name, loaded)| (!loaded).then_some(name))
        .collect();

        if !missing.is_empty() {
            return Err(BootstrapError::ContextLoad(format!(
                "missing entry points: {}",
                missing.join(", ")
            )));
        }

        let mut major: GLint = 0;
        let mut minor: GLint = 0;
        // SAFETY: glGetIntegerv was just verified as loaded and the caller
        // guarantees a current context.
        unsafe {
            gl::GetIntegerv(gl::MAJOR_VERSION, &mut major);
            gl::GetIntegerv(gl::MINOR_VERSION, &mut minor);
        }

        if major == 0 {
            return Err(BootstrapError::ContextLoad(
                "driver reported OpenGL version 0".to_string(),
            ));
        }

        let version = GlVersion { major, minor };
        log::info!("Loaded OpenGL {}", version);
        Ok(Self { version })
    }

    /// Version of the loaded context
    pub const fn version(&self) -> GlVersion {
        self.version
    }
}

const fn stage_enum(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

const fn target_enum(target: BufferTarget) -> GLenum {
    match target {
        BufferTarget::Vertex => gl::ARRAY_BUFFER,
        BufferTarget::Index => gl::ELEMENT_ARRAY_BUFFER,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const LOG_CAPACITY: GLsizei = MAX_INFO_LOG_BYTES as GLsizei;

/// Read a bounded info log through one of the `glGet*InfoLog` entry points
fn read_info_log(
    total_len: GLint,
    fetch: impl FnOnce(GLsizei, &mut GLsizei, *mut GLchar),
) -> InfoLog {
    let mut buffer = vec![0_u8; MAX_INFO_LOG_BYTES];
    let mut written: GLsizei = 0;
    fetch(LOG_CAPACITY, &mut written, buffer.as_mut_ptr().cast());
    buffer.truncate(usize::try_from(written).unwrap_or(0));

    // The reported length counts the terminator.
    let total = usize::try_from(total_len).unwrap_or(0).saturating_sub(1);
    InfoLog::new(&buffer, total)
}

impl GraphicsBackend for OpenGlBackend {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle {
        // SAFETY: context is current (see module docs).
        ShaderHandle(unsafe { gl::CreateShader(stage_enum(stage)) })
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        let ptr = source.as_ptr().cast::<GLchar>();
        let len = GLint::try_from(source.len()).unwrap_or(GLint::MAX);
        // SAFETY: one string with an explicit length, so no terminator is
        // needed; `source` outlives the call.
        unsafe { gl::ShaderSource(shader.0, 1, &ptr, &len) };
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        // SAFETY: context is current.
        unsafe { gl::CompileShader(shader.0) };
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        let mut status: GLint = 0;
        // SAFETY: `status` is a valid out-pointer.
        unsafe { gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut status) };
        status != GLint::from(gl::FALSE)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> InfoLog {
        let mut total: GLint = 0;
        // SAFETY: `total` is a valid out-pointer.
        unsafe { gl::GetShaderiv(shader.0, gl::INFO_LOG_LENGTH, &mut total) };
        read_info_log(total, |size, written, buf| {
            // SAFETY: `buf` points to `size` writable bytes.
            unsafe { gl::GetShaderInfoLog(shader.0, size, written, buf) };
        })
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        // SAFETY: deleting an unknown name is ignored by GL.
        unsafe { gl::DeleteShader(shader.0) };
    }

    fn create_program(&mut self) -> ProgramHandle {
        // SAFETY: context is current.
        ProgramHandle(unsafe { gl::CreateProgram() })
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        // SAFETY: context is current.
        unsafe { gl::AttachShader(program.0, shader.0) };
    }

    fn link_program(&mut self, program: ProgramHandle) {
        // SAFETY: context is current.
        unsafe { gl::LinkProgram(program.0) };
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        let mut status: GLint = 0;
        // SAFETY: `status` is a valid out-pointer.
        unsafe { gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut status) };
        status != GLint::from(gl::FALSE)
    }

    fn program_info_log(&self, program: ProgramHandle) -> InfoLog {
        let mut total: GLint = 0;
        // SAFETY: `total` is a valid out-pointer.
        unsafe { gl::GetProgramiv(program.0, gl::INFO_LOG_LENGTH, &mut total) };
        read_info_log(total, |size, written, buf| {
            // SAFETY: `buf` points to `size` writable bytes.
            unsafe { gl::GetProgramInfoLog(program.0, size, written, buf) };
        })
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        // SAFETY: deleting an unknown name is ignored by GL.
        unsafe { gl::DeleteProgram(program.0) };
    }

    fn use_program(&mut self, program: ProgramHandle) {
        // SAFETY: context is current.
        unsafe { gl::UseProgram(program.0) };
    }

    fn create_buffer(&mut self) -> BufferHandle {
        let mut name: GLuint = 0;
        // SAFETY: `name` has room for exactly one buffer name.
        unsafe { gl::GenBuffers(1, &mut name) };
        BufferHandle(name)
    }

    fn create_vertex_array(&mut self) -> VertexArrayHandle {
        let mut name: GLuint = 0;
        // SAFETY: `name` has room for exactly one vertex array name.
        unsafe { gl::GenVertexArrays(1, &mut name) };
        VertexArrayHandle(name)
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        // SAFETY: context is current.
        unsafe { gl::BindVertexArray(vertex_array.0) };
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        // SAFETY: context is current.
        unsafe { gl::BindBuffer(target_enum(target), buffer.0) };
    }

    fn buffer_static_data(&mut self, target: BufferTarget, data: &[u8]) {
        let size = GLsizeiptr::try_from(data.len()).unwrap_or(GLsizeiptr::MAX);
        // SAFETY: GL copies `size` bytes out of `data` before returning.
        unsafe {
            gl::BufferData(
                target_enum(target),
                size,
                data.as_ptr().cast::<c_void>(),
                gl::STATIC_DRAW,
            );
        }
    }

    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribute) {
        // SAFETY: with an array buffer bound the pointer argument is a byte
        // offset into that buffer, never dereferenced on the client side.
        unsafe {
            gl::VertexAttribPointer(
                attribute.location,
                attribute.components,
                gl::FLOAT,
                gl::FALSE,
                attribute.stride,
                attribute.offset as *const c_void,
            );
        }
    }

    fn enable_vertex_attrib_array(&mut self, location: u32) {
        // SAFETY: context is current.
        unsafe { gl::EnableVertexAttribArray(location) };
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        // SAFETY: negative sizes raise GL_INVALID_VALUE, they do not fault.
        unsafe { gl::Viewport(x, y, width, height) };
    }

    fn clear_color(&mut self, color: ClearColor) {
        // SAFETY: context is current.
        unsafe { gl::ClearColor(color.r, color.g, color.b, color.a) };
    }

    fn clear_color_buffer(&mut self) {
        // SAFETY: context is current.
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn draw_indexed_triangles(&mut self, index_count: i32) {
        // SAFETY: a null pointer means offset 0 into the bound index buffer.
        unsafe {
            gl::DrawElements(gl::TRIANGLES, index_count, gl::UNSIGNED_INT, std::ptr::null());
        }
    }

    fn next_error(&mut self) -> Option<u32> {
        // SAFETY: context is current.
        let code = unsafe { gl::GetError() };
        (code != gl::NO_ERROR).then_some(code)
    }
}

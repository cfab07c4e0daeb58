//! Graphics backend contract
//!
//! Every GPU call the crate makes goes through [`GraphicsBackend`]. The
//! production implementation is [`super::OpenGlBackend`]; tests drive the same
//! code paths through a recording fake.
//!
//! Handles are plain GL object names wrapped in newtypes so a buffer can't be
//! passed where a program is expected.

use crate::config::ClearColor;
use crate::render::shader::InfoLog;
use std::fmt;

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Per-vertex stage
    Vertex,
    /// Per-fragment stage
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertex => f.write_str("vertex"),
            Self::Fragment => f.write_str("fragment"),
        }
    }
}

/// Compiled (or failed) shader stage object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Program object made of linked stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Vertex array object recording attribute layout and the bound index buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

/// Binding point a buffer is used through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// `GL_ARRAY_BUFFER`
    Vertex,
    /// `GL_ELEMENT_ARRAY_BUFFER`
    Index,
}

/// Layout of one float vector attribute inside an interleaved vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader `layout(location = N)`
    pub location: u32,
    /// Number of `f32` components
    pub components: i32,
    /// Bytes between consecutive vertices
    pub stride: i32,
    /// Byte offset of the first component within a vertex
    pub offset: usize,
}

/// GPU operations needed to build and draw the quad
///
/// Methods mirror the GL entry points they wrap and take `&mut self` whenever
/// the call changes GPU state. Implementations require the context to be
/// current on the calling thread for their entire lifetime.
pub trait GraphicsBackend {
    /// Create an empty shader object for `stage`
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle;

    /// Replace the source text of `shader`
    fn shader_source(&mut self, shader: ShaderHandle, source: &str);

    /// Compile the current source of `shader`
    fn compile_shader(&mut self, shader: ShaderHandle);

    /// Whether the last compile of `shader` succeeded
    fn shader_compile_status(&self, shader: ShaderHandle) -> bool;

    /// Bounded compile diagnostic for `shader`
    fn shader_info_log(&self, shader: ShaderHandle) -> InfoLog;

    /// Release `shader`
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// Create an empty program object
    fn create_program(&mut self) -> ProgramHandle;

    /// Attach a shader stage to `program`
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);

    /// Link the attached stages of `program`
    fn link_program(&mut self, program: ProgramHandle);

    /// Whether the last link of `program` succeeded
    fn program_link_status(&self, program: ProgramHandle) -> bool;

    /// Bounded link diagnostic for `program`
    fn program_info_log(&self, program: ProgramHandle) -> InfoLog;

    /// Release `program`
    fn delete_program(&mut self, program: ProgramHandle);

    /// Make `program` the active program for subsequent draws
    fn use_program(&mut self, program: ProgramHandle);

    /// Allocate a buffer name
    fn create_buffer(&mut self) -> BufferHandle;

    /// Allocate a vertex array name
    fn create_vertex_array(&mut self) -> VertexArrayHandle;

    /// Bind `vertex_array` as the current vertex array
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Bind `buffer` to `target`
    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle);

    /// Upload `data` into the buffer bound to `target` with a static-draw hint
    fn buffer_static_data(&mut self, target: BufferTarget, data: &[u8]);

    /// Describe a float attribute read from the bound vertex buffer
    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribute);

    /// Enable the attribute at `location`
    fn enable_vertex_attrib_array(&mut self, location: u32);

    /// Set the viewport rectangle in framebuffer pixels
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);

    /// Set the color used by [`GraphicsBackend::clear_color_buffer`]
    fn clear_color(&mut self, color: ClearColor);

    /// Clear the color buffer
    fn clear_color_buffer(&mut self);

    /// Draw `index_count` `u32` indices from the bound index buffer as triangles
    fn draw_indexed_triangles(&mut self, index_count: i32);

    /// Pop the oldest pending error flag, `None` when the queue is empty
    fn next_error(&mut self) -> Option<u32>;
}

impl<G: GraphicsBackend + ?Sized> GraphicsBackend for &mut G {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle {
        (**self).create_shader(stage)
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        (**self).shader_source(shader, source);
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        (**self).compile_shader(shader);
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        (**self).shader_compile_status(shader)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> InfoLog {
        (**self).shader_info_log(shader)
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        (**self).delete_shader(shader);
    }

    fn create_program(&mut self) -> ProgramHandle {
        (**self).create_program()
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        (**self).attach_shader(program, shader);
    }

    fn link_program(&mut self, program: ProgramHandle) {
        (**self).link_program(program);
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        (**self).program_link_status(program)
    }

    fn program_info_log(&self, program: ProgramHandle) -> InfoLog {
        (**self).program_info_log(program)
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        (**self).delete_program(program);
    }

    fn use_program(&mut self, program: ProgramHandle) {
        (**self).use_program(program);
    }

    fn create_buffer(&mut self) -> BufferHandle {
        (**self).create_buffer()
    }

    fn create_vertex_array(&mut self) -> VertexArrayHandle {
        (**self).create_vertex_array()
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        (**self).bind_vertex_array(vertex_array);
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        (**self).bind_buffer(target, buffer);
    }

    fn buffer_static_data(&mut self, target: BufferTarget, data: &[u8]) {
        (**self).buffer_static_data(target, data);
    }

    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribute) {
        (**self).vertex_attrib_pointer(attribute);
    }

    fn enable_vertex_attrib_array(&mut self, location: u32) {
        (**self).enable_vertex_attrib_array(location);
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        (**self).viewport(x, y, width, height);
    }

    fn clear_color(&mut self, color: ClearColor) {
        (**self).clear_color(color);
    }

    fn clear_color_buffer(&mut self) {
        (**self).clear_color_buffer();
    }

    fn draw_indexed_triangles(&mut self, index_count: i32) {
        (**self).draw_indexed_triangles(index_count);
    }

    fn next_error(&mut self) -> Option<u32> {
        (**self).next_error()
    }
}

/// Symbolic name of a `glGetError` code
pub const fn error_name(code: u32) -> &'static str {
    match code {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "unknown GL error",
    }
}

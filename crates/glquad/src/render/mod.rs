//! Rendering
//!
//! - **`backend`**: the [`GraphicsBackend`] contract and typed GL handles
//! - **`opengl`**: the `gl` crate implementation
//! - **`shader`**: stage compilation, program linking, bounded info logs
//! - **`geometry`**: the quad and its upload
//! - **`frame`**: per-frame drawing and the render loop

pub mod backend;
pub mod frame;
pub mod geometry;
pub mod opengl;
pub mod shader;

pub use backend::{
    BufferHandle, BufferTarget, GraphicsBackend, ProgramHandle, ShaderHandle, ShaderStage,
    VertexArrayHandle, VertexAttribute,
};
pub use geometry::{QuadScene, Vertex, QUAD_INDICES, QUAD_VERTICES};
pub use opengl::{GlVersion, OpenGlBackend};
pub use shader::{
    build_program, compile_shader, link_program, InfoLog, FRAGMENT_SHADER_SOURCE,
    MAX_INFO_LOG_BYTES, VERTEX_SHADER_SOURCE,
};

//! The quad: vertex data, index data, attribute layout and upload

use crate::error::BootstrapResult;
use crate::render::backend::{
    BufferHandle, BufferTarget, GraphicsBackend, ProgramHandle, VertexArrayHandle, VertexAttribute,
};
use crate::render::shader::{build_program, FRAGMENT_SHADER_SOURCE, VERTEX_SHADER_SOURCE};
use bytemuck::{Pod, Zeroable};
use std::mem::{offset_of, size_of};

/// Interleaved vertex: position then color, 24 bytes
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Clip-space position
    pub position: [f32; 3],
    /// Linear RGB color
    pub color: [f32; 3],
}

impl Vertex {
    /// Bytes between consecutive vertices
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const STRIDE: i32 = size_of::<Self>() as i32;

    /// Attribute 0 is position, attribute 1 is color
    pub const ATTRIBUTES: [VertexAttribute; 2] = [
        VertexAttribute {
            location: 0,
            components: 3,
            stride: Self::STRIDE,
            offset: offset_of!(Self, position),
        },
        VertexAttribute {
            location: 1,
            components: 3,
            stride: Self::STRIDE,
            offset: offset_of!(Self, color),
        },
    ];

    const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// Corners of the quad
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new([0.5, 0.5, 0.0], [0.0, 1.0, 1.0]),   // top right
    Vertex::new([0.5, -0.5, 0.0], [1.0, 1.0, 0.0]),  // bottom right
    Vertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 1.0]), // bottom left
    Vertex::new([-0.5, 0.5, 0.0], [0.0, 0.0, 0.0]),  // top left
];

/// Two triangles sharing the bottom-right/top-left diagonal
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3, // first triangle
    1, 2, 3, // second triangle
];

/// Indices drawn per frame
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const QUAD_INDEX_COUNT: i32 = QUAD_INDICES.len() as i32;

/// GPU objects backing the quad
///
/// The index buffer is recorded in `vertex_array` alongside the vertex buffer
/// it indexes. Neither is rebound to anything else afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadScene {
    /// Linked quad program
    pub program: ProgramHandle,
    /// Vertex array holding the attribute layout
    pub vertex_array: VertexArrayHandle,
    /// Interleaved vertex data
    pub vertex_buffer: BufferHandle,
    /// `u32` index data
    pub index_buffer: BufferHandle,
    /// Number of indices drawn per frame
    pub index_count: i32,
}

impl QuadScene {
    /// Upload the quad and build its program from the embedded shaders
    ///
    /// # Errors
    ///
    /// Compile or link failure of the embedded shaders.
    pub fn upload<G>(gfx: &mut G) -> BootstrapResult<Self>
    where
        G: GraphicsBackend + ?Sized,
    {
        Self::upload_with_sources(gfx, VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
    }

    /// Upload the quad and build its program from the given shader sources
    ///
    /// # Errors
    ///
    /// [`BootstrapError::ShaderCompile`](crate::BootstrapError::ShaderCompile) or
    /// [`BootstrapError::ProgramLink`](crate::BootstrapError::ProgramLink).
    pub fn upload_with_sources<G>(
        gfx: &mut G,
        vertex_source: &str,
        fragment_source: &str,
    ) -> BootstrapResult<Self>
    where
        G: GraphicsBackend + ?Sized,
    {
        let vertex_buffer = gfx.create_buffer();
        let vertex_array = gfx.create_vertex_array();
        let index_buffer = gfx.create_buffer();

        gfx.bind_vertex_array(vertex_array);

        gfx.bind_buffer(BufferTarget::Vertex, vertex_buffer);
        gfx.buffer_static_data(BufferTarget::Vertex, bytemuck::cast_slice(&QUAD_VERTICES));

        gfx.bind_buffer(BufferTarget::Index, index_buffer);
        gfx.buffer_static_data(BufferTarget::Index, bytemuck::cast_slice(&QUAD_INDICES));

        for attribute in &Vertex::ATTRIBUTES {
            gfx.vertex_attrib_pointer(attribute);
        }
        for attribute in &Vertex::ATTRIBUTES {
            gfx.enable_vertex_attrib_array(attribute.location);
        }

        let program = build_program(gfx, vertex_source, fragment_source)?;

        log::info!(
            "Uploaded quad: {} vertices, {} indices",
            QUAD_VERTICES.len(),
            QUAD_INDICES.len()
        );

        Ok(Self {
            program,
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count: QUAD_INDEX_COUNT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingBackend, INVALID_SOURCE};
    use approx::assert_relative_eq;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(size_of::<Vertex>(), 24);
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(QUAD_INDEX_COUNT, 6);
        assert_eq!(Vertex::ATTRIBUTES[0].offset, 0);
        assert_eq!(Vertex::ATTRIBUTES[1].offset, 12);
        assert!(Vertex::ATTRIBUTES.iter().all(|a| a.components == 3));
    }

    #[test]
    fn test_quad_data() {
        let positions: Vec<[f32; 3]> = QUAD_VERTICES.iter().map(|v| v.position).collect();
        let expected = [
            [0.5, 0.5, 0.0],
            [0.5, -0.5, 0.0],
            [-0.5, -0.5, 0.0],
            [-0.5, 0.5, 0.0],
        ];
        for (actual, expected) in positions.iter().zip(expected.iter()) {
            for axis in 0..3 {
                assert_relative_eq!(actual[axis], expected[axis]);
            }
        }
        assert_eq!(QUAD_INDICES, [0, 1, 3, 1, 2, 3]);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn test_upload_sequence() {
        let mut gfx = RecordingBackend::new();
        let scene = QuadScene::upload(&mut gfx).unwrap();

        let vertex_bytes: Vec<u8> = bytemuck::cast_slice(&QUAD_VERTICES).to_vec();
        let index_bytes: Vec<u8> = bytemuck::cast_slice(&QUAD_INDICES).to_vec();
        assert_eq!(vertex_bytes.len(), 96);
        assert_eq!(index_bytes.len(), 24);

        let expected_prefix = vec![
            Call::CreateBuffer(scene.vertex_buffer),
            Call::CreateVertexArray(scene.vertex_array),
            Call::CreateBuffer(scene.index_buffer),
            Call::BindVertexArray(scene.vertex_array),
            Call::BindBuffer(BufferTarget::Vertex, scene.vertex_buffer),
            Call::BufferData(BufferTarget::Vertex, vertex_bytes),
            Call::BindBuffer(BufferTarget::Index, scene.index_buffer),
            Call::BufferData(BufferTarget::Index, index_bytes),
            Call::VertexAttribPointer(Vertex::ATTRIBUTES[0]),
            Call::VertexAttribPointer(Vertex::ATTRIBUTES[1]),
            Call::EnableVertexAttribArray(0),
            Call::EnableVertexAttribArray(1),
        ];
        assert_eq!(&gfx.calls[..expected_prefix.len()], expected_prefix.as_slice());
        assert_eq!(scene.index_count, 6);
        assert_ne!(scene.vertex_buffer, scene.index_buffer);
    }

    #[test]
    fn test_upload_builds_program_after_layout() {
        let mut gfx = RecordingBackend::new();
        let scene = QuadScene::upload(&mut gfx).unwrap();

        let layout_done = gfx.position(&Call::EnableVertexAttribArray(1)).unwrap();
        let program_created = gfx.position(&Call::CreateProgram(scene.program)).unwrap();
        assert!(program_created > layout_done);
    }

    #[test]
    fn test_upload_surfaces_shader_failure() {
        let mut gfx = RecordingBackend::new();
        let result = QuadScene::upload_with_sources(&mut gfx, INVALID_SOURCE, FRAGMENT_SHADER_SOURCE);

        assert!(result.is_err());
        assert_eq!(gfx.count(|c| matches!(c, Call::DrawIndexedTriangles(_))), 0);
    }
}

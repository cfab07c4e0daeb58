//! Shader compilation and program linking
//!
//! Compile failures and link failures are both fatal to startup: there is
//! nothing to draw without a program. Each failure carries the driver's
//! diagnostic, cut to [`MAX_INFO_LOG_BYTES`].

use crate::error::{BootstrapError, BootstrapResult};
use crate::render::backend::{GraphicsBackend, ProgramHandle, ShaderHandle, ShaderStage};
use std::fmt;

/// Vertex stage of the quad program
pub const VERTEX_SHADER_SOURCE: &str = include_str!("../../../../resources/shaders/quad.vert");

/// Fragment stage of the quad program
pub const FRAGMENT_SHADER_SOURCE: &str = include_str!("../../../../resources/shaders/quad.frag");

/// Size of the buffer a diagnostic log is read into, terminator included
///
/// At most `MAX_INFO_LOG_BYTES - 1` bytes of text are kept.
pub const MAX_INFO_LOG_BYTES: usize = 512;

/// Driver diagnostic for a shader or program, bounded in size
///
/// When the driver reports more text than fits, the kept prefix is shown
/// followed by a marker stating how much was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfoLog {
    text: String,
    total_bytes: usize,
}

impl InfoLog {
    /// Build from the bytes the driver wrote and the full length it reported
    ///
    /// `total_bytes` excludes the terminator. Trailing NULs and whitespace in
    /// `written` are dropped.
    pub fn new(written: &[u8], total_bytes: usize) -> Self {
        let kept = &written[..written.len().min(MAX_INFO_LOG_BYTES - 1)];
        let text = String::from_utf8_lossy(kept)
            .trim_end_matches(['\0', '\n', '\r', ' ', '\t'])
            .to_string();
        Self {
            total_bytes: total_bytes.max(kept.len()),
            text,
        }
    }

    /// Apply the size bound to a complete log
    pub fn from_full(full: &str) -> Self {
        Self::new(full.as_bytes(), full.len())
    }

    /// Kept text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the complete log reported by the driver
    pub const fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Whether part of the log was dropped
    pub const fn is_truncated(&self) -> bool {
        self.total_bytes > MAX_INFO_LOG_BYTES - 1
    }

    /// Whether the driver produced no diagnostic
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for InfoLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("<no diagnostic>");
        }
        f.write_str(&self.text)?;
        if self.is_truncated() {
            write!(
                f,
                "\n[log truncated: showing {} of {} bytes]",
                MAX_INFO_LOG_BYTES - 1,
                self.total_bytes
            )?;
        }
        Ok(())
    }
}

/// Compile one shader stage
///
/// On failure the stage object is released and the error carries its
/// compile log.
///
/// # Errors
///
/// [`BootstrapError::ShaderCompile`] when the driver rejects `source`.
pub fn compile_shader<G>(gfx: &mut G, source: &str, stage: ShaderStage) -> BootstrapResult<ShaderHandle>
where
    G: GraphicsBackend + ?Sized,
{
    let shader = gfx.create_shader(stage);
    gfx.shader_source(shader, source);
    gfx.compile_shader(shader);

    if !gfx.shader_compile_status(shader) {
        let log = gfx.shader_info_log(shader);
        gfx.delete_shader(shader);
        return Err(BootstrapError::ShaderCompile { stage, log });
    }

    log::debug!("Compiled {} shader {:?}", stage, shader);
    Ok(shader)
}

/// Link a vertex and a fragment stage into a program
///
/// Both stages are released once the link has been attempted; only the
/// program outlives this call. Link diagnostics come from the program's own
/// info log.
///
/// # Errors
///
/// [`BootstrapError::ProgramLink`] when the stages do not link.
pub fn link_program<G>(gfx: &mut G, vertex: ShaderHandle, fragment: ShaderHandle) -> BootstrapResult<ProgramHandle>
where
    G: GraphicsBackend + ?Sized,
{
    let program = gfx.create_program();
    gfx.attach_shader(program, vertex);
    gfx.attach_shader(program, fragment);
    gfx.link_program(program);

    let linked = gfx.program_link_status(program);
    let log = (!linked).then(|| gfx.program_info_log(program));

    gfx.delete_shader(vertex);
    gfx.delete_shader(fragment);

    if let Some(log) = log {
        gfx.delete_program(program);
        return Err(BootstrapError::ProgramLink { log });
    }

    log::debug!("Linked shader program {:?}", program);
    Ok(program)
}

/// Compile both stages and link them
///
/// The vertex stage is compiled first. If the fragment stage then fails, the
/// vertex stage is released before the error is returned.
///
/// # Errors
///
/// The first compile or link failure.
pub fn build_program<G>(gfx: &mut G, vertex_source: &str, fragment_source: &str) -> BootstrapResult<ProgramHandle>
where
    G: GraphicsBackend + ?Sized,
{
    let vertex = compile_shader(gfx, vertex_source, ShaderStage::Vertex)?;
    let fragment = match compile_shader(gfx, fragment_source, ShaderStage::Fragment) {
        Ok(fragment) => fragment,
        Err(err) => {
            gfx.delete_shader(vertex);
            return Err(err);
        }
    };

    link_program(gfx, vertex, fragment)
}

//! Test doubles for the window and graphics backends

use crate::config::ClearColor;
use crate::render::{
    BufferHandle, BufferTarget, GraphicsBackend, InfoLog, ProgramHandle, ShaderHandle, ShaderStage,
    VertexArrayHandle, VertexAttribute,
};
use crate::window::{WindowBackend, WindowEvent};
use std::collections::{HashMap, HashSet, VecDeque};

/// Source text the fake compiler rejects
pub(crate) const INVALID_SOURCE: &str = "this is not glsl";

const DEFAULT_COMPILE_LOG: &str = "0:1(1): error: syntax error, unexpected NEW_IDENTIFIER";

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(ShaderStage, ShaderHandle),
    ShaderSource(ShaderHandle, String),
    CompileShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    CreateProgram(ProgramHandle),
    AttachShader(ProgramHandle, ShaderHandle),
    LinkProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    CreateBuffer(BufferHandle),
    CreateVertexArray(VertexArrayHandle),
    BindVertexArray(VertexArrayHandle),
    BindBuffer(BufferTarget, BufferHandle),
    BufferData(BufferTarget, Vec<u8>),
    VertexAttribPointer(VertexAttribute),
    EnableVertexAttribArray(u32),
    Viewport(i32, i32, i32, i32),
    ClearColor(ClearColor),
    Clear,
    DrawIndexedTriangles(i32),
}

/// Graphics backend that records every call and models compile/link status
///
/// A stage compiles when its source starts with `#version` and the stage was
/// not marked invalid. Using a program that never linked queues
/// `GL_INVALID_OPERATION`, as a driver would.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    next_name: u32,
    stages: HashMap<ShaderHandle, ShaderStage>,
    sources: HashMap<ShaderHandle, String>,
    compiled: HashSet<ShaderHandle>,
    linked: HashSet<ProgramHandle>,
    errors: VecDeque<u32>,
    invalid_stage: Option<ShaderStage>,
    link_failure: Option<String>,
    compile_log: String,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            next_name: 1,
            stages: HashMap::new(),
            sources: HashMap::new(),
            compiled: HashSet::new(),
            linked: HashSet::new(),
            errors: VecDeque::new(),
            invalid_stage: None,
            link_failure: None,
            compile_log: DEFAULT_COMPILE_LOG.to_string(),
        }
    }

    /// Fail every compile of `stage`
    pub fn with_invalid_stage(mut self, stage: ShaderStage) -> Self {
        self.invalid_stage = Some(stage);
        self
    }

    /// Fail every link with `log`
    pub fn with_link_failure(mut self, log: &str) -> Self {
        self.link_failure = Some(log.to_string());
        self
    }

    /// Log reported for failed compiles
    pub fn with_compile_log(mut self, log: &str) -> Self {
        self.compile_log = log.to_string();
        self
    }

    pub fn push_error(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    /// First shader created for `stage`
    pub fn shader_for(&self, stage: ShaderStage) -> Option<ShaderHandle> {
        self.calls.iter().find_map(|call| match call {
            Call::CreateShader(s, handle) if *s == stage => Some(*handle),
            _ => None,
        })
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }

    fn name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_shader(&mut self, stage: ShaderStage) -> ShaderHandle {
        let shader = ShaderHandle(self.name());
        self.stages.insert(shader, stage);
        self.calls.push(Call::CreateShader(stage, shader));
        shader
    }

    fn shader_source(&mut self, shader: ShaderHandle, source: &str) {
        self.sources.insert(shader, source.to_string());
        self.calls.push(Call::ShaderSource(shader, source.to_string()));
    }

    fn compile_shader(&mut self, shader: ShaderHandle) {
        let valid_source = self
            .sources
            .get(&shader)
            .is_some_and(|s| s.starts_with("#version"));
        let stage_ok = self.stages.get(&shader).copied() != self.invalid_stage;
        if valid_source && stage_ok {
            self.compiled.insert(shader);
        }
        self.calls.push(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: ShaderHandle) -> bool {
        self.compiled.contains(&shader)
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> InfoLog {
        if self.compiled.contains(&shader) {
            InfoLog::default()
        } else {
            InfoLog::from_full(&self.compile_log)
        }
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.calls.push(Call::DeleteShader(shader));
    }

    fn create_program(&mut self) -> ProgramHandle {
        let program = ProgramHandle(self.name());
        self.calls.push(Call::CreateProgram(program));
        program
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        self.calls.push(Call::AttachShader(program, shader));
    }

    fn link_program(&mut self, program: ProgramHandle) {
        if self.link_failure.is_none() {
            self.linked.insert(program);
        }
        self.calls.push(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: ProgramHandle) -> bool {
        self.linked.contains(&program)
    }

    fn program_info_log(&self, program: ProgramHandle) -> InfoLog {
        match (&self.link_failure, self.linked.contains(&program)) {
            (Some(log), false) => InfoLog::from_full(log),
            _ => InfoLog::default(),
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.linked.remove(&program);
        self.calls.push(Call::DeleteProgram(program));
    }

    fn use_program(&mut self, program: ProgramHandle) {
        if !self.linked.contains(&program) {
            self.errors.push_back(gl::INVALID_OPERATION);
        }
        self.calls.push(Call::UseProgram(program));
    }

    fn create_buffer(&mut self) -> BufferHandle {
        let buffer = BufferHandle(self.name());
        self.calls.push(Call::CreateBuffer(buffer));
        buffer
    }

    fn create_vertex_array(&mut self) -> VertexArrayHandle {
        let vertex_array = VertexArrayHandle(self.name());
        self.calls.push(Call::CreateVertexArray(vertex_array));
        vertex_array
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.calls.push(Call::BindVertexArray(vertex_array));
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: BufferHandle) {
        self.calls.push(Call::BindBuffer(target, buffer));
    }

    fn buffer_static_data(&mut self, target: BufferTarget, data: &[u8]) {
        self.calls.push(Call::BufferData(target, data.to_vec()));
    }

    fn vertex_attrib_pointer(&mut self, attribute: &VertexAttribute) {
        self.calls.push(Call::VertexAttribPointer(*attribute));
    }

    fn enable_vertex_attrib_array(&mut self, location: u32) {
        self.calls.push(Call::EnableVertexAttribArray(location));
    }

    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&mut self, color: ClearColor) {
        self.calls.push(Call::ClearColor(color));
    }

    fn clear_color_buffer(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn draw_indexed_triangles(&mut self, index_count: i32) {
        self.calls.push(Call::DrawIndexedTriangles(index_count));
    }

    fn next_error(&mut self) -> Option<u32> {
        self.errors.pop_front()
    }
}

/// Window that replays one batch of events per poll
///
/// Once the script runs out the next poll raises the close flag, like a user
/// clicking the close button.
#[derive(Debug)]
pub(crate) struct ScriptedWindow {
    script: VecDeque<Vec<WindowEvent>>,
    should_close: bool,
    swaps: usize,
    framebuffer: (i32, i32),
}

impl ScriptedWindow {
    pub fn new(script: Vec<Vec<WindowEvent>>) -> Self {
        Self {
            script: script.into(),
            should_close: false,
            swaps: 0,
            framebuffer: (1920, 1080),
        }
    }

    /// Report `width` x `height` as the framebuffer size
    pub fn with_framebuffer(mut self, width: i32, height: i32) -> Self {
        self.framebuffer = (width, height);
        self
    }

    pub const fn swaps(&self) -> usize {
        self.swaps
    }

    /// Batches never polled
    pub fn pending_frames(&self) -> usize {
        self.script.len()
    }
}

impl WindowBackend for ScriptedWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        let Some(events) = self.script.pop_front() else {
            self.should_close = true;
            return Vec::new();
        };
        for event in &events {
            if let WindowEvent::FramebufferResized { width, height } = *event {
                self.framebuffer = (width, height);
            }
        }
        events
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.framebuffer
    }
}

//! Application state and lifecycle

use crate::config::{AppConfig, ClearColor};
use crate::error::BootstrapResult;
use crate::render::{frame, GraphicsBackend, QuadScene};
use crate::window::WindowBackend;

/// Everything the render loop and teardown need
///
/// Built once at startup from an open window and a loaded graphics backend.
/// Owns both, so dropping the context releases the window and GLFW.
pub struct RenderContext<W: WindowBackend, G: GraphicsBackend> {
    window: W,
    graphics: G,
    scene: QuadScene,
    clear_color: ClearColor,
}

impl<W: WindowBackend, G: GraphicsBackend> RenderContext<W, G> {
    /// Upload the quad, build its program and fit the viewport to the window
    ///
    /// On failure `window` and `graphics` are dropped before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Shader compile or link failures from [`QuadScene::upload`].
    pub fn new(window: W, mut graphics: G, config: &AppConfig) -> BootstrapResult<Self> {
        let scene = QuadScene::upload(&mut graphics)?;

        let (width, height) = window.framebuffer_size();
        graphics.viewport(0, 0, width, height);

        Ok(Self {
            window,
            graphics,
            scene,
            clear_color: config.clear_color,
        })
    }

    /// Render until the window closes, returning the number of frames drawn
    pub fn run(&mut self) -> u64 {
        frame::run(&mut self.window, &mut self.graphics, &self.scene, self.clear_color)
    }

    /// Release the window and windowing system
    ///
    /// GPU objects are not deleted one by one; they go away with the context.
    pub fn shutdown(self) {
        log::info!("Shutting down");
        drop(self);
    }

    /// The window
    pub const fn window(&self) -> &W {
        &self.window
    }

    /// The graphics backend
    pub const fn graphics(&self) -> &G {
        &self.graphics
    }

    /// GPU objects of the quad
    pub const fn scene(&self) -> &QuadScene {
        &self.scene
    }
}

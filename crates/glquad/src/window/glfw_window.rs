//! Window and OpenGL context management using GLFW

use crate::config::AppConfig;
use crate::error::{BootstrapError, BootstrapResult};
use crate::render::OpenGlBackend;
use crate::window::backend::{Key, KeyAction, WindowBackend, WindowEvent};
use glfw::Context;

/// GLFW window owning the process' only OpenGL context
///
/// Dropping it destroys the window and, with the last `Glfw` handle, shuts
/// GLFW down.
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Open the window, make its context current and load OpenGL
    ///
    /// Any failure releases what was created so far before returning.
    ///
    /// # Errors
    ///
    /// [`BootstrapError::WindowCreation`] if GLFW or the window cannot be
    /// brought up, [`BootstrapError::ContextLoad`] if GL entry points are
    /// missing or the driver hands back an older context than requested.
    pub fn initialize(config: &AppConfig) -> BootstrapResult<(Self, OpenGlBackend)> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| BootstrapError::WindowCreation(format!("GLFW initialization failed: {e:?}")))?;

        let context = &config.context;
        glfw.window_hint(glfw::WindowHint::ContextVersion(context.major, context.minor));
        if context.core_profile {
            glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        }
        if context.forward_compat {
            glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        }
        glfw.window_hint(glfw::WindowHint::Resizable(config.window.resizable));

        let (mut window, events) = glfw
            .create_window(
                config.window.width,
                config.window.height,
                &config.window.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or_else(|| {
                BootstrapError::WindowCreation(format!(
                    "no {}x{} window with an OpenGL {}.{} context",
                    config.window.width, config.window.height, context.major, context.minor
                ))
            })?;

        window.make_current();

        let gl = OpenGlBackend::load(|symbol| window.get_proc_address(symbol) as *const _)?;
        if !gl.version().satisfies(context.major, context.minor) {
            return Err(BootstrapError::ContextLoad(format!(
                "driver provided OpenGL {}, {}.{} was requested",
                gl.version(),
                context.major,
                context.minor
            )));
        }

        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);

        log::info!(
            "Created {}x{} window \"{}\"",
            config.window.width,
            config.window.height,
            config.window.title
        );

        Ok((
            Self {
                glfw,
                window,
                events,
            },
            gl,
        ))
    }
}

/// Map a GLFW event onto the events the render loop handles
fn translate_event(event: glfw::WindowEvent) -> Option<WindowEvent> {
    match event {
        glfw::WindowEvent::Key(key, _, action, _) => Some(WindowEvent::Key {
            key: match key {
                glfw::Key::Escape => Key::Escape,
                _ => Key::Other,
            },
            action: match action {
                glfw::Action::Press => KeyAction::Press,
                glfw::Action::Release => KeyAction::Release,
                glfw::Action::Repeat => KeyAction::Repeat,
            },
        }),
        glfw::WindowEvent::FramebufferSize(width, height) => {
            Some(WindowEvent::FramebufferResized { width, height })
        }
        _ => None,
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(event))
            .collect()
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }
}

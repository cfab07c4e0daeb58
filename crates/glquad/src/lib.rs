//! # glquad
//!
//! Minimal OpenGL 4.6 bootstrap: opens a GLFW window, compiles a vertex and a
//! fragment shader, uploads one indexed quad and draws it every frame until the
//! window is asked to close.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glquad::prelude::*;
//!
//! fn main() -> Result<(), BootstrapError> {
//!     glquad::logging::init();
//!     let frames = glquad::run(&AppConfig::default())?;
//!     println!("presented {frames} frames");
//!     Ok(())
//! }
//! ```
//!
//! ## Structure
//!
//! - [`window`]: GLFW window and context creation, event translation
//! - [`render`]: graphics backend seam, shader compile/link, quad geometry,
//!   per-frame drawing
//! - [`app`]: [`RenderContext`], the state threaded through the render loop
//! - [`config`]: compiled-in defaults with optional TOML/RON files

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use app::RenderContext;
pub use config::{
    AppConfig, ClearColor, Config, ConfigError, ConfigFormat, ContextConfig, WindowConfig,
};
pub use error::{BootstrapError, BootstrapResult};

use crate::window::GlfwWindow;

/// Common imports for users of the crate
pub mod prelude {
    pub use crate::{
        app::RenderContext,
        config::{AppConfig, ClearColor, Config, ConfigError},
        error::{BootstrapError, BootstrapResult},
        render::{GraphicsBackend, QuadScene, ShaderStage},
        window::{WindowBackend, WindowEvent},
    };
}

/// Open the window, build the quad and render until the window closes
///
/// Returns the number of frames presented. Every resource is released before
/// this function returns, including on the error path.
///
/// # Errors
///
/// [`BootstrapError::InvalidConfig`] before anything is created if `config`
/// fails [`Config::validate`], otherwise whichever window, context, shader or
/// link failure stopped startup.
pub fn run(config: &AppConfig) -> BootstrapResult<u64> {
    config.validate()?;

    let (window, graphics) = GlfwWindow::initialize(config)?;
    let mut context = RenderContext::new(window, graphics, config)?;

    log::info!("Starting render loop...");
    let frames = context.run();
    context.shutdown();

    Ok(frames)
}

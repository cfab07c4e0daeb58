//! Window management
//!
//! - **`backend`**: the [`WindowBackend`] trait and the events it yields
//! - **`glfw_window`**: the GLFW implementation, which also creates the
//!   OpenGL context

pub mod backend;
pub mod glfw_window;

pub use backend::{Key, KeyAction, WindowBackend, WindowEvent};
pub use glfw_window::GlfwWindow;

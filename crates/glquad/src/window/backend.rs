//! Window backend contract
//!
//! The render loop only needs a close flag, an event pump and buffer
//! presentation. Keeping those behind [`WindowBackend`] lets the loop run
//! against a scripted window in tests.

/// Keys the program reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape
    Escape,
    /// Any key without a binding
    Other,
}

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Key went down
    Press,
    /// Key came up
    Release,
    /// Key held long enough to auto-repeat
    Repeat,
}

/// Window event relevant to rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Keyboard input
    Key {
        /// Which key
        key: Key,
        /// What happened to it
        action: KeyAction,
    },
    /// The framebuffer changed size, in pixels
    FramebufferResized {
        /// New width
        width: i32,
        /// New height
        height: i32,
    },
}

/// Window operations the render loop depends on
pub trait WindowBackend {
    /// Whether the window has been asked to close
    fn should_close(&self) -> bool;

    /// Raise or clear the close flag
    ///
    /// Raising the flag does not tear anything down; the render loop notices
    /// it on its next check.
    fn set_should_close(&mut self, should_close: bool);

    /// Process pending window system events and return the ones of interest
    fn poll_events(&mut self) -> Vec<WindowEvent>;

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (i32, i32);
}

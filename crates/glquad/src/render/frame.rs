//! Render loop
//!
//! Each iteration: pump events, clear, bind, draw, present. The loop checks
//! the close flag only at the top, so the iteration that observes a close
//! request still finishes its frame and nothing is drawn after it.

use crate::config::ClearColor;
use crate::render::backend::{error_name, BufferTarget, GraphicsBackend};
use crate::render::geometry::QuadScene;
use crate::window::{Key, KeyAction, WindowBackend, WindowEvent};

/// Upper bound on GL errors drained after a single frame
const MAX_ERRORS_PER_FRAME: usize = 16;

/// React to one window event
///
/// Releasing Escape raises the close flag. A framebuffer resize maps the
/// viewport onto the whole new framebuffer. Everything else is ignored.
pub fn handle_event<W, G>(window: &mut W, gfx: &mut G, event: WindowEvent)
where
    W: WindowBackend + ?Sized,
    G: GraphicsBackend + ?Sized,
{
    match event {
        WindowEvent::Key {
            key: Key::Escape,
            action: KeyAction::Release,
        } => {
            log::info!("Escape released, closing window");
            window.set_should_close(true);
        }
        WindowEvent::FramebufferResized { width, height } => {
            log::debug!("Framebuffer resized to {}x{}", width, height);
            gfx.viewport(0, 0, width, height);
        }
        WindowEvent::Key { .. } => {}
    }
}

/// Clear the framebuffer and draw the quad once
pub fn draw_frame<G>(gfx: &mut G, scene: &QuadScene, clear_color: ClearColor)
where
    G: GraphicsBackend + ?Sized,
{
    gfx.clear_color(clear_color);
    gfx.clear_color_buffer();

    gfx.use_program(scene.program);
    gfx.bind_buffer(BufferTarget::Index, scene.index_buffer);
    gfx.draw_indexed_triangles(scene.index_count);
}

/// Log and discard pending GL errors, returning how many were seen
pub fn drain_errors<G>(gfx: &mut G) -> usize
where
    G: GraphicsBackend + ?Sized,
{
    let mut seen = 0;
    while seen < MAX_ERRORS_PER_FRAME {
        let Some(code) = gfx.next_error() else { break };
        log::warn!("OpenGL error 0x{:04X} ({})", code, error_name(code));
        seen += 1;
    }
    seen
}

/// Render until the window's close flag is set
///
/// Returns the number of frames presented.
pub fn run<W, G>(window: &mut W, gfx: &mut G, scene: &QuadScene, clear_color: ClearColor) -> u64
where
    W: WindowBackend + ?Sized,
    G: GraphicsBackend + ?Sized,
{
    let mut frames = 0_u64;

    while !window.should_close() {
        for event in window.poll_events() {
            handle_event(window, gfx, event);
        }

        draw_frame(gfx, scene, clear_color);
        drain_errors(gfx);

        window.swap_buffers();
        frames += 1;
    }

    frames
}

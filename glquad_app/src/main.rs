//! Opens a 1920x1080 window and draws a colored quad until Escape is released
//! or the window is closed.

use glquad::AppConfig;

fn main() {
    glquad::logging::init();

    match glquad::run(&AppConfig::default()) {
        Ok(frames) => log::info!("Presented {} frames", frames),
        Err(e) => {
            // Window and GLFW are already released by the time the error gets here.
            log::error!("Fatal: {}", e);
            println!("{e}");
            std::process::abort();
        }
    }
}

//! Logging setup

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Logs at `info` unless `RUST_LOG` says otherwise. If a logger is already
/// installed it stays in place and the refusal is logged through it.
pub fn init() {
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        debug!("Keeping existing logger: {}", e);
    }
}

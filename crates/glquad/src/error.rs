//! Fatal error taxonomy for startup
//!
//! None of these are retried. The library hands them back as `Result`s; the
//! binary turns every one into a diagnostic on stdout followed by an abort.

use crate::config::ConfigError;
use crate::render::{InfoLog, ShaderStage};
use thiserror::Error;

/// Errors raised while bringing up the window, context and GPU program
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// GLFW could not be initialized or the window could not be created
    #[error("Failed to create window using GLFW: {0}")]
    WindowCreation(String),

    /// The GL context is unusable or its function pointers failed to load
    #[error("Failed to get OpenGL context: {0}")]
    ContextLoad(String),

    /// A shader stage failed to compile
    #[error("Failed to compile {stage} shader | GL_ERROR:\n{log}")]
    ShaderCompile {
        /// Stage that failed
        stage: ShaderStage,
        /// Bounded driver diagnostic
        log: InfoLog,
    },

    /// The compiled stages failed to link into a program
    #[error("Failed to link shader program | GL_ERROR:\n{log}")]
    ProgramLink {
        /// Bounded driver diagnostic
        log: InfoLog,
    },

    /// The configuration was rejected before any window was opened
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result alias used across the crate
pub type BootstrapResult<T> = Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_error_names_stage_and_log() {
        let err = BootstrapError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: InfoLog::from_full("0:3(1): error: syntax error"),
        };
        let text = err.to_string();
        assert!(text.starts_with("Failed to compile fragment shader | GL_ERROR:\n"));
        assert!(text.ends_with("0:3(1): error: syntax error"));
    }

    #[test]
    fn test_link_error_carries_log() {
        let err = BootstrapError::ProgramLink {
            log: InfoLog::from_full("error: vertexColor not written"),
        };
        assert_eq!(
            err.to_string(),
            "Failed to link shader program | GL_ERROR:\nerror: vertexColor not written"
        );
    }

    #[test]
    fn test_config_rejection_converts_into_bootstrap_error() {
        let err: BootstrapError =
            ConfigError::Invalid("Window size must be non-zero, got 0x1080".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Window size must be non-zero, got 0x1080"
        );
    }
}

//! Configuration system
//!
//! Everything the program needs is compiled in through [`AppConfig::default`].
//! Embedders can keep the same structure in `.toml` or `.ron` files; both the
//! compiled-in and the file route pass through [`Config::validate`], which is
//! also what [`crate::run`] checks before opening a window.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// On-disk encodings a configuration can use, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format implied by the extension of `path`
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnsupportedFormat`] for any extension other than `toml`
    /// or `ron`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, ConfigError> {
        let parsed = match self {
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Self::Ron => ron::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Parse {
            format: self,
            message,
        })
    }

    fn render<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        let rendered = match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::new())
                .map_err(|e| e.to_string()),
        };
        rendered.map_err(ConfigError::Serialize)
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Ron => "RON",
        })
    }
}

/// A typed configuration that can be checked and stored on disk
///
/// Every configuration that enters the program goes through [`Config::validate`],
/// whether it was built in code or read from a file, so a file can never
/// smuggle in values the compiled-in path would reject.
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Reject values the window or context cannot be created from
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the offending field.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Read, decode and validate a configuration file
    ///
    /// # Errors
    ///
    /// Unsupported extension, unreadable file, malformed contents or a
    /// configuration that fails [`Config::validate`].
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        let config: Self = format.parse(&contents)?;
        config.validate()?;

        log::debug!("Loaded {} configuration from {}", format, path.display());
        Ok(config)
    }

    /// Validate and write the configuration in the format its extension names
    ///
    /// # Errors
    ///
    /// Same failures as [`Config::load_from_file`], plus encoder errors. Nothing
    /// is written when validation fails.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        self.validate()?;

        std::fs::write(path, format.render(self)?)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents do not decode into a configuration
    #[error("{format} parse error: {message}")]
    Parse {
        /// Format the file was decoded as
        format: ConfigFormat,
        /// Decoder message
        message: String,
    },

    /// The configuration could not be encoded
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// The path has no `.toml` or `.ron` extension
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of range
    #[error("{0}")]
    Invalid(String),
}

/// Window title used when nothing else is configured
pub const DEFAULT_TITLE: &str = "GLFW -> gl (OpenGL in Rust)";

/// Initial framebuffer width in screen coordinates
pub const INITIAL_WIDTH: u32 = 1920;

/// Initial framebuffer height in screen coordinates
pub const INITIAL_HEIGHT: u32 = 1080;

/// Window creation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width
    pub width: u32,
    /// Initial height
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: INITIAL_WIDTH,
            height: INITIAL_HEIGHT,
            resizable: true,
        }
    }
}

/// Requested OpenGL context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Minimum major version
    pub major: u32,
    /// Minimum minor version
    pub minor: u32,
    /// Request a core profile
    pub core_profile: bool,
    /// Request a forward-compatible context (required on macOS)
    pub forward_compat: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            major: 4,
            minor: 6,
            core_profile: true,
            forward_compat: cfg!(target_os = "macos"),
        }
    }
}

/// RGBA color the framebuffer is cleared to each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClearColor {
    /// Red
    pub r: f32,
    /// Green
    pub g: f32,
    /// Blue
    pub b: f32,
    /// Alpha
    pub a: f32,
}

impl ClearColor {
    /// Opaque black
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a clear color from its components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Components in `[r, g, b, a]` order
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window parameters
    pub window: WindowConfig,
    /// Context parameters
    pub context: ContextConfig,
    /// Per-frame clear color
    pub clear_color: ClearColor,
}

impl Config for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.window.title.is_empty() {
            return Err(ConfigError::Invalid(
                "Window title cannot be empty".to_string(),
            ));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }

        // Core profiles start at 3.2.
        if self.context.core_profile && (self.context.major, self.context.minor) < (3, 2) {
            return Err(ConfigError::Invalid(format!(
                "Core profile requires OpenGL 3.2 or newer, got {}.{}",
                self.context.major, self.context.minor
            )));
        }

        if !self
            .clear_color
            .to_array()
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
        {
            return Err(ConfigError::Invalid(format!(
                "Clear color components must lie in [0, 1], got {:?}",
                self.clear_color
            )));
        }

        Ok(())
    }
}

//! TOML Configuration File Support
//!
//! Picks the animation, its size and its cadence from a TOML file at
//! `~/.config/termanim/config.toml`, from `TERMANIM_*` environment variables
//! and from command-line overrides.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments ([`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [animation]
//! kind = "char-waves"
//! width = 12
//! height = 4
//! character = "*"
//! cadence_ms = 80
//! message = "Building"
//! ```
//!
//! For `scrolling-text`, `message` is the text that scrolls, and `repeat`
//! restarts the scroll instead of settling on blank frames.
//!
//! Validation is eager: [`AnimationConfig::validate`] builds the frame source
//! and supervisor once, so bad values fail before any work starts.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ConfigurationError;
use crate::source::{
    AnimationKind, Arrow, CharWave, FrameSource, ScrollingText, Spinner, Stacked,
    DEFAULT_STACK_HEIGHT,
};
use crate::supervisor::{Supervisor, DEFAULT_CADENCE};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(#[from] ConfigurationError),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Animation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationToml {
    /// Animation name, e.g. `"spinner"` or `"char-waves"`
    pub kind: Option<AnimationKind>,

    /// Frame width in columns
    pub width: Option<usize>,

    /// Line count for stacked animations
    pub height: Option<usize>,

    /// Glyph for char waves
    pub character: Option<String>,

    /// Delay between frames in milliseconds
    pub cadence_ms: Option<u64>,

    /// Message shown after each frame (the scrolled text for scrolling-text)
    pub message: Option<String>,

    /// Restart scrolling text when it has scrolled through
    pub repeat: Option<bool>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermanimToml {
    /// Animation configuration section
    pub animation: AnimationToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved animation configuration
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    /// Which animation to draw
    pub kind: AnimationKind,

    /// Frame width; the animation's default when unset
    pub width: Option<usize>,

    /// Line count for stacked animations
    pub height: Option<usize>,

    /// Glyph for char waves
    pub character: Option<String>,

    /// Delay between frames
    pub cadence: Duration,

    /// Message shown after each frame, or the scrolled text
    pub message: Option<String>,

    /// Restart scrolling text when it has scrolled through
    pub repeat: bool,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            kind: AnimationKind::default(),
            width: None,
            height: None,
            character: None,
            cadence: DEFAULT_CADENCE,
            message: None,
            repeat: false,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl AnimationConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Width that will actually be used
    #[must_use]
    pub fn effective_width(&self) -> usize {
        self.width.unwrap_or_else(|| self.kind.default_width())
    }

    /// Message shown next to the frames. Scrolling text consumes the message
    /// itself, so it has none.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self.kind {
            AnimationKind::ScrollingText => None,
            _ => self.message.as_deref(),
        }
    }

    /// Build the configured frame source
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter.
    pub fn build_source(&self) -> Result<Box<dyn FrameSource>, ConfigurationError> {
        let width = self.effective_width();
        let height = self.height.unwrap_or(DEFAULT_STACK_HEIGHT);
        let glyph = self.character.as_deref().unwrap_or("#");

        let source: Box<dyn FrameSource> = match self.kind {
            AnimationKind::Arrow => Box::new(Arrow::new(width)?),
            AnimationKind::Spinner => Box::new(Spinner::new(width)?),
            AnimationKind::CharWave => Box::new(CharWave::new(glyph, width)?),
            AnimationKind::CharWaves => Box::new(Stacked::char_waves(glyph, width, height)?),
            AnimationKind::SpinnerMultiline => Box::new(Stacked::spinners(width, height)?),
            AnimationKind::ArrowMultiline => Box::new(Stacked::arrows(width, height)?),
            AnimationKind::ScrollingText => {
                let text = ScrollingText::new(self.message.as_deref().unwrap_or_default(), width)?;
                if self.repeat {
                    Box::new(text.repeating())
                } else {
                    Box::new(text)
                }
            }
        };
        Ok(source)
    }

    /// Build a supervisor with the configured cadence and message
    ///
    /// # Errors
    ///
    /// Returns an error if the cadence is zero.
    pub fn supervisor(&self) -> Result<Supervisor, ConfigurationError> {
        let supervisor = Supervisor::new(self.cadence)?;
        Ok(match self.label() {
            Some(message) => supervisor.with_message(message),
            None => supervisor,
        })
    }

    /// Check every value by building everything once
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.build_source()?;
        self.supervisor()?;
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/termanim/config.toml` or
/// `~/.config/termanim/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("termanim").join("config.toml"))
}

/// Load configuration from the default file and the environment
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<AnimationConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the environment
///
/// CLI overrides are not handled here; apply [`ConfigOverrides`] afterwards
/// and call [`AnimationConfig::validate`].
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<AnimationConfig, ConfigError> {
    let mut config = AnimationConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: TermanimToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, |name| std::env::var(name).ok());

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut AnimationConfig, toml: &TermanimToml) {
    let animation = &toml.animation;
    if let Some(kind) = animation.kind {
        config.kind = kind;
    }
    if animation.width.is_some() {
        config.width = animation.width;
    }
    if animation.height.is_some() {
        config.height = animation.height;
    }
    if animation.character.is_some() {
        config.character = animation.character.clone();
    }
    if let Some(ms) = animation.cadence_ms {
        config.cadence = Duration::from_millis(ms);
    }
    if animation.message.is_some() {
        config.message = animation.message.clone();
    }
    if let Some(repeat) = animation.repeat {
        config.repeat = repeat;
    }
}

/// Apply environment variable overrides to the config
///
/// Unparseable values are logged and skipped.
fn apply_env_config(config: &mut AnimationConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(name) = var("TERMANIM_ANIMATION") {
        match name.parse::<AnimationKind>() {
            Ok(kind) => {
                config.kind = kind;
                config.source = ConfigSource::Env;
            }
            Err(e) => tracing::warn!(error = %e, "Ignoring TERMANIM_ANIMATION"),
        }
    }
    if let Some(width) = parse_env(&var, "TERMANIM_WIDTH") {
        config.width = Some(width);
        config.source = ConfigSource::Env;
    }
    if let Some(height) = parse_env(&var, "TERMANIM_HEIGHT") {
        config.height = Some(height);
        config.source = ConfigSource::Env;
    }
    if let Some(glyph) = var("TERMANIM_CHAR") {
        config.character = Some(glyph);
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_env::<u64>(&var, "TERMANIM_CADENCE_MS") {
        config.cadence = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(message) = var("TERMANIM_MESSAGE") {
        config.message = Some(message);
        config.source = ConfigSource::Env;
    }
}

fn parse_env<T: std::str::FromStr>(var: impl Fn(&str) -> Option<String>, name: &str) -> Option<T> {
    let value = var(name)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(var = name, value = %value, "Ignoring unparseable environment value");
            None
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Configuration overrides from CLI arguments
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Animation override
    pub kind: Option<AnimationKind>,

    /// Width override
    pub width: Option<usize>,

    /// Height override
    pub height: Option<usize>,

    /// Glyph override
    pub character: Option<String>,

    /// Cadence override in milliseconds
    pub cadence_ms: Option<u64>,

    /// Message override
    pub message: Option<String>,

    /// Repeat override
    pub repeat: Option<bool>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set animation override
    #[must_use]
    pub fn with_kind(mut self, kind: AnimationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set width override
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Set height override
    #[must_use]
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    /// Set glyph override
    #[must_use]
    pub fn with_character(mut self, character: String) -> Self {
        self.character = Some(character);
        self
    }

    /// Set cadence override
    #[must_use]
    pub fn with_cadence_ms(mut self, ms: u64) -> Self {
        self.cadence_ms = Some(ms);
        self
    }

    /// Set message override
    #[must_use]
    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    /// Set repeat override
    #[must_use]
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = Some(repeat);
        self
    }

    fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.character.is_none()
            && self.cadence_ms.is_none()
            && self.message.is_none()
            && self.repeat.is_none()
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut AnimationConfig) {
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }
        if let Some(kind) = self.kind {
            config.kind = kind;
        }
        if self.width.is_some() {
            config.width = self.width;
        }
        if self.height.is_some() {
            config.height = self.height;
        }
        if let Some(ref character) = self.character {
            config.character = Some(character.clone());
        }
        if let Some(ms) = self.cadence_ms {
            config.cadence = Duration::from_millis(ms);
        }
        if let Some(ref message) = self.message {
            config.message = Some(message.clone());
        }
        if let Some(repeat) = self.repeat {
            config.repeat = repeat;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Termanim Core - Terminal Progress Animations for Long-Running Work
//!
//! This crate draws a small looping animation in the terminal while a piece
//! of work runs, and erases it without a trace when the work finishes,
//! fails, or panics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Binding:   Annotate ──▶ Animate ──▶ work() / task()          │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ WorkUnit::Direct / Cooperative
//! ┌───────────────────────────┴──────────────────────────────────┐
//! │  Supervisor                                                   │
//! │   ├─ thread-backed: work on caller, RenderLoop on a thread    │
//! │   └─ cooperative:   work and RenderLoop joined on one task    │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │ one frame per cadence
//! ┌───────────────────────────┴──────────────────────────────────┐
//! │  FrameSource (arrow, spinner, waves, scrolling text)          │
//! │  erase: frame + rewind on every tick, erase frame at the end  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`FrameSource`]: A restartable, constant-shape frame sequence
//! - [`Supervisor`]: Runs work under an animation and cleans up after it
//! - [`Animate`] / [`Annotate`]: Wrappers that bind animations and messages
//!   to work
//! - [`AnimationConfig`]: Animation choice resolved from file, env and CLI
//!
//! # Quick Start
//!
//! ```ignore
//! use termanim_core::{work, Animate, Work};
//!
//! let mut build = Animate::new()
//!     .with_message("Compiling")
//!     .wrap(work(|| compile_everything()))?;
//! let artifacts = build.call()?;
//! ```
//!
//! # Module Overview
//!
//! - [`binding`]: Animate/Annotate wrappers and the work traits
//! - [`config`]: TOML, environment and CLI configuration
//! - [`erase`]: Rewind and erase-frame sequences
//! - [`error`]: Configuration, composition and render errors
//! - [`frame`]: Frames and their shapes
//! - [`render`]: The render loop
//! - [`signal`]: Stop signal for thread-backed loops
//! - [`source`]: The built-in animations
//! - [`supervisor`]: Strategies for running work under an animation

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binding;
pub mod config;
pub mod erase;
pub mod error;
pub mod frame;
pub mod render;
pub mod signal;
pub mod source;
pub mod supervisor;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-exports for convenience
pub use binding::{task, work, Animate, Animated, Annotate, Annotated, AsyncWork, Binding, Work};
pub use config::{
    default_config_path, load_config, load_config_from_path, AnimationConfig, ConfigError,
    ConfigOverrides, ConfigSource,
};
pub use erase::{draw_frame, erase_frame, rewind};
pub use error::{AnimateError, CompositionError, ConfigurationError};
pub use frame::{Frame, Shape};
pub use render::{LoopState, RenderLoop, RenderStats};
pub use signal::StopSignal;
pub use source::{
    AnimationKind, Arrow, CharWave, FrameSource, ScrollingText, Spinner, Stacked,
};
pub use supervisor::{Supervisor, WorkUnit, DEFAULT_CADENCE};

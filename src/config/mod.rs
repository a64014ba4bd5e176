//! Configuration: TOML settings and platform paths.
//!
//! Provides [`AppConfig`] (top-level settings with a playback and an
//! extraction section), [`AppPaths`] for cross-platform directories, and
//! persistence via [`AppConfig::load`] / [`AppConfig::save`].

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, PlaybackConfig};

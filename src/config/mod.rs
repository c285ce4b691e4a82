//! Configuration management for waveview.
//!
//! Configuration is a single TOML file in the user's config directory
//! (`~/.config/waveview/waveview.toml`). It is optional: a missing file means
//! the built-in defaults.

pub mod file;

pub use file::{get_config_path, WaveViewConfig};

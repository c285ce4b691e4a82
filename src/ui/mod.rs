//! Terminal user interface hosting the wave animation.

pub mod tui;

pub use tui::{StatusLine, WaveCommand, WaveTui};

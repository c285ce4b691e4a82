//! Application command handlers for waveview.
//!
//! # Commands
//! - `demo`: animated wave in the terminal, fed by a synthetic signal or stdin
//! - `render`: print the geometry of one frame
//! - `config`: open the configuration file in the user's editor
//! - `logs`: display recent log entries

pub mod config;
pub mod demo;
pub mod logs;
pub mod render;

pub use config::handle_config;
pub use demo::{handle_demo, DemoOptions};
pub use logs::handle_logs;
pub use render::{handle_render, RenderOptions};

//! Animated sine-wave visualization.
//!
//! [`wave::WaveAnimator`] turns a stream of amplitude samples into a moving
//! sine wave. Hosts feed it samples, drive it with ticks from
//! [`WaveAnimator::start`](wave::WaveAnimator::start) and paint each frame
//! through the [`surface::Surface`] trait. The `waveview` binary hosts it in a
//! terminal.

pub mod app;
pub mod commands;
pub mod config;
pub mod feed;
pub mod logging;
pub mod surface;
pub mod ui;
pub mod wave;

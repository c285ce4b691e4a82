//! Animated sine-wave component.
//!
//! The wave is sampled from a bounded buffer of recent amplitudes, shifted in
//! phase on every tick and rebuilt as a fresh pair of polylines per frame.

pub mod animator;
pub mod buffer;
pub mod palette;
pub mod path;
pub mod state;
pub mod ticker;

pub use animator::{CapacityPolicy, WaveAnimator, WaveSettings};
pub use buffer::SampleBuffer;
pub use palette::{Palette, Rgb, Stroke};
pub use path::{Point, WaveFrame, WavePath};

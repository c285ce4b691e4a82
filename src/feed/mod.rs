//! Sample sources that stream amplitudes into a [`WaveAnimator`].
//!
//! Sources never touch the animator themselves. The UI loop drains them with
//! [`Feed::drain_into`] so every mutation stays on the host thread.

pub mod stdin;
pub mod synthetic;

pub use stdin::spawn_stdin_feed;
pub use synthetic::SyntheticSignal;

use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::wave::WaveAnimator;

/// Default spacing between generated samples.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(50);

/// Where amplitude samples come from.
#[derive(Debug)]
pub enum Feed {
    /// Generated locally at a fixed interval, scaled by the animator's amplitude.
    Synthetic {
        signal: SyntheticSignal,
        interval: Duration,
        last_sample: Option<Instant>,
    },
    /// Streamed from a reader task.
    Channel {
        rx: mpsc::Receiver<i32>,
        closed: bool,
    },
}

impl Feed {
    pub fn synthetic(interval: Duration) -> Self {
        Feed::Synthetic {
            signal: SyntheticSignal::new(),
            interval,
            last_sample: None,
        }
    }

    pub fn channel(rx: mpsc::Receiver<i32>) -> Self {
        Feed::Channel { rx, closed: false }
    }

    /// Pushes every sample that is due into `animator` and returns how many
    /// were added.
    pub fn drain_into(&mut self, animator: &mut WaveAnimator) -> usize {
        match self {
            Feed::Synthetic {
                signal,
                interval,
                last_sample,
            } => {
                let due = last_sample.is_none_or(|last| last.elapsed() >= *interval);
                if !due {
                    return 0;
                }
                animator.add_sample(signal.next_sample(animator.amplitude()));
                *last_sample = Some(Instant::now());
                1
            }
            Feed::Channel { rx, closed } => {
                let mut added = 0;
                loop {
                    match rx.try_recv() {
                        Ok(sample) => {
                            animator.add_sample(sample);
                            added += 1;
                        }
                        Err(TryRecvError::Empty) => break,
                        Err(TryRecvError::Disconnected) => {
                            if !*closed {
                                tracing::debug!("Sample feed finished");
                                *closed = true;
                            }
                            break;
                        }
                    }
                }
                added
            }
        }
    }

    /// Whether the source can still produce samples.
    pub fn is_open(&self) -> bool {
        match self {
            Feed::Synthetic { .. } => true,
            Feed::Channel { closed, .. } => !closed,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Feed::Synthetic { .. } => "synthetic",
            Feed::Channel { .. } => "stdin",
        }
    }
}

//! The animated wave component.
//!
//! `WaveAnimator` owns the sample buffer and the motion state. Hosts feed it
//! samples, drive it with ticks and ask it for a fresh frame whenever they
//! paint. Every mutation raises a redraw request; requests raised before the
//! host gets around to painting collapse into one.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::buffer::{capacity_for_width, SampleBuffer};
use super::path::{render_frame, WaveFrame};
use super::state::{
    amplitude_for_level, amplitude_from_raw, speed_for_level, speed_from_raw, WaveState,
    DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, DEFAULT_HEIGHT_LEVEL, DEFAULT_SPEED,
    DEFAULT_SPEED_LEVEL,
};
use super::ticker::{TickHandle, DEFAULT_TICK_INTERVAL};

/// When the sample buffer is trimmed after the surface gets narrower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CapacityPolicy {
    /// Excess samples are dropped by the next `add_sample`.
    #[default]
    Lazy,
    /// Excess samples are dropped as soon as the surface is resized.
    Eager,
}

impl std::fmt::Display for CapacityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lazy => write!(f, "lazy"),
            Self::Eager => write!(f, "eager"),
        }
    }
}

/// Construction parameters for a [`WaveAnimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSettings {
    pub amplitude: i32,
    pub speed: f64,
    pub frequency: u32,
    pub tick_interval: Duration,
    pub capacity_policy: CapacityPolicy,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            amplitude: DEFAULT_AMPLITUDE,
            speed: DEFAULT_SPEED,
            frequency: DEFAULT_FREQUENCY,
            tick_interval: DEFAULT_TICK_INTERVAL,
            capacity_policy: CapacityPolicy::default(),
        }
    }
}

impl WaveSettings {
    /// Builds settings from optional height and speed levels.
    ///
    /// Without any level the wave keeps amplitude 80 and speed 0.5. Once one
    /// level is given, the other falls back to height level 8 or speed level 1.
    pub fn from_levels(height_level: Option<i32>, speed_level: Option<i32>) -> Self {
        if height_level.is_none() && speed_level.is_none() {
            return Self::default();
        }
        Self {
            amplitude: amplitude_for_level(height_level.unwrap_or(DEFAULT_HEIGHT_LEVEL)),
            speed: speed_for_level(speed_level.unwrap_or(DEFAULT_SPEED_LEVEL)),
            ..Self::default()
        }
    }
}

/// Animated sine wave driven by a stream of amplitude samples.
#[derive(Debug)]
pub struct WaveAnimator {
    samples: SampleBuffer,
    state: WaveState,
    surface_width: u32,
    surface_height: u32,
    tick_interval: Duration,
    capacity_policy: CapacityPolicy,
    redraw_requested: bool,
    ticker: Option<(TickHandle, mpsc::Receiver<Instant>)>,
}

impl WaveAnimator {
    /// Creates an idle animator. No surface is known yet, so samples added
    /// before the first [`resize`](Self::resize) are not retained.
    pub fn new(settings: WaveSettings) -> Self {
        Self {
            samples: SampleBuffer::new(),
            state: WaveState {
                frequency: settings.frequency,
                amplitude: settings.amplitude,
                phase_shift: 0.0,
                speed: settings.speed,
            },
            surface_width: 0,
            surface_height: 0,
            tick_interval: settings.tick_interval,
            capacity_policy: settings.capacity_policy,
            redraw_requested: false,
            ticker: None,
        }
    }

    /// Sets the per-tick phase increment to `raw / 8`.
    ///
    /// Zero freezes the wave and negative values reverse it.
    pub fn set_speed(&mut self, raw: f64) {
        self.state.speed = speed_from_raw(raw);
        self.request_redraw();
    }

    /// Sets the default amplitude to `raw * 20`. Buffered samples keep their values.
    pub fn set_amplitude(&mut self, raw: i32) {
        self.state.amplitude = amplitude_from_raw(raw);
        self.request_redraw();
    }

    /// Pushes the newest amplitude sample, evicting the oldest ones beyond
    /// the capacity of the current surface.
    pub fn add_sample(&mut self, amplitude: i32) {
        self.samples
            .push_front(amplitude, capacity_for_width(self.surface_width));
        self.request_redraw();
    }

    /// Advances the animation by one step.
    pub fn on_tick(&mut self) {
        self.state.advance();
        self.request_redraw();
    }

    /// Records the host surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.surface_width, self.surface_height) {
            return;
        }

        tracing::debug!(
            "Surface resized from {}x{} to {}x{}",
            self.surface_width,
            self.surface_height,
            width,
            height
        );
        self.surface_width = width;
        self.surface_height = height;

        if self.capacity_policy == CapacityPolicy::Eager {
            self.samples.truncate(capacity_for_width(width));
        }
        self.request_redraw();
    }

    /// Samples the wave for a `width` x `height` surface.
    pub fn render(&self, width: u32, height: u32) -> WaveFrame {
        render_frame(&self.samples, &self.state, width, height)
    }

    /// Starts the periodic ticker. Does nothing if it is already running.
    ///
    /// # Errors
    /// - If no tokio runtime is available
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.is_running() {
            tracing::debug!("Animation already running");
            return Ok(());
        }

        self.ticker = Some(TickHandle::spawn(self.tick_interval)?);
        tracing::info!("Animation started");
        Ok(())
    }

    /// Stops the periodic ticker. Pending ticks are discarded.
    pub fn stop(&mut self) {
        if let Some((mut handle, _)) = self.ticker.take() {
            handle.stop();
            tracing::info!("Animation stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|(handle, _)| handle.is_running())
    }

    /// Applies every tick received since the last call and returns how many
    /// there were.
    pub fn pump_ticks(&mut self) -> usize {
        let Some((_, tick_rx)) = self.ticker.as_mut() else {
            return 0;
        };

        let mut ticks = 0;
        while tick_rx.try_recv().is_ok() {
            ticks += 1;
        }
        for _ in 0..ticks {
            self.on_tick();
        }
        ticks
    }

    /// Returns whether a redraw was requested since the last call, clearing
    /// the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn amplitude(&self) -> i32 {
        self.state.amplitude
    }

    pub fn speed(&self) -> f64 {
        self.state.speed
    }

    pub fn frequency(&self) -> u32 {
        self.state.frequency
    }

    pub fn phase_shift(&self) -> f64 {
        self.state.phase_shift
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity_policy
    }
}

impl Default for WaveAnimator {
    fn default() -> Self {
        Self::new(WaveSettings::default())
    }
}

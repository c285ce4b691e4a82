//! Interactive wave display.
//!
//! Runs the animator inside the terminal host, fed either by the synthetic
//! signal or by samples piped on stdin. SIGUSR1 pauses and resumes the
//! animation from outside the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::WaveViewConfig;
use crate::feed::{spawn_stdin_feed, Feed};
use crate::ui::{StatusLine, WaveCommand, WaveTui};
use crate::wave::WaveAnimator;

/// How long to wait for a key press per loop iteration, well below one tick.
const INPUT_POLL: Duration = Duration::from_millis(4);

/// Options of the demo command that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct DemoOptions {
    /// Read samples from stdin instead of generating them
    pub stdin: bool,
    pub height_level: Option<i32>,
    pub speed_level: Option<i32>,
}

/// Shows the animated wave until the user quits.
///
/// # Errors
/// - If the configuration cannot be loaded
/// - If the terminal cannot be initialized or drawn to
/// - If the signal handler cannot be registered
pub async fn handle_demo(options: DemoOptions) -> anyhow::Result<()> {
    tracing::info!("=== waveview started ===");

    let mut config = WaveViewConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {e}");
        anyhow::anyhow!("Configuration error: {e}")
    })?;
    if options.height_level.is_some() {
        config.wave.height_level = options.height_level;
    }
    if options.speed_level.is_some() {
        config.wave.speed_level = options.speed_level;
    }

    let mut animator = WaveAnimator::new(config.wave_settings());
    tracing::info!(
        "Wave configured: amplitude={}px, speed={}, frequency={}, capacity_policy={}",
        animator.amplitude(),
        animator.speed(),
        animator.frequency(),
        animator.capacity_policy()
    );

    let mut feed = if options.stdin {
        Feed::channel(spawn_stdin_feed()?)
    } else {
        Feed::synthetic(config.sample_interval())
    };

    let pause_signal = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGUSR1, Arc::clone(&pause_signal))
        .map_err(|e| anyhow::anyhow!("Failed to register signal handler: {e}"))?;

    let mut tui = WaveTui::new(&config.surface, config.palette())?;
    tui.sync_surface(&mut animator)?;
    animator.start()?;

    // Runtime controls work on the raw scales taken by set_speed / set_amplitude.
    let mut speed_level = animator.speed() * 8.0;
    let mut height_level = animator.amplitude() / 20;

    let result = run_loop(
        &mut tui,
        &mut animator,
        &mut feed,
        &pause_signal,
        &mut speed_level,
        &mut height_level,
    );

    animator.stop();
    tui.cleanup()?;

    match &result {
        Ok(()) => tracing::info!("=== waveview exited ==="),
        Err(e) => tracing::error!("Wave display failed: {e}"),
    }
    result
}

fn run_loop(
    tui: &mut WaveTui,
    animator: &mut WaveAnimator,
    feed: &mut Feed,
    pause_signal: &AtomicBool,
    speed_level: &mut f64,
    height_level: &mut i32,
) -> anyhow::Result<()> {
    loop {
        let mut force_redraw = false;

        if pause_signal.swap(false, Ordering::Relaxed) {
            tracing::info!("Received SIGUSR1: toggling animation");
            toggle_animation(animator)?;
            force_redraw = true;
        }

        match tui.handle_input(INPUT_POLL)? {
            WaveCommand::Continue => {}
            WaveCommand::Quit => break,
            WaveCommand::TogglePause => {
                toggle_animation(animator)?;
                force_redraw = true;
            }
            WaveCommand::Faster => {
                *speed_level += 1.0;
                animator.set_speed(*speed_level);
            }
            WaveCommand::Slower => {
                *speed_level -= 1.0;
                animator.set_speed(*speed_level);
            }
            WaveCommand::Taller => {
                *height_level = height_level.saturating_add(1);
                animator.set_amplitude(*height_level);
            }
            WaveCommand::Shorter => {
                *height_level = height_level.saturating_sub(1);
                animator.set_amplitude(*height_level);
            }
            WaveCommand::TogglePeak => {
                tui.toggle_peak();
                force_redraw = true;
            }
        }

        tui.sync_surface(animator)?;
        feed.drain_into(animator);
        animator.pump_ticks();

        if animator.take_redraw_request() || force_redraw {
            tui.draw(
                animator,
                StatusLine {
                    speed_level: *speed_level,
                    height_level: *height_level,
                    feed: feed.describe(),
                    feed_open: feed.is_open(),
                },
            )?;
        }
    }

    Ok(())
}

fn toggle_animation(animator: &mut WaveAnimator) -> anyhow::Result<()> {
    if animator.is_running() {
        animator.stop();
    } else {
        animator.start()?;
    }
    Ok(())
}

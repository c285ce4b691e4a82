//! Headless rendering of wave geometry.
//!
//! Feeds the given samples through the animator exactly as a host would,
//! applies a number of ticks and prints the resulting paths, one point per
//! line as `path<TAB>x<TAB>y`.

use std::io::{self, Write};

use crate::config::WaveViewConfig;
use crate::wave::{WaveAnimator, WaveFrame, WavePath, WaveSettings};

/// Options of the render command.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Samples in arrival order; the last one ends up at the left edge
    pub samples: Vec<i32>,
    pub ticks: u32,
    /// Also print the peak wave
    pub peak: bool,
    pub height_level: Option<i32>,
    pub speed_level: Option<i32>,
}

/// Prints the wave frame described by `options` to stdout.
///
/// # Errors
/// - If the configuration cannot be loaded
/// - If stdout cannot be written
pub fn handle_render(options: RenderOptions) -> anyhow::Result<()> {
    let mut config = WaveViewConfig::load()?;
    if options.height_level.is_some() {
        config.wave.height_level = options.height_level;
    }
    if options.speed_level.is_some() {
        config.wave.speed_level = options.speed_level;
    }

    let frame = render_headless(config.wave_settings(), &options);
    tracing::info!(
        "Rendered {}x{} frame from {} samples after {} ticks ({} points)",
        options.width,
        options.height,
        options.samples.len(),
        options.ticks,
        frame.primary.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_frame(&mut out, &frame, options.peak)?;
    out.flush()?;
    Ok(())
}

/// Builds the frame a host would paint after the given samples and ticks.
pub fn render_headless(settings: WaveSettings, options: &RenderOptions) -> WaveFrame {
    let mut animator = WaveAnimator::new(settings);
    animator.resize(options.width, options.height);
    for &sample in &options.samples {
        animator.add_sample(sample);
    }
    for _ in 0..options.ticks {
        animator.on_tick();
    }
    animator.render(options.width, options.height)
}

/// Writes the frame as tab separated points.
///
/// # Errors
/// - If writing fails
pub fn write_frame<W: Write>(out: &mut W, frame: &WaveFrame, peak: bool) -> io::Result<()> {
    write_path(out, "primary", &frame.primary)?;
    if peak {
        write_path(out, "peak", &frame.peak)?;
    }
    Ok(())
}

fn write_path<W: Write>(out: &mut W, name: &str, path: &WavePath) -> io::Result<()> {
    for point in path.points() {
        writeln!(out, "{name}\t{:.4}\t{:.4}", point.x, point.y)?;
    }
    Ok(())
}

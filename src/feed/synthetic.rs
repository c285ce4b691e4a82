//! Generated amplitude stream for running the wave without an external source.

/// Deterministic, speech-like amplitude envelope.
///
/// Produces values between 0 and the requested amplitude: a slow swell
/// modulated by a faster flutter, so the wave visibly breathes.
#[derive(Debug, Clone, Default)]
pub struct SyntheticSignal {
    index: u64,
}

impl SyntheticSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next sample scaled to `amplitude`.
    pub fn next_sample(&mut self, amplitude: i32) -> i32 {
        let t = self.index as f64;
        self.index = self.index.wrapping_add(1);

        let swell = 0.5 + 0.5 * (t * 0.07).sin() * (t * 0.013).cos();
        let flutter = 0.75 + 0.25 * (t * 0.9).sin();
        (f64::from(amplitude) * swell * flutter).round() as i32
    }
}

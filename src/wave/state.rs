//! Motion parameters of the wave and the level scales used to configure them.

/// Samples per half cycle of the sine argument.
pub const DEFAULT_FREQUENCY: u32 = 180;
/// Amplitude used when neither level is configured.
pub const DEFAULT_AMPLITUDE: i32 = 80;
/// Phase increment per tick used when neither level is configured.
pub const DEFAULT_SPEED: f64 = 0.5;
/// Height level assumed when only the speed level is configured.
pub const DEFAULT_HEIGHT_LEVEL: i32 = 8;
/// Speed level assumed when only the height level is configured.
pub const DEFAULT_SPEED_LEVEL: i32 = 1;

const MAX_LEVEL: i32 = 10;
const AMPLITUDE_PER_LEVEL: i32 = 20;
const MAX_LEVEL_AMPLITUDE: i32 = 200;
const SPEED_DIVISOR: f64 = 8.0;
const OVER_MAX_LEVEL_SPEED: f64 = 0.25;

/// Maps a height level to an amplitude in surface pixels.
///
/// Levels above 10 clamp to 200. Lower levels (including negative ones) scale
/// linearly by 20 without validation.
pub fn amplitude_for_level(level: i32) -> i32 {
    if level > MAX_LEVEL {
        MAX_LEVEL_AMPLITUDE
    } else {
        level.saturating_mul(AMPLITUDE_PER_LEVEL)
    }
}

/// Maps a speed level to a per-tick phase increment.
///
/// Levels above 10 fall back to a slow 0.25 rather than the fastest speed.
pub fn speed_for_level(level: i32) -> f64 {
    if level > MAX_LEVEL {
        OVER_MAX_LEVEL_SPEED
    } else {
        level as f64 / SPEED_DIVISOR
    }
}

/// Converts a raw speed value supplied at runtime to a per-tick increment.
pub fn speed_from_raw(raw: f64) -> f64 {
    raw / SPEED_DIVISOR
}

/// Converts a raw amplitude value supplied at runtime to surface pixels.
pub fn amplitude_from_raw(raw: i32) -> i32 {
    raw.saturating_mul(AMPLITUDE_PER_LEVEL)
}

/// Mutable motion state of the wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveState {
    pub frequency: u32,
    /// Amplitude applied before any samples exist and used to scale generated input.
    pub amplitude: i32,
    /// Accumulated phase offset; grows without wraparound since `sin` is periodic.
    pub phase_shift: f64,
    pub speed: f64,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: DEFAULT_AMPLITUDE,
            phase_shift: 0.0,
            speed: DEFAULT_SPEED,
        }
    }
}

impl WaveState {
    /// Advances the phase by one tick.
    pub fn advance(&mut self) {
        self.phase_shift += self.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_level_mapping() {
        assert_eq!(amplitude_for_level(5), 100);
        assert_eq!(amplitude_for_level(10), 200);
        assert_eq!(amplitude_for_level(15), 200);
        assert_eq!(amplitude_for_level(0), 0);
        assert_eq!(amplitude_for_level(-1), -20);
    }

    #[test]
    fn test_speed_level_mapping() {
        assert_eq!(speed_for_level(4), 0.5);
        assert_eq!(speed_for_level(12), 0.25);
        assert_eq!(speed_for_level(10), 1.25);
        assert_eq!(speed_for_level(0), 0.0);
    }

    #[test]
    fn test_raw_conversions() {
        assert_eq!(speed_from_raw(4.0), 0.5);
        assert_eq!(speed_from_raw(-8.0), -1.0);
        assert_eq!(amplitude_from_raw(4), 80);
        assert_eq!(amplitude_from_raw(0), 0);
    }

    #[test]
    fn test_defaults() {
        let state = WaveState::default();
        assert_eq!(state.frequency, 180);
        assert_eq!(state.amplitude, 80);
        assert_eq!(state.speed, 0.5);
        assert_eq!(state.phase_shift, 0.0);
    }

    #[test]
    fn test_advance_adds_speed() {
        let mut state = WaveState::default();
        state.advance();
        state.advance();
        assert_eq!(state.phase_shift, 1.0);
    }
}

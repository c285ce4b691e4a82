//! Wave geometry.
//!
//! A frame is rebuilt from scratch on every redraw: nothing here is shared
//! between frames, so two renders of the same state always produce equal paths.

use std::f64::consts::PI;

use super::buffer::{SampleBuffer, SAMPLE_STEP_PX};
use super::state::WaveState;

/// A point on the host surface, in pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An open polyline, stroked segment by segment from the first point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WavePath {
    points: Vec<Point>,
}

impl WavePath {
    pub fn new() -> Self {
        Self::default()
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.points.push(Point::new(x, y));
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Consecutive point pairs, i.e. the line segments to stroke.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Both polylines produced by one redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveFrame {
    /// Wave centred one third down the surface; the one hosts stroke.
    pub primary: WavePath,
    /// Same wave centred two thirds down the surface.
    pub peak: WavePath,
}

impl WaveFrame {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.peak.is_empty()
    }
}

/// Samples the sine wave across a `width` x `height` surface.
///
/// One buffered sample is consumed per 10 pixel step, newest first, and
/// sampling stops as soon as the buffer runs out. An empty buffer yields an
/// empty frame so the host skips drawing altogether.
pub fn render_frame(
    samples: &SampleBuffer,
    state: &WaveState,
    width: u32,
    height: u32,
) -> WaveFrame {
    if samples.is_empty() {
        return WaveFrame::default();
    }

    let quadrant = (height / 3) as f32;
    let bottom = height as f32;
    let mut primary = WavePath::new();
    let mut peak = WavePath::new();

    for path in [&mut primary, &mut peak] {
        path.line_to(0.0, bottom);
        path.line_to(0.0, quadrant);
    }

    let steps = (0..u64::from(width) + u64::from(SAMPLE_STEP_PX)).step_by(SAMPLE_STEP_PX as usize);
    for (i, amplitude) in steps.zip(samples.iter()) {
        let x = i as f32;
        let displacement = amplitude as f32 * wave_sine(i, state) as f32;

        primary.line_to(x, quadrant + displacement);
        peak.line_to(x, quadrant * 2.0 + displacement);
    }

    for path in [&mut primary, &mut peak] {
        path.line_to(width as f32, bottom);
    }

    WaveFrame { primary, peak }
}

fn wave_sine(x: u64, state: &WaveState) -> f64 {
    let offset = (x + u64::from(SAMPLE_STEP_PX)) as f64;
    (offset * PI / f64::from(state.frequency) + state.phase_shift).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn buffer_of(newest_first: &[i32]) -> SampleBuffer {
        let mut buffer = SampleBuffer::new();
        for &sample in newest_first.iter().rev() {
            buffer.push_front(sample, usize::MAX);
        }
        buffer
    }

    fn assert_point(actual: Point, x: f32, y: f32) {
        assert!((actual.x - x).abs() < EPSILON, "x: {} != {}", actual.x, x);
        assert!((actual.y - y).abs() < EPSILON, "y: {} != {}", actual.y, y);
    }

    #[test]
    fn test_empty_buffer_renders_nothing() {
        let frame = render_frame(&SampleBuffer::new(), &WaveState::default(), 100, 90);
        assert!(frame.is_empty());
        assert_eq!(frame.primary.segments().count(), 0);
    }

    #[test]
    fn test_sampled_points_follow_formula() {
        let state = WaveState {
            phase_shift: 0.0,
            ..WaveState::default()
        };
        let frame = render_frame(&buffer_of(&[10, 20, 30]), &state, 100, 90);
        let points = frame.primary.points();
        let quadrant = 30.0;

        assert_eq!(points.len(), 6);
        assert_point(points[0], 0.0, 90.0);
        assert_point(points[1], 0.0, quadrant);
        assert_point(points[2], 0.0, quadrant + 10.0 * (10.0 * std::f32::consts::PI / 180.0).sin());
        assert_point(points[3], 10.0, quadrant + 20.0 * (20.0 * std::f32::consts::PI / 180.0).sin());
        assert_point(points[4], 20.0, quadrant + 30.0 * (30.0 * std::f32::consts::PI / 180.0).sin());
        assert_point(points[5], 100.0, 90.0);
    }

    #[test]
    fn test_peak_path_is_offset_by_one_quadrant() {
        let frame = render_frame(&buffer_of(&[10, 20, 30]), &WaveState::default(), 100, 90);

        assert_eq!(frame.peak.len(), frame.primary.len());
        assert_point(frame.peak.points()[1], 0.0, 30.0);
        for (primary, peak) in frame.primary.points()[2..5].iter().zip(&frame.peak.points()[2..5]) {
            assert_point(*peak, primary.x, primary.y + 30.0);
        }
        assert_point(frame.peak.points()[5], 100.0, 90.0);
    }

    #[test]
    fn test_sampling_stops_at_surface_edge() {
        let samples: Vec<i32> = (0..50).collect();
        let frame = render_frame(&buffer_of(&samples), &WaveState::default(), 100, 90);

        // 0..=100 in steps of 10, plus the two leading corners and the closing one.
        assert_eq!(frame.primary.len(), 11 + 3);
        assert_eq!(frame.primary.points()[12].x, 100.0);
    }

    #[test]
    fn test_zero_width_keeps_single_sample() {
        let frame = render_frame(&buffer_of(&[5]), &WaveState::default(), 0, 30);
        let xs: Vec<f32> = frame.primary.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_phase_shift_moves_wave() {
        let buffer = buffer_of(&[40]);
        let still = render_frame(&buffer, &WaveState::default(), 100, 90);
        let shifted = render_frame(
            &buffer,
            &WaveState {
                phase_shift: 0.5,
                ..WaveState::default()
            },
            100,
            90,
        );
        assert_ne!(still.primary.points()[2], shifted.primary.points()[2]);
    }
}

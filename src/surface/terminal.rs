//! Terminal rendering of recorded wave frames.
//!
//! Terminal cells are far coarser than the pixel grid the wave is sampled on,
//! so each cell stands for a block of virtual pixels and the recorded paths
//! are replayed on a braille canvas spanning the same pixel range.

use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::canvas::{Canvas, Line as CanvasLine},
};

use super::{DrawCommand, DrawList};
use crate::wave::Rgb;

/// Size of the virtual pixel surface covering `area`.
pub fn surface_size(area: Rect, cell_width_px: u32, cell_height_px: u32) -> (u32, u32) {
    (
        u32::from(area.width).saturating_mul(cell_width_px),
        u32::from(area.height).saturating_mul(cell_height_px),
    )
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Widget replaying a [`DrawList`] onto the terminal buffer.
pub struct WaveCanvas<'a> {
    frame: &'a DrawList,
}

impl<'a> WaveCanvas<'a> {
    pub fn new(frame: &'a DrawList) -> Self {
        Self { frame }
    }
}

impl Widget for WaveCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        use super::Surface;

        let (width, height) = self.frame.size();
        let height = f64::from(height);
        let background = self.frame.background().map_or(Color::Reset, to_color);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(width)])
            .y_bounds([0.0, height])
            .background_color(background)
            .paint(|ctx| {
                for command in self.frame.commands() {
                    let DrawCommand::Stroke { path, stroke } = command else {
                        continue;
                    };
                    let color = to_color(stroke.color);
                    // Surface y grows downward, canvas y grows upward.
                    for (from, to) in path.segments() {
                        ctx.draw(&CanvasLine::new(
                            f64::from(from.x),
                            height - f64::from(from.y),
                            f64::from(to.x),
                            height - f64::from(to.y),
                            color,
                        ));
                    }
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::paint;
    use crate::wave::palette::{DEFAULT_BACKGROUND, DEFAULT_PRIMARY};
    use crate::wave::{Palette, WaveAnimator};

    #[test]
    fn test_surface_size_scales_cells() {
        assert_eq!(surface_size(Rect::new(3, 4, 80, 23), 10, 20), (800, 460));
        assert_eq!(surface_size(Rect::new(0, 0, 0, 0), 10, 20), (0, 0));
    }

    #[test]
    fn test_surface_size_saturates_on_huge_cells() {
        assert_eq!(
            surface_size(Rect::new(0, 0, 80, 24), 100_000_000, 20),
            (u32::MAX, 480)
        );
    }

    #[test]
    fn test_canvas_draws_background_and_wave() {
        let area = Rect::new(0, 0, 20, 6);
        let (width, height) = surface_size(area, 10, 20);
        let mut animator = WaveAnimator::default();
        animator.resize(width, height);
        for _ in 0..20 {
            animator.add_sample(30);
        }

        let mut frame = DrawList::new(width, height);
        paint(&animator, &Palette::default(), &mut frame);

        let mut buf = Buffer::empty(area);
        WaveCanvas::new(&frame).render(area, &mut buf);

        assert!(buf.content().iter().all(|cell| cell.bg == to_color(DEFAULT_BACKGROUND)));
        assert!(buf.content().iter().any(|cell| cell.fg == to_color(DEFAULT_PRIMARY)));
    }

    #[test]
    fn test_empty_frame_draws_only_background() {
        let area = Rect::new(0, 0, 10, 4);
        let mut frame = DrawList::new(100, 80);
        paint(&WaveAnimator::default(), &Palette::default(), &mut frame);

        let mut buf = Buffer::empty(area);
        WaveCanvas::new(&frame).render(area, &mut buf);

        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
    }
}

//! Drawing surfaces the wave is painted onto.
//!
//! A surface only needs to report its size, fill itself with a colour and
//! stroke a polyline. [`DrawList`] records those calls so a host can replay
//! them later, which is how the terminal host draws.

pub mod terminal;

pub use terminal::WaveCanvas;

use crate::wave::{Palette, Rgb, Stroke, WaveAnimator, WavePath};

/// Host drawing primitive.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface.
    fn fill(&mut self, color: Rgb);

    /// Strokes `path` as connected line segments.
    fn stroke(&mut self, path: &WavePath, stroke: &Stroke);
}

/// Paints the current wave frame onto `surface`.
///
/// The background is filled on every call. Paths are only stroked when the
/// animator has samples; the peak wave additionally requires
/// `palette.draw_peak`.
pub fn paint<S: Surface + ?Sized>(animator: &WaveAnimator, palette: &Palette, surface: &mut S) {
    surface.fill(palette.background);

    let (width, height) = surface.size();
    let frame = animator.render(width, height);

    if !frame.primary.is_empty() {
        surface.stroke(&frame.primary, &palette.primary);
    }
    if palette.draw_peak && !frame.peak.is_empty() {
        surface.stroke(&frame.peak, &palette.peak);
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Rgb),
    Stroke { path: WavePath, stroke: Stroke },
}

/// Surface that records drawing calls instead of rasterizing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Colour of the most recent fill, if any.
    pub fn background(&self) -> Option<Rgb> {
        self.commands.iter().rev().find_map(|command| match command {
            DrawCommand::Fill(color) => Some(*color),
            DrawCommand::Stroke { .. } => None,
        })
    }

    /// Recorded strokes in drawing order.
    pub fn strokes(&self) -> impl Iterator<Item = (&WavePath, &Stroke)> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Stroke { path, stroke } => Some((path, stroke)),
            DrawCommand::Fill(_) => None,
        })
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgb) {
        // A fill hides everything drawn before it.
        self.commands.clear();
        self.commands.push(DrawCommand::Fill(color));
    }

    fn stroke(&mut self, path: &WavePath, stroke: &Stroke) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            stroke: *stroke,
        });
    }
}

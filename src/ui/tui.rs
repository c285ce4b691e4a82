//! Terminal host for the wave animation.
//!
//! Owns the terminal, maps its cells onto a virtual pixel surface, paints the
//! wave through a [`DrawList`] and turns key presses into commands.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io::{stdout, Stdout};
use std::time::Duration;

use crate::config::file::SurfaceConfig;
use crate::surface::{paint, terminal::surface_size, DrawList, WaveCanvas};
use crate::wave::{Palette, WaveAnimator};

const FOOTER_HEIGHT: u16 = 1;

/// User input while the wave is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveCommand {
    /// No key, or a key without a binding
    Continue,
    /// Leave the view (q, Escape or Ctrl+C)
    Quit,
    /// Stop or restart the animation (Space)
    TogglePause,
    /// Raise or lower the speed level (+ / -)
    Faster,
    Slower,
    /// Raise or lower the height level (Up / Down)
    Taller,
    Shorter,
    /// Show or hide the peak wave (p)
    TogglePeak,
}

/// Values shown in the footer that the animator does not know about.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
    pub speed_level: f64,
    pub height_level: i32,
    pub feed: &'a str,
    /// False once the sample source has ended
    pub feed_open: bool,
}

/// Terminal UI hosting one [`WaveAnimator`].
pub struct WaveTui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    cell_width_px: u32,
    cell_height_px: u32,
    palette: Palette,
    restored: bool,
}

impl WaveTui {
    /// Creates the terminal UI and enters alternate screen mode.
    ///
    /// # Errors
    /// - If raw mode cannot be enabled
    /// - If the alternate screen cannot be entered
    /// - If the terminal cannot be initialized
    pub fn new(surface: &SurfaceConfig, palette: Palette) -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(WaveTui {
            terminal,
            cell_width_px: surface.cell_width_px,
            cell_height_px: surface.cell_height_px,
            palette,
            restored: false,
        })
    }

    /// Area of the terminal reserved for the wave, above the footer.
    fn wave_area(area: Rect) -> Rect {
        Rect {
            height: area.height.saturating_sub(FOOTER_HEIGHT),
            ..area
        }
    }

    /// Pixel size of the wave surface for the current terminal size.
    ///
    /// # Errors
    /// - If the terminal size cannot be queried
    pub fn surface_size(&self) -> anyhow::Result<(u32, u32)> {
        let size = self.terminal.size()?;
        let area = Self::wave_area(Rect::new(0, 0, size.width, size.height));
        Ok(surface_size(area, self.cell_width_px, self.cell_height_px))
    }

    /// Tells the animator about the current surface size.
    ///
    /// # Errors
    /// - If the terminal size cannot be queried
    pub fn sync_surface(&self, animator: &mut WaveAnimator) -> anyhow::Result<()> {
        let (width, height) = self.surface_size()?;
        animator.resize(width, height);
        Ok(())
    }

    pub fn toggle_peak(&mut self) {
        self.palette.draw_peak = !self.palette.draw_peak;
        tracing::debug!("Peak wave {}", if self.palette.draw_peak { "shown" } else { "hidden" });
    }

    /// Paints the current wave frame and the status footer.
    ///
    /// # Errors
    /// - If terminal rendering fails
    pub fn draw(&mut self, animator: &WaveAnimator, status: StatusLine<'_>) -> anyhow::Result<()> {
        let (width, height) = self.surface_size()?;
        let mut frame_list = DrawList::new(width, height);
        paint(animator, &self.palette, &mut frame_list);

        let footer = footer_line(animator, status);
        let footer_style = Style::default()
            .fg(Color::Rgb(
                self.palette.background.r,
                self.palette.background.g,
                self.palette.background.b,
            ))
            .bg(Color::Rgb(0, 0, 0));

        self.terminal.draw(|frame| {
            let area = frame.area();
            let wave_area = Self::wave_area(area);
            frame.render_widget(WaveCanvas::new(&frame_list), wave_area);

            let footer_area = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(FOOTER_HEIGHT),
                width: area.width,
                height: FOOTER_HEIGHT.min(area.height),
            };
            frame.render_widget(Paragraph::new(footer).style(footer_style), footer_area);
        })?;

        Ok(())
    }

    /// Waits up to `timeout` for a key press and maps it to a command.
    ///
    /// # Errors
    /// - If event polling fails
    pub fn handle_input(&mut self, timeout: Duration) -> anyhow::Result<WaveCommand> {
        if !event::poll(timeout)? {
            return Ok(WaveCommand::Continue);
        }

        let Event::Key(key) = event::read()? else {
            return Ok(WaveCommand::Continue);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(WaveCommand::Continue);
        }

        let command = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => WaveCommand::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                WaveCommand::Quit
            }
            KeyCode::Char(' ') => WaveCommand::TogglePause,
            KeyCode::Char('+') | KeyCode::Char('=') => WaveCommand::Faster,
            KeyCode::Char('-') => WaveCommand::Slower,
            KeyCode::Up => WaveCommand::Taller,
            KeyCode::Down => WaveCommand::Shorter,
            KeyCode::Char('p') => WaveCommand::TogglePeak,
            _ => WaveCommand::Continue,
        };
        tracing::debug!("Key {:?} mapped to {:?}", key.code, command);
        Ok(command)
    }

    /// Restores the terminal state and leaves alternate screen mode.
    ///
    /// # Errors
    /// - If terminal mode cannot be disabled
    /// - If the cursor cannot be shown
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for WaveTui {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn footer_line(animator: &WaveAnimator, status: StatusLine<'_>) -> Line<'static> {
    let indicator = if animator.is_running() {
        Span::styled("● ", Style::default().fg(Color::Green))
    } else {
        Span::styled("⏸ ", Style::default().fg(Color::Yellow))
    };

    Line::from(vec![
        indicator,
        Span::raw(format!(
            "speed {} ({:.3}) / height {} ({}px) / {} samples ({}) / phase {:.1}",
            status.speed_level,
            animator.speed(),
            status.height_level,
            animator.amplitude(),
            animator.samples().len(),
            feed_label(status),
            animator.phase_shift(),
        )),
    ])
}

fn feed_label(status: StatusLine<'_>) -> String {
    if status.feed_open {
        status.feed.to_string()
    } else {
        format!("{}, closed", status.feed)
    }
}

//! Raw-mode terminal: setup/teardown guard, cell renderer and bell sink.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use tracing::{info, warn};

use bubble_learning::domain::Rgb;
use bubble_learning::protocol::{AudioCue, DrawCommand, FeedbackSink, Renderer};

use super::canvas::Canvas;

/// Raw mode, alternate screen and mouse capture for as long as it lives.
pub struct TerminalGuard {
  stdout: Stdout,
}

impl TerminalGuard {
  pub fn enter() -> io::Result<Self> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    Ok(Self { stdout })
  }
}

impl Drop for TerminalGuard {
  fn drop(&mut self) {
    let _ = execute!(self.stdout, ResetColor, Show, DisableMouseCapture, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
  }
}

fn color(c: Rgb) -> Color {
  Color::Rgb { r: c.r, g: c.g, b: c.b }
}

pub struct TerminalRenderer {
  canvas: Canvas,
  stdout: Stdout,
}

impl TerminalRenderer {
  pub fn new(cols: u16, rows: u16) -> Self {
    Self { canvas: Canvas::new(cols, rows), stdout: io::stdout() }
  }

  pub fn canvas(&self) -> &Canvas {
    &self.canvas
  }

  pub fn resize(&mut self, cols: u16, rows: u16) {
    self.canvas = Canvas::new(cols, rows);
  }

  fn flush(&mut self) -> io::Result<()> {
    let mut last: Option<(Rgb, Rgb)> = None;
    for y in 0..self.canvas.rows() {
      queue!(self.stdout, MoveTo(0, y))?;
      for cell in self.canvas.row(y) {
        if last != Some((cell.fg, cell.bg)) {
          queue!(self.stdout, SetForegroundColor(color(cell.fg)), SetBackgroundColor(color(cell.bg)))?;
          last = Some((cell.fg, cell.bg));
        }
        queue!(self.stdout, Print(cell.glyph))?;
      }
    }
    self.stdout.flush()
  }
}

impl Renderer for TerminalRenderer {
  fn render(&mut self, commands: &[DrawCommand]) {
    self.canvas.paint(commands);
    if let Err(e) = self.flush() {
      warn!(target: "bubble_learning", error = %e, "Failed to draw frame.");
    }
  }
}

/// Logs every cue; rings the terminal bell on wrong answers.
#[derive(Debug, Default)]
pub struct BellSink;

impl FeedbackSink for BellSink {
  fn play(&mut self, cue: AudioCue, spoken: Option<&str>) {
    info!(target: "bubble_learning", ?cue, spoken, "Audio cue.");
    if cue == AudioCue::Negative {
      let mut out = io::stdout();
      let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
  }
}

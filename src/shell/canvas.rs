//! Rasterize draw commands into a grid of terminal cells.
//!
//! Every cell samples the virtual screen at its center. Shapes paint the cell
//! background; text paints glyphs over whatever is already there.

use bubble_learning::domain::{Point, Rgb};
use bubble_learning::geometry::Rect;
use bubble_learning::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use bubble_learning::protocol::{DrawCommand, TextAnchor};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
  pub glyph: char,
  pub fg: Rgb,
  pub bg: Rgb,
}

impl Cell {
  fn blank(bg: Rgb) -> Self {
    Self { glyph: ' ', fg: Rgb::new(0, 0, 0), bg }
  }
}

pub struct Canvas {
  cols: u16,
  rows: u16,
  cells: Vec<Cell>,
}

impl Canvas {
  pub fn new(cols: u16, rows: u16) -> Self {
    let cols = cols.max(1);
    let rows = rows.max(1);
    Self { cols, rows, cells: vec![Cell::blank(Rgb::new(0, 0, 0)); cols as usize * rows as usize] }
  }

  pub fn rows(&self) -> u16 {
    self.rows
  }

  pub fn row(&self, y: u16) -> &[Cell] {
    let start = y as usize * self.cols as usize;
    &self.cells[start..start + self.cols as usize]
  }

  fn cell_w(&self) -> f32 {
    SCREEN_WIDTH / self.cols as f32
  }

  fn cell_h(&self) -> f32 {
    SCREEN_HEIGHT / self.rows as f32
  }

  /// Virtual point at the center of terminal cell (`col`, `row`).
  pub fn to_virtual(&self, col: u16, row: u16) -> Point {
    Point::new((col as f32 + 0.5) * self.cell_w(), (row as f32 + 0.5) * self.cell_h())
  }

  fn to_cell(&self, p: Point) -> (i32, i32) {
    ((p.x / self.cell_w()).floor() as i32, (p.y / self.cell_h()).floor() as i32)
  }

  fn fill_where(&mut self, color: Rgb, inside: impl Fn(Point) -> bool) {
    for row in 0..self.rows {
      for col in 0..self.cols {
        if inside(self.to_virtual(col, row)) {
          let idx = row as usize * self.cols as usize + col as usize;
          self.cells[idx] = Cell::blank(color);
        }
      }
    }
  }

  fn put_text(&mut self, at: Point, anchor: TextAnchor, text: &str, color: Rgb) {
    let len = text.chars().count() as i32;
    let (mut col, row) = self.to_cell(at);
    if anchor == TextAnchor::Center {
      col -= len / 2;
    }
    if row < 0 || row >= self.rows as i32 {
      return;
    }
    for (i, glyph) in text.chars().enumerate() {
      let c = col + i as i32;
      if c < 0 || c >= self.cols as i32 {
        continue;
      }
      let idx = row as usize * self.cols as usize + c as usize;
      self.cells[idx].glyph = glyph;
      self.cells[idx].fg = color;
    }
  }

  pub fn paint(&mut self, commands: &[DrawCommand]) {
    for cmd in commands {
      match cmd {
        DrawCommand::Clear { color } => self.cells.fill(Cell::blank(*color)),
        DrawCommand::Circle { center, radius, color } => {
          let (c, r) = (*center, *radius);
          self.fill_where(*color, |p| c.distance(p) <= r);
        }
        DrawCommand::Rect { rect, color, outline, .. } => {
          if let Some(edge) = outline {
            let border = rect.inflate(self.cell_w() * 2.0, self.cell_h() * 2.0);
            self.fill_where(*edge, |p| border.contains(p));
          }
          let r: Rect = *rect;
          self.fill_where(*color, |p| r.contains(p));
        }
        DrawCommand::Polygon { points, color } => self.fill_where(*color, |p| polygon_contains(points, p)),
        DrawCommand::Text { at, anchor, text, color, .. } => self.put_text(*at, *anchor, text, *color),
      }
    }
  }
}

/// Even-odd point-in-polygon test.
fn polygon_contains(points: &[Point], p: Point) -> bool {
  let mut inside = false;
  let n = points.len();
  for i in 0..n {
    let (a, b) = (points[i], points[(i + n - 1) % n]);
    if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
      inside = !inside;
    }
  }
  inside
}

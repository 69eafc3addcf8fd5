//! Fixed screen layout. All coordinates are in a 1024×768 virtual screen; the
//! shell scales them to whatever surface it renders on.

use crate::geometry::Rect;

pub const SCREEN_WIDTH: f32 = 1024.0;
pub const SCREEN_HEIGHT: f32 = 768.0;

const OPTION_W: f32 = 100.0;
const OPTION_H: f32 = 60.0;
const OPTION_SPACING: f32 = 20.0;

/// Answer option buttons, centered in one row near the bottom.
pub fn option_buttons(count: usize) -> Vec<Rect> {
  if count == 0 {
    return Vec::new();
  }
  let total = count as f32 * OPTION_W + (count as f32 - 1.0) * OPTION_SPACING;
  let start_x = ((SCREEN_WIDTH - total) / 2.0).floor();
  let y = SCREEN_HEIGHT - 150.0;
  (0..count)
    .map(|i| Rect::new(start_x + i as f32 * (OPTION_W + OPTION_SPACING), y, OPTION_W, OPTION_H))
    .collect()
}

pub fn previous_button() -> Rect {
  Rect::new(100.0, SCREEN_HEIGHT - 150.0, 150.0, 60.0)
}

pub fn next_button() -> Rect {
  Rect::new(SCREEN_WIDTH - 250.0, SCREEN_HEIGHT - 150.0, 150.0, 60.0)
}

pub fn word_button() -> Rect {
  Rect::new(SCREEN_WIDTH / 2.0 - 75.0, SCREEN_HEIGHT - 150.0, 150.0, 60.0)
}

pub fn new_game_button() -> Rect {
  Rect::new(SCREEN_WIDTH - 200.0, 20.0, 150.0, 50.0)
}

/// Owned by the shell, listed here so activity controls never overlap it.
pub fn back_button() -> Rect {
  Rect::new(20.0, 20.0, 100.0, 40.0)
}

/// Card grid for pair matching: up to `cols` cards per row, centered.
pub fn card_grid(count: usize, cols: usize) -> Vec<Rect> {
  const CARD: f32 = 110.0;
  const GAP: f32 = 20.0;
  let cols = cols.max(1).min(count.max(1));
  let rows = count.div_ceil(cols);
  let grid_w = cols as f32 * CARD + (cols as f32 - 1.0) * GAP;
  let grid_h = rows as f32 * CARD + (rows.saturating_sub(1)) as f32 * GAP;
  let x0 = (SCREEN_WIDTH - grid_w) / 2.0;
  let y0 = 150.0 + ((SCREEN_HEIGHT - 300.0 - grid_h) / 2.0).max(0.0);
  (0..count)
    .map(|i| {
      let (r, c) = (i / cols, i % cols);
      Rect::new(x0 + c as f32 * (CARD + GAP), y0 + r as f32 * (CARD + GAP), CARD, CARD)
    })
    .collect()
}

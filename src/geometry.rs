//! Shape outlines and hit testing in virtual screen coordinates.
//!
//! Hit areas are deliberately generous for small fingers: circles use their
//! radius, squares and rectangles their box, and the pointy shapes (triangle,
//! star, diamond) the bounding box of their outline.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::domain::{Point, ShapeKind, Target, VisualKind};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
  pub x: f32,
  pub y: f32,
  pub w: f32,
  pub h: f32,
}

impl Rect {
  pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
    Self { x, y, w, h }
  }

  /// Edges are inclusive on the top/left and exclusive on the bottom/right.
  pub fn contains(&self, p: Point) -> bool {
    p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
  }

  pub fn center(&self) -> Point {
    Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
  }

  pub fn inflate(&self, dw: f32, dh: f32) -> Rect {
    Rect::new(self.x - dw / 2.0, self.y - dh / 2.0, self.w + dw, self.h + dh)
  }

  fn bounding(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
    for p in &points[1..] {
      min_x = min_x.min(p.x);
      max_x = max_x.max(p.x);
      min_y = min_y.min(p.y);
      max_y = max_y.max(p.y);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
  }
}

/// Box covered by a square or rectangle centered at `c`.
pub fn box_of(shape: ShapeKind, c: Point, size: f32) -> Option<Rect> {
  match shape {
    ShapeKind::Square => Some(Rect::new(c.x - size, c.y - size, size * 2.0, size * 2.0)),
    ShapeKind::Rectangle => Some(Rect::new(c.x - size, c.y - size / 2.0, size * 2.0, size)),
    _ => None,
  }
}

/// Polygon outline for the pointy shapes; empty for circle/square/rectangle.
pub fn outline(shape: ShapeKind, c: Point, size: f32) -> Vec<Point> {
  match shape {
    ShapeKind::Triangle => vec![
      Point::new(c.x, c.y - size),
      Point::new(c.x - size, c.y + size),
      Point::new(c.x + size, c.y + size),
    ],
    ShapeKind::Diamond => vec![
      Point::new(c.x, c.y - size),
      Point::new(c.x + size, c.y),
      Point::new(c.x, c.y + size),
      Point::new(c.x - size, c.y),
    ],
    ShapeKind::Star => star_points(c, size, 0.0),
    ShapeKind::Circle | ShapeKind::Square | ShapeKind::Rectangle => Vec::new(),
  }
}

/// Ten-point star (five outer tips, five inner corners), first tip pointing up
/// when `rotation` is zero.
pub fn star_points(c: Point, size: f32, rotation: f32) -> Vec<Point> {
  (0..10)
    .map(|i| {
      let angle = rotation + i as f32 * PI / 5.0 - PI / 2.0;
      let radius = if i % 2 == 0 { size } else { size / 2.0 };
      Point::new(c.x + radius * angle.cos(), c.y + radius * angle.sin())
    })
    .collect()
}

pub fn hit_test(shape: ShapeKind, c: Point, size: f32, p: Point) -> bool {
  match shape {
    ShapeKind::Circle => c.distance(p) <= size,
    ShapeKind::Square | ShapeKind::Rectangle => box_of(shape, c, size).is_some_and(|r| r.contains(p)),
    ShapeKind::Triangle | ShapeKind::Star | ShapeKind::Diamond => {
      match Rect::bounding(&outline(shape, c, size)) {
        Some(b) => p.x >= b.x && p.x <= b.x + b.w && p.y >= b.y && p.y <= b.y + b.h,
        None => false,
      }
    }
  }
}

/// Card-shaped box of side `size` centered at `c`.
pub fn card_rect(c: Point, size: f32) -> Rect {
  Rect::new(c.x - size / 2.0, c.y - size / 2.0, size, size)
}

/// Whether `p` lands on `target`. Letters and words are not clickable.
pub fn target_contains(target: &Target, p: Point) -> bool {
  match &target.visual {
    VisualKind::Shape { shape } => hit_test(*shape, target.position, target.size, p),
    VisualKind::Card => card_rect(target.position, target.size).contains(p),
    VisualKind::Letter { .. } | VisualKind::Word { .. } => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn circle_hit_uses_radius() {
    let c = Point::new(100.0, 100.0);
    assert!(hit_test(ShapeKind::Circle, c, 30.0, Point::new(120.0, 100.0)));
    assert!(!hit_test(ShapeKind::Circle, c, 30.0, Point::new(125.0, 125.0)));
  }

  #[test]
  fn rectangle_is_half_as_tall_as_square() {
    let c = Point::new(200.0, 200.0);
    let below = Point::new(200.0, 230.0);
    assert!(hit_test(ShapeKind::Square, c, 40.0, below));
    assert!(!hit_test(ShapeKind::Rectangle, c, 40.0, below));
  }

  #[test]
  fn pointy_shapes_use_bounding_box() {
    let c = Point::new(300.0, 300.0);
    // Corner of the triangle's box lies outside the triangle itself but still counts.
    assert!(hit_test(ShapeKind::Triangle, c, 50.0, Point::new(255.0, 255.0)));
    assert!(hit_test(ShapeKind::Diamond, c, 50.0, Point::new(340.0, 340.0)));
    assert!(!hit_test(ShapeKind::Star, c, 50.0, Point::new(300.0, 360.0)));
    assert!(hit_test(ShapeKind::Star, c, 50.0, Point::new(300.0, 255.0)));
  }

  #[test]
  fn star_has_ten_points_with_top_tip() {
    let pts = star_points(Point::new(0.0, 0.0), 10.0, 0.0);
    assert_eq!(pts.len(), 10);
    assert!((pts[0].x).abs() < 1e-4);
    assert!((pts[0].y + 10.0).abs() < 1e-4);
  }
}

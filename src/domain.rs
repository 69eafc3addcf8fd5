//! Domain models used by the activity engine: challenges, their targets, and
//! the small value types (shapes, colors, points) they are built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which mini-game produced a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
  /// Count the objects on screen and pick the matching number.
  Counting,
  /// Press the key of the letter shown (with next/previous navigation).
  Letter,
  /// Click every shape of the requested kind.
  ShapeFind,
  /// Turn over two cards at a time until every pair is found.
  PairMatch,
}

impl fmt::Display for ChallengeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ChallengeKind::Counting => "counting",
      ChallengeKind::Letter => "letter",
      ChallengeKind::ShapeFind => "shape_find",
      ChallengeKind::PairMatch => "pair_match",
    };
    f.write_str(s)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
  Circle,
  Square,
  Triangle,
  Star,
  Rectangle,
  Diamond,
}

impl ShapeKind {
  pub fn name(self) -> &'static str {
    match self {
      ShapeKind::Circle => "circle",
      ShapeKind::Square => "square",
      ShapeKind::Triangle => "triangle",
      ShapeKind::Star => "star",
      ShapeKind::Rectangle => "rectangle",
      ShapeKind::Diamond => "diamond",
    }
  }
}

impl fmt::Display for ShapeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

impl Rgb {
  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b }
  }

  /// Blend halfway towards white. Used for dimmed (resolved) cards.
  pub fn dimmed(self) -> Self {
    let mix = |c: u8| ((c as u16 + 255) / 2) as u8;
    Self::new(mix(self.r), mix(self.g), mix(self.b))
  }
}

/// A point in virtual screen coordinates (see `layout::SCREEN_WIDTH`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f32,
  pub y: f32,
}

impl Point {
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  pub fn distance(self, other: Point) -> f32 {
    ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
  }
}

/// What a target looks like on screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualKind {
  Shape { shape: ShapeKind },
  Letter { letter: char },
  Word { text: String },
  /// A face-down/face-up card whose face shows the payload tag.
  Card,
}

/// The value a target is compared by.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Payload {
  /// Decorative object that only exists to be counted.
  Counted,
  Shape(ShapeKind),
  Letter(char),
  /// Pair-match item: a shape, color or animal name.
  Tag(String),
  None,
}

/// The value that satisfies a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
  Count(u32),
  Letter(char),
  Shape(ShapeKind),
  /// No single value; pair-match validates each pair by payload equality.
  Pairs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetState {
  Active,
  Selected,
  Resolved,
  Hidden,
}

/// One on-screen, clickable element belonging to a challenge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
  pub id: TargetId,
  pub position: Point,
  pub visual: VisualKind,
  pub payload: Payload,
  pub color: Rgb,
  pub size: f32,
  pub state: TargetState,
}

impl Target {
  pub fn shape_kind(&self) -> Option<ShapeKind> {
    match self.visual {
      VisualKind::Shape { shape } => Some(shape),
      _ => None,
    }
  }

  pub fn is_active(&self) -> bool {
    self.state == TargetState::Active
  }
}

/// One question instance. `targets` is kept in display order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
  pub id: String,
  pub kind: ChallengeKind,
  pub prompt: String,
  pub targets: Vec<Target>,
  pub expected: Answer,
  /// Counting only: the answer options shown as buttons, already shuffled.
  #[serde(default)]
  pub options: Vec<u32>,
}

impl Challenge {
  pub fn target(&self, id: TargetId) -> Option<&Target> {
    self.targets.iter().find(|t| t.id == id)
  }

  pub fn target_mut(&mut self, id: TargetId) -> Option<&mut Target> {
    self.targets.iter_mut().find(|t| t.id == id)
  }

  pub fn set_state(&mut self, id: TargetId, state: TargetState) {
    if let Some(t) = self.target_mut(id) {
      t.state = state;
    }
  }
}

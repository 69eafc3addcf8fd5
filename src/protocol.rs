//! Contracts with the engine's collaborators: input events coming in, draw
//! commands going out to a renderer, and fire-and-forget audio cues.
//! Keep this small and stable so shells can evolve independently.

use serde::{Deserialize, Serialize};

use crate::domain::{Point, Rgb};
use crate::geometry::Rect;

/// Milliseconds on the caller's monotonic clock.
pub type Millis = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
  PointerDown,
  PointerUp,
  PointerMove,
  KeyDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Key {
  Char(char),
  Escape,
  Enter,
  Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
  pub kind: InputKind,
  #[serde(default)]
  pub position: Option<Point>,
  #[serde(default)]
  pub key: Option<Key>,
  pub timestamp: Millis,
}

impl InputEvent {
  pub fn pointer_down(x: f32, y: f32, timestamp: Millis) -> Self {
    Self { kind: InputKind::PointerDown, position: Some(Point::new(x, y)), key: None, timestamp }
  }

  pub fn key_down(key: Key, timestamp: Millis) -> Self {
    Self { kind: InputKind::KeyDown, position: None, key: Some(key), timestamp }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
  Center,
  TopLeft,
}

/// One draw primitive. A frame is a `Vec<DrawCommand>` painted in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
  Clear { color: Rgb },
  Circle { center: Point, radius: f32, color: Rgb },
  Rect { rect: Rect, color: Rgb, corner_radius: f32, outline: Option<Rgb> },
  Polygon { points: Vec<Point>, color: Rgb },
  Text { at: Point, anchor: TextAnchor, text: String, size: f32, color: Rgb },
}

pub trait Renderer {
  fn render(&mut self, commands: &[DrawCommand]);
}

/// What kind of sound to play. Positive/Negative follow the answer outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
  Positive,
  Negative,
  Click,
}

/// Audio/speech output. Fire-and-forget; the engine never reads a result.
pub trait FeedbackSink {
  fn play(&mut self, cue: AudioCue, spoken: Option<&str>);
}

/// Sink for silent runs.
#[derive(Debug, Default)]
pub struct Silent;

impl FeedbackSink for Silent {
  fn play(&mut self, _cue: AudioCue, _spoken: Option<&str>) {}
}

//! Turn an `EngineState` into one frame of draw commands.

use crate::activities::ChallengeStrategy;
use crate::config::Messages;
use crate::domain::{ChallengeKind, Payload, Point, Rgb, ShapeKind, Target, TargetState, VisualKind};
use crate::geometry::{box_of, card_rect, outline, star_points, Rect};
use crate::layout::{option_buttons, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::protocol::{DrawCommand, TextAnchor};
use crate::seeds::{BLACK, CARD_BACK, DARK_BLUE, GREEN, LIGHT_BLUE, RED, WHITE};
use crate::state::{EngineState, Tone};
use crate::util::{capitalize, fill_template};

const BACKGROUND: Rgb = Rgb::new(245, 250, 255);

fn text(at: Point, s: impl Into<String>, size: f32, color: Rgb) -> DrawCommand {
  DrawCommand::Text { at, anchor: TextAnchor::Center, text: s.into(), size, color }
}

fn button(rect: Rect, fill: Rgb, label: String, size: f32) -> [DrawCommand; 2] {
  [
    DrawCommand::Rect { rect, color: fill, corner_radius: 10.0, outline: Some(BLACK) },
    text(rect.center(), label, size, BLACK),
  ]
}

fn shape(kind: ShapeKind, c: Point, size: f32, color: Rgb) -> DrawCommand {
  match kind {
    ShapeKind::Circle => DrawCommand::Circle { center: c, radius: size, color },
    ShapeKind::Square | ShapeKind::Rectangle => DrawCommand::Rect {
      rect: box_of(kind, c, size).unwrap_or(Rect::new(c.x, c.y, 0.0, 0.0)),
      color,
      corner_radius: 0.0,
      outline: None,
    },
    ShapeKind::Triangle | ShapeKind::Star | ShapeKind::Diamond => {
      DrawCommand::Polygon { points: outline(kind, c, size), color }
    }
  }
}

fn card(t: &Target, out: &mut Vec<DrawCommand>) {
  let rect = card_rect(t.position, t.size);
  let tag = match &t.payload {
    Payload::Tag(s) => capitalize(s),
    _ => String::new(),
  };
  match t.state {
    TargetState::Active => {
      out.push(DrawCommand::Rect { rect, color: CARD_BACK, corner_radius: 12.0, outline: Some(BLACK) });
      out.push(text(rect.center(), "?", 48.0, WHITE));
    }
    TargetState::Selected => {
      out.push(DrawCommand::Rect { rect: rect.inflate(8.0, 8.0), color: BLACK, corner_radius: 14.0, outline: None });
      out.push(DrawCommand::Rect { rect, color: t.color, corner_radius: 12.0, outline: Some(BLACK) });
      out.push(text(rect.center(), tag, 24.0, BLACK));
    }
    TargetState::Resolved => {
      out.push(DrawCommand::Rect { rect, color: t.color.dimmed(), corner_radius: 12.0, outline: None });
      out.push(text(rect.center(), tag, 24.0, Rgb::new(120, 120, 120)));
    }
    TargetState::Hidden => {}
  }
}

fn target(t: &Target, out: &mut Vec<DrawCommand>) {
  match &t.visual {
    VisualKind::Shape { shape: kind } => {
      // Found shapes leave the board.
      if t.is_active() {
        out.push(shape(*kind, t.position, t.size, t.color));
      }
    }
    VisualKind::Letter { letter } => out.push(text(t.position, letter.to_string(), t.size, t.color)),
    VisualKind::Word { text: word } => {
      if t.state != TargetState::Hidden {
        out.push(text(t.position, word.clone(), t.size, t.color));
      }
    }
    VisualKind::Card => card(t, out),
  }
}

fn feedback_anchor(kind: ChallengeKind) -> Point {
  match kind {
    ChallengeKind::Counting => Point::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
    ChallengeKind::Letter => Point::new(SCREEN_WIDTH / 2.0, 150.0),
    ChallengeKind::ShapeFind | ChallengeKind::PairMatch => Point::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - 100.0),
  }
}

/// Build one frame. The first command always clears the screen.
pub fn frame(strategy: &dyn ChallengeStrategy, state: &EngineState, messages: &Messages) -> Vec<DrawCommand> {
  let mut out = vec![DrawCommand::Clear { color: BACKGROUND }];
  out.push(text(Point::new(SCREEN_WIDTH / 2.0, 50.0), strategy.title(), 48.0, DARK_BLUE));

  if let Some(ch) = state.challenge() {
    out.push(text(Point::new(SCREEN_WIDTH / 2.0, 100.0), ch.prompt.clone(), 36.0, BLACK));
    for t in &ch.targets {
      target(t, &mut out);
    }
    for (rect, value) in option_buttons(ch.options.len()).into_iter().zip(&ch.options) {
      out.extend(button(rect, LIGHT_BLUE, value.to_string(), 36.0));
    }
  }

  for c in strategy.controls() {
    out.extend(button(c.rect, c.color, c.label, 28.0));
  }

  let score = state.score().to_string();
  out.push(DrawCommand::Text {
    at: Point::new(140.0, 28.0),
    anchor: TextAnchor::TopLeft,
    text: fill_template(&messages.score_label, &[("score", &score)]),
    size: 36.0,
    color: BLACK,
  });

  if let Some(f) = state.feedback() {
    let at = feedback_anchor(strategy.kind());
    let color = match f.tone {
      Tone::Positive => GREEN,
      Tone::Negative => RED,
    };
    let width = f.message.chars().count() as f32 * 22.0 + 40.0;
    out.push(DrawCommand::Rect {
      rect: Rect::new(at.x - width / 2.0, at.y - 35.0, width, 70.0),
      color: WHITE,
      corner_radius: 10.0,
      outline: Some(BLACK),
    });
    out.push(text(at, f.message.clone(), 48.0, color));
  }

  for s in state.sparkles() {
    out.push(DrawCommand::Polygon { points: star_points(s.position, s.size, s.angle), color: s.color });
  }
  out
}

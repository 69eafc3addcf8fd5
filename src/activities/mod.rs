//! Challenge strategies: one per mini-game.
//!
//! The engine owns the question lifecycle (scoring, feedback, timers, the pair
//! buffer); a strategy only knows how to build a challenge of its kind, how to
//! judge a selection against it and when it has been fully solved.

use std::sync::Arc;

use rand::rngs::StdRng;

use crate::config::ActivityConfig;
use crate::domain::{Challenge, ChallengeKind, Point, Rgb, TargetId};
use crate::geometry::Rect;

pub mod counting;
pub mod letters;
pub mod pairs;
pub mod shapes;

pub use counting::CountingStrategy;
pub use letters::LetterStrategy;
pub use pairs::PairStrategy;
pub use shapes::ShapeFindStrategy;

/// How a new challenge relates to the previous one. Only the letter activity
/// distinguishes the three; the others always build a fresh random challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
  Fresh,
  Forward,
  Backward,
}

/// What the user picked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Selection {
  /// A counting answer button.
  Option(u32),
  Target { id: TargetId, at: Point },
  Key(char),
  /// Two buffered pair-match picks, compared once the inspection delay is over.
  Pair(TargetId, TargetId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
  /// One selection is judged immediately.
  Single,
  /// Selections are buffered two at a time and judged together.
  Pair,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterCorrect {
  /// Schedule the next challenge after `delay_ms`.
  NextChallenge { advance: Advance, delay_ms: u64 },
  /// Stay on this challenge unless nothing is left to solve.
  CheckComplete,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Verdict {
  /// Not a selection this activity understands; no feedback, no state change.
  Ignored,
  Correct { message: String, resolve: Option<TargetId>, then: AfterCorrect },
  Incorrect { message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
  Previous,
  Next,
  ToggleWord,
  NewGame,
}

/// An on-screen button that is not part of the challenge itself.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlButton {
  pub control: Control,
  pub rect: Rect,
  pub label: String,
  pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ControlEffect {
  Regenerate(Advance),
  Award { points: u32, message: String },
  /// The challenge changed in place; nothing to score.
  Changed,
  Nothing,
}

pub trait ChallengeStrategy: Send {
  fn kind(&self) -> ChallengeKind;

  fn title(&self) -> &str;

  /// Mascot line shown when the activity opens.
  fn greeting(&self) -> &str;

  fn mode(&self) -> SelectionMode {
    SelectionMode::Single
  }

  fn generate(&mut self, advance: Advance, rng: &mut StdRng) -> Challenge;

  fn validate(&self, challenge: &Challenge, selection: &Selection) -> Verdict;

  /// True once nothing in `challenge` is left to solve.
  fn is_complete(&self, _challenge: &Challenge) -> bool {
    false
  }

  fn completion_message(&self, _challenge: &Challenge) -> String {
    String::new()
  }

  fn controls(&self) -> Vec<ControlButton> {
    Vec::new()
  }

  fn on_control(&mut self, _challenge: &mut Challenge, _control: Control) -> ControlEffect {
    ControlEffect::Nothing
  }

  fn sparkles_per_win(&self) -> usize {
    5
  }
}

/// Build the strategy for `kind`.
pub fn strategy_for(kind: ChallengeKind, config: Arc<ActivityConfig>) -> Box<dyn ChallengeStrategy> {
  match kind {
    ChallengeKind::Counting => Box::new(CountingStrategy::new(config)),
    ChallengeKind::Letter => Box::new(LetterStrategy::new(config)),
    ChallengeKind::ShapeFind => Box::new(ShapeFindStrategy::new(config)),
    ChallengeKind::PairMatch => Box::new(PairStrategy::new(config)),
  }
}

pub(crate) fn new_challenge_id() -> String {
  uuid::Uuid::new_v4().to_string()
}

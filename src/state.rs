//! Engine state: the live challenge, score, feedback and the single pending
//! transition of one activity instance.
//!
//! The owning screen holds an `EngineState` and passes it into every engine
//! call. Dropping it drops any scheduled transition with it; nothing else
//! keeps a handle that could fire later.

use rand::Rng;

use crate::activities::Advance;
use crate::domain::{Challenge, Point, Rgb, TargetId};
use crate::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::protocol::Millis;
use crate::seeds::SPARKLE_COLORS;

/// Outcome-derived tone of a feedback message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
  Positive,
  Negative,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Feedback {
  pub message: String,
  pub tone: Tone,
  pub remaining_ticks: u32,
}

/// A deferred state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
  NextChallenge(Advance),
  /// Compare the two buffered pair-match picks.
  ResolvePair,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingAdvance {
  pub transition: Transition,
  pub due: Millis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  AwaitingInput,
  Evaluating,
  ShowingFeedback,
  Advancing,
}

/// Celebration particle. Purely presentational.
#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
  pub position: Point,
  pub size: f32,
  pub color: Rgb,
  pub angle: f32,
  speed: f32,
  direction: f32,
  ticks_left: u32,
}

impl Sparkle {
  pub fn spawn<R: Rng + ?Sized>(rng: &mut R, at: Point, lifetime: u32) -> Self {
    Self {
      position: at,
      size: rng.gen_range(15..=30) as f32,
      color: SPARKLE_COLORS[rng.gen_range(0..SPARKLE_COLORS.len())],
      angle: 0.0,
      speed: rng.gen_range(1.0..3.0),
      direction: rng.gen_range(0.0..std::f32::consts::TAU),
      ticks_left: lifetime,
    }
  }

  /// Drift one tick, bouncing off the screen edges. Returns false once expired.
  fn step(&mut self) -> bool {
    self.angle += 0.05;
    self.position.x += self.speed * self.direction.cos();
    self.position.y += self.speed * self.direction.sin();
    if self.position.x < 0.0 || self.position.x > SCREEN_WIDTH {
      self.direction = std::f32::consts::PI - self.direction;
    }
    if self.position.y < 0.0 || self.position.y > SCREEN_HEIGHT {
      self.direction = -self.direction;
    }
    self.ticks_left = self.ticks_left.saturating_sub(1);
    self.ticks_left > 0
  }
}

#[derive(Clone, Debug, Default)]
pub struct EngineState {
  pub(crate) challenge: Option<Challenge>,
  score: u32,
  feedback: Option<Feedback>,
  pending: Option<PendingAdvance>,
  selection: Vec<TargetId>,
  sparkles: Vec<Sparkle>,
  /// Number of challenges generated so far.
  generation: u64,
}

impl EngineState {
  pub fn challenge(&self) -> Option<&Challenge> {
    self.challenge.as_ref()
  }

  pub fn score(&self) -> u32 {
    self.score
  }

  pub fn feedback(&self) -> Option<&Feedback> {
    self.feedback.as_ref()
  }

  pub fn pending(&self) -> Option<&PendingAdvance> {
    self.pending.as_ref()
  }

  pub fn selection(&self) -> &[TargetId] {
    &self.selection
  }

  pub fn sparkles(&self) -> &[Sparkle] {
    &self.sparkles
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn phase(&self) -> Phase {
    match self.pending.map(|p| p.transition) {
      Some(Transition::ResolvePair) => Phase::Evaluating,
      Some(Transition::NextChallenge(_)) => Phase::Advancing,
      None if self.feedback.is_some() => Phase::ShowingFeedback,
      None => Phase::AwaitingInput,
    }
  }

  /// Score only ever goes up.
  pub(crate) fn award(&mut self, points: u32) {
    self.score = self.score.saturating_add(points);
  }

  /// Last write wins; any earlier message is dropped.
  pub(crate) fn set_feedback(&mut self, message: String, tone: Tone, ticks: u32) {
    self.feedback = Some(Feedback { message, tone, remaining_ticks: ticks });
  }

  /// Schedule `transition`, replacing whatever was pending. Returns the replaced entry.
  pub(crate) fn schedule(&mut self, transition: Transition, due: Millis) -> Option<PendingAdvance> {
    self.pending.replace(PendingAdvance { transition, due })
  }

  pub(crate) fn cancel_pending(&mut self) -> Option<PendingAdvance> {
    self.pending.take()
  }

  /// Removes and returns the pending transition if it is due at `now`.
  pub(crate) fn take_due(&mut self, now: Millis) -> Option<Transition> {
    match self.pending {
      Some(p) if now >= p.due => {
        self.pending = None;
        Some(p.transition)
      }
      _ => None,
    }
  }

  pub(crate) fn install(&mut self, challenge: Challenge) {
    self.challenge = Some(challenge);
    self.selection.clear();
    self.generation += 1;
  }

  pub(crate) fn selection_mut(&mut self) -> &mut Vec<TargetId> {
    &mut self.selection
  }

  pub(crate) fn challenge_mut(&mut self) -> Option<&mut Challenge> {
    self.challenge.as_mut()
  }

  pub(crate) fn celebrate<R: Rng + ?Sized>(&mut self, rng: &mut R, at: Point, count: usize, lifetime: u32) {
    for _ in 0..count {
      self.sparkles.push(Sparkle::spawn(rng, at, lifetime));
    }
  }

  /// Advance timers that count frames rather than wall-clock time.
  pub(crate) fn tick(&mut self) {
    if let Some(f) = &mut self.feedback {
      f.remaining_ticks = f.remaining_ticks.saturating_sub(1);
      if f.remaining_ticks == 0 {
        self.feedback = None;
      }
    }
    self.sparkles.retain_mut(Sparkle::step);
  }
}

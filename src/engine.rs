//! Activity engine: drives one mini-game through its question lifecycle.
//!
//! The engine owns the strategy, the rng and the audio sink; the caller owns
//! the `EngineState` and hands it to every call. All timing is explicit:
//! `on_input` and `update` receive the caller's clock, and the only deferred
//! work is the single `PendingAdvance` stored in the state.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

use crate::activities::{
  strategy_for, Advance, AfterCorrect, ChallengeStrategy, Control, ControlEffect, Selection, SelectionMode, Verdict,
};
use crate::config::{ActivityConfig, ConfigError};
use crate::domain::{ChallengeKind, Point, TargetId, TargetState};
use crate::geometry::target_contains;
use crate::layout::{option_buttons, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::protocol::{AudioCue, DrawCommand, FeedbackSink, InputEvent, InputKind, Key, Millis, Renderer};
use crate::render;
use crate::state::{EngineState, Phase, Tone, Transition};

pub struct ActivityEngine {
  strategy: Box<dyn ChallengeStrategy>,
  config: Arc<ActivityConfig>,
  rng: StdRng,
  audio: Box<dyn FeedbackSink>,
}

impl ActivityEngine {
  /// Engine for `kind`. Uses `config.seed` when set, otherwise OS entropy.
  /// Fails if `config` does not pass `ActivityConfig::validate`.
  pub fn new(
    kind: ChallengeKind,
    config: Arc<ActivityConfig>,
    audio: Box<dyn FeedbackSink>,
  ) -> Result<Self, ConfigError> {
    let rng = match config.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    };
    Self::with_strategy(strategy_for(kind, config.clone()), config, rng, audio)
  }

  pub fn with_strategy(
    strategy: Box<dyn ChallengeStrategy>,
    config: Arc<ActivityConfig>,
    rng: StdRng,
    audio: Box<dyn FeedbackSink>,
  ) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self { strategy, config, rng, audio })
  }

  pub fn kind(&self) -> ChallengeKind {
    self.strategy.kind()
  }

  pub fn strategy(&self) -> &dyn ChallengeStrategy {
    self.strategy.as_ref()
  }

  /// Fresh state holding the first challenge and the activity's greeting.
  #[instrument(level = "info", skip(self), fields(kind = %self.strategy.kind()))]
  pub fn start(&mut self) -> EngineState {
    let mut state = EngineState::default();
    self.regenerate(&mut state, Advance::Fresh);
    let greeting = self.strategy.greeting();
    if !greeting.is_empty() {
      state.set_feedback(greeting.to_string(), Tone::Positive, self.config.timing.celebration_ticks);
    }
    state
  }

  /// Feed one input event. Returns true if the event was consumed.
  #[instrument(level = "debug", skip(self, state), fields(kind = %self.strategy.kind()))]
  pub fn on_input(&mut self, state: &mut EngineState, event: &InputEvent) -> bool {
    let now = event.timestamp;
    match (event.kind, event.position, event.key) {
      (InputKind::PointerDown, Some(at), _) => self.on_pointer(state, at, now),
      (InputKind::KeyDown, _, Some(Key::Char(c))) => self.select(state, Selection::Key(c), None, now),
      _ => false,
    }
  }

  /// Advance frame-counted timers by one tick and fire the pending transition
  /// if it is due at `now`.
  pub fn update(&mut self, state: &mut EngineState, now: Millis) {
    state.tick();
    match state.take_due(now) {
      Some(Transition::NextChallenge(advance)) => self.regenerate(state, advance),
      Some(Transition::ResolvePair) => self.resolve_pair(state, now),
      None => {}
    }
  }

  pub fn render(&self, state: &EngineState) -> Vec<DrawCommand> {
    render::frame(self.strategy.as_ref(), state, &self.config.messages)
  }

  pub fn draw(&self, state: &EngineState, renderer: &mut dyn Renderer) {
    renderer.render(&self.render(state));
  }

  fn on_pointer(&mut self, state: &mut EngineState, at: Point, now: Millis) -> bool {
    if let Some(button) = self.strategy.controls().into_iter().find(|b| b.rect.contains(at)) {
      return self.apply_control(state, button.control);
    }
    let Some(ch) = state.challenge() else {
      return false;
    };

    let option = option_buttons(ch.options.len())
      .into_iter()
      .zip(&ch.options)
      .find(|(rect, _)| rect.contains(at))
      .map(|(_, value)| *value);
    if let Some(value) = option {
      return self.select(state, Selection::Option(value), Some(at), now);
    }

    // First match in display order wins.
    let hit = ch
      .targets
      .iter()
      .find(|t| matches!(t.state, TargetState::Active | TargetState::Selected) && target_contains(t, at))
      .map(|t| t.id);
    let Some(id) = hit else {
      return false;
    };
    match self.strategy.mode() {
      SelectionMode::Single => self.select(state, Selection::Target { id, at }, Some(at), now),
      SelectionMode::Pair => self.pick(state, id, now),
    }
  }

  fn select(&mut self, state: &mut EngineState, selection: Selection, at: Option<Point>, now: Millis) -> bool {
    let Some(ch) = state.challenge() else {
      return false;
    };
    match self.strategy.validate(ch, &selection) {
      Verdict::Ignored => false,
      _ if state.phase() == Phase::Advancing => {
        debug!(target: "activity", ?selection, "Answer while advancing; ignored.");
        true
      }
      Verdict::Correct { message, resolve, then } => {
        if let Some(id) = resolve {
          if let Some(ch) = state.challenge_mut() {
            ch.set_state(id, TargetState::Resolved);
          }
        }
        self.on_correct(state, message, then, at, 1, now);
        true
      }
      Verdict::Incorrect { message } => {
        self.on_incorrect(state, message);
        true
      }
    }
  }

  fn on_correct(
    &mut self,
    state: &mut EngineState,
    message: String,
    then: AfterCorrect,
    at: Option<Point>,
    points: u32,
    now: Millis,
  ) {
    state.award(points);
    info!(target: "activity", kind = %self.strategy.kind(), points, score = state.score(), "Correct answer.");

    let ticks = self.config.timing.feedback_ticks;
    self.announce(state, message, Tone::Positive, ticks);
    let origin = at.unwrap_or(Point::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0));
    let (count, lifetime) = (self.strategy.sparkles_per_win(), self.config.timing.sparkle_ticks);
    state.celebrate(&mut self.rng, origin, count, lifetime);

    match then {
      AfterCorrect::NextChallenge { advance, delay_ms } => {
        self.schedule(state, Transition::NextChallenge(advance), now + delay_ms)
      }
      AfterCorrect::CheckComplete => self.check_complete(state, now),
    }
  }

  fn on_incorrect(&mut self, state: &mut EngineState, message: String) {
    debug!(target: "activity", kind = %self.strategy.kind(), %message, "Incorrect answer.");
    let ticks = self.config.timing.feedback_ticks;
    self.announce(state, message, Tone::Negative, ticks);
  }

  /// Once nothing is left to solve, celebrate and schedule a fresh challenge.
  fn check_complete(&mut self, state: &mut EngineState, now: Millis) {
    let Some(message) =
      state.challenge().filter(|c| self.strategy.is_complete(c)).map(|c| self.strategy.completion_message(c))
    else {
      return;
    };
    info!(target: "activity", kind = %self.strategy.kind(), score = state.score(), "Challenge complete.");

    let timing = &self.config.timing;
    let (ticks, lifetime, delay) = (timing.celebration_ticks, timing.sparkle_ticks, timing.complete_delay_ms);
    self.announce(state, message, Tone::Positive, ticks);
    let center = Point::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
    state.celebrate(&mut self.rng, center, self.strategy.sparkles_per_win() * 2, lifetime);
    self.schedule(state, Transition::NextChallenge(Advance::Fresh), now + delay);
  }

  /// Buffer one pair-match pick. The pair is judged once the inspection delay
  /// after the second pick has passed.
  fn pick(&mut self, state: &mut EngineState, id: TargetId, now: Millis) -> bool {
    if state.phase() == Phase::Advancing {
      return true;
    }
    if state.selection().len() >= 2 {
      debug!(target: "activity", ?id, "Third pick while a pair is pending; ignored.");
      return true;
    }
    let Some(target) = state.challenge_mut().and_then(|c| c.target_mut(id)) else {
      return false;
    };
    if target.state != TargetState::Active {
      return true;
    }
    target.state = TargetState::Selected;
    state.selection_mut().push(id);
    self.audio.play(AudioCue::Click, None);

    if state.selection().len() == 2 {
      let due = now + self.config.pairs.inspection_ms;
      self.schedule(state, Transition::ResolvePair, due);
    }
    true
  }

  #[instrument(level = "debug", skip(self, state), fields(picks = state.selection().len()))]
  fn resolve_pair(&mut self, state: &mut EngineState, now: Millis) {
    let picks = std::mem::take(state.selection_mut());
    let &[a, b] = picks.as_slice() else {
      Self::flip_back(state, &picks);
      return;
    };
    let Some(ch) = state.challenge() else {
      return;
    };
    let midpoint = match (ch.target(a), ch.target(b)) {
      (Some(ta), Some(tb)) => Some(Point::new((ta.position.x + tb.position.x) / 2.0, (ta.position.y + tb.position.y) / 2.0)),
      _ => None,
    };

    match self.strategy.validate(ch, &Selection::Pair(a, b)) {
      Verdict::Correct { message, then, .. } => {
        if let Some(ch) = state.challenge_mut() {
          ch.set_state(a, TargetState::Resolved);
          ch.set_state(b, TargetState::Resolved);
        }
        self.on_correct(state, message, then, midpoint, 2, now);
      }
      Verdict::Incorrect { message } => {
        Self::flip_back(state, &picks);
        self.on_incorrect(state, message);
      }
      Verdict::Ignored => Self::flip_back(state, &picks),
    }
  }

  fn flip_back(state: &mut EngineState, picks: &[TargetId]) {
    if let Some(ch) = state.challenge_mut() {
      for id in picks {
        ch.set_state(*id, TargetState::Active);
      }
    }
  }

  fn apply_control(&mut self, state: &mut EngineState, control: Control) -> bool {
    let Some(ch) = state.challenge_mut() else {
      return false;
    };
    let effect = self.strategy.on_control(ch, control);
    if effect == ControlEffect::Nothing {
      return false;
    }
    debug!(target: "activity", ?control, "Control pressed.");
    self.audio.play(AudioCue::Click, None);
    match effect {
      ControlEffect::Regenerate(advance) => self.regenerate(state, advance),
      ControlEffect::Award { points, message } => {
        state.award(points);
        let (ticks, lifetime) = (self.config.timing.feedback_ticks, self.config.timing.sparkle_ticks);
        self.announce(state, message, Tone::Positive, ticks);
        let center = Point::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        state.celebrate(&mut self.rng, center, self.strategy.sparkles_per_win(), lifetime);
      }
      ControlEffect::Changed | ControlEffect::Nothing => {}
    }
    true
  }

  /// Replace the challenge now. Any scheduled transition and buffered picks
  /// belong to the old challenge and are dropped.
  #[instrument(level = "debug", skip(self, state), fields(kind = %self.strategy.kind()))]
  fn regenerate(&mut self, state: &mut EngineState, advance: Advance) {
    if let Some(cancelled) = state.cancel_pending() {
      debug!(target: "activity", ?cancelled, "Dropped pending transition.");
    }
    let challenge = self.strategy.generate(advance, &mut self.rng);
    info!(
      target: "activity",
      kind = %challenge.kind,
      id = %challenge.id,
      targets = challenge.targets.len(),
      ?advance,
      "New challenge."
    );
    state.install(challenge);
  }

  fn schedule(&mut self, state: &mut EngineState, transition: Transition, due: Millis) {
    if let Some(replaced) = state.schedule(transition, due) {
      debug!(target: "activity", ?replaced, ?transition, due, "Replaced pending transition.");
    }
  }

  fn announce(&mut self, state: &mut EngineState, message: String, tone: Tone, ticks: u32) {
    let cue = match tone {
      Tone::Positive => AudioCue::Positive,
      Tone::Negative => AudioCue::Negative,
    };
    let spoken = self.config.audio.speak_feedback.then_some(message.as_str());
    self.audio.play(cue, spoken);
    state.set_feedback(message, tone, ticks);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Answer, Challenge, Payload, Rgb, ShapeKind, Target, VisualKind};
  use crate::layout::{next_button, previous_button, word_button};
  use crate::protocol::recording::Recording;
  use crate::protocol::Silent;

  fn config() -> ActivityConfig {
    ActivityConfig { seed: Some(42), ..ActivityConfig::default() }
  }

  fn engine(kind: ChallengeKind) -> ActivityEngine {
    ActivityEngine::new(kind, Arc::new(config()), Box::new(Silent)).expect("engine")
  }

  fn click(engine: &mut ActivityEngine, state: &mut EngineState, at: Point, now: Millis) -> bool {
    engine.on_input(state, &InputEvent::pointer_down(at.x, at.y, now))
  }

  fn pick_option(engine: &mut ActivityEngine, state: &mut EngineState, value: u32, now: Millis) -> bool {
    let at = option_center(state, value);
    click(engine, state, at, now)
  }

  fn pick_card(engine: &mut ActivityEngine, state: &mut EngineState, idx: usize, now: Millis) -> bool {
    let at = card_center(state, idx);
    click(engine, state, at, now)
  }

  fn shape(id: u32, kind: ShapeKind, x: f32, y: f32) -> Target {
    Target {
      id: TargetId(id),
      position: Point::new(x, y),
      visual: VisualKind::Shape { shape: kind },
      payload: Payload::Shape(kind),
      color: Rgb::new(255, 0, 0),
      size: 50.0,
      state: TargetState::Active,
    }
  }

  fn counting_five() -> Challenge {
    Challenge {
      id: "counting-five".into(),
      kind: ChallengeKind::Counting,
      prompt: "How many balls do you see?".into(),
      targets: (0..5).map(|i| shape(i, ShapeKind::Circle, 150.0 + i as f32 * 120.0, 300.0)).collect(),
      expected: Answer::Count(5),
      options: vec![6, 3, 7, 5],
    }
  }

  fn option_center(state: &EngineState, value: u32) -> Point {
    let ch = state.challenge().expect("challenge");
    let idx = ch.options.iter().position(|v| *v == value).expect("option");
    option_buttons(ch.options.len())[idx].center()
  }

  #[test]
  fn correct_count_scores_and_advances_after_delay() {
    let mut e = engine(ChallengeKind::Counting);
    let mut st = e.start();
    st.install(counting_five());

    assert!(pick_option(&mut e, &mut st, 5, 1_000));
    assert_eq!(st.score(), 1);
    let f = st.feedback().expect("feedback");
    assert_eq!(f.tone, Tone::Positive);
    assert_eq!(f.message, "Correct! Great job!");
    assert_eq!(st.phase(), Phase::Advancing);
    assert_eq!(st.pending().map(|p| p.due), Some(3_000));

    e.update(&mut st, 2_999);
    assert_eq!(st.challenge().map(|c| c.id.as_str()), Some("counting-five"));
    e.update(&mut st, 3_000);
    assert_ne!(st.challenge().map(|c| c.id.as_str()), Some("counting-five"));
    assert!(st.pending().is_none());
    assert_eq!(st.score(), 1);
  }

  #[test]
  fn wrong_count_gives_negative_feedback_only() {
    let mut e = engine(ChallengeKind::Counting);
    let mut st = e.start();
    st.install(counting_five());

    assert!(pick_option(&mut e, &mut st, 3, 10));
    assert_eq!(st.score(), 0);
    assert_eq!(st.feedback().map(|f| f.tone), Some(Tone::Negative));
    assert!(st.pending().is_none());
    assert_eq!(st.phase(), Phase::ShowingFeedback);
  }

  #[test]
  fn answers_while_advancing_are_swallowed() {
    let mut e = engine(ChallengeKind::Counting);
    let mut st = e.start();
    st.install(counting_five());

    pick_option(&mut e, &mut st, 5, 0);
    let due = st.pending().map(|p| p.due);
    assert!(pick_option(&mut e, &mut st, 5, 100));
    assert!(pick_option(&mut e, &mut st, 3, 200));
    assert_eq!(st.score(), 1);
    assert_eq!(st.feedback().map(|f| f.tone), Some(Tone::Positive));
    assert_eq!(st.pending().map(|p| p.due), due);
  }

  #[test]
  fn stray_input_is_not_consumed() {
    let mut e = engine(ChallengeKind::Counting);
    let mut st = e.start();
    st.install(counting_five());
    assert!(!click(&mut e, &mut st, Point::new(5.0, SCREEN_HEIGHT - 5.0), 0));
    assert!(!e.on_input(&mut st, &InputEvent::key_down(Key::Char('5'), 0)));
    assert!(!e.on_input(&mut st, &InputEvent::key_down(Key::Escape, 0)));
    assert_eq!(st.feedback().map(|f| f.message.as_str()), Some("Let's count together!"));
    assert_eq!(st.score(), 0);
  }

  fn letter(st: &EngineState) -> Answer {
    st.challenge().map(|c| c.expected).expect("challenge")
  }

  #[test]
  fn next_wraps_from_z_and_hides_the_word() {
    let mut e = engine(ChallengeKind::Letter);
    let mut st = e.start();
    assert_eq!(letter(&st), Answer::Letter('A'));

    click(&mut e, &mut st, previous_button().center(), 0);
    assert_eq!(letter(&st), Answer::Letter('Z'));
    let z_color = st.challenge().map(|c| c.targets[0].color);

    click(&mut e, &mut st, word_button().center(), 10);
    assert!(st.challenge().is_some_and(crate::activities::letters::word_visible));
    assert_eq!(st.score(), 1);

    click(&mut e, &mut st, next_button().center(), 20);
    assert_eq!(letter(&st), Answer::Letter('A'));
    assert_ne!(st.challenge().map(|c| c.targets[0].color), z_color);
    assert!(!st.challenge().is_some_and(crate::activities::letters::word_visible));
  }

  #[test]
  fn hiding_the_word_does_not_score() {
    let mut e = engine(ChallengeKind::Letter);
    let mut st = e.start();
    click(&mut e, &mut st, word_button().center(), 0);
    click(&mut e, &mut st, word_button().center(), 10);
    assert_eq!(st.score(), 1);
    assert!(!st.challenge().is_some_and(crate::activities::letters::word_visible));
  }

  #[test]
  fn navigation_cancels_a_pending_advance() {
    let mut e = engine(ChallengeKind::Letter);
    let mut st = e.start();
    assert!(e.on_input(&mut st, &InputEvent::key_down(Key::Char('a'), 0)));
    assert_eq!(st.phase(), Phase::Advancing);

    click(&mut e, &mut st, next_button().center(), 100);
    assert_eq!(letter(&st), Answer::Letter('B'));
    assert!(st.pending().is_none());

    // The cancelled advance would have been due at 1500.
    e.update(&mut st, 5_000);
    assert_eq!(letter(&st), Answer::Letter('B'));
  }

  #[test]
  fn correct_letter_moves_forward_after_delay() {
    let mut e = engine(ChallengeKind::Letter);
    let mut st = e.start();
    e.on_input(&mut st, &InputEvent::key_down(Key::Char('A'), 0));
    e.update(&mut st, 1_499);
    assert_eq!(letter(&st), Answer::Letter('A'));
    e.update(&mut st, 1_500);
    assert_eq!(letter(&st), Answer::Letter('B'));
    assert_eq!(st.score(), 1);
  }

  fn pair_state(e: &mut ActivityEngine) -> EngineState {
    let mut st = e.start();
    let ch = st.challenge_mut().expect("challenge");
    ch.targets[2].payload = Payload::Tag("circle".into());
    ch.targets[7].payload = Payload::Tag("circle".into());
    st
  }

  fn card_center(st: &EngineState, idx: usize) -> Point {
    st.challenge().expect("challenge").targets[idx].position
  }

  fn card_state(st: &EngineState, idx: usize) -> TargetState {
    st.challenge().expect("challenge").targets[idx].state
  }

  #[test]
  fn matching_pair_resolves_after_inspection() {
    let mut e = engine(ChallengeKind::PairMatch);
    let mut st = pair_state(&mut e);

    assert!(pick_card(&mut e, &mut st, 2, 0));
    assert_eq!(card_state(&st, 2), TargetState::Selected);
    assert!(pick_card(&mut e, &mut st, 7, 100));
    assert_eq!(st.phase(), Phase::Evaluating);
    assert_eq!(st.score(), 0);

    e.update(&mut st, 1_099);
    assert_eq!(card_state(&st, 7), TargetState::Selected);
    e.update(&mut st, 1_100);
    assert_eq!(card_state(&st, 2), TargetState::Resolved);
    assert_eq!(card_state(&st, 7), TargetState::Resolved);
    assert_eq!(st.score(), 2);
    assert!(st.selection().is_empty());
    assert_eq!(st.feedback().map(|f| f.tone), Some(Tone::Positive));
  }

  #[test]
  fn mismatched_pair_flips_back() {
    let mut e = engine(ChallengeKind::PairMatch);
    let mut st = pair_state(&mut e);

    pick_card(&mut e, &mut st, 2, 0);
    pick_card(&mut e, &mut st, 3, 0);
    e.update(&mut st, 1_000);
    assert_eq!(card_state(&st, 2), TargetState::Active);
    assert_eq!(card_state(&st, 3), TargetState::Active);
    assert_eq!(st.score(), 0);
    assert_eq!(st.feedback().map(|f| f.tone), Some(Tone::Negative));
  }

  #[test]
  fn third_pick_and_repicks_are_ignored() {
    let mut e = engine(ChallengeKind::PairMatch);
    let mut st = pair_state(&mut e);

    pick_card(&mut e, &mut st, 2, 0);
    assert!(pick_card(&mut e, &mut st, 2, 10));
    assert_eq!(st.selection().len(), 1);

    pick_card(&mut e, &mut st, 7, 20);
    assert!(pick_card(&mut e, &mut st, 0, 30));
    assert_eq!(card_state(&st, 0), TargetState::Active);
    assert_eq!(st.selection().len(), 2);
    // The inspection delay is measured from the second pick.
    assert_eq!(st.pending().map(|p| p.due), Some(1_020));
  }

  #[test]
  fn clearing_the_board_schedules_a_new_game() {
    let mut e = engine(ChallengeKind::PairMatch);
    let mut st = e.start();
    let mut now = 0;
    let tags: Vec<Payload> = st.challenge().expect("challenge").targets.iter().map(|t| t.payload.clone()).collect();
    for i in 0..tags.len() {
      if card_state(&st, i) != TargetState::Active {
        continue;
      }
      let j = (0..tags.len()).find(|j| *j != i && tags[*j] == tags[i]).expect("twin");
      pick_card(&mut e, &mut st, i, now);
      pick_card(&mut e, &mut st, j, now);
      now += 1_000;
      e.update(&mut st, now);
    }
    assert_eq!(st.score(), 12);
    assert_eq!(st.phase(), Phase::Advancing);
    assert_eq!(st.feedback().map(|f| f.message.as_str()), Some("You matched them all!"));
    let generation = st.generation();
    e.update(&mut st, now + 2_000);
    assert_eq!(st.generation(), generation + 1);
    assert!(st.challenge().is_some_and(|c| c.targets.iter().all(|t| t.state == TargetState::Active)));
  }

  fn star_hunt() -> Challenge {
    Challenge {
      id: "stars".into(),
      kind: ChallengeKind::ShapeFind,
      prompt: "Find all the Stars!".into(),
      targets: vec![
        shape(0, ShapeKind::Circle, 200.0, 300.0),
        shape(1, ShapeKind::Star, 500.0, 300.0),
        shape(2, ShapeKind::Square, 800.0, 300.0),
      ],
      expected: Answer::Shape(ShapeKind::Star),
      options: Vec::new(),
    }
  }

  #[test]
  fn last_wanted_shape_completes_the_round() {
    let mut e = engine(ChallengeKind::ShapeFind);
    let mut st = e.start();
    st.install(star_hunt());

    assert!(click(&mut e, &mut st, Point::new(500.0, 300.0), 0));
    assert_eq!(card_state(&st, 1), TargetState::Resolved);
    assert_eq!(st.score(), 1);
    let f = st.feedback().expect("feedback");
    assert_eq!(f.message, "Great job! You found all the Stars!");
    assert_eq!(f.remaining_ticks, 120);
    assert_eq!(st.pending().map(|p| p.transition), Some(Transition::NextChallenge(Advance::Fresh)));

    // The board is frozen until the next round.
    assert!(click(&mut e, &mut st, Point::new(200.0, 300.0), 10));
    assert_eq!(st.score(), 1);
    assert_eq!(st.feedback().map(|f| f.tone), Some(Tone::Positive));
  }

  #[test]
  fn wrong_shape_and_resolved_shape() {
    let mut e = engine(ChallengeKind::ShapeFind);
    let mut st = e.start();
    let mut ch = star_hunt();
    ch.targets.push(shape(3, ShapeKind::Star, 500.0, 550.0));
    st.install(ch);

    click(&mut e, &mut st, Point::new(800.0, 300.0), 0);
    assert_eq!(st.feedback().map(|f| f.message.as_str()), Some("That's not a Star. Try again!"));

    click(&mut e, &mut st, Point::new(500.0, 300.0), 10);
    assert_eq!(st.score(), 1);
    assert!(st.pending().is_none());
    // A found shape no longer reacts.
    assert!(!click(&mut e, &mut st, Point::new(500.0, 300.0), 20));
    assert_eq!(st.score(), 1);
  }

  #[test]
  fn new_game_button_regenerates() {
    let mut e = engine(ChallengeKind::ShapeFind);
    let mut st = e.start();
    st.install(star_hunt());
    let generation = st.generation();
    assert!(click(&mut e, &mut st, crate::layout::new_game_button().center(), 0));
    assert_eq!(st.generation(), generation + 1);
    assert_ne!(st.challenge().map(|c| c.id.as_str()), Some("stars"));
  }

  #[test]
  fn audio_cues_follow_outcomes() {
    let sink = Recording::default();
    let mut cfg = config();
    cfg.audio.speak_feedback = true;
    let mut e = ActivityEngine::new(ChallengeKind::Counting, Arc::new(cfg), Box::new(sink.clone())).expect("engine");
    let mut st = e.start();
    st.install(counting_five());

    pick_option(&mut e, &mut st, 3, 0);
    pick_option(&mut e, &mut st, 5, 10);
    assert_eq!(sink.cues(), vec![AudioCue::Negative, AudioCue::Positive]);
    let spoken = sink.0.lock().expect("lock")[1].1.clone();
    assert_eq!(spoken.as_deref(), Some("Correct! Great job!"));
  }

  #[test]
  fn pair_picks_click_without_speaking() {
    let sink = Recording::default();
    let mut e = ActivityEngine::new(ChallengeKind::PairMatch, Arc::new(config()), Box::new(sink.clone())).expect("engine");
    let mut st = pair_state(&mut e);
    pick_card(&mut e, &mut st, 2, 0);
    pick_card(&mut e, &mut st, 7, 0);
    e.update(&mut st, 1_000);
    assert_eq!(sink.cues(), vec![AudioCue::Click, AudioCue::Click, AudioCue::Positive]);
    assert!(sink.0.lock().expect("lock").iter().all(|(_, s)| s.is_none()));
  }

  #[test]
  fn feedback_fades_with_updates() {
    let mut e = engine(ChallengeKind::Counting);
    let mut st = e.start();
    st.install(counting_five());
    pick_option(&mut e, &mut st, 3, 0);
    for i in 0..59 {
      e.update(&mut st, i);
    }
    assert!(st.feedback().is_some());
    e.update(&mut st, 60);
    assert!(st.feedback().is_none());
    assert_eq!(st.phase(), Phase::AwaitingInput);
  }

  #[test]
  fn frame_starts_with_clear_and_shows_score() {
    let mut e = engine(ChallengeKind::Counting);
    let st = e.start();
    let frame = e.render(&st);
    assert!(matches!(frame.first(), Some(DrawCommand::Clear { .. })));
    assert!(frame.iter().any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Score: 0")));
  }

  #[test]
  fn opening_an_activity_greets_without_sound() {
    let sink = Recording::default();
    let mut e = ActivityEngine::new(ChallengeKind::ShapeFind, Arc::new(config()), Box::new(sink.clone())).expect("engine");
    let st = e.start();
    let f = st.feedback().expect("greeting");
    assert_eq!(f.message, "Can you find the shapes?");
    assert_eq!(f.tone, Tone::Positive);
    assert_eq!(f.remaining_ticks, 120);
    assert!(sink.cues().is_empty());
  }

  #[test]
  fn empty_shape_range_is_rejected_up_front() {
    let mut cfg = config();
    cfg.shapes.min_targets = 0;
    cfg.shapes.max_targets = 0;
    let result = ActivityEngine::new(ChallengeKind::ShapeFind, Arc::new(cfg), Box::new(Silent));
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
  }

  #[test]
  fn zero_count_is_rejected_up_front() {
    let mut cfg = config();
    cfg.counting.min_count = 0;
    let result = ActivityEngine::new(ChallengeKind::Counting, Arc::new(cfg), Box::new(Silent));
    match result {
      Err(ConfigError::Invalid(msg)) => assert!(msg.contains("min_count")),
      Err(other) => panic!("unexpected error {other}"),
      Ok(_) => panic!("zero count accepted"),
    }
  }

  #[test]
  fn revealing_the_word_celebrates() {
    let mut e = engine(ChallengeKind::Letter);
    let mut st = e.start();
    assert!(st.sparkles().is_empty());
    click(&mut e, &mut st, word_button().center(), 0);
    assert_eq!(st.sparkles().len(), 5);
    assert_eq!(st.feedback().map(|f| f.message.as_str()), Some("Great job learning!"));

    // Hiding it again adds nothing.
    click(&mut e, &mut st, word_button().center(), 10);
    assert_eq!(st.sparkles().len(), 5);
  }
}

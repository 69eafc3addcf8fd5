//! Shape finding: a scatter of random shapes, click every one of the asked kind.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{
  new_challenge_id, Advance, AfterCorrect, ChallengeStrategy, Control, ControlButton, ControlEffect, Selection, Verdict,
};
use crate::config::ActivityConfig;
use crate::domain::{Answer, Challenge, ChallengeKind, Payload, Point, ShapeKind, Target, TargetId, TargetState, VisualKind};
use crate::layout::{new_game_button, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::seeds::{ALL_SHAPES, LIGHT_GREEN, PALETTE};
use crate::util::{capitalize, fill_template};

pub struct ShapeFindStrategy {
  config: Arc<ActivityConfig>,
}

impl ShapeFindStrategy {
  pub fn new(config: Arc<ActivityConfig>) -> Self {
    Self { config }
  }

  fn expected_shape(challenge: &Challenge) -> Option<ShapeKind> {
    match challenge.expected {
      Answer::Shape(s) => Some(s),
      _ => None,
    }
  }

  fn shape_label(challenge: &Challenge) -> String {
    Self::expected_shape(challenge).map(|s| capitalize(s.name())).unwrap_or_default()
  }
}

impl ChallengeStrategy for ShapeFindStrategy {
  fn kind(&self) -> ChallengeKind {
    ChallengeKind::ShapeFind
  }

  fn title(&self) -> &str {
    &self.config.messages.shapes_title
  }

  fn greeting(&self) -> &str {
    &self.config.messages.shapes_greeting
  }

  fn generate(&mut self, _advance: Advance, rng: &mut StdRng) -> Challenge {
    let cfg = &self.config.shapes;
    let wanted = *ALL_SHAPES.choose(rng).unwrap_or(&ShapeKind::Circle);
    let count = rng.gen_range(cfg.min_targets..=cfg.max_targets);

    let mut targets: Vec<Target> = (0..count)
      .map(|i| {
        let shape = ALL_SHAPES[rng.gen_range(0..ALL_SHAPES.len())];
        let (_, color) = PALETTE[rng.gen_range(0..PALETTE.len())];
        Target {
          id: TargetId(i as u32),
          position: Point::new(
            rng.gen_range(150.0..=SCREEN_WIDTH - 150.0),
            rng.gen_range(200.0..=SCREEN_HEIGHT - 250.0),
          ),
          visual: VisualKind::Shape { shape },
          payload: Payload::Shape(shape),
          color,
          size: rng.gen_range(40..=80) as f32,
          state: TargetState::Active,
        }
      })
      .collect();

    // At least one of the wanted kind must exist, or the round can't be won.
    if !targets.iter().any(|t| t.shape_kind() == Some(wanted)) {
      if let Some(t) = targets.choose_mut(rng) {
        t.visual = VisualKind::Shape { shape: wanted };
        t.payload = Payload::Shape(wanted);
      }
    }

    let label = capitalize(wanted.name());
    Challenge {
      id: new_challenge_id(),
      kind: ChallengeKind::ShapeFind,
      prompt: fill_template(&self.config.messages.shape_question, &[("shape", &label)]),
      targets,
      expected: Answer::Shape(wanted),
      options: Vec::new(),
    }
  }

  fn validate(&self, challenge: &Challenge, selection: &Selection) -> Verdict {
    let Selection::Target { id, .. } = selection else {
      return Verdict::Ignored;
    };
    let Some(target) = challenge.target(*id).filter(|t| t.is_active()) else {
      return Verdict::Ignored;
    };
    let label = Self::shape_label(challenge);
    let m = &self.config.messages;
    if target.shape_kind().is_some() && target.shape_kind() == Self::expected_shape(challenge) {
      Verdict::Correct {
        message: fill_template(&m.shape_correct, &[("shape", &label)]),
        resolve: Some(*id),
        then: AfterCorrect::CheckComplete,
      }
    } else {
      Verdict::Incorrect { message: fill_template(&m.shape_wrong, &[("shape", &label)]) }
    }
  }

  fn is_complete(&self, challenge: &Challenge) -> bool {
    let wanted = Self::expected_shape(challenge);
    !challenge.targets.iter().any(|t| t.is_active() && t.shape_kind() == wanted)
  }

  fn completion_message(&self, challenge: &Challenge) -> String {
    fill_template(&self.config.messages.shape_complete, &[("shape", &Self::shape_label(challenge))])
  }

  fn controls(&self) -> Vec<ControlButton> {
    vec![ControlButton {
      control: Control::NewGame,
      rect: new_game_button(),
      label: self.config.messages.new_game_label.clone(),
      color: LIGHT_GREEN,
    }]
  }

  fn on_control(&mut self, _challenge: &mut Challenge, control: Control) -> ControlEffect {
    match control {
      Control::NewGame => ControlEffect::Regenerate(Advance::Fresh),
      _ => ControlEffect::Nothing,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;

  fn strategy() -> ShapeFindStrategy {
    ShapeFindStrategy::new(Arc::new(ActivityConfig::default()))
  }

  #[test]
  fn every_round_contains_the_wanted_shape() {
    let mut s = strategy();
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..500 {
      let ch = s.generate(Advance::Fresh, &mut rng);
      let Answer::Shape(wanted) = ch.expected else { panic!("not a shape") };
      assert!((6..=10).contains(&ch.targets.len()));
      assert!(ch.targets.iter().any(|t| t.shape_kind() == Some(wanted)));
      assert!(ch.targets.iter().all(|t| t.payload == Payload::Shape(t.shape_kind().expect("shape"))));
    }
  }

  #[test]
  fn single_target_rounds_still_contain_the_wanted_shape() {
    let mut cfg = ActivityConfig::default();
    cfg.shapes.min_targets = 1;
    cfg.shapes.max_targets = 1;
    let mut s = ShapeFindStrategy::new(Arc::new(cfg));
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..50 {
      let ch = s.generate(Advance::Fresh, &mut rng);
      assert_eq!(ch.targets[0].payload, Payload::Shape(match ch.expected {
        Answer::Shape(k) => k,
        _ => panic!("not a shape"),
      }));
    }
  }

  #[test]
  fn empty_target_range_generates_without_panicking() {
    let mut cfg = ActivityConfig::default();
    cfg.shapes.min_targets = 0;
    cfg.shapes.max_targets = 0;
    let mut s = ShapeFindStrategy::new(Arc::new(cfg));
    let mut rng = StdRng::seed_from_u64(1);
    assert!(s.generate(Advance::Fresh, &mut rng).targets.is_empty());
  }

  #[test]
  fn completion_tracks_remaining_wanted_shapes() {
    let mut s = strategy();
    let mut rng = StdRng::seed_from_u64(5);
    let mut ch = s.generate(Advance::Fresh, &mut rng);
    assert!(!s.is_complete(&ch));
    let wanted = ShapeFindStrategy::expected_shape(&ch);
    for t in ch.targets.iter_mut().filter(|t| t.shape_kind() == wanted) {
      t.state = TargetState::Resolved;
    }
    assert!(s.is_complete(&ch));
    assert!(s.completion_message(&ch).starts_with("Great job! You found all the "));
  }

  #[test]
  fn resolved_targets_are_ignored() {
    let mut s = strategy();
    let mut rng = StdRng::seed_from_u64(6);
    let mut ch = s.generate(Advance::Fresh, &mut rng);
    let id = ch.targets[0].id;
    ch.set_state(id, TargetState::Resolved);
    let sel = Selection::Target { id, at: ch.targets[0].position };
    assert_eq!(s.validate(&ch, &sel), Verdict::Ignored);
  }
}

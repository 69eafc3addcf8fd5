//! Pair matching: a shuffled grid where every item appears on exactly two cards.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{new_challenge_id, Advance, AfterCorrect, ChallengeStrategy, Selection, SelectionMode, Verdict};
use crate::config::ActivityConfig;
use crate::domain::{Answer, Challenge, ChallengeKind, Payload, Rgb, Target, TargetId, TargetState, VisualKind};
use crate::layout::card_grid;
use crate::seeds::{color_named, PairTheme, PALETTE};

pub struct PairStrategy {
  config: Arc<ActivityConfig>,
}

impl PairStrategy {
  pub fn new(config: Arc<ActivityConfig>) -> Self {
    Self { config }
  }

  /// Face color of a card: the color itself for the colors theme, otherwise a
  /// stable palette color per item so both cards of a pair look alike.
  fn face_color(theme: PairTheme, tag: &str, index: usize) -> Rgb {
    match theme {
      PairTheme::Colors => color_named(tag).unwrap_or(PALETTE[0].1),
      PairTheme::Shapes | PairTheme::Animals => PALETTE[index % PALETTE.len()].1,
    }
  }
}

impl ChallengeStrategy for PairStrategy {
  fn kind(&self) -> ChallengeKind {
    ChallengeKind::PairMatch
  }

  fn title(&self) -> &str {
    &self.config.messages.pairs_title
  }

  fn greeting(&self) -> &str {
    &self.config.messages.pairs_greeting
  }

  fn mode(&self) -> SelectionMode {
    SelectionMode::Pair
  }

  fn generate(&mut self, _advance: Advance, rng: &mut StdRng) -> Challenge {
    let cfg = &self.config.pairs;
    let tags: Vec<&str> = cfg.theme.tags().choose_multiple(rng, cfg.pair_count).copied().collect();

    let mut deck: Vec<(usize, &str)> = tags.iter().enumerate().flat_map(|(i, t)| [(i, *t), (i, *t)]).collect();
    deck.shuffle(rng);

    let slots = card_grid(deck.len(), cfg.columns);
    let targets = deck
      .iter()
      .zip(slots)
      .enumerate()
      .map(|(i, ((color_idx, tag), rect))| Target {
        id: TargetId(i as u32),
        position: rect.center(),
        visual: VisualKind::Card,
        payload: Payload::Tag((*tag).to_string()),
        color: Self::face_color(cfg.theme, tag, *color_idx),
        size: rect.w,
        state: TargetState::Active,
      })
      .collect();

    Challenge {
      id: new_challenge_id(),
      kind: ChallengeKind::PairMatch,
      prompt: self.config.messages.pairs_question.clone(),
      targets,
      expected: Answer::Pairs,
      options: Vec::new(),
    }
  }

  fn validate(&self, challenge: &Challenge, selection: &Selection) -> Verdict {
    let Selection::Pair(a, b) = selection else {
      return Verdict::Ignored;
    };
    if a == b {
      return Verdict::Ignored;
    }
    let (Some(first), Some(second)) = (challenge.target(*a), challenge.target(*b)) else {
      return Verdict::Ignored;
    };
    let m = &self.config.messages;
    if first.payload == second.payload {
      Verdict::Correct { message: m.pair_match.clone(), resolve: None, then: AfterCorrect::CheckComplete }
    } else {
      Verdict::Incorrect { message: m.pair_miss.clone() }
    }
  }

  /// Done once no card is left face-down or waiting in the buffer.
  fn is_complete(&self, challenge: &Challenge) -> bool {
    challenge.targets.iter().all(|t| matches!(t.state, TargetState::Resolved | TargetState::Hidden))
  }

  fn completion_message(&self, _challenge: &Challenge) -> String {
    self.config.messages.pairs_complete.clone()
  }
}

//! Alphabet: one big letter, a keyboard to press it on, and Previous / Word /
//! Next buttons. The letter is never random; only its color is.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use super::{
  new_challenge_id, Advance, AfterCorrect, ChallengeStrategy, Control, ControlButton, ControlEffect, Selection, Verdict,
};
use crate::config::ActivityConfig;
use crate::domain::{Answer, Challenge, ChallengeKind, Payload, Point, Rgb, Target, TargetId, TargetState, VisualKind};
use crate::layout::{next_button, previous_button, word_button, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::seeds::{word_for, ALPHABET, LIGHT_GREEN, LIGHT_YELLOW, PALETTE};
use crate::util::fill_template;

const LETTER_ID: TargetId = TargetId(0);
const WORD_ID: TargetId = TargetId(1);

pub struct LetterStrategy {
  config: Arc<ActivityConfig>,
  /// Index into `ALPHABET`.
  cursor: usize,
  color: Option<Rgb>,
}

impl LetterStrategy {
  pub fn new(config: Arc<ActivityConfig>) -> Self {
    Self { config, cursor: 0, color: None }
  }

  pub fn current_letter(&self) -> char {
    ALPHABET[self.cursor]
  }

  /// Any palette color other than the one currently shown.
  fn fresh_color(&self, rng: &mut StdRng) -> Rgb {
    let choices: Vec<Rgb> = PALETTE.iter().map(|(_, c)| *c).filter(|c| Some(*c) != self.color).collect();
    choices[rng.gen_range(0..choices.len())]
  }
}

/// Whether the example word under the letter is showing.
pub fn word_visible(challenge: &Challenge) -> bool {
  challenge.target(WORD_ID).is_some_and(|t| t.state != TargetState::Hidden)
}

impl ChallengeStrategy for LetterStrategy {
  fn kind(&self) -> ChallengeKind {
    ChallengeKind::Letter
  }

  fn title(&self) -> &str {
    &self.config.messages.letters_title
  }

  fn greeting(&self) -> &str {
    &self.config.messages.letters_greeting
  }

  fn generate(&mut self, advance: Advance, rng: &mut StdRng) -> Challenge {
    let len = ALPHABET.len();
    self.cursor = match advance {
      Advance::Fresh => self.cursor,
      Advance::Forward => (self.cursor + 1) % len,
      Advance::Backward => (self.cursor + len - 1) % len,
    };
    let color = self.fresh_color(rng);
    self.color = Some(color);

    let letter = self.current_letter();
    let letter_str = letter.to_string();
    Challenge {
      id: new_challenge_id(),
      kind: ChallengeKind::Letter,
      prompt: fill_template(&self.config.messages.letter_question, &[("letter", &letter_str)]),
      targets: vec![
        Target {
          id: LETTER_ID,
          position: Point::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - 50.0),
          visual: VisualKind::Letter { letter },
          payload: Payload::Letter(letter),
          color,
          size: 72.0,
          state: TargetState::Active,
        },
        Target {
          id: WORD_ID,
          position: Point::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 + 50.0),
          visual: VisualKind::Word { text: word_for(letter).to_string() },
          payload: Payload::None,
          color: Rgb::new(0, 0, 0),
          size: 36.0,
          state: TargetState::Hidden,
        },
      ],
      expected: Answer::Letter(letter),
      options: Vec::new(),
    }
  }

  fn validate(&self, challenge: &Challenge, selection: &Selection) -> Verdict {
    let Selection::Key(ch) = selection else {
      return Verdict::Ignored;
    };
    if !ch.is_ascii_alphabetic() {
      return Verdict::Ignored;
    }
    let pressed = ch.to_ascii_uppercase();
    let Answer::Letter(letter) = challenge.expected else {
      return Verdict::Ignored;
    };
    let (pressed_s, letter_s) = (pressed.to_string(), letter.to_string());
    let m = &self.config.messages;
    if pressed == letter {
      Verdict::Correct {
        message: fill_template(&m.letter_correct, &[("letter", &letter_s)]),
        resolve: None,
        then: AfterCorrect::NextChallenge { advance: Advance::Forward, delay_ms: self.config.letters.next_delay_ms },
      }
    } else {
      Verdict::Incorrect { message: fill_template(&m.letter_wrong, &[("pressed", &pressed_s), ("letter", &letter_s)]) }
    }
  }

  fn controls(&self) -> Vec<ControlButton> {
    let m = &self.config.messages;
    vec![
      ControlButton { control: Control::Previous, rect: previous_button(), label: m.previous_label.clone(), color: LIGHT_GREEN },
      ControlButton { control: Control::ToggleWord, rect: word_button(), label: m.word_label.clone(), color: LIGHT_YELLOW },
      ControlButton { control: Control::Next, rect: next_button(), label: m.next_label.clone(), color: LIGHT_GREEN },
    ]
  }

  fn on_control(&mut self, challenge: &mut Challenge, control: Control) -> ControlEffect {
    match control {
      Control::Previous => ControlEffect::Regenerate(Advance::Backward),
      Control::Next => ControlEffect::Regenerate(Advance::Forward),
      Control::ToggleWord => {
        let Some(word) = challenge.target_mut(WORD_ID) else {
          return ControlEffect::Nothing;
        };
        if word.state == TargetState::Hidden {
          word.state = TargetState::Active;
          ControlEffect::Award { points: 1, message: self.config.messages.letter_word.clone() }
        } else {
          word.state = TargetState::Hidden;
          ControlEffect::Changed
        }
      }
      Control::NewGame => ControlEffect::Nothing,
    }
  }
}

//! Loading activity configuration (bounds, timings, string table) from TOML.
//!
//! Every field has a default, so a file only needs to name what it overrides.
//! See `ActivityConfig` and `Messages` for the expected schema.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::seeds::PairTheme;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config file: {0}")]
  Io(#[from] std::io::Error),
  #[error("failed to parse TOML config: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("invalid config: {0}")]
  Invalid(String),
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ActivityConfig {
  /// Fixed rng seed; when absent every run is different.
  #[serde(default)]
  pub seed: Option<u64>,
  #[serde(default)]
  pub counting: CountingCfg,
  #[serde(default)]
  pub letters: LettersCfg,
  #[serde(default)]
  pub shapes: ShapesCfg,
  #[serde(default)]
  pub pairs: PairsCfg,
  #[serde(default)]
  pub timing: TimingCfg,
  #[serde(default)]
  pub audio: AudioCfg,
  #[serde(default)]
  pub messages: Messages,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CountingCfg {
  /// Smallest object count. Must be at least 3 so four distinct options exist.
  pub min_count: u32,
  pub max_count: u32,
  pub next_delay_ms: u64,
}

impl Default for CountingCfg {
  fn default() -> Self {
    Self { min_count: 3, max_count: 10, next_delay_ms: 2000 }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LettersCfg {
  pub next_delay_ms: u64,
}

impl Default for LettersCfg {
  fn default() -> Self {
    Self { next_delay_ms: 1500 }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShapesCfg {
  pub min_targets: usize,
  pub max_targets: usize,
}

impl Default for ShapesCfg {
  fn default() -> Self {
    Self { min_targets: 6, max_targets: 10 }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PairsCfg {
  pub theme: PairTheme,
  pub pair_count: usize,
  pub columns: usize,
  /// How long both picks stay visible before they resolve or flip back.
  pub inspection_ms: u64,
}

impl Default for PairsCfg {
  fn default() -> Self {
    Self { theme: PairTheme::default(), pair_count: 6, columns: 4, inspection_ms: 1000 }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TimingCfg {
  pub feedback_ticks: u32,
  pub celebration_ticks: u32,
  /// Delay before a new challenge once every target has been resolved.
  pub complete_delay_ms: u64,
  pub sparkle_ticks: u32,
}

impl Default for TimingCfg {
  fn default() -> Self {
    Self { feedback_ticks: 60, celebration_ticks: 120, complete_delay_ms: 2000, sparkle_ticks: 90 }
  }
}

#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct AudioCfg {
  /// Hand the feedback text to the speech sink along with the tone.
  pub speak_feedback: bool,
}

/// String table. Swap it in TOML to localize the activities.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
  pub counting_title: String,
  pub counting_greeting: String,
  pub counting_question: String,
  pub counting_correct: String,
  pub try_again: String,

  pub letters_title: String,
  pub letters_greeting: String,
  pub letter_question: String,
  pub letter_correct: String,
  pub letter_wrong: String,
  pub letter_word: String,
  pub previous_label: String,
  pub next_label: String,
  pub word_label: String,

  pub shapes_title: String,
  pub shapes_greeting: String,
  pub shape_question: String,
  pub shape_correct: String,
  pub shape_wrong: String,
  pub shape_complete: String,
  pub new_game_label: String,

  pub pairs_title: String,
  pub pairs_greeting: String,
  pub pairs_question: String,
  pub pair_match: String,
  pub pair_miss: String,
  pub pairs_complete: String,

  pub score_label: String,
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      counting_title: "Counting Game".into(),
      counting_greeting: "Let's count together!".into(),
      counting_question: "How many {things} do you see?".into(),
      counting_correct: "Correct! Great job!".into(),
      try_again: "Try again!".into(),

      letters_title: "Alphabet Learning".into(),
      letters_greeting: "Time to learn the alphabet!".into(),
      letter_question: "Can you find {letter} on the keyboard?".into(),
      letter_correct: "Correct! That's the letter {letter}!".into(),
      letter_wrong: "That's the letter {pressed}, not {letter}.".into(),
      letter_word: "Great job learning!".into(),
      previous_label: "Previous".into(),
      next_label: "Next".into(),
      word_label: "Word".into(),

      shapes_title: "Shape Recognition".into(),
      shapes_greeting: "Can you find the shapes?".into(),
      shape_question: "Find all the {shape}s!".into(),
      shape_correct: "Correct! That's a {shape}!".into(),
      shape_wrong: "That's not a {shape}. Try again!".into(),
      shape_complete: "Great job! You found all the {shape}s!".into(),
      new_game_label: "New Game".into(),

      pairs_title: "Matching Pairs".into(),
      pairs_greeting: "Let's find the pairs!".into(),
      pairs_question: "Find the matching pairs!".into(),
      pair_match: "It's a match!".into(),
      pair_miss: "Not a match. Try again!".into(),
      pairs_complete: "You matched them all!".into(),

      score_label: "Score: {score}".into(),
    }
  }
}

impl ActivityConfig {
  pub fn validate(&self) -> Result<(), ConfigError> {
    let c = &self.counting;
    if c.min_count < 3 {
      return Err(ConfigError::Invalid(format!("counting.min_count must be >= 3 (got {})", c.min_count)));
    }
    if c.min_count > c.max_count {
      return Err(ConfigError::Invalid(format!(
        "counting.min_count ({}) exceeds max_count ({})",
        c.min_count, c.max_count
      )));
    }
    let s = &self.shapes;
    if s.min_targets == 0 || s.min_targets > s.max_targets {
      return Err(ConfigError::Invalid(format!(
        "shapes target range {}..={} is empty",
        s.min_targets, s.max_targets
      )));
    }
    let p = &self.pairs;
    let available = p.theme.tags().len();
    if p.pair_count == 0 || p.pair_count > available {
      return Err(ConfigError::Invalid(format!(
        "pairs.pair_count must be 1..={} for theme {:?} (got {})",
        available, p.theme, p.pair_count
      )));
    }
    if self.timing.feedback_ticks == 0 || self.timing.celebration_ticks == 0 {
      return Err(ConfigError::Invalid("feedback durations must be positive".into()));
    }
    Ok(())
  }
}

/// Read, parse and validate a config file.
pub fn load_from_path(path: &Path) -> Result<ActivityConfig, ConfigError> {
  let s = std::fs::read_to_string(path)?;
  let cfg = toml::from_str::<ActivityConfig>(&s)?;
  cfg.validate()?;
  Ok(cfg)
}

/// Attempt to load `ActivityConfig` from ACTIVITY_CONFIG_PATH. On any IO, parsing or
/// validation error, returns None and the caller keeps the defaults.
pub fn load_activity_config_from_env() -> Option<ActivityConfig> {
  let path = std::env::var("ACTIVITY_CONFIG_PATH").ok()?;
  match load_from_path(Path::new(&path)) {
    Ok(cfg) => {
      info!(target: "bubble_learning", %path, "Loaded activity config (TOML)");
      Some(cfg)
    }
    Err(e) => {
      error!(target: "bubble_learning", %path, error = %e, "Failed to load activity config; using defaults");
      None
    }
  }
}

//! Built-in content: bright colors, shape palettes, the alphabet word table and
//! the pair-match themes. Everything here is static; randomness lives in the
//! activity strategies.

use serde::Deserialize;

use crate::domain::{Rgb, ShapeKind};

pub const WHITE: Rgb = Rgb::new(255, 255, 255);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);
pub const GREEN: Rgb = Rgb::new(50, 255, 50);
pub const RED: Rgb = Rgb::new(255, 50, 50);
pub const DARK_BLUE: Rgb = Rgb::new(50, 50, 150);
pub const LIGHT_BLUE: Rgb = Rgb::new(150, 200, 255);
pub const LIGHT_GREEN: Rgb = Rgb::new(150, 255, 150);
pub const LIGHT_YELLOW: Rgb = Rgb::new(255, 255, 150);
pub const CARD_BACK: Rgb = Rgb::new(230, 150, 255);

/// Named kid-friendly palette; names double as pair-match "colors" payloads.
pub const PALETTE: [(&str, Rgb); 8] = [
  ("red", Rgb::new(255, 50, 50)),
  ("green", Rgb::new(50, 255, 50)),
  ("blue", Rgb::new(50, 50, 255)),
  ("yellow", Rgb::new(255, 255, 50)),
  ("purple", Rgb::new(200, 50, 200)),
  ("orange", Rgb::new(255, 150, 50)),
  ("pink", Rgb::new(255, 150, 200)),
  ("cyan", Rgb::new(50, 255, 255)),
];

/// Sparkle colors used for celebrations.
pub const SPARKLE_COLORS: [Rgb; 3] = [Rgb::new(255, 255, 50), Rgb::new(255, 150, 50), WHITE];

pub const COUNTING_SHAPES: [ShapeKind; 4] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle, ShapeKind::Star];

pub const ALL_SHAPES: [ShapeKind; 6] = [
  ShapeKind::Circle,
  ShapeKind::Square,
  ShapeKind::Triangle,
  ShapeKind::Star,
  ShapeKind::Rectangle,
  ShapeKind::Diamond,
];

/// Nouns used in the counting prompt ("How many {things} do you see?").
pub const COUNTING_NOUNS: [&str; 4] = ["stars", "circles", "squares", "triangles"];

pub const ALPHABET: [char; 26] = [
  'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
  'X', 'Y', 'Z',
];

/// Example word for each letter of `ALPHABET`, same order.
pub const LETTER_WORDS: [&str; 26] = [
  "Apple", "Ball", "Cat", "Dog", "Elephant", "Fish", "Goat", "Hat", "Ice cream", "Jump", "Kite", "Lion", "Moon",
  "Nest", "Orange", "Penguin", "Queen", "Rainbow", "Sun", "Tree", "Umbrella", "Violin", "Water", "Xylophone",
  "Yacht", "Zebra",
];

pub const ANIMALS: [&str; 8] = ["cat", "dog", "fish", "lion", "goat", "penguin", "elephant", "zebra"];

pub fn color_named(name: &str) -> Option<Rgb> {
  PALETTE.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

pub fn word_for(letter: char) -> &'static str {
  ALPHABET
    .iter()
    .position(|c| *c == letter.to_ascii_uppercase())
    .map(|i| LETTER_WORDS[i])
    .unwrap_or("")
}

/// Which family of items a pair-match round is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PairTheme {
  Shapes,
  Colors,
  #[default]
  Animals,
}

impl PairTheme {
  /// Distinct payload tags available for this theme.
  pub fn tags(self) -> Vec<&'static str> {
    match self {
      PairTheme::Shapes => ALL_SHAPES.iter().map(|s| s.name()).collect(),
      PairTheme::Colors => PALETTE.iter().map(|(n, _)| *n).collect(),
      PairTheme::Animals => ANIMALS.to_vec(),
    }
  }
}

//! Counting: a handful of random objects and four number buttons.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{new_challenge_id, Advance, AfterCorrect, ChallengeStrategy, Selection, Verdict};
use crate::config::ActivityConfig;
use crate::domain::{Answer, Challenge, ChallengeKind, Payload, Point, Target, TargetId, TargetState, VisualKind};
use crate::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::seeds::{COUNTING_NOUNS, COUNTING_SHAPES, PALETTE};
use crate::util::fill_template;

pub struct CountingStrategy {
  config: Arc<ActivityConfig>,
}

impl CountingStrategy {
  pub fn new(config: Arc<ActivityConfig>) -> Self {
    Self { config }
  }
}

/// Answer options for a count of `n`: `n` plus up to three distinct positive
/// neighbours, shuffled. Near neighbours are preferred; the wider ring is only
/// used when the near one is too small.
pub fn counting_options<R: Rng + ?Sized>(n: u32, rng: &mut R) -> Vec<u32> {
  let n = i64::from(n);
  let keep = |v: &i64| *v > 0 && *v != n;
  let mut wrong: Vec<i64> = [n - 1, n + 1, n + 2].into_iter().filter(keep).collect();
  if wrong.len() < 3 {
    wrong.extend([n - 2, n + 3, n - 3].into_iter().filter(keep));
  }
  wrong.sort_unstable();
  wrong.dedup();
  let mut options: Vec<u32> = wrong.choose_multiple(rng, 3).map(|v| *v as u32).collect();
  options.push(n as u32);
  options.shuffle(rng);
  options
}

impl ChallengeStrategy for CountingStrategy {
  fn kind(&self) -> ChallengeKind {
    ChallengeKind::Counting
  }

  fn title(&self) -> &str {
    &self.config.messages.counting_title
  }

  fn greeting(&self) -> &str {
    &self.config.messages.counting_greeting
  }

  fn generate(&mut self, _advance: Advance, rng: &mut StdRng) -> Challenge {
    let cfg = &self.config.counting;
    let n = rng.gen_range(cfg.min_count..=cfg.max_count);

    let targets = (0..n)
      .map(|i| {
        let (_, color) = PALETTE[rng.gen_range(0..PALETTE.len())];
        let shape = COUNTING_SHAPES[rng.gen_range(0..COUNTING_SHAPES.len())];
        Target {
          id: TargetId(i),
          position: Point::new(
            rng.gen_range(100.0..=SCREEN_WIDTH - 200.0),
            rng.gen_range(150.0..=SCREEN_HEIGHT - 200.0),
          ),
          visual: VisualKind::Shape { shape },
          payload: Payload::Counted,
          color,
          size: rng.gen_range(30..=60) as f32,
          state: TargetState::Active,
        }
      })
      .collect();

    let things = COUNTING_NOUNS.choose(rng).copied().unwrap_or("things");
    Challenge {
      id: new_challenge_id(),
      kind: ChallengeKind::Counting,
      prompt: fill_template(&self.config.messages.counting_question, &[("things", things)]),
      targets,
      expected: Answer::Count(n),
      options: counting_options(n, rng),
    }
  }

  fn validate(&self, challenge: &Challenge, selection: &Selection) -> Verdict {
    let Selection::Option(value) = selection else {
      return Verdict::Ignored;
    };
    if !challenge.options.contains(value) {
      return Verdict::Ignored;
    }
    if challenge.expected == Answer::Count(*value) {
      Verdict::Correct {
        message: self.config.messages.counting_correct.clone(),
        resolve: None,
        then: AfterCorrect::NextChallenge { advance: Advance::Fresh, delay_ms: self.config.counting.next_delay_ms },
      }
    } else {
      Verdict::Incorrect { message: self.config.messages.try_again.clone() }
    }
  }

  fn sparkles_per_win(&self) -> usize {
    10
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::SeedableRng;

  fn strategy() -> CountingStrategy {
    CountingStrategy::new(Arc::new(ActivityConfig::default()))
  }

  #[test]
  fn options_hold_the_count_once_without_duplicates() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 1..=20 {
      for _ in 0..20 {
        let opts = counting_options(n, &mut rng);
        assert_eq!(opts.iter().filter(|v| **v == n).count(), 1, "n={n} opts={opts:?}");
        let mut sorted = opts.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), opts.len(), "duplicates in {opts:?}");
        assert!(opts.iter().all(|v| *v > 0));
        assert!(opts.len() >= 2);
      }
    }
  }

  #[test]
  fn configured_counts_always_get_four_options() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 3..=10 {
      assert_eq!(counting_options(n, &mut rng).len(), 4);
    }
  }

  #[test]
  fn smallest_counts_fall_back_to_the_wider_ring() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut opts = counting_options(1, &mut rng);
    opts.sort();
    // 0 is filtered out, so 2, 3 and then 4 from the wider ring.
    assert_eq!(opts, vec![1, 2, 3, 4]);
  }

  #[test]
  fn generated_challenge_matches_its_objects() {
    let mut s = strategy();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..50 {
      let ch = s.generate(Advance::Fresh, &mut rng);
      let Answer::Count(n) = ch.expected else { panic!("not a count") };
      assert!((3..=10).contains(&n));
      assert_eq!(ch.targets.len() as u32, n);
      assert!(ch.options.contains(&n));
      assert!(ch.prompt.starts_with("How many "));
    }
  }

  #[test]
  fn validates_by_value() {
    let mut s = strategy();
    let mut rng = StdRng::seed_from_u64(2);
    let ch = s.generate(Advance::Fresh, &mut rng);
    let Answer::Count(n) = ch.expected else { panic!("not a count") };
    let wrong = *ch.options.iter().find(|v| **v != n).expect("a wrong option");

    assert!(matches!(s.validate(&ch, &Selection::Option(n)), Verdict::Correct { .. }));
    assert!(matches!(s.validate(&ch, &Selection::Option(wrong)), Verdict::Incorrect { .. }));
    assert_eq!(s.validate(&ch, &Selection::Key('a')), Verdict::Ignored);
  }
}

//! Terminal shell: activity menu, frame loop and input translation.
//!
//! The shell owns at most one `(ActivityEngine, EngineState)` pair. Leaving an
//! activity drops both, which also drops any transition still scheduled.

mod canvas;
mod term;

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crossterm::terminal;
use tracing::{debug, error, info};

use bubble_learning::config::ActivityConfig;
use bubble_learning::domain::{ChallengeKind, Point};
use bubble_learning::geometry::Rect;
use bubble_learning::layout::{back_button, SCREEN_WIDTH};
use bubble_learning::protocol::{DrawCommand, FeedbackSink, InputEvent, Key, Millis, Renderer, TextAnchor};
use bubble_learning::seeds::{BLACK, DARK_BLUE, LIGHT_BLUE, LIGHT_YELLOW, WHITE};
use bubble_learning::{ActivityEngine, EngineState};

use term::{BellSink, TerminalGuard, TerminalRenderer};

const TICK: Duration = Duration::from_millis(16);

pub const ACTIVITIES: [ChallengeKind; 4] =
  [ChallengeKind::Counting, ChallengeKind::Letter, ChallengeKind::ShapeFind, ChallengeKind::PairMatch];

/// Parse an activity name as typed on the command line.
pub fn activity_named(name: &str) -> Option<ChallengeKind> {
  match name.to_ascii_lowercase().as_str() {
    "counting" | "count" => Some(ChallengeKind::Counting),
    "letters" | "letter" | "alphabet" => Some(ChallengeKind::Letter),
    "shapes" | "shape" | "shape_find" => Some(ChallengeKind::ShapeFind),
    "pairs" | "pair" | "pair_match" => Some(ChallengeKind::PairMatch),
    _ => None,
  }
}

fn menu_button(i: usize) -> Rect {
  Rect::new(SCREEN_WIDTH / 2.0 - 200.0, 180.0 + i as f32 * 120.0, 400.0, 90.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
  Continue,
  Quit,
}

enum Screen {
  Menu,
  Playing { engine: Box<ActivityEngine>, state: EngineState },
}

pub struct Shell {
  config: Arc<ActivityConfig>,
  audio: fn() -> Box<dyn FeedbackSink>,
  screen: Screen,
}

impl Shell {
  pub fn new(config: Arc<ActivityConfig>, audio: fn() -> Box<dyn FeedbackSink>) -> Self {
    Self { config, audio, screen: Screen::Menu }
  }

  /// Open `kind`. A config the engine rejects keeps the menu up.
  pub fn open(&mut self, kind: ChallengeKind) {
    let mut engine = match ActivityEngine::new(kind, self.config.clone(), (self.audio)()) {
      Ok(engine) => Box::new(engine),
      Err(e) => {
        error!(target: "bubble_learning", %kind, error = %e, "Cannot open activity.");
        return;
      }
    };
    let state = engine.start();
    info!(target: "bubble_learning", %kind, "Activity opened.");
    self.screen = Screen::Playing { engine, state };
  }

  fn close(&mut self) {
    if let Screen::Playing { engine, state } = &self.screen {
      info!(target: "bubble_learning", kind = %engine.kind(), score = state.score(), "Activity closed.");
    }
    self.screen = Screen::Menu;
  }

  pub fn pointer(&mut self, at: Point, now: Millis) -> Flow {
    match &mut self.screen {
      Screen::Menu => {
        if let Some(i) = (0..ACTIVITIES.len()).find(|i| menu_button(*i).contains(at)) {
          self.open(ACTIVITIES[i]);
        }
      }
      Screen::Playing { .. } if back_button().contains(at) => self.close(),
      Screen::Playing { engine, state } => {
        engine.on_input(state, &InputEvent::pointer_down(at.x, at.y, now));
      }
    }
    Flow::Continue
  }

  pub fn key(&mut self, key: Key, now: Millis) -> Flow {
    match &mut self.screen {
      Screen::Menu => match key {
        Key::Char('q') | Key::Char('Q') | Key::Escape => return Flow::Quit,
        Key::Char(c) => {
          let picked = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)).and_then(|i| ACTIVITIES.get(i).copied());
          if let Some(kind) = picked {
            self.open(kind);
          }
        }
        _ => {}
      },
      Screen::Playing { .. } if key == Key::Escape => self.close(),
      Screen::Playing { engine, state } => {
        engine.on_input(state, &InputEvent::key_down(key, now));
      }
    }
    Flow::Continue
  }

  pub fn update(&mut self, now: Millis) {
    if let Screen::Playing { engine, state } = &mut self.screen {
      engine.update(state, now);
    }
  }

  pub fn frame(&self) -> Vec<DrawCommand> {
    match &self.screen {
      Screen::Menu => self.menu_frame(),
      Screen::Playing { engine, state } => {
        let mut out = engine.render(state);
        let back = back_button();
        out.push(DrawCommand::Rect { rect: back, color: LIGHT_YELLOW, corner_radius: 8.0, outline: Some(BLACK) });
        out.push(DrawCommand::Text { at: back.center(), anchor: TextAnchor::Center, text: "Back".into(), size: 24.0, color: BLACK });
        out
      }
    }
  }

  fn menu_frame(&self) -> Vec<DrawCommand> {
    let m = &self.config.messages;
    let titles = [&m.counting_title, &m.letters_title, &m.shapes_title, &m.pairs_title];
    let mut out = vec![
      DrawCommand::Clear { color: WHITE },
      DrawCommand::Text {
        at: Point::new(SCREEN_WIDTH / 2.0, 90.0),
        anchor: TextAnchor::Center,
        text: "Bubble Learning".into(),
        size: 64.0,
        color: DARK_BLUE,
      },
    ];
    for (i, title) in titles.iter().enumerate() {
      let rect = menu_button(i);
      out.push(DrawCommand::Rect { rect, color: LIGHT_BLUE, corner_radius: 12.0, outline: Some(BLACK) });
      out.push(DrawCommand::Text {
        at: rect.center(),
        anchor: TextAnchor::Center,
        text: format!("{}. {}", i + 1, title),
        size: 36.0,
        color: BLACK,
      });
    }
    out
  }
}

fn translate_key(code: KeyCode) -> Key {
  match code {
    KeyCode::Char(c) => Key::Char(c),
    KeyCode::Esc => Key::Escape,
    KeyCode::Enter => Key::Enter,
    _ => Key::Other,
  }
}

/// Run the interactive loop until the user quits from the menu.
pub fn run(config: Arc<ActivityConfig>, start: Option<ChallengeKind>) -> io::Result<()> {
  let _guard = TerminalGuard::enter()?;
  let (cols, rows) = terminal::size()?;
  let mut screen = TerminalRenderer::new(cols, rows);
  let mut shell = Shell::new(config, || Box::new(BellSink));
  if let Some(kind) = start {
    shell.open(kind);
  }

  let clock = Instant::now();
  loop {
    let now = clock.elapsed().as_millis() as Millis;
    while event::poll(Duration::from_millis(0))? {
      let flow = match event::read()? {
        Event::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. }) if modifiers.contains(KeyModifiers::CONTROL) => {
          Flow::Quit
        }
        Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => shell.key(translate_key(code), now),
        Event::Mouse(MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, .. }) => {
          let at = screen.canvas().to_virtual(column, row);
          shell.pointer(at, now)
        }
        Event::Resize(c, r) => {
          debug!(target: "bubble_learning", cols = c, rows = r, "Terminal resized.");
          screen.resize(c, r);
          Flow::Continue
        }
        _ => Flow::Continue,
      };
      if flow == Flow::Quit {
        info!(target: "bubble_learning", "Quit.");
        return Ok(());
      }
    }

    shell.update(now);
    screen.render(&shell.frame());
    thread::sleep(TICK);
  }
}

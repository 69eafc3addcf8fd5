//! Bubble Learning · activity question-feedback engine
//!
//! - Four mini-games (counting, letters, shape finding, pair matching) behind
//!   one `ChallengeStrategy` trait
//! - `ActivityEngine` drives generate → select → feedback → advance with an
//!   explicit, caller-owned `EngineState`
//! - Output is a list of `DrawCommand`s plus audio cues; the shell decides how
//!   to paint and play them
//!
//! Important env variables:
//!   ACTIVITY_CONFIG_PATH : path to TOML config (bounds, timings, string table)
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

pub mod activities;
pub mod config;
pub mod domain;
pub mod engine;
pub mod geometry;
pub mod layout;
pub mod protocol;
pub mod render;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod util;

pub use engine::ActivityEngine;
pub use state::EngineState;

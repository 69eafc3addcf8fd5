//! Bubble Learning · terminal shell
//!
//! - Menu of the four activities, mouse and keyboard input via crossterm
//! - Logs to a file so the alternate screen stays clean
//!
//! Usage:
//!   bubble-learning [counting|letters|shapes|pairs]
//!
//! Important env variables:
//!   ACTIVITY_CONFIG_PATH : path to TOML config (bounds, timings, string table)
//!   LOG_FILE             : log destination (default "bubble-learning.log")
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

mod shell;

use std::fs::File;
use std::sync::{Arc, Mutex};

use tracing::{error, info};

use bubble_learning::config::load_activity_config_from_env;
use bubble_learning::telemetry;

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let start = match std::env::args().nth(1) {
    None => None,
    Some(arg) if arg == "-h" || arg == "--help" => {
      println!("Usage: bubble-learning [counting|letters|shapes|pairs]");
      return Ok(());
    }
    Some(arg) => match shell::activity_named(&arg) {
      Some(kind) => Some(kind),
      None => return Err(format!("Unknown activity '{arg}'. Run with --help.").into()),
    },
  };

  let log_path = std::env::var("LOG_FILE").unwrap_or_else(|_| "bubble-learning.log".to_string());
  telemetry::init_tracing(Mutex::new(File::create(&log_path)?));

  let config = Arc::new(load_activity_config_from_env().unwrap_or_default());
  info!(target: "bubble_learning", seed = ?config.seed, ?start, "Starting.");

  if let Err(e) = shell::run(config, start) {
    error!(target: "bubble_learning", error = %e, "Terminal shell failed.");
    return Err(e.into());
  }
  Ok(())
}

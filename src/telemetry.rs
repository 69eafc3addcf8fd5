//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,activity=debug,bubble_learning=debug").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Notes:
//! - The terminal shell owns the screen, so logs go to the writer passed in
//!   (a file in the binary) and never carry ANSI colors.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info,activity=debug,bubble_learning=debug";

pub fn init_tracing<W>(writer: W)
where
  W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
  let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .with_target(true)
    .with_file(true)
    .with_line_number(true);

  // JSON and pretty builders are different types; init each branch on its own.
  match std::env::var("LOG_FORMAT").as_deref() {
    Ok("json") => builder.json().init(),
    _ => builder.init(),
  }
}

//! Interactive console for the Chamber of Echoes
//!
//! Reads one line at a time, predicts the next term of each sequence, and
//! keeps a per-session echo log that is dumped on exit.

mod input;
mod render;
mod session;

pub use input::{LineSource, ReadlineSource};
pub use render::EXAMPLES;
pub use session::{ReplCommand, ReplSession};

use eyre::Result;
use tracing::info;

use crate::config::Config;

/// Run the interactive REPL on the terminal
///
/// This is the main entry point for `ec repl` and for `ec` with no command.
pub fn run_interactive(config: &Config) -> Result<()> {
    let input = ReadlineSource::new(config.repl.history)?;
    let stdout = std::io::stdout();

    info!("Starting interactive session");
    let mut session = ReplSession::new(input, stdout.lock()).with_max_count(config.repl.max_count);
    session.run()
}

//! Line sources for the interactive shell

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

/// Something that can prompt for and return one line of input
pub trait LineSource {
    /// Read a line, or `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal input with line editing and history
pub struct ReadlineSource {
    editor: DefaultEditor,
    history: bool,
}

impl ReadlineSource {
    pub fn new(history: bool) -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { editor, history })
    }
}

impl LineSource for ReadlineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        loop {
            match self.editor.readline(prompt) {
                Ok(line) => {
                    if self.history && !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.trim());
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("{}", "^C".dimmed());
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    debug!("ReadlineSource::read_line: end of input");
                    return Ok(None);
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }
    }
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

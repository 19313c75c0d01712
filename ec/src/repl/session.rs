//! REPL session management

use std::io::Write;

use colored::Colorize;
use eyre::Result;
use seqpredict::{
    DEFAULT_MAX_PREDICTION_COUNT, EchoLog, common_difference, format_number, format_sequence, parse_sequence, predict_multiple, predict_next,
};
use tracing::{debug, info};

use super::input::LineSource;
use super::render;

const SEQUENCE_PROMPT: &str = "Enter sequence or command: ";
const FOLLOW_UP_PROMPT: &str = "Enter your sequence: ";

const FORMAT_HINT: &str = "Enter numbers separated by commas, e.g. \"3, 6, 9, 12\".";
const PROGRESSION_HINT: &str = "The difference between consecutive numbers must be constant.";
const COUNT_ERROR: &str = "Invalid count. Use \"predict 5\" to predict the next 5 numbers.";

/// A single line of input, classified
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Blank line
    Empty,
    Exit,
    Memory,
    Example,
    Help,
    Clear,
    /// `predict N`; `None` when N is missing or not a positive integer
    Predict(Option<i64>),
    /// Anything else is treated as a sequence
    Sequence(String),
}

impl ReplCommand {
    /// Classify a line; keywords are case-insensitive
    pub fn parse(line: &str) -> Self {
        let input = line.trim();
        let lowered = input.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        match words.as_slice() {
            [] => Self::Empty,
            ["exit"] | ["quit"] => Self::Exit,
            ["memory"] => Self::Memory,
            ["example"] | ["examples"] => Self::Example,
            ["help"] => Self::Help,
            ["clear"] => Self::Clear,
            ["predict", count] => Self::Predict(count.parse::<i64>().ok().filter(|n| *n >= 1)),
            ["predict", ..] => Self::Predict(None),
            _ => Self::Sequence(input.to_string()),
        }
    }
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive session: one echo log, one line source, one output
pub struct ReplSession<S, W> {
    input: S,
    out: W,
    memory: EchoLog,
    max_count: i64,
}

impl<S: LineSource, W: Write> ReplSession<S, W> {
    pub fn new(input: S, out: W) -> Self {
        Self {
            input,
            out,
            memory: EchoLog::new(),
            max_count: DEFAULT_MAX_PREDICTION_COUNT,
        }
    }

    /// Cap the count accepted by `predict N`
    pub fn with_max_count(mut self, max_count: i64) -> Self {
        self.max_count = max_count;
        self
    }

    /// Echoes recorded so far in this session
    pub fn memory(&self) -> &EchoLog {
        &self.memory
    }

    /// Run the read-evaluate-print loop until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        render::welcome(&mut self.out)?;
        render::instructions(&mut self.out)?;
        self.out.flush()?;

        loop {
            let Some(line) = self.input.read_line(SEQUENCE_PROMPT)? else {
                debug!("ReplSession::run: end of input");
                break;
            };

            let flow = self.handle_line(&line)?;
            self.out.flush()?;
            if flow == Flow::Exit {
                break;
            }
        }

        info!(echoes = self.memory.count(), "Session ended");
        render::farewell(&mut self.out, &self.memory)?;
        self.out.flush()?;
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let command = ReplCommand::parse(line);
        debug!(?command, "ReplSession::handle_line: dispatching");

        match command {
            ReplCommand::Empty => {}
            ReplCommand::Exit => return Ok(Flow::Exit),
            ReplCommand::Memory => render::memory(&mut self.out, &self.memory)?,
            ReplCommand::Example => render::examples(&mut self.out)?,
            ReplCommand::Help => render::instructions(&mut self.out)?,
            ReplCommand::Clear => {
                let removed = self.memory.clear();
                writeln!(self.out, "{}", format!("Forgot {} echo(es).", removed).dimmed())?;
                writeln!(self.out)?;
            }
            ReplCommand::Predict(None) => render::error(&mut self.out, COUNT_ERROR, None)?,
            ReplCommand::Predict(Some(count)) if count > self.max_count => {
                let hint = format!("Counts go up to {}.", self.max_count);
                render::error(&mut self.out, COUNT_ERROR, Some(hint.as_str()))?;
            }
            ReplCommand::Predict(Some(count)) => return self.predict_many(count),
            ReplCommand::Sequence(text) => self.predict_one(&text)?,
        }

        Ok(Flow::Continue)
    }

    fn predict_one(&mut self, text: &str) -> Result<()> {
        let Some(sequence) = parse_sequence(text) else {
            return render::error(&mut self.out, "Invalid input format.", Some(FORMAT_HINT));
        };

        let (Some(difference), Some(prediction)) = (common_difference(&sequence), predict_next(&sequence)) else {
            return render::error(
                &mut self.out,
                "The sequence is not a valid arithmetic progression.",
                Some(PROGRESSION_HINT),
            );
        };

        writeln!(self.out)?;
        writeln!(self.out, "{}", "Chamber Analysis:".bright_cyan())?;
        writeln!(self.out, "   Sequence: {}", format_sequence(&sequence))?;
        writeln!(self.out, "   Common Difference: {}", format_number(difference))?;
        writeln!(self.out, "   Next Echo: {}", format_number(prediction).bright_green().bold())?;
        writeln!(self.out)?;

        self.memory.record(&sequence, prediction);
        Ok(())
    }

    fn predict_many(&mut self, count: i64) -> Result<Flow> {
        let Some(line) = self.input.read_line(FOLLOW_UP_PROMPT)? else {
            return Ok(Flow::Exit);
        };
        if ReplCommand::parse(&line) == ReplCommand::Exit {
            return Ok(Flow::Exit);
        }

        let Some(sequence) = parse_sequence(line.trim()) else {
            render::error(&mut self.out, "Invalid sequence format.", Some(FORMAT_HINT))?;
            return Ok(Flow::Continue);
        };

        let Some(predictions) = predict_multiple(&sequence, count) else {
            render::error(
                &mut self.out,
                "The sequence is not a valid arithmetic progression.",
                Some(PROGRESSION_HINT),
            )?;
            return Ok(Flow::Continue);
        };

        writeln!(self.out)?;
        writeln!(self.out, "   Your sequence: {}", format_sequence(&sequence))?;
        writeln!(
            self.out,
            "   Next {} numbers: {}",
            count,
            format_sequence(&predictions).bright_green()
        )?;
        writeln!(self.out)?;

        self.memory.record(&sequence, predictions[0]);
        Ok(Flow::Continue)
    }
}

//! Text rendering for the interactive shell

use std::io::Write;

use colored::Colorize;
use eyre::Result;
use seqpredict::{Echo, EchoLog, format_number, format_sequence};

const RULE: &str = "════════════════════════════════════════════════════════════";

pub fn welcome(out: &mut impl Write) -> Result<()> {
    writeln!(out, "╔{}╗", RULE)?;
    writeln!(out, "║{:^60}║", "CHAMBER OF ECHOES")?;
    writeln!(out, "║{:^60}║", "A Magical Number Sequence Predictor")?;
    writeln!(out, "╚{}╝", RULE)?;
    writeln!(out)?;
    writeln!(out, "{}", "The Legend:".bright_cyan())?;
    writeln!(out, "   Deep within an ancient chamber lies a wall covered in glowing numbers.")?;
    writeln!(out, "   Speak a sequence and the chamber echoes back the next number in the pattern.")?;
    writeln!(out)?;
    writeln!(out, "{}", "How It Works:".bright_cyan())?;
    writeln!(out, "   1. Input a sequence of numbers (arithmetic progression)")?;
    writeln!(out, "   2. The chamber analyzes the pattern")?;
    writeln!(out, "   3. The chamber echoes back the next number")?;
    writeln!(out, "   4. All echoes are remembered in the chamber's memory")?;
    writeln!(out)?;
    Ok(())
}

pub fn instructions(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", "Instructions:".bright_cyan())?;
    writeln!(out, "  {:14} Enter numbers separated by commas", "3, 6, 9, 12".yellow())?;
    writeln!(out, "  {:14} Show all recorded echoes", "memory".yellow())?;
    writeln!(out, "  {:14} Show example sequences", "example".yellow())?;
    writeln!(out, "  {:14} Predict the next 5 numbers", "predict 5".yellow())?;
    writeln!(out, "  {:14} Forget all recorded echoes", "clear".yellow())?;
    writeln!(out, "  {:14} Show these instructions", "help".yellow())?;
    writeln!(out, "  {:14} Leave the chamber", "exit".yellow())?;
    writeln!(out)?;
    Ok(())
}

/// Static example sequences with their expected next terms
pub const EXAMPLES: [(&str, &str); 6] = [
    ("3, 6, 9, 12", "15"),
    ("2, 4, 6, 8", "10"),
    ("1, 4, 7, 10", "13"),
    ("10, 7, 4, 1", "-2 (decreasing)"),
    ("5, 5, 5, 5", "5 (constant)"),
    ("100, 90, 80, 70", "60"),
];

pub fn examples(out: &mut impl Write) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "Example Sequences You Can Try:".bright_cyan())?;
    for (i, (sequence, next)) in EXAMPLES.iter().enumerate() {
        writeln!(out, "   {}. {:22} → Next: {}", i + 1, format!("\"{}\"", sequence), next)?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn echo(out: &mut impl Write, index: usize, echo: &Echo) -> Result<()> {
    let difference = echo.common_difference().map(format_number).unwrap_or_else(|| "none".to_string());
    writeln!(out, "  {}", format!("Echo {}:", index + 1).bright_white())?;
    writeln!(out, "    Sequence: {}", format_sequence(echo.sequence()))?;
    writeln!(out, "    Common Difference: {}", difference)?;
    writeln!(out, "    Predicted Next: {}", format_number(echo.prediction()))?;
    writeln!(out, "    Time: {}", echo.timestamp_iso().dimmed())?;
    writeln!(out)?;
    Ok(())
}

pub fn memory(out: &mut impl Write, log: &EchoLog) -> Result<()> {
    if log.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "No echoes recorded yet...".dimmed())?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{}", "Chamber Memory - Recorded Echoes:".bright_cyan())?;
    writeln!(out)?;
    for (i, recorded) in log.all().iter().enumerate() {
        echo(out, i, recorded)?;
    }
    Ok(())
}

pub fn farewell(out: &mut impl Write, log: &EchoLog) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "╔{}╗", RULE)?;
    writeln!(out, "║{:^60}║", "Thank You for Visiting the Chamber!")?;
    writeln!(out, "╚{}╝", RULE)?;
    writeln!(out)?;
    writeln!(out, "{}", "Session Summary:".bright_cyan())?;
    writeln!(out, "   Total Echoes Recorded: {}", log.count())?;
    if !log.is_empty() {
        memory(out, log)?;
    }
    writeln!(out, "May the patterns guide your path!")?;
    Ok(())
}

pub fn error(out: &mut impl Write, message: &str, hint: Option<&str>) -> Result<()> {
    writeln!(out, "{} {}", "❌".red(), message)?;
    if let Some(hint) = hint {
        writeln!(out, "   {} {}", "Hint:".yellow(), hint)?;
    }
    writeln!(out)?;
    Ok(())
}

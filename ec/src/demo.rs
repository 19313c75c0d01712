//! Guided walkthrough of the predictor (`ec demo`)

use std::io::Write;

use colored::Colorize;
use eyre::Result;
use seqpredict::{
    EchoLog, common_difference, format_number, format_sequence, is_valid_progression, parse_sequence,
    predict_multiple, predict_next,
};

fn heading(out: &mut impl Write, title: &str) -> Result<()> {
    writeln!(out, "{}", "═".repeat(60).dimmed())?;
    writeln!(out, "{}", title.bright_cyan())?;
    writeln!(out, "{}", "═".repeat(60).dimmed())?;
    writeln!(out)?;
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "none".to_string())
}

/// Analyze one free-form input the way the console does
fn analyze(out: &mut impl Write, input: &str) -> Result<()> {
    writeln!(out, "Analyzing: \"{}\"", input)?;

    let Some(sequence) = parse_sequence(input) else {
        writeln!(out, "{} Invalid input: \"{}\"", "❌".red(), input)?;
        return Ok(());
    };

    let (Some(difference), Some(next), Some(future)) = (
        common_difference(&sequence),
        predict_next(&sequence),
        predict_multiple(&sequence, 3),
    ) else {
        writeln!(out, "{} Not an arithmetic progression: {}", "❌".red(), format_sequence(&sequence))?;
        return Ok(());
    };

    writeln!(out, "{} Valid sequence: {}", "✅".green(), format_sequence(&sequence))?;
    writeln!(out, "   Common difference: {}", format_number(difference))?;
    writeln!(out, "   Next number: {}", format_number(next))?;
    writeln!(out, "   Next 3 numbers: {}", format_sequence(&future))?;
    Ok(())
}

/// Write the full walkthrough
pub fn run(out: &mut impl Write) -> Result<()> {
    heading(out, "Example 1: Basic Sequence Prediction")?;
    let basic = [3.0, 6.0, 9.0, 12.0];
    writeln!(out, "Sequence: {}", format_sequence(&basic))?;
    writeln!(out, "Is valid arithmetic progression? {}", is_valid_progression(&basic))?;
    writeln!(out, "Common difference: {}", optional(common_difference(&basic)))?;
    writeln!(out, "Next number: {}", optional(predict_next(&basic)))?;
    writeln!(out)?;

    heading(out, "Example 2: Decreasing Sequence")?;
    let decreasing = [100.0, 90.0, 80.0, 70.0];
    writeln!(out, "Sequence: {}", format_sequence(&decreasing))?;
    writeln!(out, "Common difference: {}", optional(common_difference(&decreasing)))?;
    writeln!(out, "Next number: {}", optional(predict_next(&decreasing)))?;
    writeln!(out)?;

    heading(out, "Example 3: Sequence with Negative Numbers")?;
    let negative = [-5.0, -3.0, -1.0, 1.0];
    writeln!(out, "Sequence: {}", format_sequence(&negative))?;
    writeln!(out, "Common difference: {}", optional(common_difference(&negative)))?;
    writeln!(out, "Next number: {}", optional(predict_next(&negative)))?;
    writeln!(out)?;

    heading(out, "Example 4: Multiple Predictions")?;
    let even = [2.0, 4.0, 6.0, 8.0];
    let predictions = predict_multiple(&even, seqpredict::DEFAULT_PREDICTION_COUNT).unwrap_or_default();
    writeln!(out, "Sequence: {}", format_sequence(&even))?;
    writeln!(out, "Next {} numbers: {}", predictions.len(), format_sequence(&predictions))?;
    writeln!(out)?;

    heading(out, "Example 5: Invalid Sequence (Not Arithmetic Progression)")?;
    let powers = [1.0, 2.0, 4.0, 8.0];
    writeln!(out, "Sequence: {}", format_sequence(&powers))?;
    writeln!(out, "Is valid arithmetic progression? {}", is_valid_progression(&powers))?;
    writeln!(out, "Next number: {}", optional(predict_next(&powers)))?;
    writeln!(out, "Reason: powers of 2 form a geometric progression, not an arithmetic one")?;
    writeln!(out)?;

    heading(out, "Example 6: Edge Cases")?;
    let edge_cases: [(&str, &[f64]); 4] = [
        ("Constant sequence", &[5.0, 5.0, 5.0, 5.0]),
        ("Two elements only", &[3.0, 6.0]),
        ("Large numbers", &[1000.0, 2000.0, 3000.0, 4000.0]),
        ("Decimal numbers", &[1.5, 3.0, 4.5, 6.0]),
    ];
    for (name, sequence) in edge_cases {
        writeln!(out, "{}: {}", name, format_sequence(sequence))?;
        writeln!(out, "  Valid: {}", is_valid_progression(sequence))?;
        if let Some(next) = predict_next(sequence) {
            writeln!(out, "  Next: {}", format_number(next))?;
        }
        writeln!(out)?;
    }

    heading(out, "Example 7: Using the Echo Log")?;
    let mut log = EchoLog::new();
    log.record(&[3.0, 6.0, 9.0, 12.0], 15.0);
    log.record(&[2.0, 4.0, 6.0, 8.0], 10.0);
    log.record(&[10.0, 7.0, 4.0, 1.0], -2.0);
    writeln!(out, "Total echoes recorded: {}", log.count())?;
    writeln!(out)?;
    writeln!(out, "All recorded echoes:")?;
    for (i, echo) in log.all().iter().enumerate() {
        writeln!(
            out,
            "  {}. {} → {}",
            i + 1,
            format_sequence(echo.sequence()),
            format_number(echo.prediction())
        )?;
    }
    writeln!(out)?;

    heading(out, "Example 8: Parsing User Input")?;
    for input in ["3, 6, 9, 12", "1,2,3,4,5", "  10  ,  20  ,  30  ", "invalid input", "1, 2, a, 4"] {
        let parsed = parse_sequence(input)
            .map(|sequence| format_sequence(&sequence))
            .unwrap_or_else(|| "none (invalid)".to_string());
        writeln!(out, "Input: \"{}\"", input)?;
        writeln!(out, "Parsed: {}", parsed)?;
        writeln!(out)?;
    }

    heading(out, "Example 9: Complete Workflow")?;
    for input in ["5, 10, 15, 20", "100, 95, 90, 85", "1, 1, 2, 3, 5"] {
        analyze(out, input)?;
        writeln!(out)?;
    }

    writeln!(out, "Run {} to check the reference scenarios.", "ec selftest".yellow())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_text() -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        run(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_demo_covers_examples() {
        let text = demo_text();
        assert!(text.contains("Next number: 15"));
        assert!(text.contains("Next number: 60"));
        assert!(text.contains("Next 5 numbers: [10, 12, 14, 16, 18]"));
        assert!(text.contains("Total echoes recorded: 3"));
        assert!(text.contains("3. [10, 7, 4, 1] → -2"));
    }

    #[test]
    fn test_demo_workflow() {
        let text = demo_text();
        assert!(text.contains("Next 3 numbers: [25, 30, 35]"));
        assert!(text.contains("Not an arithmetic progression: [1, 1, 2, 3, 5]"));
        assert!(text.contains("Parsed: none (invalid)"));
        assert!(text.contains("  Next: 7.5"));
    }
}

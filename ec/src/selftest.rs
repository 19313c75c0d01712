//! Built-in scenario checks (`ec selftest`)

use std::io::Write;

use colored::Colorize;
use eyre::Result;
use seqpredict::{common_difference, format_number, format_sequence, is_valid_progression, predict_next};

/// A reference progression and the answers it must produce
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub sequence: &'static [f64],
    pub expected_next: f64,
    pub expected_difference: f64,
}

pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        name: "Sample Sequence [3, 6, 9, 12]",
        sequence: &[3.0, 6.0, 9.0, 12.0],
        expected_next: 15.0,
        expected_difference: 3.0,
    },
    Scenario {
        name: "Even Numbers [2, 4, 6, 8]",
        sequence: &[2.0, 4.0, 6.0, 8.0],
        expected_next: 10.0,
        expected_difference: 2.0,
    },
    Scenario {
        name: "Decreasing [10, 7, 4, 1]",
        sequence: &[10.0, 7.0, 4.0, 1.0],
        expected_next: -2.0,
        expected_difference: -3.0,
    },
    Scenario {
        name: "Constant [5, 5, 5, 5]",
        sequence: &[5.0, 5.0, 5.0, 5.0],
        expected_next: 5.0,
        expected_difference: 0.0,
    },
    Scenario {
        name: "Negative Numbers [-5, -3, -1, 1]",
        sequence: &[-5.0, -3.0, -1.0, 1.0],
        expected_next: 3.0,
        expected_difference: 2.0,
    },
];

/// Sequences with a known validity verdict
pub const EDGE_CASES: [(&str, &[f64], bool); 4] = [
    ("Invalid Progression (powers of 2)", &[1.0, 2.0, 4.0, 8.0], false),
    ("Empty Array", &[], false),
    ("Single Element", &[5.0], false),
    ("Two Elements", &[3.0, 6.0], true),
];

/// Outcome of a selftest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelftestReport {
    pub passed: usize,
    pub failed: usize,
}

impl SelftestReport {
    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

impl Scenario {
    fn check(&self) -> bool {
        is_valid_progression(self.sequence)
            && predict_next(self.sequence) == Some(self.expected_next)
            && common_difference(self.sequence) == Some(self.expected_difference)
    }
}

/// Run every scenario and edge case, writing a line per check
pub fn run(out: &mut impl Write) -> Result<SelftestReport> {
    let mut report = SelftestReport::default();

    writeln!(out, "{}", "Running Test Suite...".bright_cyan())?;
    writeln!(out)?;

    for scenario in &SCENARIOS {
        if scenario.check() {
            writeln!(out, "{} {}", "✅".green(), scenario.name)?;
            report.passed += 1;
        } else {
            let got = predict_next(scenario.sequence).map(format_number).unwrap_or_else(|| "none".to_string());
            writeln!(out, "{} {}", "❌".red(), scenario.name)?;
            writeln!(
                out,
                "   Expected: {}, Got: {}",
                format_number(scenario.expected_next),
                got
            )?;
            report.failed += 1;
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", "Edge Case Tests:".bright_cyan())?;
    for (name, sequence, expected) in EDGE_CASES {
        let valid = is_valid_progression(sequence);
        let icon = if valid == expected { "✅".green() } else { "❌".red() };
        writeln!(out, "{} {} {}: valid = {}", icon, name, format_sequence(sequence), valid)?;
        if valid == expected {
            report.passed += 1;
        } else {
            report.failed += 1;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "Test Results: {} passed, {} failed",
        report.passed.to_string().green(),
        report.failed.to_string().red()
    )?;
    Ok(report)
}

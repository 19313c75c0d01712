//! Comma-separated text to numeric sequences

use tracing::debug;

/// Parse a comma-separated list of decimal numbers
///
/// Every piece between commas is trimmed and must parse completely as a
/// finite number. A single bad piece (including an empty one from a leading,
/// trailing or doubled comma) makes the whole input invalid; no partial list
/// is ever returned.
///
/// This is stricter than a lenient float prefix parse: `"12abc"` and
/// `"Infinity"` are rejected rather than read as `12` and infinity.
pub fn parse_sequence(input: &str) -> Option<Vec<f64>> {
    let mut sequence = Vec::new();

    for piece in input.split(',') {
        match parse_number(piece.trim()) {
            Some(value) => sequence.push(value),
            None => {
                debug!(%input, %piece, "parse_sequence: rejected piece");
                return None;
            }
        }
    }

    Some(sequence)
}

fn parse_number(text: &str) -> Option<f64> {
    // f64::from_str also accepts "inf" and "NaN"; those are not decimal numbers here
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

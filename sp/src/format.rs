//! Rendering numbers and sequences for display and for JSON

/// Render a number without a trailing `.0` on whole values
///
/// Negative zero renders as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 { "0".to_string() } else { value.to_string() }
}

/// Render a sequence as `[a, b, c]`
pub fn format_sequence(sequence: &[f64]) -> String {
    format!("[{}]", join_sequence(sequence))
}

/// Render a sequence as `a, b, c`, the form `parse_sequence` reads back
pub fn join_sequence(sequence: &[f64]) -> String {
    sequence.iter().map(|value| format_number(*value)).collect::<Vec<_>>().join(", ")
}

/// Serde helpers that write whole numbers as JSON integers
///
/// `serde_json` writes every `f64` with a fractional part (`15.0`); clients of
/// the HTTP API expect `15`. Values that are not whole, or too large to be
/// exact integers, are written as floats.
pub mod json {
    use serde::{Serialize, Serializer};

    /// Largest magnitude below which every whole `f64` is an exact integer
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;

    fn whole(value: f64) -> Option<i64> {
        (value.fract() == 0.0 && value.abs() < EXACT_LIMIT).then_some(value as i64)
    }

    struct Whole(f64);

    impl Serialize for Whole {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            number(&self.0, serializer)
        }
    }

    pub fn number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        match whole(*value) {
            Some(integer) => serializer.serialize_i64(integer),
            None => serializer.serialize_f64(*value),
        }
    }

    pub fn option<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => number(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn list<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|value| Whole(*value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(-10.0), "-10");
        assert_eq!(format_number(7.5), "7.5");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_sequence() {
        assert_eq!(format_sequence(&[3.0, 6.0, 9.0]), "[3, 6, 9]");
        assert_eq!(format_sequence(&[]), "[]");
        assert_eq!(join_sequence(&[1.5, -2.0]), "1.5, -2");
    }

    #[derive(serde::Serialize)]
    struct Sample {
        #[serde(serialize_with = "json::number")]
        value: f64,
        #[serde(serialize_with = "json::option")]
        maybe: Option<f64>,
        #[serde(serialize_with = "json::list")]
        values: Vec<f64>,
    }

    #[test]
    fn test_json_whole_numbers() {
        let sample = Sample {
            value: 15.0,
            maybe: None,
            values: vec![3.0, -0.5, 1e300],
        };
        let text = serde_json::to_string(&sample).unwrap();
        assert_eq!(text, r#"{"value":15,"maybe":null,"values":[3,-0.5,1e300]}"#);

        let sample = Sample {
            value: 7.5,
            maybe: Some(-10.0),
            values: vec![],
        };
        let text = serde_json::to_string(&sample).unwrap();
        assert_eq!(text, r#"{"value":7.5,"maybe":-10,"values":[]}"#);
    }
}

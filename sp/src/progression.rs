//! Arithmetic progression analysis

/// Whether `sequence` is an arithmetic progression
///
/// Needs at least two finite values with a finite difference, and every
/// adjacent difference must equal `sequence[1] - sequence[0]` exactly. There is
/// no tolerance: decimal inputs whose differences do not round to the same
/// `f64` are rejected.
pub fn is_valid_progression(sequence: &[f64]) -> bool {
    if sequence.len() < 2 || !sequence.iter().all(|value| value.is_finite()) {
        return false;
    }

    let difference = sequence[1] - sequence[0];
    if !difference.is_finite() {
        return false;
    }
    sequence.windows(2).skip(1).all(|pair| pair[1] - pair[0] == difference)
}

/// The common difference, or `None` when `sequence` is not a progression
pub fn common_difference(sequence: &[f64]) -> Option<f64> {
    is_valid_progression(sequence).then(|| sequence[1] - sequence[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_progressions() {
        let cases: [(&[f64], f64); 5] = [
            (&[3.0, 6.0, 9.0, 12.0], 3.0),
            (&[2.0, 4.0, 6.0, 8.0], 2.0),
            (&[10.0, 7.0, 4.0, 1.0], -3.0),
            (&[5.0, 5.0, 5.0, 5.0], 0.0),
            (&[-5.0, -3.0, -1.0, 1.0], 2.0),
        ];

        for (sequence, expected) in cases {
            assert!(is_valid_progression(sequence), "{:?} should be valid", sequence);
            assert_eq!(common_difference(sequence), Some(expected));
        }
    }

    #[test]
    fn test_decreasing() {
        assert_eq!(common_difference(&[100.0, 90.0, 80.0, 70.0]), Some(-10.0));
    }

    #[test]
    fn test_two_elements_are_enough() {
        assert!(is_valid_progression(&[3.0, 6.0]));
        assert_eq!(common_difference(&[3.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_too_short() {
        assert!(!is_valid_progression(&[]));
        assert!(!is_valid_progression(&[5.0]));
        assert_eq!(common_difference(&[5.0]), None);
    }

    #[test]
    fn test_geometric_is_rejected() {
        assert!(!is_valid_progression(&[1.0, 2.0, 4.0, 8.0]));
        assert_eq!(common_difference(&[1.0, 2.0, 4.0, 8.0]), None);
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(!is_valid_progression(&[1.0, f64::NAN, 3.0]));
        assert!(!is_valid_progression(&[f64::INFINITY, f64::INFINITY]));
        assert!(!is_valid_progression(&[1.0, 2.0, f64::NEG_INFINITY]));
    }

    #[test]
    fn test_overflowing_difference_is_rejected() {
        assert!(!is_valid_progression(&[1.7e308, -1.7e308]));
        assert_eq!(common_difference(&[-1.7e308, 1.7e308]), None);
        assert!(is_valid_progression(&[-1.0e308, 0.0, 1.0e308]));
    }

    #[test]
    fn test_exact_decimal_progression() {
        assert!(is_valid_progression(&[1.5, 3.0, 4.5, 6.0]));
    }

    #[test]
    fn test_rounding_is_not_forgiven() {
        // 0.1 + 0.2 - 0.2 != 0.2 - 0.1 in binary floating point
        assert!(!is_valid_progression(&[0.1, 0.2, 0.30000000000000004, 0.4]));
    }

    proptest! {
        #[test]
        fn prop_constant_difference_is_valid(start in -1000i32..1000, step in -100i32..100, len in 2usize..30) {
            let sequence: Vec<f64> = (0..len).map(|i| f64::from(start) + f64::from(step) * i as f64).collect();
            prop_assert!(is_valid_progression(&sequence));
            prop_assert_eq!(common_difference(&sequence), Some(f64::from(step)));
        }

        #[test]
        fn prop_short_sequences_are_invalid(values in prop::collection::vec(any::<f64>(), 0..2)) {
            prop_assert!(!is_valid_progression(&values));
        }

        #[test]
        fn prop_nan_anywhere_is_invalid(values in prop::collection::vec(-1.0e6f64..1.0e6, 2..10), at in any::<prop::sample::Index>()) {
            let mut values = values;
            let index = at.index(values.len());
            values[index] = f64::NAN;
            prop_assert!(!is_valid_progression(&values));
        }
    }
}

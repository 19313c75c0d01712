//! Extending arithmetic progressions

use crate::progression::common_difference;

/// The term following the last element, or `None` for an invalid progression
pub fn predict_next(sequence: &[f64]) -> Option<f64> {
    let difference = common_difference(sequence)?;
    let last = sequence.last()?;
    Some(last + difference)
}

/// The next `count` terms, in order
///
/// Each term is the previous one plus the common difference, starting from
/// the last known element. Returns `None` for an invalid progression or when
/// `count` is below one.
pub fn predict_multiple(sequence: &[f64], count: i64) -> Option<Vec<f64>> {
    if count < 1 {
        return None;
    }
    let difference = common_difference(sequence)?;
    let mut current = *sequence.last()?;

    let predictions = (0..count)
        .map(|_| {
            current += difference;
            current
        })
        .collect();
    Some(predictions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_predict_next_scenarios() {
        assert_eq!(predict_next(&[3.0, 6.0, 9.0, 12.0]), Some(15.0));
        assert_eq!(predict_next(&[100.0, 90.0, 80.0, 70.0]), Some(60.0));
        assert_eq!(predict_next(&[-5.0, -3.0, -1.0, 1.0]), Some(3.0));
        assert_eq!(predict_next(&[5.0, 5.0, 5.0, 5.0]), Some(5.0));
        assert_eq!(predict_next(&[10.0, 7.0, 4.0, 1.0]), Some(-2.0));
        assert_eq!(predict_next(&[1.5, 3.0, 4.5, 6.0]), Some(7.5));
    }

    #[test]
    fn test_predict_next_invalid() {
        assert_eq!(predict_next(&[1.0, 2.0, 4.0, 8.0]), None);
        assert_eq!(predict_next(&[7.0]), None);
        assert_eq!(predict_next(&[]), None);
    }

    #[test]
    fn test_predict_multiple() {
        assert_eq!(predict_multiple(&[2.0, 4.0, 6.0, 8.0], 3), Some(vec![10.0, 12.0, 14.0]));
        assert_eq!(
            predict_multiple(&[2.0, 4.0, 6.0, 8.0], crate::DEFAULT_PREDICTION_COUNT),
            Some(vec![10.0, 12.0, 14.0, 16.0, 18.0])
        );
        assert_eq!(predict_multiple(&[3.0, 6.0], 1), Some(vec![9.0]));
    }

    #[test]
    fn test_predict_multiple_rejects_bad_count() {
        assert_eq!(predict_multiple(&[2.0, 4.0], 0), None);
        assert_eq!(predict_multiple(&[2.0, 4.0], -3), None);
    }

    #[test]
    fn test_predict_multiple_rejects_invalid_sequence() {
        assert_eq!(predict_multiple(&[1.0, 2.0, 4.0], 3), None);
    }

    #[test]
    fn test_deterministic() {
        let sequence = [0.5, 1.25, 2.0];
        assert_eq!(predict_multiple(&sequence, 10), predict_multiple(&sequence, 10));
    }

    proptest! {
        #[test]
        fn prop_next_is_last_plus_difference(start in -10_000i32..10_000, step in -500i32..500, len in 2usize..20) {
            let sequence: Vec<f64> = (0..len).map(|i| f64::from(start) + f64::from(step) * i as f64).collect();
            let last = sequence[len - 1];
            prop_assert_eq!(predict_next(&sequence), Some(last + f64::from(step)));
        }

        #[test]
        fn prop_multiple_follows_closed_form(start in -10_000i32..10_000, step in -500i32..500, count in 1i64..50) {
            let sequence = [f64::from(start), f64::from(start) + f64::from(step)];
            let predictions = predict_multiple(&sequence, count).unwrap();
            prop_assert_eq!(predictions.len() as i64, count);
            for (i, value) in predictions.iter().enumerate() {
                prop_assert_eq!(*value, sequence[1] + (i as f64 + 1.0) * f64::from(step));
            }
        }

        #[test]
        fn prop_non_positive_count_is_absent(count in i64::MIN..1) {
            prop_assert_eq!(predict_multiple(&[1.0, 2.0], count), None);
        }
    }
}

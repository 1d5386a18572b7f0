/// Error metrics between the predicted and the actual surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ErrorSummary {
    /// Number of pairs where both values are present.
    pub count: usize,
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    pub max_abs: f64,
}

impl ErrorSummary {
    /// Compare `predicted` against `actual` pairwise. Pairs with a NaN on
    /// either side are skipped; extra values on the longer side are ignored.
    pub fn between(predicted: &[f64], actual: &[f64]) -> Self {
        let mut count = 0usize;
        let mut abs_sum = 0.0;
        let mut sq_sum = 0.0;
        let mut max_abs: f64 = 0.0;

        for (p, a) in predicted.iter().zip(actual) {
            if p.is_nan() || a.is_nan() {
                continue;
            }
            let err = (p - a).abs();
            count += 1;
            abs_sum += err;
            sq_sum += err * err;
            max_abs = max_abs.max(err);
        }

        if count == 0 {
            return ErrorSummary::default();
        }
        let mse = sq_sum / count as f64;
        ErrorSummary {
            count,
            mae: abs_sum / count as f64,
            mse,
            rmse: mse.sqrt(),
            max_abs,
        }
    }
}

/// `(min, max)` over the finite values, `None` if there are none.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_summary_matches_hand_computation() {
        let predicted = [1.0, 2.0, 3.0, 4.0];
        let actual = [1.0, 3.0, 1.0, 4.5];
        let s = ErrorSummary::between(&predicted, &actual);
        assert_eq!(s.count, 4);
        assert!((s.mae - 3.5 / 4.0).abs() < 1e-12);
        assert!((s.mse - 5.25 / 4.0).abs() < 1e-12);
        assert!((s.rmse - (5.25f64 / 4.0).sqrt()).abs() < 1e-12);
        assert_eq!(s.max_abs, 2.0);
    }

    #[test]
    fn test_nan_pairs_are_skipped() {
        let s = ErrorSummary::between(&[f64::NAN, 2.0, 5.0], &[0.0, 1.0, f64::NAN]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mae, 1.0);
        assert_eq!(ErrorSummary::between(&[], &[]), ErrorSummary::default());
    }

    #[test]
    fn test_finite_range_ignores_non_finite() {
        assert_eq!(finite_range(&[3.0, f64::NAN, -1.0, f64::INFINITY, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks (the method
/// spreadsheets and most plotting libraries default to). For a sample of
/// `n` values, the `k`-th percentile sits at fractional position
/// `(n - 1) * k / 100`.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0, clamped)
///
/// # Returns
///
/// The interpolated value. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use abreport_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(compute_percentile(&values, 50.0), 3.0);
/// assert_eq!(compute_percentile(&values, 25.0), 2.0);
/// assert_eq!(compute_percentile(&[1.0, 2.0], 50.0), 1.5);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let position = (sorted_values.len() - 1) as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}

/// First quartile, median and third quartile of sorted data.
///
/// Returns `None` for an empty sample.
#[must_use]
pub fn quartiles(sorted_values: &[f64]) -> Option<(f64, f64, f64)> {
    if sorted_values.is_empty() {
        return None;
    }
    Some((
        compute_percentile(sorted_values, 25.0),
        compute_percentile(sorted_values, 50.0),
        compute_percentile(sorted_values, 75.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
        assert!(quartiles(&[]).is_none());
    }

    #[test]
    fn test_extremes() {
        let values = [2.0, 4.0, 8.0];
        assert_eq!(compute_percentile(&values, 0.0), 2.0);
        assert_eq!(compute_percentile(&values, 100.0), 8.0);
        assert_eq!(compute_percentile(&values, 150.0), 8.0);
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [0.0, 10.0, 20.0, 30.0, 40.0];
        assert_eq!(compute_percentile(&values, 10.0), 4.0);
        assert_eq!(compute_percentile(&values, 90.0), 36.0);
    }

    #[test]
    fn test_quartiles() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(quartiles(&values), Some((3.0, 5.0, 7.0)));
    }
}

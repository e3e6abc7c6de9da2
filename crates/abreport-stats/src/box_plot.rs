use serde::Serialize;

use crate::{descriptive::DescriptiveStats, percentiles};

/// Multiplier applied to the interquartile range to place the whisker fences.
pub const TUKEY_FENCE: f64 = 1.5;

/// Five-number summary behind a Tukey box plot.
///
/// Whiskers extend to the most extreme observations that still lie within
/// `TUKEY_FENCE` interquartile ranges of the box; anything beyond is counted
/// as an outlier.
///
/// # Examples
///
/// ```
/// use abreport_stats::box_plot::BoxPlotSummary;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
/// let summary = BoxPlotSummary::new(values).unwrap();
///
/// assert_eq!(summary.q1, 3.0);
/// assert_eq!(summary.median, 5.0);
/// assert_eq!(summary.q3, 7.0);
/// assert_eq!(summary.upper_whisker, 8.0);
/// assert_eq!(summary.outlier_count, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// `q3 - q1`
    pub iqr: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    /// Observations outside the whisker fences.
    pub outlier_count: usize,
}

impl BoxPlotSummary {
    /// Computes the summary from unsorted values, or `None` if empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from pre-sorted values, or `None` if empty.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (q1, median, q3) = percentiles::quartiles(sorted_values)?;
        let iqr = q3 - q1;
        let lower_fence = q1 - TUKEY_FENCE * iqr;
        let upper_fence = q3 + TUKEY_FENCE * iqr;

        let inside = sorted_values
            .iter()
            .copied()
            .filter(|v| (lower_fence..=upper_fence).contains(v));
        // The quartiles always lie inside the fences, so at least one value does too.
        let lower_whisker = inside.clone().next().unwrap_or(q1);
        let upper_whisker = inside.last().unwrap_or(q3);
        let outlier_count = sorted_values
            .iter()
            .filter(|v| !(lower_fence..=upper_fence).contains(*v))
            .count();

        Some(Self {
            q1,
            median,
            q3,
            iqr,
            lower_whisker,
            upper_whisker,
            outlier_count,
        })
    }
}

/// Descriptive statistics together with the box-plot summary of one sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub stats: DescriptiveStats,
    pub box_plot: BoxPlotSummary,
}

impl DistributionSummary {
    /// Sorts the values once and computes both summaries.
    ///
    /// Returns `None` if the sample is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use abreport_stats::box_plot::DistributionSummary;
    ///
    /// let summary = DistributionSummary::new([3.0, 1.0, 2.0]).unwrap();
    /// assert_eq!(summary.stats.mean, 2.0);
    /// assert_eq!(summary.box_plot.median, 2.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Some(Self {
            stats: DescriptiveStats::from_sorted(&sorted)?,
            box_plot: BoxPlotSummary::from_sorted(&sorted)?,
        })
    }
}

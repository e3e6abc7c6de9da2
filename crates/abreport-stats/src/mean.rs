use serde::Serialize;

/// Running arithmetic mean.
///
/// Values are summed in the order they are pushed, so feeding the same
/// sequence always yields a bit-identical result.
///
/// # Examples
///
/// ```
/// use abreport_stats::mean::MeanAccumulator;
///
/// let mut acc = MeanAccumulator::default();
/// assert_eq!(acc.mean(), None);
/// acc.push(1.0);
/// acc.push(0.0);
/// assert_eq!(acc.count(), 2);
/// assert_eq!(acc.mean(), Some(0.5));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    pub fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of the pushed values, or `None` if nothing was pushed.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

impl Extend<f64> for MeanAccumulator {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for MeanAccumulator {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        let mut acc = Self::default();
        acc.extend(iter);
        acc
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_collect() {
        let acc: MeanAccumulator = [2.0, 4.0, 9.0].into_iter().collect();
        assert_eq!(acc.count(), 3);
        assert_eq!(acc.mean(), Some(5.0));
    }

    proptest! {
        #[test]
        fn test_mean_within_bounds(values in prop::collection::vec(0.0f64..1e6, 1..200)) {
            let acc: MeanAccumulator = values.iter().copied().collect();
            let mean = acc.mean().unwrap();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(mean >= min - 1e-6 && mean <= max + 1e-6);
        }
    }
}

//! Accumulating the observed extent of plotted data.

use num_traits::Float;

/// Running min/max over the values of one or more series.
///
/// Non-finite values are skipped. A range built with
/// [`DataRange::positive_only`] also skips values `<= 0`, which is what a
/// logarithmic axis can show.
///
/// # Examples
///
/// ```
/// use niceaxis::DataRange;
///
/// let mut range = DataRange::new();
/// range.extend([3.0, f64::NAN, -2.0, 8.5]);
/// assert_eq!(range.bounds(), Some((-2.0, 8.5)));
///
/// let mut positive = DataRange::positive_only();
/// positive.extend([3.0, -2.0, 0.0, 8.5]);
/// assert_eq!(positive.bounds(), Some((3.0, 8.5)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataRange<D = f64> {
    bounds: Option<(D, D)>,
    positive_only: bool,
}

impl<D: Float> Default for DataRange<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Float> DataRange<D> {
    /// An empty range accepting any finite value.
    pub fn new() -> Self {
        Self {
            bounds: None,
            positive_only: false,
        }
    }

    /// An empty range accepting only finite values above zero.
    pub fn positive_only() -> Self {
        Self {
            bounds: None,
            positive_only: true,
        }
    }

    /// Whether `value` would be counted by [`include`](Self::include).
    pub fn accepts(&self, value: D) -> bool {
        value.is_finite() && (!self.positive_only || value > D::zero())
    }

    /// Widen the range to cover `value`, if accepted.
    pub fn include(&mut self, value: D) {
        if !self.accepts(value) {
            return;
        }
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    /// Combine with another range. Only the bounds of `other` are re-checked
    /// against this range's filter, so merging a signed range into a
    /// [`positive_only`](Self::positive_only) one drops positive values that
    /// lay between those bounds. Feed raw values through
    /// [`extend`](Extend::extend) instead when the filters differ.
    pub fn merge(&mut self, other: &DataRange<D>) {
        if let Some((min, max)) = other.bounds {
            self.include(min);
            self.include(max);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// `(min, max)` of everything included so far.
    pub fn bounds(&self) -> Option<(D, D)> {
        self.bounds
    }
}

impl<D: Float> Extend<D> for DataRange<D> {
    fn extend<I: IntoIterator<Item = D>>(&mut self, iter: I) {
        for value in iter {
            self.include(value);
        }
    }
}

impl<D: Float> FromIterator<D> for DataRange<D> {
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut range = Self::new();
        range.extend(iter);
        range
    }
}

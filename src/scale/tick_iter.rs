use super::linear::LinearTickIter;
use super::log::LogTickIter;
use super::Tick;
use num_traits::Float;

/// Iterator over the ticks of a [`ScaleSpec`](super::ScaleSpec), in
/// ascending order.
///
/// # Examples
///
/// ```
/// use niceaxis::ScaleSpec;
///
/// let mut scale = ScaleSpec::<f64>::new();
/// scale.pick_scale(0.0, 1.0);
///
/// let majors: Vec<f64> = scale.ticks().majors().collect();
/// assert_eq!(majors.len(), 11);
/// // minor step 0.02: four minors between each pair of majors
/// assert_eq!(scale.ticks().minors().count(), 40);
/// ```
pub struct TickIter<D: Float> {
    source: TickSource<D>,
}

enum TickSource<D: Float> {
    Linear(LinearTickIter<D>),
    Log(LogTickIter<D>),
    Empty,
}

impl<D: Float> TickIter<D> {
    /// Creates an empty `TickIter`, returned for scales that cannot be drawn.
    ///
    /// # Examples
    ///
    /// ```
    /// use niceaxis::TickIter;
    ///
    /// let iter = TickIter::<f64>::empty();
    /// assert_eq!(iter.count(), 0);
    /// ```
    pub fn empty() -> Self {
        Self {
            source: TickSource::Empty,
        }
    }

    pub(crate) fn from_linear(iter: LinearTickIter<D>) -> Self {
        Self {
            source: TickSource::Linear(iter),
        }
    }

    pub(crate) fn from_log(iter: LogTickIter<D>) -> Self {
        Self {
            source: TickSource::Log(iter),
        }
    }

    /// Values of the labeled ticks.
    pub fn majors(self) -> impl Iterator<Item = D> {
        self.filter(Tick::is_major).map(|tick| tick.value)
    }

    /// Values of the unlabeled ticks.
    pub fn minors(self) -> impl Iterator<Item = D> {
        self.filter(|tick| !tick.is_major()).map(|tick| tick.value)
    }
}

impl<D: Float> Iterator for TickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            TickSource::Linear(iter) => iter.next(),
            TickSource::Log(iter) => iter.next(),
            TickSource::Empty => None,
        }
    }
}

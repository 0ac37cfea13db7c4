//! Axis scale state and the auto-ranging algorithm.
//!
//! A [`ScaleSpec`] holds the displayed range of one axis together with the
//! tick spacing and label precision chosen for it. Any field may be pinned by
//! the caller; everything left on auto is recomputed by
//! [`ScaleSpec::pick_scale`] from the observed data range.
//!
//! The linear and logarithmic branches of the algorithm live in
//! [`linear`] and [`log`], next to the tick iterators for each mode.

pub mod linear;
pub mod log;
mod tick_iter;
pub(crate) mod util;

use num_traits::Float;
use tracing::{debug, trace};

use crate::config::ScaleDefaults;
use crate::error::{Result, ScaleError};
use crate::range::DataRange;

pub use tick_iter::TickIter;
pub use util::{calc_step_size, modulo, safe_log10};

use util::{lit, pow10, safe_log10_with};

/// A tick mark produced by a scale.
///
/// `level` is `0` for major (labeled) ticks and `1` for minor ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick<D> {
    pub value: D,
    pub level: u8,
}

impl<D> Tick<D> {
    /// Returns true for labeled ticks.
    pub fn is_major(&self) -> bool {
        self.level == 0
    }
}

/// Mapping used between scale values and positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleKind {
    #[default]
    Linear,
    Logarithmic,
}

/// Which end of the range a substitution touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Min,
    Max,
}

/// A substitution made by [`ScaleSpec::pick_scale`] to keep the scale usable.
///
/// Auto-ranging never fails. These records let callers outside a rendering
/// context notice that the data they supplied was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// A non-finite data bound was replaced by the configured default.
    NonFiniteData(RangeEnd),
    /// Both logarithmic bounds were non-positive; the range was reset to `1..10`.
    LogDomainReset,
    /// A non-positive logarithmic minimum was replaced by `max / 10`.
    LogMinReplaced,
    /// A non-positive logarithmic maximum was replaced by `min * 10`.
    LogMaxReplaced,
    /// The range was flat (or inverted when `inverted` is set) and one end was moved.
    RangeExpanded { end: RangeEnd, inverted: bool },
}

#[derive(Debug, Clone, Copy)]
struct Pins<D> {
    min: Option<D>,
    max: Option<D>,
    major_step: Option<D>,
    minor_step: Option<D>,
    decimal_places: Option<u32>,
    magnitude_exponent: Option<i32>,
}

impl<D> Default for Pins<D> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            major_step: None,
            minor_step: None,
            decimal_places: None,
            magnitude_exponent: None,
        }
    }
}

/// The scale of one axis: range, tick spacing and label precision.
///
/// Values left on auto are chosen by [`pick_scale`](Self::pick_scale);
/// values set through the `set_*` methods are pinned and never overwritten
/// until the matching `clear_*` call.
///
/// # Examples
///
/// ```
/// use niceaxis::ScaleSpec;
///
/// let mut scale = ScaleSpec::<f64>::new();
/// scale.pick_scale(2.0, 97.0);
///
/// // Close enough to zero that the axis starts there.
/// assert_eq!(scale.min(), 0.0);
/// assert_eq!(scale.max(), 100.0);
/// assert_eq!(scale.major_step(), 10.0);
/// assert_eq!(scale.minor_step(), 2.0);
/// assert_eq!(scale.decimal_places(), 0);
/// ```
///
/// Pinning a value:
///
/// ```
/// use niceaxis::ScaleSpec;
///
/// let mut scale = ScaleSpec::<f64>::new();
/// scale.set_min(5.0);
/// scale.pick_scale(0.0, 100.0);
///
/// assert_eq!(scale.min(), 5.0);
/// assert!(!scale.is_min_auto());
/// assert!(scale.max() >= 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScaleSpec<D = f64> {
    defaults: ScaleDefaults,
    kind: ScaleKind,
    reversed: bool,
    pins: Pins<D>,
    min: D,
    max: D,
    major_step: D,
    minor_step: D,
    decimal_places: u32,
    magnitude_exponent: i32,
}

impl<D: Float> Default for ScaleSpec<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Float> ScaleSpec<D> {
    /// Creates a scale with [`ScaleDefaults::default`]: range `0..1`, step `0.1`,
    /// every field on auto.
    pub fn new() -> Self {
        Self::with_defaults(ScaleDefaults::default())
    }

    /// Creates a scale from explicit defaults.
    pub fn with_defaults(defaults: ScaleDefaults) -> Self {
        let kind = if defaults.logarithmic {
            ScaleKind::Logarithmic
        } else {
            ScaleKind::Linear
        };
        Self {
            kind,
            reversed: defaults.reversed,
            pins: Pins::default(),
            min: lit(defaults.min),
            max: lit(defaults.max),
            major_step: lit(defaults.major_step),
            minor_step: lit(defaults.minor_step),
            decimal_places: defaults.decimal_places,
            magnitude_exponent: defaults.magnitude_exponent,
            defaults,
        }
    }

    /// The defaults this scale was built with.
    pub fn defaults(&self) -> &ScaleDefaults {
        &self.defaults
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ScaleKind) {
        self.kind = kind;
    }

    pub fn is_logarithmic(&self) -> bool {
        self.kind == ScaleKind::Logarithmic
    }

    pub fn set_logarithmic(&mut self, logarithmic: bool) {
        self.kind = if logarithmic {
            ScaleKind::Logarithmic
        } else {
            ScaleKind::Linear
        };
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    pub fn min(&self) -> D {
        self.min
    }

    pub fn max(&self) -> D {
        self.max
    }

    /// Spacing between labeled ticks. Only meaningful for linear scales.
    pub fn major_step(&self) -> D {
        self.major_step
    }

    /// Spacing between unlabeled ticks. Only meaningful for linear scales.
    pub fn minor_step(&self) -> D {
        self.minor_step
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    /// Power of ten that tick labels are divided by.
    pub fn magnitude_exponent(&self) -> i32 {
        self.magnitude_exponent
    }

    pub fn set_min(&mut self, min: D) {
        self.pins.min = Some(min);
        self.min = min;
    }

    pub fn set_max(&mut self, max: D) {
        self.pins.max = Some(max);
        self.max = max;
    }

    pub fn set_major_step(&mut self, step: D) {
        self.pins.major_step = Some(step);
        self.major_step = step;
    }

    pub fn set_minor_step(&mut self, step: D) {
        self.pins.minor_step = Some(step);
        self.minor_step = step;
    }

    pub fn set_decimal_places(&mut self, places: u32) {
        self.pins.decimal_places = Some(places);
        self.decimal_places = places;
    }

    pub fn set_magnitude_exponent(&mut self, exponent: i32) {
        self.pins.magnitude_exponent = Some(exponent);
        self.magnitude_exponent = exponent;
    }

    pub fn clear_min(&mut self) {
        self.pins.min = None;
    }

    pub fn clear_max(&mut self) {
        self.pins.max = None;
    }

    pub fn clear_major_step(&mut self) {
        self.pins.major_step = None;
    }

    pub fn clear_minor_step(&mut self) {
        self.pins.minor_step = None;
    }

    pub fn clear_decimal_places(&mut self) {
        self.pins.decimal_places = None;
    }

    pub fn clear_magnitude_exponent(&mut self) {
        self.pins.magnitude_exponent = None;
    }

    /// Returns every field to auto. Current values stay until the next
    /// [`pick_scale`](Self::pick_scale).
    pub fn set_all_auto(&mut self) {
        self.pins = Pins::default();
    }

    pub fn is_min_auto(&self) -> bool {
        self.pins.min.is_none()
    }

    pub fn is_max_auto(&self) -> bool {
        self.pins.max.is_none()
    }

    pub fn is_major_step_auto(&self) -> bool {
        self.pins.major_step.is_none()
    }

    pub fn is_minor_step_auto(&self) -> bool {
        self.pins.minor_step.is_none()
    }

    pub fn is_decimal_places_auto(&self) -> bool {
        self.pins.decimal_places.is_none()
    }

    pub fn is_magnitude_exponent_auto(&self) -> bool {
        self.pins.magnitude_exponent.is_none()
    }

    /// Choose range, steps, precision and magnitude for data spanning
    /// `data_min..=data_max`, leaving pinned fields alone.
    ///
    /// Never fails: flat, inverted or out-of-domain input is replaced by safe
    /// values, and each replacement is reported in the returned list.
    ///
    /// # Examples
    ///
    /// ```
    /// use niceaxis::{Adjustment, ScaleSpec};
    ///
    /// let mut scale = ScaleSpec::<f64>::new();
    /// scale.set_logarithmic(true);
    ///
    /// let adjustments = scale.pick_scale(3.0, 450.0);
    /// assert!(adjustments.is_empty());
    /// assert_eq!(scale.min(), 1.0);
    /// assert_eq!(scale.max(), 1000.0);
    ///
    /// let adjustments = scale.pick_scale(-4.0, 0.0);
    /// assert_eq!(adjustments, vec![Adjustment::LogDomainReset]);
    /// assert_eq!(scale.min(), 1.0);
    /// assert_eq!(scale.max(), 10.0);
    /// ```
    pub fn pick_scale(&mut self, data_min: D, data_max: D) -> Vec<Adjustment> {
        let mut adjustments = Vec::new();

        self.min = match self.pins.min {
            Some(min) => min,
            None => self.finite_or_default(data_min, RangeEnd::Min, &mut adjustments),
        };
        self.max = match self.pins.max {
            Some(max) => max,
            None => self.finite_or_default(data_max, RangeEnd::Max, &mut adjustments),
        };

        match self.kind {
            ScaleKind::Linear => linear::pick_linear(self, &mut adjustments),
            ScaleKind::Logarithmic => log::pick_log(self, &mut adjustments),
        }

        trace!(
            min = ?self.min.to_f64(),
            max = ?self.max.to_f64(),
            major_step = ?self.major_step.to_f64(),
            minor_step = ?self.minor_step.to_f64(),
            decimal_places = self.decimal_places,
            magnitude_exponent = self.magnitude_exponent,
            "picked scale"
        );

        adjustments
    }

    /// [`pick_scale`](Self::pick_scale) over an accumulated data range.
    ///
    /// An empty range picks from the configured default bounds.
    pub fn pick_scale_for(&mut self, range: &DataRange<D>) -> Vec<Adjustment> {
        let (data_min, data_max) = range
            .bounds()
            .unwrap_or_else(|| (lit(self.defaults.min), lit(self.defaults.max)));
        self.pick_scale(data_min, data_max)
    }

    fn finite_or_default(&self, value: D, end: RangeEnd, adjustments: &mut Vec<Adjustment>) -> D {
        if value.is_finite() {
            return value;
        }
        debug!(?end, "non-finite data bound replaced by default");
        adjustments.push(Adjustment::NonFiniteData(end));
        match end {
            RangeEnd::Min => lit(self.defaults.min),
            RangeEnd::Max => lit(self.defaults.max),
        }
    }

    /// Position of `value` within the scale as a ratio, `0` at `min` and `1`
    /// at `max`, measured in log10 space for logarithmic scales.
    ///
    /// Values outside the range are not clamped. A zero-width range maps
    /// everything to `0`.
    pub fn normalize(&self, value: D) -> D {
        let (lo, hi) = self.scale_bounds();
        let span = hi - lo;
        if span == D::zero() {
            return D::zero();
        }
        (self.to_scale_space(value) - lo) / span
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, ratio: D) -> D {
        let (lo, hi) = self.scale_bounds();
        let scaled = lo + ratio * (hi - lo);
        match self.kind {
            ScaleKind::Linear => scaled,
            ScaleKind::Logarithmic => pow10(scaled),
        }
    }

    /// Range ends in the space the mapping is linear in.
    pub(crate) fn scale_bounds(&self) -> (D, D) {
        (self.to_scale_space(self.min), self.to_scale_space(self.max))
    }

    pub(crate) fn to_scale_space(&self, value: D) -> D {
        match self.kind {
            ScaleKind::Linear => value,
            ScaleKind::Logarithmic => safe_log10_with(value, lit(self.defaults.range_epsilon)),
        }
    }

    /// Whether the current scale can be drawn.
    ///
    /// Rendering code calls this before placing ticks; an error means the axis
    /// should be skipped rather than the chart failing.
    pub fn check_drawable(&self) -> Result<()> {
        let min = as_f64(self.min);
        let max = as_f64(self.max);
        if !(min < max) {
            return Err(ScaleError::EmptyRange { min, max });
        }
        match self.kind {
            ScaleKind::Logarithmic if min <= 0.0 => Err(ScaleError::NonPositiveLogBound(min)),
            ScaleKind::Linear if !(self.major_step > D::zero()) => {
                Err(ScaleError::NonPositiveStep(as_f64(self.major_step)))
            }
            _ => Ok(()),
        }
    }

    /// Major and minor ticks inside `[min, max]`, in ascending order.
    ///
    /// Linear scales place majors on the major-step grid and minors on the
    /// minor-step grid from each major. Logarithmic scales place majors on
    /// powers of ten and minors at 2..9 times each power. A scale that fails
    /// [`check_drawable`](Self::check_drawable) yields no ticks.
    ///
    /// # Examples
    ///
    /// ```
    /// use niceaxis::ScaleSpec;
    ///
    /// let mut scale = ScaleSpec::<f64>::new();
    /// scale.pick_scale(0.0, 70.0);
    ///
    /// let majors: Vec<f64> = scale.ticks().filter(|t| t.is_major()).map(|t| t.value).collect();
    /// assert_eq!(majors, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]);
    /// ```
    pub fn ticks(&self) -> TickIter<D> {
        if let Err(err) = self.check_drawable() {
            trace!(%err, "scale not drawable, no ticks");
            return TickIter::empty();
        }
        match self.kind {
            ScaleKind::Linear => TickIter::from_linear(linear::LinearTickIter::from_scale(self)),
            ScaleKind::Logarithmic => TickIter::from_log(log::LogTickIter::from_scale(self)),
        }
    }

    /// Number of labeled ticks the scale produces.
    pub fn major_tick_count(&self) -> usize {
        self.ticks().filter(Tick::is_major).count()
    }
}

pub(crate) fn as_f64<D: Float>(value: D) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scale_uses_defaults() {
        let scale = ScaleSpec::<f64>::new();
        assert_eq!(scale.min(), 0.0);
        assert_eq!(scale.max(), 1.0);
        assert_eq!(scale.major_step(), 0.1);
        assert_eq!(scale.kind(), ScaleKind::Linear);
        assert!(!scale.is_reversed());
        assert!(scale.is_min_auto());
        assert!(scale.is_max_auto());
        assert!(scale.is_major_step_auto());
        assert!(scale.is_minor_step_auto());
        assert!(scale.is_decimal_places_auto());
        assert!(scale.is_magnitude_exponent_auto());
    }

    #[test]
    fn test_with_defaults_sets_mode() {
        let scale = ScaleSpec::<f64>::with_defaults(ScaleDefaults {
            logarithmic: true,
            reversed: true,
            min: 1.0,
            max: 10.0,
            ..ScaleDefaults::default()
        });
        assert!(scale.is_logarithmic());
        assert!(scale.is_reversed());
        assert_eq!(scale.min(), 1.0);
    }

    #[test]
    fn test_setters_pin_and_clear_restores_auto() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_major_step(25.0);
        scale.set_decimal_places(3);
        assert!(!scale.is_major_step_auto());
        assert!(!scale.is_decimal_places_auto());

        scale.pick_scale(0.0, 100.0);
        assert_eq!(scale.major_step(), 25.0);
        assert_eq!(scale.decimal_places(), 3);

        scale.clear_major_step();
        scale.clear_decimal_places();
        scale.pick_scale(0.0, 100.0);
        assert_eq!(scale.major_step(), 10.0);
        assert_eq!(scale.decimal_places(), 0);
    }

    #[test]
    fn test_set_all_auto() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_min(3.0);
        scale.set_max(4.0);
        scale.set_magnitude_exponent(6);
        scale.set_all_auto();
        assert!(scale.is_min_auto());
        assert!(scale.is_max_auto());
        assert!(scale.is_magnitude_exponent_auto());
    }

    #[test]
    fn test_non_finite_data_falls_back_to_defaults() {
        let mut scale = ScaleSpec::<f64>::new();
        let adjustments = scale.pick_scale(f64::NAN, f64::INFINITY);
        assert_eq!(
            adjustments,
            vec![
                Adjustment::NonFiniteData(RangeEnd::Min),
                Adjustment::NonFiniteData(RangeEnd::Max)
            ]
        );
        assert_eq!(scale.min(), 0.0);
        assert_eq!(scale.max(), 1.0);
        assert!(scale.check_drawable().is_ok());
    }

    #[test]
    fn test_normalize_linear() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_min(0.0);
        scale.set_max(200.0);
        assert_eq!(scale.normalize(0.0), 0.0);
        assert_eq!(scale.normalize(50.0), 0.25);
        assert_eq!(scale.normalize(300.0), 1.5);
        assert_eq!(scale.denormalize(0.75), 150.0);
    }

    #[test]
    fn test_normalize_log() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_logarithmic(true);
        scale.set_min(1.0);
        scale.set_max(100.0);
        assert!((scale.normalize(10.0) - 0.5).abs() < 1e-12);
        assert!((scale.denormalize(0.5) - 10.0).abs() < 1e-9);
        // Non-positive values sit at log10 = 0
        assert_eq!(scale.normalize(0.0), 0.0);
    }

    #[test]
    fn test_normalize_zero_span() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_min(4.0);
        scale.set_max(4.0);
        assert_eq!(scale.normalize(9.0), 0.0);
    }

    #[test]
    fn test_check_drawable() {
        let mut scale = ScaleSpec::<f64>::new();
        assert!(scale.check_drawable().is_ok());

        scale.set_major_step(0.0);
        assert!(matches!(
            scale.check_drawable(),
            Err(ScaleError::NonPositiveStep(_))
        ));
        assert_eq!(scale.ticks().count(), 0);

        let mut empty = ScaleSpec::<f64>::new();
        empty.set_min(2.0);
        empty.set_max(1.0);
        assert!(matches!(
            empty.check_drawable(),
            Err(ScaleError::EmptyRange { .. })
        ));

        let mut log = ScaleSpec::<f64>::new();
        log.set_logarithmic(true);
        log.set_min(0.0);
        log.set_max(10.0);
        assert!(matches!(
            log.check_drawable(),
            Err(ScaleError::NonPositiveLogBound(_))
        ));
    }

    #[test]
    fn test_pick_scale_for_data_range() {
        let mut range = DataRange::new();
        range.extend([12.0, 48.0, 31.0]);
        let mut scale = ScaleSpec::<f64>::new();
        scale.pick_scale_for(&range);
        assert_eq!(scale.min(), 10.0);
        assert_eq!(scale.max(), 50.0);

        let mut scale = ScaleSpec::<f64>::new();
        scale.pick_scale_for(&DataRange::new());
        assert_eq!(scale.min(), 0.0);
        assert_eq!(scale.max(), 1.0);
    }
}

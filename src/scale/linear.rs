//! Linear auto-ranging and tick generation.
//!
//! Auto-ranging a linear scale runs in a fixed order:
//!
//! 1. widen a flat or inverted range by one unit,
//! 2. pull an auto end to zero when the data sits close to it (the zero lever),
//! 3. pick the major and minor steps,
//! 4. snap auto ends outward onto the major-step grid,
//! 5. pick the label magnitude (a multiple of three) and decimal places.
//!
//! # Examples
//!
//! ```
//! use niceaxis::ScaleSpec;
//!
//! let mut scale = ScaleSpec::<f64>::new();
//! scale.pick_scale(-3.2, 41.7);
//!
//! assert_eq!(scale.min(), -10.0);
//! assert_eq!(scale.max(), 50.0);
//! assert_eq!(scale.major_step(), 10.0);
//! ```
//!
//! Large values are labeled in engineering notation:
//!
//! ```
//! use niceaxis::ScaleSpec;
//!
//! let mut scale = ScaleSpec::<f64>::new();
//! scale.pick_scale(20_000.0, 90_000.0);
//!
//! assert_eq!(scale.magnitude_exponent(), 3);
//! assert_eq!(scale.format_label(40_000.0), "40");
//! ```

use num_traits::Float;
use tracing::debug;

use super::util::{self, calc_step_size, grid_ceil, grid_floor, lit};
use super::{Adjustment, RangeEnd, ScaleSpec, Tick};

/// Upper bound on ticks produced by one sweep.
const MAX_TICKS: usize = 100_000;

/// Upper bound on minor ticks between two majors.
const MAX_MINORS_PER_MAJOR: usize = 1_000;

/// Machine epsilons a flat range is widened by when one unit is below the
/// resolution of its values.
const FLAT_WIDTH_ULPS: f64 = 1024.0;

pub(super) fn pick_linear<D: Float>(scale: &mut ScaleSpec<D>, adjustments: &mut Vec<Adjustment>) {
    let range_epsilon = lit::<D>(scale.defaults.range_epsilon);

    if scale.max - scale.min < range_epsilon {
        let inverted = scale.max < scale.min;
        let end = if scale.pins.max.is_none() {
            scale.max = scale.min + flat_width(scale.min);
            RangeEnd::Max
        } else {
            scale.min = scale.max - flat_width(scale.max);
            RangeEnd::Min
        };
        debug!(?end, inverted, "flat linear range expanded");
        adjustments.push(Adjustment::RangeExpanded { end, inverted });
    }

    apply_zero_lever(scale);

    if scale.pins.major_step.is_none() {
        scale.major_step = calc_step_size(scale.max - scale.min, scale.defaults.target_steps);
    }
    if scale.pins.minor_step.is_none() {
        scale.minor_step = calc_step_size(scale.major_step, scale.defaults.target_minor_steps);
    }

    if scale.pins.min.is_none() {
        scale.min = grid_floor(scale.min, scale.major_step);
    }
    if scale.pins.max.is_none() {
        scale.max = grid_ceil(scale.max, scale.major_step);
    }

    if scale.pins.magnitude_exponent.is_none() {
        scale.magnitude_exponent = pick_magnitude(scale);
    }
    if scale.pins.decimal_places.is_none() {
        scale.decimal_places = pick_decimal_places(scale.major_step, scale.magnitude_exponent);
    }
}

/// One unit, or enough to move `anchor` once `anchor + 1 == anchor`.
fn flat_width<D: Float>(anchor: D) -> D {
    D::one().max(anchor.abs() * D::epsilon() * lit(FLAT_WIDTH_ULPS))
}

fn apply_zero_lever<D: Float>(scale: &mut ScaleSpec<D>) {
    let zero_lever = lit::<D>(scale.defaults.zero_lever);
    let range = scale.max - scale.min;

    if scale.pins.min.is_none() && scale.min > D::zero() && scale.min / range < zero_lever {
        scale.min = D::zero();
    }
    if scale.pins.max.is_none() && scale.max < D::zero() && (scale.max / range).abs() < zero_lever {
        scale.max = D::zero();
    }
}

/// Engineering exponent for the end with the larger order of magnitude.
fn pick_magnitude<D: Float>(scale: &ScaleSpec<D>) -> i32 {
    let zero_below = lit::<D>(scale.defaults.magnitude_epsilon);
    let order = |value: D| -> i32 {
        if value.abs() > zero_below {
            value.abs().log10().floor().to_i32().unwrap_or(0)
        } else {
            0
        }
    };

    let lo = order(scale.min);
    let hi = order(scale.max);
    let mag = if hi.abs() > lo.abs() { hi } else { lo };

    if mag.abs() <= scale.defaults.plain_magnitude_limit {
        0
    } else {
        mag.div_euclid(3) * 3
    }
}

/// Enough fractional digits to tell neighbouring major ticks apart once the
/// labels are divided by `10^magnitude`.
fn pick_decimal_places<D: Float>(major_step: D, magnitude: i32) -> u32 {
    if !(major_step > D::zero()) {
        return 0;
    }
    let step_order = major_step.log10().floor().to_i32().unwrap_or(0);
    let places = magnitude.saturating_sub(step_order);
    u32::try_from(places).unwrap_or(0)
}

/// Sweep over the major grid of a linear scale, emitting minors between majors.
pub struct LinearTickIter<D: Float> {
    state: LinearTickState<D>,
    remaining: usize,
}

enum LinearTickState<D: Float> {
    Sweep(LinearSweepState<D>),
    Done,
}

struct LinearSweepState<D: Float> {
    first_major: D,
    major_step: D,
    minor_step: D,
    minors_per_major: usize,
    clamp_min: D,
    clamp_max: D,
    epsilon: D,
    // Major index; -1 covers the minors below the first major.
    major_index: i64,
    minor_index: usize,
}

impl<D: Float> LinearTickIter<D> {
    pub(crate) fn from_scale(scale: &ScaleSpec<D>) -> Self {
        Self::new(scale.min, scale.max, scale.major_step, scale.minor_step)
    }

    pub(crate) fn new(min: D, max: D, major_step: D, minor_step: D) -> Self {
        if !(major_step > D::zero()) || !(min < max) {
            return Self {
                state: LinearTickState::Done,
                remaining: 0,
            };
        }

        let epsilon = util::epsilon_from_step(major_step);
        let first_major = grid_ceil(min - epsilon, major_step);

        let minors_per_major = if minor_step > D::zero() && minor_step < major_step {
            // Steps that do not divide evenly still stop short of the next major.
            (major_step / minor_step - lit(1e-6))
                .ceil()
                .to_usize()
                .map_or(0, |n| n.saturating_sub(1))
                .min(MAX_MINORS_PER_MAJOR)
        } else {
            0
        };

        Self {
            state: LinearTickState::Sweep(LinearSweepState {
                first_major,
                major_step,
                minor_step,
                minors_per_major,
                clamp_min: min,
                clamp_max: max,
                epsilon,
                major_index: -1,
                minor_index: 1,
            }),
            remaining: MAX_TICKS,
        }
    }
}

impl<D: Float> LinearSweepState<D> {
    fn advance(&mut self) {
        if self.minor_index >= self.minors_per_major {
            self.major_index += 1;
            self.minor_index = 0;
        } else {
            self.minor_index += 1;
        }
    }
}

impl<D: Float> Iterator for LinearTickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let LinearTickState::Sweep(state) = &mut self.state else {
            return None;
        };

        while self.remaining > 0 {
            // Index-based so error does not accumulate along the axis
            let major = state.first_major
                + state.major_step * D::from(state.major_index).unwrap_or_else(D::zero);
            let mut value = major + state.minor_step * lit(state.minor_index as f64);
            let level = if state.minor_index == 0 { 0 } else { 1 };

            let skip_minor = state.minor_index > state.minors_per_major;
            state.advance();

            if skip_minor {
                continue;
            }

            if value > state.clamp_max + state.epsilon {
                break;
            }
            if value < state.clamp_min - state.epsilon {
                continue;
            }
            self.remaining -= 1;

            if value < state.clamp_min {
                value = state.clamp_min;
            } else if value > state.clamp_max {
                value = state.clamp_max;
            }
            return Some(Tick { value, level });
        }

        self.state = LinearTickState::Done;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picked(data_min: f64, data_max: f64) -> ScaleSpec<f64> {
        let mut scale = ScaleSpec::new();
        scale.pick_scale(data_min, data_max);
        scale
    }

    #[test]
    fn test_zero_lever_pulls_min_to_zero() {
        let scale = picked(2.0, 100.0);
        assert_eq!(scale.min(), 0.0);
        assert_eq!(scale.max(), 100.0);
        assert_eq!(scale.major_step(), 10.0);
    }

    #[test]
    fn test_zero_lever_leaves_distant_min() {
        let scale = picked(50.0, 100.0);
        assert_eq!(scale.min(), 50.0);
        assert_eq!(scale.major_step(), 10.0);
    }

    #[test]
    fn test_zero_lever_pulls_negative_max_to_zero() {
        let scale = picked(-100.0, -3.0);
        assert_eq!(scale.max(), 0.0);
        assert_eq!(scale.min(), -100.0);
    }

    #[test]
    fn test_flat_range_expands_max() {
        let mut scale = ScaleSpec::<f64>::new();
        let adjustments = scale.pick_scale(5.0, 5.0);
        assert_eq!(
            adjustments,
            vec![Adjustment::RangeExpanded {
                end: RangeEnd::Max,
                inverted: false
            }]
        );
        assert_eq!(scale.min(), 5.0);
        assert!((scale.max() - 6.0).abs() < 1e-9);
        assert!((scale.major_step() - 0.1).abs() < 1e-12);
        assert_eq!(scale.decimal_places(), 1);
    }

    #[test]
    fn test_flat_range_with_pinned_max_moves_min() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_max(5.0);
        scale.pick_scale(5.0, 5.0);
        assert_eq!(scale.max(), 5.0);
        assert!(scale.min() <= 4.0);
    }

    #[test]
    fn test_flat_range_beyond_integer_resolution() {
        // 1e17 + 1 == 1e17 in f64
        let mut scale = ScaleSpec::<f64>::new();
        let adjustments = scale.pick_scale(1.0e17, 1.0e17);
        assert_eq!(
            adjustments,
            vec![Adjustment::RangeExpanded {
                end: RangeEnd::Max,
                inverted: false
            }]
        );
        assert!(scale.max() > scale.min());
        assert!(scale.major_step() > 0.0);
        assert!(scale.check_drawable().is_ok());
        assert!(scale.ticks().count() > 1);

        let mut pinned = ScaleSpec::<f64>::new();
        pinned.set_max(-1.7e18);
        pinned.pick_scale(-1.7e18, -1.7e18);
        assert_eq!(pinned.max(), -1.7e18);
        assert!(pinned.min() < pinned.max());
        assert!(pinned.check_drawable().is_ok());
    }

    #[test]
    fn test_inverted_range_is_reported() {
        let mut scale = ScaleSpec::<f64>::new();
        let adjustments = scale.pick_scale(10.0, 3.0);
        assert_eq!(
            adjustments,
            vec![Adjustment::RangeExpanded {
                end: RangeEnd::Max,
                inverted: true
            }]
        );
        assert!(scale.max() > scale.min());
    }

    #[test]
    fn test_small_values_get_decimal_places() {
        let scale = picked(0.12, 0.47);
        assert!((scale.major_step() - 0.05).abs() < 1e-12);
        assert_eq!(scale.decimal_places(), 2);
        assert_eq!(scale.magnitude_exponent(), 0);
        assert!((scale.min() - 0.1).abs() < 1e-12);
        assert!((scale.max() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_engineering_magnitude() {
        let scale = picked(2.0e6, 9.0e6);
        assert_eq!(scale.magnitude_exponent(), 6);
        assert_eq!(scale.decimal_places(), 0);

        let scale = picked(1.0e4, 9.0e4);
        assert_eq!(scale.magnitude_exponent(), 3);

        // |mag| <= 3 is shown plainly
        let scale = picked(1000.0, 9000.0);
        assert_eq!(scale.magnitude_exponent(), 0);
    }

    #[test]
    fn test_negative_engineering_magnitude() {
        let scale = picked(2.0e-5, 9.0e-5);
        assert_eq!(scale.magnitude_exponent(), -6);
        // step 1e-5 divided by 1e-6 still needs no decimals
        assert_eq!(scale.decimal_places(), 0);
    }

    #[test]
    fn test_pinned_step_drives_snapping() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_major_step(25.0);
        scale.pick_scale(60.0, 160.0);
        assert_eq!(scale.min(), 50.0);
        assert_eq!(scale.max(), 175.0);
        assert_eq!(scale.minor_step(), 5.0);
    }

    #[test]
    fn test_zero_pinned_step_does_not_snap() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_major_step(0.0);
        scale.pick_scale(60.0, 160.0);
        assert_eq!(scale.min(), 60.0);
        assert_eq!(scale.max(), 160.0);
        assert_eq!(scale.minor_step(), 0.0);
        assert_eq!(scale.decimal_places(), 0);
    }

    #[test]
    fn test_linear_ticks_basic() {
        let scale = picked(0.0, 100.0);
        let ticks: Vec<_> = scale.ticks().collect();

        let majors: Vec<f64> = ticks.iter().filter(|t| t.level == 0).map(|t| t.value).collect();
        assert_eq!(majors.len(), 11);
        assert_eq!(majors[0], 0.0);
        assert_eq!(majors[10], 100.0);

        // minor step 2 -> 4 minors between each pair of majors
        let minors = ticks.iter().filter(|t| t.level == 1).count();
        assert_eq!(minors, 40);
    }

    #[test]
    fn test_linear_ticks_sorted() {
        let scale = picked(-37.0, 81.0);
        let ticks: Vec<_> = scale.ticks().collect();
        for i in 1..ticks.len() {
            assert!(ticks[i].value > ticks[i - 1].value);
        }
    }

    #[test]
    fn test_linear_ticks_remain_within_range() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_min(13.2);
        scale.set_max(47.8);
        scale.pick_scale(0.0, 0.0);

        for tick in scale.ticks() {
            assert!(
                tick.value >= 13.2 && tick.value <= 47.8,
                "tick {} outside range [13.2, 47.8]",
                tick.value
            );
        }

        let majors: Vec<f64> = scale.ticks().filter(|t| t.is_major()).map(|t| t.value).collect();
        assert_eq!(majors, vec![15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0]);
    }

    #[test]
    fn test_linear_ticks_uneven_minor_step() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_min(0.0);
        scale.set_max(20.0);
        scale.set_major_step(10.0);
        scale.set_minor_step(3.0);
        scale.pick_scale(0.0, 20.0);

        let values: Vec<(f64, u8)> = scale.ticks().map(|t| (t.value, t.level)).collect();
        assert_eq!(
            values,
            vec![
                (0.0, 0),
                (3.0, 1),
                (6.0, 1),
                (9.0, 1),
                (10.0, 0),
                (13.0, 1),
                (16.0, 1),
                (19.0, 1),
                (20.0, 0)
            ]
        );
    }

    #[test]
    fn test_linear_ticks_no_minors_when_minor_not_smaller() {
        let mut scale = ScaleSpec::<f64>::new();
        scale.set_minor_step(50.0);
        scale.pick_scale(0.0, 30.0);
        assert!(scale.ticks().all(|t| t.level == 0));
        assert_eq!(scale.major_tick_count(), 7);
    }
}

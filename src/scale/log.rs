//! Logarithmic auto-ranging and decade tick generation.
//!
//! Logarithmic scales are always base 10. Auto ends snap outward to whole
//! decades, labels never use a magnitude multiplier, and the major/minor
//! steps are left untouched because ticks follow the decades instead.
//!
//! Out-of-domain input is repaired before snapping:
//!
//! | data                     | result                     |
//! |--------------------------|----------------------------|
//! | both bounds `<= 0`       | `1..10`                    |
//! | only min `<= 0`          | `min = max / 10`           |
//! | only max `<= 0`          | `max = min * 10`           |
//! | flat range               | one end moved by a decade  |
//!
//! # Examples
//!
//! ```
//! use niceaxis::{Adjustment, ScaleSpec};
//!
//! let mut scale = ScaleSpec::<f64>::new();
//! scale.set_logarithmic(true);
//!
//! let adjustments = scale.pick_scale(0.0, 500.0);
//! assert_eq!(adjustments, vec![Adjustment::LogMinReplaced]);
//! assert_eq!(scale.min(), 10.0);
//! assert_eq!(scale.max(), 1000.0);
//! ```

use num_traits::Float;
use tracing::debug;

use super::util::{lit, pow10, sorted_pair};
use super::{Adjustment, RangeEnd, ScaleSpec, Tick};

/// Largest number of decades a tick sweep will cover.
const MAX_DECADES: i32 = 1_000;

pub(super) fn pick_log<D: Float>(scale: &mut ScaleSpec<D>, adjustments: &mut Vec<Adjustment>) {
    let ten = lit::<D>(10.0);

    if scale.pins.magnitude_exponent.is_none() {
        scale.magnitude_exponent = 0;
    }
    if scale.pins.decimal_places.is_none() {
        scale.decimal_places = 0;
    }

    let zero = D::zero();
    if scale.min <= zero && scale.max <= zero {
        scale.min = D::one();
        scale.max = ten;
        debug!("non-positive logarithmic range reset to 1..10");
        adjustments.push(Adjustment::LogDomainReset);
    } else if scale.min <= zero {
        scale.min = scale.max / ten;
        debug!(max = ?scale.max.to_f64(), "non-positive logarithmic min replaced");
        adjustments.push(Adjustment::LogMinReplaced);
    } else if scale.max <= zero {
        scale.max = scale.min * ten;
        debug!(min = ?scale.min.to_f64(), "non-positive logarithmic max replaced");
        adjustments.push(Adjustment::LogMaxReplaced);
    }

    if scale.max - scale.min < lit(scale.defaults.range_epsilon) {
        let inverted = scale.max < scale.min;
        let end = if scale.pins.max.is_none() {
            scale.max = scale.min * ten;
            RangeEnd::Max
        } else {
            scale.min = scale.max / ten;
            RangeEnd::Min
        };
        debug!(?end, inverted, "flat logarithmic range expanded");
        adjustments.push(Adjustment::RangeExpanded { end, inverted });
    }

    if scale.pins.min.is_none() {
        scale.min = snap_decade(scale.min, scale.min.log10().floor());
    }
    if scale.pins.max.is_none() {
        scale.max = snap_decade(scale.max, scale.max.log10().ceil());
    }
}

/// `10^exponent`, or `value` unchanged when that decade underflows to zero or
/// overflows to infinity.
fn snap_decade<D: Float>(value: D, exponent: D) -> D {
    let decade = pow10(exponent);
    if decade > D::zero() && decade.is_finite() {
        decade
    } else {
        debug!(value = ?value.to_f64(), "decade not representable, bound left unsnapped");
        value
    }
}

/// Whole-decade exponent range covering `[min, max]`, or `None` outside the
/// log domain.
fn decade_range<D: Float>(min: D, max: D) -> Option<(i32, i32)> {
    let (lo, hi) = sorted_pair(min, max);
    if !(lo > D::zero()) || !hi.is_finite() {
        return None;
    }

    let e_min = lo.log10().floor().to_i32()?;
    let e_max = hi.log10().ceil().to_i32()?;
    if e_max.saturating_sub(e_min) > MAX_DECADES {
        return None;
    }
    Some((e_min, e_max))
}

/// Ticks at each power of ten (major) and 2..9 times each power (minor).
pub struct LogTickIter<D: Float> {
    state: LogTickIterState<D>,
}

enum LogTickIterState<D: Float> {
    Normal(LogNormalState<D>),
    Done,
}

struct LogNormalState<D: Float> {
    domain_min: D,
    domain_max: D,
    exponent: i32,
    exponent_max: i32,
    current_decade: D,
    // 1 is the major tick, 2..=9 the minors
    multiplier: u8,
}

impl<D: Float> LogTickIter<D> {
    pub(crate) fn from_scale(scale: &ScaleSpec<D>) -> Self {
        Self::new(scale.min, scale.max)
    }

    pub(crate) fn new(min: D, max: D) -> Self {
        let (domain_min, domain_max) = sorted_pair(min, max);

        match decade_range(domain_min, domain_max) {
            Some((e_min, e_max)) => Self {
                state: LogTickIterState::Normal(LogNormalState {
                    domain_min,
                    domain_max,
                    exponent: e_min,
                    exponent_max: e_max,
                    current_decade: lit::<D>(10.0).powi(e_min),
                    multiplier: 1,
                }),
            },
            None => Self {
                state: LogTickIterState::Done,
            },
        }
    }
}

impl<D: Float> Iterator for LogTickIter<D> {
    type Item = Tick<D>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            LogTickIterState::Normal(state) => {
                if let Some(tick) = state.next_tick() {
                    Some(tick)
                } else {
                    self.state = LogTickIterState::Done;
                    None
                }
            }
            LogTickIterState::Done => None,
        }
    }
}

impl<D: Float> LogNormalState<D> {
    fn next_tick(&mut self) -> Option<Tick<D>> {
        // Relative slack so 10^k computed in floating point still counts as in range
        let slack = lit::<D>(1e-9);
        let lo = self.domain_min * (D::one() - slack);
        let hi = self.domain_max * (D::one() + slack);

        loop {
            if self.exponent > self.exponent_max {
                return None;
            }

            let multiplier = self.multiplier;
            let value = self.current_decade * lit(f64::from(multiplier));
            self.advance();

            if value > hi {
                self.exponent = self.exponent_max + 1;
                return None;
            }
            if value < lo {
                continue;
            }

            let level = if multiplier == 1 { 0 } else { 1 };
            return Some(Tick {
                value: value.max(self.domain_min).min(self.domain_max),
                level,
            });
        }
    }

    fn advance(&mut self) {
        if self.multiplier >= 9 {
            self.multiplier = 1;
            self.exponent += 1;
            self.current_decade = lit::<D>(10.0).powi(self.exponent);
        } else {
            self.multiplier += 1;
        }
    }
}

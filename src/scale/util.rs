use num_traits::Float;

/// Fraction of a step treated as "already on the grid" when snapping.
const GRID_TOLERANCE: f64 = 1e-9;

/// Convert an `f64` constant into the domain type.
///
/// Every `Float` implementation can represent the constants used by the
/// engine; the zero fallback only guards exotic types.
pub(crate) fn lit<D: Float>(value: f64) -> D {
    D::from(value).unwrap_or_else(D::zero)
}

/// Return `(min, max)` for two owned values.
pub(crate) fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// `10^exponent`, exact for integral exponents.
pub(crate) fn pow10<D: Float>(exponent: D) -> D {
    let ten = lit::<D>(10.0);
    match exponent.to_i32() {
        Some(e) if D::from(e) == Some(exponent) => ten.powi(e),
        _ => ten.powf(exponent),
    }
}

/// `log10(x)` when `x > 1e-20`, otherwise `0`.
///
/// Keeps logarithmic math away from `-inf` and `NaN` for zero or negative input.
///
/// # Examples
///
/// ```
/// use niceaxis::scale::safe_log10;
///
/// assert_eq!(safe_log10(1000.0_f64), 3.0);
/// assert_eq!(safe_log10(0.0_f64), 0.0);
/// assert_eq!(safe_log10(-5.0_f64), 0.0);
/// ```
pub fn safe_log10<D: Float>(x: D) -> D {
    safe_log10_with(x, lit(1e-20))
}

pub(crate) fn safe_log10_with<D: Float>(x: D, floor: D) -> D {
    if x > floor { x.log10() } else { D::zero() }
}

/// Floor-based modulus: `y * frac(x / y)`, returning `0` when `y == 0`.
///
/// The result carries the sign of `y`, so `x - modulo(x, y)` always lands on
/// the grid point at or below `x` for a positive `y`.
///
/// # Examples
///
/// ```
/// use niceaxis::scale::modulo;
///
/// assert_eq!(modulo(7.5_f64, 2.0), 1.5);
/// assert_eq!(modulo(-7.5_f64, 2.0), 0.5);
/// assert_eq!(modulo(7.5_f64, 0.0), 0.0);
/// ```
pub fn modulo<D: Float>(x: D, y: D) -> D {
    if y == D::zero() {
        return D::zero();
    }
    let ratio = x / y;
    y * (ratio - ratio.floor())
}

/// Choose a step of 1, 2 or 5 times a power of ten that splits `range` into
/// roughly `target_steps` intervals.
///
/// Returns `0` for a non-positive or non-finite range, or a zero target.
///
/// # Examples
///
/// ```
/// use niceaxis::scale::calc_step_size;
///
/// assert_eq!(calc_step_size(70.0_f64, 7), 10.0);
/// assert_eq!(calc_step_size(100.0_f64, 7), 10.0);
/// assert_eq!(calc_step_size(10.0_f64, 5), 2.0);
/// assert_eq!(calc_step_size(0.3_f64, 7), 0.05);
/// ```
pub fn calc_step_size<D: Float>(range: D, target_steps: u32) -> D {
    if target_steps == 0 || !(range > D::zero()) || !range.is_finite() {
        return D::zero();
    }

    let raw_step = range / lit(f64::from(target_steps));
    let magnitude = pow10(raw_step.log10().floor());
    let msd = (raw_step / magnitude).round();

    let digit = if msd > lit(5.0) {
        10.0
    } else if msd > lit(2.0) {
        5.0
    } else if msd > D::one() {
        2.0
    } else {
        1.0
    };

    lit::<D>(digit) * magnitude
}

/// Largest grid point `<= value`, treating values within a hair of a grid
/// point as already on it.
///
/// Equivalent to `value - modulo(value, step)` without the rounding noise of
/// the subtraction.
pub(crate) fn grid_floor<D: Float>(value: D, step: D) -> D {
    if !(step > D::zero()) {
        return value;
    }
    let ratio = value / step;
    if on_grid(ratio) { value } else { ratio.floor() * step }
}

/// Smallest grid point `>= value`, leaving values already on the grid alone.
pub(crate) fn grid_ceil<D: Float>(value: D, step: D) -> D {
    if !(step > D::zero()) {
        return value;
    }
    let ratio = value / step;
    if on_grid(ratio) { value } else { ratio.ceil() * step }
}

fn on_grid<D: Float>(ratio: D) -> bool {
    (ratio - ratio.round()).abs() < lit(GRID_TOLERANCE)
}

/// Compute a small epsilon relative to the provided step.
/// Returns step / 1000, the tolerance used when comparing ticks to range ends.
pub(crate) fn epsilon_from_step<D: Float>(step: D) -> D {
    step / lit(1000.0)
}

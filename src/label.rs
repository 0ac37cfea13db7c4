//! Tick label text for a picked scale.
//!
//! Linear labels are divided by `10^magnitude_exponent` and printed with
//! `decimal_places` fractional digits; the multiplier itself is shown once,
//! next to the axis title, through [`ScaleSpec::magnitude_suffix`].
//! Logarithmic labels are printed as plain numbers.

use num_traits::{Float, ToPrimitive};

use crate::scale::{ScaleKind, ScaleSpec, as_f64};
use crate::scale::util::pow10;

/// Longest fractional part a label will carry.
const MAX_LABEL_DECIMALS: usize = 20;

impl<D: Float> ScaleSpec<D> {
    /// Label text for a tick at `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use niceaxis::ScaleSpec;
    ///
    /// let mut scale = ScaleSpec::<f64>::new();
    /// scale.pick_scale(0.12, 0.47);
    /// assert_eq!(scale.format_label(0.25), "0.25");
    ///
    /// scale.set_magnitude_exponent(-3);
    /// scale.set_decimal_places(0);
    /// assert_eq!(scale.format_label(0.25), "250");
    /// ```
    pub fn format_label(&self, value: D) -> String {
        match self.kind() {
            ScaleKind::Linear => {
                let exponent = D::from(self.magnitude_exponent()).unwrap_or_else(D::zero);
                let scaled = as_f64(value / pow10(exponent));
                let decimals = (self.decimal_places() as usize).min(MAX_LABEL_DECIMALS);
                fixed(scaled, decimals)
            }
            ScaleKind::Logarithmic => {
                let value = as_f64(value);
                let decimals = if value > 0.0 && value < 1.0 {
                    (-value.log10().floor()).to_usize().unwrap_or(0)
                } else {
                    self.decimal_places() as usize
                };
                fixed(value, decimals.min(MAX_LABEL_DECIMALS))
            }
        }
    }

    /// Annotation for the axis title when labels carry a magnitude
    /// multiplier, e.g. `(10^3)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use niceaxis::ScaleSpec;
    ///
    /// let mut scale = ScaleSpec::<f64>::new();
    /// scale.pick_scale(0.0, 4.0e7);
    /// assert_eq!(scale.magnitude_suffix().as_deref(), Some("(10^6)"));
    ///
    /// scale.pick_scale(0.0, 40.0);
    /// assert_eq!(scale.magnitude_suffix(), None);
    /// ```
    pub fn magnitude_suffix(&self) -> Option<String> {
        match self.magnitude_exponent() {
            0 => None,
            exponent => Some(format!("(10^{exponent})")),
        }
    }

    /// Every major tick paired with its label.
    pub fn tick_labels(&self) -> Vec<(D, String)> {
        self.ticks()
            .majors()
            .map(|value| (value, self.format_label(value)))
            .collect()
    }
}

/// Fixed-point text that never shows a negative zero.
fn fixed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

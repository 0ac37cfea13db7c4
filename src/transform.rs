//! Mapping scale values to pixel coordinates and back.
//!
//! This module provides:
//! - [`AxisRole`] - which way an axis runs on screen
//! - [`AxisTransform`] - one axis mapped onto a pixel interval for a render pass
//! - [`PlotTransform`] - an x and a y axis mapped onto a [`ScreenRect`]
//!
//! # Coordinate Systems
//!
//! Screen coordinates grow right and **down**; data grows right and **up**.
//! Vertical axes therefore place `min` at the larger pixel coordinate unless
//! the scale is reversed, while horizontal axes place `min` at the smaller one.
//!
//! | role       | reversed | `min` maps to | `max` maps to |
//! |------------|----------|---------------|---------------|
//! | horizontal | no       | `pixel_min`   | `pixel_max`   |
//! | horizontal | yes      | `pixel_max`   | `pixel_min`   |
//! | vertical   | no       | `pixel_max`   | `pixel_min`   |
//! | vertical   | yes      | `pixel_min`   | `pixel_max`   |
//!
//! # Examples
//!
//! ```rust
//! use niceaxis::{AxisRole, ScaleSpec};
//!
//! let mut scale = ScaleSpec::<f64>::new();
//! scale.pick_scale(0.0, 50.0);
//!
//! // Vertical axis spanning pixels 0 (top) to 400 (bottom).
//! let axis = scale.begin_transform(0.0, 400.0, AxisRole::VerticalPrimary);
//! assert_eq!(axis.to_pixel(0.0), 400.0);
//! assert_eq!(axis.to_pixel(50.0), 0.0);
//! assert_eq!(axis.from_pixel(200.0), 25.0);
//! ```

use num_traits::Float;

use crate::scale::util::pow10;
use crate::scale::{ScaleKind, ScaleSpec};

/// Orientation of an axis on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisRole {
    /// X axis; values grow to the right.
    #[default]
    Horizontal,
    /// Left Y axis; values grow upward.
    VerticalPrimary,
    /// Right Y axis; values grow upward.
    VerticalSecondary,
}

impl AxisRole {
    pub fn is_vertical(&self) -> bool {
        matches!(self, AxisRole::VerticalPrimary | AxisRole::VerticalSecondary)
    }

    pub fn is_horizontal(&self) -> bool {
        !self.is_vertical()
    }
}

/// A scale bound to a pixel interval for one render pass.
///
/// The pixel bounds only live as long as this value, which borrows the
/// scale; re-pick the scale and begin a new transform for the next pass.
#[derive(Debug, Clone, Copy)]
pub struct AxisTransform<'a, D = f64> {
    scale: &'a ScaleSpec<D>,
    role: AxisRole,
    pixel_min: D,
    pixel_max: D,
    // Range ends in the space the mapping is linear in (log10 for log scales)
    scale_min: D,
    scale_max: D,
}

impl<'a, D: Float> AxisTransform<'a, D> {
    pub fn new(scale: &'a ScaleSpec<D>, pixel_min: D, pixel_max: D, role: AxisRole) -> Self {
        let (scale_min, scale_max) = scale.scale_bounds();
        Self {
            scale,
            role,
            pixel_min,
            pixel_max,
            scale_min,
            scale_max,
        }
    }

    pub fn scale(&self) -> &'a ScaleSpec<D> {
        self.scale
    }

    pub fn role(&self) -> AxisRole {
        self.role
    }

    /// `(pixel_min, pixel_max)` of this pass.
    pub fn pixel_bounds(&self) -> (D, D) {
        (self.pixel_min, self.pixel_max)
    }

    // Whether min sits at pixel_max.
    fn is_flipped(&self) -> bool {
        self.role.is_vertical() != self.scale.is_reversed()
    }

    /// Pixel coordinate of a scale value. Values outside the scale land
    /// outside the pixel bounds.
    pub fn to_pixel(&self, value: D) -> D {
        let span = self.scale_max - self.scale_min;
        let ratio = if span == D::zero() {
            D::zero()
        } else {
            (self.scale.to_scale_space(value) - self.scale_min) / span
        };

        let pixels = self.pixel_max - self.pixel_min;
        if self.is_flipped() {
            self.pixel_max - pixels * ratio
        } else {
            self.pixel_min + pixels * ratio
        }
    }

    /// Scale value at a pixel coordinate, for hit-testing.
    pub fn from_pixel(&self, pixel: D) -> D {
        let pixels = self.pixel_max - self.pixel_min;
        let ratio = if pixels == D::zero() {
            D::zero()
        } else if self.is_flipped() {
            (self.pixel_max - pixel) / pixels
        } else {
            (pixel - self.pixel_min) / pixels
        };

        let scaled = self.scale_min + ratio * (self.scale_max - self.scale_min);
        match self.scale.kind() {
            ScaleKind::Linear => scaled,
            ScaleKind::Logarithmic => pow10(scaled),
        }
    }
}

impl<D: Float> ScaleSpec<D> {
    /// Bind the scale to pixel bounds for a render pass.
    pub fn begin_transform(&self, pixel_min: D, pixel_max: D, role: AxisRole) -> AxisTransform<'_, D> {
        AxisTransform::new(self, pixel_min, pixel_max, role)
    }

    /// Pixel coordinate of `value` on an axis spanning `pixel_min..pixel_max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use niceaxis::{AxisRole, ScaleSpec};
    ///
    /// let mut scale = ScaleSpec::<f64>::new();
    /// scale.set_logarithmic(true);
    /// scale.pick_scale(1.0, 1000.0);
    ///
    /// let x = scale.transform(10.0, 100.0, 400.0, AxisRole::Horizontal);
    /// assert!((x - 200.0).abs() < 1e-9);
    ///
    /// scale.set_reversed(true);
    /// let x = scale.transform(10.0, 100.0, 400.0, AxisRole::Horizontal);
    /// assert!((x - 300.0).abs() < 1e-9);
    /// ```
    pub fn transform(&self, value: D, pixel_min: D, pixel_max: D, role: AxisRole) -> D {
        self.begin_transform(pixel_min, pixel_max, role).to_pixel(value)
    }

    /// Inverse of [`transform`](Self::transform).
    pub fn inverse_transform(&self, pixel: D, pixel_min: D, pixel_max: D, role: AxisRole) -> D {
        self.begin_transform(pixel_min, pixel_max, role).from_pixel(pixel)
    }
}

/// A rectangle in screen/pixel coordinates.
///
/// `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect<S = f64> {
    /// X coordinate of the top-left corner in pixels.
    pub x: S,
    /// Y coordinate of the top-left corner in pixels.
    pub y: S,
    /// Width of the rectangle in pixels.
    pub width: S,
    /// Height of the rectangle in pixels.
    pub height: S,
}

/// A point in screen/pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint<S = f64> {
    pub x: S,
    pub y: S,
}

impl<S> ScreenPoint<S> {
    /// Creates a new screen point at the given pixel coordinates.
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }
}

/// A point in data coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlotPoint<D = f64> {
    pub x: D,
    pub y: D,
}

impl<D> PlotPoint<D> {
    /// Creates a new plot point at the given data coordinates.
    pub const fn new(x: D, y: D) -> Self {
        Self { x, y }
    }
}

/// Maps plot points through an x and a y scale onto a screen rectangle.
///
/// # Examples
///
/// ```rust
/// use niceaxis::{PlotPoint, PlotTransform, ScaleSpec, ScreenPoint, ScreenRect};
///
/// let mut x_scale = ScaleSpec::<f64>::new();
/// x_scale.pick_scale(0.0, 100.0);
/// let mut y_scale = ScaleSpec::<f64>::new();
/// y_scale.pick_scale(0.0, 50.0);
///
/// let screen = ScreenRect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 };
/// let transform = PlotTransform::new(&screen, &x_scale, &y_scale);
///
/// let center = transform.chart_to_screen(&PlotPoint::new(50.0, 25.0));
/// assert_eq!(center, ScreenPoint::new(400.0, 300.0));
///
/// // Bottom-left of the data is bottom-left of the screen.
/// let origin = transform.chart_to_screen(&PlotPoint::new(0.0, 0.0));
/// assert_eq!(origin, ScreenPoint::new(0.0, 600.0));
///
/// let clicked = transform.screen_to_chart(&ScreenPoint::new(200.0, 450.0));
/// assert_eq!(clicked, PlotPoint::new(25.0, 12.5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlotTransform<'a, D = f64> {
    screen_rect: ScreenRect<D>,
    x_axis: AxisTransform<'a, D>,
    y_axis: AxisTransform<'a, D>,
}

impl<'a, D: Float> PlotTransform<'a, D> {
    /// Plot against the primary (left) y axis.
    pub fn new(screen_rect: &ScreenRect<D>, x_scale: &'a ScaleSpec<D>, y_scale: &'a ScaleSpec<D>) -> Self {
        Self::with_y_role(screen_rect, x_scale, y_scale, AxisRole::VerticalPrimary)
    }

    /// Plot against the secondary (right) y axis.
    pub fn secondary(screen_rect: &ScreenRect<D>, x_scale: &'a ScaleSpec<D>, y2_scale: &'a ScaleSpec<D>) -> Self {
        Self::with_y_role(screen_rect, x_scale, y2_scale, AxisRole::VerticalSecondary)
    }

    fn with_y_role(
        screen_rect: &ScreenRect<D>,
        x_scale: &'a ScaleSpec<D>,
        y_scale: &'a ScaleSpec<D>,
        y_role: AxisRole,
    ) -> Self {
        let rect = *screen_rect;
        Self {
            screen_rect: rect,
            x_axis: x_scale.begin_transform(rect.x, rect.x + rect.width, AxisRole::Horizontal),
            y_axis: y_scale.begin_transform(rect.y, rect.y + rect.height, y_role),
        }
    }

    /// Returns the screen rectangle bounds used by this transform.
    pub fn screen_bounds(&self) -> &ScreenRect<D> {
        &self.screen_rect
    }

    pub fn x_axis(&self) -> &AxisTransform<'a, D> {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &AxisTransform<'a, D> {
        &self.y_axis
    }

    /// Transforms a point from chart coordinates to screen coordinates.
    pub fn chart_to_screen(&self, plot_point: &PlotPoint<D>) -> ScreenPoint<D> {
        ScreenPoint::new(
            self.x_axis.to_pixel(plot_point.x),
            self.y_axis.to_pixel(plot_point.y),
        )
    }

    /// Transforms a point from screen coordinates to chart coordinates.
    pub fn screen_to_chart(&self, screen_point: &ScreenPoint<D>) -> PlotPoint<D> {
        PlotPoint::new(
            self.x_axis.from_pixel(screen_point.x),
            self.y_axis.from_pixel(screen_point.y),
        )
    }
}

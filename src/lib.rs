//! Axis scales for charting
//!
//! `niceaxis` chooses readable axis scales for plotted data and maps values on
//! those scales to screen coordinates. It covers the numerical side of an
//! axis only: nothing here draws.
//!
//! # Core Concepts
//!
//! ## Scales
//!
//! A [`ScaleSpec`] describes one axis: its displayed range, the spacing of
//! labeled (major) and unlabeled (minor) ticks, how many decimals labels
//! carry and which power of ten they are divided by. Given the observed data
//! range, [`ScaleSpec::pick_scale`] fills in every field the caller has not
//! pinned:
//!
//! - steps are always 1, 2 or 5 times a power of ten
//! - ranges that almost reach zero are extended to include it
//! - logarithmic ranges snap to whole decades
//! - large or tiny values get an engineering-notation multiplier
//!
//! Bad input (flat ranges, non-finite bounds, non-positive log bounds) never
//! fails; it is replaced by usable values and reported as [`Adjustment`]s.
//!
//! ## Transforms
//!
//! [`AxisTransform`] maps scale values onto a pixel interval for one render
//! pass, honoring the [`AxisRole`] (vertical axes grow upward on a screen
//! whose y grows downward) and reversal. [`PlotTransform`] combines an x and a
//! y axis to convert between:
//! - [`PlotPoint`] - Data values in chart space
//! - [`ScreenPoint`] - Pixel coordinates in screen space
//!
//! # Examples
//!
//! ## Picking a Scale
//!
//! ```rust
//! use niceaxis::ScaleSpec;
//!
//! let mut scale = ScaleSpec::<f64>::new();
//! scale.pick_scale(3.0, 97.0);
//!
//! assert_eq!(scale.min(), 0.0);
//! assert_eq!(scale.max(), 100.0);
//! assert_eq!(scale.major_step(), 10.0);
//!
//! for (value, label) in scale.tick_labels() {
//!     println!("{label} at {value}");
//! }
//! ```
//!
//! ## Configured Defaults
//!
//! ```rust
//! use niceaxis::{ScaleDefaults, ScaleSpec};
//!
//! let defaults = ScaleDefaults::from_json(r#"{ "logarithmic": true, "min": 1.0, "max": 10.0 }"#)?;
//! let mut scale = ScaleSpec::<f64>::with_defaults(defaults);
//! scale.pick_scale(0.2, 35.0);
//!
//! assert!((scale.min() - 0.1).abs() < 1e-12);
//! assert_eq!(scale.max(), 100.0);
//! # Ok::<(), niceaxis::ScaleError>(())
//! ```
//!
//! ## Coordinate Transformation
//!
//! ```rust
//! use niceaxis::{PlotPoint, PlotTransform, ScaleSpec, ScreenRect};
//!
//! let mut x_scale = ScaleSpec::<f64>::new();
//! x_scale.pick_scale(0.0, 100.0);
//! let mut y_scale = ScaleSpec::<f64>::new();
//! y_scale.pick_scale(0.0, 50.0);
//!
//! let screen = ScreenRect { x: 0.0, y: 0.0, width: 800.0, height: 400.0 };
//! let transform = PlotTransform::new(&screen, &x_scale, &y_scale);
//!
//! let screen_point = transform.chart_to_screen(&PlotPoint::new(50.0, 25.0));
//! assert_eq!((screen_point.x, screen_point.y), (400.0, 200.0));
//! ```
//!

pub mod config;
pub mod error;
mod label;
pub mod range;
pub mod scale;
pub mod transform;

pub use config::ScaleDefaults;
pub use error::{Result, ScaleError};
pub use num_traits::Float;
pub use range::DataRange;
pub use scale::{Adjustment, RangeEnd, ScaleKind, ScaleSpec, Tick, TickIter};
pub use transform::{AxisRole, AxisTransform, PlotPoint, PlotTransform, ScreenPoint, ScreenRect};

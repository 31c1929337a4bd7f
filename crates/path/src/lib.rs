#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures and traits to build and query paths made of curves.
//!
//! A [`Path2D`](path/struct.Path2D.html) is a sequence of sub-paths
//! ([`CurvePath`](curve_path/struct.CurvePath.html)), each of which is a contiguous
//! sequence of [`Curve`](curve/struct.Curve.html) segments.
//!
//! Paths are built with a pen-based API mirroring the canvas drawing context
//! (see the [`DrawingContext`](context/trait.DrawingContext.html) trait), or from a list
//! of [`PathCommand`](commands/enum.PathCommand.html).
//!
//! This crate is reexported in [tracery](https://docs.rs/tracery/).
//!
//! # Examples
//!
//! ```
//! use tracery_path::Path2D;
//! use tracery_path::math::point;
//!
//! let mut path = Path2D::new();
//! path.move_to(point(0.0, 0.0));
//! path.line_to(point(10.0, 0.0));
//! path.line_to(point(10.0, 10.0));
//! path.close_path();
//!
//! assert_eq!(path.subpaths().len(), 1);
//! assert_eq!(path.subpaths()[0].segments().len(), 3);
//! ```

pub use tracery_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod commands;
pub mod context;
pub mod curve;
pub mod curve_path;
pub mod path;

#[doc(inline)]
pub use crate::commands::PathCommand;
#[doc(inline)]
pub use crate::curve::{CompositeCurve, Curve, CurveKind};
#[doc(inline)]
pub use crate::curve_path::CurvePath;
pub use crate::geom::{ArcFlags, BoundingBox, Matrix3, ParametricCurve};
#[doc(inline)]
pub use crate::path::Path2D;

pub use crate::geom::math;

/// Two points closer than this are considered equal when the builders decide whether
/// to connect, bridge or close sub-paths.
pub const POINT_EPSILON: f64 = 1e-9;

/// The two possible orientations for the curves of a closed shape.
///
/// Positive winding corresponds to a positive signed area, which appears clockwise
/// on screen since the y axis points down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Winding {
    Positive,
    Negative,
}

/// Parameters for sampling curves into points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct SamplingOptions {
    /// Number of uniform parameter steps of the arc-length table of each curve.
    ///
    /// Default value: `SamplingOptions::DEFAULT_ARC_LENGTH_DIVISIONS`.
    pub arc_length_divisions: usize,

    /// Resolution used when approximating a curve with points.
    ///
    /// Lines only produce their end points, arcs use twice this resolution and
    /// splines this resolution per control point.
    ///
    /// Default value: `SamplingOptions::DEFAULT_CURVE_DIVISIONS`.
    pub curve_divisions: usize,
}

impl SamplingOptions {
    pub const DEFAULT_ARC_LENGTH_DIVISIONS: usize = geom::parametric::DEFAULT_ARC_LENGTH_DIVISIONS;
    pub const DEFAULT_CURVE_DIVISIONS: usize = geom::parametric::DEFAULT_CURVE_DIVISIONS;

    pub const DEFAULT: Self = SamplingOptions {
        arc_length_divisions: Self::DEFAULT_ARC_LENGTH_DIVISIONS,
        curve_divisions: Self::DEFAULT_CURVE_DIVISIONS,
    };

    #[inline]
    pub fn with_arc_length_divisions(mut self, divisions: usize) -> Self {
        self.arc_length_divisions = divisions.max(1);
        self
    }

    #[inline]
    pub fn with_curve_divisions(mut self, divisions: usize) -> Self {
        self.curve_divisions = divisions.max(1);
        self
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whether two points are within `POINT_EPSILON` of each other.
#[inline]
pub fn same_point(a: math::Point, b: math::Point) -> bool {
    (a - b).square_length() <= POINT_EPSILON * POINT_EPSILON
}

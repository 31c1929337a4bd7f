#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]

//! Simple 2D parametric curves on top of euclid.
//!
//! This crate is reexported in [tracery](https://docs.rs/tracery/).
//!
//! # Overview.
//!
//! This crate implements the maths to work with:
//!
//! - lines and line segments,
//! - quadratic and cubic bézier curves,
//! - elliptic arcs (including their transformation under arbitrary affine maps),
//! - Catmull-Rom splines,
//! - polygons and rectangles.
//!
//! Every curve type implements the [`ParametricCurve`](parametric/trait.ParametricCurve.html)
//! trait. Curves are evaluated with a parameter `t` between 0 and 1, which is generally not
//! proportional to the distance travelled along the curve. The trait provides the arc-length
//! table and the `u -> t` mapping needed to sample curves at evenly spaced distances.
//!
//! # Coordinate system
//!
//! Coordinates follow the SVG convention: the y axis points down. A positive angle
//! sweep therefore appears clockwise on screen.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

pub mod arc;
mod bounding_box;
pub mod cubic_bezier;
mod line;
mod matrix;
pub mod parametric;
mod polygon;
pub mod quadratic_bezier;
mod spline;
pub mod utils;

#[doc(inline)]
pub use crate::arc::{Arc, ArcFlags, SvgArc};
#[doc(inline)]
pub use crate::bounding_box::BoundingBox;
#[doc(inline)]
pub use crate::cubic_bezier::CubicBezierSegment;
#[doc(inline)]
pub use crate::line::{Line, LineSegment};
#[doc(inline)]
pub use crate::matrix::Matrix3;
#[doc(inline)]
pub use crate::parametric::ParametricCurve;
#[doc(inline)]
pub use crate::polygon::{Polygon, Rectangle};
#[doc(inline)]
pub use crate::quadratic_bezier::QuadraticBezierSegment;
#[doc(inline)]
pub use crate::spline::CatmullRomSpline;

pub mod math {
    //! f64 version of the euclid types used everywhere. The other tracery crates
    //! reexport them.

    use crate::euclid;

    /// Alias for ```euclid::default::Point2D<f64>```.
    pub type Point = euclid::default::Point2D<f64>;

    /// Alias for ```euclid::default::Vector2D<f64>```.
    pub type Vector = euclid::default::Vector2D<f64>;

    /// Alias for ```euclid::default::Box2D<f64>```.
    pub type Box2D = euclid::default::Box2D<f64>;

    /// Alias for ```euclid::default::Transform2D<f64>```.
    pub type Transform = euclid::default::Transform2D<f64>;

    /// An angle in radians (f64).
    pub type Angle = euclid::Angle<f64>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }
}

pub mod traits {
    //! Transformation trait shared by every curve type.

    use crate::math::{Point, Transform, Vector};
    use crate::Matrix3;

    pub trait Transformation {
        fn transform_point(&self, p: Point) -> Point;
        fn transform_vector(&self, v: Vector) -> Vector;
    }

    impl Transformation for Transform {
        fn transform_point(&self, p: Point) -> Point {
            Transform::transform_point(self, p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            Transform::transform_vector(self, v)
        }
    }

    impl Transformation for Matrix3 {
        fn transform_point(&self, p: Point) -> Point {
            Matrix3::transform_point(self, p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            Matrix3::transform_vector(self, v)
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, T: Transformation> Transformation for &'l T {
        #[inline]
        fn transform_point(&self, p: Point) -> Point {
            (*self).transform_point(p)
        }

        #[inline]
        fn transform_vector(&self, v: Vector) -> Vector {
            (*self).transform_vector(v)
        }
    }
}

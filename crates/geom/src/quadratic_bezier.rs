use crate::math::{point, Point, Vector};
use crate::parametric::ParametricCurve;
use crate::traits::Transformation;
use crate::{CubicBezierSegment, LineSegment};

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

impl QuadraticBezierSegment {
    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: f64) -> f64 {
        let one_t = 1.0 - t;
        self.from.x * one_t * one_t + self.ctrl.x * 2.0 * one_t * t + self.to.x * t * t
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: f64) -> f64 {
        let one_t = 1.0 - t;
        self.from.y * one_t * one_t + self.ctrl.y * 2.0 * one_t * t + self.to.y * t * t
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f64) -> Vector {
        (self.ctrl - self.from) * (2.0 * (1.0 - t)) + (self.to - self.ctrl) * (2.0 * t)
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Return the x inflection point or None if this curve is x-monotonic.
    pub fn local_x_extremum_t(&self) -> Option<f64> {
        local_extremum_t(self.from.x, self.ctrl.x, self.to.x)
    }

    /// Return the y inflection point or None if this curve is y-monotonic.
    pub fn local_y_extremum_t(&self) -> Option<f64> {
        local_extremum_t(self.from.y, self.ctrl.y, self.to.y)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f64) -> (QuadraticBezierSegment, QuadraticBezierSegment) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Elevate this curve to a third order bézier.
    pub fn to_cubic(&self) -> CubicBezierSegment {
        CubicBezierSegment {
            from: self.from,
            ctrl1: (self.from + self.ctrl.to_vector() * 2.0) / 3.0,
            ctrl2: (self.to + self.ctrl.to_vector() * 2.0) / 3.0,
            to: self.to,
        }
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        QuadraticBezierSegment {
            from: transform.transform_point(self.from),
            ctrl: transform.transform_point(self.ctrl),
            to: transform.transform_point(self.to),
        }
    }
}

fn local_extremum_t(from: f64, ctrl: f64, to: f64) -> Option<f64> {
    let div = from - 2.0 * ctrl + to;
    if div == 0.0 {
        return None;
    }
    let t = (from - ctrl) / div;
    if t > 0.0 && t < 1.0 {
        return Some(t);
    }

    None
}

impl ParametricCurve for QuadraticBezierSegment {
    fn sample(&self, t: f64) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    fn from(&self) -> Point {
        self.from
    }

    fn to(&self) -> Point {
        self.to
    }

    /// Exact extrema: the derivative of a quadratic curve is linear in t.
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        let mut extend = |p: Point| {
            *min = min.min(p);
            *max = max.max(p);
        };
        extend(self.from);
        extend(self.to);
        if let Some(t) = self.local_x_extremum_t() {
            extend(point(self.x(t), self.from.y));
        }
        if let Some(t) = self.local_y_extremum_t() {
            extend(point(self.from.x, self.y(t)));
        }
    }
}

#[test]
fn bounding_box_for_monotonic_quadratic_bezier_segment() {
    let a = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(0.0, 0.0),
        to: Point::new(2.0, 0.0),
    };

    let expected_aabb = crate::BoundingBox::new(0.0, 0.0, 2.0, 0.0);
    assert_eq!(a.bounding_box(), expected_aabb);
}

#[test]
fn minimum_bounding_box_for_quadratic_bezier_segment() {
    let a = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(1.0, 1.0),
        to: Point::new(2.0, 0.0),
    };

    let expected_aabb = crate::BoundingBox::new(0.0, 0.0, 2.0, 0.5);
    assert_eq!(a.bounding_box(), expected_aabb);
}

#[test]
fn local_extremum_for_simple_segment() {
    let a = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(1.0, 1.0),
        to: Point::new(2.0, 0.0),
    };

    assert_eq!(a.local_y_extremum_t(), Some(0.5));
    assert_eq!(a.local_x_extremum_t(), None);
}

#[test]
fn derivatives() {
    let c1 = QuadraticBezierSegment {
        from: Point::new(1.0, 1.0),
        ctrl: Point::new(2.0, 1.0),
        to: Point::new(2.0, 2.0),
    };

    assert_eq!(c1.derivative(0.0), crate::math::vector(2.0, 0.0));
    assert_eq!(c1.derivative(1.0), crate::math::vector(0.0, 2.0));
    assert_eq!(c1.tangent(0.0).y, 0.0);
}

#[test]
fn elevation_keeps_the_curve() {
    let q = QuadraticBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl: Point::new(5.0, 10.0),
        to: Point::new(10.0, 0.0),
    };
    let c = q.to_cubic();
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        assert!((q.sample(t) - c.sample(t)).length() < 1e-12);
    }
}

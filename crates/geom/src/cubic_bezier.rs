use crate::math::{Point, Vector};
use crate::parametric::ParametricCurve;
use crate::traits::Transformation;
use crate::utils::quadratic_roots_in_unit_range;
use crate::{LineSegment, QuadraticBezierSegment};

use arrayvec::ArrayVec;

/// Half width of the parameter window sampled around each analytic extremum.
const EXTREMUM_REFINEMENT_WINDOW: f64 = 1e-4;
const EXTREMUM_REFINEMENT_STEPS: i32 = 4;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl CubicBezierSegment {
    /// Sample the x coordinate of the curve at t (expecting t between 0 and 1).
    pub fn x(&self, t: f64) -> f64 {
        cubic(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x, t)
    }

    /// Sample the y coordinate of the curve at t (expecting t between 0 and 1).
    pub fn y(&self, t: f64) -> f64 {
        cubic(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y, t)
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f64) -> Vector {
        let one_t = 1.0 - t;
        (self.ctrl1 - self.from) * (3.0 * one_t * one_t)
            + (self.ctrl2 - self.ctrl1) * (6.0 * one_t * t)
            + (self.to - self.ctrl2) * (3.0 * t * t)
    }

    /// Split this curve into two sub-curves.
    pub fn split(&self, t: f64) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Approximate the curve with a single quadratic bézier segment.
    ///
    /// This is terribly inaccurate if the curve isn't actually almost quadratic.
    pub fn to_quadratic(&self) -> QuadraticBezierSegment {
        let c1 = (self.ctrl1 * 3.0 - self.from) * 0.5;
        let c2 = (self.ctrl2 * 3.0 - self.to) * 0.5;
        QuadraticBezierSegment {
            from: self.from,
            ctrl: ((c1 + c2) * 0.5).to_point(),
            to: self.to,
        }
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        CubicBezierSegment {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }

    /// Parameters of the local x extrema, strictly inside `]0, 1[`.
    pub fn local_x_extrema_t(&self) -> ArrayVec<f64, 2> {
        local_extrema(self.from.x, self.ctrl1.x, self.ctrl2.x, self.to.x)
    }

    /// Parameters of the local y extrema, strictly inside `]0, 1[`.
    pub fn local_y_extrema_t(&self) -> ArrayVec<f64, 2> {
        local_extrema(self.from.y, self.ctrl1.y, self.ctrl2.y, self.to.y)
    }
}

#[inline]
fn cubic(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let one_t = 1.0 - t;
    let one_t2 = one_t * one_t;
    p0 * one_t2 * one_t + p1 * 3.0 * one_t2 * t + p2 * 3.0 * one_t * t * t + p3 * t * t * t
}

// The derivative of a cubic bézier is the quadratic
// 3(p1 - p0)(1 - t)² + 6(p2 - p1)(1 - t)t + 3(p3 - p2)t²,
// expanded here to a * t² + b * t + c.
fn local_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> ArrayVec<f64, 2> {
    let a = 3.0 * (p3 + 3.0 * (p1 - p2) - p0);
    let b = 6.0 * (p2 - 2.0 * p1 + p0);
    let c = 3.0 * (p1 - p0);

    let mut result = ArrayVec::new();
    quadratic_roots_in_unit_range(a, b, c, &mut |t| result.push(t));

    result
}

impl ParametricCurve for CubicBezierSegment {
    fn sample(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    fn from(&self) -> Point {
        self.from
    }

    fn to(&self) -> Point {
        self.to
    }

    /// Analytic extrema per axis, refined by sampling a small window around each root.
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        let mut extend = |p: Point| {
            *min = min.min(p);
            *max = max.max(p);
        };
        extend(self.from);
        extend(self.to);

        let candidates = self
            .local_x_extrema_t()
            .into_iter()
            .chain(self.local_y_extrema_t());
        for t in candidates {
            for step in -EXTREMUM_REFINEMENT_STEPS..=EXTREMUM_REFINEMENT_STEPS {
                let dt = EXTREMUM_REFINEMENT_WINDOW * step as f64 / EXTREMUM_REFINEMENT_STEPS as f64;
                extend(self.sample((t + dt).clamp(0.0, 1.0)));
            }
        }
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn minimum_bounding_box_for_cubic_bezier_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(0.5, 2.0),
        ctrl2: Point::new(1.5, -2.0),
        to: Point::new(2.0, 0.0),
    };

    let b = a.bounding_box();
    // Contained in the loose box, containing the tight one.
    assert!(b.left >= 0.0 && b.right() <= 2.0);
    assert!(b.top >= -0.6 && b.bottom() <= 0.6);
    assert!(b.top <= -0.5 && b.bottom() >= 0.5);
}

#[test]
fn bounding_box_matches_dense_sampling() {
    let a = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(-5.0, 10.0),
        ctrl2: point(15.0, 12.0),
        to: point(10.0, 0.0),
    };

    let exact = a.bounding_box();
    let sampled = crate::BoundingBox::from_points(a.points(20_000)).unwrap();
    assert!(exact.approx_eq_eps(&sampled, 1e-6));
}

#[test]
fn y_extrema_for_simple_cubic_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(1.0, 2.0),
        ctrl2: Point::new(2.0, 2.0),
        to: Point::new(3.0, 0.0),
    };

    assert_eq!(a.local_y_extrema_t().as_slice(), &[0.5]);
    assert!(a.local_x_extrema_t().is_empty());
}

#[test]
fn x_extrema_for_simple_cubic_segment() {
    let a = CubicBezierSegment {
        from: Point::new(0.0, 0.0),
        ctrl1: Point::new(1.0, 2.0),
        ctrl2: Point::new(1.0, 2.0),
        to: Point::new(0.0, 0.0),
    };

    assert_eq!(a.local_x_extrema_t().as_slice(), &[0.5]);
}

#[test]
fn derivatives() {
    let c1 = CubicBezierSegment {
        from: Point::new(1.0, 1.0),
        ctrl1: Point::new(1.0, 2.0),
        ctrl2: Point::new(2.0, 1.0),
        to: Point::new(2.0, 2.0),
    };

    assert_eq!(c1.derivative(0.0), crate::math::vector(0.0, 3.0));
    assert_eq!(c1.derivative(1.0), crate::math::vector(0.0, 3.0));
    assert_eq!(c1.derivative(0.5), crate::math::vector(1.5, 0.0));
}

#[test]
fn split_and_flip() {
    let c = CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(2.0, 5.0),
        ctrl2: point(8.0, 5.0),
        to: point(10.0, 0.0),
    };
    let (a, b) = c.split(0.3);
    assert!((a.to - c.sample(0.3)).length() < 1e-12);
    assert!((a.sample(0.5) - c.sample(0.15)).length() < 1e-12);
    assert!((b.sample(0.5) - c.sample(0.65)).length() < 1e-12);

    let f = c.flip();
    assert!((f.sample(0.25) - c.sample(0.75)).length() < 1e-12);
}

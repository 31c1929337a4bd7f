use crate::math::{point, Point, Vector};
use crate::parametric::ParametricCurve;
use crate::traits::Transformation;
use crate::utils::{min_max, normalized};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        LineSegment { from, to }
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Split this segment into two sub-segments.
    #[inline]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let split_point = self.from.lerp(self.to, t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    /// Returns the line containing this segment.
    #[inline]
    pub fn to_line(&self) -> Line {
        Line {
            point: self.from,
            vector: self.to - self.from,
        }
    }

    /// Translates both end points by the same vector.
    #[inline]
    pub fn translate(&self, by: Vector) -> Self {
        LineSegment {
            from: self.from + by,
            to: self.to + by,
        }
    }

    /// Applies the transform to this segment and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        LineSegment {
            from: transform.transform_point(self.from),
            to: transform.transform_point(self.to),
        }
    }

    /// Computes the intersection (if any) between this segment and another one.
    ///
    /// The result is provided in the form of the `t` parameter of each
    /// segment. Segments that share an end point are not considered intersecting.
    pub fn intersection_t(&self, other: &Self) -> Option<(f64, f64)> {
        if self.to == other.to
            || self.from == other.from
            || self.from == other.to
            || self.to == other.from
        {
            return None;
        }

        let v1 = self.to_vector();
        let v2 = other.to_vector();

        let v1_cross_v2 = v1.cross(v2);
        if v1_cross_v2 == 0.0 {
            // The segments are parallel
            return None;
        }

        let sign = v1_cross_v2.signum();
        let abs_cross = v1_cross_v2.abs();

        let v3 = other.from - self.from;

        // Dividing by the cross product is postponed to keep the range checks exact.
        let t = v3.cross(v2) * sign;
        let u = v3.cross(v1) * sign;

        if t < 0.0 || t > abs_cross || u < 0.0 || u > abs_cross {
            return None;
        }

        Some((t / abs_cross, u / abs_cross))
    }

    #[inline]
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        self.intersection_t(other).map(|(t, _)| self.sample(t))
    }

    /// Computes the closest point on this segment to `p`.
    pub fn closest_point(&self, p: Point) -> Point {
        let v1 = self.to - self.from;
        let v2 = p - self.from;
        let square_length = v1.square_length();
        if square_length == 0.0 {
            return self.from;
        }
        let t = (v2.dot(v1) / square_length).clamp(0.0, 1.0);

        self.from + v1 * t
    }

    #[inline]
    pub fn distance_to_point(&self, p: Point) -> f64 {
        (self.closest_point(p) - p).length()
    }
}

impl ParametricCurve for LineSegment {
    #[inline]
    fn sample(&self, t: f64) -> Point {
        self.from.lerp(self.to, t)
    }

    fn from(&self) -> Point {
        self.from
    }

    fn to(&self) -> Point {
        self.to
    }

    fn tangent(&self, _t: f64) -> Vector {
        normalized(self.to_vector())
    }

    fn compute_lengths(&self, divisions: usize) -> Vec<f64> {
        let divisions = divisions.max(1);
        let length = self.to_vector().length();
        (0..=divisions)
            .map(|i| length * i as f64 / divisions as f64)
            .collect()
    }

    fn length(&self) -> f64 {
        self.to_vector().length()
    }

    fn u_to_t(&self, u: f64) -> f64 {
        u.clamp(0.0, 1.0)
    }

    fn adaptive_points(&self, _divisions: usize) -> Vec<Point> {
        vec![self.from, self.to]
    }

    fn min_max(&self, min: &mut Point, max: &mut Point) {
        let (min_x, max_x) = min_max(self.from.x, self.to.x);
        let (min_y, max_y) = min_max(self.from.y, self.to.y);
        *min = min.min(point(min_x, min_y));
        *max = max.max(point(max_x, max_y));
    }

    /// Projects the point on the segment.
    fn t_for_point(&self, target: Point, _epsilon: f64) -> f64 {
        let v = self.to_vector();
        let square_length = v.square_length();
        if square_length == 0.0 {
            return 0.0;
        }

        ((target - self.from).dot(v) / square_length).clamp(0.0, 1.0)
    }
}

/// An infinite line defined by a point and a vector.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Line {
    pub point: Point,
    pub vector: Vector,
}

impl Line {
    /// The line going through two points.
    #[inline]
    pub fn through(a: Point, b: Point) -> Self {
        Line {
            point: a,
            vector: b - a,
        }
    }

    /// Intersection as the parameter along `self`: the point is `self.point + self.vector * t`.
    ///
    /// Returns `None` when the normalized cross product of the directions is below
    /// `tolerance`, in which case the lines are considered parallel.
    pub fn intersection_t(&self, other: &Self, tolerance: f64) -> Option<f64> {
        let lengths = self.vector.length() * other.vector.length();
        if lengths == 0.0 {
            return None;
        }

        let det = self.vector.cross(other.vector);
        if (det / lengths).abs() <= tolerance {
            return None;
        }

        Some((other.point - self.point).cross(other.vector) / det)
    }

    pub fn intersection(&self, other: &Self) -> Option<Point> {
        self.intersection_t(other, f64::EPSILON)
            .map(|t| self.point + self.vector * t)
    }

    pub fn distance_to_point(&self, p: &Point) -> f64 {
        self.signed_distance_to_point(p).abs()
    }

    pub fn signed_distance_to_point(&self, p: &Point) -> f64 {
        let v = *p - self.point;
        self.vector.cross(v) / self.vector.length()
    }

    /// The same line translated by `d` along its normal `(vy, -vx)`.
    pub fn offset(&self, d: f64) -> Self {
        let n = crate::utils::perpendicular(normalized(self.vector));
        Line {
            point: self.point + n * d,
            vector: self.vector,
        }
    }
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point, b: Point, epsilon: f64) -> bool {
    (a - b).length() <= epsilon
}

#[test]
fn intersection_rotated() {
    use core::f64::consts::PI;
    let epsilon = 0.0001;
    let count: u32 = 100;

    for i in 0..count {
        for j in 0..count {
            if i % (count / 2) == j % (count / 2) {
                // avoid the colinear case.
                continue;
            }

            let angle1 = i as f64 / (count as f64) * 2.0 * PI;
            let angle2 = j as f64 / (count as f64) * 2.0 * PI;

            let l1 = LineSegment {
                from: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                to: point(-10.0 * angle1.cos(), -10.0 * angle1.sin()),
            };

            let l2 = LineSegment {
                from: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                to: point(-10.0 * angle2.cos(), -10.0 * angle2.sin()),
            };

            let (t, u) = l1.intersection_t(&l2).unwrap();
            assert!(fuzzy_eq_point(l1.sample(t), point(0.0, 0.0), epsilon));
            assert!(fuzzy_eq_point(l2.sample(u), point(0.0, 0.0), epsilon));

            let p = l1.to_line().intersection(&l2.to_line()).unwrap();
            assert!(fuzzy_eq_point(p, point(0.0, 0.0), epsilon));
        }
    }
}

#[test]
fn intersection_touching() {
    let l1 = LineSegment::new(point(0.0, 0.0), point(10.0, 10.0));
    let l2 = LineSegment::new(point(10.0, 10.0), point(10.0, 0.0));

    assert!(l1.intersection(&l2).is_none());
}

#[test]
fn parallel_lines() {
    let a = Line::through(point(0.0, 0.0), point(1.0, 0.0));
    let b = Line::through(point(0.0, 1.0), point(5.0, 1.0));
    assert_eq!(a.intersection(&b), None);
    assert_eq!(a.intersection_t(&b, 1e-9), None);

    let c = Line::through(point(2.0, -1.0), point(2.0, 1.0));
    let t = a.intersection_t(&c, 1e-9).unwrap();
    assert!((t - 2.0).abs() < 1e-12);
}

#[test]
fn offset_along_normal() {
    // The normal of a line going right points up (negative y).
    let l = Line::through(point(0.0, 0.0), point(10.0, 0.0)).offset(2.0);
    assert_eq!(l.point, point(0.0, -2.0));
    assert!((l.signed_distance_to_point(&point(3.0, 0.0)) - 2.0).abs() < 1e-12);
}

#[test]
fn segment_measurements() {
    let l = LineSegment::new(point(0.0, 0.0), point(3.0, 4.0));
    assert_eq!(l.length(), 5.0);
    assert_eq!(l.point_at(0.5), point(1.5, 2.0));
    assert_eq!(l.adaptive_points(12), vec![point(0.0, 0.0), point(3.0, 4.0)]);
    assert!((l.t_for_point(point(1.5, 2.0), 1e-9) - 0.5).abs() < 1e-12);
    assert_eq!(l.tangent(0.3), crate::math::vector(0.6, 0.8));

    let b = l.bounding_box();
    assert_eq!(b, crate::BoundingBox::new(0.0, 0.0, 3.0, 4.0));
    assert_eq!(l.closest_point(point(10.0, 0.0)), point(3.0, 4.0));
}

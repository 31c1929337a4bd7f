//! The contract shared by every curve type: sampling, tangents, arc length and bounds.

use crate::math::{Point, Vector};
use crate::utils::{normalized, perpendicular};
use crate::BoundingBox;

use std::borrow::Cow;
use std::vec::Vec;

/// Parameter step of the central difference used to approximate tangents.
pub const TANGENT_EPSILON: f64 = 1e-4;

/// Number of uniform parameter steps of the arc-length table.
pub const DEFAULT_ARC_LENGTH_DIVISIONS: usize = 200;

/// Number of points generated for a curved segment when approximating it with a polyline.
pub const DEFAULT_CURVE_DIVISIONS: usize = 12;

/// Upper bound on the bisection steps of `t_for_point`.
const MAX_BISECTION_STEPS: usize = 64;

/// Common APIs to curve types.
///
/// Curves are evaluated with a parameter `t` in `[0, 1]`. Callers are expected to clamp
/// the parameter; values outside of the range are not guarded against.
///
/// `sample` is the only required method. Everything else is derived from it and can be
/// overridden when a curve type knows better (exact tangents, analytic extrema, cached
/// arc lengths, ...).
pub trait ParametricCurve {
    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: f64) -> Point;

    /// Start of the curve.
    fn from(&self) -> Point {
        self.sample(0.0)
    }

    /// End of the curve.
    fn to(&self) -> Point {
        self.sample(1.0)
    }

    /// Whether the curve is a closed shape whose end points are not meaningful.
    fn is_closed(&self) -> bool {
        false
    }

    /// Unit tangent at t, approximated with a central difference.
    ///
    /// The difference interval is clamped to [0, 1] so that the curve is never sampled
    /// outside of its domain. Zero-length tangents normalize to the zero vector.
    fn tangent(&self, t: f64) -> Vector {
        let t1 = (t - TANGENT_EPSILON).max(0.0);
        let t2 = (t + TANGENT_EPSILON).min(1.0);

        normalized(self.sample(t2) - self.sample(t1))
    }

    /// Unit normal at t: the tangent rotated by -90°.
    fn normal(&self, t: f64) -> Vector {
        perpendicular(self.tangent(t))
    }

    /// Number of uniform parameter steps used to build the arc-length table.
    fn arc_length_divisions(&self) -> usize {
        DEFAULT_ARC_LENGTH_DIVISIONS
    }

    /// Cumulative arc-length table with `divisions + 1` entries, starting at zero.
    fn compute_lengths(&self, divisions: usize) -> Vec<f64> {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.sample(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);

        for i in 1..=divisions {
            let p = self.sample(i as f64 / divisions as f64);
            sum += (p - last).length();
            lengths.push(sum);
            last = p;
        }

        lengths
    }

    /// The arc-length table of the curve.
    ///
    /// The default implementation computes it on every call. Types that cache the
    /// table return a borrowed slice instead.
    fn lengths(&self) -> Cow<'_, [f64]> {
        Cow::Owned(self.compute_lengths(self.arc_length_divisions()))
    }

    /// Approximate length of the curve.
    fn length(&self) -> f64 {
        self.lengths().last().copied().unwrap_or(0.0)
    }

    /// Maps a normalized arc-length fraction `u` to the parameter `t`.
    fn u_to_t(&self, u: f64) -> f64 {
        u_to_t_mapping(&self.lengths(), u)
    }

    /// Sample the curve at a normalized distance `u` along its length.
    fn point_at(&self, u: f64) -> Point {
        self.sample(self.u_to_t(u))
    }

    /// Unit tangent at a normalized distance `u` along the curve.
    fn tangent_at(&self, u: f64) -> Vector {
        self.tangent(self.u_to_t(u))
    }

    /// `divisions + 1` points at uniform parameter steps.
    fn points(&self, divisions: usize) -> Vec<Point> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.sample(i as f64 / divisions as f64))
            .collect()
    }

    /// `divisions + 1` points at uniform arc-length steps.
    fn spaced_points(&self, divisions: usize) -> Vec<Point> {
        let divisions = divisions.max(1);
        let lengths = self.lengths();
        (0..=divisions)
            .map(|i| self.sample(u_to_t_mapping(&lengths, i as f64 / divisions as f64)))
            .collect()
    }

    /// Points approximating the curve, as few as the curve type allows.
    ///
    /// Straight segments only produce their end points.
    fn adaptive_points(&self, divisions: usize) -> Vec<Point> {
        self.points(divisions)
    }

    /// Extends `min` and `max` so that they contain the curve.
    ///
    /// The default implementation approximates the curve with its adaptive points.
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        for p in self.adaptive_points(DEFAULT_CURVE_DIVISIONS * 4) {
            *min = min.min(p);
            *max = max.max(p);
        }
    }

    fn bounding_box(&self) -> BoundingBox {
        let mut min = Point::new(f64::MAX, f64::MAX);
        let mut max = Point::new(f64::MIN, f64::MIN);
        self.min_max(&mut min, &mut max);

        BoundingBox::from_min_max(min, max)
    }

    /// Finds the parameter of a point on the curve by bisection.
    ///
    /// This assumes that x is monotonic in t. On curves that loop back on themselves
    /// the result is bounded but may not be the parameter of `target`.
    fn t_for_point(&self, target: Point, epsilon: f64) -> f64 {
        let epsilon = epsilon.max(f64::EPSILON);
        let start = self.sample(0.0);
        let end = self.sample(1.0);
        if (start - target).length() <= epsilon {
            return 0.0;
        }
        if (end - target).length() <= epsilon {
            return 1.0;
        }

        let increasing = end.x >= start.x;
        let mut low = 0.0;
        let mut high = 1.0;
        let mut mid = 0.5;
        for _ in 0..MAX_BISECTION_STEPS {
            mid = (low + high) * 0.5;
            let p = self.sample(mid);
            if (p - target).length() <= epsilon || high - low <= epsilon {
                break;
            }

            if (p.x < target.x) == increasing {
                low = mid;
            } else {
                high = mid;
            }
        }

        mid
    }
}

/// Maps an arc-length fraction to a curve parameter using a cumulative length table.
///
/// Binary searches the bracketing samples, then interpolates linearly inside the bracket.
/// `u_to_t_mapping(lengths, 0.0) == 0.0` and `u_to_t_mapping(lengths, 1.0) == 1.0`.
pub fn u_to_t_mapping(lengths: &[f64], u: f64) -> f64 {
    if u <= 0.0 {
        return 0.0;
    }
    if u >= 1.0 || lengths.len() < 2 {
        return u.min(1.0);
    }

    let segments = (lengths.len() - 1) as f64;
    let total = lengths[lengths.len() - 1];
    if total <= 0.0 {
        return u;
    }

    let target = u * total;
    // First entry that is not shorter than the target. lengths[0] is zero and the target
    // is positive so the index is at least 1.
    let index = lengths.partition_point(|&l| l < target);
    if index >= lengths.len() {
        return 1.0;
    }
    if lengths[index] == target {
        return index as f64 / segments;
    }

    let before = lengths[index - 1];
    let after = lengths[index];
    let fraction = (target - before) / (after - before);

    ((index - 1) as f64 + fraction) / segments
}

#[cfg(test)]
struct Parabola;

#[cfg(test)]
impl ParametricCurve for Parabola {
    fn sample(&self, t: f64) -> Point {
        Point::new(t * 10.0, t * t * 10.0)
    }
}

#[test]
fn u_to_t_bounds_and_monotonicity() {
    let lengths = Parabola.lengths();
    assert_eq!(u_to_t_mapping(&lengths, 0.0), 0.0);
    assert_eq!(u_to_t_mapping(&lengths, 1.0), 1.0);

    let mut prev = 0.0;
    for i in 0..=100 {
        let t = u_to_t_mapping(&lengths, i as f64 / 100.0);
        assert!(t >= prev);
        assert!((0.0..=1.0).contains(&t));
        prev = t;
    }
}

#[test]
fn u_to_t_even_spacing() {
    let points = Parabola.spaced_points(10);
    let total = Parabola.length();
    for pair in points.windows(2) {
        let d = (pair[1] - pair[0]).length();
        assert!((d - total / 10.0).abs() < total * 1e-3);
    }
}

#[test]
fn u_to_t_degenerate_tables() {
    assert_eq!(u_to_t_mapping(&[0.0, 0.0, 0.0], 0.5), 0.5);
    assert_eq!(u_to_t_mapping(&[0.0], 0.5), 0.5);
    assert_eq!(u_to_t_mapping(&[0.0, 1.0, 2.0], 0.5), 0.5);
    // Flat bracket: the target 1.5 falls between the last two entries.
    let t = u_to_t_mapping(&[0.0, 1.0, 1.0, 2.0], 0.75);
    assert!((t - 2.5 / 3.0).abs() < 1e-12);
}

#[test]
fn tangent_clamped_at_ends() {
    let start = Parabola.tangent(0.0);
    let end = Parabola.tangent(1.0);
    assert!((start.length() - 1.0).abs() < 1e-9);
    assert!((end.length() - 1.0).abs() < 1e-9);
    assert!(start.y < end.y);
    // The normal is the tangent rotated by -90°.
    let n = Parabola.normal(0.5);
    assert!(n.dot(Parabola.tangent(0.5)).abs() < 1e-12);
}

#[test]
fn t_for_monotonic_point() {
    let t = Parabola.t_for_point(Parabola.sample(0.3), 1e-9);
    assert!((t - 0.3).abs() < 1e-6);
    assert_eq!(Parabola.t_for_point(Parabola.sample(0.0), 1e-9), 0.0);
    assert_eq!(Parabola.t_for_point(Parabola.sample(1.0), 1e-9), 1.0);
}

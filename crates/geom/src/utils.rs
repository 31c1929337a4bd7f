//! Small numeric helpers shared by the curve types.

use crate::math::{vector, Vector};

#[inline]
pub fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Normalizes a vector, returning the zero vector instead of dividing by zero.
#[inline]
pub fn normalized(v: Vector) -> Vector {
    let length = v.length();
    if length == 0.0 || !length.is_finite() {
        return Vector::zero();
    }

    v / length
}

/// The vector rotated by -90°, that is `(x, y) -> (y, -x)`.
#[inline]
pub fn perpendicular(v: Vector) -> Vector {
    vector(v.y, -v.x)
}

/// Rotates a vector by an angle in radians.
#[inline]
pub fn rotate(v: Vector, angle: f64) -> Vector {
    let (sin, cos) = angle.sin_cos();
    vector(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Signed angle from `u` to `v`, between -PI and PI.
///
/// The cosine is clamped to [-1, 1] before `acos` so that floating point overshoot
/// on nearly colinear vectors does not produce NaN.
pub fn signed_angle(u: Vector, v: Vector) -> f64 {
    let sign = if u.cross(v) < 0.0 { -1.0 } else { 1.0 };
    let lengths = u.length() * v.length();
    if lengths == 0.0 {
        return 0.0;
    }
    let cos = (u.dot(v) / lengths).clamp(-1.0, 1.0);

    sign * cos.acos()
}

/// Returns the roots of `a * t² + b * t + c` that are strictly inside `]0, 1[`.
pub fn quadratic_roots_in_unit_range(a: f64, b: f64, c: f64, cb: &mut dyn FnMut(f64)) {
    fn in_range(t: f64) -> bool {
        t > 0.0 && t < 1.0
    }

    if a.abs() < 1e-12 {
        if b.abs() > 1e-12 {
            let t = -c / b;
            if in_range(t) {
                cb(t);
            }
        }
        return;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return;
    }

    if discriminant == 0.0 {
        let t = -b / (2.0 * a);
        if in_range(t) {
            cb(t);
        }
        return;
    }

    let discriminant_sqrt = discriminant.sqrt();
    let mut first = (-b - discriminant_sqrt) / (2.0 * a);
    let mut second = (-b + discriminant_sqrt) / (2.0 * a);
    if first > second {
        core::mem::swap(&mut first, &mut second);
    }

    if in_range(first) {
        cb(first);
    }
    if in_range(second) {
        cb(second);
    }
}

#[test]
fn signed_angle_quadrants() {
    use core::f64::consts::{FRAC_PI_2, PI};

    let x = vector(1.0, 0.0);
    assert!((signed_angle(x, vector(0.0, 1.0)) - FRAC_PI_2).abs() < 1e-12);
    assert!((signed_angle(x, vector(0.0, -1.0)) + FRAC_PI_2).abs() < 1e-12);
    assert!((signed_angle(x, vector(-1.0, 0.0)).abs() - PI).abs() < 1e-12);
    // Colinear vectors whose normalized dot product overshoots 1.0.
    assert!(!signed_angle(vector(0.1, 0.3), vector(0.1, 0.3) * 3.0).is_nan());
    assert_eq!(signed_angle(x, Vector::zero()), 0.0);
}

#[test]
fn normalize_zero_vector() {
    assert_eq!(normalized(Vector::zero()), Vector::zero());
    assert_eq!(normalized(vector(0.0, 2.0)), vector(0.0, 1.0));
}

#[test]
fn roots_in_range() {
    let mut roots = std::vec::Vec::new();
    // (t - 0.25) * (t - 0.75)
    quadratic_roots_in_unit_range(1.0, -1.0, 0.1875, &mut |t| roots.push(t));
    assert_eq!(roots.len(), 2);
    assert!((roots[0] - 0.25).abs() < 1e-12);
    assert!((roots[1] - 0.75).abs() < 1e-12);

    roots.clear();
    quadratic_roots_in_unit_range(0.0, 2.0, -1.0, &mut |t| roots.push(t));
    assert_eq!(roots, [0.5]);
}

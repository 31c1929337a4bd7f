use crate::math::{point, vector, Angle, Point, Transform, Vector};

use core::ops::Mul;

/// A 3x3 homogeneous transformation matrix.
///
/// Points are column vectors:
///
/// ```text
/// | m11 m12 m13 |   | x |
/// | m21 m22 m23 | * | y |
/// | m31 m32 m33 |   | 1 |
/// ```
///
/// Affine maps keep the last row equal to `0 0 1`. Only `transpose` can produce a
/// projective matrix, in which case `transform_point` divides by the homogeneous
/// coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Matrix3 {
    pub m11: f64, pub m12: f64, pub m13: f64,
    pub m21: f64, pub m22: f64, pub m23: f64,
    pub m31: f64, pub m32: f64, pub m33: f64,
}

impl Matrix3 {
    /// Creates a matrix from its coefficients in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn new(
        m11: f64, m12: f64, m13: f64,
        m21: f64, m22: f64, m23: f64,
        m31: f64, m32: f64, m33: f64,
    ) -> Self {
        Matrix3 {
            m11, m12, m13,
            m21, m22, m23,
            m31, m32, m33,
        }
    }

    /// Creates an affine matrix from the 2x3 upper part.
    #[rustfmt::skip]
    pub const fn affine(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Matrix3::new(
            a, c, tx,
            b, d, ty,
            0.0, 0.0, 1.0,
        )
    }

    #[rustfmt::skip]
    pub const fn identity() -> Self {
        Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    pub const fn translation(tx: f64, ty: f64) -> Self {
        Matrix3::affine(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn rotation(angle: Angle) -> Self {
        let (sin, cos) = angle.radians.sin_cos();
        Matrix3::affine(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Matrix3::affine(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// A shear along both axes, as in the SVG `skewX`/`skewY` transforms.
    pub fn skew(x: Angle, y: Angle) -> Self {
        Matrix3::affine(1.0, y.radians.tan(), x.radians.tan(), 1.0, 0.0, 0.0)
    }

    /// Returns `self * other`: `other` is applied first.
    #[rustfmt::skip]
    pub fn pre_multiply(&self, other: &Self) -> Self {
        let a = self;
        let b = other;
        Matrix3::new(
            a.m11 * b.m11 + a.m12 * b.m21 + a.m13 * b.m31,
            a.m11 * b.m12 + a.m12 * b.m22 + a.m13 * b.m32,
            a.m11 * b.m13 + a.m12 * b.m23 + a.m13 * b.m33,

            a.m21 * b.m11 + a.m22 * b.m21 + a.m23 * b.m31,
            a.m21 * b.m12 + a.m22 * b.m22 + a.m23 * b.m32,
            a.m21 * b.m13 + a.m22 * b.m23 + a.m23 * b.m33,

            a.m31 * b.m11 + a.m32 * b.m21 + a.m33 * b.m31,
            a.m31 * b.m12 + a.m32 * b.m22 + a.m33 * b.m32,
            a.m31 * b.m13 + a.m32 * b.m23 + a.m33 * b.m33,
        )
    }

    /// Returns a matrix that applies `self` and then `other`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        other.pre_multiply(self)
    }

    #[inline]
    pub fn then_translate(&self, v: Vector) -> Self {
        self.then(&Matrix3::translation(v.x, v.y))
    }

    #[inline]
    pub fn then_rotate(&self, angle: Angle) -> Self {
        self.then(&Matrix3::rotation(angle))
    }

    #[inline]
    pub fn then_scale(&self, sx: f64, sy: f64) -> Self {
        self.then(&Matrix3::scale(sx, sy))
    }

    pub fn determinant(&self) -> f64 {
        self.m11 * (self.m22 * self.m33 - self.m23 * self.m32)
            - self.m12 * (self.m21 * self.m33 - self.m23 * self.m31)
            + self.m13 * (self.m21 * self.m32 - self.m22 * self.m31)
    }

    /// Determinant of the linear (2x2) part, negative when the map flips orientation.
    #[inline]
    pub fn linear_determinant(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    /// Returns the inverse matrix, or `None` if it is singular.
    #[rustfmt::skip]
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv_det = 1.0 / det;

        Some(Matrix3::new(
            (self.m22 * self.m33 - self.m23 * self.m32) * inv_det,
            (self.m13 * self.m32 - self.m12 * self.m33) * inv_det,
            (self.m12 * self.m23 - self.m13 * self.m22) * inv_det,

            (self.m23 * self.m31 - self.m21 * self.m33) * inv_det,
            (self.m11 * self.m33 - self.m13 * self.m31) * inv_det,
            (self.m13 * self.m21 - self.m11 * self.m23) * inv_det,

            (self.m21 * self.m32 - self.m22 * self.m31) * inv_det,
            (self.m12 * self.m31 - self.m11 * self.m32) * inv_det,
            (self.m11 * self.m22 - self.m12 * self.m21) * inv_det,
        ))
    }

    #[rustfmt::skip]
    pub fn transpose(&self) -> Self {
        Matrix3::new(
            self.m11, self.m21, self.m31,
            self.m12, self.m22, self.m32,
            self.m13, self.m23, self.m33,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Matrix3::identity()
    }

    pub fn transform_point(&self, p: Point) -> Point {
        let x = self.m11 * p.x + self.m12 * p.y + self.m13;
        let y = self.m21 * p.x + self.m22 * p.y + self.m23;
        let w = self.m31 * p.x + self.m32 * p.y + self.m33;
        if w != 1.0 && w != 0.0 {
            return point(x / w, y / w);
        }

        point(x, y)
    }

    /// Applies the linear part of the transformation (no translation).
    #[inline]
    pub fn transform_vector(&self, v: Vector) -> Vector {
        vector(
            self.m11 * v.x + self.m12 * v.y,
            self.m21 * v.x + self.m22 * v.y,
        )
    }

    /// Images of the x and y basis vectors under the linear part.
    #[inline]
    pub fn basis(&self) -> (Vector, Vector) {
        (vector(self.m11, self.m21), vector(self.m12, self.m22))
    }

    /// Length of the transformed basis vectors.
    pub fn decompose_scale(&self) -> (f64, f64) {
        let (x, y) = self.basis();
        (x.length(), y.length())
    }

    /// Converts to euclid's row-vector convention.
    pub fn to_transform(&self) -> Transform {
        Transform::new(self.m11, self.m21, self.m12, self.m22, self.m13, self.m23)
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Matrix3::identity()
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;
    fn mul(self, other: Matrix3) -> Matrix3 {
        self.pre_multiply(&other)
    }
}

impl From<Transform> for Matrix3 {
    fn from(t: Transform) -> Self {
        Matrix3::affine(t.m11, t.m12, t.m21, t.m22, t.m31, t.m32)
    }
}

#[cfg(test)]
fn assert_matrix_eq(a: &Matrix3, b: &Matrix3) {
    let a = [a.m11, a.m12, a.m13, a.m21, a.m22, a.m23, a.m31, a.m32, a.m33];
    let b = [b.m11, b.m12, b.m13, b.m21, b.m22, b.m23, b.m31, b.m32, b.m33];
    for i in 0..9 {
        assert!((a[i] - b[i]).abs() < 1e-9, "{a:?} != {b:?}");
    }
}

#[test]
fn compose_order() {
    let m = Matrix3::translation(10.0, 0.0).then(&Matrix3::scale(2.0, 3.0));
    assert_eq!(m.transform_point(point(1.0, 1.0)), point(22.0, 3.0));

    let m = Matrix3::scale(2.0, 3.0) * Matrix3::translation(10.0, 0.0);
    assert_eq!(m.transform_point(point(1.0, 1.0)), point(22.0, 3.0));
}

#[test]
fn inverse_roundtrip() {
    let m = Matrix3::rotation(Angle::degrees(30.0))
        .then_scale(2.0, 0.5)
        .then(&Matrix3::skew(Angle::degrees(20.0), Angle::radians(0.0)))
        .then_translate(vector(3.0, -4.0));
    let inv = m.inverse().unwrap();
    assert_matrix_eq(&(m * inv), &Matrix3::identity());
    assert_matrix_eq(&(inv * m), &Matrix3::identity());

    assert_eq!(Matrix3::scale(0.0, 1.0).inverse(), None);
}

#[test]
fn transpose_twice() {
    let m = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
    assert_eq!(m.transpose().m12, 4.0);
    assert_eq!(m.transpose().transpose(), m);
}

#[test]
fn euclid_conversion() {
    let m = Matrix3::rotation(Angle::degrees(45.0)).then_translate(vector(1.0, 2.0));
    let p = point(3.0, -1.0);
    let a = m.transform_point(p);
    let b = m.to_transform().transform_point(p);
    assert!((a - b).length() < 1e-12);
    assert_matrix_eq(&Matrix3::from(m.to_transform()), &m);
}

#[test]
fn rotation_direction() {
    // y points down, positive angles rotate x towards y.
    let p = Matrix3::rotation(Angle::degrees(90.0)).transform_point(point(1.0, 0.0));
    assert!((p - point(0.0, 1.0)).length() < 1e-12);
}

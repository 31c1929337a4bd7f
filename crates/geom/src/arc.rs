//! Elliptic arc related maths and tools.

use core::f64::consts::{PI, TAU};

use crate::math::{vector, Angle, Point, Vector};
use crate::parametric::ParametricCurve;
use crate::utils::{normalized, rotate, signed_angle};
use crate::Matrix3;

use arrayvec::ArrayVec;

/// Angles closer than this are considered equal when normalizing sweeps.
const ANGLE_EPSILON: f64 = 1e-10;

/// Relative tolerance of the orthogonality test between the transformed axes of an ellipse.
const SKEW_EPSILON: f64 = 1e-9;

/// An elliptic arc curve segment using the SVG's end-point notation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SvgArc {
    pub from: Point,
    pub to: Point,
    pub radii: Vector,
    pub x_rotation: Angle,
    pub flags: ArcFlags,
}

/// Flag parameters for arcs as described by the SVG specification.
///
/// For most situations using the SVG arc notation, there are four different arcs
/// (two different ellipses, each with two different arc sweeps) that satisfy the
/// arc parameter set. The `large_arc` and `sweep` flags indicate which one of the
/// four arcs are drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ArcFlags {
    /// Of the four candidate arc sweeps, two will represent an arc sweep of greater
    /// than or equal to 180 degrees (the "large-arc"), and two will represent an arc
    /// sweep of less than or equal to 180 degrees (the "small arc"). If `large_arc`
    /// is true, then one of the two larger arc sweeps will be chosen; otherwise one
    /// of the smaller arc sweeps will be chosen.
    pub large_arc: bool,
    /// If `sweep` is true, then the arc will be drawn in a "positive-angle" direction
    /// (which is clockwise on screen with the y axis pointing down).
    pub sweep: bool,
}

/// An elliptic arc in center parameterization.
///
/// The ellipse is rotated by `x_rotation` around its center. The arc goes from
/// `start_angle` to `end_angle`, in the positive-angle direction if `clockwise` is set
/// (y points down, so positive angles appear clockwise) and in the negative one
/// otherwise. See `sweep_angle` for how the pair of angles and the direction flag
/// resolve into a signed sweep.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc {
    pub center: Point,
    pub radii: Vector,
    pub x_rotation: Angle,
    pub start_angle: Angle,
    pub end_angle: Angle,
    pub clockwise: bool,
}

impl Arc {
    pub fn new(
        center: Point,
        radii: Vector,
        x_rotation: Angle,
        start_angle: Angle,
        end_angle: Angle,
        clockwise: bool,
    ) -> Self {
        Arc {
            center,
            radii,
            x_rotation,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// A full circle starting and ending at angle zero.
    pub fn circle(center: Point, radius: f64) -> Self {
        Arc {
            center,
            radii: vector(radius, radius),
            x_rotation: Angle::radians(0.0),
            start_angle: Angle::radians(0.0),
            end_angle: Angle::radians(TAU),
            clockwise: true,
        }
    }

    /// Converts from the SVG end-point notation.
    ///
    /// Radii that are too small to join the end points are scaled up uniformly.
    /// Returns `None` if the arc is a straight line (see `SvgArc::is_straight_line`).
    pub fn from_svg_arc(arc: &SvgArc) -> Option<Arc> {
        if arc.is_straight_line() {
            return None;
        }

        let mut rx = arc.radii.x.abs();
        let mut ry = arc.radii.y.abs();

        let xr = arc.x_rotation.radians % TAU;
        let half_diff = (arc.from - arc.to) * 0.5;
        let mid = arc.from.lerp(arc.to, 0.5);
        // F6.5.1
        let p = rotate(half_diff, -xr);

        // F6.6.2
        let lambda = (p.x * p.x) / (rx * rx) + (p.y * p.y) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let rxry = rx * ry;
        let rxpy = rx * p.y;
        let rypx = ry * p.x;
        let sum_of_sq = rxpy * rxpy + rypx * rypx;

        let sign_coe = if arc.flags.large_arc == arc.flags.sweep {
            -1.0
        } else {
            1.0
        };
        let coe = sign_coe * ((rxry * rxry - sum_of_sq) / sum_of_sq).max(0.0).sqrt();

        // F6.5.2
        let transformed_cx = coe * rxpy / ry;
        let transformed_cy = -coe * rypx / rx;

        // F6.5.3
        let center = mid + rotate(vector(transformed_cx, transformed_cy), xr);

        // F6.5.5 and F6.5.6
        let u = vector((p.x - transformed_cx) / rx, (p.y - transformed_cy) / ry);
        let v = vector((-p.x - transformed_cx) / rx, (-p.y - transformed_cy) / ry);

        let start = signed_angle(vector(1.0, 0.0), u);
        let mut delta = signed_angle(u, v) % TAU;
        if !arc.flags.sweep && delta > 0.0 {
            delta -= TAU;
        } else if arc.flags.sweep && delta < 0.0 {
            delta += TAU;
        }

        Some(Arc {
            center,
            radii: vector(rx, ry),
            x_rotation: arc.x_rotation,
            start_angle: Angle::radians(start.rem_euclid(TAU)),
            end_angle: Angle::radians((start + delta).rem_euclid(TAU)),
            clockwise: arc.flags.sweep,
        })
    }

    /// Converts to the SVG end-point notation.
    ///
    /// A single SVG arc cannot describe a full turn: full ellipses are split at the
    /// antipodal angle into two half arcs.
    pub fn to_svg_arcs(&self) -> ArrayVec<SvgArc, 2> {
        let mut arcs = ArrayVec::new();
        let sweep = self.sweep_angle().radians;
        let radii = vector(self.radii.x.abs(), self.radii.y.abs());
        let flags = ArcFlags {
            large_arc: false,
            sweep: sweep > 0.0,
        };

        if self.is_full() {
            let from = self.sample(0.0);
            let mid = self.sample(0.5);
            arcs.push(SvgArc {
                from,
                to: mid,
                radii,
                x_rotation: self.x_rotation,
                flags,
            });
            arcs.push(SvgArc {
                from: mid,
                to: from,
                radii,
                x_rotation: self.x_rotation,
                flags,
            });
            return arcs;
        }

        arcs.push(SvgArc {
            from: self.sample(0.0),
            to: self.sample(1.0),
            radii,
            x_rotation: self.x_rotation,
            flags: ArcFlags {
                large_arc: sweep.abs() > PI,
                ..flags
            },
        });

        arcs
    }

    /// The signed angle swept by the arc, in `[-2π, 2π]`.
    ///
    /// - Equal start and end angles sweep nothing.
    /// - Otherwise the difference is reduced modulo 2π into `]0, 2π]`, a difference that
    ///   is a multiple of 2π meaning a full turn.
    /// - Counter-clockwise arcs take the complementary negative sweep.
    pub fn sweep_angle(&self) -> Angle {
        let diff = self.end_angle.radians - self.start_angle.radians;
        if diff.abs() < ANGLE_EPSILON {
            return Angle::radians(0.0);
        }

        let mut delta = diff.rem_euclid(TAU);
        if delta < ANGLE_EPSILON || TAU - delta < ANGLE_EPSILON {
            delta = TAU;
        }

        if !self.clockwise {
            delta -= TAU;
            if delta == 0.0 {
                delta = -TAU;
            }
        }

        Angle::radians(delta)
    }

    /// Whether the arc covers the whole ellipse.
    pub fn is_full(&self) -> bool {
        self.sweep_angle().radians.abs() >= TAU - ANGLE_EPSILON
    }

    /// Arcs with a zero radius collapse to a point or a segment.
    pub fn is_degenerate(&self) -> bool {
        self.radii.x == 0.0 || self.radii.y == 0.0
    }

    /// The angle (in the ellipse's parameter space) at t.
    #[inline]
    pub fn angle_at(&self, t: f64) -> Angle {
        Angle::radians(self.start_angle.radians + self.sweep_angle().radians * t)
    }

    /// Swap the beginning and the end of the arc.
    pub fn flip(&self) -> Self {
        Arc {
            start_angle: self.end_angle,
            end_angle: self.start_angle,
            clockwise: !self.clockwise,
            ..*self
        }
    }

    pub fn translate(&self, by: Vector) -> Self {
        Arc {
            center: self.center + by,
            ..*self
        }
    }

    /// Applies an affine transformation to the arc.
    ///
    /// The image of an ellipse under an affine map is an ellipse, but unless the map
    /// keeps the ellipse's axes orthogonal (no shear relative to the ellipse) the new
    /// radii and rotation are not a per-axis scale of the old ones. In that case they
    /// are recovered from the eigen decomposition of the quadratic form of the
    /// transformed ellipse.
    ///
    /// The start and end angles are remapped so that `sample(t)` on the result matches
    /// the transformed `sample(t)` of `self` for every t. Maps that reverse the
    /// orientation flip the direction of the arc.
    pub fn transformed(&self, m: &Matrix3) -> Self {
        let center = m.transform_point(self.center);

        let phi = self.x_rotation.radians;
        // Images of the ellipse's semi axes.
        let a = m.transform_vector(rotate(vector(self.radii.x, 0.0), phi));
        let b = m.transform_vector(rotate(vector(0.0, self.radii.y), phi));

        let det = m.linear_determinant();
        let skewed = a.dot(b).abs() > SKEW_EPSILON * a.length() * b.length();

        let (rx, ry, rotation) = if skewed {
            match principal_axes(a, b) {
                Some(axes) => axes,
                None => {
                    log::debug!("singular transformation applied to an arc");
                    (a.length(), b.length(), a.y.atan2(a.x))
                }
            }
        } else {
            (a.length(), b.length(), a.y.atan2(a.x))
        };

        let sweep = self.sweep_angle().radians;
        let orientation = if det < 0.0 { -1.0 } else { 1.0 };

        let e1 = vector(rotation.cos(), rotation.sin());
        let e2 = vector(-e1.y, e1.x);
        let remap = |theta: f64| -> f64 {
            let (sin, cos) = theta.sin_cos();
            let d = a * cos + b * sin;
            if rx == 0.0 || ry == 0.0 {
                return theta * orientation;
            }
            (d.dot(e2) / ry).atan2(d.dot(e1) / rx)
        };

        let start = remap(self.start_angle.radians);
        let new_sweep = sweep * orientation;

        Arc {
            center,
            radii: vector(rx, ry),
            x_rotation: Angle::radians(rotation),
            start_angle: Angle::radians(start),
            end_angle: Angle::radians(start + new_sweep),
            clockwise: if det < 0.0 {
                !self.clockwise
            } else {
                self.clockwise
            },
        }
    }

    fn point_at_angle(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        self.center + rotate(vector(self.radii.x * cos, self.radii.y * sin), self.x_rotation.radians)
    }

    // Whether an angle lies within the swept range.
    fn contains_angle(&self, angle: f64, sweep: f64) -> bool {
        let offset = if sweep >= 0.0 {
            (angle - self.start_angle.radians).rem_euclid(TAU)
        } else {
            (self.start_angle.radians - angle).rem_euclid(TAU)
        };

        offset <= sweep.abs()
    }
}

/// Semi axes and rotation of the ellipse `{a * cos(θ) + b * sin(θ)}`.
///
/// The ellipse is the set of points x with `xᵀ Q x = 1` where `Q = (A Aᵀ)⁻¹` and A has
/// columns a and b. The eigenvalues of Q are the inverse squared semi axes.
fn principal_axes(a: Vector, b: Vector) -> Option<(f64, f64, f64)> {
    let basis = Matrix3::affine(a.x, a.y, b.x, b.y, 0.0, 0.0);
    let q = basis.pre_multiply(&basis.transpose()).inverse()?;

    let p = q.m11;
    let r = q.m22;
    // Symmetrize to absorb rounding in the inverse.
    let s = (q.m12 + q.m21) * 0.5;

    let half_trace = (p + r) * 0.5;
    let discriminant = (((p - r) * 0.5).powi(2) + s * s).sqrt();
    let lambda1 = half_trace - discriminant;
    let lambda2 = half_trace + discriminant;
    if lambda1 <= 0.0 || lambda2 <= 0.0 {
        return None;
    }

    // Eigenvector of the smallest eigenvalue: the major axis.
    let rotation = if s.abs() > f64::EPSILON * (p.abs() + r.abs()) {
        (lambda1 - p).atan2(s)
    } else if p <= r {
        0.0
    } else {
        PI * 0.5
    };

    Some((1.0 / lambda1.sqrt(), 1.0 / lambda2.sqrt(), rotation))
}

impl ParametricCurve for Arc {
    fn sample(&self, t: f64) -> Point {
        self.point_at_angle(self.angle_at(t).radians)
    }

    fn is_closed(&self) -> bool {
        self.is_full()
    }

    /// Exact tangent from the derivative of the ellipse equation.
    fn tangent(&self, t: f64) -> Vector {
        let sweep = self.sweep_angle().radians;
        let (sin, cos) = (self.start_angle.radians + sweep * t).sin_cos();
        let d = rotate(
            vector(-self.radii.x * sin, self.radii.y * cos),
            self.x_rotation.radians,
        );

        normalized(d * sweep)
    }

    fn adaptive_points(&self, divisions: usize) -> Vec<Point> {
        self.points(divisions * 2)
    }

    /// Exact bounds: the end points plus the axis extrema of the rotated ellipse that
    /// fall inside the swept range.
    fn min_max(&self, min: &mut Point, max: &mut Point) {
        let mut extend = |p: Point| {
            *min = min.min(p);
            *max = max.max(p);
        };
        extend(self.sample(0.0));
        extend(self.sample(1.0));

        let sweep = self.sweep_angle().radians;
        let (sin, cos) = self.x_rotation.radians.sin_cos();
        let (rx, ry) = (self.radii.x, self.radii.y);
        let x_extremum = (-ry * sin).atan2(rx * cos);
        let y_extremum = (ry * cos).atan2(rx * sin);

        for angle in [x_extremum, x_extremum + PI, y_extremum, y_extremum + PI] {
            if self.contains_angle(angle, sweep) {
                extend(self.point_at_angle(angle));
            }
        }
    }
}

impl SvgArc {
    /// Converts to the center parameterization, see `Arc::from_svg_arc`.
    pub fn to_arc(&self) -> Option<Arc> {
        Arc::from_svg_arc(self)
    }

    /// Per SVG spec, this arc should be rendered as a line_to segment.
    ///
    /// Do not convert an `SvgArc` into an `Arc` if this returns true.
    pub fn is_straight_line(&self) -> bool {
        self.radii.x.abs() <= 1e-12 || self.radii.y.abs() <= 1e-12 || self.from == self.to
    }
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn assert_point_eq(a: Point, b: Point, epsilon: f64) {
    assert!((a - b).length() <= epsilon, "{a:?} != {b:?}");
}

#[test]
fn full_circle_sampling() {
    let arc = Arc::circle(point(0.0, 0.0), 1.0);
    assert_point_eq(arc.sample(0.0), point(1.0, 0.0), 1e-9);
    assert_point_eq(arc.sample(0.25), point(0.0, 1.0), 1e-9);
    assert_point_eq(arc.sample(0.5), point(-1.0, 0.0), 1e-9);
    assert_point_eq(arc.sample(0.75), point(0.0, -1.0), 1e-9);
    assert!(arc.is_full());
    assert!(arc.is_closed());
}

#[test]
fn sweep_normalization() {
    let arc = |start: f64, end: f64, clockwise: bool| {
        Arc::new(
            point(0.0, 0.0),
            vector(1.0, 1.0),
            Angle::radians(0.0),
            Angle::radians(start),
            Angle::radians(end),
            clockwise,
        )
        .sweep_angle()
        .radians
    };

    let eq = |a: f64, b: f64| (a - b).abs() < 1e-12;
    assert!(eq(arc(0.0, PI * 0.5, true), PI * 0.5));
    assert!(eq(arc(0.0, PI * 0.5, false), -PI * 1.5));
    assert!(eq(arc(PI * 0.5, 0.0, false), -PI * 0.5));
    assert!(eq(arc(PI * 0.5, 0.0, true), PI * 1.5));
    assert!(eq(arc(0.0, TAU, true), TAU));
    assert!(eq(arc(0.0, TAU, false), -TAU));
    assert!(eq(arc(0.0, -TAU, false), -TAU));
    assert!(eq(arc(1.0, 1.0, true), 0.0));
    assert!(eq(arc(1.0, 1.0, false), 0.0));
    assert!(eq(arc(PI, 0.0, true), PI));
}

#[test]
fn flip_reverses_sweep() {
    let a = Arc::new(
        point(1.0, 2.0),
        vector(3.0, 2.0),
        Angle::radians(0.3),
        Angle::radians(0.5),
        Angle::radians(2.0),
        true,
    );
    let f = a.flip();
    assert!((f.sweep_angle().radians + a.sweep_angle().radians).abs() < 1e-12);
    assert_point_eq(f.sample(0.2), a.sample(0.8), 1e-9);

    let full = Arc::circle(point(0.0, 0.0), 2.0).flip();
    assert!((full.sweep_angle().radians + TAU).abs() < 1e-12);
}

#[test]
fn from_svg_half_circle() {
    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
        radii: vector(5.0, 5.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags {
            large_arc: false,
            sweep: true,
        },
    }
    .to_arc()
    .unwrap();

    assert_point_eq(arc.center, point(5.0, 0.0), 1e-9);
    assert_eq!(arc.radii, vector(5.0, 5.0));
    assert!(arc.clockwise);
    assert!((arc.start_angle.radians - PI).abs() < 1e-9);
    assert!(arc.end_angle.radians.abs() < 1e-9);
    // Positive sweep with y down goes through the top of the circle.
    assert_point_eq(arc.sample(0.5), point(5.0, -5.0), 1e-9);
}

#[test]
fn from_svg_scales_radii_up() {
    let arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
        radii: vector(1.0, 1.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags::default(),
    }
    .to_arc()
    .unwrap();

    assert!((arc.radii.x - 5.0).abs() < 1e-9);
    assert_point_eq(arc.sample(0.0), point(0.0, 0.0), 1e-9);
    assert_point_eq(arc.sample(1.0), point(10.0, 0.0), 1e-9);
}

#[test]
fn svg_arc_roundtrip_all_flags() {
    for &(large_arc, sweep) in &[(false, false), (false, true), (true, false), (true, true)] {
        let svg = SvgArc {
            from: point(1.0, 2.0),
            to: point(7.0, 4.0),
            radii: vector(6.0, 4.0),
            x_rotation: Angle::degrees(30.0),
            flags: ArcFlags { large_arc, sweep },
        };
        let arc = svg.to_arc().unwrap();
        assert_point_eq(arc.sample(0.0), svg.from, 1e-9);
        assert_point_eq(arc.sample(1.0), svg.to, 1e-9);
        assert_eq!(arc.sweep_angle().radians.abs() > PI, large_arc);

        let back = arc.to_svg_arcs();
        assert_eq!(back.len(), 1);
        assert_point_eq(back[0].from, svg.from, 1e-9);
        assert_point_eq(back[0].to, svg.to, 1e-9);
        assert_eq!(back[0].flags, svg.flags);
    }
}

#[test]
fn full_circle_to_two_svg_arcs() {
    let arcs = Arc::circle(point(0.0, 0.0), 2.0).to_svg_arcs();
    assert_eq!(arcs.len(), 2);
    assert_point_eq(arcs[0].from, point(2.0, 0.0), 1e-9);
    assert_point_eq(arcs[0].to, point(-2.0, 0.0), 1e-9);
    assert_point_eq(arcs[1].to, point(2.0, 0.0), 1e-9);
    assert!(arcs[0].flags.sweep);
}

#[test]
fn straight_svg_arcs() {
    let mut arc = SvgArc {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
        radii: vector(0.0, 5.0),
        x_rotation: Angle::radians(0.0),
        flags: ArcFlags::default(),
    };
    assert!(arc.is_straight_line());
    assert_eq!(arc.to_arc(), None);

    arc.radii = vector(5.0, 5.0);
    arc.to = arc.from;
    assert!(arc.is_straight_line());
}

#[test]
fn transform_with_shear_matches_pointwise() {
    let shear = Matrix3::skew(Angle::degrees(30.0), Angle::radians(0.0));
    let arc = Arc::circle(point(3.0, 1.0), 2.0);
    let transformed = arc.transformed(&shear);

    for i in 0..8 {
        let t = i as f64 / 8.0;
        assert_point_eq(transformed.sample(t), shear.transform_point(arc.sample(t)), 1e-9);
    }
    assert!(transformed.radii.x > transformed.radii.y);
}

#[test]
fn transform_partial_arcs() {
    let arc = Arc::new(
        point(1.0, -1.0),
        vector(4.0, 2.0),
        Angle::degrees(20.0),
        Angle::radians(0.4),
        Angle::radians(2.5),
        false,
    );
    let transforms = [
        Matrix3::rotation(Angle::degrees(40.0)).then_translate(vector(2.0, 3.0)),
        Matrix3::scale(2.0, 0.5),
        Matrix3::scale(-1.0, 1.0),
        Matrix3::skew(Angle::degrees(10.0), Angle::degrees(-25.0)).then_scale(1.5, -2.0),
        Matrix3::affine(1.0, 0.3, 0.7, 1.2, -4.0, 5.0),
    ];

    for m in &transforms {
        let transformed = arc.transformed(m);
        for i in 0..=8 {
            let t = i as f64 / 8.0;
            assert_point_eq(transformed.sample(t), m.transform_point(arc.sample(t)), 1e-9);
        }
    }
}

#[test]
fn mirrored_arc_flips_direction() {
    let arc = Arc::new(
        point(0.0, 0.0),
        vector(2.0, 1.0),
        Angle::radians(0.0),
        Angle::radians(0.0),
        Angle::radians(1.0),
        true,
    );
    let mirrored = arc.transformed(&Matrix3::scale(1.0, -1.0));
    assert!(!mirrored.clockwise);
    assert!((mirrored.sweep_angle().radians + 1.0).abs() < 1e-9);
}

#[test]
fn exact_bounding_box() {
    let arc = Arc::circle(point(1.0, 1.0), 2.0);
    let b = arc.bounding_box();
    assert!(b.approx_eq_eps(&crate::BoundingBox::new(-1.0, -1.0, 4.0, 4.0), 1e-9));

    // Quarter arc from angle 0 to π/2: from (r, 0) down to (0, r).
    let quarter = Arc::new(
        point(0.0, 0.0),
        vector(1.0, 1.0),
        Angle::radians(0.0),
        Angle::radians(0.0),
        Angle::radians(PI * 0.5),
        true,
    );
    assert!(quarter
        .bounding_box()
        .approx_eq_eps(&crate::BoundingBox::new(0.0, 0.0, 1.0, 1.0), 1e-9));

    let rotated = Arc {
        x_rotation: Angle::degrees(45.0),
        radii: vector(2.0, 1.0),
        ..arc
    };
    let sampled = crate::BoundingBox::from_points(rotated.points(10_000)).unwrap();
    assert!(rotated.bounding_box().approx_eq_eps(&sampled, 1e-6));
}

#[test]
fn exact_tangent() {
    let arc = Arc::circle(point(0.0, 0.0), 1.0);
    assert_point_eq(
        point(0.0, 0.0) + arc.tangent(0.0),
        point(0.0, 1.0),
        1e-12,
    );
    assert_point_eq(point(0.0, 0.0) + arc.flip().tangent(1.0), point(0.0, -1.0), 1e-12);
}

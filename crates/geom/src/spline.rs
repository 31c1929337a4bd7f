use crate::math::{Point, Vector};
use crate::parametric::ParametricCurve;
use crate::traits::Transformation;
use crate::CubicBezierSegment;

/// A uniform Catmull-Rom spline going through a sequence of points.
///
/// The parameter is split evenly between the spans. The first and last spans reuse
/// their end point as the missing outer neighbour.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CatmullRomSpline {
    pub points: Vec<Point>,
}

impl CatmullRomSpline {
    pub fn new(points: Vec<Point>) -> Self {
        CatmullRomSpline { points }
    }

    /// Number of spans between consecutive points.
    pub fn num_spans(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    // The four control points and the tangents of a span.
    fn span(&self, index: usize) -> (Point, Point, Vector, Vector) {
        let last = self.points.len() - 1;
        let p0 = self.points[index.saturating_sub(1)];
        let p1 = self.points[index];
        let p2 = self.points[(index + 1).min(last)];
        let p3 = self.points[(index + 2).min(last)];

        (p1, p2, (p2 - p0) * 0.5, (p3 - p1) * 0.5)
    }

    /// The equivalent sequence of cubic bézier segments, one per span.
    pub fn to_cubic_beziers(&self) -> Vec<CubicBezierSegment> {
        (0..self.num_spans())
            .map(|i| {
                let (p1, p2, v0, v1) = self.span(i);
                CubicBezierSegment {
                    from: p1,
                    ctrl1: p1 + v0 / 3.0,
                    ctrl2: p2 - v1 / 3.0,
                    to: p2,
                }
            })
            .collect()
    }

    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        CatmullRomSpline {
            points: self
                .points
                .iter()
                .map(|p| transform.transform_point(*p))
                .collect(),
        }
    }
}

impl ParametricCurve for CatmullRomSpline {
    fn sample(&self, t: f64) -> Point {
        match self.points.len() {
            0 => return Point::origin(),
            1 => return self.points[0],
            _ => {}
        }

        let p = self.num_spans() as f64 * t;
        let index = (p.floor().max(0.0) as usize).min(self.points.len() - 1);
        let weight = p - index as f64;
        let (p1, p2, v0, v1) = self.span(index);

        let t2 = weight * weight;
        let t3 = weight * t2;
        let a = (p1.to_vector() * 2.0 - p2.to_vector() * 2.0 + v0 + v1) * t3;
        let b = (p2.to_vector() * 3.0 - p1.to_vector() * 3.0 - v0 * 2.0 - v1) * t2;

        p1 + a + b + v0 * weight
    }

    fn adaptive_points(&self, divisions: usize) -> Vec<Point> {
        self.points(divisions * self.points.len().max(1))
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn goes_through_points() {
    let spline = CatmullRomSpline::new(vec![
        point(0.0, 0.0),
        point(10.0, 5.0),
        point(20.0, -5.0),
        point(30.0, 0.0),
    ]);
    for (i, p) in spline.points.iter().enumerate() {
        let t = i as f64 / 3.0;
        assert!((spline.sample(t) - *p).length() < 1e-9);
    }
}

#[test]
fn beziers_match_spline() {
    let spline = CatmullRomSpline::new(vec![
        point(0.0, 0.0),
        point(10.0, 5.0),
        point(20.0, -5.0),
    ]);
    let beziers = spline.to_cubic_beziers();
    assert_eq!(beziers.len(), 2);
    for (i, bezier) in beziers.iter().enumerate() {
        for j in 0..=4 {
            let local = j as f64 / 4.0;
            let t = (i as f64 + local) / 2.0;
            assert!((bezier.sample(local) - spline.sample(t)).length() < 1e-9);
        }
    }
}

#[test]
fn degenerate_splines() {
    assert_eq!(CatmullRomSpline::default().sample(0.5), Point::origin());
    let single = CatmullRomSpline::new(vec![point(1.0, 2.0)]);
    assert_eq!(single.sample(0.3), point(1.0, 2.0));
    assert!(single.to_cubic_beziers().is_empty());
}

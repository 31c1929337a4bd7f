use crate::math::{point, Point};
use crate::parametric::ParametricCurve;
use crate::traits::Transformation;
use crate::LineSegment;

/// A sequence of points joined by straight edges.
///
/// The parameter walks the edges uniformly: each edge covers the same range of t
/// whatever its length. Closed polygons have an extra edge from the last point back
/// to the first one.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Polygon {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polygon {
    pub fn new(points: Vec<Point>, closed: bool) -> Self {
        Polygon { points, closed }
    }

    pub fn num_edges(&self) -> usize {
        num_edges(self.points.len(), self.closed)
    }

    pub fn edges(&self) -> impl Iterator<Item = LineSegment> + '_ {
        edges(&self.points, self.closed)
    }

    /// Signed area of the polygon (as if it was closed), positive for clockwise
    /// polygons on screen.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        Polygon {
            points: self
                .points
                .iter()
                .map(|p| transform.transform_point(*p))
                .collect(),
            closed: self.closed,
        }
    }
}

impl ParametricCurve for Polygon {
    fn sample(&self, t: f64) -> Point {
        sample_polyline(&self.points, self.closed, t)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn adaptive_points(&self, _divisions: usize) -> Vec<Point> {
        let mut points = self.points.clone();
        if self.closed {
            if let Some(first) = self.points.first() {
                points.push(*first);
            }
        }

        points
    }

    fn min_max(&self, min: &mut Point, max: &mut Point) {
        for p in &self.points {
            *min = min.min(*p);
            *max = max.max(*p);
        }
    }
}

/// An axis-aligned rectangle as a closed curve.
///
/// The outline starts at the top-left corner and goes through the top-right,
/// bottom-right and bottom-left corners, which is the positive (clockwise on screen)
/// orientation when the size is positive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            point(self.x, self.y),
            point(self.x + self.width, self.y),
            point(self.x + self.width, self.y + self.height),
            point(self.x, self.y + self.height),
        ]
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon {
            points: self.corners().to_vec(),
            closed: true,
        }
    }
}

impl ParametricCurve for Rectangle {
    fn sample(&self, t: f64) -> Point {
        sample_polyline(&self.corners(), true, t)
    }

    fn is_closed(&self) -> bool {
        true
    }

    fn adaptive_points(&self, _divisions: usize) -> Vec<Point> {
        let corners = self.corners();
        vec![corners[0], corners[1], corners[2], corners[3], corners[0]]
    }

    fn min_max(&self, min: &mut Point, max: &mut Point) {
        let corners = self.corners();
        *min = min.min(corners[0]).min(corners[2]);
        *max = max.max(corners[0]).max(corners[2]);
    }
}

fn num_edges(num_points: usize, closed: bool) -> usize {
    match num_points {
        0 | 1 => 0,
        n if closed => n,
        n => n - 1,
    }
}

fn edges(points: &[Point], closed: bool) -> impl Iterator<Item = LineSegment> + '_ {
    let n = points.len();
    (0..num_edges(n, closed)).map(move |i| LineSegment {
        from: points[i],
        to: points[(i + 1) % n],
    })
}

fn sample_polyline(points: &[Point], closed: bool, t: f64) -> Point {
    let n = points.len();
    let edges = num_edges(n, closed);
    if edges == 0 {
        return points.first().copied().unwrap_or_else(Point::origin);
    }

    let p = t * edges as f64;
    let index = (p.floor().max(0.0) as usize).min(edges - 1);
    let weight = p - index as f64;

    points[index].lerp(points[(index + 1) % n], weight)
}

/// Shoelace formula.
pub(crate) fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        area += a.x * b.y - b.x * a.y;
    }

    area * 0.5
}

#[test]
fn polygon_sampling() {
    let square = Rectangle::new(0.0, 0.0, 10.0, 10.0).to_polygon();
    assert_eq!(square.num_edges(), 4);
    assert_eq!(square.sample(0.0), point(0.0, 0.0));
    assert_eq!(square.sample(0.125), point(5.0, 0.0));
    assert_eq!(square.sample(0.5), point(10.0, 10.0));
    assert_eq!(square.sample(1.0), point(0.0, 0.0));
    assert!(square.signed_area() > 0.0);

    let open = Polygon::new(vec![point(0.0, 0.0), point(4.0, 0.0), point(4.0, 4.0)], false);
    assert_eq!(open.num_edges(), 2);
    assert_eq!(open.sample(1.0), point(4.0, 4.0));
    assert_eq!(open.sample(0.75), point(4.0, 2.0));
    assert_eq!(open.adaptive_points(12).len(), 3);
}

#[test]
fn rectangle_measurements() {
    let r = Rectangle::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(r.bounding_box(), crate::BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    assert!((r.length() - 14.0).abs() < 1e-9);
    assert_eq!(r.sample(0.25), point(4.0, 2.0));
    assert!(r.is_closed());
}

#[test]
fn degenerate_polygons() {
    assert_eq!(Polygon::default().sample(0.5), Point::origin());
    assert_eq!(Polygon::default().edges().count(), 0);
    let single = Polygon::new(vec![point(3.0, 3.0)], true);
    assert_eq!(single.sample(0.5), point(3.0, 3.0));
}

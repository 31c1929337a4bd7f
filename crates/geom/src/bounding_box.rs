use crate::math::{point, Box2D, Point, Vector};

/// An axis-aligned rectangle described by its top-left corner and its size.
///
/// Boxes built from min/max pairs always have a non-negative width and height.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        BoundingBox {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds the box spanning two corners, in any order.
    pub fn from_min_max(a: Point, b: Point) -> Self {
        let min = a.min(b);
        let max = a.max(b);

        BoundingBox {
            left: min.x,
            top: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    /// The smallest box containing all points, or `None` if there are none.
    pub fn from_points<Iter>(points: Iter) -> Option<Self>
    where
        Iter: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));

        Some(BoundingBox::from_min_max(min, max))
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn min(&self) -> Point {
        point(self.left, self.top)
    }

    #[inline]
    pub fn max(&self) -> Point {
        point(self.right(), self.bottom())
    }

    #[inline]
    pub fn center(&self) -> Point {
        point(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    pub fn union(&self, other: &Self) -> Self {
        BoundingBox::from_min_max(self.min().min(other.min()), self.max().max(other.max()))
    }

    pub fn translate(&self, by: Vector) -> Self {
        BoundingBox {
            left: self.left + by.x,
            top: self.top + by.y,
            ..*self
        }
    }

    /// Grows the box by `d` on each side (shrinks it if `d` is negative).
    pub fn inflate(&self, d: f64) -> Self {
        BoundingBox {
            left: self.left - d,
            top: self.top - d,
            width: (self.width + 2.0 * d).max(0.0),
            height: (self.height + 2.0 * d).max(0.0),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    pub fn to_box2d(&self) -> Box2D {
        Box2D {
            min: self.min(),
            max: self.max(),
        }
    }

    /// Component-wise comparison with a tolerance.
    pub fn approx_eq_eps(&self, other: &Self, epsilon: f64) -> bool {
        (self.left - other.left).abs() <= epsilon
            && (self.top - other.top).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }
}

impl From<Box2D> for BoundingBox {
    fn from(b: Box2D) -> Self {
        BoundingBox::from_min_max(b.min, b.max)
    }
}

#[test]
fn min_max_order() {
    let b = BoundingBox::from_min_max(point(10.0, -2.0), point(-4.0, 6.0));
    assert_eq!(b, BoundingBox::new(-4.0, -2.0, 14.0, 8.0));
    assert_eq!(b.right(), 10.0);
    assert_eq!(b.bottom(), 6.0);
    assert_eq!(b.center(), point(3.0, 2.0));
}

#[test]
fn union_and_translate() {
    let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
    let b = BoundingBox::new(2.0, -1.0, 1.0, 1.0);
    assert_eq!(a.union(&b), BoundingBox::new(0.0, -1.0, 3.0, 2.0));
    assert_eq!(
        a.translate(crate::math::vector(1.0, 2.0)),
        BoundingBox::new(1.0, 2.0, 1.0, 1.0)
    );
    assert_eq!(a.inflate(1.0), BoundingBox::new(-1.0, -1.0, 3.0, 3.0));
}

#[test]
fn from_no_points() {
    assert_eq!(BoundingBox::from_points(std::iter::empty()), None);
    assert_eq!(
        BoundingBox::from_points([point(1.0, 5.0), point(3.0, 2.0), point(2.0, 9.0)]),
        Some(BoundingBox::new(1.0, 2.0, 2.0, 7.0))
    );
}

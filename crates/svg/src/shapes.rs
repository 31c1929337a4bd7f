//! Converting the basic shapes of an SVG document into paths.
//!
//! Reading the document is left to the caller, which provides the attributes of each
//! element through a lookup function. Lengths are expected to be plain numbers in user
//! units.

use crate::parser::parse_path;
use crate::tokenizer::tokenize;
use crate::ParseError;

use tracery_path::math::{point, vector, Angle, Point};
use tracery_path::Path2D;

use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// A shape element with its geometric attributes.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polyline(Vec<Point>),
    Polygon(Vec<Point>),
    Path(String),
}

impl Shape {
    /// Reads a shape from the name of its element and its attributes.
    ///
    /// Returns `Ok(None)` and logs a warning for elements that are not shapes. Missing
    /// or unreadable numeric attributes default to zero.
    pub fn from_attributes<'a, F>(tag: &str, lookup: F) -> Result<Option<Shape>, ParseError>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let number = |name: &str| -> f64 {
            let Some(value) = lookup(name) else {
                return 0.0;
            };
            match value.trim().parse::<f64>() {
                Ok(n) => n,
                Err(_) => {
                    log::warn!("Invalid {:?} attribute {:?} on <{}>.", name, value, tag);
                    0.0
                }
            }
        };

        let shape = match tag {
            "circle" => Shape::Circle {
                cx: number("cx"),
                cy: number("cy"),
                r: number("r"),
            },
            "ellipse" => Shape::Ellipse {
                cx: number("cx"),
                cy: number("cy"),
                rx: number("rx"),
                ry: number("ry"),
            },
            "rect" => {
                // A missing corner radius takes the value of the other one.
                let (rx, ry) = match (lookup("rx"), lookup("ry")) {
                    (Some(_), None) => (number("rx"), number("rx")),
                    (None, Some(_)) => (number("ry"), number("ry")),
                    _ => (number("rx"), number("ry")),
                };
                Shape::Rect {
                    x: number("x"),
                    y: number("y"),
                    width: number("width"),
                    height: number("height"),
                    rx,
                    ry,
                }
            }
            "line" => Shape::Line {
                x1: number("x1"),
                y1: number("y1"),
                x2: number("x2"),
                y2: number("y2"),
            },
            "polyline" => Shape::Polyline(points(lookup("points").unwrap_or(""))?),
            "polygon" => Shape::Polygon(points(lookup("points").unwrap_or(""))?),
            "path" => Shape::Path(lookup("d").unwrap_or("").to_string()),
            _ => {
                log::warn!("Skipping unsupported element <{}>.", tag);
                return Ok(None);
            }
        };

        Ok(Some(shape))
    }

    /// Builds the outline of the shape.
    pub fn to_path(&self) -> Result<Path2D, ParseError> {
        let mut path = Path2D::new();
        match *self {
            Shape::Circle { cx, cy, r } => {
                if r > 0.0 {
                    path.arc(point(cx, cy), r, Angle::zero(), Angle::radians(TAU), true);
                    path.close_path();
                }
            }
            Shape::Ellipse { cx, cy, rx, ry } => {
                if rx > 0.0 && ry > 0.0 {
                    path.ellipse(
                        point(cx, cy),
                        vector(rx, ry),
                        Angle::zero(),
                        Angle::zero(),
                        Angle::radians(TAU),
                        true,
                    );
                    path.close_path();
                }
            }
            Shape::Rect {
                x,
                y,
                width,
                height,
                rx,
                ry,
            } => {
                if width > 0.0 && height > 0.0 {
                    let rx = rx.clamp(0.0, width * 0.5);
                    let ry = ry.clamp(0.0, height * 0.5);
                    if rx == ry {
                        path.round_rect(x, y, width, height, rx);
                    } else {
                        elliptic_round_rect(&mut path, x, y, width, height, rx, ry);
                    }
                }
            }
            Shape::Line { x1, y1, x2, y2 } => {
                path.move_to(point(x1, y1));
                path.line_to(point(x2, y2));
            }
            Shape::Polyline(ref points) | Shape::Polygon(ref points) => {
                if let Some((first, rest)) = points.split_first() {
                    path.move_to(*first);
                    for p in rest {
                        path.line_to(*p);
                    }
                    if matches!(self, Shape::Polygon(_)) {
                        path.close_path();
                    }
                }
            }
            Shape::Path(ref d) => return parse_path(d),
        }

        Ok(path)
    }
}

// Corners with different horizontal and vertical radii. One of them is not zero.
#[allow(clippy::too_many_arguments)]
fn elliptic_round_rect(
    path: &mut Path2D,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rx: f64,
    ry: f64,
) {
    let (right, bottom) = (x + width, y + height);
    let radii = vector(rx, ry);
    let corner = |path: &mut Path2D, center: Point, start: f64| {
        path.ellipse(
            center,
            radii,
            Angle::zero(),
            Angle::radians(start),
            Angle::radians(start + FRAC_PI_2),
            true,
        );
    };

    path.move_to(point(x + rx, y));
    path.line_to(point(right - rx, y));
    corner(path, point(right - rx, y + ry), -FRAC_PI_2);
    path.line_to(point(right, bottom - ry));
    corner(path, point(right - rx, bottom - ry), 0.0);
    path.line_to(point(x + rx, bottom));
    corner(path, point(x + rx, bottom - ry), FRAC_PI_2);
    path.line_to(point(x, y + ry));
    corner(path, point(x + rx, y + ry), PI);
    path.close_path();
}

fn points(src: &str) -> Result<Vec<Point>, ParseError> {
    let numbers = tokenize(src)?;
    if numbers.len() % 2 != 0 {
        log::warn!("Ignoring the odd coordinate of a point list.");
    }

    Ok(numbers.chunks_exact(2).map(|c| point(c[0], c[1])).collect())
}

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use tracery_path::{BoundingBox, CurveKind};

#[cfg(test)]
fn shape(tag: &str, attributes: &[(&str, &str)]) -> Option<Shape> {
    let map: HashMap<String, String> = attributes
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Shape::from_attributes(tag, |name| map.get(name).map(String::as_str)).unwrap()
}

#[test]
fn circle() {
    let circle = shape("circle", &[("cx", "10"), ("cy", "20"), ("r", "5")]).unwrap();
    assert_eq!(
        circle,
        Shape::Circle {
            cx: 10.0,
            cy: 20.0,
            r: 5.0
        }
    );

    let path = circle.to_path().unwrap();
    let segments = path.subpaths()[0].segments();
    assert_eq!(segments.len(), 1);
    assert!(matches!(segments[0].kind(), CurveKind::Arc(_)));
    let bbox = path.bounding_box().unwrap();
    assert!(bbox.approx_eq_eps(&BoundingBox::new(5.0, 15.0, 10.0, 10.0), 1e-9));
}

#[test]
fn rect_corner_radii() {
    let rect = shape(
        "rect",
        &[("x", "0"), ("y", "0"), ("width", "20"), ("height", "10"), ("rx", "3")],
    )
    .unwrap();
    assert!(matches!(rect, Shape::Rect { rx, ry, .. } if rx == 3.0 && ry == 3.0));

    let plain = shape("rect", &[("width", "20"), ("height", "10")]).unwrap();
    let path = plain.to_path().unwrap();
    assert_eq!(path.subpaths()[0].segments().len(), 4);

    let elliptic = Shape::Rect {
        x: 0.0,
        y: 0.0,
        width: 20.0,
        height: 10.0,
        rx: 4.0,
        ry: 2.0,
    };
    let path = elliptic.to_path().unwrap();
    assert_eq!(path.subpaths()[0].segments().len(), 8);
    let bbox = path.bounding_box().unwrap();
    assert!(bbox.approx_eq_eps(&BoundingBox::new(0.0, 0.0, 20.0, 10.0), 1e-9));
}

#[test]
fn point_lists() {
    let polygon = shape("polygon", &[("points", "0,0 10,0 10,10")]).unwrap();
    let path = polygon.to_path().unwrap();
    assert!(path.subpaths()[0].is_closed());
    assert_eq!(path.subpaths()[0].segments().len(), 3);

    let polyline = shape("polyline", &[("points", "0,0 10,0 10,10")]).unwrap();
    let path = polyline.to_path().unwrap();
    assert!(!path.subpaths()[0].is_closed());
    assert_eq!(path.subpaths()[0].segments().len(), 2);
}

#[test]
fn unsupported_elements() {
    assert_eq!(shape("text", &[("x", "1")]), None);
    assert_eq!(
        shape("line", &[("x1", "1"), ("y2", "oops")]),
        Some(Shape::Line {
            x1: 1.0,
            y1: 0.0,
            x2: 0.0,
            y2: 0.0
        })
    );
}

#[test]
fn path_element() {
    let path = shape("path", &[("d", "M0 0 L10 0 L10 10 Z")])
        .unwrap()
        .to_path()
        .unwrap();
    assert_eq!(path.bounding_box(), Some(BoundingBox::new(0.0, 0.0, 10.0, 10.0)));
}

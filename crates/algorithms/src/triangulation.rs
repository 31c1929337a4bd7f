//! Flattening paths for polygon triangulators.
//!
//! The triangulation itself is delegated to an implementation of the [`Triangulator`]
//! trait, which receives the flat coordinate list and hole offsets used by ear-clipping
//! libraries. The `earcut` feature provides one backed by the `earcutr` crate.
//!
//! The first non-degenerate sub-path of the path is the outer ring, every following
//! sub-path is a hole.

use crate::math::{point, Point};
use crate::path::Path2D;
use crate::path::same_point;

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum TriangulationError {
    #[error("Triangulation failed: {0}")]
    Failed(String),
    #[error("The triangulator returned invalid triangle indices")]
    InvalidIndices,
}

/// A polygon triangulation strategy.
pub trait Triangulator {
    /// Triangulates a polygon given as interleaved `x, y` coordinates.
    ///
    /// `holes` holds the index of the first vertex of each hole. Returns three vertex
    /// indices per triangle.
    fn triangulate(
        &mut self,
        coords: &[f64],
        holes: &[usize],
    ) -> Result<Vec<usize>, TriangulationError>;
}

/// A path flattened into rings of vertices.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FlattenedShape {
    /// Interleaved `x, y` coordinates of all rings.
    pub coords: Vec<f64>,
    /// Index of the first vertex of each hole.
    pub holes: Vec<usize>,
}

impl FlattenedShape {
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.coords.len() / 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Vertices and triangle indices.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Mesh {
    pub vertices: Vec<Point>,
    pub indices: Vec<usize>,
}

impl Mesh {
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(move |t| [self.vertices[t[0]], self.vertices[t[1]], self.vertices[t[2]]])
    }

    /// Sum of the unsigned areas of the triangles.
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(c - a).abs() * 0.5)
            .sum()
    }
}

/// Approximates each sub-path of a path with a ring of vertices.
///
/// Repeated vertices and the closing vertex of each ring are removed. Rings with less
/// than three vertices are skipped.
pub fn flatten_for_triangulation(path: &Path2D, divisions: usize) -> FlattenedShape {
    let mut shape = FlattenedShape::default();
    for mut ring in path.flattened(divisions) {
        ring.dedup_by(|a, b| same_point(*a, *b));
        while ring.len() > 1 && same_point(ring[0], ring[ring.len() - 1]) {
            ring.pop();
        }

        if ring.len() < 3 {
            log::debug!("Skipping a ring of {} vertices.", ring.len());
            continue;
        }

        if !shape.is_empty() {
            shape.holes.push(shape.num_vertices());
        }
        for p in ring {
            shape.coords.push(p.x);
            shape.coords.push(p.y);
        }
    }

    shape
}

/// Flattens a path and triangulates it with the provided triangulator.
///
/// The returned indices are checked: their count must be a multiple of three and they
/// must refer to existing vertices.
pub fn triangulate(
    path: &Path2D,
    triangulator: &mut dyn Triangulator,
    divisions: usize,
) -> Result<Mesh, TriangulationError> {
    let shape = flatten_for_triangulation(path, divisions);
    if shape.is_empty() {
        return Ok(Mesh::default());
    }

    let indices = triangulator.triangulate(&shape.coords, &shape.holes)?;
    let num_vertices = shape.num_vertices();
    if indices.len() % 3 != 0 || indices.iter().any(|&i| i >= num_vertices) {
        return Err(TriangulationError::InvalidIndices);
    }

    let vertices = shape
        .coords
        .chunks_exact(2)
        .map(|c| point(c[0], c[1]))
        .collect();

    Ok(Mesh { vertices, indices })
}

/// Ear-clipping triangulation from the `earcutr` crate.
#[cfg(feature = "earcut")]
#[derive(Copy, Clone, Debug, Default)]
pub struct EarcutTriangulator;

#[cfg(feature = "earcut")]
impl Triangulator for EarcutTriangulator {
    fn triangulate(
        &mut self,
        coords: &[f64],
        holes: &[usize],
    ) -> Result<Vec<usize>, TriangulationError> {
        earcutr::earcut(coords, holes, 2).map_err(|_| {
            TriangulationError::Failed("earcut could not triangulate the polygon".to_string())
        })
    }
}

// Triangle fan over the outer ring.
#[cfg(test)]
struct Fan;

#[cfg(test)]
impl Triangulator for Fan {
    fn triangulate(
        &mut self,
        coords: &[f64],
        holes: &[usize],
    ) -> Result<Vec<usize>, TriangulationError> {
        let n = holes.first().copied().unwrap_or(coords.len() / 2);
        Ok((1..n - 1).flat_map(|i| [0, i, i + 1]).collect())
    }
}

#[cfg(test)]
struct Broken(Result<Vec<usize>, TriangulationError>);

#[cfg(test)]
impl Triangulator for Broken {
    fn triangulate(&mut self, _: &[f64], _: &[usize]) -> Result<Vec<usize>, TriangulationError> {
        self.0.clone()
    }
}

#[cfg(test)]
fn square_with_hole() -> Path2D {
    let mut path = Path2D::new();
    path.rect(0.0, 0.0, 10.0, 10.0);
    path.rect(2.0, 2.0, 6.0, 6.0);
    path
}

#[test]
fn flattening() {
    let shape = flatten_for_triangulation(&square_with_hole(), 8);
    assert_eq!(shape.num_vertices(), 8);
    assert_eq!(shape.holes, vec![4]);
    assert_eq!(&shape.coords[..8], &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);

    let mut degenerate = Path2D::new();
    degenerate.move_to(point(0.0, 0.0));
    degenerate.line_to(point(5.0, 5.0));
    assert!(flatten_for_triangulation(&degenerate, 8).is_empty());
}

#[test]
fn nearly_repeated_vertices_are_merged() {
    let mut path = Path2D::new();
    path.move_to(point(0.0, 0.0));
    path.line_to(point(10.0, 0.0));
    path.line_to(point(10.0, 1e-12));
    path.line_to(point(10.0, 10.0));
    path.line_to(point(0.0, 10.0));
    path.line_to(point(1e-12, 0.0));
    path.close_path();

    let shape = flatten_for_triangulation(&path, 8);
    assert_eq!(shape.num_vertices(), 4);
    assert_eq!(shape.coords[..4], [0.0, 0.0, 10.0, 0.0]);
}

#[test]
fn fan_triangulation() {
    let mut path = Path2D::new();
    path.rect(0.0, 0.0, 10.0, 10.0);
    let mesh = triangulate(&path, &mut Fan, 8).unwrap();
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.num_triangles(), 2);
    assert!((mesh.area() - 100.0).abs() < 1e-9);

    assert_eq!(triangulate(&Path2D::new(), &mut Fan, 8), Ok(Mesh::default()));
}

#[test]
fn triangulator_errors() {
    let path = square_with_hole();
    assert_eq!(
        triangulate(&path, &mut Broken(Ok(vec![0, 1])), 8),
        Err(TriangulationError::InvalidIndices)
    );
    assert_eq!(
        triangulate(&path, &mut Broken(Ok(vec![0, 1, 8])), 8),
        Err(TriangulationError::InvalidIndices)
    );
    let failure = TriangulationError::Failed("nope".to_string());
    assert_eq!(
        triangulate(&path, &mut Broken(Err(failure.clone())), 8),
        Err(failure)
    );
}

#[cfg(feature = "earcut")]
#[test]
fn earcut_square_with_hole() {
    let mesh = triangulate(&square_with_hole(), &mut EarcutTriangulator, 8).unwrap();
    assert_eq!(mesh.vertices.len(), 8);
    assert!((mesh.area() - 64.0).abs() < 1e-9);
}

#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! Algorithms on top of tracery paths.
//!
//! This crate is reexported in [tracery](https://docs.rs/tracery/).
//!
//! - [`winding`](winding/index.html): orientation of closed sub-paths.
//! - [`bold`](bold/index.html): outline offset, displacing every curve along its normal
//!   and mitering the joints.
//! - [`triangulation`](triangulation/index.html): flattening paths into the polygon
//!   format expected by ear-clipping triangulators, behind the `Triangulator` trait.

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub use tracery_path as path;

pub mod bold;
pub mod triangulation;
pub mod winding;

pub use crate::path::geom;
pub use crate::path::math;

#[doc(inline)]
pub use crate::bold::{bold, line_intersection, BoldOptions};
#[cfg(feature = "earcut")]
#[doc(inline)]
pub use crate::triangulation::EarcutTriangulator;
#[doc(inline)]
pub use crate::triangulation::{
    flatten_for_triangulation, triangulate, FlattenedShape, Mesh, TriangulationError,
    Triangulator,
};
#[doc(inline)]
pub use crate::winding::{signed_area, winding, Windings};

#![deny(bare_trait_objects)]

//! Vector path geometry in Rust.
//!
//! # Crates
//!
//! This meta-crate (`tracery`) reexports the following sub-crates for convenience:
//!
//! * **tracery_geom** - Lines, bézier curves, elliptic arcs, splines and polygons, with
//!   arc-length parametrization.
//! * **tracery_path** - Curves, sub-paths and the pen-based path builder.
//! * **tracery_svg** - Reading and writing SVG path data, SVG shape elements.
//! * **tracery_algorithms** - Winding, outline offset and triangulation.
//!
//! Each `tracery_<name>` crate is reexported as a `<name>` module in `tracery`.
//!
//! # Feature flags
//!
//! Serialization using serde can be enabled on each crate using the `serialization`
//! feature flag (disabled by default). The `earcut` feature enables the ear-clipping
//! triangulator of `tracery_algorithms`.
//!
//! # Examples
//!
//! ```
//! use tracery::algorithms::{bold, BoldOptions};
//! use tracery::path::ParametricCurve;
//! use tracery::svg::{parse_path, path_to_string};
//!
//! let path = parse_path("M0 0 L10 0 L10 10 L0 10 Z").unwrap();
//! assert!((path.subpaths()[0].length() - 40.0).abs() < 1e-9);
//!
//! let outline = bold(&path, 1.0, &BoldOptions::DEFAULT);
//! assert_eq!(path_to_string(&outline), "M-1 -1 L11 -1 L11 11 L-1 11 Z");
//! ```

pub extern crate tracery_algorithms;
pub extern crate tracery_path;
pub extern crate tracery_svg;

pub use tracery_algorithms as algorithms;
pub use tracery_path as path;
pub use tracery_svg as svg;
pub use path::geom;

pub use path::math;

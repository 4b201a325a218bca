//! Voxel-graph skeletonization engine for pore-network extraction from 3D
//! digital-rock images.
//!
//! A binary or three-valued voxel cube ([`image::Image`]) is labeled into
//! contour and interior voxels ([`contour::ContourCalculator`]), then a
//! multi-source shortest-path expansion ([`dijkstra::Dijkstra`]) grows
//! outward from the contour using a squared-Euclidean path metric
//! ([`path_cost`]) backed by a mutable-priority heap ([`heap::BinaryHeap`]),
//! producing per-voxel distance annotations from which the medial axis
//! (skeleton) is thinned out. [`network::NetworkBuilder`] turns the
//! skeleton into a node/link graph, and [`morphology`] computes
//! surface-to-volume and box-counting descriptors directly from the cube,
//! independent of that pipeline.
//!
//! This crate performs no file I/O, CLI parsing, or configuration loading:
//! it is a library surface only. Callers supply a packed voxel buffer plus
//! dimensions, drive the pipeline, and serialize the results (optionally
//! via the `serde` feature) however their application needs.
//!
//! # Example
//!
//! ```
//! use digital_rock_skeleton::contour::ContourCalculator;
//! use digital_rock_skeleton::dijkstra::Dijkstra;
//! use digital_rock_skeleton::image::Image;
//! use digital_rock_skeleton::neighbours::SixNeighbourCalculator;
//!
//! let cube = Image::new(vec![1; 5 * 5 * 5], 5, 5, 5).unwrap();
//! let contours = ContourCalculator::new(&cube, SixNeighbourCalculator).compute_contours();
//! let dijkstra = Dijkstra::new(&cube, SixNeighbourCalculator);
//! let distances = dijkstra.run(&contours).unwrap();
//! let skeleton = dijkstra.extract_centerline(&distances);
//! assert!(!skeleton.is_empty());
//! ```

pub mod annotated_image;
pub mod contour;
pub mod dijkstra;
pub mod error;
pub mod heap;
pub mod image;
pub mod morphology;
pub mod neighbours;
pub mod network;
pub mod path_cost;
pub mod point;

pub use error::{Error, Result};
pub use image::Image;
pub use point::{Point2, Point3, PointBuilder};

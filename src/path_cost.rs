//! Squared-Euclidean path-cost algebra.
//!
//! `Annotation` records the per-axis accumulated displacement along a path
//! plus its resulting squared distance, together with a reference back to
//! the contour voxel (and pixel) the path originated from.
//! `QuadraticPathCalculator` is the only thing that may construct a new
//! `Annotation` from an edge traversal; this keeps `distance == sum(axis^2)`
//! true by construction rather than by convention.
//!
//! This is not a simple sum of edge lengths: per-axis displacement
//! accumulates first, and only the resulting Manhattan-per-axis vector is
//! squared, yielding the squared Euclidean distance along a straight line
//! between the path's two endpoints, not the squared length of the path
//! itself.

use error_stack::report;

use crate::error::{Error, Result};
use crate::point::{Coordinates, Point2, Point3};

macro_rules! path_cost_impl {
    ($annotation:ident, $calc:ident, $point:ty, $dim:expr) => {
        #[doc = concat!(
            "A ", stringify!($dim), "-dimensional path annotation: accumulated ",
            "per-axis displacement, the resulting squared distance, and a ",
            "reference back to the originating contour voxel."
        )]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
        pub struct $annotation {
            axis: [i64; $dim],
            distance: i64,
            contour_label: u32,
            pixel_label: u32,
        }

        impl $annotation {
            /// A zero-displacement annotation seeded at a contour voxel.
            #[must_use]
            pub fn seed(contour_label: u32, pixel_label: u32) -> Self {
                Self {
                    axis: [0; $dim],
                    distance: 0,
                    contour_label,
                    pixel_label,
                }
            }

            /// Reads accumulated displacement along `axis`.
            ///
            /// # Errors
            ///
            /// Returns [`Error::Logic`] if `axis` is out of range. This is
            /// a defensive check; a correct caller never triggers it.
            pub fn axis(&self, axis: usize) -> Result<i64> {
                self.axis.get(axis).copied().ok_or_else(|| {
                    report!(Error::Logic(format!(
                        "axis index {axis} out of range for a {}-dimensional annotation",
                        $dim
                    )))
                })
            }

            /// The squared distance, always equal to `sum(axis_i^2)`.
            #[must_use]
            pub fn distance(&self) -> i64 {
                self.distance
            }

            /// The contour this annotation's path originated from.
            #[must_use]
            pub fn contour_label(&self) -> u32 {
                self.contour_label
            }

            /// The originating contour voxel's pixel label.
            #[must_use]
            pub fn pixel_label(&self) -> u32 {
                self.pixel_label
            }
        }

        #[doc = concat!(
            "Computes ", stringify!($dim), "-dimensional quadratic path costs: see module docs."
        )]
        #[derive(Copy, Clone, Debug, Default)]
        pub struct $calc;

        impl $calc {
            /// Computes the annotation at `q` reached by extending the path
            /// ending at `p` (with annotation `alpha_p`) across the edge
            /// `p -> q`.
            #[must_use]
            pub fn update_point_path_cost(&self, p: $point, alpha_p: &$annotation, q: $point) -> $annotation {
                let mut axis = [0i64; $dim];
                let mut distance: i64 = 0;
                for i in 0..$dim {
                    let delta = (q.coord(i) - p.coord(i)).abs() + alpha_p.axis[i];
                    axis[i] = delta;
                    distance += delta * delta;
                }
                $annotation {
                    axis,
                    distance,
                    contour_label: alpha_p.contour_label,
                    pixel_label: alpha_p.pixel_label,
                }
            }

            /// Computes only the resulting squared distance at `q`, without
            /// allocating an `Annotation`.
            #[must_use]
            pub fn get_concatenated_path_cost(&self, p: $point, alpha_p: &$annotation, q: $point) -> i64 {
                let mut distance: i64 = 0;
                for i in 0..$dim {
                    let delta = (q.coord(i) - p.coord(i)).abs() + alpha_p.axis[i];
                    distance += delta * delta;
                }
                distance
            }
        }
    };
}

path_cost_impl!(Annotation2, QuadraticPathCalculator2, Point2, 2);
path_cost_impl!(Annotation3, QuadraticPathCalculator3, Point3, 3);

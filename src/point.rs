//! Fixed-dimension integer coordinates.
//!
//! `Point<D>` is specialized at `D = 2` and `D = 3` ([`Point2`], [`Point3`])
//! rather than expressed as a single generic over a const dimension, per the
//! "specialize for speed, keep the builder idiom" guidance: neighbour
//! calculators and the heap stay polymorphic across dimension through the
//! [`Coordinates`] trait rather than through a shared concrete type.

use std::hash::Hash;

/// Capability set shared by every point type: componentwise equality,
/// a deterministic hash, a strict total (lexicographic) order, and indexed
/// coordinate reads. Mirrors the "neighbour calculator is a callable,
/// key type provides equality/ordering/hashing" capability-trait split
/// described for the heap's key type.
pub trait Coordinates: Copy + Clone + Eq + Ord + Hash + std::fmt::Debug {
    /// Number of coordinates this point type carries.
    const DIM: usize;

    /// Reads coordinate `axis`.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= Self::DIM`, the same way slice indexing panics;
    /// this is a programmer error, not a recoverable one.
    fn coord(&self, axis: usize) -> i64;
}

macro_rules! point_type {
    ($name:ident, $dim:expr, [$($field:ident),+], [$($idx:expr),+]) => {
        #[doc = concat!("A point in ", stringify!($dim), "-dimensional integer space.")]
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            $(pub(crate) $field: i64,)+
        }

        impl $name {
            #[doc = concat!("Constructs a new ", stringify!($name), " from its coordinates.")]
            #[must_use]
            pub fn new($($field: i64),+) -> Self {
                Self { $($field),+ }
            }
        }

        impl Coordinates for $name {
            const DIM: usize = $dim;

            fn coord(&self, axis: usize) -> i64 {
                match axis {
                    $($idx => self.$field,)+
                    _ => panic!("axis {axis} out of range for a {}-dimensional point", $dim),
                }
            }
        }
    };
}

point_type!(Point2, 2, [x, y], [0, 1]);
point_type!(Point3, 3, [x, y, z], [0, 1, 2]);

/// Decouples point construction from the concrete point representation.
///
/// Alternative `Point` storages (packed 32-bit, wide 64-bit) could implement
/// the same builder methods without callers needing to know which
/// representation backs a given pipeline.
pub struct PointBuilder;

impl PointBuilder {
    /// Builds a 2-dimensional point from its arity-2 coordinate list.
    #[must_use]
    pub fn get2(c0: i64, c1: i64) -> Point2 {
        Point2::new(c0, c1)
    }

    /// Builds a 3-dimensional point from its arity-3 coordinate list.
    #[must_use]
    pub fn get3(c0: i64, c1: i64, c2: i64) -> Point3 {
        Point3::new(c0, c1, c2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_componentwise() {
        assert_eq!(Point3::new(1, 2, 3), Point3::new(1, 2, 3));
        assert_ne!(Point3::new(1, 2, 3), Point3::new(1, 2, 4));
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Point2::new(1, 5) < Point2::new(2, 0));
        assert!(Point2::new(1, 0) < Point2::new(1, 1));
    }

    #[test]
    fn coord_reads_each_axis() {
        let p = Point3::new(7, -3, 11);
        assert_eq!(p.coord(0), 7);
        assert_eq!(p.coord(1), -3);
        assert_eq!(p.coord(2), 11);
    }

    #[test]
    #[should_panic]
    fn coord_out_of_range_panics() {
        let p = Point2::new(0, 0);
        let _ = p.coord(2);
    }

    #[test]
    fn builder_constructs_points() {
        assert_eq!(PointBuilder::get2(1, 2), Point2::new(1, 2));
        assert_eq!(PointBuilder::get3(1, 2, 3), Point3::new(1, 2, 3));
    }
}

//! Sparse mapping from points to application-defined annotation records.
//!
//! Backed by [`indexmap::IndexMap`], which gives stable insertion-ordered
//! iteration without needing a separate ordering structure alongside a
//! hash map.

use std::fmt::Debug;
use std::hash::Hash;

use error_stack::report;
use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A sparse `P -> A` mapping that only contains annotated points.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "P: serde::Serialize + Eq + Hash, A: serde::Serialize",
        deserialize = "P: serde::Deserialize<'de> + Eq + Hash, A: serde::Deserialize<'de>"
    ))
)]
pub struct AnnotatedImage<P, A> {
    annotations: IndexMap<P, A>,
}

impl<P, A> Default for AnnotatedImage<P, A> {
    fn default() -> Self {
        Self {
            annotations: IndexMap::new(),
        }
    }
}

impl<P, A> AnnotatedImage<P, A>
where
    P: Eq + Hash + Copy + Debug,
{
    /// Creates an empty annotated image.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the annotation at `p`.
    pub fn write(&mut self, p: P, annotation: A) {
        self.annotations.insert(p, annotation);
    }

    /// Reads the annotation at `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if `p` has not been
    /// annotated.
    pub fn read(&self, p: P) -> Result<&A> {
        self.annotations
            .get(&p)
            .ok_or_else(|| report!(Error::PreconditionViolation(format!("no annotation at {p:?}"))))
    }

    /// Mutably reads the annotation at `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PreconditionViolation`] if `p` has not been
    /// annotated.
    pub fn read_mut(&mut self, p: P) -> Result<&mut A> {
        self.annotations
            .get_mut(&p)
            .ok_or_else(|| report!(Error::PreconditionViolation(format!("no annotation at {p:?}"))))
    }

    /// Whether `p` has been annotated.
    #[must_use]
    pub fn contains(&self, p: P) -> bool {
        self.annotations.contains_key(&p)
    }

    /// Number of annotated points.
    #[must_use]
    pub fn size(&self) -> usize {
        self.annotations.len()
    }

    /// Whether this image has no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Iterates `(point, annotation)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, P, A> {
        self.annotations.iter()
    }
}

impl<'a, P, A> IntoIterator for &'a AnnotatedImage<P, A>
where
    P: Eq + Hash + Copy + Debug,
{
    type Item = (&'a P, &'a A);
    type IntoIter = indexmap::map::Iter<'a, P, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point3;

    #[test]
    fn write_then_read_roundtrips() {
        let mut image: AnnotatedImage<Point3, i32> = AnnotatedImage::new();
        image.write(Point3::new(0, 0, 0), 42);
        assert_eq!(*image.read(Point3::new(0, 0, 0)).unwrap(), 42);
    }

    #[test]
    fn write_overwrites_existing_key() {
        let mut image: AnnotatedImage<Point3, i32> = AnnotatedImage::new();
        let p = Point3::new(1, 1, 1);
        image.write(p, 1);
        image.write(p, 2);
        assert_eq!(*image.read(p).unwrap(), 2);
        assert_eq!(image.size(), 1);
    }

    #[test]
    fn read_of_absent_point_fails() {
        let image: AnnotatedImage<Point3, i32> = AnnotatedImage::new();
        let err = image.read(Point3::new(0, 0, 0)).unwrap_err();
        assert!(matches!(
            err.current_context(),
            Error::PreconditionViolation(_)
        ));
    }

    #[test]
    fn size_and_contains_track_distinct_keys() {
        let mut image: AnnotatedImage<Point3, i32> = AnnotatedImage::new();
        image.write(Point3::new(0, 0, 0), 1);
        image.write(Point3::new(1, 0, 0), 2);
        assert_eq!(image.size(), 2);
        assert!(image.contains(Point3::new(1, 0, 0)));
        assert!(!image.contains(Point3::new(2, 0, 0)));
    }

    #[test]
    fn iteration_is_insertion_ordered() {
        let mut image: AnnotatedImage<Point3, i32> = AnnotatedImage::new();
        let points = [
            Point3::new(2, 0, 0),
            Point3::new(0, 0, 0),
            Point3::new(1, 0, 0),
        ];
        for (i, p) in points.iter().enumerate() {
            image.write(*p, i as i32);
        }
        let order: Vec<Point3> = image.iter().map(|(p, _)| *p).collect();
        assert_eq!(order, points);
    }
}

//! Contour (object-boundary) labeling.
//!
//! A point is contour when it is an object voxel with at least one
//! neighbour that is either out-of-bounds or not an object voxel. Every
//! object voxel gets a monotonically increasing `pixel_label` in linear
//! discovery order; contour voxels additionally get a `contour_label`
//! identifying which connected group of contour voxels (flood-filled
//! breadth-first over the contour set alone, using the same neighbour
//! calculator) they belong to.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::annotated_image::AnnotatedImage;
use crate::image::Image;
use crate::neighbours::NeighbourCalculator;
use crate::point::Point3;

/// The annotation [`ContourCalculator`] writes for each object voxel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContourAnnotation {
    /// Monotonically increasing label assigned in linear scan order to
    /// every object voxel, contour or not.
    pub pixel_label: u32,
    /// Which connected contour component this voxel belongs to, or `None`
    /// for a non-contour object voxel.
    pub contour_label: Option<u32>,
}

impl ContourAnnotation {
    /// Whether this voxel was classified as contour.
    #[must_use]
    pub fn is_contour(&self) -> bool {
        self.contour_label.is_some()
    }
}

/// Labels every object voxel of an [`Image`] with a pixel label, and every
/// contour voxel additionally with the label of its connected contour.
pub struct ContourCalculator<'img, NC> {
    image: &'img Image,
    neighbours: NC,
}

impl<'img, NC> ContourCalculator<'img, NC>
where
    NC: NeighbourCalculator<Point3>,
{
    /// Builds a calculator over `image` using `neighbours` to enumerate
    /// adjacency. Pass an [`crate::neighbours::InBoundsNeighbourCalculator`]
    /// to make out-of-bounds points never count against a voxel (only
    /// genuinely missing in-bounds neighbours do).
    pub fn new(image: &'img Image, neighbours: NC) -> Self {
        Self { image, neighbours }
    }

    /// Runs the contour pass, producing a fresh annotated image.
    ///
    /// Deterministic given the image's fixed linear iteration order and
    /// the neighbour calculator's deterministic enumeration order.
    #[must_use]
    pub fn compute_contours(&self) -> AnnotatedImage<Point3, ContourAnnotation> {
        let mut pending: Vec<(Point3, u32, bool)> = Vec::new();
        let mut contour_order: Vec<Point3> = Vec::new();

        let mut pixel_label = 0u32;
        for p in self.image.iter() {
            if !self.image.is_object_point(p) {
                continue;
            }
            pixel_label += 1;
            let is_contour = self
                .neighbours
                .neighbours(p)
                .into_iter()
                .any(|n| !self.image.is_object_point(n));
            if is_contour {
                contour_order.push(p);
            }
            pending.push((p, pixel_label, is_contour));
        }

        log::debug!(
            "contour pass over {} object voxels: {} contour voxels",
            pending.len(),
            contour_order.len()
        );

        let contour_label_of = self.flood_contour_labels(&contour_order);

        let mut annotated = AnnotatedImage::new();
        for (p, pixel_label, is_contour) in pending {
            let contour_label = if is_contour {
                contour_label_of.get(&p).copied()
            } else {
                None
            };
            annotated.write(
                p,
                ContourAnnotation {
                    pixel_label,
                    contour_label,
                },
            );
        }
        annotated
    }

    fn flood_contour_labels(&self, contour_order: &[Point3]) -> HashMap<Point3, u32> {
        let contour_set: HashSet<Point3> = contour_order.iter().copied().collect();
        let mut labels = HashMap::new();
        let mut next_label = 0u32;

        for &start in contour_order {
            if labels.contains_key(&start) {
                continue;
            }
            next_label += 1;
            let mut queue = VecDeque::new();
            queue.push_back(start);
            labels.insert(start, next_label);
            while let Some(p) = queue.pop_front() {
                for n in self.neighbours.neighbours(p) {
                    if contour_set.contains(&n) && !labels.contains_key(&n) {
                        labels.insert(n, next_label);
                        queue.push_back(n);
                    }
                }
            }
        }
        labels
    }
}

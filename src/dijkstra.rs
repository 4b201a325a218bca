//! Multi-source shortest-path expansion and medial-axis (centerline)
//! extraction.
//!
//! Every contour voxel is a source with distance zero; the expansion
//! relaxes outward through object voxels using [`QuadraticPathCalculator3`]
//! for the edge cost and [`BinaryHeap`] for the frontier, until every
//! object voxel reachable from a contour carries the squared distance to
//! its nearest contour along the axis-accumulated metric. A voxel is then
//! medial when no object neighbour's distance exceeds its own.

use std::hash::{Hash, Hasher};

use fixedbitset::FixedBitSet;

use crate::annotated_image::AnnotatedImage;
use crate::contour::ContourAnnotation;
use crate::error::Result;
use crate::heap::{BinaryHeap, Locator};
use crate::image::Image;
use crate::neighbours::NeighbourCalculator;
use crate::path_cost::{Annotation3, QuadraticPathCalculator3};
use crate::point::Point3;

/// A frontier entry: identity is the voxel (for the heap's hash index),
/// priority is the tentative squared distance (for heap ordering). `Eq`
/// and `Hash` ignore `distance`: the heap looks an entry up by voxel
/// identity regardless of which distance it currently holds.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    point: Point3,
    distance: i64,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.point == other.point
    }
}

impl Eq for Frontier {}

impl Hash for Frontier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.point.hash(state);
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance.cmp(&other.distance)
    }
}

/// Dense per-voxel annotations produced by a Dijkstra pass.
pub type Distances = AnnotatedImage<Point3, Annotation3>;

/// Runs the multi-source expansion and derives the medial axis, for a
/// fixed image and connectivity.
pub struct Dijkstra<'img, NC> {
    image: &'img Image,
    neighbours: NC,
    path_cost: QuadraticPathCalculator3,
}

impl<'img, NC> Dijkstra<'img, NC>
where
    NC: NeighbourCalculator<Point3>,
{
    /// Builds a Dijkstra pass over `image` using `neighbours` for
    /// adjacency (the same calculator the contour pass used is the
    /// natural choice, but is not required to be).
    pub fn new(image: &'img Image, neighbours: NC) -> Self {
        Self {
            image,
            neighbours,
            path_cost: QuadraticPathCalculator3,
        }
    }

    /// Seeds the heap with every contour voxel at distance zero, then
    /// relaxes outward through object voxels until the frontier is empty.
    ///
    /// If the image has no object voxels (or no contour voxels), the
    /// result is empty; this is not an error.
    ///
    /// # Errors
    ///
    /// Propagates any [`crate::error::Error`] surfaced by the heap or the
    /// annotated image; under correct use (every precondition this
    /// algorithm itself guarantees) none should ever occur.
    pub fn run(&self, contours: &AnnotatedImage<Point3, ContourAnnotation>) -> Result<Distances> {
        let mut distances: Distances = AnnotatedImage::new();
        let mut frozen = FixedBitSet::with_capacity(self.image.len().max(1));
        let mut heap: BinaryHeap<Frontier> = BinaryHeap::new();

        let mut seeded = 0usize;
        for (&p, contour) in contours {
            let Some(contour_label) = contour.contour_label else {
                continue;
            };
            let seed = Annotation3::seed(contour_label, contour.pixel_label);
            distances.write(p, seed);
            heap.insert(Frontier {
                point: p,
                distance: 0,
            })?;
            seeded += 1;
        }
        log::debug!("dijkstra: seeded {seeded} contour voxels");

        let mut frozen_count = 0usize;
        while !heap.is_empty() {
            let Frontier { point: p, .. } = heap.remove()?;
            let p_idx = self
                .image
                .linear_index(p)
                .expect("heap only ever holds in-image voxels");
            if frozen.contains(p_idx) {
                continue;
            }
            frozen.insert(p_idx);
            frozen_count += 1;

            let alpha_p = *distances.read(p)?;

            for q in self.neighbours.neighbours(p) {
                if !self.image.is_object_point(q) {
                    continue;
                }
                let q_idx = self
                    .image
                    .linear_index(q)
                    .expect("is_object_point(q) implies q is in-image");
                if frozen.contains(q_idx) {
                    continue;
                }

                let candidate = self.path_cost.update_point_path_cost(p, &alpha_p, q);

                if distances.contains(q) {
                    let current = *distances.read(q)?;
                    if candidate.distance() < current.distance() {
                        distances.write(q, candidate);
                        heap.increase_priority(
                            Locator::Key(&Frontier {
                                point: q,
                                distance: current.distance(),
                            }),
                            Frontier {
                                point: q,
                                distance: candidate.distance(),
                            },
                        )?;
                    }
                } else {
                    distances.write(q, candidate);
                    heap.insert(Frontier {
                        point: q,
                        distance: candidate.distance(),
                    })?;
                }
            }
        }
        log::debug!("dijkstra: froze {frozen_count} voxels, {} annotated", distances.size());

        Ok(distances)
    }

    /// Extracts the medial axis: every object voxel whose distance is a
    /// local maximum among its object neighbours' distances.
    ///
    /// An object neighbour with no annotation (unreachable from any
    /// contour) does not disqualify a voxel from being medial; an
    /// out-of-bounds or non-object neighbour never disqualifies it either.
    #[must_use]
    pub fn extract_centerline(&self, distances: &Distances) -> Vec<Point3> {
        let mut skeleton = Vec::new();
        for (&p, annotation) in distances {
            let is_medial = self.neighbours.neighbours(p).into_iter().all(|q| {
                if !self.image.is_object_point(q) {
                    return true;
                }
                distances
                    .read(q)
                    .map(|q_annotation| annotation.distance() >= q_annotation.distance())
                    .unwrap_or(true)
            });
            if is_medial {
                skeleton.push(p);
            }
        }
        log::debug!("centerline: {} medial voxels", skeleton.len());
        skeleton
    }
}

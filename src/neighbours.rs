//! Neighbourhood enumeration under alternative connectivity.
//!
//! A neighbour calculator is a capability, not a concrete type: anything
//! implementing [`NeighbourCalculator<P>`] can stand in wherever the
//! contour/Dijkstra passes need to enumerate a point's neighbours. No bounds
//! checking is performed here: the returned points may lie outside any
//! particular image, and callers are responsible for checking.

use crate::image::Image;
use crate::point::{Point2, Point3};

/// Enumerates the neighbours of a point under some fixed connectivity.
pub trait NeighbourCalculator<P> {
    /// Returns every neighbour of `p`, each exactly once. Order is
    /// implementation-defined but deterministic across calls.
    fn neighbours(&self, p: P) -> Vec<P>;
}

/// Wraps another calculator, filtering out any neighbour that falls
/// outside `image`'s bounds.
///
/// Use this when out-of-bounds should *not* automatically count as "missing
/// neighbour" for contour purposes: a solid cube wrapped with this
/// calculator has zero contour voxels, because none of its in-bounds
/// neighbours are ever missing, whereas the raw (unwrapped) calculator
/// treats the image boundary itself as a missing neighbour.
#[derive(Copy, Clone, Debug)]
pub struct InBoundsNeighbourCalculator<'img, NC> {
    image: &'img Image,
    inner: NC,
}

impl<'img, NC> InBoundsNeighbourCalculator<'img, NC> {
    /// Wraps `inner`, restricting its output to points inside `image`.
    pub fn new(image: &'img Image, inner: NC) -> Self {
        Self { image, inner }
    }
}

impl<'img, NC> NeighbourCalculator<Point3> for InBoundsNeighbourCalculator<'img, NC>
where
    NC: NeighbourCalculator<Point3>,
{
    fn neighbours(&self, p: Point3) -> Vec<Point3> {
        self.inner
            .neighbours(p)
            .into_iter()
            .filter(|&n| self.image.label_at(n).is_some())
            .collect()
    }
}

/// Face-adjacent (6-connected) neighbourhood of a 3D point: every offset
/// with L1 norm exactly 1.
#[derive(Copy, Clone, Debug, Default)]
pub struct SixNeighbourCalculator;

impl NeighbourCalculator<Point3> for SixNeighbourCalculator {
    fn neighbours(&self, p: Point3) -> Vec<Point3> {
        const OFFSETS: [(i64, i64, i64); 6] = [
            (-1, 0, 0),
            (1, 0, 0),
            (0, -1, 0),
            (0, 1, 0),
            (0, 0, -1),
            (0, 0, 1),
        ];
        OFFSETS
            .iter()
            .map(|&(dx, dy, dz)| Point3::new(p.x + dx, p.y + dy, p.z + dz))
            .collect()
    }
}

/// Edge-adjacent (4-connected) neighbourhood of a 2D point: the 2D analog
/// of [`SixNeighbourCalculator`].
#[derive(Copy, Clone, Debug, Default)]
pub struct FourNeighbourCalculator;

impl NeighbourCalculator<Point2> for FourNeighbourCalculator {
    fn neighbours(&self, p: Point2) -> Vec<Point2> {
        const OFFSETS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        OFFSETS
            .iter()
            .map(|&(dx, dy)| Point2::new(p.x + dx, p.y + dy))
            .collect()
    }
}

/// Full Moore (26-connected) neighbourhood of a 3D point: every nonzero
/// offset in `{-1, 0, 1}^3`.
#[derive(Copy, Clone, Debug, Default)]
pub struct TwentySixNeighbourCalculator;

impl NeighbourCalculator<Point3> for TwentySixNeighbourCalculator {
    fn neighbours(&self, p: Point3) -> Vec<Point3> {
        let mut out = Vec::with_capacity(26);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    out.push(Point3::new(p.x + dx, p.y + dy, p.z + dz));
                }
            }
        }
        out
    }
}

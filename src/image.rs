//! Dense 3D labeled/binary voxel grid.
//!
//! A voxel is addressed by a [`Point3`] and mapped to a linear index with
//! x-fastest ordering: `idx = x + W*y + W*H*z`. Two distinguished label
//! values exist for the binary interpretation: `0` is background/pore,
//! anything nonzero is foreground/rock. The same buffer also supports the
//! three-valued 0/1/2 labeling the morphology kernels consume directly.

use crate::error::{Error, Result};
use crate::point::Point3;
use error_stack::report;

/// Background / pore label.
pub const BACKGROUND: u8 = 0;

/// A dense, read-only-after-construction 3D voxel grid.
///
/// Construction fails if the supplied buffer's length does not equal the
/// product of the declared dimension sizes.
#[derive(Clone, Debug)]
pub struct Image {
    width: usize,
    height: usize,
    depth: usize,
    voxels: Vec<u8>,
}

impl Image {
    /// Builds an image from a packed buffer and its three dimension sizes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `voxels.len() != width * height
    /// * depth`.
    pub fn new(voxels: Vec<u8>, width: usize, height: usize, depth: usize) -> Result<Self> {
        let expected = width * height * depth;
        if voxels.len() != expected {
            return Err(report!(Error::InvalidArgument(format!(
                "voxel buffer has {} elements, expected {width}*{height}*{depth} = {expected}",
                voxels.len()
            ))));
        }
        log::debug!("image constructed: {width}x{height}x{depth} ({expected} voxels)");
        Ok(Self {
            width,
            height,
            depth,
            voxels,
        })
    }

    /// Number of dimensions this image has. Always 3.
    #[must_use]
    pub fn get_number_of_dimensions(&self) -> usize {
        3
    }

    /// Size of dimension `axis` (0 = width, 1 = height, 2 = depth).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `axis >= 3`.
    pub fn get_dimension_size(&self, axis: usize) -> Result<usize> {
        match axis {
            0 => Ok(self.width),
            1 => Ok(self.height),
            2 => Ok(self.depth),
            _ => Err(report!(Error::InvalidArgument(format!(
                "axis {axis} out of range for a 3-dimensional image"
            )))),
        }
    }

    /// Total number of voxels (`width * height * depth`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    /// Whether the image has zero voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Maps `p` to its linear (x-fastest) index into this image's buffer,
    /// or `None` if `p` lies outside the image.
    #[must_use]
    pub fn linear_index(&self, p: Point3) -> Option<usize> {
        let (x, y, z) = (p.x, p.y, p.z);
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return None;
        }
        Some(x + self.width * y + self.width * self.height * z)
    }

    /// Reads the raw label at `p`, or `None` if `p` lies outside the image.
    #[must_use]
    pub fn label_at(&self, p: Point3) -> Option<u8> {
        self.linear_index(p).map(|idx| self.voxels[idx])
    }

    /// Whether `p` is an object (nonzero-label, foreground) voxel.
    ///
    /// Out-of-bounds points are treated as non-object, so consumers that
    /// want out-of-bounds to behave like "missing neighbour" (the contour
    /// rule) get that for free.
    #[must_use]
    pub fn is_object_point(&self, p: Point3) -> bool {
        self.label_at(p).is_some_and(|label| label != BACKGROUND)
    }

    /// An iterator positioned at the first point in linear order.
    #[must_use]
    pub fn cbegin(&self) -> PointIter {
        PointIter {
            width: self.width,
            height: self.height,
            depth: self.depth,
            idx: 0,
            total: self.voxels.len(),
        }
    }

    /// An iterator positioned one-past-the-last point (the sentinel).
    #[must_use]
    pub fn cend(&self) -> PointIter {
        PointIter {
            width: self.width,
            height: self.height,
            depth: self.depth,
            idx: self.voxels.len(),
            total: self.voxels.len(),
        }
    }

    /// Iterates every point in linear order, once each.
    pub fn iter(&self) -> PointIter {
        self.cbegin()
    }
}

impl<'a> IntoIterator for &'a Image {
    type Item = Point3;
    type IntoIter = PointIter;

    fn into_iter(self) -> PointIter {
        self.cbegin()
    }
}

/// An iterator over every point of an [`Image`] in x-fastest linear order.
///
/// A default-constructed `PointIter` always compares equal to any
/// exhausted (`cend`) iterator: both carry `idx >= total`, which is the
/// canonical "at end" state regardless of which image produced them.
#[derive(Clone, Debug, Default)]
pub struct PointIter {
    width: usize,
    height: usize,
    depth: usize,
    idx: usize,
    total: usize,
}

impl PointIter {
    fn at_end(&self) -> bool {
        self.idx >= self.total
    }
}

impl PartialEq for PointIter {
    fn eq(&self, other: &Self) -> bool {
        match (self.at_end(), other.at_end()) {
            (true, true) => true,
            (false, false) => {
                self.idx == other.idx
                    && self.width == other.width
                    && self.height == other.height
                    && self.depth == other.depth
            }
            _ => false,
        }
    }
}

impl Eq for PointIter {}

impl Iterator for PointIter {
    type Item = Point3;

    fn next(&mut self) -> Option<Point3> {
        if self.at_end() {
            return None;
        }
        let i = self.idx;
        let x = i % self.width;
        let y = (i / self.width) % self.height;
        let z = i / (self.width * self.height);
        self.idx += 1;
        Some(Point3::new(x as i64, y as i64, z as i64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total.saturating_sub(self.idx);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PointIter {}

//! Morphological descriptors computed directly from the voxel cube,
//! independent of the contour/Dijkstra/network pipeline.
//!
//! Two kernels: [`surface_to_volume`] (a single ratio per phase) and
//! [`fractal_dimension`] (a box-counting size distribution per phase).
//! Neither performs file I/O; an exporter outside this crate is
//! responsible for writing `*_frac_plot.dat`-style files from the returned
//! series.

use crate::image::Image;
use crate::neighbours::{NeighbourCalculator, SixNeighbourCalculator};

/// Per-phase surface/volume ratio for a binary (pore/rock) cube.
///
/// For each phase, a voxel counts toward `surface` when at least one
/// in-bounds 6-neighbour belongs to the other phase, and toward `volume`
/// otherwise (the image boundary itself never counts as "the other
/// phase" and a voxel at the edge of the cube with no out-of-phase neighbour
/// is bulk, not surface).
///
/// Returns `[pore_ratio, rock_ratio]`. A phase with zero bulk voxels (every
/// voxel of that phase touches the other phase) yields an infinite ratio,
/// which is the mathematically correct answer, not an error.
#[must_use]
pub fn surface_to_volume(image: &Image) -> [f64; 2] {
    let mut surface = [0u64; 2];
    let mut bulk = [0u64; 2];

    for p in image.iter() {
        let phase = usize::from(image.is_object_point(p));
        let is_surface = SixNeighbourCalculator.neighbours(p).into_iter().any(|n| {
            image.label_at(n).is_some() && image.is_object_point(n) != image.is_object_point(p)
        });
        if is_surface {
            surface[phase] += 1;
        } else {
            bulk[phase] += 1;
        }
    }

    log::debug!(
        "surface_to_volume: pore surface={} bulk={}, rock surface={} bulk={}",
        surface[0],
        bulk[0],
        surface[1],
        bulk[1]
    );

    [
        surface[0] as f64 / bulk[0] as f64,
        surface[1] as f64 / bulk[1] as f64,
    ]
}

/// The three phases `fractal_dimension` classifies every voxel into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pore,
    Surface,
    Rock,
}

fn classify(image: &Image) -> Vec<Phase> {
    let mut phases = Vec::with_capacity(image.len());
    for p in image.iter() {
        let phase = if !image.is_object_point(p) {
            Phase::Pore
        } else {
            let touches_pore = SixNeighbourCalculator
                .neighbours(p)
                .into_iter()
                .any(|n| image.label_at(n).is_some() && !image.is_object_point(n));
            if touches_pore {
                Phase::Surface
            } else {
                Phase::Rock
            }
        };
        phases.push(phase);
    }
    phases
}

fn box_sizes(image: &Image) -> Vec<u32> {
    let min_dim = (0..3)
        .map(|axis| {
            image
                .get_dimension_size(axis)
                .expect("axis is always in 0..3")
        })
        .min()
        .unwrap_or(0);
    let mut sizes = Vec::new();
    let mut size = 1u32;
    while (size as usize) <= min_dim && min_dim > 0 {
        sizes.push(size);
        size *= 2;
    }
    sizes
}

fn box_count(image: &Image, phases: &[Phase], target: Phase, box_size: u32) -> u64 {
    let box_size = box_size as usize;
    let grid: Vec<usize> = (0..3)
        .map(|axis| {
            let size = image
                .get_dimension_size(axis)
                .expect("axis is always in 0..3");
            (size + box_size - 1) / box_size
        })
        .collect();
    let (gw, gh) = (grid[0], grid[1]);

    let mut occupied = vec![false; grid[0] * grid[1] * grid[2]];
    for p in image.iter() {
        let idx = image
            .linear_index(p)
            .expect("image.iter() only yields in-bounds points");
        if phases[idx] != target {
            continue;
        }
        let bx = p.x as usize / box_size;
        let by = p.y as usize / box_size;
        let bz = p.z as usize / box_size;
        occupied[bx + gw * by + gw * gh * bz] = true;
    }
    occupied.iter().filter(|&&o| o).count() as u64
}

/// A box-counting size distribution: `(box edge length, occupied box
/// count)` pairs for increasing power-of-two box edges, up to the cube's
/// smallest dimension.
pub type SizeDistribution = Vec<(u32, u64)>;

/// Box-counting fractal dimension data for all three phases of a cube.
///
/// Field names mirror the plot files an exporter would write them to
/// (`pore_frac_plot.dat`, `surf_frac_plot.dat`, `rock_frac_plot.dat`):
/// whitespace-separated two-column ASCII with box size in the first column
/// and occupied-box count in the second, monotonically increasing box size.
#[derive(Clone, Debug, Default)]
pub struct FractalDimension {
    /// Box-counting series for background (pore) voxels.
    pub pore: SizeDistribution,
    /// Box-counting series for object voxels touching the pore phase.
    pub surface: SizeDistribution,
    /// Box-counting series for object voxels touching only other object
    /// voxels.
    pub rock: SizeDistribution,
}

/// Computes the box-counting size distribution for each of the three
/// phases (pore, surface, rock) of `image`.
#[must_use]
pub fn fractal_dimension(image: &Image) -> FractalDimension {
    let phases = classify(image);
    let sizes = box_sizes(image);

    let series_for = |target: Phase| -> SizeDistribution {
        sizes
            .iter()
            .map(|&size| (size, box_count(image, &phases, target, size)))
            .collect()
    };

    let result = FractalDimension {
        pore: series_for(Phase::Pore),
        surface: series_for(Phase::Surface),
        rock: series_for(Phase::Rock),
    };
    log::debug!(
        "fractal_dimension: {} box sizes, pore/surface/rock series lengths {}/{}/{}",
        sizes.len(),
        result.pore.len(),
        result.surface.len(),
        result.rock.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_with_central_cavity(side: i64, cavity_lo: i64, cavity_hi: i64) -> Image {
        let n = side as usize;
        let mut voxels = vec![1u8; n * n * n];
        for x in 0..side {
            for y in 0..side {
                for z in 0..side {
                    let in_cavity = (cavity_lo..cavity_hi).contains(&x)
                        && (cavity_lo..cavity_hi).contains(&y)
                        && (cavity_lo..cavity_hi).contains(&z);
                    if in_cavity {
                        let idx = (x + side * y + side * side * z) as usize;
                        voxels[idx] = 0;
                    }
                }
            }
        }
        Image::new(voxels, n, n, n).unwrap()
    }

    #[test]
    fn scenario_six_surface_to_volume_ratios() {
        // A 7^3 all-foreground cube with a central 3^3 background cavity.
        let image = cube_with_central_cavity(7, 2, 5);
        let ratios = surface_to_volume(&image);
        assert!((ratios[0] - 26.0).abs() < 1e-9);
        assert!((ratios[1] - 98.0 / 218.0).abs() < 1e-9);
    }

    #[test]
    fn fully_solid_cube_has_no_surface_phase() {
        let image = Image::new(vec![1; 27], 3, 3, 3).unwrap();
        let fd = fractal_dimension(&image);
        for &(_, count) in &fd.surface {
            assert_eq!(count, 0);
        }
        for &(_, count) in &fd.pore {
            assert_eq!(count, 0);
        }
    }

    #[test]
    fn box_counts_never_increase_as_box_size_grows() {
        let image = cube_with_central_cavity(8, 2, 6);
        let fd = fractal_dimension(&image);
        for series in [&fd.pore, &fd.surface, &fd.rock] {
            for pair in series.windows(2) {
                assert!(pair[0].0 < pair[1].0);
                assert!(pair[0].1 >= pair[1].1);
            }
        }
    }

    #[test]
    fn box_size_one_counts_every_voxel_of_the_phase() {
        let image = cube_with_central_cavity(7, 2, 5);
        let fd = fractal_dimension(&image);
        assert_eq!(fd.pore[0], (1, 27));
        assert_eq!(fd.surface[0].1 + fd.rock[0].1, 316);
    }

    /// A 12-wide cube labeled by `x mod 6` (0..3 pore, 3..6 rock), so every
    /// axis-aligned span of 6 or more voxels contains pore, rock-touching
    /// rock, and bulk rock alike. An irregular, well-mixed stand-in for the
    /// "N^3 random cube" scenario without a source of randomness.
    fn striped_cube(n: i64) -> Image {
        let side = n as usize;
        let mut voxels = vec![0u8; side * side * side];
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let idx = (x + n * y + n * n * z) as usize;
                    voxels[idx] = u8::from(x % 6 >= 3);
                }
            }
        }
        Image::new(voxels, side, side, side).unwrap()
    }

    #[test]
    fn cross_phase_box_counts_converge_at_coarse_box_sizes() {
        let n = 12i64;
        let image = striped_cube(n);
        let fd = fractal_dimension(&image);

        let &(pore_size, pore_count) = fd.pore.last().unwrap();
        let &(surface_size, surface_count) = fd.surface.last().unwrap();
        let &(rock_size, rock_count) = fd.rock.last().unwrap();
        assert_eq!([pore_size, surface_size, rock_size], [8, 8, 8]);

        let counts = [pore_count as f64, surface_count as f64, rock_count as f64];
        let tolerance = 1.0 / n as f64;
        for i in 0..counts.len() {
            for j in (i + 1)..counts.len() {
                let denom = counts[i].max(counts[j]);
                let relative_diff = if denom == 0.0 {
                    0.0
                } else {
                    (counts[i] - counts[j]).abs() / denom
                };
                assert!(
                    relative_diff <= tolerance,
                    "phase {i} vs {j}: relative difference {relative_diff} exceeds 1/N = {tolerance}"
                );
            }
        }
    }
}
